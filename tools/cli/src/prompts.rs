use dialoguer::theme::ColorfulTheme;
use dialoguer::{Input, Select};
use salary_accrual::{
    find_preset, labels, sanitize_amount_input, AccrualError, Configuration, Currency, Language,
    SalaryKind, SetupForm, PRESET_EARNERS,
};
use salary_ticker::DefaultsSettings;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SetupError {
    #[error("No salary provided. Pass --amount or --preset, or run in a terminal to be prompted")]
    NotInteractive,

    #[error("Setup prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),

    #[error(transparent)]
    Accrual(#[from] AccrualError),
}

/// Interactive setup screen. Blocks on the terminal.
pub fn prompt_setup(
    language: Language,
    defaults: &DefaultsSettings,
) -> Result<Configuration, SetupError> {
    if !console::user_attended() {
        return Err(SetupError::NotInteractive);
    }

    let t = labels(language);
    let theme = ColorfulTheme::default();

    println!("{}", console::style(t.app_name).bold());
    println!("{}", console::style(t.app_subtitle).dim());
    println!();

    let mut sources = vec![format!("{} {}", t.monthly_salary, t.salary_label)];
    sources.extend(PRESET_EARNERS.iter().map(|preset| preset.name.to_string()));
    let source = Select::with_theme(&theme)
        .items(&sources)
        .default(0)
        .interact()?;
    if source > 0 {
        let preset = find_preset(PRESET_EARNERS[source - 1].id)?;
        return Ok(Configuration::from_preset(preset)?);
    }

    let kinds = [t.net, t.gross];
    let kind_default = match defaults.salary_kind {
        SalaryKind::Net => 0,
        SalaryKind::Gross => 1,
    };
    let kind = match Select::with_theme(&theme)
        .with_prompt(t.salary_type)
        .items(&kinds)
        .default(kind_default)
        .interact()?
    {
        0 => SalaryKind::Net,
        _ => SalaryKind::Gross,
    };

    let currencies: Vec<&str> = Currency::ALL.iter().map(|c| c.code()).collect();
    let currency_default = Currency::ALL
        .iter()
        .position(|c| *c == defaults.currency)
        .unwrap_or(0);
    let currency = Currency::ALL[Select::with_theme(&theme)
        .with_prompt(t.currency)
        .items(&currencies)
        .default(currency_default)
        .interact()?];

    let mut form = SetupForm {
        kind,
        currency,
        salary: String::new(),
        pay_day: defaults.pay_day,
    };

    let salary_prompt = format!("{} {} ({})", t.monthly_salary, t.salary_label, currency.symbol());
    let salary: String = Input::with_theme(&theme)
        .with_prompt(salary_prompt)
        .validate_with(|input: &String| -> Result<(), String> {
            let candidate = SetupForm {
                salary: input.clone(),
                ..form.clone()
            };
            if candidate.is_valid() {
                Ok(())
            } else {
                Err(AccrualError::InvalidAmount(input.clone()).to_string())
            }
        })
        .interact_text()?;
    let typed = sanitize_amount_input(&salary, currency);
    let echo = format!("{}{}", currency.symbol(), typed.display);
    println!("  {}", console::style(echo).dim());
    form.salary = salary;

    form.pay_day = Input::with_theme(&theme)
        .with_prompt(t.pay_day)
        .default(defaults.pay_day)
        .interact_text()?;

    println!("{}", console::style(format!("→ {}", t.start_button)).green());
    Ok(form.submit()?)
}
