use anyhow::Result;
use chrono::{Local, NaiveDateTime};
use indicatif::{MultiProgress, ProgressBar, ProgressDrawTarget, ProgressStyle};
use log::{debug, info, warn};
use salary_accrual::{
    compute_earnings, find_preset, Configuration, Currency, EarningsSnapshot, Language, PayDay,
    Rates, SalaryKind, SetupForm, Widget, PRESET_EARNERS,
};
use salary_ticker::render::{
    cycle_message, cycle_prefix, render_counters, render_plain, render_rates,
};
use salary_ticker::ticker::{self, Control, Frame, Outcome, TickerOptions};
use salary_ticker::utils::{format_table, parse_duration, parse_local_datetime};
use salary_ticker::{OutputFormat, SalaryArgs, Settings};
use serde::Serialize;
use std::io::BufRead;
use std::path::Path;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use uuid::Uuid;

use crate::config::expand_path;
use crate::prompts::prompt_setup;

/// Builds a configuration from flags, or `None` when no salary was given.
pub fn configuration_from_args(
    args: &SalaryArgs,
    settings: &Settings,
) -> Result<Option<Configuration>> {
    if let Some(id) = &args.preset {
        let preset = find_preset(id)?;
        return Ok(Some(Configuration::from_preset(preset)?));
    }

    let Some(amount) = &args.amount else {
        return Ok(None);
    };

    let form = SetupForm {
        kind: args.kind.unwrap_or(settings.defaults.salary_kind),
        currency: args.currency.unwrap_or(settings.defaults.currency),
        salary: amount.clone(),
        pay_day: args.pay_day.unwrap_or(settings.defaults.pay_day),
    };
    Ok(Some(form.submit()?))
}

fn wall_clock() -> NaiveDateTime {
    Local::now().naive_local()
}

pub async fn track_command(
    args: SalaryArgs,
    no_smoothing: bool,
    run_for: Option<String>,
    language: Language,
    settings: &Settings,
) -> Result<()> {
    let run_for = run_for
        .as_deref()
        .map(parse_duration)
        .transpose()?
        .map(Duration::from_secs);

    let options = TickerOptions {
        frame_interval: (settings.display.smoothing && !no_smoothing)
            .then(|| Duration::from_millis(settings.display.frame_interval_ms.max(10))),
    };

    let mut pending = configuration_from_args(&args, settings)?;
    let mut language = language;

    loop {
        let config = match pending.take() {
            Some(config) => config,
            None => {
                let defaults = settings.defaults.clone();
                tokio::task::spawn_blocking(move || prompt_setup(language, &defaults)).await??
            }
        };

        let mut widget = Widget::new(language);
        widget.confirm(config, wall_clock(), tokio::time::Instant::now().into_std())?;

        let (widget, outcome) = run_dashboard(widget, options, run_for).await?;
        language = widget.language();

        match outcome {
            Outcome::Quit => return Ok(()),
            Outcome::Reset if !console::user_attended() => {
                info!("Reset requested without a terminal, exiting");
                return Ok(());
            }
            Outcome::Reset => continue,
        }
    }
}

async fn run_dashboard(
    widget: Widget,
    options: TickerOptions,
    run_for: Option<Duration>,
) -> Result<(Widget, Outcome)> {
    let session_id = Uuid::new_v4();
    info!("Session {} started", session_id);

    let live = LiveDisplay::new();
    let last_plain = Arc::new(Mutex::new(String::new()));

    let mut handle = {
        let live = live.clone();
        let last_plain = Arc::clone(&last_plain);
        ticker::spawn(widget, options, wall_clock, move |frame: &Frame<'_>| {
            live.draw(frame);
            if let Ok(mut plain) = last_plain.lock() {
                *plain = render_plain(frame);
            }
        })
    };

    spawn_control_reader(handle.controller());

    let deadline = async {
        match run_for {
            Some(limit) => tokio::time::sleep(limit).await,
            None => std::future::pending().await,
        }
    };

    let finished = tokio::select! {
        finished = handle.wait() => Some(finished?),
        _ = tokio::signal::ctrl_c() => {
            debug!("Interrupted");
            None
        }
        _ = deadline => {
            debug!("Time limit reached");
            None
        }
    };
    let finished = match finished {
        Some(finished) => finished,
        None => (handle.stop().await?, Outcome::Quit),
    };

    live.clear();
    let summary = last_plain.lock().map(|plain| plain.clone()).unwrap_or_default();
    if !summary.is_empty() {
        println!("{}", summary);
    }
    info!("Session {} ended", session_id);

    Ok(finished)
}

/// Turns stdin lines into control requests: `r` resets, `l` switches
/// language, `q` quits.
///
/// Runs on a plain thread so a pending read never holds up shutdown. The
/// thread exits after a reset or quit so the next setup prompt gets stdin.
fn spawn_control_reader(control: tokio::sync::mpsc::Sender<Control>) {
    std::thread::spawn(move || {
        for line in std::io::stdin().lock().lines() {
            let line = match line {
                Ok(line) => line,
                Err(e) => {
                    warn!("Stopped reading controls: {}", e);
                    return;
                }
            };

            let request = match line.trim().to_lowercase().as_str() {
                "r" | "reset" => Control::Reset,
                "l" | "lang" => Control::ToggleLanguage,
                "q" | "quit" => Control::Quit,
                "" => continue,
                other => {
                    warn!("Unknown control '{}' (r = reset, l = language, q = quit)", other);
                    continue;
                }
            };

            if control.blocking_send(request).is_err() || request != Control::ToggleLanguage {
                return;
            }
        }
    });
}

/// Three stacked indicatif lines: counters, pay-cycle bar, rate cards.
#[derive(Clone)]
struct LiveDisplay {
    multi: MultiProgress,
    counters: ProgressBar,
    cycle: ProgressBar,
    rates: ProgressBar,
}

impl LiveDisplay {
    fn new() -> Self {
        let multi = MultiProgress::with_draw_target(ProgressDrawTarget::stderr_with_hz(20));
        let text_style =
            ProgressStyle::with_template("{msg}").unwrap_or_else(|_| ProgressStyle::default_bar());
        let bar_style =
            ProgressStyle::with_template("{prefix} [{bar:32.magenta/green}] {pos:>3}% {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("█▓░");

        let counters = multi.add(ProgressBar::new(0).with_style(text_style.clone()));
        let cycle = multi.add(ProgressBar::new(100).with_style(bar_style));
        let rates = multi.add(ProgressBar::new(0).with_style(text_style));

        Self {
            multi,
            counters,
            cycle,
            rates,
        }
    }

    fn draw(&self, frame: &Frame<'_>) {
        let colors = console::colors_enabled_stderr();
        self.counters.set_message(render_counters(frame, colors));
        self.cycle.set_prefix(cycle_prefix(frame));
        self.cycle.set_position(frame.view.snapshot.percent() as u64);
        self.cycle.set_message(cycle_message(frame));
        self.rates.set_message(render_rates(frame, colors));
    }

    fn clear(&self) {
        for bar in [&self.counters, &self.cycle, &self.rates] {
            bar.finish_and_clear();
        }
        let _ = self.multi.clear();
    }
}

#[derive(Debug, Serialize)]
struct FormattedRates {
    per_day: String,
    per_hour: String,
    per_minute: String,
    per_second: String,
}

impl FormattedRates {
    fn new(rates: &Rates, currency: Currency) -> Self {
        Self {
            per_day: currency.format(rates.per_day),
            per_hour: currency.format(rates.per_hour),
            per_minute: currency.format(rates.per_minute),
            per_second: currency.format(rates.per_second),
        }
    }
}

#[derive(Debug, Serialize)]
struct SnapshotReport {
    caption: String,
    salary_kind: SalaryKind,
    currency: Currency,
    monthly_amount: f64,
    pay_day: PayDay,
    evaluated_at: NaiveDateTime,
    cycle_start: NaiveDateTime,
    cycle_end: NaiveDateTime,
    elapsed_fraction: f64,
    percent: u32,
    days_left: i64,
    earned: f64,
    earned_formatted: String,
    rates: Rates,
    rates_formatted: FormattedRates,
}

impl SnapshotReport {
    fn new(
        config: &Configuration,
        snapshot: &EarningsSnapshot,
        evaluated_at: NaiveDateTime,
    ) -> Self {
        Self {
            caption: config.caption(),
            salary_kind: config.kind,
            currency: config.currency,
            monthly_amount: config.monthly_amount(),
            pay_day: config.pay_day,
            evaluated_at,
            cycle_start: snapshot.cycle_start,
            cycle_end: snapshot.cycle_end,
            elapsed_fraction: snapshot.elapsed_fraction,
            percent: snapshot.percent(),
            days_left: snapshot.days_left,
            earned: snapshot.earned,
            earned_formatted: config.currency.format(snapshot.earned),
            rates: snapshot.rates,
            rates_formatted: FormattedRates::new(&snapshot.rates, config.currency),
        }
    }
}

pub async fn snapshot_command(
    args: SalaryArgs,
    format: OutputFormat,
    at: Option<String>,
    language: Language,
    settings: &Settings,
) -> Result<()> {
    let config = configuration_from_args(&args, settings)?
        .ok_or_else(|| anyhow::anyhow!("No salary amount provided. Pass --amount or --preset"))?;

    let evaluated_at = match at.as_deref() {
        Some(value) => parse_local_datetime(value)?,
        None => wall_clock(),
    };
    debug!("Evaluating snapshot at {}", evaluated_at);

    let snapshot = compute_earnings(config.monthly_amount(), config.pay_day, evaluated_at)?;
    let report = SnapshotReport::new(&config, &snapshot, evaluated_at);

    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&report)?),
        OutputFormat::Yaml => print!("{}", serde_yaml::to_string(&report)?),
        OutputFormat::Text => {
            let t = salary_accrual::labels(language);
            let caps = |text: &str| salary_accrual::upper(text, language);
            let currency = config.currency;
            println!("{}: {}", caps(t.earned_this_month), report.earned_formatted);
            println!("  {}", report.caption);
            println!(
                "{}: {}% · {} {}",
                caps(t.pay_cycle),
                report.percent,
                report.days_left,
                t.days_left
            );
            println!("  {}: {}", t.last_pay, report.cycle_start);
            println!("  {}: {}", t.next_pay, report.cycle_end);
            println!("{}: {}", caps(t.daily), currency.format(snapshot.rates.per_day));
            println!("{}: {}", caps(t.hourly), currency.format(snapshot.rates.per_hour));
            println!("{}: {}", caps(t.per_minute), currency.format(snapshot.rates.per_minute));
            println!("{}: {}", caps(t.per_second), currency.format(snapshot.rates.per_second));
        }
    }

    Ok(())
}

pub async fn presets_command(language: Language) -> Result<()> {
    let t = salary_accrual::labels(language);
    let rows: Vec<Vec<String>> = PRESET_EARNERS
        .iter()
        .map(|preset| {
            let rates = Rates::from_monthly(preset.monthly_equivalent());
            vec![
                preset.id.to_string(),
                preset.name.to_string(),
                Currency::USD.format(preset.annual_usd),
                Currency::USD.format(preset.monthly_equivalent()),
                Currency::USD.format(rates.per_second),
            ]
        })
        .collect();

    println!(
        "{}",
        format_table(
            &["ID", "Name", "Annual", t.monthly_salary, t.per_second],
            &rows
        )
    );

    Ok(())
}

pub async fn status_command(
    config_path: &Path,
    language: Language,
    settings: &Settings,
) -> Result<()> {
    let t = salary_accrual::labels(language);

    println!("{} Status", t.app_name);
    println!("========================");
    println!();

    println!("Configuration:");
    println!("  Config file: {}", expand_path(config_path)?.display());
    println!("  Language: {}", language);
    println!(
        "  Smoothing: {} ({} ms frames)",
        if settings.display.smoothing { "on" } else { "off" },
        settings.display.frame_interval_ms
    );
    println!();

    println!("Setup defaults:");
    println!("  {}: {}", t.salary_type, settings.defaults.salary_kind);
    println!("  {}: {}", t.currency, settings.defaults.currency);
    println!("  {}: {}", t.pay_day, PayDay::new(settings.defaults.pay_day));
    println!();

    print!("Terminal: ");
    if console::user_attended() {
        println!("✅ Interactive setup available");
    } else {
        println!("❌ Not a terminal");
        println!("   Pass --amount or --preset to track without prompts");
    }

    println!();
    println!("Ready to track! {}", t.footer);

    Ok(())
}
