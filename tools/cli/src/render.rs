//! Text rendering of the dashboard.
//!
//! Everything here is a pure function of a [`Frame`]; the ticker decides
//! when to draw and where.

use chrono::{Datelike, NaiveDateTime};
use console::Style;
use salary_accrual::{upper, Currency, Language};

use crate::ticker::Frame;
use crate::utils::format_duration;

const BAR_WIDTH: usize = 32;

const WEEKDAYS_TR: [&str; 7] = [
    "Pazartesi", "Salı", "Çarşamba", "Perşembe", "Cuma", "Cumartesi", "Pazar",
];
const WEEKDAYS_EN: [&str; 7] = [
    "Monday", "Tuesday", "Wednesday", "Thursday", "Friday", "Saturday", "Sunday",
];
const MONTHS_TR: [&str; 12] = [
    "Ocak", "Şubat", "Mart", "Nisan", "Mayıs", "Haziran", "Temmuz", "Ağustos", "Eylül", "Ekim",
    "Kasım", "Aralık",
];
const MONTHS_EN: [&str; 12] = [
    "January", "February", "March", "April", "May", "June", "July", "August", "September",
    "October", "November", "December",
];

struct Palette {
    heading: Style,
    live: Style,
    session: Style,
    amount: Style,
    dim: Style,
}

impl Palette {
    fn new(colors: bool) -> Self {
        let base = || Style::new().force_styling(colors);
        Self {
            heading: base().bold(),
            live: base().green().bold(),
            session: base().yellow().bold(),
            amount: base().magenta().bold(),
            dim: base().dim(),
        }
    }
}

/// Currency the frame's amounts are shown in.
pub fn display_currency(frame: &Frame<'_>) -> Currency {
    frame.view.config.currency
}

/// Long local date and time, e.g. "16 Haziran Pazar 09:05:03" or
/// "Sunday, June 16 9:05:03 AM".
pub fn format_clock(wall: NaiveDateTime, language: Language) -> String {
    let weekday = wall.weekday().num_days_from_monday() as usize;
    let month = wall.month0() as usize;
    match language {
        Language::Tr => format!(
            "{} {} {} {}",
            wall.day(),
            MONTHS_TR[month],
            WEEKDAYS_TR[weekday],
            wall.format("%H:%M:%S")
        ),
        Language::En => format!(
            "{}, {} {} {}",
            WEEKDAYS_EN[weekday],
            MONTHS_EN[month],
            wall.day(),
            wall.format("%-I:%M:%S %p")
        ),
    }
}

fn format_date(wall: NaiveDateTime, language: Language) -> String {
    match language {
        Language::Tr => wall.format("%d.%m.%Y").to_string(),
        Language::En => wall.format("%Y-%m-%d").to_string(),
    }
}

/// Clock, monthly counter and session counter.
pub fn render_counters(frame: &Frame<'_>, colors: bool) -> String {
    let palette = Palette::new(colors);
    let labels = frame.view.labels;
    let language = frame.view.language;
    let currency = display_currency(frame);

    let mut lines = vec![
        palette.dim.apply_to(format_clock(frame.wall, language)).to_string(),
        String::new(),
        format!(
            "{}  {}",
            palette.heading.apply_to(upper(labels.earned_this_month, language)),
            palette.live.apply_to(format!("● {}", upper(labels.live, language)))
        ),
        format!("  {}", palette.amount.apply_to(currency.format(frame.earned))),
        format!("  {}", palette.dim.apply_to(frame.view.config.caption())),
        String::new(),
        format!(
            "{}  {}",
            palette.heading.apply_to(upper(labels.earned_this_session, language)),
            palette.session.apply_to(format!("● {}", upper(labels.session, language)))
        ),
        format!("  {}", palette.amount.apply_to(currency.format(frame.session_earned))),
        format!(
            "  {}",
            palette.dim.apply_to(format!(
                "{} ({})",
                labels.session_since,
                format_duration(frame.session_elapsed.as_secs())
            ))
        ),
    ];
    lines.push(String::new());
    lines.join("\n")
}

/// Label to the left of the pay-cycle bar.
pub fn cycle_prefix(frame: &Frame<'_>) -> String {
    upper(frame.view.labels.pay_cycle, frame.view.language)
}

/// Text to the right of the pay-cycle bar.
pub fn cycle_message(frame: &Frame<'_>) -> String {
    let labels = frame.view.labels;
    let language = frame.view.language;
    let snapshot = frame.view.snapshot;
    format!(
        "{} {} · {} {} → {} {}",
        snapshot.days_left,
        labels.days_left,
        labels.last_pay,
        format_date(snapshot.cycle_start, language),
        labels.next_pay,
        format_date(snapshot.cycle_end, language)
    )
}

/// Plain text bar, used when there is no terminal to draw on.
pub fn text_bar(percent: u32) -> String {
    let filled = (percent.min(100) as usize * BAR_WIDTH + 50) / 100;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

/// The four flat rate cards and the footer.
pub fn render_rates(frame: &Frame<'_>, colors: bool) -> String {
    let palette = Palette::new(colors);
    let labels = frame.view.labels;
    let language = frame.view.language;
    let currency = display_currency(frame);
    let rates = frame.view.snapshot.rates;

    let cards = [
        (labels.daily, rates.per_day),
        (labels.hourly, rates.per_hour),
        (labels.per_minute, rates.per_minute),
        (labels.per_second, rates.per_second),
    ];
    let width = cards
        .iter()
        .map(|(label, _)| upper(label, language).chars().count())
        .max()
        .unwrap_or(0);

    let mut lines: Vec<String> = cards
        .iter()
        .map(|(label, value)| {
            let label = upper(label, language);
            let pad = " ".repeat(width - label.chars().count());
            format!(
                "{}{}  {}",
                palette.dim.apply_to(label),
                pad,
                palette.heading.apply_to(currency.format(*value))
            )
        })
        .collect();
    lines.push(String::new());
    lines.push(palette.dim.apply_to(labels.footer).to_string());
    lines.join("\n")
}

/// Whole dashboard as uncoloured text.
pub fn render_plain(frame: &Frame<'_>) -> String {
    let percent = frame.view.snapshot.percent();
    format!(
        "{}\n{} {} {:>3}% {}\n\n{}",
        render_counters(frame, false),
        cycle_prefix(frame),
        text_bar(percent),
        percent,
        cycle_message(frame),
        render_rates(frame, false)
    )
}
