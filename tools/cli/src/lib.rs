use clap::{Args, Parser, Subcommand, ValueEnum};
use salary_accrual::{Currency, Language, SalaryKind};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub mod render;
pub mod ticker;
pub mod utils;

#[derive(Parser)]
#[command(name = "salary-ticker")]
#[command(about = "Watch your salary accrue in real time")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Configuration file path
    #[arg(short, long, default_value = "~/.salary-ticker/config.toml", global = true)]
    pub config: PathBuf,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Label language (tr or en)
    #[arg(long, global = true)]
    pub lang: Option<Language>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Start the live dashboard
    Track {
        #[command(flatten)]
        salary: SalaryArgs,

        /// Snap numbers instead of easing between ticks
        #[arg(long)]
        no_smoothing: bool,

        /// Stop on its own after this long (e.g. 30s, 5m)
        #[arg(long = "for", value_name = "DURATION")]
        run_for: Option<String>,
    },

    /// Print a single earnings snapshot
    Snapshot {
        #[command(flatten)]
        salary: SalaryArgs,

        /// Output format
        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,

        /// Local time to evaluate at instead of now (YYYY-MM-DDTHH:MM:SS)
        #[arg(long)]
        at: Option<String>,
    },

    /// List the built-in preset earners
    Presets,

    /// Show effective settings
    Status,
}

#[derive(Args, Debug, Clone, Default)]
pub struct SalaryArgs {
    /// Monthly salary, e.g. 30.000 for TL or 4,500.50 for USD
    #[arg(long)]
    pub amount: Option<String>,

    /// Net or gross (label only)
    #[arg(long)]
    pub kind: Option<SalaryKind>,

    /// TL, USD or EUR
    #[arg(long)]
    pub currency: Option<Currency>,

    /// Day of month the salary is paid (1-31)
    #[arg(long)]
    pub pay_day: Option<u32>,

    /// Track a preset earner instead of a salary
    #[arg(long, conflicts_with_all = ["amount", "kind", "currency", "pay_day"])]
    pub preset: Option<String>,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub display: DisplaySettings,
    #[serde(default)]
    pub defaults: DefaultsSettings,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DisplaySettings {
    pub language: Language,
    /// Redraw cadence between ticks while numbers ease
    pub frame_interval_ms: u64,
    pub smoothing: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DefaultsSettings {
    pub salary_kind: SalaryKind,
    pub currency: Currency,
    pub pay_day: u32,
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            language: Language::Tr,
            frame_interval_ms: 50,
            smoothing: true,
        }
    }
}

impl Default for DefaultsSettings {
    fn default() -> Self {
        Self {
            salary_kind: SalaryKind::Net,
            currency: Currency::TL,
            pay_day: 15,
        }
    }
}
