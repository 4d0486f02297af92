//! Salary accrual core.
//!
//! Computes how much of a monthly salary has been earned so far in the
//! current pay cycle, the flat per-unit rates derived from it, and the
//! "earned since opening" session counter. Rendering lives elsewhere; this
//! crate only produces the numbers and the labels used to show them.

pub mod config;
pub mod error;
pub mod i18n;
pub mod money;
pub mod pay_cycle;
pub mod presets;
pub mod session;
pub mod smoothing;
pub mod state;

pub use config::{Configuration, PayDay, SalaryAmount, SalaryKind, SetupForm};
pub use error::AccrualError;
pub use i18n::{labels, upper, Labels, Language};
pub use money::{format_money, sanitize_amount_input, AmountInput, Currency};
pub use pay_cycle::{compute_earnings, EarningsSnapshot, Rates};
pub use presets::{find_preset, PresetEarner, PRESET_EARNERS};
pub use session::SessionCounter;
pub use smoothing::{ease_out_cubic, SmoothedValue, SMOOTHING_DURATION};
pub use state::{Widget, WidgetView};
