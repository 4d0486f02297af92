use log::warn;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{AccrualError, Result};
use crate::money::{sanitize_amount_input, Currency};
use crate::presets::PresetEarner;

/// Net or gross. Only ever shown as a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SalaryKind {
    #[default]
    Net,
    Gross,
}

impl fmt::Display for SalaryKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SalaryKind::Net => f.write_str("Net"),
            SalaryKind::Gross => f.write_str("Gross"),
        }
    }
}

impl FromStr for SalaryKind {
    type Err = AccrualError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "net" => Ok(SalaryKind::Net),
            "gross" | "brut" | "brüt" => Ok(SalaryKind::Gross),
            _ => Err(AccrualError::UnknownSalaryKind(s.to_string())),
        }
    }
}

/// Day of month anchoring the pay cycle, always within 1..=31.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "u32", into = "u32")]
pub struct PayDay(u32);

impl PayDay {
    pub const FIRST: PayDay = PayDay(1);

    /// Clamps `day` into 1..=31.
    pub fn new(day: u32) -> Self {
        let clamped = day.clamp(1, 31);
        if clamped != day {
            warn!("Pay day {} out of range, using {}", day, clamped);
        }
        PayDay(clamped)
    }

    pub fn get(&self) -> u32 {
        self.0
    }
}

impl Default for PayDay {
    fn default() -> Self {
        PayDay(15)
    }
}

impl From<u32> for PayDay {
    fn from(day: u32) -> Self {
        PayDay::new(day)
    }
}

impl From<PayDay> for u32 {
    fn from(day: PayDay) -> Self {
        day.0
    }
}

impl fmt::Display for PayDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Monthly salary, finite and strictly positive.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize)]
pub struct SalaryAmount(f64);

impl SalaryAmount {
    pub fn new(amount: f64) -> Result<Self> {
        if amount.is_finite() && amount > 0.0 {
            Ok(SalaryAmount(amount))
        } else {
            Err(AccrualError::InvalidAmount(amount.to_string()))
        }
    }

    /// Parses a typed amount after stripping it in `currency`'s number locale.
    pub fn parse(raw: &str, currency: Currency) -> Result<Self> {
        sanitize_amount_input(raw, currency)
            .value()
            .ok_or_else(|| AccrualError::InvalidAmount(raw.to_string()))
            .and_then(Self::new)
            .map_err(|_| AccrualError::InvalidAmount(raw.to_string()))
    }

    pub fn get(&self) -> f64 {
        self.0
    }
}

/// A confirmed tracking setup. Immutable until the widget is reset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Configuration {
    pub amount: SalaryAmount,
    pub kind: SalaryKind,
    pub currency: Currency,
    pub pay_day: PayDay,
    pub preset: Option<PresetEarner>,
}

impl Configuration {
    pub fn new(
        amount: SalaryAmount,
        kind: SalaryKind,
        currency: Currency,
        pay_day: PayDay,
    ) -> Self {
        Self {
            amount,
            kind,
            currency,
            pay_day,
            preset: None,
        }
    }

    /// Seeds a configuration from a preset earner: monthly equivalent in USD,
    /// paid on the 1st.
    pub fn from_preset(preset: &PresetEarner) -> Result<Self> {
        Ok(Self {
            amount: SalaryAmount::new(preset.monthly_equivalent())?,
            kind: SalaryKind::Net,
            currency: Currency::USD,
            pay_day: PayDay::FIRST,
            preset: Some(preset.clone()),
        })
    }

    pub fn monthly_amount(&self) -> f64 {
        self.amount.get()
    }

    /// Caption under the main counter: the preset's name, or "Net · TL".
    pub fn caption(&self) -> String {
        match &self.preset {
            Some(preset) => preset.name.to_string(),
            None => format!("{} · {}", self.kind, self.currency),
        }
    }
}

/// Unconfirmed setup input, as typed.
#[derive(Debug, Clone, PartialEq)]
pub struct SetupForm {
    pub kind: SalaryKind,
    pub currency: Currency,
    pub salary: String,
    pub pay_day: u32,
}

impl Default for SetupForm {
    fn default() -> Self {
        Self {
            kind: SalaryKind::Net,
            currency: Currency::TL,
            salary: String::new(),
            pay_day: PayDay::default().get(),
        }
    }
}

impl SetupForm {
    /// Whether the start action is enabled.
    pub fn is_valid(&self) -> bool {
        SalaryAmount::parse(&self.salary, self.currency).is_ok()
    }

    /// Confirms the form. Fails only when the salary is not a positive number.
    pub fn submit(&self) -> Result<Configuration> {
        let amount = SalaryAmount::parse(&self.salary, self.currency)?;
        Ok(Configuration::new(
            amount,
            self.kind,
            self.currency,
            PayDay::new(self.pay_day),
        ))
    }
}
