use serde::Serialize;

use crate::error::{AccrualError, Result};

/// A public figure with an estimated annual income in USD.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PresetEarner {
    pub id: &'static str,
    pub name: &'static str,
    pub annual_usd: f64,
}

impl PresetEarner {
    /// Annual income spread over twelve months.
    pub fn monthly_equivalent(&self) -> f64 {
        self.annual_usd / 12.0
    }
}

/// Estimated annual earnings, averaged from public rich lists.
pub static PRESET_EARNERS: [PresetEarner; 5] = [
    PresetEarner {
        id: "musk",
        name: "Elon Musk",
        annual_usd: 180_000_000_000.0,
    },
    PresetEarner {
        id: "bezos",
        name: "Jeff Bezos",
        annual_usd: 75_000_000_000.0,
    },
    PresetEarner {
        id: "zuck",
        name: "Mark Zuckerberg",
        annual_usd: 60_000_000_000.0,
    },
    PresetEarner {
        id: "arnault",
        name: "Bernard Arnault",
        annual_usd: 50_000_000_000.0,
    },
    PresetEarner {
        id: "gates",
        name: "Bill Gates",
        annual_usd: 25_000_000_000.0,
    },
];

pub fn find_preset(id: &str) -> Result<&'static PresetEarner> {
    let id = id.trim();
    PRESET_EARNERS
        .iter()
        .find(|preset| preset.id.eq_ignore_ascii_case(id))
        .ok_or_else(|| AccrualError::UnknownPreset(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_find_preset_is_case_insensitive() {
        assert_eq!(find_preset("Bezos").unwrap().name, "Jeff Bezos");
        assert_eq!(find_preset(" gates ").unwrap().annual_usd, 25_000_000_000.0);
    }

    #[test]
    fn test_unknown_preset() {
        assert_eq!(
            find_preset("scrooge"),
            Err(AccrualError::UnknownPreset("scrooge".to_string()))
        );
    }

    #[test]
    fn test_monthly_equivalent() {
        let musk = find_preset("musk").unwrap();
        assert_eq!(musk.monthly_equivalent(), 15_000_000_000.0);
    }
}
