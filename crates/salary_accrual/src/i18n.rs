use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccrualError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Tr,
    En,
}

impl Language {
    pub fn toggled(self) -> Self {
        match self {
            Language::Tr => Language::En,
            Language::En => Language::Tr,
        }
    }

    pub fn code(&self) -> &'static str {
        match self {
            Language::Tr => "tr",
            Language::En => "en",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Language {
    type Err = AccrualError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "tr" | "tr-tr" | "turkish" => Ok(Language::Tr),
            "en" | "en-us" | "en-gb" | "english" => Ok(Language::En),
            _ => Err(AccrualError::UnknownLanguage(s.to_string())),
        }
    }
}

/// One bundled label set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Labels {
    pub app_name: &'static str,
    pub app_subtitle: &'static str,
    pub salary_type: &'static str,
    pub currency: &'static str,
    pub monthly_salary: &'static str,
    pub salary_label: &'static str,
    pub pay_day: &'static str,
    pub start_button: &'static str,
    pub earned_this_month: &'static str,
    pub earned_this_session: &'static str,
    pub session_since: &'static str,
    pub live: &'static str,
    pub session: &'static str,
    pub pay_cycle: &'static str,
    pub days_left: &'static str,
    pub last_pay: &'static str,
    pub next_pay: &'static str,
    pub daily: &'static str,
    pub hourly: &'static str,
    pub per_minute: &'static str,
    pub per_second: &'static str,
    pub footer: &'static str,
    pub net: &'static str,
    pub gross: &'static str,
}

static TURKISH: Labels = Labels {
    app_name: "Maaş Sayacı",
    app_subtitle: "Kazancınızı anlık olarak izleyin",
    salary_type: "Maaş Tipi",
    currency: "Para Birimi",
    monthly_salary: "Aylık",
    salary_label: "Maaş",
    pay_day: "Maaş Günü (1–31)",
    start_button: "Hesaplamaya Başla",
    earned_this_month: "Bu Ay Kazandınız",
    earned_this_session: "Bu Oturumda Kazandınız",
    session_since: "Sayfa açıldığından itibaren",
    live: "CANLI",
    session: "OTURUM",
    pay_cycle: "Maaş Döngüsü",
    days_left: "gün kaldı",
    last_pay: "Son Maaş",
    next_pay: "Sonraki Maaş",
    daily: "Günlük",
    hourly: "Saatlik",
    per_minute: "Dakikalık",
    per_second: "Saniyelik",
    footer: "Her saniye güncelleniyor ✦ Maaş sayacı",
    net: "Net",
    gross: "Brüt",
};

static ENGLISH: Labels = Labels {
    app_name: "Salary Tracker",
    app_subtitle: "Track your earnings in real time",
    salary_type: "Salary Type",
    currency: "Currency",
    monthly_salary: "Monthly",
    salary_label: "Salary",
    pay_day: "Pay Day (1–31)",
    start_button: "Start Tracking",
    earned_this_month: "Earned This Month",
    earned_this_session: "Earned This Session",
    session_since: "Since you opened this page",
    live: "LIVE",
    session: "SESSION",
    pay_cycle: "Pay Cycle",
    days_left: "days left",
    last_pay: "Last Pay",
    next_pay: "Next Pay",
    daily: "Daily",
    hourly: "Hourly",
    per_minute: "Per Minute",
    per_second: "Per Second",
    footer: "Updates every second ✦ Salary Tracker",
    net: "Net",
    gross: "Gross",
};

pub fn labels(language: Language) -> &'static Labels {
    match language {
        Language::Tr => &TURKISH,
        Language::En => &ENGLISH,
    }
}

/// Uppercases `text` following the language's casing rules.
///
/// Turkish keeps the dot on `i` (`i` → `İ`); `ı` already maps to `I`.
pub fn upper(text: &str, language: Language) -> String {
    match language {
        Language::Tr => text
            .chars()
            .flat_map(|ch| match ch {
                'i' => 'İ'.to_uppercase(),
                other => other.to_uppercase(),
            })
            .collect(),
        Language::En => text.to_uppercase(),
    }
}
