use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::AccrualError;

/// Display currencies. Conversion between them is never performed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    #[serde(alias = "tl", alias = "TRY")]
    TL,
    #[serde(alias = "usd")]
    USD,
    #[serde(alias = "eur")]
    EUR,
}

impl Currency {
    pub const ALL: [Currency; 3] = [Currency::TL, Currency::USD, Currency::EUR];

    pub fn code(&self) -> &'static str {
        match self {
            Currency::TL => "TL",
            Currency::USD => "USD",
            Currency::EUR => "EUR",
        }
    }

    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::TL => "₺",
            Currency::USD => "$",
            Currency::EUR => "€",
        }
    }

    /// Thousands separator of the number locale tied to this currency.
    pub fn thousands_separator(&self) -> char {
        match self {
            Currency::TL => '.',
            Currency::USD | Currency::EUR => ',',
        }
    }

    pub fn decimal_separator(&self) -> char {
        match self {
            Currency::TL => ',',
            Currency::USD | Currency::EUR => '.',
        }
    }

    /// Formats `amount` with this currency's symbol and exactly two decimals.
    pub fn format(&self, amount: f64) -> String {
        format!(
            "{}{}",
            self.symbol(),
            format_decimal(amount, self.thousands_separator(), self.decimal_separator())
        )
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

impl FromStr for Currency {
    type Err = AccrualError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "TL" | "TRY" => Ok(Currency::TL),
            "USD" => Ok(Currency::USD),
            "EUR" => Ok(Currency::EUR),
            _ => Err(AccrualError::UnknownCurrency(s.to_string())),
        }
    }
}

/// Formats `amount` for the currency named by `code`.
///
/// Unknown codes fall back to the TL symbol and Turkish separators.
pub fn format_money(amount: f64, code: &str) -> String {
    code.parse::<Currency>().unwrap_or_default().format(amount)
}

fn format_decimal(amount: f64, thousands: char, decimal: char) -> String {
    if !amount.is_finite() {
        return amount.to_string();
    }

    let (whole, fraction) = round_to_cents(amount.abs());
    // -0.001 rounds to zero and must not keep its sign
    let is_zero = whole.bytes().chain(fraction.bytes()).all(|b| b == b'0');
    let sign = if amount < 0.0 && !is_zero { "-" } else { "" };

    format!("{}{}{}{}", sign, group_digits(&whole, thousands), decimal, fraction)
}

/// Rounds the shortest decimal form of `value` to two places, ties away
/// from zero. `1.005` is `1.01` here even though its binary value is below.
fn round_to_cents(value: f64) -> (String, String) {
    let shortest = value.to_string();
    let (whole, fraction) = shortest.split_once('.').unwrap_or((shortest.as_str(), ""));

    let mut digits: Vec<u8> = whole.bytes().collect();
    let mut fraction = fraction.bytes().chain(std::iter::repeat(b'0'));
    digits.extend(fraction.by_ref().take(2));
    let round_up = fraction.next().is_some_and(|next| next >= b'5');

    if round_up {
        let mut carry = true;
        for digit in digits.iter_mut().rev() {
            if *digit == b'9' {
                *digit = b'0';
            } else {
                *digit += 1;
                carry = false;
                break;
            }
        }
        if carry {
            digits.insert(0, b'1');
        }
    }

    let cents = digits.split_off(digits.len() - 2);
    (
        String::from_utf8_lossy(&digits).into_owned(),
        String::from_utf8_lossy(&cents).into_owned(),
    )
}

fn group_digits(digits: &str, separator: char) -> String {
    let len = digits.len();
    let mut grouped = String::with_capacity(len + len / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            grouped.push(separator);
        }
        grouped.push(ch);
    }
    grouped
}

/// Salary field contents after stripping what the user typed.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AmountInput {
    /// Plain numeric string with `.` as the only decimal point
    pub numeric: String,
    /// Grouped echo of the input in the currency's number locale
    pub display: String,
}

impl AmountInput {
    pub fn value(&self) -> Option<f64> {
        self.numeric.parse().ok()
    }
}

/// Strips everything but digits and one decimal separator from a typed amount.
///
/// Thousands separators of `currency` are dropped and its decimal separator
/// is normalised to `.`; digits after a second decimal separator are ignored.
pub fn sanitize_amount_input(raw: &str, currency: Currency) -> AmountInput {
    let thousands = currency.thousands_separator();
    let decimal = currency.decimal_separator();

    let mut whole = String::new();
    let mut fraction: Option<String> = None;
    let mut extra_point = false;

    for ch in raw.chars() {
        if ch == thousands {
            continue;
        }
        if ch == decimal {
            match fraction {
                None => fraction = Some(String::new()),
                Some(_) => extra_point = true,
            }
            continue;
        }
        if !ch.is_ascii_digit() || extra_point {
            continue;
        }
        match fraction.as_mut() {
            Some(digits) => digits.push(ch),
            None => whole.push(ch),
        }
    }

    let mut numeric = whole.clone();
    let mut display = group_digits(&whole, thousands);
    if let Some(digits) = fraction {
        numeric.push('.');
        numeric.push_str(&digits);
        display.push(decimal);
        display.push_str(&digits);
    }

    AmountInput { numeric, display }
}
