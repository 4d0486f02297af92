use anyhow::Result;
use chrono::{NaiveDate, NaiveDateTime};

pub fn format_duration(seconds: u64) -> String {
    let days = seconds / (24 * 60 * 60);
    let hours = (seconds % (24 * 60 * 60)) / (60 * 60);
    let minutes = (seconds % (60 * 60)) / 60;
    let secs = seconds % 60;

    if days > 0 {
        format!("{}d {}h {}m {}s", days, hours, minutes, secs)
    } else if hours > 0 {
        format!("{}h {}m {}s", hours, minutes, secs)
    } else if minutes > 0 {
        format!("{}m {}s", minutes, secs)
    } else {
        format!("{}s", secs)
    }
}

/// Parses `30s`, `5m`, `2h`, `1d` or a bare number of seconds.
pub fn parse_duration(duration_str: &str) -> Result<u64> {
    let duration_str = duration_str.trim().to_lowercase();

    let (number, unit) = match duration_str.char_indices().last() {
        Some((idx, ch)) if ch.is_ascii_alphabetic() => (&duration_str[..idx], ch),
        _ => (duration_str.as_str(), 's'),
    };

    let value: u64 = number.parse()?;
    let multiplier = match unit {
        's' => 1,
        'm' => 60,
        'h' => 60 * 60,
        'd' => 24 * 60 * 60,
        other => return Err(anyhow::anyhow!("Unknown duration unit: {}", other)),
    };

    value
        .checked_mul(multiplier)
        .ok_or_else(|| anyhow::anyhow!("Duration too large: {}", duration_str))
}

/// Parses a local date-time for `--at`. A bare date means midnight.
pub fn parse_local_datetime(value: &str) -> Result<NaiveDateTime> {
    let value = value.trim();

    for format in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S", "%Y-%m-%dT%H:%M"] {
        if let Ok(parsed) = NaiveDateTime::parse_from_str(value, format) {
            return Ok(parsed);
        }
    }

    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .ok_or_else(|| {
            anyhow::anyhow!("Invalid date-time: {} (expected YYYY-MM-DDTHH:MM:SS)", value)
        })
}

pub fn format_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    if rows.is_empty() {
        return "No data to display".to_string();
    }

    let mut widths: Vec<usize> = headers.iter().map(|h| h.chars().count()).collect();
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let border = |left: &str, join: &str, right: &str| {
        let segments: Vec<String> = widths.iter().map(|w| "─".repeat(w + 2)).collect();
        format!("{}{}{}\n", left, segments.join(join), right)
    };
    let line = |cells: Vec<&str>| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| {
                let pad = width.saturating_sub(cell.chars().count());
                format!(" {}{} ", cell, " ".repeat(pad))
            })
            .collect();
        format!("│{}│\n", padded.join("│"))
    };

    let mut result = border("┌", "┬", "┐");
    result.push_str(&line(headers.to_vec()));
    result.push_str(&border("├", "┼", "┤"));
    for row in rows {
        result.push_str(&line(row.iter().map(String::as_str).collect()));
    }
    result.push_str(border("└", "┴", "┘").trim_end());

    result
}
