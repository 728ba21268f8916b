//! Shared helpers for command handlers.

use std::io::IsTerminal;

use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};

use crate::error::CliError;

/// Ask the user to confirm a destructive action.
///
/// `--yes` skips the prompt. In a non-interactive context without `--yes`
/// the operation is refused rather than silently applied.
pub fn confirm(prompt: &str, yes: bool) -> Result<bool, CliError> {
    if yes {
        return Ok(true);
    }
    if !std::io::stdin().is_terminal() {
        return Err(CliError::NonInteractiveRequiresYes {
            action: prompt.to_owned(),
        });
    }
    let confirmed = dialoguer::Confirm::new()
        .with_prompt(prompt)
        .default(false)
        .interact()
        .map_err(|e| CliError::Validation {
            field: "prompt".into(),
            reason: e.to_string(),
        })?;
    Ok(confirmed)
}

/// Parse a `YYYY-MM-DD` date into a UTC midnight timestamp.
pub fn parse_date(field: &str, value: &str) -> Result<DateTime<Utc>, CliError> {
    let date = NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| CliError::Validation {
        field: field.to_owned(),
        reason: format!("expected YYYY-MM-DD, got '{value}'"),
    })?;
    let midnight = NaiveTime::from_hms_opt(0, 0, 0).unwrap_or_default();
    Ok(date.and_time(midnight).and_utc())
}

/// Current reference period `(month, year)` for payment defaults.
#[allow(clippy::cast_possible_truncation)]
pub fn current_reference_period() -> (u8, u16) {
    let now = Utc::now();
    (now.month() as u8, now.year().unsigned_abs() as u16)
}

/// Prompt for a password when it was not passed as a flag.
pub fn password_or_prompt(password: Option<String>, who: &str) -> Result<String, CliError> {
    match password {
        Some(password) => Ok(password),
        None => dialoguer::Password::new()
            .with_prompt(format!("Initial password for {who}"))
            .with_confirmation("Repeat password", "Passwords do not match")
            .interact()
            .map_err(|e| CliError::Validation {
                field: "password".into(),
                reason: e.to_string(),
            }),
    }
}

/// Short day-of-week name for schedule columns (0 = Sunday).
pub fn day_name(day: u8) -> &'static str {
    match day {
        0 => "Sun",
        1 => "Mon",
        2 => "Tue",
        3 => "Wed",
        4 => "Thu",
        5 => "Fri",
        6 => "Sat",
        _ => "?",
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn parse_date_accepts_iso_days() {
        let parsed = parse_date("due", "2025-03-10").unwrap();
        assert_eq!(parsed.to_rfc3339(), "2025-03-10T00:00:00+00:00");
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("due", "10/03/2025").is_err());
        assert!(parse_date("due", "soon").is_err());
    }

    #[test]
    fn day_names_cover_the_week() {
        assert_eq!(day_name(0), "Sun");
        assert_eq!(day_name(6), "Sat");
        assert_eq!(day_name(9), "?");
    }
}
