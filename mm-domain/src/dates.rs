use crate::i18n::{translate, Locale, TranslationKey};
use chrono::format::{Item, StrftimeItems};
use chrono::{DateTime, Utc};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DateTextError {
    #[error("invalid datetime format '{0}'")]
    InvalidFormat(String),
    #[error("end time lies before start time")]
    NegativeDuration,
}

/// Formats an EVE timestamp (UTC) with a strftime pattern, using the locale for month and weekday names.
///
/// chrono panics while rendering an invalid pattern, so the pattern is validated upfront.
pub fn format_eve_time(locale: Locale, time: &DateTime<Utc>, format: &str) -> Result<String, DateTextError> {
    if StrftimeItems::new(format).any(|item| matches!(item, Item::Error)) {
        return Err(DateTextError::InvalidFormat(format.to_string()));
    }

    Ok(time.format_localized(format, locale.chrono_locale()).to_string())
}

/// Human readable duration between two timestamps, e.g. "2 hours 15 minutes".
pub fn time_diff_text(locale: Locale, start: &DateTime<Utc>, end: &DateTime<Utc>) -> Result<String, DateTextError> {
    let delta = *end - *start;
    if delta < chrono::TimeDelta::zero() {
        return Err(DateTextError::NegativeDuration);
    }

    let total_minutes = delta.num_minutes();
    if total_minutes == 0 {
        return Ok(translate(locale, TranslationKey::LessThanAMinute).to_string());
    }

    let days = total_minutes / (24 * 60);
    let hours = (total_minutes % (24 * 60)) / 60;
    let minutes = total_minutes % 60;

    let parts = [
        (days, TranslationKey::Day, TranslationKey::Days),
        (hours, TranslationKey::Hour, TranslationKey::Hours),
        (minutes, TranslationKey::Minute, TranslationKey::Minutes),
    ];

    let text = parts
        .into_iter()
        .filter(|(amount, _, _)| *amount > 0)
        .map(|(amount, singular, plural)| {
            let unit = if amount == 1 { singular } else { plural };
            format!("{} {}", amount, translate(locale, unit))
        })
        .collect::<Vec<_>>()
        .join(" ");

    Ok(text)
}
