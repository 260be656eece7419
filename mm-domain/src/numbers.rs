use crate::i18n::Locale;
use thousands::{digits, Separable, SeparatorPolicy};

pub const APPROXIMATION_MARKER: &str = "≈ ";

const MAGNITUDES: [f64; 4] = [1e3, 1e6, 1e9, 1e12];

/// Compacts `val` into its long human form ("1.2 thousand", "3 millones").
///
/// Returns an empty string below 1000 and for values that aren't finite. The result carries the approximation marker
/// whenever expanding the compacted mantissa again doesn't yield `val`.
/// The comparison happens on values scaled by 10 and rounded to integers.
pub fn number_name(val: f64, locale: Locale) -> String {
    if !val.is_finite() || val < 1000.0 {
        return String::new();
    }

    let mut magnitude_idx = MAGNITUDES.iter().rposition(|m| val >= *m).unwrap_or_default();
    let mut mantissa = round_to_one_decimal(val / MAGNITUDES[magnitude_idx]);

    // 999_950 rounds to "1000 thousand", which is rendered as "1 million" instead
    if mantissa >= 1000.0 && magnitude_idx + 1 < MAGNITUDES.len() {
        magnitude_idx += 1;
        mantissa = round_to_one_decimal(val / MAGNITUDES[magnitude_idx]);
    }

    let magnitude = MAGNITUDES[magnitude_idx];
    let compacted = format!("{} {}", format_mantissa(mantissa, locale), magnitude_word(magnitude_idx, mantissa, locale));

    if is_approximation(val, mantissa, magnitude) {
        format!("{APPROXIMATION_MARKER}{compacted}")
    } else {
        compacted
    }
}

fn round_to_one_decimal(x: f64) -> f64 {
    (x * 10.0).round() / 10.0
}

/// Values too large to expand back into an `i128` always count as approximations.
fn is_approximation(val: f64, mantissa: f64, magnitude: f64) -> bool {
    let scaled_original = (val * 10.0).round() as i128;
    match ((mantissa * 10.0).round() as i128).checked_mul(magnitude as i128) {
        Some(scaled_back) => scaled_original != scaled_back,
        None => true,
    }
}

fn format_mantissa(mantissa: f64, locale: Locale) -> String {
    let whole = mantissa.trunc();
    let tenths = ((mantissa - whole) * 10.0).round() as i64;

    // compact forms never group the digits of the mantissa
    if tenths == 0 {
        format!("{whole}")
    } else {
        format!("{}{}{}", whole, decimal_separator(locale), tenths)
    }
}

fn magnitude_word(magnitude_idx: usize, mantissa: f64, locale: Locale) -> &'static str {
    let singular = mantissa == 1.0;
    match locale {
        Locale::En => ["thousand", "million", "billion", "trillion"][magnitude_idx],
        Locale::Es => match (magnitude_idx, singular) {
            (0, _) => "mil",
            (1, true) => "millón",
            (1, false) => "millones",
            (2, _) => "mil millones",
            (_, true) => "billón",
            (_, false) => "billones",
        },
    }
}

fn decimal_separator(locale: Locale) -> char {
    match locale {
        Locale::En => '.',
        Locale::Es => ',',
    }
}

/// Rounds `val` to an integer and groups the digits with the separator of `locale`.
/// Spanish leaves four digit numbers ungrouped.
pub fn number_thousand_separator(val: f64, locale: Locale) -> String {
    let rounded = val.round() as i64;

    let separator = match locale {
        Locale::En => ",",
        Locale::Es if rounded.abs() < 10_000 => return rounded.to_string(),
        Locale::Es => ".",
    };

    let policy = SeparatorPolicy {
        separator,
        groups: &[3],
        digits: digits::ASCII_DECIMAL,
    };

    rounded.separate_by_policy(policy)
}

/// Parses volume-like input with an optional `k`, `m` or `b` suffix.
///
/// "60k" -> 60000, "1.5m" -> 1500000, "50,000" -> 50000. Commas are dropped and case is ignored.
/// `None` means the input isn't a number.
pub fn parse_volume_input(input: Option<&str>) -> Option<i64> {
    let s = input.unwrap_or_default().trim().to_lowercase().replace(',', "");
    if s.is_empty() {
        return None;
    }

    for (suffix, factor) in [('k', 1e3), ('m', 1e6), ('b', 1e9)] {
        if let Some(number) = s.strip_suffix(suffix) {
            let number = number.trim_end();
            if number.is_empty() || !number.chars().all(|c| c.is_ascii_digit() || c == '.') {
                continue;
            }
            return parse_float_prefix(number).map(|n| (n * factor).round() as i64);
        }
    }

    parse_float_prefix(&s).map(|n| n.round() as i64)
}

/// Longest leading substring that parses as a finite float, so "12abc" yields 12.
fn parse_float_prefix(s: &str) -> Option<f64> {
    s.char_indices()
        .map(|(idx, c)| idx + c.len_utf8())
        .rev()
        .find_map(|end| s[..end].parse::<f64>().ok().filter(|n| n.is_finite()))
}
