//! Number formatting for legend labels

/// Maximum fraction digits kept when no fixed precision is requested.
const MAX_FRACTION_DIGITS: usize = 6;

pub const THOUSANDS_SEP: char = ',';

pub fn format_fixed(value: f32, decimals: usize) -> String {
    if !value.is_finite() {
        return if value.is_nan() {
            "NaN".to_string()
        } else if value.is_sign_positive() {
            "Inf".to_string()
        } else {
            "-Inf".to_string()
        };
    }
    format!("{value:.decimals$}")
}

/// Format `value` with thousands separators.
///
/// `decimals` fixes the fraction digits; `None` keeps the significant ones.
pub fn format_number(value: f32, decimals: Option<usize>) -> String {
    if !value.is_finite() {
        return format_fixed(value, 0);
    }
    let text = match decimals {
        Some(d) => format_fixed(value, d),
        None => trim_trailing_zeroes(format_fixed(value, MAX_FRACTION_DIGITS)),
    };
    group_thousands(&text)
}

fn group_thousands(text: &str) -> String {
    let (sign, unsigned) = match text.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", text),
    };
    let (int, frac) = match unsigned.find('.') {
        Some(dot) => unsigned.split_at(dot),
        None => (unsigned, ""),
    };

    let mut out = String::with_capacity(text.len() + int.len() / 3);
    out.push_str(sign);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            out.push(THOUSANDS_SEP);
        }
        out.push(ch);
    }
    out.push_str(frac);

    // "-0" after rounding
    if out == "-0" {
        out.remove(0);
    }
    out
}

fn trim_trailing_zeroes(mut s: String) -> String {
    if let Some(dot) = s.find('.') {
        while s.ends_with('0') {
            s.pop();
        }
        if s.len() == dot + 1 {
            s.pop();
        }
    }
    s
}
