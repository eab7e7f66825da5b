use serde_json::Value;

use crate::models::FieldFormat;

/// Placeholder shown for missing values.
const EMPTY: &str = "-";

/// Format a mapped field for display.
///
/// Missing, null and empty values render as `-`. Numbers and numeric strings
/// follow `format`; anything else renders as its plain text.
pub fn format_field(value: Option<&Value>, format: FieldFormat) -> String {
    let value = match value {
        None | Some(Value::Null) => return EMPTY.to_string(),
        Some(Value::String(s)) if s.is_empty() => return EMPTY.to_string(),
        Some(v) => v,
    };

    let number = match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };

    match number.filter(|n| n.is_finite()) {
        Some(n) => match format {
            FieldFormat::Currency => format_currency(n),
            FieldFormat::Percent => format!("{}%", group_fixed(n, 2)),
            FieldFormat::Number => format_number(n),
        },
        None => match value {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        },
    }
}

fn format_currency(n: f64) -> String {
    if n < 0.0 {
        format!("-${}", group_fixed(-n, 2))
    } else {
        format!("${}", group_fixed(n, 2))
    }
}

/// Up to three fraction digits, trailing zeros trimmed.
fn format_number(n: f64) -> String {
    let fixed = group_fixed(n, 3);
    match fixed.split_once('.') {
        Some((int, frac)) => {
            let frac = frac.trim_end_matches('0');
            if frac.is_empty() {
                int.to_string()
            } else {
                format!("{}.{}", int, frac)
            }
        }
        None => fixed,
    }
}

/// Fixed-point rendering with `,` thousands separators.
fn group_fixed(n: f64, decimals: usize) -> String {
    let fixed = format!("{:.*}", decimals, n);
    let (sign, digits) = match fixed.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", fixed.as_str()),
    };
    let (int, frac) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, ch) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    // "-0.00" reads oddly; drop the sign when everything rounded to zero
    let sign = if digits.chars().all(|c| c == '0' || c == '.') {
        ""
    } else {
        sign
    };

    match frac {
        Some(f) => format!("{}{}.{}", sign, grouped, f),
        None => format!("{}{}", sign, grouped),
    }
}
