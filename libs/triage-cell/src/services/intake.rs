use serde_json::Value;

/// Reads a loosely typed integer: JSON numbers (fractions truncated) or
/// strings with a leading integer such as `"7"` or `" 42 years"`.
pub fn coerce_integer(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number
            .as_i64()
            .or_else(|| number.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(text) => leading_integer(text),
        _ => None,
    }
}

/// Negative or unreadable ages are treated as unknown.
pub fn coerce_age(value: &Value) -> Option<u32> {
    coerce_integer(value)
        .filter(|age| *age >= 0)
        .map(|age| age.min(u32::MAX as i64) as u32)
}

/// Pain below 1 or unreadable counts as missing; values above 10 are capped.
pub fn coerce_pain(value: &Value) -> Option<u8> {
    coerce_integer(value)
        .filter(|pain| *pain >= 1)
        .map(|pain| pain.min(10) as u8)
}

fn leading_integer(text: &str) -> Option<i64> {
    let trimmed = text.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let digits: &str = &digits[..digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len())];
    if digits.is_empty() {
        return None;
    }

    let magnitude = digits.bytes().fold(0i64, |acc, digit| {
        acc.saturating_mul(10).saturating_add(i64::from(digit - b'0'))
    });

    Some(if negative { -magnitude } else { magnitude })
}
