use anyhow::{Result, bail};

/// Major currency units (dollars) to stored cents, rounded to the nearest cent.
pub fn to_minor_units(amount: f64) -> Result<i32> {
    if !amount.is_finite() {
        bail!("amount must be a finite number");
    }
    let cents = (amount * 100.0).round();
    if cents < i32::MIN as f64 || cents > i32::MAX as f64 {
        bail!("amount {amount} does not fit in stored cents");
    }
    Ok(cents as i32)
}

pub fn to_major_units(cents: i32) -> f64 {
    f64::from(cents) / 100.0
}

/// en-US style: `123456` -> `"$1,234.56"`.
pub fn format_currency(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.unsigned_abs();
    let dollars = (abs / 100).to_string();
    let fraction = abs % 100;

    let mut grouped = String::with_capacity(dollars.len() + dollars.len() / 3);
    for (index, digit) in dollars.chars().enumerate() {
        if index > 0 && (dollars.len() - index) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }

    format!("{sign}${grouped}.{fraction:02}")
}
