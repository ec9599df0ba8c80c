// src/utils/numfmt.rs

//! Abbreviated dollar-amount formatting for table cells.

/// Format an amount in billions or millions with 3 significant digits.
///
/// Amounts of at least one billion render with a `B` suffix, everything else
/// with an `M` suffix: `44_512_000_000.0` → `"44.5B"`, `998_400_000.0` →
/// `"998M"`.
pub fn format_abbreviated(amount: f64) -> String {
    let (scaled, suffix) = if amount / 1_000_000_000.0 >= 1.0 {
        (amount / 1_000_000_000.0, "B")
    } else {
        (amount / 1_000_000.0, "M")
    };
    format!("{}{}", format_significant(scaled, 3), suffix)
}

/// Render a value rounded to the given number of significant digits, without
/// trailing fraction zeros.
fn format_significant(value: f64, digits: i32) -> String {
    if value == 0.0 {
        return "0".to_string();
    }

    let magnitude = value.abs().log10().floor() as i32;
    let decimals = (digits - 1 - magnitude).max(0);
    let rounded = format!("{:.*}", decimals as usize, value);

    if rounded.contains('.') {
        rounded.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        rounded
    }
}
