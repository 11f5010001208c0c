//! Two-decimal rendering of prediction values.
//!
//! Output matches the browser's `Number.prototype.toFixed(2)`: the exact
//! binary value is rounded to the nearest hundredth and exact ties round
//! away from zero. Magnitudes of `1e21` and above switch to exponent form.

const EXPONENT_FORM_THRESHOLD: f64 = 1e21;

/// Fractional parts whose exact binary value sits halfway between two hundredths.
const HUNDREDTHS_TIES: [f64; 4] = [0.125, 0.375, 0.625, 0.875];

pub fn format_prediction(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }
    if value.abs() >= EXPONENT_FORM_THRESHOLD {
        return format!("{value:e}").replacen('e', "e+", 1);
    }
    if value == 0.0 {
        // covers -0.0 as well
        return "0.00".to_string();
    }

    let magnitude = value.abs();
    let fract = magnitude.fract();
    if !HUNDREDTHS_TIES.contains(&fract) {
        return format!("{value:.2}");
    }

    // fract * 100 is exactly n + 0.5 here, so ceil moves away from zero.
    let whole = magnitude.trunc();
    let cents = (fract * 100.0).ceil() as u8;
    let sign = if value < 0.0 { "-" } else { "" };
    format!("{sign}{whole:.0}.{cents:02}")
}
