/// Format a number for display with two decimal places for fractions.
pub fn format_number(n: f64) -> String {
    format_number_with_precision(n, 2)
}

/// Format a number for display.
///
/// Integral values print without a fractional part; everything else is
/// rounded to `precision` decimal places.
pub fn format_number_with_precision(n: f64, precision: usize) -> String {
    if n.is_nan() {
        "#NAN!".to_string()
    } else if n.is_infinite() {
        "#INF!".to_string()
    } else if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{:.0}", n)
    } else {
        format!("{:.*}", precision, n)
    }
}
