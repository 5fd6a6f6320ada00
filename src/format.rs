/// Render a price as whole US dollars, e.g. `500000.99` -> `"$500,001"`.
///
/// Rounds half away from zero, matching en-US currency formatting with no
/// fraction digits. Negative values that round to zero keep their sign
/// (`-0.4` -> `"-$0"`), and non-finite values render as `"$NaN"`, `"$∞"`
/// or `"-$∞"`, as the en-US formatter does.
pub fn format_price(value: f64) -> String {
    if value.is_nan() {
        return "$NaN".to_string();
    }
    let sign = if value.is_sign_negative() { "-" } else { "" };
    if value.is_infinite() {
        return format!("{sign}$∞");
    }

    let rounded = value.round();
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    format!("{sign}${grouped}")
}

/// Text color token for a status label; unknown labels fall back to gray.
pub fn status_color(status: &str) -> &'static str {
    match status {
        "Available" => "text-green-700",
        "Sold" => "text-orange-400",
        "Under Contract" => "text-blue-800",
        _ => "text-gray-800",
    }
}
