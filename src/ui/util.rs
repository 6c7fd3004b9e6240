/// Format an amount with thousand separators and 2 decimal places.
/// e.g. `-1234567.891` → `"-1,234,567.89"`
pub(crate) fn format_amount(val: f64) -> String {
    let formatted = format!("{:.2}", val.abs());
    let mut parts = formatted.split('.');
    let int_part = parts.next().unwrap_or("0");
    let dec_part = parts.next().unwrap_or("00");

    let with_commas: String = int_part
        .as_bytes()
        .rchunks(3)
        .rev()
        .map(|chunk| std::str::from_utf8(chunk).unwrap_or(""))
        .collect::<Vec<_>>()
        .join(",");

    // Values that round to zero print without a sign.
    if val < 0.0 && formatted != "0.00" {
        format!("-{with_commas}.{dec_part}")
    } else {
        format!("{with_commas}.{dec_part}")
    }
}

/// Truncate a string to `max` visible characters, appending "…" if truncated.
/// Safe for multi-byte UTF-8 characters.
pub(crate) fn truncate(s: &str, max: usize) -> String {
    if max == 0 {
        return String::new();
    }
    if s.chars().count() <= max {
        return s.to_string();
    }
    let truncated: String = s.chars().take(max - 1).collect();
    format!("{truncated}…")
}

/// Horizontal bar for `value`, scaled so that `max_abs` fills `width` cells.
/// Negative values (refunds) are drawn with a lighter glyph.
pub(crate) fn bar(value: f64, max_abs: f64, width: usize) -> String {
    if max_abs <= 0.0 || width == 0 {
        return String::new();
    }
    let cells = ((value.abs() / max_abs) * width as f64).round() as usize;
    let glyph = if value < 0.0 { "░" } else { "█" };
    glyph.repeat(cells.min(width))
}
