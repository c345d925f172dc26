/// Maximum length of a DICOM Decimal String value.
pub const MAX_DECIMAL_STRING_LEN: usize = 16;

/// Formats a float as a Decimal String of at most 16 characters.
///
/// The shortest round-trip representation is used when it fits. Otherwise the
/// closest fitting rendering is chosen between fixed-point with fewer
/// fractional digits and exponent notation. Non-finite values are rendered
/// as-is.
pub fn format_decimal_string(value: f64) -> String {
    let shortest = value.to_string();
    if shortest.len() <= MAX_DECIMAL_STRING_LEN || !value.is_finite() {
        return shortest;
    }

    let fixed = (0..MAX_DECIMAL_STRING_LEN)
        .rev()
        .map(|precision| trim_fraction(format!("{:.*}", precision, value)))
        .find(|s| s.len() <= MAX_DECIMAL_STRING_LEN);
    let scientific = (0..MAX_DECIMAL_STRING_LEN)
        .rev()
        .map(|precision| format!("{:.*e}", precision, value))
        .find(|s| s.len() <= MAX_DECIMAL_STRING_LEN);

    let rounding_error = |s: &String| {
        s.parse::<f64>()
            .map_or(f64::INFINITY, |parsed| (parsed - value).abs())
    };

    [fixed, scientific]
        .into_iter()
        .flatten()
        .min_by(|a, b| rounding_error(a).total_cmp(&rounding_error(b)))
        .unwrap_or_else(|| format!("{:e}", value))
}

fn trim_fraction(formatted: String) -> String {
    if !formatted.contains('.') {
        return formatted;
    }
    formatted
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
