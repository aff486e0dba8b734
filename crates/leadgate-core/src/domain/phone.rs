/// Reduces a telephone number to its ASCII digits, keeping their order.
///
/// No length or country validation happens here; input without digits yields
/// an empty string.
pub fn normalize_phone(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}
