/// Renders a wheel value as a two-digit label (`7` -> `"07"`).
///
/// Values of two or more digits are returned unchanged.
pub fn format_value(value: u32) -> String {
    format!("{value:02}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pads_single_digits() {
        assert_eq!(format_value(0), "00");
        assert_eq!(format_value(9), "09");
    }

    #[test]
    fn clock_values_are_two_chars_and_parse_back() {
        for value in 0..60 {
            let label = format_value(value);
            assert_eq!(label.len(), 2, "label for {value}");
            assert_eq!(label.parse::<u32>().unwrap(), value);
        }
    }

    #[test]
    fn wide_values_are_not_truncated() {
        assert_eq!(format_value(123), "123");
    }
}
