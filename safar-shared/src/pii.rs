use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// A wrapper for sensitive payment data that masks its value in Debug output
/// and can be customized for Serialization.
#[derive(Clone, Deserialize)]
pub struct Masked<T>(pub T);

impl<T: fmt::Display> fmt::Debug for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: fmt::Display> fmt::Display for Masked<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "********")
    }
}

impl<T: Serialize> Serialize for Masked<T> {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        // API payloads need the real value; this wrapper exists to prevent
        // accidental leakage through log macros like tracing::info!("{:?}", form).
        self.0.serialize(serializer)
    }
}

impl<T: Default> Default for Masked<T> {
    fn default() -> Self {
        Masked(T::default())
    }
}

impl<T: PartialEq> PartialEq for Masked<T> {
    fn eq(&self, other: &Self) -> bool {
        self.0 == other.0
    }
}

impl<T> Masked<T> {
    pub fn into_inner(self) -> T {
        self.0
    }
}

/// Retain only the last four digits of a card number.
///
/// Anything that is not a digit is ignored, so both `"4111 1111 1111 1234"`
/// and `"4111-1111-1111-1234"` yield `"1234"`. Inputs with fewer than four
/// digits are returned as-is (digits only).
pub fn card_last4(input: &str) -> String {
    let digits: Vec<char> = input.chars().filter(|c| c.is_ascii_digit()).collect();
    let start = digits.len().saturating_sub(4);
    digits[start..].iter().collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn masked_hides_value_in_debug_and_display() {
        let m = Masked("4111111111111234".to_string());
        assert_eq!(format!("{:?}", m), "********");
        assert_eq!(format!("{}", m), "********");
    }

    #[test]
    fn masked_serializes_real_value() {
        let m = Masked("1234".to_string());
        assert_eq!(serde_json::to_string(&m).unwrap(), "\"1234\"");
    }

    #[test]
    fn last4_strips_separators() {
        assert_eq!(card_last4("4111 1111 1111 1234"), "1234");
        assert_eq!(card_last4("4111-1111-1111-9876"), "9876");
        assert_eq!(card_last4("12"), "12");
        assert_eq!(card_last4(""), "");
    }
}
