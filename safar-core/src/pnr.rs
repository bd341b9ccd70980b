use regex::Regex;
use std::sync::OnceLock;

/// A PNR is exactly 6 uppercase alphanumeric characters.
pub const PNR_LEN: usize = 6;

fn pnr_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"^[A-Z0-9]{6}$").expect("PNR pattern is valid"))
}

/// Normalize raw user input into PNR form: uppercase, drop anything that is
/// not alphanumeric, truncate at 6 characters.
///
/// Sanitization never guarantees validity; a short input stays short and is
/// rejected by [`is_valid_pnr`] at validation time.
pub fn sanitize_pnr(raw: &str) -> String {
    raw.chars()
        .filter(|c| c.is_ascii_alphanumeric())
        .map(|c| c.to_ascii_uppercase())
        .take(PNR_LEN)
        .collect()
}

/// Validation gate, applied redundantly with input sanitization.
pub fn is_valid_pnr(pnr: &str) -> bool {
    pnr_pattern().is_match(pnr)
}
