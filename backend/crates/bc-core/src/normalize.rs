//! Recipient number normalization.

/// Strip everything that isn't an ASCII digit.
///
/// Total and idempotent. An empty result means the input had no usable
/// number and the recipient must be rejected before dispatch.
pub fn normalize_number(raw: &str) -> String {
    raw.chars().filter(|c| c.is_ascii_digit()).collect()
}

/// True when `raw` normalizes to a non-empty number
pub fn is_valid_number(raw: &str) -> bool {
    raw.chars().any(|c| c.is_ascii_digit())
}
