//! Keystroke masks for the card form.
//!
//! Each function re-derives the canonical form from the whole raw field value,
//! never from the previous formatted value, and accepts any input.

const CARD_GROUP: usize = 4;
const CARD_MIN_DIGITS: usize = 4;
const CARD_MAX_DIGITS: usize = 16;
const CVC_DIGITS: usize = 3;

fn digits_only(raw: &str) -> String {
    raw.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

/// Groups card digits in fours, e.g. `4111111111111111` → `4111 1111 1111 1111`.
///
/// With fewer than four digits the raw input comes back untouched.
pub fn format_card_number(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < CARD_MIN_DIGITS {
        return raw.to_string();
    }
    let run: Vec<char> = digits.chars().take(CARD_MAX_DIGITS).collect();
    run.chunks(CARD_GROUP)
        .map(|chunk| chunk.iter().collect::<String>())
        .collect::<Vec<_>>()
        .join(" ")
}

/// Shapes expiry input as `MM/YY`.
pub fn format_expiry(raw: &str) -> String {
    let digits = digits_only(raw);
    if digits.len() < 2 {
        return digits;
    }
    let (month, rest) = digits.split_at(2);
    let year: String = rest.chars().take(2).collect();
    format!("{month}/{year}")
}

pub fn format_cvc(raw: &str) -> String {
    digits_only(raw).chars().take(CVC_DIGITS).collect()
}
