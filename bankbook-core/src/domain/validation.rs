//! Input shape checks and sanitization
//!
//! Pure functions over raw strings. Passwords are never sanitized, so the
//! secret reaches the hasher exactly as typed.

use std::str::FromStr;
use std::sync::OnceLock;

use regex::Regex;
use rust_decimal::Decimal;

/// Upper bound accepted by [`is_valid_amount`]
pub const MAX_AMOUNT: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Minimum password length
pub const MIN_PASSWORD_LEN: usize = 8;

const DANGEROUS_CHARS: [char; 4] = ['<', '>', '"', '\''];

fn username_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[A-Za-z0-9_]{3,20}$").expect("static regex"))
}

fn account_number_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^ACC\d{6}$").expect("static regex"))
}

fn amount_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^\d+(\.\d{1,2})?$").expect("static regex"))
}

pub fn is_valid_username(s: &str) -> bool {
    username_re().is_match(s)
}

/// At least eight characters; no complexity rule
pub fn is_valid_password(s: &str) -> bool {
    s.chars().count() >= MIN_PASSWORD_LEN
}

pub fn is_valid_account_number(s: &str) -> bool {
    account_number_re().is_match(s)
}

/// Unsigned decimal with at most two fraction digits, in `(0, 1_000_000]`
pub fn is_valid_amount(s: &str) -> bool {
    parse_amount(s).is_some()
}

/// Parse an amount that passes [`is_valid_amount`]
pub fn parse_amount(s: &str) -> Option<Decimal> {
    if !amount_re().is_match(s) {
        return None;
    }
    let value = Decimal::from_str(s).ok()?;
    (value > Decimal::ZERO && value <= MAX_AMOUNT).then_some(value)
}

/// Strip `< > " '` from free text. `None` passes through.
pub fn sanitize(input: Option<&str>) -> Option<String> {
    input.map(sanitize_str)
}

pub fn sanitize_str(input: &str) -> String {
    input.chars().filter(|c| !DANGEROUS_CHARS.contains(c)).collect()
}
