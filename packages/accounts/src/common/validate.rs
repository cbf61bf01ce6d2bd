use lazy_static::lazy_static;
use regex::Regex;

/// Sentinel value stored in the email column while no address is bound.
pub const EMAIL_UNBOUND: &str = "default";

lazy_static! {
    // Mainland mobile numbers: leading 1, second digit 3-9, 11 digits total
    static ref PHONE_REGEX: Regex = Regex::new(
        r"^1[3-9]\d{9}$"
    ).unwrap();

    // Bound address, or the unbound sentinel (clients may patch back to it)
    static ref EMAIL_REGEX: Regex = Regex::new(
        r"^(default|[a-zA-Z0-9_-]+@[a-zA-Z0-9_-]+(\.[a-zA-Z0-9_-]+)+)$"
    ).unwrap();
}

/// Check a phone number against the accepted mobile format.
pub fn is_valid_phone(phone: &str) -> bool {
    PHONE_REGEX.is_match(phone)
}

/// Check an email address against the accepted shape.
pub fn is_valid_email(email: &str) -> bool {
    EMAIL_REGEX.is_match(email)
}
