//! Task name normalization.
//!
//! Converts struct identifiers into the lowercase, underscore-separated
//! names used as task types on the queue.

const SEPARATOR: char = '_';

/// Converts an identifier to snake case. Unicode aware.
///
/// Lowercase characters and `_` are copied unchanged. Every other
/// character, digits included, is lowercased, and a `_` is inserted before
/// it when the previous character was lowercase or the next one is, so
/// acronyms stay together (`SendSMS` -> `send_sms`, `HTTPServer` ->
/// `http_server`, `Send2Email` -> `send_2_email`). A separator is never
/// inserted after an existing one, which makes the conversion idempotent.
///
/// # Examples
///
/// ```
/// use asynq_codegen_core::to_snake_case;
///
/// assert_eq!(to_snake_case("SendEmail"), "send_email");
/// assert_eq!(to_snake_case("SendSMS"), "send_sms");
/// assert_eq!(to_snake_case("send_email"), "send_email");
/// ```
#[must_use]
pub fn to_snake_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len() + 4);
    let mut chars = input.chars().peekable();
    let mut prev: Option<char> = None;

    while let Some(ch) = chars.next() {
        if ch.is_lowercase() || ch == SEPARATOR {
            out.push(ch);
            prev = Some(ch);
            continue;
        }

        let after_lower = prev.is_some_and(char::is_lowercase);
        let before_lower = chars.peek().is_some_and(|next| next.is_lowercase());

        if prev.is_some() && !out.ends_with(SEPARATOR) && (after_lower || before_lower) {
            out.push(SEPARATOR);
        }

        out.extend(ch.to_lowercase());
        prev = Some(ch);
    }

    out
}

/// Converts an identifier to upper snake case, for constant names.
///
/// # Examples
///
/// ```
/// use asynq_codegen_core::to_upper_snake_case;
///
/// assert_eq!(to_upper_snake_case("SendEmail"), "SEND_EMAIL");
/// assert_eq!(to_upper_snake_case("send_sms_message"), "SEND_SMS_MESSAGE");
/// ```
#[must_use]
pub fn to_upper_snake_case(input: &str) -> String {
    to_snake_case(input).to_uppercase()
}
