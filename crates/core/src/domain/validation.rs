use super::ValidationError;

/// Validates an email address.
///
/// The check is deliberately loose: exactly one `@`, a non-empty local part,
/// and a domain with a `.` that has at least one character on each side.
/// No RFC 5322 parsing.
pub fn validate_email(email: &str) -> Result<(), ValidationError> {
    let Some((local, domain)) = email.split_once('@') else {
        return Err(ValidationError::InvalidEmail);
    };

    if local.is_empty() || domain.contains('@') {
        return Err(ValidationError::InvalidEmail);
    }

    let has_inner_dot = domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len());

    if has_inner_dot {
        Ok(())
    } else {
        Err(ValidationError::InvalidEmail)
    }
}

/// Validates a currency code: exactly three uppercase ASCII letters.
pub fn validate_currency(currency: &str) -> Result<(), ValidationError> {
    if currency.len() == 3 && currency.bytes().all(|b| b.is_ascii_uppercase()) {
        Ok(())
    } else {
        Err(ValidationError::InvalidCurrencyFormat)
    }
}
