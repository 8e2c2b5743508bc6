use bcrypt::{hash, verify, DEFAULT_COST};
use crate::error::{AppError, AppResult};

const MIN_LEN: usize = 10;
const MAX_LEN: usize = 128;

/// Rules for staff passwords. `email` is the account the password belongs to.
pub fn validate_password(password: &str, email: &str) -> AppResult<()> {
    let invalid = |msg: &str| -> AppResult<()> { Err(AppError::ValidationError(msg.to_string())) };

    let len = password.chars().count();
    if !(MIN_LEN..=MAX_LEN).contains(&len) {
        return Err(AppError::ValidationError(format!(
            "Staff password must be between {MIN_LEN} and {MAX_LEN} characters"
        )));
    }
    if password.chars().all(|c| c.is_ascii_digit()) {
        return invalid("Staff password cannot be entirely numeric");
    }
    if !password.chars().any(char::is_alphabetic) || !password.chars().any(|c| c.is_ascii_digit()) {
        return invalid("Staff password must contain both letters and digits");
    }

    let local = email.split('@').next().unwrap_or("").trim().to_lowercase();
    if local.chars().count() >= 3 && password.to_lowercase().contains(&local) {
        return invalid("Staff password is too similar to the email address");
    }
    Ok(())
}

pub fn hash_password(password: &str) -> AppResult<String> {
    hash(password, DEFAULT_COST)
        .map_err(|e| AppError::InternalError(format!("Password hashing failed: {}", e)))
}

pub fn verify_password(password: &str, hash: &str) -> AppResult<bool> {
    verify(password, hash)
        .map_err(|e| AppError::InternalError(format!("Password verification failed: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;

    const EMAIL: &str = "noc.operator@stc.example";

    #[test]
    fn test_validate_staff_password() {
        assert!(validate_password("Password123", EMAIL).is_ok());
        assert!(validate_password("lowercase42x", EMAIL).is_ok());
        assert!(validate_password("Short1", EMAIL).is_err());
        assert!(validate_password("0551234567", EMAIL).is_err());
        assert!(validate_password("OnlyLettersHere", EMAIL).is_err());
        assert!(validate_password("NOC.Operator2024", EMAIL).is_err());
        // short local parts are not compared
        assert!(validate_password("ab12345678", "ab@stc.example").is_ok());
    }

    #[test]
    fn test_hash_and_verify_password() {
        let password = "Password123";
        let hashed = hash_password(password).unwrap();

        assert!(verify_password(password, &hashed).unwrap());
        assert!(!verify_password("WrongPassword", &hashed).unwrap());
    }
}
