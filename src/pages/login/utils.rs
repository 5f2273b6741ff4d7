pub fn validate_credentials(email: &str, password: &str) -> Result<(), String> {
    let email = email.trim();
    if email.is_empty() {
        return Err("Enter your email address".into());
    }
    if !email.contains('@') {
        return Err("Enter a valid email address".into());
    }
    if password.is_empty() {
        return Err("Enter your password".into());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_blank_and_malformed_credentials() {
        assert!(validate_credentials("", "secret").is_err());
        assert!(validate_credentials("   ", "secret").is_err());
        assert!(validate_credentials("not-an-email", "secret").is_err());
        assert!(validate_credentials("ana@example.com", "").is_err());
    }

    #[test]
    fn accepts_well_formed_credentials() {
        assert!(validate_credentials("ana@example.com", "secret").is_ok());
        assert!(validate_credentials("  ana@example.com  ", "secret").is_ok());
    }
}
