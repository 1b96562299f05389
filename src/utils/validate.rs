use once_cell::sync::Lazy;
use regex::Regex;

static USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{5,16}$").expect("Invalid username regex"));

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("Invalid email regex")
});

static LANGUAGE_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z-]{2,16}$").expect("Invalid language regex"));

static LEETCODE_USERNAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_-]{1,40}$").expect("Invalid leetcode username regex"));

const WEAK_PASSWORDS: &[&str] = &[
    "password",
    "12345678",
    "123456789",
    "qwerty123",
    "admin123",
    "password1",
    "abcd1234",
    "welcome1",
    "letmein1",
];

/// 用户名：5-16 位字母、数字、下划线或连字符
pub fn validate_username(username: &str) -> Result<(), &'static str> {
    if !USERNAME_RE.is_match(username) {
        return Err(
            "Username must be 5-16 characters of letters, numbers, underscores or hyphens",
        );
    }
    Ok(())
}

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 密码策略：至少 8 位，包含大写、小写和数字，且不在常见弱密码表中
pub fn validate_password(password: &str) -> Result<(), String> {
    let mut errors = Vec::new();

    if password.chars().count() < 8 {
        errors.push("Password must be at least 8 characters long");
    }
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }
    if WEAK_PASSWORDS
        .iter()
        .any(|weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors.join("; "))
    }
}

/// 语言标签：2-16 位小写字母或连字符，如 "en"、"zh-hans"
pub fn validate_language(language: &str) -> Result<(), &'static str> {
    if !LANGUAGE_RE.is_match(language) {
        return Err("Language must be 2-16 lowercase letters or hyphens");
    }
    Ok(())
}

pub fn validate_leetcode_username(username: &str) -> Result<(), &'static str> {
    if !LEETCODE_USERNAME_RE.is_match(username) {
        return Err("LeetCode username must be 1-40 letters, numbers, underscores or hyphens");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_username_rules() {
        assert!(validate_username("learner_01").is_ok());
        assert!(validate_username("abc").is_err());
        assert!(validate_username("has space").is_err());
        assert!(validate_username("a_very_long_username_here").is_err());
    }

    #[test]
    fn test_email_rules() {
        assert!(validate_email("someone@example.org").is_ok());
        assert!(validate_email("someone@example").is_err());
        assert!(validate_email("someone@example.c|m").is_err());
    }

    #[test]
    fn test_password_policy() {
        assert!(validate_password("SecurePass123").is_ok());

        let err = validate_password("abcd").unwrap_err();
        assert!(err.contains("at least 8 characters"));
        assert!(err.contains("uppercase"));
        assert!(err.contains("digit"));

        let err = validate_password("Password1").unwrap_err();
        assert!(err.contains("too common"));
    }

    #[test]
    fn test_language_tags() {
        assert!(validate_language("en").is_ok());
        assert!(validate_language("zh-hans").is_ok());
        assert!(validate_language("EN").is_err());
        assert!(validate_language("e").is_err());
        assert!(validate_language("en_us").is_err());
    }

    #[test]
    fn test_leetcode_username() {
        assert!(validate_leetcode_username("lee-215").is_ok());
        assert!(validate_leetcode_username("").is_err());
        assert!(validate_leetcode_username("../etc/passwd").is_err());
    }
}
