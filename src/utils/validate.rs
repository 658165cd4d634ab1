use once_cell::sync::Lazy;
use regex::Regex;

static EMAIL_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Z|a-z]{2,}$").expect("Invalid email regex")
});

static SLUG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-z0-9_.-]+$").expect("Invalid slug regex"));

static TIME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").expect("Invalid time regex"));

static ACADEMIC_YEAR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{4})-(\d{4})$").expect("Invalid academic year regex"));

pub fn validate_email(email: &str) -> Result<(), &'static str> {
    // 邮箱格式校验：必须包含 @ 和 .
    if !EMAIL_RE.is_match(email) {
        return Err("Email format is invalid");
    }
    Ok(())
}

/// 必填文本字段不能为空白
pub fn validate_required(field: &str, value: &str) -> Result<(), String> {
    if value.trim().is_empty() {
        return Err(format!("The {field} field is required"));
    }
    Ok(())
}

/// 权限 slug：小写字母、数字、下划线、点和连字符
pub fn validate_slug(slug: &str) -> Result<(), &'static str> {
    if !SLUG_RE.is_match(slug) {
        return Err("Slug must contain only lowercase letters, digits, '_', '.' or '-'");
    }
    Ok(())
}

/// 补零的 HH:MM
pub fn validate_time(time: &str) -> Result<(), &'static str> {
    if !TIME_RE.is_match(time) {
        return Err("Time must use the HH:MM format");
    }
    Ok(())
}

/// 开始时间必须早于结束时间
pub fn validate_time_range(start: &str, end: &str) -> Result<(), &'static str> {
    validate_time(start)?;
    validate_time(end)?;
    if end <= start {
        return Err("End time must be after start time");
    }
    Ok(())
}

/// 学年标签 YYYY-YYYY，后一年必须等于前一年加一
pub fn validate_academic_year_label(label: &str) -> Result<(), &'static str> {
    let caps = ACADEMIC_YEAR_RE
        .captures(label)
        .ok_or("Academic year must use the YYYY-YYYY format")?;
    let first: i32 = caps[1].parse().map_err(|_| "Invalid academic year")?;
    let second: i32 = caps[2].parse().map_err(|_| "Invalid academic year")?;
    if second != first + 1 {
        return Err("The second year must follow the first year");
    }
    Ok(())
}

pub fn validate_date_range(
    start: chrono::NaiveDate,
    end: chrono::NaiveDate,
) -> Result<(), &'static str> {
    if end <= start {
        return Err("End date must be after start date");
    }
    Ok(())
}

/// 密码策略验证结果
#[derive(Debug, Clone)]
pub struct PasswordValidationResult {
    pub is_valid: bool,
    pub errors: Vec<&'static str>,
}

impl PasswordValidationResult {
    pub fn error_message(&self) -> String {
        self.errors.join("; ")
    }
}

/// 验证密码是否符合安全策略
///
/// 策略要求：
/// - 最小长度：8 字符
/// - 必须包含：大写字母 + 小写字母 + 数字
/// - 可选：特殊字符（增强安全性）
pub fn validate_password(password: &str) -> PasswordValidationResult {
    let mut errors = Vec::new();

    // 1. 长度检查：至少 8 个字符
    if password.len() < 8 {
        errors.push("Password must be at least 8 characters long");
    }

    // 2. 大写字母检查
    if !password.chars().any(|c| c.is_ascii_uppercase()) {
        errors.push("Password must contain at least one uppercase letter");
    }

    // 3. 小写字母检查
    if !password.chars().any(|c| c.is_ascii_lowercase()) {
        errors.push("Password must contain at least one lowercase letter");
    }

    // 4. 数字检查
    if !password.chars().any(|c| c.is_ascii_digit()) {
        errors.push("Password must contain at least one digit");
    }

    // 5. 常见弱密码检查
    let weak_passwords = [
        "password",
        "12345678",
        "123456789",
        "qwerty123",
        "admin123",
        "password1",
        "Password1",
        "Qwerty123",
        "Abcd1234",
    ];
    if weak_passwords
        .iter()
        .any(|&weak| password.eq_ignore_ascii_case(weak))
    {
        errors.push("Password is too common, please choose a stronger password");
    }

    PasswordValidationResult {
        is_valid: errors.is_empty(),
        errors,
    }
}

/// 简化的密码验证（返回 Result）
pub fn validate_password_simple(password: &str) -> Result<(), String> {
    let result = validate_password(password);
    if result.is_valid {
        Ok(())
    } else {
        Err(result.error_message())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_email() {
        assert!(validate_email("head@school.edu").is_ok());
        assert!(validate_email("no-at-sign").is_err());
    }

    #[test]
    fn test_slug() {
        assert!(validate_slug("students.view").is_ok());
        assert!(validate_slug("report_v2-final").is_ok());
        assert!(validate_slug("Students.View").is_err());
        assert!(validate_slug("with space").is_err());
        assert!(validate_slug("").is_err());
    }

    #[test]
    fn test_time_and_range() {
        assert!(validate_time("08:05").is_ok());
        assert!(validate_time("23:59").is_ok());
        assert!(validate_time("8:05").is_err());
        assert!(validate_time("24:00").is_err());
        assert!(validate_time_range("08:00", "09:30").is_ok());
        assert!(validate_time_range("09:30", "09:30").is_err());
        assert!(validate_time_range("10:00", "09:00").is_err());
    }

    #[test]
    fn test_academic_year_label() {
        assert!(validate_academic_year_label("2024-2025").is_ok());
        assert!(validate_academic_year_label("2024-2026").is_err());
        assert!(validate_academic_year_label("2024/2025").is_err());
        assert!(validate_academic_year_label("24-25").is_err());
    }

    #[test]
    fn test_required_and_dates() {
        assert!(validate_required("name", "Math").is_ok());
        assert_eq!(
            validate_required("name", "   ").unwrap_err(),
            "The name field is required"
        );
        let d1 = chrono::NaiveDate::from_ymd_opt(2024, 9, 1).unwrap();
        let d2 = chrono::NaiveDate::from_ymd_opt(2025, 6, 30).unwrap();
        assert!(validate_date_range(d1, d2).is_ok());
        assert!(validate_date_range(d2, d1).is_err());
        assert!(validate_date_range(d1, d1).is_err());
    }

    #[test]
    fn test_valid_password() {
        assert!(validate_password("SecureP@ss1").is_valid);
        assert!(validate_password("MyP@ssw0rd").is_valid);
        assert!(validate_password("SecurePass123").is_valid);
    }

    #[test]
    fn test_short_password() {
        let result = validate_password("Ab1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must be at least 8 characters long")
        );
    }

    #[test]
    fn test_no_uppercase() {
        let result = validate_password("abcd1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one uppercase letter")
        );
    }

    #[test]
    fn test_no_lowercase() {
        let result = validate_password("ABCD1234");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one lowercase letter")
        );
    }

    #[test]
    fn test_no_digit() {
        let result = validate_password("AbcdEfgh");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password must contain at least one digit")
        );
    }

    #[test]
    fn test_common_password() {
        let result = validate_password("Password1");
        assert!(!result.is_valid);
        assert!(
            result
                .errors
                .contains(&"Password is too common, please choose a stronger password")
        );
    }
}
