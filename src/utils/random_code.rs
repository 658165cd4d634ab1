use rand::Rng;
use rand::distr::Alphanumeric;

const CODE_CHARSET: &[u8] = b"ABCDEFGHJKLMNPQRSTUVWXYZ23456789";

/// 生成由大写字母和数字组成的随机码（去掉易混淆字符）
pub fn generate_random_code(len: usize) -> String {
    let mut rng = rand::rng();
    (0..len)
        .map(|_| CODE_CHARSET[rng.random_range(0..CODE_CHARSET.len())] as char)
        .collect()
}

/// 教师工号：EMP + 8 位
pub fn generate_employee_id() -> String {
    format!("EMP{}", generate_random_code(8))
}

/// 学号：STU + 年份 + 6 位
pub fn generate_matricule(year: i32) -> String {
    format!("STU{year}{}", generate_random_code(6))
}

/// 缴费参考号：PAY-YYYYMMDD- + 8 位
pub fn generate_payment_reference(date: chrono::NaiveDate) -> String {
    format!("PAY-{}-{}", date.format("%Y%m%d"), generate_random_code(8))
}

/// 初始管理员密码，保证包含大小写字母和数字
pub fn generate_random_password(len: usize) -> String {
    let body: String = rand::rng()
        .sample_iter(&Alphanumeric)
        .take(len.saturating_sub(3))
        .map(char::from)
        .collect();
    format!("Aa9{body}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_code_formats() {
        let emp = generate_employee_id();
        assert!(emp.starts_with("EMP"));
        assert_eq!(emp.len(), 11);

        let matricule = generate_matricule(2024);
        assert!(matricule.starts_with("STU2024"));
        assert_eq!(matricule.len(), 13);

        let date = chrono::NaiveDate::from_ymd_opt(2025, 1, 31).unwrap();
        let reference = generate_payment_reference(date);
        assert!(reference.starts_with("PAY-20250131-"));
        assert_eq!(reference.len(), "PAY-20250131-".len() + 8);
        assert!(
            reference[13..]
                .bytes()
                .all(|b| CODE_CHARSET.contains(&b))
        );
    }

    #[test]
    fn test_random_password_policy() {
        let password = generate_random_password(16);
        assert_eq!(password.len(), 16);
        assert!(crate::utils::validate::validate_password(&password).is_valid);
    }
}
