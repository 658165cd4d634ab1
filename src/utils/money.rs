//! 金额以整数分存储，对外以两位小数的浮点数表示

/// 单笔金额上限 99,999,999.99
pub const MAX_AMOUNT_CENTS: i64 = 9_999_999_999;

/// 元转分，金额必须为正、不超过上限且最多两位小数
pub fn to_cents(amount: f64) -> Result<i64, &'static str> {
    if !amount.is_finite() || amount <= 0.0 {
        return Err("amount must be positive");
    }
    let scaled = amount * 100.0;
    if scaled > MAX_AMOUNT_CENTS as f64 + 0.5 {
        return Err("amount exceeds 99999999.99");
    }
    let cents = scaled.round();
    // 大额时允许浮点乘法的舍入误差
    let tolerance = (scaled.abs() * f64::EPSILON * 4.0).max(1e-6);
    if (scaled - cents).abs() > tolerance {
        return Err("amount must have at most two decimals");
    }
    Ok(cents as i64)
}

pub fn from_cents(cents: i64) -> f64 {
    cents as f64 / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_to_cents() {
        assert_eq!(to_cents(12.5), Ok(1250));
        assert_eq!(to_cents(0.1 + 0.2), Ok(30));
        assert_eq!(to_cents(1999.99), Ok(199999));
        assert!(to_cents(0.0).is_err());
        assert!(to_cents(-3.0).is_err());
        assert!(to_cents(1.234).is_err());
        assert!(to_cents(f64::NAN).is_err());
        assert!(to_cents(f64::INFINITY).is_err());
    }

    #[test]
    fn test_to_cents_upper_bound() {
        assert_eq!(to_cents(99_999_999.99), Ok(MAX_AMOUNT_CENTS));
        assert!(to_cents(100_000_000.0).is_err());
        assert!(to_cents(9e16).is_err());
        assert!(to_cents(f64::MAX).is_err());
    }

    #[test]
    fn test_from_cents() {
        assert_eq!(from_cents(1250), 12.5);
        assert_eq!(from_cents(0), 0.0);
    }
}
