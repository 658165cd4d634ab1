use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::requests::PaymentDetailInput;
use crate::define_string_enum;
use crate::utils::money::{MAX_AMOUNT_CENTS, to_cents};

define_string_enum! {
    /// 支付方式
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
    pub enum PaymentType {
        Cash => "cash",
        BankTransfer => "bank_transfer",
        Card => "card",
        MobileMoney => "mobile_money",
        Cheque => "cheque",
    }
}

define_string_enum! {
    /// 缴费状态
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
    pub enum PaymentStatus {
        Pending => "pending",
        Paid => "paid",
        Cancelled => "cancelled",
        Refunded => "refunded",
    }
}

impl PaymentStatus {
    /// pending -> paid | cancelled, paid -> refunded
    pub fn can_transition_to(self, next: PaymentStatus) -> bool {
        matches!(
            (self, next),
            (PaymentStatus::Pending, PaymentStatus::Paid)
                | (PaymentStatus::Pending, PaymentStatus::Cancelled)
                | (PaymentStatus::Paid, PaymentStatus::Refunded)
        )
    }
}

// 缴费明细
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentDetail {
    pub id: i64,
    pub payment_id: i64,
    pub fee_type: String,
    pub amount: f64,
    pub description: Option<String>,
}

// 缴费记录
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct Payment {
    pub id: i64,
    pub student_id: i64,
    pub academic_year_id: i64,
    pub amount: f64,
    pub payment_type: PaymentType,
    pub payment_date: chrono::NaiveDate,
    pub status: PaymentStatus,
    pub reference_number: String,
    pub semester: String,
    pub details: Vec<PaymentDetail>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 计算缴费总额（分）
///
/// 给出明细时总额必须等于明细之和，省略总额时取明细之和。
pub fn resolve_amount_cents(
    amount: Option<f64>,
    details: &[PaymentDetailInput],
) -> Result<(i64, Vec<i64>), String> {
    let detail_cents = details
        .iter()
        .map(|d| to_cents(d.amount).map_err(|e| format!("明细 {} 金额无效: {e}", d.fee_type)))
        .collect::<Result<Vec<_>, _>>()?;
    let detail_sum = detail_cents
        .iter()
        .try_fold(0i64, |acc, c| acc.checked_add(*c))
        .filter(|sum| *sum <= MAX_AMOUNT_CENTS)
        .ok_or_else(|| "明细合计超出金额上限 99999999.99".to_string())?;

    let total = match amount {
        Some(amount) => {
            let cents = to_cents(amount).map_err(|e| format!("金额无效: {e}"))?;
            if !details.is_empty() && cents != detail_sum {
                return Err(format!(
                    "金额 {amount:.2} 与明细合计 {:.2} 不一致",
                    detail_sum as f64 / 100.0
                ));
            }
            cents
        }
        None if !details.is_empty() => detail_sum,
        None => return Err("必须提供金额或缴费明细".to_string()),
    };

    Ok((total, detail_cents))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn detail(fee_type: &str, amount: f64) -> PaymentDetailInput {
        PaymentDetailInput {
            fee_type: fee_type.into(),
            amount,
            description: None,
        }
    }

    #[test]
    fn test_transitions() {
        use PaymentStatus::*;
        assert!(Pending.can_transition_to(Paid));
        assert!(Pending.can_transition_to(Cancelled));
        assert!(Paid.can_transition_to(Refunded));
        assert!(!Paid.can_transition_to(Pending));
        assert!(!Cancelled.can_transition_to(Paid));
        assert!(!Refunded.can_transition_to(Paid));
        assert!(!Pending.can_transition_to(Refunded));
    }

    #[test]
    fn test_amount_from_details() {
        let details = vec![detail("tuition", 150.25), detail("library", 10.0)];
        let (total, parts) = resolve_amount_cents(None, &details).unwrap();
        assert_eq!(total, 16025);
        assert_eq!(parts, vec![15025, 1000]);

        assert_eq!(resolve_amount_cents(Some(160.25), &details).unwrap().0, 16025);
        assert!(resolve_amount_cents(Some(160.0), &details).is_err());
    }

    #[test]
    fn test_amount_validation() {
        assert_eq!(resolve_amount_cents(Some(99.9), &[]).unwrap().0, 9990);
        assert!(resolve_amount_cents(None, &[]).is_err());
        assert!(resolve_amount_cents(Some(0.0), &[]).is_err());
        assert!(resolve_amount_cents(Some(10.001), &[]).is_err());
        assert!(resolve_amount_cents(None, &[detail("fee", -5.0)]).is_err());
    }

    #[test]
    fn test_amount_upper_bound() {
        assert!(resolve_amount_cents(None, &[detail("a", 9e16), detail("b", 9e16)]).is_err());
        assert!(resolve_amount_cents(Some(1e9), &[]).is_err());

        // 单项未超限但合计超限
        let near_max = vec![detail("a", 60_000_000.0), detail("b", 60_000_000.0)];
        assert!(resolve_amount_cents(None, &near_max).is_err());

        let at_max = vec![detail("a", 49_999_999.99), detail("b", 50_000_000.0)];
        assert_eq!(resolve_amount_cents(None, &at_max).unwrap().0, MAX_AMOUNT_CENTS);
    }
}
