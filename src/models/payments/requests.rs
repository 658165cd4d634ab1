use super::entities::{PaymentStatus, PaymentType};
use serde::Deserialize;
use ts_rs::TS;

// 缴费列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub student_id: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub status: Option<PaymentStatus>,
    pub payment_type: Option<PaymentType>,
    pub semester: Option<String>,
    /// 参考号模糊匹配
    pub search: Option<String>,
}

// 缴费明细输入
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct PaymentDetailInput {
    pub fee_type: String,
    pub amount: f64,
    pub description: Option<String>,
}

// 缴费创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct CreatePaymentRequest {
    pub student_id: i64,
    pub academic_year_id: i64,
    /// 省略时取明细之和
    pub amount: Option<f64>,
    pub payment_type: PaymentType,
    pub payment_date: chrono::NaiveDate,
    pub status: Option<PaymentStatus>,
    /// 省略时自动生成
    pub reference_number: Option<String>,
    pub semester: String,
    #[serde(default)]
    pub details: Vec<PaymentDetailInput>,
}

// 缴费更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct UpdatePaymentRequest {
    pub amount: Option<f64>,
    pub payment_type: Option<PaymentType>,
    pub payment_date: Option<chrono::NaiveDate>,
    pub status: Option<PaymentStatus>,
    pub semester: Option<String>,
    /// 提供时整体替换明细
    pub details: Option<Vec<PaymentDetailInput>>,
}
