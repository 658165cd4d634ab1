use serde::Serialize;
use ts_rs::TS;

use super::entities::Payment;
use crate::models::academic_years::entities::AcademicYear;
use crate::models::students::entities::Student;

// 发票行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct InvoiceLine {
    pub fee_type: String,
    pub description: Option<String>,
    pub amount: f64,
}

// 发票
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct Invoice {
    pub invoice_number: String,
    pub issued_at: chrono::DateTime<chrono::Utc>,
    pub payment: Payment,
    pub student: Student,
    pub academic_year: AcademicYear,
    pub lines: Vec<InvoiceLine>,
    pub total: f64,
}

impl Invoice {
    /// 无明细时以缴费本身作为唯一一行
    pub fn build(payment: Payment, student: Student, academic_year: AcademicYear) -> Self {
        let lines: Vec<InvoiceLine> = if payment.details.is_empty() {
            vec![InvoiceLine {
                fee_type: payment.payment_type.to_string(),
                description: None,
                amount: payment.amount,
            }]
        } else {
            payment
                .details
                .iter()
                .map(|d| InvoiceLine {
                    fee_type: d.fee_type.clone(),
                    description: d.description.clone(),
                    amount: d.amount,
                })
                .collect()
        };

        Self {
            invoice_number: format!("INV-{}", payment.reference_number),
            issued_at: chrono::Utc::now(),
            total: payment.amount,
            payment,
            student,
            academic_year,
            lines,
        }
    }
}
