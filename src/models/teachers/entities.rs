use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 教师档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct Teacher {
    pub id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: String,
    pub address: String,
    pub gender: String,
    pub birth_date: chrono::NaiveDate,
    pub nationality: String,
    pub photo: Option<String>,
    pub joining_date: chrono::NaiveDate,
    pub contract_type: String,
    pub employment_status: String,
    pub qualification: String,
    pub specialization: String,
    pub experience_years: i32,
    pub previous_employment: Option<String>,
    pub department_id: i64,
    pub position: String,
    pub salary_grade: String,
    // 敏感字段仅对管理员输出
    #[serde(skip_serializing_if = "Option::is_none")]
    pub bank_account: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tax_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub social_security_number: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub additional_info: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Teacher {
    /// 清除银行账户、税号、社保号
    pub fn redact_sensitive(&mut self) {
        self.bank_account = None;
        self.tax_number = None;
        self.social_security_number = None;
    }

    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

// 教师摘要
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherSummary {
    pub id: i64,
    pub employee_id: String,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
}

impl From<&Teacher> for TeacherSummary {
    fn from(teacher: &Teacher) -> Self {
        Self {
            id: teacher.id,
            employee_id: teacher.employee_id.clone(),
            first_name: teacher.first_name.clone(),
            last_name: teacher.last_name.clone(),
            email: teacher.email.clone(),
        }
    }
}
