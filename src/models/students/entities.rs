use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 学生状态
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
    pub enum StudentStatus {
        Active => "active",
        Graduated => "graduated",
        Suspended => "suspended",
        Withdrawn => "withdrawn",
    }
}

// 学生档案
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Student {
    pub id: i64,
    pub matricule: String,
    pub first_name: String,
    pub last_name: String,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: String,
    pub gender: String,
    pub birth_date: chrono::NaiveDate,
    pub birth_place: String,
    pub nationality: String,
    pub photo: Option<String>,
    pub admission_date: chrono::NaiveDate,
    pub current_class: String,
    pub academic_year_id: i64,
    pub education_level: String,
    pub previous_school: Option<String>,
    pub guardian_name: String,
    pub guardian_relationship: String,
    pub guardian_phone: String,
    pub guardian_email: Option<String>,
    pub guardian_address: String,
    pub guardian_occupation: String,
    pub health_issues: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: String,
    pub status: StudentStatus,
    pub additional_info: Option<serde_json::Value>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl Student {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
