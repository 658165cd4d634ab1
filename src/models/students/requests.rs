use super::entities::StudentStatus;
use serde::Deserialize;
use ts_rs::TS;

// 学生列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct StudentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub academic_year_id: Option<i64>,
    pub status: Option<StudentStatus>,
    pub current_class: Option<String>,
    pub education_level: Option<String>,
    /// 姓名、学号或邮箱模糊匹配
    pub search: Option<String>,
}

// 学生创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct CreateStudentRequest {
    /// 省略时自动生成
    pub matricule: Option<String>,
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
    pub status: Option<StudentStatus>,
    pub additional_info: Option<serde_json::Value>,
}

// 学生更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct UpdateStudentRequest {
    pub matricule: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub birth_place: Option<String>,
    pub nationality: Option<String>,
    pub photo: Option<String>,
    pub admission_date: Option<chrono::NaiveDate>,
    pub current_class: Option<String>,
    pub academic_year_id: Option<i64>,
    pub education_level: Option<String>,
    pub previous_school: Option<String>,
    pub guardian_name: Option<String>,
    pub guardian_relationship: Option<String>,
    pub guardian_phone: Option<String>,
    pub guardian_email: Option<String>,
    pub guardian_address: Option<String>,
    pub guardian_occupation: Option<String>,
    pub health_issues: Option<String>,
    pub blood_group: Option<String>,
    pub emergency_contact: Option<String>,
    pub status: Option<StudentStatus>,
    pub additional_info: Option<serde_json::Value>,
}

// 成绩单筛选参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct TranscriptQuery {
    pub academic_year_id: Option<i64>,
    pub semester: Option<String>,
}
