use serde::Deserialize;
use ts_rs::TS;

// 教师列表查询参数
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct TeacherListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub department_id: Option<i64>,
    pub employment_status: Option<String>,
    /// 姓名、邮箱或工号模糊匹配
    pub search: Option<String>,
}

// 教师创建请求
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct CreateTeacherRequest {
    /// 省略时自动生成
    pub employee_id: Option<String>,
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
    pub employment_status: Option<String>,
    pub qualification: String,
    pub specialization: String,
    #[serde(default)]
    pub experience_years: i32,
    pub previous_employment: Option<String>,
    pub department_id: i64,
    pub position: String,
    pub salary_grade: String,
    pub bank_account: Option<String>,
    pub tax_number: Option<String>,
    pub social_security_number: Option<String>,
    pub emergency_contact_name: String,
    pub emergency_contact_phone: String,
    pub additional_info: Option<serde_json::Value>,
}

// 教师更新请求
#[derive(Debug, Clone, Default, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/teacher.ts")]
pub struct UpdateTeacherRequest {
    pub employee_id: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub gender: Option<String>,
    pub birth_date: Option<chrono::NaiveDate>,
    pub nationality: Option<String>,
    pub photo: Option<String>,
    pub joining_date: Option<chrono::NaiveDate>,
    pub contract_type: Option<String>,
    pub employment_status: Option<String>,
    pub qualification: Option<String>,
    pub specialization: Option<String>,
    pub experience_years: Option<i32>,
    pub previous_employment: Option<String>,
    pub department_id: Option<i64>,
    pub position: Option<String>,
    pub salary_grade: Option<String>,
    pub bank_account: Option<String>,
    pub tax_number: Option<String>,
    pub social_security_number: Option<String>,
    pub emergency_contact_name: Option<String>,
    pub emergency_contact_phone: Option<String>,
    pub additional_info: Option<serde_json::Value>,
}
