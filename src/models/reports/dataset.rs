//! 报表生成所用的原始数据行，由存储层按学年（和学期）一次性读出

#[derive(Debug, Clone)]
pub struct CourseRow {
    pub id: i64,
    pub code: String,
    pub name: String,
}

#[derive(Debug, Clone)]
pub struct StudentRow {
    pub id: i64,
    pub matricule: String,
    pub name: String,
    pub status: String,
    pub gender: String,
    pub education_level: String,
}

#[derive(Debug, Clone)]
pub struct EnrollmentRow {
    pub student_id: i64,
    pub course_id: i64,
    pub status: String,
}

#[derive(Debug, Clone)]
pub struct GradeRow {
    pub student_id: i64,
    pub course_id: i64,
    pub grade_value: f64,
}

#[derive(Debug, Clone)]
pub struct PaymentRow {
    pub student_id: i64,
    pub amount_cents: i64,
    pub status: String,
    pub payment_type: String,
}

#[derive(Debug, Clone)]
pub struct DepartmentRow {
    pub name: String,
    pub teacher_count: i64,
}

#[derive(Debug, Clone, Default)]
pub struct ReportDataset {
    pub academic_year: String,
    pub semester: Option<String>,
    pub courses: Vec<CourseRow>,
    pub students: Vec<StudentRow>,
    pub enrollments: Vec<EnrollmentRow>,
    pub grades: Vec<GradeRow>,
    pub payments: Vec<PaymentRow>,
    pub departments: Vec<DepartmentRow>,
}
