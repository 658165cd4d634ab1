//! 存储层测试夹具

use super::SeaOrmStorage;
use crate::models::{
    academic_years::requests::CreateAcademicYearRequest,
    courses::requests::CreateCourseRequest,
    departments::requests::CreateDepartmentRequest,
    enrollments::requests::CreateEnrollmentRequest,
    grades::{entities::GradeType, requests::CreateGradeRequest},
    payments::{entities::PaymentType, requests::CreatePaymentRequest},
    schedules::{entities::DayOfWeek, requests::CreateScheduleRequest},
    students::requests::CreateStudentRequest,
    subjects::requests::CreateSubjectRequest,
    teachers::requests::CreateTeacherRequest,
    users::requests::CreateUserRequest,
};
use chrono::NaiveDate;
use sea_orm::SqlxSqliteConnector;
use sea_orm::sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use std::str::FromStr;

/// 内存 SQLite，单连接保证所有查询落在同一个库上
pub async fn memory_storage() -> SeaOrmStorage {
    let opt = SqliteConnectOptions::from_str("sqlite::memory:")
        .unwrap()
        .foreign_keys(true);
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect_with(opt)
        .await
        .unwrap();

    SeaOrmStorage::from_connection(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
        .await
        .unwrap()
}

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

pub fn user_request(email: &str, roles: &[&str]) -> CreateUserRequest {
    CreateUserRequest {
        first_name: "Awa".into(),
        last_name: "Diallo".into(),
        email: email.into(),
        // 存储层只保存已哈希的值
        password: "$argon2id$v=19$m=19456,t=2,p=1$c2FsdA$aGFzaA".into(),
        phone: "+221 70 000 00 00".into(),
        address: "Rue 10".into(),
        city: "Dakar".into(),
        country: "SN".into(),
        gender: "female".into(),
        birth_date: date(1990, 1, 1),
        photo: None,
        status: None,
        roles: roles.iter().map(|r| r.to_string()).collect(),
    }
}

/// 学年标签形如 2024-2025，起止日期取自首个年份
pub fn academic_year_request(year: &str, current: bool) -> CreateAcademicYearRequest {
    let first: i32 = year.get(..4).and_then(|y| y.parse().ok()).unwrap_or(2024);
    CreateAcademicYearRequest {
        year: year.into(),
        start_date: date(first, 9, 1),
        end_date: date(first + 1, 7, 15),
        status: None,
        current,
    }
}

pub fn teacher_request(email: &str, department_id: i64) -> CreateTeacherRequest {
    CreateTeacherRequest {
        employee_id: None,
        first_name: "Ibrahima".into(),
        last_name: "Sow".into(),
        email: email.into(),
        phone: "+221 77 000 00 00".into(),
        address: "Avenue 3".into(),
        gender: "male".into(),
        birth_date: date(1980, 3, 12),
        nationality: "SN".into(),
        photo: None,
        joining_date: date(2015, 9, 1),
        contract_type: "permanent".into(),
        employment_status: None,
        qualification: "Master".into(),
        specialization: "Mathématiques".into(),
        experience_years: 9,
        previous_employment: None,
        department_id,
        position: "Professeur".into(),
        salary_grade: "A2".into(),
        bank_account: Some("SN000111".into()),
        tax_number: None,
        social_security_number: None,
        emergency_contact_name: "Mariama Sow".into(),
        emergency_contact_phone: "+221 76 000 00 00".into(),
        additional_info: None,
    }
}

pub fn student_request(academic_year_id: i64, email: Option<&str>) -> CreateStudentRequest {
    CreateStudentRequest {
        matricule: None,
        first_name: "Moussa".into(),
        last_name: "Traore".into(),
        email: email.map(str::to_string),
        phone: None,
        address: "Quartier 5".into(),
        gender: "male".into(),
        birth_date: date(2010, 5, 4),
        birth_place: "Thiès".into(),
        nationality: "SN".into(),
        photo: None,
        admission_date: date(2024, 9, 1),
        current_class: "6A".into(),
        academic_year_id,
        education_level: "secondary".into(),
        previous_school: None,
        guardian_name: "Fatou Traore".into(),
        guardian_relationship: "mother".into(),
        guardian_phone: "+221 78 000 00 00".into(),
        guardian_email: None,
        guardian_address: "Quartier 5".into(),
        guardian_occupation: "nurse".into(),
        health_issues: None,
        blood_group: None,
        emergency_contact: "+221 78 000 00 00".into(),
        status: None,
        additional_info: None,
    }
}

/// 预置的一套学校数据
pub struct SeededSchool {
    pub year_id: i64,
    pub department_id: i64,
    pub teacher_id: i64,
    pub subject_id: i64,
    pub course_id: i64,
    pub student_id: i64,
}

pub fn course_request(code: &str, school: &SeededSchool) -> CreateCourseRequest {
    CreateCourseRequest {
        code: code.into(),
        name: "Algèbre".into(),
        subject_id: school.subject_id,
        department_id: school.department_id,
        academic_year_id: school.year_id,
        description: None,
        credits: 3,
        hours_per_week: 4,
        course_type: "core".into(),
        education_level: "secondary".into(),
        semester: "S1".into(),
        max_students: 30,
        prerequisites: None,
        syllabus: None,
        objectives: None,
        assessment_method: "exam".into(),
        status: None,
        teacher_ids: vec![],
    }
}

/// 当前学年、院系、教师、科目 MATH、课程 MATH-101（S1）与一名学生
pub async fn seed_school(storage: &SeaOrmStorage) -> SeededSchool {
    let year = storage
        .create_academic_year_impl(academic_year_request("2024-2025", true))
        .await
        .unwrap();
    let department = storage
        .create_department_impl(CreateDepartmentRequest {
            name: "Sciences".into(),
            code: "SCI".into(),
            description: None,
            head_teacher_id: None,
            academic_year_id: year.id,
            status: None,
        })
        .await
        .unwrap();
    let teacher = storage
        .create_teacher_impl(teacher_request("teacher@example.com", department.id))
        .await
        .unwrap();
    let subject = storage
        .create_subject_impl(CreateSubjectRequest {
            name: "Mathématiques".into(),
            code: "MATH".into(),
            department_id: department.id,
            description: None,
            academic_year_id: year.id,
            status: None,
            teacher_ids: vec![],
        })
        .await
        .unwrap();
    let student = storage
        .create_student_impl(student_request(year.id, Some("student@example.com")))
        .await
        .unwrap();

    let mut school = SeededSchool {
        year_id: year.id,
        department_id: department.id,
        teacher_id: teacher.id,
        subject_id: subject.subject.id,
        course_id: 0,
        student_id: student.id,
    };
    school.course_id = storage
        .create_course_impl(course_request("MATH-101", &school))
        .await
        .unwrap()
        .course
        .id;
    school
}

pub fn enrollment_request(student_id: i64, course_id: i64) -> CreateEnrollmentRequest {
    CreateEnrollmentRequest {
        student_id,
        course_id,
        academic_year_id: None,
        semester: None,
    }
}

pub fn grade_request(
    student_id: i64,
    course_id: i64,
    course_enrollment_id: i64,
    grade_value: f64,
) -> CreateGradeRequest {
    CreateGradeRequest {
        student_id,
        course_id,
        course_enrollment_id,
        grade_value,
        grade_type: GradeType::Exam,
        evaluation_date: date(2024, 11, 20),
        recorded_by: None,
    }
}

/// 250.00，pending，无明细
pub fn payment_request(student_id: i64, academic_year_id: i64) -> CreatePaymentRequest {
    CreatePaymentRequest {
        student_id,
        academic_year_id,
        amount: Some(250.0),
        payment_type: PaymentType::Cash,
        payment_date: date(2024, 9, 15),
        status: None,
        reference_number: None,
        semester: "S1".into(),
        details: vec![],
    }
}

/// 周一，使用预置的课程与教师
pub fn schedule_request(
    school: &SeededSchool,
    start_time: &str,
    end_time: &str,
    room: &str,
) -> CreateScheduleRequest {
    CreateScheduleRequest {
        course_id: school.course_id,
        teacher_id: school.teacher_id,
        academic_year_id: school.year_id,
        day_of_week: DayOfWeek::Monday,
        start_time: start_time.into(),
        end_time: end_time.into(),
        room: room.into(),
    }
}
