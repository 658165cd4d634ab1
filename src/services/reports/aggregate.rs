//! 报表数据汇总
//!
//! 只做纯计算，输入为存储层读出的 [`ReportDataset`]，输出各类报表的表格数据。

use std::collections::{BTreeMap, HashMap, HashSet};

use crate::models::reports::dataset::ReportDataset;
use crate::models::students::transcript::round2;
use crate::utils::money::from_cents;

/// 课程成绩统计
#[derive(Debug, Clone, PartialEq)]
pub struct CourseStats {
    pub code: String,
    pub name: String,
    pub enrolled: i64,
    pub graded_students: i64,
    pub average: Option<f64>,
    pub min: Option<f64>,
    pub max: Option<f64>,
}

/// 学生平均分
#[derive(Debug, Clone, PartialEq)]
pub struct StudentAverage {
    pub matricule: String,
    pub name: String,
    pub grade_count: i64,
    pub average: Option<f64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct AcademicSummary {
    pub courses: Vec<CourseStats>,
    pub students: Vec<StudentAverage>,
}

/// 分组合计：笔数与金额
#[derive(Debug, Clone, PartialEq)]
pub struct AmountGroup {
    pub label: String,
    pub count: i64,
    pub total: f64,
}

/// 学生缴费余额
#[derive(Debug, Clone, PartialEq)]
pub struct StudentBalance {
    pub matricule: String,
    pub name: String,
    pub paid: f64,
    pub pending: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FinancialSummary {
    pub by_status: Vec<AmountGroup>,
    pub by_payment_type: Vec<AmountGroup>,
    pub students: Vec<StudentBalance>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct StatisticsSummary {
    pub students_by_status: Vec<(String, i64)>,
    pub students_by_gender: Vec<(String, i64)>,
    pub students_by_education_level: Vec<(String, i64)>,
    pub teachers_by_department: Vec<(String, i64)>,
    pub course_count: i64,
}

fn stats(values: &[f64]) -> (Option<f64>, Option<f64>, Option<f64>) {
    if values.is_empty() {
        return (None, None, None);
    }
    let sum: f64 = values.iter().sum();
    let min = values.iter().copied().fold(f64::INFINITY, f64::min);
    let max = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    (Some(round2(sum / values.len() as f64)), Some(min), Some(max))
}

/// 成绩报表：按课程与按学生
pub fn academic_summary(dataset: &ReportDataset) -> AcademicSummary {
    let mut enrolled: HashMap<i64, i64> = HashMap::new();
    for enrollment in dataset
        .enrollments
        .iter()
        .filter(|e| e.status != "dropped")
    {
        *enrolled.entry(enrollment.course_id).or_default() += 1;
    }

    let mut course_grades: HashMap<i64, Vec<f64>> = HashMap::new();
    let mut course_graded: HashMap<i64, HashSet<i64>> = HashMap::new();
    let mut student_grades: HashMap<i64, Vec<f64>> = HashMap::new();
    for grade in &dataset.grades {
        course_grades
            .entry(grade.course_id)
            .or_default()
            .push(grade.grade_value);
        course_graded
            .entry(grade.course_id)
            .or_default()
            .insert(grade.student_id);
        student_grades
            .entry(grade.student_id)
            .or_default()
            .push(grade.grade_value);
    }

    let courses = dataset
        .courses
        .iter()
        .map(|course| {
            let values = course_grades.get(&course.id).map(Vec::as_slice).unwrap_or(&[]);
            let (average, min, max) = stats(values);
            CourseStats {
                code: course.code.clone(),
                name: course.name.clone(),
                enrolled: enrolled.get(&course.id).copied().unwrap_or(0),
                graded_students: course_graded.get(&course.id).map_or(0, |s| s.len() as i64),
                average,
                min,
                max,
            }
        })
        .collect();

    let students = dataset
        .students
        .iter()
        .map(|student| {
            let values = student_grades
                .get(&student.id)
                .map(Vec::as_slice)
                .unwrap_or(&[]);
            StudentAverage {
                matricule: student.matricule.clone(),
                name: student.name.clone(),
                grade_count: values.len() as i64,
                average: stats(values).0,
            }
        })
        .collect();

    AcademicSummary { courses, students }
}

fn amount_groups<'a>(rows: impl Iterator<Item = (&'a str, i64)>) -> Vec<AmountGroup> {
    let mut groups: BTreeMap<&str, (i64, i64)> = BTreeMap::new();
    for (label, cents) in rows {
        let entry = groups.entry(label).or_default();
        entry.0 += 1;
        entry.1 += cents;
    }
    groups
        .into_iter()
        .map(|(label, (count, cents))| AmountGroup {
            label: label.to_string(),
            count,
            total: from_cents(cents),
        })
        .collect()
}

/// 财务报表：金额全部以分累加，输出时再换算
pub fn financial_summary(dataset: &ReportDataset) -> FinancialSummary {
    let by_status = amount_groups(
        dataset
            .payments
            .iter()
            .map(|p| (p.status.as_str(), p.amount_cents)),
    );
    let by_payment_type = amount_groups(
        dataset
            .payments
            .iter()
            .map(|p| (p.payment_type.as_str(), p.amount_cents)),
    );

    let mut balances: BTreeMap<i64, (i64, i64)> = BTreeMap::new();
    for payment in &dataset.payments {
        let entry = balances.entry(payment.student_id).or_default();
        match payment.status.as_str() {
            "paid" => entry.0 += payment.amount_cents,
            "pending" => entry.1 += payment.amount_cents,
            _ => {}
        }
    }

    let names: HashMap<i64, (&str, &str)> = dataset
        .students
        .iter()
        .map(|s| (s.id, (s.matricule.as_str(), s.name.as_str())))
        .collect();

    let students = balances
        .into_iter()
        .map(|(student_id, (paid, pending))| {
            let (matricule, name) = names
                .get(&student_id)
                .map(|(m, n)| (m.to_string(), n.to_string()))
                .unwrap_or_else(|| (format!("#{student_id}"), String::new()));
            StudentBalance {
                matricule,
                name,
                paid: from_cents(paid),
                pending: from_cents(pending),
            }
        })
        .collect();

    FinancialSummary {
        by_status,
        by_payment_type,
        students,
    }
}

fn count_by<'a>(values: impl Iterator<Item = &'a str>) -> Vec<(String, i64)> {
    let mut counts: BTreeMap<&str, i64> = BTreeMap::new();
    for value in values {
        *counts.entry(value).or_default() += 1;
    }
    counts
        .into_iter()
        .map(|(label, count)| (label.to_string(), count))
        .collect()
}

/// 统计报表
pub fn statistics_summary(dataset: &ReportDataset) -> StatisticsSummary {
    StatisticsSummary {
        students_by_status: count_by(dataset.students.iter().map(|s| s.status.as_str())),
        students_by_gender: count_by(dataset.students.iter().map(|s| s.gender.as_str())),
        students_by_education_level: count_by(
            dataset.students.iter().map(|s| s.education_level.as_str()),
        ),
        teachers_by_department: dataset
            .departments
            .iter()
            .map(|d| (d.name.clone(), d.teacher_count))
            .collect(),
        course_count: dataset.courses.len() as i64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::reports::dataset::{
        CourseRow, DepartmentRow, EnrollmentRow, GradeRow, PaymentRow, StudentRow,
    };

    fn student(id: i64, name: &str, status: &str, gender: &str) -> StudentRow {
        StudentRow {
            id,
            matricule: format!("STU2024{id:06}"),
            name: name.into(),
            status: status.into(),
            gender: gender.into(),
            education_level: "secondary".into(),
        }
    }

    fn dataset() -> ReportDataset {
        ReportDataset {
            academic_year: "2024-2025".into(),
            semester: None,
            courses: vec![
                CourseRow {
                    id: 1,
                    code: "MATH-101".into(),
                    name: "Algèbre".into(),
                },
                CourseRow {
                    id: 2,
                    code: "PHY-101".into(),
                    name: "Mécanique".into(),
                },
            ],
            students: vec![
                student(10, "Awa Diallo", "active", "female"),
                student(11, "Moussa Traore", "active", "male"),
                student(12, "Fatou Ndiaye", "graduated", "female"),
            ],
            enrollments: vec![
                EnrollmentRow {
                    student_id: 10,
                    course_id: 1,
                    status: "active".into(),
                },
                EnrollmentRow {
                    student_id: 11,
                    course_id: 1,
                    status: "active".into(),
                },
                EnrollmentRow {
                    student_id: 12,
                    course_id: 1,
                    status: "dropped".into(),
                },
            ],
            grades: vec![
                GradeRow {
                    student_id: 10,
                    course_id: 1,
                    grade_value: 12.0,
                },
                GradeRow {
                    student_id: 10,
                    course_id: 1,
                    grade_value: 15.5,
                },
                GradeRow {
                    student_id: 11,
                    course_id: 1,
                    grade_value: 9.0,
                },
            ],
            payments: vec![
                PaymentRow {
                    student_id: 10,
                    amount_cents: 25_000,
                    status: "paid".into(),
                    payment_type: "cash".into(),
                },
                PaymentRow {
                    student_id: 10,
                    amount_cents: 10_050,
                    status: "pending".into(),
                    payment_type: "card".into(),
                },
                PaymentRow {
                    student_id: 99,
                    amount_cents: 5_000,
                    status: "cancelled".into(),
                    payment_type: "cash".into(),
                },
            ],
            departments: vec![DepartmentRow {
                name: "Sciences".into(),
                teacher_count: 4,
            }],
        }
    }

    #[test]
    fn test_academic_summary() {
        let summary = academic_summary(&dataset());

        let math = &summary.courses[0];
        assert_eq!(math.enrolled, 2);
        assert_eq!(math.graded_students, 2);
        assert_eq!(math.average, Some(12.17));
        assert_eq!(math.min, Some(9.0));
        assert_eq!(math.max, Some(15.5));

        let physics = &summary.courses[1];
        assert_eq!(physics.enrolled, 0);
        assert_eq!(physics.average, None);

        assert_eq!(summary.students[0].grade_count, 2);
        assert_eq!(summary.students[0].average, Some(13.75));
        assert_eq!(summary.students[2].average, None);
    }

    #[test]
    fn test_financial_summary() {
        let summary = financial_summary(&dataset());

        assert_eq!(
            summary.by_status,
            vec![
                AmountGroup {
                    label: "cancelled".into(),
                    count: 1,
                    total: 50.0
                },
                AmountGroup {
                    label: "paid".into(),
                    count: 1,
                    total: 250.0
                },
                AmountGroup {
                    label: "pending".into(),
                    count: 1,
                    total: 100.5
                },
            ]
        );
        assert_eq!(summary.by_payment_type[0].label, "card");
        assert_eq!(summary.by_payment_type[1].total, 300.0);

        assert_eq!(summary.students.len(), 2);
        assert_eq!(summary.students[0].name, "Awa Diallo");
        assert_eq!(summary.students[0].paid, 250.0);
        assert_eq!(summary.students[0].pending, 100.5);
        // 不在本学年名单中的学生以 ID 标识
        assert_eq!(summary.students[1].matricule, "#99");
        assert_eq!(summary.students[1].paid, 0.0);
    }

    #[test]
    fn test_statistics_summary() {
        let summary = statistics_summary(&dataset());
        assert_eq!(
            summary.students_by_status,
            vec![("active".to_string(), 2), ("graduated".to_string(), 1)]
        );
        assert_eq!(
            summary.students_by_gender,
            vec![("female".to_string(), 2), ("male".to_string(), 1)]
        );
        assert_eq!(
            summary.students_by_education_level,
            vec![("secondary".to_string(), 3)]
        );
        assert_eq!(
            summary.teachers_by_department,
            vec![("Sciences".to_string(), 4)]
        );
        assert_eq!(summary.course_count, 2);
    }
}
