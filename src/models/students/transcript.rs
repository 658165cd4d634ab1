use std::collections::BTreeMap;

use serde::Serialize;
use ts_rs::TS;

use super::entities::Student;
use super::requests::TranscriptQuery;

/// 成绩单计算所需的单条成绩（已关联课程）
#[derive(Debug, Clone)]
pub struct GradeRecord {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    pub academic_year_id: i64,
    pub semester: String,
    pub grade_value: f64,
}

// 成绩单中的课程行
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct TranscriptCourse {
    pub course_id: i64,
    pub course_code: String,
    pub course_name: String,
    pub credits: i32,
    pub semester: String,
    pub grade_count: i64,
    pub average: f64,
}

// 成绩单
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/student.ts")]
pub struct Transcript {
    pub student_id: i64,
    pub matricule: String,
    pub student_name: String,
    pub academic_year_id: Option<i64>,
    pub semester: Option<String>,
    pub courses: Vec<TranscriptCourse>,
    pub total_credits: i64,
    /// 按学分加权的总平均分，没有成绩时为空
    pub overall_average: Option<f64>,
}

pub fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// 按课程求平均分，再按学分加权得到总平均
pub fn build_transcript(
    student: &Student,
    records: &[GradeRecord],
    filter: &TranscriptQuery,
) -> Transcript {
    let mut by_course: BTreeMap<i64, (GradeRecord, f64, i64)> = BTreeMap::new();

    for record in records {
        if filter
            .academic_year_id
            .is_some_and(|year| year != record.academic_year_id)
        {
            continue;
        }
        if filter
            .semester
            .as_deref()
            .is_some_and(|semester| semester != record.semester)
        {
            continue;
        }
        let entry = by_course
            .entry(record.course_id)
            .or_insert_with(|| (record.clone(), 0.0, 0));
        entry.1 += record.grade_value;
        entry.2 += 1;
    }

    let courses: Vec<TranscriptCourse> = by_course
        .into_values()
        .map(|(record, sum, count)| TranscriptCourse {
            course_id: record.course_id,
            course_code: record.course_code,
            course_name: record.course_name,
            credits: record.credits,
            semester: record.semester,
            grade_count: count,
            average: round2(sum / count as f64),
        })
        .collect();

    let total_credits: i64 = courses.iter().map(|c| c.credits as i64).sum();
    let overall_average = if total_credits > 0 {
        let weighted: f64 = courses.iter().map(|c| c.average * c.credits as f64).sum();
        Some(round2(weighted / total_credits as f64))
    } else {
        None
    };

    Transcript {
        student_id: student.id,
        matricule: student.matricule.clone(),
        student_name: student.full_name(),
        academic_year_id: filter.academic_year_id,
        semester: filter.semester.clone(),
        courses,
        total_credits,
        overall_average,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::students::entities::StudentStatus;

    fn student() -> Student {
        let date = chrono::NaiveDate::from_ymd_opt(2010, 5, 4).unwrap();
        Student {
            id: 7,
            matricule: "STU2024ABC123".into(),
            first_name: "Moussa".into(),
            last_name: "Traore".into(),
            email: None,
            phone: None,
            address: "Rue 1".into(),
            gender: "male".into(),
            birth_date: date,
            birth_place: "Bamako".into(),
            nationality: "ML".into(),
            photo: None,
            admission_date: date,
            current_class: "6A".into(),
            academic_year_id: 1,
            education_level: "secondary".into(),
            previous_school: None,
            guardian_name: "Fatou".into(),
            guardian_relationship: "mother".into(),
            guardian_phone: "000".into(),
            guardian_email: None,
            guardian_address: "Rue 1".into(),
            guardian_occupation: "nurse".into(),
            health_issues: None,
            blood_group: None,
            emergency_contact: "000".into(),
            status: StudentStatus::Active,
            additional_info: None,
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn record(course_id: i64, credits: i32, year: i64, semester: &str, value: f64) -> GradeRecord {
        GradeRecord {
            course_id,
            course_code: format!("C{course_id}"),
            course_name: format!("Course {course_id}"),
            credits,
            academic_year_id: year,
            semester: semester.into(),
            grade_value: value,
        }
    }

    #[test]
    fn test_credit_weighted_average() {
        let records = vec![
            record(1, 3, 1, "S1", 12.0),
            record(1, 3, 1, "S1", 16.0),
            record(2, 1, 1, "S1", 10.0),
        ];
        let transcript = build_transcript(&student(), &records, &TranscriptQuery::default());

        assert_eq!(transcript.courses.len(), 2);
        assert_eq!(transcript.courses[0].average, 14.0);
        assert_eq!(transcript.courses[0].grade_count, 2);
        assert_eq!(transcript.total_credits, 4);
        // (14 * 3 + 10 * 1) / 4 = 13
        assert_eq!(transcript.overall_average, Some(13.0));
        assert_eq!(transcript.student_name, "Moussa Traore");
    }

    #[test]
    fn test_filters_and_empty() {
        let records = vec![record(1, 2, 1, "S1", 8.0), record(2, 2, 2, "S2", 18.0)];

        let filter = TranscriptQuery {
            academic_year_id: Some(2),
            semester: None,
        };
        let transcript = build_transcript(&student(), &records, &filter);
        assert_eq!(transcript.courses.len(), 1);
        assert_eq!(transcript.overall_average, Some(18.0));

        let filter = TranscriptQuery {
            academic_year_id: None,
            semester: Some("S3".into()),
        };
        let transcript = build_transcript(&student(), &records, &filter);
        assert!(transcript.courses.is_empty());
        assert_eq!(transcript.overall_average, None);
    }

    #[test]
    fn test_round2() {
        assert_eq!(round2(13.3333), 13.33);
        assert_eq!(round2(12.3456), 12.35);
    }
}
