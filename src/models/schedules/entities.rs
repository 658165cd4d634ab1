use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::define_string_enum;

define_string_enum! {
    /// 星期
    #[derive(TS)]
    #[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
    pub enum DayOfWeek {
        Monday => "monday",
        Tuesday => "tuesday",
        Wednesday => "wednesday",
        Thursday => "thursday",
        Friday => "friday",
        Saturday => "saturday",
        Sunday => "sunday",
    }
}

impl DayOfWeek {
    /// 周一为 0
    pub fn weekday_index(&self) -> u8 {
        *self as u8
    }
}

// 课表时段
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/schedule.ts")]
pub struct Schedule {
    pub id: i64,
    pub course_id: i64,
    pub teacher_id: i64,
    pub academic_year_id: i64,
    pub day_of_week: DayOfWeek,
    /// HH:MM
    pub start_time: String,
    /// HH:MM
    pub end_time: String,
    pub room: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

/// 课表写入结果，冲突时携带已占用的课时
#[derive(Debug, Clone)]
pub enum ScheduleOutcome {
    Saved(Schedule),
    Conflict(Schedule),
}

/// 待检查的时段
#[derive(Debug, Clone)]
pub struct ScheduleSlot<'a> {
    /// 更新时为自身 ID，比较时跳过
    pub id: Option<i64>,
    pub teacher_id: i64,
    pub academic_year_id: i64,
    pub day_of_week: DayOfWeek,
    pub start_time: &'a str,
    pub end_time: &'a str,
    pub room: &'a str,
}

/// 半开区间 [start, end) 是否相交，时间为补零的 HH:MM
pub fn times_overlap(a_start: &str, a_end: &str, b_start: &str, b_end: &str) -> bool {
    a_start < b_end && b_start < a_end
}

/// 同学年同一天、时间相交，且教师或教室相同即为冲突
pub fn find_conflict<'s>(slot: &ScheduleSlot<'_>, existing: &'s [Schedule]) -> Option<&'s Schedule> {
    existing.iter().find(|other| {
        Some(other.id) != slot.id
            && other.academic_year_id == slot.academic_year_id
            && other.day_of_week == slot.day_of_week
            && times_overlap(slot.start_time, slot.end_time, &other.start_time, &other.end_time)
            && (other.teacher_id == slot.teacher_id || other.room == slot.room)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn schedule(id: i64, teacher_id: i64, day: DayOfWeek, start: &str, end: &str, room: &str) -> Schedule {
        Schedule {
            id,
            course_id: 1,
            teacher_id,
            academic_year_id: 1,
            day_of_week: day,
            start_time: start.into(),
            end_time: end.into(),
            room: room.into(),
            created_at: chrono::Utc::now(),
            updated_at: chrono::Utc::now(),
        }
    }

    fn slot<'a>(teacher_id: i64, start: &'a str, end: &'a str, room: &'a str) -> ScheduleSlot<'a> {
        ScheduleSlot {
            id: None,
            teacher_id,
            academic_year_id: 1,
            day_of_week: DayOfWeek::Monday,
            start_time: start,
            end_time: end,
            room,
        }
    }

    #[test]
    fn test_times_overlap() {
        assert!(times_overlap("08:00", "10:00", "09:00", "11:00"));
        assert!(times_overlap("08:00", "12:00", "09:00", "10:00"));
        // 首尾相接不算冲突
        assert!(!times_overlap("08:00", "10:00", "10:00", "11:00"));
        assert!(!times_overlap("13:00", "14:00", "08:00", "10:00"));
    }

    #[test]
    fn test_conflict_same_teacher_or_room() {
        let existing = vec![schedule(1, 10, DayOfWeek::Monday, "08:00", "10:00", "A1")];

        assert_eq!(find_conflict(&slot(10, "09:00", "11:00", "B2"), &existing).map(|s| s.id), Some(1));
        assert_eq!(find_conflict(&slot(11, "09:30", "10:30", "A1"), &existing).map(|s| s.id), Some(1));
        assert!(find_conflict(&slot(11, "09:00", "11:00", "B2"), &existing).is_none());
        assert!(find_conflict(&slot(10, "10:00", "11:00", "A1"), &existing).is_none());
    }

    #[test]
    fn test_conflict_ignores_other_day_year_and_self() {
        let existing = vec![
            schedule(1, 10, DayOfWeek::Tuesday, "08:00", "10:00", "A1"),
            schedule(2, 10, DayOfWeek::Monday, "08:00", "10:00", "A1"),
        ];
        let mut candidate = slot(10, "08:00", "10:00", "A1");
        candidate.id = Some(2);
        assert!(find_conflict(&candidate, &existing).is_none());

        candidate.id = None;
        candidate.academic_year_id = 2;
        assert!(find_conflict(&candidate, &existing).is_none());
    }
}
