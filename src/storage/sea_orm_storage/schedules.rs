//! 课表存储操作

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::prelude::{AcademicYears, Courses, Teachers};
use crate::entity::schedules::{ActiveModel, Column, Entity as Schedules};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    schedules::{
        entities::{DayOfWeek, Schedule, ScheduleOutcome, ScheduleSlot, find_conflict},
        requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 创建课时，与已有课时冲突时返回冲突项
    pub async fn create_schedule_impl(&self, req: CreateScheduleRequest) -> Result<ScheduleOutcome> {
        self.ensure_live::<Courses>(req.course_id, "课程").await?;
        self.ensure_live::<Teachers>(req.teacher_id, "教师").await?;
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let slot = ScheduleSlot {
            id: None,
            teacher_id: req.teacher_id,
            academic_year_id: req.academic_year_id,
            day_of_week: req.day_of_week,
            start_time: &req.start_time,
            end_time: &req.end_time,
            room: &req.room,
        };
        if let Some(clash) = conflicting_schedule(&txn, &slot).await? {
            return Ok(ScheduleOutcome::Conflict(clash));
        }

        let now = chrono::Utc::now().timestamp();
        let result = ActiveModel {
            course_id: Set(req.course_id),
            teacher_id: Set(req.teacher_id),
            academic_year_id: Set(req.academic_year_id),
            day_of_week: Set(req.day_of_week.to_string()),
            start_time: Set(req.start_time),
            end_time: Set(req.end_time),
            room: Set(req.room),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建课表", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(ScheduleOutcome::Saved(result.into_schedule()))
    }

    /// 通过 ID 获取课时
    pub async fn get_schedule_by_id_impl(&self, id: i64) -> Result<Option<Schedule>> {
        let result = Schedules::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表失败: {e}")))?;

        Ok(result.map(|m| m.into_schedule()))
    }

    /// 分页列出课时
    pub async fn list_schedules_with_pagination_impl(
        &self,
        query: ScheduleListQuery,
    ) -> Result<PaginatedResponse<Schedule>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Schedules::find().filter(Column::DeletedAt.is_null());

        if let Some(course_id) = query.course_id {
            select = select.filter(Column::CourseId.eq(course_id));
        }
        if let Some(teacher_id) = query.teacher_id {
            select = select.filter(Column::TeacherId.eq(teacher_id));
        }
        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(day) = query.day_of_week {
            select = select.filter(Column::DayOfWeek.eq(day.to_string()));
        }
        if let Some(ref room) = query.room {
            select = select.filter(Column::Room.eq(room.as_str()));
        }

        let paginator = select
            .order_by_asc(Column::DayOfWeek)
            .order_by_asc(Column::StartTime)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表页数失败: {e}")))?;
        let schedules = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询课表列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: schedules.into_iter().map(|m| m.into_schedule()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新课时，合并后的时段重新做冲突检查
    pub async fn update_schedule_impl(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<ScheduleOutcome>> {
        let Some(existing) = self.get_schedule_by_id_impl(id).await? else {
            return Ok(None);
        };

        if let Some(course_id) = update.course_id {
            self.ensure_live::<Courses>(course_id, "课程").await?;
        }
        if let Some(teacher_id) = update.teacher_id {
            self.ensure_live::<Teachers>(teacher_id, "教师").await?;
        }
        if let Some(academic_year_id) = update.academic_year_id {
            self.ensure_live::<AcademicYears>(academic_year_id, "学年")
                .await?;
        }

        let course_id = update.course_id.unwrap_or(existing.course_id);
        let teacher_id = update.teacher_id.unwrap_or(existing.teacher_id);
        let academic_year_id = update.academic_year_id.unwrap_or(existing.academic_year_id);
        let day_of_week: DayOfWeek = update.day_of_week.unwrap_or(existing.day_of_week);
        let start_time = update.start_time.unwrap_or(existing.start_time);
        let end_time = update.end_time.unwrap_or(existing.end_time);
        let room = update.room.unwrap_or(existing.room);

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let slot = ScheduleSlot {
            id: Some(id),
            teacher_id,
            academic_year_id,
            day_of_week,
            start_time: &start_time,
            end_time: &end_time,
            room: &room,
        };
        if let Some(clash) = conflicting_schedule(&txn, &slot).await? {
            return Ok(Some(ScheduleOutcome::Conflict(clash)));
        }

        let result = ActiveModel {
            id: Set(id),
            course_id: Set(course_id),
            teacher_id: Set(teacher_id),
            academic_year_id: Set(academic_year_id),
            day_of_week: Set(day_of_week.to_string()),
            start_time: Set(start_time),
            end_time: Set(end_time),
            room: Set(room),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        }
        .update(&txn)
        .await
        .map_err(|e| classify_write_error("更新课表", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(ScheduleOutcome::Saved(result.into_schedule())))
    }

    /// 软删除课时
    pub async fn delete_schedule_impl(&self, id: i64) -> Result<bool> {
        soft_delete::<Schedules, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除课表失败: {e}")))
    }
}

/// 查找同学年同一天内与给定时段冲突的课时
async fn conflicting_schedule<C: ConnectionTrait>(
    conn: &C,
    slot: &ScheduleSlot<'_>,
) -> Result<Option<Schedule>> {
    let same_day: Vec<Schedule> = Schedules::find()
        .filter(Column::AcademicYearId.eq(slot.academic_year_id))
        .filter(Column::DayOfWeek.eq(slot.day_of_week.to_string()))
        .filter(Column::DeletedAt.is_null())
        .all(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("查询课表失败: {e}")))?
        .into_iter()
        .map(|m| m.into_schedule())
        .collect();

    Ok(find_conflict(slot, &same_day).cloned())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, schedule_request, seed_school};
    use crate::models::schedules::entities::{DayOfWeek, ScheduleOutcome};
    use crate::models::schedules::requests::UpdateScheduleRequest;

    #[tokio::test]
    async fn test_room_conflict_detected() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let first = storage
            .create_schedule_impl(schedule_request(&school, "08:00", "10:00", "A1"))
            .await
            .unwrap();
        let ScheduleOutcome::Saved(first) = first else {
            panic!("expected saved schedule");
        };

        let clash = storage
            .create_schedule_impl(schedule_request(&school, "09:00", "11:00", "A1"))
            .await
            .unwrap();
        match clash {
            ScheduleOutcome::Conflict(existing) => assert_eq!(existing.id, first.id),
            other => panic!("expected conflict, got {other:?}"),
        }

        let adjacent = storage
            .create_schedule_impl(schedule_request(&school, "10:00", "11:00", "A1"))
            .await
            .unwrap();
        assert!(matches!(adjacent, ScheduleOutcome::Saved(_)));
    }

    #[tokio::test]
    async fn test_update_skips_self_and_detects_others() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let ScheduleOutcome::Saved(morning) = storage
            .create_schedule_impl(schedule_request(&school, "08:00", "10:00", "A1"))
            .await
            .unwrap()
        else {
            panic!("expected saved schedule");
        };
        let mut afternoon = schedule_request(&school, "14:00", "16:00", "B2");
        afternoon.day_of_week = DayOfWeek::Monday;
        let ScheduleOutcome::Saved(afternoon) = storage.create_schedule_impl(afternoon).await.unwrap()
        else {
            panic!("expected saved schedule");
        };

        let outcome = storage
            .update_schedule_impl(
                morning.id,
                UpdateScheduleRequest {
                    end_time: Some("11:00".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, ScheduleOutcome::Saved(_)));

        // 同一教师，时间相交
        let outcome = storage
            .update_schedule_impl(
                afternoon.id,
                UpdateScheduleRequest {
                    start_time: Some("10:30".into()),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert!(matches!(outcome, ScheduleOutcome::Conflict(s) if s.id == morning.id));

        assert!(
            storage
                .update_schedule_impl(404, UpdateScheduleRequest::default())
                .await
                .unwrap()
                .is_none()
        );
    }
}
