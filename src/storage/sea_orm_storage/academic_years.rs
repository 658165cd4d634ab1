//! 学年存储操作

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::academic_years::{ActiveModel, Column, Entity as AcademicYears};
use crate::entity::prelude::{Courses, Students};
use crate::entity::{courses, students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    academic_years::{
        entities::{AcademicYear, AcademicYearStatus},
        requests::{AcademicYearListQuery, CreateAcademicYearRequest, UpdateAcademicYearRequest},
    },
};
use crate::utils::convert::format_date;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建学年，current 为真时清除其它学年的当前标记
    pub async fn create_academic_year_impl(
        &self,
        req: CreateAcademicYearRequest,
    ) -> Result<AcademicYear> {
        let now = chrono::Utc::now().timestamp();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        if req.current {
            clear_current_flag(&txn, None).await?;
        }

        let result = ActiveModel {
            year: Set(req.year),
            start_date: Set(format_date(req.start_date)),
            end_date: Set(format_date(req.end_date)),
            status: Set(req.status.unwrap_or(AcademicYearStatus::Active).to_string()),
            current: Set(req.current),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建学年", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(result.into_academic_year())
    }

    /// 通过 ID 获取学年
    pub async fn get_academic_year_by_id_impl(&self, id: i64) -> Result<Option<AcademicYear>> {
        let result = AcademicYears::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年失败: {e}")))?;

        Ok(result.map(|m| m.into_academic_year()))
    }

    /// 获取当前学年
    pub async fn get_current_academic_year_impl(&self) -> Result<Option<AcademicYear>> {
        let result = AcademicYears::find()
            .filter(Column::Current.eq(true))
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询当前学年失败: {e}")))?;

        Ok(result.map(|m| m.into_academic_year()))
    }

    /// 分页列出学年，按年份倒序
    pub async fn list_academic_years_with_pagination_impl(
        &self,
        query: AcademicYearListQuery,
    ) -> Result<PaginatedResponse<AcademicYear>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(20).clamp(1, 100) as u64;

        let mut select = AcademicYears::find().filter(Column::DeletedAt.is_null());

        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        let paginator = select.order_by_desc(Column::Year).paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年页数失败: {e}")))?;
        let years = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年列表失败: {e}")))?;

        Ok(PaginatedResponse {
            items: years.into_iter().map(|m| m.into_academic_year()).collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 列出全部学年
    pub async fn list_all_academic_years_impl(&self) -> Result<Vec<AcademicYear>> {
        let years = AcademicYears::find()
            .filter(Column::DeletedAt.is_null())
            .order_by_desc(Column::Year)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询学年列表失败: {e}")))?;

        Ok(years.into_iter().map(|m| m.into_academic_year()).collect())
    }

    /// 更新学年
    pub async fn update_academic_year_impl(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
    ) -> Result<Option<AcademicYear>> {
        if self.get_academic_year_by_id_impl(id).await?.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };
        if let Some(year) = update.year {
            model.year = Set(year);
        }
        if let Some(start_date) = update.start_date {
            model.start_date = Set(format_date(start_date));
        }
        if let Some(end_date) = update.end_date {
            model.end_date = Set(format_date(end_date));
        }
        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(current) = update.current {
            model.current = Set(current);
        }

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        if update.current == Some(true) {
            clear_current_flag(&txn, Some(id)).await?;
        }

        model
            .update(&txn)
            .await
            .map_err(|e| classify_write_error("更新学年", e))?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.get_academic_year_by_id_impl(id).await
    }

    /// 设为当前学年
    pub async fn set_current_academic_year_impl(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.update_academic_year_impl(
            id,
            UpdateAcademicYearRequest {
                current: Some(true),
                ..Default::default()
            },
        )
        .await
    }

    /// 软删除学年，仍被学生或课程引用时拒绝
    pub async fn delete_academic_year_impl(&self, id: i64) -> Result<bool> {
        let student_refs = Students::find()
            .filter(students::Column::AcademicYearId.eq(id))
            .filter(students::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学年学生失败: {e}")))?;
        let course_refs = Courses::find()
            .filter(courses::Column::AcademicYearId.eq(id))
            .filter(courses::Column::DeletedAt.is_null())
            .count(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("统计学年课程失败: {e}")))?;

        if student_refs > 0 || course_refs > 0 {
            return Err(SchoolError::conflict(format!(
                "学年仍被 {student_refs} 名学生和 {course_refs} 门课程引用"
            )));
        }

        soft_delete::<AcademicYears, _>(&self.db, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除学年失败: {e}")))
    }
}

/// 清除当前学年标记，可排除指定学年
async fn clear_current_flag<C: ConnectionTrait>(conn: &C, except: Option<i64>) -> Result<()> {
    let mut update = AcademicYears::update_many()
        .col_expr(Column::Current, Expr::value(false))
        .filter(Column::Current.eq(true));
    if let Some(id) = except {
        update = update.filter(Column::Id.ne(id));
    }

    update
        .exec(conn)
        .await
        .map_err(|e| SchoolError::database_operation(format!("清除当前学年失败: {e}")))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{
        academic_year_request, memory_storage, seed_school, student_request,
    };
    use crate::errors::SchoolError;
    use crate::models::academic_years::requests::AcademicYearListQuery;

    #[tokio::test]
    async fn test_only_one_current_year() {
        let storage = memory_storage().await;
        let first = storage
            .create_academic_year_impl(academic_year_request("2023-2024", true))
            .await
            .unwrap();
        let second = storage
            .create_academic_year_impl(academic_year_request("2024-2025", true))
            .await
            .unwrap();

        let current = storage.get_current_academic_year_impl().await.unwrap().unwrap();
        assert_eq!(current.id, second.id);

        storage.set_current_academic_year_impl(first.id).await.unwrap();
        let all = storage.list_all_academic_years_impl().await.unwrap();
        let flagged: Vec<i64> = all.iter().filter(|y| y.current).map(|y| y.id).collect();
        assert_eq!(flagged, vec![first.id]);
    }

    #[tokio::test]
    async fn test_list_orders_by_year_desc() {
        let storage = memory_storage().await;
        for year in ["2022-2023", "2024-2025", "2023-2024"] {
            storage
                .create_academic_year_impl(academic_year_request(year, false))
                .await
                .unwrap();
        }
        let page = storage
            .list_academic_years_with_pagination_impl(AcademicYearListQuery::default())
            .await
            .unwrap();
        let years: Vec<&str> = page.items.iter().map(|y| y.year.as_str()).collect();
        assert_eq!(years, vec!["2024-2025", "2023-2024", "2022-2023"]);
        assert_eq!(page.pagination.page_size, 20);
    }

    #[tokio::test]
    async fn test_delete_refused_while_referenced() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        storage
            .create_student_impl(student_request(school.year_id, None))
            .await
            .unwrap();

        let err = storage
            .delete_academic_year_impl(school.year_id)
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));

        let spare = storage
            .create_academic_year_impl(academic_year_request("2030-2031", false))
            .await
            .unwrap();
        assert!(storage.delete_academic_year_impl(spare.id).await.unwrap());
        assert!(
            storage
                .get_academic_year_by_id_impl(spare.id)
                .await
                .unwrap()
                .is_none()
        );
    }
}
