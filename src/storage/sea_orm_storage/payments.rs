//! 缴费存储操作

use std::collections::HashMap;

use super::{SeaOrmStorage, classify_write_error, soft_delete};
use crate::entity::payment_details;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments, Model};
use crate::entity::prelude::{AcademicYears, PaymentDetailActiveModel, PaymentDetails, Students};
use crate::errors::{Result, SchoolError};
use crate::models::{
    PaginatedResponse, PaginationInfo,
    payments::{
        entities::{Payment, PaymentDetail, PaymentStatus, resolve_amount_cents},
        requests::{CreatePaymentRequest, PaymentDetailInput, PaymentListQuery, UpdatePaymentRequest},
    },
};
use crate::utils::convert::format_date;
use crate::utils::escape_like_pattern;
use crate::utils::money::from_cents;
use crate::utils::random_code::generate_payment_reference;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait, sea_query::Expr,
};

impl SeaOrmStorage {
    /// 创建缴费及明细
    pub async fn create_payment_impl(&self, req: CreatePaymentRequest) -> Result<Payment> {
        self.ensure_live::<Students>(req.student_id, "学生").await?;
        self.ensure_live::<AcademicYears>(req.academic_year_id, "学年")
            .await?;

        // 新缴费只能是待缴或已缴，取消与退款必须经过状态流转
        let status = req.status.unwrap_or(PaymentStatus::Pending);
        if !matches!(status, PaymentStatus::Pending | PaymentStatus::Paid) {
            return Err(SchoolError::validation(format!(
                "新缴费的状态只能是 pending 或 paid，而不是 {status}"
            )));
        }

        let (amount_cents, detail_cents) =
            resolve_amount_cents(req.amount, &req.details).map_err(SchoolError::validation)?;
        let reference_number = req
            .reference_number
            .filter(|r| !r.trim().is_empty())
            .unwrap_or_else(|| generate_payment_reference(req.payment_date));

        let now = chrono::Utc::now().timestamp();
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let payment = ActiveModel {
            student_id: Set(req.student_id),
            academic_year_id: Set(req.academic_year_id),
            amount_cents: Set(amount_cents),
            payment_type: Set(req.payment_type.to_string()),
            payment_date: Set(format_date(req.payment_date)),
            status: Set(status.to_string()),
            reference_number: Set(reference_number),
            semester: Set(req.semester),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(&txn)
        .await
        .map_err(|e| classify_write_error("创建缴费", e))?;

        insert_details(&txn, payment.id, &req.details, &detail_cents).await?;

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        self.load_payment(payment).await
    }

    /// 通过 ID 获取缴费
    pub async fn get_payment_by_id_impl(&self, id: i64) -> Result<Option<Payment>> {
        match self.find_payment(id).await? {
            Some(model) => Ok(Some(self.load_payment(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出缴费
    pub async fn list_payments_with_pagination_impl(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<Payment>> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Payments::find().filter(Column::DeletedAt.is_null());

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(academic_year_id) = query.academic_year_id {
            select = select.filter(Column::AcademicYearId.eq(academic_year_id));
        }
        if let Some(status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }
        if let Some(payment_type) = query.payment_type {
            select = select.filter(Column::PaymentType.eq(payment_type.to_string()));
        }
        if let Some(ref semester) = query.semester {
            select = select.filter(Column::Semester.eq(semester.as_str()));
        }
        if let Some(ref search) = query.search
            && !search.trim().is_empty()
        {
            let escaped = escape_like_pattern(search.trim());
            select = select.filter(Column::ReferenceNumber.contains(&escaped));
        }

        let paginator = select
            .order_by_desc(Column::PaymentDate)
            .order_by_desc(Column::Id)
            .paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费页数失败: {e}")))?;
        let payments = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费列表失败: {e}")))?;

        let ids: Vec<i64> = payments.iter().map(|p| p.id).collect();
        let mut details = self.load_details(ids).await?;

        Ok(PaginatedResponse {
            items: payments
                .into_iter()
                .map(|p| {
                    let lines = details.remove(&p.id).unwrap_or_default();
                    p.into_payment(lines)
                })
                .collect(),
            pagination: PaginationInfo::new(page, size, total, pages),
        })
    }

    /// 更新缴费
    ///
    /// 状态只允许合法流转；提供明细时整体替换，金额随之重新校验。
    pub async fn update_payment_impl(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        let Some(existing) = self.find_payment(id).await? else {
            return Ok(None);
        };

        let mut model = ActiveModel {
            id: Set(id),
            updated_at: Set(chrono::Utc::now().timestamp()),
            ..Default::default()
        };

        if let Some(next) = update.status {
            let current = existing
                .status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Pending);
            if current != next && !current.can_transition_to(next) {
                return Err(SchoolError::conflict(format!(
                    "缴费状态不能从 {current} 变为 {next}"
                )));
            }
            model.status = Set(next.to_string());
        }
        if let Some(payment_type) = update.payment_type {
            model.payment_type = Set(payment_type.to_string());
        }
        if let Some(date) = update.payment_date {
            model.payment_date = Set(format_date(date));
        }
        if let Some(semester) = update.semester {
            model.semester = Set(semester);
        }

        let replaced = match update.details {
            Some(ref details) => {
                let (cents, parts) =
                    resolve_amount_cents(update.amount, details).map_err(SchoolError::validation)?;
                model.amount_cents = Set(cents);
                Some(parts)
            }
            None => {
                if let Some(amount) = update.amount {
                    let detail_sum: i64 = PaymentDetails::find()
                        .filter(payment_details::Column::PaymentId.eq(id))
                        .filter(payment_details::Column::DeletedAt.is_null())
                        .all(&self.db)
                        .await
                        .map_err(|e| {
                            SchoolError::database_operation(format!("查询缴费明细失败: {e}"))
                        })?
                        .iter()
                        .map(|d| d.amount_cents)
                        .sum();
                    let (cents, _) =
                        resolve_amount_cents(Some(amount), &[]).map_err(SchoolError::validation)?;
                    if detail_sum > 0 && cents != detail_sum {
                        return Err(SchoolError::validation(format!(
                            "金额 {amount:.2} 与明细合计 {:.2} 不一致",
                            from_cents(detail_sum)
                        )));
                    }
                    model.amount_cents = Set(cents);
                }
                None
            }
        };

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let result = model
            .update(&txn)
            .await
            .map_err(|e| classify_write_error("更新缴费", e))?;

        if let (Some(details), Some(parts)) = (update.details.as_deref(), replaced.as_deref()) {
            PaymentDetails::delete_many()
                .filter(payment_details::Column::PaymentId.eq(id))
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("清除缴费明细失败: {e}")))?;
            insert_details(&txn, id, details, parts).await?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(Some(self.load_payment(result).await?))
    }

    /// 软删除缴费及其明细
    pub async fn delete_payment_impl(&self, id: i64) -> Result<bool> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| SchoolError::database_operation(format!("开启事务失败: {e}")))?;

        let deleted = soft_delete::<Payments, _>(&txn, id)
            .await
            .map_err(|e| SchoolError::database_operation(format!("删除缴费失败: {e}")))?;
        if deleted {
            let now = chrono::Utc::now().timestamp();
            PaymentDetails::update_many()
                .col_expr(payment_details::Column::DeletedAt, Expr::value(now))
                .filter(payment_details::Column::PaymentId.eq(id))
                .filter(payment_details::Column::DeletedAt.is_null())
                .exec(&txn)
                .await
                .map_err(|e| SchoolError::database_operation(format!("删除缴费明细失败: {e}")))?;
        }

        txn.commit()
            .await
            .map_err(|e| SchoolError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(deleted)
    }

    async fn find_payment(&self, id: i64) -> Result<Option<Model>> {
        Payments::find_by_id(id)
            .filter(Column::DeletedAt.is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费失败: {e}")))
    }

    async fn load_payment(&self, model: Model) -> Result<Payment> {
        let mut details = self.load_details(vec![model.id]).await?;
        let lines = details.remove(&model.id).unwrap_or_default();
        Ok(model.into_payment(lines))
    }

    async fn load_details(&self, payment_ids: Vec<i64>) -> Result<HashMap<i64, Vec<PaymentDetail>>> {
        let rows = PaymentDetails::find()
            .filter(payment_details::Column::PaymentId.is_in(payment_ids))
            .filter(payment_details::Column::DeletedAt.is_null())
            .order_by_asc(payment_details::Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询缴费明细失败: {e}")))?;

        let mut grouped: HashMap<i64, Vec<PaymentDetail>> = HashMap::new();
        for row in rows {
            grouped.entry(row.payment_id).or_default().push(PaymentDetail {
                id: row.id,
                payment_id: row.payment_id,
                fee_type: row.fee_type,
                amount: from_cents(row.amount_cents),
                description: row.description,
            });
        }
        Ok(grouped)
    }
}

async fn insert_details<C: ConnectionTrait>(
    conn: &C,
    payment_id: i64,
    details: &[PaymentDetailInput],
    cents: &[i64],
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    for (detail, amount_cents) in details.iter().zip(cents) {
        PaymentDetailActiveModel {
            payment_id: Set(payment_id),
            fee_type: Set(detail.fee_type.clone()),
            amount_cents: Set(*amount_cents),
            description: Set(detail.description.clone()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        }
        .insert(conn)
        .await
        .map_err(|e| classify_write_error("创建缴费明细", e))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::test_support::{memory_storage, payment_request, seed_school};
    use crate::errors::SchoolError;
    use crate::models::payments::entities::PaymentStatus;
    use crate::models::payments::requests::{
        PaymentDetailInput, PaymentListQuery, UpdatePaymentRequest,
    };

    fn detail(fee_type: &str, amount: f64) -> PaymentDetailInput {
        PaymentDetailInput {
            fee_type: fee_type.into(),
            amount,
            description: None,
        }
    }

    #[tokio::test]
    async fn test_amount_from_details_and_reference() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let mut req = payment_request(school.student_id, school.year_id);
        req.amount = None;
        req.details = vec![detail("tuition", 150.25), detail("library", 10.0)];
        let payment = storage.create_payment_impl(req).await.unwrap();

        assert_eq!(payment.amount, 160.25);
        assert_eq!(payment.details.len(), 2);
        assert_eq!(payment.status, PaymentStatus::Pending);
        assert!(payment.reference_number.starts_with("PAY-20240915-"));
    }

    #[tokio::test]
    async fn test_mismatched_details_rejected() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        let mut req = payment_request(school.student_id, school.year_id);
        req.amount = Some(100.0);
        req.details = vec![detail("tuition", 90.0)];
        let err = storage.create_payment_impl(req).await.unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));
    }

    #[tokio::test]
    async fn test_initial_status_limited_to_pending_or_paid() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;

        for status in [PaymentStatus::Cancelled, PaymentStatus::Refunded] {
            let mut req = payment_request(school.student_id, school.year_id);
            req.status = Some(status);
            let err = storage.create_payment_impl(req).await.unwrap_err();
            assert!(matches!(err, SchoolError::Validation(_)));
        }

        let mut req = payment_request(school.student_id, school.year_id);
        req.status = Some(PaymentStatus::Paid);
        let paid = storage.create_payment_impl(req).await.unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);

        let pending = storage
            .create_payment_impl(payment_request(school.student_id, school.year_id))
            .await
            .unwrap();
        assert_eq!(pending.status, PaymentStatus::Pending);
    }

    #[tokio::test]
    async fn test_status_transitions() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let payment = storage
            .create_payment_impl(payment_request(school.student_id, school.year_id))
            .await
            .unwrap();

        let paid = storage
            .update_payment_impl(
                payment.id,
                UpdatePaymentRequest {
                    status: Some(PaymentStatus::Paid),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(paid.status, PaymentStatus::Paid);

        let err = storage
            .update_payment_impl(
                payment.id,
                UpdatePaymentRequest {
                    status: Some(PaymentStatus::Cancelled),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Conflict(_)));
    }

    #[tokio::test]
    async fn test_details_replaced_and_soft_delete() {
        let storage = memory_storage().await;
        let school = seed_school(&storage).await;
        let payment = storage
            .create_payment_impl(payment_request(school.student_id, school.year_id))
            .await
            .unwrap();

        let updated = storage
            .update_payment_impl(
                payment.id,
                UpdatePaymentRequest {
                    details: Some(vec![detail("uniform", 25.5), detail("transport", 4.5)]),
                    ..Default::default()
                },
            )
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.amount, 30.0);
        assert_eq!(updated.details.len(), 2);

        let err = storage
            .update_payment_impl(
                payment.id,
                UpdatePaymentRequest {
                    amount: Some(31.0),
                    ..Default::default()
                },
            )
            .await
            .unwrap_err();
        assert!(matches!(err, SchoolError::Validation(_)));

        assert!(storage.delete_payment_impl(payment.id).await.unwrap());
        let page = storage
            .list_payments_with_pagination_impl(PaymentListQuery::default())
            .await
            .unwrap();
        assert_eq!(page.pagination.total, 0);
    }
}
