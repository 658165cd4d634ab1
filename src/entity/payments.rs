//! 缴费实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub academic_year_id: i64,
    /// 金额（分）
    pub amount_cents: i64,
    pub payment_type: String,
    pub payment_date: String,
    pub status: String,
    #[sea_orm(unique)]
    pub reference_number: String,
    pub semester: String,
    pub created_at: i64,
    pub updated_at: i64,
    pub deleted_at: Option<i64>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::students::Entity",
        from = "Column::StudentId",
        to = "super::students::Column::Id"
    )]
    Student,
    #[sea_orm(has_many = "super::payment_details::Entity")]
    Details,
}

impl Related<super::students::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::payment_details::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Details.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_payment(
        self,
        details: Vec<crate::models::payments::entities::PaymentDetail>,
    ) -> crate::models::payments::entities::Payment {
        use crate::models::payments::entities::{Payment, PaymentStatus, PaymentType};
        use crate::utils::convert::{parse_stored_date, timestamp_to_datetime};
        use crate::utils::money::from_cents;

        Payment {
            id: self.id,
            student_id: self.student_id,
            academic_year_id: self.academic_year_id,
            amount: from_cents(self.amount_cents),
            payment_type: self
                .payment_type
                .parse::<PaymentType>()
                .unwrap_or(PaymentType::Cash),
            payment_date: parse_stored_date(&self.payment_date),
            status: self
                .status
                .parse::<PaymentStatus>()
                .unwrap_or(PaymentStatus::Pending),
            reference_number: self.reference_number,
            semester: self.semester,
            details,
            created_at: timestamp_to_datetime(self.created_at),
            updated_at: timestamp_to_datetime(self.updated_at),
        }
    }
}
