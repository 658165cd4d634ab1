use sea_orm_migration::prelude::*;

use crate::m20250301_000001_create_access_tables::Users;
use crate::m20250301_000002_create_academic_tables::{AcademicYears, Students};
use crate::{id_column, timestamp_columns};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建缴费表，金额以分为单位
        let mut payments = Table::create();
        payments
            .table(Payments::Table)
            .if_not_exists()
            .col(id_column(Payments::Id))
            .col(ColumnDef::new(Payments::StudentId).big_integer().not_null())
            .col(
                ColumnDef::new(Payments::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Payments::AmountCents)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Payments::PaymentType).string().not_null())
            .col(ColumnDef::new(Payments::PaymentDate).string().not_null())
            .col(
                ColumnDef::new(Payments::Status)
                    .string()
                    .not_null()
                    .default("pending"),
            )
            .col(
                ColumnDef::new(Payments::ReferenceNumber)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Payments::Semester).string().not_null())
            .foreign_key(
                ForeignKey::create()
                    .from(Payments::Table, Payments::StudentId)
                    .to(Students::Table, Students::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Payments::Table, Payments::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            payments.col(col);
        }
        manager.create_table(payments).await?;

        // 创建缴费明细表
        let mut details = Table::create();
        details
            .table(PaymentDetails::Table)
            .if_not_exists()
            .col(id_column(PaymentDetails::Id))
            .col(
                ColumnDef::new(PaymentDetails::PaymentId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(PaymentDetails::FeeType).string().not_null())
            .col(
                ColumnDef::new(PaymentDetails::AmountCents)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(PaymentDetails::Description).text().null())
            .foreign_key(
                ForeignKey::create()
                    .from(PaymentDetails::Table, PaymentDetails::PaymentId)
                    .to(Payments::Table, Payments::Id)
                    .on_delete(ForeignKeyAction::Cascade),
            );
        for col in timestamp_columns() {
            details.col(col);
        }
        manager.create_table(details).await?;

        // 创建报表表
        let mut reports = Table::create();
        reports
            .table(Reports::Table)
            .if_not_exists()
            .col(id_column(Reports::Id))
            .col(ColumnDef::new(Reports::Title).string().not_null())
            .col(ColumnDef::new(Reports::ReportType).string().not_null())
            .col(
                ColumnDef::new(Reports::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Reports::Semester).string().null())
            .col(ColumnDef::new(Reports::Parameters).text().null())
            .col(ColumnDef::new(Reports::GeneratedBy).big_integer().not_null())
            .col(ColumnDef::new(Reports::FilePath).string().null())
            .col(
                ColumnDef::new(Reports::Status)
                    .string()
                    .not_null()
                    .default("pending"),
            )
            .col(ColumnDef::new(Reports::ErrorMessage).text().null())
            .foreign_key(
                ForeignKey::create()
                    .from(Reports::Table, Reports::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Reports::Table, Reports::GeneratedBy)
                    .to(Users::Table, Users::Id),
            );
        for col in timestamp_columns() {
            reports.col(col);
        }
        manager.create_table(reports).await?;

        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_payments_student_year")
                    .table(Payments::Table)
                    .col(Payments::StudentId)
                    .col(Payments::AcademicYearId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_reports_status")
                    .table(Reports::Table)
                    .col(Reports::Status)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Reports::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(PaymentDetails::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Payments::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
enum Payments {
    #[sea_orm(iden = "payments")]
    Table,
    Id,
    StudentId,
    AcademicYearId,
    AmountCents,
    PaymentType,
    PaymentDate,
    Status,
    ReferenceNumber,
    Semester,
}

#[derive(DeriveIden)]
enum PaymentDetails {
    #[sea_orm(iden = "payment_details")]
    Table,
    Id,
    PaymentId,
    FeeType,
    AmountCents,
    Description,
}

#[derive(DeriveIden)]
enum Reports {
    #[sea_orm(iden = "reports")]
    Table,
    Id,
    Title,
    #[sea_orm(iden = "type")]
    ReportType,
    AcademicYearId,
    Semester,
    Parameters,
    GeneratedBy,
    FilePath,
    Status,
    ErrorMessage,
}
