pub use sea_orm_migration::prelude::*;

mod m20250301_000001_create_access_tables;
mod m20250301_000002_create_academic_tables;
mod m20250301_000003_create_finance_tables;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250301_000001_create_access_tables::Migration),
            Box::new(m20250301_000002_create_academic_tables::Migration),
            Box::new(m20250301_000003_create_finance_tables::Migration),
        ]
    }
}

/// 通用列：自增主键
pub(crate) fn id_column<T: IntoIden>(name: T) -> ColumnDef {
    ColumnDef::new(name)
        .big_integer()
        .not_null()
        .auto_increment()
        .primary_key()
        .to_owned()
}

/// 通用列：时间戳与软删除标记
pub(crate) fn timestamp_columns() -> [ColumnDef; 3] {
    [
        ColumnDef::new(Common::CreatedAt)
            .big_integer()
            .not_null()
            .to_owned(),
        ColumnDef::new(Common::UpdatedAt)
            .big_integer()
            .not_null()
            .to_owned(),
        ColumnDef::new(Common::DeletedAt).big_integer().null().to_owned(),
    ]
}

#[derive(DeriveIden)]
pub(crate) enum Common {
    CreatedAt,
    UpdatedAt,
    DeletedAt,
}
