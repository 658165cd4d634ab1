//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod academic_years;
mod courses;
mod dashboard;
mod departments;
mod enrollments;
mod grades;
mod payments;
mod reports;
mod roles;
mod schedules;
mod students;
mod subjects;
mod teachers;
mod users;

#[cfg(test)]
pub(crate) mod test_support;

use crate::config::AppConfig;
use crate::entity::SoftDeletable;
use crate::errors::{Result, SchoolError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{
    ColumnTrait, ConnectOptions, ConnectionTrait, Database, DatabaseConnection, DbErr,
    EntityTrait, QueryFilter, SqlErr, sea_query::Expr,
};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        let storage = Self::from_connection(db).await?;
        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(storage)
    }

    /// 基于已有连接创建存储并运行迁移
    pub async fn from_connection(db: DatabaseConnection) -> Result<Self> {
        Migrator::up(&db, None)
            .await
            .map_err(|e| SchoolError::database_operation(format!("数据库迁移失败: {e}")))?;

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| SchoolError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| SchoolError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(SchoolError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 确认被引用的记录存在且未被软删除
    pub(crate) async fn ensure_live<E: SoftDeletable>(&self, id: i64, label: &str) -> Result<()> {
        let found = E::find()
            .filter(E::id().eq(id))
            .filter(E::deleted_at().is_null())
            .one(&self.db)
            .await
            .map_err(|e| SchoolError::database_operation(format!("查询{label}失败: {e}")))?;

        match found {
            Some(_) => Ok(()),
            None => Err(SchoolError::validation(format!("{label} {id} 不存在"))),
        }
    }
}

/// 软删除一条记录，返回是否命中
pub(crate) async fn soft_delete<E, C>(conn: &C, id: i64) -> std::result::Result<bool, DbErr>
where
    E: SoftDeletable,
    C: ConnectionTrait,
{
    let now = chrono::Utc::now().timestamp();
    let result = E::update_many()
        .col_expr(E::deleted_at(), Expr::value(now))
        .filter(E::id().eq(id))
        .filter(E::deleted_at().is_null())
        .exec(conn)
        .await?;

    Ok(result.rows_affected > 0)
}

/// 写入失败分类：唯一约束冲突为 Conflict，外键失效为 Validation
pub(crate) fn classify_write_error(action: &str, err: DbErr) -> SchoolError {
    match err.sql_err() {
        Some(SqlErr::UniqueConstraintViolation(detail)) => {
            SchoolError::conflict(format!("{action}失败: 记录已存在 ({detail})"))
        }
        Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
            SchoolError::validation(format!("{action}失败: 关联记录不存在 ({detail})"))
        }
        _ => SchoolError::database_operation(format!("{action}失败: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_database_url() {
        assert_eq!(
            SeaOrmStorage::build_database_url("school.db").unwrap(),
            "sqlite://school.db?mode=rwc"
        );
        assert_eq!(
            SeaOrmStorage::build_database_url("postgres://u:p@localhost/school").unwrap(),
            "postgres://u:p@localhost/school"
        );
        assert!(SeaOrmStorage::build_database_url("ftp://nope").is_err());
    }

    #[test]
    fn test_classify_plain_error() {
        let err = classify_write_error("创建学生", DbErr::Custom("boom".into()));
        assert!(matches!(err, SchoolError::DatabaseOperation(_)));
    }
}

// Storage trait 实现
use crate::models::{
    PaginatedResponse,
    academic_years::{
        entities::AcademicYear,
        requests::{AcademicYearListQuery, CreateAcademicYearRequest, UpdateAcademicYearRequest},
    },
    courses::{
        entities::{Course, CourseDetail},
        requests::{CourseListQuery, CreateCourseRequest, UpdateCourseRequest},
    },
    dashboard::responses::DashboardStats,
    departments::{
        entities::Department,
        requests::{CreateDepartmentRequest, DepartmentListQuery, UpdateDepartmentRequest},
    },
    enrollments::{
        entities::{EnrollOutcome, Enrollment},
        requests::{CreateEnrollmentRequest, EnrollmentListQuery, UpdateEnrollmentRequest},
    },
    grades::{
        entities::Grade,
        requests::{CreateGradeRequest, GradeListQuery, UpdateGradeRequest},
    },
    payments::{
        entities::Payment,
        requests::{CreatePaymentRequest, PaymentListQuery, UpdatePaymentRequest},
    },
    reports::{
        dataset::ReportDataset,
        entities::{Report, ReportStatus, ReportWithRelations},
        requests::{CreateReportRequest, ReportListQuery},
    },
    roles::{
        entities::{Permission, Role},
        requests::{
            CreatePermissionRequest, CreateRoleRequest, RoleListQuery, UpdatePermissionRequest,
            UpdateRoleRequest,
        },
    },
    schedules::{
        entities::{Schedule, ScheduleOutcome},
        requests::{CreateScheduleRequest, ScheduleListQuery, UpdateScheduleRequest},
    },
    students::{
        entities::Student,
        requests::{CreateStudentRequest, StudentListQuery, UpdateStudentRequest},
        transcript::GradeRecord,
    },
    subjects::{
        entities::{Subject, SubjectDetail},
        requests::{CreateSubjectRequest, SubjectListQuery, UpdateSubjectRequest},
    },
    teachers::{
        entities::Teacher,
        requests::{CreateTeacherRequest, TeacherListQuery, UpdateTeacherRequest},
    },
    users::{
        entities::User,
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn sync_user_roles(&self, id: i64, roles: Vec<String>) -> Result<Option<User>> {
        self.sync_user_roles_impl(id, roles).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<u64> {
        self.count_users_impl().await
    }

    // 角色与权限模块
    async fn create_role(&self, req: CreateRoleRequest) -> Result<Role> {
        self.create_role_impl(req).await
    }

    async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>> {
        self.get_role_by_id_impl(id).await
    }

    async fn list_roles_with_pagination(
        &self,
        query: RoleListQuery,
    ) -> Result<PaginatedResponse<Role>> {
        self.list_roles_with_pagination_impl(query).await
    }

    async fn update_role(&self, id: i64, update: UpdateRoleRequest) -> Result<Option<Role>> {
        self.update_role_impl(id, update).await
    }

    async fn sync_role_permissions(
        &self,
        id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Option<Role>> {
        self.sync_role_permissions_impl(id, permission_ids).await
    }

    async fn delete_role(&self, id: i64) -> Result<bool> {
        self.delete_role_impl(id).await
    }

    async fn ensure_role(&self, name: &str, permission_slugs: &[&str]) -> Result<Role> {
        self.ensure_role_impl(name, permission_slugs).await
    }

    async fn create_permission(&self, req: CreatePermissionRequest) -> Result<Permission> {
        self.create_permission_impl(req).await
    }

    async fn list_permissions_with_pagination(
        &self,
        query: RoleListQuery,
    ) -> Result<PaginatedResponse<Permission>> {
        self.list_permissions_with_pagination_impl(query).await
    }

    async fn update_permission(
        &self,
        id: i64,
        update: UpdatePermissionRequest,
    ) -> Result<Option<Permission>> {
        self.update_permission_impl(id, update).await
    }

    async fn delete_permission(&self, id: i64) -> Result<bool> {
        self.delete_permission_impl(id).await
    }

    async fn ensure_permission(&self, slug: &str, name: &str) -> Result<Permission> {
        self.ensure_permission_impl(slug, name).await
    }

    // 学年模块
    async fn create_academic_year(&self, req: CreateAcademicYearRequest) -> Result<AcademicYear> {
        self.create_academic_year_impl(req).await
    }

    async fn get_academic_year_by_id(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.get_academic_year_by_id_impl(id).await
    }

    async fn get_current_academic_year(&self) -> Result<Option<AcademicYear>> {
        self.get_current_academic_year_impl().await
    }

    async fn list_academic_years_with_pagination(
        &self,
        query: AcademicYearListQuery,
    ) -> Result<PaginatedResponse<AcademicYear>> {
        self.list_academic_years_with_pagination_impl(query).await
    }

    async fn list_all_academic_years(&self) -> Result<Vec<AcademicYear>> {
        self.list_all_academic_years_impl().await
    }

    async fn update_academic_year(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
    ) -> Result<Option<AcademicYear>> {
        self.update_academic_year_impl(id, update).await
    }

    async fn set_current_academic_year(&self, id: i64) -> Result<Option<AcademicYear>> {
        self.set_current_academic_year_impl(id).await
    }

    async fn delete_academic_year(&self, id: i64) -> Result<bool> {
        self.delete_academic_year_impl(id).await
    }

    // 院系模块
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department> {
        self.create_department_impl(req).await
    }

    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>> {
        self.get_department_by_id_impl(id).await
    }

    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>> {
        self.list_departments_with_pagination_impl(query).await
    }

    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>> {
        self.update_department_impl(id, update).await
    }

    async fn delete_department(&self, id: i64) -> Result<bool> {
        self.delete_department_impl(id).await
    }

    // 科目模块
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<SubjectDetail> {
        self.create_subject_impl(req).await
    }

    async fn get_subject_detail(&self, id: i64) -> Result<Option<SubjectDetail>> {
        self.get_subject_detail_impl(id).await
    }

    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<PaginatedResponse<Subject>> {
        self.list_subjects_with_pagination_impl(query).await
    }

    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<SubjectDetail>> {
        self.update_subject_impl(id, update).await
    }

    async fn sync_subject_teachers(
        &self,
        id: i64,
        teacher_ids: Vec<i64>,
    ) -> Result<Option<SubjectDetail>> {
        self.sync_subject_teachers_impl(id, teacher_ids).await
    }

    async fn delete_subject(&self, id: i64) -> Result<bool> {
        self.delete_subject_impl(id).await
    }

    // 教师模块
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher> {
        self.create_teacher_impl(req).await
    }

    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>> {
        self.get_teacher_by_id_impl(id).await
    }

    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>> {
        self.get_teacher_by_email_impl(email).await
    }

    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>> {
        self.list_teachers_with_pagination_impl(query).await
    }

    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>> {
        self.update_teacher_impl(id, update).await
    }

    async fn delete_teacher(&self, id: i64) -> Result<bool> {
        self.delete_teacher_impl(id).await
    }

    async fn list_teacher_subjects(&self, id: i64) -> Result<Vec<Subject>> {
        self.list_teacher_subjects_impl(id).await
    }

    async fn sync_teacher_subjects(
        &self,
        id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Option<Vec<Subject>>> {
        self.sync_teacher_subjects_impl(id, subject_ids).await
    }

    async fn list_teacher_schedules(&self, id: i64) -> Result<Vec<Schedule>> {
        self.list_teacher_schedules_impl(id).await
    }

    async fn is_course_teacher(&self, teacher_id: i64, course_id: i64) -> Result<bool> {
        self.is_course_teacher_impl(teacher_id, course_id).await
    }

    // 学生模块
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student> {
        self.create_student_impl(req).await
    }

    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>> {
        self.get_student_by_id_impl(id).await
    }

    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>> {
        self.get_student_by_email_impl(email).await
    }

    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>> {
        self.list_students_with_pagination_impl(query).await
    }

    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>> {
        self.update_student_impl(id, update).await
    }

    async fn delete_student(&self, id: i64) -> Result<bool> {
        self.delete_student_impl(id).await
    }

    async fn list_student_grade_records(&self, id: i64) -> Result<Vec<GradeRecord>> {
        self.list_student_grade_records_impl(id).await
    }

    // 课程模块
    async fn create_course(&self, req: CreateCourseRequest) -> Result<CourseDetail> {
        self.create_course_impl(req).await
    }

    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>> {
        self.get_course_by_id_impl(id).await
    }

    async fn get_course_detail(&self, id: i64) -> Result<Option<CourseDetail>> {
        self.get_course_detail_impl(id).await
    }

    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>> {
        self.list_courses_with_pagination_impl(query).await
    }

    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<CourseDetail>> {
        self.update_course_impl(id, update).await
    }

    async fn sync_course_teachers(
        &self,
        id: i64,
        teacher_ids: Vec<i64>,
    ) -> Result<Option<CourseDetail>> {
        self.sync_course_teachers_impl(id, teacher_ids).await
    }

    async fn delete_course(&self, id: i64) -> Result<bool> {
        self.delete_course_impl(id).await
    }

    // 选课模块
    async fn create_enrollment(
        &self,
        req: CreateEnrollmentRequest,
        require_payment: bool,
    ) -> Result<EnrollOutcome> {
        self.create_enrollment_impl(req, require_payment).await
    }

    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>> {
        self.get_enrollment_by_id_impl(id).await
    }

    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>> {
        self.list_enrollments_with_pagination_impl(query).await
    }

    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<EnrollOutcome>> {
        self.update_enrollment_impl(id, update).await
    }

    async fn delete_enrollment(&self, id: i64) -> Result<bool> {
        self.delete_enrollment_impl(id).await
    }

    // 成绩模块
    async fn create_grade(&self, req: CreateGradeRequest, recorded_by: i64) -> Result<Grade> {
        self.create_grade_impl(req, recorded_by).await
    }

    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>> {
        self.get_grade_by_id_impl(id).await
    }

    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<PaginatedResponse<Grade>> {
        self.list_grades_with_pagination_impl(query).await
    }

    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>> {
        self.update_grade_impl(id, update).await
    }

    async fn delete_grade(&self, id: i64) -> Result<bool> {
        self.delete_grade_impl(id).await
    }

    // 课表模块
    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<ScheduleOutcome> {
        self.create_schedule_impl(req).await
    }

    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>> {
        self.get_schedule_by_id_impl(id).await
    }

    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<PaginatedResponse<Schedule>> {
        self.list_schedules_with_pagination_impl(query).await
    }

    async fn update_schedule(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<ScheduleOutcome>> {
        self.update_schedule_impl(id, update).await
    }

    async fn delete_schedule(&self, id: i64) -> Result<bool> {
        self.delete_schedule_impl(id).await
    }

    // 缴费模块
    async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment> {
        self.create_payment_impl(req).await
    }

    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>> {
        self.get_payment_by_id_impl(id).await
    }

    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<Payment>> {
        self.list_payments_with_pagination_impl(query).await
    }

    async fn update_payment(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>> {
        self.update_payment_impl(id, update).await
    }

    async fn delete_payment(&self, id: i64) -> Result<bool> {
        self.delete_payment_impl(id).await
    }

    // 报表模块
    async fn create_report(&self, req: CreateReportRequest, generated_by: i64) -> Result<Report> {
        self.create_report_impl(req, generated_by).await
    }

    async fn get_report_by_id(&self, id: i64) -> Result<Option<ReportWithRelations>> {
        self.get_report_by_id_impl(id).await
    }

    async fn list_reports_with_pagination(
        &self,
        query: ReportListQuery,
    ) -> Result<PaginatedResponse<ReportWithRelations>> {
        self.list_reports_with_pagination_impl(query).await
    }

    async fn update_report_status(
        &self,
        id: i64,
        status: ReportStatus,
        file_path: Option<String>,
        error_message: Option<String>,
    ) -> Result<bool> {
        self.update_report_status_impl(id, status, file_path, error_message).await
    }

    async fn delete_report(&self, id: i64) -> Result<bool> {
        self.delete_report_impl(id).await
    }

    async fn list_pending_report_ids(&self) -> Result<Vec<i64>> {
        self.list_pending_report_ids_impl().await
    }

    async fn collect_report_dataset(
        &self,
        academic_year_id: i64,
        semester: Option<String>,
    ) -> Result<ReportDataset> {
        self.collect_report_dataset_impl(academic_year_id, semester).await
    }

    // 首页统计
    async fn get_dashboard_stats(&self) -> Result<DashboardStats> {
        self.get_dashboard_stats_impl().await
    }
}
