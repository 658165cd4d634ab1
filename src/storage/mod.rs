use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户（密码已哈希）
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息（含角色与权限）
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(
        &self,
        query: UserListQuery,
    ) -> Result<PaginatedResponse<User>>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 同步用户角色
    async fn sync_user_roles(&self, id: i64, roles: Vec<String>) -> Result<Option<User>>;
    // 软删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量
    async fn count_users(&self) -> Result<u64>;

    /// 角色与权限
    async fn create_role(&self, req: CreateRoleRequest) -> Result<Role>;
    async fn get_role_by_id(&self, id: i64) -> Result<Option<Role>>;
    async fn list_roles_with_pagination(
        &self,
        query: RoleListQuery,
    ) -> Result<PaginatedResponse<Role>>;
    async fn update_role(&self, id: i64, update: UpdateRoleRequest) -> Result<Option<Role>>;
    async fn sync_role_permissions(
        &self,
        id: i64,
        permission_ids: Vec<i64>,
    ) -> Result<Option<Role>>;
    async fn delete_role(&self, id: i64) -> Result<bool>;
    // 确保角色存在并至少拥有给定权限（启动时播种）
    async fn ensure_role(&self, name: &str, permission_slugs: &[&str]) -> Result<Role>;
    async fn create_permission(&self, req: CreatePermissionRequest) -> Result<Permission>;
    async fn list_permissions_with_pagination(
        &self,
        query: RoleListQuery,
    ) -> Result<PaginatedResponse<Permission>>;
    async fn update_permission(
        &self,
        id: i64,
        update: UpdatePermissionRequest,
    ) -> Result<Option<Permission>>;
    async fn delete_permission(&self, id: i64) -> Result<bool>;
    async fn ensure_permission(&self, slug: &str, name: &str) -> Result<Permission>;

    /// 学年
    async fn create_academic_year(&self, req: CreateAcademicYearRequest) -> Result<AcademicYear>;
    async fn get_academic_year_by_id(&self, id: i64) -> Result<Option<AcademicYear>>;
    async fn get_current_academic_year(&self) -> Result<Option<AcademicYear>>;
    async fn list_academic_years_with_pagination(
        &self,
        query: AcademicYearListQuery,
    ) -> Result<PaginatedResponse<AcademicYear>>;
    async fn list_all_academic_years(&self) -> Result<Vec<AcademicYear>>;
    async fn update_academic_year(
        &self,
        id: i64,
        update: UpdateAcademicYearRequest,
    ) -> Result<Option<AcademicYear>>;
    // 设为唯一的当前学年
    async fn set_current_academic_year(&self, id: i64) -> Result<Option<AcademicYear>>;
    // 仍被学生或课程引用时返回 Conflict
    async fn delete_academic_year(&self, id: i64) -> Result<bool>;

    /// 院系
    async fn create_department(&self, req: CreateDepartmentRequest) -> Result<Department>;
    async fn get_department_by_id(&self, id: i64) -> Result<Option<Department>>;
    async fn list_departments_with_pagination(
        &self,
        query: DepartmentListQuery,
    ) -> Result<PaginatedResponse<Department>>;
    async fn update_department(
        &self,
        id: i64,
        update: UpdateDepartmentRequest,
    ) -> Result<Option<Department>>;
    async fn delete_department(&self, id: i64) -> Result<bool>;

    /// 科目
    async fn create_subject(&self, req: CreateSubjectRequest) -> Result<SubjectDetail>;
    async fn get_subject_detail(&self, id: i64) -> Result<Option<SubjectDetail>>;
    async fn list_subjects_with_pagination(
        &self,
        query: SubjectListQuery,
    ) -> Result<PaginatedResponse<Subject>>;
    async fn update_subject(
        &self,
        id: i64,
        update: UpdateSubjectRequest,
    ) -> Result<Option<SubjectDetail>>;
    async fn sync_subject_teachers(
        &self,
        id: i64,
        teacher_ids: Vec<i64>,
    ) -> Result<Option<SubjectDetail>>;
    async fn delete_subject(&self, id: i64) -> Result<bool>;

    /// 教师
    async fn create_teacher(&self, req: CreateTeacherRequest) -> Result<Teacher>;
    async fn get_teacher_by_id(&self, id: i64) -> Result<Option<Teacher>>;
    async fn get_teacher_by_email(&self, email: &str) -> Result<Option<Teacher>>;
    async fn list_teachers_with_pagination(
        &self,
        query: TeacherListQuery,
    ) -> Result<PaginatedResponse<Teacher>>;
    async fn update_teacher(
        &self,
        id: i64,
        update: UpdateTeacherRequest,
    ) -> Result<Option<Teacher>>;
    async fn delete_teacher(&self, id: i64) -> Result<bool>;
    async fn list_teacher_subjects(&self, id: i64) -> Result<Vec<Subject>>;
    async fn sync_teacher_subjects(
        &self,
        id: i64,
        subject_ids: Vec<i64>,
    ) -> Result<Option<Vec<Subject>>>;
    async fn list_teacher_schedules(&self, id: i64) -> Result<Vec<Schedule>>;
    // 教师是否任教该课程
    async fn is_course_teacher(&self, teacher_id: i64, course_id: i64) -> Result<bool>;

    /// 学生
    async fn create_student(&self, req: CreateStudentRequest) -> Result<Student>;
    async fn get_student_by_id(&self, id: i64) -> Result<Option<Student>>;
    async fn get_student_by_email(&self, email: &str) -> Result<Option<Student>>;
    async fn list_students_with_pagination(
        &self,
        query: StudentListQuery,
    ) -> Result<PaginatedResponse<Student>>;
    async fn update_student(
        &self,
        id: i64,
        update: UpdateStudentRequest,
    ) -> Result<Option<Student>>;
    async fn delete_student(&self, id: i64) -> Result<bool>;
    // 成绩单所需的成绩记录
    async fn list_student_grade_records(&self, id: i64) -> Result<Vec<GradeRecord>>;

    /// 课程
    async fn create_course(&self, req: CreateCourseRequest) -> Result<CourseDetail>;
    async fn get_course_by_id(&self, id: i64) -> Result<Option<Course>>;
    async fn get_course_detail(&self, id: i64) -> Result<Option<CourseDetail>>;
    async fn list_courses_with_pagination(
        &self,
        query: CourseListQuery,
    ) -> Result<PaginatedResponse<Course>>;
    async fn update_course(
        &self,
        id: i64,
        update: UpdateCourseRequest,
    ) -> Result<Option<CourseDetail>>;
    async fn sync_course_teachers(
        &self,
        id: i64,
        teacher_ids: Vec<i64>,
    ) -> Result<Option<CourseDetail>>;
    async fn delete_course(&self, id: i64) -> Result<bool>;

    /// 选课
    async fn create_enrollment(
        &self,
        req: CreateEnrollmentRequest,
        require_payment: bool,
    ) -> Result<EnrollOutcome>;
    async fn get_enrollment_by_id(&self, id: i64) -> Result<Option<Enrollment>>;
    async fn list_enrollments_with_pagination(
        &self,
        query: EnrollmentListQuery,
    ) -> Result<PaginatedResponse<Enrollment>>;
    /// 重新激活被拒时返回对应的 `EnrollOutcome`
    async fn update_enrollment(
        &self,
        id: i64,
        update: UpdateEnrollmentRequest,
    ) -> Result<Option<EnrollOutcome>>;
    async fn delete_enrollment(&self, id: i64) -> Result<bool>;

    /// 成绩
    async fn create_grade(&self, req: CreateGradeRequest, recorded_by: i64) -> Result<Grade>;
    async fn get_grade_by_id(&self, id: i64) -> Result<Option<Grade>>;
    async fn list_grades_with_pagination(
        &self,
        query: GradeListQuery,
    ) -> Result<PaginatedResponse<Grade>>;
    async fn update_grade(&self, id: i64, update: UpdateGradeRequest) -> Result<Option<Grade>>;
    async fn delete_grade(&self, id: i64) -> Result<bool>;

    /// 课表
    async fn create_schedule(&self, req: CreateScheduleRequest) -> Result<ScheduleOutcome>;
    async fn get_schedule_by_id(&self, id: i64) -> Result<Option<Schedule>>;
    async fn list_schedules_with_pagination(
        &self,
        query: ScheduleListQuery,
    ) -> Result<PaginatedResponse<Schedule>>;
    async fn update_schedule(
        &self,
        id: i64,
        update: UpdateScheduleRequest,
    ) -> Result<Option<ScheduleOutcome>>;
    async fn delete_schedule(&self, id: i64) -> Result<bool>;

    /// 缴费
    async fn create_payment(&self, req: CreatePaymentRequest) -> Result<Payment>;
    async fn get_payment_by_id(&self, id: i64) -> Result<Option<Payment>>;
    async fn list_payments_with_pagination(
        &self,
        query: PaymentListQuery,
    ) -> Result<PaginatedResponse<Payment>>;
    async fn update_payment(
        &self,
        id: i64,
        update: UpdatePaymentRequest,
    ) -> Result<Option<Payment>>;
    async fn delete_payment(&self, id: i64) -> Result<bool>;

    /// 报表
    async fn create_report(&self, req: CreateReportRequest, generated_by: i64) -> Result<Report>;
    async fn get_report_by_id(&self, id: i64) -> Result<Option<ReportWithRelations>>;
    async fn list_reports_with_pagination(
        &self,
        query: ReportListQuery,
    ) -> Result<PaginatedResponse<ReportWithRelations>>;
    // 更新报表生成状态
    async fn update_report_status(
        &self,
        id: i64,
        status: ReportStatus,
        file_path: Option<String>,
        error_message: Option<String>,
    ) -> Result<bool>;
    async fn delete_report(&self, id: i64) -> Result<bool>;
    // 仍处于 pending 的报表
    async fn list_pending_report_ids(&self) -> Result<Vec<i64>>;
    // 汇总报表数据
    async fn collect_report_dataset(
        &self,
        academic_year_id: i64,
        semester: Option<String>,
    ) -> Result<ReportDataset>;

    /// 首页统计
    async fn get_dashboard_stats(&self) -> Result<DashboardStats>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
