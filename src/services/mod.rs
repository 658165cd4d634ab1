pub mod academic_years;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod enrollments;
pub mod files;
pub mod grades;
pub mod payments;
pub mod permissions;
pub mod reports;
pub mod roles;
pub mod schedules;
pub mod students;
pub mod subjects;
pub mod teachers;
pub mod users;

pub use academic_years::AcademicYearService;
pub use auth::AuthService;
pub use courses::CourseService;
pub use dashboard::DashboardService;
pub use departments::DepartmentService;
pub use enrollments::EnrollmentService;
pub use files::FileService;
pub use grades::GradeService;
pub use payments::PaymentService;
pub use permissions::PermissionService;
pub use reports::{ReportQueue, ReportService};
pub use roles::RoleService;
pub use schedules::ScheduleService;
pub use students::StudentService;
pub use subjects::SubjectService;
pub use teachers::TeacherService;
pub use users::UserService;
