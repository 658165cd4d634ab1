pub mod academic_years;
pub mod auth;
pub mod courses;
pub mod dashboard;
pub mod departments;
pub mod enrollments;
pub mod files;
pub mod frontend;
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

pub use academic_years::configure_academic_year_routes;
pub use auth::configure_auth_routes;
pub use courses::configure_course_routes;
pub use dashboard::configure_dashboard_routes;
pub use departments::configure_department_routes;
pub use enrollments::configure_enrollment_routes;
pub use files::configure_file_routes;
pub use frontend::configure_frontend_routes;
pub use grades::configure_grade_routes;
pub use payments::configure_payment_routes;
pub use permissions::configure_permission_routes;
pub use reports::configure_report_routes;
pub use roles::configure_role_routes;
pub use schedules::configure_schedule_routes;
pub use students::configure_student_routes;
pub use subjects::configure_subject_routes;
pub use teachers::configure_teacher_routes;
pub use users::configure_user_routes;
