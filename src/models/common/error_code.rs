/// API 业务错误码
///
/// 0 表示成功，其余按模块分段。
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum ErrorCode {
    Success = 0,

    // 通用错误
    BadRequest = 1000,
    Unauthorized = 1001,
    Forbidden = 1002,
    NotFound = 1003,
    Conflict = 1004,
    RateLimitExceeded = 1005,
    InternalServerError = 1006,
    ValidationFailed = 1007,

    // 认证
    AuthFailed = 2000,
    UserInactive = 2001,
    InvalidCurrentPassword = 2002,

    // 用户、角色、权限
    UserNotFound = 3000,
    UserAlreadyExists = 3001,
    CannotDeleteSelf = 3002,
    RoleNotFound = 3003,
    RoleProtected = 3004,
    PermissionNotFound = 3005,

    // 学年与组织结构
    AcademicYearNotFound = 4000,
    AcademicYearInUse = 4001,
    NoCurrentAcademicYear = 4002,
    DepartmentNotFound = 4100,
    SubjectNotFound = 4101,
    TeacherNotFound = 4102,
    StudentNotFound = 4103,
    CourseNotFound = 4104,

    // 选课、成绩、课表
    EnrollmentNotFound = 5000,
    CourseFull = 5001,
    AlreadyEnrolled = 5002,
    PaymentRequired = 5003,
    GradeNotFound = 5004,
    ScheduleNotFound = 5005,
    ScheduleConflict = 5006,
    NotCourseTeacher = 5007,

    // 缴费
    PaymentNotFound = 6000,
    InvalidPaymentTransition = 6001,

    // 报表
    ReportNotFound = 7000,
    ReportNotReady = 7001,
    ReportQueueFull = 7002,

    // 文件
    FileNotFound = 8000,
    FileTypeNotAllowed = 8001,
    FileSizeExceeded = 8002,
    FileUploadFailed = 8003,
    MultifileUploadNotAllowed = 8004,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_values() {
        assert_eq!(ErrorCode::Success as i32, 0);
        assert_eq!(ErrorCode::Conflict as i32, 1004);
        assert_eq!(ErrorCode::CourseFull as i32, 5001);
        assert_eq!(ErrorCode::ReportQueueFull as i32, 7002);
    }
}
