use sea_orm_migration::prelude::*;

use crate::{id_column, timestamp_columns};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 创建学年表
        let mut academic_years = Table::create();
        academic_years
            .table(AcademicYears::Table)
            .if_not_exists()
            .col(id_column(AcademicYears::Id))
            .col(
                ColumnDef::new(AcademicYears::Year)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(AcademicYears::StartDate).string().not_null())
            .col(ColumnDef::new(AcademicYears::EndDate).string().not_null())
            .col(
                ColumnDef::new(AcademicYears::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .col(
                ColumnDef::new(AcademicYears::Current)
                    .boolean()
                    .not_null()
                    .default(false),
            );
        for col in timestamp_columns() {
            academic_years.col(col);
        }
        manager.create_table(academic_years).await?;

        // 创建院系表
        // head_teacher_id 与 teachers 互相引用，外键由服务层校验
        let mut departments = Table::create();
        departments
            .table(Departments::Table)
            .if_not_exists()
            .col(id_column(Departments::Id))
            .col(
                ColumnDef::new(Departments::Name)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(Departments::Code)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Departments::Description).text().null())
            .col(ColumnDef::new(Departments::HeadTeacherId).big_integer().null())
            .col(
                ColumnDef::new(Departments::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Departments::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Departments::Table, Departments::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            departments.col(col);
        }
        manager.create_table(departments).await?;

        // 创建教师表
        let mut teachers = Table::create();
        teachers
            .table(Teachers::Table)
            .if_not_exists()
            .col(id_column(Teachers::Id))
            .col(
                ColumnDef::new(Teachers::EmployeeId)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Teachers::FirstName).string().not_null())
            .col(ColumnDef::new(Teachers::LastName).string().not_null())
            .col(
                ColumnDef::new(Teachers::Email)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Teachers::Phone).string().not_null())
            .col(ColumnDef::new(Teachers::Address).text().not_null())
            .col(ColumnDef::new(Teachers::Gender).string().not_null())
            .col(ColumnDef::new(Teachers::BirthDate).string().not_null())
            .col(ColumnDef::new(Teachers::Nationality).string().not_null())
            .col(ColumnDef::new(Teachers::Photo).string().null())
            .col(ColumnDef::new(Teachers::JoiningDate).string().not_null())
            .col(ColumnDef::new(Teachers::ContractType).string().not_null())
            .col(
                ColumnDef::new(Teachers::EmploymentStatus)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .col(ColumnDef::new(Teachers::Qualification).string().not_null())
            .col(ColumnDef::new(Teachers::Specialization).string().not_null())
            .col(
                ColumnDef::new(Teachers::ExperienceYears)
                    .integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Teachers::PreviousEmployment).text().null())
            .col(
                ColumnDef::new(Teachers::DepartmentId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Teachers::Position).string().not_null())
            .col(ColumnDef::new(Teachers::SalaryGrade).string().not_null())
            .col(ColumnDef::new(Teachers::BankAccount).string().null())
            .col(ColumnDef::new(Teachers::TaxNumber).string().null())
            .col(ColumnDef::new(Teachers::SocialSecurityNumber).string().null())
            .col(
                ColumnDef::new(Teachers::EmergencyContactName)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Teachers::EmergencyContactPhone)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(Teachers::AdditionalInfo).text().null())
            .foreign_key(
                ForeignKey::create()
                    .from(Teachers::Table, Teachers::DepartmentId)
                    .to(Departments::Table, Departments::Id),
            );
        for col in timestamp_columns() {
            teachers.col(col);
        }
        manager.create_table(teachers).await?;

        // 创建科目表
        let mut subjects = Table::create();
        subjects
            .table(Subjects::Table)
            .if_not_exists()
            .col(id_column(Subjects::Id))
            .col(ColumnDef::new(Subjects::Name).string().not_null())
            .col(
                ColumnDef::new(Subjects::Code)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(
                ColumnDef::new(Subjects::DepartmentId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Subjects::Description).text().null())
            .col(
                ColumnDef::new(Subjects::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Subjects::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Subjects::Table, Subjects::DepartmentId)
                    .to(Departments::Table, Departments::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Subjects::Table, Subjects::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            subjects.col(col);
        }
        manager.create_table(subjects).await?;

        // 教师-科目关联表
        manager
            .create_table(
                Table::create()
                    .table(TeacherSubjects::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(TeacherSubjects::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSubjects::SubjectId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(TeacherSubjects::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(TeacherSubjects::TeacherId)
                            .col(TeacherSubjects::SubjectId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjects::Table, TeacherSubjects::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(TeacherSubjects::Table, TeacherSubjects::SubjectId)
                            .to(Subjects::Table, Subjects::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建学生表
        let mut students = Table::create();
        students
            .table(Students::Table)
            .if_not_exists()
            .col(id_column(Students::Id))
            .col(
                ColumnDef::new(Students::Matricule)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Students::FirstName).string().not_null())
            .col(ColumnDef::new(Students::LastName).string().not_null())
            .col(ColumnDef::new(Students::Email).string().null().unique_key())
            .col(ColumnDef::new(Students::Phone).string().null())
            .col(ColumnDef::new(Students::Address).text().not_null())
            .col(ColumnDef::new(Students::Gender).string().not_null())
            .col(ColumnDef::new(Students::BirthDate).string().not_null())
            .col(ColumnDef::new(Students::BirthPlace).string().not_null())
            .col(ColumnDef::new(Students::Nationality).string().not_null())
            .col(ColumnDef::new(Students::Photo).string().null())
            .col(ColumnDef::new(Students::AdmissionDate).string().not_null())
            .col(ColumnDef::new(Students::CurrentClass).string().not_null())
            .col(
                ColumnDef::new(Students::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Students::EducationLevel).string().not_null())
            .col(ColumnDef::new(Students::PreviousSchool).string().null())
            .col(ColumnDef::new(Students::GuardianName).string().not_null())
            .col(
                ColumnDef::new(Students::GuardianRelationship)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(Students::GuardianPhone).string().not_null())
            .col(ColumnDef::new(Students::GuardianEmail).string().null())
            .col(ColumnDef::new(Students::GuardianAddress).text().not_null())
            .col(
                ColumnDef::new(Students::GuardianOccupation)
                    .string()
                    .not_null(),
            )
            .col(ColumnDef::new(Students::HealthIssues).text().null())
            .col(ColumnDef::new(Students::BloodGroup).string().null())
            .col(
                ColumnDef::new(Students::EmergencyContact)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Students::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .col(ColumnDef::new(Students::AdditionalInfo).text().null())
            .foreign_key(
                ForeignKey::create()
                    .from(Students::Table, Students::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            students.col(col);
        }
        manager.create_table(students).await?;

        // 创建课程表
        let mut courses = Table::create();
        courses
            .table(Courses::Table)
            .if_not_exists()
            .col(id_column(Courses::Id))
            .col(
                ColumnDef::new(Courses::Code)
                    .string()
                    .not_null()
                    .unique_key(),
            )
            .col(ColumnDef::new(Courses::Name).string().not_null())
            .col(ColumnDef::new(Courses::SubjectId).big_integer().not_null())
            .col(
                ColumnDef::new(Courses::DepartmentId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Courses::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Courses::Description).text().null())
            .col(ColumnDef::new(Courses::Credits).integer().not_null())
            .col(ColumnDef::new(Courses::HoursPerWeek).integer().not_null())
            .col(ColumnDef::new(Courses::CourseType).string().not_null())
            .col(ColumnDef::new(Courses::EducationLevel).string().not_null())
            .col(ColumnDef::new(Courses::Semester).string().not_null())
            .col(ColumnDef::new(Courses::MaxStudents).integer().not_null())
            .col(ColumnDef::new(Courses::Prerequisites).text().null())
            .col(ColumnDef::new(Courses::Syllabus).text().null())
            .col(ColumnDef::new(Courses::Objectives).text().null())
            .col(
                ColumnDef::new(Courses::AssessmentMethod)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Courses::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Courses::Table, Courses::SubjectId)
                    .to(Subjects::Table, Subjects::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Courses::Table, Courses::DepartmentId)
                    .to(Departments::Table, Departments::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Courses::Table, Courses::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            courses.col(col);
        }
        manager.create_table(courses).await?;

        // 课程-教师关联表
        manager
            .create_table(
                Table::create()
                    .table(CourseTeachers::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(CourseTeachers::CourseId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseTeachers::TeacherId)
                            .big_integer()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(CourseTeachers::CreatedAt)
                            .big_integer()
                            .not_null(),
                    )
                    .primary_key(
                        Index::create()
                            .col(CourseTeachers::CourseId)
                            .col(CourseTeachers::TeacherId),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTeachers::Table, CourseTeachers::CourseId)
                            .to(Courses::Table, Courses::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(CourseTeachers::Table, CourseTeachers::TeacherId)
                            .to(Teachers::Table, Teachers::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // 创建选课表
        let mut enrollments = Table::create();
        enrollments
            .table(CourseEnrollments::Table)
            .if_not_exists()
            .col(id_column(CourseEnrollments::Id))
            .col(
                ColumnDef::new(CourseEnrollments::StudentId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(CourseEnrollments::CourseId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(CourseEnrollments::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(CourseEnrollments::Semester)
                    .string()
                    .not_null(),
            )
            .col(
                ColumnDef::new(CourseEnrollments::Status)
                    .string()
                    .not_null()
                    .default("active"),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(CourseEnrollments::Table, CourseEnrollments::StudentId)
                    .to(Students::Table, Students::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(CourseEnrollments::Table, CourseEnrollments::CourseId)
                    .to(Courses::Table, Courses::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(CourseEnrollments::Table, CourseEnrollments::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            enrollments.col(col);
        }
        manager.create_table(enrollments).await?;

        // 创建成绩表
        let mut grades = Table::create();
        grades
            .table(Grades::Table)
            .if_not_exists()
            .col(id_column(Grades::Id))
            .col(ColumnDef::new(Grades::StudentId).big_integer().not_null())
            .col(ColumnDef::new(Grades::CourseId).big_integer().not_null())
            .col(
                ColumnDef::new(Grades::CourseEnrollmentId)
                    .big_integer()
                    .not_null(),
            )
            .col(
                ColumnDef::new(Grades::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Grades::GradeValue).double().not_null())
            .col(ColumnDef::new(Grades::GradeType).string().not_null())
            .col(ColumnDef::new(Grades::EvaluationDate).string().not_null())
            .col(ColumnDef::new(Grades::RecordedBy).big_integer().not_null())
            .foreign_key(
                ForeignKey::create()
                    .from(Grades::Table, Grades::StudentId)
                    .to(Students::Table, Students::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Grades::Table, Grades::CourseId)
                    .to(Courses::Table, Courses::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Grades::Table, Grades::CourseEnrollmentId)
                    .to(CourseEnrollments::Table, CourseEnrollments::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Grades::Table, Grades::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Grades::Table, Grades::RecordedBy)
                    .to(Teachers::Table, Teachers::Id),
            );
        for col in timestamp_columns() {
            grades.col(col);
        }
        manager.create_table(grades).await?;

        // 创建课表
        let mut schedules = Table::create();
        schedules
            .table(Schedules::Table)
            .if_not_exists()
            .col(id_column(Schedules::Id))
            .col(ColumnDef::new(Schedules::CourseId).big_integer().not_null())
            .col(ColumnDef::new(Schedules::TeacherId).big_integer().not_null())
            .col(
                ColumnDef::new(Schedules::AcademicYearId)
                    .big_integer()
                    .not_null(),
            )
            .col(ColumnDef::new(Schedules::DayOfWeek).string().not_null())
            .col(ColumnDef::new(Schedules::StartTime).string().not_null())
            .col(ColumnDef::new(Schedules::EndTime).string().not_null())
            .col(ColumnDef::new(Schedules::Room).string().not_null())
            .foreign_key(
                ForeignKey::create()
                    .from(Schedules::Table, Schedules::CourseId)
                    .to(Courses::Table, Courses::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Schedules::Table, Schedules::TeacherId)
                    .to(Teachers::Table, Teachers::Id),
            )
            .foreign_key(
                ForeignKey::create()
                    .from(Schedules::Table, Schedules::AcademicYearId)
                    .to(AcademicYears::Table, AcademicYears::Id),
            );
        for col in timestamp_columns() {
            schedules.col(col);
        }
        manager.create_table(schedules).await?;

        // 常用查询索引
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_students_academic_year_id")
                    .table(Students::Table)
                    .col(Students::AcademicYearId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_enrollments_student_course")
                    .table(CourseEnrollments::Table)
                    .col(CourseEnrollments::StudentId)
                    .col(CourseEnrollments::CourseId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_grades_student_id")
                    .table(Grades::Table)
                    .col(Grades::StudentId)
                    .to_owned(),
            )
            .await?;
        manager
            .create_index(
                Index::create()
                    .if_not_exists()
                    .name("idx_schedules_year_day")
                    .table(Schedules::Table)
                    .col(Schedules::AcademicYearId)
                    .col(Schedules::DayOfWeek)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        // 按照创建的相反顺序删除
        manager
            .drop_table(Table::drop().table(Schedules::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Grades::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseEnrollments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(CourseTeachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Courses::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Students::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(TeacherSubjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Subjects::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Teachers::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(Departments::Table).to_owned())
            .await?;
        manager
            .drop_table(Table::drop().table(AcademicYears::Table).to_owned())
            .await?;
        Ok(())
    }
}

#[derive(DeriveIden)]
pub(crate) enum AcademicYears {
    #[sea_orm(iden = "academic_years")]
    Table,
    Id,
    Year,
    StartDate,
    EndDate,
    Status,
    Current,
}

#[derive(DeriveIden)]
enum Departments {
    #[sea_orm(iden = "departments")]
    Table,
    Id,
    Name,
    Code,
    Description,
    HeadTeacherId,
    AcademicYearId,
    Status,
}

#[derive(DeriveIden)]
enum Teachers {
    #[sea_orm(iden = "teachers")]
    Table,
    Id,
    EmployeeId,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Gender,
    BirthDate,
    Nationality,
    Photo,
    JoiningDate,
    ContractType,
    EmploymentStatus,
    Qualification,
    Specialization,
    ExperienceYears,
    PreviousEmployment,
    DepartmentId,
    Position,
    SalaryGrade,
    BankAccount,
    TaxNumber,
    SocialSecurityNumber,
    EmergencyContactName,
    EmergencyContactPhone,
    AdditionalInfo,
}

#[derive(DeriveIden)]
enum Subjects {
    #[sea_orm(iden = "subjects")]
    Table,
    Id,
    Name,
    Code,
    DepartmentId,
    Description,
    AcademicYearId,
    Status,
}

#[derive(DeriveIden)]
enum TeacherSubjects {
    #[sea_orm(iden = "teacher_subjects")]
    Table,
    TeacherId,
    SubjectId,
    CreatedAt,
}

#[derive(DeriveIden)]
pub(crate) enum Students {
    #[sea_orm(iden = "students")]
    Table,
    Id,
    Matricule,
    FirstName,
    LastName,
    Email,
    Phone,
    Address,
    Gender,
    BirthDate,
    BirthPlace,
    Nationality,
    Photo,
    AdmissionDate,
    CurrentClass,
    AcademicYearId,
    EducationLevel,
    PreviousSchool,
    GuardianName,
    GuardianRelationship,
    GuardianPhone,
    GuardianEmail,
    GuardianAddress,
    GuardianOccupation,
    HealthIssues,
    BloodGroup,
    EmergencyContact,
    Status,
    AdditionalInfo,
}

#[derive(DeriveIden)]
enum Courses {
    #[sea_orm(iden = "courses")]
    Table,
    Id,
    Code,
    Name,
    SubjectId,
    DepartmentId,
    AcademicYearId,
    Description,
    Credits,
    HoursPerWeek,
    CourseType,
    EducationLevel,
    Semester,
    MaxStudents,
    Prerequisites,
    Syllabus,
    Objectives,
    AssessmentMethod,
    Status,
}

#[derive(DeriveIden)]
enum CourseTeachers {
    #[sea_orm(iden = "course_teachers")]
    Table,
    CourseId,
    TeacherId,
    CreatedAt,
}

#[derive(DeriveIden)]
enum CourseEnrollments {
    #[sea_orm(iden = "course_enrollments")]
    Table,
    Id,
    StudentId,
    CourseId,
    AcademicYearId,
    Semester,
    Status,
}

#[derive(DeriveIden)]
enum Grades {
    #[sea_orm(iden = "grades")]
    Table,
    Id,
    StudentId,
    CourseId,
    CourseEnrollmentId,
    AcademicYearId,
    GradeValue,
    GradeType,
    EvaluationDate,
    RecordedBy,
}

#[derive(DeriveIden)]
enum Schedules {
    #[sea_orm(iden = "schedules")]
    Table,
    Id,
    CourseId,
    TeacherId,
    AcademicYearId,
    DayOfWeek,
    StartTime,
    EndTime,
    Room,
}
