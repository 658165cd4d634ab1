//! 报表 XLSX 文件生成

use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use super::aggregate::{
    AcademicSummary, AmountGroup, FinancialSummary, StatisticsSummary, academic_summary,
    financial_summary, statistics_summary,
};
use crate::models::reports::{dataset::ReportDataset, entities::ReportType};

/// 按报表类型汇总数据并生成工作簿
pub fn build_report_workbook(
    title: &str,
    report_type: ReportType,
    dataset: &ReportDataset,
) -> Result<Vec<u8>, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();
    let title_format = Format::new().set_bold().set_font_size(14);

    let period = match &dataset.semester {
        Some(semester) => format!("{} / {}", dataset.academic_year, semester),
        None => dataset.academic_year.clone(),
    };

    {
        let sheet = workbook.add_worksheet().set_name("Résumé")?;
        sheet.write_string_with_format(0, 0, title, &title_format)?;
        sheet.write_string(2, 0, "Type")?;
        sheet.write_string(2, 1, report_type.to_string())?;
        sheet.write_string(3, 0, "Période")?;
        sheet.write_string(3, 1, &period)?;
        sheet.write_string(4, 0, "Généré le")?;
        sheet.write_string(4, 1, chrono::Utc::now().format("%Y-%m-%d %H:%M").to_string())?;
        sheet.set_column_width(0, 20)?;
        sheet.set_column_width(1, 30)?;
    }

    match report_type {
        ReportType::Academic => write_academic(&mut workbook, &header, &academic_summary(dataset))?,
        ReportType::Financial => {
            write_financial(&mut workbook, &header, &financial_summary(dataset))?
        }
        ReportType::Statistics => {
            write_statistics(&mut workbook, &header, &statistics_summary(dataset))?
        }
    }

    workbook.save_to_buffer()
}

fn write_header(sheet: &mut Worksheet, header: &Format, columns: &[&str]) -> Result<(), XlsxError> {
    for (col, name) in columns.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *name, header)?;
        sheet.set_column_width(col as u16, 18)?;
    }
    Ok(())
}

// 空值写成 "-"
fn write_optional(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: Option<f64>,
) -> Result<(), XlsxError> {
    match value {
        Some(value) => sheet.write_number(row, col, value)?,
        None => sheet.write_string(row, col, "-")?,
    };
    Ok(())
}

fn write_academic(
    workbook: &mut Workbook,
    header: &Format,
    summary: &AcademicSummary,
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet().set_name("Cours")?;
    write_header(
        sheet,
        header,
        &["Cours", "Code", "Inscrits", "Notés", "Moyenne", "Min", "Max"],
    )?;
    for (i, course) in summary.courses.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &course.name)?;
        sheet.write_string(row, 1, &course.code)?;
        sheet.write_number(row, 2, course.enrolled as f64)?;
        sheet.write_number(row, 3, course.graded_students as f64)?;
        write_optional(sheet, row, 4, course.average)?;
        write_optional(sheet, row, 5, course.min)?;
        write_optional(sheet, row, 6, course.max)?;
    }

    let sheet = workbook.add_worksheet().set_name("Étudiants")?;
    write_header(sheet, header, &["Matricule", "Nom", "Notes", "Moyenne"])?;
    for (i, student) in summary.students.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &student.matricule)?;
        sheet.write_string(row, 1, &student.name)?;
        sheet.write_number(row, 2, student.grade_count as f64)?;
        write_optional(sheet, row, 3, student.average)?;
    }
    Ok(())
}

fn write_amount_groups(
    workbook: &mut Workbook,
    header: &Format,
    name: &str,
    label: &str,
    groups: &[AmountGroup],
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet().set_name(name)?;
    write_header(sheet, header, &[label, "Nombre", "Total"])?;
    for (i, group) in groups.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &group.label)?;
        sheet.write_number(row, 1, group.count as f64)?;
        sheet.write_number(row, 2, group.total)?;
    }
    Ok(())
}

fn write_financial(
    workbook: &mut Workbook,
    header: &Format,
    summary: &FinancialSummary,
) -> Result<(), XlsxError> {
    write_amount_groups(workbook, header, "Par statut", "Statut", &summary.by_status)?;
    write_amount_groups(
        workbook,
        header,
        "Par mode",
        "Mode de paiement",
        &summary.by_payment_type,
    )?;

    let sheet = workbook.add_worksheet().set_name("Soldes")?;
    write_header(sheet, header, &["Matricule", "Nom", "Payé", "En attente"])?;
    for (i, balance) in summary.students.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, &balance.matricule)?;
        sheet.write_string(row, 1, &balance.name)?;
        sheet.write_number(row, 2, balance.paid)?;
        sheet.write_number(row, 3, balance.pending)?;
    }
    Ok(())
}

fn write_counts(
    workbook: &mut Workbook,
    header: &Format,
    name: &str,
    label: &str,
    counts: &[(String, i64)],
) -> Result<(), XlsxError> {
    let sheet = workbook.add_worksheet().set_name(name)?;
    write_header(sheet, header, &[label, "Nombre"])?;
    for (i, (value, count)) in counts.iter().enumerate() {
        let row = i as u32 + 1;
        sheet.write_string(row, 0, value)?;
        sheet.write_number(row, 1, *count as f64)?;
    }
    Ok(())
}

fn write_statistics(
    workbook: &mut Workbook,
    header: &Format,
    summary: &StatisticsSummary,
) -> Result<(), XlsxError> {
    write_counts(
        workbook,
        header,
        "Statuts",
        "Statut",
        &summary.students_by_status,
    )?;
    write_counts(workbook, header, "Genres", "Genre", &summary.students_by_gender)?;
    write_counts(
        workbook,
        header,
        "Niveaux",
        "Niveau",
        &summary.students_by_education_level,
    )?;
    write_counts(
        workbook,
        header,
        "Départements",
        "Département",
        &summary.teachers_by_department,
    )?;

    let sheet = workbook.add_worksheet().set_name("Cours")?;
    sheet.write_string_with_format(0, 0, "Nombre de cours", header)?;
    sheet.write_number(0, 1, summary.course_count as f64)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_workbook_for_each_type() {
        let dataset = ReportDataset {
            academic_year: "2024-2025".into(),
            semester: Some("S1".into()),
            ..Default::default()
        };
        for report_type in [
            ReportType::Academic,
            ReportType::Financial,
            ReportType::Statistics,
        ] {
            let buffer = build_report_workbook("Bilan", report_type, &dataset).unwrap();
            // XLSX 是 zip 容器
            assert!(buffer.starts_with(b"PK"));
        }
    }
}
