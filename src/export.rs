//! Excel export of the roster, the attendance grid and leave requests.

use chrono::Local;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

use crate::attendance::AttendanceLedger;
use crate::employees::EmployeeRepository;
use crate::leave::LeaveLedger;

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0x4472C4))
        .set_font_color(Color::White)
        .set_border(FormatBorder::Thin)
}

fn write_headers(worksheet: &mut Worksheet, headers: &[&str]) -> Result<(), XlsxError> {
    let format = header_format();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &format)?;
    }
    Ok(())
}

/// Autofilter over the data and a frozen header row.
fn finish_sheet(worksheet: &mut Worksheet, rows: usize, last_col: u16) -> Result<(), XlsxError> {
    if rows > 0 {
        worksheet.autofilter(0, 0, rows as u32, last_col)?;
    }
    worksheet.set_freeze_panes(1, 0)?;
    Ok(())
}

fn write_employees(worksheet: &mut Worksheet, employees: &EmployeeRepository) -> Result<(), XlsxError> {
    worksheet.set_name("Employees")?;
    write_headers(
        worksheet,
        &["Employee ID", "Name", "Position", "Department", "Employment Type", "Salary", "Contact"],
    )?;

    worksheet.set_column_width(0, 12)?;
    worksheet.set_column_width(1, 28)?;
    worksheet.set_column_width(2, 24)?;
    worksheet.set_column_width(3, 18)?;
    worksheet.set_column_width(4, 16)?;
    worksheet.set_column_width(5, 14)?;
    worksheet.set_column_width(6, 16)?;

    let salary_format = Format::new().set_num_format("#,##0.00");

    for (idx, emp) in employees.list().iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_number(row, 0, emp.employee_id)?;
        worksheet.write_string(row, 1, &emp.name)?;
        worksheet.write_string(row, 2, &emp.position)?;
        worksheet.write_string(row, 3, &emp.department)?;
        worksheet.write_string(row, 4, emp.employment_type.as_str())?;
        worksheet.write_number_with_format(row, 5, emp.salary, &salary_format)?;
        worksheet.write_string(row, 6, &emp.contact)?;
    }

    finish_sheet(worksheet, employees.len(), 6)
}

/// One row per employee, one column per date, then the status totals.
fn write_attendance(worksheet: &mut Worksheet, attendance: &AttendanceLedger) -> Result<(), XlsxError> {
    worksheet.set_name("Attendance")?;

    let dates = attendance.date_range();
    let mut headers: Vec<String> = vec!["Employee ID".into(), "Name".into(), "Department".into()];
    headers.extend(dates.iter().map(|d| d.to_string()));
    headers.extend(["Present", "Absent", "Late", "On Leave"].map(String::from));
    let header_refs: Vec<&str> = headers.iter().map(String::as_str).collect();
    write_headers(worksheet, &header_refs)?;

    worksheet.set_column_width(1, 28)?;
    worksheet.set_column_width(2, 16)?;

    for (idx, record) in attendance.records().iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_number(row, 0, record.id)?;
        worksheet.write_string(row, 1, &record.name)?;
        worksheet.write_string(row, 2, &record.department)?;

        let mut col = 3u16;
        for date in dates {
            worksheet.write_string(row, col, AttendanceLedger::status_label(record, *date))?;
            col += 1;
        }

        let summary = AttendanceLedger::summarize(record);
        for count in [summary.present, summary.absent, summary.late, summary.on_leave] {
            worksheet.write_number(row, col, count as u32)?;
            col += 1;
        }
    }

    finish_sheet(worksheet, attendance.records().len(), (headers.len() - 1) as u16)
}

fn write_leave(worksheet: &mut Worksheet, leave: &LeaveLedger) -> Result<(), XlsxError> {
    worksheet.set_name("Leave Requests")?;
    write_headers(worksheet, &["#", "Employee", "Start Date", "End Date", "Reason", "Status"])?;

    worksheet.set_column_width(1, 28)?;
    worksheet.set_column_width(2, 12)?;
    worksheet.set_column_width(3, 12)?;
    worksheet.set_column_width(4, 40)?;
    worksheet.set_column_width(5, 10)?;

    for (idx, request) in leave.requests().iter().enumerate() {
        let row = (idx + 1) as u32;
        worksheet.write_number(row, 0, idx as u32)?;
        worksheet.write_string(row, 1, &request.employee_name)?;
        worksheet.write_string(row, 2, request.start_date.to_string())?;
        worksheet.write_string(row, 3, request.end_date.to_string())?;
        worksheet.write_string(row, 4, &request.reason)?;
        worksheet.write_string(row, 5, request.status.as_str())?;
    }

    finish_sheet(worksheet, leave.len(), 5)
}

/// Write a three-sheet workbook to `path`.
pub fn export_workbook(
    employees: &EmployeeRepository,
    attendance: &AttendanceLedger,
    leave: &LeaveLedger,
    path: &Path,
) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    write_employees(workbook.add_worksheet(), employees)?;
    write_attendance(workbook.add_worksheet(), attendance)?;
    write_leave(workbook.add_worksheet(), leave)?;
    workbook.save(path)?;
    Ok(())
}

/// Generate default filename for export.
pub fn generate_export_filename(prefix: &str) -> String {
    let now = Local::now();
    format!("{prefix}_{ts}.xlsx", ts = now.format("%Y%m%d_%H%M%S"))
}
