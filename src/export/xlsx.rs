// src/export/xlsx.rs

use crate::errors::AppResult;
use crate::export::model::{
    CellValue, DaySummary, EXPORT_HEADERS, HOURS_COLUMN, JobDescriptions, JobExport,
    TRADE_CLASS_COLUMN, line_to_row,
};
use crate::export::naming::{DESCRIPTIONS_SHEET, TIME_ENTRIES_SHEET};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, FormatPattern, Workbook, Worksheet};
use unicode_width::UnicodeWidthStr;

const NOTE_TEXT: &str = "** Note: Please do not exceed 2000 rows of data.";

/// Template rows: note on the first row, headers on the third.
const NOTE_ROW: u32 = 0;
const HEADER_ROW: u32 = 2;
const FIRST_DATA_ROW: u32 = 3;

const HEADER_BLUE: u32 = 0x4F81BD;
const HEADER_GREEN: u32 = 0x00B050;
const HEADER_ORANGE: u32 = 0xFFC000;
const NOTE_YELLOW: u32 = 0xFFF200;
const BAND_GREY: u32 = 0xF2F2F2;
const BAND_WHITE: u32 = 0xFFFFFF;

/// Per-job payroll import document, returned as `.xlsx` bytes.
pub fn render_job_document(job: &JobExport) -> AppResult<Vec<u8>> {
    let rows: Vec<Vec<CellValue>> = job.lines.iter().map(line_to_row).collect();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TIME_ENTRIES_SHEET)?;

    write_time_entries(worksheet, &EXPORT_HEADERS, &rows, 0)?;

    Ok(workbook.save_to_buffer()?)
}

/// Whole-day document: the import layout prefixed with the job number.
pub fn render_day_summary(summary: &DaySummary) -> AppResult<Vec<u8>> {
    let mut headers = Vec::with_capacity(EXPORT_HEADERS.len() + 1);
    headers.push("Job Number");
    headers.extend_from_slice(&EXPORT_HEADERS);

    let rows: Vec<Vec<CellValue>> = summary
        .lines
        .iter()
        .map(|(job, line)| {
            let mut row = Vec::with_capacity(headers.len());
            row.push(CellValue::Text(job.clone()));
            row.extend(line_to_row(line));
            row
        })
        .collect();

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(TIME_ENTRIES_SHEET)?;

    write_time_entries(worksheet, &headers, &rows, 1)?;

    Ok(workbook.save_to_buffer()?)
}

/// Single-column list of the day's work descriptions for one job.
pub fn render_descriptions(doc: &JobDescriptions) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(DESCRIPTIONS_SHEET)?;

    let header = Format::new().set_bold();
    let wrap = Format::new().set_text_wrap();

    worksheet.set_column_width(0, 100)?;
    worksheet.write_string_with_format(0, 0, "Description of work", &header)?;

    for (i, text) in doc.descriptions.iter().enumerate() {
        worksheet.write_string_with_format(i as u32 + 1, 0, text, &wrap)?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Note, styled header row with autofilter and frozen panes, banded data.
/// `offset` is the number of extra leading columns before the import layout.
fn write_time_entries(
    worksheet: &mut Worksheet,
    headers: &[&str],
    rows: &[Vec<CellValue>],
    offset: usize,
) -> AppResult<()> {
    // ---------------------------
    // Note
    // ---------------------------
    let note_format = Format::new()
        .set_background_color(Color::RGB(NOTE_YELLOW))
        .set_pattern(FormatPattern::Solid);
    worksheet.write_string_with_format(NOTE_ROW, 1, NOTE_TEXT, &note_format)?;

    // ---------------------------
    // Header
    // ---------------------------
    for (col, header) in headers.iter().enumerate() {
        let color = match col.checked_sub(offset) {
            Some(TRADE_CLASS_COLUMN) => HEADER_GREEN,
            Some(HOURS_COLUMN) => HEADER_ORANGE,
            _ => HEADER_BLUE,
        };
        worksheet.write_string_with_format(HEADER_ROW, col as u16, *header, &header_format(color))?;
    }

    let last_col = (headers.len() - 1) as u16;
    worksheet.autofilter(HEADER_ROW, 0, HEADER_ROW, last_col)?;
    worksheet.set_freeze_panes(FIRST_DATA_ROW, 0)?;

    // ---------------------------
    // Rows
    // ---------------------------
    let mut col_widths: Vec<usize> = headers.iter().map(|h| UnicodeWidthStr::width(*h)).collect();

    for (row_index, values) in rows.iter().enumerate() {
        let row = FIRST_DATA_ROW + row_index as u32;
        let band = if row_index % 2 == 0 { BAND_WHITE } else { BAND_GREY };

        for (col, value) in values.iter().enumerate() {
            write_cell(worksheet, row, col as u16, value, band)?;
            col_widths[col] = col_widths[col].max(value.display_width());
        }
    }

    for (c, w) in col_widths.iter().enumerate() {
        worksheet.set_column_width(c as u16, *w as f64 + 2.0)?;
    }

    Ok(())
}

fn header_format(bg: u32) -> Format {
    Format::new()
        .set_bold()
        .set_font_color(Color::RGB(0xFFFFFF))
        .set_background_color(Color::RGB(bg))
        .set_pattern(FormatPattern::Solid)
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
}

/// Hours are written as numbers with two decimals, everything else as text.
fn write_cell(
    worksheet: &mut Worksheet,
    row: u32,
    col: u16,
    value: &CellValue,
    bg: u32,
) -> AppResult<()> {
    let base = Format::new()
        .set_background_color(Color::RGB(bg))
        .set_pattern(FormatPattern::Solid);

    match value {
        CellValue::Number(n) => {
            let fmt = base.set_num_format("0.00").set_align(FormatAlign::Right);
            worksheet.write_number_with_format(row, col, *n, &fmt)?;
        }
        CellValue::Text(s) => {
            worksheet.write_string_with_format(row, col, s, &base)?;
        }
    }
    Ok(())
}
