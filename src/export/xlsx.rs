//! 職務経歴書 workbook writer.
//!
//! Lays one record out on the fixed 15-column grid, top to bottom. For
//! a given record and now-date the layout is deterministic. Absent
//! sections are skipped entirely; absent fields inside a present
//! section render as empty bordered cells and never shift the grid.

use std::path::Path;

use chrono::{NaiveDate, Utc};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};

use crate::{
    core::errors::AppResult,
    export::layout::{
        certification_grid_position, elapsed_duration, phase_marks, split_available_from,
        CERT_SLOTS, PHASE_COLUMNS, PHASE_FIRST_COL,
    },
    schema::{ResumeRecord, SkillEvaluation, WorkHistoryEntry},
};

const SHEET_NAME: &str = "Resume";
const COLUMN_WIDTHS: [f64; 13] = [
    8.0, 20.0, 20.0, 12.0, 12.0, 30.0, 30.0, 20.0, 15.0, 20.0, 10.0, 10.0, 20.0,
];
const BAND_COLOR: Color = Color::RGB(0xB8CCE4);

pub fn export_to_file(record: &ResumeRecord, path: &Path) -> AppResult<()> {
    let mut workbook = write_workbook(record, Utc::now().date_naive())?;
    workbook.save(path)?;
    Ok(())
}

/// Workbook bytes, MIME
/// `application/vnd.openxmlformats-officedocument.spreadsheetml.sheet`.
pub fn export_to_buffer(record: &ResumeRecord) -> AppResult<Vec<u8>> {
    let mut workbook = write_workbook(record, Utc::now().date_naive())?;
    Ok(workbook.save_to_buffer()?)
}

struct Formats {
    title: Format,
    header: Format,
    subheader: Format,
    field_header: Format,
    data: Format,
    data_center: Format,
    number: Format,
}

impl Formats {
    fn new() -> Self {
        Self {
            title: Format::new()
                .set_bold()
                .set_font_size(18)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            header: Format::new()
                .set_bold()
                .set_background_color(BAND_COLOR)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            subheader: Format::new()
                .set_background_color(BAND_COLOR)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter),
            field_header: Format::new()
                .set_background_color(BAND_COLOR)
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            data: Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Left)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            data_center: Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_text_wrap(),
            number: Format::new()
                .set_border(FormatBorder::Thin)
                .set_align(FormatAlign::Center)
                .set_align(FormatAlign::VerticalCenter)
                .set_num_format("0"),
        }
    }
}

fn write_workbook(record: &ResumeRecord, now: NaiveDate) -> AppResult<Workbook> {
    let mut workbook = Workbook::new();
    let formats = Formats::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;
    for (col, width) in COLUMN_WIDTHS.iter().enumerate() {
        worksheet.set_column_width(col as u16, *width)?;
    }

    let mut row: u32 = 0;

    // ── Title ────────────────────────────────────────────────────────
    worksheet.merge_range(0, 0, 0, 11, "職務経歴書", &formats.title)?;
    if let Some(created_on) = record
        .personal
        .as_ref()
        .and_then(|personal| personal.created_on.as_deref())
        .filter(|value| !value.is_empty())
    {
        worksheet.write_string_with_format(0, 13, "作成日：", &formats.field_header)?;
        worksheet.write_string_with_format(0, 14, created_on, &formats.data)?;
    }
    row += 1;

    // ── Personal info ────────────────────────────────────────────────
    if let Some(personal) = &record.personal {
        worksheet.write_string_with_format(row, 0, "氏名", &formats.field_header)?;
        worksheet.merge_range(
            row,
            1,
            row,
            3,
            personal.name.as_deref().unwrap_or(""),
            &formats.data,
        )?;
        worksheet.write_string_with_format(row, 4, "年齢", &formats.field_header)?;
        match personal.age {
            Some(age) => {
                worksheet.write_number_with_format(row, 5, f64::from(age), &formats.data)?;
            }
            None => {
                worksheet.write_string_with_format(row, 5, "", &formats.data)?;
            }
        }
        worksheet.write_string_with_format(row, 6, "歳", &formats.data)?;
        worksheet.write_string_with_format(row, 7, "性別", &formats.field_header)?;
        worksheet.write_string_with_format(
            row,
            8,
            personal.gender.map(|value| value.as_str()).unwrap_or(""),
            &formats.data,
        )?;
        row += 1;

        worksheet.write_string_with_format(row, 0, "国籍", &formats.field_header)?;
        worksheet.merge_range(
            row,
            1,
            row,
            3,
            personal.nationality.as_deref().unwrap_or(""),
            &formats.data,
        )?;
        worksheet.write_string_with_format(row, 4, "最寄駅", &formats.field_header)?;
        worksheet.merge_range(
            row,
            5,
            row,
            6,
            personal.nearest_station.as_deref().unwrap_or(""),
            &formats.data,
        )?;
        worksheet.write_string_with_format(row, 7, "駅", &formats.data)?;
        worksheet.write_string_with_format(row, 8, "最終学歴", &formats.field_header)?;
        worksheet.merge_range(
            row,
            9,
            row,
            14,
            personal.education.map(|value| value.as_str()).unwrap_or(""),
            &formats.data,
        )?;
        row += 2;
    }

    // ── Desired conditions ───────────────────────────────────────────
    if let Some(desired) = &record.desired {
        worksheet.merge_range(row, 0, row, 1, "参画可能時期", &formats.subheader)?;
        match desired
            .available_from
            .as_deref()
            .and_then(split_available_from)
        {
            Some(parts) => {
                for (offset, part) in parts.into_iter().enumerate() {
                    worksheet.write_string_with_format(
                        row,
                        2 + offset as u16,
                        part,
                        &formats.data_center,
                    )?;
                }
            }
            None => {
                for (offset, label) in ["年", "月", "日"].into_iter().enumerate() {
                    worksheet.write_string_with_format(
                        row,
                        2 + offset as u16,
                        label,
                        &formats.subheader,
                    )?;
                }
            }
        }
        worksheet.write_string_with_format(row, 5, "希望地域", &formats.subheader)?;
        worksheet.write_string_with_format(
            row,
            6,
            desired.region.map(|value| value.as_str()).unwrap_or("-"),
            &formats.data_center,
        )?;
        worksheet.write_string_with_format(row, 7, "休日作業可否", &formats.subheader)?;
        worksheet.write_string_with_format(
            row,
            8,
            desired
                .holiday_work
                .map(|value| value.as_str())
                .unwrap_or("-"),
            &formats.data_center,
        )?;
        worksheet.write_string_with_format(row, 9, "稼働範囲", &formats.subheader)?;
        worksheet.write_string_with_format(
            row,
            10,
            desired
                .monthly_hours
                .map(|value| value.as_str())
                .unwrap_or("-"),
            &formats.data_center,
        )?;
        worksheet.write_string_with_format(row, 11, "出張可否", &formats.subheader)?;
        worksheet.write_string_with_format(
            row,
            12,
            desired.travel.map(|value| value.as_str()).unwrap_or("-"),
            &formats.data_center,
        )?;
        row += 2;
    }

    // ── Certifications ───────────────────────────────────────────────
    if let Some(certifications) = &record.certifications {
        worksheet.write_string_with_format(row, 0, "資格", &formats.subheader)?;
        worksheet.merge_range(row, 1, row, 3, "", &formats.subheader)?;
        worksheet.write_string_with_format(row, 4, "年", &formats.subheader)?;
        worksheet.write_string_with_format(row, 5, "月", &formats.subheader)?;
        worksheet.merge_range(row, 6, row, 7, "", &formats.subheader)?;
        worksheet.write_string_with_format(row, 8, "年", &formats.subheader)?;
        worksheet.write_string_with_format(row, 9, "月", &formats.subheader)?;
        worksheet.merge_range(row, 10, row, 11, "", &formats.subheader)?;
        worksheet.write_string_with_format(row, 12, "年", &formats.subheader)?;
        worksheet.write_string_with_format(row, 13, "月", &formats.subheader)?;
        row += 1;

        let mut last_data_row = row;
        for (index, cert) in certifications.iter().enumerate() {
            let (grid_row, slot_index) = certification_grid_position(index);
            let data_row = row + grid_row as u32;
            let slot = CERT_SLOTS[slot_index];
            worksheet.merge_range(
                data_row,
                slot.name_first_col,
                data_row,
                slot.name_last_col,
                cert.name.as_deref().unwrap_or(""),
                &formats.data,
            )?;
            match cert.year {
                Some(year) => {
                    worksheet.write_number_with_format(
                        data_row,
                        slot.year_col,
                        f64::from(year),
                        &formats.number,
                    )?;
                }
                None => {
                    worksheet.write_string_with_format(
                        data_row,
                        slot.year_col,
                        "",
                        &formats.number,
                    )?;
                }
            }
            match cert.month {
                Some(month) => {
                    worksheet.write_number_with_format(
                        data_row,
                        slot.month_col,
                        f64::from(month),
                        &formats.number,
                    )?;
                }
                None => {
                    worksheet.write_string_with_format(
                        data_row,
                        slot.month_col,
                        "",
                        &formats.number,
                    )?;
                }
            }
            last_data_row = data_row;
        }
        row = last_data_row + 2;
    }

    // ── Skill summary ────────────────────────────────────────────────
    if let Some(summary) = &record.skill_summary {
        worksheet.merge_range(row, 0, row, 1, "スキル要約\n(自己PR)", &formats.subheader)?;
        worksheet.merge_range(
            row,
            2,
            row,
            14,
            summary.self_pr.as_deref().unwrap_or(""),
            &formats.data,
        )?;
        row += 2;
    }

    // ── Work history ─────────────────────────────────────────────────
    if let Some(work_history) = &record.work_history {
        worksheet.write_string_with_format(row, 0, "S.No", &formats.header)?;
        worksheet.merge_range(row, 1, row, 2, "期間", &formats.header)?;
        worksheet.merge_range(row, 3, row, 5, "プロジェクト名\n業務内容", &formats.header)?;
        worksheet.merge_range(row, 6, row, 7, "使用言語\nライブラリ", &formats.header)?;
        worksheet.merge_range(row, 8, row, 9, "サーバ/OS\nDB/サーバ", &formats.header)?;
        worksheet.merge_range(row, 10, row, 11, "FW・MW\nツールなど", &formats.header)?;
        worksheet.write_string_with_format(row, 12, "役割\n規模", &formats.header)?;
        for (offset, (_, label)) in PHASE_COLUMNS.into_iter().enumerate() {
            worksheet.write_string_with_format(
                row,
                PHASE_FIRST_COL + offset as u16,
                label,
                &formats.header,
            )?;
        }
        row += 1;

        for (index, entry) in work_history.iter().enumerate() {
            row = write_work_history_entry(worksheet, &formats, row, index, entry, now)?;
        }
        row += 1;
    }

    // ── Skill evaluation ─────────────────────────────────────────────
    if let Some(evaluation) = &record.skill_evaluation {
        worksheet.merge_range(row, 0, row, 10, "■スキル(評価レベル)", &formats.data)?;
        row += 1;
        write_skill_evaluation(worksheet, &formats, row, evaluation)?;
    }

    Ok(workbook)
}

/// One work-history band: company row, two merged detail rows, then
/// the duration row. Returns the next band's company row.
fn write_work_history_entry(
    worksheet: &mut Worksheet,
    formats: &Formats,
    company_row: u32,
    index: usize,
    entry: &WorkHistoryEntry,
    now: NaiveDate,
) -> AppResult<u32> {
    worksheet.write_number_with_format(company_row, 0, (index + 1) as f64, &formats.data_center)?;
    worksheet.write_string_with_format(
        company_row,
        1,
        entry.company.as_deref().unwrap_or(""),
        &formats.data,
    )?;

    let period_row = company_row + 1;
    let start = entry.period_start.as_deref().unwrap_or("");
    let end = entry
        .period_end
        .as_deref()
        .filter(|value| !value.is_empty())
        .unwrap_or("現在");
    worksheet.merge_range(
        period_row,
        1,
        period_row + 1,
        2,
        &format!("{start}\n~\n{end}"),
        &formats.data_center,
    )?;
    worksheet.merge_range(
        period_row,
        3,
        period_row + 1,
        5,
        &format!(
            "{}\n{}",
            entry.project_name.as_deref().unwrap_or(""),
            entry.duties.as_deref().unwrap_or("")
        ),
        &formats.data,
    )?;
    worksheet.merge_range(
        period_row,
        6,
        period_row + 1,
        7,
        &joined(&entry.languages),
        &formats.data,
    )?;
    worksheet.merge_range(
        period_row,
        8,
        period_row + 1,
        9,
        &joined(&entry.server_os),
        &formats.data,
    )?;
    worksheet.merge_range(
        period_row,
        10,
        period_row + 1,
        11,
        &joined(&entry.tools),
        &formats.data,
    )?;

    worksheet.write_string_with_format(period_row, 12, "役割", &formats.subheader)?;
    worksheet.write_string_with_format(
        period_row + 1,
        12,
        entry.role.map(|value| value.as_str()).unwrap_or(""),
        &formats.data_center,
    )?;

    if let Some(phases) = &entry.phases {
        for (offset, mark) in phase_marks(phases).into_iter().enumerate() {
            worksheet.write_string_with_format(
                period_row,
                PHASE_FIRST_COL + offset as u16,
                mark,
                &formats.data_center,
            )?;
        }
    }

    worksheet.write_string_with_format(
        period_row + 2,
        1,
        elapsed_duration(start, end, now),
        &formats.data_center,
    )?;

    worksheet.write_string_with_format(period_row + 2, 12, "規模", &formats.subheader)?;
    // The value cell sits on the next band's company row.
    worksheet.write_string_with_format(
        period_row + 3,
        12,
        entry.team_size.map(|value| value.as_str()).unwrap_or(""),
        &formats.data_center,
    )?;

    Ok(company_row + 4)
}

/// Category sub-tables, two columns each, packed left to right in
/// declaration order under the 職種 header row.
fn write_skill_evaluation(
    worksheet: &mut Worksheet,
    formats: &Formats,
    header_row: u32,
    evaluation: &SkillEvaluation,
) -> AppResult<()> {
    let categories = evaluation.populated_categories();

    worksheet.write_string_with_format(header_row, 0, "職種", &formats.field_header)?;
    let mut header_col: u16 = 1;
    for &(label, _) in &categories {
        worksheet.merge_range(
            header_row,
            header_col,
            header_row,
            header_col + 1,
            label,
            &formats.header,
        )?;
        header_col += 2;
    }

    let first_data_row = header_row + 1;
    let mut start_col: u16 = 1;
    for &(label, skills) in &categories {
        for (offset, (skill_name, detail)) in skills.iter().enumerate() {
            let data_row = first_data_row + offset as u32;
            if label == "業務範囲" {
                worksheet.write_string_with_format(data_row, 0, skill_name, &formats.data)?;
            }
            worksheet.write_string_with_format(data_row, start_col, skill_name, &formats.data)?;
            worksheet.write_string_with_format(
                data_row,
                start_col + 1,
                detail.grade.as_str(),
                &formats.data_center,
            )?;
        }
        start_col += 2;
    }

    Ok(())
}

fn joined(items: &Option<Vec<String>>) -> String {
    items
        .as_deref()
        .map(|values| values.join(", "))
        .unwrap_or_default()
}
