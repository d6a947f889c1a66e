//! Pure layout decisions for the 職務経歴書 grid: certification
//! packing, phase columns, calendar durations, date splitting. Nothing
//! here touches a worksheet, so the geometry is testable without
//! reading a workbook back.

use chrono::{Datelike, NaiveDate};

use crate::schema::ProcessPhase;

// ── Certifications ───────────────────────────────────────────────────

/// Column span of one certification slot: the name merge and the
/// 年/月 cells aligned under the header bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CertSlot {
    pub name_first_col: u16,
    pub name_last_col: u16,
    pub year_col: u16,
    pub month_col: u16,
}

pub const CERT_SLOTS: [CertSlot; 3] = [
    CertSlot {
        name_first_col: 0,
        name_last_col: 3,
        year_col: 4,
        month_col: 5,
    },
    CertSlot {
        name_first_col: 6,
        name_last_col: 7,
        year_col: 8,
        month_col: 9,
    },
    CertSlot {
        name_first_col: 10,
        name_last_col: 11,
        year_col: 12,
        month_col: 13,
    },
];

/// Grid position of certification `index`: three per row, packed left
/// to right, top to bottom. Returns `(row, slot)`.
pub fn certification_grid_position(index: usize) -> (usize, usize) {
    (index / 3, index % 3)
}

// ── Process phases ───────────────────────────────────────────────────

/// First worksheet column of the six-column phase grid.
pub const PHASE_FIRST_COL: u16 = 13;

/// The phase grid's fixed column order with the vertical header label
/// for each column.
pub const PHASE_COLUMNS: [(ProcessPhase, &str); 6] = [
    (ProcessPhase::RequirementsDefinition, "要\n件\n定\n義"),
    (ProcessPhase::BasicDesign, "基\n本\n設\n計"),
    (ProcessPhase::DetailedDesign, "詳\n細\n設\n計"),
    (ProcessPhase::Implementation, "製\n造"),
    (ProcessPhase::Testing, "テ\nス\nト"),
    (ProcessPhase::Maintenance, "保\n守\n運\n用"),
];

/// `○`/`-` marks for the six phase columns. Membership is by enum
/// identity, so 製造・実装 marks the 製造 column and 保守・運用 the
/// 保守運用 column regardless of how the labels are spelled.
pub fn phase_marks(phases: &[ProcessPhase]) -> [&'static str; 6] {
    let mut marks = ["-"; 6];
    for (slot, (phase, _)) in PHASE_COLUMNS.into_iter().enumerate() {
        if phases.contains(&phase) {
            marks[slot] = "○";
        }
    }
    marks
}

// ── Period arithmetic ────────────────────────────────────────────────

/// Calendar difference between two period endpoints as `X年Yヶ月`,
/// computed by year/month subtraction with a month borrow. `現在` as
/// the end means `now`. Either endpoint failing to parse renders the
/// literal 期間不明.
pub fn elapsed_duration(start: &str, end: &str, now: NaiveDate) -> String {
    let start_date = parse_period_date(start);
    let end_date = if end == "現在" {
        Some(now)
    } else {
        parse_period_date(end)
    };
    match (start_date, end_date) {
        (Some(start), Some(end)) => {
            let mut years = end.year() - start.year();
            let mut months = end.month() as i32 - start.month() as i32;
            if months < 0 {
                years -= 1;
                months += 12;
            }
            format!("{years}年{months}ヶ月")
        }
        _ => "期間不明".to_string(),
    }
}

/// Period endpoints as résumés write them: `YYYY/MM/DD`, `YYYY/MM`
/// (day = 1) or `YYYY-MM-DD`.
pub fn parse_period_date(value: &str) -> Option<NaiveDate> {
    let trimmed = value.trim();
    let parts: Vec<&str> = trimmed.split('/').collect();
    match parts.len() {
        2 => {
            let year: i32 = parts[0].parse().ok()?;
            let month: u32 = parts[1].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, 1)
        }
        3 => {
            let year: i32 = parts[0].parse().ok()?;
            let month: u32 = parts[1].parse().ok()?;
            let day: u32 = parts[2].parse().ok()?;
            NaiveDate::from_ymd_opt(year, month, day)
        }
        _ => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").ok(),
    }
}

// ── Availability date ────────────────────────────────────────────────

/// Year/month/day sub-cells for the availability date. `None` unless
/// the value splits on `-` into at least three parts; the caller keeps
/// the 年/月/日 header labels in that case.
pub fn split_available_from(value: &str) -> Option<[&str; 3]> {
    let parts: Vec<&str> = value.split('-').collect();
    if parts.len() >= 3 {
        Some([parts[0], parts[1], parts[2]])
    } else {
        None
    }
}
