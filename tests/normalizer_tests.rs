use std::io::{Cursor, Write};
use std::path::Path;

use keireki::core::errors::AppError;
use keireki::normalize::{
    self, convert_doc_to_pdf, drop_empty_rows_and_columns, forward_fill, markdown_table,
};
use rust_xlsxwriter::Workbook;
use tempfile::TempDir;
use zip::write::FileOptions;

fn cells(rows: &[&[&str]]) -> Vec<Vec<String>> {
    rows.iter()
        .map(|row| row.iter().map(|cell| cell.to_string()).collect())
        .collect()
}

fn build_minimal_pdf(text: &str) -> Vec<u8> {
    let stream = format!("BT /F1 24 Tf 72 720 Td ({text}) Tj ET");
    let objects = [
        "<< /Type /Catalog /Pages 2 0 R >>".to_string(),
        "<< /Type /Pages /Kids [3 0 R] /Count 1 >>".to_string(),
        "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] /Contents 4 0 R /Resources << /Font << /F1 5 0 R >> >> >>"
            .to_string(),
        format!(
            "<< /Length {} >>\nstream\n{}\nendstream",
            stream.len(),
            stream
        ),
        "<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica >>".to_string(),
    ];

    let mut pdf = String::from("%PDF-1.4\n");
    let mut offsets = Vec::new();
    for (index, body) in objects.iter().enumerate() {
        offsets.push(pdf.len());
        pdf.push_str(&format!("{} 0 obj\n{}\nendobj\n", index + 1, body));
    }
    let xref_pos = pdf.len();
    pdf.push_str(&format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1));
    for offset in &offsets {
        pdf.push_str(&format!("{offset:010} 00000 n \n"));
    }
    pdf.push_str(&format!(
        "trailer\n<< /Size {} /Root 1 0 R >>\nstartxref\n{}\n%%EOF",
        objects.len() + 1,
        xref_pos
    ));
    pdf.into_bytes()
}

fn build_fallback_docx_bytes() -> Vec<u8> {
    let cursor = Cursor::new(Vec::<u8>::new());
    let mut zip = zip::ZipWriter::new(cursor);
    let options: FileOptions<'_, ()> = FileOptions::default();

    // document.xml alone, without the package parts docx-rs expects,
    // so the XML fallback has to take over.
    zip.start_file("word/document.xml", options)
        .expect("start file");
    zip.write_all(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<w:document xmlns:w="http://schemas.openxmlformats.org/wordprocessingml/2006/main">
  <w:body>
    <w:p>
      <w:r><w:t>職務経歴書</w:t></w:r>
    </w:p>
    <w:p>
      <w:r><w:t>10年のJava開発経験があります。</w:t></w:r>
    </w:p>
  </w:body>
</w:document>"#
            .as_bytes(),
    )
    .expect("write xml");

    zip.finish().expect("finish zip").into_inner()
}

#[test]
fn unsupported_extension_is_rejected() {
    let dir = TempDir::new().expect("temp dir");
    let err = normalize::normalize(Path::new("resume.txt"), dir.path())
        .expect_err("txt should be rejected");
    match err {
        AppError::UnsupportedFormat(ext) => assert_eq!(ext, ".txt"),
        other => panic!("expected UnsupportedFormat, got {other:?}"),
    }

    let err = normalize::normalize(Path::new("resume"), dir.path())
        .expect_err("extensionless should be rejected");
    assert!(matches!(err, AppError::UnsupportedFormat(_)));
}

#[test]
fn pdf_text_is_extracted_and_extension_match_is_case_insensitive() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("sample.PDF");
    std::fs::write(&path, build_minimal_pdf("Keireki")).expect("write pdf");

    let text = normalize::normalize(&path, dir.path()).expect("pdf should normalize");
    assert!(
        text.contains("Keireki"),
        "expected extracted text, got: {text:?}"
    );
}

#[test]
fn pdf_without_text_is_invalid_input() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("blank.pdf");
    std::fs::write(&path, build_minimal_pdf("")).expect("write pdf");

    let err = normalize::normalize(&path, dir.path()).expect_err("blank pdf should fail");
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[test]
fn docx_fallback_extracts_paragraphs() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("resume.docx");
    std::fs::write(&path, build_fallback_docx_bytes()).expect("write docx");

    let text = normalize::normalize(&path, dir.path()).expect("docx should normalize");
    assert!(text.contains("職務経歴書"));
    assert!(text.contains("10年のJava開発経験があります。"));
}

#[test]
fn xlsx_single_sheet_becomes_markdown_table_with_cleanup() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("resume.xlsx");

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    // Row 1 and column C left entirely blank; the A4 cell blank so the
    // forward fill has something to inherit.
    sheet.write_string(0, 0, "項目").expect("write");
    sheet.write_string(0, 1, "内容").expect("write");
    sheet.write_string(0, 3, "資格").expect("write");
    sheet.write_string(2, 0, "氏名").expect("write");
    sheet.write_string(2, 1, "山田 太郎").expect("write");
    sheet.write_string(2, 3, "基本情報技術者").expect("write");
    sheet.write_string(3, 1, "東京 在住").expect("write");
    workbook.save(&path).expect("save xlsx");

    let text = normalize::normalize(&path, dir.path()).expect("xlsx should normalize");

    assert!(
        !text.starts_with("## "),
        "single sheet should have no heading: {text:?}"
    );
    assert!(text.contains("| 項目 | 内容 | 資格 |"));
    assert!(text.contains("| --- | --- | --- |"));
    assert!(text.contains("| 氏名 | 山田 太郎 | 基本情報技術者 |"));
    // Blank cells inherited from above, empty row and column gone.
    assert!(text.contains("| 氏名 | 東京 在住 | 基本情報技術者 |"));
}

#[test]
fn xlsx_multiple_sheets_get_headings() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("resume.xlsx");

    let mut workbook = Workbook::new();
    let first = workbook.add_worksheet();
    first.set_name("職歴").expect("name");
    first.write_string(0, 0, "会社").expect("write");
    first.write_string(1, 0, "ABC株式会社").expect("write");
    let second = workbook.add_worksheet();
    second.set_name("スキル").expect("name");
    second.write_string(0, 0, "言語").expect("write");
    second.write_string(1, 0, "Java").expect("write");
    workbook.save(&path).expect("save xlsx");

    let text = normalize::normalize(&path, dir.path()).expect("xlsx should normalize");
    assert!(text.contains("## 職歴"));
    assert!(text.contains("## スキル"));
    assert!(
        text.find("## 職歴").expect("first heading") < text.find("## スキル").expect("second"),
        "sheets should appear in workbook order"
    );
    assert!(text.contains("| ABC株式会社 |"));
    assert!(text.contains("| Java |"));
}

#[test]
fn xlsx_with_no_cells_is_invalid_input() {
    let dir = TempDir::new().expect("temp dir");
    let path = dir.path().join("empty.xlsx");

    let mut workbook = Workbook::new();
    workbook.add_worksheet();
    workbook.save(&path).expect("save xlsx");

    let err = normalize::normalize(&path, dir.path()).expect_err("empty workbook should fail");
    assert!(matches!(err, AppError::InvalidInput(_)));
}

#[test]
fn doc_conversion_reuses_cached_pdf() {
    let dir = TempDir::new().expect("temp dir");
    let cache = dir.path().join("output_pdfs");
    std::fs::create_dir_all(&cache).expect("create cache");

    // Seed the cache under the name the converter would produce; the
    // subprocess must not be needed at all.
    std::fs::write(cache.join("legacy.pdf"), build_minimal_pdf("Keireki")).expect("seed cache");
    let doc_path = dir.path().join("legacy.doc");
    std::fs::write(&doc_path, b"stale binary body").expect("write doc");

    let pdf_path = convert_doc_to_pdf(&doc_path, &cache).expect("cache hit");
    assert_eq!(pdf_path, cache.join("legacy.pdf"));

    let text = normalize::normalize(&doc_path, &cache).expect("doc route via cache");
    assert!(text.contains("Keireki"));
}

#[test]
fn doc_conversion_requires_existing_input() {
    let dir = TempDir::new().expect("temp dir");
    let err = convert_doc_to_pdf(&dir.path().join("missing.doc"), dir.path())
        .expect_err("missing input should fail");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test]
fn empty_rows_and_columns_are_dropped() {
    let grid = cells(&[
        &["a", "", "b"],
        &["", "", ""],
        &["c", "", "d"],
    ]);
    let cleaned = drop_empty_rows_and_columns(grid);
    assert_eq!(cleaned, cells(&[&["a", "b"], &["c", "d"]]));
}

#[test]
fn forward_fill_inherits_nearest_value_above() {
    let grid = cells(&[
        &["部署", ""],
        &["", "担当"],
        &["", ""],
    ]);
    let filled = forward_fill(grid);
    assert_eq!(
        filled,
        cells(&[&["部署", ""], &["部署", "担当"], &["部署", "担当"]])
    );
}

#[test]
fn markdown_table_uses_first_row_as_header_and_pads_ragged_rows() {
    let grid = cells(&[&["名前", "評価"], &["Java"]]);
    let table = markdown_table(&grid).expect("table");
    assert_eq!(table, "| 名前 | 評価 |\n| --- | --- |\n| Java |  |");

    assert!(markdown_table(&[]).is_none());
}

#[test]
fn markdown_table_escapes_cell_pipes_and_newlines() {
    let grid = cells(&[&["値"], &["a|b\nc"]]);
    let table = markdown_table(&grid).expect("table");
    assert!(table.contains("a\\|b c"));
}
