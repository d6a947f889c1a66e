//! Document normalization.
//!
//! Turns one input file (pdf / doc / docx / xlsx, dispatched by
//! extension) into the markdown/plain-text form the extraction prompt
//! consumes. Tables survive as markdown tables; everything else is
//! paragraph text in document order. No network access here; the only
//! external touch is the headless converter used for legacy `.doc`
//! files, whose output is cached on disk.

use std::path::{Path, PathBuf};

use crate::core::errors::{AppError, AppResult};

/// Normalize the document at `path` into extraction input text.
/// `doc_cache_dir` holds converted PDFs for the `.doc` route.
pub fn normalize(path: &Path, doc_cache_dir: &Path) -> AppResult<String> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_ascii_lowercase();

    match ext.as_str() {
        "pdf" => normalize_pdf(path),
        "docx" => normalize_docx(path),
        "doc" => normalize_doc(path, doc_cache_dir),
        "xlsx" => normalize_xlsx(path),
        "" => Err(AppError::UnsupportedFormat("(no extension)".to_string())),
        other => Err(AppError::UnsupportedFormat(format!(".{other}"))),
    }
}

// ── PDF ──────────────────────────────────────────────────────────────

fn normalize_pdf(path: &Path) -> AppResult<String> {
    let bytes =
        std::fs::read(path).map_err(|e| AppError::Io(format!("cannot read PDF: {e}")))?;

    let text = pdf_extract::extract_text_from_mem(&bytes)
        .map_err(|e| AppError::ConversionFailed(format!("pdf text extraction failed: {e}")))?;

    if text.trim().is_empty() {
        return Err(AppError::InvalidInput(
            "PDF contains no extractable text (may be image-based or encrypted)".to_string(),
        ));
    }

    Ok(text)
}

// ── DOC (legacy binary) ──────────────────────────────────────────────

fn normalize_doc(path: &Path, cache_dir: &Path) -> AppResult<String> {
    let pdf_path = convert_doc_to_pdf(path, cache_dir)?;
    normalize_pdf(&pdf_path)
}

/// Convert a legacy `.doc` to PDF with headless LibreOffice. The
/// converted file is keyed by its output name and reused when already
/// present, so repeat runs skip the subprocess.
pub fn convert_doc_to_pdf(path: &Path, cache_dir: &Path) -> AppResult<PathBuf> {
    if !path.exists() {
        return Err(AppError::NotFound(format!(
            "input file not found: {}",
            path.display()
        )));
    }
    std::fs::create_dir_all(cache_dir)?;

    let stem = path
        .file_stem()
        .and_then(|s| s.to_str())
        .ok_or_else(|| AppError::InvalidInput(format!("unusable file name: {}", path.display())))?;
    let pdf_path = cache_dir.join(format!("{stem}.pdf"));

    if pdf_path.exists() {
        tracing::debug!(pdf = %pdf_path.display(), "reusing cached doc conversion");
        return Ok(pdf_path);
    }

    let output = std::process::Command::new("libreoffice")
        .args(["--headless", "--convert-to", "pdf"])
        .arg(path)
        .arg("--outdir")
        .arg(cache_dir)
        .output()
        .map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => AppError::DependencyMissing("libreoffice".to_string()),
            _ => AppError::Io(format!("failed to run libreoffice: {e}")),
        })?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        return Err(AppError::ConversionFailed(if stderr.is_empty() {
            format!("libreoffice exited with {}", output.status)
        } else {
            stderr
        }));
    }
    if !pdf_path.exists() {
        return Err(AppError::ConversionFailed(format!(
            "converter produced no output for {}",
            path.display()
        )));
    }

    Ok(pdf_path)
}

// ── DOCX ─────────────────────────────────────────────────────────────

fn normalize_docx(path: &Path) -> AppResult<String> {
    let bytes =
        std::fs::read(path).map_err(|e| AppError::Io(format!("cannot read DOCX: {e}")))?;

    match docx_to_markdown(&bytes) {
        Ok(text) => Ok(text),
        Err(primary_err) => match docx_xml_fallback(&bytes) {
            Ok(text) => {
                tracing::warn!(%primary_err, "docx-rs failed, used xml fallback");
                Ok(text)
            }
            Err(fallback_err) => Err(AppError::ConversionFailed(format!(
                "DOCX parse failed (docx-rs: {primary_err}; xml fallback: {fallback_err})"
            ))),
        },
    }
}

fn docx_to_markdown(bytes: &[u8]) -> AppResult<String> {
    let docx = docx_rs::read_docx(bytes)
        .map_err(|e| AppError::ConversionFailed(format!("docx-rs failed: {e}")))?;

    let mut blocks: Vec<String> = Vec::new();
    for child in &docx.document.children {
        match child {
            docx_rs::DocumentChild::Paragraph(para) => {
                let style_id = para
                    .property
                    .style
                    .as_ref()
                    .map(|s| s.val.to_ascii_lowercase())
                    .unwrap_or_default();
                let text = paragraph_text(para);
                if text.is_empty() {
                    continue;
                }
                if style_id.starts_with("heading") || style_id.starts_with("title") {
                    blocks.push(format!("## {text}"));
                } else {
                    blocks.push(text);
                }
            }
            docx_rs::DocumentChild::Table(table) => {
                let mut grid: Vec<Vec<String>> = Vec::new();
                for row in &table.rows {
                    let docx_rs::TableChild::TableRow(tr) = row;
                    let mut cells: Vec<String> = Vec::new();
                    for cell in &tr.cells {
                        let docx_rs::TableRowChild::TableCell(tc) = cell;
                        let mut parts: Vec<String> = Vec::new();
                        for content in &tc.children {
                            if let docx_rs::TableCellContent::Paragraph(p) = content {
                                let text = paragraph_text(p);
                                if !text.is_empty() {
                                    parts.push(text);
                                }
                            }
                        }
                        cells.push(parts.join(" "));
                    }
                    grid.push(cells);
                }
                if let Some(md) = markdown_table(&grid) {
                    blocks.push(md);
                }
            }
            _ => {}
        }
    }

    if blocks.is_empty() {
        return Err(AppError::InvalidInput(
            "DOCX contains no extractable text (docx-rs path)".to_string(),
        ));
    }

    Ok(blocks.join("\n\n"))
}

fn paragraph_text(para: &docx_rs::Paragraph) -> String {
    let mut buf = String::new();
    for child in &para.children {
        if let docx_rs::ParagraphChild::Run(run) = child {
            for r in &run.children {
                if let docx_rs::RunChild::Text(t) = r {
                    buf.push_str(&t.text);
                }
            }
        }
    }
    buf.trim().to_string()
}

fn docx_xml_fallback(bytes: &[u8]) -> AppResult<String> {
    use std::io::Read;

    let mut archive = zip::ZipArchive::new(std::io::Cursor::new(bytes))
        .map_err(|e| AppError::ConversionFailed(format!("zip open failed: {e}")))?;
    let mut doc_xml = archive
        .by_name("word/document.xml")
        .map_err(|e| AppError::ConversionFailed(format!("word/document.xml missing: {e}")))?;
    let mut xml = String::new();
    doc_xml
        .read_to_string(&mut xml)
        .map_err(|e| AppError::ConversionFailed(format!("cannot read document.xml: {e}")))?;

    let xml_doc = roxmltree::Document::parse(&xml)
        .map_err(|e| AppError::ConversionFailed(format!("document.xml parse failed: {e}")))?;

    let mut paragraphs: Vec<String> = Vec::new();
    for para in xml_doc
        .descendants()
        .filter(|n| n.is_element() && n.tag_name().name() == "p")
    {
        let mut buf = String::new();
        for node in para.descendants().filter(|n| n.is_element()) {
            match node.tag_name().name() {
                "t" => {
                    if let Some(text) = node.text() {
                        buf.push_str(text);
                    }
                }
                "tab" => buf.push('\t'),
                "br" | "cr" => buf.push('\n'),
                _ => {}
            }
        }
        let trimmed = buf.trim().to_string();
        if !trimmed.is_empty() {
            paragraphs.push(trimmed);
        }
    }

    if paragraphs.is_empty() {
        return Err(AppError::InvalidInput(
            "DOCX contains no extractable text (xml fallback path)".to_string(),
        ));
    }

    Ok(paragraphs.join("\n\n"))
}

// ── XLSX ─────────────────────────────────────────────────────────────

fn normalize_xlsx(path: &Path) -> AppResult<String> {
    use calamine::{open_workbook_auto, Reader};

    let mut workbook = open_workbook_auto(path)
        .map_err(|e| AppError::ConversionFailed(format!("calamine failed: {e}")))?;

    let sheet_names = workbook.sheet_names().to_vec();
    let mut tables: Vec<(String, String)> = Vec::new();

    for sheet_name in &sheet_names {
        if let Some(Ok(range)) = workbook.worksheet_range(sheet_name) {
            let grid: Vec<Vec<String>> = range
                .rows()
                .map(|row| row.iter().map(ToString::to_string).collect())
                .collect();
            let cleaned = forward_fill(drop_empty_rows_and_columns(grid));
            if let Some(md) = markdown_table(&cleaned) {
                tables.push((sheet_name.clone(), md));
            }
        }
    }

    if tables.is_empty() {
        return Err(AppError::InvalidInput(
            "XLSX contains no data".to_string(),
        ));
    }

    // Sheet headings only disambiguate multi-sheet workbooks.
    if tables.len() == 1 {
        let (_, md) = tables.remove(0);
        return Ok(md);
    }
    Ok(tables
        .into_iter()
        .map(|(name, md)| format!("## {name}\n\n{md}"))
        .collect::<Vec<_>>()
        .join("\n\n"))
}

/// Drop rows and columns that hold no non-blank cell at all.
pub fn drop_empty_rows_and_columns(grid: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let rows: Vec<Vec<String>> = grid
        .into_iter()
        .filter(|row| row.iter().any(|cell| !cell.trim().is_empty()))
        .collect();

    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    let keep: Vec<usize> = (0..width)
        .filter(|&col| {
            rows.iter()
                .any(|row| row.get(col).is_some_and(|cell| !cell.trim().is_empty()))
        })
        .collect();

    rows.into_iter()
        .map(|row| {
            keep.iter()
                .map(|&col| row.get(col).cloned().unwrap_or_default())
                .collect()
        })
        .collect()
}

/// Propagate the nearest non-blank value downward within each column,
/// so labels that spanned merged cells reach every covered row.
pub fn forward_fill(mut grid: Vec<Vec<String>>) -> Vec<Vec<String>> {
    let width = grid.iter().map(Vec::len).max().unwrap_or(0);
    for row in &mut grid {
        row.resize(width, String::new());
    }
    for col in 0..width {
        let mut last = String::new();
        for row in grid.iter_mut() {
            if row[col].trim().is_empty() {
                row[col] = last.clone();
            } else {
                last = row[col].clone();
            }
        }
    }
    grid
}

/// Render a grid as a github-style markdown table, first row as the
/// header. `None` when there is nothing to render.
pub fn markdown_table(grid: &[Vec<String>]) -> Option<String> {
    let width = grid.iter().map(Vec::len).max()?;
    if width == 0 {
        return None;
    }

    let mut lines: Vec<String> = Vec::with_capacity(grid.len() + 1);
    for (i, row) in grid.iter().enumerate() {
        let mut cells: Vec<String> = row.iter().map(|c| sanitize_cell(c)).collect();
        cells.resize(width, String::new());
        lines.push(format!("| {} |", cells.join(" | ")));
        if i == 0 {
            lines.push(format!("|{}|", vec![" --- "; width].join("|")));
        }
    }
    Some(lines.join("\n"))
}

fn sanitize_cell(cell: &str) -> String {
    cell.replace('\n', " ").replace('|', "\\|").trim().to_string()
}
