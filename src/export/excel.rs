//! Excel出力（rust_xlsxwriter）
//!
//! シート "Notes" にノート × 原料、"Synergy" にシナジーを1行ずつ書く。

use super::{note_rows, synergy_rows, NOTE_HEADER, SYNERGY_HEADER};
use crate::error::Result;
use parfy_common::AnalysisResult;
use rust_xlsxwriter::{Color, Format, FormatBorder, Workbook, Worksheet, XlsxError};
use std::path::Path;

const NOTE_WIDTHS: [f64; 5] = [20.0, 30.0, 30.0, 50.0, 45.0];
const SYNERGY_WIDTHS: [f64; 6] = [9.0, 30.0, 30.0, 30.0, 8.0, 45.0];

fn header_format() -> Format {
    Format::new()
        .set_bold()
        .set_background_color(Color::RGB(0xF5F5F5))
        .set_border(FormatBorder::Thin)
        .set_border_color(Color::RGB(0xAAAAAA))
}

fn write_header(sheet: &mut Worksheet, titles: &[&str], widths: &[f64]) -> std::result::Result<(), XlsxError> {
    let format = header_format();
    for (col, (title, width)) in titles.iter().zip(widths).enumerate() {
        let col = col as u16;
        sheet.write_string_with_format(0, col, *title, &format)?;
        sheet.set_column_width(col, *width)?;
    }
    sheet.set_freeze_panes(1, 0)?;
    Ok(())
}

/// ワークブックをメモリ上に作る
pub fn build_workbook(result: &AnalysisResult) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();

    let notes = workbook.add_worksheet();
    notes.set_name("Notes")?;
    write_header(notes, &NOTE_HEADER, &NOTE_WIDTHS)?;
    for (i, row) in note_rows(result).iter().enumerate() {
        let r = i as u32 + 1;
        notes.write_string(r, 0, &row.note)?;
        notes.write_string(r, 1, &row.component_eng)?;
        notes.write_string(r, 2, &row.component_rus)?;
        notes.write_string(r, 3, &row.entries)?;
        notes.write_string(r, 4, &row.url)?;
    }

    let synergy = workbook.add_worksheet();
    synergy.set_name("Synergy")?;
    write_header(synergy, &SYNERGY_HEADER, &SYNERGY_WIDTHS)?;
    for (i, row) in synergy_rows(result).iter().enumerate() {
        let r = i as u32 + 1;
        synergy.write_number(r, 0, row.depth)?;
        synergy.write_string(r, 1, &row.source)?;
        synergy.write_string(r, 2, &row.synergent)?;
        synergy.write_string(r, 3, &row.entry)?;
        synergy.write_number(r, 4, row.weight)?;
        synergy.write_string(r, 5, &row.url)?;
    }

    Ok(workbook)
}

pub fn generate_excel(result: &AnalysisResult, output_path: &Path) -> Result<()> {
    let mut workbook = build_workbook(result)?;
    workbook.save(output_path)?;
    Ok(())
}
