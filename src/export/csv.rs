//! CSV出力（カタログと同じ `;` 区切り・BOM付き）

use super::{note_rows, synergy_rows, NOTE_HEADER, SYNERGY_HEADER};
use crate::catalog::csv::to_csv_string;
use crate::error::Result;
use parfy_common::AnalysisResult;
use std::path::Path;

pub fn write_notes(result: &AnalysisResult, path: &Path) -> Result<()> {
    let rows: Vec<Vec<String>> = note_rows(result)
        .into_iter()
        .map(|r| vec![r.note, r.component_eng, r.component_rus, r.entries, r.url])
        .collect();

    std::fs::write(path, to_csv_string(&NOTE_HEADER, &rows))?;
    Ok(())
}

pub fn write_synergies(result: &AnalysisResult, path: &Path) -> Result<()> {
    let rows: Vec<Vec<String>> = synergy_rows(result)
        .into_iter()
        .map(|r| {
            vec![
                r.depth.to_string(),
                r.source,
                r.synergent,
                r.entry,
                r.weight.to_string(),
                r.url,
            ]
        })
        .collect();

    std::fs::write(path, to_csv_string(&SYNERGY_HEADER, &rows))?;
    Ok(())
}
