//! 解析結果の出力
//!
//! 出力先は拡張子なしの「ステム」で受け取り、形式ごとに拡張子を付ける。
//! - csv: `<stem>.csv` と `<stem>_synergy.csv`
//! - json: `<stem>.json`
//! - excel: `<stem>.xlsx`（シート Notes / Synergy）

pub mod csv;
pub mod excel;
pub mod json;

use crate::cli::ReportFormat;
use crate::error::Result;
use parfy_common::AnalysisResult;
use std::path::{Path, PathBuf};

pub const NOTE_HEADER: [&str; 5] = [
    "Нота",
    "Компонент (ENG)",
    "Компонент (RUS)",
    "Совпадения",
    "Ссылка",
];

pub const SYNERGY_HEADER: [&str; 6] = [
    "Глубина",
    "Источник",
    "Синергент",
    "Совпадение",
    "Вес",
    "Ссылка",
];

/// ノート × 原料の1行
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoteRow {
    pub note: String,
    pub component_eng: String,
    pub component_rus: String,
    /// `text (score)` を `, ` で連結
    pub entries: String,
    pub url: String,
}

/// シナジーの1行（URLは synergent のもの）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SynergyRow {
    pub depth: u32,
    pub source: String,
    pub synergent: String,
    pub entry: String,
    pub weight: u8,
    pub url: String,
}

/// 一致のないノートも1行（原料欄は空）として残す
pub fn note_rows(result: &AnalysisResult) -> Vec<NoteRow> {
    let mut rows = Vec::new();

    for note in &result.notes {
        let label = note_label(&note.term.text, &note.term.exclude);

        if note.components.is_empty() {
            rows.push(NoteRow {
                note: label,
                component_eng: String::new(),
                component_rus: String::new(),
                entries: String::new(),
                url: String::new(),
            });
            continue;
        }

        for matched in &note.components {
            rows.push(NoteRow {
                note: label.clone(),
                component_eng: matched.component.name_eng.clone(),
                component_rus: matched.component.name_rus.clone(),
                entries: matched
                    .entries
                    .iter()
                    .map(|e| e.to_string())
                    .collect::<Vec<_>>()
                    .join(", "),
                url: matched.component.url.clone(),
            });
        }
    }

    rows
}

pub fn synergy_rows(result: &AnalysisResult) -> Vec<SynergyRow> {
    result
        .synergies
        .iter()
        .flat_map(|(depth, synergies)| {
            synergies.iter().map(move |s| SynergyRow {
                depth: *depth,
                source: s.source.display_name().to_string(),
                synergent: s.synergent.display_name().to_string(),
                entry: s.entry.clone(),
                weight: s.weight,
                url: s.synergent.url.clone(),
            })
        })
        .collect()
}

/// 除外トークン付きのノートは入力と同じ `мох-абсолют` 形式で表示
fn note_label(text: &str, exclude: &[String]) -> String {
    std::iter::once(text)
        .chain(exclude.iter().map(String::as_str))
        .collect::<Vec<_>>()
        .join("-")
}

/// 既定の出力ステム `parfy_analysis_<日時>`
pub fn default_stem(dir: &Path, timestamp: &str) -> PathBuf {
    dir.join(format!("parfy_analysis_{}", timestamp))
}

/// `--out` の拡張子を外してステムにする
pub fn stem_from_output(output: &Path) -> PathBuf {
    match output.extension().and_then(|e| e.to_str()) {
        Some("csv" | "json" | "xlsx") => output.with_extension(""),
        _ => output.to_path_buf(),
    }
}

fn with_suffix(stem: &Path, suffix: &str) -> PathBuf {
    let mut name = stem.as_os_str().to_os_string();
    name.push(suffix);
    PathBuf::from(name)
}

/// 形式に応じて書き出し、作成したファイルを返す
pub fn export_report(result: &AnalysisResult, format: ReportFormat, stem: &Path) -> Result<Vec<PathBuf>> {
    if let Some(parent) = stem.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }

    let mut written = Vec::new();

    if matches!(format, ReportFormat::Csv | ReportFormat::All) {
        let notes_path = with_suffix(stem, ".csv");
        let synergy_path = with_suffix(stem, "_synergy.csv");
        csv::write_notes(result, &notes_path)?;
        csv::write_synergies(result, &synergy_path)?;
        written.push(notes_path);
        written.push(synergy_path);
    }

    if matches!(format, ReportFormat::Json | ReportFormat::All) {
        let path = with_suffix(stem, ".json");
        json::write_json(result, &path)?;
        written.push(path);
    }

    if matches!(format, ReportFormat::Excel | ReportFormat::All) {
        let path = with_suffix(stem, ".xlsx");
        excel::generate_excel(result, &path)?;
        written.push(path);
    }

    Ok(written)
}
