//! Excelカタログの読み込み（先頭シートのみ）

use crate::error::{ParfyError, Result};
use calamine::{open_workbook_auto, Data, Reader};
use std::path::Path;

/// 先頭シートを文字列の行に変換する
pub fn read_rows(path: &Path) -> Result<Vec<Vec<String>>> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| ParfyError::CatalogRead(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| ParfyError::CatalogRead(format!("{}: シートがありません", path.display())))?
        .map_err(|e| ParfyError::CatalogRead(format!("{}: {}", path.display(), e)))?;

    Ok(range
        .rows()
        .map(|row| row.iter().map(cell_to_string).collect())
        .collect())
}

fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        other => other.to_string(),
    }
}
