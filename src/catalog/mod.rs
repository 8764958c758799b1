//! カタログ（原料一覧）の読み書き
//!
//! ## 処理フロー
//! 1. 拡張子で CSV / XLSX を判定して行を読み込む
//! 2. ヘッダー行の列名から Component の各フィールドへ対応付け
//! 3. 不正な行は警告として記録し、読み込みは継続する
//!
//! `import` は読み込んだカタログの名称を再計算し、禁止トークンを含む
//! 原料を除いて `parfy_source_<日時>.csv` に書き出す。

pub mod csv;
pub mod xlsx;

use crate::error::{ParfyError, Result};
use lazy_static::lazy_static;
use parfy_common::{Component, ExclusionFilter, MatcherConfig};
use regex::Regex;
use std::path::{Path, PathBuf};
use std::time::SystemTime;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

lazy_static! {
    static ref SOURCE_FILE_RE: Regex = Regex::new(r"^parfy_source_.+\.(csv|xlsx)$").unwrap();
}

/// カタログの列
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Column {
    OriginalName,
    NameRus,
    NameEng,
    Description,
    ShortDescription,
    Url,
}

impl Column {
    /// 書き出し時の列順
    pub const ALL: [Column; 6] = [
        Column::OriginalName,
        Column::NameRus,
        Column::NameEng,
        Column::Description,
        Column::ShortDescription,
        Column::Url,
    ];

    pub fn title(self) -> &'static str {
        match self {
            Column::OriginalName => "Исходное название",
            Column::NameRus => "Название вещества (RUS)",
            Column::NameEng => "Название вещества (ENG)",
            Column::Description => "Описание",
            Column::ShortDescription => "Короткое описание",
            Column::Url => "Ссылка",
        }
    }

    /// ヘッダー名から列を判定（大文字小文字・前後空白は無視）
    pub fn from_header(header: &str) -> Option<Column> {
        let key = header.trim().trim_start_matches('\u{feff}').to_lowercase();
        let column = match key.as_str() {
            "исходное название" | "originalname" | "original_name" | "original name" => {
                Column::OriginalName
            }
            "название вещества (rus)" | "namerus" | "name_rus" => Column::NameRus,
            "название вещества (eng)" | "nameeng" | "name_eng" => Column::NameEng,
            "описание" | "description" => Column::Description,
            "короткое описание" | "shortdescription" | "short_description" => {
                Column::ShortDescription
            }
            "ссылка" | "url" => Column::Url,
            _ => return None,
        };
        Some(column)
    }

    fn get(self, component: &Component) -> &str {
        match self {
            Column::OriginalName => &component.original_name,
            Column::NameRus => &component.name_rus,
            Column::NameEng => &component.name_eng,
            Column::Description => &component.description,
            Column::ShortDescription => &component.short_description,
            Column::Url => &component.url,
        }
    }

    fn set(self, component: &mut Component, value: String) {
        match self {
            Column::OriginalName => component.original_name = value,
            Column::NameRus => component.name_rus = value,
            Column::NameEng => component.name_eng = value,
            Column::Description => component.description = value,
            Column::ShortDescription => component.short_description = value,
            Column::Url => component.url = value,
        }
    }
}

/// ヘッダー行の列位置 → 列
#[derive(Debug, Clone)]
pub struct ColumnMap {
    columns: Vec<Option<Column>>,
}

impl ColumnMap {
    /// 既知の列が1つもなければエラー
    pub fn from_header<S: AsRef<str>>(header: &[S]) -> Result<Self> {
        let columns: Vec<Option<Column>> = header
            .iter()
            .map(|h| Column::from_header(h.as_ref()))
            .collect();

        if columns.iter().all(Option::is_none) {
            return Err(ParfyError::CatalogRead(
                "ヘッダー行に既知の列がありません".into(),
            ));
        }

        Ok(Self { columns })
    }

    pub fn width(&self) -> usize {
        self.columns.len()
    }

    /// 欠けている列は空文字のまま
    pub fn build(&self, fields: &[String]) -> Component {
        let mut component = Component::default();
        for (column, value) in self.columns.iter().zip(fields) {
            if let Some(column) = column {
                column.set(&mut component, value.trim().to_string());
            }
        }
        component
    }
}

/// 読み込み結果
#[derive(Debug, Clone, Default)]
pub struct CatalogLoad {
    pub components: Vec<Component>,
    /// スキップした行の説明
    pub warnings: Vec<String>,
}

/// 拡張子で判定してカタログを読む
pub fn read_catalog(path: &Path) -> Result<CatalogLoad> {
    if !path.exists() {
        return Err(ParfyError::CatalogNotFound(path.display().to_string()));
    }

    let extension = path
        .extension()
        .map(|e| e.to_string_lossy().to_lowercase())
        .unwrap_or_default();

    let load = match extension.as_str() {
        "xlsx" | "xlsm" | "xls" | "ods" => rows_to_catalog(xlsx::read_rows(path)?)?,
        _ => {
            let content = std::fs::read_to_string(path)?;
            parse_catalog_csv(&content)?
        }
    };

    info!(
        path = %path.display(),
        components = load.components.len(),
        skipped = load.warnings.len(),
        "catalog loaded"
    );
    Ok(load)
}

/// CSV文字列からカタログを読む
pub fn parse_catalog_csv(content: &str) -> Result<CatalogLoad> {
    let mut records = csv::parse_records(content)
        .into_iter()
        .filter(|r| !r.is_blank());

    let header = records
        .next()
        .ok_or_else(|| ParfyError::CatalogRead("ヘッダー行がありません".into()))?;
    let map = ColumnMap::from_header(&header.fields)?;

    let mut load = CatalogLoad::default();
    for record in records {
        if record.unterminated {
            load.warnings
                .push(format!("{}行目: 引用符が閉じられていません", record.line));
            continue;
        }
        if record.fields.len() > map.width() {
            load.warnings.push(format!(
                "{}行目: 列数が多すぎます（{} > {}）",
                record.line,
                record.fields.len(),
                map.width()
            ));
            continue;
        }
        load.components.push(map.build(&record.fields));
    }

    for warning in &load.warnings {
        warn!("{}", warning);
    }
    Ok(load)
}

fn rows_to_catalog(rows: Vec<Vec<String>>) -> Result<CatalogLoad> {
    let mut rows = rows
        .into_iter()
        .enumerate()
        .filter(|(_, row)| row.iter().any(|c| !c.trim().is_empty()));

    let (_, header) = rows
        .next()
        .ok_or_else(|| ParfyError::CatalogRead("ヘッダー行がありません".into()))?;
    let map = ColumnMap::from_header(&header)?;

    let mut load = CatalogLoad::default();
    for (index, row) in rows {
        let extra = row.iter().skip(map.width()).any(|c| !c.trim().is_empty());
        if extra {
            load.warnings
                .push(format!("{}行目: ヘッダーにない列に値があります", index + 1));
            continue;
        }
        load.components.push(map.build(&row));
    }

    for warning in &load.warnings {
        warn!("{}", warning);
    }
    Ok(load)
}

/// カタログをCSVで書き出す
pub fn write_catalog(components: &[Component], path: &Path) -> Result<()> {
    let header: Vec<&str> = Column::ALL.iter().map(|c| c.title()).collect();
    let rows: Vec<Vec<&str>> = components
        .iter()
        .map(|component| Column::ALL.iter().map(|c| c.get(component)).collect())
        .collect();

    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    std::fs::write(path, csv::to_csv_string(&header, &rows))?;

    debug!(path = %path.display(), components = components.len(), "catalog written");
    Ok(())
}

/// `dir` 直下で最も新しい `parfy_source_*.csv|xlsx`
pub fn find_latest_catalog(dir: &Path) -> Result<PathBuf> {
    let mut candidates: Vec<(SystemTime, String, PathBuf)> = WalkDir::new(dir)
        .max_depth(1)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file())
        .filter_map(|entry| {
            let name = entry.file_name().to_string_lossy().to_string();
            if !SOURCE_FILE_RE.is_match(&name) {
                return None;
            }
            let modified = entry
                .metadata()
                .ok()
                .and_then(|m| m.modified().ok())
                .unwrap_or(SystemTime::UNIX_EPOCH);
            Some((modified, name, entry.into_path()))
        })
        .collect();

    candidates.sort();
    candidates
        .pop()
        .map(|(_, _, path)| path)
        .ok_or_else(|| {
            ParfyError::CatalogNotFound(format!(
                "{} に parfy_source_*.csv がありません（`parfy import` で作成してください）",
                dir.display()
            ))
        })
}

/// 取り込み結果
#[derive(Debug, Clone)]
pub struct ImportReport {
    pub output: PathBuf,
    pub kept: usize,
    pub dropped: usize,
    pub warnings: Vec<String>,
}

pub fn source_file_name(timestamp: &str) -> String {
    format!("parfy_source_{}.csv", timestamp)
}

/// 生カタログを整形して書き出す
pub fn import_catalog(input: &Path, output: &Path, config: &MatcherConfig) -> Result<ImportReport> {
    let load = read_catalog(input)?;
    let total = load.components.len();

    let normalizer = config.name_normalizer();
    let components: Vec<Component> = load
        .components
        .into_iter()
        .map(|mut component| {
            component.derive_names(&normalizer);
            component
        })
        .collect();

    let filter = ExclusionFilter::new(config.global_ban_tokens.iter().cloned());
    let kept = filter.retain_components(components);

    write_catalog(&kept, output)?;

    info!(kept = kept.len(), dropped = total - kept.len(), "catalog imported");
    Ok(ImportReport {
        output: output.to_path_buf(),
        kept: kept.len(),
        dropped: total - kept.len(),
        warnings: load.warnings,
    })
}
