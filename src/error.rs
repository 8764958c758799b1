use thiserror::Error;

#[derive(Error, Debug)]
pub enum ParfyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("カタログが見つかりません: {0}")]
    CatalogNotFound(String),

    #[error("カタログ読み込みエラー: {0}")]
    CatalogRead(String),

    #[error("ノートが指定されていません。`parfy analyse --notes \"мох, iso super\"` のように指定してください")]
    EmptyNotes,

    #[error("入力エラー: {0}")]
    Prompt(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error("Excel生成エラー: {0}")]
    ExcelGeneration(String),

    #[error(transparent)]
    Common(#[from] parfy_common::Error),
}

impl From<rust_xlsxwriter::XlsxError> for ParfyError {
    fn from(e: rust_xlsxwriter::XlsxError) -> Self {
        ParfyError::ExcelGeneration(e.to_string())
    }
}

impl From<dialoguer::Error> for ParfyError {
    fn from(e: dialoguer::Error) -> Self {
        ParfyError::Prompt(e.to_string())
    }
}

pub type Result<T> = std::result::Result<T, ParfyError>;
