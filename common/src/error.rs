//! エラー型定義

use thiserror::Error;

/// 照合コアのエラー型
///
/// コアはI/Oを行わないため、設定の不備のみを表す。
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum Error {
    #[error("Invalid threshold `{name}`: {value} (expected 1..=100)")]
    InvalidThreshold { name: &'static str, value: u8 },

    #[error("Config error: {0}")]
    Config(String),
}

/// Result型エイリアス
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display_invalid_threshold() {
        let error = Error::InvalidThreshold { name: "tokenThreshold", value: 0 };
        let display = format!("{}", error);
        assert!(display.contains("tokenThreshold"));
        assert!(display.contains("1..=100"));
    }

    #[test]
    fn test_error_display_config() {
        let error = Error::Config("語彙が空です".to_string());
        assert_eq!(format!("{}", error), "Config error: 語彙が空です");
    }

    #[test]
    fn test_error_debug() {
        let error = Error::Config("テスト".to_string());
        let debug = format!("{:?}", error);
        assert!(debug.contains("Config"));
        assert!(debug.contains("テスト"));
    }
}
