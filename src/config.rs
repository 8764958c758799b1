use crate::error::{ParfyError, Result};
use parfy_common::MatcherConfig;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct Config {
    pub matcher: MatcherConfig,
}

impl Config {
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// 指定パスから読み込む（存在しなければ既定値）
    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default_config());
        }

        let content = std::fs::read_to_string(path)?;
        let config: Config = serde_json::from_str(&content)?;
        config.matcher.validate()?;
        Ok(config)
    }

    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::config_path()?)
    }

    pub fn save_to(&self, path: &Path) -> Result<()> {
        self.matcher.validate()?;

        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    pub fn config_path() -> Result<PathBuf> {
        let home = dirs::home_dir()
            .ok_or_else(|| ParfyError::Config("ホームディレクトリが見つかりません".into()))?;
        Ok(home.join(".config").join("parfy").join("config.json"))
    }

    fn default_config() -> Self {
        Self {
            matcher: MatcherConfig::default(),
        }
    }

    /// CLI引数で今回の実行分だけ上書きした照合設定
    pub fn matcher_with_overrides(
        &self,
        token_threshold: Option<u8>,
        window_threshold: Option<u8>,
        extra_ban_tokens: &[String],
    ) -> Result<MatcherConfig> {
        let mut matcher = self.matcher.clone();

        if let Some(t) = token_threshold {
            matcher.token_threshold = t;
        }
        if let Some(t) = window_threshold {
            matcher.window_threshold = t;
        }
        matcher.extend_ban_tokens(extra_ban_tokens.iter().cloned());

        matcher.validate()?;
        Ok(matcher)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_load_missing_file_gives_defaults() {
        let dir = tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("none.json")).unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.matcher.token_threshold, 60);
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.json");

        let mut config = Config::default();
        config.matcher.window_threshold = 75;
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded.matcher.window_threshold, 75);
    }

    #[test]
    fn test_load_rejects_invalid_threshold() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.json");
        std::fs::write(&path, r#"{"matcher": {"tokenThreshold": 0}}"#).unwrap();

        let result = Config::load_from(&path);
        assert!(matches!(
            result,
            Err(ParfyError::Common(parfy_common::Error::InvalidThreshold { .. }))
        ));
    }

    #[test]
    fn test_overrides() {
        let config = Config::default();
        let matcher = config
            .matcher_with_overrides(Some(80), None, &["Fresh".to_string()])
            .unwrap();
        assert_eq!(matcher.token_threshold, 80);
        assert_eq!(matcher.window_threshold, 60);
        assert!(matcher.global_ban_tokens.contains(&"fresh".to_string()));

        assert!(config.matcher_with_overrides(None, Some(101), &[]).is_err());
    }
}
