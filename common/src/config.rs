//! 照合設定
//!
//! 閾値・ノイズ語彙・禁止トークンはすべて呼び出し側から注入する。
//! 既定値は組み込みリスト。

use crate::error::{Error, Result};
use crate::name::NameNormalizer;
use serde::{Deserialize, Serialize};

/// 既定の閾値（単語照合・窓照合とも）
pub const DEFAULT_THRESHOLD: u8 = 60;

/// 名称比較前に除去する語彙（ブランド名・単位・汎用語）
pub const DEFAULT_STRIP_VOCABULARY: &[&str] = &[
    // ブランド・サプライヤー
    "firmenich",
    "givaudan",
    "symrise",
    "iff",
    "takasago",
    "robertet",
    "mane",
    "basf",
    "drt",
    "bedoukian",
    "treatt",
    "hermitage oils",
    "de labdanum",
    // 単位
    "ml",
    "мл",
    "g",
    "гр",
    "г",
    "kg",
    "кг",
    // 汎用語
    "natural",
    "nat",
    "absolute",
    "abs",
    "essential oil",
    "oil",
    "resinoid",
    "extract",
    "solution",
    "dpg",
    "натуральный",
    "натуральная",
    "натуральное",
    "природный",
    "природная",
    "абсолют",
    "эфирное масло",
    "масло",
    "резиноид",
    "экстракт",
    "раствор",
];

/// 原料として扱わないカタログ項目・一致語
pub const DEFAULT_BAN_TOKENS: &[&str] = &[
    "формула",
    "концентрат",
    "база",
    "base",
    "perfume oil",
    "урок",
    "консультация",
    "крышка",
    "флакон",
    "краситель",
    "набор",
    "основа",
    "палочка",
    "палочки",
    "пипетка",
    "пипетки",
    "сертификат",
    "построение",
    "пропиленгликоль",
    "тестирование",
    "фиолка",
    "фильтр",
    "украшение",
    "хроматограмма",
    "введение",
    "пробирка",
    "стакан",
    "весы",
    "диэтилфталат",
];

/// 照合エンジンの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct MatcherConfig {
    /// 単語照合の最低スコア
    pub token_threshold: u8,
    /// 窓照合の最低スコア
    pub window_threshold: u8,
    /// 名称正規化で除去する語彙（順序付き）
    pub strip_vocabulary: Vec<String>,
    /// 全体の禁止トークン
    pub global_ban_tokens: Vec<String>,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            token_threshold: DEFAULT_THRESHOLD,
            window_threshold: DEFAULT_THRESHOLD,
            strip_vocabulary: DEFAULT_STRIP_VOCABULARY.iter().map(|s| s.to_string()).collect(),
            global_ban_tokens: DEFAULT_BAN_TOKENS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl MatcherConfig {
    /// 語彙・禁止トークンを空にした最小構成（テストや外部注入向け）
    pub fn minimal(token_threshold: u8, window_threshold: u8) -> Self {
        Self {
            token_threshold,
            window_threshold,
            strip_vocabulary: Vec::new(),
            global_ban_tokens: Vec::new(),
        }
    }

    /// 閾値が 1..=100 の範囲にあるか検証する
    pub fn validate(&self) -> Result<()> {
        check_threshold("tokenThreshold", self.token_threshold)?;
        check_threshold("windowThreshold", self.window_threshold)?;

        if self.global_ban_tokens.iter().any(|t| t.trim().is_empty()) {
            return Err(Error::Config("globalBanTokens contains an empty token".into()));
        }

        Ok(())
    }

    pub fn name_normalizer(&self) -> NameNormalizer {
        NameNormalizer::new(&self.strip_vocabulary)
    }

    /// 禁止トークンを追加（重複は無視）
    pub fn extend_ban_tokens<I, S>(&mut self, tokens: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in tokens {
            let token = token.into().trim().to_lowercase();
            if !token.is_empty() && !self.global_ban_tokens.contains(&token) {
                self.global_ban_tokens.push(token);
            }
        }
    }
}

fn check_threshold(name: &'static str, value: u8) -> Result<()> {
    if value == 0 || value > 100 {
        return Err(Error::InvalidThreshold { name, value });
    }
    Ok(())
}
