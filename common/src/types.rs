//! 照合エンジンの型定義
//!
//! - Component: カタログの1レコード（原料）
//! - SearchTerm: ノート入力から正規化された検索語
//! - MatchEntry / ComponentMatch: 照合結果
//! - Synergy: 説明文中で言及された別の原料との関係
//! - AnalysisResult: 最終出力（レポート層へ渡す）

use crate::name::NameNormalizer;
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashSet};

/// 現在計算されるシナジーの深さ
pub const SYNERGY_DEPTH: u32 = 1;

/// カタログの1レコード
///
/// 欠けているフィールドは空文字として扱う。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Component {
    /// 取得時の生タイトル
    pub original_name: String,
    pub name_eng: String,
    pub name_rus: String,
    pub description: String,
    /// 属性表を1行に潰したもの
    pub short_description: String,
    /// 取得元URL（一意性は保証されない）
    pub url: String,
}

impl Component {
    /// `original_name` から `name_eng` / `name_rus` を再計算する
    ///
    /// `"English / Русский"` 形式なら前半が英名、後半が露名。
    /// 1要素だけなら文字種に関係なく英名に入れ、露名は空にする。
    pub fn derive_names(&mut self, normalizer: &NameNormalizer) {
        if self.original_name.trim().is_empty() {
            return;
        }

        let cleaned = self.original_name.replace(" — ", "-").replace('—', "-");
        let parts: Vec<&str> = cleaned
            .split('/')
            .map(str::trim)
            .filter(|p| !p.is_empty())
            .collect();

        match parts.as_slice() {
            [] => {}
            [single] => {
                self.name_eng = normalizer.normalize(single);
                self.name_rus.clear();
            }
            [eng, rus, ..] => {
                self.name_eng = normalizer.normalize(eng);
                self.name_rus = normalizer.normalize(rus);
            }
        }
    }

    /// 表示用の名前（英名 → 露名 → 生タイトルの順）
    pub fn display_name(&self) -> &str {
        if !self.name_eng.is_empty() {
            &self.name_eng
        } else if !self.name_rus.is_empty() {
            &self.name_rus
        } else {
            &self.original_name
        }
    }
}

impl std::fmt::Display for Component {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

/// ノート入力から得た検索語
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct SearchTerm {
    /// 小文字化された語または句
    pub text: String,
    /// この語専用の除外トークン（重複なし、入力順）
    pub exclude: Vec<String>,
}

impl SearchTerm {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            exclude: Vec::new(),
        }
    }

    pub fn with_exclude<I, S>(mut self, exclude: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for token in exclude {
            let token = token.into();
            if !token.is_empty() && !self.exclude.contains(&token) {
                self.exclude.push(token);
            }
        }
        self
    }

    /// 空白を含む（複数語の）検索語か
    pub fn is_phrase(&self) -> bool {
        self.text.split_whitespace().nth(1).is_some()
    }
}

/// あいまい照合でヒットした部分文字列とスコア（0〜100）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchEntry {
    pub text: String,
    pub score: u8,
}

impl MatchEntry {
    pub fn new(text: impl Into<String>, score: u8) -> Self {
        Self {
            text: text.into(),
            score,
        }
    }
}

impl std::fmt::Display for MatchEntry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.text, self.score)
    }
}

/// 検索語に一致した原料と、その根拠となったエントリ（発見順）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentMatch {
    pub component: Component,
    pub entries: Vec<MatchEntry>,
}

/// 原料の説明文中で別の原料が言及されている関係
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Synergy {
    pub source: Component,
    pub synergent: Component,
    /// 説明文中で一致した窓
    pub entry: String,
    pub weight: u8,
}

/// 1つの検索語に対する照合結果
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NoteMatches {
    pub term: SearchTerm,
    pub components: Vec<ComponentMatch>,
}

/// 解析結果
///
/// `notes` は検索語の発見順。`synergies` は深さ → シナジー一覧で、
/// 現在は深さ1のみが埋まる。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub notes: Vec<NoteMatches>,
    pub synergies: BTreeMap<u32, Vec<Synergy>>,
}

impl AnalysisResult {
    /// 検索語テキストに対する一致一覧（同じテキストが複数あれば最初のもの）
    pub fn components_for(&self, text: &str) -> Option<&[ComponentMatch]> {
        self.notes
            .iter()
            .find(|n| n.term.text == text)
            .map(|n| n.components.as_slice())
    }

    /// いずれかの検索語に一致した原料（重複除去、発見順）
    pub fn found_components(&self) -> Vec<&Component> {
        let mut seen = HashSet::new();
        self.notes
            .iter()
            .flat_map(|n| n.components.iter())
            .map(|m| &m.component)
            .filter(|c| seen.insert((c.url.as_str(), c.name_eng.as_str(), c.name_rus.as_str())))
            .collect()
    }

    pub fn synergies_at(&self, depth: u32) -> &[Synergy] {
        self.synergies
            .get(&depth)
            .map(|s| s.as_slice())
            .unwrap_or(&[])
    }

    pub fn total_matches(&self) -> usize {
        self.notes.iter().map(|n| n.components.len()).sum()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn normalizer() -> NameNormalizer {
        NameNormalizer::new(["absolute", "firmenich", "абсолют"])
    }

    #[test]
    fn test_component_deserialize_missing_fields() {
        let json = r#"{"nameEng": "evernyl"}"#;
        let component: Component = serde_json::from_str(json).expect("デシリアライズ失敗");
        assert_eq!(component.name_eng, "evernyl");
        assert_eq!(component.description, "");
        assert_eq!(component.url, "");
    }

    #[test]
    fn test_component_serialize_camel_case() {
        let component = Component {
            name_eng: "iso e super".to_string(),
            short_description: "древесный".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_string(&component).expect("シリアライズ失敗");
        assert!(json.contains("\"nameEng\":\"iso e super\""));
        assert!(json.contains("\"shortDescription\":\"древесный\""));
        assert!(json.contains("\"originalName\":\"\""));
    }

    #[test]
    fn test_derive_names_two_parts() {
        let mut component = Component {
            original_name: "Muscenone Delta (Firmenich) / Мусценон".to_string(),
            ..Default::default()
        };
        component.derive_names(&normalizer());
        assert_eq!(component.name_eng, "muscenone delta");
        assert_eq!(component.name_rus, "мусценон");
    }

    #[test]
    fn test_derive_names_single_part_goes_to_english() {
        let mut rus = Component {
            original_name: "Мох дубовый абсолют".to_string(),
            name_rus: "старое".to_string(),
            ..Default::default()
        };
        rus.derive_names(&normalizer());
        assert_eq!(rus.name_eng, "мох дубовый");
        assert_eq!(rus.name_rus, "");

        let mut eng = Component {
            original_name: "Eugenol 99.5% (Indonesia)".to_string(),
            ..Default::default()
        };
        eng.derive_names(&normalizer());
        assert_eq!(eng.name_eng, "eugenol indonesia");
        assert_eq!(eng.name_rus, "");
    }

    #[test]
    fn test_derive_names_keeps_names_without_original() {
        let mut component = Component {
            name_eng: "evernyl".to_string(),
            ..Default::default()
        };
        component.derive_names(&normalizer());
        assert_eq!(component.name_eng, "evernyl");
    }

    #[test]
    fn test_search_term_exclude_dedup() {
        let term = SearchTerm::new("мох").with_exclude(["абсолют", "", "абсолют", "база"]);
        assert_eq!(term.exclude, vec!["абсолют".to_string(), "база".to_string()]);
    }

    #[test]
    fn test_search_term_is_phrase() {
        assert!(SearchTerm::new("iso super").is_phrase());
        assert!(!SearchTerm::new("iso").is_phrase());
    }

    #[test]
    fn test_found_components_dedup() {
        let a = Component {
            name_eng: "a".to_string(),
            url: "u1".to_string(),
            ..Default::default()
        };
        let matched = ComponentMatch {
            component: a.clone(),
            entries: vec![MatchEntry::new("a", 100)],
        };
        let result = AnalysisResult {
            notes: vec![
                NoteMatches {
                    term: SearchTerm::new("a"),
                    components: vec![matched.clone()],
                },
                NoteMatches {
                    term: SearchTerm::new("b"),
                    components: vec![matched],
                },
            ],
            synergies: BTreeMap::new(),
        };

        assert_eq!(result.found_components(), vec![&a]);
        assert_eq!(result.total_matches(), 2);
        assert!(result.synergies_at(SYNERGY_DEPTH).is_empty());
        assert!(result.components_for("a").is_some());
        assert!(result.components_for("zzz").is_none());
    }
}
