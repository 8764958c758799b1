//! 除外フィルタ
//!
//! 2つの仕組みを組み合わせる。
//! - 全体禁止リスト: 取り込み時に、名前に禁止トークンを含む原料を落とす
//! - 全件禁止ルール: ある(原料, 検索語)の一致エントリがすべて禁止トークン
//!   （全体 ∪ 検索語ごと）を含む場合のみ、その一致を破棄する。
//!   一部だけ禁止なら、一致はエントリごとそのまま残す。

use crate::types::{Component, MatchEntry, SearchTerm};

/// 大文字小文字を無視した部分一致
fn contains_token(text: &str, token: &str) -> bool {
    let token = token.trim().to_lowercase();
    !token.is_empty() && text.to_lowercase().contains(&token)
}

#[derive(Debug, Clone, Default)]
pub struct ExclusionFilter {
    global_ban_tokens: Vec<String>,
}

impl ExclusionFilter {
    pub fn new<I, S>(global_ban_tokens: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            global_ban_tokens: global_ban_tokens
                .into_iter()
                .map(|t| t.into().trim().to_lowercase())
                .filter(|t| !t.is_empty())
                .collect(),
        }
    }

    pub fn global_ban_tokens(&self) -> &[String] {
        &self.global_ban_tokens
    }

    /// 全体禁止リストに該当するか
    pub fn is_globally_banned(&self, text: &str) -> bool {
        self.global_ban_tokens.iter().any(|t| contains_token(text, t))
    }

    /// 全体 ∪ 検索語ごとの禁止トークン
    pub fn tokens_for(&self, term: &SearchTerm) -> Vec<String> {
        let mut tokens = self.global_ban_tokens.clone();
        for token in &term.exclude {
            let token = token.trim().to_lowercase();
            if !token.is_empty() && !tokens.contains(&token) {
                tokens.push(token);
            }
        }
        tokens
    }

    /// 全件禁止ルールを適用する
    ///
    /// 禁止トークンは全体 ∪ 検索語ごと。検索語の除外が空でも全体禁止リストは効く。
    /// 空でないエントリがすべて禁止なら `None`、そうでなければ元のエントリを
    /// そのまま返す。エントリが空の場合も `None`。
    pub fn apply(&self, entries: Vec<MatchEntry>, term: &SearchTerm) -> Option<Vec<MatchEntry>> {
        if entries.is_empty() {
            return None;
        }

        let tokens = self.tokens_for(term);
        if tokens.is_empty() {
            return Some(entries);
        }

        let all_banned = entries
            .iter()
            .all(|entry| tokens.iter().any(|t| contains_token(&entry.text, t)));

        if all_banned {
            None
        } else {
            Some(entries)
        }
    }

    /// 取り込み時のフィルタ: 英名・露名・生タイトルに禁止トークンを含む原料を除く
    pub fn retain_components(&self, components: Vec<Component>) -> Vec<Component> {
        components
            .into_iter()
            .filter(|c| {
                !self.is_globally_banned(&c.name_eng)
                    && !self.is_globally_banned(&c.name_rus)
                    && !self.is_globally_banned(&c.original_name)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MatcherConfig;

    fn entries(texts: &[&str]) -> Vec<MatchEntry> {
        texts.iter().map(|t| MatchEntry::new(*t, 80)).collect()
    }

    #[test]
    fn test_no_tokens_is_noop() {
        let filter = ExclusionFilter::default();
        let term = SearchTerm::new("мох");
        let input = entries(&["абсолютный мох", "мох"]);
        assert_eq!(filter.apply(input.clone(), &term), Some(input));
    }

    #[test]
    fn test_global_tokens_apply_without_term_excludes() {
        let config = MatcherConfig::default();
        let filter = ExclusionFilter::new(config.global_ban_tokens.iter().cloned());
        let term = SearchTerm::new("база");
        assert!(term.exclude.is_empty());

        assert_eq!(filter.apply(entries(&["амбровая база"]), &term), None);

        let input = entries(&["амбровая база", "амбра"]);
        assert_eq!(filter.apply(input.clone(), &term), Some(input));
    }

    #[test]
    fn test_all_entries_banned_discards_match() {
        let filter = ExclusionFilter::default();
        let term = SearchTerm::new("мох").with_exclude(["абсолют"]);
        assert_eq!(filter.apply(entries(&["абсолютный мох"]), &term), None);
    }

    #[test]
    fn test_partial_ban_keeps_all_entries() {
        let filter = ExclusionFilter::default();
        let term = SearchTerm::new("мох").with_exclude(["абсолют"]);
        let input = entries(&["абсолютный мох", "лесной мох"]);
        assert_eq!(filter.apply(input.clone(), &term), Some(input));
    }

    #[test]
    fn test_global_tokens_join_term_tokens() {
        let filter = ExclusionFilter::new(["Fresh"]);
        let term = SearchTerm::new("мох").with_exclude(["абсолют"]);
        assert_eq!(filter.tokens_for(&term), vec!["fresh".to_string(), "абсолют".to_string()]);
        assert_eq!(filter.apply(entries(&["FRESH moss", "абсолют"]), &term), None);
    }

    #[test]
    fn test_empty_entries_discarded() {
        let filter = ExclusionFilter::default();
        assert_eq!(filter.apply(Vec::new(), &SearchTerm::new("мох")), None);
    }

    #[test]
    fn test_retain_components() {
        let filter = ExclusionFilter::new(["флакон", "base"]);
        let components = vec![
            Component {
                name_eng: "evernyl".to_string(),
                ..Default::default()
            },
            Component {
                name_rus: "Флакон 10 мл".to_string(),
                ..Default::default()
            },
            Component {
                original_name: "Amber Base (Firmenich)".to_string(),
                ..Default::default()
            },
        ];

        let kept = filter.retain_components(components);
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].name_eng, "evernyl");
    }
}
