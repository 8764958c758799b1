//! 単語単位のあいまい照合
//!
//! フィールドを単語に分割し、各単語と検索語の類似度を比較する。
//! 語順は無視し、閾値以上の単語をすべて拾う。

use crate::similarity::Similarity;
use crate::types::MatchEntry;

const WORD_DELIMITERS: &[char] = &[' ', ',', '.', '!', '?', ';', ':', '\n', '\r', '\t'];

/// フィールドを単語に分割する（空要素は除く）
pub fn split_words(text: &str) -> impl Iterator<Item = &str> {
    text.split(WORD_DELIMITERS)
        .map(str::trim)
        .filter(|w| !w.is_empty())
}

/// 単語照合器
pub struct TokenMatcher<'a> {
    similarity: &'a dyn Similarity,
    threshold: u8,
}

impl<'a> TokenMatcher<'a> {
    pub fn new(similarity: &'a dyn Similarity, threshold: u8) -> Self {
        Self { similarity, threshold }
    }

    /// `field` 中で `query` に類似する単語を出現順に返す
    pub fn find(&self, field: &str, query: &str) -> Vec<MatchEntry> {
        let query = query.to_lowercase();
        if query.trim().is_empty() {
            return Vec::new();
        }

        split_words(field)
            .filter_map(|word| {
                let score = self.similarity.ratio(&word.to_lowercase(), &query);
                (score >= self.threshold).then(|| MatchEntry::new(word, score))
            })
            .collect()
    }
}
