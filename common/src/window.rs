//! スライディング窓によるフレーズ照合
//!
//! 長文を語の並びに分解し、目標フレーズと同じ語数の窓を1語ずつずらして
//! 類似度を比較する。ノート照合（全件収集）とシナジー探索（最良一致）で共用。
//!
//! 最良一致モードは全窓を走査して最高スコアの窓を選び、それが閾値以上の
//! 場合のみ一致とする。同点は先に現れた窓を優先する。

use crate::name::{canonical_words, canonicalize, NameNormalizer};
use crate::similarity::Similarity;
use crate::types::MatchEntry;
use tracing::trace;

/// 窓照合器
pub struct WindowMatcher<'a> {
    similarity: &'a dyn Similarity,
    normalizer: &'a NameNormalizer,
    threshold: u8,
}

impl<'a> WindowMatcher<'a> {
    pub fn new(similarity: &'a dyn Similarity, normalizer: &'a NameNormalizer, threshold: u8) -> Self {
        Self {
            similarity,
            normalizer,
            threshold,
        }
    }

    /// 最良一致モード
    ///
    /// 最高スコアの窓が閾値以上なら `Some`。目標が正規化で空になる場合や
    /// 本文の語数が窓より少ない場合は `None`。
    pub fn best_match(&self, text: &str, target: &str) -> Option<MatchEntry> {
        let target = self.normalizer.normalize(target);
        if target.is_empty() {
            return None;
        }

        let mut best: Option<MatchEntry> = None;
        for window in windows(&canonical_words(text), window_size(&target)) {
            let score = self.similarity.ratio(&window, &target);
            if best.as_ref().map_or(true, |b| score > b.score) {
                best = Some(MatchEntry::new(window, score));
            }
        }

        let best = best.filter(|b| b.score >= self.threshold);
        if let Some(entry) = &best {
            trace!(phrase = %target, entry = %entry.text, score = entry.score, "window best match");
        }
        best
    }

    /// 全件収集モード
    ///
    /// 閾値以上の窓をすべて返す。`banned` と（大文字小文字を無視して）
    /// 完全一致する窓は除く。
    pub fn collect_all(&self, text: &str, target: &str, banned: &[String]) -> Vec<MatchEntry> {
        let target = self.normalizer.normalize(target);
        if target.is_empty() {
            return Vec::new();
        }

        let banned: Vec<String> = banned.iter().map(|b| canonicalize(b)).collect();

        windows(&canonical_words(text), window_size(&target))
            .filter(|window| !banned.iter().any(|b| b == window))
            .filter_map(|window| {
                let score = self.similarity.ratio(&window, &target);
                (score >= self.threshold).then(|| MatchEntry::new(window, score))
            })
            .collect()
    }
}

fn window_size(normalized_target: &str) -> usize {
    normalized_target.split(' ').filter(|w| !w.is_empty()).count().max(1)
}

/// 語の並びから `size` 語ずつの窓を1語刻みで作る
fn windows(words: &[String], size: usize) -> impl Iterator<Item = String> + '_ {
    words.windows(size.max(1)).map(|w| w.join(" "))
}
