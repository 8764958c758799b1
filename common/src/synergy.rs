//! シナジー探索
//!
//! 一致した原料（発見集合）の説明文を、カタログ全体の原料名で窓照合する。
//! 英名で一致しなければ露名で再試行する。
//! 発見集合 × カタログの総当たりで、ソースごとに rayon で並列化する。
//! 結果はソース順・カタログ順に並び、逐次実行と同一になる。

use crate::name::NameNormalizer;
use crate::similarity::Similarity;
use crate::types::{Component, Synergy};
use crate::window::WindowMatcher;
use rayon::prelude::*;
use tracing::debug;

/// 同一原料か（正規化した英名で比較。露名が一致する場合も同一とみなす）
///
/// 英名が空同士の場合は露名も一致するときだけ同一とみなす。
pub fn is_same_component(a: &Component, b: &Component, normalizer: &NameNormalizer) -> bool {
    let eng_a = normalizer.normalize(&a.name_eng);
    let eng_b = normalizer.normalize(&b.name_eng);
    let rus_a = normalizer.normalize(&a.name_rus);
    let rus_b = normalizer.normalize(&b.name_rus);

    if eng_a.is_empty() && eng_b.is_empty() {
        return rus_a == rus_b;
    }

    eng_a == eng_b || (!rus_a.is_empty() && rus_a == rus_b)
}

pub struct SynergyFinder<'a> {
    similarity: &'a dyn Similarity,
    normalizer: &'a NameNormalizer,
    threshold: u8,
}

impl<'a> SynergyFinder<'a> {
    pub fn new(similarity: &'a dyn Similarity, normalizer: &'a NameNormalizer, threshold: u8) -> Self {
        Self {
            similarity,
            normalizer,
            threshold,
        }
    }

    /// `source` の説明文に `candidate` が言及されていればシナジーを返す
    pub fn find(&self, source: &Component, candidate: &Component) -> Option<Synergy> {
        if is_same_component(source, candidate, self.normalizer) {
            return None;
        }

        let matcher = WindowMatcher::new(self.similarity, self.normalizer, self.threshold);
        let entry = matcher
            .best_match(&source.description, &candidate.name_eng)
            .or_else(|| matcher.best_match(&source.description, &candidate.name_rus))?;

        debug!(
            source = %source,
            synergent = %candidate,
            entry = %entry.text,
            weight = entry.score,
            "synergy found"
        );

        Some(Synergy {
            source: source.clone(),
            synergent: candidate.clone(),
            entry: entry.text,
            weight: entry.score,
        })
    }

    /// 発見集合の各原料についてカタログ全体を走査する
    ///
    /// `on_source` はソース1件の走査が終わるたびに呼ばれる（呼び出し順は不定）。
    pub fn discover<F>(&self, found: &[&Component], catalog: &[Component], on_source: F) -> Vec<Synergy>
    where
        F: Fn(&Component) + Sync,
    {
        found
            .par_iter()
            .map(|source| {
                let synergies: Vec<Synergy> = catalog
                    .iter()
                    .filter_map(|candidate| self.find(source, candidate))
                    .collect();
                on_source(source);
                synergies
            })
            .collect::<Vec<_>>()
            .into_iter()
            .flatten()
            .collect()
    }
}
