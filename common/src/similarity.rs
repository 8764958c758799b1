//! 類似度（0〜100）の算出
//!
//! 照合器は `Similarity` トレイト越しに類似度を取得する。
//! 既定は正規化レーベンシュタイン距離（strsim）。

use strsim::normalized_levenshtein;

/// 2つの文字列の類似度を 0〜100 の整数で返す
pub trait Similarity: Send + Sync {
    fn ratio(&self, a: &str, b: &str) -> u8;
}

/// 編集距離ベースの類似度
#[derive(Debug, Clone, Copy, Default)]
pub struct LevenshteinRatio;

impl Similarity for LevenshteinRatio {
    fn ratio(&self, a: &str, b: &str) -> u8 {
        if a == b {
            return 100;
        }
        if a.is_empty() || b.is_empty() {
            return 0;
        }

        let score = (normalized_levenshtein(a, b) * 100.0).round();
        score.clamp(0.0, 100.0) as u8
    }
}

impl<F> Similarity for F
where
    F: Fn(&str, &str) -> u8 + Send + Sync,
{
    fn ratio(&self, a: &str, b: &str) -> u8 {
        self(a, b).min(100)
    }
}
