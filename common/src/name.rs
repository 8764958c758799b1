//! 名称の正規化
//!
//! 原料名・検索句を比較可能な形に揃える。
//!
//! ## 処理フロー
//! 1. 小文字化
//! 2. ラテン文字・キリル文字・空白以外を空白に置換
//! 3. 語彙リスト（ブランド名・単位・汎用語）に一致する語の並びを除去
//! 4. 連続空白の統一・前後の空白除去
//!
//! 3と4は変化がなくなるまで繰り返すため、結果は冪等になる。

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref NON_LETTER_RE: Regex = Regex::new(r"[^\p{Latin}\p{Cyrillic} ]+").unwrap();
    static ref SPACES_RE: Regex = Regex::new(r" {2,}").unwrap();
}

/// 小文字の文字と単一の空白だけからなる文字列に変換する
pub fn canonicalize(text: &str) -> String {
    let lower = text.to_lowercase();
    let letters = NON_LETTER_RE.replace_all(&lower, " ");
    SPACES_RE.replace_all(&letters, " ").trim().to_string()
}

/// `canonicalize` した結果を語に分割する
pub fn canonical_words(text: &str) -> Vec<String> {
    canonicalize(text)
        .split(' ')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// ノイズ語彙を除去する正規化器
#[derive(Debug, Clone, Default)]
pub struct NameNormalizer {
    /// 語彙ごとの語の並び（長いものを優先して照合）
    strip_tokens: Vec<Vec<String>>,
}

impl NameNormalizer {
    pub fn new<I, S>(vocabulary: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut strip_tokens: Vec<Vec<String>> = vocabulary
            .into_iter()
            .map(|token| canonical_words(token.as_ref()))
            .filter(|words| !words.is_empty())
            .collect();
        strip_tokens.sort_by(|a, b| b.len().cmp(&a.len()));
        strip_tokens.dedup();

        Self { strip_tokens }
    }

    /// 正規化（冪等）
    pub fn normalize(&self, phrase: &str) -> String {
        let mut words = canonical_words(phrase);

        loop {
            let stripped = self.strip_once(&words);
            if stripped.len() == words.len() {
                break;
            }
            words = stripped;
        }

        words.join(" ")
    }

    /// 正規化後の語数
    pub fn word_count(&self, phrase: &str) -> usize {
        let normalized = self.normalize(phrase);
        normalized.split(' ').filter(|w| !w.is_empty()).count()
    }

    fn strip_once(&self, words: &[String]) -> Vec<String> {
        let mut kept = Vec::with_capacity(words.len());
        let mut i = 0;

        while i < words.len() {
            let matched = self
                .strip_tokens
                .iter()
                .find(|token| words[i..].starts_with(token.as_slice()))
                .map(|token| token.len());

            match matched {
                Some(len) => i += len,
                None => {
                    kept.push(words[i].clone());
                    i += 1;
                }
            }
        }

        kept
    }
}
