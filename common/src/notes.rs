//! ノート入力の正規化
//!
//! `"мох-абсолют, iso super"` のようなカンマ区切りの入力を検索語に分解する。
//!
//! - カンマで区切り、前後の空白を除去
//! - ハイフン以降はその語の除外トークン
//! - 複数語のノートは句として検索し、さらに各語も個別の検索語にする
//!   （個別語は全ノートの後ろに、同じ除外トークンを引き継いで追加）
//! - すべて小文字化し、(テキスト, 除外) の重複は除去

use crate::types::SearchTerm;
use std::collections::HashSet;

/// ノート入力を検索語の一覧に変換する
///
/// 空入力は空の一覧を返す（呼び出し側で利用者エラーとして扱う）。
pub fn parse_notes(input: &str) -> Vec<SearchTerm> {
    let notes: Vec<SearchTerm> = input
        .split(',')
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .filter_map(parse_note)
        .collect();

    let words: Vec<SearchTerm> = notes
        .iter()
        .filter(|note| note.is_phrase())
        .flat_map(|note| {
            note.text
                .split(' ')
                .map(|word| SearchTerm::new(word).with_exclude(note.exclude.iter().cloned()))
                .collect::<Vec<_>>()
        })
        .collect();

    let mut seen = HashSet::new();
    notes
        .into_iter()
        .chain(words)
        .filter(|term| seen.insert(term.clone()))
        .collect()
}

/// `"<ノート>-<除外1>-<除外2>"` を1つの検索語にする
fn parse_note(piece: &str) -> Option<SearchTerm> {
    let mut segments = piece.split('-');
    let text = segments
        .next()
        .map(|s| s.split_whitespace().collect::<Vec<_>>().join(" ").to_lowercase())
        .unwrap_or_default();

    if text.is_empty() {
        return None;
    }

    let exclude = segments
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty());

    Some(SearchTerm::new(text).with_exclude(exclude))
}
