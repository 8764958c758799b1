//! indicatif による進捗表示

use indicatif::{ProgressBar, ProgressStyle};
use parfy_common::{AnalysisProgress, Component, SearchTerm};

/// ノート照合とシナジー探索の2本のバー
pub struct BarProgress {
    notes: ProgressBar,
    synergy: ProgressBar,
    catalog_len: u64,
}

impl BarProgress {
    /// `quiet` なら何も描画しない
    pub fn new(terms: usize, catalog_len: usize, quiet: bool) -> Self {
        let catalog_len = catalog_len as u64;
        let (notes, synergy) = if quiet {
            (ProgressBar::hidden(), ProgressBar::hidden())
        } else {
            (
                ProgressBar::new(terms as u64 * catalog_len),
                ProgressBar::hidden(),
            )
        };
        notes.set_style(style("{spinner} ノート照合 [{bar:30}] {pos}/{len} {msg}"));

        Self {
            notes,
            synergy,
            catalog_len,
        }
    }

    pub fn finish(&self) {
        self.notes.finish_and_clear();
        self.synergy.finish_and_clear();
    }
}

fn style(template: &str) -> ProgressStyle {
    ProgressStyle::with_template(template)
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("=> ")
}

impl AnalysisProgress for BarProgress {
    fn note_started(&self, index: usize, _total: usize, term: &SearchTerm) {
        self.notes.set_position(index as u64 * self.catalog_len);
        self.notes.set_message(term.text.clone());
    }

    fn component_checked(&self, _component: &Component, _matched: bool) {
        self.notes.inc(1);
    }

    fn synergy_started(&self, sources: usize) {
        self.notes.finish_and_clear();
        if self.notes.is_hidden() {
            return;
        }
        self.synergy.set_draw_target(indicatif::ProgressDrawTarget::stderr());
        self.synergy.set_length(sources as u64);
        self.synergy
            .set_style(style("{spinner} シナジー探索 [{bar:30}] {pos}/{len} {msg}"));
    }

    fn synergy_source_done(&self, source: &Component) {
        self.synergy.set_message(source.display_name().to_string());
        self.synergy.inc(1);
    }
}
