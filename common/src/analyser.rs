//! ノート → 原料の解析
//!
//! ## 処理フロー
//! 1. ノート入力を検索語に分解
//! 2. 検索語 × 原料ごとに照合（単語は単語照合、句は窓照合の全件収集）
//! 3. 全件禁止ルールで一致を絞り込み
//! 4. 一致した原料の説明文からシナジーを探索（深さ1）
//!
//! コアは出力を行わない。進捗は `AnalysisProgress` で、診断は tracing で通知する。

use crate::config::MatcherConfig;
use crate::error::Result;
use crate::exclusion::ExclusionFilter;
use crate::name::NameNormalizer;
use crate::notes::parse_notes;
use crate::similarity::{LevenshteinRatio, Similarity};
use crate::synergy::SynergyFinder;
use crate::token::TokenMatcher;
use crate::types::{
    AnalysisResult, Component, ComponentMatch, MatchEntry, NoteMatches, SearchTerm, Synergy,
    SYNERGY_DEPTH,
};
use crate::window::WindowMatcher;
use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info};

/// 解析の進捗通知（既定はすべて何もしない）
pub trait AnalysisProgress: Sync {
    /// 検索語の照合を開始する
    fn note_started(&self, _index: usize, _total: usize, _term: &SearchTerm) {}

    /// 原料1件の照合が終わった
    fn component_checked(&self, _component: &Component, _matched: bool) {}

    /// シナジー探索を開始する
    fn synergy_started(&self, _sources: usize) {}

    /// ソース1件のシナジー探索が終わった
    fn synergy_source_done(&self, _source: &Component) {}
}

/// 進捗を通知しない
pub struct NoProgress;

impl AnalysisProgress for NoProgress {}

/// 解析器
pub struct Analyser {
    config: MatcherConfig,
    similarity: Arc<dyn Similarity>,
    normalizer: NameNormalizer,
    exclusion: ExclusionFilter,
}

impl Analyser {
    /// 既定の類似度（編集距離）で作成する。設定は即時に検証する。
    pub fn new(config: MatcherConfig) -> Result<Self> {
        Self::with_similarity(config, Arc::new(LevenshteinRatio))
    }

    /// 類似度関数を差し替えて作成する
    pub fn with_similarity(config: MatcherConfig, similarity: Arc<dyn Similarity>) -> Result<Self> {
        config.validate()?;

        let normalizer = config.name_normalizer();
        let exclusion = ExclusionFilter::new(config.global_ban_tokens.iter().cloned());

        Ok(Self {
            config,
            similarity,
            normalizer,
            exclusion,
        })
    }

    pub fn config(&self) -> &MatcherConfig {
        &self.config
    }

    pub fn normalizer(&self) -> &NameNormalizer {
        &self.normalizer
    }

    pub fn exclusion(&self) -> &ExclusionFilter {
        &self.exclusion
    }

    /// 生のノート入力から解析する
    pub fn analyse_notes(&self, catalog: &[Component], notes_input: &str) -> AnalysisResult {
        self.analyse_notes_with_progress(catalog, notes_input, &NoProgress)
    }

    pub fn analyse_notes_with_progress(
        &self,
        catalog: &[Component],
        notes_input: &str,
        progress: &dyn AnalysisProgress,
    ) -> AnalysisResult {
        let terms = parse_notes(notes_input);
        self.analyse_with_progress(catalog, &terms, progress)
    }

    /// 正規化済みの検索語で解析する
    pub fn analyse(&self, catalog: &[Component], terms: &[SearchTerm]) -> AnalysisResult {
        self.analyse_with_progress(catalog, terms, &NoProgress)
    }

    pub fn analyse_with_progress(
        &self,
        catalog: &[Component],
        terms: &[SearchTerm],
        progress: &dyn AnalysisProgress,
    ) -> AnalysisResult {
        info!(terms = terms.len(), components = catalog.len(), "analysis started");

        let mut result = AnalysisResult::default();

        for (index, term) in terms.iter().enumerate() {
            progress.note_started(index, terms.len(), term);

            let components: Vec<ComponentMatch> = catalog
                .iter()
                .filter_map(|component| {
                    let matched = self.match_component(component, term);
                    progress.component_checked(component, matched.is_some());
                    matched
                })
                .collect();

            info!(term = %term.text, matches = components.len(), "note processed");
            result.notes.push(NoteMatches {
                term: term.clone(),
                components,
            });
        }

        let synergies = self.discover_synergies(&result, catalog, progress);
        result.synergies = BTreeMap::from([(SYNERGY_DEPTH, synergies)]);

        info!(
            matches = result.total_matches(),
            synergies = result.synergies_at(SYNERGY_DEPTH).len(),
            "analysis finished"
        );
        result
    }

    /// 1つの原料を1つの検索語で照合する
    ///
    /// 単語は名前・短い説明・説明を単語照合、句は窓照合の全件収集。
    /// 全件禁止ルールを通過した場合のみ `Some`。
    pub fn match_component(&self, component: &Component, term: &SearchTerm) -> Option<ComponentMatch> {
        let fields = [
            component.name_eng.as_str(),
            component.name_rus.as_str(),
            component.short_description.as_str(),
            component.description.as_str(),
        ];

        let entries: Vec<MatchEntry> = if term.is_phrase() {
            let banned = self.exclusion.tokens_for(term);
            let matcher = WindowMatcher::new(
                self.similarity.as_ref(),
                &self.normalizer,
                self.config.window_threshold,
            );
            fields
                .iter()
                .flat_map(|field| matcher.collect_all(field, &term.text, &banned))
                .collect()
        } else {
            let matcher = TokenMatcher::new(self.similarity.as_ref(), self.config.token_threshold);
            fields
                .iter()
                .flat_map(|field| matcher.find(field, &term.text))
                .collect()
        };

        let entries = self.exclusion.apply(entries, term)?;
        debug!(component = %component, term = %term.text, entries = entries.len(), "component matched");

        Some(ComponentMatch {
            component: component.clone(),
            entries,
        })
    }

    fn discover_synergies(
        &self,
        result: &AnalysisResult,
        catalog: &[Component],
        progress: &dyn AnalysisProgress,
    ) -> Vec<Synergy> {
        let found = result.found_components();
        progress.synergy_started(found.len());

        let finder = SynergyFinder::new(
            self.similarity.as_ref(),
            &self.normalizer,
            self.config.window_threshold,
        );
        finder.discover(&found, catalog, |source| progress.synergy_source_done(source))
    }
}
