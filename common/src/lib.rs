//! Parfy Common Library
//!
//! ノート → 原料のあいまい照合とシナジー探索の中核。
//! I/Oは行わず、CLIから設定・カタログ・ノートを受け取って結果を返す。

pub mod analyser;
pub mod config;
pub mod error;
pub mod exclusion;
pub mod name;
pub mod notes;
pub mod similarity;
pub mod synergy;
pub mod token;
pub mod types;
pub mod window;

pub use analyser::{AnalysisProgress, Analyser, NoProgress};
pub use config::{MatcherConfig, DEFAULT_BAN_TOKENS, DEFAULT_STRIP_VOCABULARY, DEFAULT_THRESHOLD};
pub use error::{Error, Result};
pub use exclusion::ExclusionFilter;
pub use name::{canonicalize, NameNormalizer};
pub use notes::parse_notes;
pub use similarity::{LevenshteinRatio, Similarity};
pub use synergy::SynergyFinder;
pub use token::TokenMatcher;
pub use types::{
    AnalysisResult, Component, ComponentMatch, MatchEntry, NoteMatches, SearchTerm, Synergy,
    SYNERGY_DEPTH,
};
pub use window::WindowMatcher;
