//! parfy: 香料ノート → 原料照合ツール
//!
//! 照合コアは parfy-common、このクレートはカタログ入出力・レポート出力・
//! 設定・CLI を担当する。

pub mod catalog;
pub mod cli;
pub mod config;
pub mod error;
pub mod export;
pub mod logging;
pub mod progress;
