use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "parfy")]
#[command(about = "香料ノート → 原料のあいまい照合・シナジー探索ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 進捗バーを表示しない
    #[arg(short, long, global = true)]
    pub quiet: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// ノートに一致する原料とシナジーを探索
    Analyse {
        /// カタログファイル（CSV/XLSX、省略時はカレントの最新 parfy_source_*）
        #[arg(long)]
        src: Option<PathBuf>,

        /// ノート（カンマ区切り、"мох-абсолют" で除外指定）。省略時は対話入力
        #[arg(short, long)]
        notes: Option<String>,

        /// 出力先（省略時は parfy_analysis_<日時>）
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// 出力形式 (csv/json/excel/all)
        #[arg(short, long, default_value = "csv")]
        format: ReportFormat,

        /// 単語照合の閾値（1-100）
        #[arg(long)]
        token_threshold: Option<u8>,

        /// 窓照合の閾値（1-100）
        #[arg(long)]
        window_threshold: Option<u8>,

        /// 追加の禁止トークン（複数指定可）
        #[arg(long = "exclude")]
        exclude: Vec<String>,
    },

    /// 取得済みカタログを整形して parfy_source_<日時>.csv を作成
    Import {
        /// 入力カタログ（CSV/XLSX）
        #[arg(required = true)]
        input: PathBuf,

        /// 出力ディレクトリ（省略時はカレント）
        #[arg(short, long)]
        out: Option<PathBuf>,

        /// 追加の禁止トークン（複数指定可）
        #[arg(long = "ban")]
        ban: Vec<String>,
    },

    /// 設定を表示/編集
    Config {
        /// 設定を表示
        #[arg(long)]
        show: bool,

        /// 単語照合の閾値を保存
        #[arg(long)]
        token_threshold: Option<u8>,

        /// 窓照合の閾値を保存
        #[arg(long)]
        window_threshold: Option<u8>,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ReportFormat {
    #[default]
    Csv,
    Json,
    Excel,
    All,
}

impl std::str::FromStr for ReportFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "csv" => Ok(ReportFormat::Csv),
            "json" => Ok(ReportFormat::Json),
            "excel" | "xlsx" => Ok(ReportFormat::Excel),
            "all" => Ok(ReportFormat::All),
            _ => Err(format!("Unknown format: {}. Use csv, json, excel, or all", s)),
        }
    }
}

impl std::fmt::Display for ReportFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReportFormat::Csv => write!(f, "csv"),
            ReportFormat::Json => write!(f, "json"),
            ReportFormat::Excel => write!(f, "excel"),
            ReportFormat::All => write!(f, "all"),
        }
    }
}
