use anyhow::Context;
use clap::Parser;
use dialoguer::Input;
use parfy::{catalog, cli, config, error, export, logging, progress};
use cli::{Cli, Commands, ReportFormat};
use config::Config;
use error::{ParfyError, Result};
use parfy_common::{parse_notes, Analyser, SYNERGY_DEPTH};
use std::path::{Path, PathBuf};
use tracing::warn;

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    let config = Config::load().context("設定ファイルを読み込めませんでした")?;

    match cli.command {
        Commands::Analyse {
            src,
            notes,
            out,
            format,
            token_threshold,
            window_threshold,
            exclude,
        } => {
            println!("🌿 parfy - ノート解析\n");

            let matcher = config.matcher_with_overrides(token_threshold, window_threshold, &exclude)?;
            let analyser = Analyser::new(matcher)?;

            // 1. カタログ読み込み
            println!("[1/3] カタログを読み込み中...");
            let src = match src {
                Some(path) => path,
                None => catalog::find_latest_catalog(Path::new("."))?,
            };
            let load = catalog::read_catalog(&src)?;
            for warning in &load.warnings {
                println!("  ⚠ {}", warning);
            }
            println!("✔ {}件の原料を読み込み: {}\n", load.components.len(), src.display());

            if load.components.is_empty() {
                warn!(path = %src.display(), "catalog is empty");
                println!("⚠ カタログが空です。空のレポートを出力します\n");
            }

            // 2. 照合
            let notes = match notes {
                Some(notes) => notes,
                None => prompt_notes()?,
            };
            let terms = parse_notes(&notes);
            if terms.is_empty() {
                return Err(ParfyError::EmptyNotes.into());
            }

            println!("[2/3] 照合中...（検索語 {}件）", terms.len());
            let bars = progress::BarProgress::new(terms.len(), load.components.len(), cli.quiet);
            let result = analyser.analyse_with_progress(&load.components, &terms, &bars);
            bars.finish();
            println!(
                "✔ 一致 {}件 / シナジー {}件\n",
                result.total_matches(),
                result.synergies_at(SYNERGY_DEPTH).len()
            );

            // 3. 出力
            println!("[3/3] 結果を保存中... ({})", format);
            let stem = output_stem(out.as_deref());
            for path in export::export_report(&result, format, &stem)? {
                println!("✔ 出力: {}", path.display());
            }

            println!("\n✅ 解析完了");
        }

        Commands::Import { input, out, ban } => {
            println!("📦 parfy - カタログ取り込み\n");

            let matcher = config.matcher_with_overrides(None, None, &ban)?;
            let out_dir = out.unwrap_or_else(|| PathBuf::from("."));
            let output = out_dir.join(catalog::source_file_name(&timestamp()));

            println!("[1/1] {} を整形中...", input.display());
            let report = catalog::import_catalog(&input, &output, &matcher)?;
            for warning in &report.warnings {
                println!("  ⚠ {}", warning);
            }
            println!("✔ {}件を書き出し（禁止トークンで除外 {}件）", report.kept, report.dropped);
            println!("✔ 出力: {}", report.output.display());

            println!("\n✅ 取り込み完了");
        }

        Commands::Config {
            show,
            token_threshold,
            window_threshold,
        } => {
            let mut config = config;
            let changed = token_threshold.is_some() || window_threshold.is_some();

            if let Some(t) = token_threshold {
                config.matcher.token_threshold = t;
            }
            if let Some(t) = window_threshold {
                config.matcher.window_threshold = t;
            }
            if changed {
                config.save()?;
                println!("✔ 設定を保存しました");
            }

            if show || !changed {
                print_config(&config)?;
            }
        }
    }

    Ok(())
}

fn prompt_notes() -> Result<String> {
    let notes: String = Input::new()
        .with_prompt("ノート（カンマ区切り、除外は「мох-абсолют」）")
        .allow_empty(true)
        .interact_text()?;
    Ok(notes)
}

fn timestamp() -> String {
    chrono::Local::now().format("%Y%m%d_%H%M%S").to_string()
}

fn output_stem(out: Option<&Path>) -> PathBuf {
    match out {
        Some(path) => export::stem_from_output(path),
        None => export::default_stem(Path::new("."), &timestamp()),
    }
}

fn print_config(config: &Config) -> Result<()> {
    let matcher = &config.matcher;
    println!("設定: {}", Config::config_path()?.display());
    println!("  単語照合の閾値: {}", matcher.token_threshold);
    println!("  窓照合の閾値: {}", matcher.window_threshold);
    println!("  除去語彙: {}件", matcher.strip_vocabulary.len());
    println!("  禁止トークン: {}件", matcher.global_ban_tokens.len());
    println!("  出力形式の既定: {}", ReportFormat::default());
    Ok(())
}
