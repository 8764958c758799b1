//! ログ初期化
//!
//! 診断ログは tracing で stderr に出す。標準出力は進捗表示用。
//! `RUST_LOG` が設定されていればそちらを優先する。

use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// 既定のフィルタ（`--verbose` で debug に上げる）
pub fn default_directive(verbose: bool) -> &'static str {
    if verbose {
        "parfy=debug,parfy_common=debug"
    } else {
        "parfy=warn,parfy_common=warn"
    }
}

pub fn init(verbose: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_directive(verbose)));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .compact()
                .with_target(false)
                .with_writer(std::io::stderr),
        )
        .try_init()
        .ok();
}
