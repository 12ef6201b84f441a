use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Filter directive for the CLI: `--verbose` beats the config level, which
/// beats the `info` default.
pub fn filter_directive(verbose: bool, config_level: Option<&str>) -> String {
    match (verbose, config_level) {
        (true, _) => "voice_expense=debug,info".to_string(),
        (false, Some(level)) => format!("voice_expense={}", level),
        (false, None) => "voice_expense=info".to_string(),
    }
}

/// 安裝全域 subscriber；`RUST_LOG` 有設定時優先於 `directive`
pub fn init_logger(directive: &str, format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive));

    // stdout 留給解析結果
    let layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false);

    let registry = tracing_subscriber::registry().with(filter);
    match format {
        LogFormat::Compact => registry.with(layer.compact()).init(),
        LogFormat::Json => registry.with(layer.json()).init(),
    }
}
