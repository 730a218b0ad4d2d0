use tracing_subscriber::EnvFilter;

/// ログ出力を初期化する
///
/// `RUST_LOG` があればそれを優先し、無ければ `--verbose` で debug、通常は warn。
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("contract_analyzer={default_level},contract_analyzer_common={default_level}")));

    // テストなどで二重初期化されても落とさない
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}
