use clap::Parser;
use contract_analyzer::{cli, client, config, error, logging, report, scanner, selector};
use cli::{Cli, Commands};
use config::Config;
use contract_analyzer_common::{Action, AnalysisResponse, ColorMap, UploadOutcome, ViewState};
use error::Result;
use indicatif::ProgressBar;
use report::Expansion;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli).await {
        eprintln!("❌ {}", e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::load()?;

    match cli.command {
        Commands::Analyze { file, view, expand, expand_all, output_dir, no_download, json_out } => {
            println!("📑 contract-analyzer - 契約書解析\n");

            let origin = config.resolve_origin(cli.backend.as_deref())?;
            let client = client::BackendClient::new(&origin, Duration::from_secs(config.timeout_seconds))?;

            // 1. ファイル決定（未指定ならカレントから選択）
            let file = match file {
                Some(path) => Some(path),
                None => {
                    let documents = scanner::scan_documents(Path::new("."))?;
                    selector::select_document(&documents)?
                }
            };

            // 2. アップロード
            let spinner = ProgressBar::new_spinner();
            spinner.set_message(format!("Uploading to {} ...", client.origin()));
            spinner.enable_steady_tick(Duration::from_millis(120));
            let result = client.submit(file.as_deref()).await;
            spinner.finish_and_clear();

            let outcome = result?;
            println!("解析日時: {}\n", chrono::Local::now().format("%Y-%m-%d %H:%M:%S"));

            // 3. 結果保存
            if let Some(path) = json_out {
                let json = serde_json::to_string_pretty(&outcome.response)?;
                std::fs::write(&path, json)?;
                println!("✔ 結果を保存: {}\n", path.display());
            }

            // 4. 修正版契約書のダウンロード
            if !no_download {
                download_modified(&client, &outcome, output_dir.or(config.download_dir.clone())).await;
            }

            let mut state = ViewState::default();
            state.apply(Action::Succeeded(outcome));
            let expansion = Expansion::from_args(expand, expand_all);
            print!("{}", report::render(&view.views(), &state, &mut ColorMap::new(), &expansion));
        }

        Commands::Report { input, view, expand, expand_all } => {
            let content = std::fs::read_to_string(&input)?;
            let response: AnalysisResponse = serde_json::from_str(&content)?;
            let origin = config.resolve_origin(cli.backend.as_deref())?;

            let mut state = ViewState::default();
            state.apply(Action::Succeeded(UploadOutcome::new(&origin, response)));

            let expansion = Expansion::from_args(expand, expand_all);
            print!("{}", report::render(&view.views(), &state, &mut ColorMap::new(), &expansion));
        }

        Commands::Config { set_backend, show } => {
            let mut config = config;

            if let Some(origin) = set_backend {
                config.set_backend(&origin)?;
                println!("✔ バックエンドを設定しました: {}", config.backend_origin);
            }

            if show {
                println!("設定:");
                println!("  ファイル: {}", Config::config_path()?.display());
                println!("  バックエンド: {}", config.backend_origin);
                println!("  実効オリジン: {}", config.resolve_origin(cli.backend.as_deref())?);
                println!("  タイムアウト: {}秒", config.timeout_seconds);
                println!(
                    "  保存先: {}",
                    config
                        .download_dir
                        .as_ref()
                        .map(|d| d.display().to_string())
                        .unwrap_or_else(|| "カレントディレクトリ".into())
                );
            }
        }
    }

    Ok(())
}

/// 修正版があれば保存する。失敗しても解析結果の表示は続ける
async fn download_modified(client: &client::BackendClient, outcome: &UploadOutcome, dir: Option<PathBuf>) {
    let (Some(notice), Some(file_name)) = (&outcome.download, outcome.download_file_name()) else {
        return;
    };

    let dir = dir.unwrap_or_else(|| PathBuf::from("."));
    match client.download(notice, &dir, &file_name).await {
        Ok(path) => println!("✔ 修正版契約書を保存: {}\n", path.display()),
        Err(e) => {
            tracing::warn!(error = %e, "modified contract download failed");
            println!("⚠ 修正版契約書を保存できませんでした: {}\n", e);
        }
    }
}
