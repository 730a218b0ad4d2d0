use clap::{Parser, Subcommand, ValueEnum};
use contract_analyzer_common::View;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "contract-analyzer")]
#[command(about = "契約書AI解析クライアント（条項分類・リスク判定の可視化）", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// 解析バックエンドのオリジン（例: http://127.0.0.1:5000）
    #[arg(long, global = true)]
    pub backend: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 契約書をアップロードして解析結果を表示
    Analyze {
        /// 契約書ファイル（PDF/DOCX）。省略時はカレントから選択
        file: Option<PathBuf>,

        /// 表示する画面
        #[arg(long, default_value = "all")]
        view: ViewArg,

        /// 詳細を展開する条項番号（1始まり、カンマ区切り）
        #[arg(long, value_delimiter = ',')]
        expand: Vec<usize>,

        /// 全条項の詳細を展開
        #[arg(long)]
        expand_all: bool,

        /// 修正版契約書の保存先
        #[arg(short, long)]
        output_dir: Option<PathBuf>,

        /// 修正版契約書をダウンロードしない
        #[arg(long)]
        no_download: bool,

        /// 解析結果JSONの保存先
        #[arg(long)]
        json_out: Option<PathBuf>,
    },

    /// 保存済みの解析結果JSONを表示
    Report {
        /// 入力JSONファイル
        #[arg(required = true)]
        input: PathBuf,

        /// 表示する画面
        #[arg(long, default_value = "all")]
        view: ViewArg,

        /// 詳細を展開する条項番号（1始まり、カンマ区切り）
        #[arg(long, value_delimiter = ',')]
        expand: Vec<usize>,

        /// 全条項の詳細を展開
        #[arg(long)]
        expand_all: bool,
    },

    /// 設定の表示・変更
    Config {
        /// バックエンドのオリジンを保存
        #[arg(long)]
        set_backend: Option<String>,

        /// 現在の設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum ViewArg {
    Home,
    Phase1,
    Phase2,
    All,
}

impl ViewArg {
    /// 表示する画面の一覧
    pub fn views(&self) -> Vec<View> {
        match self {
            ViewArg::Home => vec![View::Home],
            ViewArg::Phase1 => vec![View::Phase1],
            ViewArg::Phase2 => vec![View::Phase2],
            ViewArg::All => View::ALL.to_vec(),
        }
    }
}
