use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "equipment-tally")]
#[command(about = "設備メンテナンス記録の件数集計・差異診断ツール", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// 詳細ログを出力
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// 取り込みファイルの設備件数を集計
    Analyze {
        /// 取り込みファイル（省略時は取り込みフォルダの最新ファイル）
        input: Option<PathBuf>,

        /// 取り込みフォルダ
        #[arg(short, long)]
        data_dir: Option<PathBuf>,

        /// カスタムキーワード表（JSON）
        #[arg(short, long)]
        keywords: Option<PathBuf>,

        /// 明細を表示する設備種別（デフォルト: 設定値 / Coils）
        #[arg(long)]
        highlight: Option<String>,

        /// 1レコードを設備種別ごとに1件まで数える
        #[arg(long)]
        distinct: bool,

        /// 保持する先頭レコード数
        #[arg(long)]
        sample_size: Option<usize>,

        /// 出力形式 (text/json)
        #[arg(short, long, default_value = "text")]
        format: OutputFormat,

        /// 出力ファイル（省略時は標準出力）
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Excelにも書き出す
        #[arg(long)]
        excel: Option<PathBuf>,
    },

    /// 検索対象列を表示
    Columns {
        /// 取り込みファイル
        #[arg(required = true)]
        input: PathBuf,
    },

    /// キーワード表を表示
    Keywords {
        /// カスタムキーワード表（JSON）
        #[arg(short, long)]
        keywords: Option<PathBuf>,
    },

    /// 手作業の件数とチャートの件数が違う理由を表示
    Explain,

    /// 設定を表示/編集
    Config {
        /// 取り込みフォルダを設定
        #[arg(long)]
        set_data_dir: Option<PathBuf>,

        /// 設定を表示
        #[arg(long)]
        show: bool,
    },
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

impl std::str::FromStr for OutputFormat {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "text" | "txt" => Ok(OutputFormat::Text),
            "json" => Ok(OutputFormat::Json),
            _ => Err(format!("Unknown format: {}. Use text or json", s)),
        }
    }
}

impl std::fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputFormat::Text => write!(f, "text"),
            OutputFormat::Json => write!(f, "json"),
        }
    }
}
