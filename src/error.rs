use thiserror::Error;

#[derive(Error, Debug)]
pub enum TallyError {
    #[error("設定エラー: {0}")]
    Config(String),

    #[error("ファイルが見つかりません: {0}")]
    FileNotFound(String),

    #[error("取り込みフォルダが見つかりません: {0}")]
    DataDirNotFound(String),

    #[error("取り込み済みファイルがありません: {0}")]
    NoImportedFiles(String),

    #[error("データがありません（0件）: {0}")]
    EmptyDataset(String),

    #[error("対応していないファイル形式です: {0}（.json/.xlsx/.xlsm/.xls/.ods）")]
    UnsupportedFormat(String),

    #[error("スプレッドシート読み込みエラー: {0}")]
    Spreadsheet(String),

    #[error("Excel生成エラー: {0}")]
    ExcelExport(String),

    #[error("JSON解析エラー: {0}")]
    JsonParse(#[from] serde_json::Error),

    #[error("IOエラー: {0}")]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Common(#[from] equipment_tally_common::Error),
}

impl TallyError {
    /// データが用意できていない（0件の集計結果とは区別する）
    pub fn is_input_unavailable(&self) -> bool {
        matches!(
            self,
            TallyError::DataDirNotFound(_)
                | TallyError::NoImportedFiles(_)
                | TallyError::EmptyDataset(_)
                | TallyError::FileNotFound(_)
        )
    }
}

pub type Result<T> = std::result::Result<T, TallyError>;
