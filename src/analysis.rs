//! 集計の実行
//!
//! 取り込みファイルの決定 → 読み込み → 検索列選択 → 集計 → 診断。
//! データがない場合のエラーはここで返し、集計処理には渡さない。

use crate::error::Result;
use crate::importer::{self, Dataset};
use crate::storage;
use equipment_tally_common::{
    diagnose, select_search_columns, tally_with, CountingMode, Diagnosis, EquipmentKeywordTable,
    TallyOptions, TallyResult,
};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// 集計条件
#[derive(Debug, Clone, Default)]
pub struct AnalysisRequest {
    /// 直接指定されたファイル
    pub input: Option<PathBuf>,
    /// input がない場合に探すフォルダ
    pub data_dir: Option<PathBuf>,
    pub keywords_path: Option<PathBuf>,
    pub options: TallyOptions,
}

#[derive(Debug, Clone)]
pub struct Analysis {
    pub source: String,
    pub columns: Vec<String>,
    pub result: TallyResult,
    pub diagnosis: Diagnosis,
}

/// キーワード表を読み込む（指定なしは組み込み表）
pub fn load_keyword_table(path: Option<&Path>) -> Result<EquipmentKeywordTable> {
    match path {
        Some(path) => {
            debug!(path = %path.display(), "loading keyword table");
            Ok(EquipmentKeywordTable::from_file(path)?)
        }
        None => Ok(EquipmentKeywordTable::reference()),
    }
}

/// 対象ファイルを決める
pub fn resolve_input(request: &AnalysisRequest) -> Result<PathBuf> {
    if let Some(input) = &request.input {
        return Ok(input.clone());
    }

    let dir = match &request.data_dir {
        Some(dir) => dir.clone(),
        None => crate::config::Config::load()?.data_dir()?,
    };
    let latest = storage::latest_imported_file(&dir)?;
    info!(file = %latest.file_name, "using latest imported file");
    Ok(latest.path)
}

/// 読み込み済みデータを集計する
pub fn analyze_dataset(
    dataset: &Dataset,
    keyword_table: &EquipmentKeywordTable,
    options: &TallyOptions,
) -> Analysis {
    let search_columns = select_search_columns(&dataset.columns);
    debug!(?search_columns, "search columns selected");

    let result = tally_with(&dataset.records, &search_columns, keyword_table, options);
    let diagnosis = diagnose(&result);

    info!(
        records = result.total_records,
        matches = result.total_matches(),
        distinct = options.mode == CountingMode::DistinctRecords,
        "tally finished"
    );

    Analysis {
        source: dataset.source.clone(),
        columns: dataset.columns.clone(),
        result,
        diagnosis,
    }
}

/// ファイルを決めて集計まで行う
pub fn run_analysis(request: &AnalysisRequest) -> Result<Analysis> {
    let keyword_table = load_keyword_table(request.keywords_path.as_deref())?;
    let input = resolve_input(request)?;
    let dataset = importer::load_dataset(&input)?.require_records()?;

    Ok(analyze_dataset(&dataset, &keyword_table, &request.options))
}
