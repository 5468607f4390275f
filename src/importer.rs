//! 表データの取り込み
//!
//! 取り込み済みファイルを列名とレコードの一覧に展開する。
//! - JSON: `{"columns": [...], "records": [...]}` またはレコードの配列
//! - スプレッドシート: 先頭シートの1行目を列名、2行目以降をレコードとする

use crate::error::{Result, TallyError};
use calamine::{open_workbook_auto, Data, Reader};
use equipment_tally_common::{CellValue, Record};
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

pub const SPREADSHEET_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xls", "ods"];
pub const JSON_EXTENSIONS: &[&str] = &["json"];

/// 取り込み済みの表データ
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Dataset {
    pub source: String,
    pub columns: Vec<String>,
    pub records: Vec<Record>,
}

impl Dataset {
    /// 0件なら EmptyDataset（0件一致の集計結果と区別するため）
    pub fn require_records(self) -> Result<Self> {
        if self.records.is_empty() {
            return Err(TallyError::EmptyDataset(self.source));
        }
        Ok(self)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum JsonDataset {
    Table {
        columns: Vec<String>,
        records: Vec<Record>,
    },
    Rows(Vec<Record>),
}

/// 拡張子が取り込み対象か
pub fn is_supported(path: &Path) -> bool {
    normalized_extension(path)
        .map(|ext| {
            SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) || JSON_EXTENSIONS.contains(&ext.as_str())
        })
        .unwrap_or(false)
}

fn normalized_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|ext| ext.to_ascii_lowercase())
}

/// ファイルを読み込む
pub fn load_dataset(path: &Path) -> Result<Dataset> {
    if !path.exists() {
        return Err(TallyError::FileNotFound(path.display().to_string()));
    }

    let ext = normalized_extension(path).unwrap_or_default();
    let dataset = if JSON_EXTENSIONS.contains(&ext.as_str()) {
        load_json(path)?
    } else if SPREADSHEET_EXTENSIONS.contains(&ext.as_str()) {
        load_spreadsheet(path)?
    } else {
        return Err(TallyError::UnsupportedFormat(path.display().to_string()));
    };

    debug!(
        source = %dataset.source,
        columns = dataset.columns.len(),
        records = dataset.records.len(),
        "dataset loaded"
    );
    Ok(dataset)
}

fn load_json(path: &Path) -> Result<Dataset> {
    let content = std::fs::read_to_string(path)?;
    let parsed: JsonDataset = serde_json::from_str(&content)?;

    let (columns, records) = match parsed {
        JsonDataset::Table { columns, records } => (columns, records),
        JsonDataset::Rows(records) => (columns_in_first_seen_order(&records), records),
    };

    Ok(Dataset {
        source: path.display().to_string(),
        columns,
        records,
    })
}

/// レコード配列から列名を集める（出現順）
fn columns_in_first_seen_order(records: &[Record]) -> Vec<String> {
    let mut columns: Vec<String> = Vec::new();
    for record in records {
        for column in record.columns() {
            if !columns.iter().any(|c| c == column) {
                columns.push(column.to_string());
            }
        }
    }
    columns
}

fn load_spreadsheet(path: &Path) -> Result<Dataset> {
    let mut workbook = open_workbook_auto(path)
        .map_err(|e| TallyError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let range = workbook
        .worksheet_range_at(0)
        .ok_or_else(|| TallyError::Spreadsheet(format!("シートがありません: {}", path.display())))?
        .map_err(|e| TallyError::Spreadsheet(format!("{}: {}", path.display(), e)))?;

    let mut rows = range.rows();
    let columns: Vec<String> = match rows.next() {
        Some(header) => unique_headers(
            header
                .iter()
                .enumerate()
                .map(|(i, cell)| header_name(i, cell)),
        ),
        None => Vec::new(),
    };

    let mut records = Vec::new();
    for row in rows {
        if row.iter().all(|cell| matches!(cell, Data::Empty)) {
            continue;
        }

        let record: Record = columns
            .iter()
            .zip(row.iter())
            .map(|(column, cell)| (column.clone(), cell_value(cell)))
            .collect();
        records.push(record);
    }

    Ok(Dataset {
        source: path.display().to_string(),
        columns,
        records,
    })
}

fn header_name(index: usize, cell: &Data) -> String {
    let name = cell.to_string().trim().to_string();
    if name.is_empty() {
        format!("Column {}", index + 1)
    } else {
        name
    }
}

/// 同名の列に連番を付ける（"Notes", "Notes (2)"）
///
/// 同名のままだと後の列のセルが前の列を上書きしてしまう。
fn unique_headers(names: impl Iterator<Item = String>) -> Vec<String> {
    let mut headers: Vec<String> = Vec::new();
    for name in names {
        let mut candidate = name.clone();
        let mut n = 2;
        while headers.contains(&candidate) {
            candidate = format!("{} ({})", name, n);
            n += 1;
        }
        headers.push(candidate);
    }
    headers
}

/// セルの型変換（真偽値・エラーは空扱い）
fn cell_value(cell: &Data) -> CellValue {
    match cell {
        Data::String(s) => CellValue::Text(s.clone()),
        Data::Float(f) => CellValue::Number(*f),
        Data::Int(i) => CellValue::Number(*i as f64),
        Data::Bool(_) | Data::Error(_) | Data::Empty => CellValue::Empty,
        other => CellValue::Text(other.to_string()),
    }
}
