//! 集計の型定義
//!
//! CLIと表示層で共有される型:
//! - CellValue / Record: 取り込み済みの表データ（1行 = 1レコード）
//! - MatchRecord: キーワード一致1件
//! - TallyResult: 1回の集計結果（JSONでそのまま受け渡し可能）

use crate::keywords::EquipmentKeywordTable;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};

/// セルの値
///
/// 取り込み層では文字列・数値・空のいずれか。
/// それ以外（真偽値、配列など）は空として扱う。
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(from = "serde_json::Value")]
pub enum CellValue {
    Text(String),
    Number(f64),
    #[default]
    Empty,
}

impl CellValue {
    /// 照合用の文字列に変換（変換ルールはここだけ）
    pub fn as_text(&self) -> String {
        match self {
            CellValue::Text(s) => s.clone(),
            CellValue::Number(n) => n.to_string(),
            CellValue::Empty => String::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        match self {
            CellValue::Text(s) => s.is_empty(),
            CellValue::Number(_) => false,
            CellValue::Empty => true,
        }
    }
}

impl From<serde_json::Value> for CellValue {
    fn from(value: serde_json::Value) -> Self {
        match value {
            serde_json::Value::String(s) => CellValue::Text(s),
            serde_json::Value::Number(n) => n.as_f64().map(CellValue::Number).unwrap_or_default(),
            _ => CellValue::Empty,
        }
    }
}

impl Serialize for CellValue {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            CellValue::Text(s) => serializer.serialize_str(s),
            CellValue::Number(n) => serializer.serialize_f64(*n),
            CellValue::Empty => serializer.serialize_none(),
        }
    }
}

impl From<&str> for CellValue {
    fn from(s: &str) -> Self {
        CellValue::Text(s.to_string())
    }
}

impl From<String> for CellValue {
    fn from(s: String) -> Self {
        CellValue::Text(s)
    }
}

impl From<f64> for CellValue {
    fn from(n: f64) -> Self {
        CellValue::Number(n)
    }
}

impl From<i64> for CellValue {
    fn from(n: i64) -> Self {
        CellValue::Number(n as f64)
    }
}

impl std::fmt::Display for CellValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_text())
    }
}

/// 表データの1行（列名 → セル値、列は取り込み時の順）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(IndexMap<String, CellValue>);

impl Record {
    pub fn new() -> Self {
        Self::default()
    }

    /// 列を追加して返す（テスト・取り込み用）
    pub fn with(mut self, column: impl Into<String>, value: impl Into<CellValue>) -> Self {
        self.insert(column, value);
        self
    }

    pub fn insert(&mut self, column: impl Into<String>, value: impl Into<CellValue>) {
        self.0.insert(column.into(), value.into());
    }

    pub fn cell(&self, column: &str) -> Option<&CellValue> {
        self.0.get(column)
    }

    /// 照合対象のテキスト（小文字化済み、列がなければ空文字）
    pub fn cell_text(&self, column: &str) -> String {
        self.cell(column)
            .map(CellValue::as_text)
            .unwrap_or_default()
            .to_lowercase()
    }

    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>, V: Into<CellValue>> FromIterator<(K, V)> for Record {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut record = Record::new();
        for (column, value) in iter {
            record.insert(column, value);
        }
        record
    }
}

/// キーワード一致1件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchRecord {
    /// レコード番号（1始まり）
    pub record_index: usize,
    pub column: String,
    /// 元のセル値（列がない場合はEmpty）
    pub original_value: CellValue,
    pub matched_keyword: String,
    /// 走査した小文字化済みテキスト
    pub full_cell_value: String,
}

/// 数え方
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CountingMode {
    /// キーワード一致ごとに1件（既定、チャートの件数）
    #[default]
    Occurrences,
    /// 設備種別ごとに1レコード1件まで
    DistinctRecords,
}

impl std::fmt::Display for CountingMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CountingMode::Occurrences => write!(f, "一致ごと"),
            CountingMode::DistinctRecords => write!(f, "1レコード1件"),
        }
    }
}

/// 設備種別ごとの集計
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EquipmentTally {
    pub equipment_type: String,
    pub count: usize,
    pub matches: Vec<MatchRecord>,
}

impl EquipmentTally {
    pub fn new(equipment_type: impl Into<String>) -> Self {
        Self {
            equipment_type: equipment_type.into(),
            count: 0,
            matches: Vec::new(),
        }
    }

    /// 件数と一致リストは必ず同時に更新する
    pub(crate) fn record(&mut self, matched: MatchRecord) {
        self.count += 1;
        self.matches.push(matched);
    }

    /// 一致したレコードの実数
    pub fn distinct_records(&self) -> usize {
        let mut indices: Vec<usize> = self.matches.iter().map(|m| m.record_index).collect();
        indices.sort_unstable();
        indices.dedup();
        indices.len()
    }
}

/// 1回分の集計結果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyResult {
    pub total_records: usize,
    pub search_columns: Vec<String>,
    pub keyword_table: EquipmentKeywordTable,
    /// キーワード表の順
    pub equipment: Vec<EquipmentTally>,
    /// 表示用の先頭レコード
    pub sample_records: Vec<Record>,
    #[serde(default)]
    pub mode: CountingMode,
}

impl TallyResult {
    pub fn tally_for(&self, equipment_type: &str) -> Option<&EquipmentTally> {
        self.equipment.iter().find(|e| e.equipment_type == equipment_type)
    }

    /// 未知の種別は0
    pub fn count(&self, equipment_type: &str) -> usize {
        self.tally_for(equipment_type).map(|e| e.count).unwrap_or(0)
    }

    pub fn matches(&self, equipment_type: &str) -> &[MatchRecord] {
        self.tally_for(equipment_type)
            .map(|e| e.matches.as_slice())
            .unwrap_or(&[])
    }

    pub fn counts(&self) -> Vec<(&str, usize)> {
        self.equipment
            .iter()
            .map(|e| (e.equipment_type.as_str(), e.count))
            .collect()
    }

    pub fn total_matches(&self) -> usize {
        self.equipment.iter().map(|e| e.count).sum()
    }

    pub fn has_matches(&self) -> bool {
        self.total_matches() > 0
    }
}
