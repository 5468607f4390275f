//! キーワード集計
//!
//! レコード × 検索列 × 設備種別 × キーワード の順に走査し、
//! セル文字列にキーワードが部分一致するたびに1件数える。
//! キーワード同士に排他や最長一致はないので、"evaporator coil" を含む
//! セルは "coil" と "evaporator coil" の2件になる。

use crate::keywords::EquipmentKeywordTable;
use crate::types::{CountingMode, EquipmentTally, MatchRecord, Record, TallyResult};

/// 表示用に保持する先頭レコード数
pub const DEFAULT_SAMPLE_SIZE: usize = 10;

/// 集計オプション
#[derive(Debug, Clone)]
pub struct TallyOptions {
    pub mode: CountingMode,
    pub sample_size: usize,
}

impl Default for TallyOptions {
    fn default() -> Self {
        Self {
            mode: CountingMode::Occurrences,
            sample_size: DEFAULT_SAMPLE_SIZE,
        }
    }
}

/// 既定オプションで集計する
pub fn tally(
    records: &[Record],
    search_columns: &[String],
    keyword_table: &EquipmentKeywordTable,
) -> TallyResult {
    tally_with(records, search_columns, keyword_table, &TallyOptions::default())
}

/// 集計する
///
/// # Arguments
/// * `records` - 取り込み済みのレコード
/// * `search_columns` - 検索対象列（重複はそれぞれ走査する）
/// * `keyword_table` - 設備キーワード表
/// * `options` - 数え方・サンプル件数
pub fn tally_with(
    records: &[Record],
    search_columns: &[String],
    keyword_table: &EquipmentKeywordTable,
    options: &TallyOptions,
) -> TallyResult {
    let mut equipment: Vec<EquipmentTally> = keyword_table
        .labels()
        .map(EquipmentTally::new)
        .collect();

    for (i, record) in records.iter().enumerate() {
        let record_index = i + 1;

        for column in search_columns {
            let cell_text = record.cell_text(column);

            for (entry, slot) in keyword_table.entries().iter().zip(equipment.iter_mut()) {
                for keyword in &entry.keywords {
                    if !cell_text.contains(keyword.as_str()) {
                        continue;
                    }

                    if options.mode == CountingMode::DistinctRecords
                        && slot.matches.last().is_some_and(|m| m.record_index == record_index)
                    {
                        continue;
                    }

                    slot.record(MatchRecord {
                        record_index,
                        column: column.clone(),
                        original_value: record.cell(column).cloned().unwrap_or_default(),
                        matched_keyword: keyword.clone(),
                        full_cell_value: cell_text.clone(),
                    });
                }
            }
        }
    }

    TallyResult {
        total_records: records.len(),
        search_columns: search_columns.to_vec(),
        keyword_table: keyword_table.clone(),
        equipment,
        sample_records: records.iter().take(options.sample_size).cloned().collect(),
        mode: options.mode,
    }
}
