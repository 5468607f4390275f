//! 集計結果の表示
//!
//! 件数・検索列・キーワード表・指定種別の明細・内訳をテキストで出力する。
//! JSON出力は TallyReport をそのまま書き出す。

use chrono::Local;
use equipment_tally_common::{Diagnosis, TallyResult};
use serde::Serialize;
use std::fmt::Write;

/// 明細を表示する最大件数
const MAX_DETAIL_ROWS: usize = 50;

/// JSON出力
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TallyReport<'a> {
    pub generated_at: String,
    pub source: &'a str,
    pub result: &'a TallyResult,
    pub diagnosis: &'a Diagnosis,
}

impl<'a> TallyReport<'a> {
    pub fn new(source: &'a str, result: &'a TallyResult, diagnosis: &'a Diagnosis) -> Self {
        Self {
            generated_at: Local::now().format("%Y-%m-%dT%H:%M:%S%:z").to_string(),
            source,
            result,
            diagnosis,
        }
    }
}

/// テキストレポートを生成
pub fn render_text(result: &TallyResult, diagnosis: &Diagnosis, highlight: &str) -> String {
    let mut out = String::new();
    // String への書き込みは失敗しない
    let _ = render(&mut out, result, diagnosis, highlight);
    out
}

fn render(
    out: &mut String,
    result: &TallyResult,
    diagnosis: &Diagnosis,
    highlight: &str,
) -> std::fmt::Result {
    write_summary(out, result)?;
    write_search_columns(out, result, diagnosis)?;
    write_keyword_table(out, result, diagnosis)?;
    write_details(out, result, highlight)?;
    write_breakdown(out, diagnosis)
}

fn write_summary(out: &mut String, result: &TallyResult) -> std::fmt::Result {
    writeln!(out, "走査レコード数: {}", result.total_records)?;
    writeln!(out, "数え方: {}", result.mode)?;
    writeln!(out)?;
    writeln!(out, "設備別件数:")?;
    for tally in &result.equipment {
        writeln!(
            out,
            "  {:<16} {:>5}  ({}レコード)",
            tally.equipment_type,
            tally.count,
            tally.distinct_records()
        )?;
    }
    if !result.has_matches() {
        writeln!(out, "  検索列に設備の記載はありません")?;
    }
    writeln!(out)
}

fn write_search_columns(
    out: &mut String,
    result: &TallyResult,
    diagnosis: &Diagnosis,
) -> std::fmt::Result {
    if result.search_columns.is_empty() {
        writeln!(out, "検索列: なし（列名のヒントに該当する列がありません）")?;
    } else {
        writeln!(out, "検索列: {}", result.search_columns.join(", "))?;
    }
    if !diagnosis.duplicated_columns.is_empty() {
        writeln!(
            out,
            "  複数回走査される列: {}",
            diagnosis.duplicated_columns.join(", ")
        )?;
    }
    writeln!(out)
}

fn write_keyword_table(
    out: &mut String,
    result: &TallyResult,
    diagnosis: &Diagnosis,
) -> std::fmt::Result {
    writeln!(out, "キーワード表:")?;
    for entry in result.keyword_table.entries() {
        writeln!(out, "  {:<16} {}", entry.label, entry.keywords.join(", "))?;
    }
    for overlap in &diagnosis.overlapping_keywords {
        writeln!(
            out,
            "  ! {}: \"{}\" は \"{}\" に含まれる",
            overlap.equipment_type, overlap.shorter, overlap.longer
        )?;
    }
    writeln!(out)
}

fn write_details(out: &mut String, result: &TallyResult, highlight: &str) -> std::fmt::Result {
    let Some(tally) = result.tally_for(highlight) else {
        writeln!(out, "不明な設備種別: {}", highlight)?;
        return writeln!(out);
    };

    writeln!(out, "{} の一致 ({}件):", tally.equipment_type, tally.count)?;
    for m in tally.matches.iter().take(MAX_DETAIL_ROWS) {
        writeln!(
            out,
            "  #{:<4} {:<16} {:<18} \"{}\"",
            m.record_index, m.column, m.matched_keyword, m.original_value
        )?;
    }
    if tally.matches.len() > MAX_DETAIL_ROWS {
        writeln!(out, "  ... 他 {}件", tally.matches.len() - MAX_DETAIL_ROWS)?;
    }
    writeln!(out)
}

fn write_breakdown(out: &mut String, diagnosis: &Diagnosis) -> std::fmt::Result {
    writeln!(out, "内訳:")?;
    for entry in diagnosis.equipment.iter().filter(|e| e.total_matches > 0) {
        writeln!(
            out,
            "  {}: {}件 / {}レコード (+{})",
            entry.equipment_type,
            entry.total_matches,
            entry.distinct_records,
            entry.inflation()
        )?;
        for b in entry.by_keyword.iter().filter(|b| b.count > 0) {
            writeln!(out, "    キーワード \"{}\": {}", b.name, b.count)?;
        }
        for b in entry.by_column.iter().filter(|b| b.count > 0) {
            writeln!(out, "    列 \"{}\": {}", b.name, b.count)?;
        }
    }
    Ok(())
}
