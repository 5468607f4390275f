//! 検索対象列の選択
//!
//! 列名に作業内容・説明らしき語が含まれる列を検索対象にする。
//! 作業列 → 説明列の順に連結し、両方に該当する列（"Description" など）は
//! 2回入る。2回入った列は集計でも2回走査される。

/// 作業内容らしい列名のヒント
pub const ACTION_HINTS: &[&str] = &["action", "task", "work", "activity", "description", "problem"];

/// 説明らしい列名のヒント
pub const DESCRIPTION_HINTS: &[&str] = &["description", "details", "notes", "comments"];

fn matches_any(column: &str, hints: &[&str]) -> bool {
    let lower = column.to_lowercase();
    hints.iter().any(|hint| lower.contains(hint))
}

pub fn is_action_column(column: &str) -> bool {
    matches_any(column, ACTION_HINTS)
}

pub fn is_description_column(column: &str) -> bool {
    matches_any(column, DESCRIPTION_HINTS)
}

/// 作業列（元の順）
pub fn action_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| is_action_column(c))
        .map(str::to_string)
        .collect()
}

/// 説明列（元の順）
pub fn description_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    columns
        .iter()
        .map(AsRef::as_ref)
        .filter(|c| is_description_column(c))
        .map(str::to_string)
        .collect()
}

/// 検索対象列を選択する（重複は除かない）
pub fn select_search_columns<S: AsRef<str>>(columns: &[S]) -> Vec<String> {
    let mut selected = action_columns(columns);
    selected.extend(description_columns(columns));
    selected
}

/// 2回以上選ばれた列（最初に現れた順）
pub fn duplicated_columns(search_columns: &[String]) -> Vec<String> {
    let mut duplicated: Vec<String> = Vec::new();
    for (i, column) in search_columns.iter().enumerate() {
        if search_columns[..i].contains(column) && !duplicated.contains(column) {
            duplicated.push(column.clone());
        }
    }
    duplicated
}
