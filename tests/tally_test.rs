//! 取り込みから集計までの統合テスト
//!
//! JSON/Excelの取り込みファイルを作って集計結果を検証

use equipment_tally::analysis::{self, AnalysisRequest};
use equipment_tally::error::TallyError;
use equipment_tally::importer;
use equipment_tally_common::{
    select_search_columns, tally, CountingMode, EquipmentKeywordTable, EquipmentKeywords,
    TallyOptions,
};
use rust_xlsxwriter::Workbook;
use std::path::Path;
use tempfile::tempdir;

fn coils_table() -> EquipmentKeywordTable {
    EquipmentKeywordTable::new(vec![EquipmentKeywords::new(
        "Coils",
        ["coil", "coils", "evaporator coil", "condenser coil"],
    )])
}

fn write_jobs_json(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("jobs.json");
    std::fs::write(
        &path,
        r#"{
            "columns": ["Date", "Action", "Description"],
            "records": [
                {"Date": "2024-03-01", "Action": "Clean evaporator coil", "Description": "Coil maintenance required"},
                {"Date": "2024-03-02", "Action": "Replace fan motor", "Description": null},
                {"Date": "2024-03-03", "Action": "Check unit", "Description": 12}
            ]
        }"#,
    )
    .unwrap();
    path
}

fn write_jobs_xlsx(dir: &Path) -> std::path::PathBuf {
    let path = dir.join("jobs.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    let rows = [
        ["Technician", "Work Performed", "Notes"],
        ["Sam", "Cleaned condenser coil", "coils look good"],
        ["Alex", "Filter cleaned", ""],
    ];
    for (r, row) in rows.iter().enumerate() {
        for (c, value) in row.iter().enumerate() {
            if !value.is_empty() {
                sheet.write_string(r as u32, c as u16, *value).unwrap();
            }
        }
    }
    sheet.write_number(3, 0, 42).unwrap();
    workbook.save(&path).unwrap();
    path
}

/// 列選択 → 集計の一連の流れ（Descriptionは2回走査される）
#[test]
fn test_json_import_end_to_end() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_jobs_json(dir.path());

    let dataset = importer::load_dataset(&path).unwrap();
    assert_eq!(dataset.columns, vec!["Date", "Action", "Description"]);
    assert_eq!(dataset.records.len(), 3);

    let search = select_search_columns(&dataset.columns);
    assert_eq!(search, vec!["Action", "Description", "Description"]);

    let result = tally(&dataset.records, &search, &coils_table());
    assert_eq!(result.total_records, 3);
    assert_eq!(result.count("Coils"), 4);
    assert_eq!(result.matches("Coils").len(), 4);

    // 列を1回ずつにすると3件
    let single = tally(
        &dataset.records,
        &["Action".to_string(), "Description".to_string()],
        &coils_table(),
    );
    assert_eq!(single.count("Coils"), 3);
}

/// Excel取り込み（1行目が列名、数値セル・空セル）
#[test]
fn test_xlsx_import() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_jobs_xlsx(dir.path());

    let dataset = importer::load_dataset(&path).unwrap();
    assert_eq!(dataset.columns, vec!["Technician", "Work Performed", "Notes"]);
    assert_eq!(dataset.records.len(), 3);

    let search = select_search_columns(&dataset.columns);
    assert_eq!(search, vec!["Work Performed", "Notes"]);

    let result = tally(&dataset.records, &search, &EquipmentKeywordTable::reference());
    // "cleaned condenser coil" → coil, condenser coil / "coils look good" → coil, coils
    assert_eq!(result.count("Coils"), 4);
    // "filter cleaned" → filter, filter cleaned
    assert_eq!(result.count("Filter Cleaned"), 2);
}

/// レコード配列のJSONはキーの記述順が列順になる
#[test]
fn test_json_rows_keep_column_order() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("rows.json");
    std::fs::write(&path, r#"[{"Work Notes": "coil", "Action": "evaporator coil"}]"#).unwrap();

    let dataset = importer::load_dataset(&path).unwrap();
    assert_eq!(dataset.columns, vec!["Work Notes", "Action"]);

    let search = select_search_columns(&dataset.columns);
    assert_eq!(search, vec!["Work Notes", "Action", "Work Notes"]);

    let result = tally(&dataset.records, &search, &coils_table());
    assert_eq!(result.count("Coils"), 4);
    let columns: Vec<&str> = result
        .matches("Coils")
        .iter()
        .map(|m| m.column.as_str())
        .collect();
    assert_eq!(columns, vec!["Work Notes", "Action", "Action", "Work Notes"]);
}

/// 同名の列は連番付きで別の列として残る
#[test]
fn test_xlsx_duplicate_headers() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("dup.xlsx");
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Notes").unwrap();
    sheet.write_string(0, 1, "Notes").unwrap();
    sheet.write_string(1, 0, "coil replaced").unwrap();
    sheet.write_string(1, 1, "site visit").unwrap();
    workbook.save(&path).unwrap();

    let dataset = importer::load_dataset(&path).unwrap();
    assert_eq!(dataset.columns, vec!["Notes", "Notes (2)"]);
    assert_eq!(dataset.records[0].cell_text("Notes"), "coil replaced");
    assert_eq!(dataset.records[0].cell_text("Notes (2)"), "site visit");

    let search = select_search_columns(&dataset.columns);
    let result = tally(&dataset.records, &search, &coils_table());
    assert_eq!(result.count("Coils"), 1);
}

/// run_analysis: 取り込みフォルダの最新ファイルを使う
#[test]
fn test_run_analysis_from_data_dir() {
    let dir = tempdir().expect("Failed to create temp dir");
    write_jobs_json(dir.path());

    let request = AnalysisRequest {
        data_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let analysis = analysis::run_analysis(&request).unwrap();

    assert!(analysis.source.ends_with("jobs.json"));
    assert_eq!(analysis.result.count("Coils"), 4);
    assert_eq!(analysis.result.count("Motors"), 2);
    assert_eq!(analysis.diagnosis.duplicated_columns, vec!["Description"]);
}

/// 1レコード1件モード
#[test]
fn test_run_analysis_distinct_mode() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_jobs_json(dir.path());

    let request = AnalysisRequest {
        input: Some(path),
        options: TallyOptions {
            mode: CountingMode::DistinctRecords,
            ..Default::default()
        },
        ..Default::default()
    };
    let analysis = analysis::run_analysis(&request).unwrap();

    assert_eq!(analysis.result.count("Coils"), 1);
    assert_eq!(analysis.result.count("Motors"), 1);
    assert_eq!(analysis.result.count("Unit"), 1);
}

/// カスタムキーワード表
#[test]
fn test_run_analysis_with_custom_keywords() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_jobs_json(dir.path());
    let keywords = dir.path().join("keywords.txt");
    std::fs::write(&keywords, r#"[{"label": "Fans", "keywords": ["FAN"]}]"#).unwrap();

    let request = AnalysisRequest {
        input: Some(path),
        keywords_path: Some(keywords),
        ..Default::default()
    };
    let analysis = analysis::run_analysis(&request).unwrap();

    assert_eq!(analysis.result.equipment.len(), 1);
    assert_eq!(analysis.result.count("Fans"), 1);
}

/// データなしは「0件一致」と区別する
#[test]
fn test_no_data_is_distinct_from_zero_matches() {
    let dir = tempdir().expect("Failed to create temp dir");

    // 取り込みファイルなし
    let request = AnalysisRequest {
        data_dir: Some(dir.path().to_path_buf()),
        ..Default::default()
    };
    let err = analysis::run_analysis(&request).unwrap_err();
    assert!(matches!(err, TallyError::NoImportedFiles(_)));
    assert!(err.is_input_unavailable());

    // 0件のファイル
    std::fs::write(dir.path().join("empty.json"), "[]").unwrap();
    let err = analysis::run_analysis(&request).unwrap_err();
    assert!(matches!(err, TallyError::EmptyDataset(_)));
    assert!(err.is_input_unavailable());

    // データはあるが一致なし
    std::fs::write(
        dir.path().join("empty.json"),
        r#"[{"Action": "Site visit"}]"#,
    )
    .unwrap();
    let analysis = analysis::run_analysis(&request).unwrap();
    assert_eq!(analysis.result.total_records, 1);
    assert!(!analysis.result.has_matches());
}

/// Excel出力（集計シートを読み戻して確認）
#[test]
fn test_export_excel() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = write_jobs_json(dir.path());
    let request = AnalysisRequest {
        input: Some(path),
        ..Default::default()
    };
    let analysis = analysis::run_analysis(&request).unwrap();

    let output = dir.path().join("tally.xlsx");
    equipment_tally::export::export_excel(&analysis.result, &output).unwrap();
    assert!(output.exists());

    let summary = importer::load_dataset(&output).unwrap();
    assert_eq!(summary.columns, vec!["設備種別", "件数", "レコード数"]);

    let coils = summary
        .records
        .iter()
        .find(|r| r.cell_text("設備種別") == "coils")
        .expect("Coils行がない");
    assert_eq!(coils.cell_text("件数"), "4");
    assert_eq!(coils.cell_text("レコード数"), "1");
}
