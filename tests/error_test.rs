//! エラーケーステスト
//!
//! 取り込み・設定まわりのエラーハンドリングを検証

use equipment_tally::error::TallyError;
use equipment_tally::{importer, storage};
use std::path::Path;
use tempfile::tempdir;

/// 存在しないファイルを読み込んだ場合
#[test]
fn test_load_nonexistent_file() {
    let result = importer::load_dataset(Path::new("/nonexistent/path/jobs.xlsx"));
    assert!(matches!(result, Err(TallyError::FileNotFound(_))));
}

/// 対応していない形式
#[test]
fn test_load_unsupported_format() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("jobs.csv");
    std::fs::write(&path, "Action\ncoil\n").unwrap();

    let result = importer::load_dataset(&path);
    assert!(matches!(result, Err(TallyError::UnsupportedFormat(_))));
}

/// 壊れたJSON
#[test]
fn test_load_invalid_json() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("jobs.json");
    std::fs::write(&path, "{ invalid }").unwrap();

    let result = importer::load_dataset(&path);
    assert!(matches!(result, Err(TallyError::JsonParse(_))));
}

/// 拡張子だけxlsxの壊れたファイル
#[test]
fn test_load_invalid_spreadsheet() {
    let dir = tempdir().expect("Failed to create temp dir");
    let path = dir.path().join("jobs.xlsx");
    std::fs::write(&path, "not a workbook").unwrap();

    let result = importer::load_dataset(&path);
    assert!(matches!(result, Err(TallyError::Spreadsheet(_))));
}

/// 取り込みフォルダがない場合
#[test]
fn test_missing_data_dir() {
    let result = storage::latest_imported_file(Path::new("/nonexistent/imports/12345"));
    let err = result.unwrap_err();
    assert!(matches!(err, TallyError::DataDirNotFound(_)));
    assert!(err.is_input_unavailable());
}

/// TallyErrorのDisplay実装確認
#[test]
fn test_error_display() {
    let errors = vec![
        TallyError::Config("テスト設定エラー".to_string()),
        TallyError::FileNotFound("jobs.xlsx".to_string()),
        TallyError::DataDirNotFound("/imports".to_string()),
        TallyError::NoImportedFiles("/imports".to_string()),
        TallyError::EmptyDataset("jobs.json".to_string()),
        TallyError::UnsupportedFormat("jobs.csv".to_string()),
        TallyError::Spreadsheet("壊れたブック".to_string()),
        TallyError::ExcelExport("保存失敗".to_string()),
    ];

    for err in errors {
        let display = format!("{}", err);
        assert!(!display.is_empty(), "エラーメッセージが空: {:?}", err);
    }
}

/// 集計できない原因の区別
#[test]
fn test_input_unavailable_classification() {
    assert!(TallyError::EmptyDataset("jobs.json".into()).is_input_unavailable());
    assert!(!TallyError::Config("x".into()).is_input_unavailable());
    assert!(!TallyError::ExcelExport("x".into()).is_input_unavailable());
}

/// IOエラーからの変換
#[test]
fn test_io_error_conversion() {
    let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
    let err: TallyError = io_err.into();

    assert!(matches!(err, TallyError::Io(_)));
    assert!(format!("{}", err).contains("IO"));
}

/// common::Errorからの変換（透過的エラー）
#[test]
fn test_common_error_conversion() {
    let common_err = equipment_tally_common::Error::Config("設備種別が重複しています".to_string());
    let err: TallyError = common_err.into();

    assert!(matches!(err, TallyError::Common(_)));
    assert!(format!("{}", err).contains("設備種別が重複しています"));
}
