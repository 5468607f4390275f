//! Excel出力
//!
//! 集計結果を3シートのブックに書き出す。
//! - 集計: 設備種別ごとの件数・実レコード数
//! - 一致明細: 一致1件につき1行
//! - 検索列: 検索対象列（重複込み）

use crate::error::{Result, TallyError};
use equipment_tally_common::TallyResult;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};
use std::path::Path;

pub fn export_excel(result: &TallyResult, output_path: &Path) -> Result<()> {
    build_workbook(result)
        .and_then(|mut workbook| workbook.save(output_path))
        .map_err(|e| TallyError::ExcelExport(format!("{}: {}", output_path.display(), e)))
}

fn build_workbook(result: &TallyResult) -> std::result::Result<Workbook, XlsxError> {
    let mut workbook = Workbook::new();
    let header = Format::new().set_bold();

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("集計")?;
        write_header(sheet, &header, &["設備種別", "件数", "レコード数"])?;
        for (i, tally) in result.equipment.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_string(row, 0, &tally.equipment_type)?;
            sheet.write_number(row, 1, tally.count as f64)?;
            sheet.write_number(row, 2, tally.distinct_records() as f64)?;
        }
        let total_row = result.equipment.len() as u32 + 2;
        sheet.write_string_with_format(total_row, 0, "走査レコード数", &header)?;
        sheet.write_number(total_row, 1, result.total_records as f64)?;
        sheet.set_column_width(0, 20)?;
        sheet.set_column_width(2, 16)?;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("一致明細")?;
        write_header(
            sheet,
            &header,
            &["設備種別", "レコード", "列", "キーワード", "元の値"],
        )?;
        let mut row = 1u32;
        for tally in &result.equipment {
            for m in &tally.matches {
                sheet.write_string(row, 0, &tally.equipment_type)?;
                sheet.write_number(row, 1, m.record_index as f64)?;
                sheet.write_string(row, 2, &m.column)?;
                sheet.write_string(row, 3, &m.matched_keyword)?;
                sheet.write_string(row, 4, m.original_value.as_text())?;
                row += 1;
            }
        }
        sheet.set_column_width(0, 20)?;
        sheet.set_column_width(2, 20)?;
        sheet.set_column_width(3, 20)?;
        sheet.set_column_width(4, 50)?;
    }

    {
        let sheet = workbook.add_worksheet();
        sheet.set_name("検索列")?;
        write_header(sheet, &header, &["順番", "列名"])?;
        for (i, column) in result.search_columns.iter().enumerate() {
            let row = i as u32 + 1;
            sheet.write_number(row, 0, (i + 1) as f64)?;
            sheet.write_string(row, 1, column)?;
        }
        sheet.set_column_width(1, 24)?;
    }

    Ok(workbook)
}

fn write_header(
    sheet: &mut Worksheet,
    format: &Format,
    titles: &[&str],
) -> std::result::Result<(), XlsxError> {
    for (col, title) in titles.iter().enumerate() {
        sheet.write_string_with_format(0, col as u16, *title, format)?;
    }
    Ok(())
}
