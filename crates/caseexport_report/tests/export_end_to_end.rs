use std::fs;

use calamine::{Data, Reader, Xlsx, open_workbook};
use caseexport_io_xlsx::{EnumCellValue, derive_default_report_styles};
use caseexport_report::{
    Document, MemoryDocumentStore, ReportError, SpecReportOptions, derive_report_file_name,
    export_case_report, preview_case_report,
};
use chrono::{NaiveDate, NaiveDateTime};
use serde_json::{Value, json};

fn derive_dt() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2025, 3, 14)
        .and_then(|d| d.and_hms_opt(15, 9, 26))
        .expect("valid timestamp")
}

fn docs(value: Value) -> Vec<Document> {
    value
        .as_array()
        .expect("array payload")
        .iter()
        .map(|item| item.as_object().cloned().expect("object document"))
        .collect()
}

fn derive_store() -> MemoryDocumentStore {
    let mut store = MemoryDocumentStore::new();
    store.insert_many(
        "Case_details",
        docs(json!([{
            "case_id": 42,
            "incident_id": 9001,
            "account_no": "ACC-42",
            "bss_arrears_amount": 150000,
            "current_arrears_band": "AB-UNKNOWN",
            "created_dtm": {"$date": "2025-02-01T08:30:00Z"},
            "contact": [
                {"mob": "0711111111", "email": "one@example.com"},
                {"mob": "0722222222", "lan": "0112222222"}
            ],
            "remark": [
                {"remark": "Called customer", "remark_added_by": "ops1"},
                {"remark": "No answer", "remark_added_by": "ops2"},
                {"remark": "Promise to pay", "remark_added_by": "ops1"}
            ]
        }])),
    );
    store.insert_many(
        "Arrears_bands",
        docs(json!([{"AB-5_10": "5,000 - 10,000"}])),
    );
    store
}

#[test]
fn test_export_writes_expected_sections() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir_out = tmp.path().join("nested").join("exports");
    let store = derive_store();

    let report = export_case_report(
        &store,
        &json!(9001),
        &dir_out,
        &derive_default_report_styles(),
        &SpecReportOptions::default(),
        &derive_dt(),
    )
    .expect("export succeeds");

    let path_file_out = report.path_file_out.clone().expect("file written");
    assert_eq!(
        path_file_out,
        dir_out.join("Case_Details_9001_2025-03-14_15-09-26.xlsx")
    );
    assert_eq!(report.section("Contact Info").map(|s| s.cnt_rows), Some(2));
    assert_eq!(report.section("Remarks").map(|s| s.cnt_rows), Some(3));
    assert!(report.section("Settlement Details").is_none());
    assert_eq!(report.warning_count(), 1);
    assert!(report.warnings[0].contains("AB-UNKNOWN"));

    let mut workbook: Xlsx<_> = open_workbook(&path_file_out).expect("open workbook");
    assert_eq!(workbook.sheet_names(), vec!["Case Details".to_string()]);
    let range = workbook.worksheet_range("Case Details").expect("sheet range");

    let l_col_a: Vec<String> = (0..range.end().map_or(0, |(row, _)| row + 1))
        .filter_map(|row| match range.get_value((row, 0)) {
            Some(Data::String(s)) => Some(s.clone()),
            _ => None,
        })
        .collect();
    assert!(l_col_a.iter().any(|s| s == "Contact Info"));
    assert!(l_col_a.iter().any(|s| s == "Remarks"));
    assert!(!l_col_a.iter().any(|s| s == "Settlement Details"));

    // Case ID value, then the raw arrears code kept on a lookup miss.
    assert_eq!(range.get_value((1, 1)), Some(&Data::Float(42.0)));
    assert_eq!(
        range.get_value((6, 1)),
        Some(&Data::String("150,000".to_string()))
    );
    assert_eq!(
        range.get_value((14, 1)),
        Some(&Data::String("AB-UNKNOWN".to_string()))
    );
    assert_eq!(
        range.get_value((16, 1)),
        Some(&Data::String("2025-02-01 08:30:00".to_string()))
    );

    let section_remarks = report.section("Remarks").expect("remarks placed");
    let n_row_first_data = (section_remarks.row_first + 2 - 1) as u32;
    assert_eq!(
        range.get_value((n_row_first_data, 0)),
        Some(&Data::String("Called customer".to_string()))
    );
}

#[test]
fn test_export_never_overwrites_existing_file() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let store = derive_store();
    let styles = derive_default_report_styles();
    let options = SpecReportOptions::default();

    let file_name = derive_report_file_name("Case_Details", &json!(9001), &derive_dt());
    fs::write(tmp.path().join(&file_name), b"existing").unwrap();

    let report_first =
        export_case_report(&store, &json!(9001), tmp.path(), &styles, &options, &derive_dt())
            .unwrap();
    let report_second =
        export_case_report(&store, &json!(9001), tmp.path(), &styles, &options, &derive_dt())
            .unwrap();

    assert_eq!(
        report_first.path_file_out,
        Some(tmp.path().join("Case_Details_9001_2025-03-14_15-09-26_1.xlsx"))
    );
    assert_eq!(
        report_second.path_file_out,
        Some(tmp.path().join("Case_Details_9001_2025-03-14_15-09-26_2.xlsx"))
    );
    assert_eq!(fs::read(tmp.path().join(&file_name)).unwrap(), b"existing");
}

#[test]
fn test_missing_case_writes_nothing() {
    let tmp = tempfile::tempdir().expect("create temp dir");
    let dir_out = tmp.path().join("exports");
    let store = derive_store();

    let err = export_case_report(
        &store,
        &json!(1),
        &dir_out,
        &derive_default_report_styles(),
        &SpecReportOptions::default(),
        &derive_dt(),
    )
    .unwrap_err();

    assert!(matches!(err, ReportError::CaseNotFound { ref incident_id } if incident_id == "1"));
    assert!(!dir_out.exists());
}

#[test]
fn test_preview_matches_export_layout() {
    let store = derive_store();

    let (grid, report) = preview_case_report(
        &store,
        &json!(9001),
        &derive_default_report_styles(),
        &SpecReportOptions::default(),
    )
    .unwrap();

    assert!(report.path_file_out.is_none());
    let section_contacts = report.section("Contact Info").expect("contacts placed");
    assert_eq!(grid.find_rows(1, "Contact Info"), vec![section_contacts.row_first]);
    assert_eq!(
        grid.value(section_contacts.row_first + 2, 3),
        EnumCellValue::None
    );
    assert_eq!(
        grid.value(section_contacts.row_first + 3, 3),
        EnumCellValue::from("0112222222")
    );
}
