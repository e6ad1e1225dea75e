//! Integration tests for Leapline.

use std::io::Write;
use tempfile::NamedTempFile;

use leapline::analysis::{GroupKey, LeapFilter, group_by};
use leapline::{
    Leapline, LeaplineError, OutputFormat, RawTable, TableWriter, Value, generate_sample,
    normalize,
};

/// Helper to create a temporary file with given content.
fn create_test_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file
}

fn raw(json: &str) -> RawTable {
    RawTable::from_json(json).expect("invalid test JSON")
}

// =============================================================================
// Scenarios
// =============================================================================

#[test]
fn test_scenario_a_classifies_without_flag_column() {
    let table = normalize(&raw(
        r#"[{"Year":2000},{"Year":1900},{"Year":1904},{"Year":1901}]"#,
    ))
    .expect("normalize failed");

    let flags: Vec<bool> = table.iter().map(|r| r.is_leap_year).collect();
    assert_eq!(flags, vec![true, false, true, false]);

    let reasons: Vec<&str> = table.iter().map(|r| r.leap_reason.as_str()).collect();
    assert_eq!(
        reasons,
        vec![
            "Divisible by 400",
            "Divisible by 100 but not 400",
            "Divisible by 4 but not 100",
            "Not divisible by 4",
        ]
    );
}

#[test]
fn test_scenario_b_uppercase_year_column_is_renamed() {
    let input = raw(r#"[{"YEAR":1996,"city":"Oslo"},{"YEAR":1997,"city":"Rome"}]"#);
    let table = normalize(&input).expect("normalize failed");

    assert_eq!(table.years().collect::<Vec<_>>(), vec![1996, 1997]);
    assert_eq!(table.extra_columns, vec!["city"]);
    assert_eq!(table.column_names()[0], "Year");
    assert!(!table.column_names().contains(&"YEAR"));
}

#[test]
fn test_scenario_c_no_year_column_fails() {
    let input = raw(r#"[{"id":1,"label":"x"}]"#);
    match normalize(&input) {
        Err(LeaplineError::Schema { columns }) => {
            assert_eq!(columns, vec!["id", "label"]);
        }
        other => panic!("expected schema error, got {other:?}"),
    }
}

#[test]
fn test_scenario_d_text_year_and_yes_flag() {
    let table = normalize(&raw(r#"[{"Year":"2024","Is_Leap_Year":"YES"}]"#))
        .expect("normalize failed");

    let record = &table.records[0];
    assert_eq!(record.year, Some(2024));
    assert!(record.is_leap_year);
    assert_eq!(record.leap_code, 1);
}

#[test]
fn test_scenario_e_small_sample() {
    let table = generate_sample(1900, 1904);
    assert_eq!(table.len(), 5);
    assert_eq!(
        table.years().collect::<Vec<_>>(),
        vec![1900, 1901, 1902, 1903, 1904]
    );
    let flags: Vec<bool> = table.iter().map(|r| r.is_leap_year).collect();
    assert_eq!(flags, vec![false, false, false, false, true]);
}

// =============================================================================
// Normalization Behavior
// =============================================================================

#[test]
fn test_normalize_is_idempotent() {
    let input = raw(
        r#"[
            {"fiscal year": "1999", "Is_Leap_Year": "no", "note": "x"},
            {"fiscal year": "abc", "Is_Leap_Year": null, "note": null},
            {"fiscal year": 2004.0, "Is_Leap_Year": 1, "note": "y"},
            {"fiscal year": 1900, "Is_Leap_Year": " True ", "Leap_Reason": "custom"}
        ]"#,
    );

    let once = normalize(&input).expect("first pass failed");
    let twice = normalize(&once.to_raw()).expect("second pass failed");
    assert_eq!(once, twice);
}

#[test]
fn test_years_beyond_f64_precision_survive_renormalize() {
    let once = normalize(&raw(r#"[{"Year":"9007199254740993"}]"#)).expect("first pass failed");
    let twice = normalize(&once.to_raw()).expect("second pass failed");

    assert_eq!(once.records[0].year, Some(9_007_199_254_740_993));
    assert_eq!(once, twice);

    let tsv = TableWriter::new(OutputFormat::Tsv)
        .to_string(&once)
        .expect("write failed");
    assert!(tsv.contains("9007199254740993\tfalse\t0\tNot divisible by 4\t0"));
}

#[test]
fn test_supplied_flags_are_not_recomputed() {
    let table = normalize(&raw(
        r#"[{"Year":1901,"Is_Leap_Year":"yes"},{"Year":2000,"Is_Leap_Year":"nope"}]"#,
    ))
    .expect("normalize failed");

    assert!(table.records[0].is_leap_year);
    assert_eq!(table.records[0].leap_code, 1);
    assert!(!table.records[1].is_leap_year);
    // Reasons are still computed from the year
    assert_eq!(table.records[0].leap_reason, "Not divisible by 4");
}

#[test]
fn test_normalization_bounds() {
    let table = normalize(&raw(
        r#"[{"Year":1950},{"Year":2010},{"Year":1900},{"Year":2050},{"Year":2000}]"#,
    ))
    .expect("normalize failed");

    for record in &table {
        let scaled = record.year_normalized.expect("valid year must scale");
        assert!((0.0..=1.0).contains(&scaled));
    }
    assert_eq!(table.records[2].year_normalized, Some(0.0));
    assert_eq!(table.records[3].year_normalized, Some(1.0));
    assert_eq!(table.records[0].year_normalized, Some(50.0 / 150.0));
}

#[test]
fn test_raw_table_untouched_after_normalize() {
    let input = raw(r#"[{"Year":"2024","Leap_Code":9}]"#);
    let copy = input.clone();
    let _ = normalize(&input).expect("normalize failed");
    assert_eq!(input, copy);
    assert_eq!(input.rows[0][1], Value::Integer(9));
}

// =============================================================================
// File Round Trips
// =============================================================================

#[test]
fn test_load_dirty_csv() {
    let content = "Record Year,Is_Leap_Year,comment\n\
                   2000,TRUE,ok\n\
                   n/a,,missing\n\
                   1900,0,century\n\
                   2023,maybe,\n";
    let file = create_test_file(content);

    let result = Leapline::new().load(file.path()).expect("load failed");
    let table = result.table;

    assert_eq!(table.len(), 4);
    assert_eq!(table.records[1].year, None);
    assert_eq!(table.records[1].leap_reason, "Invalid year");
    assert_eq!(table.records[1].year_normalized, None);
    assert!(table.records[0].is_leap_year);
    assert!(!table.records[3].is_leap_year);
    assert_eq!(table.extra_columns, vec!["comment"]);
    assert_eq!(table.records[3].extra, vec![Value::Missing]);
}

#[test]
fn test_load_tsv_auto_detect() {
    let content = "Year\tLeap_Reason\n2000\tDivisible by 400\n2001\tsomething else\n";
    let file = create_test_file(content);

    let table = Leapline::new().load(file.path()).expect("load failed").table;
    assert_eq!(table.records[1].leap_reason, "something else");
}

#[test]
fn test_write_then_reload() {
    let table = generate_sample(1996, 2004);
    let out = NamedTempFile::new().expect("Failed to create temp file");
    TableWriter::new(OutputFormat::Tsv)
        .write_path(&table, out.path())
        .expect("write failed");

    let reloaded = Leapline::new().load(out.path()).expect("reload failed").table;
    assert_eq!(reloaded.years().collect::<Vec<_>>(), table.years().collect::<Vec<_>>());
    assert_eq!(
        reloaded.iter().map(|r| r.is_leap_year).collect::<Vec<_>>(),
        table.iter().map(|r| r.is_leap_year).collect::<Vec<_>>()
    );
    assert_eq!(reloaded.records[0].year_normalized, Some(0.0));
}

// =============================================================================
// Views
// =============================================================================

#[test]
fn test_filter_then_group() {
    let table = generate_sample(1900, 2050);
    let leap = LeapFilter::LeapOnly.apply(&table);
    let groups = group_by(&leap, GroupKey::YearGroup);

    assert_eq!(groups.iter().map(|g| g.total_years).sum::<usize>(), 37);
    assert!(groups.iter().all(|g| g.leap_year_ratio == 1.0));
}
