//! Rendering tests for inspector output.

use tss_cli::summary::{
    field_list_table, fields_table, meta_table, record_summary, rows_json, rows_table,
};
use tss_sav::{ByteCursor, SavReader, read_sav_bytes};

fn padded(text: &str, len: usize) -> Vec<u8> {
    let mut out = text.as_bytes().to_vec();
    out.resize(len, b' ');
    out
}

fn variable(out: &mut Vec<u8>, type_code: i32, name: &str) {
    for word in [2, type_code, 0, 0, 0, 0] {
        out.extend_from_slice(&i32::to_le_bytes(word));
    }
    out.extend_from_slice(&padded(name, 8));
}

/// Two uncompressed cases of (AGE numeric, NAME string width 8), one
/// document line and one unrecognised extension record.
fn fixture() -> Vec<u8> {
    fixture_with_extension_count(2)
}

/// The same file, with the extension record declaring `count` two-byte
/// elements while only four payload bytes follow.
fn fixture_with_extension_count(count: i32) -> Vec<u8> {
    let mut out = b"$FL2".to_vec();
    out.extend_from_slice(&padded("@(#) SPSS DATA FILE fixture", 60));
    for word in [2, 2, 0, 0, 2] {
        out.extend_from_slice(&i32::to_le_bytes(word));
    }
    out.extend_from_slice(&100.0f64.to_le_bytes());
    out.extend_from_slice(b"19 Oct 26");
    out.extend_from_slice(b"12:00:00");
    out.extend_from_slice(&padded("Clinic visits", 64));
    out.extend_from_slice(&[0; 3]);

    variable(&mut out, 0, "AGE");
    variable(&mut out, 8, "NAME");

    for word in [6, 1] {
        out.extend_from_slice(&i32::to_le_bytes(word));
    }
    out.extend_from_slice(&padded("Wave one", 80));
    for word in [7, 99, 2, count] {
        out.extend_from_slice(&i32::to_le_bytes(word));
    }
    out.extend_from_slice(&[1, 2, 3, 4]);
    for word in [999, 0] {
        out.extend_from_slice(&i32::to_le_bytes(word));
    }

    out.extend_from_slice(&34.0f64.to_le_bytes());
    out.extend_from_slice(&padded("ALICE", 8));
    out.extend_from_slice(&41.5f64.to_le_bytes());
    out.extend_from_slice(&padded("BOB", 8));
    out
}

#[test]
fn rows_render_as_json_objects() {
    let file = read_sav_bytes(&fixture()).unwrap();
    let json = rows_json(&file.rows).unwrap();
    insta::assert_snapshot!(json, @r#"
    [
      {
        "AGE": 34.0,
        "NAME": "ALICE"
      },
      {
        "AGE": 41.5,
        "NAME": "BOB"
      }
    ]
    "#);
}

#[test]
fn record_summary_lists_auxiliary_records() {
    let file = read_sav_bytes(&fixture()).unwrap();
    let summary = record_summary(&file.schema).join("\n");
    insta::assert_snapshot!(summary, @r"
    document 1: Wave one
    extension subtype 99: 2 x 2 bytes
    case data at offset 356
    ");
}

#[test]
fn tables_contain_decoded_content() {
    let file = read_sav_bytes(&fixture()).unwrap();

    let mut meta = meta_table(&file.schema.meta);
    meta.force_no_tty();
    let meta = meta.to_string();
    assert!(meta.contains("Clinic visits"));
    assert!(meta.contains("2026-10-19 12:00:00"));
    assert!(meta.contains("none"));

    let mut fields = fields_table(&file.schema);
    fields.force_no_tty();
    let fields = fields.to_string();
    assert!(fields.contains("AGE"));
    assert!(fields.contains("A8"));

    let mut rows = rows_table(&file);
    rows.force_no_tty();
    let rows = rows.to_string();
    assert!(rows.contains("ALICE"));
    assert!(rows.contains("41.5"));
}

#[test]
fn field_list_survives_damaged_extension() {
    let bytes = fixture_with_extension_count(1000);
    assert!(SavReader::new(None).read_schema(&mut ByteCursor::new(&bytes)).is_err());

    let fields = SavReader::new(None)
        .read_fields(&mut ByteCursor::new(&bytes))
        .unwrap();
    let mut table = field_list_table(&fields);
    table.force_no_tty();
    let table = table.to_string();
    assert!(table.contains("AGE"));
    assert!(table.contains("NAME"));
    assert!(table.contains("A8"));
    assert!(table.contains("Num"));
    assert!(!table.contains("Long name"));
}
