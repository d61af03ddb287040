//! File header record.
//!
//! # Structure (176 bytes, little-endian)
//!
//! | Offset  | Length | Field          | Description                        |
//! |---------|--------|----------------|------------------------------------|
//! | 0-3     | 4      | signature      | `$FL2`                             |
//! | 4-63    | 60     | product        | Writing product, space padded      |
//! | 64-67   | 4      | layout_code    | Layout code                        |
//! | 68-71   | 4      | variable_count | 8-byte slots per case              |
//! | 72-75   | 4      | compression    | 0 none, 1 bytecode, 2 variant      |
//! | 76-79   | 4      | weight_index   | Weight variable index, 0 = none    |
//! | 80-83   | 4      | cases          | Case count, -1 when unknown        |
//! | 84-91   | 8      | bias           | Compression bias                   |
//! | 92-100  | 9      | creation_date  | `dd MMM yy`                        |
//! | 101-108 | 8      | creation_time  | `HH:MM:SS`                         |
//! | 109-172 | 64     | file_label     | File label                         |
//! | 173-175 | 3      | padding        |                                    |

use crate::cursor::ByteCursor;
use crate::error::{Result, SavError};
use crate::types::{Compression, FileMeta};

use super::{read_f64_at, read_i32_at, read_text};

/// Fixed container signature.
pub const SIGNATURE: &str = "$FL2";

/// Size of the file header.
pub const HEADER_LEN: usize = 176;

/// Decode the file header at offset 0.
///
/// The cursor is restored to its entry position whether or not decoding
/// succeeds.
pub fn read_file_meta(cursor: &mut ByteCursor<'_>) -> Result<FileMeta> {
    let entry = cursor.position();
    let result = cursor.seek(0).and_then(|()| {
        validate_signature(cursor.take(SIGNATURE.len())?)?;
        cursor.seek(0)?;
        let header = cursor.take(HEADER_LEN)?;
        parse_file_meta(header)
    });
    cursor.seek(entry)?;
    result
}

/// Decode a 176-byte header block.
pub fn parse_file_meta(header: &[u8]) -> Result<FileMeta> {
    validate_signature(header)?;
    if header.len() < HEADER_LEN {
        return Err(SavError::UnexpectedEof {
            offset: 0,
            requested: HEADER_LEN,
            remaining: header.len(),
        });
    }

    Ok(FileMeta {
        product: read_text(&header[4..64]),
        layout_code: read_i32_at(header, 64),
        variable_count: read_i32_at(header, 68),
        compression: Compression::from_flag(read_i32_at(header, 72))?,
        weight_index: read_i32_at(header, 76),
        cases: read_i32_at(header, 80),
        bias: read_f64_at(header, 84),
        creation_date: read_text(&header[92..101]),
        creation_time: read_text(&header[101..109]),
        file_label: read_text(&header[109..173]),
    })
}

/// Check the leading signature.
pub fn validate_signature(header: &[u8]) -> Result<()> {
    let actual = header.get(..4).unwrap_or(header);
    if actual != SIGNATURE.as_bytes() {
        return Err(SavError::SignatureMismatch {
            expected: SIGNATURE,
            actual: String::from_utf8_lossy(actual).into_owned(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn header() -> Vec<u8> {
        let mut buf = vec![b' '; HEADER_LEN];
        buf[0..4].copy_from_slice(b"$FL2");
        buf[4..23].copy_from_slice(b"@(#) SPSS DATA FILE");
        buf[64..68].copy_from_slice(&2i32.to_le_bytes());
        buf[68..72].copy_from_slice(&4i32.to_le_bytes());
        buf[72..76].copy_from_slice(&1i32.to_le_bytes());
        buf[76..80].copy_from_slice(&0i32.to_le_bytes());
        buf[80..84].copy_from_slice(&12i32.to_le_bytes());
        buf[84..92].copy_from_slice(&100.0f64.to_le_bytes());
        buf[92..101].copy_from_slice(b"01 Jan 24");
        buf[101..109].copy_from_slice(b"09:15:00");
        buf[109..119].copy_from_slice(b"Test label");
        buf
    }

    #[test]
    fn test_parse_header() {
        let meta = parse_file_meta(&header()).unwrap();
        assert_eq!(meta.product, "@(#) SPSS DATA FILE");
        assert_eq!(meta.layout_code, 2);
        assert_eq!(meta.variable_count, 4);
        assert_eq!(meta.compression, Compression::Bytecode);
        assert_eq!(meta.cases, 12);
        assert_eq!(meta.bias, 100.0);
        assert_eq!(meta.creation_date, "01 Jan 24");
        assert_eq!(meta.creation_time, "09:15:00");
        assert_eq!(meta.file_label, "Test label");
    }

    #[test]
    fn test_bad_signature() {
        let mut buf = header();
        buf[0..4].copy_from_slice(b"$FL3");
        let err = parse_file_meta(&buf).unwrap_err();
        match err {
            SavError::SignatureMismatch { expected, actual } => {
                assert_eq!(expected, "$FL2");
                assert_eq!(actual, "$FL3");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_read_restores_cursor() {
        let mut data = header();
        data.extend_from_slice(&[0u8; 16]);
        let mut cursor = ByteCursor::new(&data);
        cursor.seek(180).unwrap();
        read_file_meta(&mut cursor).unwrap();
        assert_eq!(cursor.position(), 180);
    }

    #[test]
    fn test_short_buffer_restores_cursor() {
        let data = header();
        let mut cursor = ByteCursor::new(&data[..100]);
        cursor.seek(10).unwrap();
        assert!(matches!(
            read_file_meta(&mut cursor),
            Err(SavError::UnexpectedEof { .. })
        ));
        assert_eq!(cursor.position(), 10);
    }
}
