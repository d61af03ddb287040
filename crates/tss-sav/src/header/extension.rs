//! Extension records (tag 7).
//!
//! Each extension record starts with a 12-byte sub-header: subtype, element
//! size and element count. The payload is `size * count` bytes.
//!
//! | Subtype | Content                                  | Size rule          |
//! |---------|------------------------------------------|--------------------|
//! | 3       | Integer/encoding info, 8 x i32           | exactly 32 bytes   |
//! | 4       | Float info, 3 x f64                      | exactly 24 bytes   |
//! | 11      | Display formats, i32 triples             | size 4, count % 3  |
//! | 13      | Long names, `SHORT=Long` tab-separated   | any                |
//! | 14      | Long string widths, `NAME=00300\0\t`     | any                |
//! | 21      | Opaque blob, kept verbatim               | any                |
//! | other   | Opaque, kept as `count` records          | any                |

use crate::cursor::ByteCursor;
use crate::error::{Result, SavError};
use crate::types::{DisplayFormat, ExtensionBlock, FloatInfo, IntegerInfo, InternalRecord};

use super::records::read_count;
use super::{read_f64_at, read_i32_at};

pub const INTEGER_INFO_SUBTYPE: i32 = 3;
pub const FLOAT_INFO_SUBTYPE: i32 = 4;
pub const DISPLAY_SUBTYPE: i32 = 11;
pub const LONG_NAMES_SUBTYPE: i32 = 13;
pub const LONG_STRING_WIDTHS_SUBTYPE: i32 = 14;
pub const AUXILIARY_SUBTYPE: i32 = 21;

const INTEGER_INFO_LEN: usize = 32;
const FLOAT_INFO_LEN: usize = 24;

/// Read one extension record. The tag is already consumed.
pub fn read_extension(cursor: &mut ByteCursor<'_>) -> Result<InternalRecord> {
    let subtype = cursor.read_i32_le()?;
    let size = read_count(cursor, "extension element size")?;
    let count = read_count(cursor, "extension element count")?;
    let total = size.checked_mul(count).ok_or_else(|| {
        SavError::invalid_format(format!(
            "extension subtype {subtype}: {size} x {count} overflows"
        ))
    })?;

    let record = match subtype {
        INTEGER_INFO_SUBTYPE => {
            expect_total(subtype, INTEGER_INFO_LEN, size, count)?;
            InternalRecord::IntegerInfo(parse_integer_info(cursor.take(total)?))
        }
        FLOAT_INFO_SUBTYPE => {
            expect_total(subtype, FLOAT_INFO_LEN, size, count)?;
            InternalRecord::FloatInfo(parse_float_info(cursor.take(total)?))
        }
        DISPLAY_SUBTYPE => {
            if size != 4 {
                return Err(SavError::size_mismatch(
                    subtype,
                    "element size 4",
                    format!("element size {size}"),
                ));
            }
            if count % 3 != 0 {
                return Err(SavError::size_mismatch(
                    subtype,
                    "element count divisible by 3",
                    format!("element count {count}"),
                ));
            }
            InternalRecord::DisplayFormats(parse_display_formats(cursor.take(total)?))
        }
        LONG_NAMES_SUBTYPE => {
            InternalRecord::LongNames(parse_long_names(cursor.take(total)?)?)
        }
        LONG_STRING_WIDTHS_SUBTYPE => {
            InternalRecord::LongStringWidths(parse_long_string_widths(cursor.take(total)?)?)
        }
        AUXILIARY_SUBTYPE => InternalRecord::AuxiliaryBlob(cursor.take(total)?.to_vec()),
        _ => {
            if size == 0 && count > 0 {
                return Err(SavError::size_mismatch(
                    subtype,
                    "non-zero element size",
                    format!("element size 0 with count {count}"),
                ));
            }
            let payload = cursor.take(total)?;
            let records = payload.chunks_exact(size.max(1)).map(<[u8]>::to_vec).collect();
            InternalRecord::Extension(ExtensionBlock {
                subtype,
                element_size: size,
                records,
            })
        }
    };
    Ok(record)
}

fn expect_total(subtype: i32, expected: usize, size: usize, count: usize) -> Result<()> {
    let actual = size * count;
    if actual != expected {
        return Err(SavError::size_mismatch(
            subtype,
            format!("{expected} bytes"),
            format!("{size} x {count} = {actual} bytes"),
        ));
    }
    Ok(())
}

fn parse_integer_info(data: &[u8]) -> IntegerInfo {
    IntegerInfo {
        version_major: read_i32_at(data, 0),
        version_minor: read_i32_at(data, 4),
        version_revision: read_i32_at(data, 8),
        machine_code: read_i32_at(data, 12),
        float_representation: read_i32_at(data, 16),
        compression_code: read_i32_at(data, 20),
        endianness: read_i32_at(data, 24),
        character_code: read_i32_at(data, 28),
    }
}

fn parse_float_info(data: &[u8]) -> FloatInfo {
    FloatInfo {
        sysmis: read_f64_at(data, 0),
        highest: read_f64_at(data, 8),
        lowest: read_f64_at(data, 16),
    }
}

fn parse_display_formats(data: &[u8]) -> Vec<DisplayFormat> {
    data.chunks_exact(12)
        .map(|triple| DisplayFormat {
            measure: read_i32_at(triple, 0),
            width: read_i32_at(triple, 4),
            alignment: read_i32_at(triple, 8),
        })
        .collect()
}

/// Split a `key=value` blob on tabs, dropping NUL padding and empty pairs.
fn split_pairs(data: &[u8], subtype: i32) -> Result<Vec<(String, String)>> {
    let text = String::from_utf8_lossy(data);
    text.split('\t')
        .map(|pair| pair.trim_matches('\0'))
        .filter(|pair| !pair.is_empty())
        .map(|pair| {
            pair.split_once('=')
                .map(|(key, value)| (key.to_string(), value.to_string()))
                .ok_or_else(|| {
                    SavError::invalid_format(format!(
                        "extension subtype {subtype}: expected name=value, found {pair:?}"
                    ))
                })
        })
        .collect()
}

fn parse_long_names(data: &[u8]) -> Result<Vec<(String, String)>> {
    split_pairs(data, LONG_NAMES_SUBTYPE)
}

fn parse_long_string_widths(data: &[u8]) -> Result<Vec<(String, usize)>> {
    split_pairs(data, LONG_STRING_WIDTHS_SUBTYPE)?
        .into_iter()
        .map(|(name, value)| {
            let width = value.trim().parse::<usize>().map_err(|_| {
                SavError::invalid_format(format!(
                    "long string width for {name}: expected an integer, found {value:?}"
                ))
            })?;
            Ok((name, width))
        })
        .collect()
}
