//! Variable record parsing.
//!
//! Each declared variable is one record with tag 2. String variables wider
//! than 8 characters are followed by continuation records (type code -1),
//! one per extra 8-byte slot.
//!
//! # Variable Record Body (28 bytes after the tag)
//!
//! | Offset | Field        | Type    | Description                       |
//! |--------|--------------|---------|-----------------------------------|
//! | 0-3    | type         | i32     | 0=numeric, N=string width, -1=cont|
//! | 4-7    | has_label    | i32     | 1 when a label follows            |
//! | 8-11   | n_missing    | i32     | 0..3, -2 range, -3 range + value  |
//! | 12-15  | print        | i32     | Packed print format               |
//! | 16-19  | write        | i32     | Packed write format               |
//! | 20-27  | name         | char[8] | Short name, space padded          |
//!
//! Optional trailers: label (i32 length, text padded to 4 bytes) and
//! `|n_missing|` 8-byte missing values.

use crate::cursor::ByteCursor;
use crate::error::{Result, SavError};
use crate::trace::Trace;
use crate::types::{Field, FieldType, MissingValues, VariableFormat};

use super::{align_to, read_f64_at, read_i32_at, read_text};

/// Tag of a variable record.
pub const FIELD_RECORD_TAG: i32 = 2;

/// Size of the fixed variable record body.
const FIELD_BODY_LEN: usize = 28;

/// One raw variable record.
enum VariableRecord {
    Field(Field),
    Continuation,
}

/// Read variable records until a tag other than 2 appears.
///
/// The cursor is left on the first non-variable tag.
pub(crate) fn read_fields(cursor: &mut ByteCursor<'_>, trace: &mut Trace<'_>) -> Result<Vec<Field>> {
    let mut fields: Vec<Field> = Vec::new();
    let mut slot = 0u32;

    loop {
        let offset = cursor.position();
        let tag = cursor.read_i32_le()?;
        if tag != FIELD_RECORD_TAG {
            cursor.rewind(4)?;
            break;
        }
        slot += 1;

        match read_variable_record(cursor, offset, slot)? {
            VariableRecord::Field(field) => {
                trace.emit(format_args!(
                    "field {} ({}) at offset {offset}",
                    field.name, field.field_type
                ));
                fields.push(field);
            }
            VariableRecord::Continuation => {
                let owner = fields.last_mut().ok_or_else(|| {
                    SavError::invalid_format(format!(
                        "continuation record at offset {offset} has no preceding field"
                    ))
                })?;
                owner.trailers += 1;
            }
        }
    }

    trace.emit(format_args!("{} fields declared in {slot} slots", fields.len()));
    Ok(fields)
}

/// Read one variable record body and its trailers. The tag is already consumed.
fn read_variable_record(
    cursor: &mut ByteCursor<'_>,
    offset: usize,
    slot: u32,
) -> Result<VariableRecord> {
    let body = cursor.take(FIELD_BODY_LEN)?;
    let type_code = read_i32_at(body, 0);
    let has_label = read_i32_at(body, 4) != 0;
    let missing_count = read_i32_at(body, 8);
    let print_format = VariableFormat::from_packed(read_i32_at(body, 12));
    let write_format = VariableFormat::from_packed(read_i32_at(body, 16));
    let name = read_text(&body[20..28]);

    let label = if has_label {
        Some(read_label(cursor)?)
    } else {
        None
    };

    let field_type = FieldType::from_code(type_code);
    let missing = read_missing_values(cursor, field_type, missing_count, slot)?;

    let Some(field_type) = field_type else {
        return Ok(VariableRecord::Continuation);
    };

    Ok(VariableRecord::Field(Field {
        offset,
        slot,
        field_type,
        name,
        label,
        missing,
        trailers: 0,
        print_format,
        write_format,
    }))
}

/// Read a variable label: i32 length, then text padded to a multiple of 4.
fn read_label(cursor: &mut ByteCursor<'_>) -> Result<String> {
    let declared = cursor.read_i32_le()?;
    let len = usize::try_from(declared).map_err(|_| {
        SavError::invalid_format(format!(
            "variable label length: expected >= 0, found {declared}"
        ))
    })?;
    let text = cursor.take(align_to(len, 4))?;
    Ok(read_text(&text[..len]))
}

/// Read the missing-value block that follows a variable record.
fn read_missing_values(
    cursor: &mut ByteCursor<'_>,
    field_type: Option<FieldType>,
    count: i32,
    slot: u32,
) -> Result<Option<MissingValues>> {
    if count == 0 {
        return Ok(None);
    }
    let is_string = field_type.is_some_and(FieldType::is_string);
    let valid = match count {
        1..=3 => true,
        -3 | -2 => !is_string,
        _ => false,
    };
    if !valid {
        return Err(SavError::invalid_format(format!(
            "missing value count for slot {slot}: expected 0..=3 or -2/-3 (numeric only), found {count}"
        )));
    }

    let values = cursor.take(count.unsigned_abs() as usize * 8)?;
    let number = |index: usize| read_f64_at(values, index * 8);

    let missing = match (field_type, count) {
        // Continuation records carry no missing values of their own.
        (None, _) => return Ok(None),
        (Some(FieldType::String(_)), n) => MissingValues::Strings(
            (0..n as usize)
                .map(|index| read_text(&values[index * 8..index * 8 + 8]))
                .collect(),
        ),
        (Some(FieldType::Numeric), -2) => MissingValues::Range {
            low: number(0),
            high: number(1),
        },
        (Some(FieldType::Numeric), -3) => MissingValues::RangeAndValue {
            low: number(0),
            high: number(1),
            value: number(2),
        },
        (Some(FieldType::Numeric), n) => {
            MissingValues::Discrete((0..n as usize).map(number).collect())
        }
    };
    Ok(Some(missing))
}
