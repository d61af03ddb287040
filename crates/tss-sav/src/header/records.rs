//! Auxiliary record stream.
//!
//! After the variable records come tagged records until the terminator:
//!
//! | Tag | Record                                                      |
//! |-----|-------------------------------------------------------------|
//! | 3   | Value-label table, followed by its variable-index block     |
//! | 6   | Document lines (80 bytes each)                              |
//! | 7   | Extension record (see [`super::extension`])                 |
//! | 999 | Terminator; case data starts after 4 bytes of padding       |

use std::collections::BTreeSet;

use crate::cursor::ByteCursor;
use crate::error::{Result, SavError};
use crate::trace::Trace;
use crate::types::{
    InternalRecord, InternalRecords, InternalRecordsBuilder, ValueLabel, ValueLabelTable,
};

use super::extension::read_extension;
use super::{align_to, read_text};

/// Value-label table tag.
pub const VALUE_LABEL_TAG: i32 = 3;
/// Magic that introduces the variable-index block of a value-label table.
pub const VALUE_LABEL_MAGIC: i32 = 4;
/// Document record tag.
pub const DOCUMENT_TAG: i32 = 6;
/// Extension record tag.
pub const EXTENSION_TAG: i32 = 7;
/// Dictionary terminator tag.
pub const TERMINATOR_TAG: i32 = 999;
/// Tags accepted in the auxiliary stream, for error messages.
pub const ALLOWED_RECORD_TAGS: &str = "{3, 6, 7, 999}";
/// Width of one document line.
pub const DOCUMENT_LINE_LEN: usize = 80;

/// Read auxiliary records up to and including the terminator.
pub(crate) fn read_internal_records(
    cursor: &mut ByteCursor<'_>,
    trace: &mut Trace<'_>,
) -> Result<InternalRecords> {
    let mut builder = InternalRecordsBuilder::new();

    loop {
        let offset = cursor.position();
        let tag = cursor.read_i32_le()?;
        let record = match tag {
            VALUE_LABEL_TAG => InternalRecord::ValueLabels(read_value_labels(cursor)?),
            DOCUMENT_TAG => InternalRecord::Documents(read_documents(cursor)?),
            EXTENSION_TAG => read_extension(cursor)?,
            TERMINATOR_TAG => {
                cursor.take(4)?;
                let data_offset = cursor.position();
                trace.emit(format_args!("dictionary ends, case data at offset {data_offset}"));
                return Ok(builder.build(data_offset));
            }
            other => {
                return Err(SavError::UnknownRecordType {
                    tag: other,
                    offset,
                    expected: ALLOWED_RECORD_TAGS,
                });
            }
        };
        trace.emit(format_args!("{} at offset {offset}", describe(&record)));
        builder.push(record);
    }
}

/// Read a value-label table and its variable-index block.
fn read_value_labels(cursor: &mut ByteCursor<'_>) -> Result<ValueLabelTable> {
    let count = read_count(cursor, "value label count")?;
    let mut labels = Vec::with_capacity(count.min(1024));
    for _ in 0..count {
        let value = cursor.read_f64_le()?;
        let len = usize::from(cursor.take(1)?[0]);
        // Length byte plus text is padded to a multiple of 8.
        let text = cursor.take(align_to(len + 1, 8) - 1)?;
        labels.push(ValueLabel {
            value,
            label: String::from_utf8_lossy(&text[..len]).into_owned(),
        });
    }

    let magic = cursor.read_i32_le()?;
    if magic != VALUE_LABEL_MAGIC {
        return Err(SavError::MagicMismatch {
            record: "value label table",
            expected: VALUE_LABEL_MAGIC,
            actual: magic,
        });
    }
    let variable_count = read_count(cursor, "value label variable count")?;
    let mut variables = BTreeSet::new();
    for _ in 0..variable_count {
        let index = cursor.read_i32_le()?;
        let index = u32::try_from(index).map_err(|_| {
            SavError::invalid_format(format!(
                "value label variable index: expected >= 0, found {index}"
            ))
        })?;
        variables.insert(index);
    }

    Ok(ValueLabelTable { labels, variables })
}

/// Read document lines.
fn read_documents(cursor: &mut ByteCursor<'_>) -> Result<Vec<String>> {
    let count = read_count(cursor, "document line count")?;
    (0..count)
        .map(|_| cursor.take(DOCUMENT_LINE_LEN).map(read_text))
        .collect()
}

/// Read a non-negative i32 count.
pub(crate) fn read_count(cursor: &mut ByteCursor<'_>, what: &str) -> Result<usize> {
    let count = cursor.read_i32_le()?;
    usize::try_from(count)
        .map_err(|_| SavError::invalid_format(format!("{what}: expected >= 0, found {count}")))
}

fn describe(record: &InternalRecord) -> String {
    match record {
        InternalRecord::ValueLabels(table) => format!(
            "value label table ({} levels, {} variables)",
            table.labels.len(),
            table.variables.len()
        ),
        InternalRecord::Documents(lines) => format!("documents ({} lines)", lines.len()),
        InternalRecord::IntegerInfo(info) => format!(
            "integer info (version {}.{}.{}, endianness {})",
            info.version_major, info.version_minor, info.version_revision, info.endianness
        ),
        InternalRecord::FloatInfo(info) => format!("float info (sysmis {})", info.sysmis),
        InternalRecord::DisplayFormats(formats) => {
            format!("display formats ({} variables)", formats.len())
        }
        InternalRecord::LongNames(pairs) => format!("long names ({} entries)", pairs.len()),
        InternalRecord::LongStringWidths(pairs) => {
            format!("long string widths ({} entries)", pairs.len())
        }
        InternalRecord::AuxiliaryBlob(blob) => format!("subtype 21 blob ({} bytes)", blob.len()),
        InternalRecord::Extension(block) => format!(
            "extension subtype {} ({} bytes)",
            block.subtype,
            block.byte_len()
        ),
    }
}
