//! Case data decoding.
//!
//! Uncompressed files store every cell as raw 8-byte segments. Compressed
//! files interleave 8-byte instruction blocks with literal segments:
//!
//! | Code    | Meaning                                               |
//! |---------|-------------------------------------------------------|
//! | 0       | Filler, skipped                                       |
//! | 1-251   | Numeric value `code - bias`                           |
//! | 252     | End of data                                           |
//! | 253     | Literal: the next 8 bytes after the block hold a value |
//! | 254     | String segment of spaces                              |
//! | 255     | System-missing                                        |

use crate::cursor::ByteCursor;
use crate::error::{Result, SavError};
use crate::trace::Trace;
use crate::types::{Endianness, Field, FieldType, Row, SavReaderOptions, SavValue, Schema};

/// Filler byte inside an instruction block.
pub const CODE_PADDING: u8 = 0;
/// End of compressed data.
pub const CODE_END_OF_DATA: u8 = 252;
/// Literal 8-byte segment follows.
pub const CODE_LITERAL: u8 = 253;
/// Blank string segment.
pub const CODE_BLANK: u8 = 254;
/// System-missing value.
pub const CODE_SYSMIS: u8 = 255;

/// Instruction codes per block.
const BLOCK_LEN: usize = 8;
/// Size of one stored segment.
const SEGMENT_LEN: usize = 8;

/// Serves instruction codes from 8-byte blocks, skipping filler.
#[derive(Debug)]
pub(crate) struct InstructionStream {
    block: [u8; BLOCK_LEN],
    next: usize,
}

impl InstructionStream {
    pub(crate) fn new() -> Self {
        Self {
            block: [CODE_PADDING; BLOCK_LEN],
            next: BLOCK_LEN,
        }
    }

    /// Next non-filler code, fetching blocks from the cursor as needed.
    pub(crate) fn next_code(&mut self, cursor: &mut ByteCursor<'_>) -> Result<u8> {
        loop {
            if self.next == BLOCK_LEN {
                self.block = cursor.take_array()?;
                self.next = 0;
            }
            let code = self.block[self.next];
            self.next += 1;
            if code != CODE_PADDING {
                return Ok(code);
            }
        }
    }

    /// Whether the stream has reached the end-of-data code or the buffer end.
    ///
    /// Does not consume the code it inspects.
    pub(crate) fn at_end(&mut self, cursor: &mut ByteCursor<'_>) -> Result<bool> {
        loop {
            while self.next < BLOCK_LEN && self.block[self.next] == CODE_PADDING {
                self.next += 1;
            }
            if self.next < BLOCK_LEN {
                return Ok(self.block[self.next] == CODE_END_OF_DATA);
            }
            if cursor.remaining() < BLOCK_LEN {
                return Ok(true);
            }
            self.block = cursor.take_array()?;
            self.next = 0;
        }
    }
}

/// Replays the case-data region of one file.
pub(crate) struct RowDecoder<'s> {
    schema: &'s Schema,
    options: &'s SavReaderOptions,
    endianness: Endianness,
    sysmis: f64,
    stream: Option<InstructionStream>,
}

impl<'s> RowDecoder<'s> {
    pub(crate) fn new(schema: &'s Schema, options: &'s SavReaderOptions) -> Self {
        Self {
            schema,
            options,
            endianness: schema.endianness(),
            sysmis: schema.sysmis(),
            stream: schema.is_compressed().then(InstructionStream::new),
        }
    }

    /// Decode all cases, restoring the cursor afterwards.
    pub(crate) fn decode(
        &mut self,
        cursor: &mut ByteCursor<'_>,
        trace: &mut Trace<'_>,
    ) -> Result<Vec<Row>> {
        let entry = cursor.position();
        let result = cursor
            .seek(self.schema.records.data_offset)
            .and_then(|()| self.decode_rows(cursor, trace));
        cursor.seek(entry)?;
        result
    }

    fn decode_rows(&mut self, cursor: &mut ByteCursor<'_>, trace: &mut Trace<'_>) -> Result<Vec<Row>> {
        let declared = self.schema.meta.case_count();
        let limit = match (declared, self.options.row_limit) {
            (Some(cases), Some(limit)) => Some(cases.min(limit)),
            (Some(cases), None) => Some(cases),
            (None, limit) => limit,
        };
        trace.emit(format_args!(
            "decoding {} cases from offset {} ({})",
            declared.map_or_else(|| "unknown".to_string(), |cases| cases.to_string()),
            cursor.position(),
            self.schema.meta.compression
        ));

        // A case without fields occupies no bytes, so the data region must be empty.
        if self.schema.fields.is_empty() {
            if !self.at_end_of_data(cursor)? {
                return Err(SavError::invalid_format(format!(
                    "case data at offset {}: expected none, no fields are declared",
                    cursor.position()
                )));
            }
            trace.emit("decoded 0 rows");
            return Ok(Vec::new());
        }

        let mut rows = Vec::with_capacity(limit.unwrap_or_default().min(65_536));
        loop {
            if limit.is_some_and(|limit| rows.len() >= limit) {
                break;
            }
            if declared.is_none() && self.at_end_of_data(cursor)? {
                break;
            }
            let row = self.decode_row(cursor)?;
            tracing::trace!(row = rows.len(), cells = row.len(), "decoded case");
            rows.push(row);
        }

        trace.emit(format_args!("decoded {} rows", rows.len()));
        Ok(rows)
    }

    fn at_end_of_data(&mut self, cursor: &mut ByteCursor<'_>) -> Result<bool> {
        match self.stream.as_mut() {
            Some(stream) => stream.at_end(cursor),
            None => Ok(cursor.exhausted()),
        }
    }

    fn decode_row(&mut self, cursor: &mut ByteCursor<'_>) -> Result<Row> {
        let schema = self.schema;
        let mut row = Row::with_capacity(schema.fields.len());
        for field in &schema.fields {
            let value = self.decode_cell(cursor, field)?;
            row.push(field.name.clone(), value);
        }
        Ok(row)
    }

    fn decode_cell(&mut self, cursor: &mut ByteCursor<'_>, field: &Field) -> Result<SavValue> {
        let value = match field.field_type {
            FieldType::Numeric => self.decode_numeric(cursor)?,
            FieldType::String(_) => self.decode_string(cursor, field.field_type.segments())?,
        };
        Ok(value)
    }

    fn decode_numeric(&mut self, cursor: &mut ByteCursor<'_>) -> Result<SavValue> {
        let value = match self.stream.as_mut() {
            None => self.endianness.read_f64(cursor.take_array()?),
            Some(stream) => match stream.next_code(cursor)? {
                CODE_END_OF_DATA => {
                    return Err(SavError::UnexpectedEndOfRecords {
                        offset: cursor.position(),
                    });
                }
                // Literals in compressed data are always little-endian.
                CODE_LITERAL => cursor.read_f64_le()?,
                CODE_BLANK => {
                    return Err(SavError::invalid_code(
                        CODE_BLANK,
                        "numeric cell",
                        "1-251, 253 or 255",
                    ));
                }
                CODE_SYSMIS => return Ok(SavValue::Null),
                code => f64::from(code) - self.schema.meta.bias,
            },
        };

        if self.options.system_missing_as_null && value == self.sysmis {
            return Ok(SavValue::Null);
        }
        Ok(SavValue::Num(value))
    }

    fn decode_string(&mut self, cursor: &mut ByteCursor<'_>, segments: usize) -> Result<SavValue> {
        let mut bytes = Vec::with_capacity(segments * SEGMENT_LEN);
        for _ in 0..segments {
            match self.stream.as_mut() {
                None => bytes.extend_from_slice(cursor.take(SEGMENT_LEN)?),
                Some(stream) => match stream.next_code(cursor)? {
                    CODE_LITERAL => bytes.extend_from_slice(cursor.take(SEGMENT_LEN)?),
                    CODE_BLANK => {}
                    CODE_SYSMIS => return Ok(SavValue::Null),
                    CODE_END_OF_DATA => {
                        return Err(SavError::UnexpectedEndOfRecords {
                            offset: cursor.position(),
                        });
                    }
                    code => {
                        return Err(SavError::invalid_code(code, "string cell", "253, 254 or 255"));
                    }
                },
            }
        }

        let text = String::from_utf8_lossy(&bytes);
        let text = if self.options.trim_strings {
            text.trim_end_matches([' ', '\0']).to_string()
        } else {
            text.into_owned()
        };
        Ok(SavValue::Str(text))
    }
}
