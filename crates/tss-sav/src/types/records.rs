//! Auxiliary dictionary records.

use std::collections::{BTreeMap, BTreeSet};

/// Byte order of raw numeric cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Endianness {
    /// Most significant byte first.
    Big,
    /// Least significant byte first.
    #[default]
    Little,
}

impl Endianness {
    /// Map the integer-info endianness code (1 = big, 2 = little).
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            1 => Some(Self::Big),
            2 => Some(Self::Little),
            _ => None,
        }
    }

    /// Decode an 8-byte float in this byte order.
    #[must_use]
    pub fn read_f64(self, bytes: [u8; 8]) -> f64 {
        match self {
            Self::Big => f64::from_be_bytes(bytes),
            Self::Little => f64::from_le_bytes(bytes),
        }
    }
}

/// Machine and encoding description (extension subtype 3).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct IntegerInfo {
    pub version_major: i32,
    pub version_minor: i32,
    pub version_revision: i32,
    pub machine_code: i32,
    pub float_representation: i32,
    pub compression_code: i32,
    pub endianness: i32,
    pub character_code: i32,
}

impl IntegerInfo {
    /// Byte order of raw numeric cells, if the code is recognised.
    #[must_use]
    pub fn byte_order(&self) -> Option<Endianness> {
        Endianness::from_code(self.endianness)
    }
}

/// Floating point sentinels (extension subtype 4).
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FloatInfo {
    /// System-missing value.
    pub sysmis: f64,
    /// Value standing for `HIGHEST` in missing ranges.
    pub highest: f64,
    /// Value standing for `LOWEST` in missing ranges.
    pub lowest: f64,
}

/// Per-variable display parameters (extension subtype 11).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct DisplayFormat {
    /// Measurement level code, passed through undecoded.
    pub measure: i32,
    /// Column width.
    pub width: i32,
    /// Alignment code.
    pub alignment: i32,
}

/// One level of a value-label table.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueLabel {
    pub value: f64,
    pub label: String,
}

/// Value labels and the variables they apply to.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ValueLabelTable {
    /// Levels in file order.
    pub labels: Vec<ValueLabel>,
    /// 1-based dictionary indices of the variables using this table.
    pub variables: BTreeSet<u32>,
}

impl ValueLabelTable {
    /// Label for a stored value.
    #[must_use]
    pub fn label_for(&self, value: f64) -> Option<&str> {
        self.labels
            .iter()
            .find(|level| level.value == value)
            .map(|level| level.label.as_str())
    }

    /// Whether the table applies to the variable at `slot`.
    #[must_use]
    pub fn applies_to(&self, slot: u32) -> bool {
        self.variables.contains(&slot)
    }
}

/// Extension record of a subtype this reader does not decode.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ExtensionBlock {
    pub subtype: i32,
    pub element_size: usize,
    /// `element_count` records of `element_size` bytes each.
    pub records: Vec<Vec<u8>>,
}

impl ExtensionBlock {
    /// Total payload size in bytes.
    #[must_use]
    pub fn byte_len(&self) -> usize {
        self.element_size * self.records.len()
    }
}

/// One decoded record from the auxiliary stream.
#[derive(Debug, Clone, PartialEq)]
pub enum InternalRecord {
    ValueLabels(ValueLabelTable),
    Documents(Vec<String>),
    IntegerInfo(IntegerInfo),
    FloatInfo(FloatInfo),
    DisplayFormats(Vec<DisplayFormat>),
    LongNames(Vec<(String, String)>),
    LongStringWidths(Vec<(String, usize)>),
    /// Subtype 21 payload, kept verbatim; its layout is not decoded.
    AuxiliaryBlob(Vec<u8>),
    Extension(ExtensionBlock),
}

/// Everything the auxiliary stream declared.
#[derive(Debug, Clone, PartialEq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct InternalRecords {
    pub integer_info: Option<IntegerInfo>,
    pub float_info: Option<FloatInfo>,
    pub display_formats: Vec<DisplayFormat>,
    pub value_labels: Vec<ValueLabelTable>,
    pub documents: Vec<String>,
    /// Short name to long name.
    pub long_names: BTreeMap<String, String>,
    /// Short name to true string width.
    pub long_string_widths: BTreeMap<String, usize>,
    /// Subtype 21 payloads in file order.
    pub auxiliary_blobs: Vec<Vec<u8>>,
    pub extensions: Vec<ExtensionBlock>,
    /// Absolute offset of the first case.
    pub data_offset: usize,
}

/// Accumulates records until the terminator fixes the data offset.
#[derive(Debug, Default)]
pub struct InternalRecordsBuilder {
    records: InternalRecords,
}

impl InternalRecordsBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one record into the aggregate.
    ///
    /// Later integer/float info records replace earlier ones; every other
    /// kind accumulates in file order.
    pub fn push(&mut self, record: InternalRecord) {
        let records = &mut self.records;
        match record {
            InternalRecord::ValueLabels(table) => records.value_labels.push(table),
            InternalRecord::Documents(lines) => records.documents.extend(lines),
            InternalRecord::IntegerInfo(info) => records.integer_info = Some(info),
            InternalRecord::FloatInfo(info) => records.float_info = Some(info),
            InternalRecord::DisplayFormats(formats) => records.display_formats.extend(formats),
            InternalRecord::LongNames(pairs) => records.long_names.extend(pairs),
            InternalRecord::LongStringWidths(pairs) => records.long_string_widths.extend(pairs),
            InternalRecord::AuxiliaryBlob(blob) => records.auxiliary_blobs.push(blob),
            InternalRecord::Extension(block) => records.extensions.push(block),
        }
    }

    /// Freeze the aggregate.
    #[must_use]
    pub fn build(mut self, data_offset: usize) -> InternalRecords {
        self.records.data_offset = data_offset;
        self.records
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endianness() {
        let bytes = 1.5f64.to_be_bytes();
        assert_eq!(Endianness::Big.read_f64(bytes), 1.5);
        assert_eq!(Endianness::from_code(2), Some(Endianness::Little));
        assert_eq!(Endianness::from_code(9), None);
    }

    #[test]
    fn test_value_label_lookup() {
        let table = ValueLabelTable {
            labels: vec![
                ValueLabel {
                    value: 1.0,
                    label: "Male".to_string(),
                },
                ValueLabel {
                    value: 2.0,
                    label: "Female".to_string(),
                },
            ],
            variables: BTreeSet::from([3]),
        };
        assert_eq!(table.label_for(2.0), Some("Female"));
        assert_eq!(table.label_for(3.0), None);
        assert!(table.applies_to(3));
        assert!(!table.applies_to(1));
    }

    #[test]
    fn test_builder_accumulates() {
        let mut builder = InternalRecordsBuilder::new();
        builder.push(InternalRecord::Documents(vec!["one".to_string()]));
        builder.push(InternalRecord::Documents(vec!["two".to_string()]));
        builder.push(InternalRecord::LongNames(vec![(
            "V1".to_string(),
            "Version".to_string(),
        )]));
        builder.push(InternalRecord::LongNames(vec![(
            "V2".to_string(),
            "Variant".to_string(),
        )]));
        builder.push(InternalRecord::Extension(ExtensionBlock {
            subtype: 99,
            element_size: 2,
            records: vec![vec![1, 2], vec![3, 4]],
        }));

        let records = builder.build(512);
        assert_eq!(records.documents, vec!["one", "two"]);
        assert_eq!(records.long_names.len(), 2);
        assert_eq!(records.extensions[0].byte_len(), 4);
        assert_eq!(records.data_offset, 512);
        assert!(records.integer_info.is_none());
    }
}
