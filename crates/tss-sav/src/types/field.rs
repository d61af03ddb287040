//! Variable dictionary entries.

/// Storage class of a field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldType {
    /// 8-byte floating point.
    Numeric,
    /// Fixed-width string of the given number of characters.
    String(u32),
}

impl FieldType {
    /// Map a non-negative type code to a field type.
    ///
    /// Negative codes mark continuation records and have no field type.
    #[must_use]
    pub fn from_code(code: i32) -> Option<Self> {
        match code {
            0 => Some(Self::Numeric),
            width if width > 0 => Some(Self::String(width as u32)),
            _ => None,
        }
    }

    /// Raw type code as stored in the dictionary.
    #[must_use]
    pub const fn code(self) -> i32 {
        match self {
            Self::Numeric => 0,
            Self::String(width) => width as i32,
        }
    }

    /// Number of 8-byte segments one cell occupies.
    #[must_use]
    pub const fn segments(self) -> usize {
        match self {
            Self::Numeric => 1,
            Self::String(width) => (width as usize).div_ceil(8),
        }
    }

    /// Whether this is a string type.
    #[must_use]
    pub const fn is_string(self) -> bool {
        matches!(self, Self::String(_))
    }
}

impl std::fmt::Display for FieldType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Numeric => write!(f, "Num"),
            Self::String(width) => write!(f, "A{width}"),
        }
    }
}

/// Print or write format packed into one dictionary word.
///
/// Layout (least significant byte first): decimals, width, format type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct VariableFormat {
    /// Format type code.
    pub format_type: u8,
    /// Display width.
    pub width: u8,
    /// Decimal places.
    pub decimals: u8,
}

impl VariableFormat {
    /// Unpack a format word.
    #[must_use]
    pub fn from_packed(packed: i32) -> Self {
        let [decimals, width, format_type, _] = packed.to_le_bytes();
        Self {
            format_type,
            width,
            decimals,
        }
    }
}

impl std::fmt::Display for VariableFormat {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}.{}", self.format_type, self.width, self.decimals)
    }
}

/// User-missing value declaration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum MissingValues {
    /// Up to three discrete numeric codes.
    Discrete(Vec<f64>),
    /// Inclusive numeric range.
    Range { low: f64, high: f64 },
    /// Inclusive numeric range plus one discrete code.
    RangeAndValue { low: f64, high: f64, value: f64 },
    /// Up to three 8-byte strings.
    Strings(Vec<String>),
}

impl MissingValues {
    /// Whether `value` is declared missing.
    #[must_use]
    pub fn contains_number(&self, value: f64) -> bool {
        match self {
            Self::Discrete(codes) => codes.contains(&value),
            Self::Range { low, high } => (*low..=*high).contains(&value),
            Self::RangeAndValue {
                low,
                high,
                value: code,
            } => (*low..=*high).contains(&value) || *code == value,
            Self::Strings(_) => false,
        }
    }

    /// Whether the string `value` is declared missing.
    #[must_use]
    pub fn contains_str(&self, value: &str) -> bool {
        match self {
            Self::Strings(codes) => codes.iter().any(|code| code == value),
            _ => false,
        }
    }
}

/// One declared variable.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Field {
    /// Byte offset of the record tag that declared this field.
    pub offset: usize,
    /// 1-based dictionary slot, counting continuation records.
    pub slot: u32,
    /// Storage class.
    pub field_type: FieldType,
    /// Short name, trimmed.
    pub name: String,
    /// Variable label.
    pub label: Option<String>,
    /// User-missing declaration.
    pub missing: Option<MissingValues>,
    /// Number of continuation records folded into this field.
    pub trailers: u32,
    /// Print format.
    pub print_format: VariableFormat,
    /// Write format.
    pub write_format: VariableFormat,
}

impl Field {
    /// Stored width in bytes, including continuation slots.
    #[must_use]
    pub fn stored_width(&self) -> usize {
        (self.trailers as usize + 1) * 8
    }

    /// Whether this is a string field.
    #[must_use]
    pub fn is_string(&self) -> bool {
        self.field_type.is_string()
    }
}
