//! Decoded cell values and rows.

/// A single decoded cell.
#[derive(Debug, Clone, PartialEq)]
pub enum SavValue {
    /// Numeric value.
    Num(f64),
    /// String value.
    Str(String),
    /// System-missing or absent value.
    Null,
}

impl SavValue {
    /// Numeric content, if any.
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Num(value) => Some(*value),
            _ => None,
        }
    }

    /// String content, if any.
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::Str(value) => Some(value),
            _ => None,
        }
    }

    /// Whether this is `Null`.
    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl std::fmt::Display for SavValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Num(value) => write!(f, "{value}"),
            Self::Str(value) => write!(f, "{value}"),
            Self::Null => write!(f, "."),
        }
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for SavValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::Num(value) => serializer.serialize_f64(*value),
            Self::Str(value) => serializer.serialize_str(value),
            Self::Null => serializer.serialize_none(),
        }
    }
}

/// One case: field names paired with their values in declaration order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Row {
    cells: Vec<(String, SavValue)>,
}

impl Row {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            cells: Vec::with_capacity(capacity),
        }
    }

    /// Append a cell.
    pub fn push(&mut self, name: impl Into<String>, value: SavValue) {
        self.cells.push((name.into(), value));
    }

    /// Value of the named field.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&SavValue> {
        self.cells
            .iter()
            .find(|(cell_name, _)| cell_name == name)
            .map(|(_, value)| value)
    }

    /// Number of cells.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    /// Cells in declaration order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &SavValue)> {
        self.cells.iter().map(|(name, value)| (name.as_str(), value))
    }

    /// Values in declaration order.
    pub fn values(&self) -> impl Iterator<Item = &SavValue> {
        self.cells.iter().map(|(_, value)| value)
    }

    /// Consume the row into its cells.
    #[must_use]
    pub fn into_cells(self) -> Vec<(String, SavValue)> {
        self.cells
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for Row {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        use serde::ser::SerializeMap;

        let mut map = serializer.serialize_map(Some(self.cells.len()))?;
        for (name, value) in &self.cells {
            map.serialize_entry(name, value)?;
        }
        map.end()
    }
}
