//! Polars DataFrame conversion.

use polars::prelude::{Column, DataFrame, NamedFrom, PolarsResult};

use crate::types::{FieldType, SavFile, SavValue};

impl SavFile {
    /// Convert decoded rows into a DataFrame, one column per field.
    ///
    /// Numeric fields become `f64` columns and string fields `str` columns;
    /// `Null` cells become nulls.
    pub fn to_dataframe(&self) -> PolarsResult<DataFrame> {
        let columns = self
            .schema
            .fields
            .iter()
            .enumerate()
            .map(|(index, field)| {
                let name = self.schema.long_name(field);
                match field.field_type {
                    FieldType::Numeric => {
                        let values: Vec<Option<f64>> = self
                            .rows
                            .iter()
                            .map(|row| row.values().nth(index).and_then(SavValue::as_f64))
                            .collect();
                        Column::new(name.into(), values)
                    }
                    FieldType::String(_) => {
                        let values: Vec<Option<String>> = self
                            .rows
                            .iter()
                            .map(|row| {
                                row.values()
                                    .nth(index)
                                    .and_then(SavValue::as_str)
                                    .map(str::to_string)
                            })
                            .collect();
                        Column::new(name.into(), values)
                    }
                }
            })
            .collect::<Vec<_>>();
        DataFrame::new(columns)
    }
}
