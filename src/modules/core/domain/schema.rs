//! Declared schema of the observations store
//!
//! The gateway never reflects table structure from the live store. Instead it
//! carries this declaration and checks it against the store at startup,
//! refusing to serve when a table or column is missing.

use std::fmt;

use crate::error::{ClimateError, Result};

/// Version of the declared schema. Bump when a table or column changes.
pub const SCHEMA_VERSION: u32 = 1;

/// A table and the columns the gateway reads from it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableSchema {
    pub name: &'static str,
    pub columns: &'static [&'static str],
}

impl TableSchema {
    /// Columns declared here that are absent from `actual`.
    ///
    /// Comparison is case-insensitive; extra columns in the store are fine.
    pub fn missing_columns<S: AsRef<str>>(&self, actual: &[S]) -> Vec<&'static str> {
        self.columns
            .iter()
            .copied()
            .filter(|declared| {
                !actual
                    .iter()
                    .any(|column| column.as_ref().eq_ignore_ascii_case(declared))
            })
            .collect()
    }

    /// Check the store's column list for this table
    pub fn check<S: AsRef<str>>(&self, actual: &[S]) -> Result<()> {
        if actual.is_empty() {
            return Err(ClimateError::SchemaMismatch(format!(
                "table '{}' does not exist (schema v{})",
                self.name, SCHEMA_VERSION
            )));
        }

        let missing = self.missing_columns(actual);
        if !missing.is_empty() {
            return Err(ClimateError::SchemaMismatch(format!(
                "table '{}' is missing column(s) {} (schema v{})",
                self.name,
                missing.join(", "),
                SCHEMA_VERSION
            )));
        }

        Ok(())
    }
}

impl fmt::Display for TableSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}({})", self.name, self.columns.join(", "))
    }
}

/// Full declared schema
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Schema {
    pub version: u32,
    pub tables: &'static [TableSchema],
}

impl Schema {
    /// Daily readings: one row per station per day
    pub const MEASUREMENT: TableSchema = TableSchema {
        name: "measurement",
        columns: &["station", "date", "prcp", "tobs"],
    };

    /// Station metadata
    pub const STATION: TableSchema = TableSchema {
        name: "station",
        columns: &["station", "name", "latitude", "longitude", "elevation"],
    };

    const TABLES: &'static [TableSchema] = &[Self::MEASUREMENT, Self::STATION];

    /// The schema this build of the gateway expects
    pub const fn current() -> Self {
        Self {
            version: SCHEMA_VERSION,
            tables: Self::TABLES,
        }
    }
}

impl Default for Schema {
    fn default() -> Self {
        Self::current()
    }
}
