use std::collections::BTreeSet;
use std::fmt;

use thiserror::Error;

use super::schema::ColumnType;

/// Everything that can stop a dataset from loading. All variants are fatal:
/// no partial dataset is ever produced.
#[derive(Debug, Error)]
pub enum LoadError {
    /// The remote resource (or local file) could not be read.
    #[error("failed to fetch dataset from {location}")]
    Fetch {
        location: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// The bytes were read but are not well-formed CSV.
    #[error("malformed CSV")]
    Parse(#[from] csv::Error),

    /// One or more expected columns are absent from the header.
    #[error("missing expected columns: {}", ColumnList(missing))]
    Schema { missing: BTreeSet<String> },

    /// A cell could not be converted to its column's declared type.
    #[error("column '{column}', row {row}: cannot convert {value:?} to {expected}")]
    TypeCoercion {
        column: String,
        /// 1-based data row (the header is not counted).
        row: usize,
        value: String,
        expected: ColumnType,
    },
}

struct ColumnList<'a>(&'a BTreeSet<String>);

impl fmt::Display for ColumnList<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, name) in self.0.iter().enumerate() {
            if i > 0 {
                f.write_str(", ")?;
            }
            write!(f, "'{name}'")?;
        }
        Ok(())
    }
}
