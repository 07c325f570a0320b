use std::collections::BTreeSet;
use std::fmt;

use super::error::LoadError;

// ---------------------------------------------------------------------------
// Source column names
// ---------------------------------------------------------------------------

pub const COL_YEAR: &str = "ano";
pub const COL_SENIORITY: &str = "senioridade";
pub const COL_CONTRACT: &str = "contrato";
pub const COL_COMPANY_SIZE: &str = "tamanho_empresa";
pub const COL_ROLE: &str = "cargo";
pub const COL_SALARY_USD: &str = "usd";
pub const COL_REMOTE: &str = "remoto";
pub const COL_RESIDENCE_ISO3: &str = "residencia_iso3";

// ---------------------------------------------------------------------------
// Schema descriptor
// ---------------------------------------------------------------------------

/// Semantic type a column must coerce to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    Integer,
    Text,
    Float,
}

impl fmt::Display for ColumnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ColumnType::Integer => f.write_str("integer"),
            ColumnType::Text => f.write_str("text"),
            ColumnType::Float => f.write_str("float"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnSpec {
    pub name: &'static str,
    pub ty: ColumnType,
}

/// Ordered set of expected columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schema {
    pub columns: Vec<ColumnSpec>,
}

impl Schema {
    /// Layout of the published salary CSV.
    pub fn salary() -> Self {
        use ColumnType::*;
        let columns = [
            (COL_YEAR, Integer),
            (COL_SENIORITY, Text),
            (COL_CONTRACT, Text),
            (COL_COMPANY_SIZE, Text),
            (COL_ROLE, Text),
            (COL_SALARY_USD, Float),
            (COL_REMOTE, Text),
            (COL_RESIDENCE_ISO3, Text),
        ]
        .into_iter()
        .map(|(name, ty)| ColumnSpec { name, ty })
        .collect();
        Schema { columns }
    }

    /// Names of every column declared as text.
    pub fn text_columns(&self) -> Vec<&'static str> {
        self.columns
            .iter()
            .filter(|c| c.ty == ColumnType::Text)
            .map(|c| c.name)
            .collect()
    }
}

// ---------------------------------------------------------------------------
// RawTable – parsed CSV, every cell still a string
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h == name)
    }
}

// ---------------------------------------------------------------------------
// Table – validated, one typed vector per expected column
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub enum ColumnValues {
    Integer(Vec<i64>),
    Float(Vec<f64>),
    Text(Vec<String>),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TypedColumn {
    pub name: String,
    pub values: ColumnValues,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    pub columns: Vec<TypedColumn>,
    pub row_count: usize,
}

impl Table {
    pub fn column(&self, name: &str) -> Option<&TypedColumn> {
        self.columns.iter().find(|c| c.name == name)
    }

    pub fn integers(&self, name: &str) -> Option<&[i64]> {
        match &self.column(name)?.values {
            ColumnValues::Integer(v) => Some(v),
            _ => None,
        }
    }

    pub fn floats(&self, name: &str) -> Option<&[f64]> {
        match &self.column(name)?.values {
            ColumnValues::Float(v) => Some(v),
            _ => None,
        }
    }

    pub fn texts(&self, name: &str) -> Option<&[String]> {
        match &self.column(name)?.values {
            ColumnValues::Text(v) => Some(v),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

/// Check `raw` against `schema` and coerce every expected column.
///
/// Missing columns are all reported at once. Coercion is strict: integers
/// must parse as `i64` (no `"2.0"`), floats must parse and be finite, and
/// an empty numeric cell is an error rather than a null. Columns not named
/// in the schema are dropped.
pub fn validate(raw: &RawTable, schema: &Schema) -> Result<Table, LoadError> {
    let missing: BTreeSet<String> = schema
        .columns
        .iter()
        .filter(|spec| raw.column_index(spec.name).is_none())
        .map(|spec| spec.name.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(LoadError::Schema { missing });
    }

    let mut columns = Vec::with_capacity(schema.columns.len());
    for spec in &schema.columns {
        let idx = raw.column_index(spec.name).ok_or_else(|| LoadError::Schema {
            missing: BTreeSet::from([spec.name.to_string()]),
        })?;
        let cells = raw
            .rows
            .iter()
            .map(|row| row.get(idx).map(String::as_str).unwrap_or(""));
        let values = coerce_column(spec, cells)?;
        columns.push(TypedColumn {
            name: spec.name.to_string(),
            values,
        });
    }

    Ok(Table {
        columns,
        row_count: raw.rows.len(),
    })
}

fn coerce_column<'a>(
    spec: &ColumnSpec,
    cells: impl Iterator<Item = &'a str>,
) -> Result<ColumnValues, LoadError> {
    let fail = |row: usize, value: &str| LoadError::TypeCoercion {
        column: spec.name.to_string(),
        row: row + 1,
        value: value.to_string(),
        expected: spec.ty,
    };

    match spec.ty {
        ColumnType::Integer => cells
            .enumerate()
            .map(|(row, cell)| cell.trim().parse::<i64>().map_err(|_| fail(row, cell)))
            .collect::<Result<Vec<_>, _>>()
            .map(ColumnValues::Integer),
        ColumnType::Float => cells
            .enumerate()
            .map(|(row, cell)| {
                cell.trim()
                    .parse::<f64>()
                    .ok()
                    .filter(|v| v.is_finite())
                    .ok_or_else(|| fail(row, cell))
            })
            .collect::<Result<Vec<_>, _>>()
            .map(ColumnValues::Float),
        ColumnType::Text => Ok(ColumnValues::Text(
            cells.map(str::to_string).collect(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw(headers: &[&str], rows: &[&[&str]]) -> RawTable {
        RawTable {
            headers: headers.iter().map(|h| h.to_string()).collect(),
            rows: rows
                .iter()
                .map(|r| r.iter().map(|c| c.to_string()).collect())
                .collect(),
        }
    }

    const HEADERS: [&str; 8] = [
        "ano",
        "senioridade",
        "contrato",
        "tamanho_empresa",
        "cargo",
        "usd",
        "remoto",
        "residencia_iso3",
    ];

    #[test]
    fn test_salary_schema_layout() {
        let schema = Schema::salary();
        assert_eq!(schema.columns.len(), 8);
        assert_eq!(
            schema.text_columns(),
            vec![
                "senioridade",
                "contrato",
                "tamanho_empresa",
                "cargo",
                "remoto",
                "residencia_iso3"
            ]
        );
    }

    #[test]
    fn test_validate_coerces_all_columns() {
        let table = raw(
            &HEADERS,
            &[&[
                "2024", "senior", "integral", "media", "Data Scientist", "120000.5", "remoto",
                "BRA",
            ]],
        );
        let typed = validate(&table, &Schema::salary()).unwrap();
        assert_eq!(typed.row_count, 1);
        assert_eq!(typed.integers("ano"), Some(&[2024][..]));
        assert_eq!(typed.floats("usd"), Some(&[120000.5][..]));
        assert_eq!(typed.texts("cargo").unwrap()[0], "Data Scientist");
    }

    #[test]
    fn test_missing_columns_reported_together() {
        let table = raw(&["ano", "cargo", "extra"], &[]);
        let err = validate(&table, &Schema::salary()).unwrap_err();
        match err {
            LoadError::Schema { missing } => {
                let expected: BTreeSet<String> = [
                    "senioridade",
                    "contrato",
                    "tamanho_empresa",
                    "usd",
                    "remoto",
                    "residencia_iso3",
                ]
                .into_iter()
                .map(String::from)
                .collect();
                assert_eq!(missing, expected);
            }
            other => panic!("expected schema error, got {other:?}"),
        }
    }

    #[test]
    fn test_integer_column_rejects_fraction() {
        let table = raw(
            &HEADERS,
            &[
                &["2023", "s", "c", "m", "r", "1", "x", "USA"],
                &["2.5", "s", "c", "m", "r", "1", "x", "USA"],
            ],
        );
        let err = validate(&table, &Schema::salary()).unwrap_err();
        match err {
            LoadError::TypeCoercion {
                column,
                row,
                value,
                expected,
            } => {
                assert_eq!(column, "ano");
                assert_eq!(row, 2);
                assert_eq!(value, "2.5");
                assert_eq!(expected, ColumnType::Integer);
            }
            other => panic!("expected coercion error, got {other:?}"),
        }
    }

    #[test]
    fn test_float_column_rejects_empty_and_nan() {
        for bad in ["", "NaN", "inf", "lots"] {
            let table = raw(&HEADERS, &[&["2023", "s", "c", "m", "r", bad, "x", "USA"]]);
            let err = validate(&table, &Schema::salary()).unwrap_err();
            assert!(
                matches!(err, LoadError::TypeCoercion { ref column, .. } if column == "usd"),
                "{bad:?} should not coerce"
            );
        }
    }

    #[test]
    fn test_numeric_cells_tolerate_padding() {
        let table = raw(
            &HEADERS,
            &[&[" 2022 ", "s", "c", "m", "r", " 99.5", "x", "USA"]],
        );
        let typed = validate(&table, &Schema::salary()).unwrap();
        assert_eq!(typed.integers("ano"), Some(&[2022][..]));
        assert_eq!(typed.floats("usd"), Some(&[99.5][..]));
    }

    #[test]
    fn test_extra_columns_are_dropped() {
        let mut headers = HEADERS.to_vec();
        headers.push("moeda");
        let table = raw(
            &headers,
            &[&["2023", "s", "c", "m", "r", "1", "x", "USA", "BRL"]],
        );
        let typed = validate(&table, &Schema::salary()).unwrap();
        assert!(typed.column("moeda").is_none());
        assert_eq!(typed.columns.len(), 8);
    }
}
