use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use super::error::LoadError;
use super::schema::{
    COL_COMPANY_SIZE, COL_CONTRACT, COL_REMOTE, COL_RESIDENCE_ISO3, COL_ROLE, COL_SALARY_USD,
    COL_SENIORITY, COL_YEAR, Table,
};

// ---------------------------------------------------------------------------
// Record – one salary observation
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct Record {
    pub year: i64,
    pub seniority: String,
    pub contract_type: String,
    pub company_size: String,
    pub role: String,
    pub salary_usd: f64,
    pub remote_type: String,
    pub residence_country_code: String,
}

// ---------------------------------------------------------------------------
// FieldValue – a filterable cell
// ---------------------------------------------------------------------------

/// Value of a filterable field. Years stay numeric so they sort as numbers.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FieldValue {
    Integer(i64),
    Text(String),
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Integer(i) => write!(f, "{i}"),
            FieldValue::Text(s) => write!(f, "{s}"),
        }
    }
}

// ---------------------------------------------------------------------------
// FilterField – the four sidebar dimensions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FilterField {
    Year,
    Seniority,
    ContractType,
    CompanySize,
}

impl FilterField {
    pub const ALL: [FilterField; 4] = [
        FilterField::Year,
        FilterField::Seniority,
        FilterField::ContractType,
        FilterField::CompanySize,
    ];

    /// Sidebar label.
    pub fn label(self) -> &'static str {
        match self {
            FilterField::Year => "Year",
            FilterField::Seniority => "Seniority",
            FilterField::ContractType => "Contract type",
            FilterField::CompanySize => "Company size",
        }
    }

    pub fn value_of(self, record: &Record) -> FieldValue {
        match self {
            FilterField::Year => FieldValue::Integer(record.year),
            FilterField::Seniority => FieldValue::Text(record.seniority.clone()),
            FilterField::ContractType => FieldValue::Text(record.contract_type.clone()),
            FilterField::CompanySize => FieldValue::Text(record.company_size.clone()),
        }
    }
}

// ---------------------------------------------------------------------------
// Dataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// Validated, sanitized records plus the sorted distinct values of every
/// filterable field. Never mutated once built.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub records: Vec<Record>,
    pub options: BTreeMap<FilterField, BTreeSet<FieldValue>>,
}

impl Dataset {
    /// Build option indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut options: BTreeMap<FilterField, BTreeSet<FieldValue>> = FilterField::ALL
            .iter()
            .map(|&f| (f, BTreeSet::new()))
            .collect();

        for rec in &records {
            for field in FilterField::ALL {
                options
                    .entry(field)
                    .or_default()
                    .insert(field.value_of(rec));
            }
        }

        Dataset { records, options }
    }

    /// Assemble records from a validated table.
    pub fn from_table(table: &Table) -> Result<Self, LoadError> {
        let missing = |name: &str| LoadError::Schema {
            missing: BTreeSet::from([name.to_string()]),
        };
        let text = |name: &'static str| table.texts(name).ok_or_else(|| missing(name));

        let years = table.integers(COL_YEAR).ok_or_else(|| missing(COL_YEAR))?;
        let salaries = table
            .floats(COL_SALARY_USD)
            .ok_or_else(|| missing(COL_SALARY_USD))?;
        let seniority = text(COL_SENIORITY)?;
        let contract = text(COL_CONTRACT)?;
        let company_size = text(COL_COMPANY_SIZE)?;
        let role = text(COL_ROLE)?;
        let remote = text(COL_REMOTE)?;
        let residence = text(COL_RESIDENCE_ISO3)?;

        let records = (0..table.row_count)
            .map(|i| Record {
                year: years[i],
                seniority: seniority[i].clone(),
                contract_type: contract[i].clone(),
                company_size: company_size[i].clone(),
                role: role[i].clone(),
                salary_usd: salaries[i],
                remote_type: remote[i].clone(),
                residence_country_code: residence[i].clone(),
            })
            .collect();

        Ok(Self::from_records(records))
    }

    /// Sorted distinct values of `field`.
    pub fn options(&self, field: FilterField) -> Option<&BTreeSet<FieldValue>> {
        self.options.get(&field)
    }

    /// Number of records.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Whether the dataset is empty.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::data::schema::{ColumnValues, TypedColumn};

    pub(crate) fn record(year: i64, seniority: &str, role: &str, salary_usd: f64) -> Record {
        Record {
            year,
            seniority: seniority.into(),
            contract_type: "integral".into(),
            company_size: "media".into(),
            role: role.into(),
            salary_usd,
            remote_type: "remoto".into(),
            residence_country_code: "USA".into(),
        }
    }

    #[test]
    fn test_options_are_sorted_and_distinct() {
        let ds = Dataset::from_records(vec![
            record(2024, "senior", "A", 1.0),
            record(2021, "junior", "B", 2.0),
            record(2024, "pleno", "C", 3.0),
        ]);
        let years: Vec<_> = ds.options(FilterField::Year).unwrap().iter().cloned().collect();
        assert_eq!(years, vec![FieldValue::Integer(2021), FieldValue::Integer(2024)]);
        let levels: Vec<String> = ds
            .options(FilterField::Seniority)
            .unwrap()
            .iter()
            .map(|v| v.to_string())
            .collect();
        assert_eq!(levels, vec!["junior", "pleno", "senior"]);
        assert_eq!(ds.options(FilterField::CompanySize).unwrap().len(), 1);
    }

    #[test]
    fn test_empty_dataset_has_empty_options() {
        let ds = Dataset::from_records(Vec::new());
        assert!(ds.is_empty());
        for field in FilterField::ALL {
            assert!(ds.options(field).unwrap().is_empty());
        }
    }

    #[test]
    fn test_from_table_rejects_mistyped_column() {
        let table = Table {
            columns: vec![TypedColumn {
                name: COL_YEAR.into(),
                values: ColumnValues::Text(vec!["2024".into()]),
            }],
            row_count: 1,
        };
        let err = Dataset::from_table(&table).unwrap_err();
        assert!(matches!(err, LoadError::Schema { missing } if missing.contains(COL_YEAR)));
    }
}
