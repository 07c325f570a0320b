use std::collections::BTreeSet;

use super::model::{Dataset, FieldValue, FilterField, Record};

// ---------------------------------------------------------------------------
// Filter selection: which values are allowed per field
// ---------------------------------------------------------------------------

/// Allowed values for each of the four filterable fields.
///
/// Every field always has a set. An empty set allows nothing, so any field
/// left empty empties the whole view.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterSelection {
    years: BTreeSet<FieldValue>,
    seniority: BTreeSet<FieldValue>,
    contract_types: BTreeSet<FieldValue>,
    company_sizes: BTreeSet<FieldValue>,
}

impl FilterSelection {
    /// Selection with every value of `dataset` allowed (i.e., show everything).
    pub fn all(dataset: &Dataset) -> Self {
        let mut selection = Self::default();
        for field in FilterField::ALL {
            selection.select_all(field, dataset);
        }
        selection
    }

    pub fn allowed(&self, field: FilterField) -> &BTreeSet<FieldValue> {
        match field {
            FilterField::Year => &self.years,
            FilterField::Seniority => &self.seniority,
            FilterField::ContractType => &self.contract_types,
            FilterField::CompanySize => &self.company_sizes,
        }
    }

    fn allowed_mut(&mut self, field: FilterField) -> &mut BTreeSet<FieldValue> {
        match field {
            FilterField::Year => &mut self.years,
            FilterField::Seniority => &mut self.seniority,
            FilterField::ContractType => &mut self.contract_types,
            FilterField::CompanySize => &mut self.company_sizes,
        }
    }

    /// Replace the allowed set for `field`.
    #[cfg(test)]
    pub fn set(&mut self, field: FilterField, values: impl IntoIterator<Item = FieldValue>) {
        *self.allowed_mut(field) = values.into_iter().collect();
    }

    /// Builder-style [`set`](Self::set).
    #[cfg(test)]
    pub fn with(mut self, field: FilterField, values: impl IntoIterator<Item = FieldValue>) -> Self {
        self.set(field, values);
        self
    }

    /// Flip a single value in or out of `field`'s set.
    pub fn toggle(&mut self, field: FilterField, value: &FieldValue) {
        let allowed = self.allowed_mut(field);
        if !allowed.remove(value) {
            allowed.insert(value.clone());
        }
    }

    pub fn select_all(&mut self, field: FilterField, dataset: &Dataset) {
        let all = dataset.options(field).cloned().unwrap_or_default();
        *self.allowed_mut(field) = all;
    }

    pub fn clear(&mut self, field: FilterField) {
        self.allowed_mut(field).clear();
    }

    /// Whether `record` passes every field's predicate.
    pub fn matches(&self, record: &Record) -> bool {
        FilterField::ALL
            .iter()
            .all(|&field| self.allowed(field).contains(&field.value_of(record)))
    }
}

// ---------------------------------------------------------------------------
// Filtering
// ---------------------------------------------------------------------------

/// Return indices of records that pass all field predicates, in dataset order.
pub fn filtered_indices(dataset: &Dataset, selection: &FilterSelection) -> Vec<usize> {
    if FilterField::ALL
        .iter()
        .any(|&f| selection.allowed(f).is_empty())
    {
        return Vec::new();
    }
    dataset
        .records
        .iter()
        .enumerate()
        .filter(|(_, rec)| selection.matches(rec))
        .map(|(i, _)| i)
        .collect()
}

// ---------------------------------------------------------------------------
// FilteredView – borrowed subsequence of a dataset
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct FilteredView<'a> {
    dataset: &'a Dataset,
    indices: Vec<usize>,
}

impl<'a> FilteredView<'a> {
    pub fn new(dataset: &'a Dataset, selection: &FilterSelection) -> Self {
        Self {
            dataset,
            indices: filtered_indices(dataset, selection),
        }
    }

    /// Unfiltered view over the whole dataset.
    #[cfg(test)]
    pub fn all(dataset: &'a Dataset) -> Self {
        Self {
            dataset,
            indices: (0..dataset.len()).collect(),
        }
    }

    /// Apply `selection` again on top of this view. Used to check that
    /// filtering is idempotent; the app always filters from the dataset.
    #[cfg(test)]
    pub fn refine(&self, selection: &FilterSelection) -> Self {
        let indices = self
            .indices
            .iter()
            .copied()
            .filter(|&i| selection.matches(&self.dataset.records[i]))
            .collect();
        Self {
            dataset: self.dataset,
            indices,
        }
    }

    pub fn records(&self) -> impl Iterator<Item = &'a Record> + Clone + '_ {
        let dataset = self.dataset;
        self.indices.iter().map(move |&i| &dataset.records[i])
    }

    #[cfg(test)]
    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn into_indices(self) -> Vec<usize> {
        self.indices
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }
}
