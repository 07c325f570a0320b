use std::path::Path;
use std::sync::Arc;

use crate::config::DashboardConfig;
use crate::data::aggregate::Aggregates;
use crate::data::error::LoadError;
use crate::data::filter::{FilterSelection, FilteredView};
use crate::data::loader::{DataLoader, DataSource};
use crate::data::model::{Dataset, FieldValue, FilterField};

/// Message shown in the top bar after a user action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusMessage {
    Info(String),
    Error(String),
}

impl StatusMessage {
    pub fn text(&self) -> &str {
        match self {
            StatusMessage::Info(msg) | StatusMessage::Error(msg) => msg,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, StatusMessage::Error(_))
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
pub struct AppState {
    pub config: DashboardConfig,

    loader: DataLoader,

    /// Loaded dataset (None until a load succeeds).
    pub dataset: Option<Arc<Dataset>>,

    /// Per-field filter selections.
    pub selection: FilterSelection,

    /// Indices of records passing the current filters (cached).
    pub visible_indices: Vec<usize>,

    /// Metrics and chart series for the current view.
    pub aggregates: Aggregates,

    /// Last load failure, shown instead of the dashboard.
    pub load_error: Option<String>,

    /// Outcome of the last load, shown in the top bar.
    pub status_message: Option<StatusMessage>,
}

impl AppState {
    pub fn new(config: DashboardConfig) -> Self {
        let loader = DataLoader::remote(&config);
        Self::with_loader(config, loader)
    }

    pub fn with_loader(config: DashboardConfig, loader: DataLoader) -> Self {
        Self {
            config,
            loader,
            dataset: None,
            selection: FilterSelection::default(),
            visible_indices: Vec::new(),
            aggregates: Aggregates::default(),
            load_error: None,
            status_message: None,
        }
    }

    pub fn source(&self) -> &DataSource {
        self.loader.source()
    }

    /// Load (or reuse) the dataset for the current source.
    pub fn load(&mut self) {
        let result = self.loader.load();
        self.apply_load(result);
    }

    /// Discard the cached dataset and fetch it again.
    pub fn reload(&mut self) {
        let result = self.loader.reload();
        self.apply_load(result);
    }

    /// Switch to a local CSV file and load it through the same pipeline.
    pub fn open_file(&mut self, path: &Path) {
        self.loader = DataLoader::new(DataSource::File(path.to_path_buf()), &self.config);
        self.load();
    }

    fn apply_load(&mut self, result: Result<Arc<Dataset>, LoadError>) {
        match result {
            Ok(dataset) => {
                self.set_dataset(dataset);
                self.status_message = self.dataset.as_ref().map(|ds| {
                    StatusMessage::Info(format!("Loaded {} records", ds.len()))
                });
            }
            Err(e) => {
                let e = anyhow::Error::new(e);
                log::error!("Failed to load dataset: {e:#}");
                self.dataset = None;
                self.visible_indices.clear();
                self.aggregates = Aggregates::default();
                self.load_error = Some(format!("{e:#}"));
                self.status_message = Some(StatusMessage::Error(format!("Error: {e:#}")));
            }
        }
    }

    /// Ingest a newly loaded dataset and select every filter value.
    pub fn set_dataset(&mut self, dataset: Arc<Dataset>) {
        self.selection = FilterSelection::all(&dataset);
        self.dataset = Some(dataset);
        self.load_error = None;
        self.status_message = None;
        self.refilter();
    }

    /// Recompute the view and every aggregate after a filter change.
    pub fn refilter(&mut self) {
        let Some(ds) = &self.dataset else {
            return;
        };
        let view = FilteredView::new(ds, &self.selection);
        log::debug!("Filter pass: {} of {} records visible", view.len(), ds.len());
        self.aggregates = Aggregates::compute(&view, &self.config);
        self.visible_indices = view.into_indices();
    }

    /// Toggle a single value in a field's filter.
    pub fn toggle_filter_value(&mut self, field: FilterField, value: &FieldValue) {
        self.selection.toggle(field, value);
        self.refilter();
    }

    /// Select all values of a field.
    pub fn select_all(&mut self, field: FilterField) {
        if let Some(ds) = &self.dataset {
            self.selection.select_all(field, ds);
            self.refilter();
        }
    }

    /// Deselect all values of a field.
    pub fn select_none(&mut self, field: FilterField) {
        self.selection.clear(field);
        self.refilter();
    }

    /// Rows for the detail table, capped for display.
    pub fn table_rows(&self) -> &[usize] {
        let n = self.visible_indices.len().min(self.config.max_table_rows);
        &self.visible_indices[..n]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::aggregate::NO_ROLE;
    use crate::data::model::Record;
    use crate::data::model::tests::record;

    fn state_with(records: Vec<Record>) -> AppState {
        let config = DashboardConfig {
            max_table_rows: 2,
            ..Default::default()
        };
        let loader = DataLoader::new(DataSource::File("unused.csv".into()), &config);
        let mut state = AppState::with_loader(config, loader);
        state.set_dataset(Arc::new(Dataset::from_records(records)));
        state
    }

    #[test]
    fn test_set_dataset_shows_everything() {
        let state = state_with(vec![
            record(2023, "junior", "A", 10.0),
            record(2024, "senior", "B", 30.0),
            record(2024, "senior", "B", 20.0),
        ]);
        assert_eq!(state.visible_indices, vec![0, 1, 2]);
        assert_eq!(state.aggregates.summary.count, 3);
        assert_eq!(state.aggregates.summary.most_frequent_role, "B");
        assert_eq!(state.table_rows(), &[0, 1]);
    }

    #[test]
    fn test_select_none_then_all() {
        let mut state = state_with(vec![
            record(2023, "junior", "A", 10.0),
            record(2024, "senior", "B", 30.0),
        ]);
        state.select_none(FilterField::Seniority);
        assert!(state.visible_indices.is_empty());
        assert_eq!(state.aggregates.summary.most_frequent_role, NO_ROLE);
        assert!(state.table_rows().is_empty());

        state.select_all(FilterField::Seniority);
        assert_eq!(state.visible_indices.len(), 2);
    }

    #[test]
    fn test_toggle_updates_aggregates() {
        let mut state = state_with(vec![
            record(2023, "junior", "A", 10.0),
            record(2024, "senior", "B", 30.0),
        ]);
        state.toggle_filter_value(FilterField::Year, &FieldValue::Integer(2023));
        assert_eq!(state.visible_indices, vec![1]);
        assert_eq!(state.aggregates.summary.max_salary, 30.0);
        let ds = state.dataset.as_ref().unwrap();
        assert_eq!(ds.records[state.visible_indices[0]].role, "B");
    }

    #[test]
    fn test_failed_load_clears_dataset() {
        let mut state = state_with(vec![record(2023, "junior", "A", 10.0)]);
        state.open_file(Path::new("/definitely/not/here/salaries.csv"));
        assert!(state.dataset.is_none());
        assert!(state.visible_indices.is_empty());
        let msg = state.load_error.as_deref().unwrap();
        assert!(msg.starts_with("failed to fetch dataset from /definitely/not/here/salaries.csv"));

        let status = state.status_message.as_ref().unwrap();
        assert!(status.is_error());
        assert!(status.text().starts_with("Error: failed to fetch dataset"));
    }

    #[test]
    fn test_successful_load_reports_info_status() {
        let path = std::env::temp_dir()
            .join(format!("salary_dashboard_state_{}.csv", std::process::id()));
        std::fs::write(
            &path,
            "ano,senioridade,contrato,tamanho_empresa,cargo,usd,remoto,residencia_iso3\n\
             2024,senior,integral,media,Data Scientist,150000.0,remoto,USA\n\
             2023,junior,integral,media,Data Analyst,60000.0,hibrido,BRA\n",
        )
        .unwrap();

        let mut state = state_with(Vec::new());
        state.open_file(&path);
        std::fs::remove_file(&path).unwrap();

        assert!(state.load_error.is_none());
        assert_eq!(
            state.status_message,
            Some(StatusMessage::Info("Loaded 2 records".to_string()))
        );
        assert!(!state.status_message.as_ref().unwrap().is_error());
    }
}
