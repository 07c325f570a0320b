use std::time::Duration;

// ---------------------------------------------------------------------------
// Defaults
// ---------------------------------------------------------------------------

/// Public salary dataset the dashboard reads on start-up.
pub const DATASET_URL: &str = concat!(
    "https://raw.githubusercontent.com/vqrca/",
    "dashboard_salarios_dados/",
    "main/dados-imersao-final.csv"
);

/// Maximum number of rows rendered in the detail table.
pub const MAX_TABLE_ROWS: usize = 1000;

/// Maximum length (in characters) kept for any text cell.
pub const MAX_TEXT_LEN: usize = 100;

/// Number of equal-width buckets in the salary histogram.
pub const HISTOGRAM_BUCKETS: usize = 30;

/// How many roles the "top roles by mean salary" chart shows.
pub const TOP_ROLES: usize = 10;

/// Role whose salaries are broken down per country of residence.
pub const FOCUS_ROLE: &str = "Data Scientist";

const FETCH_TIMEOUT: Duration = Duration::from_secs(30);

// ---------------------------------------------------------------------------
// DashboardConfig
// ---------------------------------------------------------------------------

/// Tunables for loading and summarising the dataset.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardConfig {
    pub source_url: String,
    /// Upper bound on the HTTP fetch; a hung request otherwise blocks the UI forever.
    pub fetch_timeout: Duration,
    pub max_table_rows: usize,
    pub max_text_len: usize,
    pub histogram_buckets: usize,
    pub top_roles: usize,
    pub focus_role: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            source_url: DATASET_URL.to_string(),
            fetch_timeout: FETCH_TIMEOUT,
            max_table_rows: MAX_TABLE_ROWS,
            max_text_len: MAX_TEXT_LEN,
            histogram_buckets: HISTOGRAM_BUCKETS,
            top_roles: TOP_ROLES,
            focus_role: FOCUS_ROLE.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = DashboardConfig::default();
        assert!(config.source_url.ends_with("dados-imersao-final.csv"));
        assert_eq!(config.max_table_rows, 1000);
        assert_eq!(config.max_text_len, 100);
        assert_eq!(config.histogram_buckets, 30);
        assert_eq!(config.top_roles, 10);
        assert_eq!(config.focus_role, "Data Scientist");
    }
}
