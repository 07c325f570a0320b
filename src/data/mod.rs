/// Data layer: schema, loading, filtering and aggregation.
///
/// Architecture:
/// ```text
///   remote .csv / local .csv
///        │
///        ▼
///   ┌──────────┐
///   │  loader   │  fetch → parse → RawTable
///   └──────────┘
///        │
///        ▼
///   ┌──────────────────┐
///   │ schema + sanitize │  typed Table, cleaned text → Dataset
///   └──────────────────┘
///        │  Arc<Dataset>
///        ▼
///   ┌──────────┐
///   │  filter   │  FilterSelection → FilteredView (indices)
///   └──────────┘
///        │
///        ▼
///   ┌───────────┐
///   │ aggregate  │  metrics + grouped series for the UI
///   └───────────┘
/// ```

pub mod aggregate;
pub mod error;
pub mod filter;
pub mod loader;
pub mod model;
pub mod sanitize;
pub mod schema;
