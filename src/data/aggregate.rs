use std::cmp::Ordering;
use std::collections::BTreeMap;

use super::filter::FilteredView;
use super::model::Record;
use crate::config::DashboardConfig;

/// Shown in place of the most frequent role when nothing is selected.
pub const NO_ROLE: &str = "—";

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq)]
pub struct SummaryMetrics {
    pub mean_salary: f64,
    pub max_salary: f64,
    pub count: usize,
    pub most_frequent_role: String,
}

impl Default for SummaryMetrics {
    fn default() -> Self {
        Self {
            mean_salary: 0.0,
            max_salary: 0.0,
            count: 0,
            most_frequent_role: NO_ROLE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleSalary {
    pub role: String,
    pub mean_salary: f64,
}

/// Half-open `[lower, upper)` salary bucket; the last bucket also holds `upper`.
#[derive(Debug, Clone, PartialEq)]
pub struct HistogramBucket {
    pub lower: f64,
    pub upper: f64,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    pub value: String,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CountrySalary {
    pub country_code: String,
    pub mean_salary: f64,
    pub count: usize,
}

// ---------------------------------------------------------------------------
// Scalar metrics
// ---------------------------------------------------------------------------

/// Mean/max salary, record count and most frequent role.
///
/// When several roles tie for most frequent, the alphabetically first one
/// is reported.
pub fn summary_metrics<'a>(records: impl IntoIterator<Item = &'a Record>) -> SummaryMetrics {
    let mut count = 0usize;
    let mut sum = 0.0;
    let mut max = f64::NEG_INFINITY;
    let mut role_counts: BTreeMap<&str, usize> = BTreeMap::new();

    for rec in records {
        count += 1;
        sum += rec.salary_usd;
        max = max.max(rec.salary_usd);
        *role_counts.entry(rec.role.as_str()).or_default() += 1;
    }

    if count == 0 {
        return SummaryMetrics::default();
    }

    let mut most_frequent = NO_ROLE;
    let mut best = 0;
    for (role, n) in role_counts {
        if n > best {
            best = n;
            most_frequent = role;
        }
    }

    SummaryMetrics {
        mean_salary: sum / count as f64,
        max_salary: max,
        count,
        most_frequent_role: most_frequent.to_string(),
    }
}

// ---------------------------------------------------------------------------
// Grouped aggregates
// ---------------------------------------------------------------------------

/// Group by `key` and average salaries, keyed in sorted order.
fn mean_salary_by<'a, F>(
    records: impl IntoIterator<Item = &'a Record>,
    key: F,
) -> BTreeMap<&'a str, (f64, usize)>
where
    F: Fn(&'a Record) -> &'a str,
{
    let mut groups: BTreeMap<&str, (f64, usize)> = BTreeMap::new();
    for rec in records {
        let entry = groups.entry(key(rec)).or_default();
        entry.0 += rec.salary_usd;
        entry.1 += 1;
    }
    for (sum, n) in groups.values_mut() {
        *sum /= *n as f64;
    }
    groups
}

/// The `n` roles with the highest mean salary, listed from lowest to
/// highest mean so a horizontal bar chart reads top-down.
pub fn top_roles_by_mean_salary<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    n: usize,
) -> Vec<RoleSalary> {
    let mut roles: Vec<RoleSalary> = mean_salary_by(records, |r| r.role.as_str())
        .into_iter()
        .map(|(role, (mean, _))| RoleSalary {
            role: role.to_string(),
            mean_salary: mean,
        })
        .collect();

    roles.sort_by(|a, b| {
        b.mean_salary
            .total_cmp(&a.mean_salary)
            .then_with(|| a.role.cmp(&b.role))
    });
    roles.truncate(n);
    roles.reverse();
    roles
}

/// Equal-width histogram of salaries with exactly `buckets` buckets
/// spanning `[min, max]`. Empty input gives an empty histogram.
pub fn salary_histogram<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    buckets: usize,
) -> Vec<HistogramBucket> {
    let salaries: Vec<f64> = records.into_iter().map(|r| r.salary_usd).collect();
    if salaries.is_empty() || buckets == 0 {
        return Vec::new();
    }

    let min = salaries.iter().copied().fold(f64::INFINITY, f64::min);
    let max = salaries.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    // Degenerate range: unit-width buckets starting at the single value.
    let width = if max > min {
        (max - min) / buckets as f64
    } else {
        1.0
    };

    let mut hist: Vec<HistogramBucket> = (0..buckets)
        .map(|i| HistogramBucket {
            lower: min + i as f64 * width,
            upper: min + (i + 1) as f64 * width,
            count: 0,
        })
        .collect();

    for v in salaries {
        let idx = (((v - min) / width).floor() as usize).min(buckets - 1);
        hist[idx].count += 1;
    }
    hist
}

/// Count records per work arrangement, most common first.
pub fn remote_type_counts<'a>(records: impl IntoIterator<Item = &'a Record>) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for rec in records {
        *counts.entry(rec.remote_type.as_str()).or_default() += 1;
    }
    let mut out: Vec<CategoryCount> = counts
        .into_iter()
        .map(|(value, count)| CategoryCount {
            value: value.to_string(),
            count,
        })
        .collect();
    // Stable sort keeps ties in alphabetical order.
    out.sort_by(|a, b| b.count.cmp(&a.count));
    out
}

/// Mean salary per country of residence, restricted to records whose role
/// is exactly `role`. Sorted by country code.
pub fn mean_salary_by_country<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    role: &str,
) -> Vec<CountrySalary> {
    let matching = records.into_iter().filter(|r| r.role == role);
    mean_salary_by(matching, |r| r.residence_country_code.as_str())
        .into_iter()
        .map(|(code, (mean, count))| CountrySalary {
            country_code: code.to_string(),
            mean_salary: mean,
            count,
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Aggregates – everything one render pass needs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Aggregates {
    pub summary: SummaryMetrics,
    pub top_roles: Vec<RoleSalary>,
    pub histogram: Vec<HistogramBucket>,
    pub remote_types: Vec<CategoryCount>,
    pub focus_role_by_country: Vec<CountrySalary>,
}

impl Aggregates {
    pub fn compute(view: &FilteredView<'_>, config: &DashboardConfig) -> Self {
        if view.is_empty() {
            return Self::default();
        }
        Self {
            summary: summary_metrics(view.records()),
            top_roles: top_roles_by_mean_salary(view.records(), config.top_roles),
            histogram: salary_histogram(view.records(), config.histogram_buckets),
            remote_types: remote_type_counts(view.records()),
            focus_role_by_country: mean_salary_by_country(view.records(), &config.focus_role),
        }
    }
}

/// Ordering helper for charts that list countries by salary.
pub fn by_mean_salary(a: &CountrySalary, b: &CountrySalary) -> Ordering {
    a.mean_salary
        .total_cmp(&b.mean_salary)
        .then_with(|| a.country_code.cmp(&b.country_code))
}

#[cfg(test)]
mod tests {
    use approx::assert_relative_eq;

    use super::*;
    use crate::data::filter::FilterSelection;
    use crate::data::model::tests::record;
    use crate::data::model::{Dataset, FilterField};

    fn scientist(salary: f64, country: &str) -> Record {
        let mut rec = record(2024, "senior", "Data Scientist", salary);
        rec.residence_country_code = country.into();
        rec
    }

    #[test]
    fn test_summary_metrics() {
        let rows = vec![
            record(2024, "senior", "Data Engineer", 100_000.0),
            record(2024, "senior", "Data Engineer", 120_000.0),
            record(2024, "junior", "Data Analyst", 50_000.0),
        ];
        let m = summary_metrics(&rows);
        assert_relative_eq!(m.mean_salary, 90_000.0, epsilon = 1e-9);
        assert_relative_eq!(m.max_salary, 120_000.0);
        assert_eq!(m.count, 3);
        assert_eq!(m.most_frequent_role, "Data Engineer");
    }

    #[test]
    fn test_empty_view_yields_zero_metrics() {
        let ds = Dataset::from_records(vec![record(2024, "senior", "Data Engineer", 1.0)]);
        let selection = FilterSelection::all(&ds).with(FilterField::Seniority, Vec::new());
        let view = FilteredView::new(&ds, &selection);
        let agg = Aggregates::compute(&view, &DashboardConfig::default());

        assert_eq!(agg.summary.mean_salary, 0.0);
        assert_eq!(agg.summary.max_salary, 0.0);
        assert_eq!(agg.summary.count, 0);
        assert_eq!(agg.summary.most_frequent_role, NO_ROLE);
        assert!(agg.top_roles.is_empty());
        assert!(agg.histogram.is_empty());
        assert!(agg.remote_types.is_empty());
        assert!(agg.focus_role_by_country.is_empty());
    }

    #[test]
    fn test_individual_aggregates_tolerate_empty_input() {
        let none: Vec<Record> = Vec::new();
        assert_eq!(summary_metrics(&none), SummaryMetrics::default());
        assert!(top_roles_by_mean_salary(&none, 10).is_empty());
        assert!(salary_histogram(&none, 30).is_empty());
        assert!(remote_type_counts(&none).is_empty());
        assert!(mean_salary_by_country(&none, "Data Scientist").is_empty());
    }

    #[test]
    fn test_most_frequent_role_tie_is_one_of_tied() {
        let rows = vec![
            record(2024, "senior", "ML Engineer", 1.0),
            record(2024, "senior", "Data Analyst", 1.0),
            record(2024, "senior", "ML Engineer", 1.0),
            record(2024, "senior", "Data Analyst", 1.0),
            record(2024, "senior", "Architect", 1.0),
        ];
        let m = summary_metrics(&rows);
        assert!(["ML Engineer", "Data Analyst"].contains(&m.most_frequent_role.as_str()));
    }

    #[test]
    fn test_top_roles_keeps_highest_in_ascending_order() {
        let rows: Vec<Record> = (0..12)
            .map(|i| record(2024, "senior", &format!("Role {i:02}"), 1_000.0 * i as f64))
            .collect();
        let top = top_roles_by_mean_salary(&rows, 10);
        assert_eq!(top.len(), 10);
        assert_eq!(top.first().unwrap().role, "Role 02");
        assert_eq!(top.last().unwrap().role, "Role 11");
        assert!(top.windows(2).all(|w| w[0].mean_salary <= w[1].mean_salary));
    }

    #[test]
    fn test_top_roles_uses_group_means() {
        let rows = vec![
            record(2024, "senior", "A", 10.0),
            record(2024, "senior", "A", 30.0),
            record(2024, "senior", "B", 25.0),
        ];
        let top = top_roles_by_mean_salary(&rows, 10);
        assert_eq!(top.len(), 2);
        assert_eq!(top[0].role, "A");
        assert_relative_eq!(top[0].mean_salary, 20.0);
        assert_eq!(top[1].role, "B");
    }

    #[test]
    fn test_histogram_buckets_cover_all_records() {
        let rows: Vec<Record> = [0.0, 10.0, 25.0, 50.0, 99.0, 100.0]
            .iter()
            .map(|&s| record(2024, "senior", "A", s))
            .collect();
        let hist = salary_histogram(&rows, 4);
        assert_eq!(hist.len(), 4);
        assert_relative_eq!(hist[0].lower, 0.0);
        assert_relative_eq!(hist[3].upper, 100.0);
        let counts: Vec<usize> = hist.iter().map(|b| b.count).collect();
        assert_eq!(counts, vec![2, 1, 1, 2]);
    }

    #[test]
    fn test_histogram_single_value() {
        let rows = vec![record(2024, "senior", "A", 5.0), record(2024, "senior", "B", 5.0)];
        let hist = salary_histogram(&rows, 30);
        assert_eq!(hist.len(), 30);
        assert_eq!(hist[0].count, 2);
        assert_eq!(hist.iter().map(|b| b.count).sum::<usize>(), 2);
    }

    #[test]
    fn test_remote_type_counts_descending() {
        let mut rows = vec![record(2024, "senior", "A", 1.0); 5];
        rows[0].remote_type = "presencial".into();
        rows[1].remote_type = "hibrido".into();
        rows[2].remote_type = "hibrido".into();
        let counts = remote_type_counts(&rows);
        assert_eq!(
            counts,
            vec![
                CategoryCount { value: "hibrido".into(), count: 2 },
                CategoryCount { value: "remoto".into(), count: 2 },
                CategoryCount { value: "presencial".into(), count: 1 },
            ]
        );
    }

    #[test]
    fn test_mean_salary_by_country_for_focus_role() {
        let mut engineer = record(2024, "senior", "Engineer", 90_000.0);
        engineer.residence_country_code = "USA".into();
        let ds = Dataset::from_records(vec![
            scientist(100_000.0, "USA"),
            scientist(120_000.0, "BRA"),
            engineer,
        ]);
        let view = FilteredView::new(&ds, &FilterSelection::all(&ds));
        let by_country = mean_salary_by_country(view.records(), "Data Scientist");

        let as_map: BTreeMap<&str, f64> = by_country
            .iter()
            .map(|c| (c.country_code.as_str(), c.mean_salary))
            .collect();
        assert_eq!(as_map.len(), 2);
        assert_relative_eq!(as_map["USA"], 100_000.0);
        assert_relative_eq!(as_map["BRA"], 120_000.0);
    }

    #[test]
    fn test_mean_salary_by_country_without_matches() {
        let rows = vec![record(2024, "senior", "Engineer", 1.0)];
        assert!(mean_salary_by_country(&rows, "Data Scientist").is_empty());
    }

    #[test]
    fn test_country_ordering_helper() {
        let mut rows = vec![
            scientist(300.0, "USA"),
            scientist(100.0, "BRA"),
            scientist(200.0, "DEU"),
        ];
        rows.push(scientist(100.0, "ARG"));
        let mut by_country = mean_salary_by_country(&rows, "Data Scientist");
        by_country.sort_by(by_mean_salary);
        let codes: Vec<&str> = by_country.iter().map(|c| c.country_code.as_str()).collect();
        assert_eq!(codes, vec!["ARG", "BRA", "DEU", "USA"]);
    }
}
