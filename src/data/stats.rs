use std::collections::HashMap;

use super::filter::View;
use super::model::{KeyField, NumericField};

// ---------------------------------------------------------------------------
// Summary metrics
// ---------------------------------------------------------------------------

/// The headline metrics row: row count plus means of the key indicators.
/// Means over an empty view are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub composite_score: Option<f64>,
    pub median_income: Option<f64>,
    pub median_home_value: Option<f64>,
    pub estimated_population: Option<f64>,
}

/// Arithmetic mean of a field over the view, `None` for zero rows.
pub fn mean(view: &View<'_>, field: NumericField) -> Option<f64> {
    if view.is_empty() {
        return None;
    }
    let sum: f64 = view.records().map(|r| field.value(r)).sum();
    Some(sum / view.len() as f64)
}

pub fn aggregate_summary(view: &View<'_>) -> Summary {
    Summary {
        count: view.len(),
        composite_score: mean(view, NumericField::CompositeScore),
        median_income: mean(view, NumericField::MedianIncome),
        median_home_value: mean(view, NumericField::MedianHomeValue),
        estimated_population: mean(view, NumericField::EstimatedPopulation),
    }
}

// ---------------------------------------------------------------------------
// Top-N selection
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Ascending,
    Descending,
}

/// Row indices of the view sorted by `field`, truncated to `n`.
///
/// The sort is stable: ties keep original row order. `n` larger than the
/// view returns all rows sorted; `n = 0` returns nothing.
pub fn top_n(view: &View<'_>, field: NumericField, n: usize, direction: Direction) -> Vec<usize> {
    let dataset = view.dataset();
    let mut rows: Vec<usize> = view.rows().to_vec();
    rows.sort_by(|&a, &b| {
        let va = field.value(&dataset.records[a]);
        let vb = field.value(&dataset.records[b]);
        match direction {
            Direction::Ascending => va.total_cmp(&vb),
            Direction::Descending => vb.total_cmp(&va),
        }
    });
    rows.truncate(n);
    rows
}

// ---------------------------------------------------------------------------
// Grouped means
// ---------------------------------------------------------------------------

/// Mean of `value` per distinct `key` value.
///
/// The output is sorted by mean descending; equal means keep the groups'
/// first-seen order, so "top K groups" consumption is deterministic.
pub fn group_mean(view: &View<'_>, key: KeyField, value: NumericField) -> Vec<(String, f64)> {
    let mut order: Vec<String> = Vec::new();
    let mut acc: HashMap<String, (f64, usize)> = HashMap::new();

    for r in view.records() {
        let k = key.value(r);
        if !acc.contains_key(k) {
            order.push(k.to_string());
        }
        let entry = acc.entry(k.to_string()).or_insert((0.0, 0));
        entry.0 += value.value(r);
        entry.1 += 1;
    }

    let mut out: Vec<(String, f64)> = order
        .into_iter()
        .map(|k| {
            let (sum, count) = acc[&k];
            (k, sum / count as f64)
        })
        .collect();
    // Stable sort keeps first-seen order on ties.
    out.sort_by(|a, b| b.1.total_cmp(&a.1));
    out
}

/// Row counts per score category, most common first; ties keep first-seen
/// order. Backs the category-distribution chart.
pub fn category_counts(view: &View<'_>) -> Vec<(String, usize)> {
    let mut order: Vec<String> = Vec::new();
    let mut counts: HashMap<String, usize> = HashMap::new();
    for r in view.records() {
        if !counts.contains_key(&r.score_category) {
            order.push(r.score_category.clone());
        }
        *counts.entry(r.score_category.clone()).or_insert(0) += 1;
    }
    let mut out: Vec<(String, usize)> = order
        .into_iter()
        .map(|k| {
            let n = counts[&k];
            (k, n)
        })
        .collect();
    out.sort_by(|a, b| b.1.cmp(&a.1));
    out
}

/// Mean of each component score over the view. Backs the component bar chart.
pub fn component_means(view: &View<'_>) -> Vec<(NumericField, Option<f64>)> {
    NumericField::COMPONENT_SCORES
        .iter()
        .map(|&f| (f, mean(view, f)))
        .collect()
}

// ---------------------------------------------------------------------------
// Correlation matrix
// ---------------------------------------------------------------------------

/// Pairwise Pearson coefficients over a field list.
///
/// `None` cells mark undefined correlations (empty view, or a field with
/// zero variance); they are rendered as blanks, never propagated as NaN.
#[derive(Debug, Clone)]
pub struct CorrelationMatrix {
    pub fields: Vec<NumericField>,
    cells: Vec<Option<f64>>,
}

impl CorrelationMatrix {
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn get(&self, i: usize, j: usize) -> Option<f64> {
        self.cells[i * self.fields.len() + j]
    }
}

/// Single-pass Welford accumulation of means, variances and covariance.
fn pearson(pairs: impl Iterator<Item = (f64, f64)>) -> Option<f64> {
    let mut n = 0.0_f64;
    let mut mean_x = 0.0;
    let mut mean_y = 0.0;
    let mut var_x = 0.0;
    let mut var_y = 0.0;
    let mut cov_xy = 0.0;

    for (x, y) in pairs {
        n += 1.0;
        let dx = x - mean_x;
        let dy = y - mean_y;
        mean_x += dx / n;
        mean_y += dy / n;
        var_x += dx * (x - mean_x);
        var_y += dy * (y - mean_y);
        cov_xy += dx * (y - mean_y);
    }

    if n == 0.0 {
        return None;
    }
    let std_x = (var_x / n).sqrt();
    let std_y = (var_y / n).sqrt();
    if std_x == 0.0 || std_y == 0.0 {
        return None;
    }
    Some(cov_xy / (n * std_x * std_y))
}

/// Compute the symmetric correlation matrix over `fields`.
///
/// Self-correlation is 1.0 whenever the field has nonzero variance.
pub fn correlation_matrix(view: &View<'_>, fields: &[NumericField]) -> CorrelationMatrix {
    let n = fields.len();
    let mut cells = vec![None; n * n];

    // Extract each column once.
    let columns: Vec<Vec<f64>> = fields
        .iter()
        .map(|f| view.records().map(|r| f.value(r)).collect())
        .collect();

    for i in 0..n {
        for j in i..n {
            let corr = if i == j {
                // 1.0 on the diagonal, but only for fields with variance.
                pearson(columns[i].iter().map(|&v| (v, v))).map(|_| 1.0)
            } else {
                pearson(columns[i].iter().copied().zip(columns[j].iter().copied()))
            };
            cells[i * n + j] = corr;
            cells[j * n + i] = corr;
        }
    }

    CorrelationMatrix {
        fields: fields.to_vec(),
        cells,
    }
}

// ---------------------------------------------------------------------------
// Descriptive statistics
// ---------------------------------------------------------------------------

/// Per-field descriptive statistics, the table-tab summary block.
#[derive(Debug, Clone)]
pub struct FieldStats {
    pub field: NumericField,
    pub count: usize,
    pub mean: Option<f64>,
    /// Sample standard deviation; `None` below two rows.
    pub std: Option<f64>,
    pub min: Option<f64>,
    pub q25: Option<f64>,
    pub median: Option<f64>,
    pub q75: Option<f64>,
    pub max: Option<f64>,
}

/// Linear-interpolated quantile over sorted values, `q` in [0, 1].
fn quantile(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q * (sorted.len() - 1) as f64;
    let lo = pos.floor() as usize;
    let hi = pos.ceil() as usize;
    if lo == hi {
        return Some(sorted[lo]);
    }
    let frac = pos - lo as f64;
    Some(sorted[lo] + (sorted[hi] - sorted[lo]) * frac)
}

pub fn describe(view: &View<'_>, fields: &[NumericField]) -> Vec<FieldStats> {
    fields
        .iter()
        .map(|&field| {
            let mut values: Vec<f64> = view.records().map(|r| field.value(r)).collect();
            values.sort_by(f64::total_cmp);
            let count = values.len();

            let mean = if count > 0 {
                Some(values.iter().sum::<f64>() / count as f64)
            } else {
                None
            };
            let std = match (mean, count) {
                (Some(m), c) if c >= 2 => {
                    let ss: f64 = values.iter().map(|v| (v - m) * (v - m)).sum();
                    Some((ss / (c - 1) as f64).sqrt())
                }
                _ => None,
            };

            FieldStats {
                field,
                count,
                mean,
                std,
                min: values.first().copied(),
                q25: quantile(&values, 0.25),
                median: quantile(&values, 0.5),
                q75: quantile(&values, 0.75),
                max: values.last().copied(),
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Histogram binning
// ---------------------------------------------------------------------------

/// Equal-width histogram bins for a field over the view.
/// Returns (bin center, count, bin width); empty view yields no bins.
pub fn histogram(view: &View<'_>, field: NumericField, bins: usize) -> Vec<(f64, usize, f64)> {
    if view.is_empty() || bins == 0 {
        return Vec::new();
    }
    let values: Vec<f64> = view.records().map(|r| field.value(r)).collect();
    let lo = values.iter().copied().fold(f64::INFINITY, f64::min);
    let hi = values.iter().copied().fold(f64::NEG_INFINITY, f64::max);

    // Degenerate case: a single distinct value gets one bin.
    if hi - lo <= f64::EPSILON {
        return vec![(lo, values.len(), 1.0)];
    }

    let width = (hi - lo) / bins as f64;
    let mut counts = vec![0usize; bins];
    for v in values {
        let idx = (((v - lo) / width) as usize).min(bins - 1);
        counts[idx] += 1;
    }
    counts
        .into_iter()
        .enumerate()
        .map(|(i, c)| (lo + (i as f64 + 0.5) * width, c, width))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, ZipDataset};

    fn record(zip: &str, city: &str, score: f64, income: f64) -> Record {
        Record {
            zip_code: zip.to_string(),
            primary_city: city.to_string(),
            composite_score: score,
            score_category: "Average".to_string(),
            density_score: score,
            transit_score: 100.0 - score,
            income_score: 50.0,
            education_score: score / 2.0,
            housing_score: score,
            median_income: income,
            median_home_value: income * 8.0,
            estimated_population: 10_000,
            population_density: 5_000.0,
            public_transit_pct: 10.0,
            education_pct: 30.0,
            latitude: None,
            longitude: None,
        }
    }

    fn dataset() -> ZipDataset {
        ZipDataset::from_records(vec![
            record("90001", "Los Angeles", 10.0, 40_000.0),
            record("90002", "Los Angeles", 50.0, 60_000.0),
            record("90003", "Torrance", 90.0, 80_000.0),
            record("90004", "Torrance", 50.0, 100_000.0),
        ])
    }

    #[test]
    fn summary_over_empty_view_is_undefined() {
        let ds = dataset();
        let empty = View::from_rows(&ds, Vec::new());
        let summary = aggregate_summary(&empty);
        assert_eq!(summary.count, 0);
        assert_eq!(summary.composite_score, None);
        assert_eq!(summary.median_income, None);
    }

    #[test]
    fn summary_means() {
        let ds = dataset();
        let summary = aggregate_summary(&View::all(&ds));
        assert_eq!(summary.count, 4);
        assert_eq!(summary.composite_score, Some(50.0));
        assert_eq!(summary.median_income, Some(70_000.0));
    }

    #[test]
    fn top_n_sorts_descending_with_stable_ties() {
        let ds = dataset();
        let view = View::all(&ds);
        let top = top_n(&view, NumericField::CompositeScore, 3, Direction::Descending);
        // 90.0, then the two 50.0 ties in original order, truncated at 3.
        assert_eq!(top, vec![2, 1, 3]);
    }

    #[test]
    fn top_n_zero_is_empty_and_large_n_returns_all() {
        let ds = dataset();
        let view = View::all(&ds);
        assert!(top_n(&view, NumericField::CompositeScore, 0, Direction::Descending).is_empty());
        let all = top_n(&view, NumericField::CompositeScore, 99, Direction::Ascending);
        assert_eq!(all.len(), 4);
        assert_eq!(all[0], 0); // lowest score first
    }

    #[test]
    fn group_mean_single_group_equals_overall_mean() {
        let ds = ZipDataset::from_records(vec![
            record("90001", "Los Angeles", 10.0, 40_000.0),
            record("90002", "Los Angeles", 50.0, 60_000.0),
        ]);
        let view = View::all(&ds);
        let groups = group_mean(&view, KeyField::PrimaryCity, NumericField::MedianIncome);
        assert_eq!(groups.len(), 1);
        assert_eq!(groups[0], ("Los Angeles".to_string(), 50_000.0));
        assert_eq!(groups[0].1, mean(&view, NumericField::MedianIncome).unwrap());
    }

    #[test]
    fn group_mean_sorts_by_mean_descending() {
        let ds = dataset();
        let groups = group_mean(
            &View::all(&ds),
            KeyField::PrimaryCity,
            NumericField::MedianIncome,
        );
        assert_eq!(groups[0].0, "Torrance"); // 90k mean
        assert_eq!(groups[1].0, "Los Angeles"); // 50k mean
        assert_eq!(groups[0].1, 90_000.0);
    }

    #[test]
    fn correlation_matrix_is_symmetric_with_unit_diagonal() {
        let ds = dataset();
        let fields = [
            NumericField::CompositeScore,
            NumericField::DensityScore,
            NumericField::TransitScore,
        ];
        let m = correlation_matrix(&View::all(&ds), &fields);
        for i in 0..m.len() {
            assert_eq!(m.get(i, i), Some(1.0));
            for j in 0..m.len() {
                assert_eq!(m.get(i, j), m.get(j, i));
            }
        }
        // density_score == composite_score in the fixture: perfect correlation.
        let c = m.get(0, 1).unwrap();
        assert!((c - 1.0).abs() < 1e-12);
        // transit_score = 100 - composite_score: perfect anti-correlation.
        let c = m.get(0, 2).unwrap();
        assert!((c + 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_variance_field_yields_undefined_cells() {
        let ds = dataset();
        let fields = [NumericField::CompositeScore, NumericField::IncomeScore];
        // income_score is constant 50.0 across the fixture.
        let m = correlation_matrix(&View::all(&ds), &fields);
        assert_eq!(m.get(0, 1), None);
        assert_eq!(m.get(1, 1), None);
        assert_eq!(m.get(0, 0), Some(1.0));
    }

    #[test]
    fn correlation_over_empty_view_is_undefined() {
        let ds = dataset();
        let empty = View::from_rows(&ds, Vec::new());
        let m = correlation_matrix(&empty, &[NumericField::CompositeScore]);
        assert_eq!(m.get(0, 0), None);
    }

    #[test]
    fn describe_matches_hand_computed_quartiles() {
        let ds = dataset();
        let stats = describe(&View::all(&ds), &[NumericField::CompositeScore]);
        let s = &stats[0];
        assert_eq!(s.count, 4);
        assert_eq!(s.mean, Some(50.0));
        assert_eq!(s.min, Some(10.0));
        assert_eq!(s.max, Some(90.0));
        assert_eq!(s.median, Some(50.0));
        // sorted [10, 50, 50, 90]: q25 = 40, q75 = 60
        assert_eq!(s.q25, Some(40.0));
        assert_eq!(s.q75, Some(60.0));
    }

    #[test]
    fn describe_empty_view() {
        let ds = dataset();
        let empty = View::from_rows(&ds, Vec::new());
        let stats = describe(&empty, &[NumericField::MedianIncome]);
        assert_eq!(stats[0].count, 0);
        assert_eq!(stats[0].mean, None);
        assert_eq!(stats[0].min, None);
    }

    #[test]
    fn histogram_covers_all_rows() {
        let ds = dataset();
        let bins = histogram(&View::all(&ds), NumericField::CompositeScore, 4);
        let total: usize = bins.iter().map(|(_, c, _)| c).sum();
        assert_eq!(total, 4);
    }
}
