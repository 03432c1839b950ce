use super::model::{Record, ZipDataset};

// ---------------------------------------------------------------------------
// Filter predicates
// ---------------------------------------------------------------------------

/// The sidebar filter state: a conjunction of predicates.
///
/// `None` for category or city means "All" (no constraint). The score range
/// is inclusive on both ends.
#[derive(Debug, Clone, PartialEq)]
pub struct Filters {
    pub category: Option<String>,
    pub city: Option<String>,
    pub score_range: (f64, f64),
}

impl Filters {
    /// No constraints at all: everything passes.
    pub fn unbounded() -> Self {
        Filters {
            category: None,
            city: None,
            score_range: (f64::NEG_INFINITY, f64::INFINITY),
        }
    }

    /// "All" selections with the slider spanning the dataset's score range.
    pub fn for_dataset(dataset: &ZipDataset) -> Self {
        Filters {
            category: None,
            city: None,
            score_range: dataset.score_range,
        }
    }

    /// Whether a record satisfies all active predicates.
    pub fn matches(&self, r: &Record) -> bool {
        if let Some(category) = &self.category {
            if r.score_category != *category {
                return false;
            }
        }
        if let Some(city) = &self.city {
            if r.primary_city != *city {
                return false;
            }
        }
        let (lo, hi) = self.score_range;
        r.composite_score >= lo && r.composite_score <= hi
    }
}

// ---------------------------------------------------------------------------
// View – an ordered subset of the dataset
// ---------------------------------------------------------------------------

/// A filtered subset of the base dataset: the dataset handle plus the row
/// indices that passed, in original row order.
///
/// Views are cheap to produce and never mutate the base table; every
/// operation returns a new `View`.
#[derive(Debug, Clone)]
pub struct View<'a> {
    dataset: &'a ZipDataset,
    rows: Vec<usize>,
}

impl<'a> View<'a> {
    /// The identity view: every row of the dataset.
    pub fn all(dataset: &'a ZipDataset) -> Self {
        View {
            dataset,
            rows: (0..dataset.len()).collect(),
        }
    }

    /// A view over an explicit row-index list (indices into `dataset`).
    pub fn from_rows(dataset: &'a ZipDataset, rows: Vec<usize>) -> Self {
        View { dataset, rows }
    }

    pub fn dataset(&self) -> &'a ZipDataset {
        self.dataset
    }

    /// Row indices into the base dataset, in original order.
    pub fn rows(&self) -> &[usize] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// The records of this view, in view order.
    pub fn records(&self) -> impl Iterator<Item = &'a Record> + '_ {
        self.rows.iter().map(|&i| &self.dataset.records[i])
    }

    /// Keep the rows satisfying all of `filters` (logical AND). An empty
    /// result is valid; row order is preserved.
    pub fn filter(&self, filters: &Filters) -> View<'a> {
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&i| filters.matches(&self.dataset.records[i]))
            .collect();
        View {
            dataset: self.dataset,
            rows,
        }
    }

    /// Case-insensitive substring search over zip code, city and score
    /// category; a row matches when the term appears in any of the three.
    /// An empty term keeps the view unchanged.
    pub fn search(&self, term: &str) -> View<'a> {
        if term.is_empty() {
            return self.clone();
        }
        let needle = term.to_lowercase();
        let rows = self
            .rows
            .iter()
            .copied()
            .filter(|&i| {
                let r = &self.dataset.records[i];
                r.zip_code.to_lowercase().contains(&needle)
                    || r.primary_city.to_lowercase().contains(&needle)
                    || r.score_category.to_lowercase().contains(&needle)
            })
            .collect();
        View {
            dataset: self.dataset,
            rows,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(zip: &str, city: &str, score: f64, category: &str) -> Record {
        Record {
            zip_code: zip.to_string(),
            primary_city: city.to_string(),
            composite_score: score,
            score_category: category.to_string(),
            density_score: 0.0,
            transit_score: 0.0,
            income_score: 0.0,
            education_score: 0.0,
            housing_score: 0.0,
            median_income: 0.0,
            median_home_value: 0.0,
            estimated_population: 0,
            population_density: 0.0,
            public_transit_pct: 0.0,
            education_pct: 0.0,
            latitude: None,
            longitude: None,
        }
    }

    fn dataset() -> ZipDataset {
        ZipDataset::from_records(vec![
            record("90001", "Los Angeles", 10.0, "Poor"),
            record("90210", "Beverly Hills", 50.0, "Average"),
            record("90403", "Santa Monica", 90.0, "Excellent"),
        ])
    }

    #[test]
    fn range_filter_is_inclusive_and_preserves_order() {
        let ds = dataset();
        let filters = Filters {
            category: None,
            city: None,
            score_range: (40.0, 100.0),
        };
        let view = View::all(&ds).filter(&filters);
        assert_eq!(view.rows(), &[1, 2]);

        // Both bounds inclusive.
        let exact = Filters {
            score_range: (50.0, 50.0),
            ..Filters::unbounded()
        };
        assert_eq!(View::all(&ds).filter(&exact).rows(), &[1]);
    }

    #[test]
    fn filter_is_idempotent() {
        let ds = dataset();
        let filters = Filters {
            category: Some("Average".to_string()),
            city: None,
            score_range: (0.0, 100.0),
        };
        let once = View::all(&ds).filter(&filters);
        let twice = once.filter(&filters);
        assert_eq!(once.rows(), twice.rows());
    }

    #[test]
    fn sequential_filters_equal_conjunction() {
        let ds = dataset();
        let by_city = Filters {
            city: Some("Santa Monica".to_string()),
            ..Filters::unbounded()
        };
        let by_range = Filters {
            score_range: (40.0, 100.0),
            ..Filters::unbounded()
        };
        let both = Filters {
            category: None,
            city: Some("Santa Monica".to_string()),
            score_range: (40.0, 100.0),
        };
        let chained = View::all(&ds).filter(&by_city).filter(&by_range);
        let conjoined = View::all(&ds).filter(&both);
        assert_eq!(chained.rows(), conjoined.rows());
    }

    #[test]
    fn empty_result_is_valid() {
        let ds = dataset();
        let filters = Filters {
            category: Some("Good".to_string()),
            ..Filters::unbounded()
        };
        let view = View::all(&ds).filter(&filters);
        assert!(view.is_empty());
    }

    #[test]
    fn search_matches_any_of_the_three_text_columns() {
        let ds = dataset();
        let view = View::all(&ds);
        assert_eq!(view.search("902").rows(), &[1]);
        assert_eq!(view.search("monica").rows(), &[2]);
        assert_eq!(view.search("POOR").rows(), &[0]);
        assert!(view.search("pasadena").is_empty());
    }

    #[test]
    fn empty_search_is_identity() {
        let ds = dataset();
        let view = View::all(&ds).filter(&Filters {
            score_range: (40.0, 100.0),
            ..Filters::unbounded()
        });
        let searched = view.search("");
        assert_eq!(view.rows(), searched.rows());
    }
}
