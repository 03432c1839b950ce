use std::path::PathBuf;
use std::sync::Arc;

use crate::color::CategoryColors;
use crate::data::filter::{Filters, View};
use crate::data::loader::CachedLoader;
use crate::data::model::{Field, NumericField, ZipDataset};

// ---------------------------------------------------------------------------
// Dashboard tabs
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Overview,
    Scores,
    Economics,
    Demographics,
    Table,
    Map,
}

impl Tab {
    pub const ALL: [Tab; 6] = [
        Tab::Overview,
        Tab::Scores,
        Tab::Economics,
        Tab::Demographics,
        Tab::Table,
        Tab::Map,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Tab::Overview => "Overview",
            Tab::Scores => "Score Analysis",
            Tab::Economics => "Economic Metrics",
            Tab::Demographics => "Demographics",
            Tab::Table => "Data Table",
            Tab::Map => "Map",
        }
    }
}

// ---------------------------------------------------------------------------
// Application state
// ---------------------------------------------------------------------------

/// The full UI state, independent of rendering.
///
/// The base dataset is immutable once loaded; every interaction updates the
/// predicates here and the whole pipeline re-runs from the base table.
pub struct AppState {
    /// Loaded dataset (None until the session dataset is in).
    pub dataset: Option<Arc<ZipDataset>>,

    /// Path the dataset was loaded from, the memoization key.
    pub source_path: Option<PathBuf>,

    /// Memoized loader, keyed by path and modification time.
    pub loader: CachedLoader,

    /// Sidebar filter predicates.
    pub filters: Filters,

    /// Rows passing the current filters (cached between interactions).
    pub visible_rows: Vec<usize>,

    /// Data-table search term.
    pub search: String,

    /// Data-table column selection, in schema order.
    pub selected_columns: Vec<Field>,

    /// Active dashboard tab.
    pub tab: Tab,

    /// Scatter-plot axis selections on the score tab.
    pub scatter_x: NumericField,
    pub scatter_y: NumericField,

    /// Colour assignment per score category.
    pub category_colors: CategoryColors,

    /// Status / error message shown in the UI.
    pub status_message: Option<String>,
}

/// The data-table tab's default projection.
fn default_columns() -> Vec<Field> {
    [
        "zip_code",
        "primary_city",
        "composite_score",
        "score_category",
        "median_income",
        "median_home_value",
        "estimated_population",
    ]
    .iter()
    .map(|name| Field::from_name(name).expect("default column is in schema"))
    .collect()
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            dataset: None,
            source_path: None,
            loader: CachedLoader::new(),
            filters: Filters::unbounded(),
            visible_rows: Vec::new(),
            search: String::new(),
            selected_columns: default_columns(),
            tab: Tab::Overview,
            scatter_x: NumericField::DensityScore,
            scatter_y: NumericField::CompositeScore,
            category_colors: CategoryColors::default(),
            status_message: None,
        }
    }
}

impl AppState {
    /// Ingest the session dataset: reset predicates to "All", span the score
    /// slider over the data and show every row.
    pub fn set_dataset(&mut self, dataset: Arc<ZipDataset>, path: Option<PathBuf>) {
        self.filters = Filters::for_dataset(&dataset);
        self.visible_rows = (0..dataset.len()).collect();
        self.category_colors = CategoryColors::new(&dataset.categories);
        self.search.clear();
        self.source_path = path;
        self.dataset = Some(dataset);
        self.status_message = None;
    }

    /// Recompute `visible_rows` after a predicate change.
    pub fn refilter(&mut self) {
        if let Some(ds) = &self.dataset {
            self.visible_rows = View::all(ds).filter(&self.filters).rows().to_vec();
        }
    }

    /// The filtered view over a dataset handle held by the caller.
    pub fn visible_view<'a>(&self, dataset: &'a ZipDataset) -> View<'a> {
        View::from_rows(dataset, self.visible_rows.clone())
    }

    /// Reset all predicates to "All" and the full score range.
    pub fn reset_filters(&mut self) {
        if let Some(ds) = &self.dataset {
            self.filters = Filters::for_dataset(ds);
        } else {
            self.filters = Filters::unbounded();
        }
        self.refilter();
    }

    /// Toggle a column in the data-table projection, keeping schema order.
    pub fn toggle_column(&mut self, field: Field) {
        if let Some(pos) = self.selected_columns.iter().position(|f| *f == field) {
            self.selected_columns.remove(pos);
        } else {
            self.selected_columns.push(field);
            self.selected_columns.sort_by_key(|f| {
                Field::ALL
                    .iter()
                    .position(|g| g == f)
                    .expect("field is in schema")
            });
        }
    }

}
