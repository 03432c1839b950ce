use std::fmt;

use serde::{Deserialize, Serialize};

use super::error::DataError;

// ---------------------------------------------------------------------------
// Record – one zip code (one row of the source CSV)
// ---------------------------------------------------------------------------

/// A single zip-code record as loaded from the source file.
///
/// `latitude`/`longitude` are optional: many source files ship without them
/// and the map view resolves missing coordinates through the geocoder with a
/// fixed regional fallback.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub zip_code: String,
    pub primary_city: String,
    pub composite_score: f64,
    pub score_category: String,
    pub density_score: f64,
    pub transit_score: f64,
    pub income_score: f64,
    pub education_score: f64,
    pub housing_score: f64,
    pub median_income: f64,
    pub median_home_value: f64,
    pub estimated_population: u64,
    pub population_density: f64,
    pub public_transit_pct: f64,
    pub education_pct: f64,
    #[serde(default)]
    pub latitude: Option<f64>,
    #[serde(default)]
    pub longitude: Option<f64>,
}

// ---------------------------------------------------------------------------
// NumericField – the sortable / aggregable columns
// ---------------------------------------------------------------------------

/// The numeric columns of the schema, usable for sorting, aggregation,
/// scatter axes and correlation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NumericField {
    CompositeScore,
    DensityScore,
    TransitScore,
    IncomeScore,
    EducationScore,
    HousingScore,
    MedianIncome,
    MedianHomeValue,
    EstimatedPopulation,
    PopulationDensity,
    PublicTransitPct,
    EducationPct,
}

impl NumericField {
    pub const ALL: [NumericField; 12] = [
        NumericField::CompositeScore,
        NumericField::DensityScore,
        NumericField::TransitScore,
        NumericField::IncomeScore,
        NumericField::EducationScore,
        NumericField::HousingScore,
        NumericField::MedianIncome,
        NumericField::MedianHomeValue,
        NumericField::EstimatedPopulation,
        NumericField::PopulationDensity,
        NumericField::PublicTransitPct,
        NumericField::EducationPct,
    ];

    /// The five component scores feeding the composite.
    pub const COMPONENT_SCORES: [NumericField; 5] = [
        NumericField::DensityScore,
        NumericField::TransitScore,
        NumericField::IncomeScore,
        NumericField::EducationScore,
        NumericField::HousingScore,
    ];

    /// Composite plus components, the correlation-heatmap default.
    pub const SCORE_FIELDS: [NumericField; 6] = [
        NumericField::CompositeScore,
        NumericField::DensityScore,
        NumericField::TransitScore,
        NumericField::IncomeScore,
        NumericField::EducationScore,
        NumericField::HousingScore,
    ];

    /// Column name as it appears in the CSV header.
    pub fn name(&self) -> &'static str {
        match self {
            NumericField::CompositeScore => "composite_score",
            NumericField::DensityScore => "density_score",
            NumericField::TransitScore => "transit_score",
            NumericField::IncomeScore => "income_score",
            NumericField::EducationScore => "education_score",
            NumericField::HousingScore => "housing_score",
            NumericField::MedianIncome => "median_income",
            NumericField::MedianHomeValue => "median_home_value",
            NumericField::EstimatedPopulation => "estimated_population",
            NumericField::PopulationDensity => "population_density",
            NumericField::PublicTransitPct => "public_transit_pct",
            NumericField::EducationPct => "education_pct",
        }
    }

    /// Human-readable label for axis titles and table headers.
    pub fn label(&self) -> &'static str {
        match self {
            NumericField::CompositeScore => "Composite Score",
            NumericField::DensityScore => "Density Score",
            NumericField::TransitScore => "Transit Score",
            NumericField::IncomeScore => "Income Score",
            NumericField::EducationScore => "Education Score",
            NumericField::HousingScore => "Housing Score",
            NumericField::MedianIncome => "Median Income",
            NumericField::MedianHomeValue => "Median Home Value",
            NumericField::EstimatedPopulation => "Estimated Population",
            NumericField::PopulationDensity => "Population Density",
            NumericField::PublicTransitPct => "Public Transit (%)",
            NumericField::EducationPct => "Education (%)",
        }
    }

    /// The record's value for this column.
    pub fn value(&self, r: &Record) -> f64 {
        match self {
            NumericField::CompositeScore => r.composite_score,
            NumericField::DensityScore => r.density_score,
            NumericField::TransitScore => r.transit_score,
            NumericField::IncomeScore => r.income_score,
            NumericField::EducationScore => r.education_score,
            NumericField::HousingScore => r.housing_score,
            NumericField::MedianIncome => r.median_income,
            NumericField::MedianHomeValue => r.median_home_value,
            NumericField::EstimatedPopulation => r.estimated_population as f64,
            NumericField::PopulationDensity => r.population_density,
            NumericField::PublicTransitPct => r.public_transit_pct,
            NumericField::EducationPct => r.education_pct,
        }
    }
}

impl fmt::Display for NumericField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

// ---------------------------------------------------------------------------
// KeyField – the text-valued columns usable as group keys
// ---------------------------------------------------------------------------

/// Text-valued columns a view can be grouped or searched by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyField {
    ZipCode,
    PrimaryCity,
    ScoreCategory,
}

impl KeyField {
    pub fn name(&self) -> &'static str {
        match self {
            KeyField::ZipCode => "zip_code",
            KeyField::PrimaryCity => "primary_city",
            KeyField::ScoreCategory => "score_category",
        }
    }

    pub fn value<'a>(&self, r: &'a Record) -> &'a str {
        match self {
            KeyField::ZipCode => &r.zip_code,
            KeyField::PrimaryCity => &r.primary_city,
            KeyField::ScoreCategory => &r.score_category,
        }
    }
}

// ---------------------------------------------------------------------------
// Field – every schema column, for projection and export
// ---------------------------------------------------------------------------

/// Any column of the schema. Used for column selection and CSV export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Key(KeyField),
    Numeric(NumericField),
    Latitude,
    Longitude,
}

impl Field {
    /// All schema columns in source-file order.
    pub const ALL: [Field; 17] = [
        Field::Key(KeyField::ZipCode),
        Field::Key(KeyField::PrimaryCity),
        Field::Numeric(NumericField::CompositeScore),
        Field::Key(KeyField::ScoreCategory),
        Field::Numeric(NumericField::DensityScore),
        Field::Numeric(NumericField::TransitScore),
        Field::Numeric(NumericField::IncomeScore),
        Field::Numeric(NumericField::EducationScore),
        Field::Numeric(NumericField::HousingScore),
        Field::Numeric(NumericField::MedianIncome),
        Field::Numeric(NumericField::MedianHomeValue),
        Field::Numeric(NumericField::EstimatedPopulation),
        Field::Numeric(NumericField::PopulationDensity),
        Field::Numeric(NumericField::PublicTransitPct),
        Field::Numeric(NumericField::EducationPct),
        Field::Latitude,
        Field::Longitude,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Field::Key(k) => k.name(),
            Field::Numeric(n) => n.name(),
            Field::Latitude => "latitude",
            Field::Longitude => "longitude",
        }
    }

    /// Resolve a column name against the schema.
    pub fn from_name(name: &str) -> Result<Field, DataError> {
        Field::ALL
            .iter()
            .copied()
            .find(|f| f.name() == name)
            .ok_or_else(|| DataError::InvalidField(name.to_string()))
    }

    /// The record's cell rendered as text, as it appears in table views and
    /// CSV export. Missing coordinates render empty, matching the source.
    pub fn cell(&self, r: &Record) -> String {
        match self {
            Field::Key(k) => k.value(r).to_string(),
            Field::Numeric(NumericField::EstimatedPopulation) => {
                r.estimated_population.to_string()
            }
            Field::Numeric(n) => n.value(r).to_string(),
            Field::Latitude => r.latitude.map(|v| v.to_string()).unwrap_or_default(),
            Field::Longitude => r.longitude.map(|v| v.to_string()).unwrap_or_default(),
        }
    }
}

// ---------------------------------------------------------------------------
// ZipDataset – the complete loaded dataset
// ---------------------------------------------------------------------------

/// The full parsed dataset with pre-computed filter indices.
#[derive(Debug, Clone)]
pub struct ZipDataset {
    /// All records, in source-file order.
    pub records: Vec<Record>,
    /// Sorted unique score categories (for the category filter).
    pub categories: Vec<String>,
    /// Sorted unique primary cities (for the city filter).
    pub cities: Vec<String>,
    /// (min, max) of `composite_score`, the range-slider bounds.
    pub score_range: (f64, f64),
}

impl ZipDataset {
    /// Build filter indices from the loaded records.
    pub fn from_records(records: Vec<Record>) -> Self {
        let mut categories: Vec<String> = records
            .iter()
            .map(|r| r.score_category.clone())
            .collect();
        categories.sort();
        categories.dedup();

        let mut cities: Vec<String> = records.iter().map(|r| r.primary_city.clone()).collect();
        cities.sort();
        cities.dedup();

        let mut lo = f64::INFINITY;
        let mut hi = f64::NEG_INFINITY;
        for r in &records {
            lo = lo.min(r.composite_score);
            hi = hi.max(r.composite_score);
        }
        if records.is_empty() {
            lo = 0.0;
            hi = 0.0;
        }

        ZipDataset {
            records,
            categories,
            cities,
            score_range: (lo, hi),
        }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}
