//! Shared fixtures for integration tests

use zipscope::data::model::{Record, ZipDataset};

/// A small but fully-populated record.
pub fn record(zip: &str, city: &str, score: f64, category: &str) -> Record {
    Record {
        zip_code: zip.to_string(),
        primary_city: city.to_string(),
        composite_score: score,
        score_category: category.to_string(),
        density_score: score * 0.9,
        transit_score: score * 0.5,
        income_score: score * 1.1,
        education_score: score * 0.8,
        housing_score: score,
        median_income: 30_000.0 + score * 1_000.0,
        median_home_value: 200_000.0 + score * 20_000.0,
        estimated_population: 10_000 + score as u64 * 100,
        population_density: 2_000.0 + score * 50.0,
        public_transit_pct: score / 4.0,
        education_pct: score / 2.0,
        latitude: None,
        longitude: None,
    }
}

/// The three-record scenario dataset: scores 10 / 50 / 90.
pub fn scenario_dataset() -> ZipDataset {
    ZipDataset::from_records(vec![
        record("90001", "Los Angeles", 10.0, "Poor"),
        record("90002", "Los Angeles", 50.0, "Average"),
        record("90003", "Santa Monica", 90.0, "Excellent"),
    ])
}
