//! End-to-end tests over the filter-and-aggregate pipeline

use zipscope::data::filter::{Filters, View};
use zipscope::data::geocode::{map_points, NoGeocoder, LA_COUNTY_CENTER};
use zipscope::data::model::NumericField;
use zipscope::data::stats::{aggregate_summary, correlation_matrix, top_n, Direction};

#[path = "common/mod.rs"]
mod common;

#[test]
fn scenario_category_all_city_all_range_40_to_100() {
    let ds = common::scenario_dataset();
    let filters = Filters {
        category: None,
        city: None,
        score_range: (40.0, 100.0),
    };
    let view = View::all(&ds).filter(&filters);

    let scores: Vec<f64> = view.records().map(|r| r.composite_score).collect();
    assert_eq!(scores, vec![50.0, 90.0]);
}

#[test]
fn filtering_never_touches_the_base_dataset() {
    let ds = common::scenario_dataset();
    let before = ds.records.clone();

    let filters = Filters {
        category: Some("Poor".to_string()),
        city: None,
        score_range: (0.0, 100.0),
    };
    let _narrow = View::all(&ds).filter(&filters).search("90001");

    assert_eq!(ds.records, before);
    assert_eq!(View::all(&ds).len(), 3);
}

#[test]
fn pipeline_composes_filter_search_and_summary() {
    let ds = common::scenario_dataset();
    let filters = Filters {
        category: None,
        city: Some("Los Angeles".to_string()),
        score_range: (0.0, 100.0),
    };
    let view = View::all(&ds).filter(&filters).search("angeles");

    let summary = aggregate_summary(&view);
    assert_eq!(summary.count, 2);
    assert_eq!(summary.composite_score, Some(30.0));

    // Narrowing to no rows keeps aggregation defined-but-undefined.
    let none = view.search("no such text");
    let summary = aggregate_summary(&none);
    assert_eq!(summary.count, 0);
    assert_eq!(summary.composite_score, None);
}

#[test]
fn top_n_zero_is_empty_for_any_view() {
    let ds = common::scenario_dataset();
    let view = View::all(&ds);
    assert!(top_n(&view, NumericField::CompositeScore, 0, Direction::Descending).is_empty());

    let empty = view.search("nothing matches this");
    assert!(top_n(&empty, NumericField::CompositeScore, 0, Direction::Descending).is_empty());
}

#[test]
fn top_n_is_sorted_and_bounded() {
    let ds = common::scenario_dataset();
    let view = View::all(&ds);
    let rows = top_n(&view, NumericField::CompositeScore, 2, Direction::Descending);
    assert_eq!(rows.len(), 2);
    let scores: Vec<f64> = rows
        .iter()
        .map(|&i| ds.records[i].composite_score)
        .collect();
    assert!(scores.windows(2).all(|w| w[0] >= w[1]));
    assert_eq!(scores, vec![90.0, 50.0]);
}

#[test]
fn correlation_matrix_full_dataset_is_symmetric() {
    let ds = common::scenario_dataset();
    let fields = [
        NumericField::CompositeScore,
        NumericField::MedianIncome,
        NumericField::EducationPct,
    ];
    let m = correlation_matrix(&View::all(&ds), &fields);
    for i in 0..m.len() {
        for j in 0..m.len() {
            assert_eq!(m.get(i, j), m.get(j, i));
        }
        assert_eq!(m.get(i, i), Some(1.0));
    }
}

#[test]
fn records_without_coordinates_map_to_the_fallback_center() {
    let ds = common::scenario_dataset();
    let points = map_points(&View::all(&ds), &NoGeocoder);
    assert_eq!(points.len(), 3);
    for p in points {
        assert_eq!((p.latitude, p.longitude), LA_COUNTY_CENTER);
        assert!(p.latitude.is_finite());
    }
}
