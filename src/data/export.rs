use super::error::DataError;
use super::filter::View;
use super::model::Field;

// ---------------------------------------------------------------------------
// Column selection
// ---------------------------------------------------------------------------

/// Resolve an ordered list of column names into schema fields.
///
/// Any unknown name fails the whole request with `InvalidField`; nothing is
/// silently dropped.
pub fn select_columns(columns: &[&str]) -> Result<Vec<Field>, DataError> {
    columns.iter().map(|name| Field::from_name(name)).collect()
}

// ---------------------------------------------------------------------------
// CSV export
// ---------------------------------------------------------------------------

/// Serialize the view to CSV text: one header row in projection order, no
/// index column. The output round-trips through the loader when the
/// projection covers the full schema.
pub fn view_to_csv(view: &View<'_>, fields: &[Field]) -> Result<String, DataError> {
    let mut writer = csv::Writer::from_writer(Vec::new());

    writer.write_record(fields.iter().map(|f| f.name()))?;
    for record in view.records() {
        writer.write_record(fields.iter().map(|f| f.cell(record)))?;
    }

    let bytes = writer.into_inner().map_err(|e| e.into_error())?;
    // csv::Writer only ever emits the UTF-8 we fed it.
    Ok(String::from_utf8(bytes).expect("csv output is valid UTF-8"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::model::{Record, ZipDataset};

    fn dataset() -> ZipDataset {
        ZipDataset::from_records(vec![Record {
            zip_code: "90210".to_string(),
            primary_city: "Beverly Hills".to_string(),
            composite_score: 87.5,
            score_category: "Excellent".to_string(),
            density_score: 60.0,
            transit_score: 40.0,
            income_score: 95.0,
            education_score: 90.0,
            housing_score: 88.0,
            median_income: 153_000.0,
            median_home_value: 2_500_000.0,
            estimated_population: 21_741,
            population_density: 1_200.5,
            public_transit_pct: 3.2,
            education_pct: 62.0,
            latitude: None,
            longitude: None,
        }])
    }

    #[test]
    fn select_columns_preserves_order() {
        let fields = select_columns(&["primary_city", "zip_code"]).unwrap();
        assert_eq!(fields[0].name(), "primary_city");
        assert_eq!(fields[1].name(), "zip_code");
    }

    #[test]
    fn select_columns_rejects_unknown_name() {
        let err = select_columns(&["zip_code", "bogus"]).unwrap_err();
        assert!(matches!(err, DataError::InvalidField(ref n) if n == "bogus"));
    }

    #[test]
    fn export_writes_projection_order_without_index() {
        let ds = dataset();
        let fields = select_columns(&["zip_code", "primary_city", "composite_score"]).unwrap();
        let csv_text = view_to_csv(&View::all(&ds), &fields).unwrap();
        let mut lines = csv_text.lines();
        assert_eq!(lines.next(), Some("zip_code,primary_city,composite_score"));
        assert_eq!(lines.next(), Some("90210,Beverly Hills,87.5"));
        assert_eq!(lines.next(), None);
    }

    #[test]
    fn export_renders_missing_coordinates_empty() {
        let ds = dataset();
        let fields = select_columns(&["zip_code", "latitude", "longitude"]).unwrap();
        let csv_text = view_to_csv(&View::all(&ds), &fields).unwrap();
        assert!(csv_text.lines().nth(1).unwrap().starts_with("90210,,"));
    }
}
