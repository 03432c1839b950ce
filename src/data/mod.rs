/// Data layer: core types, loading, filtering, and aggregation.
///
/// Architecture:
/// ```text
///        .csv
///          │
///          ▼
///    ┌──────────┐
///    │  loader   │  probe candidate paths, parse → ZipDataset (memoized)
///    └──────────┘
///          │
///          ▼
///    ┌────────────┐
///    │ ZipDataset  │  Vec<Record>, filter indices, score range
///    └────────────┘
///          │
///          ▼
///    ┌──────────┐      ┌──────────┐      ┌──────────┐
///    │  filter   │ ───▶ │  stats    │      │  export   │
///    └──────────┘      └──────────┘      └──────────┘
///      View: rows        summaries,        projection,
///      + search          top-N, groups,    CSV text
///                        correlation
/// ```
///
/// Every operation is pure: it takes the base dataset (or a prior view) and
/// returns a new view, leaving the base untouched.
pub mod error;
pub mod export;
pub mod filter;
pub mod geocode;
pub mod loader;
pub mod model;
pub mod stats;
