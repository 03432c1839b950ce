/// UI layer: stateless render functions over [`crate::state::AppState`].
pub mod charts;
pub mod panels;
pub mod tabs;
