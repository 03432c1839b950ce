use std::collections::BTreeMap;

use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            Color32::from_rgb(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Category colours: score_category → Color32
// ---------------------------------------------------------------------------

/// Maps score categories to distinct colours, used consistently across the
/// category chart, scatter plots and the map.
#[derive(Debug, Clone)]
pub struct CategoryColors {
    mapping: BTreeMap<String, Color32>,
    default_color: Color32,
}

impl CategoryColors {
    /// Build the mapping from the dataset's sorted category list.
    pub fn new(categories: &[String]) -> Self {
        let palette = generate_palette(categories.len());
        let mapping: BTreeMap<String, Color32> = categories
            .iter()
            .cloned()
            .zip(palette.into_iter())
            .collect();

        CategoryColors {
            mapping,
            default_color: Color32::GRAY,
        }
    }

    pub fn color_for(&self, category: &str) -> Color32 {
        self.mapping
            .get(category)
            .copied()
            .unwrap_or(self.default_color)
    }
}

impl Default for CategoryColors {
    fn default() -> Self {
        CategoryColors {
            mapping: BTreeMap::new(),
            default_color: Color32::GRAY,
        }
    }
}

// ---------------------------------------------------------------------------
// Diverging ramp for the correlation heatmap
// ---------------------------------------------------------------------------

/// Map a correlation coefficient in [-1, 1] onto a blue–white–red ramp.
pub fn diverging(value: f64) -> Color32 {
    let t = (value.clamp(-1.0, 1.0) as f32 + 1.0) / 2.0;
    let blue = Srgb::new(0.13_f32, 0.40, 0.67).into_linear();
    let white = Srgb::new(0.97_f32, 0.97, 0.97).into_linear();
    let red = Srgb::new(0.70_f32, 0.09, 0.17).into_linear();

    let mixed = if t < 0.5 {
        blue.mix(white, t * 2.0)
    } else {
        white.mix(red, (t - 0.5) * 2.0)
    };
    let rgb: Srgb = Srgb::from_linear(mixed);
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_is_distinct() {
        let colors = generate_palette(5);
        assert_eq!(colors.len(), 5);
        let mut unique = colors.clone();
        unique.dedup();
        assert_eq!(unique.len(), 5);
    }

    #[test]
    fn category_colors_are_stable() {
        let cats = vec!["Average".to_string(), "Excellent".to_string()];
        let colors = CategoryColors::new(&cats);
        assert_eq!(colors.color_for("Average"), colors.color_for("Average"));
        assert_ne!(colors.color_for("Average"), colors.color_for("Excellent"));
        assert_eq!(colors.color_for("Unknown"), Color32::GRAY);
    }

    #[test]
    fn diverging_endpoints() {
        // Strong negative is blue-ish, strong positive red-ish.
        let lo = diverging(-1.0);
        let hi = diverging(1.0);
        assert!(lo.b() > lo.r());
        assert!(hi.r() > hi.b());
    }
}
