//! Series Styles
//! Maps categories to display colors and order.

use crate::config::CategoryStyle;
use egui::Color32;

/// Fallback palette for categories without a configured color.
pub const PALETTE: [[u8; 3]; 10] = [
    [231, 76, 60],   // Red
    [46, 204, 113],  // Green
    [155, 89, 182],  // Purple
    [243, 156, 18],  // Orange
    [26, 188, 156],  // Teal
    [233, 30, 99],   // Pink
    [0, 188, 212],   // Cyan
    [255, 87, 34],   // Deep Orange
    [121, 85, 72],   // Brown
    [96, 125, 139],  // Blue Grey
];

/// Category -> color/order mapping.
#[derive(Debug, Clone, Default)]
pub struct SeriesStyles {
    entries: Vec<(String, Color32)>,
}

impl SeriesStyles {
    /// Build from configured styles. Entries with unparseable colors are skipped.
    pub fn from_config(styles: &[CategoryStyle]) -> Self {
        let entries = styles
            .iter()
            .filter_map(|s| s.color32().map(|color| (s.name.clone(), color)))
            .collect();
        Self { entries }
    }

    /// RGB for a category. `fallback_index` picks a palette slot for unconfigured ones.
    pub fn rgb(&self, category: &str, fallback_index: usize) -> [u8; 3] {
        let color = self.color32(category, fallback_index);
        [color.r(), color.g(), color.b()]
    }

    pub fn color32(&self, category: &str, fallback_index: usize) -> Color32 {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, color)| *color)
            .unwrap_or_else(|| {
                let [r, g, b] = PALETTE[fallback_index % PALETTE.len()];
                Color32::from_rgb(r, g, b)
            })
    }

    /// Configured categories first in configured order, the rest keep their given order.
    pub fn ordered(&self, categories: &[String]) -> Vec<String> {
        let mut ordered: Vec<String> = self
            .entries
            .iter()
            .filter(|(name, _)| categories.contains(name))
            .map(|(name, _)| name.clone())
            .collect();
        ordered.extend(
            categories
                .iter()
                .filter(|c| !self.entries.iter().any(|(name, _)| name == *c))
                .cloned(),
        );
        ordered
    }

    /// Stable colors for a category list: configured color or the next palette slot.
    pub fn assign(&self, categories: &[String]) -> Vec<(String, [u8; 3])> {
        let mut fallback = 0;
        categories
            .iter()
            .map(|c| {
                let rgb = self.rgb(c, fallback);
                if !self.entries.iter().any(|(name, _)| name == c) {
                    fallback += 1;
                }
                (c.clone(), rgb)
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn styles() -> SeriesStyles {
        SeriesStyles::from_config(&[
            CategoryStyle {
                name: "Barcelona".into(),
                color: "#2196f3".into(),
            },
            CategoryStyle {
                name: "Paris SG".into(),
                color: "#ef5350".into(),
            },
            CategoryStyle {
                name: "Broken".into(),
                color: "nope".into(),
            },
        ])
    }

    #[test]
    fn test_configured_and_fallback_colors() {
        let styles = styles();
        assert_eq!(styles.rgb("Barcelona", 0), [0x21, 0x96, 0xf3]);
        assert_eq!(styles.rgb("Unknown", 1), PALETTE[1]);
        assert_eq!(styles.rgb("Broken", 0), PALETTE[0]);
        assert_eq!(
            styles.color32("Paris SG", 0),
            Color32::from_rgb(0xef, 0x53, 0x50)
        );
    }

    #[test]
    fn test_ordering() {
        let categories = vec![
            "Santos".to_string(),
            "Paris SG".to_string(),
            "Barcelona".to_string(),
            "Al-Hilal".to_string(),
        ];
        assert_eq!(
            styles().ordered(&categories),
            vec!["Barcelona", "Paris SG", "Santos", "Al-Hilal"]
        );
    }

    #[test]
    fn test_assign_advances_palette_only_for_unconfigured() {
        let assigned = styles().assign(&[
            "Santos".to_string(),
            "Barcelona".to_string(),
            "Al-Hilal".to_string(),
        ]);
        assert_eq!(assigned[0].1, PALETTE[0]);
        assert_eq!(assigned[1].1, [0x21, 0x96, 0xf3]);
        assert_eq!(assigned[2].1, PALETTE[1]);
    }
}
