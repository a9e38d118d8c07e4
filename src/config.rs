//! Application Configuration
//! Optional JSON config file with window, chart, export and category style settings.

use egui::Color32;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Environment variable naming an explicit config file.
pub const CONFIG_ENV_VAR: &str = "VALUATION_VIEW_CONFIG";
/// Config file looked up in the working directory.
pub const DEFAULT_CONFIG_FILE: &str = "valuation-view.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("could not read config file: {0}")]
    Io(#[from] std::io::Error),
    #[error("could not parse config file: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid color {color:?} for category {category:?}")]
    InvalidColor { category: String, color: String },
}

/// Display color and position of one category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryStyle {
    pub name: String,
    /// `#rrggbb`
    pub color: String,
}

impl CategoryStyle {
    fn new(name: &str, color: &str) -> Self {
        Self {
            name: name.to_string(),
            color: color.to_string(),
        }
    }

    /// Parsed color, `None` when `color` is not a CSS hex color.
    pub fn color32(&self) -> Option<Color32> {
        Color32::from_hex(self.color.trim()).ok()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartConfig {
    pub height: f32,
    pub line_width: f32,
    pub point_radius: f32,
    pub show_points: bool,
}

impl Default for ChartConfig {
    fn default() -> Self {
        Self {
            height: 400.0,
            line_width: 2.5,
            point_radius: 3.5,
            show_points: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    pub width: u32,
    pub height: u32,
    pub open_after_export: bool,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            width: 1400,
            height: 800,
            open_after_export: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window_title: String,
    pub title: String,
    pub subtitle: String,
    pub footnote: String,
    /// Dataset loaded at startup; the built-in one when unset.
    pub dataset_path: Option<PathBuf>,
    pub chart: ChartConfig,
    pub export: ExportConfig,
    /// Canonical display order and colors.
    pub categories: Vec<CategoryStyle>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            window_title: "Market Value History".to_string(),
            title: "💸 Neymar Jr.: Market Value Across His Career".to_string(),
            subtitle: "Market value per club over time. Hover the lines for details.".to_string(),
            footnote: "Market values are hand-entered approximations of public \
                       Transfermarkt figures and are meant for demonstration only."
                .to_string(),
            dataset_path: None,
            chart: ChartConfig::default(),
            export: ExportConfig::default(),
            categories: vec![
                CategoryStyle::new("Santos - 1ª Passagem", "#7e57c2"),
                CategoryStyle::new("Barcelona", "#2196f3"),
                CategoryStyle::new("Paris SG", "#ef5350"),
                CategoryStyle::new("Al-Hilal", "#009688"),
                CategoryStyle::new("Santos - 2ª Passagem", "#4CAF50"),
            ],
        }
    }
}

impl AppConfig {
    /// Read and check a config file. Missing fields fall back to defaults.
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&text)?;
        config.check()?;
        Ok(config)
    }

    /// Config from `$VALUATION_VIEW_CONFIG`, else `./valuation-view.json`, else defaults.
    ///
    /// A broken config file is reported and replaced by defaults.
    pub fn load() -> Self {
        let (path, explicit) = match std::env::var_os(CONFIG_ENV_VAR) {
            Some(path) => (PathBuf::from(path), true),
            None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
        };

        if !explicit && !path.exists() {
            log::debug!("no config file at {}, using defaults", path.display());
            return Self::default();
        }

        match Self::from_file(&path) {
            Ok(config) => {
                log::info!("loaded config from {}", path.display());
                config
            }
            Err(e) => {
                log::warn!("unable to load config {}: {}", path.display(), e);
                Self::default()
            }
        }
    }

    fn check(&self) -> Result<(), ConfigError> {
        for style in &self.categories {
            if style.color32().is_none() {
                return Err(ConfigError::InvalidColor {
                    category: style.name.clone(),
                    color: style.color.clone(),
                });
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_color() {
        let style = CategoryStyle::new("Barcelona", "#2196f3");
        assert_eq!(style.color32(), Some(Color32::from_rgb(0x21, 0x96, 0xf3)));
        assert_eq!(CategoryStyle::new("A", "blue").color32(), None);
        assert_eq!(CategoryStyle::new("A", "#gg0000").color32(), None);
    }

    #[test]
    fn test_defaults_are_valid() {
        let config = AppConfig::default();
        assert!(config.check().is_ok());
        assert_eq!(config.categories.len(), 5);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let path = std::env::temp_dir().join(format!(
            "valuation_view_{}_partial.json",
            std::process::id()
        ));
        std::fs::write(
            &path,
            r##"{"window_title": "Custom", "chart": {"height": 250.0}, "categories": [{"name": "A", "color": "#000000"}]}"##,
        )
        .unwrap();

        let config = AppConfig::from_file(&path).unwrap();
        assert_eq!(config.window_title, "Custom");
        assert_eq!(config.chart.height, 250.0);
        assert_eq!(config.chart.line_width, ChartConfig::default().line_width);
        assert_eq!(config.export, ExportConfig::default());
        assert_eq!(config.categories.len(), 1);
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_bad_color_rejected() {
        let path = std::env::temp_dir().join(format!(
            "valuation_view_{}_badcolor.json",
            std::process::id()
        ));
        std::fs::write(&path, r#"{"categories": [{"name": "A", "color": "blue"}]}"#).unwrap();

        let err = AppConfig::from_file(&path).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidColor { .. }));
        std::fs::remove_file(path).ok();
    }

    #[test]
    fn test_load_from_env_var() {
        let dir = std::env::temp_dir();
        let valid = dir.join(format!("valuation_view_{}_env_ok.json", std::process::id()));
        let broken = dir.join(format!("valuation_view_{}_env_bad.json", std::process::id()));
        std::fs::write(&valid, r#"{"window_title": "From env"}"#).unwrap();
        std::fs::write(&broken, "{ window_title: ").unwrap();

        // Only this test touches the variable.
        std::env::set_var(CONFIG_ENV_VAR, &valid);
        assert_eq!(AppConfig::load().window_title, "From env");

        std::env::set_var(CONFIG_ENV_VAR, &broken);
        assert_eq!(AppConfig::load(), AppConfig::default());

        std::env::set_var(CONFIG_ENV_VAR, dir.join("valuation_view_missing_config.json"));
        assert_eq!(AppConfig::load(), AppConfig::default());

        std::env::remove_var(CONFIG_ENV_VAR);
        std::fs::remove_file(valid).ok();
        std::fs::remove_file(broken).ok();
    }
}
