use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::domain::{
    errors::{PlotError, PlotResult},
    plot::{Legends, Paddings, PlotData, YScaleMode, ZoomExtent, services},
};

/// Recognized plot options. Everything except `sequence_length` has a
/// default; unknown keys are ignored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PlotConfig {
    /// Id of the element the plot is mounted in (JS callers may pass the
    /// element itself instead)
    pub element: Option<String>,
    pub sequence_length: f64,
    pub data: PlotData,
    pub site_height: f64,
    /// Transition duration in milliseconds
    pub animations_speed: f64,
    pub paddings: Paddings,
    pub width: Option<f64>,
    pub height: Option<f64>,
    /// height / width, used when only one dimension is given
    pub ratio: f64,
    pub min_zoom: f64,
    pub max_zoom: f64,
    /// Mutation category -> head color
    pub mutations_color_map: Option<HashMap<String, String>>,
    pub head_size: f64,
    pub use_log: bool,
    pub y_scale: YScaleMode,
    pub y_scale_min: Option<f64>,
    pub y_scale_max: Option<f64>,
    pub legends: Legends,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            element: None,
            sequence_length: 0.0,
            data: PlotData::default(),
            site_height: 10.0,
            animations_speed: 300.0,
            paddings: Paddings::default(),
            width: Some(600.0),
            height: None,
            ratio: 0.5,
            min_zoom: 1.0,
            max_zoom: 6.0,
            mutations_color_map: None,
            head_size: 6.0,
            use_log: false,
            y_scale: YScaleMode::Auto,
            y_scale_min: None,
            y_scale_max: None,
            legends: Legends::default(),
        }
    }
}

impl PlotConfig {
    pub fn new(sequence_length: f64, data: PlotData) -> Self {
        Self { sequence_length, data, ..Self::default() }
    }

    pub fn from_json(json: &str) -> PlotResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Any two of width, height and ratio determine the third. Without
    /// width and height the plot gets one pixel per residue.
    pub fn adjust_dimensions(&mut self) {
        let width = self.width.filter(|w| *w > 0.0);
        let height = self.height.filter(|h| *h > 0.0);
        let (width, height) = match (width, height) {
            (Some(w), Some(h)) => {
                self.ratio = h / w;
                (w, h)
            }
            (Some(w), None) => (w, w * self.ratio),
            (None, Some(h)) => (h / self.ratio, h),
            (None, None) => (self.sequence_length, self.sequence_length * self.ratio),
        };
        self.width = Some(width);
        self.height = Some(height);
    }

    pub fn width_px(&self) -> f64 {
        self.width.unwrap_or(0.0)
    }

    pub fn height_px(&self) -> f64 {
        self.height.unwrap_or(0.0)
    }

    /// Horizontal room left for the sequence.
    pub fn plot_width(&self) -> f64 {
        self.width_px() - self.paddings.horizontal()
    }

    /// Y coordinate of the x axis and the site track.
    pub fn baseline(&self) -> f64 {
        self.height_px() - self.paddings.bottom
    }

    pub fn zoom_extent(&self) -> ZoomExtent {
        ZoomExtent::new(self.min_zoom, self.max_zoom)
    }

    /// Color for a mutation category; no map or no entry means no fill.
    pub fn color_for(&self, category: Option<&str>) -> Option<String> {
        let map = self.mutations_color_map.as_ref()?;
        map.get(category?).cloned()
    }

    /// `(min, max)` of the y axis: measured from the mutations in auto mode,
    /// taken from the configuration in manual mode.
    pub fn y_bounds(&self) -> (Option<f64>, Option<f64>) {
        match self.y_scale {
            YScaleMode::Auto => match services::magnitude_extent(&self.data.mutations) {
                Some((min, max)) => (Some(min), Some(max)),
                None => (None, None),
            },
            YScaleMode::Manual => (self.y_scale_min, self.y_scale_max),
        }
    }

    /// Check the options after dimensions were adjusted.
    pub fn validate(&self) -> PlotResult<()> {
        if !(self.sequence_length.is_finite() && self.sequence_length > 0.0) {
            return Err(PlotError::InvalidConfig(format!(
                "sequence_length must be positive, got {}",
                self.sequence_length
            )));
        }
        if !(self.min_zoom > 0.0 && self.min_zoom <= self.max_zoom && self.max_zoom.is_finite()) {
            return Err(PlotError::InvalidConfig(format!(
                "zoom extent [{}, {}] is not valid",
                self.min_zoom, self.max_zoom
            )));
        }
        if !(self.ratio.is_finite() && self.ratio > 0.0) {
            return Err(PlotError::InvalidConfig(format!("ratio must be positive, got {}", self.ratio)));
        }
        if !(self.plot_width() > 0.0) {
            return Err(PlotError::InvalidConfig(format!(
                "width {} leaves no room between paddings",
                self.width_px()
            )));
        }
        if !(self.head_size >= 0.0 && self.site_height >= 0.0 && self.animations_speed >= 0.0) {
            return Err(PlotError::InvalidConfig(
                "head_size, site_height and animations_speed must not be negative".to_string(),
            ));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_documented_values() {
        let config = PlotConfig::default();
        assert_eq!(config.site_height, 10.0);
        assert_eq!(config.animations_speed, 300.0);
        assert_eq!(config.paddings, Paddings { top: 30.0, bottom: 60.0, left: 90.0, right: 5.0 });
        assert_eq!(config.width, Some(600.0));
        assert_eq!(config.ratio, 0.5);
        assert_eq!((config.min_zoom, config.max_zoom), (1.0, 6.0));
        assert_eq!(config.head_size, 6.0);
        assert!(!config.use_log);
        assert_eq!(config.y_scale, YScaleMode::Auto);
        assert_eq!(config.legends.x.as_deref(), Some("Sequence"));
        assert_eq!(config.legends.y.as_deref(), Some("# of mutations"));
    }

    #[test]
    fn two_dimensions_determine_the_third() {
        let mut config = PlotConfig::new(393.0, PlotData::default());
        config.adjust_dimensions();
        assert_eq!((config.width_px(), config.height_px()), (600.0, 300.0));

        let mut config = PlotConfig { width: Some(800.0), height: Some(200.0), ..PlotConfig::new(393.0, PlotData::default()) };
        config.adjust_dimensions();
        assert_eq!(config.ratio, 0.25);

        let mut config = PlotConfig { width: None, height: Some(200.0), ..PlotConfig::new(393.0, PlotData::default()) };
        config.adjust_dimensions();
        assert_eq!(config.width_px(), 400.0);

        let mut config = PlotConfig { width: None, ..PlotConfig::new(393.0, PlotData::default()) };
        config.adjust_dimensions();
        assert_eq!((config.width_px(), config.height_px()), (393.0, 196.5));
    }

    #[test]
    fn parses_partial_json() {
        let config = PlotConfig::from_json(
            r#"{
                "sequence_length": 393,
                "paddings": {"left": 40},
                "y_scale": "manual",
                "y_scale_max": 20,
                "mutations_color_map": {"proximal": "orange"},
                "data": {"mutations": [{"pos": 157, "value": 6, "category": "proximal"}]}
            }"#,
        )
        .unwrap_or_else(|e| panic!("{}", e));
        assert_eq!(config.paddings.left, 40.0);
        assert_eq!(config.paddings.bottom, 60.0);
        assert_eq!(config.y_bounds(), (None, Some(20.0)));
        assert_eq!(config.color_for(Some("proximal")).as_deref(), Some("orange"));
        assert_eq!(config.color_for(Some("distal")), None);
        assert_eq!(config.color_for(None), None);
    }

    #[test]
    fn rejects_missing_sequence_length() {
        let mut config = PlotConfig::default();
        config.adjust_dimensions();
        assert!(matches!(config.validate(), Err(PlotError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_inverted_zoom_extent() {
        let mut config = PlotConfig { min_zoom: 4.0, max_zoom: 2.0, ..PlotConfig::new(100.0, PlotData::default()) };
        config.adjust_dimensions();
        assert!(config.validate().is_err());
    }
}
