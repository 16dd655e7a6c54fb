//! Layout configuration
//!
//! All tunables of the spring layout, loadable from TOML:
//!
//! ```toml
//! scroll_resistance_factor = 1000.0
//! boundary_scroll_resistance_factor = 10.0
//! spring_damping = 1.0
//! item_height = 44.0
//! ```

use serde::{Deserialize, Serialize};
use springflow_animation::SpringConfig;

use crate::error::{LayoutError, Result};

/// Configuration for the spring flow layout
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct SpringFlowConfig {
    /// How strongly distance from the touch point delays an item while
    /// dragging. Larger values mean less lag.
    pub scroll_resistance_factor: f32,
    /// How strongly overscroll distance stretches the gaps between items.
    /// Larger values mean less stretch.
    pub boundary_scroll_resistance_factor: f32,
    /// Damping ratio of each attachment spring (1.0 = critically damped)
    pub spring_damping: f32,
    /// Oscillation frequency of each attachment spring, in Hz
    pub spring_frequency: f32,
    /// Height of every item
    pub item_height: f32,
    /// Gap between consecutive items
    pub item_spacing: f32,
    /// Extra distance above and below the viewport in which items are
    /// attached ahead of becoming visible
    pub visible_margin: f32,
}

impl Default for SpringFlowConfig {
    fn default() -> Self {
        Self {
            scroll_resistance_factor: 1000.0,
            boundary_scroll_resistance_factor: 10.0,
            spring_damping: 1.0,
            spring_frequency: 1.0,
            item_height: 44.0,
            item_spacing: 10.0,
            visible_margin: 100.0,
        }
    }
}

impl SpringFlowConfig {
    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: SpringFlowConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to a TOML string
    pub fn to_toml(&self) -> Result<String> {
        Ok(toml::to_string_pretty(self)?)
    }

    /// Spring parameters used for new attachments
    pub fn spring(&self) -> SpringConfig {
        SpringConfig::from_frequency(self.spring_frequency, self.spring_damping)
    }

    /// Check every value is usable by the layout
    pub fn validate(&self) -> Result<()> {
        positive("scroll_resistance_factor", self.scroll_resistance_factor)?;
        positive(
            "boundary_scroll_resistance_factor",
            self.boundary_scroll_resistance_factor,
        )?;
        positive("spring_frequency", self.spring_frequency)?;
        positive("item_height", self.item_height)?;
        non_negative("spring_damping", self.spring_damping)?;
        non_negative("item_spacing", self.item_spacing)?;
        non_negative("visible_margin", self.visible_margin)?;
        Ok(())
    }
}

fn positive(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(LayoutError::InvalidConfig {
            field,
            reason: "must be finite",
        });
    }
    if value <= 0.0 {
        return Err(LayoutError::InvalidConfig {
            field,
            reason: "must be greater than zero",
        });
    }
    Ok(())
}

fn non_negative(field: &'static str, value: f32) -> Result<()> {
    if !value.is_finite() {
        return Err(LayoutError::InvalidConfig {
            field,
            reason: "must be finite",
        });
    }
    if value < 0.0 {
        return Err(LayoutError::InvalidConfig {
            field,
            reason: "must not be negative",
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = SpringFlowConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.scroll_resistance_factor, 1000.0);
        assert_eq!(config.boundary_scroll_resistance_factor, 10.0);
        assert_eq!(config.spring_damping, 1.0);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config = SpringFlowConfig::from_toml_str(
            r#"
            item_height = 60.0
            item_spacing = 0.0
            "#,
        )
        .unwrap();

        assert_eq!(config.item_height, 60.0);
        assert_eq!(config.item_spacing, 0.0);
        assert_eq!(config.scroll_resistance_factor, 1000.0);
        assert_eq!(config.visible_margin, 100.0);
    }

    #[test]
    fn test_toml_round_trip() {
        let config = SpringFlowConfig {
            spring_damping: 0.6,
            ..Default::default()
        };
        let text = config.to_toml().unwrap();
        assert_eq!(SpringFlowConfig::from_toml_str(&text).unwrap(), config);
    }

    #[test]
    fn test_zero_resistance_is_rejected() {
        let err = SpringFlowConfig::from_toml_str("scroll_resistance_factor = 0.0").unwrap_err();
        assert!(matches!(
            err,
            LayoutError::InvalidConfig {
                field: "scroll_resistance_factor",
                ..
            }
        ));
    }

    #[test]
    fn test_negative_spacing_is_rejected() {
        let config = SpringFlowConfig {
            item_spacing: -1.0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_malformed_toml_is_a_parse_error() {
        let err = SpringFlowConfig::from_toml_str("item_height = \"tall\"").unwrap_err();
        assert!(matches!(err, LayoutError::ConfigParse(_)));
    }

    #[test]
    fn test_spring_matches_damping() {
        let config = SpringFlowConfig::default();
        assert!((config.spring().damping_ratio() - 1.0).abs() < 1e-4);
    }
}
