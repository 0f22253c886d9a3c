pub mod catalog;
#[cfg(feature = "cli")]
pub mod cli;

use crate::domain::ports::Selector;
use crate::utils::error::Result;
use crate::utils::validation::{validate_non_empty_string, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Identifiers and selectors the controller uses to find its elements in the host page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct MarkupConfig {
    pub overlay_id: String,
    pub heading_id: String,
    pub subheading_id: String,
    pub summary_id: String,
    pub average_id: String,
    pub count_id: String,
    pub reviews_id: String,
    pub window_selector: String,
    pub close_selector: String,
    pub card_selector: String,
    /// `data-` attribute on cards naming their business.
    pub business_attribute: String,
    /// `data-` attribute set on the overlay while open.
    pub active_attribute: String,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            overlay_id: "review-bot".to_string(),
            heading_id: "bot-heading".to_string(),
            subheading_id: "bot-subheading".to_string(),
            summary_id: "bot-summary".to_string(),
            average_id: "bot-average".to_string(),
            count_id: "bot-count".to_string(),
            reviews_id: "bot-reviews".to_string(),
            window_selector: ".bot-window".to_string(),
            close_selector: ".bot-close".to_string(),
            card_selector: ".business-card".to_string(),
            business_attribute: "business-id".to_string(),
            active_attribute: "active-business".to_string(),
        }
    }
}

impl MarkupConfig {
    /// Loads a markup config from a TOML file; missing keys keep their defaults.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    fn ids(&self) -> [(&'static str, &str); 9] {
        [
            ("overlay_id", self.overlay_id.as_str()),
            ("heading_id", self.heading_id.as_str()),
            ("subheading_id", self.subheading_id.as_str()),
            ("summary_id", self.summary_id.as_str()),
            ("average_id", self.average_id.as_str()),
            ("count_id", self.count_id.as_str()),
            ("reviews_id", self.reviews_id.as_str()),
            ("business_attribute", self.business_attribute.as_str()),
            ("active_attribute", self.active_attribute.as_str()),
        ]
    }
}

impl Validate for MarkupConfig {
    fn validate(&self) -> Result<()> {
        for (field, value) in self.ids() {
            validate_non_empty_string(field, value)?;
        }
        for selector in [&self.window_selector, &self.close_selector, &self.card_selector] {
            Selector::parse(selector)?;
        }
        Ok(())
    }
}
