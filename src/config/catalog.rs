use crate::domain::model::Catalog;
use crate::utils::error::{ReviewBotError, Result};
use crate::utils::validation::{
    validate_file_extension, validate_non_empty_string, validate_path, validate_rating, Validate,
};
use std::path::Path;

impl Catalog {
    pub fn from_toml_str(content: &str) -> Result<Self> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        Ok(serde_json::from_str(content)?)
    }

    /// Loads and validates a catalog file, picking the format from its extension.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let path_text = path.to_string_lossy();
        validate_path("catalog", &path_text)?;
        validate_file_extension("catalog", &path_text, &["toml", "json"]).map_err(|_| {
            ReviewBotError::UnsupportedCatalogFormat {
                path: path_text.to_string(),
            }
        })?;

        let content = std::fs::read_to_string(path)?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        let catalog = if is_json {
            Self::from_json_str(&content)?
        } else {
            Self::from_toml_str(&content)?
        };
        catalog.validate()?;

        tracing::debug!("Loaded {} businesses from {}", catalog.len(), path_text);
        Ok(catalog)
    }
}

impl Validate for Catalog {
    fn validate(&self) -> Result<()> {
        for (id, business) in self.iter() {
            validate_non_empty_string("businesses", id)?;
            validate_non_empty_string(&format!("businesses.{}.name", id), &business.name)?;
            validate_rating(&format!("businesses.{}.average", id), business.average)?;

            for (index, review) in business.reviews.iter().enumerate() {
                validate_non_empty_string(
                    &format!("businesses.{}.reviews[{}].author", id, index),
                    &review.author,
                )?;
                validate_rating(
                    &format!("businesses.{}.reviews[{}].rating", id, index),
                    review.rating,
                )?;
            }
        }
        Ok(())
    }
}
