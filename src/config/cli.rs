use crate::config::MarkupConfig;
use crate::domain::directory::builtin_catalog;
use crate::domain::model::Catalog;
use crate::domain::ports::Key;
use crate::utils::error::Result;
use crate::utils::validation::{validate_file_extension, validate_path, Validate};
use clap::{Parser, Subcommand};
use std::str::FromStr;

#[derive(Debug, Clone, Parser)]
#[command(name = "review-bot")]
#[command(about = "Preview the review bot modal on an in-memory directory page")]
pub struct CliConfig {
    /// Catalog file (.toml or .json); the built-in directory is used when omitted
    #[arg(long, global = true)]
    pub catalog: Option<String>,

    /// TOML file overriding the overlay ids and selectors
    #[arg(long, global = true)]
    pub markup: Option<String>,

    #[arg(short, long, global = true, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Emit logs as JSON")]
    pub json_logs: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Clone, Subcommand)]
pub enum Command {
    /// List the businesses in the catalog
    List,
    /// Open the modal for one business and print the overlay
    Show { business_id: String },
    /// Replay a sequence of gestures, printing the modal state after each
    Replay {
        /// click:<id>, key:<id>:<key>, open:<id>, escape, close, backdrop, window
        #[arg(required = true)]
        steps: Vec<Step>,
    },
}

/// One scripted gesture against the preview page.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Step {
    ClickCard(String),
    KeyOnCard(String, Key),
    Open(String),
    Escape,
    Close,
    Backdrop,
    Window,
}

impl FromStr for Step {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let mut parts = s.splitn(3, ':');
        let step = match (parts.next(), parts.next(), parts.next()) {
            (Some("click"), Some(id), None) if !id.is_empty() => Self::ClickCard(id.to_string()),
            (Some("open"), Some(id), None) => Self::Open(id.to_string()),
            (Some("key"), Some(id), Some(key)) if !id.is_empty() && !key.is_empty() => {
                let key = if key.eq_ignore_ascii_case("space") { " " } else { key };
                Self::KeyOnCard(id.to_string(), Key::from_dom(key))
            }
            (Some("escape"), None, None) => Self::Escape,
            (Some("close"), None, None) => Self::Close,
            (Some("backdrop"), None, None) => Self::Backdrop,
            (Some("window"), None, None) => Self::Window,
            _ => return Err(format!("unrecognized step '{}'", s)),
        };
        Ok(step)
    }
}

impl CliConfig {
    pub fn load_catalog(&self) -> Result<Catalog> {
        match &self.catalog {
            Some(path) => Catalog::from_file(path),
            None => Ok(builtin_catalog()),
        }
    }

    pub fn load_markup(&self) -> Result<MarkupConfig> {
        let markup = match &self.markup {
            Some(path) => MarkupConfig::from_file(path)?,
            None => MarkupConfig::default(),
        };
        markup.validate()?;
        Ok(markup)
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        if let Some(catalog) = &self.catalog {
            validate_path("catalog", catalog)?;
            validate_file_extension("catalog", catalog, &["toml", "json"])?;
        }
        if let Some(markup) = &self.markup {
            validate_path("markup", markup)?;
            validate_file_extension("markup", markup, &["toml"])?;
        }
        Ok(())
    }
}
