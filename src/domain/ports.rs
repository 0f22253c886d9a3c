use crate::utils::error::{ReviewBotError, Result};
use regex::Regex;
use std::fmt::Debug;
use std::sync::OnceLock;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EventKind {
    Click,
    KeyDown,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Key {
    Enter,
    Space,
    Escape,
    Other(String),
}

impl Key {
    /// Maps a DOM `KeyboardEvent.key` value.
    pub fn from_dom(key: &str) -> Self {
        match key {
            "Enter" => Self::Enter,
            " " | "Spacebar" => Self::Space,
            "Escape" | "Esc" => Self::Escape,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn activates(&self) -> bool {
        matches!(self, Self::Enter | Self::Space)
    }
}

/// Where a listener is attached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EventTarget<N> {
    Document,
    Element(N),
}

/// One delivery of an event to one listener, as a host dispatcher hands it over.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UiEvent<N> {
    pub kind: EventKind,
    pub key: Option<Key>,
    /// Element the gesture originated on.
    pub target: N,
    /// Element or document whose listener is being invoked.
    pub current_target: EventTarget<N>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EventOutcome {
    pub handled: bool,
    pub default_prevented: bool,
}

impl EventOutcome {
    pub fn ignored() -> Self {
        Self::default()
    }

    pub fn handled() -> Self {
        Self {
            handled: true,
            default_prevented: false,
        }
    }

    pub fn prevent_default(self) -> Self {
        Self {
            default_prevented: true,
            ..self
        }
    }

    pub fn merge(self, other: Self) -> Self {
        Self {
            handled: self.handled || other.handled,
            default_prevented: self.default_prevented || other.default_prevented,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selector {
    Class(String),
    Id(String),
    Data { key: String, value: Option<String> },
    Tag(String),
}

fn data_selector_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r#"^\[data-([a-z0-9-]+)(?:="?([^\]"]+)"?)?\]$"#)
            .unwrap_or_else(|e| panic!("data selector pattern is invalid: {e}"))
    })
}

fn name_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"^[A-Za-z][A-Za-z0-9_-]*$")
            .unwrap_or_else(|e| panic!("name pattern is invalid: {e}"))
    })
}

impl Selector {
    pub fn parse(selector: &str) -> Result<Self> {
        let selector = selector.trim();
        let invalid = || ReviewBotError::InvalidSelector {
            selector: selector.to_string(),
        };

        if let Some(caps) = data_selector_pattern().captures(selector) {
            return Ok(Self::Data {
                key: caps[1].to_string(),
                value: caps.get(2).map(|m| m.as_str().to_string()),
            });
        }

        let name = selector
            .strip_prefix('.')
            .or_else(|| selector.strip_prefix('#'))
            .unwrap_or(selector);
        if !name_pattern().is_match(name) {
            return Err(invalid());
        }

        Ok(match selector.as_bytes()[0] {
            b'.' => Self::Class(name.to_string()),
            b'#' => Self::Id(name.to_string()),
            _ => Self::Tag(name.to_ascii_lowercase()),
        })
    }
}

/// Capability interface the modal controller drives.
///
/// Implemented by a real browser binding or by [`crate::adapters::memory::InMemoryDocument`].
/// Data attribute keys are given in their `data-` suffix form (`"business-id"`).
pub trait Document {
    type Node: Clone + PartialEq + Debug;

    fn element_by_id(&self, id: &str) -> Option<Self::Node>;

    /// Descendants of `scope` (or of the whole document) matching `selector`, in tree order.
    fn query_all(&self, scope: Option<&Self::Node>, selector: &Selector) -> Vec<Self::Node>;

    fn query_first(&self, scope: Option<&Self::Node>, selector: &Selector) -> Option<Self::Node> {
        self.query_all(scope, selector).into_iter().next()
    }

    fn create_element(&mut self, tag: &str) -> Self::Node;
    fn append_child(&mut self, parent: &Self::Node, child: &Self::Node);
    fn clear_children(&mut self, node: &Self::Node);

    fn set_text(&mut self, node: &Self::Node, text: &str);

    fn data_attribute(&self, node: &Self::Node, key: &str) -> Option<String>;
    fn set_data_attribute(&mut self, node: &Self::Node, key: &str, value: &str);
    fn remove_data_attribute(&mut self, node: &Self::Node, key: &str);

    fn set_hidden(&mut self, node: &Self::Node, hidden: bool);
    fn is_hidden(&self, node: &Self::Node) -> bool;

    fn active_element(&self) -> Option<Self::Node>;
    fn is_focusable(&self, node: &Self::Node) -> bool;
    fn focus(&mut self, node: &Self::Node, prevent_scroll: bool);

    /// Registers interest in `kind` events on `target`; the host later delivers
    /// each matching event as a [`UiEvent`].
    fn listen(&mut self, target: EventTarget<Self::Node>, kind: EventKind);
}
