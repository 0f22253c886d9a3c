use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub author: String,
    pub rating: f64,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BusinessRecord {
    pub name: String,
    pub category: String,
    pub summary: String,
    pub average: f64,
    pub review_count: u32,
    #[serde(default)]
    pub reviews: Vec<ReviewRecord>,
}

/// Read-only lookup table from business id to its record.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Catalog {
    businesses: BTreeMap<String, BusinessRecord>,
}

impl Catalog {
    pub fn get(&self, business_id: &str) -> Option<&BusinessRecord> {
        self.businesses.get(business_id)
    }

    pub fn contains(&self, business_id: &str) -> bool {
        self.businesses.contains_key(business_id)
    }

    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.businesses.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &BusinessRecord)> {
        self.businesses.iter().map(|(id, record)| (id.as_str(), record))
    }

    pub fn len(&self) -> usize {
        self.businesses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.businesses.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, BusinessRecord)> for Catalog {
    fn from_iter<I: IntoIterator<Item = (K, BusinessRecord)>>(iter: I) -> Self {
        Self {
            businesses: iter.into_iter().map(|(id, record)| (id.into(), record)).collect(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ModalState {
    #[default]
    Closed,
    Open(String),
}

impl ModalState {
    pub fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }

    pub fn active_business(&self) -> Option<&str> {
        match self {
            Self::Open(id) => Some(id),
            Self::Closed => None,
        }
    }
}
