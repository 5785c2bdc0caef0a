//! Landmark regions and the ordered index built by the scanner

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{DomError, Result};
use crate::types::ElementHandle;

/// Landmark role
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LandmarkRole {
    Banner,
    Complementary,
    ContentInfo,
    Form,
    Main,
    Navigation,
    Region,
    Search,
}

impl LandmarkRole {
    /// Parse an ARIA role token
    pub fn parse(s: &str) -> Option<Self> {
        Some(match s.to_ascii_lowercase().as_str() {
            "banner" => Self::Banner,
            "complementary" => Self::Complementary,
            "contentinfo" => Self::ContentInfo,
            "form" => Self::Form,
            "main" => Self::Main,
            "navigation" => Self::Navigation,
            "region" => Self::Region,
            "search" => Self::Search,
            _ => return None,
        })
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Banner => "banner",
            Self::Complementary => "complementary",
            Self::ContentInfo => "contentinfo",
            Self::Form => "form",
            Self::Main => "main",
            Self::Navigation => "navigation",
            Self::Region => "region",
            Self::Search => "search",
        }
    }

    /// Roles that only count as landmarks when they have an accessible name
    pub fn requires_label(&self) -> bool {
        matches!(self, Self::Form | Self::Region)
    }
}

impl fmt::Display for LandmarkRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One landmark found by a scan
#[derive(Debug, Clone, PartialEq)]
pub struct LandmarkRegion {
    /// Non-owning; stale once the element leaves the tree
    pub element: ElementHandle,
    pub role: LandmarkRole,
    pub label: String,
    /// Number of landmark ancestors
    pub depth: usize,
    /// Pre-order position within the scan, from 0
    pub document_order_index: usize,
}

impl LandmarkRegion {
    pub fn summary(&self) -> LandmarkSummary {
        LandmarkSummary {
            depth: self.depth,
            role: self.role,
            label: self.label.clone(),
        }
    }
}

/// Serializable projection of a region for display
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LandmarkSummary {
    pub depth: usize,
    pub role: LandmarkRole,
    pub label: String,
}

/// Ordered landmark list, rebuilt wholesale on every scan
///
/// Order equals tree pre-order at scan time. Indices are only meaningful
/// until the next rebuild.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LandmarkIndex {
    regions: Vec<LandmarkRegion>,
}

impl LandmarkIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn from_regions(regions: Vec<LandmarkRegion>) -> Self {
        Self { regions }
    }

    pub fn count(&self) -> usize {
        self.regions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.regions.is_empty()
    }

    pub fn describe_all(&self) -> Vec<LandmarkSummary> {
        self.regions.iter().map(LandmarkRegion::summary).collect()
    }

    /// First region with the main role
    pub fn main_region(&self) -> Option<&LandmarkRegion> {
        self.regions.iter().find(|r| r.role == LandmarkRole::Main)
    }

    pub fn region_at(&self, index: usize) -> Result<&LandmarkRegion> {
        self.regions.get(index).ok_or(DomError::IndexOutOfRange {
            index,
            len: self.regions.len(),
        })
    }

    pub fn iter(&self) -> impl Iterator<Item = &LandmarkRegion> {
        self.regions.iter()
    }

    /// Same order, roles and labels; element handles are not compared
    pub fn same_structure(&self, other: &LandmarkIndex) -> bool {
        self.describe_all() == other.describe_all()
    }
}
