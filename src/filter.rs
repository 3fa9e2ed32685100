// 🎛️ Filter Spec - per-request query parameters
//
// Absent, present, and "Total" (all quarters) are distinct states here so the
// query builder never has to compare raw strings to tell them apart.

use serde::{Deserialize, Serialize};

/// Quarter value meaning "every quarter of the year"
pub const WHOLE_YEAR_SENTINEL: &str = "Total";

/// The only case outcome the map rollup reports
pub const ISSUED_STATUS: &str = "Issued";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum QuarterSelector {
    /// All quarters of the selected year ("Total")
    WholeYear,

    /// One quarter, e.g. "Q1"; combined with the year into "2023 Q1"
    Named(String),
}

impl QuarterSelector {
    pub fn parse(raw: &str) -> Option<Self> {
        let raw = raw.trim();
        if raw.is_empty() {
            None
        } else if raw.eq_ignore_ascii_case(WHOLE_YEAR_SENTINEL) {
            Some(QuarterSelector::WholeYear)
        } else {
            Some(QuarterSelector::Named(raw.to_string()))
        }
    }
}

/// Stored quarter label for a year and quarter name: "<year> <quarter>"
pub fn quarter_label(year: i32, quarter: &str) -> String {
    format!("{} {}", year, quarter)
}

/// Label prefix shared by every quarter of a year: "<year> "
pub fn year_prefix(year: i32) -> String {
    format!("{} ", year)
}

// ============================================================================
// FILTER SPEC
// ============================================================================

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSpec {
    pub year: Option<i32>,
    pub quarter: Option<QuarterSelector>,
    pub status: Option<String>,
    #[serde(default)]
    pub excluded_categories: Vec<String>,
}

impl FilterSpec {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from raw query-string values
    ///
    /// A year that is not a positive integer counts as absent, as does an
    /// empty quarter. An empty status is kept as given: the breakdown treats
    /// it as missing and the rollup as a status other than "Issued".
    /// `exclude_groups` is comma separated ("Work,Study").
    pub fn from_params(
        year: Option<&str>,
        quarter: Option<&str>,
        status: Option<&str>,
        exclude_groups: Option<&str>,
    ) -> Self {
        let year = year
            .and_then(|y| y.trim().parse::<i32>().ok())
            .filter(|y| *y > 0);

        let status = status.map(|s| s.trim().to_string());

        FilterSpec {
            year,
            quarter: quarter.and_then(QuarterSelector::parse),
            status,
            excluded_categories: exclude_groups.map(split_groups).unwrap_or_default(),
        }
    }

    pub fn with_year(mut self, year: i32) -> Self {
        self.year = Some(year);
        self
    }

    pub fn with_quarter(mut self, quarter: &str) -> Self {
        self.quarter = QuarterSelector::parse(quarter);
        self
    }

    pub fn with_status(mut self, status: &str) -> Self {
        self.status = Some(status.to_string());
        self
    }

    pub fn excluding(mut self, category: &str) -> Self {
        self.excluded_categories.push(category.to_string());
        self
    }

    /// Status for the map rollup: the requested one, or "Issued"
    pub fn status_or_issued(&self) -> &str {
        self.status.as_deref().unwrap_or(ISSUED_STATUS)
    }

    pub fn has_exclusions(&self) -> bool {
        !self.excluded_categories.is_empty()
    }
}

fn split_groups(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|group| !group.is_empty())
        .map(str::to_string)
        .collect()
}
