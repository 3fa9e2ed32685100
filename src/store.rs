// 🗄️ Stats Store - what the aggregation core needs from storage
//
// The core describes an aggregate as data (AggregateQuery) and any store that
// can evaluate it plugs in: SQLite for the real dataset, MemoryStore for tests
// and small in-process datasets.

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// RECORD
// ============================================================================

/// One row of the immigration statistics dataset
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatsRecord {
    pub year: Option<i32>,

    /// Label such as "2023 Q1"
    pub quarter: String,

    /// Country name in the dataset's own spelling
    pub nationality: String,

    pub region: String,
    pub visa_type_group: String,
    pub visa_type: String,
    pub visa_type_subgroup: String,
    pub applicant_type: String,

    /// Case outcome, e.g. "Issued", "Refused", "Withdrawn"
    pub case_outcome: String,

    /// None = no decisions recorded
    pub decisions: Option<i64>,
}

// ============================================================================
// QUERY MODEL
// ============================================================================

/// Text fields an aggregate can filter or group on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Field {
    Nationality,
    Category,
    Status,
    Quarter,
}

impl Field {
    /// Column in the `immigration` table
    pub fn column(&self) -> &'static str {
        match self {
            Field::Nationality => "nationality",
            Field::Category => "visa_type_group",
            Field::Status => "case_outcome",
            Field::Quarter => "quarter",
        }
    }

    pub fn value<'a>(&self, record: &'a StatsRecord) -> &'a str {
        match self {
            Field::Nationality => &record.nationality,
            Field::Category => &record.visa_type_group,
            Field::Status => &record.case_outcome,
            Field::Quarter => &record.quarter,
        }
    }
}

/// A single row filter; a query keeps rows matching all of its predicates.
/// Text comparisons ignore ASCII case.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Predicate {
    EqualsIgnoreCase { field: Field, value: String },
    StartsWithIgnoreCase { field: Field, prefix: String },
    NotIn { field: Field, values: Vec<String> },
    /// Record year equals this year; rows without a year never match
    YearEquals(i32),
}

impl Predicate {
    pub fn matches(&self, record: &StatsRecord) -> bool {
        match self {
            Predicate::EqualsIgnoreCase { field, value } => {
                field.value(record).eq_ignore_ascii_case(value)
            }
            Predicate::StartsWithIgnoreCase { field, prefix } => {
                let text = field.value(record).as_bytes();
                let prefix = prefix.as_bytes();
                text.len() >= prefix.len() && text[..prefix.len()].eq_ignore_ascii_case(prefix)
            }
            Predicate::NotIn { field, values } => {
                let text = field.value(record);
                !values.iter().any(|v| v.eq_ignore_ascii_case(text))
            }
            Predicate::YearEquals(year) => record.year == Some(*year),
        }
    }
}

/// SUM(decisions) grouped by one field over the rows matching every predicate
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateQuery {
    pub group_by: Field,
    pub predicates: Vec<Predicate>,
}

impl AggregateQuery {
    pub fn group_by(field: Field) -> Self {
        AggregateQuery {
            group_by: field,
            predicates: Vec::new(),
        }
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    pub fn matches(&self, record: &StatsRecord) -> bool {
        self.predicates.iter().all(|p| p.matches(record))
    }
}

/// One aggregate group: its key and summed decisions (missing counts as 0)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub total: i64,
}

// ============================================================================
// STORE CONTRACT
// ============================================================================

/// Read-only stats storage able to evaluate an AggregateQuery
pub trait StatsStore: Send + Sync {
    /// Groups with at least one matching row, ordered by key
    fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<GroupTotal>>;
}

/// In-memory store over a fixed set of records
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Vec<StatsRecord>,
}

impl MemoryStore {
    pub fn new(records: Vec<StatsRecord>) -> Self {
        MemoryStore { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

impl StatsStore for MemoryStore {
    fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<GroupTotal>> {
        let mut groups: BTreeMap<&str, i64> = BTreeMap::new();

        for record in self.records.iter().filter(|r| query.matches(r)) {
            *groups.entry(query.group_by.value(record)).or_insert(0) +=
                record.decisions.unwrap_or(0);
        }

        Ok(groups
            .into_iter()
            .map(|(key, total)| GroupTotal {
                key: key.to_string(),
                total,
            })
            .collect())
    }
}
