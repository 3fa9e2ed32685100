// 📊 Aggregate Query Builder - breakdown + map rollup
//
// Two call patterns over the stats store:
// - single_country_breakdown: one country, decisions per visa category
// - global_rollup: every country, one total each, keyed by ISO code
//
// Query construction is split from execution so the filter policy can be
// checked without a store.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use thiserror::Error;
use tracing::debug;

use crate::country::{CountryRegistry, CountryResolver, IsoRegistry};
use crate::filter::{quarter_label, year_prefix, FilterSpec, QuarterSelector, ISSUED_STATUS};
use crate::store::{AggregateQuery, Field, GroupTotal, Predicate, StatsStore};

#[derive(Debug, Error)]
pub enum QueryError {
    /// A required filter was not supplied (year, quarter or status)
    #[error("missing required parameter: {0}")]
    MissingParameter(&'static str),

    #[error("country not found: {0}")]
    CountryNotFound(String),

    #[error("stats store query failed: {0:#}")]
    Store(anyhow::Error),
}

// ============================================================================
// RESULTS
// ============================================================================

/// Decisions for one visa category of one country
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: i64,
}

/// Decisions for one country, keyed for the map
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountryTotal {
    /// ISO alpha-2 code
    pub id: String,
    pub value: i64,
}

/// Everything a rollup produced: resolved countries and names with no code
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RollupOutcome {
    pub resolved: Vec<CountryTotal>,
    pub unresolved: Vec<GroupTotal>,
}

// ============================================================================
// BUILDER
// ============================================================================

pub struct AggregateQueryBuilder<S, R = IsoRegistry> {
    store: S,
    resolver: CountryResolver<R>,
}

impl<S: StatsStore> AggregateQueryBuilder<S, IsoRegistry> {
    pub fn new(store: S) -> Self {
        Self::with_resolver(store, CountryResolver::new())
    }
}

impl<S: StatsStore, R: CountryRegistry> AggregateQueryBuilder<S, R> {
    pub fn with_resolver(store: S, resolver: CountryResolver<R>) -> Self {
        AggregateQueryBuilder { store, resolver }
    }

    pub fn resolver(&self) -> &CountryResolver<R> {
        &self.resolver
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Per-category totals for one country and status in one period
    ///
    /// Year, quarter and status are required. Ordered by total descending,
    /// ties by category name.
    pub fn single_country_breakdown(
        &self,
        iso_code: &str,
        filter: &FilterSpec,
    ) -> Result<Vec<CategoryTotal>, QueryError> {
        // Validate before touching the resolver
        required_breakdown_params(filter)?;

        let country_name = self
            .resolver
            .resolve_code_to_name(iso_code)
            .map_err(|_| QueryError::CountryNotFound(iso_code.to_string()))?;

        let query = build_breakdown_query(&country_name, filter)?;
        let groups = self.store.aggregate(&query).map_err(QueryError::Store)?;

        let mut results: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|group| CategoryTotal {
                category: group.key,
                total: group.total,
            })
            .collect();

        results.sort_by(|a, b| {
            b.total
                .cmp(&a.total)
                .then_with(|| a.category.cmp(&b.category))
        });

        debug!(
            iso_code,
            country = %country_name,
            categories = results.len(),
            "breakdown computed"
        );

        Ok(results)
    }

    /// Per-country totals for the map; countries whose name has no ISO code are dropped
    pub fn global_rollup(&self, filter: &FilterSpec) -> Result<Vec<CountryTotal>, QueryError> {
        Ok(self.global_rollup_outcome(filter)?.resolved)
    }

    /// Like global_rollup, but also reports the names that failed to resolve
    pub fn global_rollup_outcome(&self, filter: &FilterSpec) -> Result<RollupOutcome, QueryError> {
        let Some(query) = build_rollup_query(filter) else {
            debug!(status = filter.status_or_issued(), "rollup only covers issued visas");
            return Ok(RollupOutcome::default());
        };

        let groups = self.store.aggregate(&query).map_err(QueryError::Store)?;
        let outcome = self.resolve_groups(groups);

        if !outcome.unresolved.is_empty() {
            debug!(
                unresolved = ?outcome.unresolved.iter().map(|g| g.key.as_str()).collect::<Vec<_>>(),
                "countries left off the map"
            );
        }

        Ok(outcome)
    }

    /// Single pass: resolved names become map entries, misses are collected.
    /// Spellings that resolve to the same code are summed into one entry.
    fn resolve_groups(&self, groups: Vec<GroupTotal>) -> RollupOutcome {
        let mut by_code: BTreeMap<String, i64> = BTreeMap::new();
        let mut unresolved = Vec::new();

        for group in groups {
            match self.resolver.resolve_name_to_code(&group.key) {
                Ok(id) => *by_code.entry(id).or_insert(0) += group.total.max(0),
                Err(_) => unresolved.push(group),
            }
        }

        RollupOutcome {
            resolved: by_code
                .into_iter()
                .map(|(id, value)| CountryTotal { id, value })
                .collect(),
            unresolved,
        }
    }
}

// ============================================================================
// QUERY CONSTRUCTION
// ============================================================================

fn required_breakdown_params(filter: &FilterSpec) -> Result<(i32, &QuarterSelector, &str), QueryError> {
    let year = filter.year.ok_or(QueryError::MissingParameter("year"))?;
    let quarter = filter
        .quarter
        .as_ref()
        .ok_or(QueryError::MissingParameter("quarter"))?;
    let status = filter
        .status
        .as_deref()
        .filter(|s| !s.is_empty())
        .ok_or(QueryError::MissingParameter("status"))?;

    Ok((year, quarter, status))
}

fn exclusion(filter: &FilterSpec) -> Option<Predicate> {
    filter.has_exclusions().then(|| Predicate::NotIn {
        field: Field::Category,
        values: filter.excluded_categories.clone(),
    })
}

/// Breakdown of one country's decisions by visa category
pub fn build_breakdown_query(
    country_name: &str,
    filter: &FilterSpec,
) -> Result<AggregateQuery, QueryError> {
    let (year, quarter, status) = required_breakdown_params(filter)?;

    let mut query = AggregateQuery::group_by(Field::Category)
        .filter(Predicate::EqualsIgnoreCase {
            field: Field::Nationality,
            value: country_name.to_string(),
        })
        .filter(Predicate::EqualsIgnoreCase {
            field: Field::Status,
            value: status.to_string(),
        });

    if let Some(excluded) = exclusion(filter) {
        query = query.filter(excluded);
    }

    let period = match quarter {
        QuarterSelector::WholeYear => Predicate::StartsWithIgnoreCase {
            field: Field::Quarter,
            prefix: year_prefix(year),
        },
        QuarterSelector::Named(name) => Predicate::EqualsIgnoreCase {
            field: Field::Quarter,
            value: quarter_label(year, name),
        },
    };

    Ok(query.filter(period))
}

/// Rollup of decisions per country; None when the status is not "Issued"
pub fn build_rollup_query(filter: &FilterSpec) -> Option<AggregateQuery> {
    let status = filter.status_or_issued();
    if !status.eq_ignore_ascii_case(ISSUED_STATUS) {
        return None;
    }

    let mut query = AggregateQuery::group_by(Field::Nationality);

    if let Some(excluded) = exclusion(filter) {
        query = query.filter(excluded);
    }

    query = query.filter(Predicate::EqualsIgnoreCase {
        field: Field::Status,
        value: status.to_string(),
    });

    if let Some(year) = filter.year {
        let period = match &filter.quarter {
            Some(QuarterSelector::Named(name)) => Predicate::EqualsIgnoreCase {
                field: Field::Quarter,
                value: quarter_label(year, name),
            },
            Some(QuarterSelector::WholeYear) | None => Predicate::YearEquals(year),
        };
        query = query.filter(period);
    }

    Some(query)
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryStore, StatsRecord};
    use anyhow::anyhow;

    fn record(
        nationality: &str,
        group: &str,
        quarter: &str,
        outcome: &str,
        decisions: Option<i64>,
    ) -> StatsRecord {
        StatsRecord {
            year: quarter.split(' ').next().and_then(|y| y.parse().ok()),
            quarter: quarter.to_string(),
            nationality: nationality.to_string(),
            visa_type_group: group.to_string(),
            case_outcome: outcome.to_string(),
            decisions,
            ..Default::default()
        }
    }

    fn sample_store() -> MemoryStore {
        MemoryStore::new(vec![
            record("India", "Work", "2023 Q1", "Issued", Some(100)),
            record("India", "Work", "2023 Q2", "Issued", Some(20)),
            record("India", "Study", "2023 Q1", "Issued", Some(40)),
            record("India", "Study", "2023 Q3", "Issued", Some(5)),
            record("India", "Visitor", "2023 Q4", "Issued", Some(7)),
            record("India", "Work", "2022 Q4", "Issued", Some(999)),
            record("India", "Work", "2023 Q1", "Refused", Some(3)),
            record("Russia", "Work", "2023 Q1", "Issued", Some(12)),
            record("Russia", "Study", "2023 Q2", "Issued", None),
            record("Gambia, The", "Family", "2023 Q1", "Issued", Some(2)),
            record("Atlantis", "Work", "2023 Q1", "Issued", Some(50)),
        ])
    }

    fn full_filter() -> FilterSpec {
        FilterSpec::new()
            .with_year(2023)
            .with_quarter("Total")
            .with_status("Issued")
    }

    fn sorted(mut totals: Vec<CountryTotal>) -> Vec<CountryTotal> {
        totals.sort_by(|a, b| a.id.cmp(&b.id));
        totals
    }

    /// Store that always fails
    struct FailingStore;

    impl StatsStore for FailingStore {
        fn aggregate(&self, _query: &AggregateQuery) -> anyhow::Result<Vec<GroupTotal>> {
            Err(anyhow!("database is locked"))
        }
    }

    // ------------------------------------------------------------------------
    // Breakdown
    // ------------------------------------------------------------------------

    #[test]
    fn test_breakdown_missing_quarter_is_rejected() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let filter = FilterSpec::new().with_year(2023).with_status("Issued");
        let err = builder.single_country_breakdown("IN", &filter).unwrap_err();
        assert!(matches!(err, QueryError::MissingParameter("quarter")));

        // Even an unknown country does not change the answer
        let err = builder.single_country_breakdown("ZZ", &filter).unwrap_err();
        assert!(matches!(err, QueryError::MissingParameter("quarter")));
    }

    #[test]
    fn test_breakdown_missing_year_and_status() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let no_year = FilterSpec::new().with_quarter("Q1").with_status("Issued");
        assert!(matches!(
            builder.single_country_breakdown("IN", &no_year),
            Err(QueryError::MissingParameter("year"))
        ));

        let no_status = FilterSpec::new().with_year(2023).with_quarter("Q1");
        assert!(matches!(
            builder.single_country_breakdown("IN", &no_status),
            Err(QueryError::MissingParameter("status"))
        ));

        let blank_status = FilterSpec::from_params(Some("2023"), Some("Q1"), Some(" "), None);
        assert!(matches!(
            builder.single_country_breakdown("IN", &blank_status),
            Err(QueryError::MissingParameter("status"))
        ));
    }

    #[test]
    fn test_breakdown_unknown_country() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let err = builder.single_country_breakdown("zz", &full_filter()).unwrap_err();
        match err {
            QueryError::CountryNotFound(code) => assert_eq!(code, "zz"),
            other => panic!("expected CountryNotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_breakdown_whole_year_sums_all_quarters() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let results = builder.single_country_breakdown("IN", &full_filter()).unwrap();

        // 2022 Q4 (999) and the refused row are excluded
        assert_eq!(
            results,
            vec![
                CategoryTotal { category: "Work".to_string(), total: 120 },
                CategoryTotal { category: "Study".to_string(), total: 45 },
                CategoryTotal { category: "Visitor".to_string(), total: 7 },
            ]
        );
    }

    #[test]
    fn test_breakdown_single_quarter_is_case_insensitive() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let filter = FilterSpec::new()
            .with_year(2023)
            .with_quarter("q1")
            .with_status("issued");
        let results = builder.single_country_breakdown("in", &filter).unwrap();

        assert_eq!(
            results,
            vec![
                CategoryTotal { category: "Work".to_string(), total: 100 },
                CategoryTotal { category: "Study".to_string(), total: 40 },
            ]
        );
    }

    #[test]
    fn test_breakdown_uses_override_names() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let results = builder.single_country_breakdown("RU", &full_filter()).unwrap();
        assert_eq!(
            results,
            vec![
                CategoryTotal { category: "Work".to_string(), total: 12 },
                CategoryTotal { category: "Study".to_string(), total: 0 },
            ]
        );

        let results = builder.single_country_breakdown("GM", &full_filter()).unwrap();
        assert_eq!(results.len(), 1);
    }

    #[test]
    fn test_breakdown_exclusions_remove_categories() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let with_work = builder.single_country_breakdown("IN", &full_filter()).unwrap();
        let without_work = builder
            .single_country_breakdown("IN", &full_filter().excluding("Work"))
            .unwrap();

        let sum = |rows: &[CategoryTotal]| rows.iter().map(|r| r.total).sum::<i64>();
        assert!(without_work.iter().all(|r| r.category != "Work"));
        assert_eq!(sum(&with_work) - sum(&without_work), 120);
    }

    #[test]
    fn test_breakdown_empty_is_success() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let filter = full_filter().with_year(1999);
        assert!(builder.single_country_breakdown("IN", &filter).unwrap().is_empty());

        // Known country with no rows at all
        assert!(builder.single_country_breakdown("FR", &full_filter()).unwrap().is_empty());
    }

    #[test]
    fn test_breakdown_ties_are_ordered_by_category() {
        let store = MemoryStore::new(vec![
            record("Chile", "Work", "2023 Q1", "Issued", Some(30)),
            record("Chile", "Visitor", "2023 Q1", "Issued", Some(50)),
            record("Chile", "Family", "2023 Q1", "Issued", Some(50)),
        ]);
        let builder = AggregateQueryBuilder::new(store);

        for _ in 0..3 {
            let results = builder.single_country_breakdown("CL", &full_filter()).unwrap();
            let order: Vec<&str> = results.iter().map(|r| r.category.as_str()).collect();
            assert_eq!(order, vec!["Family", "Visitor", "Work"]);
        }
    }

    #[test]
    fn test_breakdown_store_failure() {
        let builder = AggregateQueryBuilder::new(FailingStore);

        let err = builder.single_country_breakdown("IN", &full_filter()).unwrap_err();
        assert!(matches!(err, QueryError::Store(_)));
    }

    // ------------------------------------------------------------------------
    // Rollup
    // ------------------------------------------------------------------------

    #[test]
    fn test_rollup_non_issued_status_is_empty() {
        let builder = AggregateQueryBuilder::new(sample_store());

        for status in ["Refused", "Withdrawn", "anything"] {
            let filter = full_filter().with_status(status);
            assert!(builder.global_rollup(&filter).unwrap().is_empty());
        }

        // An explicit blank status is not "Issued"; only an absent one defaults
        let blank = FilterSpec::from_params(None, None, Some(""), None);
        assert!(builder.global_rollup(&blank).unwrap().is_empty());
        let absent = FilterSpec::from_params(None, None, None, None);
        assert!(!builder.global_rollup(&absent).unwrap().is_empty());

        // The status gate runs before the store is touched
        let failing = AggregateQueryBuilder::new(FailingStore);
        let filter = FilterSpec::new().with_status("Refused");
        assert!(failing.global_rollup(&filter).unwrap().is_empty());
    }

    #[test]
    fn test_rollup_no_filters_coerces_missing_counts() {
        let store = MemoryStore::new(vec![
            record("Chile", "Work", "2023 Q1", "Issued", Some(10)),
            record("Chile", "Study", "2023 Q2", "Issued", None),
            record("Peru", "Study", "2023 Q2", "Issued", None),
        ]);
        let builder = AggregateQueryBuilder::new(store);

        let totals = sorted(builder.global_rollup(&FilterSpec::new()).unwrap());
        assert_eq!(
            totals,
            vec![
                CountryTotal { id: "CL".to_string(), value: 10 },
                CountryTotal { id: "PE".to_string(), value: 0 },
            ]
        );
    }

    #[test]
    fn test_rollup_drops_unresolvable_countries() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let outcome = builder.global_rollup_outcome(&FilterSpec::new()).unwrap();
        let ids: Vec<String> = sorted(outcome.resolved).into_iter().map(|t| t.id).collect();

        assert_eq!(ids, vec!["GM", "IN", "RU"]);
        assert_eq!(
            outcome.unresolved,
            vec![GroupTotal { key: "Atlantis".to_string(), total: 50 }]
        );
    }

    #[test]
    fn test_rollup_year_and_quarter_filters() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let whole_year = sorted(builder.global_rollup(&FilterSpec::new().with_year(2023)).unwrap());
        assert_eq!(
            whole_year,
            vec![
                CountryTotal { id: "GM".to_string(), value: 2 },
                CountryTotal { id: "IN".to_string(), value: 172 },
                CountryTotal { id: "RU".to_string(), value: 12 },
            ]
        );

        // "Total" behaves like no quarter
        let total = sorted(builder.global_rollup(&full_filter()).unwrap());
        assert_eq!(total, whole_year);

        let q2 = sorted(
            builder
                .global_rollup(&FilterSpec::new().with_year(2023).with_quarter("Q2"))
                .unwrap(),
        );
        assert_eq!(
            q2,
            vec![
                CountryTotal { id: "IN".to_string(), value: 20 },
                CountryTotal { id: "RU".to_string(), value: 0 },
            ]
        );

        // A quarter without a year is ignored
        let quarter_only = builder
            .global_rollup(&FilterSpec::new().with_quarter("Q2"))
            .unwrap();
        assert_eq!(quarter_only.len(), 3);
    }

    #[test]
    fn test_rollup_exclusions_reduce_totals() {
        let builder = AggregateQueryBuilder::new(sample_store());
        let filter = FilterSpec::new().with_year(2023);

        let india = |totals: Vec<CountryTotal>| {
            totals.into_iter().find(|t| t.id == "IN").map(|t| t.value)
        };

        let all = india(builder.global_rollup(&filter).unwrap());
        let no_work = india(builder.global_rollup(&filter.clone().excluding("work")).unwrap());

        assert_eq!(all, Some(172));
        assert_eq!(no_work, Some(52));
    }

    #[test]
    fn test_rollup_codes_are_unique() {
        let builder = AggregateQueryBuilder::new(sample_store());

        let totals = builder.global_rollup(&FilterSpec::new()).unwrap();
        let mut ids: Vec<&str> = totals.iter().map(|t| t.id.as_str()).collect();
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }

    #[test]
    fn test_rollup_merges_spellings_of_one_country() {
        let store = MemoryStore::new(vec![
            record("Russia", "Work", "2023 Q1", "Issued", Some(12)),
            record("Russian Federation", "Work", "2023 Q1", "Issued", Some(8)),
        ]);
        let builder = AggregateQueryBuilder::new(store);

        assert_eq!(
            builder.global_rollup(&FilterSpec::new()).unwrap(),
            vec![CountryTotal { id: "RU".to_string(), value: 20 }]
        );
    }

    // ------------------------------------------------------------------------
    // Query construction
    // ------------------------------------------------------------------------

    #[test]
    fn test_build_breakdown_query_predicates() {
        let filter = FilterSpec::new()
            .with_year(2024)
            .with_quarter("Q3")
            .with_status("Refused")
            .excluding("Work");

        let query = build_breakdown_query("Chile", &filter).unwrap();

        assert_eq!(query.group_by, Field::Category);
        assert_eq!(
            query.predicates,
            vec![
                Predicate::EqualsIgnoreCase {
                    field: Field::Nationality,
                    value: "Chile".to_string()
                },
                Predicate::EqualsIgnoreCase {
                    field: Field::Status,
                    value: "Refused".to_string()
                },
                Predicate::NotIn {
                    field: Field::Category,
                    values: vec!["Work".to_string()]
                },
                Predicate::EqualsIgnoreCase {
                    field: Field::Quarter,
                    value: "2024 Q3".to_string()
                },
            ]
        );
    }

    #[test]
    fn test_build_breakdown_query_whole_year_uses_prefix() {
        let query = build_breakdown_query("Chile", &full_filter()).unwrap();

        assert_eq!(
            query.predicates.last(),
            Some(&Predicate::StartsWithIgnoreCase {
                field: Field::Quarter,
                prefix: "2023 ".to_string()
            })
        );
    }

    #[test]
    fn test_build_rollup_query() {
        assert!(build_rollup_query(&FilterSpec::new().with_status("Refused")).is_none());

        // Case of the status does not matter
        assert!(build_rollup_query(&FilterSpec::new().with_status("issued")).is_some());

        let bare = build_rollup_query(&FilterSpec::new()).unwrap();
        assert_eq!(bare.group_by, Field::Nationality);
        assert_eq!(
            bare.predicates,
            vec![Predicate::EqualsIgnoreCase {
                field: Field::Status,
                value: "Issued".to_string()
            }]
        );

        let by_year = build_rollup_query(&FilterSpec::new().with_year(2022)).unwrap();
        assert_eq!(by_year.predicates.last(), Some(&Predicate::YearEquals(2022)));
    }
}
