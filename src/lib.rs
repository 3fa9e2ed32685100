// Visa Atlas - Core Library
// Country resolution + decision aggregates over UK immigration statistics,
// shared by the CLI, the API server, and tests

pub mod config;
pub mod country;
pub mod db;
pub mod filter;
pub mod logging;
pub mod query;
pub mod store;

// Re-export commonly used types
pub use config::Config;
pub use country::{
    Country, CountryError, CountryRegistry, CountryResolver, IsoRegistry, RegistryError,
    COUNTRY_OVERRIDES,
};
pub use db::{
    CsvImport, SqliteStore,
    load_csv, setup_database, reset_database, insert_records, verify_count,
};
pub use filter::{FilterSpec, QuarterSelector, ISSUED_STATUS, WHOLE_YEAR_SENTINEL};
pub use query::{
    AggregateQueryBuilder, CategoryTotal, CountryTotal, QueryError, RollupOutcome,
    build_breakdown_query, build_rollup_query,
};
pub use store::{AggregateQuery, Field, GroupTotal, MemoryStore, Predicate, StatsRecord, StatsStore};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
