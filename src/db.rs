use anyhow::{anyhow, Context, Result};
use csv::StringRecord;
use rusqlite::{params, params_from_iter, Connection};
use serde::Deserialize;
use std::path::Path;
use std::sync::Mutex;
use tracing::{info, warn};

use crate::store::{AggregateQuery, GroupTotal, Predicate, StatsRecord, StatsStore};

/// One CSV row after header cleanup ("Visa type group" -> "Visa_type_group")
/// Numeric columns stay text until we decide what to do with bad values.
#[derive(Debug, Deserialize, Default)]
#[serde(default)]
struct CsvRow {
    #[serde(rename = "Year")]
    year: String,

    #[serde(rename = "Quarter")]
    quarter: String,

    #[serde(rename = "Nationality")]
    nationality: String,

    #[serde(rename = "Region")]
    region: String,

    #[serde(rename = "Visa_type_group")]
    visa_type_group: String,

    #[serde(rename = "Visa_type")]
    visa_type: String,

    #[serde(rename = "Visa_type_subgroup")]
    visa_type_subgroup: String,

    #[serde(rename = "Applicant_type")]
    applicant_type: String,

    #[serde(rename = "Case_outcome")]
    case_outcome: String,

    #[serde(rename = "Decisions")]
    decisions: String,
}

impl CsvRow {
    /// Convert numeric columns; None when Year or Decisions is not a number
    fn into_record(self) -> Option<StatsRecord> {
        let year = parse_optional(&self.year, |s| s.parse::<i32>().ok())?;
        let decisions = parse_optional(&self.decisions, |s| s.replace(',', "").parse::<i64>().ok())?;

        Some(StatsRecord {
            year,
            quarter: self.quarter,
            nationality: self.nationality,
            region: self.region,
            visa_type_group: self.visa_type_group,
            visa_type: self.visa_type,
            visa_type_subgroup: self.visa_type_subgroup,
            applicant_type: self.applicant_type,
            case_outcome: self.case_outcome,
            decisions,
        })
    }
}

/// Empty -> Ok(None), parsable -> Ok(Some), garbage -> None (skip the row)
fn parse_optional<T>(raw: &str, parse: impl Fn(&str) -> Option<T>) -> Option<Option<T>> {
    let raw = raw.trim();
    if raw.is_empty() {
        Some(None)
    } else {
        parse(raw).map(Some)
    }
}

/// Result of reading a CSV export
#[derive(Debug, Clone, Default)]
pub struct CsvImport {
    pub records: Vec<StatsRecord>,

    /// Rows dropped because Year or Decisions was not a number
    pub skipped: usize,
}

pub fn setup_database(conn: &Connection) -> Result<()> {
    // Enable WAL mode so readers don't block the importer
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS immigration (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            year INTEGER,
            quarter TEXT,
            nationality TEXT,
            region TEXT,
            visa_type_group TEXT,
            visa_type TEXT,
            visa_type_subgroup TEXT,
            applicant_type TEXT,
            case_outcome TEXT,
            decisions INTEGER
        )",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_nationality ON immigration(nationality)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_quarter ON immigration(quarter)",
        [],
    )?;

    conn.execute(
        "CREATE INDEX IF NOT EXISTS idx_year ON immigration(year)",
        [],
    )?;

    Ok(())
}

/// Drop everything and start from an empty table
pub fn reset_database(conn: &Connection) -> Result<()> {
    info!("resetting database: dropping immigration table");
    conn.execute("DROP TABLE IF EXISTS immigration", [])?;
    setup_database(conn)
}

pub fn load_csv(csv_path: &Path) -> Result<CsvImport> {
    // Exports end with ragged footer lines ("Source: ..."); read them as short rows
    let mut rdr = csv::ReaderBuilder::new()
        .flexible(true)
        .from_path(csv_path)
        .with_context(|| format!("Failed to open CSV file {}", csv_path.display()))?;

    let cleaned: StringRecord = rdr
        .headers()
        .context("Failed to read CSV headers")?
        .iter()
        .map(|h| h.trim().replace(' ', "_"))
        .collect();
    rdr.set_headers(cleaned);

    let mut import = CsvImport::default();

    for (idx, result) in rdr.deserialize::<CsvRow>().enumerate() {
        // Line numbers are 1-based and the header is line 1
        let line = idx + 2;

        match result.map(CsvRow::into_record) {
            Ok(Some(record)) => import.records.push(record),
            Ok(None) => {
                warn!(line, "skipping row due to data conversion error");
                import.skipped += 1;
            }
            Err(e) => {
                warn!(line, error = %e, "skipping unreadable row");
                import.skipped += 1;
            }
        }
    }

    info!(
        loaded = import.records.len(),
        skipped = import.skipped,
        path = %csv_path.display(),
        "CSV loaded"
    );

    Ok(import)
}

/// Insert all records in one transaction
pub fn insert_records(conn: &Connection, records: &[StatsRecord]) -> Result<usize> {
    let tx = conn.unchecked_transaction()?;

    {
        let mut stmt = tx.prepare(
            "INSERT INTO immigration (
                year, quarter, nationality, region, visa_type_group,
                visa_type, visa_type_subgroup, applicant_type, case_outcome, decisions
            ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10)",
        )?;

        for record in records {
            stmt.execute(params![
                record.year,
                record.quarter,
                record.nationality,
                record.region,
                record.visa_type_group,
                record.visa_type,
                record.visa_type_subgroup,
                record.applicant_type,
                record.case_outcome,
                record.decisions,
            ])?;
        }
    }

    tx.commit()?;

    info!(inserted = records.len(), "records inserted");
    Ok(records.len())
}

pub fn verify_count(conn: &Connection) -> Result<i64> {
    let count: i64 = conn.query_row("SELECT COUNT(*) FROM immigration", [], |row| row.get(0))?;

    Ok(count)
}

// ============================================================================
// SQLITE STATS STORE
// ============================================================================

/// StatsStore over the `immigration` table
pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(db_path: &Path) -> Result<Self> {
        let conn = Connection::open(db_path)
            .with_context(|| format!("Failed to open database {}", db_path.display()))?;
        setup_database(&conn)?;
        Ok(Self::from_connection(conn))
    }

    pub fn from_connection(conn: Connection) -> Self {
        SqliteStore {
            conn: Mutex::new(conn),
        }
    }

    /// Run a closure against the shared connection
    pub fn with_connection<T>(&self, f: impl FnOnce(&Connection) -> Result<T>) -> Result<T> {
        let conn = self
            .conn
            .lock()
            .map_err(|_| anyhow!("sqlite connection lock poisoned"))?;
        f(&conn)
    }
}

/// WHERE clause and its positional parameters
fn where_clause(predicates: &[Predicate]) -> (String, Vec<String>) {
    let mut clauses = Vec::new();
    let mut values: Vec<String> = Vec::new();

    for predicate in predicates {
        match predicate {
            Predicate::EqualsIgnoreCase { field, value } => {
                values.push(value.clone());
                clauses.push(format!("{} = ?{} COLLATE NOCASE", field.column(), values.len()));
            }
            Predicate::StartsWithIgnoreCase { field, prefix } => {
                // LIKE ignores ASCII case in SQLite
                values.push(format!("{}%", escape_like(prefix)));
                clauses.push(format!("{} LIKE ?{} ESCAPE '\\'", field.column(), values.len()));
            }
            Predicate::NotIn { field, values: excluded } => {
                if excluded.is_empty() {
                    continue;
                }
                let placeholders: Vec<String> = excluded
                    .iter()
                    .map(|v| {
                        values.push(v.clone());
                        format!("?{}", values.len())
                    })
                    .collect();
                clauses.push(format!(
                    "{} COLLATE NOCASE NOT IN ({})",
                    field.column(),
                    placeholders.join(", ")
                ));
            }
            Predicate::YearEquals(year) => {
                values.push(year.to_string());
                clauses.push(format!("CAST(year AS TEXT) = ?{}", values.len()));
            }
        }
    }

    if clauses.is_empty() {
        (String::new(), values)
    } else {
        (format!("WHERE {}", clauses.join(" AND ")), values)
    }
}

fn escape_like(raw: &str) -> String {
    raw.replace('\\', "\\\\")
        .replace('%', "\\%")
        .replace('_', "\\_")
}

/// SQL for an aggregate query, with its parameters
pub fn aggregate_sql(query: &AggregateQuery) -> (String, Vec<String>) {
    let group = query.group_by.column();
    let (where_sql, values) = where_clause(&query.predicates);

    let sql = format!(
        "SELECT COALESCE({group}, '') AS group_key,
                COALESCE(SUM(decisions), 0) AS total
         FROM immigration
         {where_sql}
         GROUP BY group_key
         ORDER BY group_key"
    );

    (sql, values)
}

impl StatsStore for SqliteStore {
    fn aggregate(&self, query: &AggregateQuery) -> Result<Vec<GroupTotal>> {
        let (sql, values) = aggregate_sql(query);

        self.with_connection(|conn| {
            let mut stmt = conn.prepare(&sql)?;

            let totals = stmt
                .query_map(params_from_iter(values.iter()), |row| {
                    Ok(GroupTotal {
                        key: row.get(0)?,
                        total: row.get(1)?,
                    })
                })?
                .collect::<Result<Vec<_>, _>>()?;

            Ok(totals)
        })
    }
}
