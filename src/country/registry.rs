// 🔎 Country Registry - ISO 3166-1 lookups + fuzzy name search
//
// The registry knows every country by its ISO spelling. Fuzzy search ranks
// candidates the way the Python registry tooling does:
// - exact name (or code) hit:   50 points
// - name contains the query:    max(5, 30 - 2 * position) points
// - nothing above matched:      Jaro-Winkler similarity >= 0.9

use std::collections::HashMap;
use thiserror::Error;

use super::iso3166::{Country, COUNTRIES};

/// Minimum Jaro-Winkler similarity for a last-resort match
const JARO_WINKLER_THRESHOLD: f64 = 0.9;

const EXACT_MATCH_POINTS: i32 = 50;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("no country matches '{0}'")]
    NoMatch(String),
}

// ============================================================================
// REGISTRY CONTRACT
// ============================================================================

/// The standard country registry the resolver falls back to
pub trait CountryRegistry: Send + Sync {
    /// Exact lookup by alpha-2 code (uppercase)
    fn get_by_alpha2(&self, code: &str) -> Option<&Country>;

    /// Ranked candidates for a free-text name, best first
    fn search_fuzzy(&self, query: &str) -> Result<Vec<&Country>, RegistryError>;
}

// ============================================================================
// ISO REGISTRY
// ============================================================================

/// In-process registry over the static ISO 3166-1 table
pub struct IsoRegistry {
    countries: &'static [Country],
    by_alpha2: HashMap<&'static str, usize>,
}

impl IsoRegistry {
    pub fn new() -> Self {
        Self::with_countries(COUNTRIES)
    }

    pub fn with_countries(countries: &'static [Country]) -> Self {
        let by_alpha2 = countries
            .iter()
            .enumerate()
            .map(|(idx, country)| (country.alpha_2, idx))
            .collect();

        IsoRegistry {
            countries,
            by_alpha2,
        }
    }

    pub fn count(&self) -> usize {
        self.countries.len()
    }

    fn exact_match(&self, folded_query: &str) -> Option<&Country> {
        self.countries.iter().find(|country| {
            fold_name(country.alpha_2) == folded_query
                || country.names().any(|name| fold_name(name) == folded_query)
        })
    }

    fn partial_matches(&self, folded_query: &str) -> Vec<(&Country, i32)> {
        self.countries
            .iter()
            .filter_map(|country| {
                country.names().find_map(|name| {
                    let folded = fold_name(name);
                    folded.find(folded_query).map(|byte_pos| {
                        let position = folded[..byte_pos].chars().count() as i32;
                        (country, (30 - 2 * position).max(5))
                    })
                })
            })
            .collect()
    }

    fn similar_names(&self, folded_query: &str) -> Vec<&Country> {
        let mut scored: Vec<(&Country, f64)> = self
            .countries
            .iter()
            .filter_map(|country| {
                country
                    .names()
                    .map(|name| strsim::jaro_winkler(folded_query, &fold_name(name)))
                    .fold(None, |best: Option<f64>, score| {
                        Some(best.map_or(score, |b| b.max(score)))
                    })
                    .filter(|score| *score >= JARO_WINKLER_THRESHOLD)
                    .map(|score| (country, score))
            })
            .collect();

        scored.sort_by(|a, b| {
            b.1.total_cmp(&a.1)
                .then_with(|| a.0.alpha_2.cmp(b.0.alpha_2))
        });

        scored.into_iter().map(|(country, _)| country).collect()
    }
}

impl Default for IsoRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl CountryRegistry for IsoRegistry {
    fn get_by_alpha2(&self, code: &str) -> Option<&Country> {
        self.by_alpha2
            .get(code)
            .map(|&idx| &self.countries[idx])
    }

    fn search_fuzzy(&self, query: &str) -> Result<Vec<&Country>, RegistryError> {
        let folded_query = fold_name(query);
        if folded_query.is_empty() {
            return Err(RegistryError::NoMatch(query.to_string()));
        }

        // alpha-2 -> accumulated points
        let mut points: HashMap<&'static str, i32> = HashMap::new();

        if let Some(country) = self.exact_match(&folded_query) {
            *points.entry(country.alpha_2).or_insert(0) += EXACT_MATCH_POINTS;
        }

        for (country, score) in self.partial_matches(&folded_query) {
            *points.entry(country.alpha_2).or_insert(0) += score;
        }

        if points.is_empty() {
            let similar = self.similar_names(&folded_query);
            if similar.is_empty() {
                return Err(RegistryError::NoMatch(query.to_string()));
            }
            return Ok(similar);
        }

        let mut ranked: Vec<(&'static str, i32)> = points.into_iter().collect();
        ranked.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));

        Ok(ranked
            .into_iter()
            .filter_map(|(code, _)| self.get_by_alpha2(code))
            .collect())
    }
}

// ============================================================================
// NAME FOLDING
// ============================================================================

/// Lowercase, trim and strip the Latin diacritics that occur in country names
pub fn fold_name(name: &str) -> String {
    name.trim()
        .chars()
        .flat_map(char::to_lowercase)
        .map(strip_accent)
        .collect()
}

fn strip_accent(c: char) -> char {
    match c {
        'à' | 'á' | 'â' | 'ã' | 'ä' | 'å' => 'a',
        'ç' => 'c',
        'è' | 'é' | 'ê' | 'ë' => 'e',
        'ì' | 'í' | 'î' | 'ï' => 'i',
        'ñ' => 'n',
        'ò' | 'ó' | 'ô' | 'õ' | 'ö' | 'ø' => 'o',
        'ù' | 'ú' | 'û' | 'ü' => 'u',
        'ý' | 'ÿ' => 'y',
        other => other,
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_by_alpha2() {
        let registry = IsoRegistry::new();

        assert_eq!(registry.get_by_alpha2("DE").unwrap().name, "Germany");
        assert_eq!(registry.get_by_alpha2("FR").unwrap().name, "France");
        assert!(registry.get_by_alpha2("ZZ").is_none());
        assert!(registry.get_by_alpha2("XK").is_none()); // Kosovo is not in ISO 3166-1
    }

    #[test]
    fn test_alpha2_codes_are_unique() {
        let registry = IsoRegistry::new();

        assert_eq!(registry.by_alpha2.len(), registry.count());
        assert_eq!(registry.count(), 249);
    }

    #[test]
    fn test_exact_name_match_ranks_first() {
        let registry = IsoRegistry::new();

        let hits = registry.search_fuzzy("Germany").unwrap();
        assert_eq!(hits[0].alpha_2, "DE");

        // Case insensitive
        let hits = registry.search_fuzzy("  gErMaNy ").unwrap();
        assert_eq!(hits[0].alpha_2, "DE");
    }

    #[test]
    fn test_official_and_common_names_match() {
        let registry = IsoRegistry::new();

        assert_eq!(registry.search_fuzzy("Czech Republic").unwrap()[0].alpha_2, "CZ");
        assert_eq!(registry.search_fuzzy("Bolivia").unwrap()[0].alpha_2, "BO");
    }

    #[test]
    fn test_exact_match_beats_containing_names() {
        let registry = IsoRegistry::new();

        // "Niger" also appears inside "Nigeria"
        let hits = registry.search_fuzzy("Niger").unwrap();
        assert_eq!(hits[0].alpha_2, "NE");
        assert!(hits.iter().any(|c| c.alpha_2 == "NG"));

        // "Guinea" appears in four names
        let hits = registry.search_fuzzy("Guinea").unwrap();
        assert_eq!(hits[0].alpha_2, "GN");
    }

    #[test]
    fn test_accents_are_folded() {
        let registry = IsoRegistry::new();

        assert_eq!(registry.search_fuzzy("Cote d'Ivoire").unwrap()[0].alpha_2, "CI");
        assert_eq!(registry.search_fuzzy("Curacao").unwrap()[0].alpha_2, "CW");
        assert_eq!(registry.search_fuzzy("Turkiye").unwrap()[0].alpha_2, "TR");
    }

    #[test]
    fn test_partial_match_prefers_early_position() {
        let registry = IsoRegistry::new();

        // "Sudan" exact beats "South Sudan" partial
        let hits = registry.search_fuzzy("Sudan").unwrap();
        assert_eq!(hits[0].alpha_2, "SD");
        assert_eq!(hits[1].alpha_2, "SS");
    }

    #[test]
    fn test_misspelling_falls_back_to_similarity() {
        let registry = IsoRegistry::new();

        let hits = registry.search_fuzzy("Germnay").unwrap();
        assert_eq!(hits[0].alpha_2, "DE");
    }

    #[test]
    fn test_unknown_name_is_no_match() {
        let registry = IsoRegistry::new();

        assert_eq!(
            registry.search_fuzzy("Atlantis"),
            Err(RegistryError::NoMatch("Atlantis".to_string()))
        );
        assert!(registry.search_fuzzy("   ").is_err());
    }

    #[test]
    fn test_fold_name() {
        assert_eq!(fold_name("  Réunion "), "reunion");
        assert_eq!(fold_name("Åland Islands"), "aland islands");
        assert_eq!(fold_name("Côte d'Ivoire"), "cote d'ivoire");
    }
}
