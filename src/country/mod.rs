// 🗺️ Country Resolver - ISO alpha-2 code <-> dataset country name
//
// The immigration dataset spells some countries differently from the ISO
// registry ("Russia" vs "Russian Federation", "Gambia, The" vs "Gambia").
// Those known cases live in COUNTRY_OVERRIDES and are checked before the
// registry; the registry's fuzzy search only handles the long tail.

pub mod iso3166;
pub mod registry;

use std::collections::HashMap;
use std::sync::LazyLock;
use thiserror::Error;
use tracing::debug;

pub use iso3166::{Country, COUNTRIES};
pub use registry::{fold_name, CountryRegistry, IsoRegistry, RegistryError};

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CountryError {
    #[error("no country for code '{0}'")]
    UnknownCode(String),

    #[error("no country code for name '{0}'")]
    UnknownName(String),
}

// ============================================================================
// OVERRIDE TABLE
// ============================================================================

/// Code -> dataset spelling, for every country the dataset names differently
/// from the registry. The only hand-maintained mapping; both lookup
/// directions are derived from it.
pub const COUNTRY_OVERRIDES: &[(&str, &str)] = &[
    ("RU", "Russia"),
    ("GB", "United Kingdom"),
    ("US", "United States"),
    ("TZ", "Tanzania"),
    ("LA", "Laos"),
    ("IR", "Iran"),
    ("KR", "South Korea"),
    ("KP", "North Korea"),
    ("VN", "Vietnam"),
    ("SY", "Syria"),
    ("MD", "Moldova"),
    ("BO", "Bolivia"),
    ("VE", "Venezuela"),
    ("BN", "Brunei"),
    ("TW", "Taiwan"),
    ("FM", "Micronesia"),
    ("CV", "Cape Verde"),
    ("CG", "Congo"),
    ("MK", "North Macedonia"),
    ("SZ", "Swaziland"),
    ("TL", "Timor-Leste"),
    ("WS", "Samoa"),
    ("SM", "San Marino"),
    ("ST", "Sao Tome and Principe"),
    ("SC", "Seychelles"),
    ("SB", "Solomon Islands"),
    ("SR", "Suriname"),
    ("TJ", "Tajikistan"),
    ("VA", "Vatican City"),
    ("TR", "Turkey"),
    ("PS", "Occupied Palestinian Territories"),
    ("CI", "Ivory Coast"),
    ("MM", "Myanmar (Burma)"),
    ("CD", "Congo (Democratic Republic)"),
    ("GM", "Gambia, The"),
    ("KN", "St Kitts and Nevis"),
    ("LC", "St Lucia"),
    ("BS", "Bahamas, The"),
    ("VC", "St Vincent and the Grenadines"),
    ("XK", "Kosovo"),
    ("NE", "Niger"),
];

static CODE_TO_NAME: LazyLock<HashMap<&'static str, &'static str>> =
    LazyLock::new(|| COUNTRY_OVERRIDES.iter().copied().collect());

static NAME_TO_CODE: LazyLock<HashMap<&'static str, &'static str>> = LazyLock::new(|| {
    COUNTRY_OVERRIDES
        .iter()
        .map(|&(code, name)| (name, code))
        .collect()
});

/// Dataset spelling for an override code (code must already be uppercase)
pub fn override_name(code: &str) -> Option<&'static str> {
    CODE_TO_NAME.get(code).copied()
}

/// Override code for an exact dataset spelling
pub fn override_code(name: &str) -> Option<&'static str> {
    NAME_TO_CODE.get(name).copied()
}

// ============================================================================
// RESOLVER
// ============================================================================

/// Bidirectional code/name resolution: override table first, registry second
pub struct CountryResolver<R = IsoRegistry> {
    registry: R,
}

impl CountryResolver<IsoRegistry> {
    pub fn new() -> Self {
        Self::with_registry(IsoRegistry::new())
    }
}

impl Default for CountryResolver<IsoRegistry> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: CountryRegistry> CountryResolver<R> {
    pub fn with_registry(registry: R) -> Self {
        CountryResolver { registry }
    }

    /// Country name as stored in the dataset for an alpha-2 code
    ///
    /// Example: "ru" → "Russia", "DE" → "Germany"
    pub fn resolve_code_to_name(&self, code: &str) -> Result<String, CountryError> {
        let code = code.trim().to_uppercase();

        if let Some(name) = override_name(&code) {
            return Ok(name.to_string());
        }

        self.registry
            .get_by_alpha2(&code)
            .map(|country| country.name.to_string())
            .ok_or(CountryError::UnknownCode(code))
    }

    /// Alpha-2 code for a dataset country name
    ///
    /// Override spellings match exactly; everything else goes through the
    /// registry's fuzzy search and takes the best candidate.
    pub fn resolve_name_to_code(&self, name: &str) -> Result<String, CountryError> {
        if let Some(code) = override_code(name) {
            return Ok(code.to_string());
        }

        match self.registry.search_fuzzy(name) {
            Ok(candidates) => candidates
                .first()
                .map(|country| country.alpha_2.to_string())
                .ok_or_else(|| CountryError::UnknownName(name.to_string())),
            Err(err) => {
                debug!(name, error = %err, "country name lookup failed");
                Err(CountryError::UnknownName(name.to_string()))
            }
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================
