//! Configuration validation.
//!
//! Validates a loaded configuration and reports warnings for potential issues.

use std::fmt;

use crate::Config;

/// Stemmer languages the search index supports.
pub const SUPPORTED_STEMMERS: &[&str] = &[
    "arabic",
    "danish",
    "dutch",
    "english",
    "finnish",
    "french",
    "german",
    "greek",
    "hungarian",
    "italian",
    "norwegian",
    "portuguese",
    "romanian",
    "russian",
    "spanish",
    "swedish",
    "tamil",
    "turkish",
];

/// Largest fuzzy distance the search index accepts.
pub const MAX_FUZZY_DISTANCE: u8 = 2;

/// A non-fatal warning about the configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigWarning {
    /// `visible_panels` is zero, so nothing can be browsed.
    NoVisiblePanels,
    /// `default_limit` is zero, so searches return nothing.
    ZeroSearchLimit,
    /// The stemmer language is not supported.
    UnknownStemmer {
        /// The configured language.
        stemmer: String,
    },
    /// The fuzzy distance is above the supported maximum.
    FuzzyDistanceTooLarge {
        /// The configured distance.
        distance: u8,
    },
}

impl fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoVisiblePanels => write!(f, "visible_panels is 0; no panels will be shown"),
            Self::ZeroSearchLimit => write!(f, "default_limit is 0; searches return no results"),
            Self::UnknownStemmer { stemmer } => {
                write!(f, "unsupported stemmer language: {stemmer}")
            }
            Self::FuzzyDistanceTooLarge { distance } => write!(
                f,
                "fuzzy_distance {distance} exceeds the maximum of {MAX_FUZZY_DISTANCE}"
            ),
        }
    }
}

/// Validates the configuration and returns any warnings.
pub fn validate_config(config: &Config) -> Vec<ConfigWarning> {
    let mut warnings = Vec::new();

    if config.settings.visible_panels == 0 {
        warnings.push(ConfigWarning::NoVisiblePanels);
    }
    if config.settings.default_limit == 0 {
        warnings.push(ConfigWarning::ZeroSearchLimit);
    }

    let stemmer = config.search.stemmer.to_lowercase();
    if !SUPPORTED_STEMMERS.contains(&stemmer.as_str()) {
        warnings.push(ConfigWarning::UnknownStemmer {
            stemmer: config.search.stemmer.clone(),
        });
    }
    if config.search.fuzzy_distance > MAX_FUZZY_DISTANCE {
        warnings.push(ConfigWarning::FuzzyDistanceTooLarge {
            distance: config.search.fuzzy_distance,
        });
    }

    warnings
}
