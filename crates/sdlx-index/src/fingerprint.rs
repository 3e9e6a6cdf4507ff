//! Source fingerprints for index staleness detection.
//!
//! Each index stores a fingerprint of the inputs that shaped it. When the
//! schema text or the stemmer changes, the fingerprint changes and the index
//! is reported stale.

use std::hash::{Hash, Hasher};

use siphasher::sip::SipHasher24;

/// Current index layout version. Bump this when index field definitions change.
pub const INDEX_VERSION: u32 = 1;

/// Inputs that affect index contents.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub struct SourceFingerprint<'a> {
    /// Index layout version.
    pub index_version: u32,
    /// Stemmer language for text analysis.
    pub stemmer: &'a str,
    /// Schema source text.
    pub source: &'a str,
}

impl<'a> SourceFingerprint<'a> {
    /// Creates a fingerprint for the current index version.
    pub fn new(source: &'a str, stemmer: &'a str) -> Self {
        Self {
            index_version: INDEX_VERSION,
            stemmer,
            source,
        }
    }

    /// Computes a hash of the fingerprint.
    pub fn compute_hash(&self) -> u64 {
        let mut hasher = SipHasher24::new();
        self.hash(&mut hasher);
        hasher.finish()
    }

    /// Computes a hash and returns it as a hex string.
    pub fn hash_string(&self) -> String {
        format!("{:016x}", self.compute_hash())
    }
}

/// Computes the fingerprint hash for schema source text.
pub fn source_hash(source: &str, stemmer: &str) -> String {
    SourceFingerprint::new(source, stemmer).hash_string()
}
