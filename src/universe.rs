use std::collections::HashSet;

/// Region codes accepted by the clustering stage, in the order used for
/// centroid sampling.
///
/// US states and territories first, then Canadian provinces and
/// territories, then the two odd European codes that appear in the
/// dataset. The order is part of the reproducibility contract: sampling
/// with a fixed seed walks this slice, so reordering it changes which
/// regions a seed selects.
pub const ALL_REGIONS: [&str; 68] = [
    "ab", "ak", "ar", "az", "ca", "co", "ct", "de", "dc", "fl", "ga", "hi",
    "id", "il", "in", "ia", "ks", "ky", "la", "me", "md", "ma", "mi", "mn",
    "ms", "mo", "mt", "ne", "nv", "nh", "nj", "nm", "ny", "nc", "nd", "oh",
    "ok", "or", "pa", "pr", "ri", "sc", "sd", "tn", "tx", "ut", "vt", "va",
    "vi", "wa", "wv", "wi", "wy", "al", "bc", "mb", "nb", "lb", "nf", "nt",
    "ns", "nu", "on", "qc", "sk", "yt", "dengl", "fraspm",
];

/// The fixed, ordered set of region codes a clustering run operates on.
///
/// Regions outside the universe survive vectorization (the raw
/// [`PresenceTable`](crate::vectorize::PresenceTable) keeps every code
/// that appears in the input) but are dropped when the table is
/// materialized into dense vectors, and they can never be sampled as
/// centroid seeds.
#[derive(Debug, Clone)]
pub struct RegionUniverse {
    codes: Vec<String>,
    members: HashSet<String>,
}

impl RegionUniverse {
    /// Builds a universe from the given codes, preserving their order.
    ///
    /// Codes are expected to be distinct; a duplicate would make
    /// "sampling without replacement" able to return the same code
    /// twice.
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let codes: Vec<String> = codes.into_iter().map(Into::into).collect();
        let members = codes.iter().cloned().collect();
        RegionUniverse { codes, members }
    }

    /// Whether `code` is part of the universe.
    pub fn contains(&self, code: &str) -> bool {
        self.members.contains(code)
    }

    /// The universe codes in sampling order.
    pub fn codes(&self) -> &[String] {
        &self.codes
    }

    /// Number of codes in the universe.
    pub fn len(&self) -> usize {
        self.codes.len()
    }

    /// Whether the universe holds no codes at all.
    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }
}

impl Default for RegionUniverse {
    /// The 68-region universe of the plant dataset ([`ALL_REGIONS`]).
    fn default() -> Self {
        RegionUniverse::new(ALL_REGIONS)
    }
}
