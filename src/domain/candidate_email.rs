/// An email address a caller wants to look up, trimmed and known to be non-empty.
///
/// No syntactic validation happens here: the Identity Admin API is the judge of
/// what an existing account looks like, so anything non-blank is worth asking about.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateEmail(String);

impl CandidateEmail {
    /// Returns `None` when nothing usable was supplied (absent, empty or whitespace only).
    pub fn parse(raw: Option<&str>) -> Option<CandidateEmail> {
        let trimmed = raw.unwrap_or_default().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// Case-insensitive comparison against an address returned by the admin API.
    ///
    /// Both sides are lower-cased with Unicode rules, independent of any locale.
    pub fn matches(&self, other: &str) -> bool {
        self.0.to_lowercase() == other.to_lowercase()
    }
}

impl AsRef<str> for CandidateEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CandidateEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
