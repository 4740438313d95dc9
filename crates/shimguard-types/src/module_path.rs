use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Keyword that anchors a path at the crate root.
pub const CRATE_ANCHOR: &str = "crate";

/// Canonical Rust module path (`crate::business::models`).
///
/// Input may use `::`, `/` or `.` as separators; a trailing `.rs` is dropped
/// and empty segments are ignored. An empty input is the crate root.
#[derive(
    Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
#[serde(transparent)]
pub struct ModulePath(String);

impl Default for ModulePath {
    fn default() -> Self {
        ModulePath::crate_root()
    }
}

impl ModulePath {
    pub fn new<S: AsRef<str>>(s: S) -> Self {
        let raw = s.as_ref().trim();
        let raw = raw.strip_suffix(".rs").unwrap_or(raw);
        let segments: Vec<&str> = raw
            .split(|c| c == '/' || c == '\\' || c == '.' || c == ':')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        if segments.is_empty() {
            return ModulePath::crate_root();
        }
        Self(segments.join("::"))
    }

    /// Build from a legacy reference such as
    /// `services/database-service/src/business/models/email_record`.
    ///
    /// Everything up to and including the last `src` segment is dropped, then
    /// the result is anchored at the crate root.
    pub fn from_legacy_reference<S: AsRef<str>>(s: S) -> Self {
        let parsed = ModulePath::new(s);
        let segments: Vec<&str> = parsed.segments().collect();
        let start = segments
            .iter()
            .rposition(|s| *s == "src")
            .map(|i| i + 1)
            .unwrap_or(0);
        ModulePath::from_segments(segments[start..].iter().copied()).anchored()
    }

    pub fn from_segments<'a, I: IntoIterator<Item = &'a str>>(segments: I) -> Self {
        let joined: Vec<&str> = segments.into_iter().filter(|s| !s.is_empty()).collect();
        if joined.is_empty() {
            return ModulePath::crate_root();
        }
        Self(joined.join("::"))
    }

    pub fn crate_root() -> Self {
        Self(CRATE_ANCHOR.to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split("::")
    }

    pub fn is_crate_root(&self) -> bool {
        self.0 == CRATE_ANCHOR
    }

    pub fn is_crate_anchored(&self) -> bool {
        self.segments().next() == Some(CRATE_ANCHOR)
    }

    /// Prefix with `crate` unless already anchored.
    pub fn anchored(self) -> Self {
        if self.is_crate_anchored() {
            self
        } else {
            Self(format!("{CRATE_ANCHOR}::{}", self.0))
        }
    }

    /// Path without the leading `crate` segment (`.` separators are not used).
    pub fn crate_relative(&self) -> &str {
        if self.is_crate_root() {
            return "";
        }
        self.0
            .strip_prefix("crate::")
            .unwrap_or(self.0.as_str())
    }

    pub fn last(&self) -> &str {
        self.segments().last().unwrap_or(CRATE_ANCHOR)
    }

    pub fn parent(&self) -> Option<ModulePath> {
        let (head, _) = self.0.rsplit_once("::")?;
        Some(Self(head.to_string()))
    }

    pub fn join(&self, segment: &str) -> ModulePath {
        ModulePath::new(format!("{}::{}", self.0, segment))
    }

    /// Segment-wise prefix test (`crate::a` is a prefix of `crate::a::b`, not of `crate::ab`).
    pub fn starts_with(&self, prefix: &ModulePath) -> bool {
        let mut mine = self.segments();
        prefix.segments().all(|p| mine.next() == Some(p))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModulePath {
    fn from(value: &str) -> Self {
        ModulePath::new(value)
    }
}
