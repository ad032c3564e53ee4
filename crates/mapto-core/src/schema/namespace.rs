use serde::Serialize;

/// A `::`-separated module path. The empty path is the global namespace.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Namespace(String);

impl Namespace {
    pub fn global() -> Self {
        Self::default()
    }

    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        Self(path.trim_matches(':').to_string())
    }

    pub fn is_global(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split("::").filter(|segment| !segment.is_empty())
    }

    /// Appends a child module
    pub fn join(&self, segment: &str) -> Self {
        if self.is_global() {
            Self::new(segment)
        } else {
            Self(format!("{}::{segment}", self.0))
        }
    }
}

impl From<&str> for Namespace {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

impl From<String> for Namespace {
    fn from(path: String) -> Self {
        Self::new(path)
    }
}

impl core::fmt::Display for Namespace {
    fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
        f.write_str(&self.0)
    }
}
