/// File extensions the linter acts on.
///
/// Matching is an exact, case-sensitive suffix comparison on the path as
/// given: `a.d.ts` matches `.ts`, `a.TS` matches nothing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Extensions(Vec<String>);

/// TypeScript and JavaScript sources.
pub const DEFAULT_EXTENSIONS: &[&str] = &[".ts", ".tsx", ".js", ".jsx"];

impl Default for Extensions {
    fn default() -> Self {
        Extensions(DEFAULT_EXTENSIONS.iter().map(|e| e.to_string()).collect())
    }
}

impl Extensions {
    pub fn new<I, S>(extensions: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Extensions(extensions.into_iter().map(Into::into).collect())
    }

    pub fn matches(&self, path: &str) -> bool {
        self.0.iter().any(|ext| path.ends_with(ext.as_str()))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}
