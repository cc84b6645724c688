use glob_match::glob_match;

/// A single ignore rule.
///
/// `Exact` compares string equality; `Pattern` is a glob (via `glob-match`,
/// so `*`, `?`, `**` and character classes are available). A rule matches a
/// path if it hits either the full relative path or the path's final
/// segment, so `Pattern("*.log")` ignores `build/output.log` and
/// `Exact("target")` ignores the `target` directory at any depth.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum IgnoreRule {
    Exact(String),
    Pattern(String),
}

impl IgnoreRule {
    /// Exact-match rule.
    pub fn exact(rule: impl Into<String>) -> Self {
        Self::Exact(rule.into())
    }

    /// Glob-pattern rule.
    pub fn pattern(rule: impl Into<String>) -> Self {
        Self::Pattern(rule.into())
    }

    /// Returns `true` if the rule matches the path or its final segment.
    pub fn matches(&self, path: &str) -> bool {
        let name = path.rsplit('/').next().unwrap_or(path);
        match self {
            Self::Exact(rule) => rule == path || rule == name,
            Self::Pattern(rule) => glob_match(rule, path) || glob_match(rule, name),
        }
    }
}

/// Returns `true` if any rule matches the path.
pub fn is_ignored(path: &str, rules: &[IgnoreRule]) -> bool {
    rules.iter().any(|rule| rule.matches(path))
}
