/// Substring predicate over fully-qualified type names.
///
/// Supplied once per run and applied to every type an extracted reference
/// points at. An empty pattern accepts everything.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct NameFilter {
    pattern: String,
}

impl NameFilter {
    pub fn new(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
        }
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    pub fn accepts(&self, type_name: &str) -> bool {
        type_name.contains(&self.pattern)
    }
}
