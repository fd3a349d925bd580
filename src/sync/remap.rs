/// Replace the first occurrence of `source_prefix` in `path` with `dest_prefix`.
///
/// An empty `source_prefix`, or one that does not occur in `path`, leaves the
/// path untouched.
pub fn remap(path: &str, source_prefix: &str, dest_prefix: &str) -> String {
    if source_prefix.is_empty() {
        return path.to_string();
    }
    path.replacen(source_prefix, dest_prefix, 1)
}

/// A prefix substitution fixed at startup from the sync config.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PathRemapper {
    source_prefix: String,
    dest_prefix: String,
}

impl PathRemapper {
    pub fn new(source_prefix: impl Into<String>, dest_prefix: impl Into<String>) -> Self {
        Self { source_prefix: source_prefix.into(), dest_prefix: dest_prefix.into() }
    }

    pub fn is_identity(&self) -> bool {
        self.source_prefix.is_empty() || self.source_prefix == self.dest_prefix
    }

    pub fn apply(&self, path: &str) -> String {
        remap(path, &self.source_prefix, &self.dest_prefix)
    }
}
