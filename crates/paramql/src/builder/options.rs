use tracing::Level;

/// Options for [`FragmentBuilder`](super::FragmentBuilder).
///
/// These only affect logging; which fragments and parameters are produced
/// never depends on them.
#[derive(Debug, Clone)]
pub struct BuilderOptions {
    /// Level for "value rejected" events. `None` disables them.
    pub log_level: Option<Level>,
    /// Truncate logged values (in chars). `None` means no truncation.
    pub max_value_length: Option<usize>,
}

impl Default for BuilderOptions {
    fn default() -> Self {
        Self {
            log_level: Some(Level::DEBUG),
            max_value_length: Some(64),
        }
    }
}

impl BuilderOptions {
    /// Create options with defaults.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn log_level(mut self, level: Level) -> Self {
        self.log_level = Some(level);
        self
    }

    /// Don't log rejected values.
    pub fn quiet(mut self) -> Self {
        self.log_level = None;
        self
    }

    /// Set maximum logged value length.
    pub fn max_value_length(mut self, len: usize) -> Self {
        self.max_value_length = Some(len);
        self
    }

    /// Disable value truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_value_length = None;
        self
    }

    pub(crate) fn truncate_value(&self, value: &str) -> String {
        match self.max_value_length {
            Some(max) if value.chars().count() > max => {
                let head: String = value.chars().take(max).collect();
                format!("{head}...")
            }
            _ => value.to_string(),
        }
    }
}

/// Counters collected while a builder evaluates its descriptors.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BuildStats {
    /// Descriptors looked at.
    pub evaluated: usize,
    /// Descriptors whose fragment was kept.
    pub included: usize,
    /// Descriptors skipped because the value was absent, empty or `false`.
    pub skipped_empty: usize,
    /// Descriptors skipped because the value failed the safety screen.
    pub rejected_unsafe: usize,
    /// Composite sub-keys that were missing or absent and left unbound.
    pub skipped_sub_keys: usize,
}
