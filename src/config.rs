//! Engine and session configuration.

use std::path::PathBuf;

/// Namespace roles and cache sizes for a [`ShortNameEngine`](crate::engine::ShortNameEngine).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EngineConfig {
    /// Namespace user queries are written in.
    pub query_namespace: String,
    /// Namespace of the generated mapping's source side.
    pub from_namespace: String,
    /// Namespace of the generated mapping's destination side.
    pub to_namespace: String,
    pub class_cache_capacity: usize,
    /// Capacity of each member cache (fields and methods are cached separately).
    pub member_cache_capacity: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            query_namespace: "fabric".to_string(),
            from_namespace: "intermediary".to_string(),
            to_namespace: "forge17".to_string(),
            class_cache_capacity: 1 << 16,
            member_cache_capacity: 1 << 17,
        }
    }
}

impl EngineConfig {
    /// Bind the three namespace roles, keeping default cache sizes.
    pub fn new(query: impl Into<String>, from: impl Into<String>, to: impl Into<String>) -> Self {
        Self {
            query_namespace: query.into(),
            from_namespace: from.into(),
            to_namespace: to.into(),
            ..Self::default()
        }
    }

    pub fn with_class_cache_capacity(mut self, capacity: usize) -> Self {
        self.class_cache_capacity = capacity;
        self
    }

    pub fn with_member_cache_capacity(mut self, capacity: usize) -> Self {
        self.member_cache_capacity = capacity;
        self
    }
}

/// Settings for a command session.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionConfig {
    /// Where `dmp` without an argument writes to.
    pub output_path: Option<PathBuf>,
    /// Prompt printed before each interactive line.
    pub prompt: String,
    /// Error messages longer than this many characters are cut and suffixed with `...`.
    pub max_error_len: usize,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            output_path: None,
            prompt: "$> ".to_string(),
            max_error_len: 128,
        }
    }
}

impl SessionConfig {
    pub fn with_output_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_path = Some(path.into());
        self
    }

    pub fn with_prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = prompt.into();
        self
    }

    pub fn with_max_error_len(mut self, len: usize) -> Self {
        self.max_error_len = len;
        self
    }
}
