//! Engine configuration: TOML file with CLI overrides on top
//!
//! ```toml
//! algorithm = "alpha-beta"
//! max_depth = 5
//! policy = "shallower-else-oldest"
//! table_capacity = 1048576
//! deadline_ms = 2000
//!
//! [search]
//! quiescence = true
//! qsearch_max_ply = 4
//! use_table = true
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use clap::Args;
use madking_core::search::{DEFAULT_MAX_DEPTH, DEFAULT_TABLE_CAPACITY};
use madking_core::{
    PolicyKind, SearchAlgorithm, SearchConfig, SearchContext, SearchLimits, TranspositionTable,
};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    pub algorithm: SearchAlgorithm,
    /// Deepest iterative-deepening iteration
    pub max_depth: u8,
    pub policy: PolicyKind,
    pub table_capacity: usize,
    /// No new iteration starts after this many milliseconds
    pub deadline_ms: Option<u64>,
    pub search: SearchConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        EngineConfig {
            algorithm: SearchAlgorithm::default(),
            max_depth: DEFAULT_MAX_DEPTH,
            policy: PolicyKind::default(),
            table_capacity: DEFAULT_TABLE_CAPACITY,
            deadline_ms: None,
            search: SearchConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Read a TOML file; missing keys keep their defaults
    pub fn from_file(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config {}", path.display()))?;
        toml::from_str(&text).with_context(|| format!("failed to parse config {}", path.display()))
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).context("failed to serialize engine config")
    }

    /// A fresh context with this configuration's table
    pub fn build_context(&self) -> SearchContext {
        let table = if self.search.use_table && self.table_capacity > 0 {
            TranspositionTable::new(self.table_capacity, self.policy)
        } else {
            TranspositionTable::disabled()
        };
        SearchContext::new(table, self.search)
    }

    pub fn deadline(&self) -> Option<Duration> {
        self.deadline_ms.map(Duration::from_millis)
    }

    /// Limits for a search run on the calling thread
    pub fn limits(&self) -> SearchLimits {
        let limits = SearchLimits::depth(self.max_depth);
        match self.deadline() {
            Some(deadline) => limits.with_deadline(deadline),
            None => limits,
        }
    }
}

/// Engine options shared by every binary
#[derive(Args, Debug, Clone, Default)]
pub struct EngineArgs {
    /// TOML engine configuration; flags below override it
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Search algorithm (minimax, alpha-beta)
    #[arg(long)]
    pub algorithm: Option<SearchAlgorithm>,

    /// Deepest iterative-deepening iteration
    #[arg(long)]
    pub depth: Option<u8>,

    /// Table replacement policy
    #[arg(long)]
    pub policy: Option<PolicyKind>,

    /// Table capacity in entries (0 disables the table)
    #[arg(long)]
    pub table_capacity: Option<usize>,

    /// Stop starting new iterations after this many milliseconds
    #[arg(long)]
    pub deadline_ms: Option<u64>,

    /// Disable quiescence search
    #[arg(long, default_value_t = false)]
    pub no_quiescence: bool,

    /// Quiescence plies before falling back to the evaluator
    #[arg(long)]
    pub qsearch_max_ply: Option<u8>,
}

impl EngineArgs {
    /// Load the config file (if any) and apply the flags
    pub fn resolve(&self) -> Result<EngineConfig> {
        let mut config = match &self.config {
            Some(path) => EngineConfig::from_file(path)?,
            None => EngineConfig::default(),
        };
        self.apply(&mut config);
        Ok(config)
    }

    pub fn apply(&self, config: &mut EngineConfig) {
        if let Some(algorithm) = self.algorithm {
            config.algorithm = algorithm;
        }
        if let Some(depth) = self.depth {
            config.max_depth = depth;
        }
        if let Some(policy) = self.policy {
            config.policy = policy;
        }
        if let Some(capacity) = self.table_capacity {
            config.table_capacity = capacity;
            if capacity == 0 {
                config.search.use_table = false;
            }
        }
        if let Some(ms) = self.deadline_ms {
            config.deadline_ms = Some(ms);
        }
        if self.no_quiescence {
            config.search.quiescence = false;
        }
        if let Some(ply) = self.qsearch_max_ply {
            config.search.qsearch_max_ply = ply;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config: EngineConfig = toml::from_str("max_depth = 6\npolicy = \"oldest\"\n").unwrap();
        assert_eq!(config.max_depth, 6);
        assert_eq!(config.policy, PolicyKind::AlwaysReplace);
        assert_eq!(config.algorithm, SearchAlgorithm::AlphaBeta);
        assert_eq!(config.search, SearchConfig::default());
    }

    #[test]
    fn test_flags_override_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "max_depth = 6\ndeadline_ms = 100\n[search]\nqsearch_max_ply = 2").unwrap();

        let args = EngineArgs {
            config: Some(file.path().to_path_buf()),
            depth: Some(3),
            no_quiescence: true,
            table_capacity: Some(0),
            ..EngineArgs::default()
        };
        let config = args.resolve().unwrap();
        assert_eq!(config.max_depth, 3);
        assert_eq!(config.deadline_ms, Some(100));
        assert_eq!(config.deadline(), Some(Duration::from_millis(100)));
        assert_eq!(config.limits().deadline, config.deadline());
        assert_eq!(config.search.qsearch_max_ply, 2);
        assert!(!config.search.quiescence);
        assert!(!config.search.use_table);
        assert!(!config.build_context().table().is_enabled());
    }

    #[test]
    fn test_toml_round_trip() {
        let config = EngineConfig {
            algorithm: SearchAlgorithm::Minimax,
            deadline_ms: Some(250),
            ..EngineConfig::default()
        };
        let text = config.to_toml().unwrap();
        let back: EngineConfig = toml::from_str(&text).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        let err = EngineConfig::from_file(Path::new("/nonexistent/madking.toml")).unwrap_err();
        assert!(err.to_string().contains("failed to read config"));
    }
}
