//! Reasoning engines behind a uniform contract (spec.md §4.4.1), plus the manager that selects or
//! races between them (spec.md §4.4.4).
//!
//! Mirrors the teacher's `Report` enum (a small, `Copy`-able outcome tag returned by a solve) for
//! [ProveOutcome]/[SatOutcome], generalised from "one SAT core" to "one engine among several with
//! declared capabilities" per the polymorphism design note in spec.md §9.

pub mod horn;
pub mod manager;
pub mod sat;

pub use manager::{EngineManager, EngineSelection};

use crate::ast::term::Term;
use crate::config::ProveConfig;
use std::collections::BTreeMap;
use std::sync::Arc;
use std::time::{Duration, Instant};

/// Capabilities an engine declares so the manager can pick or reject it (spec.md §4.4.1).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct EngineCapabilities {
    pub horn: bool,
    pub full_fol: bool,
    pub equality: bool,
    pub arithmetic: bool,
    pub streaming: bool,
}

/// Verbosity of a [ProveResult] (spec.md §6: "At `standard` verbosity, omit proof... At
/// `minimal`, return only `success` and `result`").
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum Verbosity {
    Minimal,
    #[default]
    Standard,
    Detailed,
}

/// The outcome of a `prove` call.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ProveOutcome {
    Proved,
    Failed,
    Timeout,
    Error,
}

impl std::fmt::Display for ProveOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProveOutcome::Proved => "proved",
            ProveOutcome::Failed => "failed",
            ProveOutcome::Timeout => "timeout",
            ProveOutcome::Error => "error",
        };
        write!(f, "{s}")
    }
}

/// One resolution step, surfaced at [Verbosity::Detailed] (spec.md §6 `inferenceSteps?[]`).
#[derive(Clone, Debug, PartialEq)]
pub struct InferenceStep {
    /// The clause resolved against, rendered in canonical form.
    pub resolved_against: String,
    /// The variable bindings produced by this step.
    pub bindings: BTreeMap<Arc<str>, Term>,
}

/// Counters reported alongside a [ProveResult] (spec.md §6 `statistics`).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ProveStatistics {
    pub time_ms: u64,
    pub inferences: Option<u64>,
    pub clauses: Option<usize>,
    pub variables: Option<usize>,
}

/// The result of a `prove` call (spec.md §6 `ProveResult`).
#[derive(Clone, Debug, PartialEq)]
pub struct ProveResult {
    pub success: bool,
    pub result: ProveOutcome,
    pub message: Option<String>,
    pub engine_used: Option<&'static str>,
    pub bindings: Option<BTreeMap<Arc<str>, Term>>,
    pub proof: Option<Vec<String>>,
    pub statistics: ProveStatistics,
    pub inference_steps: Option<Vec<InferenceStep>>,
}

impl ProveResult {
    pub fn proved(engine: &'static str, statistics: ProveStatistics) -> Self {
        ProveResult {
            success: true,
            result: ProveOutcome::Proved,
            message: None,
            engine_used: Some(engine),
            bindings: None,
            proof: None,
            statistics,
            inference_steps: None,
        }
    }

    pub fn failed(engine: &'static str, statistics: ProveStatistics) -> Self {
        ProveResult {
            success: false,
            result: ProveOutcome::Failed,
            message: None,
            engine_used: Some(engine),
            bindings: None,
            proof: None,
            statistics,
            inference_steps: None,
        }
    }

    pub fn timeout(engine: &'static str, statistics: ProveStatistics) -> Self {
        ProveResult {
            success: false,
            result: ProveOutcome::Timeout,
            message: Some("deadline exceeded".to_string()),
            engine_used: Some(engine),
            bindings: None,
            proof: None,
            statistics,
            inference_steps: None,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ProveResult {
            success: false,
            result: ProveOutcome::Error,
            message: Some(message.into()),
            engine_used: None,
            bindings: None,
            proof: None,
            statistics: ProveStatistics::default(),
            inference_steps: None,
        }
    }

    /// Applies §6's verbosity rule: strip `proof`/`inference_steps`/detailed statistics at
    /// `standard`; strip everything but `success`/`result` at `minimal`.
    pub fn at_verbosity(mut self, verbosity: Verbosity) -> Self {
        match verbosity {
            Verbosity::Detailed => self,
            Verbosity::Standard => {
                self.proof = None;
                self.inference_steps = None;
                self.statistics.inferences = None;
                self.statistics.clauses = None;
                self.statistics.variables = None;
                self
            }
            Verbosity::Minimal => ProveResult {
                success: self.success,
                result: self.result,
                message: None,
                engine_used: None,
                bindings: None,
                proof: None,
                statistics: ProveStatistics::default(),
                inference_steps: None,
            },
        }
    }
}

/// The outcome of a `checkSat` call (spec.md §4.4.1).
#[derive(Clone, Debug, PartialEq)]
pub struct SatResult {
    pub sat: bool,
    /// A satisfying propositional assignment, keyed by DIMACS-style variable index, when `sat`.
    pub model: Option<BTreeMap<u32, bool>>,
}

/// A deadline shared by every inner loop of an engine (spec.md §9 "Cancellation"). Constructed
/// once per call and polled at every recursive descent/enumeration step.
#[derive(Clone, Copy, Debug)]
pub struct Deadline {
    at: Instant,
}

impl Deadline {
    pub fn after(duration: Duration) -> Self {
        Deadline { at: Instant::now() + duration }
    }

    pub fn expired(&self) -> bool {
        Instant::now() >= self.at
    }

    pub fn as_instant(&self) -> Instant {
        self.at
    }
}

/// Options threaded through a `prove` call (spec.md §6).
#[derive(Clone, Debug)]
pub struct ProveOptions {
    pub config: ProveConfig,
    pub verbosity: Verbosity,
}

impl Default for ProveOptions {
    fn default() -> Self {
        ProveOptions { config: ProveConfig::standard(), verbosity: Verbosity::default() }
    }
}
