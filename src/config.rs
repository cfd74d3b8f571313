/*!
Tunable resource bounds (spec.md §5), following the teacher's `Config`/`ConfigOption<T>`
pattern: every tunable carries its own name, legal range, and current value rather than being a
bare struct field, so a caller inspecting a [Config] can report "what is this set to, and what
could it legally be" without a second lookup table.

The teacher's [ConfigOption] also carries a `max_state: ContextState` marking the latest solver
phase in which the option may still be changed (its `Context` moves through configuration,
input, and solving phases). This crate has no such phased lifecycle — a [Config] is fixed for
the duration of one `prove`/`findModel` call — so that field is dropped here; everything else
about the shape is kept.
*/

use std::time::Duration;

/// A single tunable: its name (for diagnostics), legal range, and current value.
#[derive(Clone, Debug, PartialEq)]
pub struct ConfigOption<T> {
    pub name: &'static str,
    pub min: T,
    pub max: T,
    pub value: T,
}

impl<T: PartialOrd + Copy> ConfigOption<T> {
    pub fn new(name: &'static str, min: T, max: T, value: T) -> Self {
        ConfigOption { name, min, max, value }
    }

    pub fn in_range(&self) -> bool {
        self.value >= self.min && self.value <= self.max
    }
}

/// Power profile selecting between the conservative defaults and the "high power" resource
/// bounds named in spec.md §5.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum PowerProfile {
    #[default]
    Standard,
    HighPower,
}

/// Per-prove resource bounds (spec.md §5, §6 `prove(..., {maxInferences, maxSeconds, ...})`).
#[derive(Clone, Debug, PartialEq)]
pub struct ProveConfig {
    /// Inference-step ceiling for the Horn engine's SLD search.
    pub max_inferences: ConfigOption<u64>,
    /// Wall-clock ceiling for a single `prove` call.
    pub max_seconds: ConfigOption<u64>,
    /// Whether to generate and assert equality axioms (spec.md §4.4.4).
    pub enable_equality: bool,
    /// Whether to translate arithmetic predicates to their built-in interpretation (spec.md
    /// §4.4.4).
    pub enable_arithmetic: bool,
    /// SAT engine bounds consulted by `engines::sat` (grounding cap).
    pub sat: SatEngineConfig,
    /// Horn engine bounds consulted by `engines::horn` (equality-chain depth cap).
    pub horn: HornEngineConfig,
}

impl ProveConfig {
    pub fn standard() -> Self {
        ProveConfig {
            max_inferences: ConfigOption::new("max_inferences", 1, 1_000_000, 1_000),
            max_seconds: ConfigOption::new("max_seconds", 1, 3_600, 10),
            enable_equality: true,
            enable_arithmetic: true,
            sat: SatEngineConfig::default(),
            horn: HornEngineConfig::default(),
        }
    }

    pub fn high_power() -> Self {
        ProveConfig {
            max_inferences: ConfigOption::new("max_inferences", 1, 1_000_000, 100_000),
            max_seconds: ConfigOption::new("max_seconds", 1, 3_600, 300),
            ..Self::standard()
        }
    }

    pub fn for_profile(profile: PowerProfile) -> Self {
        match profile {
            PowerProfile::Standard => Self::standard(),
            PowerProfile::HighPower => Self::high_power(),
        }
    }

    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.max_seconds.value)
    }
}

/// Model-finder bounds (spec.md §5, §6 `findModel(..., {domainSize, maxDomainSize, ...})`).
#[derive(Clone, Debug, PartialEq)]
pub struct ModelFinderConfig {
    pub max_domain_size: ConfigOption<usize>,
    pub enable_symmetry: bool,
    /// How many distinct models to return before stopping, when more than one exists.
    pub count: usize,
    pub max_seconds: ConfigOption<u64>,
    /// Domain size beyond which isomorphism rejection is skipped rather than attempted, since
    /// the permutation count `n!` becomes intractable (spec.md §9: "skip beyond `n=8` where
    /// `n!>40320`").
    pub isomorphism_ceiling: ConfigOption<usize>,
}

impl Default for ModelFinderConfig {
    fn default() -> Self {
        ModelFinderConfig {
            max_domain_size: ConfigOption::new("max_domain_size", 1, 64, 10),
            enable_symmetry: true,
            count: 1,
            max_seconds: ConfigOption::new("max_seconds", 1, 3_600, 10),
            isomorphism_ceiling: ConfigOption::new("isomorphism_ceiling", 1, 64, 8),
        }
    }
}

impl ModelFinderConfig {
    pub fn deadline(&self) -> Duration {
        Duration::from_secs(self.max_seconds.value)
    }
}

/// Clausification bounds (spec.md §4.3, §5 "clausification node budget").
#[derive(Clone, Debug, PartialEq)]
pub struct ClausifyConfig {
    pub node_budget: ConfigOption<usize>,
}

impl Default for ClausifyConfig {
    fn default() -> Self {
        ClausifyConfig { node_budget: ConfigOption::new("node_budget", 16, 10_000_000, 50_000) }
    }
}

/// SAT engine bounds (spec.md §4.4.3, §9 open question on clauses with more than three
/// distinct variables).
#[derive(Clone, Debug, PartialEq)]
pub struct SatEngineConfig {
    /// Clauses with more distinct variables than this are left uninstantiated rather than fully
    /// grounded; `findModel`/`prove` statistics flag when this triggers.
    pub max_free_vars_for_grounding: ConfigOption<usize>,
}

impl Default for SatEngineConfig {
    fn default() -> Self {
        SatEngineConfig { max_free_vars_for_grounding: ConfigOption::new("max_free_vars_for_grounding", 0, 16, 3) }
    }
}

/// Horn engine bounds (spec.md §9 "equality axiom depth").
#[derive(Clone, Debug, PartialEq)]
pub struct HornEngineConfig {
    pub equality_depth: ConfigOption<u32>,
}

impl Default for HornEngineConfig {
    fn default() -> Self {
        HornEngineConfig { equality_depth: ConfigOption::new("equality_depth", 1, 64, 5) }
    }
}

/// Session manager bounds (spec.md §3 `Session`, §5 `MAX_SESSIONS`).
#[derive(Clone, Debug, PartialEq)]
pub struct SessionConfig {
    pub max_sessions: ConfigOption<usize>,
    /// Default time-to-live for a session that does not specify one at `create`.
    pub default_ttl: Duration,
    /// How often the sweeper thread scans for expired sessions.
    pub sweep_interval: Duration,
}

impl Default for SessionConfig {
    fn default() -> Self {
        SessionConfig {
            max_sessions: ConfigOption::new("max_sessions", 1, 1_000_000, 1_000),
            default_ttl: Duration::from_secs(3_600),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// The aggregate configuration threaded through a reasoning call or a session manager.
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Config {
    pub prove: ProveConfigOrDefault,
    pub model_finder: ModelFinderConfig,
    pub clausify: ClausifyConfig,
    pub sat: SatEngineConfig,
    pub horn: HornEngineConfig,
    pub session: SessionConfig,
}

/// `ProveConfig` has no single natural default (standard vs. high-power); this newtype gives
/// [Config] a `Default` impl without silently preferring one profile over the other in library
/// code that doesn't ask.
#[derive(Clone, Debug, PartialEq)]
pub struct ProveConfigOrDefault(pub ProveConfig);

impl Default for ProveConfigOrDefault {
    fn default() -> Self {
        ProveConfigOrDefault(ProveConfig::standard())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn high_power_profile_raises_both_bounds() {
        let standard = ProveConfig::standard();
        let high = ProveConfig::high_power();
        assert!(high.max_inferences.value > standard.max_inferences.value);
        assert!(high.max_seconds.value > standard.max_seconds.value);
    }

    #[test]
    fn config_option_range_check() {
        let opt = ConfigOption::new("x", 1, 10, 11);
        assert!(!opt.in_range());
    }
}
