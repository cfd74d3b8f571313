//! Session state: a persistent, incrementally-asserted premise set fronting the engine manager,
//! plus the manager that owns every live [Session] and sweeps expired ones (spec.md §3 `Session`,
//! §4.4.5, §5 "periodic sweeper").

mod manager;
mod sweeper;

pub use manager::SessionManager;

use crate::ast::Formula;
use crate::engines::manager::EngineSelection;
use crate::normalize::SkolemEnv;
use std::time::{Duration, Instant};
use uuid::Uuid;

/// One asserted premise: its parsed form alongside the exact source text it was asserted with, so
/// [Session::retract] can perform the textual match spec.md §4.4.5 describes ("performs textual
/// removal").
#[derive(Clone, Debug, PartialEq)]
struct Premise {
    text: String,
    formula: Formula,
}

/// A session's accumulated state (spec.md §3 `Session`). Owned exclusively by [SessionManager];
/// clients hold only the [Uuid].
#[derive(Debug)]
pub struct Session {
    id: Uuid,
    premises: Vec<Premise>,
    created_at: Instant,
    last_accessed_at: Instant,
    ttl: Duration,
    /// Fixed at creation (spec.md §4.4.5 distinguishes Horn's rebuild-based retraction from a
    /// SAT/SMT-like engine's scoped pop; this crate's SAT engine has no scoped pop either, so a
    /// session pinned to it reports [crate::types::FolError::RetractionUnsupported] the way a
    /// real incremental SAT/SMT backend without push/pop would, even though this toy engine could
    /// technically rebuild from scratch — DESIGN.md records this as a deliberate simplification).
    engine_selection: EngineSelection,
    /// Shared across every `assert` in this session so Skolem symbol identity stays consistent
    /// as premises accumulate (spec.md §9).
    skolem_env: SkolemEnv,
}

impl Session {
    fn new(id: Uuid, ttl: Duration, engine_selection: EngineSelection) -> Self {
        let now = Instant::now();
        Session {
            id,
            premises: Vec::new(),
            created_at: now,
            last_accessed_at: now,
            ttl,
            engine_selection,
            skolem_env: SkolemEnv::new(),
        }
    }

    fn touch(&mut self) {
        self.last_accessed_at = Instant::now();
    }

    fn is_expired(&self, now: Instant) -> bool {
        now.duration_since(self.last_accessed_at) >= self.ttl
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn premise_texts(&self) -> Vec<String> {
        self.premises.iter().map(|p| p.text.clone()).collect()
    }

    pub fn premise_formulas(&self) -> Vec<Formula> {
        self.premises.iter().map(|p| p.formula.clone()).collect()
    }

    pub fn created_at(&self) -> Instant {
        self.created_at
    }

    pub fn last_accessed_at(&self) -> Instant {
        self.last_accessed_at
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fresh_session_is_not_expired_immediately() {
        let session = Session::new(Uuid::new_v4(), Duration::from_secs(60), EngineSelection::Auto);
        assert!(!session.is_expired(Instant::now()));
    }

    #[test]
    fn session_expires_once_ttl_has_elapsed() {
        let session = Session::new(Uuid::new_v4(), Duration::from_millis(0), EngineSelection::Auto);
        std::thread::sleep(Duration::from_millis(5));
        assert!(session.is_expired(Instant::now()));
    }
}
