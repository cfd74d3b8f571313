/*!
[SessionManager]: owns every live [Session] behind a two-level lock — an outer `RwLock` over the
session map (mutating which sessions exist needs exclusive access; looking one up does not) and
an inner per-session `Mutex` (serialising `assert`/`retract`/`prove` on one session, since they
share that session's [crate::normalize::SkolemEnv] — spec.md §5 "Engine state... is exclusive to a
single clausification call; sessions that share Skolem identity across successive assertions
serialise those calls").

`prove` clones the premise snapshot while holding only the per-session lock just long enough to
copy it out, then runs the engine manager unlocked — spec.md §5's "Concurrent `prove` calls on
the same session observe the premise list snapshot at call time; no mutation is visible
mid-proof", without serialising unrelated proofs on other sessions behind one another.
*/

use super::sweeper::Sweeper;
use super::{Premise, Session};
use crate::ast::Formula;
use crate::clausify::{clausify, Strategy};
use crate::config::SessionConfig;
use crate::engines::manager::{EngineManager, EngineSelection};
use crate::engines::{ProveOptions, ProveResult};
use crate::parser::parse;
use crate::types::FolError;
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::Duration;
use uuid::Uuid;

type SessionHandle = Arc<Mutex<Session>>;

/// Owns every live session, enforcing [SessionConfig::max_sessions] and running a background
/// sweeper that deletes sessions past their TTL (spec.md §3 "Lifetime", §5).
pub struct SessionManager {
    sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>>,
    config: SessionConfig,
    engine_manager: EngineManager,
    sweeper: Sweeper,
}

impl SessionManager {
    pub fn new(config: SessionConfig) -> Self {
        let sessions: Arc<RwLock<HashMap<Uuid, SessionHandle>>> = Arc::new(RwLock::new(HashMap::new()));
        let sweeper = Sweeper::spawn(sessions.clone(), config.sweep_interval);
        SessionManager { sessions, config, engine_manager: EngineManager::new(), sweeper }
    }

    fn handle(&self, id: Uuid) -> Result<SessionHandle, FolError> {
        let sessions = self.sessions.read().expect("session map lock poisoned");
        sessions.get(&id).cloned().ok_or(FolError::SessionNotFound)
    }

    /// Creates a new session with `ttl` (defaulting to [SessionConfig::default_ttl]), engine
    /// selection fixed for its lifetime. Fails with [FolError::SessionLimit] at
    /// [SessionConfig::max_sessions] rather than evicting an existing session (spec.md §3
    /// "new-session call fails rather than evicting").
    pub fn create(&self, ttl: Option<Duration>, engine_selection: EngineSelection) -> Result<Uuid, FolError> {
        let mut sessions = self.sessions.write().expect("session map lock poisoned");
        if sessions.len() >= self.config.max_sessions.value {
            return Err(FolError::SessionLimit { max: self.config.max_sessions.value });
        }
        let id = Uuid::new_v4();
        let ttl = ttl.unwrap_or(self.config.default_ttl);
        sessions.insert(id, Arc::new(Mutex::new(Session::new(id, ttl, engine_selection))));
        log::debug!(target: "fol_core::session", "created session {id}");
        Ok(id)
    }

    /// Parses and appends `text` to the session's premise list (spec.md §4.4.5 "performs syntax
    /// validation and appends; no re-clausification yet").
    pub fn assert(&self, id: Uuid, text: &str) -> Result<(), FolError> {
        let handle = self.handle(id)?;
        let formula = parse(text)?;
        let mut session = handle.lock().expect("session lock poisoned");
        session.touch();
        session.premises.push(Premise { text: text.to_string(), formula });
        Ok(())
    }

    /// Removes the first premise whose source text equals `text` exactly, then rebuilds the
    /// session's [crate::normalize::SkolemEnv] from scratch over the remaining premises (spec.md
    /// §4.4.5 "textual removal followed by a fresh engine state"). Returns
    /// [FolError::RetractionUnsupported] when the session is pinned to
    /// [EngineSelection::Sat] — see [Session::engine_selection]'s doc comment.
    pub fn retract(&self, id: Uuid, text: &str) -> Result<(), FolError> {
        let handle = self.handle(id)?;
        let mut session = handle.lock().expect("session lock poisoned");
        if session.engine_selection == EngineSelection::Sat {
            return Err(FolError::RetractionUnsupported);
        }
        session.touch();
        let before = session.premises.len();
        session.premises.retain(|p| p.text != text);
        if session.premises.len() == before {
            return Err(FolError::Validation(format!("no asserted premise matches {text:?}")));
        }
        let premises = session.premise_formulas();
        let mut env = crate::normalize::SkolemEnv::new();
        for f in &premises {
            let _ = clausify(f, Strategy::Standard, 50_000, None, &mut env);
        }
        session.skolem_env = env;
        Ok(())
    }

    pub fn list_premises(&self, id: Uuid) -> Result<Vec<String>, FolError> {
        let handle = self.handle(id)?;
        let mut session = handle.lock().expect("session lock poisoned");
        session.touch();
        Ok(session.premise_texts())
    }

    /// Removes every premise, keeping the session (and its id) alive.
    pub fn clear(&self, id: Uuid) -> Result<(), FolError> {
        let handle = self.handle(id)?;
        let mut session = handle.lock().expect("session lock poisoned");
        session.touch();
        session.premises.clear();
        session.skolem_env = crate::normalize::SkolemEnv::new();
        Ok(())
    }

    /// Deletes a session outright (spec.md §3 "destroyed by explicit delete").
    pub fn delete(&self, id: Uuid) -> Result<(), FolError> {
        let mut sessions = self.sessions.write().expect("session map lock poisoned");
        sessions.remove(&id).ok_or(FolError::SessionNotFound).map(|_| ())
    }

    /// Parses `goal` and proves it against the session's accumulated premises (spec.md §4.4.5
    /// "builds the full refutation AST and delegates to its engine"). The premise list is
    /// snapshotted under the per-session lock and the lock released before the (possibly slow)
    /// proof runs.
    pub fn prove(&self, id: Uuid, goal: &str, options: &ProveOptions) -> Result<ProveResult, FolError> {
        let handle = self.handle(id)?;
        let (premises, selection): (Vec<Formula>, EngineSelection) = {
            let mut session = handle.lock().expect("session lock poisoned");
            session.touch();
            (session.premise_formulas(), session.engine_selection)
        };
        let conclusion = parse(goal)?;
        self.engine_manager.prove(&premises, &conclusion, selection, options)
    }

    pub fn session_count(&self) -> usize {
        self.sessions.read().expect("session map lock poisoned").len()
    }
}

impl Drop for SessionManager {
    fn drop(&mut self) {
        self.sweeper.stop();
    }
}
