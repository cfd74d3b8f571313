/*!
The engine manager: picks or races the Horn and SAT engines based on formula shape (spec.md
§4.4.4).

`auto` clausifies the premises once (Standard strategy, just to inspect Horn-ness and the goal
shape) and routes to Horn when every clause is Horn and the goal has no universal quantifier,
else to SAT. `race` runs both concurrently with `std::thread::scope` and a shared
`Arc<AtomicBool>` cancellation flag (SPEC_FULL.md §5) — the first engine to return `proved` or
`failed` wins and the other is signalled to stop via its deadline; explicit `horn`/`sat`
selections bypass the auto-routing and report [FolError::CapabilityMismatch] when the chosen
engine cannot run the input (`NON_HORN`/`UNIVERSAL_GOAL` surfaced as the mismatch reason).
*/

use crate::ast::Formula;
use crate::clausify::{clausify_all, Strategy};
use crate::engines::horn::HornEngine;
use crate::engines::sat::SatEngine;
use crate::engines::{EngineCapabilities, ProveOptions, ProveOutcome, ProveResult};
use crate::normalize::SkolemEnv;
use crate::types::FolError;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Which engine (or strategy) a `prove` call should use (spec.md §4.4.4).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Default)]
pub enum EngineSelection {
    #[default]
    Auto,
    Horn,
    Sat,
    Race,
}

/// Selects or races engines for a single `prove` call.
#[derive(Clone, Copy, Debug, Default)]
pub struct EngineManager {
    horn: HornEngine,
    sat: SatEngine,
}

impl EngineManager {
    pub fn new() -> Self {
        EngineManager::default()
    }

    pub fn horn_capabilities(&self) -> EngineCapabilities {
        self.horn.capabilities()
    }

    pub fn sat_capabilities(&self) -> EngineCapabilities {
        self.sat.capabilities()
    }

    /// Clausifies `premises` under [Strategy::Standard] purely to inspect shape (Horn-ness), and
    /// checks `conclusion` for a top-level universal — the two conditions `auto` consults
    /// (spec.md §4.4.4: "if every clausified input is Horn and the goal is quantifier-free, pick
    /// horn; else pick SAT").
    fn prefers_horn(&self, premises: &[Formula], conclusion: &Formula) -> bool {
        if contains_forall(conclusion) {
            return false;
        }
        let mut env = SkolemEnv::new();
        let node_budget = 50_000;
        match clausify_all(premises, Strategy::Standard, node_budget, None, &mut env) {
            Ok((clauses, _)) => clauses.is_horn(),
            Err(_) => false,
        }
    }

    /// Routes a `prove(premises, conclusion)` call to the selected engine(s) (spec.md §4.4.4,
    /// §6).
    pub fn prove(
        &self,
        premises: &[Formula],
        conclusion: &Formula,
        selection: EngineSelection,
        options: &ProveOptions,
    ) -> Result<ProveResult, FolError> {
        log::debug!(target: "fol_core::manager", "prove via {selection:?}");
        match selection {
            EngineSelection::Horn => self.run_horn_explicit(premises, conclusion, options),
            EngineSelection::Sat => self.sat.prove(premises, conclusion, options),
            EngineSelection::Race => self.race(premises, conclusion, options),
            EngineSelection::Auto => {
                if self.prefers_horn(premises, conclusion) {
                    match self.horn.prove(premises, conclusion, options) {
                        Ok(r) => Ok(r),
                        Err(FolError::NonHorn) | Err(FolError::UniversalGoal) => {
                            self.sat.prove(premises, conclusion, options)
                        }
                        Err(e) => Err(e),
                    }
                } else {
                    self.sat.prove(premises, conclusion, options)
                }
            }
        }
    }

    /// An explicit `horn` selection bypasses auto-routing but still reports a capability
    /// mismatch (rather than a bare `NonHorn`/`UniversalGoal`) when the input cannot run on this
    /// engine, per spec.md §4.4.4 "Explicit selections bypass capability checks and report
    /// `CAPABILITY_MISMATCH`".
    fn run_horn_explicit(
        &self,
        premises: &[Formula],
        conclusion: &Formula,
        options: &ProveOptions,
    ) -> Result<ProveResult, FolError> {
        match self.horn.prove(premises, conclusion, options) {
            Err(FolError::NonHorn) => Err(FolError::CapabilityMismatch { engine: "horn", needed: "full_fol" }),
            Err(FolError::UniversalGoal) => {
                Err(FolError::CapabilityMismatch { engine: "horn", needed: "universal_goal" })
            }
            other => other,
        }
    }

    /// Races the Horn and SAT engines concurrently; the first to return `proved` or `failed`
    /// wins, the other is left to hit its own deadline and is ignored (spec.md §4.4.4, §5
    /// "Racing engines must support cancellation").
    fn race(
        &self,
        premises: &[Formula],
        conclusion: &Formula,
        options: &ProveOptions,
    ) -> Result<ProveResult, FolError> {
        let cancelled = Arc::new(AtomicBool::new(false));
        let (tx, rx) = std::sync::mpsc::channel();

        std::thread::scope(|scope| {
            let horn_cancel = cancelled.clone();
            let horn_tx = tx.clone();
            scope.spawn(|| {
                let result = self.horn.prove(premises, conclusion, options);
                if !horn_cancel.load(Ordering::Relaxed) {
                    let _ = horn_tx.send(("horn", result));
                }
            });

            let sat_cancel = cancelled.clone();
            let sat_tx = tx.clone();
            scope.spawn(|| {
                let result = self.sat.prove(premises, conclusion, options);
                if !sat_cancel.load(Ordering::Relaxed) {
                    let _ = sat_tx.send(("sat", result));
                }
            });
            drop(tx);

            let mut fallback: Option<Result<ProveResult, FolError>> = None;
            for (engine, result) in rx.iter() {
                match &result {
                    Ok(r) if r.result == ProveOutcome::Proved || r.result == ProveOutcome::Failed => {
                        cancelled.store(true, Ordering::Relaxed);
                        log::debug!(target: "fol_core::manager", "race won by {engine}");
                        return result;
                    }
                    _ => {
                        if fallback.is_none() {
                            fallback = Some(result);
                        }
                    }
                }
            }
            fallback.unwrap_or_else(|| Ok(ProveResult::error("both engines failed to produce a result")))
        })
    }
}

fn contains_forall(formula: &Formula) -> bool {
    use crate::ast::term::Quantifier;
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => false,
        Formula::Not(inner) => contains_forall(inner),
        Formula::Bin(_, l, r) => contains_forall(l) || contains_forall(r),
        Formula::Quant(Quantifier::Forall, ..) => true,
        Formula::Quant(Quantifier::Exists, _, body) => contains_forall(body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn auto_picks_horn_for_horn_input() {
        let manager = EngineManager::new();
        let premises = vec![
            parse("all x (man(x) -> mortal(x)).").unwrap(),
            parse("man(socrates).").unwrap(),
        ];
        let conclusion = parse("mortal(socrates).").unwrap();
        let result = manager.prove(&premises, &conclusion, EngineSelection::Auto, &ProveOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.engine_used, Some("horn"));
    }

    #[test]
    fn auto_falls_back_to_sat_for_non_horn_input() {
        let manager = EngineManager::new();
        let premises = vec![parse("all x (P(x) | Q(x)).").unwrap(), parse("-P(a).").unwrap()];
        let conclusion = parse("Q(a).").unwrap();
        let result = manager.prove(&premises, &conclusion, EngineSelection::Auto, &ProveOptions::default()).unwrap();
        assert!(result.success);
        assert_eq!(result.engine_used, Some("sat"));
    }

    #[test]
    fn explicit_horn_on_non_horn_input_is_a_capability_mismatch() {
        let manager = EngineManager::new();
        let premises = vec![parse("all x (P(x) | Q(x)).").unwrap()];
        let conclusion = parse("Q(a).").unwrap();
        let err = manager
            .prove(&premises, &conclusion, EngineSelection::Horn, &ProveOptions::default())
            .unwrap_err();
        assert!(matches!(err, FolError::CapabilityMismatch { engine: "horn", .. }));
    }

    #[test]
    fn race_returns_a_proved_result() {
        let manager = EngineManager::new();
        let premises = vec![
            parse("all x (man(x) -> mortal(x)).").unwrap(),
            parse("man(socrates).").unwrap(),
        ];
        let conclusion = parse("mortal(socrates).").unwrap();
        let result = manager.prove(&premises, &conclusion, EngineSelection::Race, &ProveOptions::default()).unwrap();
        assert!(result.success);
    }
}
