//! The SAT-based refutation engine: Tseitin-encode, ground the Herbrand base, hand the result to
//! the propositional kernel (spec.md §4.4.3).

pub mod dpll;
pub mod ground;

use crate::ast::Formula;
use crate::axioms::equality_theory;
use crate::ast::signature::FormulaSignature;
use crate::clausify::{clausify_all, ClauseSet, Strategy};
use crate::engines::{Deadline, EngineCapabilities, ProveOptions, ProveResult, ProveStatistics, SatResult};
use crate::normalize::SkolemEnv;
use crate::types::FolError;
use ground::GroundConfig;
use std::time::Instant;

/// `fullFol`, `equality`, `streaming` — the SAT engine handles any clause shape (it does not
/// require Horn input) but has no `arithmetic` translation (arithmetic predicates ground as
/// ordinary uninterpreted atoms here; only the Horn engine evaluates them, per spec.md §4.4.2).
pub const CAPABILITIES: EngineCapabilities =
    EngineCapabilities { horn: false, full_fol: true, equality: true, arithmetic: false, streaming: false };

/// The SAT-based reasoning engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct SatEngine;

impl SatEngine {
    pub fn capabilities(&self) -> EngineCapabilities {
        CAPABILITIES
    }

    /// Builds `(⋀ premises) ∧ ¬conclusion`, Tseitin-clausifies it, optionally injects equality
    /// axioms, grounds the Herbrand base, and calls the propositional kernel (spec.md §4.4.3
    /// steps 1-6). UNSAT means the refutation goal is unsatisfiable, i.e. `proved`.
    pub fn prove(
        &self,
        premises: &[Formula],
        conclusion: &Formula,
        options: &ProveOptions,
    ) -> Result<ProveResult, FolError> {
        let start = Instant::now();
        let mut all: Vec<Formula> = premises.to_vec();
        all.push(Formula::not(conclusion.clone()));

        if options.config.enable_equality {
            let sig = FormulaSignature::of(&all);
            all.extend(equality_theory(&sig));
        }

        let deadline = Deadline::after(options.config.deadline());
        let node_budget = 50_000;
        let mut env = SkolemEnv::new();
        let mut clauses = ClauseSet::default();
        for f in &all {
            if deadline.expired() {
                return Ok(ProveResult::timeout(
                    "sat",
                    ProveStatistics { time_ms: start.elapsed().as_millis() as u64, ..Default::default() },
                ));
            }
            let (cs, _) = clausify_all(std::slice::from_ref(f), Strategy::Tseitin, node_budget, None, &mut env)?;
            clauses.extend(cs);
        }

        let (ground_result, sat_result) = self.ground_and_solve(&clauses, deadline, options)?;

        let stats = ProveStatistics {
            time_ms: start.elapsed().as_millis() as u64,
            inferences: None,
            clauses: Some(ground_result.clauses.len()),
            variables: Some(ground_result.atom_index.len()),
        };

        let result = match sat_result {
            Ok(None) => {
                let mut r = ProveResult::proved("sat", stats);
                if ground_result.approximated {
                    r.message = Some(
                        "bounded Herbrand approximation: one or more clauses exceeded the free-variable \
                         grounding cap and were left uninstantiated"
                            .to_string(),
                    );
                }
                r
            }
            Ok(Some(assignment)) => {
                let mut r = ProveResult::failed("sat", stats);
                let witnessed: Vec<String> = assignment
                    .iter()
                    .filter(|(_, &truth)| truth)
                    .filter_map(|(idx, _)| ground_result.atoms_by_index.get(idx))
                    .map(|lit| lit.to_string())
                    .collect();
                if !witnessed.is_empty() {
                    r.proof = Some(witnessed);
                }
                r
            }
            Err(FolError::Timeout) => ProveResult::timeout("sat", stats),
            Err(e) => return Err(e),
        };
        Ok(result.at_verbosity(options.verbosity))
    }

    fn ground_and_solve(
        &self,
        clauses: &ClauseSet,
        deadline: Deadline,
        options: &ProveOptions,
    ) -> Result<(ground::GroundResult, Result<Option<std::collections::BTreeMap<i64, bool>>, FolError>), FolError> {
        let ground_config = GroundConfig { max_free_vars: options.config.sat.max_free_vars_for_grounding.value };
        let ground_result = ground::ground(clauses, ground_config);
        let solved = dpll::solve(&ground_result.clauses, deadline);
        Ok((ground_result, solved))
    }

    /// `checkSat(clauses)` runs the same pipeline from grounding onward (spec.md §4.4.3 "The SAT
    /// engine's `checkSat(clauses)` is the same pipeline from step 4 onward").
    pub fn check_sat(&self, clauses: &ClauseSet, options: &ProveOptions) -> Result<SatResult, FolError> {
        let deadline = Deadline::after(options.config.deadline());
        let ground_config = GroundConfig { max_free_vars: options.config.sat.max_free_vars_for_grounding.value };
        let ground_result = ground::ground(clauses, ground_config);
        match dpll::solve(&ground_result.clauses, deadline)? {
            Some(assignment) => Ok(SatResult { sat: true, model: Some(to_u32_map(&assignment)) }),
            None => Ok(SatResult { sat: false, model: None }),
        }
    }
}

fn to_u32_map(assignment: &std::collections::BTreeMap<i64, bool>) -> std::collections::BTreeMap<u32, bool> {
    assignment.iter().map(|(&k, &v)| (k as u32, v)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn proves_socrates_scenario_via_sat() {
        let premises = vec![
            parse("all x (man(x) -> mortal(x)).").unwrap(),
            parse("man(socrates).").unwrap(),
        ];
        let conclusion = parse("mortal(socrates).").unwrap();
        let engine = SatEngine;
        let result = engine.prove(&premises, &conclusion, &ProveOptions::default()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn proves_non_horn_disjunction_scenario() {
        // Scenario E: all x (P(x) | Q(x)), -P(a) |- Q(a) -- non-Horn, needs the SAT engine.
        let premises = vec![parse("all x (P(x) | Q(x)).").unwrap(), parse("-P(a).").unwrap()];
        let conclusion = parse("Q(a).").unwrap();
        let engine = SatEngine;
        let result = engine.prove(&premises, &conclusion, &ProveOptions::default()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn fails_unrelated_conclusion_with_counterexample_witness() {
        let premises = vec![parse("happy(john).").unwrap()];
        let conclusion = parse("happy(mary).").unwrap();
        let engine = SatEngine;
        let mut options = ProveOptions::default();
        options.verbosity = crate::engines::Verbosity::Detailed;
        let result = engine.prove(&premises, &conclusion, &options).unwrap();
        assert!(!result.success);
        assert_eq!(result.result, crate::engines::ProveOutcome::Failed);
    }

    #[test]
    fn check_sat_reports_unsat_for_contradiction() {
        use crate::clausify::{Clause, Literal};
        use crate::ast::term::Term;
        let clauses = ClauseSet::new(vec![
            Clause::unit(Literal::new("p", vec![Term::constant("a")], false)),
            Clause::unit(Literal::new("p", vec![Term::constant("a")], true)),
        ]);
        let engine = SatEngine;
        let result = engine.check_sat(&clauses, &ProveOptions::default()).unwrap();
        assert!(!result.sat);
    }
}
