//! The Horn-clause engine: SLD resolution over a Prolog-like program compiled from Horn clauses
//! (spec.md §4.4.2).

mod sld;
mod translate;
mod unify;

pub use sld::SldConfig;
pub use translate::{HornClause, HornProgram};

use crate::ast::signature::FormulaSignature;
use crate::ast::term::{Quantifier, Term};
use crate::ast::Formula;
use crate::axioms::equality_theory;
use crate::clausify::{clausify, ClauseSet, Literal, Strategy};
use crate::engines::{Deadline, EngineCapabilities, ProveOptions, ProveResult, ProveStatistics, SatResult};
use crate::normalize::SkolemEnv;
use crate::types::FolError;
use std::time::Instant;

/// `horn`, `equality`, `arithmetic` — Horn resolution cannot handle arbitrary FOL (non-Horn
/// clauses) or streaming/incremental solves beyond session-level assert/rebuild.
pub const CAPABILITIES: EngineCapabilities =
    EngineCapabilities { horn: true, full_fol: false, equality: true, arithmetic: true, streaming: false };

/// Splits a top-level conjunction into its conjuncts (used to decompose a goal formula into
/// separate goal atoms, and premises into separately-clausifiable formulas).
fn flatten_conjunction(formula: &Formula, out: &mut Vec<Formula>) {
    match formula {
        Formula::Bin(crate::ast::term::BinOp::And, l, r) => {
            flatten_conjunction(l, out);
            flatten_conjunction(r, out);
        }
        other => out.push(other.clone()),
    }
}

fn contains_forall(formula: &Formula) -> bool {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => false,
        Formula::Not(inner) => contains_forall(inner),
        Formula::Bin(_, l, r) => contains_forall(l) || contains_forall(r),
        Formula::Quant(Quantifier::Forall, ..) => true,
        Formula::Quant(Quantifier::Exists, _, body) => contains_forall(body),
    }
}

/// Strips leading `exists` wrappers from a goal formula — existential goal variables become
/// ordinary logic variables for SLD to bind (spec.md §4.4.2), the refutation-via-Skolemisation
/// route being the SAT engine's job, not this engine's.
fn strip_existentials(formula: &Formula) -> &Formula {
    match formula {
        Formula::Quant(Quantifier::Exists, _, body) => strip_existentials(body),
        other => other,
    }
}

fn goal_literal(formula: &Formula) -> Result<Literal, FolError> {
    match formula {
        Formula::Predicate(name, args) => Ok(Literal::new(name.clone(), args.clone(), false)),
        Formula::Equals(l, r) => Ok(Literal::eq_atom(l.clone(), r.clone(), false)),
        other => Err(FolError::ClausificationFailed(format!(
            "Horn engine goals must be a conjunction of atoms, found {other}"
        ))),
    }
}

fn observe_term_in_signature(sig: &mut FormulaSignature, term: &Term) {
    match term {
        Term::Variable(name) => {
            sig.variables.insert(name.clone(), ());
        }
        Term::Constant(name) => {
            sig.constants.insert(name.clone(), ());
        }
        Term::Function(name, args) => {
            sig.functions.entry(name.clone()).or_insert(args.len());
            for a in args {
                observe_term_in_signature(sig, a);
            }
        }
    }
}

/// Builds a [FormulaSignature] directly from an already-clausified [ClauseSet] — used by
/// [HornEngine::check_sat], which (unlike [HornEngine::prove]) only ever sees clauses, not the
/// source [Formula]s they came from.
fn signature_of_clauses(clauses: &ClauseSet) -> FormulaSignature {
    let mut sig = FormulaSignature::new();
    for clause in &clauses.clauses {
        for lit in &clause.literals {
            if !lit.is_equality() {
                sig.predicates.entry(lit.predicate.clone()).or_insert(lit.args.len());
            }
            for arg in &lit.args {
                observe_term_in_signature(&mut sig, arg);
            }
        }
    }
    sig
}

/// Clausifies the equality theory (spec.md §4.3 "Equality handling", §4.4.2) over `sig` and
/// appends the resulting clauses to `clauses`, sharing `env` so any Skolem identity stays
/// consistent with the rest of the clausification (the equality axioms are quantifier-free and
/// never introduce a Skolem symbol, but sharing the counter costs nothing and keeps every
/// clausification call in this engine going through the same env).
fn inject_equality_theory(
    clauses: &mut ClauseSet,
    sig: &FormulaSignature,
    node_budget: usize,
    env: &mut SkolemEnv,
) -> Result<(), FolError> {
    for axiom in equality_theory(sig) {
        let (cs, _) = clausify(&axiom, Strategy::Standard, node_budget, None, env)?;
        clauses.extend(cs);
    }
    Ok(())
}

/// The Horn-clause reasoning engine.
#[derive(Clone, Copy, Debug, Default)]
pub struct HornEngine;

impl HornEngine {
    pub fn capabilities(&self) -> EngineCapabilities {
        CAPABILITIES
    }

    /// Clausifies `premises` (sharing one [SkolemEnv]) and attempts to prove `conclusion` by SLD
    /// resolution (spec.md §4.4.2). Returns [FolError::NonHorn] if any premise clause is not
    /// Horn, or [FolError::UniversalGoal] if `conclusion` contains a universal quantifier — both
    /// signal the manager to fall through to the SAT engine.
    pub fn prove(
        &self,
        premises: &[Formula],
        conclusion: &Formula,
        options: &ProveOptions,
    ) -> Result<ProveResult, FolError> {
        let start = Instant::now();
        if contains_forall(conclusion) {
            return Err(FolError::UniversalGoal);
        }

        let mut env = SkolemEnv::new();
        let node_budget = 50_000;
        let mut clauses = ClauseSet::default();
        for premise in premises {
            let (cs, _) = clausify(premise, Strategy::Standard, node_budget, None, &mut env)?;
            clauses.extend(cs);
        }

        if options.config.enable_equality {
            let mut sig = FormulaSignature::of(premises);
            sig.observe(conclusion);
            inject_equality_theory(&mut clauses, &sig, node_budget, &mut env)?;
        }

        let program = translate::translate(&clauses)?;

        let goal_formula = strip_existentials(conclusion);
        let mut goal_atoms = Vec::new();
        flatten_conjunction(goal_formula, &mut goal_atoms);
        let goal: Vec<Literal> = goal_atoms.iter().map(goal_literal).collect::<Result<_, _>>()?;

        let deadline = Deadline::after(options.config.deadline());
        let config = SldConfig {
            max_inferences: options.config.max_inferences.value,
            equality_depth: options.config.horn.equality_depth.value,
            enable_equality: options.config.enable_equality,
            enable_arithmetic: options.config.enable_arithmetic,
        };

        let clause_count = program.clauses.len();
        let outcome = sld::prove_goal(&program, &goal, config, deadline);
        let inferences = match &outcome {
            Ok(run) => Some(run.inferences),
            Err(_) => None,
        };
        let stats = ProveStatistics {
            time_ms: start.elapsed().as_millis() as u64,
            inferences,
            clauses: Some(clause_count),
            variables: None,
        };

        let result = match outcome {
            Ok(sld::SldOutcome { bindings: Some(bindings), .. }) => {
                let mut result = ProveResult::proved("horn", stats);
                let mut map = std::collections::BTreeMap::new();
                for var in goal.iter().flat_map(Literal::free_variables) {
                    if let Some(t) = bindings.get(&var) {
                        map.insert(var, t.clone());
                    }
                }
                if !map.is_empty() {
                    result.bindings = Some(map);
                }
                result
            }
            Ok(sld::SldOutcome { bindings: None, .. }) => ProveResult::failed("horn", stats),
            Err(FolError::Timeout) => ProveResult::timeout("horn", stats),
            Err(e) => return Err(e),
        };
        Ok(result.at_verbosity(options.verbosity))
    }

    /// A definite Horn program (no integrity constraints) is always satisfiable under its least
    /// Herbrand model; `check_sat` only needs to check whether any constraint clause (head =
    /// `None`) is derivable from the rest.
    pub fn check_sat(&self, clauses: &ClauseSet, options: &ProveOptions) -> Result<SatResult, FolError> {
        let mut clauses = clauses.clone();
        if options.config.enable_equality {
            let sig = signature_of_clauses(&clauses);
            let node_budget = 50_000;
            let mut env = SkolemEnv::new();
            inject_equality_theory(&mut clauses, &sig, node_budget, &mut env)?;
        }

        let program = translate::translate(&clauses)?;
        let (constraints, rules): (Vec<_>, Vec<_>) =
            program.clauses.iter().cloned().partition(|c| c.head.is_none());
        if constraints.is_empty() {
            return Ok(SatResult { sat: true, model: None });
        }
        let rule_program = HornProgram { clauses: rules };
        let deadline = Deadline::after(options.config.deadline());
        let config = SldConfig {
            max_inferences: options.config.max_inferences.value,
            equality_depth: options.config.horn.equality_depth.value,
            enable_equality: options.config.enable_equality,
            enable_arithmetic: options.config.enable_arithmetic,
        };
        for constraint in &constraints {
            if sld::prove_goal(&rule_program, &constraint.body, config, deadline)?.bindings.is_some() {
                return Ok(SatResult { sat: false, model: None });
            }
        }
        Ok(SatResult { sat: true, model: None })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    #[test]
    fn proves_socrates_scenario() {
        let premises = vec![
            parse("all x (man(x) -> mortal(x)).").unwrap(),
            parse("man(socrates).").unwrap(),
        ];
        let conclusion = parse("mortal(socrates).").unwrap();
        let engine = HornEngine;
        let result = engine.prove(&premises, &conclusion, &ProveOptions::default()).unwrap();
        assert!(result.success);
    }

    #[test]
    fn universal_goal_is_rejected() {
        let premises = vec![parse("man(socrates).").unwrap()];
        let conclusion = parse("all x mortal(x).").unwrap();
        let engine = HornEngine;
        let err = engine.prove(&premises, &conclusion, &ProveOptions::default()).unwrap_err();
        assert_eq!(err, FolError::UniversalGoal);
    }

    #[test]
    fn non_horn_premise_is_rejected() {
        let premises = vec![parse("all x (P(x) | Q(x)).").unwrap()];
        let conclusion = parse("Q(a).").unwrap();
        let engine = HornEngine;
        let err = engine.prove(&premises, &conclusion, &ProveOptions::default()).unwrap_err();
        assert_eq!(err, FolError::NonHorn);
    }
}
