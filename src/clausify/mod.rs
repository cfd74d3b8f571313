//! Clausification: turn a (possibly unnormalised) formula into a [ClauseSet], via either
//! standard CNF distribution or Tseitin encoding (spec.md §4.3, operation `clausify` in §6).

mod clause;
mod cnf;
mod tseitin;

pub use clause::{Clause, ClauseSet, Literal, EQ_PREDICATE};

use crate::ast::visitor::node_count;
use crate::ast::Formula;
use crate::normalize::{normalize, SkolemEnv};
use crate::types::FolError;
use std::time::Instant;

/// Which clausification strategy to use (spec.md §6 `clausify(..., {strategy})`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Strategy {
    Standard,
    Tseitin,
}

/// Counters reported alongside a clausification result (SPEC_FULL.md ambient-stack addition:
/// the clausifier exposes internal counters the way the teacher's solver reports its own).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ClausifyStats {
    /// Number of clauses in the produced [ClauseSet].
    pub clauses_produced: usize,
    /// Node-budget units consumed (standard: clauses emitted during distribution; Tseitin:
    /// definitional clauses emitted).
    pub node_count_reached: usize,
    /// Number of fresh `_tseitin_k` predicates introduced; always 0 for [Strategy::Standard].
    pub tseitin_predicates_introduced: usize,
}

/// Clausifies `formula` under `strategy`, normalising it first against `env` so Skolem symbol
/// identity is consistent with whatever else has been clausified against the same `env`
/// (spec.md §9). `budget` bounds clause-count blowup; `deadline`, if given, is polled throughout.
pub fn clausify(
    formula: &Formula,
    strategy: Strategy,
    budget: usize,
    deadline: Option<Instant>,
    env: &mut SkolemEnv,
) -> Result<(ClauseSet, ClausifyStats), FolError> {
    let normalized = normalize(formula, env);
    let input_nodes = node_count(&normalized);

    match strategy {
        Strategy::Standard => {
            let clause_set = cnf::to_cnf(&normalized, budget, deadline)?;
            let stats = ClausifyStats {
                clauses_produced: clause_set.clauses.len(),
                node_count_reached: input_nodes.max(clause_set.clauses.len()),
                tseitin_predicates_introduced: 0,
            };
            Ok((clause_set, stats))
        }
        Strategy::Tseitin => {
            let (clause_set, introduced) = tseitin::to_cnf(&normalized, budget, deadline)?;
            let stats = ClausifyStats {
                clauses_produced: clause_set.clauses.len(),
                node_count_reached: input_nodes.max(clause_set.clauses.len()),
                tseitin_predicates_introduced: introduced,
            };
            Ok((clause_set, stats))
        }
    }
}

/// Clausifies a conjunction of already-normalised premises sharing one [SkolemEnv], merging the
/// resulting clause sets. Used by engines that need one `ClauseSet` per whole premise set rather
/// than one call per formula.
pub fn clausify_all(
    formulas: &[Formula],
    strategy: Strategy,
    budget: usize,
    deadline: Option<Instant>,
    env: &mut SkolemEnv,
) -> Result<(ClauseSet, ClausifyStats), FolError> {
    let mut merged = ClauseSet::default();
    let mut stats = ClausifyStats::default();
    for f in formulas {
        let (cs, s) = clausify(f, strategy, budget, deadline, env)?;
        stats.clauses_produced += s.clauses_produced;
        stats.node_count_reached = stats.node_count_reached.max(s.node_count_reached);
        stats.tseitin_predicates_introduced += s.tseitin_predicates_introduced;
        merged.extend(cs);
        if merged.clauses.len() > budget {
            return Err(FolError::ClausificationBlowup { budget, reached: merged.clauses.len() });
        }
    }
    Ok((merged, stats))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;
    use crate::parser::parse;

    #[test]
    fn clausifies_horn_implication_to_two_literal_clause() {
        let f = parse("all x (man(x) -> mortal(x)).").unwrap();
        let mut env = SkolemEnv::new();
        let (cs, stats) = clausify(&f, Strategy::Standard, 1000, None, &mut env).unwrap();
        assert_eq!(cs.clauses.len(), 1);
        assert_eq!(cs.clauses[0].literals.len(), 2);
        assert!(cs.is_horn());
        assert_eq!(stats.tseitin_predicates_introduced, 0);
    }

    #[test]
    fn non_horn_premise_is_not_horn_after_clausification() {
        let f = parse("all x (P(x) | Q(x)).").unwrap();
        let mut env = SkolemEnv::new();
        let (cs, _) = clausify(&f, Strategy::Standard, 1000, None, &mut env).unwrap();
        assert_eq!(cs.clauses.len(), 1);
        assert!(!cs.is_horn());
    }

    #[test]
    fn existential_premise_introduces_skolem_constant_in_clause() {
        let f = Formula::exists("x", Formula::predicate("p", vec![Term::var("x")]));
        let mut env = SkolemEnv::new();
        let (cs, _) = clausify(&f, Strategy::Standard, 1000, None, &mut env).unwrap();
        assert_eq!(cs.clauses.len(), 1);
        assert!(matches!(cs.clauses[0].literals[0].args[0], Term::Constant(_)));
    }

    #[test]
    fn strategies_agree_on_satisfiability_of_a_simple_conjunction() {
        let f = parse("p(a) & q(a).").unwrap();
        let mut env = SkolemEnv::new();
        let (standard, _) = clausify(&f, Strategy::Standard, 1000, None, &mut env.clone()).unwrap();
        let (tseitin, _) = clausify(&f, Strategy::Tseitin, 1000, None, &mut env).unwrap();
        assert_eq!(standard.clauses.len(), 2);
        assert!(!tseitin.clauses.is_empty());
    }
}
