/*!
Herbrand grounding: turn a (Tseitin-encoded) [ClauseSet] with free variables into ground
propositional clauses over a fresh DIMACS-style variable numbering (spec.md §4.4.3 steps 4-5).

Clauses with more distinct variables than [GroundConfig::max_free_vars] are left uninstantiated —
a pure propositional core cannot use them, so they are simply dropped from the ground output, but
the caller is told this happened (spec.md §9 open question: "treat this as a bounded-Herbrand
approximation and surface a diagnostic when it triggers").
*/

use crate::ast::term::Term;
use crate::clausify::{Clause, ClauseSet, Literal};
use std::collections::BTreeMap;
use std::sync::Arc;

#[derive(Clone, Copy, Debug)]
pub struct GroundConfig {
    pub max_free_vars: usize,
}

impl Default for GroundConfig {
    fn default() -> Self {
        GroundConfig { max_free_vars: 3 }
    }
}

/// A ground clause: a list of signed DIMACS-style variable indices (positive = asserted true).
pub type PropClause = Vec<i64>;

/// The result of grounding: the propositional clauses, the atom <-> variable-index mapping (for
/// decoding a satisfying assignment back into [Literal]s), and whether any clause was left
/// uninstantiated.
#[derive(Clone, Debug, Default)]
pub struct GroundResult {
    pub clauses: Vec<PropClause>,
    /// Canonical ground-atom key -> assigned variable index, in assignment order.
    pub atom_index: BTreeMap<String, i64>,
    /// variable index -> the ground [Literal] (always positive) it denotes, for model decoding.
    pub atoms_by_index: BTreeMap<i64, Literal>,
    /// True if at least one clause had more free variables than the configured cap and was
    /// dropped rather than grounded — the result is then only a sound *approximation* of the
    /// Herbrand base, per spec.md §9.
    pub approximated: bool,
}

struct Grounder {
    next_var: i64,
    atom_index: BTreeMap<String, i64>,
    atoms_by_index: BTreeMap<i64, Literal>,
}

impl Grounder {
    fn var_for(&mut self, literal: &Literal) -> i64 {
        let key = Literal { negated: false, ..literal.clone() }.to_string();
        if let Some(v) = self.atom_index.get(&key) {
            return *v;
        }
        let v = self.next_var;
        self.next_var += 1;
        self.atom_index.insert(key, v);
        self.atoms_by_index.insert(v, Literal { negated: false, ..literal.clone() });
        v
    }

    fn signed(&mut self, literal: &Literal) -> i64 {
        let v = self.var_for(literal);
        if literal.negated {
            -v
        } else {
            v
        }
    }
}

fn collect_constants(clauses: &ClauseSet) -> Vec<Arc<str>> {
    let mut out = Vec::new();
    let mut seen = std::collections::BTreeSet::new();
    for clause in &clauses.clauses {
        for lit in &clause.literals {
            for arg in &lit.args {
                collect_constants_in_term(arg, &mut out, &mut seen);
            }
        }
    }
    out
}

fn collect_constants_in_term(term: &Term, out: &mut Vec<Arc<str>>, seen: &mut std::collections::BTreeSet<Arc<str>>) {
    match term {
        Term::Constant(name) => {
            if seen.insert(name.clone()) {
                out.push(name.clone());
            }
        }
        Term::Function(_, args) => {
            for a in args {
                collect_constants_in_term(a, out, seen);
            }
        }
        Term::Variable(_) => {}
    }
}

fn substitute_term(term: &Term, binding: &BTreeMap<Arc<str>, Arc<str>>) -> Term {
    match term {
        Term::Variable(name) => match binding.get(name) {
            Some(c) => Term::Constant(c.clone()),
            None => term.clone(),
        },
        Term::Constant(_) => term.clone(),
        Term::Function(name, args) => {
            Term::Function(name.clone(), args.iter().map(|a| substitute_term(a, binding)).collect())
        }
    }
}

fn substitute_clause(clause: &Clause, binding: &BTreeMap<Arc<str>, Arc<str>>) -> Clause {
    Clause::new(
        clause
            .literals
            .iter()
            .map(|l| Literal::new(l.predicate.clone(), l.args.iter().map(|a| substitute_term(a, binding)).collect(), l.negated))
            .collect(),
    )
}

/// Enumerates every substitution of `vars` by `constants` (`constants^vars.len()` in total) and
/// calls `f` with each binding map.
fn enumerate_substitutions(vars: &[Arc<str>], constants: &[Arc<str>], f: &mut impl FnMut(&BTreeMap<Arc<str>, Arc<str>>)) {
    fn go(vars: &[Arc<str>], constants: &[Arc<str>], binding: &mut BTreeMap<Arc<str>, Arc<str>>, f: &mut impl FnMut(&BTreeMap<Arc<str>, Arc<str>>)) {
        match vars.split_first() {
            None => f(binding),
            Some((v, rest)) => {
                for c in constants {
                    binding.insert(v.clone(), c.clone());
                    go(rest, constants, binding, f);
                }
                binding.remove(v);
            }
        }
    }
    let mut binding = BTreeMap::new();
    go(vars, constants, &mut binding, f);
}

/// Grounds `clauses` over their Herbrand base (spec.md §4.4.3 steps 4-5).
pub fn ground(clauses: &ClauseSet, config: GroundConfig) -> GroundResult {
    let mut constants = collect_constants(clauses);
    if constants.is_empty() {
        constants.push(Arc::from("c"));
    }

    let mut grounder = Grounder { next_var: 1, atom_index: BTreeMap::new(), atoms_by_index: BTreeMap::new() };
    let mut out = Vec::new();
    let mut approximated = false;

    for clause in &clauses.clauses {
        let vars = clause.free_variables();
        if vars.is_empty() {
            out.push(clause.literals.iter().map(|l| grounder.signed(l)).collect());
            continue;
        }
        if vars.len() > config.max_free_vars {
            approximated = true;
            continue;
        }
        enumerate_substitutions(&vars, &constants, &mut |binding| {
            let ground_clause = substitute_clause(clause, binding);
            out.push(ground_clause.literals.iter().map(|l| grounder.signed(l)).collect());
        });
    }

    GroundResult {
        clauses: out,
        atom_index: grounder.atom_index,
        atoms_by_index: grounder.atoms_by_index,
        approximated,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;

    #[test]
    fn ground_clause_needs_no_enumeration() {
        let clause = Clause::unit(Literal::new("p", vec![Term::constant("a")], false));
        let result = ground(&ClauseSet::new(vec![clause]), GroundConfig::default());
        assert_eq!(result.clauses.len(), 1);
        assert!(!result.approximated);
    }

    #[test]
    fn single_variable_clause_enumerates_over_constants() {
        let clause = Clause::new(vec![
            Literal::new("p", vec![Term::var("x")], false),
            Literal::new("q", vec![Term::constant("a")], false),
        ]);
        let result = ground(&ClauseSet::new(vec![clause]), GroundConfig::default());
        // one constant observed ("a") -> exactly one ground instance
        assert_eq!(result.clauses.len(), 1);
    }

    #[test]
    fn clause_with_no_constants_gets_a_fresh_one() {
        let clause = Clause::unit(Literal::new("p", vec![Term::var("x")], false));
        let result = ground(&ClauseSet::new(vec![clause]), GroundConfig::default());
        assert_eq!(result.clauses.len(), 1);
    }

    #[test]
    fn clause_over_free_var_budget_is_left_unground_and_flagged() {
        let clause = Clause::new(vec![Literal::new(
            "p",
            vec![Term::var("w"), Term::var("x"), Term::var("y"), Term::var("z")],
            false,
        )]);
        let result = ground(&ClauseSet::new(vec![clause]), GroundConfig { max_free_vars: 3 });
        assert!(result.clauses.is_empty());
        assert!(result.approximated);
    }
}
