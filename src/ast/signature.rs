/*!
[FormulaSignature]: the predicate/function/constant/variable inventory of a set of formulas.

Used to drive congruence/substitution axiom generation (`axioms` module) and finite model
enumeration (`model` module), per spec.md §3.
*/

use super::term::{Formula, Term};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Symbol inventory derived from one or more formula ASTs.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormulaSignature {
    /// Predicate name -> arity. A `BTreeMap` so iteration order (and hence axiom/enumeration
    /// order) is deterministic across runs, which the model finder's isomorphism search and
    /// the Horn engine's congruence-axiom generation both rely on for reproducible output.
    pub predicates: BTreeMap<Arc<str>, usize>,
    pub functions: BTreeMap<Arc<str>, usize>,
    pub constants: BTreeMap<Arc<str>, ()>,
    /// Free (implicitly universal) variable names seen in any formula.
    pub variables: BTreeMap<Arc<str>, ()>,
}

impl FormulaSignature {
    pub fn new() -> Self {
        Self::default()
    }

    /// Extracts the signature of a single formula, merging into `self`.
    pub fn observe(&mut self, formula: &Formula) {
        match formula {
            Formula::Predicate(name, args) => {
                self.note_predicate(name.clone(), args.len());
                for a in args {
                    self.observe_term(a);
                }
            }
            Formula::Equals(l, r) => {
                self.observe_term(l);
                self.observe_term(r);
            }
            Formula::Not(inner) => self.observe(inner),
            Formula::Bin(_, l, r) => {
                self.observe(l);
                self.observe(r);
            }
            Formula::Quant(_, _, body) => self.observe(body),
        }
    }

    fn observe_term(&mut self, term: &Term) {
        match term {
            Term::Variable(name) => {
                self.variables.insert(name.clone(), ());
            }
            Term::Constant(name) => {
                self.constants.insert(name.clone(), ());
            }
            Term::Function(name, args) => {
                self.note_function(name.clone(), args.len());
                for a in args {
                    self.observe_term(a);
                }
            }
        }
    }

    fn note_predicate(&mut self, name: Arc<str>, arity: usize) {
        self.predicates.entry(name).or_insert(arity);
    }

    fn note_function(&mut self, name: Arc<str>, arity: usize) {
        self.functions.entry(name).or_insert(arity);
    }

    /// Extracts the merged signature of a slice of formulas.
    pub fn of(formulas: &[Formula]) -> Self {
        let mut sig = Self::new();
        for f in formulas {
            sig.observe(f);
        }
        sig
    }

    pub fn merge(&mut self, other: &FormulaSignature) {
        for (k, v) in &other.predicates {
            self.predicates.entry(k.clone()).or_insert(*v);
        }
        for (k, v) in &other.functions {
            self.functions.entry(k.clone()).or_insert(*v);
        }
        for k in other.constants.keys() {
            self.constants.insert(k.clone(), ());
        }
        for k in other.variables.keys() {
            self.variables.insert(k.clone(), ());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_predicates_functions_constants() {
        let f = Formula::predicate(
            "p",
            vec![Term::function("f", vec![Term::constant("a")]), Term::var("x")],
        );
        let sig = FormulaSignature::of(&[f]);
        assert_eq!(sig.predicates.get("p").copied(), Some(2));
        assert_eq!(sig.functions.get("f").copied(), Some(1));
        assert!(sig.constants.contains_key("a"));
        assert!(sig.variables.contains_key("x"));
    }
}
