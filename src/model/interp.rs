/*!
[Model]: a finite interpretation over domain `0..n-1` (spec.md §3 `Model`), plus the structural
evaluator that decides whether a [Formula] holds in one.

Unlike [crate::clausify], the model finder works directly on unnormalised formulas — a premise
handed to `findModel` still has its `Implies`/`Iff`/`Forall`/`Exists` nodes, since the whole point
is to interpret the formula's quantifiers against a concrete finite domain rather than Skolemise
them away.
*/

use crate::ast::term::{BinOp, Quantifier, Term};
use crate::ast::Formula;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// A total table from argument tuples to a domain element, for one function symbol.
pub type FunctionTable = BTreeMap<Vec<usize>, usize>;

/// The set of argument tuples at which a predicate holds.
pub type PredicateExtension = BTreeSet<Vec<usize>>;

/// A finite interpretation: a domain `0..domain_size-1` plus total interpretations of every
/// constant, function, and predicate symbol observed in the input formulas (spec.md §3 `Model`).
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub struct Model {
    pub domain_size: usize,
    pub constants: BTreeMap<Arc<str>, usize>,
    pub functions: BTreeMap<Arc<str>, FunctionTable>,
    pub predicates: BTreeMap<Arc<str>, PredicateExtension>,
}

impl Model {
    /// The domain as an explicit `Vec<usize>`, `0..domain_size`.
    pub fn domain(&self) -> Vec<usize> {
        (0..self.domain_size).collect()
    }

    /// The value of `term` under `assignment` in this model. An uninterpreted function (absent
    /// from [Model::functions], or missing the specific argument tuple) denotes `0` rather than
    /// failing — spec.md §4.5 "Evaluation semantics": "uninterpreted functions return 0 when not
    /// provided (callers are expected to enumerate them)".
    pub fn eval_term(&self, term: &Term, assignment: &BTreeMap<Arc<str>, usize>) -> usize {
        match term {
            Term::Variable(name) => assignment.get(name).copied().unwrap_or(0),
            Term::Constant(name) => self.constants.get(name).copied().unwrap_or(0),
            Term::Function(name, args) => {
                let values: Vec<usize> = args.iter().map(|a| self.eval_term(a, assignment)).collect();
                self.functions.get(name).and_then(|table| table.get(&values)).copied().unwrap_or(0)
            }
        }
    }

    /// Evaluates `formula` against this model under `assignment` for any free variables (spec.md
    /// §4.5 step d: "universals fold over the domain; existentials fold; atoms consult the
    /// predicate extension; equality compares domain integers").
    pub fn eval(&self, formula: &Formula, assignment: &BTreeMap<Arc<str>, usize>) -> bool {
        match formula {
            Formula::Predicate(name, args) => {
                let values: Vec<usize> = args.iter().map(|a| self.eval_term(a, assignment)).collect();
                self.predicates.get(name).map(|ext| ext.contains(&values)).unwrap_or(false)
            }
            Formula::Equals(l, r) => self.eval_term(l, assignment) == self.eval_term(r, assignment),
            Formula::Not(inner) => !self.eval(inner, assignment),
            Formula::Bin(BinOp::And, l, r) => self.eval(l, assignment) && self.eval(r, assignment),
            Formula::Bin(BinOp::Or, l, r) => self.eval(l, assignment) || self.eval(r, assignment),
            Formula::Bin(BinOp::Implies, l, r) => !self.eval(l, assignment) || self.eval(r, assignment),
            Formula::Bin(BinOp::Iff, l, r) => self.eval(l, assignment) == self.eval(r, assignment),
            Formula::Quant(Quantifier::Forall, var, body) => (0..self.domain_size).all(|value| {
                let mut extended = assignment.clone();
                extended.insert(var.clone(), value);
                self.eval(body, &extended)
            }),
            Formula::Quant(Quantifier::Exists, var, body) => (0..self.domain_size).any(|value| {
                let mut extended = assignment.clone();
                extended.insert(var.clone(), value);
                self.eval(body, &extended)
            }),
        }
    }

    /// Whether `formula` holds under the empty assignment (every free variable is implicitly
    /// universal, so it is existentially checked over every value the way [Formula::Quant]'s
    /// Forall branch does — spec.md §4.1 "any free variable becomes a universally-implicit
    /// variable").
    pub fn satisfies(&self, formula: &Formula) -> bool {
        let free = free_variables(formula);
        if free.is_empty() {
            return self.eval(formula, &BTreeMap::new());
        }
        self.satisfies_with_free(formula, &free, &mut BTreeMap::new())
    }

    fn satisfies_with_free(&self, formula: &Formula, free: &[Arc<str>], assignment: &mut BTreeMap<Arc<str>, usize>) -> bool {
        match free.split_first() {
            None => self.eval(formula, assignment),
            Some((v, rest)) => (0..self.domain_size).all(|value| {
                assignment.insert(v.clone(), value);
                let holds = self.satisfies_with_free(formula, rest, assignment);
                assignment.remove(v);
                holds
            }),
        }
    }

    /// Renders the canonical model string (spec.md §6): domain size/line, constants, functions,
    /// predicates, each tuple comma-joined.
    pub fn to_canonical_string(&self) -> String {
        let mut out = String::new();
        out.push_str(&format!("Domain size: {}\n", self.domain_size));
        out.push_str(&format!(
            "Domain: {{{}}}\n",
            (0..self.domain_size).map(|i| i.to_string()).collect::<Vec<_>>().join(",")
        ));
        out.push_str("Constants:\n");
        for (name, value) in &self.constants {
            out.push_str(&format!("{name} = {value}\n"));
        }
        out.push_str("Functions:\n");
        for (name, table) in &self.functions {
            let entries: Vec<String> = table
                .iter()
                .map(|(args, value)| format!("({})->{value}", args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(",")))
                .collect();
            out.push_str(&format!("{name}: {{{}}}\n", entries.join(", ")));
        }
        out.push_str("Predicates:\n");
        for (name, ext) in &self.predicates {
            let entries: Vec<String> =
                ext.iter().map(|args| format!("({})", args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(","))).collect();
            out.push_str(&format!("{name}: {{{}}}\n", entries.join(", ")));
        }
        out
    }
}

fn free_variables(formula: &Formula) -> Vec<Arc<str>> {
    let mut out = Vec::new();
    collect_free(formula, &mut Vec::new(), &mut out);
    out
}

fn collect_free(formula: &Formula, bound: &mut Vec<Arc<str>>, out: &mut Vec<Arc<str>>) {
    match formula {
        Formula::Predicate(_, args) => {
            for a in args {
                collect_free_term(a, bound, out);
            }
        }
        Formula::Equals(l, r) => {
            collect_free_term(l, bound, out);
            collect_free_term(r, bound, out);
        }
        Formula::Not(inner) => collect_free(inner, bound, out),
        Formula::Bin(_, l, r) => {
            collect_free(l, bound, out);
            collect_free(r, bound, out);
        }
        Formula::Quant(_, var, body) => {
            bound.push(var.clone());
            collect_free(body, bound, out);
            bound.pop();
        }
    }
}

fn collect_free_term(term: &Term, bound: &[Arc<str>], out: &mut Vec<Arc<str>>) {
    match term {
        Term::Variable(name) => {
            if !bound.contains(name) && !out.contains(name) {
                out.push(name.clone());
            }
        }
        Term::Constant(_) => {}
        Term::Function(_, args) => {
            for a in args {
                collect_free_term(a, bound, out);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_model() -> Model {
        let mut predicates = BTreeMap::new();
        predicates.insert(Arc::from("P"), BTreeSet::from([vec![0]]));
        let mut constants = BTreeMap::new();
        constants.insert(Arc::from("a"), 0);
        Model { domain_size: 2, constants, functions: BTreeMap::new(), predicates }
    }

    #[test]
    fn evaluates_unary_predicate_over_constant() {
        let model = sample_model();
        let f = Formula::predicate("P", vec![Term::constant("a")]);
        assert!(model.satisfies(&f));
    }

    #[test]
    fn universal_quantifier_folds_over_domain() {
        let model = sample_model();
        let f = Formula::forall("x", Formula::predicate("P", vec![Term::var("x")]));
        assert!(!model.satisfies(&f)); // P only holds at 0, not at 1
    }

    #[test]
    fn existential_quantifier_finds_a_witness() {
        let model = sample_model();
        let f = Formula::exists("x", Formula::predicate("P", vec![Term::var("x")]));
        assert!(model.satisfies(&f));
    }

    #[test]
    fn canonical_string_matches_spec_layout() {
        let model = sample_model();
        let s = model.to_canonical_string();
        assert!(s.starts_with("Domain size: 2\n"));
        assert!(s.contains("Constants:\na = 0\n"));
        assert!(s.contains("Predicates:\nP: {(0)}\n"));
    }
}
