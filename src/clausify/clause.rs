/*!
[Literal] and [Clause]: the output vocabulary of clausification (spec.md §3).

Equality is represented as an ordinary literal whose predicate name is the reserved symbol
[EQ_PREDICATE] — this keeps [Literal] exactly the `{predicate, args, negated}` shape spec.md §3
names, rather than introducing a separate equality-literal variant, and lets every piece of
downstream code (complementary-literal checks, Horn-ness checks, signature extraction over
clauses) treat equality uniformly with any other predicate.
*/

use crate::ast::subst::{apply_term, Substitution};
use crate::ast::term::Term;
use std::sync::Arc;

/// The reserved predicate name used to represent `Equals` atoms as literals.
pub const EQ_PREDICATE: &str = "=";

/// An atom (predicate or equality) together with a polarity.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Literal {
    pub predicate: Arc<str>,
    pub args: Vec<Term>,
    pub negated: bool,
}

impl Literal {
    pub fn new(predicate: impl Into<Arc<str>>, args: Vec<Term>, negated: bool) -> Self {
        Literal { predicate: predicate.into(), args, negated }
    }

    pub fn eq_atom(left: Term, right: Term, negated: bool) -> Self {
        Literal::new(EQ_PREDICATE, vec![left, right], negated)
    }

    pub fn is_equality(&self) -> bool {
        &*self.predicate == EQ_PREDICATE
    }

    pub fn negate(&self) -> Literal {
        Literal { negated: !self.negated, ..self.clone() }
    }

    /// Two literals are complementary when they share predicate name and argument sequence
    /// (structural term equality) but differ in polarity (spec.md §3).
    pub fn complementary(&self, other: &Literal) -> bool {
        self.predicate == other.predicate && self.args == other.args && self.negated != other.negated
    }

    pub fn same_atom(&self, other: &Literal) -> bool {
        self.predicate == other.predicate && self.args == other.args
    }

    pub fn free_variables(&self) -> Vec<Arc<str>> {
        let mut out = Vec::new();
        for a in &self.args {
            for v in a.free_variables() {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
        }
        out
    }

    /// Applies a term substitution to every argument, used by the Horn engine's unification-driven
    /// resolution to instantiate a clause's literals with the bindings accumulated so far.
    pub fn apply(&self, subst: &Substitution) -> Literal {
        Literal { predicate: self.predicate.clone(), args: self.args.iter().map(|a| apply_term(subst, a)).collect(), negated: self.negated }
    }
}

impl std::fmt::Display for Literal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = if self.negated { "-" } else { "" };
        if self.is_equality() {
            write!(f, "{prefix}{} = {}", self.args[0], self.args[1])
        } else if self.args.is_empty() {
            write!(f, "{prefix}{}", self.predicate)
        } else {
            write!(f, "{prefix}{}({})", self.predicate, self.args.iter().map(|a| a.to_string()).collect::<Vec<_>>().join(","))
        }
    }
}

/// A clause: the disjunction of an ordered multiset of literals. The empty clause is the
/// canonical contradiction (spec.md §3).
#[derive(Clone, Debug, PartialEq, Default)]
pub struct Clause {
    pub literals: Vec<Literal>,
}

impl Clause {
    pub fn new(literals: Vec<Literal>) -> Self {
        Clause { literals }
    }

    pub fn empty() -> Self {
        Clause { literals: Vec::new() }
    }

    pub fn unit(literal: Literal) -> Self {
        Clause { literals: vec![literal] }
    }

    pub fn is_empty(&self) -> bool {
        self.literals.is_empty()
    }

    /// A clause is Horn when it contains at most one positive literal (spec.md §4.4.2).
    pub fn is_horn(&self) -> bool {
        self.literals.iter().filter(|l| !l.negated).count() <= 1
    }

    /// True if the clause contains a literal and its complement, making it a tautology that can
    /// be dropped without affecting satisfiability.
    pub fn is_tautology(&self) -> bool {
        self.literals.iter().any(|l| self.literals.iter().any(|o| l.complementary(o)))
    }

    pub fn free_variables(&self) -> Vec<Arc<str>> {
        let mut out = Vec::new();
        for lit in &self.literals {
            for v in lit.free_variables() {
                if !out.contains(&v) {
                    out.push(v);
                }
            }
        }
        out
    }

    pub fn apply(&self, subst: &Substitution) -> Clause {
        Clause { literals: self.literals.iter().map(|l| l.apply(subst)).collect() }
    }

    /// Renames every free variable in this clause to a fresh name built from `suffix`, so two
    /// uses of the same program clause within one SLD derivation never share a variable
    /// (spec.md §4.2's standardise-apart discipline, applied at resolution time rather than
    /// parse time since a Horn program clause is reused across many resolution steps).
    pub fn rename_apart(&self, suffix: &str) -> Clause {
        let mut subst = Substitution::new();
        for v in self.free_variables() {
            subst.insert(v.clone(), Term::var(format!("{v}{suffix}")));
        }
        self.apply(&subst)
    }
}

impl std::fmt::Display for Clause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.literals.is_empty() {
            return write!(f, "\u{22a5}");
        }
        write!(f, "{}", self.literals.iter().map(|l| l.to_string()).collect::<Vec<_>>().join(" | "))
    }
}

/// A set of clauses produced by clausification.
#[derive(Clone, Debug, Default)]
pub struct ClauseSet {
    pub clauses: Vec<Clause>,
}

impl ClauseSet {
    pub fn new(clauses: Vec<Clause>) -> Self {
        ClauseSet { clauses }
    }

    pub fn is_horn(&self) -> bool {
        self.clauses.iter().all(Clause::is_horn)
    }

    pub fn extend(&mut self, other: ClauseSet) {
        self.clauses.extend(other.clauses);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn complementary_literals_differ_only_in_polarity() {
        let p = Literal::new("p", vec![Term::constant("a")], false);
        let not_p = Literal::new("p", vec![Term::constant("a")], true);
        assert!(p.complementary(&not_p));
        assert!(!p.complementary(&p));
    }

    #[test]
    fn horn_clause_has_at_most_one_positive_literal() {
        let horn = Clause::new(vec![
            Literal::new("p", vec![], true),
            Literal::new("q", vec![], false),
        ]);
        assert!(horn.is_horn());

        let non_horn = Clause::new(vec![Literal::new("p", vec![], false), Literal::new("q", vec![], false)]);
        assert!(!non_horn.is_horn());
    }
}
