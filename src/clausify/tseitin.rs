/*!
Tseitin encoding: introduce one fresh predicate per compound subformula instead of distributing
`Or` over `And`, trading exponential blowup for linear growth at the cost of extra predicate
symbols (spec.md §4.3). Atoms (including negated atoms) are not given a fresh name — there is
nothing to gain by naming a literal that is already a literal.

For a subformula `s` with fresh name `p(free(s))`, the definitional clauses assert `p <-> s`
(split into its two directions as ordinary clauses); the caller adds one more unit clause
asserting the root's literal true, making the whole encoding equisatisfiable with (not
equivalent to) the input — a fresh model can freely choose any truth value for `p` that is
consistent with `s`, which is exactly what satisfiability only cares about.
*/

use super::clause::{Clause, ClauseSet, Literal};
use crate::ast::term::{BinOp, Term};
use crate::ast::Formula;
use crate::types::FolError;
use std::sync::Arc;
use std::time::Instant;

const TSEITIN_PREFIX: &str = "_tseitin_";

fn atom_to_literal(formula: &Formula) -> Literal {
    match formula {
        Formula::Predicate(name, args) => Literal::new(name.clone(), args.clone(), false),
        Formula::Equals(l, r) => Literal::eq_atom(l.clone(), r.clone(), false),
        Formula::Not(inner) => match inner.as_ref() {
            Formula::Predicate(name, args) => Literal::new(name.clone(), args.clone(), true),
            Formula::Equals(l, r) => Literal::eq_atom(l.clone(), r.clone(), true),
            other => unreachable!("NNF invariant violated: Not wraps non-atom {other:?}"),
        },
        other => unreachable!("atom_to_literal called on non-atom {other:?}"),
    }
}

fn free_variables(formula: &Formula) -> Vec<Arc<str>> {
    let mut out = Vec::new();
    collect(formula, &mut out);
    out
}

fn collect(formula: &Formula, out: &mut Vec<Arc<str>>) {
    let mut push_term = |t: &Term, out: &mut Vec<Arc<str>>| {
        for v in t.free_variables() {
            if !out.contains(&v) {
                out.push(v);
            }
        }
    };
    match formula {
        Formula::Predicate(_, args) => {
            for a in args {
                push_term(a, out);
            }
        }
        Formula::Equals(l, r) => {
            push_term(l, out);
            push_term(r, out);
        }
        Formula::Not(inner) => collect(inner, out),
        Formula::Bin(_, l, r) => {
            collect(l, out);
            collect(r, out);
        }
        Formula::Quant(_, _, body) => collect(body, out),
    }
}

struct TseitinCtx {
    counter: u64,
    clauses: Vec<Clause>,
    predicates_introduced: usize,
}

impl TseitinCtx {
    fn fresh(&mut self, free: &[Arc<str>]) -> Literal {
        let name: Arc<str> = Arc::from(format!("{TSEITIN_PREFIX}{}", self.counter));
        self.counter += 1;
        self.predicates_introduced += 1;
        let args = free.iter().cloned().map(Term::Variable).collect();
        Literal::new(name, args, false)
    }

    fn encode(&mut self, formula: &Formula, budget: usize, deadline: Option<Instant>) -> Result<Literal, FolError> {
        if let Some(d) = deadline {
            if Instant::now() >= d {
                return Err(FolError::Timeout);
            }
        }
        match formula {
            Formula::Predicate(..) | Formula::Equals(..) | Formula::Not(_) => Ok(atom_to_literal(formula)),
            Formula::Bin(BinOp::And, l, r) => {
                let lit_l = self.encode(l, budget, deadline)?;
                let lit_r = self.encode(r, budget, deadline)?;
                let free = free_variables(formula);
                let p = self.fresh(&free);
                self.push(Clause::new(vec![p.negate(), lit_l.clone()]), budget)?;
                self.push(Clause::new(vec![p.negate(), lit_r.clone()]), budget)?;
                self.push(Clause::new(vec![lit_l.negate(), lit_r.negate(), p.clone()]), budget)?;
                Ok(p)
            }
            Formula::Bin(BinOp::Or, l, r) => {
                let lit_l = self.encode(l, budget, deadline)?;
                let lit_r = self.encode(r, budget, deadline)?;
                let free = free_variables(formula);
                let p = self.fresh(&free);
                self.push(Clause::new(vec![p.negate(), lit_l.clone(), lit_r.clone()]), budget)?;
                self.push(Clause::new(vec![lit_l.negate(), p.clone()]), budget)?;
                self.push(Clause::new(vec![lit_r.negate(), p.clone()]), budget)?;
                Ok(p)
            }
            Formula::Bin(BinOp::Implies | BinOp::Iff, ..) => {
                unreachable!("NNF invariant violated: Implies/Iff reached the clausifier")
            }
            Formula::Quant(..) => {
                unreachable!("quantifier reached the clausifier; drop_universals/Skolemise ran first")
            }
        }
    }

    fn push(&mut self, clause: Clause, budget: usize) -> Result<(), FolError> {
        self.clauses.push(clause);
        if self.clauses.len() > budget {
            return Err(FolError::ClausificationBlowup { budget, reached: self.clauses.len() });
        }
        Ok(())
    }
}

/// Clausifies `formula` via Tseitin encoding. Returns the definitional clauses plus a unit
/// clause asserting the root subformula's fresh literal, and the count of predicates introduced
/// (surfaced via `ClausifyStats`).
pub fn to_cnf(
    formula: &Formula,
    budget: usize,
    deadline: Option<Instant>,
) -> Result<(ClauseSet, usize), FolError> {
    let mut ctx = TseitinCtx { counter: 0, clauses: Vec::new(), predicates_introduced: 0 };
    let root = ctx.encode(formula, budget, deadline)?;
    ctx.push(Clause::unit(root), budget)?;
    Ok((ClauseSet::new(ctx.clauses), ctx.predicates_introduced))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;

    #[test]
    fn conjunction_introduces_one_fresh_predicate() {
        let f = Formula::and(Formula::predicate("p", vec![]), Formula::predicate("q", vec![]));
        let (cs, introduced) = to_cnf(&f, 1000, None).unwrap();
        assert_eq!(introduced, 1);
        // 3 definitional clauses + 1 unit assertion of the root.
        assert_eq!(cs.clauses.len(), 4);
    }

    #[test]
    fn growth_is_linear_not_exponential_in_disjunct_count() {
        // A chain of n nested Or/And alternations distributes to O(2^n) clauses under standard
        // CNF; Tseitin keeps it to O(n).
        let mut f = Formula::and(Formula::predicate("a0", vec![]), Formula::predicate("b0", vec![]));
        for i in 1..12 {
            let conj = Formula::and(
                Formula::predicate(format!("a{i}"), vec![]),
                Formula::predicate(format!("b{i}"), vec![]),
            );
            f = Formula::or(f, conj);
        }
        let (cs, _) = to_cnf(&f, 200, None).unwrap();
        assert!(cs.clauses.len() < 200);
    }

    #[test]
    fn fresh_predicate_carries_free_variables_of_its_subformula() {
        let f = Formula::and(
            Formula::predicate("p", vec![Term::var("x")]),
            Formula::predicate("q", vec![Term::var("y")]),
        );
        let (cs, _) = to_cnf(&f, 1000, None).unwrap();
        let unit = cs.clauses.last().unwrap();
        assert_eq!(unit.literals.len(), 1);
        let mut vars = unit.literals[0].free_variables();
        vars.sort();
        assert_eq!(vars, vec![Arc::from("x"), Arc::from("y")]);
    }
}
