/*!
Standard CNF distribution: push `Or` through `And` until the formula is literally a conjunction
of disjunctions of literals (spec.md §4.3).

The distribution law can blow up exponentially (`(a1&b1)|(a2&b2)|...|(an&bn)` expands to `2^n`
clauses), so every clause produced counts against a node budget; exceeding it raises
[FolError::ClausificationBlowup] rather than letting the call run away. A deadline is polled at
the same points, per the cooperative-cancellation design note in spec.md §9.
*/

use super::clause::{Clause, ClauseSet, Literal};
use crate::ast::term::BinOp;
use crate::ast::Formula;
use crate::types::FolError;
use std::time::Instant;

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

fn check_limits(
    clause_count: usize,
    budget: usize,
    deadline: Option<Instant>,
) -> Result<(), FolError> {
    if clause_count > budget {
        return Err(FolError::ClausificationBlowup { budget, reached: clause_count });
    }
    if let Some(d) = deadline {
        if Instant::now() >= d {
            return Err(FolError::Timeout);
        }
    }
    Ok(())
}

/// Distributes `formula` (already normalised: no `Implies`/`Iff`, `Not` only on atoms, no
/// quantifiers) into a list of clauses, each a `Vec<Literal>`.
fn distribute(
    formula: &Formula,
    budget: usize,
    deadline: Option<Instant>,
) -> Result<Vec<Vec<Literal>>, FolError> {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) | Formula::Not(_) => {
            Ok(vec![vec![atom_to_literal(formula)]])
        }
        Formula::Bin(BinOp::And, l, r) => {
            let mut left = distribute(l, budget, deadline)?;
            let right = distribute(r, budget, deadline)?;
            left.extend(right);
            check_limits(left.len(), budget, deadline)?;
            Ok(left)
        }
        Formula::Bin(BinOp::Or, l, r) => {
            let left = distribute(l, budget, deadline)?;
            let right = distribute(r, budget, deadline)?;
            let mut out = Vec::with_capacity(left.len().saturating_mul(right.len()));
            for lc in &left {
                for rc in &right {
                    check_limits(out.len() + 1, budget, deadline)?;
                    let mut merged = lc.clone();
                    merged.extend(rc.iter().cloned());
                    out.push(merged);
                }
            }
            Ok(out)
        }
        Formula::Bin(BinOp::Implies | BinOp::Iff, ..) => {
            unreachable!("NNF invariant violated: Implies/Iff reached the clausifier")
        }
        Formula::Quant(..) => {
            unreachable!("quantifier reached the clausifier; drop_universals/Skolemise ran first")
        }
    }
}

/// Clausifies `formula` via standard CNF distribution, dropping tautological clauses (a literal
/// and its complement in the same clause contribute nothing to satisfiability).
pub fn to_cnf(formula: &Formula, budget: usize, deadline: Option<Instant>) -> Result<ClauseSet, FolError> {
    let raw = distribute(formula, budget, deadline)?;
    let clauses = raw
        .into_iter()
        .map(Clause::new)
        .filter(|c| !c.is_tautology())
        .collect();
    Ok(ClauseSet::new(clauses))
}
