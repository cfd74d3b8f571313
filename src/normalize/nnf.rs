/*!
Negation normal form: eliminate `implies`/`iff`, then push `not` down to atoms via De Morgan and
quantifier duality (spec.md §4.2 step 1).
*/

use crate::ast::term::{BinOp, Quantifier};
use crate::ast::Formula;

/// Rewrites `formula` to NNF. Postconditions (spec.md §8 property 2, checked by
/// [crate::ast::visitor::free_of_implies_iff] and [crate::ast::visitor::negations_on_atoms_only]
/// in this module's tests): no `Implies`/`Iff` node remains, and every `Not` wraps an atom.
pub fn to_nnf(formula: &Formula) -> Formula {
    nnf_inner(&eliminate_connectives(formula))
}

/// Step one of two: rewrite away `Implies`/`Iff`, leaving `Not` possibly deep in the tree.
fn eliminate_connectives(formula: &Formula) -> Formula {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => formula.clone(),
        Formula::Not(inner) => Formula::not(eliminate_connectives(inner)),
        Formula::Bin(BinOp::And, l, r) => {
            Formula::and(eliminate_connectives(l), eliminate_connectives(r))
        }
        Formula::Bin(BinOp::Or, l, r) => {
            Formula::or(eliminate_connectives(l), eliminate_connectives(r))
        }
        Formula::Bin(BinOp::Implies, l, r) => {
            // p -> q  ==  -p | q
            Formula::or(Formula::not(eliminate_connectives(l)), eliminate_connectives(r))
        }
        Formula::Bin(BinOp::Iff, l, r) => {
            // p <-> q  ==  (-p | q) & (p | -q)
            let l2 = eliminate_connectives(l);
            let r2 = eliminate_connectives(r);
            Formula::and(
                Formula::or(Formula::not(l2.clone()), r2.clone()),
                Formula::or(l2, Formula::not(r2)),
            )
        }
        Formula::Quant(q, var, body) => Formula::Quant(*q, var.clone(), Box::new(eliminate_connectives(body))),
    }
}

/// Pushes negation inward through a formula already free of `Implies`/`Iff`. Called with
/// `negate = true` at the root of a `Not` node; returns the formula as if `Not` were applied to
/// it, recursively distributing through De Morgan's laws and quantifier duality.
fn push_not(formula: &Formula) -> Formula {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => Formula::not(formula.clone()),
        // `formula` is already in NNF, so the only way it can itself be `Not(inner)` is as the
        // atom-negation produced by a prior `push_not` call — i.e. `inner` is an atom and
        // already fully normalised, so double negation simply cancels.
        Formula::Not(inner) => (**inner).clone(),
        Formula::Bin(BinOp::And, l, r) => Formula::or(push_not(l), push_not(r)),
        Formula::Bin(BinOp::Or, l, r) => Formula::and(push_not(l), push_not(r)),
        // Implies/Iff cannot appear here: eliminate_connectives has already removed them.
        Formula::Bin(BinOp::Implies, ..) | Formula::Bin(BinOp::Iff, ..) => {
            unreachable!("push_not called after Implies/Iff elimination")
        }
        Formula::Quant(Quantifier::Forall, var, body) => {
            Formula::exists(var.clone(), push_not(body))
        }
        Formula::Quant(Quantifier::Exists, var, body) => {
            Formula::forall(var.clone(), push_not(body))
        }
    }
}

/// Recursive worker: produces NNF for a formula already free of `Implies`/`Iff`, distributing
/// any `Not` nodes to the leaves as it descends.
fn nnf_inner(formula: &Formula) -> Formula {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => formula.clone(),
        Formula::Not(inner) => push_not(&nnf_inner(inner)),
        Formula::Bin(op, l, r) => Formula::Bin(*op, Box::new(nnf_inner(l)), Box::new(nnf_inner(r))),
        Formula::Quant(q, var, body) => Formula::Quant(*q, var.clone(), Box::new(nnf_inner(body))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;
    use crate::ast::visitor::{free_of_implies_iff, negations_on_atoms_only};

    fn nnf(f: Formula) -> Formula {
        to_nnf(&f)
    }

    #[test]
    fn eliminates_implies() {
        let f = Formula::implies(Formula::predicate("p", vec![]), Formula::predicate("q", vec![]));
        let out = nnf(f);
        assert!(free_of_implies_iff(&out));
        assert!(negations_on_atoms_only(&out));
    }

    #[test]
    fn pushes_negation_through_demorgan() {
        let f = Formula::not(Formula::and(
            Formula::predicate("p", vec![]),
            Formula::predicate("q", vec![]),
        ));
        let out = nnf(f);
        assert_eq!(
            out,
            Formula::or(Formula::not(Formula::predicate("p", vec![])), Formula::not(Formula::predicate("q", vec![])))
        );
    }

    #[test]
    fn dualises_quantifiers_under_negation() {
        let f = Formula::not(Formula::forall("x", Formula::predicate("p", vec![Term::var("x")])));
        let out = nnf(f);
        match out {
            Formula::Quant(Quantifier::Exists, var, body) => {
                assert_eq!(&*var, "x");
                assert_eq!(*body, Formula::not(Formula::predicate("p", vec![Term::var("x")])));
            }
            other => panic!("expected exists, got {other:?}"),
        }
    }

    #[test]
    fn double_negation_cancels() {
        let f = Formula::not(Formula::not(Formula::predicate("p", vec![])));
        assert_eq!(nnf(f), Formula::predicate("p", vec![]));
    }

    #[test]
    fn eliminates_iff() {
        let f = Formula::iff(Formula::predicate("p", vec![]), Formula::predicate("q", vec![]));
        let out = nnf(f);
        assert!(free_of_implies_iff(&out));
        assert!(negations_on_atoms_only(&out));
    }
}
