/*!
Generic recursive helpers over [Formula] trees.

Design note (spec.md §9): recursive AST visitors must be defensive against deep formulas. Where a
traversal is used on attacker-influenced-depth input (parsed surface syntax, intermediate CNF
distribution trees) it is paired with an explicit node-count budget checked by the caller rather
than an unbounded recursive descent; [node_count] is the primitive that budget-checking code
calls. Plain recursion is otherwise used for structural transforms, matching ordinary formula
depths seen in practice (a handful of nested quantifiers/connectives), the same way the teacher
prefers simple recursion for most of its procedures and reserves an explicit stack/loop only
where a specific operation (BCP) is shown to need it.
*/

use super::term::{BinOp, Formula};

/// The number of AST nodes in `f`, counting connectives, quantifiers, and atoms, but not the
/// terms nested inside atoms. Used to gate clausification blowup (spec.md §4.3).
pub fn node_count(f: &Formula) -> usize {
    match f {
        Formula::Predicate(..) | Formula::Equals(..) => 1,
        Formula::Not(inner) => 1 + node_count(inner),
        Formula::Bin(_, l, r) => 1 + node_count(l) + node_count(r),
        Formula::Quant(_, _, body) => 1 + node_count(body),
    }
}

/// The maximum quantifier/connective nesting depth of `f`.
pub fn depth(f: &Formula) -> usize {
    match f {
        Formula::Predicate(..) | Formula::Equals(..) => 1,
        Formula::Not(inner) => 1 + depth(inner),
        Formula::Bin(_, l, r) => 1 + depth(l).max(depth(r)),
        Formula::Quant(_, _, body) => 1 + depth(body),
    }
}

/// Applies `f` to every atom (`Predicate`/`Equals`) reachable in `formula`, rebuilding the tree
/// around the results. `f` receives the atom formula and must return a formula in its place
/// (typically another atom, but `Not`/connectives are tolerated to support rewrites such as
/// Tseitin's atom-for-subformula substitution).
pub fn map_atoms(formula: &Formula, f: &mut impl FnMut(&Formula) -> Formula) -> Formula {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => f(formula),
        Formula::Not(inner) => Formula::not(map_atoms(inner, f)),
        Formula::Bin(op, l, r) => {
            Formula::Bin(*op, Box::new(map_atoms(l, f)), Box::new(map_atoms(r, f)))
        }
        Formula::Quant(q, var, body) => {
            Formula::Quant(*q, var.clone(), Box::new(map_atoms(body, f)))
        }
    }
}

/// True if `formula` contains no `Implies`/`Iff` connective (an NNF precondition/postcondition
/// check — spec.md §8 property 2).
pub fn free_of_implies_iff(formula: &Formula) -> bool {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => true,
        Formula::Not(inner) => free_of_implies_iff(inner),
        Formula::Bin(BinOp::Implies, ..) | Formula::Bin(BinOp::Iff, ..) => false,
        Formula::Bin(_, l, r) => free_of_implies_iff(l) && free_of_implies_iff(r),
        Formula::Quant(_, _, body) => free_of_implies_iff(body),
    }
}

/// True if every `Not` in `formula` wraps an atom (the second half of the NNF postcondition).
pub fn negations_on_atoms_only(formula: &Formula) -> bool {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => true,
        Formula::Not(inner) => inner.is_atom(),
        Formula::Bin(_, l, r) => negations_on_atoms_only(l) && negations_on_atoms_only(r),
        Formula::Quant(_, _, body) => negations_on_atoms_only(body),
    }
}

/// True if `formula` contains no `Exists` quantifier.
pub fn no_existentials(formula: &Formula) -> bool {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => true,
        Formula::Not(inner) => no_existentials(inner),
        Formula::Bin(_, l, r) => no_existentials(l) && no_existentials(r),
        Formula::Quant(Quantifier::Exists, ..) => false,
        Formula::Quant(_, _, body) => no_existentials(body),
    }
}

use super::term::Quantifier;

/// True if `formula` contains no quantifier at all (used after universal drop).
pub fn no_quantifiers(formula: &Formula) -> bool {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => true,
        Formula::Not(inner) => no_quantifiers(inner),
        Formula::Bin(_, l, r) => no_quantifiers(l) && no_quantifiers(r),
        Formula::Quant(..) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;

    #[test]
    fn counts_nodes() {
        let f = Formula::and(
            Formula::predicate("p", vec![Term::var("x")]),
            Formula::predicate("q", vec![Term::var("x")]),
        );
        assert_eq!(node_count(&f), 3);
    }

    #[test]
    fn detects_implies() {
        let f = Formula::implies(
            Formula::predicate("p", vec![]),
            Formula::predicate("q", vec![]),
        );
        assert!(!free_of_implies_iff(&f));
    }
}
