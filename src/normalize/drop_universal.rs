/*!
Drop universals: remove all `forall` wrappers; the variables they bound remain in the formula as
free variables, which clause-level semantics interpret as implicitly universally quantified
(spec.md §4.2 step 4).
*/

use crate::ast::Formula;

/// Strips every `Forall` node from `formula`. Must be called after Skolemisation, or an
/// existential would be stripped of its binder along with any enclosing universal — the
/// normaliser pipeline enforces this ordering by construction (see [super::normalize]).
pub fn drop_universals(formula: &Formula) -> Formula {
    match formula {
        Formula::Predicate(..) | Formula::Equals(..) => formula.clone(),
        Formula::Not(inner) => Formula::not(drop_universals(inner)),
        Formula::Bin(op, l, r) => {
            Formula::Bin(*op, Box::new(drop_universals(l)), Box::new(drop_universals(r)))
        }
        Formula::Quant(crate::ast::term::Quantifier::Forall, _, body) => drop_universals(body),
        Formula::Quant(crate::ast::term::Quantifier::Exists, _, _) => {
            unreachable!("drop_universals called before Skolemisation removed all Exists nodes")
        }
    }
}
