/*!
Equality axiom synthesis: reflexivity, symmetry, transitivity, congruence (per function arity),
and substitution (per predicate arity) — the theory that makes `=` behave like equality under
resolution instead of an uninterpreted binary predicate (spec.md §4.3 "Equality handling", §4.4.2).

Each axiom is built as an ordinary [Formula] with free (implicitly universal) variables, exactly
as if the caller had typed it as a premise; callers clausify the result the same way as any other
formula. Axiom *generation* here is one pass per symbol in the signature (not recursive), so
there is nothing to depth-limit at this stage — the depth limit named in spec.md §4.4.2 bounds
the Horn engine's runtime `eq_d` relation, not this synthesis step.
*/

use crate::ast::signature::FormulaSignature;
use crate::ast::term::Term;
use crate::ast::Formula;
use std::sync::Arc;

fn fresh_vars(prefix: &str, n: usize) -> Vec<Arc<str>> {
    (0..n).map(|i| Arc::from(format!("_{prefix}{i}"))).collect()
}

/// `all x (x = x)`.
fn reflexivity() -> Formula {
    let x = Term::var("_eqx");
    Formula::equals(x.clone(), x)
}

/// `all x all y (x = y -> y = x)`.
fn symmetry() -> Formula {
    Formula::implies(
        Formula::equals(Term::var("_eqx"), Term::var("_eqy")),
        Formula::equals(Term::var("_eqy"), Term::var("_eqx")),
    )
}

/// `all x all y all z (x = y & y = z -> x = z)`.
fn transitivity() -> Formula {
    Formula::implies(
        Formula::and(
            Formula::equals(Term::var("_eqx"), Term::var("_eqy")),
            Formula::equals(Term::var("_eqy"), Term::var("_eqz")),
        ),
        Formula::equals(Term::var("_eqx"), Term::var("_eqz")),
    )
}

/// `all x1..xk all y1..yk (x1=y1 & ... & xk=yk -> f(x1..xk) = f(y1..yk))`, for a function `f` of
/// arity `k`. Nullary functions (`k = 0`) would trivially hold and are skipped by [congruence_axioms].
fn congruence_for_function(name: &Arc<str>, arity: usize) -> Formula {
    let xs = fresh_vars("cx", arity);
    let ys = fresh_vars("cy", arity);
    let pairs: Vec<Formula> = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| Formula::equals(Term::var(x.clone()), Term::var(y.clone())))
        .collect();
    let antecedent = Formula::conjoin_all(pairs);
    let lhs = Term::function(name.clone(), xs.into_iter().map(Term::Variable).collect());
    let rhs = Term::function(name.clone(), ys.into_iter().map(Term::Variable).collect());
    Formula::implies(antecedent, Formula::equals(lhs, rhs))
}

/// `all x1..xk all y1..yk (x1=y1 & ... & xk=yk & p(x1..xk) -> p(y1..yk))`, for a predicate `p` of
/// arity `k`.
fn substitution_for_predicate(name: &Arc<str>, arity: usize) -> Formula {
    let xs = fresh_vars("sx", arity);
    let ys = fresh_vars("sy", arity);
    let mut conjuncts: Vec<Formula> = xs
        .iter()
        .zip(ys.iter())
        .map(|(x, y)| Formula::equals(Term::var(x.clone()), Term::var(y.clone())))
        .collect();
    conjuncts.push(Formula::predicate(name.clone(), xs.iter().cloned().map(Term::Variable).collect()));
    let antecedent = Formula::conjoin_all(conjuncts);
    let consequent = Formula::predicate(name.clone(), ys.into_iter().map(Term::Variable).collect());
    Formula::implies(antecedent, consequent)
}

/// The reflexivity/symmetry/transitivity axioms, independent of any particular signature.
pub fn core_equality_axioms() -> Vec<Formula> {
    vec![reflexivity(), symmetry(), transitivity()]
}

/// Congruence axioms for every function symbol of nonzero arity in `sig`.
pub fn congruence_axioms(sig: &FormulaSignature) -> Vec<Formula> {
    sig.functions
        .iter()
        .filter(|(_, arity)| **arity > 0)
        .map(|(name, arity)| congruence_for_function(name, *arity))
        .collect()
}

/// Substitution axioms for every predicate symbol in `sig`, excluding equality itself (`=` is
/// handled by [core_equality_axioms], not by a substitution axiom over its own arity).
pub fn substitution_axioms(sig: &FormulaSignature) -> Vec<Formula> {
    sig.predicates
        .iter()
        .filter(|(name, _)| &***name != crate::clausify::EQ_PREDICATE)
        .map(|(name, arity)| substitution_for_predicate(name, *arity))
        .collect()
}

/// The full equality theory for `sig`: core axioms plus congruence and substitution for every
/// symbol observed. Appended to a premise set when `enableEquality` is requested (spec.md §6).
pub fn equality_theory(sig: &FormulaSignature) -> Vec<Formula> {
    let mut axioms = core_equality_axioms();
    axioms.extend(congruence_axioms(sig));
    axioms.extend(substitution_axioms(sig));
    axioms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn congruence_generated_per_function_arity() {
        let mut sig = FormulaSignature::new();
        sig.observe(&Formula::predicate("p", vec![Term::function("f", vec![Term::constant("a")])]));
        let axioms = congruence_axioms(&sig);
        assert_eq!(axioms.len(), 1);
    }

    #[test]
    fn substitution_skips_equality_predicate() {
        let mut sig = FormulaSignature::new();
        sig.observe(&Formula::predicate("p", vec![Term::constant("a")]));
        let axioms = substitution_axioms(&sig);
        assert_eq!(axioms.len(), 1);
    }

    #[test]
    fn core_axioms_are_well_formed_quantifier_free_with_implicit_universals() {
        // Free variables stand in for implicit universals at the premise level (spec.md §4.1).
        for axiom in core_equality_axioms() {
            assert!(crate::ast::visitor::no_quantifiers(&axiom));
        }
    }
}
