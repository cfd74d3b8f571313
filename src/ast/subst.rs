/*!
Substitution over terms and formulas: mapping variable names to replacement terms.

Used by: variable standardisation (renaming a bound variable to a fresh name throughout its
scope), Skolemisation (replacing a bound existential with a Skolem term), and the Horn engine's
unification-driven bindings when building a proof witness.
*/

use super::term::{Formula, Term};
use std::collections::HashMap;
use std::sync::Arc;

/// A substitution: variable name -> replacement term.
#[derive(Clone, Debug, Default)]
pub struct Substitution(pub HashMap<Arc<str>, Term>);

impl Substitution {
    pub fn new() -> Self {
        Substitution(HashMap::new())
    }

    pub fn single(name: impl Into<Arc<str>>, term: Term) -> Self {
        let mut m = HashMap::new();
        m.insert(name.into(), term);
        Substitution(m)
    }

    pub fn insert(&mut self, name: impl Into<Arc<str>>, term: Term) {
        self.0.insert(name.into(), term);
    }

    pub fn get(&self, name: &str) -> Option<&Term> {
        self.0.get(name)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Applies `subst` to every variable occurrence in `term`.
pub fn apply_term(subst: &Substitution, term: &Term) -> Term {
    match term {
        Term::Variable(name) => match subst.get(name) {
            Some(replacement) => replacement.clone(),
            None => term.clone(),
        },
        Term::Constant(_) => term.clone(),
        Term::Function(name, args) => {
            Term::Function(name.clone(), args.iter().map(|a| apply_term(subst, a)).collect())
        }
    }
}

/// Applies `subst` to every free variable occurrence in `formula`. Quantifiers shadow: if a
/// quantifier binds a name present in `subst`, that name's replacement does not apply within the
/// quantifier's body (the bound occurrence is a different variable). Callers that have already
/// standardised variables apart never hit this case, but it is handled correctly regardless.
pub fn apply_formula(subst: &Substitution, formula: &Formula) -> Formula {
    match formula {
        Formula::Predicate(name, args) => {
            Formula::Predicate(name.clone(), args.iter().map(|a| apply_term(subst, a)).collect())
        }
        Formula::Equals(l, r) => Formula::Equals(apply_term(subst, l), apply_term(subst, r)),
        Formula::Not(inner) => Formula::not(apply_formula(subst, inner)),
        Formula::Bin(op, l, r) => {
            Formula::Bin(*op, Box::new(apply_formula(subst, l)), Box::new(apply_formula(subst, r)))
        }
        Formula::Quant(q, var, body) => {
            if subst.0.contains_key(var) {
                let mut shadowed = subst.clone();
                shadowed.0.remove(var);
                Formula::Quant(*q, var.clone(), Box::new(apply_formula(&shadowed, body)))
            } else {
                Formula::Quant(*q, var.clone(), Box::new(apply_formula(subst, body)))
            }
        }
    }
}

/// Renames every occurrence of `from` to `to` within `formula`, without the shadowing guard
/// above (used by standardise-apart, which calls this only inside the exact scope of the
/// quantifier being renamed, so there is no risk of an inner shadowing quantifier of the same
/// original name — standardise-apart assigns fresh names one quantifier at a time, innermost
/// first, so a name is never reused).
pub fn rename_free(formula: &Formula, from: &str, to: Arc<str>) -> Formula {
    let subst = Substitution::single(from, Term::Variable(to));
    apply_formula(&subst, formula)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn substitutes_variable_in_term() {
        let t = Term::function("f", vec![Term::var("x"), Term::constant("a")]);
        let s = Substitution::single("x", Term::constant("b"));
        assert_eq!(apply_term(&s, &t), Term::function("f", vec![Term::constant("b"), Term::constant("a")]));
    }

    #[test]
    fn quantifier_shadows_substitution() {
        let f = Formula::forall("x", Formula::predicate("p", vec![Term::var("x")]));
        let s = Substitution::single("x", Term::constant("a"));
        assert_eq!(apply_formula(&s, &f), f);
    }
}
