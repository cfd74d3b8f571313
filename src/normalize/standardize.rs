/*!
Standardise-apart: rename every quantified variable to a fresh unique name (`_v0`, `_v1`, …) so
no two quantifiers share a name (spec.md §4.2 step 2).

Correctly saving/restoring shadowed names during recursion is the one genuinely tricky part: if
an inner quantifier reuses an outer quantifier's *original* name, renaming the inner one must not
also rewrite the outer binder's remaining occurrences, and once the inner scope is left, the
outer name's mapping must be restored so occurrences after the inner quantifier still refer to
the outer variable.
*/

use crate::ast::subst::{apply_term, Substitution};
use crate::ast::term::Term;
use crate::ast::Formula;
use std::collections::HashMap;
use std::sync::Arc;

/// Fresh-name counter and the renaming environment threaded through the recursion.
struct Standardizer {
    counter: u64,
    /// original quantified name -> current fresh name, for names currently in scope.
    renames: HashMap<Arc<str>, Arc<str>>,
}

impl Standardizer {
    fn fresh(&mut self) -> Arc<str> {
        let name: Arc<str> = Arc::from(format!("_v{}", self.counter));
        self.counter += 1;
        name
    }

    fn run(&mut self, formula: &Formula) -> Formula {
        match formula {
            Formula::Predicate(name, args) => {
                Formula::Predicate(name.clone(), args.iter().map(|a| self.rewrite_term(a)).collect())
            }
            Formula::Equals(l, r) => Formula::Equals(self.rewrite_term(l), self.rewrite_term(r)),
            Formula::Not(inner) => Formula::not(self.run(inner)),
            Formula::Bin(op, l, r) => Formula::Bin(*op, Box::new(self.run(l)), Box::new(self.run(r))),
            Formula::Quant(q, var, body) => {
                let fresh = self.fresh();
                // Save whatever `var` currently maps to (it may be unbound, or bound by an
                // outer quantifier of the same original name), rebind it to the fresh name for
                // the extent of this quantifier's body, then restore on the way out so
                // occurrences after this quantifier closes see the outer binding again.
                let previous = self.renames.insert(var.clone(), fresh.clone());
                let body = self.run(body);
                match previous {
                    Some(outer) => {
                        self.renames.insert(var.clone(), outer);
                    }
                    None => {
                        self.renames.remove(var);
                    }
                }
                Formula::Quant(*q, fresh, Box::new(body))
            }
        }
    }

    fn rewrite_term(&self, term: &Term) -> Term {
        match self.renames.is_empty() {
            true => term.clone(),
            false => {
                let mut subst = Substitution::new();
                for (k, v) in &self.renames {
                    subst.insert(k.clone(), Term::var(v.clone()));
                }
                apply_term(&subst, term)
            }
        }
    }
}

/// Renames every quantified variable in `formula` to a fresh, globally-unique name.
///
/// Free variables (those never bound by any quantifier in `formula`) are left untouched — they
/// are implicitly universal at the top level and standardisation only concerns itself with
/// quantifier-introduced names, per spec.md §4.2.
pub fn standardize_apart(formula: &Formula) -> Formula {
    let mut s = Standardizer { counter: 0, renames: HashMap::new() };
    s.run(formula)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Quantifier;

    #[test]
    fn renames_distinct_quantifiers() {
        let f = Formula::and(
            Formula::forall("x", Formula::predicate("p", vec![Term::var("x")])),
            Formula::exists("x", Formula::predicate("q", vec![Term::var("x")])),
        );
        let out = standardize_apart(&f);
        match out {
            Formula::Bin(_, l, r) => {
                let (Formula::Quant(_, v1, _), Formula::Quant(_, v2, _)) = (*l, *r) else {
                    panic!("expected two quantifiers")
                };
                assert_ne!(v1, v2);
            }
            _ => panic!("expected a conjunction"),
        }
    }

    #[test]
    fn restores_shadowed_outer_binding() {
        // all x ( p(x) & exists x q(x) ) & p(x)
        // The final `p(x)` refers to the OUTER `x`, not the inner `exists x`.
        let inner_exists = Formula::exists("x", Formula::predicate("q", vec![Term::var("x")]));
        let outer_body = Formula::and(Formula::predicate("p", vec![Term::var("x")]), inner_exists);
        let f = Formula::and(Formula::forall("x", outer_body), Formula::predicate("p", vec![Term::var("x")]));

        let out = standardize_apart(&f);
        let Formula::Bin(_, l, tail_p) = out else { panic!("expected conjunction") };
        let Formula::Quant(Quantifier::Forall, outer_name, body) = *l else { panic!("expected forall") };
        let Formula::Bin(_, first_p, exists_part) = *body else { panic!("expected conjunction body") };
        let Formula::Predicate(_, first_p_args) = *first_p else { panic!("expected predicate") };
        assert_eq!(first_p_args[0], Term::var(outer_name.clone()));

        let Formula::Quant(Quantifier::Exists, inner_name, _) = *exists_part else { panic!("expected exists") };
        assert_ne!(inner_name, outer_name);

        // The trailing p(x) outside the forall keeps its own (unrenamed) free `x`.
        assert_eq!(*tail_p, Formula::predicate("p", vec![Term::var("x")]));
    }
}
