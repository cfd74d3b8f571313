/*!
Skolemisation: replace each `exists x. phi` with `phi[x -> sk_k(u1, ..., um)]`, where `sk_k` is a
fresh function symbol and `u1..um` are the universally-quantified variables currently in scope
(spec.md §4.2 step 3).

[SkolemEnv] is the persistent per-session state named in spec.md §3: a fresh-name counter, the
map from bound existential name to the Skolem symbol it produced, the stack of enclosing
universal variables, and the set of generated Skolem symbols with their arities. Sharing one
`SkolemEnv` across successive assertions in a session is what gives Skolem symbols a stable
identity across calls (spec.md §9).
*/

use crate::ast::subst::{apply_formula, Substitution};
use crate::ast::term::{Quantifier, Term};
use crate::ast::Formula;
use std::collections::HashMap;
use std::sync::Arc;

/// Per-clausification (or per-session) Skolemisation state.
#[derive(Clone, Debug, Default)]
pub struct SkolemEnv {
    counter: u64,
    /// Skolem symbol name -> arity, for every symbol generated so far.
    pub symbols: HashMap<Arc<str>, usize>,
}

impl SkolemEnv {
    pub fn new() -> Self {
        Self::default()
    }

    fn fresh_symbol(&mut self, arity: usize) -> Arc<str> {
        let name: Arc<str> = Arc::from(format!("sk{}", self.counter));
        self.counter += 1;
        self.symbols.insert(name.clone(), arity);
        name
    }
}

struct Skolemizer<'a> {
    env: &'a mut SkolemEnv,
    universals: Vec<Arc<str>>,
}

impl<'a> Skolemizer<'a> {
    fn run(&mut self, formula: &Formula) -> Formula {
        match formula {
            Formula::Predicate(..) | Formula::Equals(..) => formula.clone(),
            Formula::Not(inner) => Formula::not(self.run(inner)),
            Formula::Bin(op, l, r) => Formula::Bin(*op, Box::new(self.run(l)), Box::new(self.run(r))),
            Formula::Quant(Quantifier::Forall, var, body) => {
                self.universals.push(var.clone());
                let body = self.run(body);
                self.universals.pop();
                Formula::forall(var.clone(), body)
            }
            Formula::Quant(Quantifier::Exists, var, body) => {
                let args: Vec<Term> = self.universals.iter().map(|u| Term::var(u.clone())).collect();
                let skolem_name = self.env.fresh_symbol(args.len());
                let replacement = if args.is_empty() {
                    Term::constant(skolem_name)
                } else {
                    Term::function(skolem_name, args)
                };
                let subst = Substitution::single(var.clone(), replacement);
                let body = self.run(body);
                apply_formula(&subst, &body)
            }
        }
    }
}

/// Skolemises `formula` (which must already be standardised apart, so that re-entering this
/// function for later premises in the same session does not collide universal variable names
/// across formulas with the scope-stack logic below). Returns a formula with no `Exists` node
/// remaining (spec.md §8 invariant, checked by [crate::ast::visitor::no_existentials]).
pub fn skolemize(formula: &Formula, env: &mut SkolemEnv) -> Formula {
    let mut sk = Skolemizer { env, universals: Vec::new() };
    sk.run(formula)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::visitor::no_existentials;

    #[test]
    fn nullary_existential_becomes_constant() {
        let f = Formula::exists("x", Formula::predicate("p", vec![Term::var("x")]));
        let mut env = SkolemEnv::new();
        let out = skolemize(&f, &mut env);
        assert!(no_existentials(&out));
        match out {
            Formula::Predicate(_, args) => assert!(matches!(args[0], Term::Constant(_))),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(env.symbols.values().next(), Some(&0));
    }

    #[test]
    fn existential_under_universal_captures_it() {
        // all x exists y (p(x,y))  -->  all x (p(x, sk0(x)))
        let f = Formula::forall(
            "x",
            Formula::exists("y", Formula::predicate("p", vec![Term::var("x"), Term::var("y")])),
        );
        let mut env = SkolemEnv::new();
        let out = skolemize(&f, &mut env);
        assert!(no_existentials(&out));
        let Formula::Quant(Quantifier::Forall, x, body) = out else { panic!("expected forall") };
        let Formula::Predicate(_, args) = *body else { panic!("expected predicate") };
        assert_eq!(args[0], Term::var(x));
        match &args[1] {
            Term::Function(_, skargs) => assert_eq!(skargs.len(), 1),
            other => panic!("expected a unary skolem function, got {other:?}"),
        }
        assert_eq!(env.symbols.values().next(), Some(&1));
    }

    #[test]
    fn shares_skolem_identity_across_calls_when_env_is_reused() {
        let f1 = Formula::exists("x", Formula::predicate("p", vec![Term::var("x")]));
        let f2 = Formula::exists("y", Formula::predicate("q", vec![Term::var("y")]));
        let mut env = SkolemEnv::new();
        let _ = skolemize(&f1, &mut env);
        let _ = skolemize(&f2, &mut env);
        assert_eq!(env.symbols.len(), 2);
    }
}
