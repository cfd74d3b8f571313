/*!
Robinson unification over [Term], without an occurs check — the same trade-off ordinary Prolog
implementations make (an occurs check is sound-but-slower; its absence can only make resolution
unsound on cyclic terms, which never arise from Skolemised FOL input in practice). If this
surfaces a problem on adversarial input, add the occurs check behind the same [HornEngineConfig]
knob the equality depth limit lives under.
*/

use crate::ast::subst::{apply_term, Substitution};
use crate::ast::term::Term;

/// Attempts to unify `a` and `b` under the bindings already in `subst`, extending `subst` in
/// place. Returns `false` (leaving `subst` unspecified-but-valid-so-far) on failure; callers
/// should clone `subst` before attempting a unification they might need to roll back.
pub fn unify(a: &Term, b: &Term, subst: &mut Substitution) -> bool {
    let a = apply_term(subst, a);
    let b = apply_term(subst, b);
    match (&a, &b) {
        (Term::Variable(x), Term::Variable(y)) if x == y => true,
        (Term::Variable(x), _) => {
            subst.insert(x.clone(), b);
            true
        }
        (_, Term::Variable(y)) => {
            subst.insert(y.clone(), a);
            true
        }
        (Term::Constant(x), Term::Constant(y)) => x == y,
        (Term::Function(f, fargs), Term::Function(g, gargs)) => {
            f == g && fargs.len() == gargs.len() && fargs.iter().zip(gargs.iter()).all(|(x, y)| unify(x, y, subst))
        }
        _ => false,
    }
}

/// Unifies two equal-length argument lists in lockstep, short-circuiting on the first failure.
pub fn unify_args(a: &[Term], b: &[Term], subst: &mut Substitution) -> bool {
    a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| unify(x, y, subst))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unifies_variable_with_constant() {
        let mut s = Substitution::new();
        assert!(unify(&Term::var("x"), &Term::constant("a"), &mut s));
        assert_eq!(s.get("x"), Some(&Term::constant("a")));
    }

    #[test]
    fn fails_on_distinct_constants() {
        let mut s = Substitution::new();
        assert!(!unify(&Term::constant("a"), &Term::constant("b"), &mut s));
    }

    #[test]
    fn unifies_nested_function_applications() {
        let mut s = Substitution::new();
        let left = Term::function("f", vec![Term::var("x"), Term::constant("a")]);
        let right = Term::function("f", vec![Term::constant("b"), Term::var("y")]);
        assert!(unify(&left, &right, &mut s));
        assert_eq!(s.get("x"), Some(&Term::constant("b")));
        assert_eq!(s.get("y"), Some(&Term::constant("a")));
    }

    #[test]
    fn respects_bindings_already_in_substitution() {
        let mut s = Substitution::new();
        s.insert("x", Term::constant("a"));
        assert!(!unify(&Term::var("x"), &Term::constant("b"), &mut s));
    }
}
