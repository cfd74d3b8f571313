//! The normalisation pipeline (spec.md §4.2): NNF, standardise-apart, Skolemise, drop universals.

mod drop_universal;
mod nnf;
mod skolem;
mod standardize;

pub use skolem::SkolemEnv;

use crate::ast::Formula;

/// Runs the full normalisation pipeline over `formula`, threading `env` through Skolemisation so
/// Skolem symbol identity is shared across calls that pass the same `env` (spec.md §9) — the
/// session layer relies on this to keep successive assertions consistent.
///
/// Postcondition: the result contains no `Implies`/`Iff`, no `Forall`/`Exists`, and every `Not`
/// wraps an atom — i.e. it is ready for clausification.
pub fn normalize(formula: &Formula, env: &mut SkolemEnv) -> Formula {
    let nnf = nnf::to_nnf(formula);
    let standardized = standardize::standardize_apart(&nnf);
    let skolemized = skolem::skolemize(&standardized, env);
    drop_universal::drop_universals(&skolemized)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;
    use crate::ast::visitor::{free_of_implies_iff, negations_on_atoms_only, no_quantifiers};
    use crate::parser::parse;

    #[test]
    fn full_pipeline_on_scenario_a() {
        let mut env = SkolemEnv::new();
        let f = parse("all x (man(x) -> mortal(x)).").unwrap();
        let out = normalize(&f, &mut env);
        assert!(free_of_implies_iff(&out));
        assert!(negations_on_atoms_only(&out));
        assert!(no_quantifiers(&out));
    }

    #[test]
    fn skolemizes_existential_under_universal_with_captured_arguments() {
        let mut env = SkolemEnv::new();
        let f = Formula::forall(
            "x",
            Formula::exists("y", Formula::predicate("loves", vec![Term::var("x"), Term::var("y")])),
        );
        let out = normalize(&f, &mut env);
        assert!(no_quantifiers(&out));
        match out {
            Formula::Predicate(_, args) => match &args[1] {
                Term::Function(_, skargs) => assert_eq!(skargs.len(), 1),
                other => panic!("expected a skolem function application, got {other:?}"),
            },
            other => panic!("expected a predicate, got {other:?}"),
        }
    }
}
