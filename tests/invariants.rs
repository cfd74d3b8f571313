//! Quantified invariants from spec.md §8 (properties 1-5, 7; property 6's Bell-number count is
//! checked at the unit level next to the enumerator it describes).

use fol_core::ast::term::Term;
use fol_core::ast::visitor::{free_of_implies_iff, negations_on_atoms_only, no_quantifiers};
use fol_core::ast::Formula;
use fol_core::clausify::{clausify, Strategy};
use fol_core::engines::manager::{EngineManager, EngineSelection};
use fol_core::engines::sat::SatEngine;
use fol_core::engines::ProveOptions;
use fol_core::normalize::{normalize, SkolemEnv};
use fol_core::parser::parse;

#[test]
fn round_trip_preserves_a_ground_formula() {
    let f = parse("man(socrates).").unwrap();
    let printed = format!("{f}.");
    let reparsed = parse(&printed).unwrap();
    assert_eq!(f, reparsed);
}

#[test]
fn round_trip_preserves_a_quantified_implication() {
    let f = parse("all x (man(x) -> mortal(x)).").unwrap();
    let printed = format!("{f}.");
    let reparsed = parse(&printed).unwrap();
    assert_eq!(f, reparsed);
}

#[test]
fn normalize_establishes_nnf_postconditions() {
    let f = parse("all x (man(x) -> mortal(x)).").unwrap();
    let mut env = SkolemEnv::new();
    let out = normalize(&f, &mut env);
    assert!(free_of_implies_iff(&out));
    assert!(negations_on_atoms_only(&out));
    assert!(no_quantifiers(&out));
}

#[test]
fn normalize_establishes_nnf_postconditions_for_an_iff() {
    let f = parse("all x (p(x) <-> q(x)).").unwrap();
    let mut env = SkolemEnv::new();
    let out = normalize(&f, &mut env);
    assert!(free_of_implies_iff(&out));
    assert!(negations_on_atoms_only(&out));
}

#[test]
fn clausification_soundness_agrees_with_sat_checking_for_a_satisfiable_formula() {
    let f = parse("p(a) & q(a).").unwrap();
    let mut env = SkolemEnv::new();
    let (clauses, _) = clausify(&f, Strategy::Standard, 1_000, None, &mut env).unwrap();
    let engine = SatEngine;
    let result = engine.check_sat(&clauses, &ProveOptions::default()).unwrap();
    assert!(result.sat);
}

#[test]
fn clausification_soundness_agrees_with_sat_checking_for_an_unsatisfiable_formula() {
    let f1 = parse("p(a).").unwrap();
    let f2 = parse("-p(a).").unwrap();
    let mut env = SkolemEnv::new();
    let (mut clauses, _) = clausify(&f1, Strategy::Standard, 1_000, None, &mut env).unwrap();
    let (more, _) = clausify(&f2, Strategy::Standard, 1_000, None, &mut env).unwrap();
    clauses.extend(more);
    let engine = SatEngine;
    let result = engine.check_sat(&clauses, &ProveOptions::default()).unwrap();
    assert!(!result.sat);
}

#[test]
fn refutation_equivalence_proved_iff_negated_conjunction_is_unsat() {
    let manager = EngineManager::new();
    let premises = vec![
        parse("all x (man(x) -> mortal(x)).").unwrap(),
        parse("man(socrates).").unwrap(),
    ];
    let conclusion = parse("mortal(socrates).").unwrap();
    let prove_result = manager
        .prove(&premises, &conclusion, EngineSelection::Sat, &ProveOptions::default())
        .unwrap();

    let mut all = premises.clone();
    all.push(Formula::not(conclusion));
    let mut env = SkolemEnv::new();
    let mut clauses = fol_core::clausify::ClauseSet::default();
    for f in &all {
        let (cs, _) = clausify(f, Strategy::Tseitin, 50_000, None, &mut env).unwrap();
        clauses.extend(cs);
    }
    let sat_result = SatEngine.check_sat(&clauses, &ProveOptions::default()).unwrap();

    assert_eq!(prove_result.success, !sat_result.sat);
}

#[test]
fn session_assert_then_prove_is_proved_and_retract_then_prove_fails() {
    use fol_core::config::SessionConfig;
    use fol_core::session::SessionManager;

    let manager = SessionManager::new(SessionConfig::default());
    let id = manager.create(None, EngineSelection::Horn).unwrap();
    manager.assert(id, "happy(john).").unwrap();

    let proved = manager.prove(id, "happy(john).", &ProveOptions::default()).unwrap();
    assert!(proved.success);

    manager.retract(id, "happy(john).").unwrap();
    let failed = manager.prove(id, "happy(john).", &ProveOptions::default()).unwrap();
    assert!(!failed.success);
}

#[test]
fn equals_term_round_trips_through_display() {
    let f = Formula::equals(Term::constant("a"), Term::constant("b"));
    let printed = format!("{f}.");
    let reparsed = parse(&printed).unwrap();
    assert_eq!(f, reparsed);
}
