/*!
Domain enumeration for one candidate size `n` (spec.md §4.5 steps 2a-2e): constant assignments
under the least-number heuristic, then function tables, then predicate extensions, checking every
input formula against each fully-built [Model].

Constants are enumerated with backtracking (the LNH constrains each constant's legal range by
what came before it, so it is not an independent per-symbol loop); functions and predicates are
enumerated together as one mixed-radix odometer — one radix-`n` digit per function argument
tuple, one radix-2 digit per predicate argument tuple — so the combined search visits every
total-function/predicate-interpretation combination exactly once without materializing it.
*/

use super::interp::{FunctionTable, Model, PredicateExtension};
use crate::ast::signature::FormulaSignature;
use crate::ast::Formula;
use crate::config::ModelFinderConfig;
use crate::engines::Deadline;
use crate::types::FolError;
use std::collections::BTreeMap;
use std::sync::Arc;

/// All argument tuples of a `arity`-ary symbol over domain `0..n` (empty tuple for arity 0).
fn cartesian_tuples(arity: usize, n: usize) -> Vec<Vec<usize>> {
    let mut result = vec![vec![]];
    for _ in 0..arity {
        let mut next = Vec::with_capacity(result.len() * n);
        for prefix in &result {
            for v in 0..n {
                let mut t = prefix.clone();
                t.push(v);
                next.push(t);
            }
        }
        result = next;
    }
    result
}

/// A mixed-radix counter: `digits[i]` ranges over `0..radices[i]`. [Odometer::advance] increments
/// with carry and returns `false` once every digit has wrapped back to 0 (the whole space has
/// been visited).
struct Odometer {
    radices: Vec<usize>,
    digits: Vec<usize>,
}

impl Odometer {
    fn new(radices: Vec<usize>) -> Self {
        let digits = vec![0; radices.len()];
        Odometer { radices, digits }
    }

    fn advance(&mut self) -> bool {
        for i in 0..self.digits.len() {
            self.digits[i] += 1;
            if self.digits[i] < self.radices[i] {
                return true;
            }
            self.digits[i] = 0;
        }
        false
    }
}

/// Per-symbol bookkeeping: where in the combined digit vector this symbol's table/extension
/// starts, and the argument tuples it is indexed by.
struct FunctionSlot {
    name: Arc<str>,
    tuples: Vec<Vec<usize>>,
    offset: usize,
}

struct PredicateSlot {
    name: Arc<str>,
    tuples: Vec<Vec<usize>>,
    offset: usize,
}

fn decode_function(slot: &FunctionSlot, digits: &[usize]) -> FunctionTable {
    slot.tuples.iter().enumerate().map(|(i, tuple)| (tuple.clone(), digits[slot.offset + i])).collect()
}

fn decode_predicate(slot: &PredicateSlot, digits: &[usize]) -> PredicateExtension {
    slot.tuples
        .iter()
        .enumerate()
        .filter(|(i, _)| digits[slot.offset + i] == 1)
        .map(|(_, tuple)| tuple.clone())
        .collect()
}

/// Enumerates legal constant assignments via the least-number heuristic (spec.md §4.5 step 2a):
/// the `k`-th constant (in signature order) may only take a value already used by an earlier
/// constant, or the next unused value. With `enable_symmetry` off, every constant ranges freely
/// over the whole domain.
fn enumerate_constants(
    names: &[Arc<str>],
    n: usize,
    enable_symmetry: bool,
    deadline: Deadline,
    assignment: &mut BTreeMap<Arc<str>, usize>,
    max_used: isize,
    on_assignment: &mut impl FnMut(&BTreeMap<Arc<str>, usize>) -> Result<bool, FolError>,
) -> Result<bool, FolError> {
    let Some((name, rest)) = names.split_first() else {
        return on_assignment(assignment);
    };
    if deadline.expired() {
        return Err(FolError::Timeout);
    }
    let upper = if enable_symmetry { (max_used + 1).min(n as isize - 1) } else { n as isize - 1 };
    for value in 0..=upper.max(0) {
        assignment.insert(name.clone(), value as usize);
        let stop = enumerate_constants(rest, n, enable_symmetry, deadline, assignment, max_used.max(value), on_assignment)?;
        if stop {
            return Ok(true);
        }
    }
    assignment.remove(name);
    Ok(false)
}

/// Searches domain size `n` for models of every formula in `formulas`, appending non-isomorphic
/// models to `found` (spec.md §4.5 steps 2a-2e) until `found.len()` reaches `config.count`,
/// `deadline` expires, or the search space is exhausted.
pub fn search_domain_size(
    formulas: &[Formula],
    sig: &FormulaSignature,
    n: usize,
    config: &ModelFinderConfig,
    deadline: Deadline,
    found: &mut Vec<Model>,
) -> Result<(), FolError> {
    let constant_names: Vec<Arc<str>> = sig.constants.keys().cloned().collect();

    let mut function_slots = Vec::new();
    let mut radices = Vec::new();
    for (name, &arity) in &sig.functions {
        let tuples = cartesian_tuples(arity, n);
        let offset = radices.len();
        radices.extend(std::iter::repeat(n).take(tuples.len()));
        function_slots.push(FunctionSlot { name: name.clone(), tuples, offset });
    }
    let mut predicate_slots = Vec::new();
    for (name, &arity) in &sig.predicates {
        let tuples = cartesian_tuples(arity, n);
        let offset = radices.len();
        radices.extend(std::iter::repeat(2).take(tuples.len()));
        predicate_slots.push(PredicateSlot { name: name.clone(), tuples, offset });
    }

    let mut assignment = BTreeMap::new();
    enumerate_constants(&constant_names, n, config.enable_symmetry, deadline, &mut assignment, -1, &mut |constants| {
        let mut odometer = Odometer::new(radices.clone());
        loop {
            if deadline.expired() {
                return Err(FolError::Timeout);
            }
            let functions: BTreeMap<Arc<str>, FunctionTable> =
                function_slots.iter().map(|slot| (slot.name.clone(), decode_function(slot, &odometer.digits))).collect();
            let predicates: BTreeMap<Arc<str>, PredicateExtension> =
                predicate_slots.iter().map(|slot| (slot.name.clone(), decode_predicate(slot, &odometer.digits))).collect();
            let candidate = Model { domain_size: n, constants: constants.clone(), functions, predicates };

            if formulas.iter().all(|f| candidate.satisfies(f)) {
                let is_dup = super::isomorphism::duplicates_existing(&candidate, found, config.isomorphism_ceiling.value);
                if !is_dup {
                    found.push(candidate);
                    if found.len() >= config.count {
                        return Ok(true);
                    }
                }
            }
            if !odometer.advance() {
                break;
            }
        }
        Ok(false)
    })?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;
    use std::time::Duration;

    fn deadline() -> Deadline {
        Deadline::after(Duration::from_secs(5))
    }

    #[test]
    fn finds_a_model_for_a_single_unary_predicate() {
        let f = Formula::predicate("P", vec![Term::constant("a")]);
        let sig = FormulaSignature::of(&[f.clone()]);
        let mut found = Vec::new();
        let config = ModelFinderConfig::default();
        search_domain_size(&[f], &sig, 2, &config, deadline(), &mut found).unwrap();
        assert_eq!(found.len(), 1);
        let model = &found[0];
        assert_eq!(model.domain_size, 2);
        assert_eq!(model.constants.get("a"), Some(&0));
        assert!(model.predicates["P"].contains(&vec![0]));
    }

    #[test]
    fn least_number_heuristic_keeps_constants_within_used_range() {
        let f = Formula::equals(Term::constant("a"), Term::constant("b"));
        let sig = FormulaSignature::of(&[f.clone()]);
        let mut found = Vec::new();
        let mut config = ModelFinderConfig::default();
        config.count = 10;
        search_domain_size(&[f], &sig, 2, &config, deadline(), &mut found).unwrap();
        // a=b is only satisfiable with both constants equal; LNH still only ever assigns 0 to the
        // first constant, so both found models (if more than one) assign a=b=0.
        assert!(found.iter().all(|m| m.constants["a"] == m.constants["b"]));
    }

    #[test]
    fn no_model_exists_for_a_contradiction() {
        let f1 = Formula::predicate("P", vec![Term::constant("a")]);
        let f2 = Formula::not(Formula::predicate("P", vec![Term::constant("a")]));
        let sig = FormulaSignature::of(&[f1.clone(), f2.clone()]);
        let mut found = Vec::new();
        let config = ModelFinderConfig::default();
        search_domain_size(&[f1, f2], &sig, 2, &config, deadline(), &mut found).unwrap();
        assert!(found.is_empty());
    }

    /// spec.md §8 property 6: with domain size `n=4` and `k=4` constants, the least-number
    /// heuristic visits `Bell(4)=15` assignments, not `4^4=256`.
    #[test]
    fn least_number_heuristic_visits_exactly_the_bell_number_of_assignments() {
        fn bell(n: usize) -> usize {
            let mut triangle: Vec<Vec<usize>> = vec![vec![1]];
            for i in 1..=n {
                let prev = &triangle[i - 1];
                let mut row = vec![*prev.last().unwrap()];
                for k in 0..prev.len() {
                    row.push(row[k] + prev[k]);
                }
                triangle.push(row);
            }
            triangle[n][0]
        }

        let names: Vec<Arc<str>> = (0..4).map(|i| Arc::from(format!("c{i}").as_str())).collect();
        let mut visited = 0usize;
        let mut assignment = BTreeMap::new();
        enumerate_constants(&names, 4, true, deadline(), &mut assignment, -1, &mut |_| {
            visited += 1;
            Ok(false)
        })
        .unwrap();
        assert_eq!(visited, bell(4));
        assert!(bell(4) < 4usize.pow(4));
    }
}
