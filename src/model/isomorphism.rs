/*!
Isomorphism rejection: two [Model]s of the same domain size are isomorphic when some permutation
of the domain carries one's constants/functions/predicates onto the other's (spec.md §4.5 step
e). Checked by brute-force permutation search, which is only worthwhile for small domains — the
design note in spec.md §9 caps this at `n=8` (`8! = 40320`); beyond the configured
[crate::config::ModelFinderConfig::isomorphism_ceiling], the check is skipped entirely rather than
attempted, and a model is recorded as distinct unconditionally.
*/

use super::interp::Model;

/// All permutations of `0..n`, via Heap's algorithm.
fn permutations(n: usize) -> Vec<Vec<usize>> {
    let mut elements: Vec<usize> = (0..n).collect();
    let mut result = Vec::new();
    let mut c = vec![0; n];
    result.push(elements.clone());
    let mut i = 0;
    while i < n {
        if c[i] < i {
            if i % 2 == 0 {
                elements.swap(0, i);
            } else {
                elements.swap(c[i], i);
            }
            result.push(elements.clone());
            c[i] += 1;
            i = 0;
        } else {
            c[i] = 0;
            i += 1;
        }
    }
    result
}

fn permute_tuple(tuple: &[usize], perm: &[usize]) -> Vec<usize> {
    tuple.iter().map(|&v| perm[v]).collect()
}

/// Applies `perm` (old domain value -> new domain value) to every component of `model`, yielding
/// the model that results from relabelling its domain.
fn relabel(model: &Model, perm: &[usize]) -> Model {
    let constants = model.constants.iter().map(|(name, &v)| (name.clone(), perm[v])).collect();
    let functions = model
        .functions
        .iter()
        .map(|(name, table)| {
            let relabeled = table.iter().map(|(args, &v)| (permute_tuple(args, perm), perm[v])).collect();
            (name.clone(), relabeled)
        })
        .collect();
    let predicates = model
        .predicates
        .iter()
        .map(|(name, ext)| (name.clone(), ext.iter().map(|args| permute_tuple(args, perm)).collect()))
        .collect();
    Model { domain_size: model.domain_size, constants, functions, predicates }
}

/// True if `a` and `b` have the same domain size and some relabelling of `a`'s domain reproduces
/// `b` exactly (structural equality of the three interpretation tables after relabelling).
pub fn is_isomorphic(a: &Model, b: &Model) -> bool {
    if a.domain_size != b.domain_size {
        return false;
    }
    if a.domain_size <= 1 {
        return a == b;
    }
    permutations(a.domain_size).iter().any(|perm| &relabel(a, perm) == b)
}

/// True if `candidate` is isomorphic to any model already in `found`. Always `false` (no model is
/// ever rejected) once `domain_size` exceeds `ceiling` — spec.md §9's intractability cutoff.
pub fn duplicates_existing(candidate: &Model, found: &[Model], ceiling: usize) -> bool {
    if candidate.domain_size > ceiling {
        return false;
    }
    found.iter().any(|existing| is_isomorphic(candidate, existing))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::{BTreeMap, BTreeSet};
    use std::sync::Arc;

    fn model_with_predicate_at(domain_size: usize, predicate_holds_at: usize) -> Model {
        let mut predicates = BTreeMap::new();
        predicates.insert(Arc::from("P"), BTreeSet::from([vec![predicate_holds_at]]));
        Model { domain_size, constants: BTreeMap::new(), functions: BTreeMap::new(), predicates }
    }

    #[test]
    fn single_element_predicate_extensions_are_isomorphic_under_relabelling() {
        let a = model_with_predicate_at(2, 0);
        let b = model_with_predicate_at(2, 1);
        assert!(is_isomorphic(&a, &b));
    }

    #[test]
    fn different_domain_sizes_are_never_isomorphic() {
        let a = model_with_predicate_at(2, 0);
        let b = model_with_predicate_at(3, 0);
        assert!(!is_isomorphic(&a, &b));
    }

    #[test]
    fn ceiling_skips_the_check_and_reports_no_duplicate() {
        let a = model_with_predicate_at(9, 0);
        let b = model_with_predicate_at(9, 1);
        assert!(!duplicates_existing(&a, &[b], 8));
    }
}
