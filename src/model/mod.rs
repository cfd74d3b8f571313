//! The finite model finder: enumerates candidate interpretations over growing domain sizes with
//! symmetry breaking and isomorphism rejection, and the counter-example search built on top of it
//! (spec.md §4.5, operations `findModel`/`findCounterexample` in §6).

mod interp;
mod isomorphism;
mod search;

pub use interp::Model;

use crate::ast::signature::FormulaSignature;
use crate::ast::Formula;
use crate::config::ModelFinderConfig;
use crate::engines::Deadline;
use crate::types::FolError;
use std::time::Instant;

/// The outcome of a `findModel`/`findCounterexample` call (spec.md §6 `ModelResult.result`).
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ModelOutcome {
    ModelFound,
    NoModel,
    Timeout,
    Error,
}

/// Counters reported alongside a [ModelResult] (spec.md §6 `ModelResult.statistics`).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ModelStatistics {
    pub domain_size: Option<usize>,
    pub searched_sizes: Vec<usize>,
    pub time_ms: u64,
}

/// The result of a `findModel` or `findCounterexample` call (spec.md §6 `ModelResult`).
#[derive(Clone, Debug, PartialEq)]
pub struct ModelResult {
    pub success: bool,
    pub result: ModelOutcome,
    pub models: Vec<Model>,
    pub interpretation: Option<String>,
    pub statistics: ModelStatistics,
    /// Set when this result comes from [find_counterexample] rather than [find_model] (spec.md
    /// §4.5 "Counter-example... with the extra output field marking it as a counter-example
    /// witness").
    pub is_counterexample: bool,
}

impl ModelResult {
    fn none_found(searched_sizes: Vec<usize>, time_ms: u64) -> Self {
        ModelResult {
            success: false,
            result: ModelOutcome::NoModel,
            models: Vec::new(),
            interpretation: None,
            statistics: ModelStatistics { domain_size: None, searched_sizes, time_ms },
            is_counterexample: false,
        }
    }

    fn found(models: Vec<Model>, domain_size: usize, searched_sizes: Vec<usize>, time_ms: u64) -> Self {
        let interpretation = models.first().map(Model::to_canonical_string);
        ModelResult {
            success: true,
            result: ModelOutcome::ModelFound,
            models,
            interpretation,
            statistics: ModelStatistics { domain_size: Some(domain_size), searched_sizes, time_ms },
            is_counterexample: false,
        }
    }

    fn timeout(searched_sizes: Vec<usize>, time_ms: u64) -> Self {
        ModelResult {
            success: false,
            result: ModelOutcome::Timeout,
            models: Vec::new(),
            interpretation: None,
            statistics: ModelStatistics { domain_size: None, searched_sizes, time_ms },
            is_counterexample: false,
        }
    }
}

/// Options for a `findModel` call (spec.md §6 `findModel(premises, {domainSize, maxDomainSize,
/// enableSymmetry, count, timeout})`).
#[derive(Clone, Debug)]
pub struct FindModelOptions {
    /// When set, search exactly this domain size rather than growing from 1.
    pub domain_size: Option<usize>,
    pub config: ModelFinderConfig,
}

impl Default for FindModelOptions {
    fn default() -> Self {
        FindModelOptions { domain_size: None, config: ModelFinderConfig::default() }
    }
}

/// Searches for up to `config.count` non-isomorphic finite models of the conjunction of
/// `formulas` (spec.md §4.5). When `options.domain_size` is `Some(n)`, only size `n` is tried;
/// otherwise every size from 1 up to `config.max_domain_size` is tried in turn, stopping as soon
/// as enough models are found.
pub fn find_model(formulas: &[Formula], options: &FindModelOptions) -> Result<ModelResult, FolError> {
    let start = Instant::now();
    log::debug!(target: "fol_core::model", "find_model over {} formula(s)", formulas.len());
    let sig = FormulaSignature::of(formulas);
    let deadline = Deadline::after(options.config.deadline());
    let sizes: Vec<usize> = match options.domain_size {
        Some(n) => vec![n],
        None => (1..=options.config.max_domain_size.value).collect(),
    };

    let mut found = Vec::new();
    let mut searched = Vec::new();
    for n in sizes {
        searched.push(n);
        match search::search_domain_size(formulas, &sig, n, &options.config, deadline, &mut found) {
            Ok(()) => {
                if !found.is_empty() {
                    let domain_size = found[0].domain_size;
                    return Ok(ModelResult::found(found, domain_size, searched, start.elapsed().as_millis() as u64));
                }
            }
            Err(FolError::Timeout) => {
                return Ok(ModelResult::timeout(searched, start.elapsed().as_millis() as u64));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(ModelResult::none_found(searched, start.elapsed().as_millis() as u64))
}

/// `findCounterexample(premises, conclusion)` searches for a model of `premises ∪ {¬conclusion}`
/// (spec.md §4.5 "Counter-example"). If found, every premise holds and the conclusion does not —
/// spec.md §8 property 5.
pub fn find_counterexample(premises: &[Formula], conclusion: &Formula, options: &FindModelOptions) -> Result<ModelResult, FolError> {
    let mut formulas: Vec<Formula> = premises.to_vec();
    formulas.push(Formula::not(conclusion.clone()));
    let mut result = find_model(&formulas, options)?;
    result.is_counterexample = true;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ast::term::Term;
    use crate::parser::parse;

    #[test]
    fn scenario_d_finds_a_model_of_size_two() {
        let f = parse("P(a).").unwrap();
        let options = FindModelOptions { domain_size: Some(2), ..Default::default() };
        let result = find_model(&[f], &options).unwrap();
        assert!(result.success);
        assert_eq!(result.statistics.domain_size, Some(2));
        let model = &result.models[0];
        assert_eq!(model.constants.get("a"), Some(&0));
        assert!(model.predicates["P"].contains(&vec![0]));
    }

    #[test]
    fn scenario_b_counterexample_distinguishes_john_and_mary() {
        let premises = vec![parse("happy(john).").unwrap()];
        let conclusion = parse("happy(mary).").unwrap();
        let options = FindModelOptions::default();
        let result = find_counterexample(&premises, &conclusion, &options).unwrap();
        assert!(result.success);
        assert!(result.is_counterexample);
        let model = &result.models[0];
        for premise in &premises {
            assert!(model.satisfies(premise));
        }
        assert!(!model.satisfies(&conclusion));
    }

    #[test]
    fn no_model_exists_for_an_outright_contradiction() {
        let f1 = Formula::predicate("p", vec![Term::constant("a")]);
        let f2 = Formula::not(Formula::predicate("p", vec![Term::constant("a")]));
        let mut options = FindModelOptions::default();
        options.config.max_domain_size.value = 3;
        let result = find_model(&[f1, f2], &options).unwrap();
        assert!(!result.success);
        assert_eq!(result.result, ModelOutcome::NoModel);
    }
}
