//! Lexer and recursive-descent parser for the Prover9-style surface syntax (spec.md §4.1).

mod grammar;
mod lexer;

use crate::ast::{Formula, Span};
use crate::types::err::{FolError, ParseError};

/// Parses a single formula, terminated by `.` or end-of-input.
///
/// `PARSE_ERROR` carries the offending token and its position (spec.md §4.1). The returned AST
/// never has a lexically-unbound variable the parser could statically attribute — any bare
/// short lowercase identifier becomes an implicitly-universal variable right away, and anything
/// else becomes a constant; the normaliser is responsible for adding the explicit `forall`
/// wrapper those implicit variables imply (spec.md §4.2 "drop universals" is the mirror image of
/// this: by the time clauses are built, free variables are again implicitly universal).
pub fn parse(text: &str) -> Result<Formula, FolError> {
    log::trace!(target: "fol_core::parser", "parsing formula: {text}");
    let tokens = lexer::tokenize(text)?;
    let end_span = tokens.last().map(|(_, s)| *s).unwrap_or(Span::zero());
    let mut parser = grammar::Parser::new(&tokens, end_span);
    let formula = parser.parse_formula_stmt()?;
    Ok(formula)
}

/// Parses every `.`-terminated formula in `text`.
pub fn parse_all(text: &str) -> Result<Vec<Formula>, FolError> {
    let tokens = lexer::tokenize(text)?;
    let end_span = tokens.last().map(|(_, s)| *s).unwrap_or(Span::zero());
    let mut parser = grammar::Parser::new(&tokens, end_span);
    Ok(parser.parse_all()?)
}

/// Outcome of validating a batch of formula texts (spec.md §6 `validateFormulas`).
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationReport {
    pub valid: bool,
    /// One entry per input string, `None` if that formula parsed cleanly.
    pub errors: Vec<Option<ParseError>>,
}

/// Parses every formula in `texts` independently, collecting per-formula errors rather than
/// stopping at the first failure — useful for editor-style "show me every bad line" validation.
pub fn validate_formulas(texts: &[String]) -> ValidationReport {
    let mut errors = Vec::with_capacity(texts.len());
    let mut valid = true;
    for text in texts {
        match parse(text) {
            Ok(_) => errors.push(None),
            Err(FolError::Parse(e)) => {
                valid = false;
                errors.push(Some(e));
            }
            Err(_) => unreachable!("parse() only ever returns FolError::Parse"),
        }
    }
    ValidationReport { valid, errors }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_scenario_a_premises() {
        assert!(parse("all x (man(x) -> mortal(x)).").is_ok());
        assert!(parse("man(socrates).").is_ok());
    }

    #[test]
    fn reports_missing_close_paren_with_position() {
        // Scenario F: `all x (P(x) -> Q(x)` is missing its closing paren.
        let err = parse("all x (P(x) -> Q(x)").unwrap_err();
        match err {
            FolError::Parse(e) => assert_eq!(e.message, "expected ')'"),
            other => panic!("expected a parse error, got {other:?}"),
        }
    }

    #[test]
    fn validate_formulas_reports_per_formula_errors() {
        let texts = vec!["p(x).".to_string(), "all x (P(x".to_string()];
        let report = validate_formulas(&texts);
        assert!(!report.valid);
        assert!(report.errors[0].is_none());
        assert!(report.errors[1].is_some());
    }
}
