//! The term/formula AST, substitution, generic visitors, and signature extraction.
//!
//! Everything downstream (parser output, normaliser input/output, clausifier input) is this
//! [Formula]/[Term] tree. Transformations never mutate in place — each stage returns a new tree
//! and treats its input as read-only, per the ownership design note in spec.md §9.

pub mod signature;
pub mod subst;
pub mod term;
pub mod visitor;

pub use signature::FormulaSignature;
pub use term::{BinOp, Formula, Quantifier, Span, Term};
