//! A first-order logic reasoning core.
//!
//! Pipeline: surface syntax is [parser::parse]d into an [ast::Formula], normalised
//! ([normalize::normalize]) into NNF/Skolemised/universal-free form, and [clausify::clausify]d
//! into a [clausify::ClauseSet]. From there, [engines] dispatches the clause set to a Horn-clause
//! SLD resolver or a SAT-based refutation engine depending on its shape, and [model] separately
//! searches for finite models or counterexamples over the same premises. [session] wraps the
//! whole pipeline in stateful, TTL-managed sessions for callers that assert/retract premises
//! incrementally rather than proving one-shot queries.

pub mod ast;
pub mod axioms;
pub mod clausify;
pub mod config;
pub mod engines;
pub mod model;
pub mod normalize;
pub mod parser;
pub mod session;
pub mod types;

pub use types::FolError;
