//! Equality and arithmetic axiom/relation support (spec.md §4.3, §4.4.2; component table
//! "Equality / arithmetic axiom generators").

pub mod arithmetic;
pub mod equality;

pub use arithmetic::ArithRelation;
pub use equality::equality_theory;
