/*!
Arithmetic predicate translation: `lt`, `gt`, `le`, `ge`, `plus`, `times`, `minus` are not
synthesised as axioms (there is no finite first-order axiomatisation of integer arithmetic worth
writing down here) — instead they are recognised by name/arity and evaluated directly against the
host's numeric comparison and `is`/`computes` relation, the way spec.md §4.4.2 describes ("the
translated to the host evaluator's built-in numeric comparison and `is`/`computes` relation").

A term denotes an integer when it is a [Term::Constant] whose name parses as an `i64`; anything
else (a variable, a function application, a non-numeral constant) has no arithmetic denotation
and callers should fail the literal rather than ask arithmetic to evaluate it symbolically.
*/

use crate::ast::term::Term;

/// An arithmetic relation recognised by the engines when `enableArithmetic` is set.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ArithRelation {
    Lt,
    Le,
    Gt,
    Ge,
    /// `plus(X, Y, Z)` holds when `X + Y = Z`.
    Plus,
    /// `times(X, Y, Z)` holds when `X * Y = Z`.
    Times,
    /// `minus(X, Y, Z)` holds when `X - Y = Z`.
    Minus,
}

impl ArithRelation {
    pub fn arity(self) -> usize {
        match self {
            ArithRelation::Lt | ArithRelation::Le | ArithRelation::Gt | ArithRelation::Ge => 2,
            ArithRelation::Plus | ArithRelation::Times | ArithRelation::Minus => 3,
        }
    }
}

/// Recognises an arithmetic predicate by name and arity, returning `None` for anything else
/// (including a name that matches but with the wrong arity — callers should treat that as an
/// ordinary uninterpreted predicate, not an arithmetic error).
pub fn lookup(name: &str, arity: usize) -> Option<ArithRelation> {
    let rel = match name {
        "lt" => ArithRelation::Lt,
        "le" => ArithRelation::Le,
        "gt" => ArithRelation::Gt,
        "ge" => ArithRelation::Ge,
        "plus" => ArithRelation::Plus,
        "times" => ArithRelation::Times,
        "minus" => ArithRelation::Minus,
        _ => return None,
    };
    (rel.arity() == arity).then_some(rel)
}

/// The integer denoted by `term`, if any.
pub fn term_as_int(term: &Term) -> Option<i64> {
    match term {
        Term::Constant(name) => name.parse::<i64>().ok(),
        _ => None,
    }
}

/// Evaluates an arithmetic relation over fully-ground integer arguments. Returns `None` if any
/// argument is missing a denotation (the caller should then treat the literal as undecided rather
/// than assume a truth value).
pub fn evaluate(rel: ArithRelation, args: &[Term]) -> Option<bool> {
    let ints: Vec<i64> = args.iter().map(term_as_int).collect::<Option<_>>()?;
    Some(match rel {
        ArithRelation::Lt => ints[0] < ints[1],
        ArithRelation::Le => ints[0] <= ints[1],
        ArithRelation::Gt => ints[0] > ints[1],
        ArithRelation::Ge => ints[0] >= ints[1],
        ArithRelation::Plus => ints[0] + ints[1] == ints[2],
        ArithRelation::Times => ints[0] * ints[1] == ints[2],
        ArithRelation::Minus => ints[0] - ints[1] == ints[2],
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recognises_plus_by_name_and_arity() {
        assert_eq!(lookup("plus", 3), Some(ArithRelation::Plus));
        assert_eq!(lookup("plus", 2), None);
        assert_eq!(lookup("unrelated", 3), None);
    }

    #[test]
    fn evaluates_plus_over_ground_integers() {
        let args = vec![Term::constant("2"), Term::constant("3"), Term::constant("5")];
        assert_eq!(evaluate(ArithRelation::Plus, &args), Some(true));
        let args_wrong = vec![Term::constant("2"), Term::constant("3"), Term::constant("6")];
        assert_eq!(evaluate(ArithRelation::Plus, &args_wrong), Some(false));
    }

    #[test]
    fn non_numeral_argument_has_no_denotation() {
        let args = vec![Term::var("x"), Term::constant("3")];
        assert_eq!(evaluate(ArithRelation::Lt, &args), None);
    }
}
