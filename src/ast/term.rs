/*!
The term/formula abstract syntax tree.

A [Term] is a variable, constant, or function application; a [Formula] is everything built from
terms via predicates, equality, connectives, and quantifiers. The split mirrors the invariant in
spec.md §3: argument lists of predicates/functions hold only term-kinds, and quantifier bodies
hold only formula-kinds — by putting that distinction in the type system, a formula can never be
passed where a term is expected (and vice versa), which a single flat tagged-union node kind
would only enforce at runtime.
*/

use std::fmt;
use std::sync::Arc;

/// A position in the original source text, used to annotate parse errors.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Span {
    /// Byte offset of the first character.
    pub start: usize,
    /// Byte offset one past the last character.
    pub end: usize,
    /// 1-indexed line number.
    pub line: u32,
    /// 1-indexed column number.
    pub col: u32,
}

impl Span {
    pub const fn zero() -> Self {
        Span { start: 0, end: 0, line: 1, col: 1 }
    }
}

/// A term: a variable, a 0-arity constant, or a function applied to further terms.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Term {
    Variable(Arc<str>),
    Constant(Arc<str>),
    Function(Arc<str>, Vec<Term>),
}

impl Term {
    pub fn var(name: impl Into<Arc<str>>) -> Term {
        Term::Variable(name.into())
    }

    pub fn constant(name: impl Into<Arc<str>>) -> Term {
        Term::Constant(name.into())
    }

    pub fn function(name: impl Into<Arc<str>>, args: Vec<Term>) -> Term {
        Term::Function(name.into(), args)
    }

    /// The name carried by this term, regardless of kind.
    pub fn name(&self) -> &str {
        match self {
            Term::Variable(n) | Term::Constant(n) | Term::Function(n, _) => n,
        }
    }

    /// The arguments of a function term, empty for variables/constants.
    pub fn args(&self) -> &[Term] {
        match self {
            Term::Function(_, args) => args,
            _ => &[],
        }
    }

    pub fn is_variable(&self) -> bool {
        matches!(self, Term::Variable(_))
    }

    /// Canonical printed form, used both by the pretty-printer and as the string key under
    /// which ground atoms/tuples are indexed (spec.md §4.4.3 step 5: "arguments stringified via
    /// the canonical printer").
    pub fn canonical(&self) -> String {
        match self {
            Term::Variable(n) | Term::Constant(n) => n.to_string(),
            Term::Function(n, args) => {
                let mut s = format!("{n}(");
                for (i, a) in args.iter().enumerate() {
                    if i > 0 {
                        s.push(',');
                    }
                    s.push_str(&a.canonical());
                }
                s.push(')');
                s
            }
        }
    }

    /// All variable names occurring in this term, in first-occurrence order, without
    /// duplicates.
    pub fn free_variables(&self) -> Vec<Arc<str>> {
        let mut out = Vec::new();
        self.collect_variables(&mut out);
        out
    }

    fn collect_variables(&self, out: &mut Vec<Arc<str>>) {
        match self {
            Term::Variable(n) => {
                if !out.iter().any(|v| v == n) {
                    out.push(n.clone());
                }
            }
            Term::Constant(_) => {}
            Term::Function(_, args) => {
                for a in args {
                    a.collect_variables(out);
                }
            }
        }
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.canonical())
    }
}

/// A quantifier kind, shared by [Formula::Forall] and [Formula::Exists].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Quantifier {
    Forall,
    Exists,
}

/// A binary connective kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BinOp {
    And,
    Or,
    Implies,
    Iff,
}

/// A formula: the invariants in spec.md §3 hold progressively through the normaliser pipeline
/// (no `Implies`/`Iff` after NNF, `Not` only wraps atoms after NNF, no `Exists` after
/// Skolemisation, no `Forall` after universal drop) but are not encoded in the type itself —
/// each stage documents and asserts the invariant it establishes rather than forcing every
/// intermediate stage to use a distinct type.
#[derive(Clone, Debug, PartialEq)]
pub enum Formula {
    Predicate(Arc<str>, Vec<Term>),
    Equals(Term, Term),
    Not(Box<Formula>),
    Bin(BinOp, Box<Formula>, Box<Formula>),
    Quant(Quantifier, Arc<str>, Box<Formula>),
}

impl Formula {
    pub fn predicate(name: impl Into<Arc<str>>, args: Vec<Term>) -> Formula {
        Formula::Predicate(name.into(), args)
    }

    pub fn equals(l: Term, r: Term) -> Formula {
        Formula::Equals(l, r)
    }

    pub fn not(f: Formula) -> Formula {
        Formula::Not(Box::new(f))
    }

    pub fn and(l: Formula, r: Formula) -> Formula {
        Formula::Bin(BinOp::And, Box::new(l), Box::new(r))
    }

    pub fn or(l: Formula, r: Formula) -> Formula {
        Formula::Bin(BinOp::Or, Box::new(l), Box::new(r))
    }

    pub fn implies(l: Formula, r: Formula) -> Formula {
        Formula::Bin(BinOp::Implies, Box::new(l), Box::new(r))
    }

    pub fn iff(l: Formula, r: Formula) -> Formula {
        Formula::Bin(BinOp::Iff, Box::new(l), Box::new(r))
    }

    pub fn forall(var: impl Into<Arc<str>>, body: Formula) -> Formula {
        Formula::Quant(Quantifier::Forall, var.into(), Box::new(body))
    }

    pub fn exists(var: impl Into<Arc<str>>, body: Formula) -> Formula {
        Formula::Quant(Quantifier::Exists, var.into(), Box::new(body))
    }

    /// Conjoin a non-empty list of formulas with `Bin(And, ..)`, left-folding.
    ///
    /// # Panics
    /// Panics if `items` is empty; callers in this crate always have at least one premise by
    /// the time this is used (an empty premise set degenerates to proving the conclusion
    /// outright, which is handled before this is called).
    pub fn conjoin_all(items: Vec<Formula>) -> Formula {
        let mut it = items.into_iter();
        let first = it.next().expect("conjoin_all requires at least one formula");
        it.fold(first, Formula::and)
    }

    pub fn is_atom(&self) -> bool {
        matches!(self, Formula::Predicate(..) | Formula::Equals(..))
    }
}

impl fmt::Display for Formula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Formula::Predicate(name, args) => {
                if args.is_empty() {
                    write!(f, "{name}")
                } else {
                    write!(f, "{}", Term::function(name.clone(), args.clone()))
                }
            }
            Formula::Equals(l, r) => write!(f, "{l} = {r}"),
            Formula::Not(inner) => write!(f, "-({inner})"),
            Formula::Bin(op, l, r) => {
                let sym = match op {
                    BinOp::And => "&",
                    BinOp::Or => "|",
                    BinOp::Implies => "->",
                    BinOp::Iff => "<->",
                };
                write!(f, "({l} {sym} {r})")
            }
            Formula::Quant(q, var, body) => {
                let kw = match q {
                    Quantifier::Forall => "all",
                    Quantifier::Exists => "exists",
                };
                write!(f, "{kw} {var} ({body})")
            }
        }
    }
}
