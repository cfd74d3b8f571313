/*!
Recursive-descent parser from tokens to [Formula], implementing the precedence table of
spec.md §4.1 (weakest to strongest): `<->`, `->` (right-associative), `|`, `&`, unary `-`,
quantifiers, atoms, parenthesised formulas.
*/

use super::lexer::Token;
use crate::ast::{Formula, Span, Term};
use crate::types::err::ParseError;
use std::collections::HashSet;
use std::sync::Arc;

pub struct Parser<'a> {
    tokens: &'a [(Token, Span)],
    pos: usize,
    /// Stack of variable-binder scopes; the top scope is the innermost enclosing quantifier.
    bound: Vec<HashSet<Arc<str>>>,
    end_span: Span,
}

impl<'a> Parser<'a> {
    pub fn new(tokens: &'a [(Token, Span)], end_span: Span) -> Self {
        Parser { tokens, pos: 0, bound: Vec::new(), end_span }
    }

    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.pos).map(|(t, _)| t)
    }

    fn peek_span(&self) -> Span {
        self.tokens.get(self.pos).map(|(_, s)| *s).unwrap_or(self.end_span)
    }

    fn advance(&mut self) -> Option<(&Token, Span)> {
        let item = self.tokens.get(self.pos);
        if item.is_some() {
            self.pos += 1;
        }
        item.map(|(t, s)| (t, *s))
    }

    fn error(&self, message: impl Into<String>) -> ParseError {
        let span = self.peek_span();
        ParseError {
            message: message.into(),
            token: self.peek().map(|t| t.describe()),
            span,
        }
    }

    fn expect(&mut self, expected: &Token) -> Result<(), ParseError> {
        match self.peek() {
            Some(t) if t == expected => {
                self.advance();
                Ok(())
            }
            _ => Err(self.error(format!("expected '{}'", expected.describe()))),
        }
    }

    fn is_bound(&self, name: &str) -> bool {
        self.bound.iter().any(|scope| scope.contains(name))
    }

    /// Parses one formula terminated by `.` or end-of-input, and consumes the terminator.
    pub fn parse_formula_stmt(&mut self) -> Result<Formula, ParseError> {
        let f = self.parse_iff()?;
        match self.peek() {
            Some(Token::Dot) => {
                self.advance();
            }
            None => {}
            Some(_) => return Err(self.error("expected '.' or end of input")),
        }
        Ok(f)
    }

    /// Parses every formula in the token stream, each separated by `.`.
    pub fn parse_all(&mut self) -> Result<Vec<Formula>, ParseError> {
        let mut out = Vec::new();
        while self.peek().is_some() {
            out.push(self.parse_formula_stmt()?);
        }
        Ok(out)
    }

    fn parse_iff(&mut self) -> Result<Formula, ParseError> {
        let mut lhs = self.parse_implies()?;
        while matches!(self.peek(), Some(Token::Iff)) {
            self.advance();
            let rhs = self.parse_implies()?;
            lhs = Formula::iff(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_implies(&mut self) -> Result<Formula, ParseError> {
        let lhs = self.parse_or()?;
        if matches!(self.peek(), Some(Token::Implies)) {
            self.advance();
            // Right-associative: recurse back into parse_implies for the tail.
            let rhs = self.parse_implies()?;
            return Ok(Formula::implies(lhs, rhs));
        }
        Ok(lhs)
    }

    fn parse_or(&mut self) -> Result<Formula, ParseError> {
        let mut lhs = self.parse_and()?;
        while matches!(self.peek(), Some(Token::Or)) {
            self.advance();
            let rhs = self.parse_and()?;
            lhs = Formula::or(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_and(&mut self) -> Result<Formula, ParseError> {
        let mut lhs = self.parse_unary()?;
        while matches!(self.peek(), Some(Token::And)) {
            self.advance();
            let rhs = self.parse_unary()?;
            lhs = Formula::and(lhs, rhs);
        }
        Ok(lhs)
    }

    fn parse_unary(&mut self) -> Result<Formula, ParseError> {
        if matches!(self.peek(), Some(Token::Not)) {
            self.advance();
            let inner = self.parse_unary()?;
            return Ok(Formula::not(inner));
        }
        self.parse_quant_or_primary()
    }

    fn parse_quant_or_primary(&mut self) -> Result<Formula, ParseError> {
        match self.peek() {
            Some(Token::All) | Some(Token::Exists) => {
                let is_all = matches!(self.peek(), Some(Token::All));
                self.advance();
                let var = self.expect_ident("a quantified variable")?;
                self.bound.push(HashSet::from([var.clone()]));
                let body = self.parse_quant_body();
                self.bound.pop();
                let body = body?;
                Ok(if is_all { Formula::forall(var, body) } else { Formula::exists(var, body) })
            }
            _ => self.parse_primary(),
        }
    }

    /// The body of a quantifier is either a further quantifier or a single atom/parenthesised
    /// formula — quantifiers bind tighter than the connectives, so `all x p(x) & q(x)` parses as
    /// `(all x p(x)) & q(x)`, and wider scope requires explicit parentheses.
    fn parse_quant_body(&mut self) -> Result<Formula, ParseError> {
        match self.peek() {
            Some(Token::All) | Some(Token::Exists) => self.parse_quant_or_primary(),
            Some(Token::Not) => {
                self.advance();
                let inner = self.parse_quant_body()?;
                Ok(Formula::not(inner))
            }
            _ => self.parse_primary(),
        }
    }

    fn parse_primary(&mut self) -> Result<Formula, ParseError> {
        if matches!(self.peek(), Some(Token::LParen)) {
            self.advance();
            let inner = self.parse_iff()?;
            self.expect(&Token::RParen)?;
            return Ok(inner);
        }

        let name = self.expect_ident("a predicate, constant, or variable")?;
        let args = self.parse_optional_arg_list()?;

        if matches!(self.peek(), Some(Token::Eq)) {
            self.advance();
            let lhs = self.term_from_prefix(&name, args);
            let rhs = self.parse_term()?;
            return Ok(Formula::equals(lhs, rhs));
        }

        Ok(Formula::predicate(name, args.unwrap_or_default()))
    }

    /// Parses `(t1, t2, ...)` if present, returning `None` if no `(` follows.
    fn parse_optional_arg_list(&mut self) -> Result<Option<Vec<Term>>, ParseError> {
        if !matches!(self.peek(), Some(Token::LParen)) {
            return Ok(None);
        }
        self.advance();
        let mut args = vec![self.parse_term()?];
        while matches!(self.peek(), Some(Token::Comma)) {
            self.advance();
            args.push(self.parse_term()?);
        }
        self.expect(&Token::RParen)?;
        Ok(Some(args))
    }

    fn parse_term(&mut self) -> Result<Term, ParseError> {
        let name = self.expect_ident("a term")?;
        let args = self.parse_optional_arg_list()?;
        Ok(self.term_from_prefix(&name, args))
    }

    /// Classifies an identifier in term position (spec.md §4.1): bound by an enclosing
    /// quantifier -> variable; followed by `(` -> function; a single lowercase letter in
    /// `u..z` with no arguments -> implicitly-universal free variable; anything else -> constant.
    fn term_from_prefix(&self, name: &Arc<str>, args: Option<Vec<Term>>) -> Term {
        if let Some(args) = args {
            return Term::function(name.clone(), args);
        }
        if self.is_bound(name) {
            return Term::var(name.clone());
        }
        if is_implicit_variable_name(name) {
            return Term::var(name.clone());
        }
        Term::constant(name.clone())
    }

    fn expect_ident(&mut self, what: &str) -> Result<Arc<str>, ParseError> {
        match self.advance() {
            Some((Token::Ident(s), _)) => Ok(Arc::from(s.as_str())),
            _ => Err(self.error(format!("expected {what}"))),
        }
    }
}

/// A bare, unbound, argument-less identifier is treated as an implicitly-universal variable
/// when it is a single lowercase letter in `u..=z` — the conventional Prover9 variable range.
/// Any other bare identifier (including single letters outside that range, e.g. `a`, `b`, `c`,
/// which name constants by convention) is a constant.
fn is_implicit_variable_name(name: &str) -> bool {
    let mut chars = name.chars();
    match (chars.next(), chars.next()) {
        (Some(c), None) => c.is_ascii_lowercase() && ('u'..='z').contains(&c),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::super::lexer::tokenize;
    use super::*;

    fn parse_one(src: &str) -> Formula {
        let toks = tokenize(src).unwrap();
        let end = toks.last().map(|(_, s)| *s).unwrap_or(Span::zero());
        let mut p = Parser::new(&toks, end);
        p.parse_formula_stmt().unwrap()
    }

    #[test]
    fn parses_horn_implication() {
        let f = parse_one("all x (man(x) -> mortal(x)).");
        match f {
            Formula::Quant(_, var, body) => {
                assert_eq!(&*var, "x");
                assert!(matches!(*body, Formula::Bin(crate::ast::BinOp::Implies, _, _)));
            }
            _ => panic!("expected a quantifier"),
        }
    }

    #[test]
    fn nullary_predicate_not_reclassified_as_variable() {
        let f = parse_one("p.");
        assert_eq!(f, Formula::predicate("p", vec![]));
    }

    #[test]
    fn equality_reclassifies_bare_identifier_as_constant() {
        let f = parse_one("a = b.");
        assert_eq!(f, Formula::equals(Term::constant("a"), Term::constant("b")));
    }

    #[test]
    fn equality_reclassifies_short_identifier_as_variable() {
        let f = parse_one("x = y.");
        assert_eq!(f, Formula::equals(Term::var("x"), Term::var("y")));
    }

    #[test]
    fn quantifier_scope_is_tight() {
        // `all x p(x) & q(x)` == `(all x p(x)) & q(x)` — the second `x` is NOT bound.
        let f = parse_one("all x p(x) & q(x).");
        match f {
            Formula::Bin(crate::ast::BinOp::And, l, r) => {
                assert!(matches!(*l, Formula::Quant(..)));
                assert_eq!(*r, Formula::predicate("q", vec![Term::var("x")]));
            }
            _ => panic!("expected a conjunction"),
        }
    }

    #[test]
    fn implies_is_right_associative() {
        let f = parse_one("p -> q -> r.");
        match f {
            Formula::Bin(crate::ast::BinOp::Implies, l, r) => {
                assert_eq!(*l, Formula::predicate("p", vec![]));
                assert!(matches!(*r, Formula::Bin(crate::ast::BinOp::Implies, _, _)));
            }
            _ => panic!("expected an implication"),
        }
    }
}
