/*!
Tokeniser for the Prover9-style surface syntax, built on [logos] — the lexer crate used by the
closest sibling repository in this retrieval pack (a natural-language-to-logic parser built the
same way: a `logos` token enum feeding a hand-written recursive-descent grammar).
*/

use crate::ast::Span;
use crate::types::err::ParseError;
use logos::Logos;

#[derive(Logos, Debug, Clone, PartialEq, Eq)]
#[logos(skip r"[ \t\r\n]+")]
#[logos(skip r"%[^\n]*")]
pub enum Token {
    #[token("(")]
    LParen,
    #[token(")")]
    RParen,
    #[token(",")]
    Comma,
    #[token(".")]
    Dot,
    #[token("<->")]
    Iff,
    #[token("->")]
    Implies,
    #[token("|")]
    Or,
    #[token("&")]
    And,
    #[token("-")]
    Not,
    #[token("=")]
    Eq,
    #[token("all")]
    All,
    #[token("exists")]
    Exists,
    #[regex(r"[A-Za-z_][A-Za-z0-9_]*", |lex| lex.slice().to_string())]
    Ident(String),
}

impl Token {
    pub fn describe(&self) -> String {
        match self {
            Token::LParen => "(".into(),
            Token::RParen => ")".into(),
            Token::Comma => ",".into(),
            Token::Dot => ".".into(),
            Token::Iff => "<->".into(),
            Token::Implies => "->".into(),
            Token::Or => "|".into(),
            Token::And => "&".into(),
            Token::Not => "-".into(),
            Token::Eq => "=".into(),
            Token::All => "all".into(),
            Token::Exists => "exists".into(),
            Token::Ident(s) => s.clone(),
        }
    }
}

/// Converts a byte offset in `source` to a 1-indexed (line, column) pair.
fn line_col(source: &str, offset: usize) -> (u32, u32) {
    let mut line = 1u32;
    let mut col = 1u32;
    for ch in source[..offset.min(source.len())].chars() {
        if ch == '\n' {
            line += 1;
            col = 1;
        } else {
            col += 1;
        }
    }
    (line, col)
}

/// Tokenises `source` in full, returning a `PARSE_ERROR`-shaped error at the first unrecognised
/// character (spec.md §4.1).
pub fn tokenize(source: &str) -> Result<Vec<(Token, Span)>, ParseError> {
    let mut out = Vec::new();
    let mut lex = Token::lexer(source);
    while let Some(result) = lex.next() {
        let span = lex.span();
        let (line, col) = line_col(source, span.start);
        match result {
            Ok(tok) => out.push((
                tok,
                Span { start: span.start, end: span.end, line, col },
            )),
            Err(_) => {
                return Err(ParseError {
                    message: "unrecognised token".to_string(),
                    token: Some(lex.slice().to_string()),
                    span: Span { start: span.start, end: span.end, line, col },
                });
            }
        }
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tokenizes_simple_implication() {
        let toks = tokenize("all x (man(x) -> mortal(x)).").unwrap();
        assert_eq!(toks[0].0, Token::All);
        assert!(matches!(toks[1].0, Token::Ident(ref s) if s == "x"));
        assert_eq!(toks[2].0, Token::LParen);
    }

    #[test]
    fn rejects_unknown_character() {
        let err = tokenize("p(x) # q(x)").unwrap_err();
        assert_eq!(err.token.as_deref(), Some("#"));
    }
}
