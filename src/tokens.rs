use regex::Regex;
use std::fmt;

pub const OPEN: &str = "(";
pub const CLOSE: &str = ")";

#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Token<'a> {
    Open,
    Close,
    Atom(&'a str),
}

impl<'a> Token<'a> {
    pub fn as_str(&self) -> &'a str {
        match self {
            Token::Open => OPEN,
            Token::Close => CLOSE,
            Token::Atom(text) => text,
        }
    }
}

impl fmt::Display for Token<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

fn create_token(captured: &str) -> Token<'_> {
    match captured {
        OPEN => Token::Open,
        CLOSE => Token::Close,
        _ => Token::Atom(captured),
    }
}

/// Split source text into brackets and atoms. Space, tab, newline and carriage
/// return separate atoms and are never emitted; every other character belongs
/// to an atom, including the last one in the input.
pub fn tokenize(input: &str) -> Vec<Token<'_>> {
    lazy_static! {
        // A single bracket, or a run of anything that is neither a bracket nor
        // a separator.
        static ref TOKEN_RE: Regex = Regex::new(r"[()]|[^ \t\n\r()]+").unwrap();
    }
    TOKEN_RE
        .find_iter(input)
        .map(|m| create_token(m.as_str()))
        .collect()
}
