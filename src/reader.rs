use crate::tokens::{tokenize, Token};
use derive_more::Display;

/// Bracket grouping of tokens, before any meaning is given to them.
#[derive(Debug, Clone, Eq, PartialEq)]
pub enum Node {
    Atom(String),
    List(Vec<Node>),
}

impl Node {
    pub fn as_atom(&self) -> Option<&str> {
        match self {
            Node::Atom(text) => Some(text),
            Node::List(_) => None,
        }
    }
}

pub type Result<T = Node> = std::result::Result<T, Error>;

#[derive(Debug, Display, Eq, PartialEq)]
pub enum Error {
    #[display(fmt = "unexpected ')' at token {}", _0)]
    UnexpectedClose(usize),
    #[display(fmt = "{} unclosed '(' at end of input", _0)]
    UnclosedList(usize),
    #[display(fmt = "no expression to read")]
    NoMoreTokens,
    #[display(fmt = "expected a single expression, found {}", _0)]
    TrailingForms(usize),
}

impl std::error::Error for Error {}

// What the accumulator holds: either an open bracket still waiting for its
// partner or a finished node.
enum Slot {
    Open,
    Done(Node),
}

/// Group tokens by matching brackets. Every ')' folds everything pushed since
/// the most recent unmatched '(' into one `Node::List`.
pub fn parse(tokens: &[Token]) -> Result<Vec<Node>> {
    let mut stack: Vec<Slot> = Vec::new();
    for (position, token) in tokens.iter().enumerate() {
        match token {
            Token::Open => stack.push(Slot::Open),
            Token::Atom(text) => stack.push(Slot::Done(Node::Atom(String::from(*text)))),
            Token::Close => {
                let start = stack
                    .iter()
                    .rposition(|slot| matches!(slot, Slot::Open))
                    .ok_or(Error::UnexpectedClose(position))?;
                let tail = stack.split_off(start + 1);
                stack.pop();
                let elements = tail
                    .into_iter()
                    .filter_map(|slot| match slot {
                        Slot::Done(node) => Some(node),
                        Slot::Open => None,
                    })
                    .collect();
                stack.push(Slot::Done(Node::List(elements)));
            }
        }
    }

    let unclosed = stack
        .iter()
        .filter(|slot| matches!(slot, Slot::Open))
        .count();
    if unclosed > 0 {
        return Err(Error::UnclosedList(unclosed));
    }
    log::trace!("parsed {} top-level forms", stack.len());
    Ok(stack
        .into_iter()
        .filter_map(|slot| match slot {
            Slot::Done(node) => Some(node),
            Slot::Open => None,
        })
        .collect())
}

/// Read exactly one top-level expression from source text.
pub fn read_str(input: &str) -> Result {
    let tokens = tokenize(input);
    let mut forms = parse(&tokens)?;
    match forms.len() {
        0 => Err(Error::NoMoreTokens),
        1 => Ok(forms.remove(0)),
        n => Err(Error::TrailingForms(n)),
    }
}
