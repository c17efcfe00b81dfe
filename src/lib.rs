#[macro_use]
extern crate lazy_static;

pub mod ast;
pub mod environment;
pub mod evaluator;
pub mod interpreter;
pub mod primitives;
pub mod printer;
pub mod reader;
pub mod special_forms;
pub mod tokens;
pub mod types;

pub use ast::{build, Expression};
pub use environment::Environment;
pub use evaluator::evaluate;
pub use reader::{parse, Node};
pub use tokens::{tokenize, Token};
pub use types::Value;
