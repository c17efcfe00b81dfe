// Runs one expression through the whole pipeline and prints every stage.
// The expression comes from the command line; with no arguments a sample
// program is used.

use itertools::Itertools;
use mini_sexp::{build, evaluate, parse, printer, reader, tokenize, Environment};
use std::error::Error;

const SAMPLE: &str = "
   (((lambda (le)
            ((lambda (f) (f f))
             (lambda (f)
               (le (lambda (x y) ((f f) x y))))))
          (lambda (f)
            (lambda (x y)
              (cond
                ((zero? x) y)
                (else (f (decr x) (incr y)))))))
         10 22)";

fn main() -> Result<(), Box<dyn Error>> {
    pretty_env_logger::init();
    let args: Vec<String> = std::env::args().skip(1).collect();
    let source = match args.is_empty() {
        true => String::from(SAMPLE),
        false => args.join(" "),
    };

    let tokens = tokenize(&source);
    println!("tokens: [{}]", tokens.iter().map(|t| format!("{:?}", t.as_str())).join(", "));

    let structure = parse(&tokens)?;
    println!("structure: {}", structure.iter().map(printer::pr_node).join(" "));
    let node = match structure.as_slice() {
        [node] => node,
        [] => return Err(reader::Error::NoMoreTokens.into()),
        _ => return Err(reader::Error::TrailingForms(structure.len()).into()),
    };

    let expr = build(node)?;
    println!("ast: {:?}", expr);

    let value = evaluate(&expr, &Environment::empty())?;
    println!("{}", value);
    Ok(())
}
