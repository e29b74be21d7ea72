mod candidate;
mod eval;
mod lexer;
mod parser;

use std::fmt::Display;

pub use candidate::{AttributeProvider, Candidate};
pub use parser::{AttributeClauses, CompiledQuery};

/// Compile a line of search syntax.
///
/// Never fails: incomplete input (a dangling `not`, an unterminated quote,
/// `name:` without values) compiles to whatever clauses could be extracted.
/// Empty or whitespace-only input compiles to a query matching everything.
///
/// Syntax:
/// - `word` / `"quoted text"`: text must contain it (substring, any case)
/// - `not word`: text must not contain it
/// - `name:v1,v2`: attribute `name` must be one of the values
/// - `-name:v1` or `not name:v1`: attribute `name` must not be one of them
pub fn parse(input: &str) -> CompiledQuery {
    let tokens = lexer::tokenize(input);
    log::trace!("query {input:?} tokenized into {tokens:?}");
    parser::compile(tokens)
}

pub fn matches(query: &CompiledQuery, candidate: &Candidate) -> bool {
    eval::eval(query, candidate)
}

impl CompiledQuery {
    pub fn matches(&self, candidate: &Candidate) -> bool {
        eval::eval(self, candidate)
    }
}

/// Keep the objects the query accepts, matched as attributed candidates.
pub fn filter<'a, T: AttributeProvider>(query: &CompiledQuery, objects: &'a [T]) -> Vec<&'a T> {
    objects
        .iter()
        .filter(|object| query.matches(&Candidate::attributed(*object)))
        .collect()
}

/// Keep the objects the query accepts, matched by their `Display` text only.
pub fn filter_plain<'a, T: Display>(query: &CompiledQuery, objects: &'a [T]) -> Vec<&'a T> {
    objects
        .iter()
        .filter(|object| query.matches(&Candidate::plain(*object)))
        .collect()
}
