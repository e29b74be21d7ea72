use std::collections::{BTreeMap, BTreeSet};
use std::fmt;

use serde::Serialize;

use super::lexer::Token;

pub type AttributeClauses = BTreeMap<String, BTreeSet<String>>;

/// Query compiled from one line of search syntax.
///
/// Fields are private and only exposed read-only, so a compiled query can be
/// shared between threads and reused for any number of evaluations.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CompiledQuery {
    included_terms: BTreeSet<String>,
    excluded_terms: BTreeSet<String>,
    included_attributes: AttributeClauses,
    excluded_attributes: AttributeClauses,
}

impl CompiledQuery {
    pub fn included_terms(&self) -> &BTreeSet<String> {
        &self.included_terms
    }

    pub fn excluded_terms(&self) -> &BTreeSet<String> {
        &self.excluded_terms
    }

    pub fn included_attributes(&self) -> &AttributeClauses {
        &self.included_attributes
    }

    pub fn excluded_attributes(&self) -> &AttributeClauses {
        &self.excluded_attributes
    }

    /// True when the query has no clauses at all and therefore matches
    /// every candidate.
    pub fn is_empty(&self) -> bool {
        self.included_terms.is_empty()
            && self.excluded_terms.is_empty()
            && self.included_attributes.is_empty()
            && self.excluded_attributes.is_empty()
    }

    pub fn has_attribute_clauses(&self) -> bool {
        !self.included_attributes.is_empty() || !self.excluded_attributes.is_empty()
    }
}

/// Renders the canonical query text. Parsing the output yields an equal
/// query.
impl fmt::Display for CompiledQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut parts: Vec<String> = Vec::new();

        for term in &self.included_terms {
            parts.push(render_term(term));
        }
        for term in &self.excluded_terms {
            parts.push(format!("not {}", render_term(term)));
        }
        for (name, values) in &self.included_attributes {
            parts.push(render_attribute("", name, values));
        }
        for (name, values) in &self.excluded_attributes {
            parts.push(render_attribute("-", name, values));
        }

        write!(f, "{}", parts.join(" "))
    }
}

fn render_term(term: &str) -> String {
    let needs_quotes = term == "not"
        || term.starts_with('"')
        || term.contains(':')
        || term.chars().any(char::is_whitespace);
    if needs_quotes {
        format!("\"{term}\"")
    } else {
        term.to_string()
    }
}

fn render_attribute(prefix: &str, name: &str, values: &BTreeSet<String>) -> String {
    let values: Vec<&str> = values.iter().map(String::as_str).collect();
    format!("{prefix}{name}:{}", values.join(","))
}

/// Mutable accumulator used while scanning. Frozen into a [`CompiledQuery`]
/// once the token stream is exhausted.
#[derive(Default)]
struct QueryBuilder {
    query: CompiledQuery,
    negate_next: bool,
}

impl QueryBuilder {
    fn push(&mut self, token: Token) {
        match token {
            Token::Not => self.negate_next = true,
            Token::Word(term) | Token::Quoted(term) => {
                let negate = std::mem::take(&mut self.negate_next);
                if term.is_empty() {
                    return;
                }
                if negate {
                    self.query.excluded_terms.insert(term);
                } else {
                    self.query.included_terms.insert(term);
                }
            }
            Token::Attribute(name, values) => {
                let negate = std::mem::take(&mut self.negate_next);
                let (name, minus) = match name.strip_prefix('-') {
                    Some(stripped) => (stripped.to_string(), true),
                    None => (name, false),
                };
                if name.is_empty() {
                    log::trace!("dropping attribute clause without a name");
                    return;
                }
                let clauses = if negate || minus {
                    &mut self.query.excluded_attributes
                } else {
                    &mut self.query.included_attributes
                };
                clauses.entry(name).or_default().extend(values);
            }
        }
    }

    fn build(self) -> CompiledQuery {
        self.query
    }
}

/// Compile a token stream. Never fails; a dangling `not` is ignored.
pub fn compile(tokens: Vec<Token>) -> CompiledQuery {
    let mut builder = QueryBuilder::default();
    for token in tokens {
        builder.push(token);
    }
    builder.build()
}
