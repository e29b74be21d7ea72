use super::candidate::{AttributeProvider, Candidate};
use super::parser::CompiledQuery;

pub fn eval(query: &CompiledQuery, candidate: &Candidate) -> bool {
    let text = candidate.search_text().to_lowercase();

    if query.excluded_terms().iter().any(|t| text.contains(t.as_str())) {
        return false;
    }
    if !query.included_terms().iter().all(|t| text.contains(t.as_str())) {
        return false;
    }

    match candidate.attributes() {
        Some(object) => eval_attributes(query, object),
        // plain objects have nothing to check attribute clauses against
        None => true,
    }
}

fn eval_attributes(query: &CompiledQuery, object: &dyn AttributeProvider) -> bool {
    for (name, rejected) in query.excluded_attributes() {
        if let Some(value) = object.attribute(name) {
            // `-name:` with no values rejects any object carrying the attribute
            if rejected.is_empty() || rejected.contains(&value.to_lowercase()) {
                return false;
            }
        }
    }

    for (name, accepted) in query.included_attributes() {
        match object.attribute(name) {
            None => return false,
            // `name:` with no values only requires the attribute to be present
            Some(_) if accepted.is_empty() => {}
            Some(value) => {
                if !accepted.contains(&value.to_lowercase()) {
                    return false;
                }
            }
        }
    }

    true
}
