use std::borrow::Cow;
use std::fmt::Display;

/// Object that can be searched by attribute as well as by text.
pub trait AttributeProvider {
    /// Text used for free-text terms.
    fn search_text(&self) -> Cow<'_, str>;

    /// Value of the attribute `name` (lowercase), or `None` when the object
    /// does not have it.
    fn attribute(&self, name: &str) -> Option<Cow<'_, str>>;
}

/// Something a compiled query can be evaluated against.
///
/// The capability is decided once, when the candidate is built: a plain
/// candidate only carries text and ignores attribute clauses.
pub enum Candidate<'a> {
    Plain(Cow<'a, str>),
    Attributed(&'a dyn AttributeProvider),
}

impl<'a> Candidate<'a> {
    /// Plain candidate matched through its `Display` form.
    pub fn plain<T: Display + ?Sized>(object: &T) -> Self {
        Candidate::Plain(Cow::Owned(object.to_string()))
    }

    pub fn text(text: &'a str) -> Self {
        Candidate::Plain(Cow::Borrowed(text))
    }

    pub fn attributed(object: &'a dyn AttributeProvider) -> Self {
        Candidate::Attributed(object)
    }

    pub fn search_text(&self) -> Cow<'_, str> {
        match self {
            Candidate::Plain(text) => Cow::Borrowed(text.as_ref()),
            Candidate::Attributed(object) => object.search_text(),
        }
    }

    pub fn attributes(&self) -> Option<&'a dyn AttributeProvider> {
        match self {
            Candidate::Plain(_) => None,
            Candidate::Attributed(object) => Some(*object),
        }
    }
}

impl<'a, T: AttributeProvider> From<&'a T> for Candidate<'a> {
    fn from(object: &'a T) -> Self {
        Candidate::Attributed(object)
    }
}
