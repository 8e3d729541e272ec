use std::fmt;

use rio_api::model as rio;
use serde::{Deserialize, Serialize};

/// A literal value with an optional language tag or datatype.
///
/// A literal never carries both: a language-tagged string is implicitly
/// `rdf:langString`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Literal {
    pub value: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datatype: Option<String>,
}

impl Literal {
    pub fn simple(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: None,
        }
    }

    pub fn typed(value: impl Into<String>, datatype: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: None,
            datatype: Some(datatype.into()),
        }
    }

    pub fn lang(value: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            language: Some(language.into()),
            datatype: None,
        }
    }

    /// Borrowed rio view; its `Display` is N-Triples syntax.
    pub(crate) fn as_rio(&self) -> rio::Literal<'_> {
        match (&self.language, &self.datatype) {
            (Some(language), _) => rio::Literal::LanguageTaggedString {
                value: &self.value,
                language,
            },
            (None, Some(datatype)) => rio::Literal::Typed {
                value: &self.value,
                datatype: rio::NamedNode { iri: datatype },
            },
            (None, None) => rio::Literal::Simple { value: &self.value },
        }
    }
}

/// Anything that can sit in the subject or object position of a triple.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Term {
    Iri(String),
    Blank(String),
    Literal(Literal),
}

impl Term {
    pub fn iri(iri: impl Into<String>) -> Self {
        Term::Iri(iri.into())
    }

    pub fn literal(value: impl Into<String>) -> Self {
        Term::Literal(Literal::simple(value))
    }

    /// The IRI if this term is a named node
    pub fn as_iri(&self) -> Option<&str> {
        match self {
            Term::Iri(iri) => Some(iri),
            _ => None,
        }
    }

    /// The lexical value of an IRI or literal
    pub fn value(&self) -> &str {
        match self {
            Term::Iri(iri) => iri,
            Term::Blank(id) => id,
            Term::Literal(literal) => &literal.value,
        }
    }

    pub fn is_literal(&self) -> bool {
        matches!(self, Term::Literal(_))
    }
}

impl fmt::Display for Term {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Term::Iri(iri) => write!(f, "<{}>", iri),
            Term::Blank(id) => write!(f, "_:{}", id),
            Term::Literal(literal) => write!(f, "{}", literal.as_rio()),
        }
    }
}

impl From<&str> for Term {
    fn from(iri: &str) -> Self {
        Term::Iri(iri.to_string())
    }
}

impl From<Literal> for Term {
    fn from(literal: Literal) -> Self {
        Term::Literal(literal)
    }
}

/// A single RDF statement.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Triple {
    pub subject: Term,
    pub predicate: String,
    pub object: Term,
}

impl Triple {
    pub fn new(subject: impl Into<Term>, predicate: &str, object: impl Into<Term>) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.to_string(),
            object: object.into(),
        }
    }
}

impl fmt::Display for Triple {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} <{}> {} .", self.subject, self.predicate, self.object)
    }
}

/// A triple with wildcards; `None` matches anything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TriplePattern {
    pub subject: Option<Term>,
    pub predicate: Option<String>,
    pub object: Option<Term>,
}

impl TriplePattern {
    pub fn new(subject: Option<Term>, predicate: Option<&str>, object: Option<Term>) -> Self {
        Self {
            subject,
            predicate: predicate.map(str::to_string),
            object,
        }
    }

    /// A pattern that matches exactly this triple
    pub fn exact(triple: &Triple) -> Self {
        Self {
            subject: Some(triple.subject.clone()),
            predicate: Some(triple.predicate.clone()),
            object: Some(triple.object.clone()),
        }
    }

    pub fn matches(&self, triple: &Triple) -> bool {
        self.subject.as_ref().map_or(true, |s| s == &triple.subject)
            && self
                .predicate
                .as_ref()
                .map_or(true, |p| p == &triple.predicate)
            && self.object.as_ref().map_or(true, |o| o == &triple.object)
    }
}
