use super::term::{Term, Triple};
use super::turtle::{to_turtle, RdfError};

/// Collects the triples of a document that is about to be written.
///
/// Insertion order is kept; adding a triple twice is a no-op.
#[derive(Debug, Clone, Default)]
pub struct Writer {
    triples: Vec<Triple>,
}

impl Writer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_triple(
        &mut self,
        subject: impl Into<Term>,
        predicate: &str,
        object: impl Into<Term>,
    ) -> &mut Self {
        self.push(Triple::new(subject, predicate, object))
    }

    pub fn push(&mut self, triple: Triple) -> &mut Self {
        if !self.triples.contains(&triple) {
            self.triples.push(triple);
        }
        self
    }

    pub fn triples(&self) -> &[Triple] {
        &self.triples
    }

    pub fn len(&self) -> usize {
        self.triples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.triples.is_empty()
    }

    /// Serialize everything collected so far as Turtle
    pub fn end(&self) -> Result<String, RdfError> {
        to_turtle(&self.triples)
    }
}
