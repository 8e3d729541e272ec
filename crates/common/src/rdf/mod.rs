//! RDF building blocks shared by every agent
//!
//! - **[`Term`]** / **[`Triple`]**: owned, hashable RDF statements
//! - **[`PRED`]**: the fixed set of predicate and class IRIs the wallet speaks
//! - **[`turtle`]**: parsing fetched documents and serializing new ones
//! - **[`Writer`]**: accumulates triples for a document before it is PUT

mod namespaces;
mod term;
pub mod turtle;
mod writer;

pub use namespaces::{Predicates, PRED};
pub use term::{Literal, Term, Triple, TriplePattern};
pub use turtle::{RdfDocument, RdfError};
pub use writer::Writer;

/// Strip the fragment from an IRI, yielding the address of the
///  document that describes it.
pub fn document_uri(iri: &str) -> &str {
    match iri.split_once('#') {
        Some((doc, _)) => doc,
        None => iri,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_document_uri_strips_fragment() {
        assert_eq!(
            document_uri("https://alice.example/profile/card#me"),
            "https://alice.example/profile/card"
        );
        assert_eq!(
            document_uri("https://alice.example/storage/abc"),
            "https://alice.example/storage/abc"
        );
    }
}
