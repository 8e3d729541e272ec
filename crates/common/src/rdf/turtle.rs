//! Turtle codec
//!
//! Parsing goes through `rio_turtle`, which resolves relative IRIs against
//! the address the document was fetched from. Serialization uses the same
//! crate's formatter, so what we write is always something we can read back.

use std::collections::BTreeMap;

use oxiri::Iri;
use rio_api::formatter::TriplesFormatter;
use rio_api::model as rio;
use rio_api::parser::TriplesParser;
use rio_turtle::{TurtleError, TurtleFormatter, TurtleParser};
use serde::{Deserialize, Serialize};

use super::term::{Literal, Term, Triple, TriplePattern};

#[derive(Debug, thiserror::Error)]
pub enum RdfError {
    #[error("invalid base IRI {0}: {1}")]
    InvalidBase(String, String),
    #[error("turtle parse error: {0}")]
    Parse(#[from] TurtleError),
    #[error("turtle format error: {0}")]
    Format(#[from] std::io::Error),
    #[error("document is not valid UTF-8")]
    Utf8(#[from] std::string::FromUtf8Error),
    #[error("literal in subject position: {0}")]
    LiteralSubject(String),
}

/// The triples of one fetched resource, plus the prefixes its source declared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RdfDocument {
    pub triples: Vec<Triple>,
    pub prefixes: BTreeMap<String, String>,
}

impl RdfDocument {
    /// Parse a Turtle document fetched from `base`.
    pub fn parse(text: &str, base: &str) -> Result<Self, RdfError> {
        Ok(Self {
            triples: parse(text, base)?,
            prefixes: declared_prefixes(text),
        })
    }

    pub fn find(&self, pattern: &TriplePattern) -> Vec<&Triple> {
        self.triples.iter().filter(|t| pattern.matches(t)).collect()
    }

    pub fn contains(&self, triple: &Triple) -> bool {
        self.triples.iter().any(|t| t == triple)
    }

    /// Objects of every `(subject, predicate, ?)` statement
    pub fn objects<'a>(
        &'a self,
        subject: &'a str,
        predicate: &'a str,
    ) -> impl Iterator<Item = &'a Term> + 'a {
        self.triples
            .iter()
            .filter(move |t| t.subject.as_iri() == Some(subject) && t.predicate == predicate)
            .map(|t| &t.object)
    }

    /// Value of the first `(?, predicate, ?)` statement, ignoring the subject.
    pub fn first_value(&self, predicate: &str) -> Option<&str> {
        self.triples
            .iter()
            .find(|t| t.predicate == predicate)
            .map(|t| t.object.value())
    }

    pub fn to_turtle(&self) -> Result<String, RdfError> {
        to_turtle(&self.triples)
    }
}

/// Parse Turtle text, resolving relative IRIs against `base`.
pub fn parse(text: &str, base: &str) -> Result<Vec<Triple>, RdfError> {
    let base_iri = Iri::parse(base.to_string())
        .map_err(|e| RdfError::InvalidBase(base.to_string(), e.to_string()))?;
    let mut parser = TurtleParser::new(text.as_bytes(), Some(base_iri));
    let mut triples = Vec::new();
    parser.parse_all(&mut |t: rio::Triple<'_>| -> Result<(), TurtleError> {
        // quoted (RDF-star) triples have no place in our documents
        if let (Some(subject), Some(object)) = (subject_from_rio(t.subject), object_from_rio(t.object))
        {
            triples.push(Triple {
                subject,
                predicate: t.predicate.iri.to_string(),
                object,
            });
        }
        Ok(())
    })?;
    Ok(triples)
}

/// Serialize triples as Turtle. Output uses absolute IRIs only.
pub fn to_turtle(triples: &[Triple]) -> Result<String, RdfError> {
    let mut formatter = TurtleFormatter::new(Vec::new());
    for triple in triples {
        format_triple(&mut formatter, triple)?;
    }
    let bytes = formatter.finish()?;
    Ok(String::from_utf8(bytes)?)
}

fn format_triple(
    formatter: &mut TurtleFormatter<Vec<u8>>,
    triple: &Triple,
) -> Result<(), RdfError> {
    let subject = match &triple.subject {
        Term::Iri(iri) => rio::Subject::NamedNode(rio::NamedNode { iri }),
        Term::Blank(id) => rio::Subject::BlankNode(rio::BlankNode { id }),
        Term::Literal(literal) => return Err(RdfError::LiteralSubject(literal.value.clone())),
    };
    let object = match &triple.object {
        Term::Iri(iri) => rio::Term::NamedNode(rio::NamedNode { iri }),
        Term::Blank(id) => rio::Term::BlankNode(rio::BlankNode { id }),
        Term::Literal(literal) => rio::Term::Literal(literal.as_rio()),
    };
    formatter.format(&rio::Triple {
        subject,
        predicate: rio::NamedNode {
            iri: &triple.predicate,
        },
        object,
    })?;
    Ok(())
}

fn subject_from_rio(subject: rio::Subject<'_>) -> Option<Term> {
    #[allow(unreachable_patterns)]
    match subject {
        rio::Subject::NamedNode(node) => Some(Term::Iri(node.iri.to_string())),
        rio::Subject::BlankNode(node) => Some(Term::Blank(node.id.to_string())),
        _ => None,
    }
}

fn object_from_rio(object: rio::Term<'_>) -> Option<Term> {
    #[allow(unreachable_patterns)]
    match object {
        rio::Term::NamedNode(node) => Some(Term::Iri(node.iri.to_string())),
        rio::Term::BlankNode(node) => Some(Term::Blank(node.id.to_string())),
        rio::Term::Literal(rio::Literal::Simple { value }) => {
            Some(Term::Literal(Literal::simple(value)))
        }
        rio::Term::Literal(rio::Literal::LanguageTaggedString { value, language }) => {
            Some(Term::Literal(Literal::lang(value, language)))
        }
        rio::Term::Literal(rio::Literal::Typed { value, datatype }) => {
            Some(Term::Literal(Literal::typed(value, datatype.iri)))
        }
        _ => None,
    }
}

/// Collect `@prefix` / `PREFIX` declarations from Turtle source.
fn declared_prefixes(text: &str) -> BTreeMap<String, String> {
    let mut prefixes = BTreeMap::new();
    for line in text.lines() {
        let line = line.trim_start();
        let rest = if let Some(rest) = line.strip_prefix("@prefix") {
            rest
        } else if line
            .get(..6)
            .is_some_and(|head| head.eq_ignore_ascii_case("prefix"))
        {
            &line[6..]
        } else {
            continue;
        };
        let Some((name, rest)) = rest.trim_start().split_once(':') else {
            continue;
        };
        let Some(start) = rest.find('<') else {
            continue;
        };
        let Some(len) = rest[start + 1..].find('>') else {
            continue;
        };
        prefixes.insert(
            name.trim().to_string(),
            rest[start + 1..start + 1 + len].to_string(),
        );
    }
    prefixes
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::PRED;

    const CARD: &str = r#"
@prefix foaf: <http://xmlns.com/foaf/0.1/> .
@prefix dc: <http://purl.org/dc/terms/> .
PREFIX pim: <http://www.w3.org/ns/pim/space#>

<> dc:title "WebID profile of Alice" ;
   foaf:primaryTopic <#me> .

<#me> a foaf:Person ;
   foaf:name "Alice"@en ;
   pim:storage <../storage/> ;
   foaf:knows <https://bob.example/profile/card#me> .
"#;

    #[test]
    fn test_parse_resolves_relative_iris() {
        let doc = RdfDocument::parse(CARD, "https://alice.example/profile/card").unwrap();
        let me = "https://alice.example/profile/card#me";

        assert_eq!(doc.triples.len(), 6);
        assert_eq!(
            doc.objects(me, PRED.storage).next(),
            Some(&Term::iri("https://alice.example/storage/"))
        );
        assert_eq!(
            doc.objects(me, PRED.name).next(),
            Some(&Term::Literal(Literal::lang("Alice", "en")))
        );
        assert_eq!(
            doc.first_value(PRED.title),
            Some("WebID profile of Alice")
        );
    }

    #[test]
    fn test_declared_prefixes() {
        let doc = RdfDocument::parse(CARD, "https://alice.example/profile/card").unwrap();
        assert_eq!(doc.prefixes.len(), 3);
        assert_eq!(
            doc.prefixes.get("pim").map(String::as_str),
            Some("http://www.w3.org/ns/pim/space#")
        );
    }

    #[test]
    fn test_serialized_document_parses_back() {
        let triples = vec![
            Triple::new(
                "https://alice.example/storage/abcde",
                PRED.title,
                Literal::simple("Quotes \"inside\" and a\nnewline"),
            ),
            Triple::new(
                "https://alice.example/storage/abcde",
                PRED.r#type,
                PRED.class_document,
            ),
            Triple::new(
                "https://alice.example/storage/other",
                PRED.maker,
                "https://alice.example/profile/card#me",
            ),
        ];

        let text = to_turtle(&triples).unwrap();
        let parsed = parse(&text, "https://alice.example/storage/abcde").unwrap();
        assert_eq!(parsed, triples);
    }

    #[test]
    fn test_literal_subject_is_rejected() {
        let triple = Triple::new(Literal::simple("nope"), PRED.title, Literal::simple("x"));
        assert!(matches!(
            to_turtle(&[triple]),
            Err(RdfError::LiteralSubject(_))
        ));
    }

    #[test]
    fn test_invalid_turtle() {
        assert!(matches!(
            parse("<a> <b> .", "https://alice.example/x"),
            Err(RdfError::Parse(_))
        ));
    }

    #[test]
    fn test_invalid_base() {
        assert!(matches!(
            parse("", "not a base"),
            Err(RdfError::InvalidBase(_, _))
        ));
    }
}
