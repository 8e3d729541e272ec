//! SPARQL Update bodies for PATCH requests
//!
//! Solid servers accept `application/sparql-update` bodies made of
//! `DELETE DATA { ... }` and `INSERT DATA { ... }` operations separated by
//! `;`. The statements inside each block are plain Turtle triples, so the
//! blocks are produced and read with the same codec as whole documents.

use crate::rdf::{turtle, RdfError, Triple};

#[derive(Debug, thiserror::Error)]
pub enum PatchError {
    #[error("unexpected token in patch at byte {0}: {1}")]
    UnexpectedToken(usize, String),
    #[error("unsupported patch operation: {0}")]
    UnsupportedOperation(String),
    #[error("unterminated data block")]
    Unterminated,
    #[error("triple to delete is not present: {0}")]
    MissingTriple(Triple),
    #[error("rdf error: {0}")]
    Rdf(#[from] RdfError),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SparqlPatch {
    pub delete: Vec<Triple>,
    pub insert: Vec<Triple>,
}

impl SparqlPatch {
    pub fn insert(triples: Vec<Triple>) -> Self {
        Self {
            delete: Vec::new(),
            insert: triples,
        }
    }

    pub fn delete(triples: Vec<Triple>) -> Self {
        Self {
            delete: triples,
            insert: Vec::new(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.delete.is_empty() && self.insert.is_empty()
    }

    pub fn to_sparql(&self) -> Result<String, PatchError> {
        let mut operations = Vec::new();
        if !self.delete.is_empty() {
            operations.push(format!(
                "DELETE DATA {{\n{}}}",
                turtle::to_turtle(&self.delete)?
            ));
        }
        if !self.insert.is_empty() {
            operations.push(format!(
                "INSERT DATA {{\n{}}}",
                turtle::to_turtle(&self.insert)?
            ));
        }
        Ok(operations.join(" ;\n"))
    }

    /// Parse a patch body addressed at the document `base`.
    pub fn parse(body: &str, base: &str) -> Result<Self, PatchError> {
        let mut patch = SparqlPatch::default();
        let bytes = body.as_bytes();
        let mut pos = 0;

        loop {
            pos = skip_separators(bytes, pos);
            if pos >= bytes.len() {
                break;
            }

            let (operation, next) = read_word(bytes, pos);
            let (data, next) = read_word(bytes, skip_separators(bytes, next));
            if !data.eq_ignore_ascii_case("data") {
                return Err(PatchError::UnsupportedOperation(format!(
                    "{} {}",
                    operation, data
                )));
            }

            let open = skip_separators(bytes, next);
            if bytes.get(open) != Some(&b'{') {
                return Err(PatchError::UnexpectedToken(
                    open,
                    body.get(open..open + 1).unwrap_or("EOF").to_string(),
                ));
            }
            let close = find_block_end(bytes, open + 1)?;
            let triples = turtle::parse(&body[open + 1..close], base)?;

            if operation.eq_ignore_ascii_case("insert") {
                patch.insert.extend(triples);
            } else if operation.eq_ignore_ascii_case("delete") {
                patch.delete.extend(triples);
            } else {
                return Err(PatchError::UnsupportedOperation(operation.to_string()));
            }
            pos = close + 1;
        }

        Ok(patch)
    }

    /// Apply the patch to a document's triples.
    ///
    /// Every deleted triple must exist. Inserted triples that already
    /// exist are not added twice.
    pub fn apply(&self, triples: &mut Vec<Triple>) -> Result<(), PatchError> {
        for triple in &self.delete {
            match triples.iter().position(|t| t == triple) {
                Some(index) => {
                    triples.remove(index);
                }
                None => return Err(PatchError::MissingTriple(triple.clone())),
            }
        }
        for triple in &self.insert {
            if !triples.contains(triple) {
                triples.push(triple.clone());
            }
        }
        Ok(())
    }
}

fn skip_separators(bytes: &[u8], mut pos: usize) -> usize {
    while pos < bytes.len() && (bytes[pos].is_ascii_whitespace() || bytes[pos] == b';') {
        pos += 1;
    }
    pos
}

fn read_word(bytes: &[u8], start: usize) -> (&str, usize) {
    let mut end = start;
    while end < bytes.len() && bytes[end].is_ascii_alphabetic() {
        end += 1;
    }
    // only ASCII letters were consumed, so the slice is valid UTF-8
    (std::str::from_utf8(&bytes[start..end]).unwrap_or(""), end)
}

/// Find the `}` closing a data block, skipping strings, IRIs and comments.
fn find_block_end(bytes: &[u8], mut pos: usize) -> Result<usize, PatchError> {
    while pos < bytes.len() {
        match bytes[pos] {
            b'}' => return Ok(pos),
            quote @ (b'"' | b'\'') => {
                pos += 1;
                while pos < bytes.len() && bytes[pos] != quote {
                    if bytes[pos] == b'\\' {
                        pos += 1;
                    }
                    pos += 1;
                }
            }
            b'<' => {
                while pos < bytes.len() && bytes[pos] != b'>' {
                    pos += 1;
                }
            }
            b'#' => {
                while pos < bytes.len() && bytes[pos] != b'\n' {
                    pos += 1;
                }
            }
            _ => {}
        }
        pos += 1;
    }
    Err(PatchError::Unterminated)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rdf::{Literal, PRED};

    const DOC: &str = "https://alice.example/storage/abcde";

    fn related() -> Triple {
        Triple::new(DOC, PRED.is_related_to, "https://alice.example/storage/fghij")
    }

    #[test]
    fn test_insert_only() {
        let patch = SparqlPatch::insert(vec![related()]);
        let body = patch.to_sparql().unwrap();

        assert!(body.starts_with("INSERT DATA {"));
        assert!(!body.contains("DELETE"));
        assert_eq!(SparqlPatch::parse(&body, DOC).unwrap(), patch);
    }

    #[test]
    fn test_braces_inside_literals() {
        let tricky = Triple::new(
            DOC,
            PRED.description,
            Literal::simple("a } brace, a \" quote and # no comment"),
        );
        let patch = SparqlPatch {
            delete: vec![related()],
            insert: vec![tricky],
        };

        let body = patch.to_sparql().unwrap();
        assert_eq!(SparqlPatch::parse(&body, DOC).unwrap(), patch);
    }

    #[test]
    fn test_parse_handwritten_body() {
        let body = r#"
            INSERT DATA { <> <http://purl.org/dc/terms/title> "Trip" . } ;
            delete data { <#a> <http://xmlns.com/foaf/0.1/knows> <#b> . }
        "#;
        let patch = SparqlPatch::parse(body, DOC).unwrap();

        assert_eq!(
            patch.insert,
            vec![Triple::new(DOC, PRED.title, Literal::simple("Trip"))]
        );
        assert_eq!(patch.delete[0].subject.value(), format!("{DOC}#a"));
    }

    #[test]
    fn test_rejects_unknown_operations() {
        assert!(matches!(
            SparqlPatch::parse("INSERT { <a> <b> <c> }", DOC),
            Err(PatchError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            SparqlPatch::parse("CLEAR DATA { }", DOC),
            Err(PatchError::UnsupportedOperation(_))
        ));
        assert!(matches!(
            SparqlPatch::parse("INSERT DATA { <a> <b> \"c\" .", DOC),
            Err(PatchError::Unterminated)
        ));
    }

    #[test]
    fn test_apply() {
        let mut triples = vec![related()];
        let title = Triple::new(DOC, PRED.title, Literal::simple("Trip"));

        SparqlPatch::insert(vec![title.clone(), title.clone()])
            .apply(&mut triples)
            .unwrap();
        assert_eq!(triples.len(), 2);

        SparqlPatch::delete(vec![related()])
            .apply(&mut triples)
            .unwrap();
        assert_eq!(triples, vec![title]);

        assert!(matches!(
            SparqlPatch::delete(vec![related()]).apply(&mut triples),
            Err(PatchError::MissingTriple(_))
        ));
    }
}
