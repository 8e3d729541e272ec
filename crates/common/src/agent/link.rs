use std::fmt;
use std::str::FromStr;

use futures::future::{join_all, try_join};
use serde::{Deserialize, Serialize};

use crate::dispatch::GraphEvent;
use crate::ldp::{LdpStore, SparqlPatch};
use crate::rdf::{document_uri, Term, Triple, TriplePattern, PRED};

use super::{GraphAgent, GraphError};

/// The relationships a user can draw between two nodes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    Generic,
    Knows,
    Passport,
}

impl LinkType {
    pub fn predicate(&self) -> &'static str {
        match self {
            LinkType::Generic => PRED.is_related_to,
            LinkType::Knows => PRED.knows,
            LinkType::Passport => PRED.passport,
        }
    }
}

impl FromStr for LinkType {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "generic" => Ok(LinkType::Generic),
            "knows" => Ok(LinkType::Knows),
            "passport" => Ok(LinkType::Passport),
            other => Err(GraphError::UnknownLinkType(other.to_string())),
        }
    }
}

impl fmt::Display for LinkType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LinkType::Generic => "generic",
            LinkType::Knows => "knows",
            LinkType::Passport => "passport",
        };
        f.write_str(name)
    }
}

impl<S: LdpStore> GraphAgent<S> {
    /// Link `start` to `end` once both are known to exist.
    pub async fn link_nodes(
        &self,
        start: &str,
        link_type: LinkType,
        end: &str,
        draw: bool,
    ) -> Result<(), GraphError> {
        try_join(self.store().head(start), self.store().head(end)).await?;

        let triple = Triple::new(Term::iri(start), link_type.predicate(), Term::iri(end));
        self.write_triples(start, vec![triple], draw).await
    }

    pub async fn unlink_nodes(
        &self,
        start: &str,
        link_type: LinkType,
        end: &str,
    ) -> Result<(), GraphError> {
        let triple = Triple::new(Term::iri(start), link_type.predicate(), Term::iri(end));
        self.delete_triples(start, vec![triple]).await
    }

    /// Append `triples` to the document at `uri` with a single PATCH.
    ///
    /// Nothing is written if any of the triples already exists in its
    /// subject's document; the first such triple is returned as
    /// [`GraphError::Duplicate`].
    pub async fn write_triples(
        &self,
        uri: &str,
        triples: Vec<Triple>,
        draw: bool,
    ) -> Result<(), GraphError> {
        if triples.is_empty() {
            return Ok(());
        }

        let patterns: Vec<TriplePattern> = triples.iter().map(TriplePattern::exact).collect();
        let checks = join_all(triples.iter().zip(&patterns).map(|(triple, pattern)| {
            let lookup = triple.subject.as_iri().unwrap_or(uri);
            self.store().find_triples(document_uri(lookup), pattern)
        }))
        .await;

        for (triple, found) in triples.iter().zip(checks) {
            if !found?.is_empty() {
                tracing::info!("{} already holds {}", uri, triple);
                return Err(GraphError::Duplicate(triple.clone()));
            }
        }

        let animate = draw
            && triples.len() == 1
            && (triples[0].predicate == PRED.is_related_to || triples[0].predicate == PRED.knows);
        let event = animate.then(|| GraphEvent::DrawNewNode {
            uri: triples[0].object.value().to_string(),
            predicate: triples[0].predicate.clone(),
        });

        let mut batch: Vec<Triple> = Vec::with_capacity(triples.len());
        for triple in triples {
            if !batch.contains(&triple) {
                batch.push(triple);
            }
        }

        tracing::debug!("{}: inserting {} triples", uri, batch.len());
        self.store()
            .patch(uri, &SparqlPatch::insert(batch))
            .await?;

        if let Some(event) = event {
            self.dispatcher().dispatch(event);
        }
        Ok(())
    }

    /// Remove `triples` from the document at `uri` with a single PATCH.
    pub async fn delete_triples(&self, uri: &str, triples: Vec<Triple>) -> Result<(), GraphError> {
        if triples.is_empty() {
            return Err(GraphError::MissingArgument("delete_triples"));
        }
        tracing::debug!("{}: deleting {} triples", uri, triples.len());
        self.store()
            .patch(uri, &SparqlPatch::delete(triples))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_type_predicates() {
        assert_eq!(LinkType::Generic.predicate(), PRED.is_related_to);
        assert_eq!(LinkType::Knows.predicate(), PRED.knows);
        assert_eq!(LinkType::Passport.predicate(), PRED.passport);
    }

    #[test]
    fn test_link_type_parse() {
        for link in [LinkType::Generic, LinkType::Knows, LinkType::Passport] {
            assert_eq!(link.to_string().parse::<LinkType>().unwrap(), link);
        }
        assert!(matches!(
            "likes".parse::<LinkType>(),
            Err(GraphError::UnknownLinkType(t)) if t == "likes"
        ));
    }
}
