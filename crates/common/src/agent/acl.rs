//! # Access control documents
//!
//! Every resource the wallet writes is governed by an ACL document stored
//! next to it at `<resource>.acl`. There is a single fixed policy:
//!
//! - `#owner`: the creator's WebID gets `Control`, `Read` and `Write` on
//!   the resource *and* on the ACL itself
//! - `#readall`: unless the resource is confidential, everyone
//!   (`foaf:Agent`) may `Read` the resource
//!
//! Finer-grained sharing is not supported.

use std::collections::BTreeMap;

use bytes::Bytes;
use serde::{Deserialize, Serialize};

use crate::ldp::{LdpStore, TURTLE};
use crate::rdf::{RdfError, Term, Triple, Writer, PRED};

use super::{GraphAgent, GraphError};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AccessMode {
    Read,
    Write,
    Control,
}

impl AccessMode {
    pub fn iri(&self) -> &'static str {
        match self {
            AccessMode::Read => PRED.read,
            AccessMode::Write => PRED.write,
            AccessMode::Control => PRED.control,
        }
    }

    pub fn from_iri(iri: &str) -> Option<Self> {
        [AccessMode::Read, AccessMode::Write, AccessMode::Control]
            .into_iter()
            .find(|mode| mode.iri() == iri)
    }
}

/// The fixed two-rule policy for one resource
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AclDocument {
    resource: String,
    web_id: String,
    confidential: bool,
}

impl AclDocument {
    pub fn new(resource: &str, web_id: &str, confidential: bool) -> Self {
        Self {
            resource: resource.to_string(),
            web_id: web_id.to_string(),
            confidential,
        }
    }

    pub fn acl_uri_for(resource: &str) -> String {
        format!("{}.acl", resource)
    }

    pub fn uri(&self) -> String {
        Self::acl_uri_for(&self.resource)
    }

    pub fn resource(&self) -> &str {
        &self.resource
    }

    pub fn is_confidential(&self) -> bool {
        self.confidential
    }

    pub fn triples(&self) -> Vec<Triple> {
        let acl_uri = self.uri();
        let owner = Term::iri(format!("{}#owner", acl_uri));
        let mut writer = Writer::new();

        writer
            .add_triple(owner.clone(), PRED.r#type, PRED.auth)
            .add_triple(owner.clone(), PRED.access, Term::iri(&self.resource))
            .add_triple(owner.clone(), PRED.access, Term::iri(&acl_uri))
            .add_triple(owner.clone(), PRED.agent, Term::iri(&self.web_id));
        for mode in [AccessMode::Control, AccessMode::Read, AccessMode::Write] {
            writer.add_triple(owner.clone(), PRED.mode, mode.iri());
        }

        if !self.confidential {
            let all = Term::iri(format!("{}#readall", acl_uri));
            writer
                .add_triple(all.clone(), PRED.r#type, PRED.auth)
                .add_triple(all.clone(), PRED.access, Term::iri(&self.resource))
                .add_triple(all.clone(), PRED.agent_class, PRED.class_agent)
                .add_triple(all, PRED.mode, AccessMode::Read.iri());
        }

        writer.triples().to_vec()
    }

    pub fn to_turtle(&self) -> Result<String, RdfError> {
        crate::rdf::turtle::to_turtle(&self.triples())
    }
}

/// One `acl:Authorization` block read back from an ACL document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Authorization {
    pub subject: String,
    pub access_to: Vec<String>,
    pub agents: Vec<String>,
    pub agent_classes: Vec<String>,
    pub modes: Vec<AccessMode>,
}

impl Authorization {
    /// Group the triples of an ACL document by authorization
    pub fn parse(triples: &[Triple]) -> Vec<Authorization> {
        let mut blocks: BTreeMap<&str, Authorization> = BTreeMap::new();
        for triple in triples {
            if triple.predicate == PRED.r#type && triple.object.as_iri() == Some(PRED.auth) {
                let subject = triple.subject.value();
                blocks.entry(subject).or_insert_with(|| Authorization {
                    subject: subject.to_string(),
                    ..Authorization::default()
                });
            }
        }

        for triple in triples {
            let Some(block) = blocks.get_mut(triple.subject.value()) else {
                continue;
            };
            let object = triple.object.value().to_string();
            match triple.predicate.as_str() {
                p if p == PRED.access => block.access_to.push(object),
                p if p == PRED.agent => block.agents.push(object),
                p if p == PRED.agent_class => block.agent_classes.push(object),
                p if p == PRED.mode => block.modes.extend(AccessMode::from_iri(&object)),
                _ => {}
            }
        }

        blocks.into_values().collect()
    }

    pub fn is_public(&self) -> bool {
        self.agent_classes.iter().any(|c| c == PRED.class_agent)
    }

    pub fn grants(&self, mode: AccessMode) -> bool {
        self.modes.contains(&mode)
    }
}

impl<S: LdpStore> GraphAgent<S> {
    /// Write the ACL governing `uri`, returning the ACL's URI.
    ///
    /// Failures are returned, not swallowed; callers that can live without
    /// the ACL may ignore the error.
    pub async fn create_acl(
        &self,
        uri: &str,
        web_id: &str,
        confidential: bool,
    ) -> Result<String, GraphError> {
        if uri.is_empty() || web_id.is_empty() {
            return Err(GraphError::MissingArgument("create_acl"));
        }

        let acl = AclDocument::new(uri, web_id, confidential);
        let acl_uri = acl.uri();
        let body = acl.to_turtle()?;

        match self.store().put(&acl_uri, Bytes::from(body), TURTLE).await {
            Ok(()) => {
                tracing::info!(
                    "wrote ACL {} (owner {}, public read: {})",
                    acl_uri,
                    web_id,
                    !confidential
                );
                Ok(acl_uri)
            }
            Err(e) => {
                tracing::warn!("could not write ACL {}: {}", acl_uri, e);
                Err(e.into())
            }
        }
    }
}
