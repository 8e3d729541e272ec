//! The graph agent
//!
//! [`GraphAgent`] is the only thing the wallet's UI talks to when it wants
//! to look at or change the social graph. It is composed from three
//! injected capabilities:
//!
//! - an [`LdpStore`] that moves triples in and out of Solid servers
//! - a [`Dispatcher`] that receives [`GraphEvent`](crate::dispatch::GraphEvent)s
//! - a [`Session`] identifying the signed-in WebID
//!
//! # Graph maps
//!
//! ```text
//!                 knows            isRelatedTo
//!   bob#me  <------------  alice#me  ------------>  storage/abcde
//!                            |
//!                            | passport
//!                            v
//!                     storage/fghij (403, dropped)
//! ```
//!
//! A [`GraphMap`] is the center node followed by its one-hop neighbours
//! along the allow-listed predicates. Neighbours that answered with an
//! error are kept and flagged, except forbidden ones, which are dropped.
//!
//! # Writes
//!
//! Every document the agent creates gets its own ACL first
//! (see [`AclDocument`]). Links are appended with a PATCH after checking
//! that the exact triple is not already present.

mod acl;
mod convert;
mod error;
mod graph;
mod link;
mod node;

use std::sync::Arc;

use crate::dispatch::{Dispatcher, NoopDispatcher};
use crate::ldp::LdpStore;

pub use acl::{AccessMode, AclDocument, Authorization};
pub use convert::{convert_to_nodes, NodeModel, NodeType, Rank};
pub use error::GraphError;
pub use graph::{CenterNode, GraphMap, Neighbours, Node};
pub use link::LinkType;
pub use node::{FileUpload, ImageCheck, ImageSource, NodeInfo, NodeKind};

/// Who is using the agent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Session {
    web_id: Option<String>,
}

impl Session {
    pub fn new(web_id: impl Into<String>) -> Self {
        Self {
            web_id: Some(web_id.into()),
        }
    }

    pub fn anonymous() -> Self {
        Self::default()
    }

    pub fn web_id(&self) -> Option<&str> {
        self.web_id.as_deref()
    }
}

#[derive(Debug, Clone)]
pub struct GraphAgent<S> {
    store: S,
    dispatcher: Arc<dyn Dispatcher>,
    session: Session,
}

impl<S: LdpStore> GraphAgent<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            dispatcher: Arc::new(NoopDispatcher),
            session: Session::anonymous(),
        }
    }

    pub fn with_dispatcher(mut self, dispatcher: impl Dispatcher + 'static) -> Self {
        self.dispatcher = Arc::new(dispatcher);
        self
    }

    pub fn with_session(mut self, session: Session) -> Self {
        self.session = session;
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub(crate) fn dispatcher(&self) -> &dyn Dispatcher {
        self.dispatcher.as_ref()
    }
}
