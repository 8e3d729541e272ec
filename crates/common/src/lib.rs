/**
 * Agents that operate on the wallet's social graph.
 *  - Graph assembly and neighbour resolution
 *  - Node creation, linking and ACL management
 *  - Conversion into render-ready node models
 */
pub mod agent;
/**
 * Graph events handed to whoever renders the graph.
 */
pub mod dispatch;
/**
 * Client side of the Solid / Linked Data Platform protocol.
 * Handles proxy resolution, HTTP transport and
 *  SPARQL-update patch bodies.
 */
pub mod ldp;
/**
 * Minimal RDF model: terms, triples, the namespaces
 *  we care about and a Turtle codec.
 */
pub mod rdf;
/**
 * Generates profile, inbox and sensor documents for
 *  test servers from a JSON blueprint.
 */
pub mod seed;
/**
 * Helper for reporting build version information.
 */
pub mod version;

pub(crate) mod util;

pub mod prelude {
    pub use crate::agent::{
        AclDocument, CenterNode, FileUpload, GraphAgent, GraphError, GraphMap, ImageSource,
        LinkType, Node, NodeInfo, NodeKind, NodeModel, NodeType, Session,
    };
    pub use crate::dispatch::{ChannelDispatcher, Dispatcher, GraphEvent, NoopDispatcher};
    pub use crate::ldp::{Fetched, HttpLdpClient, LdpError, LdpStore, MemoryLdpStore, Proxy};
    pub use crate::rdf::{Literal, RdfDocument, Term, Triple, TriplePattern, PRED};
    pub use crate::seed::{Blueprint, SeedWriter};
    pub use crate::version::build_info;
}
