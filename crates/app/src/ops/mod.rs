pub mod acl;
pub mod friends;
pub mod graph;
pub mod init;
pub mod link;
pub mod node;
pub mod seed;
pub mod upload;
pub mod version;

pub use acl::Acl;
pub use friends::Friends;
pub use graph::Graph;
pub use init::Init;
pub use link::{Link, Unlink};
pub use node::Node;
pub use seed::Seed;
pub use upload::Upload;
pub use version::Version;
