//! Local development server for the wallet graph
//!
//! Serves an in-memory set of LDP resources and a `/proxy?url=` endpoint
//! compatible with the one the wallet's HTTP client routes through.

pub mod http;
