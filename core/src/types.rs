//! Summary of a completed fetch.
//!
//! # Design
//! These are reporting DTOs only; the redirect loop keeps no other state
//! across iterations. They derive `Serialize` so callers can emit the chain
//! as JSON.

use serde::Serialize;

/// One request/response exchange in a redirect chain.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hop {
    pub url: String,
    /// `None` when the response had no parseable status line.
    pub status: Option<u16>,
    pub bytes: u64,
}

/// The redirect chain of one fetch, in visiting order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FetchReport {
    pub hops: Vec<Hop>,
    pub final_url: String,
    pub redirects: usize,
}
