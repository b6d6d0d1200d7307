// crates/network/src/lib.rs
//! Network utilities for JSON HTTP requests

mod client;
mod error;

pub use client::{Client, ClientConfig};
pub use error::{NetworkError, NetworkResult};
