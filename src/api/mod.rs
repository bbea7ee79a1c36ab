//! Database REST client and protocol types.

pub mod client;

pub use client::RtdbClient;
