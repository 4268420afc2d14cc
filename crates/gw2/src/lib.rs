//! Read-only client for the Guild Wars 2 REST API (v2).
//!
//! [`RemoteDataSource`] is the seam the census pipeline depends on;
//! [`Gw2Client`] implements it over HTTP with [`reqwest`]. Tests provide
//! their own in-memory implementations of the trait.

pub mod client;
pub mod source;

pub use client::{Gw2ApiError, Gw2Client, Gw2ClientConfig, DEFAULT_BASE_URL, MAX_IDS_PER_REQUEST};
pub use source::RemoteDataSource;
