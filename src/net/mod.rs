//! HTTP retrieval of remote guide images.
//!
//! - [`client`] -- The [`HttpClient`] trait and its `reqwest` implementation.

pub mod client;

pub use client::{HttpClient, HttpResponse, ReqwestHttpClient};
