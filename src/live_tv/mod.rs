//! Live TV guide entities and the backend services that supply them.
//!
//! # Module layout
//!
//! - [`program`] -- The [`LiveTvProgram`] entity and its [`ProgramInfo`] source record.
//! - [`service`] -- The [`LiveTvService`] trait implemented by backend services.
//! - [`registry`] -- Name-keyed registry of backend services.
//! - [`template`] -- A backend service that fetches images from a URL template.

pub mod program;
pub mod registry;
pub mod service;
pub mod template;

pub use program::{LiveTvProgram, ProgramInfo};
pub use registry::ServiceRegistry;
pub use service::{LiveTvService, StreamResponse};
pub use template::UrlTemplateService;
