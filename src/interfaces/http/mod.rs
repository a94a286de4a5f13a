//! HTTP REST API interfaces
//!
//! - `middleware`: JWT authentication middleware + role extractors
//! - `common`: error mapping, pagination, validated JSON extractor
//! - `modules`: per-resource DTOs and handlers
//! - `router`: API router with Swagger documentation

pub mod common;
pub mod middleware;
pub mod modules;
pub mod router;

pub use router::create_api_router;
