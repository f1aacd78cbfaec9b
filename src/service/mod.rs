//! Service boundary to the remote REST backend.
//!
//! The backend is an external collaborator; this layer only knows how to phrase
//! requests to it and how to read its answers. Transport is Zellij's
//! `web_request`, driven from `main.rs`.
//!
//! # Modules
//!
//! - `endpoint`: Base URL handling and percent-encoded URL construction
//! - `entity_service`: Users/accounts wrapper (listing, search, lookups, mutations)
//! - `roles`: Role catalogue and role assignment
//! - `request`: Request descriptions and the context round-tripped with them
//! - `response`: Status checking and payload decoding

pub mod endpoint;
pub mod entity_service;
pub mod request;
pub mod response;
pub mod roles;

pub use endpoint::Endpoint;
pub use entity_service::{AccountService, EntityService, UserService};
pub use request::{
    FetchMode, HttpCall, Method, MutationKind, Purpose, RequestContext, Resource, ResponseShape,
    ServiceRequest,
};
pub use roles::RoleService;
