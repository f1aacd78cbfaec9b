//! Domain layer for the zadmin plugin.
//!
//! Core types independent of Zellij APIs and of the HTTP transport: the user,
//! account and role records, their closed status enumerations, the page shape
//! returned by listing endpoints, and the crate error type.
//!
//! # Organization
//!
//! - [`entity`]: The `Entity` trait that list controllers are generic over
//! - [`user`], [`account`], [`role`]: Backend records
//! - [`status`]: Status enums with legal transition tables
//! - [`page`]: `Page<T>` listing payload
//! - [`error`]: Error types and result aliases

pub mod account;
pub mod entity;
pub mod error;
pub mod page;
pub mod role;
pub mod status;
pub mod user;

pub use account::Account;
pub use entity::{EditableField, Entity, FieldKind};
pub use error::{AdminError, Result};
pub use page::Page;
pub use role::Role;
pub use status::{AccountStatus, StatusKind, UserStatus};
pub use user::User;
