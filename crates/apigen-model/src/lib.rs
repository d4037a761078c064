//! Service model vocabulary for apigen.
//!
//! This crate defines the already-parsed service description that configuration
//! resolution runs against: interfaces, methods, message types, fields and type
//! references, plus the by-name symbol tables used to resolve references.
//! These types are used by:
//! - `apigen-config` to validate configuration references
//! - `apigen-surface` to compute names and type spellings
//!
//! The model is never mutated by either consumer.

mod interface;
mod message;
mod model;
mod types;

pub use interface::{EMPTY_TYPE, Interface, Method, OPERATION_TYPE, Streaming};
pub use message::{EnumType, Field, MessageType};
pub use model::Model;
pub use types::{PrimitiveType, TypeKind, TypeRef};

/// Last dotted segment of a fully-qualified name.
pub fn simple_name(full_name: &str) -> &str {
    full_name.rsplit('.').next().unwrap_or(full_name)
}
