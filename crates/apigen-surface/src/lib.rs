//! Per-language naming for generated API client surfaces.
//!
//! A [`SurfaceNamer`] answers every "what is this called in the target
//! language" question the rendering pipeline asks: class and method names,
//! module paths, file names, type spellings, doc comment text and sample
//! snippets. Namers are built from three smaller pieces:
//!
//! ```text
//! NameFormatter      Name ──> identifier of a given kind (class, local, key, ...)
//! TypeFormatter      TypeRef ──> language type spelling
//! CommentReformatter markdown ──> language doc markup
//! ```
//!
//! The trait's provided methods compose these; each language overrides only
//! what its conventions change.
//!
//! # Example
//!
//! ```ignore
//! use apigen_surface::namer_for_language;
//!
//! let namer = namer_for_language("ruby", "Google::Cloud::Library::V1").unwrap();
//! assert_eq!(namer.top_level_namespace(), "Google::Cloud::Library");
//! ```

pub mod calling_form;
pub mod comment;
pub mod common;
pub mod context;
pub mod formatter;
pub mod name;
pub mod registry;
pub mod traits;
pub mod type_name;
pub mod types;
pub mod version;

#[cfg(feature = "python")]
pub mod python;
#[cfg(feature = "ruby")]
pub mod ruby;

pub use calling_form::{CallingForm, calling_forms, default_calling_form};
pub use comment::{CommentReformatter, IdentityCommentReformatter, RubyCommentReformatter};
pub use common::CommonNamer;
pub use context::MethodContext;
pub use formatter::{CommonNameFormatter, NameFormatter, PythonNameFormatter, RubyNameFormatter};
pub use name::{Name, NamePath, to_snake_case};
pub use registry::{
    SurfaceLanguage, language, languages, namer_for_config, namer_for_language, register_language,
};
pub use traits::{RANDOM_TOKEN, SurfaceError, SurfaceNamer, Synchronicity, Visibility};
pub use type_name::TypeName;
pub use types::{CommonTypeFormatter, PythonTypeFormatter, RubyTypeFormatter, TypeFormatter};
pub use version::is_version;

#[cfg(feature = "python")]
pub use python::PythonNamer;
#[cfg(feature = "ruby")]
pub use ruby::RubyNamer;
