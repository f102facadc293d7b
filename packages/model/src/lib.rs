//! # Sitebuilder Model
//!
//! The element tree that every site page is made of, and the pieces that
//! create, identify and (de)serialize it.
//!
//! A page is a sequence of [`Element`]s whose single entry is the `__body`
//! root. An element is a container iff its [`Content`] is
//! [`Content::Children`]; everything else carries a flat map of widget fields.

pub mod catalog;
pub mod element;
pub mod error;
pub mod id_generator;
pub mod serializer;

pub use catalog::create_element;
pub use element::{Category, Content, Element, ElementType, Fields, Styles, ROOT_ID};
pub use error::{DocumentError, DocumentResult};
pub use id_generator::{get_site_hash, IdGenerator};
pub use serializer::{deserialize_tree, root_only_tree, serialize_tree, serialize_tree_pretty, validate_tree};
