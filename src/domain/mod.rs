//! Domain layer: node models, catalog and tree building
//!
//! This layer is independent of external concerns (no I/O, no CLI, no config loading).
//! It works on already parsed `roxmltree` element nodes.

pub mod builder;
pub mod catalog;
pub mod entities;
pub mod error;
pub mod lint;
pub mod xml;

pub use builder::{build_subtree, TreeBuilder};
pub use catalog::{ModelCatalog, ModelCatalogBuilder};
pub use entities::*;
pub use error::{DomainError, DomainResult};
pub use lint::{lint_tree, IssueKind, ParameterIssue};
