//! Behavior tree XML model.
//!
//! Parses a behavior tree XML document into a catalog of node models
//! ([`domain::ModelCatalog`]) and one [`domain::TreeNode`] hierarchy per
//! `<BehaviorTree>` element.
//!
//! ```
//! use std::sync::Arc;
//! use btxml::application::services::DocumentService;
//! use btxml::infrastructure::traits::RealFileSystem;
//!
//! let service = DocumentService::new(Arc::new(RealFileSystem));
//! let doc = service
//!     .parse_str(r#"<Root><BehaviorTree><Control ID="Seq"><Action name="go" speed="5"/></Control></BehaviorTree></Root>"#)
//!     .unwrap();
//! assert_eq!(doc.trees[0].root.model_id, "Seq");
//! assert_eq!(doc.trees[0].root.children[0].instance_name.as_deref(), Some("go"));
//! ```

pub mod application;
pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod infrastructure;
pub mod util;
