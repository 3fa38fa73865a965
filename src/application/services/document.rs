//! Document service
//!
//! Parses behavior tree XML documents into a model catalog plus built trees.

use std::path::Path;
use std::sync::Arc;

use roxmltree::Document;
use tracing::{debug, instrument};

use crate::application::{ApplicationResult, IoResultExt};
use crate::domain::catalog::BEHAVIOR_TREE;
use crate::domain::xml::child_elements;
use crate::domain::{
    lint_tree, BehaviorTreeDocument, DomainError, ModelCatalog, ModelCatalogBuilder, ParameterIssue,
    TreeBuilder,
};
use crate::infrastructure::traits::FileSystem;

/// Result of checking a document: the parsed model plus lint findings.
#[derive(Debug, Clone)]
pub struct CheckReport {
    pub document: BehaviorTreeDocument,
    pub issues: Vec<ParameterIssue>,
}

impl CheckReport {
    pub fn is_clean(&self) -> bool {
        self.issues.is_empty()
    }
}

/// Service for loading behavior tree documents.
pub struct DocumentService {
    fs: Arc<dyn FileSystem>,
}

impl DocumentService {
    pub fn new(fs: Arc<dyn FileSystem>) -> Self {
        Self { fs }
    }

    /// Read and parse a document from disk.
    #[instrument(level = "debug", skip(self))]
    pub fn load(&self, path: &Path) -> ApplicationResult<BehaviorTreeDocument> {
        let content = self
            .fs
            .read_to_string(path)
            .with_path_context("read document", path)?;
        self.parse_str(&content)
    }

    /// Parse a document held in memory.
    ///
    /// The catalog is built first from the whole root, then every
    /// `<BehaviorTree>` child of the root is built in document order.
    pub fn parse_str(&self, xml: &str) -> ApplicationResult<BehaviorTreeDocument> {
        self.parse_with_catalog(xml, ModelCatalog::new())
    }

    /// Like [`parse_str`](Self::parse_str), starting from a pre-filled catalog.
    pub fn parse_with_catalog(
        &self,
        xml: &str,
        catalog: ModelCatalog,
    ) -> ApplicationResult<BehaviorTreeDocument> {
        let doc = Document::parse(xml)?;
        let root = doc.root_element();

        let catalog = ModelCatalogBuilder::with_catalog(catalog).build(root);
        debug!("catalog: {} models", catalog.len());

        let builder = TreeBuilder::new(&catalog);
        let trees = child_elements(root)
            .filter(|n| n.has_tag_name(BEHAVIOR_TREE))
            .map(|bt| builder.build(bt))
            .collect::<Result<Vec<_>, _>>()?;
        if trees.is_empty() {
            return Err(DomainError::structural(format!(
                "no <{}> element under <{}>",
                BEHAVIOR_TREE,
                root.tag_name().name()
            ))
            .into());
        }
        debug!("built {} tree(s)", trees.len());

        Ok(BehaviorTreeDocument { catalog, trees })
    }

    /// Load a document and lint every tree's parameter values.
    #[instrument(level = "debug", skip(self))]
    pub fn check(&self, path: &Path) -> ApplicationResult<CheckReport> {
        let document = self.load(path)?;
        let issues = document
            .trees
            .iter()
            .flat_map(|tree| lint_tree(&tree.root, &document.catalog))
            .collect();
        Ok(CheckReport { document, issues })
    }
}
