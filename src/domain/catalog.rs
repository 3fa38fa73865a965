//! Node model catalog and its builder.
//!
//! The catalog is filled in two passes over the document root:
//! explicit declarations from `<TreeNodesModel>` first, then every element of
//! every `<BehaviorTree>` body that is not yet known. The first registration
//! of an ID wins; later ones are ignored.

use std::collections::BTreeMap;

use roxmltree::Node;
use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::domain::entities::{NodeModel, NodeType, ParamType};
use crate::domain::xml::{child_elements, first_child_element, model_id, plain_attributes};

pub const TREE_NODES_MODEL: &str = "TreeNodesModel";
pub const BEHAVIOR_TREE: &str = "BehaviorTree";
pub const PARAMETER: &str = "Parameter";

/// Registry of node models keyed by ID.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ModelCatalog {
    models: BTreeMap<String, NodeModel>,
    /// IDs in registration order
    order: Vec<String>,
}

impl ModelCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a model unless its ID is already taken.
    ///
    /// Returns `true` if the model was added.
    pub fn register(&mut self, model: NodeModel) -> bool {
        if self.models.contains_key(&model.id) {
            return false;
        }
        debug!("registered {} ({})", model.id, model.node_type);
        self.order.push(model.id.clone());
        self.models.insert(model.id.clone(), model);
        true
    }

    pub fn get(&self, id: &str) -> Option<&NodeModel> {
        self.models.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.models.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// All models in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &NodeModel> {
        self.order.iter().filter_map(|id| self.models.get(id))
    }

    /// Non-action models in registration order.
    pub fn displayable(&self) -> Vec<&NodeModel> {
        self.iter().filter(|m| m.is_displayable()).collect()
    }
}

/// How a model's parameter schema is obtained.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    /// Typed `<Parameter>` children of a `<TreeNodesModel>` entry
    Declared,
    /// The element's own attributes, all typed as text
    Inferred,
}

/// Builds a [`ModelCatalog`] from a document root element.
#[derive(Debug, Default)]
pub struct ModelCatalogBuilder {
    catalog: ModelCatalog,
}

impl ModelCatalogBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start from an existing catalog, e.g. one with externally known models.
    pub fn with_catalog(catalog: ModelCatalog) -> Self {
        Self { catalog }
    }

    #[instrument(level = "debug", skip_all, fields(root = root.tag_name().name()))]
    pub fn build(mut self, root: Node<'_, '_>) -> ModelCatalog {
        if let Some(model_root) = child_elements(root).find(|n| n.has_tag_name(TREE_NODES_MODEL)) {
            for node in child_elements(model_root) {
                self.register_element(node, Mode::Declared);
            }
        }

        for tree in child_elements(root).filter(|n| n.has_tag_name(BEHAVIOR_TREE)) {
            if let Some(first) = first_child_element(tree) {
                self.register_subtree(first);
            }
        }

        self.catalog
    }

    fn register_subtree(&mut self, node: Node<'_, '_>) {
        self.register_element(node, Mode::Inferred);
        for child in child_elements(node) {
            self.register_subtree(child);
        }
    }

    fn register_element(&mut self, node: Node<'_, '_>, mode: Mode) {
        let id = model_id(node);
        if self.catalog.contains(id) {
            return;
        }

        let mut model = NodeModel::new(id, NodeType::from_tag(node.tag_name().name()));
        match mode {
            Mode::Declared => {
                for param in child_elements(node).filter(|n| n.has_tag_name(PARAMETER)) {
                    let Some(label) = param.attribute("label") else {
                        warn!("{}: <Parameter> without label skipped", id);
                        continue;
                    };
                    let param_type = ParamType::from_declared(
                        param.attribute("type"),
                        param.attribute("options"),
                    );
                    model = model.with_parameter(label, param_type);
                }
            }
            Mode::Inferred => {
                for (name, _) in plain_attributes(node) {
                    model = model.with_parameter(name, ParamType::Text);
                }
            }
        }
        self.catalog.register(model);
    }
}
