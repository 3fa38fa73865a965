//! Terminal rendering of built trees and catalogs.

use termtree::Tree;

use crate::domain::{ModelCatalog, NodeModel, TreeNode};

pub trait TreeRender {
    fn to_tree_string(&self, show_parameters: bool) -> Tree<String>;
}

impl TreeRender for TreeNode {
    fn to_tree_string(&self, show_parameters: bool) -> Tree<String> {
        let mut label = self.to_string();
        if show_parameters && !self.parameter_values.is_empty() {
            let params: Vec<_> = self
                .parameter_values
                .iter()
                .map(|(k, v)| format!("{}={}", k, v))
                .collect();
            label = format!("{} [{}]", label, params.join(", "));
        }

        let leaves: Vec<_> = self
            .children
            .iter()
            .map(|c| c.to_tree_string(show_parameters))
            .collect();

        Tree::new(label).with_leaves(leaves)
    }
}

/// One line per model: `<id> (<type>) name:Type, ...`
pub fn format_model(model: &NodeModel) -> String {
    if model.parameters.is_empty() {
        return format!("{} ({})", model.id, model.node_type);
    }
    let params: Vec<_> = model
        .parameters
        .iter()
        .map(|(name, ty)| format!("{}:{}", name, ty))
        .collect();
    format!("{} ({}) {}", model.id, model.node_type, params.join(", "))
}

/// Catalog listing, either all models or only the displayable ones.
pub fn format_catalog(catalog: &ModelCatalog, include_actions: bool) -> Vec<String> {
    catalog
        .iter()
        .filter(|m| include_actions || m.is_displayable())
        .map(format_model)
        .collect()
}
