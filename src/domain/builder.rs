//! Tree builder: turns a `<BehaviorTree>` element into a [`TreeNode`] hierarchy.

use roxmltree::Node;
use tracing::{instrument, trace, warn};

use crate::domain::catalog::{ModelCatalog, BEHAVIOR_TREE};
use crate::domain::entities::{BehaviorTree, TreeNode};
use crate::domain::error::{DomainError, DomainResult};
use crate::domain::xml::{child_elements, model_id, plain_attributes, ATTR_ID, ATTR_NAME};

/// Builds behavior trees against a model catalog.
///
/// Every element must resolve to a registered model; the first one that does
/// not aborts the build.
pub struct TreeBuilder<'c> {
    catalog: &'c ModelCatalog,
}

impl<'c> TreeBuilder<'c> {
    pub fn new(catalog: &'c ModelCatalog) -> Self {
        Self { catalog }
    }

    /// Build the tree rooted at the first child element of `bt_root`.
    ///
    /// # Errors
    /// * [`DomainError::Structural`] if `bt_root` is not a `<BehaviorTree>` or
    ///   has no child element.
    /// * [`DomainError::UnresolvedModel`] for the first element whose model
    ///   is not in the catalog.
    #[instrument(level = "debug", skip_all, fields(id = bt_root.attribute(ATTR_ID)))]
    pub fn build(&self, bt_root: Node<'_, '_>) -> DomainResult<BehaviorTree> {
        let tag = bt_root.tag_name().name();
        if tag != BEHAVIOR_TREE {
            return Err(DomainError::structural(format!(
                "expecting a node called <{}>, found <{}>",
                BEHAVIOR_TREE, tag
            )));
        }

        let mut top_level = child_elements(bt_root);
        let first = top_level.next().ok_or_else(|| {
            DomainError::structural(format!("<{}> has no root node", BEHAVIOR_TREE))
        })?;
        let ignored = top_level.count();
        if ignored > 0 {
            warn!("ignoring {} extra top-level node(s) in <{}>", ignored, BEHAVIOR_TREE);
        }

        Ok(BehaviorTree {
            id: bt_root.attribute(ATTR_ID).map(str::to_string),
            root: build_subtree(first, self.catalog)?,
        })
    }
}

/// Build one node and, recursively, all of its descendants in document order.
pub fn build_subtree(element: Node<'_, '_>, catalog: &ModelCatalog) -> DomainResult<TreeNode> {
    let id = model_id(element);
    let model = catalog.get(id).ok_or_else(|| DomainError::UnresolvedModel {
        tag: element.tag_name().name().to_string(),
        id: id.to_string(),
    })?;
    trace!("node {} ({})", model.id, model.node_type);

    let mut node = TreeNode::new(model.id.clone());
    node.instance_name = element.attribute(ATTR_NAME).map(str::to_string);
    node.parameter_values = plain_attributes(element)
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    node.children = child_elements(element)
        .map(|child| build_subtree(child, catalog))
        .collect::<DomainResult<Vec<_>>>()?;

    Ok(node)
}
