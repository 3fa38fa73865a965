//! Small helpers over `roxmltree` element nodes.

use roxmltree::Node;

/// Attribute naming the model an element instantiates.
pub const ATTR_ID: &str = "ID";
/// Attribute carrying a node's instance name.
pub const ATTR_NAME: &str = "name";

/// Direct child elements in document order, skipping text and comments.
pub fn child_elements<'a, 'input>(
    node: Node<'a, 'input>,
) -> impl Iterator<Item = Node<'a, 'input>> {
    node.children().filter(|n| n.is_element())
}

pub fn first_child_element<'a, 'input>(node: Node<'a, 'input>) -> Option<Node<'a, 'input>> {
    child_elements(node).next()
}

/// Catalog key of an element: its `ID` attribute if present, else its tag name.
pub fn model_id<'a>(node: Node<'a, '_>) -> &'a str {
    node.attribute(ATTR_ID).unwrap_or_else(|| node.tag_name().name())
}

/// Attributes other than `ID` and `name`, in document order.
pub fn plain_attributes<'a>(node: Node<'a, '_>) -> Vec<(&'a str, &'a str)> {
    node.attributes()
        .filter(|a| a.name() != ATTR_ID && a.name() != ATTR_NAME)
        .map(|a| (a.name(), a.value()))
        .collect()
}
