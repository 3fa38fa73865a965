//! Domain entities: node models, tree nodes and parsed documents

use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

use crate::domain::catalog::ModelCatalog;

/// Kind of a behavior tree node, derived from the XML tag name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum NodeType {
    Action,
    Decorator,
    SubTree,
    Control,
    Undefined,
}

impl NodeType {
    /// Map a tag name to its node type. Unknown tags yield `Undefined`.
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "Action" => NodeType::Action,
            "Decorator" => NodeType::Decorator,
            "SubTree" => NodeType::SubTree,
            "Control" => NodeType::Control,
            _ => NodeType::Undefined,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            NodeType::Action => "Action",
            NodeType::Decorator => "Decorator",
            NodeType::SubTree => "SubTree",
            NodeType::Control => "Control",
            NodeType::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for NodeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type of a node parameter.
///
/// Declared in `TreeNodesModel` via `<Parameter type="..">`; inferred
/// parameters are always `Text`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub enum ParamType {
    Text,
    Integer,
    Double,
    /// Allowed options in declaration order
    Enumeration(Vec<String>),
    #[default]
    Undefined,
}

impl ParamType {
    /// Resolve a declared `type` attribute.
    ///
    /// `options` is only consulted for `Combo`: it is split on `;` and empty
    /// tokens are dropped. Unrecognized or missing types resolve to `Text`.
    pub fn from_declared(type_name: Option<&str>, options: Option<&str>) -> Self {
        match type_name {
            Some("Int") => ParamType::Integer,
            Some("Double") => ParamType::Double,
            Some("Combo") => ParamType::Enumeration(split_options(options.unwrap_or(""))),
            _ => ParamType::Text,
        }
    }

    /// Whether `value` is acceptable input for this type.
    pub fn accepts(&self, value: &str) -> bool {
        match self {
            ParamType::Integer => value.trim().parse::<i64>().is_ok(),
            ParamType::Double => value.trim().parse::<f64>().is_ok_and(f64::is_finite),
            ParamType::Enumeration(options) => options.iter().any(|o| o == value),
            ParamType::Text | ParamType::Undefined => true,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ParamType::Text => "Text",
            ParamType::Integer => "Integer",
            ParamType::Double => "Double",
            ParamType::Enumeration(_) => "Enumeration",
            ParamType::Undefined => "Undefined",
        }
    }
}

impl fmt::Display for ParamType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamType::Enumeration(options) => write!(f, "Enumeration[{}]", options.join("|")),
            other => f.write_str(other.name()),
        }
    }
}

fn split_options(options: &str) -> Vec<String> {
    options
        .split(';')
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

/// A reusable node type registered in the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NodeModel {
    pub id: String,
    pub node_type: NodeType,
    /// Parameter name -> type; the first declaration of a name wins
    pub parameters: BTreeMap<String, ParamType>,
}

impl NodeModel {
    pub fn new(id: impl Into<String>, node_type: NodeType) -> Self {
        Self {
            id: id.into(),
            node_type,
            parameters: BTreeMap::new(),
        }
    }

    /// Add a parameter unless the name is already declared.
    pub fn with_parameter(mut self, name: impl Into<String>, param_type: ParamType) -> Self {
        self.parameters.entry(name.into()).or_insert(param_type);
        self
    }

    /// Models listed for secondary display: everything except actions.
    pub fn is_displayable(&self) -> bool {
        self.node_type != NodeType::Action
    }
}

/// One instantiated node of a behavior tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TreeNode {
    pub model_id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub instance_name: Option<String>,
    /// Raw attribute values, never coerced at parse time
    pub parameter_values: BTreeMap<String, String>,
    /// Children in document order
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(model_id: impl Into<String>) -> Self {
        Self {
            model_id: model_id.into(),
            instance_name: None,
            parameter_values: BTreeMap::new(),
            children: Vec::new(),
        }
    }

    /// Instance name if set, otherwise the model id.
    pub fn display_name(&self) -> &str {
        self.instance_name.as_deref().unwrap_or(&self.model_id)
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order traversal, children left to right.
    pub fn iter(&self) -> TreeIter<'_> {
        TreeIter { stack: vec![self] }
    }

    pub fn node_count(&self) -> usize {
        self.iter().count()
    }

    /// Number of levels, a single node has depth 1.
    pub fn depth(&self) -> usize {
        1 + self
            .children
            .iter()
            .map(TreeNode::depth)
            .max()
            .unwrap_or(0)
    }

    /// Leaf nodes in document order.
    pub fn leaves(&self) -> Vec<&TreeNode> {
        self.iter().filter(|n| n.is_leaf()).collect()
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.instance_name {
            Some(name) if name != &self.model_id => write!(f, "{} ({})", name, self.model_id),
            _ => f.write_str(&self.model_id),
        }
    }
}

pub struct TreeIter<'a> {
    stack: Vec<&'a TreeNode>,
}

impl<'a> Iterator for TreeIter<'a> {
    type Item = &'a TreeNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        // Push children in reverse order for left-to-right traversal
        self.stack.extend(node.children.iter().rev());
        Some(node)
    }
}

/// A built `<BehaviorTree>` element.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BehaviorTree {
    /// Optional `ID` attribute of the `<BehaviorTree>` element
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub root: TreeNode,
}

/// Everything parsed from one XML document.
#[derive(Debug, Clone, Serialize)]
pub struct BehaviorTreeDocument {
    pub catalog: ModelCatalog,
    pub trees: Vec<BehaviorTree>,
}
