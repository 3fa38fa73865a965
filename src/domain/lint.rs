//! Parameter lint: checks raw parameter values against the declared schema.
//!
//! Parsing never validates values. This is the usage-time check a
//! presentation layer would apply to its input widgets.

use std::fmt;

use serde::Serialize;

use crate::domain::catalog::ModelCatalog;
use crate::domain::entities::{ParamType, TreeNode};

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub enum IssueKind {
    /// Value supplied for a name the model does not declare
    UnknownParameter,
    /// Value rejected by the declared type
    InvalidValue { expected: ParamType },
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ParameterIssue {
    /// Display name of the offending node
    pub node: String,
    pub model_id: String,
    pub parameter: String,
    pub value: String,
    pub kind: IssueKind,
}

impl fmt::Display for ParameterIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.kind {
            IssueKind::UnknownParameter => write!(
                f,
                "{}: unknown parameter '{}' for model {}",
                self.node, self.parameter, self.model_id
            ),
            IssueKind::InvalidValue { expected } => write!(
                f,
                "{}: parameter '{}' = '{}' is not a valid {}",
                self.node, self.parameter, self.value, expected
            ),
        }
    }
}

/// Lint every node of `tree` in pre-order.
///
/// Nodes whose model is missing from the catalog are skipped; a built tree
/// never contains such nodes.
pub fn lint_tree(tree: &TreeNode, catalog: &ModelCatalog) -> Vec<ParameterIssue> {
    let mut issues = Vec::new();
    for node in tree.iter() {
        let Some(model) = catalog.get(&node.model_id) else {
            continue;
        };
        for (name, value) in &node.parameter_values {
            let kind = match model.parameters.get(name) {
                None => IssueKind::UnknownParameter,
                Some(param_type) if !param_type.accepts(value) => IssueKind::InvalidValue {
                    expected: param_type.clone(),
                },
                Some(_) => continue,
            };
            issues.push(ParameterIssue {
                node: node.display_name().to_string(),
                model_id: node.model_id.clone(),
                parameter: name.clone(),
                value: value.clone(),
                kind,
            });
        }
    }
    issues
}
