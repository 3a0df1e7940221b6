//! Operator graphs and the workflows that wrap them.
//!
//! A workflow is a tree of operator nodes built client-side and registered
//! once with the backend, which answers with an opaque [`WorkflowId`].
//! Trees are acyclic by construction: nodes own their sources.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

use crate::error::{WorkbenchError, WorkbenchResult};

/// Operator parameters: a JSON object.
pub type OperatorParams = Map<String, Value>;

/// Backend-assigned identifier of a registered workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WorkflowId(pub Uuid);

impl WorkflowId {
    pub fn new_v4() -> Self {
        Self(Uuid::new_v4())
    }
}

impl fmt::Display for WorkflowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for WorkflowId {
    type Err = WorkbenchError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s)
            .map(WorkflowId)
            .map_err(|e| WorkbenchError::malformed(format!("Invalid workflow id {}: {}", s, e)))
    }
}

impl From<Uuid> for WorkflowId {
    fn from(id: Uuid) -> Self {
        Self(id)
    }
}

/// Output kind of a workflow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WorkflowType {
    Vector,
    Raster,
    Plot,
}

/// Reference to a dataset consumed by a source operator.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DataId {
    Internal { dataset_id: Uuid },
    External { provider_id: Uuid, layer_id: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceParams {
    pub data: DataId,
}

/// Leaf node reading a dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SourceOperatorDict {
    #[serde(rename = "type")]
    pub operator_type: String,
    pub params: SourceParams,
}

impl SourceOperatorDict {
    pub fn new(operator_type: impl Into<String>, data: DataId) -> Self {
        Self {
            operator_type: operator_type.into(),
            params: SourceParams { data },
        }
    }
}

/// Inner node naming a server-side operator, its parameters and its inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OperatorDict {
    #[serde(rename = "type")]
    pub operator_type: String,

    /// `null` on the wire is read as an empty object
    #[serde(default, deserialize_with = "null_as_empty_params")]
    pub params: OperatorParams,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub vector_sources: Vec<OperatorNode>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub raster_sources: Vec<OperatorNode>,
}

fn null_as_empty_params<'de, D>(deserializer: D) -> Result<OperatorParams, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<OperatorParams>::deserialize(deserializer)?.unwrap_or_default())
}

impl OperatorDict {
    pub fn new(operator_type: impl Into<String>) -> Self {
        Self {
            operator_type: operator_type.into(),
            params: OperatorParams::new(),
            vector_sources: Vec::new(),
            raster_sources: Vec::new(),
        }
    }

    pub fn with_param(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.params.insert(name.into(), value.into());
        self
    }

    pub fn with_vector_source(mut self, source: impl Into<OperatorNode>) -> Self {
        self.vector_sources.push(source.into());
        self
    }

    pub fn with_raster_source(mut self, source: impl Into<OperatorNode>) -> Self {
        self.raster_sources.push(source.into());
        self
    }

    fn sources(&self) -> impl Iterator<Item = &OperatorNode> {
        self.vector_sources.iter().chain(self.raster_sources.iter())
    }
}

/// One node of an operator tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum OperatorNode {
    Source(SourceOperatorDict),
    Operator(OperatorDict),
}

impl OperatorNode {
    pub fn operator_type(&self) -> &str {
        match self {
            OperatorNode::Source(s) => &s.operator_type,
            OperatorNode::Operator(o) => &o.operator_type,
        }
    }

    /// Number of nodes in this subtree, including itself.
    pub fn node_count(&self) -> usize {
        match self {
            OperatorNode::Source(_) => 1,
            OperatorNode::Operator(o) => 1 + o.sources().map(OperatorNode::node_count).sum::<usize>(),
        }
    }

    /// Length of the longest path to a leaf; a single node has depth 1.
    pub fn depth(&self) -> usize {
        match self {
            OperatorNode::Source(_) => 1,
            OperatorNode::Operator(o) => {
                1 + o.sources().map(OperatorNode::depth).max().unwrap_or(0)
            }
        }
    }

    /// Datasets read by the source leaves, in depth-first order.
    pub fn data_ids(&self) -> Vec<&DataId> {
        let mut ids = Vec::new();
        self.collect_data_ids(&mut ids);
        ids
    }

    fn collect_data_ids<'a>(&'a self, ids: &mut Vec<&'a DataId>) {
        match self {
            OperatorNode::Source(s) => ids.push(&s.params.data),
            OperatorNode::Operator(o) => {
                for source in o.sources() {
                    source.collect_data_ids(ids);
                }
            }
        }
    }
}

impl From<SourceOperatorDict> for OperatorNode {
    fn from(source: SourceOperatorDict) -> Self {
        OperatorNode::Source(source)
    }
}

impl From<OperatorDict> for OperatorNode {
    fn from(operator: OperatorDict) -> Self {
        OperatorNode::Operator(operator)
    }
}

/// An operator tree tagged with its output kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowDict {
    #[serde(rename = "type")]
    pub workflow_type: WorkflowType,
    pub operator: OperatorNode,
}

impl WorkflowDict {
    pub fn new(workflow_type: WorkflowType, operator: impl Into<OperatorNode>) -> Self {
        Self {
            workflow_type,
            operator: operator.into(),
        }
    }

    pub fn from_json(value: Value) -> WorkbenchResult<Self> {
        Ok(serde_json::from_value(value)?)
    }

    pub fn to_json(&self) -> WorkbenchResult<Value> {
        Ok(serde_json::to_value(self)?)
    }
}

/// Backend answer to a workflow registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterWorkflowResult {
    pub id: WorkflowId,
}
