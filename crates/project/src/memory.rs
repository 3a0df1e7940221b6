//! In-process implementations of the collaborator traits, for tests and
//! offline use.

use async_trait::async_trait;
use std::collections::HashMap;
use symbology::Symbology;
use tokio::sync::RwLock;
use tracing::debug;
use workbench_common::{
    ResultDescriptorDict, WorkbenchError, WorkbenchResult, WorkflowDict, WorkflowId,
};

use crate::backend::{ProjectLayers, WorkflowBackend};
use crate::layer::{Layer, LayerChanges};

/// Workflow registry kept in memory.
///
/// Metadata is answered from descriptors registered per root operator type
/// with [`describe_operator`](Self::describe_operator).
#[derive(Debug, Default)]
pub struct InMemoryBackend {
    workflows: RwLock<HashMap<WorkflowId, WorkflowDict>>,
    descriptors: RwLock<HashMap<String, ResultDescriptorDict>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer metadata requests for workflows rooted in `operator_type`.
    pub async fn describe_operator(
        &self,
        operator_type: impl Into<String>,
        descriptor: ResultDescriptorDict,
    ) {
        self.descriptors
            .write()
            .await
            .insert(operator_type.into(), descriptor);
    }

    pub async fn workflow(&self, id: WorkflowId) -> Option<WorkflowDict> {
        self.workflows.read().await.get(&id).cloned()
    }

    pub async fn workflow_count(&self) -> usize {
        self.workflows.read().await.len()
    }
}

#[async_trait]
impl WorkflowBackend for InMemoryBackend {
    async fn register_workflow(&self, workflow: &WorkflowDict) -> WorkbenchResult<WorkflowId> {
        let id = WorkflowId::new_v4();
        self.workflows.write().await.insert(id, workflow.clone());
        debug!(workflow_id = %id, nodes = workflow.operator.node_count(), "Stored workflow");
        Ok(id)
    }

    async fn get_workflow_metadata(&self, id: WorkflowId) -> WorkbenchResult<ResultDescriptorDict> {
        let workflows = self.workflows.read().await;
        let workflow = workflows
            .get(&id)
            .ok_or_else(|| WorkbenchError::NotFound(format!("workflow {}", id)))?;
        let operator_type = workflow.operator.operator_type();

        self.descriptors
            .read()
            .await
            .get(operator_type)
            .cloned()
            .ok_or_else(|| {
                WorkbenchError::NotFound(format!("result descriptor for operator {}", operator_type))
            })
    }
}

/// Project layer list kept in memory, in insertion order.
#[derive(Debug, Default)]
pub struct InMemoryProject {
    layers: RwLock<Vec<Layer>>,
}

impl InMemoryProject {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl ProjectLayers for InMemoryProject {
    async fn add_layer(&self, layer: Layer) -> WorkbenchResult<()> {
        debug!(layer_id = %layer.id(), name = %layer.name(), "Adding layer");
        self.layers.write().await.push(layer);
        Ok(())
    }

    async fn change_layer(
        &self,
        layer: &Layer,
        changes: LayerChanges<Symbology>,
    ) -> WorkbenchResult<Layer> {
        let mut layers = self.layers.write().await;
        let slot = layers
            .iter_mut()
            .find(|l| l.id() == layer.id())
            .ok_or_else(|| WorkbenchError::NotFound(format!("layer {}", layer.id())))?;

        let updated = slot.update_fields(changes)?;
        *slot = updated.clone();
        debug!(layer_id = %updated.id(), "Changed layer");
        Ok(updated)
    }

    async fn layers(&self) -> Vec<Layer> {
        self.layers.read().await.clone()
    }
}
