//! Interfaces of the collaborators the workbench talks to.
//!
//! The workflow backend registers operator trees and describes their
//! results. The project store keeps the layers of the current project.

use async_trait::async_trait;
use symbology::Symbology;
use tracing::{debug, info, instrument};
use workbench_common::{
    LayerMetadata, ResultDescriptorDict, WorkbenchResult, WorkflowDict, WorkflowId,
};

use crate::layer::{Layer, LayerChanges};

/// Server side of workflow registration.
#[async_trait]
pub trait WorkflowBackend: Send + Sync {
    /// Submit an operator tree. Every call may create a new backend entry;
    /// no deduplication happens on this side.
    async fn register_workflow(&self, workflow: &WorkflowDict) -> WorkbenchResult<WorkflowId>;

    /// Result descriptor of a registered workflow.
    async fn get_workflow_metadata(&self, id: WorkflowId) -> WorkbenchResult<ResultDescriptorDict>;
}

/// Layer list of the current project.
#[async_trait]
pub trait ProjectLayers: Send + Sync {
    async fn add_layer(&self, layer: Layer) -> WorkbenchResult<()>;

    /// Apply `changes` to the stored layer with the id of `layer` and return
    /// the new value. Fails with `NotFound` if the project has no such layer.
    async fn change_layer(
        &self,
        layer: &Layer,
        changes: LayerChanges<Symbology>,
    ) -> WorkbenchResult<Layer>;

    async fn layers(&self) -> Vec<Layer>;
}

/// Register a workflow and decode the metadata of its result.
#[instrument(skip_all, fields(workflow_type = ?workflow.workflow_type))]
pub async fn register_and_describe(
    backend: &dyn WorkflowBackend,
    workflow: &WorkflowDict,
) -> WorkbenchResult<(WorkflowId, LayerMetadata)> {
    let id = backend.register_workflow(workflow).await?;
    info!(workflow_id = %id, "Registered workflow");

    let descriptor = backend.get_workflow_metadata(id).await?;
    let metadata = LayerMetadata::from_dict(&descriptor)?;
    debug!(workflow_id = %id, result_type = %metadata.result_type(), "Resolved workflow metadata");

    Ok((id, metadata))
}
