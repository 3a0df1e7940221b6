//! Project layer for the geo workbench.
//!
//! Provides:
//! - Layers with injected id allocation
//! - Collaborator traits for the workflow backend and the project store
//! - In-memory and HTTP implementations of those traits
//! - Configuration loading and tracing setup

pub mod backend;
pub mod config;
pub mod http;
pub mod layer;
pub mod memory;
pub mod telemetry;

pub use backend::{register_and_describe, ProjectLayers, WorkflowBackend};
pub use config::{BackendConfig, WorkbenchConfig};
pub use http::HttpBackend;
pub use layer::{
    Layer, LayerChanges, LayerDict, LayerId, LayerIdAllocator, LayerVisibility, RasterLayer,
    TypedLayer, VectorLayer,
};
pub use memory::{InMemoryBackend, InMemoryProject};
pub use telemetry::init_tracing;
