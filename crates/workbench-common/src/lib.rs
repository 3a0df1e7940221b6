//! Common types shared across the geo workbench crates: colors, colorizers,
//! data types, result descriptors and operator graphs.

pub mod breakpoint;
pub mod color;
pub mod colorizer;
pub mod datatype;
pub mod error;
pub mod measurement;
pub mod metadata;
pub mod spatial_reference;
pub mod workflow;

pub use breakpoint::{BreakpointDict, ColorBreakpoint};
pub use color::{Color, RgbaColorDict, RgbaLike, BLACK, TRANSPARENT, WHITE};
pub use colorizer::{Colorizer, ColorizerDict, LinearGradient, PaletteColorizer};
pub use datatype::{NoDataValue, RasterDataType, ResultType, VectorColumnDataType, VectorDataType};
pub use error::{ErrorKind, WorkbenchError, WorkbenchResult};
pub use measurement::Measurement;
pub use metadata::{
    LayerMetadata, LayerType, RasterLayerMetadata, ResultDescriptorDict, VectorLayerMetadata,
};
pub use spatial_reference::SpatialReference;
pub use workflow::{
    DataId, OperatorDict, OperatorNode, RegisterWorkflowResult, SourceOperatorDict, WorkflowDict,
    WorkflowId, WorkflowType,
};
