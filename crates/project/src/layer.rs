//! Layers: a named, toggleable view of a registered workflow with its symbology.
//!
//! Layers are immutable values. Updates produce a new layer that keeps the
//! id unless a new one is given explicitly.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use symbology::{RasterSymbology, Symbology, SymbologyDict, SymbologyType, VectorSymbology};
use workbench_common::{LayerType, WorkbenchError, WorkbenchResult, WorkflowId};

/// Process-local layer identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LayerId(pub u64);

impl fmt::Display for LayerId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Hands out monotonically increasing layer ids.
///
/// Shared by everything that creates layers in one project context. Safe to
/// use from several threads.
#[derive(Debug, Default)]
pub struct LayerIdAllocator {
    next: AtomicU64,
}

impl LayerIdAllocator {
    /// Start at id 0.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_at(first: u64) -> Self {
        Self {
            next: AtomicU64::new(first),
        }
    }

    pub fn next_id(&self) -> LayerId {
        LayerId(self.next.fetch_add(1, Ordering::Relaxed))
    }

    /// Make sure later ids do not collide with an id supplied from elsewhere,
    /// e.g. one restored from persisted state.
    pub fn observe(&self, id: LayerId) {
        self.next.fetch_max(id.0.saturating_add(1), Ordering::Relaxed);
    }
}

// ============================================================================
// Wire format
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayerVisibility {
    pub data: bool,
    pub legend: bool,
}

/// Wire form of a layer. A missing id is allocated on decode.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayerDict {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<LayerId>,
    pub name: String,
    pub workflow: WorkflowId,
    pub visibility: LayerVisibility,
    pub symbology: SymbologyDict,
}

// ============================================================================
// Layers
// ============================================================================

/// A layer whose symbology type is fixed by `S`.
#[derive(Debug, Clone, PartialEq)]
pub struct TypedLayer<S> {
    pub id: LayerId,
    pub name: String,
    pub workflow_id: WorkflowId,
    pub is_visible: bool,
    pub is_legend_visible: bool,
    pub symbology: S,
}

pub type RasterLayer = TypedLayer<RasterSymbology>;
pub type VectorLayer = TypedLayer<VectorSymbology>;

/// Partial update of a layer. `None` keeps the current value.
#[derive(Debug, Clone, PartialEq)]
pub struct LayerChanges<S> {
    /// Set through [`LayerChanges::id`] so the allocator sees the new id.
    pub id: Option<LayerId>,
    pub name: Option<String>,
    pub workflow_id: Option<WorkflowId>,
    pub is_visible: Option<bool>,
    pub is_legend_visible: Option<bool>,
    pub symbology: Option<S>,
}

impl<S> Default for LayerChanges<S> {
    fn default() -> Self {
        Self {
            id: None,
            name: None,
            workflow_id: None,
            is_visible: None,
            is_legend_visible: None,
            symbology: None,
        }
    }
}

impl<S> LayerChanges<S> {
    pub fn id(ids: &LayerIdAllocator, id: LayerId) -> Self {
        ids.observe(id);
        Self {
            id: Some(id),
            ..Self::default()
        }
    }

    pub fn name(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Self::default()
        }
    }

    pub fn visibility(is_visible: bool) -> Self {
        Self {
            is_visible: Some(is_visible),
            ..Self::default()
        }
    }

    pub fn symbology(symbology: S) -> Self {
        Self {
            symbology: Some(symbology),
            ..Self::default()
        }
    }

    fn map_symbology<T>(self, symbology: Option<T>) -> LayerChanges<T> {
        LayerChanges {
            id: self.id,
            name: self.name,
            workflow_id: self.workflow_id,
            is_visible: self.is_visible,
            is_legend_visible: self.is_legend_visible,
            symbology,
        }
    }
}

impl<S: Clone> TypedLayer<S> {
    /// New visible layer with hidden legend and a freshly allocated id.
    pub fn new(
        ids: &LayerIdAllocator,
        name: impl Into<String>,
        workflow_id: WorkflowId,
        symbology: S,
    ) -> Self {
        Self {
            id: ids.next_id(),
            name: name.into(),
            workflow_id,
            is_visible: true,
            is_legend_visible: false,
            symbology,
        }
    }

    /// Like [`TypedLayer::new`] with a given id, which `ids` will not hand
    /// out again.
    pub fn with_id(
        ids: &LayerIdAllocator,
        id: LayerId,
        name: impl Into<String>,
        workflow_id: WorkflowId,
        symbology: S,
    ) -> Self {
        ids.observe(id);
        Self {
            id,
            name: name.into(),
            workflow_id,
            is_visible: true,
            is_legend_visible: false,
            symbology,
        }
    }

    pub fn update_fields(&self, changes: LayerChanges<S>) -> Self {
        Self {
            id: changes.id.unwrap_or(self.id),
            name: changes.name.unwrap_or_else(|| self.name.clone()),
            workflow_id: changes.workflow_id.unwrap_or(self.workflow_id),
            is_visible: changes.is_visible.unwrap_or(self.is_visible),
            is_legend_visible: changes.is_legend_visible.unwrap_or(self.is_legend_visible),
            symbology: changes
                .symbology
                .unwrap_or_else(|| self.symbology.clone()),
        }
    }

    fn visibility(&self) -> LayerVisibility {
        LayerVisibility {
            data: self.is_visible,
            legend: self.is_legend_visible,
        }
    }
}

/// A raster or vector layer.
#[derive(Debug, Clone, PartialEq)]
pub enum Layer {
    Raster(RasterLayer),
    Vector(VectorLayer),
}

impl Layer {
    pub fn id(&self) -> LayerId {
        match self {
            Layer::Raster(l) => l.id,
            Layer::Vector(l) => l.id,
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Layer::Raster(l) => &l.name,
            Layer::Vector(l) => &l.name,
        }
    }

    pub fn workflow_id(&self) -> WorkflowId {
        match self {
            Layer::Raster(l) => l.workflow_id,
            Layer::Vector(l) => l.workflow_id,
        }
    }

    pub fn is_visible(&self) -> bool {
        match self {
            Layer::Raster(l) => l.is_visible,
            Layer::Vector(l) => l.is_visible,
        }
    }

    pub fn is_legend_visible(&self) -> bool {
        match self {
            Layer::Raster(l) => l.is_legend_visible,
            Layer::Vector(l) => l.is_legend_visible,
        }
    }

    pub fn layer_type(&self) -> LayerType {
        match self {
            Layer::Raster(_) => LayerType::Raster,
            Layer::Vector(_) => LayerType::Vector,
        }
    }

    pub fn symbology_type(&self) -> SymbologyType {
        self.symbology().symbology_type()
    }

    /// Copy of the layer's symbology in its general form.
    pub fn symbology(&self) -> Symbology {
        match self {
            Layer::Raster(l) => Symbology::Raster(l.symbology.clone()),
            Layer::Vector(l) => Symbology::Vector(l.symbology.clone()),
        }
    }

    /// Apply changes, keeping the layer variant.
    ///
    /// A symbology of the other variant (vector for a raster layer or the
    /// reverse) is rejected as malformed input.
    pub fn update_fields(&self, mut changes: LayerChanges<Symbology>) -> WorkbenchResult<Layer> {
        let symbology = changes.symbology.take();
        match (self, symbology) {
            (Layer::Raster(l), None) => Ok(Layer::Raster(l.update_fields(changes.map_symbology(None)))),
            (Layer::Vector(l), None) => Ok(Layer::Vector(l.update_fields(changes.map_symbology(None)))),
            (Layer::Raster(l), Some(Symbology::Raster(s))) => {
                Ok(Layer::Raster(l.update_fields(changes.map_symbology(Some(s)))))
            }
            (Layer::Vector(l), Some(Symbology::Vector(s))) => {
                Ok(Layer::Vector(l.update_fields(changes.map_symbology(Some(s)))))
            }
            (layer, Some(other)) => Err(WorkbenchError::malformed(format!(
                "cannot apply {:?} symbology to {:?} layer {}",
                other.symbology_type(),
                layer.layer_type(),
                layer.id()
            ))),
        }
    }

    /// Decode a layer. A supplied id is kept and reserved in `ids`; without
    /// one a fresh id is allocated.
    ///
    /// The variant follows the symbology: `Raster` yields a raster layer,
    /// `Vector` a vector layer.
    pub fn from_dict(dict: &LayerDict, ids: &LayerIdAllocator) -> WorkbenchResult<Layer> {
        let symbology = Symbology::from_dict(&dict.symbology)?;
        let id = match dict.id {
            Some(id) => {
                ids.observe(id);
                id
            }
            None => ids.next_id(),
        };
        let (is_visible, is_legend_visible) = (dict.visibility.data, dict.visibility.legend);

        Ok(match symbology {
            Symbology::Raster(symbology) => Layer::Raster(TypedLayer {
                id,
                name: dict.name.clone(),
                workflow_id: dict.workflow,
                is_visible,
                is_legend_visible,
                symbology,
            }),
            Symbology::Vector(symbology) => Layer::Vector(TypedLayer {
                id,
                name: dict.name.clone(),
                workflow_id: dict.workflow,
                is_visible,
                is_legend_visible,
                symbology,
            }),
        })
    }

    pub fn to_dict(&self) -> LayerDict {
        let visibility = match self {
            Layer::Raster(l) => l.visibility(),
            Layer::Vector(l) => l.visibility(),
        };
        LayerDict {
            id: Some(self.id()),
            name: self.name().to_string(),
            workflow: self.workflow_id(),
            visibility,
            symbology: self.symbology().to_dict(),
        }
    }

    pub fn from_json(value: serde_json::Value, ids: &LayerIdAllocator) -> WorkbenchResult<Layer> {
        let dict: LayerDict = serde_json::from_value(value)?;
        Self::from_dict(&dict, ids)
    }

    pub fn to_json(&self) -> WorkbenchResult<serde_json::Value> {
        Ok(serde_json::to_value(self.to_dict())?)
    }
}

impl From<RasterLayer> for Layer {
    fn from(layer: RasterLayer) -> Self {
        Layer::Raster(layer)
    }
}

impl From<VectorLayer> for Layer {
    fn from(layer: VectorLayer) -> Self {
        Layer::Vector(layer)
    }
}
