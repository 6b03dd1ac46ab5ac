//! CPU-side instance buffer for one layer

use crate::instance::{InstanceRaw, InstanceTransform};
use crate::layer::LayerKind;
use garland_core::{Color, GarlandError, Result};

/// Matrices and colors for every instance of a layer.
///
/// Colors are fixed at `initialize`; `write` only touches the model matrix.
/// `needs_upload` is raised by any change and cleared by the consumer once
/// the bytes have been copied to the GPU.
#[derive(Debug, Clone)]
pub struct InstanceBuffer {
    kind: LayerKind,
    instances: Vec<InstanceRaw>,
    needs_upload: bool,
}

impl InstanceBuffer {
    /// Build a buffer from per-instance initial poses and colors
    pub fn initialize(
        kind: LayerKind,
        initial: impl IntoIterator<Item = (InstanceTransform, Color)>,
    ) -> Self {
        let instances: Vec<InstanceRaw> = initial
            .into_iter()
            .map(|(transform, color)| InstanceRaw::new(&transform, color))
            .collect();
        log::debug!("Initialized {kind} buffer with {} instances", instances.len());
        Self {
            kind,
            instances,
            needs_upload: true,
        }
    }

    pub fn kind(&self) -> LayerKind {
        self.kind
    }

    pub fn len(&self) -> usize {
        self.instances.len()
    }

    pub fn is_empty(&self) -> bool {
        self.instances.is_empty()
    }

    /// Overwrite the model matrix of instance `index`
    pub fn write(&mut self, index: usize, transform: &InstanceTransform) -> Result<()> {
        let len = self.instances.len();
        let slot = self
            .instances
            .get_mut(index)
            .ok_or_else(|| GarlandError::IndexOutOfRange {
                layer: self.kind.name().to_string(),
                index,
                len,
            })?;
        slot.model = transform.to_matrix().to_cols_array_2d();
        self.needs_upload = true;
        Ok(())
    }

    pub fn instance(&self, index: usize) -> Option<&InstanceRaw> {
        self.instances.get(index)
    }

    pub fn instances(&self) -> &[InstanceRaw] {
        &self.instances
    }

    /// Raw bytes in shader layout
    pub fn as_bytes(&self) -> &[u8] {
        bytemuck::cast_slice(&self.instances)
    }

    pub fn needs_upload(&self) -> bool {
        self.needs_upload
    }

    pub fn mark_uploaded(&mut self) {
        self.needs_upload = false;
    }
}
