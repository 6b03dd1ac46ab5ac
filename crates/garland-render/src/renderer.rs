//! Writes every mounted layer from the particle store once per frame

use crate::buffer::InstanceBuffer;
use crate::composite::{part_for, GiftComposite};
use crate::instance::InstanceTransform;
use crate::layer::LayerKind;
use crate::transform::{scattered_pose, transform_at};
use garland_core::{GarlandError, Result};
use garland_particles::{ParticleClass, ParticleStore};
use serde::Serialize;
use std::sync::Arc;

/// What one `render_frame` call touched
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct FrameStats {
    pub layers_written: usize,
    pub layers_skipped: usize,
    pub instances_written: usize,
}

/// Instance renderer for the whole tree.
///
/// Each layer is either mounted (has a buffer) or absent. Absent layers are
/// skipped on every frame; the host may mount them later.
pub struct InstanceRenderer {
    store: Arc<ParticleStore>,
    layers: [Option<InstanceBuffer>; 5],
}

fn slot(kind: LayerKind) -> usize {
    match kind {
        LayerKind::Foliage => 0,
        LayerKind::Ornaments => 1,
        LayerKind::GiftBase => 2,
        LayerKind::GiftLid => 3,
        LayerKind::GiftBow => 4,
    }
}

impl InstanceRenderer {
    /// A renderer with no layers mounted
    pub fn new(store: Arc<ParticleStore>) -> Self {
        Self {
            store,
            layers: Default::default(),
        }
    }

    pub fn store(&self) -> &Arc<ParticleStore> {
        &self.store
    }

    /// Create the buffer for `kind`: scattered pose plus final colors.
    ///
    /// Mounting an already mounted layer resets it to the scattered pose.
    pub fn mount(&mut self, kind: LayerKind) {
        let collection = self.store.collection(kind.class());
        let part = part_for(kind);
        let buffer = InstanceBuffer::initialize(
            kind,
            collection.iter().map(|particle| {
                let color = match part {
                    Some(part) => part.color(particle),
                    None => particle.color(),
                };
                (scattered_pose(particle), color)
            }),
        );
        self.layers[slot(kind)] = Some(buffer);
    }

    pub fn mount_all(&mut self) {
        for kind in LayerKind::ALL {
            self.mount(kind);
        }
    }

    /// Drop the buffer for `kind`, returning it if it was mounted
    pub fn unmount(&mut self, kind: LayerKind) -> Option<InstanceBuffer> {
        let removed = self.layers[slot(kind)].take();
        if removed.is_some() {
            log::debug!("Unmounted {kind} layer");
        }
        removed
    }

    pub fn is_mounted(&self, kind: LayerKind) -> bool {
        self.layers[slot(kind)].is_some()
    }

    pub fn buffer(&self, kind: LayerKind) -> Option<&InstanceBuffer> {
        self.layers[slot(kind)].as_ref()
    }

    /// Clear the upload flag after the consumer copied the layer's bytes
    pub fn mark_uploaded(&mut self, kind: LayerKind) -> Result<()> {
        self.layers[slot(kind)]
            .as_mut()
            .map(InstanceBuffer::mark_uploaded)
            .ok_or_else(|| GarlandError::LayerNotMounted(kind.name().to_string()))
    }

    /// Transform of instance `index` in `kind` at the given blend and time
    pub fn transform_at(
        &self,
        kind: LayerKind,
        index: usize,
        eased: f32,
        elapsed: f32,
    ) -> Result<InstanceTransform> {
        let collection = self.store.collection(kind.class());
        let particle = collection
            .get(index)
            .ok_or_else(|| GarlandError::IndexOutOfRange {
                layer: kind.name().to_string(),
                index,
                len: collection.len(),
            })?;
        Ok(transform_at(kind.class(), particle, eased, elapsed, 1.0))
    }

    /// Rewrite the matrices of every mounted layer.
    ///
    /// Gift parts are written from a single transform per index so the box,
    /// lid and bow can never drift apart.
    pub fn render_frame(&mut self, eased: f32, elapsed: f32) -> Result<FrameStats> {
        let mut stats = FrameStats::default();

        for (kind, class) in [
            (LayerKind::Foliage, ParticleClass::Foliage),
            (LayerKind::Ornaments, ParticleClass::Ornament),
        ] {
            let Some(buffer) = self.layers[slot(kind)].as_mut() else {
                stats.layers_skipped += 1;
                continue;
            };
            let collection = self.store.collection(class);
            for (i, particle) in collection.iter().enumerate().take(buffer.len()) {
                buffer.write(i, &transform_at(class, particle, eased, elapsed, 1.0))?;
            }
            stats.layers_written += 1;
            stats.instances_written += buffer.len().min(collection.len());
        }

        self.render_gifts(eased, elapsed, &mut stats)?;
        Ok(stats)
    }

    fn render_gifts(&mut self, eased: f32, elapsed: f32, stats: &mut FrameStats) -> Result<()> {
        let [_, _, base, lid, bow] = &mut self.layers;
        let mut parts: Vec<&mut InstanceBuffer> = Vec::with_capacity(3);
        for buffer in [base, lid, bow] {
            match buffer {
                Some(buffer) => parts.push(buffer),
                None => stats.layers_skipped += 1,
            }
        }
        if parts.is_empty() {
            return Ok(());
        }

        for (i, particle) in self.store.gifts().iter().enumerate() {
            let transform = GiftComposite::new(i, particle).transform(eased, elapsed);
            for buffer in parts.iter_mut().filter(|b| i < b.len()) {
                buffer.write(i, &transform)?;
                stats.instances_written += 1;
            }
        }
        stats.layers_written += parts.len();
        Ok(())
    }
}
