//! Garland Render - Instance transform synthesis for the tree
//!
//! Turns the particle store and the current blend factor into per-instance
//! model matrices and colors, one buffer per render layer:
//! - `transform_at` — position, rotation and scale of one particle this frame
//! - `InstanceBuffer` — shader-layout matrices/colors with an upload flag
//! - `GiftComposite` — box, lid and bow driven by a single transform
//! - `InstanceRenderer` — writes every mounted layer, skipping absent ones
//! - `ParticleSystem` — implements `RuntimeSystem` for the frame loop
//!
//! The GPU pipeline itself (camera, lights, post-processing) lives outside
//! this crate and only reads the buffers.

pub mod buffer;
pub mod composite;
pub mod instance;
pub mod layer;
pub mod renderer;
pub mod transform;

use garland_animation::AnimationDriver;
use garland_core::Result;
use garland_particles::ParticleStore;
use garland_runtime::{FrameContext, RuntimeSystem};
use std::sync::Arc;

pub use buffer::InstanceBuffer;
pub use composite::{CompositePart, GiftComposite, GIFT_PARTS};
pub use instance::{InstanceRaw, InstanceTransform};
pub use layer::{LayerGeometry, LayerKind, LayerShape, MaterialHints};
pub use renderer::{FrameStats, InstanceRenderer};
pub use transform::{scale_envelope, transform_at, SCATTERED_SCALE_FRACTION};

/// Drives the animation and rewrites the instance buffers every frame
pub struct ParticleSystem {
    pub driver: AnimationDriver,
    pub renderer: InstanceRenderer,
    last_stats: FrameStats,
}

impl ParticleSystem {
    pub fn new(store: Arc<ParticleStore>, driver: AnimationDriver) -> Self {
        Self {
            driver,
            renderer: InstanceRenderer::new(store),
            last_stats: FrameStats::default(),
        }
    }

    /// Stats from the most recent frame
    pub fn last_stats(&self) -> FrameStats {
        self.last_stats
    }
}

impl RuntimeSystem for ParticleSystem {
    fn initialize(&mut self) -> Result<()> {
        self.renderer.mount_all();
        let counts = self.renderer.store().counts();
        log::info!(
            "Mounted {} layers for {} instances",
            LayerKind::ALL.len(),
            counts.total()
        );
        Ok(())
    }

    fn update(&mut self, frame: &FrameContext<'_>) -> Result<()> {
        let eased = self.driver.tick(frame.assembled, frame.delta);
        self.last_stats = self.renderer.render_frame(eased, frame.elapsed)?;
        Ok(())
    }

    fn shutdown(&mut self) -> Result<()> {
        for kind in LayerKind::ALL {
            self.renderer.unmount(kind);
        }
        Ok(())
    }

    fn name(&self) -> &str {
        "particles"
    }
}
