//! Region registry, render pipeline and hit-test dispatcher.
//!
//! Features register one overlay per region type and publish regions; this
//! module composites them and resolves which one the pointer is over.

pub mod handles;
mod pipeline;
mod registry;

pub use handles::{region_handles, Corner, Handle};
pub use hit_test::{
    bounds_hit_test, handle_at, hit_test, pointer_target, HandleHit, HitProbe, PointerTarget,
};
pub use pipeline::{render_overlays, FrameReport};
pub use registry::{
    HitTestFn, OverlayHandle, OverlayRegistration, RegionListener, RegionRegistry, RenderFn,
    SubscriptionId,
};
