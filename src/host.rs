//! Host-environment collaborators.
//!
//! A host (a browser binding, a native UI toolkit, or the in-memory [`headless::HeadlessHost`])
//! supplies the drawable surface, the refresh and scroll primitives, and the document mutation
//! that swaps the original image for the surface. The player drives them from the host's single
//! event loop.

/// In-memory host used by the CLI and tests.
pub mod headless;

pub use crate::assets::loader::FrameSource;
pub use crate::render::scheduler::RefreshSource;
pub use crate::render::surface::RenderSurface;
pub use crate::visibility::gate::ScrollChannel;

/// Document-structure mutations performed once at mount.
pub trait Document {
    /// Copy the original image's attributes onto the render surface.
    fn copy_attributes(&mut self);

    /// Insert the render surface immediately before the original image.
    fn insert_surface_before_image(&mut self);

    /// Remove the original image from the document.
    fn remove_image(&mut self);
}

/// Everything a mounted player needs from its host.
pub trait Host: RefreshSource + ScrollChannel + Document {
    /// Surface type the player paints into.
    type Surface: RenderSurface;

    /// The render surface.
    fn surface_mut(&mut self) -> &mut Self::Surface;
}
