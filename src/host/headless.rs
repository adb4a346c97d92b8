use crate::{
    host::{Document, Host},
    render::{scheduler::RefreshSource, surface::RasterSurface},
    visibility::gate::ScrollChannel,
};

/// Where the original image and the render surface sit in the headless document.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DocumentState {
    /// Only the original image is in the document.
    #[default]
    ImageOnly,
    /// The surface was inserted and the image not yet removed.
    Both,
    /// Only the render surface remains.
    SurfaceOnly,
}

/// In-memory host backed by a [`RasterSurface`].
///
/// Refresh requests queue up until the driver drains them with
/// [`HeadlessHost::take_refresh`]; subscription and document calls are recorded for inspection.
#[derive(Clone, Debug, Default)]
pub struct HeadlessHost {
    surface: RasterSurface,
    pending_refreshes: usize,
    refresh_requests: usize,
    subscribed: bool,
    subscribe_calls: usize,
    unsubscribe_calls: usize,
    attributes_copied: bool,
    document: DocumentState,
}

impl HeadlessHost {
    /// A host with an unsized surface and only the original image in its document.
    pub fn new() -> Self {
        Self::default()
    }

    /// The render surface.
    pub fn surface(&self) -> &RasterSurface {
        &self.surface
    }

    /// Consume one outstanding refresh request, if any.
    pub fn take_refresh(&mut self) -> bool {
        if self.pending_refreshes == 0 {
            return false;
        }
        self.pending_refreshes -= 1;
        true
    }

    /// Total refresh requests received.
    pub fn refresh_requests(&self) -> usize {
        self.refresh_requests
    }

    /// Whether scroll events are currently subscribed.
    pub fn is_subscribed(&self) -> bool {
        self.subscribed
    }

    /// Total `subscribe` calls received.
    pub fn subscribe_calls(&self) -> usize {
        self.subscribe_calls
    }

    /// Total `unsubscribe` calls received.
    pub fn unsubscribe_calls(&self) -> usize {
        self.unsubscribe_calls
    }

    /// Whether the image's attributes were copied onto the surface.
    pub fn attributes_copied(&self) -> bool {
        self.attributes_copied
    }

    /// Current document arrangement.
    pub fn document(&self) -> DocumentState {
        self.document
    }
}

impl RefreshSource for HeadlessHost {
    fn request_refresh(&mut self) {
        self.pending_refreshes += 1;
        self.refresh_requests += 1;
    }
}

impl ScrollChannel for HeadlessHost {
    fn subscribe(&mut self) {
        self.subscribe_calls += 1;
        self.subscribed = true;
    }

    fn unsubscribe(&mut self) {
        self.unsubscribe_calls += 1;
        self.subscribed = false;
    }
}

impl Document for HeadlessHost {
    fn copy_attributes(&mut self) {
        self.attributes_copied = true;
    }

    fn insert_surface_before_image(&mut self) {
        if self.document == DocumentState::ImageOnly {
            self.document = DocumentState::Both;
        }
    }

    fn remove_image(&mut self) {
        if self.document == DocumentState::Both {
            self.document = DocumentState::SurfaceOnly;
        }
    }
}

impl Host for HeadlessHost {
    type Surface = RasterSurface;

    fn surface_mut(&mut self) -> &mut RasterSurface {
        &mut self.surface
    }
}

#[cfg(test)]
#[path = "../../tests/unit/host/headless.rs"]
mod tests;
