//! Detail overlay.
//!
//! A show/hide shell around whatever content the gallery puts in it. Clicks
//! are routed by region: the background dismisses, the content region keeps
//! the click to itself, the close control dismisses.

use crate::detail::DetailView;

/// Where a click on the overlay landed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ModalTarget {
    /// Anywhere on the overlay outside `.modal-content`.
    Background,
    /// Inside `.modal-content`; never reaches the background handler.
    Content,
    /// The `.btn-close` control inside the content region.
    CloseButton,
}

#[derive(Debug, Clone, Default)]
pub struct Modal {
    visible: bool,
    content: Option<DetailView>,
}

impl Modal {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn show(&mut self) {
        self.visible = true;
    }

    pub fn hide(&mut self) {
        self.visible = false;
    }

    pub fn is_visible(&self) -> bool {
        self.visible
    }

    pub fn click(&mut self, target: ModalTarget) {
        match target {
            ModalTarget::Background | ModalTarget::CloseButton => self.hide(),
            ModalTarget::Content => {}
        }
    }

    /// Replace the content wholesale. Visibility is unaffected.
    pub fn set_content(&mut self, content: DetailView) {
        self.content = Some(content);
    }

    pub fn content(&self) -> Option<&DetailView> {
        self.content.as_ref()
    }
}
