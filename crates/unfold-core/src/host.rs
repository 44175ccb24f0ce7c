//! Host trait seams: every effect on the embedding viewer goes through these.
//!
//! The embedding adapter resolves its document references once, implements
//! these traits over them, and hands the bundle to the app. Nothing in the
//! engine queries the environment on its own.

use crate::sections::ElementSpan;

/// The rendered article and its child elements.
pub trait ArticleSurface {
    type Error;

    /// Rendered article markup, or `None` when no content element exists.
    fn article_html(&self) -> Option<&str>;

    /// Replace the article's children with `elements`, in table order. Spans
    /// index into the markup last returned by [`article_html`].
    ///
    /// [`article_html`]: ArticleSurface::article_html
    fn swap_children(&mut self, elements: &[ElementSpan]) -> Result<(), Self::Error>;

    /// Show the first `count` child elements and hide the rest.
    fn set_visible_elements(&mut self, count: u16) -> Result<(), Self::Error>;

    /// Bring the given child element to the top of the viewport.
    fn scroll_element_into_view(&mut self, element_index: u16);
}

/// Read/write access to the page's vertical scroll offset.
pub trait ScrollPort {
    fn scroll_offset(&mut self) -> u32;

    fn scroll_to(&mut self, offset: u32);
}

/// Where the navigation affordance block is inserted, first match wins.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ControlsPlacement {
    BeforePagination,
    BeforeFooter,
    AfterArticle,
}

/// Snapshot of the control surface the host must reflect.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ControlsView {
    /// Zero-based current section index.
    pub current_section: u16,
    pub section_count: u16,
    pub prev_enabled: bool,
    pub next_enabled: bool,
}

impl ControlsView {
    /// One-based `(current, total)` pair for a "Section i of n" indicator.
    pub fn indicator(&self) -> (u16, u16) {
        (self.current_section.saturating_add(1), self.section_count)
    }
}

/// Mount point for the prior/next affordances and section indicator.
///
/// Mounting and updates are best-effort; a host that cannot place the block
/// simply ignores the calls.
pub trait ControlsHost {
    fn has_pagination_region(&self) -> bool;

    fn has_footer_region(&self) -> bool;

    fn mount_controls(&mut self, placement: ControlsPlacement, view: &ControlsView);

    fn update_controls(&mut self, view: &ControlsView);

    fn remove_controls(&mut self);
}
