//! Simulated viewer host: an in-memory article, a scroll port, and a
//! controls mount record standing in for a real documentation viewer.
//!
//! Programmatic scrolls queue scroll events the way a browser would; the
//! session loop drains the queue back into the engine after every command.

use unfold_core::host::{
    ArticleSurface, ControlsHost, ControlsPlacement, ControlsView, ScrollPort,
};
use unfold_core::sections::ElementSpan;

/// Nominal rendered height of one article element, used to derive synthetic
/// offsets for scroll-into-view.
const ELEMENT_HEIGHT_PX: u32 = 120;
/// Offset of the first element below the page top.
const ARTICLE_TOP_PX: u32 = 16;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum SimError {
    NoArticle,
}

pub struct MountedControls {
    pub placement: ControlsPlacement,
    pub view: ControlsView,
}

pub struct SimViewer {
    html: Option<String>,
    /// Child list materialized by the last `swap_children`, `None` while the
    /// article is untouched.
    children: Option<Vec<String>>,
    /// Visible-prefix length; `None` means everything is visible.
    visible: Option<u16>,
    scroll: u32,
    pending_scroll_events: Vec<u32>,
    pub has_pagination: bool,
    pub has_footer: bool,
    controls: Option<MountedControls>,
}

impl SimViewer {
    pub fn new(html: Option<String>) -> Self {
        Self {
            html,
            children: None,
            visible: None,
            scroll: 0,
            pending_scroll_events: Vec::new(),
            has_pagination: false,
            has_footer: false,
            controls: None,
        }
    }

    pub fn set_article(&mut self, html: String) {
        self.html = Some(html);
        self.children = None;
        self.visible = None;
    }

    pub fn clear_article(&mut self) {
        self.html = None;
        self.children = None;
        self.visible = None;
    }

    /// A user-initiated scroll, as the host would report it.
    pub fn user_scroll(&mut self, offset: u32) {
        self.scroll = offset;
        self.pending_scroll_events.push(offset);
    }

    /// A silent host reset: the embedding zeroes the offset with no
    /// lifecycle event beyond the raw scroll signal.
    pub fn force_reset(&mut self) {
        self.scroll = 0;
        self.pending_scroll_events.push(0);
    }

    pub fn drain_scroll_events(&mut self) -> Vec<u32> {
        std::mem::take(&mut self.pending_scroll_events)
    }

    pub fn scroll(&self) -> u32 {
        self.scroll
    }

    pub fn controls(&self) -> Option<&MountedControls> {
        self.controls.as_ref()
    }

    pub fn describe(&self) -> String {
        let article = match (&self.children, &self.html) {
            (Some(children), _) => {
                let visible = self
                    .visible
                    .map(|count| count as usize)
                    .unwrap_or(children.len());
                format!("{} of {} elements visible", visible.min(children.len()), children.len())
            }
            (None, Some(_)) => "article untouched".to_string(),
            (None, None) => "no article".to_string(),
        };
        let controls = match &self.controls {
            Some(mounted) => {
                let (current, total) = mounted.view.indicator();
                format!(
                    "controls at {:?}: section {current} of {total}, prev {}, next {}",
                    mounted.placement,
                    if mounted.view.prev_enabled { "on" } else { "off" },
                    if mounted.view.next_enabled { "on" } else { "off" },
                )
            }
            None => "no controls".to_string(),
        };
        format!("{article}; scroll {}px; {controls}", self.scroll)
    }
}

impl ArticleSurface for SimViewer {
    type Error = SimError;

    fn article_html(&self) -> Option<&str> {
        self.html.as_deref()
    }

    fn swap_children(&mut self, elements: &[ElementSpan]) -> Result<(), Self::Error> {
        let Some(html) = self.html.as_deref() else {
            return Err(SimError::NoArticle);
        };
        let children = elements
            .iter()
            .map(|span| html[span.start as usize..span.end as usize].to_string())
            .collect();
        self.children = Some(children);
        self.visible = None;
        Ok(())
    }

    fn set_visible_elements(&mut self, count: u16) -> Result<(), Self::Error> {
        if self.html.is_none() {
            return Err(SimError::NoArticle);
        }
        self.visible = Some(count);
        Ok(())
    }

    fn scroll_element_into_view(&mut self, element_index: u16) {
        let offset = ARTICLE_TOP_PX + u32::from(element_index) * ELEMENT_HEIGHT_PX;
        self.scroll = offset;
        self.pending_scroll_events.push(offset);
    }
}

impl ScrollPort for SimViewer {
    fn scroll_offset(&mut self) -> u32 {
        self.scroll
    }

    fn scroll_to(&mut self, offset: u32) {
        self.scroll = offset;
        self.pending_scroll_events.push(offset);
    }
}

impl ControlsHost for SimViewer {
    fn has_pagination_region(&self) -> bool {
        self.has_pagination
    }

    fn has_footer_region(&self) -> bool {
        self.has_footer
    }

    fn mount_controls(&mut self, placement: ControlsPlacement, view: &ControlsView) {
        self.controls = Some(MountedControls {
            placement,
            view: *view,
        });
    }

    fn update_controls(&mut self, view: &ControlsView) {
        if let Some(mounted) = self.controls.as_mut() {
            mounted.view = *view;
        }
    }

    fn remove_controls(&mut self) {
        self.controls = None;
    }
}
