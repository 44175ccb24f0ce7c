//! Navigation state machine, control surface state, and lifecycle entry
//! points for progressive unfold.

use log::debug;

use crate::{
    host::{ArticleSurface, ControlsHost, ControlsPlacement, ControlsView, ScrollPort},
    progress::ProgressStore,
    route::RouteKey,
    sections::{SectionMap, segment},
    watchdog::{ScrollWatchdog, WatchdogConfig},
};

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum TickResult {
    NoRender,
    RenderRequested,
}

/// Directional navigation keys forwarded by the host.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum NavKey {
    Left,
    Right,
}

/// Outcome of a forwarded key event.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum KeyOutcome {
    /// The key caused a section transition; the host must suppress its
    /// default handling.
    Handled,
    /// No transition; default handling proceeds.
    Ignored,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
enum NavState {
    Uninitialized,
    Ready { current: u16 },
}

/// One engine instance per embedding, owning the host references and all
/// navigation state. Constructed once; re-armed by `content_ready` on every
/// render and torn down wholesale by `before_navigate`.
pub struct UnfoldApp<H, PS>
where
    H: ArticleSurface + ScrollPort + ControlsHost,
    PS: ProgressStore,
{
    host: H,
    progress: PS,
    route: RouteKey,
    sections: SectionMap,
    nav: NavState,
    controls_mounted: bool,
    pending_redraw: bool,
    watchdog: ScrollWatchdog,
}

include!("lifecycle.rs");
include!("navigation.rs");
include!("input.rs");
include!("view.rs");
include!("runtime.rs");
