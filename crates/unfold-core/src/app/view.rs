impl<H, PS> UnfoldApp<H, PS>
where
    H: ArticleSurface + ScrollPort + ControlsHost,
    PS: ProgressStore,
{
    pub fn new(host: H, progress: PS, watchdog_config: WatchdogConfig) -> Self {
        Self {
            host,
            progress,
            route: RouteKey::empty(),
            sections: SectionMap::new(),
            nav: NavState::Uninitialized,
            controls_mounted: false,
            pending_redraw: false,
            watchdog: ScrollWatchdog::new(watchdog_config),
        }
    }

    pub fn host(&self) -> &H {
        &self.host
    }

    pub fn host_mut(&mut self) -> &mut H {
        &mut self.host
    }

    pub fn controls_mounted(&self) -> bool {
        self.controls_mounted
    }

    /// Run `f` with the current control surface snapshot, when one is
    /// mounted.
    pub fn with_controls<F>(&self, f: F)
    where
        F: FnOnce(ControlsView),
    {
        if !self.controls_mounted {
            return;
        }
        if let NavState::Ready { current } = self.nav {
            f(self.controls_view(current));
        }
    }

    fn controls_view(&self, current: u16) -> ControlsView {
        let count = self.sections.section_count();
        ControlsView {
            current_section: current,
            section_count: count,
            prev_enabled: current > 0,
            next_enabled: current.saturating_add(1) < count,
        }
    }

    /// Insertion point for the affordance block: before an existing
    /// pagination region, else before a footer, else right after the
    /// article. First match wins.
    fn choose_placement(&self) -> ControlsPlacement {
        if self.host.has_pagination_region() {
            ControlsPlacement::BeforePagination
        } else if self.host.has_footer_region() {
            ControlsPlacement::BeforeFooter
        } else {
            ControlsPlacement::AfterArticle
        }
    }
}
