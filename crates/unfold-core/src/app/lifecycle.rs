impl<H, PS> UnfoldApp<H, PS>
where
    H: ArticleSurface + ScrollPort + ControlsHost,
    PS: ProgressStore,
{
    /// Host hook: the article for `path` is fully in the document tree.
    ///
    /// May fire repeatedly for one logical page view (re-renders); every
    /// firing behaves as a fresh mount, removing any prior control surface
    /// first.
    pub fn content_ready(&mut self, path: &str, anchor: Option<&str>) {
        if self.controls_mounted {
            self.host.remove_controls();
            self.controls_mounted = false;
        }
        self.nav = NavState::Uninitialized;
        self.sections = SectionMap::new();
        self.route = RouteKey::new(path, anchor);
        self.watchdog.rekey(self.route.scroll_key());

        let map = match self.host.article_html() {
            Some(html) => segment(html),
            None => {
                debug!("unfold: no article content, skipping init route={}", path);
                return;
            }
        };
        self.watchdog.mark_content_ready();

        if map.was_rebuilt() && self.host.swap_children(map.elements()).is_err() {
            debug!("unfold: child swap rejected, showing full article route={}", path);
            return;
        }

        if !map.has_multiple() {
            self.sections = map;
            self.nav = NavState::Ready { current: 0 };
            debug!("unfold: single section, navigation disabled route={}", path);
            return;
        }

        let persisted = self.load_progress();
        let current = persisted.min(map.section_count().saturating_sub(1));
        self.sections = map;
        self.nav = NavState::Ready { current };

        // First reveal only: no save and no scroll-into-view here.
        if self
            .host
            .set_visible_elements(self.sections.visible_prefix(current))
            .is_err()
        {
            debug!("unfold: visibility toggle rejected route={}", path);
        }

        let placement = self.choose_placement();
        let view = self.controls_view(current);
        self.host.mount_controls(placement, &view);
        self.controls_mounted = true;
        debug!(
            "unfold: content ready route={} sections={} current={}",
            path,
            self.sections.section_count(),
            current.saturating_add(1)
        );
    }

    /// Host hook: the viewer is about to navigate away. Scroll memory and
    /// persisted progress survive; they key on routes, not on this mount.
    pub fn before_navigate(&mut self) {
        if self.controls_mounted {
            self.host.remove_controls();
            self.controls_mounted = false;
        }
        self.nav = NavState::Uninitialized;
        self.sections = SectionMap::new();
        self.pending_redraw = false;
    }

    /// Raw scroll signal from the host, in document offset units.
    pub fn on_scroll(&mut self, offset: u32) {
        self.watchdog.observe_scroll(offset);
    }
}
