impl<H, PS> UnfoldApp<H, PS>
where
    H: ArticleSurface + ScrollPort + ControlsHost,
    PS: ProgressStore,
{
    /// Jump to section `target`. Out-of-range targets and the current
    /// section are silent no-ops: navigation is advisory UI and must never
    /// break rendering.
    pub fn go_to(&mut self, target: u16) {
        let NavState::Ready { current } = self.nav else {
            return;
        };
        let count = self.sections.section_count();
        if target >= count || target == current {
            return;
        }

        if self
            .host
            .set_visible_elements(self.sections.visible_prefix(target))
            .is_err()
        {
            debug!(
                "unfold: visibility toggle rejected target={} route={}",
                target,
                self.route.progress_key()
            );
            return;
        }

        self.nav = NavState::Ready { current: target };
        self.save_progress(target);
        if let Some(element) = self.sections.first_element_of(target) {
            self.host.scroll_element_into_view(element);
        }

        if self.controls_mounted {
            let view = self.controls_view(target);
            self.host.update_controls(&view);
        }
        self.pending_redraw = true;
        debug!(
            "unfold: section {}/{} route={}",
            target.saturating_add(1),
            count,
            self.route.progress_key()
        );
    }

    pub fn next(&mut self) {
        if let NavState::Ready { current } = self.nav {
            self.go_to(current.saturating_add(1));
        }
    }

    pub fn prev(&mut self) {
        if let NavState::Ready { current } = self.nav
            && current > 0
        {
            self.go_to(current - 1);
        }
    }

    pub fn current_section(&self) -> Option<u16> {
        match self.nav {
            NavState::Ready { current } => Some(current),
            NavState::Uninitialized => None,
        }
    }

    pub fn section_count(&self) -> u16 {
        self.sections.section_count()
    }

    fn load_progress(&mut self) -> u16 {
        match self.progress.load(self.route.progress_key()) {
            Ok(Some(index)) => index,
            Ok(None) => 0,
            Err(_) => {
                debug!(
                    "unfold: progress load failed, starting at first section route={}",
                    self.route.progress_key()
                );
                0
            }
        }
    }

    fn save_progress(&mut self, index: u16) {
        if self
            .progress
            .save(self.route.progress_key(), index)
            .is_err()
        {
            debug!(
                "unfold: progress save dropped route={}",
                self.route.progress_key()
            );
        }
    }
}
