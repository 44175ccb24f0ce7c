impl<H, PS> UnfoldApp<H, PS>
where
    H: ArticleSurface + ScrollPort + ControlsHost,
    PS: ProgressStore,
{
    /// Pointer activation of the prior-section affordance.
    pub fn press_prev(&mut self) {
        self.prev();
    }

    /// Pointer activation of the next-section affordance.
    pub fn press_next(&mut self) {
        self.next();
    }

    /// Forward a directional key. `in_text_entry` reports whether the active
    /// focus is a text-entry field; typing never navigates. Returns
    /// [`KeyOutcome::Handled`] only when the key caused a transition, which
    /// is the only case where the host suppresses default key handling.
    pub fn handle_key(&mut self, key: NavKey, in_text_entry: bool) -> KeyOutcome {
        // Single-section articles mount no controls and capture no keys.
        if in_text_entry || !self.controls_mounted {
            return KeyOutcome::Ignored;
        }
        let NavState::Ready { current } = self.nav else {
            return KeyOutcome::Ignored;
        };

        let transitions = match key {
            NavKey::Left => current > 0,
            NavKey::Right => current.saturating_add(1) < self.sections.section_count(),
        };
        if !transitions {
            return KeyOutcome::Ignored;
        }

        match key {
            NavKey::Left => self.prev(),
            NavKey::Right => self.next(),
        }
        KeyOutcome::Handled
    }
}
