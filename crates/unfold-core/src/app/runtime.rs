impl<H, PS> UnfoldApp<H, PS>
where
    H: ArticleSurface + ScrollPort + ControlsHost,
    PS: ProgressStore,
{
    /// Advance the engine's timers. The watchdog self-gates on its poll
    /// interval, so the host may tick at any cadence it likes.
    pub fn tick(&mut self, now_ms: u64) -> TickResult {
        self.watchdog.poll(now_ms, &mut self.host);

        if self.pending_redraw {
            self.pending_redraw = false;
            return TickResult::RenderRequested;
        }
        TickResult::NoRender
    }
}
