//! Line-oriented session scripts driving the engine the way a host would.
//!
//! One command per line; lines starting with `#` are comments. The session
//! owns simulated
//! time: `tick` advances it, nothing else does, so scripted runs are exactly
//! reproducible.

use std::io::{self, BufRead};

use log::warn;
use unfold_core::app::{KeyOutcome, NavKey, TickResult, UnfoldApp};
use unfold_core::workspace::WorkspaceLinks;

use crate::progress_file::FileProgressStore;
use crate::sim_viewer::SimViewer;
use crate::workspace_fs::FsWorkspace;

pub type SimApp = UnfoldApp<SimViewer, FileProgressStore>;

pub struct Session {
    app: SimApp,
    links: WorkspaceLinks<FsWorkspace>,
    route_path: String,
    route_anchor: Option<String>,
    now_ms: u64,
    tick_step_ms: u64,
}

impl Session {
    pub fn new(
        app: SimApp,
        links: WorkspaceLinks<FsWorkspace>,
        route: &str,
        tick_step_ms: u64,
    ) -> Self {
        let (path, anchor) = split_route(route);
        Self {
            app,
            links,
            route_path: path,
            route_anchor: anchor,
            now_ms: 0,
            tick_step_ms: tick_step_ms.max(1),
        }
    }

    pub fn run<R: BufRead>(&mut self, reader: R) -> io::Result<()> {
        for line in reader.lines() {
            self.execute(&line?);
        }
        Ok(())
    }

    fn execute(&mut self, line: &str) {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return;
        }
        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or("");
        let rest: Vec<&str> = words.collect();

        match (command, rest.as_slice()) {
            ("article", [path]) => self.cmd_article(path),
            ("noarticle", []) => self.app.host_mut().clear_article(),
            ("ready", []) => self.cmd_ready(),
            ("nav", [route]) => self.cmd_nav(route),
            ("scroll", [offset]) => self.cmd_scroll(offset),
            ("reset", []) => {
                self.app.host_mut().force_reset();
                self.pump();
                println!("reset: offset forced to 0 by host");
            }
            ("tick", [ms]) => self.cmd_tick(ms),
            ("key", [key]) => self.cmd_key(key, false),
            ("key", [key, "typing"]) => self.cmd_key(key, true),
            ("click", ["next"]) => {
                self.app.press_next();
                self.report("click next");
            }
            ("click", ["prev"]) => {
                self.app.press_prev();
                self.report("click prev");
            }
            ("goto", [section]) => self.cmd_goto(section),
            ("open", [path]) => {
                let delivered = self.links.open_or_create(path);
                println!("open {path}: {}", if delivered { "ok" } else { "dropped" });
            }
            ("dump", []) => println!("state: {}", self.app.host().describe()),
            _ => warn!("session: unrecognized command {line:?}"),
        }
    }

    fn cmd_article(&mut self, path: &str) {
        match std::fs::read_to_string(path) {
            Ok(html) => {
                self.app.host_mut().set_article(html);
                println!("article: loaded {path}");
            }
            Err(err) => warn!("session: cannot read article {path}: {err}"),
        }
    }

    fn cmd_ready(&mut self) {
        self.app
            .content_ready(&self.route_path, self.route_anchor.as_deref());
        self.pump();
        self.report("ready");
    }

    fn cmd_nav(&mut self, route: &str) {
        self.app.before_navigate();
        let (path, anchor) = split_route(route);
        self.route_path = path;
        self.route_anchor = anchor;
        println!("nav: {route} (waiting for ready)");
    }

    fn cmd_scroll(&mut self, offset: &str) {
        let Ok(offset) = offset.parse::<u32>() else {
            warn!("session: scroll expects an offset, got {offset:?}");
            return;
        };
        self.app.host_mut().user_scroll(offset);
        self.pump();
    }

    fn cmd_tick(&mut self, ms: &str) {
        let Ok(ms) = ms.parse::<u64>() else {
            warn!("session: tick expects milliseconds, got {ms:?}");
            return;
        };
        let deadline = self.now_ms.saturating_add(ms);
        while self.now_ms < deadline {
            self.now_ms = (self.now_ms + self.tick_step_ms).min(deadline);
            if self.app.tick(self.now_ms) == TickResult::RenderRequested {
                println!("render: {}", self.app.host().describe());
            }
            self.pump();
        }
    }

    fn cmd_key(&mut self, key: &str, typing: bool) {
        let key = match key {
            "left" => NavKey::Left,
            "right" => NavKey::Right,
            other => {
                warn!("session: unknown key {other:?}");
                return;
            }
        };
        let outcome = self.app.handle_key(key, typing);
        self.pump();
        println!(
            "key: {} -> {}",
            match key {
                NavKey::Left => "left",
                NavKey::Right => "right",
            },
            match outcome {
                KeyOutcome::Handled => "handled",
                KeyOutcome::Ignored => "ignored",
            }
        );
    }

    fn cmd_goto(&mut self, section: &str) {
        // Sections are one-based on the surface, matching the indicator.
        let Ok(section) = section.parse::<u16>() else {
            warn!("session: goto expects a section number, got {section:?}");
            return;
        };
        if section == 0 {
            warn!("session: sections are numbered from 1");
            return;
        }
        self.app.go_to(section - 1);
        self.pump();
        self.report("goto");
    }

    /// Deliver queued scroll events back into the engine, as the host's
    /// event loop would after any mutation.
    fn pump(&mut self) {
        let events = self.app.host_mut().drain_scroll_events();
        for offset in events {
            self.app.on_scroll(offset);
        }
    }

    fn report(&self, verb: &str) {
        println!("{verb}: {}", self.app.host().describe());
    }
}

fn split_route(route: &str) -> (String, Option<String>) {
    match route.split_once('#') {
        Some((path, anchor)) if !anchor.is_empty() => {
            (path.to_string(), Some(anchor.to_string()))
        }
        Some((path, _)) => (path.to_string(), None),
        None => (route.to_string(), None),
    }
}
