//! Route identity for progress and scroll memory.

use heapless::String;

/// Capacity of one route key in bytes (path plus optional anchor).
pub const ROUTE_KEY_BYTES: usize = 192;

/// Identity of the current page: path plus optional in-page anchor.
///
/// Scroll memory keys on the full path+anchor form so two anchored views of
/// one article are protected independently. Unfold progress keys on the path
/// alone, so following an in-page anchor does not reset progress.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct RouteKey {
    buf: String<ROUTE_KEY_BYTES>,
    path_len: usize,
}

impl RouteKey {
    pub fn new(path: &str, anchor: Option<&str>) -> Self {
        let mut buf = bounded_key(path);
        let path_len = buf.len();
        if let Some(anchor) = anchor
            && !anchor.is_empty()
        {
            let _ = buf.push('#');
            push_truncated(&mut buf, anchor);
        }
        Self { buf, path_len }
    }

    pub const fn empty() -> Self {
        Self {
            buf: String::new(),
            path_len: 0,
        }
    }

    /// Key for in-session scroll memory (anchor-sensitive).
    pub fn scroll_key(&self) -> &str {
        self.buf.as_str()
    }

    /// Key for persisted progress (anchor-independent).
    pub fn progress_key(&self) -> &str {
        &self.buf.as_str()[..self.path_len]
    }
}

pub(crate) fn bounded_key(text: &str) -> String<ROUTE_KEY_BYTES> {
    let mut out = String::new();
    push_truncated(&mut out, text);
    out
}

fn push_truncated(out: &mut String<ROUTE_KEY_BYTES>, text: &str) {
    for ch in text.chars() {
        if out.push(ch).is_err() {
            break;
        }
    }
}
