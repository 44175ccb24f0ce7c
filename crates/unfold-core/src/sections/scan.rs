use super::BREAK_MARKER;

/// One item encountered while scanning the article's direct children.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(super) enum TopLevelItem {
    Element { start: usize, end: usize },
    Break,
}

/// Single-pass scanner over rendered markup. Only the top level is
/// interpreted; markup nested inside an element is consumed for depth
/// tracking and nothing else, so markers inside an element body are plain
/// comments.
pub(super) struct TopLevelScanner<'a> {
    bytes: &'a [u8],
    cursor: usize,
}

impl<'a> TopLevelScanner<'a> {
    pub(super) fn new(bytes: &'a [u8]) -> Self {
        Self { bytes, cursor: 0 }
    }

    pub(super) fn next_item(&mut self) -> Option<TopLevelItem> {
        let bytes = self.bytes;
        while self.cursor < bytes.len() {
            let Some(rel) = bytes[self.cursor..].iter().position(|b| *b == b'<') else {
                self.cursor = bytes.len();
                return None;
            };
            let start = self.cursor + rel;

            if bytes[start..].starts_with(b"<!--") {
                let Some(body_len) = find_bytes(&bytes[start + 4..], b"-->") else {
                    // Unterminated comment swallows the rest of the input.
                    self.cursor = bytes.len();
                    return None;
                };
                let body = &bytes[start + 4..start + 4 + body_len];
                self.cursor = start + 4 + body_len + 3;
                if eq_ascii_case_insensitive(trim_ascii(body), BREAK_MARKER.as_bytes()) {
                    return Some(TopLevelItem::Break);
                }
                continue;
            }

            if bytes[start..].starts_with(b"<!") || bytes[start..].starts_with(b"<?") {
                match scan_tag_end(bytes, start + 1) {
                    Some(gt) => self.cursor = gt + 1,
                    None => self.cursor = bytes.len(),
                }
                continue;
            }

            let Some(tag) = read_tag(bytes, start) else {
                // A bare '<' in text; keep scanning after it.
                self.cursor = start + 1;
                continue;
            };

            if tag.is_closing {
                // Stray close tag at top level; not a child element.
                self.cursor = tag.end;
                continue;
            }

            let end = if tag.is_self_closing || is_void_tag(tag.name) {
                tag.end
            } else if is_raw_text_tag(tag.name) {
                skip_raw_text(bytes, tag.end, tag.name)
            } else {
                self.element_end(tag.end)
            };
            self.cursor = end;
            return Some(TopLevelItem::Element { start, end });
        }
        None
    }

    /// Find the end of an open element by depth counting from just past its
    /// open tag. Unclosed elements extend to the end of the input.
    fn element_end(&self, mut cursor: usize) -> usize {
        let bytes = self.bytes;
        let mut depth = 1usize;
        while depth > 0 && cursor < bytes.len() {
            let Some(rel) = bytes[cursor..].iter().position(|b| *b == b'<') else {
                return bytes.len();
            };
            let at = cursor + rel;

            if bytes[at..].starts_with(b"<!--") {
                match find_bytes(&bytes[at + 4..], b"-->") {
                    Some(body_len) => cursor = at + 4 + body_len + 3,
                    None => return bytes.len(),
                }
                continue;
            }
            if bytes[at..].starts_with(b"<!") || bytes[at..].starts_with(b"<?") {
                match scan_tag_end(bytes, at + 1) {
                    Some(gt) => cursor = gt + 1,
                    None => return bytes.len(),
                }
                continue;
            }

            let Some(tag) = read_tag(bytes, at) else {
                cursor = at + 1;
                continue;
            };
            if !tag.is_closing && is_raw_text_tag(tag.name) {
                cursor = skip_raw_text(bytes, tag.end, tag.name);
                continue;
            }
            if tag.is_closing {
                depth -= 1;
            } else if !tag.is_self_closing && !is_void_tag(tag.name) {
                depth += 1;
            }
            cursor = tag.end;
        }
        cursor
    }
}

struct TagToken<'a> {
    name: &'a [u8],
    is_closing: bool,
    is_self_closing: bool,
    /// Index just past the closing `>`.
    end: usize,
}

/// Parse the tag starting at `at` (which must point at `<`). Returns `None`
/// when what follows is not a tag at all.
fn read_tag(bytes: &[u8], at: usize) -> Option<TagToken<'_>> {
    let gt = scan_tag_end(bytes, at + 1)?;
    let inner = trim_ascii(&bytes[at + 1..gt]);
    if inner.is_empty() {
        return None;
    }

    let (is_closing, rest) = if inner[0] == b'/' {
        (true, trim_ascii(&inner[1..]))
    } else {
        (false, inner)
    };
    if rest.is_empty() || !rest[0].is_ascii_alphabetic() {
        return None;
    }
    let is_self_closing = rest.ends_with(b"/");

    let mut name_end = 0usize;
    while name_end < rest.len()
        && !rest[name_end].is_ascii_whitespace()
        && rest[name_end] != b'/'
    {
        name_end += 1;
    }
    let name = &rest[..name_end];
    let local_name = name
        .iter()
        .rposition(|b| *b == b':')
        .map(|idx| &name[idx + 1..])
        .unwrap_or(name);
    if local_name.is_empty() {
        return None;
    }

    Some(TagToken {
        name: local_name,
        is_closing,
        is_self_closing,
        end: gt + 1,
    })
}

/// Position of the `>` closing a tag, ignoring `>` inside quoted attribute
/// values.
fn scan_tag_end(bytes: &[u8], mut cursor: usize) -> Option<usize> {
    let mut quote: Option<u8> = None;
    while cursor < bytes.len() {
        let byte = bytes[cursor];
        match quote {
            Some(open) => {
                if byte == open {
                    quote = None;
                }
            }
            None => match byte {
                b'"' | b'\'' => quote = Some(byte),
                b'>' => return Some(cursor),
                _ => {}
            },
        }
        cursor += 1;
    }
    None
}

/// Skip the raw-text body of `name` (script/style) up to just past its close
/// tag, or to the end of input when unclosed.
fn skip_raw_text(bytes: &[u8], mut cursor: usize, name: &[u8]) -> usize {
    while cursor < bytes.len() {
        let Some(rel) = bytes[cursor..].iter().position(|b| *b == b'<') else {
            return bytes.len();
        };
        let at = cursor + rel;
        if bytes[at..].len() > name.len() + 2
            && bytes[at + 1] == b'/'
            && eq_ascii_case_insensitive(&bytes[at + 2..at + 2 + name.len()], name)
        {
            return match scan_tag_end(bytes, at + 2 + name.len()) {
                Some(gt) => gt + 1,
                None => bytes.len(),
            };
        }
        cursor = at + 1;
    }
    bytes.len()
}

fn is_raw_text_tag(name: &[u8]) -> bool {
    eq_ascii_case_insensitive(name, b"script") || eq_ascii_case_insensitive(name, b"style")
}

fn is_void_tag(name: &[u8]) -> bool {
    eq_ascii_case_insensitive(name, b"area")
        || eq_ascii_case_insensitive(name, b"base")
        || eq_ascii_case_insensitive(name, b"br")
        || eq_ascii_case_insensitive(name, b"col")
        || eq_ascii_case_insensitive(name, b"embed")
        || eq_ascii_case_insensitive(name, b"hr")
        || eq_ascii_case_insensitive(name, b"img")
        || eq_ascii_case_insensitive(name, b"input")
        || eq_ascii_case_insensitive(name, b"link")
        || eq_ascii_case_insensitive(name, b"meta")
        || eq_ascii_case_insensitive(name, b"param")
        || eq_ascii_case_insensitive(name, b"source")
        || eq_ascii_case_insensitive(name, b"track")
        || eq_ascii_case_insensitive(name, b"wbr")
}

fn eq_ascii_case_insensitive(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right.iter())
            .all(|(a, b)| a.eq_ignore_ascii_case(b))
}

fn find_bytes(haystack: &[u8], needle: &[u8]) -> Option<usize> {
    if needle.is_empty() || needle.len() > haystack.len() {
        return None;
    }
    (0..=haystack.len() - needle.len())
        .find(|&idx| &haystack[idx..idx + needle.len()] == needle)
}

fn trim_ascii(slice: &[u8]) -> &[u8] {
    let mut start = 0usize;
    let mut end = slice.len();
    while start < end && slice[start].is_ascii_whitespace() {
        start += 1;
    }
    while end > start && slice[end - 1].is_ascii_whitespace() {
        end -= 1;
    }
    &slice[start..end]
}
