//! Article segmentation: splitting rendered markup into ordered sections.
//!
//! Sections are contiguous runs of top-level elements delimited by authored
//! break-marker comments. The result is an arena-style table of element byte
//! spans plus section spans over it; when at least two non-empty runs exist
//! the host is asked to rebuild its child list from the table, otherwise the
//! article is left untouched as a single section.

use log::debug;

mod scan;

use scan::{TopLevelItem, TopLevelScanner};

/// Comment body that marks a section boundary. Matched ASCII
/// case-insensitively with surrounding whitespace ignored.
pub const BREAK_MARKER: &str = "fold:break";

pub const MAX_ELEMENTS: usize = 192;
pub const MAX_SECTIONS: usize = 24;

/// Byte range of one top-level element in the rendered markup.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ElementSpan {
    pub start: u32,
    pub end: u32,
}

/// One section: a contiguous run of entries in the element table.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct SectionSpan {
    pub first_element: u16,
    pub element_count: u16,
}

/// Ordered sections over a shared element table.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SectionMap {
    elements: heapless::Vec<ElementSpan, MAX_ELEMENTS>,
    sections: heapless::Vec<SectionSpan, MAX_SECTIONS>,
    rebuilt: bool,
}

impl SectionMap {
    pub const fn new() -> Self {
        Self {
            elements: heapless::Vec::new(),
            sections: heapless::Vec::new(),
            rebuilt: false,
        }
    }

    pub fn section_count(&self) -> u16 {
        self.sections.len() as u16
    }

    pub fn has_multiple(&self) -> bool {
        self.sections.len() > 1
    }

    /// Whether the host must replace its child list with [`elements`].
    ///
    /// [`elements`]: SectionMap::elements
    pub fn was_rebuilt(&self) -> bool {
        self.rebuilt
    }

    /// Element table in final document order. Break markers and top-level
    /// text nodes are not part of the table.
    pub fn elements(&self) -> &[ElementSpan] {
        &self.elements
    }

    pub fn element_count(&self) -> u16 {
        self.elements.len() as u16
    }

    pub fn section_at(&self, index: u16) -> Option<SectionSpan> {
        self.sections.get(index as usize).copied()
    }

    /// Index of the first element of `section`, if the section exists and is
    /// non-empty.
    pub fn first_element_of(&self, section: u16) -> Option<u16> {
        self.section_at(section)
            .filter(|span| span.element_count > 0)
            .map(|span| span.first_element)
    }

    /// Number of elements covered by sections `0..=section`.
    pub fn visible_prefix(&self, section: u16) -> u16 {
        let mut total = 0u16;
        for (index, span) in self.sections.iter().enumerate() {
            if index as u16 > section {
                break;
            }
            total = total.saturating_add(span.element_count);
        }
        total
    }
}

/// Partition `article_html` at top-level break markers.
///
/// Invariants: sections are contiguous, non-overlapping, and jointly
/// exhaustive over the element table in document order, and there is always
/// at least one section when the article has any element at all. Markers with
/// fewer than two non-empty runs around them degrade to the single-section
/// fallback so a one-item "sectioned" article never suppresses content.
pub fn segment(article_html: &str) -> SectionMap {
    let mut map = SectionMap::new();
    let mut scanner = TopLevelScanner::new(article_html.as_bytes());
    let mut run_start: u16 = 0;
    let mut saw_marker = false;
    let mut overflow = false;

    while let Some(item) = scanner.next_item() {
        match item {
            TopLevelItem::Element { start, end } => {
                let span = ElementSpan {
                    start: start as u32,
                    end: end as u32,
                };
                if map.elements.push(span).is_err() {
                    overflow = true;
                    break;
                }
            }
            TopLevelItem::Break => {
                saw_marker = true;
                if close_run(&mut map, &mut run_start).is_err() {
                    overflow = true;
                    break;
                }
            }
        }
    }

    if !overflow && close_run(&mut map, &mut run_start).is_err() {
        overflow = true;
    }

    if overflow {
        debug!(
            "sections: table capacity exceeded, falling back to one section len={}",
            article_html.len()
        );
    }

    if overflow || !saw_marker || map.sections.len() < 2 {
        return single_section_fallback(map);
    }

    map.rebuilt = true;
    map
}

/// Close the run that started at `run_start`, discarding it when empty.
fn close_run(map: &mut SectionMap, run_start: &mut u16) -> Result<(), ()> {
    let element_count = map.element_count().saturating_sub(*run_start);
    if element_count == 0 {
        return Ok(());
    }
    let span = SectionSpan {
        first_element: *run_start,
        element_count,
    };
    *run_start = map.element_count();
    map.sections.push(span).map(|_| ()).map_err(|_| ())
}

fn single_section_fallback(mut map: SectionMap) -> SectionMap {
    map.sections.clear();
    map.rebuilt = false;
    // Even a childless article is one (empty) section, so the navigation
    // state machine never initializes against zero sections.
    let span = SectionSpan {
        first_element: 0,
        element_count: map.element_count(),
    };
    let _ = map.sections.push(span);
    map
}
