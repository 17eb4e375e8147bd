//! Ordered line rules for the content filter
//!
//! Each line is tested against [`RULES`] from top to bottom and the first
//! rule whose test passes decides both the line's classification and whether
//! it survives. Lines that reach the import/image/HTML/component rules are
//! never inside a code block, since the fence and code rules come first.

use super::{ContentFilter, ScanState};

const FENCE: &str = "```";

/// How a line was classified during the scan
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    /// Opening or closing code fence
    CodeFence,
    /// Line inside a fenced code block
    Code,
    /// MDX `import` statement
    Import,
    /// Markdown image reference (`![alt](src)`)
    Image,
    /// Raw HTML root tag that starts a dropped block
    HtmlOpen,
    /// Closing root tag that ends a dropped HTML block
    HtmlClose,
    /// Line inside a raw HTML block
    HtmlBody,
    /// Component tag that starts a dropped block
    ComponentOpen,
    /// Line carrying `>` while a component block is open
    ComponentTagEnd,
    /// Explicit `</...` closing a component block
    ComponentClose,
    /// Line inside a component block
    ComponentBody,
    /// Prose, headings, lists and anything else
    Plain,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Verdict {
    Keep,
    Drop,
}

/// A single input line with its trimmed form
pub(crate) struct Line<'a> {
    pub raw: &'a str,
    pub trimmed: &'a str,
}

impl<'a> Line<'a> {
    pub fn new(raw: &'a str) -> Self {
        Self {
            raw,
            trimmed: raw.trim(),
        }
    }
}

pub(crate) struct Rule {
    pub kind: LineKind,
    pub test: fn(&ContentFilter, &ScanState, &Line<'_>) -> bool,
    pub action: fn(&mut ScanState, &Line<'_>) -> Verdict,
}

pub(crate) static RULES: &[Rule] = &[
    Rule {
        kind: LineKind::CodeFence,
        test: is_fence,
        action: toggle_fence,
    },
    Rule {
        kind: LineKind::Code,
        test: in_code,
        action: pass_code,
    },
    Rule {
        kind: LineKind::Import,
        test: is_import,
        action: drop_line,
    },
    Rule {
        kind: LineKind::Image,
        test: is_image,
        action: drop_line,
    },
    Rule {
        kind: LineKind::HtmlOpen,
        test: opens_html,
        action: enter_html,
    },
    Rule {
        kind: LineKind::HtmlClose,
        test: closes_html,
        action: leave_html,
    },
    Rule {
        kind: LineKind::HtmlBody,
        test: in_html,
        action: drop_line,
    },
    Rule {
        kind: LineKind::ComponentOpen,
        test: opens_component,
        action: enter_component,
    },
    Rule {
        kind: LineKind::ComponentTagEnd,
        test: ends_component_tag,
        action: end_component_tag,
    },
    Rule {
        kind: LineKind::ComponentClose,
        test: closes_component,
        action: leave_component,
    },
    Rule {
        kind: LineKind::ComponentBody,
        test: in_component,
        action: drop_line,
    },
    Rule {
        kind: LineKind::Plain,
        test: always,
        action: keep_line,
    },
];

/// Find the first rule that applies to `line` in the current state
pub(crate) fn first_match(
    filter: &ContentFilter,
    state: &ScanState,
    line: &Line<'_>,
) -> &'static Rule {
    RULES
        .iter()
        .find(|rule| (rule.test)(filter, state, line))
        // The last rule always matches
        .unwrap_or(&RULES[RULES.len() - 1])
}

fn is_fence(_: &ContentFilter, _: &ScanState, line: &Line<'_>) -> bool {
    line.trimmed.starts_with(FENCE)
}

fn toggle_fence(state: &mut ScanState, line: &Line<'_>) -> Verdict {
    if state.in_code_block {
        state.in_code_block = false;
        state.fence_lang = None;
    } else {
        state.in_code_block = true;
        state.fence_lang = line
            .trimmed
            .strip_prefix(FENCE)
            .filter(|lang| !lang.is_empty())
            .map(str::to_lowercase);
    }
    Verdict::Keep
}

fn in_code(_: &ContentFilter, state: &ScanState, _: &Line<'_>) -> bool {
    state.in_code_block
}

// Fenced content is verbatim unless an HTML or component block is already
// dropping everything.
fn pass_code(state: &mut ScanState, _: &Line<'_>) -> Verdict {
    if state.is_suppressing() {
        Verdict::Drop
    } else {
        Verdict::Keep
    }
}

fn is_import(_: &ContentFilter, _: &ScanState, line: &Line<'_>) -> bool {
    line.trimmed.starts_with("import")
}

fn is_image(_: &ContentFilter, _: &ScanState, line: &Line<'_>) -> bool {
    line.trimmed.starts_with("![")
}

fn opens_html(filter: &ContentFilter, _: &ScanState, line: &Line<'_>) -> bool {
    filter.opens_html(line.raw)
}

fn enter_html(state: &mut ScanState, _: &Line<'_>) -> Verdict {
    state.in_html_block = true;
    Verdict::Drop
}

fn closes_html(filter: &ContentFilter, state: &ScanState, line: &Line<'_>) -> bool {
    state.in_html_block && filter.closes_html(line.raw)
}

fn leave_html(state: &mut ScanState, _: &Line<'_>) -> Verdict {
    state.in_html_block = false;
    Verdict::Drop
}

fn in_html(_: &ContentFilter, state: &ScanState, _: &Line<'_>) -> bool {
    state.in_html_block
}

fn opens_component(filter: &ContentFilter, _: &ScanState, line: &Line<'_>) -> bool {
    let raw = line.raw;
    raw.contains('<') && raw.contains(' ') && !raw.starts_with("<div") && filter.names_component(raw)
}

fn enter_component(state: &mut ScanState, line: &Line<'_>) -> Verdict {
    // A tag closed on its own line leaves nothing to skip
    state.skip_block = !ends_block(line.raw);
    Verdict::Drop
}

fn ends_component_tag(_: &ContentFilter, state: &ScanState, line: &Line<'_>) -> bool {
    state.skip_block && line.raw.contains('>')
}

fn end_component_tag(state: &mut ScanState, line: &Line<'_>) -> Verdict {
    if ends_block(line.raw) {
        state.skip_block = false;
    }
    Verdict::Drop
}

fn closes_component(_: &ContentFilter, state: &ScanState, line: &Line<'_>) -> bool {
    state.skip_block && line.raw.contains("</")
}

fn leave_component(state: &mut ScanState, _: &Line<'_>) -> Verdict {
    state.skip_block = false;
    Verdict::Drop
}

fn in_component(_: &ContentFilter, state: &ScanState, _: &Line<'_>) -> bool {
    state.skip_block
}

fn always(_: &ContentFilter, _: &ScanState, _: &Line<'_>) -> bool {
    true
}

fn drop_line(_: &mut ScanState, _: &Line<'_>) -> Verdict {
    Verdict::Drop
}

fn keep_line(_: &mut ScanState, _: &Line<'_>) -> Verdict {
    Verdict::Keep
}

fn ends_block(raw: &str) -> bool {
    raw.contains("/>") || raw.contains("</")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_rule_is_last() {
        let last = RULES.last().unwrap();
        assert_eq!(last.kind, LineKind::Plain);
    }

    #[test]
    fn test_fence_and_code_rules_come_first() {
        let kinds: Vec<_> = RULES.iter().take(2).map(|r| r.kind).collect();
        assert_eq!(kinds, vec![LineKind::CodeFence, LineKind::Code]);
    }

    #[test]
    fn test_html_rules_precede_component_rules() {
        let position = |kind| RULES.iter().position(|r| r.kind == kind).unwrap();
        assert!(position(LineKind::HtmlBody) < position(LineKind::ComponentOpen));
    }

    #[test]
    fn test_fence_lang_is_lowercased() {
        let mut state = ScanState::default();
        toggle_fence(&mut state, &Line::new("  ```Python"));
        assert!(state.in_code_block);
        assert_eq!(state.fence_lang.as_deref(), Some("python"));

        toggle_fence(&mut state, &Line::new("```"));
        assert!(!state.in_code_block);
        assert_eq!(state.fence_lang, None);
    }

    #[test]
    fn test_bare_fence_has_no_lang() {
        let mut state = ScanState::default();
        toggle_fence(&mut state, &Line::new("```"));
        assert!(state.in_code_block);
        assert_eq!(state.fence_lang, None);
    }
}
