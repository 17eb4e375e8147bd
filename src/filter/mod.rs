//! MDX-to-plain-text content filter
//!
//! Removes syntax that only means something to the docs site generator
//! (MDX imports, image references, raw HTML documents and component blocks)
//! so a page body can be concatenated into a flat text corpus. Prose and
//! fenced code pass through untouched. Lines are only ever dropped, never
//! rewritten or reordered.

mod rules;

pub use rules::LineKind;

use rules::{Line, Verdict};
use serde::{Deserialize, Serialize};

/// Markers that drive the filter
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FilterConfig {
    /// Component tag names whose opening tag starts a dropped block
    pub component_tags: Vec<String>,
    /// Substrings that open a raw HTML block
    pub html_open_markers: Vec<String>,
    /// Substrings that close a raw HTML block
    pub html_close_markers: Vec<String>,
}

impl Default for FilterConfig {
    fn default() -> Self {
        Self {
            component_tags: ["ApiDocMdx", "Tabs", "TabItem", "CodeBlock"]
                .map(String::from)
                .to_vec(),
            html_open_markers: ["<html", "<body", "<head", "<script", "<style"]
                .map(String::from)
                .to_vec(),
            html_close_markers: ["</html>", "</body>", "</head>"]
                .map(String::from)
                .to_vec(),
        }
    }
}

/// Per-document scan state
///
/// Owned by the caller and threaded through a single pass over one document.
/// A fresh value must be used for every document.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScanState {
    in_code_block: bool,
    in_html_block: bool,
    skip_block: bool,
    fence_lang: Option<String>,
}

impl ScanState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Between an opening and a closing code fence
    pub fn in_code_block(&self) -> bool {
        self.in_code_block
    }

    /// Inside a raw HTML document block
    pub fn in_html_block(&self) -> bool {
        self.in_html_block
    }

    /// Inside a component block
    pub fn skip_block(&self) -> bool {
        self.skip_block
    }

    /// Lower-cased info string of the open code fence, if any
    pub fn fence_lang(&self) -> Option<&str> {
        self.fence_lang.as_deref()
    }

    /// Whether an HTML or component block is currently dropping lines
    pub fn is_suppressing(&self) -> bool {
        self.in_html_block || self.skip_block
    }
}

/// Line filter for MDX document bodies
#[derive(Debug, Clone)]
pub struct ContentFilter {
    config: FilterConfig,
    component_markers: Vec<String>,
}

impl Default for ContentFilter {
    fn default() -> Self {
        Self::new(FilterConfig::default())
    }
}

impl ContentFilter {
    /// Create a filter from its configuration
    pub fn new(config: FilterConfig) -> Self {
        let component_markers = config
            .component_tags
            .iter()
            .map(|tag| format!("<{}", tag.trim_start_matches('<')))
            .collect();

        Self {
            config,
            component_markers,
        }
    }

    pub fn config(&self) -> &FilterConfig {
        &self.config
    }

    /// Filter a document body and rejoin the surviving lines
    pub fn filter(&self, text: &str) -> String {
        self.filter_lines(text).join("\n")
    }

    /// Filter a document body with a fresh scan state
    pub fn filter_lines<'t>(&self, text: &'t str) -> Vec<&'t str> {
        let mut state = ScanState::new();
        self.filter_with_state(text, &mut state)
    }

    /// Filter a document body, leaving the final scan state in `state`
    pub fn filter_with_state<'t>(&self, text: &'t str, state: &mut ScanState) -> Vec<&'t str> {
        let mut kept = Vec::new();

        for raw in text.split('\n') {
            let line = Line::new(raw);
            let rule = rules::first_match(self, state, &line);
            if (rule.action)(state, &line) == Verdict::Keep {
                kept.push(raw);
            }
        }

        kept
    }

    /// Classify a line against the current state without advancing it
    pub fn classify(&self, line: &str, state: &ScanState) -> LineKind {
        rules::first_match(self, state, &Line::new(line)).kind
    }

    fn opens_html(&self, line: &str) -> bool {
        self.config
            .html_open_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    fn closes_html(&self, line: &str) -> bool {
        self.config
            .html_close_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }

    fn names_component(&self, line: &str) -> bool {
        self.component_markers
            .iter()
            .any(|marker| line.contains(marker.as_str()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filter(text: &str) -> String {
        ContentFilter::default().filter(text)
    }

    fn is_subsequence(output: &[&str], input: &[&str]) -> bool {
        let mut input = input.iter();
        output.iter().all(|line| input.any(|candidate| candidate == line))
    }

    #[test]
    fn test_plain_prose_is_unchanged() {
        let text = "## Getting started\n\nCreate a Pod from the console.\n\n- one\n- two\n\n[Docs](https://example.com)\n";
        assert_eq!(filter(text), text);
    }

    #[test]
    fn test_refiltering_is_a_no_op() {
        let text = "import Tabs from '@theme/Tabs';\n\n# Title\n\n![diagram](img.png)\n\nBody text.\n";
        let once = filter(text);
        assert_eq!(filter(&once), once);
        assert_eq!(once, "\n# Title\n\n\nBody text.\n");
    }

    #[test]
    fn test_import_dropped_outside_code() {
        let text = "import Foo from 'bar'\nText";
        assert_eq!(filter(text), "Text");
    }

    #[test]
    fn test_import_kept_inside_code() {
        let text = "```python\nimport Foo from 'bar'\n```";
        assert_eq!(filter(text), text);
    }

    #[test]
    fn test_import_prefix_matches_whole_words() {
        // Prefix match, so prose starting with "import" goes too
        let text = "importantly, this line is dropped\nkept";
        assert_eq!(filter(text), "kept");
    }

    #[test]
    fn test_image_dropped_outside_code() {
        let text = "Before\n  ![alt text](url.png)\nAfter";
        assert_eq!(filter(text), "Before\nAfter");
    }

    #[test]
    fn test_image_kept_inside_code() {
        let text = "```md\n![alt text](url.png)\n```";
        assert_eq!(filter(text), text);
    }

    #[test]
    fn test_code_fence_content_is_verbatim() {
        let body = [
            "import runpod",
            "![x](y.png)",
            "<script src=\"app.js\"></script>",
            "<Tabs groupId=\"lang\">",
            "<ApiDocMdx params={x} />",
            "</TabItem>",
            "<html lang=\"en\">",
        ];
        let text = format!("```js\n{}\n```", body.join("\n"));
        assert_eq!(filter(&text), text);
    }

    #[test]
    fn test_fence_lines_always_kept() {
        let text = "```\n```";
        assert_eq!(filter(text), text);
    }

    #[test]
    fn test_fence_lang_captured() {
        let filter = ContentFilter::default();
        let mut state = ScanState::new();
        filter.filter_with_state("text\n```Bash\necho hi", &mut state);
        assert!(state.in_code_block());
        assert_eq!(state.fence_lang(), Some("bash"));

        filter.filter_with_state("```", &mut state);
        assert!(!state.in_code_block());
        assert_eq!(state.fence_lang(), None);
    }

    #[test]
    fn test_self_closing_component_removed() {
        let filter = ContentFilter::default();
        let mut state = ScanState::new();
        let lines = filter.filter_with_state("<ApiDocMdx params={x} />", &mut state);
        assert!(lines.is_empty());
        assert!(!state.skip_block());

        let text = "Before\n<ApiDocMdx params={x} />\nAfter";
        assert_eq!(filter.filter(text), "Before\nAfter");
    }

    #[test]
    fn test_multi_line_component_removed() {
        let text = "Intro\n<Tabs>\n<TabItem value=\"a\">\ncontent A\n</TabItem>\n</Tabs>\nOutro";
        // Bare <Tabs> and </Tabs> carry no space, so they are plain lines
        assert_eq!(filter(text), "Intro\n<Tabs>\n</Tabs>\nOutro");
    }

    #[test]
    fn test_multi_line_opening_tag() {
        let text = "<TabItem value=\"a\"\n  label=\"A\">\nhidden\n</TabItem>\nshown";
        assert_eq!(filter(text), "shown");
    }

    #[test]
    fn test_component_closed_on_opening_line() {
        let text = "<TabItem value=\"a\">inline</TabItem>\nshown";
        assert_eq!(filter(text), "shown");
    }

    #[test]
    fn test_closing_line_without_angle_bracket_ends_block() {
        let filter = ContentFilter::default();
        let mut state = ScanState::new();
        filter.filter_with_state("<CodeBlock language=\"py\">", &mut state);
        assert!(state.skip_block());
        assert_eq!(filter.classify("</CodeBlock", &state), LineKind::ComponentClose);

        let kept = filter.filter_with_state("code\n</CodeBlock\nafter", &mut state);
        assert_eq!(kept, vec!["after"]);
        assert!(!state.skip_block());
    }

    #[test]
    fn test_fence_inside_component_block_is_not_protected() {
        let text = "<Tabs groupId=\"lang\">\n```bash\necho hi\n```\n</Tabs>\nafter";
        assert_eq!(filter(text), "```bash\n```\nafter");
    }

    #[test]
    fn test_div_lines_are_not_components() {
        let filter = ContentFilter::default();
        let line = "<div className=\"row\"><Tabs groupId=\"x\">";
        assert_eq!(filter.classify(line, &ScanState::new()), LineKind::Plain);
        assert_eq!(filter.filter(line), line);
    }

    #[test]
    fn test_unknown_tags_are_kept() {
        let text = "<Admonition type=\"note\">\nBe careful.\n</Admonition>";
        assert_eq!(filter(text), text);
    }

    #[test]
    fn test_html_block_dropped() {
        let text = "Top\n<html>\n<body>\n<p>hello</p>\n</body>\nBottom";
        assert_eq!(filter(text), "Top\nBottom");
    }

    #[test]
    fn test_script_block_runs_until_root_close() {
        let text = "<script>\nlet x = 1;\n</script>\nswallowed\n</html>\nvisible";
        assert_eq!(filter(text), "visible");
    }

    #[test]
    fn test_html_takes_precedence_over_component() {
        let filter = ContentFilter::default();
        let line = "<style> <Tabs groupId=\"x\">";
        assert_eq!(filter.classify(line, &ScanState::new()), LineKind::HtmlOpen);

        let mut state = ScanState::new();
        filter.filter_with_state(line, &mut state);
        assert!(state.in_html_block());
        assert!(!state.skip_block());
    }

    #[test]
    fn test_bare_closing_tag_outside_block_is_kept() {
        let filter = ContentFilter::default();
        assert_eq!(filter.classify("</Tabs>", &ScanState::new()), LineKind::Plain);
        assert_eq!(filter.filter("</Tabs>"), "</Tabs>");
    }

    #[test]
    fn test_unterminated_block_over_suppresses() {
        let filter = ContentFilter::default();
        let mut state = ScanState::new();
        let kept = filter.filter_with_state("a\n<Tabs groupId=\"x\">\nb\nc", &mut state);
        assert_eq!(kept, vec!["a"]);
        assert!(state.is_suppressing());
    }

    #[test]
    fn test_state_does_not_leak_between_documents() {
        let filter = ContentFilter::default();
        assert_eq!(filter.filter("<Tabs groupId=\"x\">\nhidden"), "");
        assert_eq!(filter.filter("visible"), "visible");
        assert_eq!(filter.filter("```\nopen fence"), "```\nopen fence");
        assert_eq!(filter.filter("import x"), "");
    }

    #[test]
    fn test_custom_component_tags() {
        let filter = ContentFilter::new(FilterConfig {
            component_tags: vec!["Callout".to_string()],
            ..Default::default()
        });
        let text = "<Callout kind=\"info\" />\n<Tabs groupId=\"x\">\nkept";
        assert_eq!(filter.filter(text), "<Tabs groupId=\"x\">\nkept");
    }

    #[test]
    fn test_crlf_lines_survive_intact() {
        let text = "one\r\nimport x\r\ntwo\r\n";
        assert_eq!(filter(text), "one\r\ntwo\r\n");
    }

    #[test]
    fn test_classify_each_kind() {
        let filter = ContentFilter::default();
        let fresh = ScanState::new();
        assert_eq!(filter.classify("```rust", &fresh), LineKind::CodeFence);
        assert_eq!(filter.classify("import x", &fresh), LineKind::Import);
        assert_eq!(filter.classify("![a](b)", &fresh), LineKind::Image);
        assert_eq!(filter.classify("<head>", &fresh), LineKind::HtmlOpen);
        assert_eq!(
            filter.classify("<Tabs groupId=\"x\">", &fresh),
            LineKind::ComponentOpen
        );
        assert_eq!(filter.classify("text", &fresh), LineKind::Plain);

        let mut state = ScanState::new();
        filter.filter_with_state("```", &mut state);
        assert_eq!(filter.classify("import x", &state), LineKind::Code);

        let mut state = ScanState::new();
        filter.filter_with_state("<body>", &mut state);
        assert_eq!(filter.classify("</body>", &state), LineKind::HtmlClose);
        assert_eq!(filter.classify("text", &state), LineKind::HtmlBody);

        let mut state = ScanState::new();
        filter.filter_with_state("<TabItem value=\"a\"", &mut state);
        assert_eq!(filter.classify("label=\"A\">", &state), LineKind::ComponentTagEnd);
        assert_eq!(filter.classify("text", &state), LineKind::ComponentBody);
    }

    #[test]
    fn test_output_is_subsequence_of_input() {
        let palette = [
            "prose",
            "```",
            "import x",
            "![a](b)",
            "<html>",
            "</html>",
            "<Tabs groupId=\"x\">",
            "</Tabs>",
            "<ApiDocMdx a={b} />",
            "tail>",
        ];
        let filter = ContentFilter::default();

        for a in palette {
            for b in palette {
                for c in palette {
                    for d in palette {
                        let input = [a, b, c, d];
                        let text = input.join("\n");
                        let output = filter.filter_lines(&text);
                        assert!(
                            is_subsequence(&output, &input),
                            "{:?} -> {:?}",
                            input,
                            output
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_filter_is_shareable_across_threads() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ContentFilter>();
        assert_send_sync::<ScanState>();
    }
}
