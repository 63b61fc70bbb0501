//! Fixed-grammar Markdown → HTML conversion for the output panel.
//!
//! This is not a Markdown parser. It is a small table of regex substitutions
//! applied in a fixed order, covering headings 1–3, bold, italic and line
//! breaks. Nested or overlapping constructs outside that grammar are passed
//! through as-is or rendered loosely; use a real Markdown renderer if that
//! matters.
//!
//! ## Rule order
//!
//! Newlines become `<br>` first, then bold, italic and headings (deepest
//! level first so `^### ` is not eaten by `^# `). Because line breaks are
//! gone by the time the heading rules run, only a heading on the very first
//! line is recognised, and it extends to the end of the text:
//!
//! ```
//! use dotocr_client::markdown_to_html;
//!
//! assert_eq!(markdown_to_html("# Title\nbody"), "<h1>Title<br>body</h1>");
//! assert_eq!(markdown_to_html("intro\n## Sub"), "intro<br>## Sub");
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

/// One substitution of the rule table.
pub struct Rule {
    pub name: &'static str,
    pub pattern: Regex,
    pub replacement: &'static str,
}

fn rule(name: &'static str, pattern: &str, replacement: &'static str) -> Rule {
    Rule {
        name,
        pattern: Regex::new(pattern).unwrap(),
        replacement,
    }
}

/// The substitutions, in application order.
pub static RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule("line-break", r"\n", "<br>"),
        rule("bold", r"\*\*(.*?)\*\*", "<strong>${1}</strong>"),
        rule("italic", r"\*(.*?)\*", "<em>${1}</em>"),
        rule("h3", r"(?m)^### (.*)$", "<h3>${1}</h3>"),
        rule("h2", r"(?m)^## (.*)$", "<h2>${1}</h2>"),
        rule("h1", r"(?m)^# (.*)$", "<h1>${1}</h1>"),
    ]
});

/// Convert `markdown` to HTML using [`RULES`].
pub fn markdown_to_html(markdown: &str) -> String {
    RULES.iter().fold(markdown.to_string(), |acc, r| {
        r.pattern.replace_all(&acc, r.replacement).into_owned()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bold() {
        assert!(markdown_to_html("**bold**").contains("<strong>bold</strong>"));
    }

    #[test]
    fn italic() {
        assert_eq!(markdown_to_html("an *aside*"), "an <em>aside</em>");
    }

    #[test]
    fn heading_levels() {
        assert_eq!(markdown_to_html("# Title"), "<h1>Title</h1>");
        assert_eq!(markdown_to_html("## Section"), "<h2>Section</h2>");
        assert_eq!(markdown_to_html("### Sub"), "<h3>Sub</h3>");
    }

    #[test]
    fn level_four_is_not_a_heading() {
        let html = markdown_to_html("#### Deep");
        assert!(!html.contains("<h"), "got: {html}");
    }

    #[test]
    fn one_break_per_newline() {
        let md = "line one\nline two\n\nline four\n";
        let html = markdown_to_html(md);
        assert_eq!(html.matches("<br>").count(), md.matches('\n').count());
        assert!(!html.contains('\n'));
    }

    #[test]
    fn heading_swallows_following_lines() {
        assert_eq!(markdown_to_html("# Title\nbody"), "<h1>Title<br>body</h1>");
        assert_eq!(
            markdown_to_html("## Sub\ntext with **strong** and *em*"),
            "<h2>Sub<br>text with <strong>strong</strong> and <em>em</em></h2>"
        );
    }

    #[test]
    fn headings_on_later_lines_stay_literal() {
        assert_eq!(markdown_to_html("intro\n## Sub"), "intro<br>## Sub");
        assert_eq!(markdown_to_html("intro\n# Title"), "intro<br># Title");
    }

    #[test]
    fn empty_emphasis_spans() {
        assert_eq!(markdown_to_html("****"), "<strong></strong>");
        assert_eq!(markdown_to_html("**"), "<em></em>");
    }

    #[test]
    fn heading_marker_needs_line_start() {
        assert_eq!(markdown_to_html("a # not heading"), "a # not heading");
    }

    #[test]
    fn rule_order_is_fixed() {
        let names: Vec<&str> = RULES.iter().map(|r| r.name).collect();
        assert_eq!(names, ["line-break", "bold", "italic", "h3", "h2", "h1"]);
    }

    #[test]
    fn empty_input() {
        assert_eq!(markdown_to_html(""), "");
    }
}
