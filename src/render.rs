//! Markdown body rendering.
//!
//! The page pipeline only depends on the [`MarkdownRenderer`] trait: a total
//! function from a markdown body (frontmatter already stripped) to HTML.
//! Malformed markdown never fails a build.

use pulldown_cmark::{Options, Parser, html as md_html};

pub trait MarkdownRenderer {
    fn render(&self, markdown: &str) -> String;
}

/// CommonMark renderer with the GitHub-flavoured extensions knowledge bases
/// usually rely on.
#[derive(Debug, Clone, Copy)]
pub struct CmarkRenderer {
    options: Options,
}

impl Default for CmarkRenderer {
    fn default() -> Self {
        Self {
            options: Options::ENABLE_TABLES
                | Options::ENABLE_FOOTNOTES
                | Options::ENABLE_STRIKETHROUGH
                | Options::ENABLE_TASKLISTS
                | Options::ENABLE_HEADING_ATTRIBUTES,
        }
    }
}

impl MarkdownRenderer for CmarkRenderer {
    fn render(&self, markdown: &str) -> String {
        let parser = Parser::new_ext(markdown, self.options);
        let mut html = String::with_capacity(markdown.len() * 3 / 2);
        md_html::push_html(&mut html, parser);
        html
    }
}
