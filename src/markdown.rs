//! Markdown rendering of route notes.
//!
//! The generator does not care which Markdown engine is used; it only needs something that
//! implements [`MarkdownRenderer`]. [`CommonMarkRenderer`] is the default, backed by
//! `pulldown-cmark`. Any `Fn(&str) -> Result<String>` closure is a renderer as well.

use crate::error::Result;
use pulldown_cmark::{html, Parser};

/// Converts Markdown text to HTML.
pub trait MarkdownRenderer: Send + Sync {
    /// Renders `text` to an HTML fragment.
    fn render(&self, text: &str) -> Result<String>;
}

impl<F> MarkdownRenderer for F
where
    F: Fn(&str) -> Result<String> + Send + Sync,
{
    fn render(&self, text: &str) -> Result<String> {
        self(text)
    }
}

/// CommonMark renderer built on `pulldown-cmark`.
#[derive(Debug, Default, Clone, Copy)]
pub struct CommonMarkRenderer;

impl MarkdownRenderer for CommonMarkRenderer {
    fn render(&self, text: &str) -> Result<String> {
        let parser = Parser::new(text);
        let mut output = String::with_capacity(text.len() * 3 / 2);
        html::push_html(&mut output, parser);
        Ok(output)
    }
}

/// Removes the indentation shared by every non-blank line.
///
/// Indentation counts leading spaces and tabs alike. Lines consisting only of whitespace do
/// not take part in computing the common indentation, but are still trimmed by up to that
/// amount.
pub fn strip_common_indent(text: &str) -> String {
    let indent = text
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(leading_blanks)
        .min()
        .unwrap_or(0);

    if indent == 0 {
        return text.to_string();
    }

    text.split_inclusive('\n')
        .map(|line| {
            if leading_blanks(line) >= indent {
                &line[indent..]
            } else {
                line
            }
        })
        .collect()
}

fn leading_blanks(line: &str) -> usize {
    line.bytes().take_while(|b| *b == b' ' || *b == b'\t').count()
}
