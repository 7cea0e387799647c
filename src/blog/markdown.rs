//! Markdown rendering for post bodies.

use pulldown_cmark::{Options, Parser, html};

/// Render markdown post content to HTML.
pub fn render_markdown(content: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(content, options);
    let mut html_output = String::with_capacity(content.len() * 3 / 2);
    html::push_html(&mut html_output, parser);
    html_output
}

/// Plain-text preview of at most `max_chars` characters (UTF-8 safe).
pub fn preview(content: &str, max_chars: usize) -> String {
    if content.chars().count() > max_chars {
        let truncated: String = content.chars().take(max_chars).collect();
        format!("{}...", truncated)
    } else {
        content.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_headings_and_emphasis() {
        let html = render_markdown("# Title\n\nSome *emphasis* here.");
        assert!(html.contains("<h1>Title</h1>"));
        assert!(html.contains("<em>emphasis</em>"));
    }

    #[test]
    fn renders_tables_and_strikethrough() {
        let html = render_markdown("| a | b |\n|---|---|\n| 1 | 2 |\n\n~~gone~~");
        assert!(html.contains("<table>"));
        assert!(html.contains("<del>gone</del>"));
    }

    #[test]
    fn renders_task_lists() {
        let html = render_markdown("- [x] done\n- [ ] todo");
        assert!(html.contains("type=\"checkbox\""));
    }

    #[test]
    fn preview_truncates_on_char_boundary() {
        assert_eq!(preview("héllo wörld", 5), "héllo...");
        assert_eq!(preview("short", 10), "short");
    }
}
