use crate::javadoc::JavaDocData;
use crate::location::Location;

/// Turns parsed JavaDoc into text for a documentation consumer.
pub trait JavaDocRenderer {
    fn render(&self, data: &JavaDocData, location: &Location) -> String;
}

/// The comment (unless absent) followed by one `(tag): value` line per tag.
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultJavaDocRenderer;

impl DefaultJavaDocRenderer {
    fn render_comment(&self, comment: &str, _location: &Location) -> String {
        harmonize_newlines(comment.trim())
    }

    fn render_tag(&self, name: &str, value: &str, _location: &Location) -> String {
        harmonize_newlines(&format!("({}): {}", name.trim(), value.trim()))
    }
}

impl JavaDocRenderer for DefaultJavaDocRenderer {
    fn render(&self, data: &JavaDocData, location: &Location) -> String {
        let mut out = String::new();
        if data.has_comment() {
            out.push_str(&self.render_comment(data.comment(), location));
        }
        for (name, value) in data.tags() {
            out.push_str(&self.render_tag(name, value, location));
        }
        out
    }
}

/// Normalises line endings and terminates the text with a single `\n`.
fn harmonize_newlines(text: &str) -> String {
    let mut out = text.replace("\r\n", "\n").replace('\r', "\n");
    while out.ends_with('\n') {
        out.pop();
    }
    out.push('\n');
    out
}
