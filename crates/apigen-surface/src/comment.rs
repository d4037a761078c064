//! Doc comment rewriting from the API description's markdown.

use regex::{Captures, Regex};
use std::sync::LazyLock;

pub trait CommentReformatter: Send + Sync {
    fn reformat(&self, comment: &str) -> String;
}

/// Leaves comments untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct IdentityCommentReformatter;

impl CommentReformatter for IdentityCommentReformatter {
    fn reformat(&self, comment: &str) -> String {
        comment.trim_end().to_string()
    }
}

static MARKDOWN_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid regex"));
static CODE_SPAN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"`([^`\n]+)`").expect("valid regex"));

const CLOUD_URL: &str = "https://cloud.google.com";

/// Markdown to RDoc: links become `{text}[url]`, code spans become `+code+`.
///
/// Site-relative links are made absolute against the cloud docs host.
#[derive(Debug, Default, Clone, Copy)]
pub struct RubyCommentReformatter;

impl CommentReformatter for RubyCommentReformatter {
    fn reformat(&self, comment: &str) -> String {
        let linked = MARKDOWN_LINK.replace_all(comment, |caps: &Captures| {
            let url = &caps[2];
            if url.starts_with('/') {
                format!("{{{}}}[{CLOUD_URL}{url}]", &caps[1])
            } else {
                format!("{{{}}}[{url}]", &caps[1])
            }
        });
        let coded = CODE_SPAN.replace_all(&linked, |caps: &Captures| {
            let code = &caps[1];
            // RDoc's +...+ only covers single words.
            if code.contains(char::is_whitespace) {
                format!("<code>{code}</code>")
            } else {
                format!("+{code}+")
            }
        });
        coded.trim_end().to_string()
    }
}
