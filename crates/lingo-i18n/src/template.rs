//! `{{placeholder}}` message templates
//!
//! A template is parsed once into literal and placeholder segments and then
//! rendered any number of times with different [`Args`].
//!
//! Placeholder expressions are looked up verbatim in the arguments, which
//! covers the three supported forms:
//!
//! - `{{name}}`: a keyed argument
//! - `{{0}}`: a positional argument
//! - `{{@}}`: the modifier value
//!
//! Whitespace just inside the braces is ignored. Anything that does not
//! resolve is emitted exactly as written in the source.

use crate::args::Args;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Segment {
    Text(String),
    Placeholder {
        expr: String,
        /// Source text, emitted when `expr` has no argument.
        raw: String,
    },
}

/// A compiled message template.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Template {
    segments: Vec<Segment>,
}

impl Template {
    /// Parse a message into segments.
    pub fn compile(source: &str) -> Self {
        let mut segments = Vec::new();
        let mut text = String::new();
        let mut rest = source;

        while let Some(open) = rest.find("{{") {
            let Some(len) = rest[open + 2..].find("}}") else {
                break;
            };
            let close = open + 2 + len;
            // Innermost opening, so "{{{x}}}" keeps its outer braces as text.
            let open = rest[..close].rfind("{{").unwrap_or(open);
            let expr = rest[open + 2..close].trim();

            if is_expression(expr) {
                text.push_str(&rest[..open]);
                if !text.is_empty() {
                    segments.push(Segment::Text(std::mem::take(&mut text)));
                }
                segments.push(Segment::Placeholder {
                    expr: expr.to_string(),
                    raw: rest[open..close + 2].to_string(),
                });
            } else {
                text.push_str(&rest[..close + 2]);
            }
            rest = &rest[close + 2..];
        }

        text.push_str(rest);
        if !text.is_empty() {
            segments.push(Segment::Text(text));
        }

        Self { segments }
    }

    /// Substitute placeholders from `args`.
    pub fn render(&self, args: &Args) -> String {
        let mut out = String::new();
        for segment in &self.segments {
            match segment {
                Segment::Text(text) => out.push_str(text),
                Segment::Placeholder { expr, raw } => match args.get(expr) {
                    Some(value) => out.push_str(&value.to_string()),
                    None => out.push_str(raw),
                },
            }
        }
        out
    }

    /// Placeholder expressions in source order
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|segment| match segment {
            Segment::Placeholder { expr, .. } => Some(expr.as_str()),
            Segment::Text(_) => None,
        })
    }

    /// Whether rendering ignores its arguments
    pub fn is_static(&self) -> bool {
        self.placeholders().next().is_none()
    }
}

fn is_expression(expr: &str) -> bool {
    !expr.is_empty() && !expr.contains(['{', '}'])
}
