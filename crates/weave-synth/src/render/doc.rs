//! Wadler-Lindig document IR for rendering generated Java.
//!
//! A `Doc` captures layout intent (groups, indentation, line breaks). The
//! printer decides at each `Group` whether to lay its contents out on one
//! line or to break it.

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Doc {
    /// Literal text to emit verbatim.
    Text(String),
    /// Always emits a newline + current indentation.
    Hardline,
    /// Increase indentation for the child by the configured indent size.
    Indent(Box<Doc>),
    /// Render the child flat if it fits in the remaining width, broken
    /// otherwise.
    Group(Box<Doc>),
    /// Content chosen by the mode of the enclosing group.
    IfBreak { flat: Box<Doc>, broken: Box<Doc> },
    Concat(Vec<Doc>),
    Empty,
}

pub fn text(s: impl Into<String>) -> Doc {
    Doc::Text(s.into())
}

pub fn hardline() -> Doc {
    Doc::Hardline
}

/// Nothing when flat, a line break when broken. Used between the links of
/// a call chain.
pub fn softline() -> Doc {
    if_break(Doc::Empty, Doc::Hardline)
}

/// A line of text followed by a line break.
pub fn line(s: impl Into<String>) -> Doc {
    concat(vec![text(s), hardline()])
}

pub fn indent(doc: Doc) -> Doc {
    Doc::Indent(Box::new(doc))
}

pub fn group(doc: Doc) -> Doc {
    Doc::Group(Box::new(doc))
}

pub fn concat(parts: Vec<Doc>) -> Doc {
    Doc::Concat(parts)
}

pub fn if_break(flat: Doc, broken: Doc) -> Doc {
    Doc::IfBreak {
        flat: Box::new(flat),
        broken: Box::new(broken),
    }
}
