//! Printer for the render `Doc`.
//!
//! Stack-based Wadler-Lindig printing: at each `Group` the printer measures
//! the flat width of the group and renders it flat if it fits on the rest
//! of the line, broken otherwise.

use super::doc::Doc;

/// Layout settings.
#[derive(Debug, Clone)]
pub struct FormatConfig {
    /// Spaces per indentation level. Default: 4.
    pub indent_size: usize,
    /// Column limit for flat groups. Default: 100.
    pub max_width: usize,
}

impl Default for FormatConfig {
    fn default() -> Self {
        Self {
            indent_size: 4,
            max_width: 100,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mode {
    Flat,
    Break,
}

#[derive(Debug)]
struct Frame<'a> {
    indent: usize,
    mode: Mode,
    doc: &'a Doc,
}

/// Render `doc`. The output always ends with a newline, and lines never
/// carry trailing spaces.
pub fn print(doc: &Doc, config: &FormatConfig) -> String {
    let mut out = String::new();
    let mut col: usize = 0;
    let mut work: Vec<Frame> = vec![Frame {
        indent: 0,
        mode: Mode::Break,
        doc,
    }];

    while let Some(cmd) = work.pop() {
        match cmd.doc {
            Doc::Empty => {}

            Doc::Text(s) => {
                out.push_str(s);
                col += s.chars().count();
            }

            Doc::Hardline => {
                newline(&mut out, cmd.indent);
                col = cmd.indent;
            }

            Doc::Indent(child) => {
                work.push(Frame {
                    indent: cmd.indent + config.indent_size,
                    mode: cmd.mode,
                    doc: child,
                });
            }

            Doc::Group(child) => {
                let flat_width = measure_flat(child);
                let fits = flat_width != usize::MAX
                    && col.saturating_add(flat_width) <= config.max_width;
                work.push(Frame {
                    indent: cmd.indent,
                    mode: if fits { Mode::Flat } else { Mode::Break },
                    doc: child,
                });
            }

            Doc::IfBreak { flat, broken } => {
                let doc = match cmd.mode {
                    Mode::Flat => flat,
                    Mode::Break => broken,
                };
                work.push(Frame {
                    indent: cmd.indent,
                    mode: cmd.mode,
                    doc,
                });
            }

            Doc::Concat(parts) => {
                // Reverse so the first part is popped first.
                for part in parts.iter().rev() {
                    work.push(Frame {
                        indent: cmd.indent,
                        mode: cmd.mode,
                        doc: part,
                    });
                }
            }
        }
    }

    if !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    out
}

fn newline(out: &mut String, indent: usize) {
    let trimmed = out.trim_end_matches(' ').len();
    out.truncate(trimmed);
    out.push('\n');
    out.push_str(&" ".repeat(indent));
}

/// Width of `doc` rendered flat; `usize::MAX` if it contains a `Hardline`
/// outside an `IfBreak` flat branch.
fn measure_flat(doc: &Doc) -> usize {
    match doc {
        Doc::Empty => 0,
        Doc::Text(s) => s.chars().count(),
        Doc::Hardline => usize::MAX,
        Doc::Indent(child) | Doc::Group(child) => measure_flat(child),
        Doc::IfBreak { flat, .. } => measure_flat(flat),
        Doc::Concat(parts) => {
            let mut total: usize = 0;
            for part in parts {
                let w = measure_flat(part);
                if w == usize::MAX {
                    return usize::MAX;
                }
                total = total.saturating_add(w);
            }
            total
        }
    }
}
