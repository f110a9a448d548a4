use std::io::{self, Write};

use gemstream_syntax::{Fragment, TextLines};

use super::Renderer;

/// CommonMark-flavoured Markdown. Blocks are separated by blank lines.
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownRenderer;

impl Renderer for MarkdownRenderer {
    fn fragment(&self, fragment: &Fragment, out: &mut dyn Write) -> io::Result<()> {
        match fragment {
            Fragment::Empty => out.write_all(b"\n"),
            Fragment::Paragraph(text) => write!(out, "{}\n\n", escape(text)),
            Fragment::Heading { level, text } => {
                let hashes = &"###"[..usize::from(level.get())];
                write!(out, "{hashes} {}\n\n", escape(text))
            }
            Fragment::Link { href, title } => {
                let text = escape(title.as_deref().unwrap_or(href));
                write!(out, "[{text}]({})\n\n", escape_destination(href))
            }
            Fragment::List(lines) => {
                for line in lines {
                    writeln!(out, "- {}", escape(line))?;
                }
                out.write_all(b"\n")
            }
            Fragment::Quote(lines) => {
                for line in lines {
                    if line.is_empty() {
                        out.write_all(b">\n")?;
                    } else {
                        writeln!(out, "> {}", escape(line))?;
                    }
                }
                out.write_all(b"\n")
            }
            Fragment::Preformatted { alt_text, lines } => {
                let fence = fence_for(lines);
                writeln!(out, "{fence}{}", alt_text.as_deref().unwrap_or_default())?;
                for line in lines {
                    writeln!(out, "{line}")?;
                }
                write!(out, "{fence}\n\n")
            }
        }
    }
}

/// Backslash-escapes characters that would otherwise start Markdown markup.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for (i, c) in text.char_indices() {
        let special = matches!(
            c,
            '\\' | '`' | '*' | '_' | '[' | ']' | '<' | '>' | '#' | '|' | '~'
        ) || (i == 0 && matches!(c, '-' | '+'));
        if special {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Link destinations cannot start with `<` or hold unbalanced parentheses.
fn escape_destination(href: &str) -> String {
    let mut escaped = String::with_capacity(href.len());
    for c in href.chars() {
        if matches!(c, '\\' | '(' | ')' | '<' | '>') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// A backtick fence longer than any backtick run inside the block.
fn fence_for(lines: &TextLines) -> String {
    let longest_run = lines
        .iter()
        .flat_map(|line| line.split(|c: char| c != '`'))
        .map(str::len)
        .max()
        .unwrap_or(0);
    "`".repeat(longest_run.max(2) + 1)
}
