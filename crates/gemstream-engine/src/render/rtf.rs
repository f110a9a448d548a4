use std::io::{self, Write};

use gemstream_syntax::Fragment;

use super::Renderer;

const HEADER: &str =
    "{\\rtf1\\ansi\\deff0{\\fonttbl{\\f0\\fswiss Helvetica;}{\\f1\\fmodern Courier New;}}\n";

/// Rich Text Format. Body text is set in `\f0`, preformatted text in `\f1`.
#[derive(Debug, Clone, Copy, Default)]
pub struct RtfRenderer;

impl Renderer for RtfRenderer {
    fn header(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(HEADER.as_bytes())
    }

    fn fragment(&self, fragment: &Fragment, out: &mut dyn Write) -> io::Result<()> {
        match fragment {
            Fragment::Empty => out.write_all(b"{\\pard\\par}\n"),
            Fragment::Paragraph(text) => writeln!(out, "{{\\pard {}\\par}}", escape(text)),
            Fragment::Heading { level, text } => {
                let size = match level.get() {
                    1 => 48,
                    2 => 36,
                    _ => 28,
                };
                writeln!(out, "{{\\pard\\b\\fs{size} {}\\par}}", escape(text))
            }
            Fragment::Link { href, title } => {
                let label = title.as_deref().unwrap_or(href);
                writeln!(
                    out,
                    "{{\\pard{{\\field{{\\*\\fldinst HYPERLINK \"{}\"}}{{\\fldrslt\\ul {}}}}}\\par}}",
                    escape(href),
                    escape(label)
                )
            }
            Fragment::List(lines) => lines.iter().try_for_each(|line| {
                writeln!(
                    out,
                    "{{\\pard\\li360\\fi-360\\bullet\\tab {}\\par}}",
                    escape(line)
                )
            }),
            Fragment::Quote(lines) => lines.iter().try_for_each(|line| {
                writeln!(out, "{{\\pard\\li720\\i {}\\par}}", escape(line))
            }),
            Fragment::Preformatted { lines, .. } => lines.iter().try_for_each(|line| {
                writeln!(out, "{{\\pard\\f1\\fs20 {}\\par}}", escape(line))
            }),
        }
    }

    fn footer(&self, out: &mut dyn Write) -> io::Result<()> {
        out.write_all(b"}\n")
    }
}

/// Escapes RTF control characters. Non-ASCII is written as `\uN?` per UTF-16
/// code unit, with `N` as a signed 16-bit value.
fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '{' | '}' => {
                escaped.push('\\');
                escaped.push(c);
            }
            '\t' => escaped.push_str("\\tab "),
            c if c.is_ascii() => escaped.push(c),
            c => {
                let mut units = [0u16; 2];
                for unit in c.encode_utf16(&mut units) {
                    escaped.push_str(&format!("\\u{}?", *unit as i16));
                }
            }
        }
    }
    escaped
}
