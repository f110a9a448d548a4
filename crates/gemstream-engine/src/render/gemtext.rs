use std::io::{self, Write};

use gemstream_syntax::Fragment;

use super::Renderer;

/// Canonical gemtext. Always terminates lines with `\r\n`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GemtextRenderer;

impl Renderer for GemtextRenderer {
    fn fragment(&self, fragment: &Fragment, out: &mut dyn Write) -> io::Result<()> {
        match fragment {
            Fragment::Empty => out.write_all(b"\r\n"),
            Fragment::Paragraph(text) => write!(out, "{text}\r\n"),
            Fragment::Heading { level, text } => {
                let hashes = &"###"[..usize::from(level.get())];
                write!(out, "{hashes} {text}\r\n")
            }
            Fragment::Link { href, title } => match title {
                Some(title) => write!(out, "=> {href} {title}\r\n"),
                None => write!(out, "=> {href}\r\n"),
            },
            Fragment::List(lines) => lines
                .iter()
                .try_for_each(|line| write!(out, "* {line}\r\n")),
            Fragment::Quote(lines) => lines
                .iter()
                .try_for_each(|line| write!(out, "> {line}\r\n")),
            Fragment::Preformatted { alt_text, lines } => {
                write!(out, "```{}\r\n", alt_text.as_deref().unwrap_or_default())?;
                for line in lines {
                    write!(out, "{line}\r\n")?;
                }
                out.write_all(b"```\r\n")
            }
        }
    }
}
