use std::io::{self, Write};

use gemstream_syntax::Fragment;
use html_escape::{encode_double_quoted_attribute, encode_text};

use super::Renderer;

/// HTML body fragments, one element per fragment.
#[derive(Debug, Clone, Copy, Default)]
pub struct HtmlRenderer;

impl Renderer for HtmlRenderer {
    fn fragment(&self, fragment: &Fragment, out: &mut dyn Write) -> io::Result<()> {
        match fragment {
            Fragment::Empty => out.write_all(b"<p></p>\n"),
            Fragment::Paragraph(text) => writeln!(out, "<p>{}</p>", encode_text(text)),
            Fragment::Heading { level, text } => {
                let level = level.get();
                writeln!(out, "<h{level}>{}</h{level}>", encode_text(text))
            }
            Fragment::Link { href, title } => writeln!(
                out,
                "<p><a href=\"{}\">{}</a></p>",
                encode_double_quoted_attribute(href),
                encode_text(title.as_deref().unwrap_or(href))
            ),
            Fragment::List(lines) => {
                out.write_all(b"<ul>\n")?;
                for line in lines {
                    writeln!(out, "<li>{}</li>", encode_text(line))?;
                }
                out.write_all(b"</ul>\n")
            }
            Fragment::Quote(lines) => {
                out.write_all(b"<blockquote>")?;
                for (i, line) in lines.iter().enumerate() {
                    if i > 0 {
                        out.write_all(b"<br>\n")?;
                    }
                    write!(out, "{}", encode_text(line))?;
                }
                out.write_all(b"</blockquote>\n")
            }
            Fragment::Preformatted { alt_text, lines } => {
                match alt_text {
                    Some(alt) => write!(
                        out,
                        "<pre data-alt=\"{}\">",
                        encode_double_quoted_attribute(alt)
                    )?,
                    None => out.write_all(b"<pre>")?,
                }
                for line in lines {
                    writeln!(out, "{}", encode_text(line))?;
                }
                out.write_all(b"</pre>\n")
            }
        }
    }
}
