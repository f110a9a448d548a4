use std::io::{Read, Write};

use anyhow::{Context, Result};
use gemstream_engine::{Document, FragmentStream};

use crate::cli::Settings;

/// Reads gemtext from `input` and writes it to `out` in the configured format.
pub fn convert<R: Read, W: Write>(input: R, out: &mut W, settings: &Settings) -> Result<()> {
    if settings.streaming {
        convert_streaming(input, out, settings)
    } else {
        convert_document(input, out, settings)
    }
}

/// Renders each fragment as soon as the parser completes it and flushes, so
/// output keeps pace with slow input.
fn convert_streaming<R: Read, W: Write>(input: R, out: &mut W, settings: &Settings) -> Result<()> {
    let renderer = settings.format.renderer();
    renderer.header(out)?;
    let mut count = 0usize;
    for fragment in FragmentStream::with_chunk_size(input, settings.chunk_size) {
        let fragment = fragment.context("Failed to parse input")?;
        log::trace!("fragment {count}: {}", fragment.kind());
        renderer.fragment(&fragment, out)?;
        out.flush()?;
        count += 1;
    }
    renderer.footer(out)?;
    out.flush()?;
    log::info!("streamed {count} fragments as {}", settings.format);
    Ok(())
}

/// Builds the whole document, then renders it in one go.
fn convert_document<R: Read, W: Write>(input: R, out: &mut W, settings: &Settings) -> Result<()> {
    let document = Document::parse_with_chunk_size(input, settings.chunk_size)
        .context("Failed to parse input")?;
    log::info!(
        "rendering {} fragments as {}",
        document.len(),
        settings.format
    );
    document.render(settings.format, out)?;
    out.flush()?;
    Ok(())
}
