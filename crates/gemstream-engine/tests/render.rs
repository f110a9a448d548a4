//! Parsing and rendering together.

use gemstream_engine::{Document, Format, FragmentStream, Renderer, render_to_string};
use insta::assert_snapshot;
use pretty_assertions::assert_eq;
use rstest::rstest;

const CANONICAL: &str = concat!(
    "# Gemstream\r\n",
    "\r\n",
    "Plain text with <angle> & ampersand.\r\n",
    "## Links\r\n",
    "=> gemini://example.org/ Example capsule\r\n",
    "=> /relative\r\n",
    "### Lists\r\n",
    "* first\r\n",
    "* second\r\n",
    "> quoted\r\n",
    "> twice\r\n",
    "```rust\r\n",
    "fn main() {\r\n",
    "    println!(\"* not a list\");\r\n",
    "}\r\n",
    "```\r\n",
    "```\r\n",
    "```\r\n",
    "last\r\n",
);

#[rstest]
#[case::whole(usize::MAX)]
#[case::tiny(1)]
#[case::odd(7)]
fn canonical_gemtext_round_trips(#[case] chunk_size: usize) {
    let chunk_size = chunk_size.min(CANONICAL.len());
    let doc = Document::parse_with_chunk_size(CANONICAL.as_bytes(), chunk_size).unwrap();
    let rendered = render_to_string(Format::Gemtext, doc.fragments()).unwrap();
    assert_eq!(rendered, CANONICAL);
}

#[test]
fn lf_input_renders_canonically() {
    let doc = Document::from_bytes(b"#  Spaced\n=>\t/x \t title \n*  item\n>  q\n").unwrap();
    assert_eq!(
        render_to_string(Format::Gemtext, doc.fragments()).unwrap(),
        "# Spaced\r\n=> /x title\r\n* item\r\n> q\r\n"
    );
}

#[test]
fn canonical_document_as_html() {
    let doc = Document::from_bytes(CANONICAL.as_bytes()).unwrap();
    assert_snapshot!(render_to_string(Format::Html, doc.fragments()).unwrap(), @r#"
    <h1>Gemstream</h1>
    <p></p>
    <p>Plain text with &lt;angle&gt; &amp; ampersand.</p>
    <h2>Links</h2>
    <p><a href="gemini://example.org/">Example capsule</a></p>
    <p><a href="/relative">/relative</a></p>
    <h3>Lists</h3>
    <ul>
    <li>first</li>
    <li>second</li>
    </ul>
    <blockquote>quoted<br>
    twice</blockquote>
    <pre data-alt="rust">fn main() {
        println!("* not a list");
    }
    </pre>
    <pre></pre>
    <p>last</p>
    "#);
}

#[test]
fn canonical_document_as_markdown() {
    let doc = Document::from_bytes(CANONICAL.as_bytes()).unwrap();
    assert_snapshot!(render_to_string(Format::Markdown, doc.fragments()).unwrap(), @r#"
    # Gemstream


    Plain text with \<angle\> & ampersand.

    ## Links

    [Example capsule](gemini://example.org/)

    [/relative](/relative)

    ### Lists

    - first
    - second

    > quoted
    > twice

    ```rust
    fn main() {
        println!("* not a list");
    }
    ```

    ```
    ```

    last
    "#);
}

#[test]
fn streaming_render_matches_document_render() {
    let renderer: &dyn Renderer = Format::Html.renderer();
    let mut streamed = Vec::new();
    renderer.header(&mut streamed).unwrap();
    for fragment in FragmentStream::with_chunk_size(CANONICAL.as_bytes(), 5) {
        renderer.fragment(&fragment.unwrap(), &mut streamed).unwrap();
    }
    renderer.footer(&mut streamed).unwrap();

    let doc = Document::from_bytes(CANONICAL.as_bytes()).unwrap();
    let mut whole = Vec::new();
    doc.render(Format::Html, &mut whole).unwrap();

    assert_eq!(String::from_utf8(streamed).unwrap(), String::from_utf8(whole).unwrap());
}

#[test]
fn every_format_renders_every_fragment() {
    let doc = Document::from_bytes(CANONICAL.as_bytes()).unwrap();
    for format in Format::ALL {
        let out = render_to_string(format, doc.fragments()).unwrap();
        assert!(out.contains("Gemstream"), "{format}");
        assert!(out.contains("second"), "{format}");
    }
}

#[test]
fn documents_are_independent() {
    let first = Document::from_bytes(b"* a\n").unwrap();
    let mut second = first.clone();
    second.append(first.fragments()[0].try_clone().unwrap());
    drop(first);
    assert_eq!(second.len(), 2);
    assert_eq!(second.fragments()[0], second.fragments()[1]);
}
