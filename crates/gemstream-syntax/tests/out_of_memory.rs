//! Allocation failure inside `feed` and `finalize`.
//!
//! A global allocator that can be told to refuse requests after a number of
//! successful ones. Every call is retried with a growing allowance until it
//! succeeds; because a failed call leaves the parser as it was, the fragments
//! must match an unconstrained run.

use std::alloc::{GlobalAlloc, Layout, System};
use std::cell::Cell;
use std::ptr;

use gemstream_syntax::{Feed, Fragment, HeadingLevel, ParseError, Parser};
use pretty_assertions::assert_eq;

struct LimitedAlloc;

#[global_allocator]
static ALLOCATOR: LimitedAlloc = LimitedAlloc;

thread_local! {
    /// Allocations still allowed on this thread; `None` means unlimited.
    static ALLOWANCE: Cell<Option<usize>> = const { Cell::new(None) };
}

fn refuse() -> bool {
    ALLOWANCE
        .try_with(|allowance| match allowance.get() {
            Some(0) => true,
            Some(n) => {
                allowance.set(Some(n - 1));
                false
            }
            None => false,
        })
        .unwrap_or(false)
}

unsafe impl GlobalAlloc for LimitedAlloc {
    unsafe fn alloc(&self, layout: Layout) -> *mut u8 {
        if refuse() {
            return ptr::null_mut();
        }
        unsafe { System.alloc(layout) }
    }

    unsafe fn dealloc(&self, ptr: *mut u8, layout: Layout) {
        unsafe { System.dealloc(ptr, layout) }
    }

    unsafe fn realloc(&self, ptr: *mut u8, layout: Layout, new_size: usize) -> *mut u8 {
        if refuse() {
            return ptr::null_mut();
        }
        unsafe { System.realloc(ptr, layout, new_size) }
    }
}

/// Runs `f` with at most `allowance` allocations granted on this thread.
fn with_allowance<T>(allowance: usize, f: impl FnOnce() -> T) -> T {
    ALLOWANCE.with(|a| a.set(Some(allowance)));
    let result = f();
    ALLOWANCE.with(|a| a.set(None));
    result
}

/// Retries `call` with one more allocation allowed each time. Returns the
/// successful result and how many attempts failed.
fn retry<T>(mut call: impl FnMut() -> Result<T, ParseError>) -> (T, usize) {
    let mut allowance = 0;
    loop {
        match with_allowance(allowance, &mut call) {
            Ok(value) => return (value, allowance),
            Err(ParseError::OutOfMemory(_)) => allowance += 1,
        }
    }
}

fn parse(input: &[u8], chunk_size: usize, constrained: bool) -> (Vec<Fragment>, usize) {
    let mut parser = Parser::new();
    let mut fragments = Vec::new();
    let mut failures = 0;

    for chunk in input.chunks(chunk_size) {
        let mut rest = chunk;
        while !rest.is_empty() {
            let feed = if constrained {
                let (feed, failed) = retry(|| parser.feed(rest));
                failures += failed;
                feed
            } else {
                parser.feed(rest).unwrap()
            };
            rest = &rest[feed.consumed..];
            fragments.extend(feed.fragment);
        }
    }
    loop {
        let fragment = if constrained {
            let (fragment, failed) = retry(|| parser.finalize());
            failures += failed;
            fragment
        } else {
            parser.finalize().unwrap()
        };
        match fragment {
            Some(fragment) => fragments.push(fragment),
            None => break,
        }
    }
    (fragments, failures)
}

#[test]
fn failed_feed_leaves_parser_untouched() {
    let mut parser = Parser::new();

    let err = with_allowance(0, || parser.feed(b"# Heading\n"));
    assert!(matches!(err, Err(ParseError::OutOfMemory(_))));
    assert!(parser.is_idle());

    assert_eq!(
        parser.feed(b"# Heading\n").unwrap(),
        Feed {
            consumed: 10,
            fragment: Some(Fragment::Heading {
                level: HeadingLevel::H1,
                text: "Heading".into()
            })
        }
    );
}

#[test]
fn failed_finalize_can_be_retried() {
    let mut parser = Parser::new();
    parser.feed(b"> one\n> two").unwrap();

    let err = with_allowance(0, || parser.finalize());
    assert!(err.is_err());
    assert!(!parser.is_idle());

    let quote = parser.finalize().unwrap();
    assert_eq!(
        quote,
        Some(Fragment::Quote(["one", "two"].into_iter().collect()))
    );
    assert_eq!(parser.finalize().unwrap(), None);
}

#[test]
fn retried_calls_produce_the_unconstrained_result() {
    let input = concat!(
        "> quote\n* a\n* b\n",
        "```alt\ncode line\n```\n",
        "# Title\n=> /x Link\nplain\n\n* dangling",
    )
    .as_bytes();

    for chunk_size in [1, 3, 8, input.len()] {
        let (expected, _) = parse(input, chunk_size, false);
        let (fragments, failures) = parse(input, chunk_size, true);
        assert_eq!(fragments, expected, "chunk size {chunk_size}");
        assert!(failures > 0, "chunk size {chunk_size} never hit a failure");
    }
}
