/*
** This file is a part of Tagtree (incremental XML subset parser)
** Copyright (C) 2025 The Tagtree Developers
**
** Tagtree is free software: you can redistribute it and/or modify it
** under the terms of the GNU Lesser General Public License as
** published by the Free Software Foundation, either version 3 of
** the License, or (at your option) any later version.
*/

use pretty_assertions::assert_eq;
use proptest::prelude::*;

use super::*;
use crate::Arena;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Event {
    Start(Option<usize>, String),
    Attribute(usize, String, String),
    Text(usize, String),
    Prolog(String, String),
}

use Event::*;

fn start(parent: Option<usize>, name: &str) -> Event {
    Start(parent, name.to_string())
}

fn attr(element: usize, name: &str, value: &str) -> Event {
    Attribute(element, name.to_string(), value.to_string())
}

fn text(element: usize, s: &str) -> Event {
    Text(element, s.to_string())
}

fn prolog(name: &str, value: &str) -> Event {
    Prolog(name.to_string(), value.to_string())
}

#[derive(Default)]
struct Recorder {
    elements: Arena<(Option<ElementId>, String)>,
    events: Vec<Event>,
}

impl TreeSink for Recorder {
    fn start_element(
        &mut self,
        parent: Option<ElementId>,
        name: &str,
    ) -> Result<ElementId, ScanError> {
        self.events
            .push(Start(parent.map(|p| p.index()), name.to_string()));
        Ok(self.elements.alloc((parent, name.to_string()))?)
    }

    fn attribute(
        &mut self,
        element: ElementId,
        name: &str,
        value: &str,
    ) -> Result<(), ScanError> {
        self.events.push(attr(element.index(), name, value));
        Ok(())
    }

    fn text(&mut self, element: ElementId, s: &str) -> Result<(), ScanError> {
        self.events.push(text(element.index(), s));
        Ok(())
    }

    fn prolog_attribute(&mut self, name: &str, value: &str) -> Result<(), ScanError> {
        self.events.push(prolog(name, value));
        Ok(())
    }

    fn parent_of(&self, element: ElementId) -> Option<ElementId> {
        self.elements.get(element).and_then(|e| e.0)
    }

    fn name_matches(&self, element: ElementId, name: &str) -> bool {
        self.elements.get(element).is_some_and(|e| e.1 == name)
    }
}

type Recording = (Result<(), ScanError>, Vec<Event>, Location);

fn record(chunks: &[&[u8]], options: &ParserOptions) -> Recording {
    let mut recorder = Recorder::default();
    let mut scanner = Scanner::new(options);
    for chunk in chunks {
        if let Err(err) = scanner.feed(&mut recorder, chunk) {
            return (Err(err), recorder.events, scanner.location());
        }
    }
    let result = scanner.finish(&mut recorder);
    (result, recorder.events, scanner.location())
}

struct Tester<'a> {
    expected: &'a [Event],
}

impl<'a> Tester<'a> {
    fn new(expected: &'a [Event]) -> Tester<'a> {
        Tester { expected }
    }

    fn check(&self, s: &str) {
        let nr_lines = s.matches('\n').count();
        let nr_column = s.rsplit('\n').next().unwrap().len();
        let options = ParserOptions::new();

        let (result, events, location) = record(&[s.as_bytes()], &options);
        assert_eq!(result, Ok(()));
        assert_eq!(events, self.expected);
        assert_eq!(location.bytes, s.len());
        assert_eq!(location.lines, nr_lines);
        assert_eq!(location.column, nr_column);

        // now try byte by byte
        let bytes: Vec<&[u8]> = s.as_bytes().chunks(1).collect();
        let (result, events, location) = record(&bytes, &options);
        assert_eq!(result, Ok(()));
        assert_eq!(events, self.expected);
        assert_eq!(location.bytes, s.len());
    }
}

struct BadTester {
    bad_byte: usize,
    options: ParserOptions,
}

impl BadTester {
    fn new(bad_byte: usize) -> BadTester {
        BadTester {
            bad_byte,
            options: ParserOptions::new(),
        }
    }

    fn with_options(mut self, options: ParserOptions) -> BadTester {
        self.options = options;
        self
    }

    fn check(&self, s: &str, expected: &'static str) {
        self.check_bytes(s.as_bytes(), expected);
    }

    fn check_bytes(&self, bytes: &[u8], expected: &'static str) {
        let (result, _, location) = record(&[bytes], &self.options);
        assert_eq!(result, Err(ScanError::BadInput(expected)));
        assert_eq!(location.bytes, self.bad_byte);

        let chunks: Vec<&[u8]> = bytes.chunks(1).collect();
        let (result, _, location) = record(&chunks, &self.options);
        assert_eq!(result, Err(ScanError::BadInput(expected)));
        assert_eq!(location.bytes, self.bad_byte);
    }
}

#[test]
fn tags() {
    Tester::new(&[start(None, "lonely")]).check("<lonely/>");

    Tester::new(&[start(None, "lonely")]).check("   <lonely/>    ");

    Tester::new(&[
        prolog("version", "1.0"),
        start(None, "parent"),
        start(Some(0), "child"),
        start(Some(0), "child"),
        text(0, "child"),
    ])
    .check("<?xml version='1.0'?><parent><child/><child/>child</parent>");

    Tester::new(&[
        start(None, "parent"),
        start(Some(0), "empty"),
        start(Some(0), "b"),
        text(2, "lala"),
    ])
    .check("<parent><empty/><b>lala</b></parent>");

    Tester::new(&[start(None, "a"), start(None, "b")]).check("<a></a><b/>");
}

#[test]
fn attributes() {
    Tester::new(&[
        start(None, "a"),
        attr(0, "x", "1"),
        start(Some(0), "b"),
        start(Some(0), "b"),
    ])
    .check("<a x=\"1\"><b/><b/></a>");

    Tester::new(&[
        start(None, "item"),
        attr(0, "id", "12"),
        attr(0, "label", "two words"),
        attr(0, "ratio", "0.5"),
    ])
    .check("<item id=\"12\" label='two words'\n  ratio = \"0.5\"/>");

    Tester::new(&[start(None, "a"), attr(0, "v", "1>2</a>")]).check("<a v=\"1>2</a>\"/>");
}

#[test]
fn text_runs() {
    Tester::new(&[
        start(None, "a"),
        text(0, "hello world"),
        start(Some(0), "b"),
        text(1, "inner"),
        text(0, "tail"),
    ])
    .check("<a>hello world<b>inner</b>tail</a>");

    // whitespace alone never opens a text run
    Tester::new(&[start(None, "a"), start(Some(0), "b"), text(1, "1")])
        .check("<a>\n  <b>1</b>\n</a>\n");

    Tester::new(&[start(None, "p"), text(0, "caf\u{e9} ok")]).check("<p>caf\u{e9} ok</p>");
}

#[test]
fn comments() {
    Tester::new(&[start(None, "a"), text(0, "x")]).check("<!-- note --><a><!-- <b/> -->x</a>");

    Tester::new(&[start(None, "a"), attr(0, "c", "<!--")]).check("<a c=\"<!--\"/>");

    // only the full terminator ends a comment
    Tester::new(&[start(None, "a")]).check("<a><!-- x -> y --></a>");
    Tester::new(&[start(None, "a"), text(0, "z")]).check("<a><!-- a-b -- c ---->z</a>");
    Tester::new(&[start(None, "a"), text(0, "z")]).check("<a><!---->z</a>");
    Tester::new(&[start(None, "a")]).check("<a><!-->z --></a>");
    Tester::new(&[start(None, "a"), text(0, "z")]).check("<a><!-- <!-- -->z</a>");
}

#[test]
fn nested_depth() {
    Tester::new(&[
        start(None, "a"),
        start(Some(0), "b"),
        start(Some(1), "c"),
        start(Some(2), "d"),
        start(Some(0), "e"),
    ])
    .check("<a><b><c><d/></c></b><e/></a>");
}

#[test]
fn bad_structure() {
    BadTester::new(0).check("</a>", description::CLOSE_WITHOUT_OPEN);
    BadTester::new(6).check("<a></b>", description::TAG_MISMATCH);
    BadTester::new(7).check("<a></a></a>", description::CLOSE_WITHOUT_OPEN);
    BadTester::new(9).check("<a><b></a></b>", description::TAG_MISMATCH);
}

#[test]
fn overflows() {
    BadTester::new(5)
        .with_options(ParserOptions::new().with_max_name_length(4))
        .check("<abcdef/>", description::NAME_OVERFLOW);

    BadTester::new(9)
        .with_options(ParserOptions::new().with_max_value_length(3))
        .check("<a x=\"1234\"/>", description::VALUE_OVERFLOW);

    BadTester::new(6)
        .with_options(ParserOptions::new().with_max_value_length(3))
        .check("<a>abcd</a>", description::VALUE_OVERFLOW);
}

#[test]
fn bad_utf8() {
    BadTester::new(8).check_bytes(b"<a x=\"\xff\xfe\"/>", description::INVALID_UTF8);
}

#[test]
fn no_reuse_after_error() {
    let mut recorder = Recorder::default();
    let mut scanner = Scanner::new(&ParserOptions::new());
    assert!(scanner.feed(&mut recorder, b"</a>").is_err());
    assert_eq!(
        scanner.feed(&mut recorder, b"<b/>"),
        Err(ScanError::BadInput(description::REUSE_AFTER_ERROR))
    );
    assert_eq!(
        scanner.finish(&mut recorder),
        Err(ScanError::BadInput(description::REUSE_AFTER_ERROR))
    );
}

#[test]
fn last_byte_waits_for_finish() {
    let mut recorder = Recorder::default();
    let mut scanner = Scanner::new(&ParserOptions::new());
    scanner.feed(&mut recorder, b"<a/>").unwrap();
    assert!(recorder.events.is_empty());
    assert_eq!(scanner.location().bytes, 3);
    scanner.finish(&mut recorder).unwrap();
    assert_eq!(recorder.events, vec![start(None, "a")]);
    assert_eq!(scanner.location().bytes, 4);
}

const SAMPLE: &str = "<?xml version=\"1.0\"?>\n\
<config name=\"main\" level='3'>\n\
  <!-- comment <here> -->\n\
  <item id=\"1\" ratio=\"1.25\">first item</item>\n\
  <item id=\"2\"><sub deep=\"yes\">x</sub>after</item>\n\
  <empty/>\n\
</config>\n";

fn split<'a>(bytes: &'a [u8], cuts: &[usize]) -> Vec<&'a [u8]> {
    let mut chunks = Vec::new();
    let mut rest = bytes;
    for &cut in cuts {
        if rest.is_empty() {
            break;
        }
        let (head, tail) = rest.split_at(cut.min(rest.len()));
        chunks.push(head);
        rest = tail;
    }
    if !rest.is_empty() {
        chunks.push(rest);
    }
    chunks
}

proptest! {
    #[test]
    fn any_split_gives_same_tree(cuts in proptest::collection::vec(1usize..12, 0..60)) {
        let options = ParserOptions::new();
        let whole = record(&[SAMPLE.as_bytes()], &options);
        let parts = record(&split(SAMPLE.as_bytes(), &cuts), &options);
        prop_assert_eq!(whole.0, Ok(()));
        prop_assert_eq!(parts.1, whole.1);
        prop_assert_eq!(parts.2, whole.2);
    }
}
