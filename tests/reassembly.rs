use uartplot::data::reassembly::LineReassembler;
use uartplot::SourceId;

fn feed(r: &mut LineReassembler, source: &SourceId, bytes: &[u8]) -> Vec<String> {
    r.feed(source, bytes).collect()
}

#[test]
fn emits_line_between_two_separators() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert_eq!(feed(&mut r, &p1, b"\n1.0 2.0\n"), vec!["1.0 2.0"]);
}

#[test]
fn drops_line_with_missing_beginning() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    // "11111 0.2" is the tail of a line whose start was never received.
    assert_eq!(feed(&mut r, &p1, b"11111 0.2\n0.1 0.2\n"), vec!["0.1 0.2"]);
}

#[test]
fn incomplete_line_waits_for_closing_separator() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert!(feed(&mut r, &p1, b"\n1.5,").is_empty());
    assert!(feed(&mut r, &p1, b"2.5").is_empty());
    assert!(feed(&mut r, &p1, b",3.5").is_empty());
    assert_eq!(feed(&mut r, &p1, b"\n"), vec!["1.5,2.5,3.5"]);
}

#[test]
fn no_separator_keeps_everything() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert!(feed(&mut r, &p1, b"abc").is_empty());
    assert_eq!(r.pending(&p1), b"abc");
    assert_eq!(r.consumed_offset(&p1), 0);
}

#[test]
fn prefix_before_opening_separator_is_retired() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert!(feed(&mut r, &p1, b"garbage\n12").is_empty());
    assert_eq!(r.pending(&p1), b"\n12");
    assert_eq!(r.consumed_offset(&p1), 7);
}

#[test]
fn consumed_offset_stops_at_last_closing_separator() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    let lines = feed(&mut r, &p1, b"\na\nb\nc");
    assert_eq!(lines, vec!["a", "b"]);
    // The closing separator of "b" (offset 4) opens the next line and is kept.
    assert_eq!(r.consumed_offset(&p1), 4);
    assert_eq!(r.pending(&p1), b"\nc");
}

#[test]
fn consumed_bytes_are_never_yielded_again() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert_eq!(feed(&mut r, &p1, b"\n1\n2\n"), vec!["1", "2"]);
    assert!(feed(&mut r, &p1, b"").is_empty());
    assert_eq!(feed(&mut r, &p1, b"3\n"), vec!["3"]);
}

#[test]
fn lines_not_pulled_are_kept_for_the_next_call() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    {
        let mut lines = r.feed(&p1, b"\na\nb\n");
        assert_eq!(lines.next().as_deref(), Some("a"));
    }
    assert_eq!(feed(&mut r, &p1, b""), vec!["b"]);
}

#[test]
fn empty_lines_are_emitted_as_empty_strings() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert_eq!(feed(&mut r, &p1, b"\n\n\n"), vec!["", ""]);
}

#[test]
fn sources_are_buffered_independently() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    let p2 = SourceId::from("P2");
    assert!(feed(&mut r, &p1, b"\n1,").is_empty());
    assert!(feed(&mut r, &p2, b"\n9,").is_empty());
    assert_eq!(feed(&mut r, &p2, b"8\n"), vec!["9,8"]);
    assert_eq!(feed(&mut r, &p1, b"2\n"), vec!["1,2"]);
}

#[test]
fn split_multibyte_character_is_reassembled() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    let text = "\nLabels:Température\n".as_bytes();
    // Split inside the two-byte 'é'.
    let split = text.iter().position(|&b| b == 0xC3).unwrap() + 1;
    assert!(feed(&mut r, &p1, &text[..split]).is_empty());
    assert_eq!(feed(&mut r, &p1, &text[split..]), vec!["Labels:Température"]);
}

#[test]
fn invalid_utf8_is_replaced_not_fatal() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    let lines = feed(&mut r, &p1, b"\n1.0 \xFF 2.0\n");
    assert_eq!(lines.len(), 1);
    assert!(lines[0].starts_with("1.0 "));
    assert!(lines[0].ends_with(" 2.0"));
}

#[test]
fn remove_source_drops_partial_line() {
    let mut r = LineReassembler::new();
    let p1 = SourceId::from("P1");
    assert!(feed(&mut r, &p1, b"\n1.0 2").is_empty());
    r.remove_source(&p1);
    assert!(r.pending(&p1).is_empty());
    // Without its opening separator the rest of the line is a missing-beginning fragment.
    assert!(feed(&mut r, &p1, b".0\n").is_empty());
}
