use uartplot::data::line::{classify, parse_value, split_fields, ParsedLine};

#[test]
fn data_line_with_space_separators() {
    assert_eq!(classify("1.0 2.0"), ParsedLine::Data(vec![1.0, 2.0]));
}

#[test]
fn all_separators_are_accepted() {
    assert_eq!(
        classify("1,2;3 4\t5"),
        ParsedLine::Data(vec![1.0, 2.0, 3.0, 4.0, 5.0])
    );
}

#[test]
fn malformed_token_does_not_reserve_an_index() {
    assert_eq!(classify("1.0,bad,2.0"), ParsedLine::Data(vec![1.0, 2.0]));
}

#[test]
fn repeated_separators_yield_empty_tokens_that_are_skipped() {
    assert_eq!(classify("1,,2  3"), ParsedLine::Data(vec![1.0, 2.0, 3.0]));
}

#[test]
fn whitespace_only_line_yields_nothing() {
    assert!(classify(" \t ").is_empty());
    assert!(classify("").is_empty());
}

#[test]
fn trailing_carriage_return_is_ignored() {
    assert_eq!(classify("4.5,6\r"), ParsedLine::Data(vec![4.5, 6.0]));
    assert_eq!(
        classify("Labels:a,b\r"),
        ParsedLine::Labels(vec!["a".to_string(), "b".to_string()])
    );
}

#[test]
fn labels_line_is_split_on_the_same_separators() {
    assert_eq!(
        classify("Labels:X;Y Z\tW,V"),
        ParsedLine::Labels(["X", "Y", "Z", "W", "V"].map(String::from).to_vec())
    );
}

#[test]
fn labels_keep_empty_names_positionally() {
    assert_eq!(
        classify("Labels:,B"),
        ParsedLine::Labels(vec![String::new(), "B".to_string()])
    );
}

#[test]
fn labels_prefix_is_case_sensitive() {
    assert_eq!(classify("labels:1,2"), ParsedLine::Data(vec![2.0]));
}

#[test]
fn numeric_labels_are_still_labels() {
    assert_eq!(
        classify("Labels:1,2"),
        ParsedLine::Labels(vec!["1".to_string(), "2".to_string()])
    );
}

#[test]
fn trailing_empty_fields_are_dropped() {
    assert_eq!(split_fields("a,b,,"), vec!["a", "b"]);
    assert_eq!(split_fields(",a"), vec!["", "a"]);
    assert!(split_fields("").is_empty());
}

#[test]
fn parse_value_accepts_decimal_literals() {
    assert_eq!(parse_value("-3.25"), Some(-3.25));
    assert_eq!(parse_value("1e3"), Some(1000.0));
    assert_eq!(parse_value(" 7 "), Some(7.0));
    assert_eq!(parse_value(".5"), Some(0.5));
}

#[test]
fn parse_value_rejects_non_finite_and_garbage() {
    assert_eq!(parse_value("NaN"), None);
    assert_eq!(parse_value("inf"), None);
    assert_eq!(parse_value("12abc"), None);
    assert_eq!(parse_value(""), None);
}

#[test]
fn empty_label_declaration_keeps_existing_names() {
    assert_eq!(classify("Labels:"), ParsedLine::Labels(vec![]));

    let mut store = uartplot::SeriesStore::new();
    let p1 = uartplot::SourceId::from("P1");
    store.apply_labels(&p1, vec!["temp".to_string()]);
    store.append(&p1, 0, 1.0, 0.0);
    let renamed = store.apply_labels(&p1, Vec::new());
    assert!(renamed.is_empty());
    assert_eq!(store.get(&uartplot::SeriesKey::new("P1", 0)).unwrap().name, "temp");
}
