use sinkguard::lexer::{RawToken, tokenize};

fn texts(source: &str) -> Vec<&str> {
    tokenize(source).into_iter().map(|token| token.text).collect()
}

fn assert_contiguous(source: &str, tokens: &[RawToken<'_>]) {
    let mut expected_start = 0;
    for token in tokens {
        assert_eq!(token.span.start.as_usize(), expected_start, "gap before {token:?}");
        assert_eq!(token.span.slice(source), token.text);
        expected_start = token.span.end.as_usize();
    }
    assert_eq!(expected_start, source.len());
}

#[test]
fn empty_input_yields_one_empty_token() {
    let tokens = tokenize("");
    assert_eq!(tokens.len(), 1);
    assert!(tokens[0].is_empty());
}

#[test]
fn non_empty_input_never_yields_empty_tokens() {
    let source = "x = 'a' + `b${c}` /* d */ // e";
    let tokens = tokenize(source);
    assert!(tokens.iter().all(|token| !token.is_empty()));
    assert_contiguous(source, &tokens);
}

#[test]
fn literals_and_comments_stay_whole() {
    assert_eq!(
        texts("'a\\'b' + c"),
        vec!["'a\\'b'", " ", "+", " ", "c"]
    );
    assert_eq!(texts("`a${b}c`;"), vec!["`a${b}c`", ";"]);
    assert_eq!(texts("/* x */y"), vec!["/* x */", "y"]);
}

#[test]
fn punctuation_heavy_text_round_trips() {
    for source in [
        "ff476896(v=3dvs.85).aspx",
        "FOR=LLl2zLcqjlYJ.ouroLxIEXbkS.eEHuB1t3B1LX6xaSPH7dnuiULfpcHU;",
        "pET-26b(+)",
        "\u{2028}caf\u{e9} \\u0061 #@",
    ] {
        let tokens = tokenize(source);
        assert_contiguous(source, &tokens);
        assert_eq!(
            tokens.iter().map(|token| token.text).collect::<String>(),
            source
        );
    }
}

#[test]
fn payload_after_padding_starts_a_token() {
    let source = "foo bar baz;alert(1)";
    let starts: Vec<usize> = tokenize(source)
        .iter()
        .map(|token| token.span.start.as_usize())
        .collect();
    assert!(starts.contains(&12));
}
