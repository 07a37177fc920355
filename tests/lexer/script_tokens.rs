use sinkguard::lexer::{Lexer, TemplateEnd, TokenKind};

fn kinds(source: &str) -> Vec<(TokenKind, &str)> {
    let mut lexer = Lexer::new(source);
    let mut out = Vec::new();
    loop {
        let token = lexer.next_token();
        if token.is_eof() {
            return out;
        }
        out.push((token.kind, token.lexeme));
    }
}

#[test]
fn member_call_tokens() {
    assert_eq!(
        kinds("a.b(0x1F, 'c')"),
        vec![
            (TokenKind::Name, "a"),
            (TokenKind::Punctuator, "."),
            (TokenKind::Name, "b"),
            (TokenKind::Punctuator, "("),
            (TokenKind::Number, "0x1F"),
            (TokenKind::Punctuator, ","),
            (TokenKind::String, "'c'"),
            (TokenKind::Punctuator, ")"),
        ]
    );
}

#[test]
fn comments_are_trivia() {
    assert_eq!(
        kinds("a /* b */ // c"),
        vec![(TokenKind::Name, "a")]
    );
}

#[test]
fn template_head_stops_at_substitution() {
    let mut lexer = Lexer::new("`a${b}c`");
    let head = lexer.next_token();
    assert_eq!(head.kind, TokenKind::Template(TemplateEnd::Substitution));
    assert_eq!(head.lexeme, "`a${");
    assert!(lexer.next_token().is_word("b"));
    let close = lexer.next_token();
    assert!(close.is_punct("}"));
    let tail = lexer.rescan_template_continuation(close);
    assert_eq!(tail.kind, TokenKind::Template(TemplateEnd::Tail));
    assert_eq!(tail.lexeme, "}c`");
    assert!(lexer.next_token().is_eof());
}

#[test]
fn slash_is_punctuator_until_rescanned() {
    let mut lexer = Lexer::new("/a+/g");
    let slash = lexer.next_token();
    assert!(slash.is_punct("/"));
    let regex = lexer.rescan_regex(slash);
    assert_eq!(regex.kind, TokenKind::Regex);
    assert_eq!(regex.lexeme, "/a+/g");
}

#[test]
fn escaped_names_are_marked() {
    let mut lexer = Lexer::new("\\u0061lert");
    let token = lexer.next_token();
    assert_eq!(token.kind, TokenKind::Name);
    assert!(token.escaped);
    assert!(!token.is_word("alert"));
}
