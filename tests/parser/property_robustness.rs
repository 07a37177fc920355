use proptest::prelude::*;
use sinkguard::parser::{NullVisitor, ParseMode, ParseOptions, parse_program};

const MAX_INPUT_BYTES: usize = 256;

proptest! {
    #[test]
    fn strict_parse_handles_lossy_utf8_inputs_without_panicking(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES)
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let _ = parse_program(&input, ParseMode::Strict, ParseOptions::default(), &mut NullVisitor);
    }

    #[test]
    fn loose_parse_only_fails_on_limits(
        input in r#"[a-z0-9 '"`$\\{}()\[\];=+\-*/.,<>!&|?:\n]{0,96}"#
    ) {
        let result = parse_program(&input, ParseMode::Loose, ParseOptions::default(), &mut NullVisitor);
        if let Err(error) = result {
            prop_assert!(error.is_fatal(), "loose parse failed with {error}");
        }
    }

    #[test]
    fn loose_parse_handles_keyword_soup(
        words in proptest::collection::vec(
            prop_oneof![
                Just("if"), Just("for"), Just("with"), Just("function"), Just("class"),
                Just("import"), Just("export"), Just("new"), Just("yield"), Just("let"),
                Just("("), Just(")"), Just("{"), Just("}"), Just("=>"), Just("..."),
                Just("="), Just(","), Just(";"), Just("x"), Just("`"), Just("'"),
            ],
            0..48,
        )
    ) {
        let input = words.join(" ");
        let result = parse_program(&input, ParseMode::Loose, ParseOptions::default(), &mut NullVisitor);
        if let Err(error) = result {
            prop_assert!(error.is_fatal(), "loose parse failed with {error}");
        }
    }
}
