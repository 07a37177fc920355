use proptest::prelude::*;
use sinkguard::lexer::tokenize;

const MAX_INPUT_BYTES: usize = 256;

proptest! {
    #[test]
    fn tokenize_is_lossless_for_lossy_utf8_inputs(
        bytes in proptest::collection::vec(any::<u8>(), 0..=MAX_INPUT_BYTES)
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let tokens = tokenize(&input);
        let rebuilt: String = tokens.iter().map(|token| token.text).collect();
        prop_assert_eq!(rebuilt, input.clone());
        if !input.is_empty() {
            prop_assert!(tokens.iter().all(|token| !token.is_empty()));
        }
    }

    #[test]
    fn tokenize_is_lossless_for_script_like_inputs(
        input in r#"[a-z0-9 '"`$\\{}()\[\];=+\-*/.,<>!&|?:\n]{0,64}"#
    ) {
        let rebuilt: String = tokenize(&input).iter().map(|token| token.text).collect();
        prop_assert_eq!(rebuilt, input);
    }
}
