use proptest::prelude::*;
use sinkguard::{Context, SanitizeOptions, Sanitized, normalize, sanitize};

fn context_sets() -> impl Strategy<Value = Vec<Context>> {
    proptest::sample::subsequence(Context::ALL.to_vec(), 0..=Context::ALL.len())
}

proptest! {
    #[test]
    fn empty_input_is_returned_for_any_contexts(contexts in context_sets()) {
        let options = SanitizeOptions::new(contexts);
        prop_assert_eq!(sanitize("", &options), Sanitized::Clean(String::new()));
    }

    #[test]
    fn normalize_is_idempotent(input in r"[a-z0-9%&#;<>xX\t\r\n ]{0,48}") {
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn normalize_is_idempotent_for_lossy_utf8(
        bytes in proptest::collection::vec(any::<u8>(), 0..=64)
    ) {
        let input = String::from_utf8_lossy(&bytes).into_owned();
        let once = normalize(&input);
        prop_assert_eq!(normalize(&once), once);
    }

    #[test]
    fn clean_results_echo_the_input(input in "[a-zA-Z0-9 ,.!?-]{1,48}") {
        let options = SanitizeOptions::new([Context::Url, Context::Js]);
        match sanitize(&input, &options) {
            Sanitized::Clean(value) => prop_assert_eq!(value, input),
            other => prop_assert!(other.as_str().is_empty()),
        }
    }
}
