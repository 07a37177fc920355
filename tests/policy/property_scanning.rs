use proptest::prelude::*;
use sinkguard::parser::ParseMode;
use sinkguard::policy::{check_json_aware, scan_for_injection};

proptest! {
    #[test]
    fn scanning_terminates_in_both_modes(
        input in r#"[a-z0-9 '"`$\\{}()\[\];=+\-*/.,<>!&|?:\n]{0,48}"#
    ) {
        for mode in [ParseMode::Strict, ParseMode::Loose] {
            if let Some(detection) = scan_for_injection(&input, mode, false) {
                prop_assert_eq!(detection.span.slice(&input), detection.snippet.as_str());
            }
        }
    }

    #[test]
    fn json_aware_check_handles_arbitrary_text(input in ".{0,48}") {
        let _ = check_json_aware(&input);
    }
}
