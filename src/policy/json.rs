//! JSON-aware loose checking.

use serde_json::Value;
use tracing::trace;

use crate::parser::{ParseMode, ParseOptions};
use crate::policy::suffix::SuffixScanner;
use crate::policy::{Detection, check_quote_splits};

/// Loose-checks `input`, or every key and value when it is a JSON document.
///
/// Spans of detections inside a document are relative to the key or value
/// text that was checked.
pub fn check_json_aware(input: &str) -> Option<Detection> {
    check_json_aware_with(input, ParseOptions::default())
}

pub(crate) fn check_json_aware_with(input: &str, options: ParseOptions) -> Option<Detection> {
    let scanner = SuffixScanner::new(ParseMode::Loose).with_options(options);
    match serde_json::from_str::<Value>(input) {
        Ok(Value::Null) => None,
        Ok(document @ (Value::Object(_) | Value::Array(_))) => check_value(&document, &scanner),
        Ok(_) | Err(_) => check_quote_splits(input, &scanner),
    }
}

fn check_value(value: &Value, scanner: &SuffixScanner) -> Option<Detection> {
    match value {
        Value::Object(map) => map.iter().find_map(|(key, value)| {
            trace!(key = key.as_str(), "checking JSON member");
            check_quote_splits(key, scanner).or_else(|| check_value(value, scanner))
        }),
        Value::Array(items) => items.iter().find_map(|item| check_value(item, scanner)),
        Value::String(text) => check_quote_splits(text, scanner),
        scalar => check_quote_splits(&scalar.to_string(), scanner),
    }
}
