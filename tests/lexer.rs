#[path = "lexer/property_tokenize.rs"]
mod property_tokenize;
#[path = "lexer/raw_tokens.rs"]
mod raw_tokens;
#[path = "lexer/script_tokens.rs"]
mod script_tokens;
