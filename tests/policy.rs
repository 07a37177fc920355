#[path = "policy/forbidden_constructs.rs"]
mod forbidden_constructs;
#[path = "policy/json_recursion.rs"]
mod json_recursion;
#[path = "policy/property_scanning.rs"]
mod property_scanning;
#[path = "policy/suffix_scanning.rs"]
mod suffix_scanning;
