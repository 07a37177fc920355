#[path = "parser/limits.rs"]
mod limits;
#[path = "parser/loose_recovery.rs"]
mod loose_recovery;
#[path = "parser/property_robustness.rs"]
mod property_robustness;
#[path = "parser/strict_programs.rs"]
mod strict_programs;
