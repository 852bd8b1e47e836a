// crates/vtisnap-cli/src/cmd/mod.rs

pub mod command;
pub mod export;
