//! Settings models shared by the binary and library consumers.

pub mod config;
