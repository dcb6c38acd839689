// Library root — exposes internals for integration tests and the binary.
// The binary entry point is src/main.rs.

pub mod config;
pub mod descriptor;
pub mod error;
pub mod logger;
pub mod supabase;
