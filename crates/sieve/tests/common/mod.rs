//! Common test utilities shared across integration tests.

#![expect(dead_code, reason = "each test binary uses a different subset of helpers")]

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output};
use tempfile::NamedTempFile;

/// The three users used throughout the filtering scenarios.
pub const USERS: &str = concat!(
    r#"{"username":"user1","age":25,"fullname":"James Brown"}"#,
    "\n",
    r#"{"username":"user2","age":35,"fullname":"Alice Jameson"}"#,
    "\n",
    r#"{"username":"user3","age":40,"fullname":"James Smith"}"#,
    "\n",
);

/// Write `content` to a fresh temporary file.
pub fn create_temp_jsonl_file(content: &str) -> NamedTempFile {
    let mut file = NamedTempFile::new().expect("Failed to create temp file");
    file.write_all(content.as_bytes())
        .expect("Failed to write to temp file");
    file.flush().expect("Failed to flush temp file");
    file
}

/// Run the sieve binary in `dir`.
pub fn run_sieve_in_dir(dir: &Path, args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_sieve"))
        .args(args)
        .current_dir(dir)
        .env("RUST_LOG", "error")
        .output()
        .expect("Failed to execute sieve binary")
}
