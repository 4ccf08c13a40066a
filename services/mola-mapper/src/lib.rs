//! MOLA grid mapper command line tool.
//!
//! The binary in `main.rs` only parses arguments and sets up logging; each
//! subcommand lives in [`commands`] and writes its stdout output through a
//! caller-supplied writer.

pub mod cli;
pub mod commands;

pub use cli::{Cli, Command, GridArgs};

use mola_common::MolaError;

/// Process exit code for a failed command.
pub fn exit_code(err: &anyhow::Error) -> u8 {
    err.downcast_ref::<MolaError>()
        .map(MolaError::exit_code)
        .and_then(|code| u8::try_from(code).ok())
        .unwrap_or(1)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::*;

    #[test]
    fn test_exit_code_follows_error_kind() {
        let missing = anyhow::Error::from(MolaError::ImageNotFound(PathBuf::from("mars.jpg")));
        assert_eq!(exit_code(&missing), 3);
        let config = anyhow::Error::from(MolaError::InvalidConfig("alpha".into()));
        assert_eq!(exit_code(&config), 2);
        assert_eq!(exit_code(&anyhow::anyhow!("logging already set")), 1);
    }
}
