use clap::{Parser, Subcommand};

mod hash;
mod input;
mod verify;

pub use hash::Hash;
pub use verify::Verify;

#[derive(Debug, Parser)]
#[command(name = "argon2", version = argon2_ffi::version(), about = "Hash a new password or verify an already existing one.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Hash the password read from stdin
    Hash(Hash),
    /// Verify the password read from stdin against an encoded hash
    Verify(Verify),
}

impl Cli {
    pub async fn run(self) -> anyhow::Result<()> {
        match self.command {
            Command::Hash(cmd) => cmd.run().await,
            Command::Verify(cmd) => cmd.run().await,
        }
    }
}
