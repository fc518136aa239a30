use anyhow::Context;
use argon2_ffi::{ExtraData, HashOptions, ThreadMode, Variant};
use tracing::debug;

use super::input;

#[derive(Debug, clap::Args)]
pub struct Hash {
    #[arg(short = 's', long)]
    salt: Option<String>,

    #[arg(short = 'S', long)]
    secret: Option<String>,

    /// Memory usage in KiB
    #[arg(short = 'm', long)]
    memory_cost: Option<u32>,

    /// Number of iterations
    #[arg(short = 't', long)]
    time_cost: Option<u32>,

    #[arg(short = 'l', long)]
    lanes: Option<u32>,

    /// "sequential" or "parallel"
    #[arg(short = 'T', long)]
    thread_mode: Option<ThreadMode>,

    /// "argon2i", "argon2d" or "argon2id"
    #[arg(short = 'v', long)]
    variant: Option<Variant>,

    /// JSON value folded into the hash
    #[arg(short = 'd', long, value_parser = parse_json)]
    data: Option<serde_json::Value>,

    /// Output length in bytes
    #[arg(short = 'H', long)]
    hash_length: Option<u32>,
}

fn parse_json(value: &str) -> Result<serde_json::Value, String> {
    serde_json::from_str(value).map_err(|_| format!("must be a valid json object: {value}"))
}

impl Hash {
    fn options(self) -> anyhow::Result<HashOptions> {
        let data = match &self.data {
            Some(value) => ExtraData::json(value).context("invalid --data")?,
            None => ExtraData::None,
        };

        Ok(HashOptions {
            salt: self.salt.map(String::into_bytes),
            secret: self.secret.map(String::into_bytes),
            data,
            variant: self.variant,
            version: None,
            memory_cost: self.memory_cost,
            time_cost: self.time_cost,
            lanes: self.lanes,
            hash_length: self.hash_length,
            thread_mode: self.thread_mode,
        })
    }

    pub async fn run(self) -> anyhow::Result<()> {
        let options = self.options()?;
        let password = input::read_password()?;
        debug!(variant = ?options.variant, memory_cost = ?options.memory_cost, "hashing password");

        println!("{}", argon2_ffi::hash(&password, &options).await?);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn parse(args: &[&str]) -> Hash {
        let mut argv = vec!["argon2", "hash"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv).unwrap().command {
            Command::Hash(hash) => hash,
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_short_flags() {
        let options = parse(&[
            "-s", "saltsalt", "-S", "key", "-m", "8192", "-t", "10", "-l", "4", "-T", "parallel",
            "-v", "argon2id", "-d", r#"{"requestId":"a00d"}"#, "-H", "16",
        ])
        .options()
        .unwrap();

        assert_eq!(options.salt.as_deref(), Some(&b"saltsalt"[..]));
        assert_eq!(options.secret.as_deref(), Some(&b"key"[..]));
        assert_eq!(options.memory_cost, Some(8192));
        assert_eq!(options.time_cost, Some(10));
        assert_eq!(options.lanes, Some(4));
        assert_eq!(options.thread_mode, Some(ThreadMode::Parallel));
        assert_eq!(options.variant, Some(Variant::Argon2id));
        assert_eq!(options.data.as_bytes(), Some(&br#"{"requestId":"a00d"}"#[..]));
        assert_eq!(options.hash_length, Some(16));
    }

    #[test]
    fn test_defaults_are_unset() {
        assert_eq!(parse(&[]).options().unwrap(), HashOptions::default());
    }

    #[test]
    fn test_rejects_bad_values() {
        let cases: [[&str; 3]; 4] = [
            ["hash", "--variant", "argon3"],
            ["hash", "--thread-mode", "both"],
            ["hash", "--data", "{not json"],
            ["hash", "--memory-cost", "-1"],
        ];
        for args in cases {
            let mut argv = vec!["argon2"];
            argv.extend_from_slice(&args);
            assert!(Cli::try_parse_from(argv).is_err(), "{args:?}");
        }
    }
}
