//! kpdiff - show the differences between two KeePass databases
//!
//! Prints one record per added, removed or changed entry.

mod config;

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser};
use kpdiff_core::{Differ, KeepassDatabase};
use std::io::{self, Write};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use config::Config;
use kpdiff_core::OutputFormat;

/// kpdiff - diff two KeePass databases
#[derive(Parser, Debug)]
#[command(name = "kpdiff")]
#[command(about = "Show added, removed and changed entries between two KeePass databases")]
struct Args {
    /// Path to the left (older) database file
    left: PathBuf,

    /// Path to the right (newer) database file
    right: PathBuf,

    /// Password for both databases
    #[arg(short, long = "pass", value_name = "PASSWORD", default_value = "")]
    pass: String,
}

impl Args {
    fn is_complete(&self) -> bool {
        !self.pass.is_empty()
            && !self.left.as_os_str().is_empty()
            && !self.right.as_os_str().is_empty()
    }
}

fn main() -> Result<()> {
    let args = Args::parse();

    // Logs go to stderr so stdout carries only the diff
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive("kpdiff=warn".parse()?))
        .with_writer(std::io::stderr)
        .init();

    if !args.is_complete() {
        Args::command().print_help()?;
        std::process::exit(1);
    }

    let config = Config::load(std::env::var_os("KPDIFF_CONFIG").map(PathBuf::from))?;

    if config.format == OutputFormat::Text {
        println!("Diffing {} and {}", args.left.display(), args.right.display());
    }

    let left = KeepassDatabase::unlock(&args.left, &args.pass)?;
    let right = KeepassDatabase::unlock(&args.right, &args.pass)?;

    let renderer = config.renderer();
    let differ = Differ::new(config.group_key);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    let mut written: io::Result<()> = Ok(());
    let mut count = 0usize;

    differ.diff_groups_with(left.groups(), right.groups(), &mut |record| {
        if written.is_ok() {
            written = renderer.write_record(&mut out, &record);
            count += 1;
        }
    });

    written.context("Failed to write diff output")?;
    out.flush()?;

    tracing::info!(
        "{} differences between {} and {}",
        count,
        left.path().display(),
        right.path().display()
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_positionals_and_password() {
        let args = Args::try_parse_from(["kpdiff", "a.kdbx", "b.kdbx", "--pass", "pw"]).unwrap();
        assert_eq!(args.left, PathBuf::from("a.kdbx"));
        assert_eq!(args.right, PathBuf::from("b.kdbx"));
        assert_eq!(args.pass, "pw");
        assert!(args.is_complete());
    }

    #[test]
    fn short_password_flag() {
        let args = Args::try_parse_from(["kpdiff", "-p", "pw", "a.kdbx", "b.kdbx"]).unwrap();
        assert_eq!(args.pass, "pw");
    }

    #[test]
    fn missing_password_is_incomplete() {
        let args = Args::try_parse_from(["kpdiff", "a.kdbx", "b.kdbx"]).unwrap();
        assert!(!args.is_complete());

        let args = Args::try_parse_from(["kpdiff", "a.kdbx", "b.kdbx", "--pass", ""]).unwrap();
        assert!(!args.is_complete());
    }

    #[test]
    fn missing_positional_is_an_error() {
        assert!(Args::try_parse_from(["kpdiff", "a.kdbx", "--pass", "pw"]).is_err());
    }

    #[test]
    fn rejects_extra_flags() {
        assert!(Args::try_parse_from(["kpdiff", "a", "b", "--pass", "pw", "--json"]).is_err());
    }

    #[test]
    fn args_definition_is_valid() {
        Args::command().debug_assert();
    }
}
