// src/cli.rs
use std::{env, path::PathBuf};

use anyhow::Result;

use crate::params::Params;
use crate::runner;

pub fn run() -> Result<()> {
    let mut params = Params::new();
    parse_cli(&mut params)?;
    runner::run(&params)
}

fn parse_cli(params: &mut Params) -> Result<()> {
    let mut args = env::args().skip(1);
    while let Some(a) = args.next() {
        match a.as_str() {
            "-y" | "--year" => {
                let v = args.next().ok_or_else(|| anyhow::anyhow!("Missing value for --year"))?;
                params.year = v.parse()?;
            }
            "--tolerance" => {
                let v = args.next().ok_or_else(|| anyhow::anyhow!("Missing value for --tolerance"))?;
                params.tolerance = v.parse()?;
                if params.tolerance < 0 {
                    anyhow::bail!("Tolerance must be >= 0");
                }
            }
            "-n" | "--dry-run" => params.dry_run = true,
            "--cache-only" => params.cache_only = true,
            "--refresh" => params.refresh = true,
            "-f" | "--file" => {
                let v = args.next().ok_or_else(|| anyhow::anyhow!("Missing value for --file"))?;
                params.table_file = PathBuf::from(v);
            }
            "--cache-dir" => {
                let v = args.next().ok_or_else(|| anyhow::anyhow!("Missing value for --cache-dir"))?;
                params.cache_dir = PathBuf::from(v);
            }
            "-h" | "--help" => {
                eprintln!("{}", include_str!("cli_help.txt"));
                std::process::exit(0);
            }
            _ => anyhow::bail!("Unknown arg: {a}"),
        }
    }

    if params.refresh && params.cache_only {
        anyhow::bail!("--refresh and --cache-only are mutually exclusive");
    }

    Ok(())
}
