use std::path::PathBuf;

use crate::core::error::AzaError;
use crate::core::paginate::SortOrder;

/// Flags and positionals from the command line, before config is layered in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub(crate) struct CliArgs {
    pub positional: Vec<String>,
    pub help: bool,
    pub project: Option<String>,
    pub api_version: Option<String>,
    pub json: bool,
    pub raw: bool,
    pub debug: bool,
    pub limit: Option<u32>,
    pub order: Option<SortOrder>,
    pub after: Option<String>,
    pub before: Option<String>,
    pub concurrency: Option<usize>,
    pub config: Option<PathBuf>,
}

fn flag_value(args: &[String], i: usize, flag: &str) -> Result<String, AzaError> {
    args.get(i + 1)
        .cloned()
        .ok_or_else(|| AzaError::usage(format!("Missing value for {}", flag)))
}

fn parse_number<T: std::str::FromStr>(raw: &str, flag: &str) -> Result<T, AzaError> {
    raw.parse()
        .map_err(|_| AzaError::usage(format!("{} expects a number, got '{}'", flag, raw)))
}

pub(crate) fn parse_args(args: &[String], start: usize) -> Result<CliArgs, AzaError> {
    let mut parsed = CliArgs::default();
    let mut i = start;
    while i < args.len() {
        let arg = args[i].as_str();
        match arg {
            "--help" | "-h" => {
                parsed.help = true;
                i += 1;
            }
            "--project" | "-p" => {
                parsed.project = Some(flag_value(args, i, arg)?);
                i += 2;
            }
            "--api-version" => {
                parsed.api_version = Some(flag_value(args, i, arg)?);
                i += 2;
            }
            "--json" => {
                parsed.json = true;
                i += 1;
            }
            "--raw" => {
                parsed.raw = true;
                i += 1;
            }
            "--debug" => {
                parsed.debug = true;
                i += 1;
            }
            "--limit" => {
                parsed.limit = Some(parse_number(&flag_value(args, i, arg)?, arg)?);
                i += 2;
            }
            "--order" => {
                let raw = flag_value(args, i, arg)?;
                parsed.order = Some(SortOrder::parse(&raw).ok_or_else(|| {
                    AzaError::usage(format!("--order expects asc or desc, got '{}'", raw))
                })?);
                i += 2;
            }
            "--after" => {
                parsed.after = Some(flag_value(args, i, arg)?);
                i += 2;
            }
            "--before" => {
                parsed.before = Some(flag_value(args, i, arg)?);
                i += 2;
            }
            "--concurrency" => {
                parsed.concurrency = Some(parse_number(&flag_value(args, i, arg)?, arg)?);
                i += 2;
            }
            "--config" => {
                parsed.config = Some(PathBuf::from(flag_value(args, i, arg)?));
                i += 2;
            }
            _ if arg.starts_with('-') => {
                return Err(AzaError::usage(format!("Unknown flag {}", arg)));
            }
            _ => {
                parsed.positional.push(arg.to_string());
                i += 1;
            }
        }
    }
    Ok(parsed)
}
