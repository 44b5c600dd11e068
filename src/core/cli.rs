use std::path::PathBuf;

pub const USAGE: &str = "Usage: pagepick [--config <path>] [--source <path>] [--logs <dir>] \
[--limit <n|all>] [--set KEY=VALUE]... [--show-config] [--account <id> --watermarks <path>]";

#[derive(Debug, Clone, PartialEq)]
pub struct CliArgs {
    pub config_path: PathBuf,
    pub source_path: PathBuf,
    pub logs_dir: PathBuf,
    pub watermarks_path: PathBuf,
    /// Raw `--limit` value, validated later against `FETCH_LIMIT` rules.
    pub limit: Option<String>,
    pub sets: Vec<(String, String)>,
    pub show_config: bool,
    pub account: Option<String>,
}

impl CliArgs {
    pub fn from_env() -> Result<Self, String> {
        Self::from_args(std::env::args().skip(1))
    }

    pub fn from_args<I>(mut args: I) -> Result<Self, String>
    where
        I: Iterator<Item = String>,
    {
        let mut parsed = Self::defaults();
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--config" => {
                    parsed.config_path = Self::next_path(&mut args, "--config")?;
                }
                "--source" => {
                    parsed.source_path = Self::next_path(&mut args, "--source")?;
                }
                "--logs" => {
                    parsed.logs_dir = Self::next_path(&mut args, "--logs")?;
                }
                "--watermarks" => {
                    parsed.watermarks_path = Self::next_path(&mut args, "--watermarks")?;
                }
                "--limit" => {
                    parsed.limit = Some(Self::next_value(&mut args, "--limit")?);
                }
                "--account" => {
                    parsed.account = Some(Self::next_value(&mut args, "--account")?);
                }
                "--set" => {
                    let pair = Self::next_value(&mut args, "--set")?;
                    parsed.sets.push(Self::split_pair(&pair)?);
                }
                "--show-config" => parsed.show_config = true,
                _ => return Err(format!("Unknown argument: {arg}")),
            }
        }
        Ok(parsed)
    }

    fn split_pair(pair: &str) -> Result<(String, String), String> {
        match pair.split_once('=') {
            Some((key, value)) if !key.trim().is_empty() => {
                Ok((key.trim().to_string(), value.trim().to_string()))
            }
            _ => Err(format!("Expected KEY=VALUE after --set, found '{pair}'")),
        }
    }

    fn next_value<I>(args: &mut I, flag: &str) -> Result<String, String>
    where
        I: Iterator<Item = String>,
    {
        args.next()
            .ok_or_else(|| format!("Missing value for {flag}"))
    }

    fn next_path<I>(args: &mut I, flag: &str) -> Result<PathBuf, String>
    where
        I: Iterator<Item = String>,
    {
        Self::next_value(args, flag).map(PathBuf::from)
    }

    fn defaults() -> Self {
        Self {
            config_path: PathBuf::from("config.json"),
            source_path: PathBuf::from("pages.json"),
            logs_dir: PathBuf::from("logs"),
            watermarks_path: PathBuf::from("watermarks.json"),
            limit: None,
            sets: Vec::new(),
            show_config: false,
            account: None,
        }
    }
}
