use crate::config::Config;
use crate::core::cli::CliArgs;
use crate::errors::Result;
use crate::logging::{LogTarget, Logger};
use crate::paging::Target;
use std::path::PathBuf;

#[derive(Debug)]
pub struct AppContext {
    pub config: Config,
    pub logger: Logger,
    pub config_path: PathBuf,
    pub source_path: PathBuf,
    pub logs_dir: PathBuf,
    pub watermarks_path: PathBuf,
}

impl AppContext {
    /// Loads (or creates) the config, applies persisted `--set` edits, then the
    /// run-only `--limit` override.
    pub fn from_args(args: &CliArgs) -> Result<Self> {
        let mut config = Config::load_or_init(&args.config_path)?;

        let logger = Logger::new();
        logger.set_log_dir(&args.logs_dir);

        if !args.sets.is_empty() {
            config.set_many(args.sets.iter().map(|(k, v)| (k.as_str(), v.as_str())))?;
        }
        logger.set_file_logging_enabled(config.file_logging_enabled());
        for (key, value) in &args.sets {
            logger.info(
                format!("Config '{key}' set to '{value}'."),
                LogTarget::FileOnly,
            );
        }

        if let Some(limit) = &args.limit {
            config.override_fetch_limit(limit)?;
        }

        Ok(Self {
            config,
            logger,
            config_path: args.config_path.clone(),
            source_path: args.source_path.clone(),
            logs_dir: args.logs_dir.clone(),
            watermarks_path: args.watermarks_path.clone(),
        })
    }

    pub fn fetch_target(&self) -> Target {
        self.config.fetch_limit()
    }
}
