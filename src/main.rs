use anyhow::{Context, Result};
use chrono::Utc;

use pagepick::core::cli::{CliArgs, USAGE};
use pagepick::core::context::AppContext;
use pagepick::logging::LogTarget;
use pagepick::paging::Paginator;
use pagepick::paging::record::Record;
use pagepick::paging::recorded::RecordedSource;
use pagepick::prompter::flows::select_flow::SelectFlow;
use pagepick::prompter::prompter::{Prompter, SessionEnd};
use pagepick::ui::chrome::UiChrome;
use pagepick::watermark::{WatermarkStore, collect_since};

fn main() {
    let args = match CliArgs::from_env() {
        Ok(args) => args,
        Err(err) => {
            eprintln!("{err}\n{USAGE}");
            std::process::exit(2);
        }
    };
    if let Err(err) = run(&args) {
        eprintln!("Error: {err:#}");
        std::process::exit(1);
    }
}

fn run(args: &CliArgs) -> Result<()> {
    let ctx = AppContext::from_args(args).context("Failed to load configuration")?;

    if args.show_config {
        print_config(&ctx);
        return Ok(());
    }

    let mut source = RecordedSource::load(
        &ctx.source_path,
        ctx.config.page_shape(),
        ctx.config.record_fields(),
    )?;

    let now = Utc::now();
    let mut watermarks = match &args.account {
        Some(_) => Some(WatermarkStore::load(&ctx.watermarks_path)?),
        None => None,
    };

    let records: Vec<Record> = match (&args.account, &watermarks) {
        (Some(account), Some(store)) => {
            let since = store.last_checked(account, now);
            ctx.logger.info(
                format!("Looking for items added since {}.", since.to_rfc3339()),
                LogTarget::ConsoleAndFile,
            );
            collect_since(&mut source, since, &ctx.logger)?
        }
        _ => Paginator::new(&ctx.logger).collect(&mut source, ctx.fetch_target())?,
    };

    if records.is_empty() {
        ctx.logger
            .info("Nothing to choose from.", LogTarget::ConsoleAndFile);
    } else {
        UiChrome::new().print_banner();
        let mut flow = SelectFlow::new(&records, ctx.config.matcher(), &ctx.logger);
        if Prompter::new().run(&mut flow)? == SessionEnd::Interrupted {
            ctx.logger
                .info("Input ended before a choice was made.", LogTarget::FileOnly);
        }

        match flow.selected_item() {
            Some(record) => {
                let json = serde_json::to_string_pretty(record.value())
                    .context("Failed to encode selection")?;
                println!("{json}");
            }
            None => println!("No selection"),
        }
    }

    if let (Some(account), Some(store)) = (&args.account, watermarks.as_mut()) {
        store
            .record(account, now)
            .with_context(|| format!("Failed to save {}", store.path().display()))?;
        ctx.logger.info(
            format!("Watermark for '{account}' moved to {}.", now.to_rfc3339()),
            LogTarget::FileOnly,
        );
    }
    Ok(())
}

fn print_config(ctx: &AppContext) {
    println!("{}", ctx.config_path.display());
    for (key, description, value) in ctx.config.rows().iter() {
        println!("{key:<22} {value:<16} {description}");
    }
}
