use anyhow::Result;
use clap::Parser;
use pd_shift::cli::{Cli, Command, CountArgs};
use pd_shift::config::{CountSettings, FileConfig};
use pd_shift::count::run_count;
use pd_shift::pagerduty::PagerDutyClient;
use tracing_subscriber::EnvFilter;

/// Initialize tracing subscriber; `--debug` turns on every level
fn init_tracing(debug: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let filter = if debug {
        filter.add_directive(tracing::Level::TRACE.into())
    } else {
        filter
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn count(api_key: Option<String>, file: FileConfig, args: &CountArgs) -> Result<()> {
    let settings = CountSettings::resolve(api_key, args, file)?;

    // Validate everything before touching the network
    let generator = settings.shift_generator()?;
    let client = PagerDutyClient::new(&settings.api_key)?;

    let report = run_count(&client, &settings.schedule_ids, generator)?;
    print!("{}", report.render(settings.format)?);
    Ok(())
}

fn main() -> Result<()> {
    let args = Cli::parse();

    init_tracing(args.debug);

    let file = FileConfig::discover(args.config.as_deref())?;

    match &args.command {
        Command::Count(count_args) => count(args.api_key.clone(), file, count_args),
    }
}
