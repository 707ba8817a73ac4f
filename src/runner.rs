use tracing::info;
use tracing_subscriber::EnvFilter;

use crate::cli::Cli;
use recon_finder::config::{RunConfig, Settings, Views};
use recon_finder::{output, pipeline};

fn init_logging(cli: &Cli) {
    // RUST_LOG wins; otherwise the crate level follows the flags
    let crate_level = if cli.silent {
        "error"
    } else if cli.debug {
        "trace"
    } else if cli.verbose {
        "debug"
    } else {
        "info"
    };
    let filter_str = format!("recon_finder={level},warn", level = crate_level);
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&filter_str))
        .unwrap_or_else(|_| EnvFilter::new(crate_level));
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_ansi(!cli.no_color)
        .with_target(false)
        .init();
}

pub async fn run_from_cli(cli: Cli) -> anyhow::Result<()> {
    init_logging(&cli);

    let Some(project) = cli.project.as_deref().filter(|p| !p.is_empty()) else {
        info!("No project specified. Exiting application");
        return Ok(());
    };

    let settings = Settings::load(cli.config.as_deref())?;
    let views = Views::from_flags(cli.email, cli.dns, cli.all);
    let config = RunConfig::resolve(&settings, project, cli.source, cli.input.clone(), views);

    info!("Getting findings for project {}", project);
    let report = pipeline::run(&config)?;
    let summary = output::write_report(&config.findings_folder, &report).await?;
    if summary.failed > 0 {
        anyhow::bail!("{} artifact(s) could not be written", summary.failed);
    }
    Ok(())
}
