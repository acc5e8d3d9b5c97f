mod commands;
mod form_input;
mod logging;

use config::{Args, BuilderConfig};
use logging::LoggingConfig;

fn main() -> anyhow::Result<()> {
    let args = Args::parse_args();
    let env_loaded = config::load_env_file(&args.env_file)?;
    let settings = BuilderConfig::from_env()?;

    let _guard = logging::init_with_config(LoggingConfig::from(&settings.log))?;
    tracing::debug!(
        env_file = %args.env_file,
        env_loaded,
        symbol = %settings.chain.symbol,
        decimals = settings.chain.decimals,
        "Configuration loaded"
    );

    let output = commands::run(&args, &settings)?;
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
