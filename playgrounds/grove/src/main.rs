use clap::Parser;
use grove_playground::{generate, Args};
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
	tracing_subscriber::fmt()
		.with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
		.init();

	let args = Args::parse();
	let config = args.grove_config()?;

	log::info!(
		"Generating grove: scale {}, side {}, seed {:?}",
		config.scale,
		config.side,
		config.seed
	);

	let (_document, summary) = generate(&config)?;

	println!("{}", toml::to_string_pretty(&summary)?);
	Ok(())
}
