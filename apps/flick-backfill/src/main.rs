use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = flick_backfill::Args::parse();

	flick_backfill::run(args).await
}
