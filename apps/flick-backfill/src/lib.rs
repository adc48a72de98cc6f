use std::{path::PathBuf, sync::Arc};

use clap::Parser;
use tracing_subscriber::EnvFilter;

use flick_providers::embedding::EmbeddingClient;
use flick_service::{BackfillDriver, BackfillOptions};
use flick_storage::{db::Db, queries};

/// Embeds every movie whose embedding is unset, then exits.
#[derive(Debug, Parser)]
#[command(
	version = flick_cli::VERSION,
	rename_all = "kebab",
	styles = flick_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	/// Stop after this many records. The next run resumes where this one stopped.
	#[arg(long, value_name = "N")]
	pub limit: Option<u64>,
	/// Override `backfill.batch_size`.
	#[arg(long, value_name = "N")]
	pub batch_size: Option<u32>,
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = flick_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("info"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = Arc::new(Db::connect(&config.storage.postgres).await?);

	db.ensure_schema(config.storage.postgres.vector_dim).await?;

	let mut options = BackfillOptions::from_config(&config);

	options.max_records = args.limit;

	if let Some(batch_size) = args.batch_size.filter(|size| *size > 0) {
		options.batch_size = batch_size;
	}

	let embedding = Arc::new(EmbeddingClient::new(config.providers.embedding.clone())?);
	let driver = BackfillDriver::new(db.clone(), embedding, options);
	let report = driver.run().await?;
	let remaining = queries::count_unembedded(&db).await?;

	tracing::info!(remaining, "Backfill pass complete.");
	println!("{}", serde_json::to_string_pretty(&report)?);

	Ok(())
}
