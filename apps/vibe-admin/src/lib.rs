use std::path::PathBuf;

use clap::{Parser, Subcommand};
use color_eyre::eyre;
use time::format_description::well_known::Rfc3339;
use tracing_subscriber::EnvFilter;

use vibe_service::{ListRequest, SearchRequest, UpsertVibeRequest, VibeService};
use vibe_storage::db::Db;

#[derive(Debug, Parser)]
#[command(
	version = vibe_cli::VERSION,
	about = "Manage vibes stored in Postgres with pgvector embeddings.",
	rename_all = "kebab",
	styles = vibe_cli::styles(),
)]
pub struct Args {
	#[arg(long, short = 'c', value_name = "FILE")]
	pub config: PathBuf,
	#[command(subcommand)]
	pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
	/// Insert or replace the vibe associated with a uid.
	Upsert { uid: String, text: String },
	/// Retrieve a single vibe by uid.
	Fetch { uid: String },
	/// List stored vibes, most recently updated first.
	List {
		#[arg(long)]
		limit: Option<u32>,
	},
	/// Rank stored vibes against a free-text query.
	Search {
		query: String,
		#[arg(long)]
		top_k: Option<u32>,
	},
	/// Delete every stored vibe.
	Wipe {
		/// Required; wiping is not reversible.
		#[arg(long)]
		yes: bool,
	},
}

pub async fn run(args: Args) -> color_eyre::Result<()> {
	let config = vibe_config::load(&args.config)?;
	let filter =
		EnvFilter::try_new(&config.service.log_level).unwrap_or_else(|_| EnvFilter::new("warn"));

	tracing_subscriber::fmt().with_env_filter(filter).init();

	let db = Db::connect(&config.storage.postgres).await?;

	db.ensure_schema(config.providers.embedding.dimensions).await?;

	let service = VibeService::new(config, db);

	match args.command {
		Command::Upsert { uid, text } => {
			let response = service.upsert_vibe(UpsertVibeRequest { uid, text }).await?;

			println!("Stored vibe for '{}' ({}).", response.uid, response.model_tag);
		},
		Command::Fetch { uid } => {
			let vibe = service.fetch(&uid).await?;

			println!("uid: {}", vibe.uid);
			println!("model: {}", vibe.model_tag);
			println!("created_at: {}", vibe.created_at.format(&Rfc3339)?);
			println!("updated_at: {}", vibe.updated_at.format(&Rfc3339)?);
			println!("narrative:");
			println!("{}", vibe.narrative);
			println!("normalized narrative:");
			println!("{}", vibe.normalized_narrative);
		},
		Command::List { limit } => {
			let response = service.list(ListRequest { limit }).await?;

			if response.items.is_empty() {
				println!("No vibes stored.");
			}

			for item in response.items {
				println!("{}\t{}", item.uid, item.narrative);
			}
		},
		Command::Search { query, top_k } => {
			let response = service.search(SearchRequest { query, top_k }).await?;

			if response.results.is_empty() {
				println!("No matches.");
			}

			for (rank, item) in response.results.into_iter().enumerate() {
				println!("{}. {} score {}", rank + 1, item.uid, item.formatted_score);

				if !item.overlap_terms.is_empty() {
					println!("   overlap: {}", item.overlap_terms.join(", "));
				}

				println!("   {}", item.narrative);
			}
		},
		Command::Wipe { yes } => {
			if !yes {
				return Err(eyre::eyre!("Refusing to wipe without --yes."));
			}

			let report = service.wipe().await?;

			println!("Removed {} vibe(s).", report.removed);
		},
	}

	Ok(())
}
