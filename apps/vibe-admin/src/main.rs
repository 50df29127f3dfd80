use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = vibe_admin::Args::parse();

	vibe_admin::run(args).await
}
