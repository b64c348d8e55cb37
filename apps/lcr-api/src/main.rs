use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;
	let args = lcr_api::Args::parse();
	lcr_api::run(args).await
}
