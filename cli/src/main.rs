use clap::Parser;
use contacts_cli::Cli;

fn main() -> anyhow::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    let _ = dotenvy::dotenv();
    contacts_cli::init_tracing();
    let cli = Cli::parse();

    let runtime = tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()?;
    let result = runtime.block_on(cli.run());
    // `search` may leave a blocking stdin read behind after `quit`.
    runtime.shutdown_background();
    result
}
