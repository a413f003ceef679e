use clap::Parser;
use tracing::error;

use pgtok_parity::cli::Cli;
use pgtok_parity::config::HarnessConfig;
use pgtok_parity::{app, logging};

fn main() {
    // Cargar .env si existe para obtener DATABASE_URL
    parity_persistence::init_dotenv();
    let cli = Cli::parse();
    logging::init();

    let result = HarnessConfig::from_cli(cli).and_then(|cfg| app::execute(&cfg, &mut std::io::stdout().lock()));
    let code = match result {
        Ok(()) => 0,
        Err(e) => {
            error!("{e}");
            e.exit_code()
        }
    };
    std::process::exit(code);
}
