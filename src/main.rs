// Entrypoint for the CLI application.
// - Keeps `main` small: set up logging, build the API client from the
//   environment and hand it to the menu loop.

use api_explorer_cli::{logger, ui::main_menu, ApiClient};

fn main() -> anyhow::Result<()> {
    logger::init_cli_logger();

    let api = ApiClient::from_env()?;
    tracing::debug!("Endpoints: {:?}", api.endpoints());

    // Blocks until the user picks "Exit".
    main_menu(api)?;
    Ok(())
}
