use anyhow::{Context, Result};
use authdeck::config::{ClientKind, Config};
use authdeck::logger::Logger;
use authdeck::ui::core::AppContext;
use authdeck::{auth, ui};

#[tokio::main]
async fn main() -> Result<()> {
    let args: Vec<String> = std::env::args().skip(1).collect();

    if args.iter().any(|arg| arg == "--generate-config") {
        let path = Config::get_default_config_path()?;
        return Config::generate_default_config(path);
    }

    let mut config = Config::load().context("Failed to load configuration")?;
    if args.iter().any(|arg| arg == "--demo") {
        config.auth.client = ClientKind::Memory;
    }

    let logger = Logger::from_config(&config.logging);
    logger.install(Logger::default_log_path().as_deref())?;
    log::info!("Starting authdeck with the {:?} client", config.auth.client);

    let client = match auth::client_from_config(&config.auth) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("{e:#}");
            eprintln!("\n💡 To use this app:");
            eprintln!("1. Sign in to your application and copy the session token");
            eprintln!("2. export {}=<token>", config.auth.session_token_env);
            eprintln!("3. Or run `authdeck --demo` to try it against a built-in organization");
            return Ok(());
        }
    };

    let context = AppContext::new(client, config, logger);

    // Run the TUI application
    ui::run_app(context).await
}
