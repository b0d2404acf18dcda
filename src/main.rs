use anyhow::Result;
use clap::Parser;
use prompt_gallery::app::App;
use prompt_gallery::config::Config;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Debug, Parser)]
#[command(name = "prompt-gallery")]
#[command(about = "Serve prompt-to-image generation and the post gallery")]
struct CliArgs {
    /// Bind host, overriding HOST.
    #[arg(long)]
    host: Option<String>,

    /// Bind port, overriding PORT.
    #[arg(long, short)]
    port: Option<u16>,
}

#[actix_web::main]
async fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "prompt_gallery=info,actix_web=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting prompt-gallery");

    let args = CliArgs::parse();

    let mut config = match Config::from_env() {
        Ok(config) => config,
        Err(e) => {
            error!("Invalid configuration: {}", e);
            std::process::exit(1);
        }
    };
    if let Some(host) = args.host {
        config.host = host;
    }
    if let Some(port) = args.port {
        config.port = port;
    }

    let app = match App::connect(&config).await {
        Ok(app) => app,
        Err(e) => {
            error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };

    app.serve(&config).await?;
    info!("Server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::CliArgs;
    use clap::Parser;

    #[test]
    fn test_cli_port_override() {
        let args = CliArgs::try_parse_from(["prompt-gallery", "--port", "9090"]).unwrap();
        assert_eq!(args.port, Some(9090));
        assert!(args.host.is_none());
    }

    #[test]
    fn test_cli_rejects_invalid_port() {
        assert!(CliArgs::try_parse_from(["prompt-gallery", "--port", "http"]).is_err());
    }
}
