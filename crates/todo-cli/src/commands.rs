use std::net::SocketAddr;

use anyhow::Context;
use colored::Colorize;
use todo_server::{ServerConfig, TodoServer};

use crate::cli::*;

pub fn run_command(cli: Cli) -> anyhow::Result<()> {
    match cli.command {
        Command::Serve(args) => cmd_serve(args),
        Command::Schema => cmd_schema(),
        Command::Config(args) => cmd_config(args),
    }
}

fn load_config(path: Option<&str>) -> anyhow::Result<ServerConfig> {
    match path {
        Some(path) => ServerConfig::load(path).with_context(|| format!("loading config {path}")),
        None => Ok(ServerConfig::default()),
    }
}

/// Config file first, then command-line overrides.
fn resolve_serve_config(args: &ServeArgs) -> anyhow::Result<ServerConfig> {
    let mut config = load_config(args.config.as_deref())?;
    if let Some(bind) = &args.bind {
        config.bind_addr = bind
            .parse::<SocketAddr>()
            .with_context(|| format!("invalid bind address {bind}"))?;
    }
    if let Some(url) = &args.database_url {
        config.database_url = Some(url.clone());
    }
    if let Some(url) = &args.mirror_url {
        config.mirror.endpoint = url.clone();
    }
    if args.no_mirror {
        config.mirror.enabled = false;
    }
    Ok(config)
}

fn cmd_serve(args: ServeArgs) -> anyhow::Result<()> {
    let config = resolve_serve_config(&args)?;
    tracing::debug!(?config, "resolved configuration");
    let storage = if config.database_url.is_some() { "postgres" } else { "memory" };
    let mirror = if config.mirror.enabled {
        config.mirror.endpoint.clone()
    } else {
        "disabled".to_string()
    };
    println!("{} todo server on {}", "▶".green().bold(), config.bind_addr.to_string().bold());
    println!("  Storage: {}", storage.cyan());
    println!("  Mirror: {}", mirror.blue());

    let runtime = tokio::runtime::Runtime::new().context("starting tokio runtime")?;
    runtime.block_on(TodoServer::new(config).serve())?;
    Ok(())
}

fn cmd_schema() -> anyhow::Result<()> {
    println!("{};", todo_store::postgres::SCHEMA);
    Ok(())
}

fn cmd_config(args: ConfigArgs) -> anyhow::Result<()> {
    let config = load_config(args.config.as_deref())?;
    print!("{}", config.to_toml_string()?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn serve_args() -> ServeArgs {
        ServeArgs {
            config: None,
            bind: None,
            database_url: None,
            mirror_url: None,
            no_mirror: false,
        }
    }

    #[test]
    fn defaults_without_overrides() {
        let config = resolve_serve_config(&serve_args()).unwrap();
        assert_eq!(config, ServerConfig::default());
    }

    #[test]
    fn overrides_apply() {
        let args = ServeArgs {
            bind: Some("0.0.0.0:8080".into()),
            database_url: Some("postgres://localhost/todo".into()),
            mirror_url: Some("http://localhost:9000/post".into()),
            no_mirror: true,
            ..serve_args()
        };
        let config = resolve_serve_config(&args).unwrap();
        assert_eq!(config.bind_addr.port(), 8080);
        assert_eq!(config.database_url.as_deref(), Some("postgres://localhost/todo"));
        assert_eq!(config.mirror.endpoint, "http://localhost:9000/post");
        assert!(!config.mirror.enabled);
    }

    #[test]
    fn bad_bind_address_is_an_error() {
        let args = ServeArgs {
            bind: Some("not-an-address".into()),
            ..serve_args()
        };
        let err = resolve_serve_config(&args).unwrap_err();
        assert!(err.to_string().contains("invalid bind address"));
    }

    #[test]
    fn missing_config_file_is_an_error() {
        let err = load_config(Some("/nonexistent/todo.toml")).unwrap_err();
        assert!(err.to_string().contains("loading config"));
    }
}
