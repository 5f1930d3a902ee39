use std::fmt;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use services::{AppConfig, AppServices, Clock};
use tracing::info;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidDbUrl { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidDbUrl { raw } => write!(f, "invalid --db value: {raw}"),
        }
    }
}

impl std::error::Error for ArgsError {}

fn require_value(
    args: &mut impl Iterator<Item = String>,
    flag: &'static str,
) -> Result<String, ArgsError> {
    args.next().ok_or(ArgsError::MissingValue { flag })
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--content <dir>] [--db <sqlite_url>] [--api <base_url>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --content content");
    eprintln!("  --db sqlite://aula.sqlite3");
    eprintln!("  --api http://localhost:8000");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  AULA_CONTENT_DIR, AULA_DB_URL, AULA_API_BASE_URL, RUST_LOG");
}

/// Flags override whatever `AppConfig::from_env` picked up.
fn parse_args(
    mut config: AppConfig,
    args: &mut impl Iterator<Item = String>,
) -> Result<Option<AppConfig>, Box<dyn std::error::Error>> {
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--content" => {
                config = config.with_content_dir(require_value(args, "--content")?);
            }
            "--db" => {
                let value = require_value(args, "--db")?;
                if value.trim().is_empty() {
                    return Err(ArgsError::InvalidDbUrl { raw: value }.into());
                }
                config = config.with_db_url(&normalize_sqlite_url(value))?;
            }
            "--api" => {
                let value = require_value(args, "--api")?;
                config = config.with_api_base_url(&value)?;
            }
            "--help" | "-h" => return Ok(None),
            _ => return Err(ArgsError::UnknownArg(arg).into()),
        }
    }
    Ok(Some(config))
}

fn normalize_sqlite_url(raw: String) -> String {
    if raw == "sqlite::memory:" || raw.starts_with("sqlite://") {
        return raw;
    }

    let trimmed = raw.trim().to_string();
    let path_str = trimmed
        .strip_prefix("sqlite:")
        .unwrap_or(trimmed.as_str())
        .to_string();
    let path = std::path::Path::new(&path_str);
    let absolute = if path.is_absolute() {
        path.to_path_buf()
    } else {
        std::env::current_dir()
            .unwrap_or_else(|_| std::path::PathBuf::from("."))
            .join(path)
    };
    format!("sqlite://{}", absolute.display())
}

fn prepare_sqlite_file(db_url: &str) -> Result<(), Box<dyn std::error::Error>> {
    if db_url == "sqlite::memory:" {
        return Ok(());
    }

    let path = db_url
        .strip_prefix("sqlite://")
        .ok_or_else(|| ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        })?;
    let path = path.split('?').next().unwrap_or(path);
    if path.is_empty() {
        return Err(ArgsError::InvalidDbUrl {
            raw: db_url.to_string(),
        }
        .into());
    }

    let path = std::path::Path::new(path);
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }

    if !path.exists() {
        std::fs::OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(false)
            .open(path)?;
    }

    Ok(())
}

async fn run() -> Result<(), Box<dyn std::error::Error>> {
    let env_config = AppConfig::from_env()?;
    let mut args = std::env::args().skip(1);
    let config = match parse_args(env_config, &mut args) {
        Ok(Some(config)) => config,
        Ok(None) => {
            print_usage();
            return Ok(());
        }
        Err(err) => {
            eprintln!("{err}");
            print_usage();
            return Err(err);
        }
    };

    // Open + migrate SQLite at startup. Keep this in the binary glue so core/services stay pure.
    prepare_sqlite_file(&config.db_url)?;
    let services = AppServices::from_config(&config, Clock::default()).await?;
    info!(
        content = %config.content_dir.display(),
        db = %config.db_url,
        api = %config.api_base_url,
        "starting"
    );

    let app: Arc<dyn UiApp> = Arc::new(services);
    let context = build_app_context(&app);

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Aula")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                tracing_subscriber::EnvFilter::new("app=info,services=info,storage=info,ui=info")
            }),
        )
        .init();

    if let Err(err) = run().await {
        eprintln!("{err}");
        std::process::exit(2);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn defaults() -> AppConfig {
        AppConfig::from_lookup(|_| None).unwrap()
    }

    fn args(list: &[&str]) -> impl Iterator<Item = String> {
        list.iter().map(|s| (*s).to_owned()).collect::<Vec<_>>().into_iter()
    }

    #[test]
    fn flags_override_environment() {
        let config = parse_args(
            defaults(),
            &mut args(&["--content", "/srv/lessons", "--api", "http://10.0.0.2:8000"]),
        )
        .unwrap()
        .unwrap();
        assert_eq!(config.content_dir, std::path::PathBuf::from("/srv/lessons"));
        assert_eq!(config.api_base_url.as_str(), "http://10.0.0.2:8000/");
    }

    #[test]
    fn relative_db_paths_become_absolute() {
        let url = normalize_sqlite_url("sqlite:data/aula.db".into());
        assert!(url.starts_with("sqlite:///"), "{url}");
        assert!(url.ends_with("data/aula.db"));
        assert_eq!(normalize_sqlite_url("sqlite::memory:".into()), "sqlite::memory:");
    }

    #[test]
    fn unknown_flags_are_rejected() {
        assert!(parse_args(defaults(), &mut args(&["--deck-id", "1"])).is_err());
        assert!(parse_args(defaults(), &mut args(&["--help"])).unwrap().is_none());
    }
}
