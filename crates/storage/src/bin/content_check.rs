use std::fmt;
use std::path::PathBuf;

use storage::ContentDirRepository;
use storage::audit::audit_content;

#[derive(Debug, Clone)]
struct Args {
    content_dir: PathBuf,
}

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidContentDir { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidContentDir { raw } => write!(f, "invalid --content value: {raw}"),
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

impl Args {
    fn parse() -> Result<Self, ArgsError> {
        let mut content_dir = std::env::var("AULA_CONTENT_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("content"));

        let mut args = std::env::args().skip(1);
        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--content" => {
                    let value = require_value(&mut args, "--content")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidContentDir { raw: value });
                    }
                    content_dir = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self { content_dir })
    }
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p storage --bin content_check -- [options]");
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --content <dir>           Content directory (default: content)");
    eprintln!("  -h, --help                Show this help");
    eprintln!();
    eprintln!("Environment (same as flags):");
    eprintln!("  AULA_CONTENT_DIR");
}

async fn run() -> Result<bool, Box<dyn std::error::Error>> {
    let args = Args::parse().map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    let repo = ContentDirRepository::new(&args.content_dir);
    let report = audit_content(&repo, &repo).await?;

    for issue in &report.issues {
        println!("{issue}");
    }
    println!(
        "Checked {} lessons and {} exercises in {}: {} issues",
        report.lessons_checked,
        report.exercises_checked,
        args.content_dir.display(),
        report.issues.len()
    );

    Ok(report.is_clean())
}

#[tokio::main]
async fn main() {
    match run().await {
        Ok(true) => {}
        Ok(false) => std::process::exit(1),
        Err(err) => {
            eprintln!("{err}");
            std::process::exit(2);
        }
    }
}
