use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

use dioxus::LaunchBuilder;
use dioxus::desktop::{Config as DesktopConfig, WindowBuilder};
use guidance_core::time::Clock;
use services::{AiService, ApiClient, AuthService, PathService, TokenStore};
use tracing_subscriber::EnvFilter;
use ui::{App, UiApp, build_app_context};

#[derive(Debug)]
enum ArgsError {
    MissingValue { flag: &'static str },
    UnknownArg(String),
    InvalidApiBase { raw: String },
}

impl fmt::Display for ArgsError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ArgsError::MissingValue { flag } => write!(f, "{flag} requires a value"),
            ArgsError::UnknownArg(arg) => write!(f, "unknown argument: {arg}"),
            ArgsError::InvalidApiBase { raw } => write!(f, "invalid --api-base value: {raw}"),
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

struct DesktopApp {
    auth: Arc<AuthService>,
    paths: Arc<PathService>,
    ai: Arc<AiService>,
    tokens: Arc<TokenStore>,
    clock: Clock,
}

impl UiApp for DesktopApp {
    fn auth(&self) -> Arc<AuthService> {
        Arc::clone(&self.auth)
    }

    fn paths(&self) -> Arc<PathService> {
        Arc::clone(&self.paths)
    }

    fn ai(&self) -> Arc<AiService> {
        Arc::clone(&self.ai)
    }

    fn tokens(&self) -> Arc<TokenStore> {
        Arc::clone(&self.tokens)
    }

    fn clock(&self) -> Clock {
        self.clock
    }
}

struct Args {
    api_base: String,
    token_file: PathBuf,
}

fn print_usage() {
    eprintln!("Usage:");
    eprintln!("  cargo run -p app -- [--api-base <url>] [--token-file <path>]");
    eprintln!();
    eprintln!("Defaults:");
    eprintln!("  --api-base http://localhost:8080");
    eprintln!("  --token-file <data dir>/career-guidance/cg_token");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CG_API_BASE, CG_TOKEN_FILE");
}

fn default_token_file() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("career-guidance")
        .join("cg_token")
}

impl Args {
    fn parse(args: &mut impl Iterator<Item = String>) -> Result<Self, ArgsError> {
        let mut api_base = std::env::var("CG_API_BASE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .unwrap_or_else(|| "http://localhost:8080".into());
        let mut token_file = std::env::var("CG_TOKEN_FILE")
            .ok()
            .filter(|value| !value.trim().is_empty())
            .map_or_else(default_token_file, PathBuf::from);

        while let Some(arg) = args.next() {
            match arg.as_str() {
                "--api-base" => {
                    let value = require_value(args, "--api-base")?;
                    if value.trim().is_empty() {
                        return Err(ArgsError::InvalidApiBase { raw: value });
                    }
                    api_base = value;
                }
                "--token-file" => {
                    let value = require_value(args, "--token-file")?;
                    token_file = PathBuf::from(value);
                }
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                _ => return Err(ArgsError::UnknownArg(arg)),
            }
        }

        Ok(Self {
            api_base,
            token_file,
        })
    }
}

fn run() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let mut argv = std::env::args().skip(1);
    let parsed = Args::parse(&mut argv).map_err(|e| {
        eprintln!("{e}");
        print_usage();
        e
    })?;

    if let Some(parent) = parsed.token_file.parent() {
        std::fs::create_dir_all(parent)?;
    }

    tracing::info!(api_base = %parsed.api_base, "starting desktop client");

    let tokens = Arc::new(TokenStore::file(parsed.token_file));
    let client = ApiClient::new(parsed.api_base, Arc::clone(&tokens));

    let app = DesktopApp {
        auth: Arc::new(AuthService::new(client.clone())),
        paths: Arc::new(PathService::new(client.clone())),
        ai: Arc::new(AiService::new(client)),
        tokens,
        clock: Clock::default_clock(),
    };

    let context = build_app_context(&(Arc::new(app) as Arc<dyn UiApp>));

    // On macOS, Dioxus/tao can default to an always-on-top window in some dev setups.
    // Explicitly disable it so the app doesn't behave like a modal window.
    let desktop_cfg = DesktopConfig::new().with_window(
        WindowBuilder::new()
            .with_title("Career Guidance")
            .with_always_on_top(false),
    );

    LaunchBuilder::desktop()
        .with_cfg(desktop_cfg)
        .with_context(context)
        .launch(App);
    Ok(())
}

fn main() {
    if let Err(err) = run() {
        // At this layer (binary glue), printing once is fine.
        eprintln!("{err}");
        std::process::exit(2);
    }
}
