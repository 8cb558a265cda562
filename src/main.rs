use bloghub::adapters::{FileStorage, ReqwestHttpClient};
use bloghub::api::{ApiClient, AuthApi, ContentApi};
use bloghub::app::{App, AppMessage, Route};
use bloghub::config::ClientConfig;
use bloghub::session::SessionStore;
use bloghub::terminal::{setup_panic_hook, TerminalManager};
use bloghub::traits::KeyValueStore;
use bloghub::{logging, ui};

use color_eyre::eyre::{eyre, WrapErr};
use color_eyre::Result;
use crossterm::event::{Event, EventStream, KeyEventKind};
use futures::StreamExt;
use ratatui::Terminal;
use std::path::PathBuf;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::info;

const VERSION: &str = env!("CARGO_PKG_VERSION");

const USAGE: &str = "Usage: bloghub [--api-url <url>] [--log-file <path>] [--open <path>] [--version]";

/// Command-line overrides, applied on top of `ClientConfig::from_env()`.
#[derive(Debug, Default, PartialEq)]
struct Flags {
    api_url: Option<String>,
    log_file: Option<PathBuf>,
    /// Initial route as a web path, e.g. `/blog/hello-world`
    open: Option<Route>,
}

fn parse_flags(args: impl IntoIterator<Item = String>) -> Result<Flags> {
    let mut flags = Flags::default();
    let mut args = args.into_iter();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--api-url" => {
                flags.api_url = Some(args.next().ok_or_else(|| eyre!("--api-url needs a value\n{}", USAGE))?);
            }
            "--log-file" => {
                let path = args.next().ok_or_else(|| eyre!("--log-file needs a value\n{}", USAGE))?;
                flags.log_file = Some(PathBuf::from(path));
            }
            "--open" => {
                let path = args.next().ok_or_else(|| eyre!("--open needs a value\n{}", USAGE))?;
                let route = Route::from_path(&path).ok_or_else(|| eyre!("Unknown route: {}", path))?;
                flags.open = Some(route);
            }
            other => return Err(eyre!("Unknown argument: {}\n{}", other, USAGE)),
        }
    }
    Ok(flags)
}

fn build_config(flags: &Flags) -> ClientConfig {
    let mut config = ClientConfig::from_env();
    if let Some(url) = &flags.api_url {
        config = config.with_api_url(url.as_str());
    }
    if let Some(path) = &flags.log_file {
        config = config.with_log_file(path);
    }
    config
}

fn main() -> Result<()> {
    // Handle --version flag before any initialization
    if std::env::args().any(|arg| arg == "--version") {
        println!("bloghub {}", VERSION);
        std::process::exit(0);
    }

    color_eyre::install()?;

    let flags = parse_flags(std::env::args().skip(1))?;
    let config = build_config(&flags);
    let log_path = logging::init(&config).wrap_err("Failed to initialize logging")?;
    info!(version = VERSION, api = %config.api_url, log = %log_path.display(), "Starting BlogHub");

    // Setup panic hook to ensure terminal cleanup on panic
    setup_panic_hook();

    let runtime = tokio::runtime::Runtime::new()?;

    // Explicit dependency graph: one storage, one HTTP client, one session.
    let storage: Arc<dyn KeyValueStore> = Arc::new(FileStorage::at(config.storage_path()));
    let http = Arc::new(ReqwestHttpClient::new());
    let client = Arc::new(ApiClient::new(config.api_url.clone(), http, Arc::clone(&storage)));
    let content = Arc::new(ContentApi::new(Arc::clone(&client)));
    let session = Arc::new(SessionStore::restore(AuthApi::new(client), storage));

    let mut manager = TerminalManager::new()?;
    let result = runtime.block_on(async {
        let mut app = App::new(config, content, session);
        app.start(flags.open.unwrap_or_default());
        run_app(manager.terminal(), &mut app).await
    });

    manager.restore()?;
    info!("Exiting");
    result
}

async fn run_app<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<()>
where
    B::Error: Send + Sync + 'static,
{
    let mut event_stream = EventStream::new();

    // Take the message receiver from the app (we need ownership for select!)
    let mut message_rx: Option<mpsc::UnboundedReceiver<AppMessage>> = app.message_rx.take();

    loop {
        if app.needs_redraw {
            terminal.draw(|f| ui::render(f, app))?;
            app.needs_redraw = false;
        }

        // 16ms tick keeps spinners moving while something loads
        let timeout = tokio::time::sleep(std::time::Duration::from_millis(16));

        tokio::select! {
            _ = timeout => {
                app.tick();
            }

            event_result = event_stream.next() => {
                match event_result {
                    Some(Ok(Event::Key(key))) if key.kind == KeyEventKind::Press => {
                        app.handle_key(key);
                    }
                    Some(Ok(Event::Paste(text))) => app.handle_paste(&text),
                    Some(Ok(Event::Resize(_, _))) => app.mark_dirty(),
                    Some(Ok(_)) => {}
                    Some(Err(e)) => return Err(e).wrap_err("Failed to read terminal event"),
                    None => return Ok(()),
                }
            }

            msg = async {
                match &mut message_rx {
                    Some(rx) => rx.recv().await,
                    None => std::future::pending().await,
                }
            } => {
                if let Some(msg) = msg {
                    app.handle_message(msg);
                }
            }
        }

        if app.should_quit {
            return Ok(());
        }
    }
}
