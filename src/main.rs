use std::fs::OpenOptions;
use std::io;
use std::path::PathBuf;
use std::sync::Mutex;
use std::time::Duration;

use anyhow::Context;
use clap::Parser;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::backend::CrosstermBackend;
use ratatui::Terminal;
use ratatui_image::picker::Picker;
use tracing_subscriber::{layer::SubscriberExt as _, util::SubscriberInitExt as _, EnvFilter};

use simucolormix::persistence;
use simucolormix::picture::{load_image, Selection};
use simucolormix::report::MixReport;
use simucolormix::tui::app::App;
use simucolormix::tui::event::{poll_event, AppEvent};

/// Pick a pixel from an image and simulate RGB pump mixing for its color.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// JPEG or PNG image to open
    image: Option<PathBuf>,

    /// X coordinate (clamped to the image width)
    #[arg(short = 'x', long)]
    x: Option<u32>,

    /// Y coordinate (clamped to the image height)
    #[arg(short = 'y', long)]
    y: Option<u32>,

    /// Print the mix report and exit instead of starting the interactive view
    #[arg(long, requires = "image")]
    print: bool,

    /// With --print, emit JSON
    #[arg(long, requires = "print")]
    json: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = persistence::config::load_config();

    if cli.print {
        init_logging(None);
        return print_report(&cli, config.default_coordinate);
    }

    init_logging(persistence::data_dir().map(|d| d.join("simucolormix.log")));

    // Query terminal for image protocol support BEFORE entering alternate screen
    let picker = Picker::from_query_stdio().ok();
    tracing::info!(graphics = picker.is_some(), "starting interactive view");

    let recent = persistence::recent::load_recent();
    let mut app = App::new(picker, recent, config).with_recent_file(persistence::recent::recent_path());
    if let Some(path) = &cli.image {
        if app.open(path) {
            if let Some(loaded) = &app.loaded {
                let x = cli.x.unwrap_or(loaded.selection.x());
                let y = cli.y.unwrap_or(loaded.selection.y());
                app.select(x, y);
            }
        }
    }

    // Set up terminal
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run app
    let result = run_app(&mut terminal, &mut app);

    // Restore terminal
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(err) = &result {
        tracing::error!(error = %err, "interactive view failed");
    }
    result
}

/// Log to `file` when given (the terminal belongs to the UI), otherwise to stderr.
fn init_logging(file: Option<PathBuf>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("simucolormix=info"));
    let registry = tracing_subscriber::registry().with(filter);

    let log_file = file.and_then(|path| OpenOptions::new().create(true).append(true).open(path).ok());
    match log_file {
        Some(f) => registry
            .with(tracing_subscriber::fmt::layer().with_ansi(false).with_writer(Mutex::new(f)))
            .init(),
        None => registry
            .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
            .init(),
    }
}

fn print_report(cli: &Cli, default_coordinate: u32) -> anyhow::Result<()> {
    let path = cli.image.as_ref().context("--print needs an image")?;
    let image = load_image(path).with_context(|| format!("loading {}", path.display()))?;

    let (w, h) = image.dimensions();
    let mut selection = Selection::for_dimensions(w, h, default_coordinate);
    if let Some(x) = cli.x {
        selection.set_x(x);
    }
    if let Some(y) = cli.y {
        selection.set_y(y);
    }

    let color = image
        .pixel_at(selection.x(), selection.y())
        .context("selected pixel outside the image")?;
    let report = MixReport::new(selection.x(), selection.y(), color);

    if cli.json {
        println!("{}", report.to_json()?);
    } else {
        println!("{}", report.to_text());
    }
    Ok(())
}

fn run_app(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, app: &mut App) -> anyhow::Result<()> {
    loop {
        terminal.draw(|frame| app.render(frame))?;

        if let Some(event) = poll_event(Duration::from_millis(50)) {
            match event {
                AppEvent::Key(key) => {
                    app.handle_key(key);
                }
                AppEvent::Resize(_, _) => {
                    // Terminal will auto-redraw
                }
                AppEvent::Tick => {}
            }
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}
