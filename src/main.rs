//! querylens - print a query or JSON result with syntax highlighting

use std::env;
use std::fs;
use std::io::{self, Read};
use std::path::PathBuf;
use std::process;

use crossterm::tty::IsTty;

use querylens::error::{LensError, Result};
use querylens::surface::LayoutProps;
use querylens::{logging, Config, HighlightLanguage, TerminalRenderer, TextBuffer, TextSurface, Theme, ThemeNotifier};

/// Parsed command line
#[derive(Debug, Default)]
struct Options {
    language: Option<HighlightLanguage>,
    theme: Option<Theme>,
    wrap_width: Option<usize>,
    file: Option<PathBuf>,
}

fn main() {
    logging::init();
    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

fn run() -> Result<()> {
    let args: Vec<String> = env::args().skip(1).collect();

    // Handle --help and --version
    if let Some(first) = args.first() {
        match first.as_str() {
            "--help" | "-h" => {
                print_usage();
                return Ok(());
            }
            "--version" | "-V" => {
                print_version();
                return Ok(());
            }
            _ => {}
        }
    }

    let options = parse_args(&args)?;
    let config = Config::load();

    let text = match &options.file {
        Some(path) => fs::read_to_string(path)?,
        None => {
            let mut text = String::new();
            io::stdin().read_to_string(&mut text)?;
            text
        }
    };

    let language = options.language.unwrap_or_else(|| {
        options
            .file
            .as_deref()
            .map_or(HighlightLanguage::Sql, HighlightLanguage::detect)
    });
    let theme = options.theme.unwrap_or(config.theme);
    let wrap_width = options.wrap_width.unwrap_or(config.wrap_width);

    let stdout = io::stdout();
    let ansi = stdout.is_tty();
    let renderer = TerminalRenderer::new(stdout, wrap_width)
        .with_ansi(ansi)
        .with_auto_present(false);

    let notifier = ThemeNotifier::new(theme);
    let surface = TextSurface::new(TextBuffer::new(), renderer, &notifier)?;
    surface.set_layout(output_layout(&config, ansi))?;
    if let Some(color) = config.plain_text_color {
        surface.set_plain_text_color(color)?;
    }
    surface.set_language(language)?;

    surface.set_text(text.trim_end_matches('\n'))?;
    surface.with_rendered(|renderer| renderer.present())?;
    println!();

    surface.dispose();
    Ok(())
}

fn parse_args(args: &[String]) -> Result<Options> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--sql" => options.language = Some(HighlightLanguage::Sql),
            "--json" => options.language = Some(HighlightLanguage::Json),
            "--plain" => options.language = Some(HighlightLanguage::PlainText),
            "--dark" => options.theme = Some(Theme::Dark),
            "--light" => options.theme = Some(Theme::Light),
            "--width" | "-w" => {
                let value = iter
                    .next()
                    .ok_or_else(|| LensError::Message(format!("{arg} needs a value")))?;
                let width = value
                    .parse::<usize>()
                    .map_err(|_| LensError::Message(format!("invalid width: {value}")))?;
                options.wrap_width = Some(width);
            }
            other if other.starts_with('-') && other != "-" => {
                return Err(LensError::Message(format!("unknown option: {other}")));
            }
            "-" => options.file = None,
            path => options.file = Some(PathBuf::from(path)),
        }
    }

    Ok(options)
}

/// Layout for the terminal; piped output gets no margin
fn output_layout(config: &Config, tty: bool) -> LayoutProps {
    let mut layout = config.layout.clone();
    if !tty {
        layout.padding = 0;
    }
    layout
}

fn print_usage() {
    println!("querylens {} - highlight queries and JSON results", env!("CARGO_PKG_VERSION"));
    println!();
    println!("Usage: querylens [OPTIONS] [FILE]");
    println!();
    println!("Reads FILE, or standard input when FILE is absent or '-'.");
    println!();
    println!("Options:");
    println!("  --sql          Highlight as a query (default for stdin)");
    println!("  --json         Pretty-print and highlight as JSON");
    println!("  --plain        No highlighting");
    println!("  --dark         Use the dark palette");
    println!("  --light        Use the light palette");
    println!("  -w, --width N  Wrap output at N columns (0 = no wrap)");
    println!("  -h, --help     Show this help message");
    println!("  -V, --version  Show version information");
    println!();
    println!("Settings are read from ~/.querylens.toml; set RUST_LOG=debug for diagnostics.");
}

fn print_version() {
    println!("querylens {}", env!("CARGO_PKG_VERSION"));
}
