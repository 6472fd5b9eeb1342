mod app;
mod calendar;
mod clipboard;
mod colors;
mod config;
mod help;
mod keymap;
mod theme;
use crate::app::App;
use crate::calendar::{LocalClock, Navigator, Outcome, WeekdayConvention};
use crate::colors::DateColors;
use crate::config::OutputFormat;
use crate::keymap::KeyMap;
use anyhow::Context;
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use lexopt::{Arg, Parser, ValueExt};
use ratatui::{backend::CrosstermBackend, Terminal};
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;
use std::io::{self, IsTerminal, Stderr};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use time::{format_description::BorrowedFormatItem, macros::format_description, Date};

static YMD_FMT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

const LOG_LEVEL: LevelFilter = if cfg!(debug_assertions) {
    LevelFilter::Debug
} else {
    LevelFilter::Info
};

/// Exit status when the user quits without selecting a date
const CANCELLED_STATUS: u8 = 1;

/// Exit status for usage, input, and terminal errors
const ERROR_STATUS: u8 = 2;

type CrosstermTerminal = Terminal<CrosstermBackend<Stderr>>;

#[derive(Clone, Debug, Eq, PartialEq)]
enum Command {
    Run(Options),
    Help,
    Version,
}

#[derive(Clone, Debug, Eq, PartialEq)]
struct Options {
    date: Option<Date>,
    convention: WeekdayConvention,
    format: OutputFormat,
    copy: bool,
    log_file: Option<PathBuf>,
}

impl Command {
    fn from_parser(mut parser: Parser) -> Result<Command, lexopt::Error> {
        let mut date = None;
        let mut convention = WeekdayConvention::default();
        let mut format = OutputFormat::default();
        let mut copy = true;
        let mut log_file = None;
        while let Some(arg) = parser.next()? {
            match arg {
                Arg::Short('h') | Arg::Long("help") => return Ok(Command::Help),
                Arg::Short('V') | Arg::Long("version") => return Ok(Command::Version),
                Arg::Short('w') | Arg::Long("first-weekday") => {
                    convention = parser.value()?.parse()?;
                }
                Arg::Short('f') | Arg::Long("format") => format = parser.value()?.parse()?,
                Arg::Long("no-copy") => copy = false,
                Arg::Long("log-file") => log_file = Some(PathBuf::from(parser.value()?)),
                Arg::Value(value) if date.is_none() => {
                    let value = value.string()?;
                    match Date::parse(&value, &YMD_FMT) {
                        Ok(d) => date = Some(d),
                        Err(e) => {
                            return Err(lexopt::Error::ParsingFailed {
                                value,
                                error: Box::new(e),
                            })
                        }
                    }
                }
                _ => return Err(arg.unexpected()),
            }
        }
        Ok(Command::Run(Options {
            date,
            convention,
            format,
            copy,
            log_file,
        }))
    }

    fn run(self) -> anyhow::Result<ExitCode> {
        match self {
            Command::Run(opts) => opts.run(),
            Command::Help => {
                println!("Usage: datepick [OPTIONS] [YYYY-MM-DD]");
                println!();
                println!("Pick a date from a terminal calendar and print it");
                println!();
                println!("Options:");
                println!("  -w, --first-weekday <mo|su>");
                println!("                    Start weeks on Monday or Sunday [default: mo]");
                println!("  -f, --format <FORMAT>");
                println!("                    Output format, e.g. yyyy-mm-dd, \"F j, Y\", or a");
                println!("                    format description like [year].[month]");
                println!("                    [default: yyyy/mm/dd]");
                println!("      --no-copy     Don't copy the selected date to the clipboard");
                println!("      --log-file <PATH>");
                println!("                    Write logs to the given file");
                println!("  -h, --help        Display this help message and exit");
                println!("  -V, --version     Show the program version and exit");
                println!();
                println!("Dates can be colored by piping a line like");
                println!("\"red:2024/02/14,2024/02/15;#ff8800:2024/03/01\" to stdin.");
                Ok(ExitCode::SUCCESS)
            }
            Command::Version => {
                println!("{} {}", env!("CARGO_PKG_NAME"), env!("CARGO_PKG_VERSION"));
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

impl Options {
    fn run(self) -> anyhow::Result<ExitCode> {
        // Determine the local offset before anything else can spawn threads
        let clock = LocalClock::new().context("failed to determine local time zone")?;
        if let Some(path) = self.log_file.as_deref() {
            init_logging(path)?;
        }
        log::debug!(
            "Starting with convention {:?}, format {:?}, copy {}",
            self.convention,
            self.format,
            self.copy
        );
        let colors = read_colors()?;
        log::debug!("Read {} color annotations", colors.len());
        let mut navigator = Navigator::new(self.convention, clock);
        if let Some(date) = self.date {
            navigator = navigator.start_date(date);
        }
        let app = App::new(navigator, KeyMap::default(), colors);
        let outcome = with_terminal(|terminal| app.run(terminal).context("terminal I/O failed"))?;
        if let Outcome::Selected(date) = outcome {
            let s = self
                .format
                .format(date)
                .with_context(|| format!("failed to format {date}"))?;
            if self.copy {
                clipboard::copy(io::stderr(), &s).context("failed to copy date to clipboard")?;
            }
            println!("{s}");
            Ok(ExitCode::SUCCESS)
        } else {
            Ok(ExitCode::from(CANCELLED_STATUS))
        }
    }
}

fn main() -> ExitCode {
    match Command::from_parser(Parser::from_env())
        .map_err(anyhow::Error::from)
        .and_then(Command::run)
    {
        Ok(status) => status,
        Err(e) => {
            eprintln!("Error: {e:?}");
            ExitCode::from(ERROR_STATUS)
        }
    }
}

fn init_logging(path: &Path) -> anyhow::Result<()> {
    let file = File::create(path)
        .with_context(|| format!("failed to create log file {}", path.display()))?;
    let config = ConfigBuilder::new().set_time_format_rfc3339().build();
    WriteLogger::init(LOG_LEVEL, config, file).context("failed to initialize logger")?;
    Ok(())
}

/// Read color annotations from stdin if something was piped in
fn read_colors() -> anyhow::Result<DateColors> {
    let stdin = io::stdin();
    if stdin.is_terminal() {
        return Ok(DateColors::default());
    }
    DateColors::from_reader(stdin.lock()).context("invalid color annotations on stdin")
}

// The calendar is drawn on stderr so that stdout can be captured
fn with_terminal<F, T>(func: F) -> anyhow::Result<T>
where
    F: FnOnce(&mut CrosstermTerminal) -> anyhow::Result<T>,
{
    let mut terminal = init_terminal().context("failed to set up terminal")?;
    let r = func(&mut terminal);
    let restored = restore_terminal(&mut terminal).context("failed to restore terminal");
    let value = r?;
    restored?;
    Ok(value)
}

fn init_terminal() -> io::Result<CrosstermTerminal> {
    let hook = std::panic::take_hook();
    std::panic::set_hook(Box::new(move |info| {
        let _ = disable_raw_mode();
        let _ = execute!(io::stderr(), LeaveAlternateScreen);
        hook(info);
    }));
    enable_raw_mode()?;
    execute!(io::stderr(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(io::stderr()))?;
    terminal.hide_cursor()?;
    terminal.clear()?;
    Ok(terminal)
}

fn restore_terminal(terminal: &mut CrosstermTerminal) -> io::Result<()> {
    disable_raw_mode()?;
    execute!(io::stderr(), LeaveAlternateScreen)?;
    terminal.show_cursor()
}
