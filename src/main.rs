/*!
# Daybook - A Daily Note-Taking Tool

Daybook keeps one markdown entry per calendar day. The default action opens
today's entry in your editor; flags switch to the calendar picker or the
read-only notebook viewer.

## Usage

```
daybook [OPTIONS]

Options:
  -c, --calendar                Pick a date from the calendar before opening an entry
  -n, --notebook                Browse all entries read-only in the notebook viewer
  -d, --date <DATE>             Opens the entry for a specific date (format: YYYY-MM-DD or YYYYMMDD)
  -v, --verbose                 Enable verbose output
  -h, --help                    Print help information
  -V, --version                 Print version information
```

## Configuration

The application can be configured with the following environment variables:
- `DAYBOOK_EDITOR`, `EDITOR` or `VISUAL`: The editor to use (defaults to "vim")
- `DAYBOOK_DIR`: The directory to store entries (defaults to "~/.daybook")
*/

use daybook::cli::CliArgs;
use daybook::config::Config;
use daybook::editor::{Editor, SystemEditor};
use daybook::errors::{AppError, AppResult};
use daybook::store::{self, EntryStore};
use daybook::tui;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

fn main() {
    if let Err(e) = run() {
        eprintln!("daybook: {}", e);
        std::process::exit(1);
    }
}

/// Coordinates the overall application flow: logging, argument parsing,
/// configuration, storage setup, and dispatch to the requested mode.
fn run() -> AppResult<()> {
    let args = CliArgs::parse();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(if args.verbose { "debug" } else { "warn" })
    });
    // Log to stderr; stdout belongs to the TUI.
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    info!("Starting daybook");
    debug!("CLI arguments: {:?}", args);

    let config = Config::load()?;
    config.validate()?;

    let entry_store = EntryStore::open(&config.notes_dir)?;
    debug!("Storage directory: {:?}", entry_store.root());

    if args.notebook {
        info!("Opening notebook viewer");
        let pages = entry_store.load_all()?;
        return tui::run_notebook(pages);
    }

    let date = if args.calendar {
        let dates = entry_store.list_dates()?;
        let selected = tui::run_calendar(dates)?;
        if selected.is_empty() {
            // Cancelled; nothing was chosen and nothing happens.
            println!("No date selected.");
            return Ok(());
        }
        selected
    } else if let Some(parsed) = args.parse_date() {
        let parsed = parsed
            .map_err(|e| AppError::Config(format!("Invalid date format: {}", e)))?;
        parsed.format(store::DATE_KEY_FORMAT).to_string()
    } else {
        store::today_key()
    };

    edit_entry(&entry_store, &config, &date)
}

/// Opens the entry for `date` in the external editor and saves it back iff
/// the content changed. A failed edit leaves the stored entry untouched.
fn edit_entry(entry_store: &EntryStore, config: &Config, date: &str) -> AppResult<()> {
    let mut entry = entry_store.get_by_date(date)?;

    let editor = SystemEditor::new(config.editor.clone());
    let edited = editor.edit(&entry.content, &format!("{}.md", entry.date))?;

    if edited != entry.content {
        entry.content = edited;
        entry_store.save(&mut entry)?;
        info!(date, "entry saved");
        println!("Entry saved.");
    } else {
        debug!(date, "content unchanged, nothing to save");
    }

    Ok(())
}
