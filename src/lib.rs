/*!
# Daybook

Daybook is a simple daily note-taking tool: one markdown entry per calendar
day, stored as plain files, edited in your own editor, and browsable from the
terminal.

## Core Features

- Open and edit today's entry (or any specific date's)
- Pick a past date from an interactive calendar
- Browse all entries read-only in a paginated notebook viewer
- Customizable editor and storage directory

## Architecture

The codebase follows a modular architecture with clear separation of concerns:

- `cli`: Command-line interface handling using clap
- `config`: Configuration loading and validation
- `errors`: Error handling infrastructure
- `store`: Date-keyed entry storage
- `editor`: External editor invocation
- `markdown`: Markdown-to-terminal rendering
- `tui`: Calendar picker and notebook viewer

## Usage Example

```rust,no_run
use daybook::{Config, EntryStore};

fn main() -> daybook::AppResult<()> {
    let config = Config::load()?;
    let store = EntryStore::open(&config.notes_dir)?;

    let entry = store.get_today()?;
    println!("{}", entry.content);
    Ok(())
}
```
*/

/// Command-line interface for parsing and handling user arguments
pub mod cli;
/// Configuration loading and management
pub mod config;
/// External editor invocation
pub mod editor;
/// Error types and utilities for error handling
pub mod errors;
/// Markdown-to-terminal rendering
pub mod markdown;
/// Date-keyed entry storage
pub mod store;
/// Terminal user interfaces (calendar picker, notebook viewer)
pub mod tui;

// Re-export important types for convenience
pub use cli::CliArgs;
pub use config::Config;
pub use errors::{AppError, AppResult};
pub use store::{Entry, EntryStore};
