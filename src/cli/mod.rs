use chrono::NaiveDate;
use clap::Parser;

/// A daily note-taking tool
#[derive(Parser, Debug)]
#[clap(name = "daybook", about = "A daily note-taking tool")]
#[clap(author, version, long_about = None)]
pub struct CliArgs {
    /// Pick a date from the calendar before opening an entry
    #[clap(short = 'c', long, conflicts_with_all = &["notebook", "date"])]
    pub calendar: bool,

    /// Browse all entries read-only in the notebook viewer
    #[clap(short = 'n', long, conflicts_with_all = &["calendar", "date"])]
    pub notebook: bool,

    /// Opens the entry for a specific date (format: YYYY-MM-DD or YYYYMMDD)
    #[clap(short = 'd', long, conflicts_with_all = &["calendar", "notebook"])]
    pub date: Option<String>,

    /// Print verbose output
    #[clap(short = 'v', long)]
    pub verbose: bool,
}

impl CliArgs {
    /// Parse command-line arguments
    pub fn parse() -> Self {
        CliArgs::parse_from(std::env::args())
    }

    /// Get the date if specified, parsing it into a NaiveDate
    pub fn parse_date(&self) -> Option<Result<NaiveDate, chrono::ParseError>> {
        self.date.as_ref().map(|date_str| {
            // Try parsing in YYYY-MM-DD format first
            NaiveDate::parse_from_str(date_str, "%Y-%m-%d")
                .or_else(|_| NaiveDate::parse_from_str(date_str, "%Y%m%d"))
        })
    }
}
