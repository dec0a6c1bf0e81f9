//! Output routing: JSON, plain records, or tables.

use clap::ValueEnum;

/// Layouts accepted by `--format` on listing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ListFormat {
    /// Tables and badges when stdout is a terminal
    Table,
    /// One tab-separated record per line
    Plain,
}

/// How a command writes its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputMode {
    /// A single JSON document on stdout
    Json,
    /// `key=value` receipts and tab-separated records
    #[default]
    Plain,
    /// Tables, badges and hints
    Pretty,
}

impl OutputMode {
    /// Pick the mode for one command.
    ///
    /// `--json` wins over `--format`. `--format plain` forces records even on
    /// a terminal. Pretty output needs a terminal stdout that is not
    /// `TERM=dumb`, so `--format table` into a pipe still prints records.
    pub fn resolve(
        json: bool,
        format: Option<ListFormat>,
        stdout_tty: bool,
        term_is_dumb: bool,
    ) -> Self {
        match (json, format) {
            (true, _) => Self::Json,
            (false, Some(ListFormat::Plain)) => Self::Plain,
            _ if stdout_tty && !term_is_dumb => Self::Pretty,
            _ => Self::Plain,
        }
    }

    pub fn is_json(&self) -> bool {
        matches!(self, Self::Json)
    }

    pub fn is_pretty(&self) -> bool {
        matches!(self, Self::Pretty)
    }
}
