//! Command-line interface.
//!
//! Without `--sort` the table opens in the interactive view. With one or more
//! `--sort N` flags the activations run headless, in order, and the resulting
//! table is printed on stdout.

use std::path::{Path, PathBuf};

use clap::Parser;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::{AppError, Result};
use crate::sort::{Activation, SortDirection, SortOptions, TableSorter};
use crate::table::{self, TableDocument};

/// tablesort - click-to-sort tables in the terminal
#[derive(Debug, Parser)]
#[command(name = "tablesort")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Table document (.json, .toml, or delimited text)
    pub file: PathBuf,

    /// Class prefix for sort-method tokens
    #[arg(long)]
    pub prefix: Option<String>,

    /// Direction a column takes on its first activation
    #[arg(long, value_parser = parse_direction)]
    pub order: Option<SortDirection>,

    /// Column to sort right after loading (0-based)
    #[arg(long)]
    pub auto_sort: Option<usize>,

    /// Column that never sorts; negative values count from the end
    #[arg(long = "exclude", allow_negative_numbers = true)]
    pub exclude: Vec<isize>,

    /// Promote the first row to the header
    #[arg(long)]
    pub fix_head: bool,

    /// Activate a header column (0-based) without opening the view; repeatable
    #[arg(long = "sort")]
    pub sort: Vec<usize>,

    /// Print the headless result as JSON
    #[arg(long, requires = "sort")]
    pub json: bool,

    /// Configuration file to use instead of the default location
    #[arg(long)]
    pub config: Option<PathBuf>,
}

impl Cli {
    /// Whether to run without the interactive view.
    pub fn is_headless(&self) -> bool {
        !self.sort.is_empty()
    }

    /// Load the configuration file named on the command line, or the default.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed or validated.
    pub fn load_config(&self) -> Result<Config> {
        let config = match &self.config {
            Some(path) => Config::load_from(path)?,
            None => Config::load()?,
        };
        config.validate()?;
        Ok(config)
    }

    /// Layer the command-line flags over the configured sort options.
    pub fn sort_options(&self, base: &SortOptions) -> SortOptions {
        let mut options = base.clone();
        if let Some(prefix) = &self.prefix {
            options.prefix = prefix.clone();
        }
        if let Some(order) = self.order {
            options.order = order;
        }
        if self.auto_sort.is_some() {
            options.auto_sort = self.auto_sort;
        }
        if !self.exclude.is_empty() {
            options.exclude_sort_columns = self.exclude.clone();
        }
        if self.fix_head {
            options.fix_table_head = true;
        }
        options.normalized()
    }

    /// Title for the interactive view.
    pub fn title(&self) -> String {
        title_for(&self.file)
    }
}

fn parse_direction(value: &str) -> std::result::Result<SortDirection, String> {
    value.parse()
}

fn title_for(path: &Path) -> String {
    path.file_name()
        .map_or_else(|| path.display().to_string(), |n| n.to_string_lossy().into_owned())
}

/// Load the document and bind a sorter with the given options.
///
/// # Errors
///
/// Returns an error if the document cannot be loaded or the options are
/// rejected by the sorter.
pub fn open(path: &Path, options: SortOptions) -> Result<TableSorter> {
    let table = table::load(path)?;
    debug!(path = %path.display(), rows = table.len(), "Loaded table");
    Ok(TableSorter::initialize(table, options)?)
}

/// Run the `--sort` activations and format the result.
///
/// Ignored activations are logged and skipped. An unknown sort method aborts
/// the run, since nothing would be sorted.
///
/// # Errors
///
/// Returns the first [`SortError`](crate::sort::SortError) raised, or a JSON
/// serialization error.
pub fn run_headless(mut sorter: TableSorter, columns: &[usize], json: bool) -> Result<String> {
    for &column in columns {
        match sorter.activate(column)? {
            Activation::Sorted { column, direction } => {
                debug!(column, %direction, "Headless activation");
            }
            Activation::Ignored(reason) => {
                warn!(column, ?reason, "Activation ignored");
            }
        }
    }

    if json {
        let document = TableDocument::from_table(sorter.table());
        serde_json::to_string_pretty(&document)
            .map_err(|e| AppError::Table(table::TableError::Json(e)))
    } else {
        Ok(table::render_plain(sorter.table(), &sorter.options().prefix))
    }
}
