use clap::{Args, Parser, Subcommand};
use dialoguer::{Input, Select};
use show_finder::{
    Outcome, Page, SearchWidget, ShowFinderError, TvMazeDirectory, export_page,
    search_and_render,
};
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;
use url::Url;

/// Search the TVMaze show directory and browse episode lists
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Search once and print the matching shows
    Search {
        /// The show title to search for
        query: String,

        /// List the episodes of the show at this position (1-based)
        #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
        episodes: Option<u32>,

        #[command(flatten)]
        common: CommonArgs,
    },

    /// Search repeatedly and pick shows to list their episodes
    Interactive {
        #[command(flatten)]
        common: CommonArgs,
    },
}

#[derive(Debug, Args)]
struct CommonArgs {
    /// Write the rendered page as an HTML document to this path
    #[arg(long, value_name = "PATH")]
    html: Option<PathBuf>,

    /// Base URL of the directory API
    #[arg(long, value_name = "URL", default_value = "https://api.tvmaze.com")]
    base_url: Url,
}

/// Installs the tracing subscriber, logging to stderr
///
/// `RUST_LOG` takes precedence over the verbosity flag.
fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();
}

/// Prints the show cards and the episode list of a page to stdout
fn print_page(page: &Page) {
    if page.shows.is_empty() {
        println!("No shows found.");
        return;
    }

    for (index, card) in page.shows.cards().iter().enumerate() {
        let show = card.show();
        println!("[{}] {} (id {})", index + 1, show.name, show.id);
        let summary = nanohtml2text::html2text(&show.summary);
        let summary = summary.trim();
        if !summary.is_empty() {
            println!("    {}", summary.replace('\n', "\n    "));
        }
        println!("    Image: {}", show.image);
        println!();
    }

    if page.episodes.is_visible() {
        println!("=== Episodes ===\n");
        for item in page.episodes.items() {
            println!("  {}", item);
        }
        println!("\n{} episode(s)", page.episodes.items().len());
    }
}

fn export_if_requested(page: &Page, html: Option<&PathBuf>) -> Result<(), ShowFinderError> {
    if let Some(path) = html {
        export_page(page, path)?;
        println!("Page written to {}", path.display());
    }
    Ok(())
}

fn run_search(
    query: &str,
    episodes: Option<u32>,
    common: &CommonArgs,
) -> Result<(), ShowFinderError> {
    let directory = TvMazeDirectory::new().with_base_url(&common.base_url);
    let episodes_for = episodes.map(|position| position as usize - 1);

    let page = search_and_render(directory, query, episodes_for)?;
    print_page(&page);
    export_if_requested(&page, common.html.as_ref())
}

fn run_interactive(common: &CommonArgs) -> Result<(), ShowFinderError> {
    let directory = TvMazeDirectory::new().with_base_url(&common.base_url);
    let widget = SearchWidget::new(directory);

    loop {
        let query: String = Input::new()
            .with_prompt("Search shows (empty to quit)")
            .allow_empty(true)
            .interact_text()
            .map_err(|e| ShowFinderError::Io(std::io::Error::other(e)))?;

        if widget.submit_search(&query)? == Outcome::Ignored {
            break;
        }

        let page = widget.page();
        print_page(&page);
        if page.shows.is_empty() {
            continue;
        }

        let mut items: Vec<String> = page
            .shows
            .cards()
            .iter()
            .map(|card| format!("Episodes of {}", card.show().name))
            .collect();
        items.push("New search".to_string());

        let selection = Select::new()
            .with_prompt("Pick a show")
            .items(&items)
            .default(0)
            .interact()
            .map_err(|e| ShowFinderError::Io(std::io::Error::other(e)))?;

        if selection < page.shows.len() {
            let button = widget.episodes_button(selection)?;
            widget.click_episodes(&button)?;
            print_page(&widget.page());
        }
    }

    export_if_requested(&widget.page(), common.html.as_ref())
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let result = match &cli.command {
        Command::Search {
            query,
            episodes,
            common,
        } => run_search(query, *episodes, common),
        Command::Interactive { common } => run_interactive(common),
    };

    if let Err(e) = result {
        eprintln!("\nError: {}", e);
        process::exit(1);
    }
}
