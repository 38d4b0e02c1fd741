use chrono::Datelike;
use clap::{Parser, Subcommand};
use resource_hub::content::Collection;
use resource_hub::render::{self, PageAssets};
use resource_hub::view::{Controller, Event, notice, search};
use resource_hub::{config, export, generate, output};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "resource-hub")]
#[command(about = "Static site generator for educational resource hubs")]
#[command(long_about = "\
Static site generator for educational resource hubs

A single metadata.json lists video lessons and downloadable documents. The
build renders a one-page hub with an inline video player, per-section
\"Show All\" pages, search and a backup download.

Content structure:

  content/
  ├── metadata.json     # siteInfo, videos, notes, pastPapers, lessonPlans, schemesOfWork
  ├── config.toml       # Site config (optional, overrides stock defaults)
  └── assets/           # Static assets (favicon, images) → copied to output root

Output structure:

  dist/
  ├── index.html
  ├── videos/<id>/index.html      # Player open on that video
  ├── sections/<key>/index.html   # Section expanded
  └── data/<prefix>-<date>.json   # Backup of metadata.json

Run 'resource-hub gen-config' to generate a documented config.toml.")]
#[command(version = env!("HUB_VERSION"))]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Produce the static site from the content directory
    Build,
    /// Validate content directory without building
    Check,
    /// Search the resources the way the page search does
    Search {
        /// Text matched against title, description, subject and chapter
        query: String,
    },
    /// Write a dated backup of metadata.json into the output data directory
    Export,
    /// Print the HTML for a single page state
    Render {
        /// Open the inline player on this video id
        #[arg(long)]
        video: Option<String>,
        /// Expand one section (videos, notes, papers, plans, schemes)
        #[arg(long)]
        focus: Option<Collection>,
        /// Submit a search before rendering
        #[arg(long)]
        search: Option<String>,
        /// Viewport width in pixels
        #[arg(long, default_value_t = generate::PRERENDER_WIDTH)]
        width: u32,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    let today = chrono::Local::now().date_naive();

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = generate::load_site(&cli.source)?;
            println!("==> Generating {}", cli.output.display());
            let report = generate::generate_site(&site, &cli.source, &cli.output, today)?;
            output::print_generate_output(&report);
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = generate::load_site(&cli.source)?;
            output::print_check_output(&site, &cli.source);
            println!("==> Content is valid");
        }
        Command::Search { query } => {
            let site = generate::load_site(&cli.source)?;
            let normalized = search::normalize_query(&query);
            let min = site.config.search.min_query_chars;
            if normalized.chars().count() < min {
                println!("{}", notice::query_too_short(min));
            } else {
                let results = search::search(&site.store, &normalized);
                output::print_search_output(&site.store, &results);
            }
        }
        Command::Export => {
            let site = generate::load_site(&cli.source)?;
            println!("==> Exporting to {}", cli.output.display());
            let path = export::write_export(
                &site.store,
                &cli.output.join("data"),
                &site.config.export.filename_prefix,
                today,
            )?;
            output::print_export_output(&path, &site.store);
        }
        Command::Render {
            video,
            focus,
            search,
            width,
        } => {
            let site = generate::load_site(&cli.source)?;
            let mut hub = Controller::new(&site.store, &site.config, width);
            hub.load(None);
            if let Some(query) = search {
                hub.handle(Event::SearchSubmit(query));
            }
            if let Some(collection) = focus {
                hub.handle(Event::ToggleShowAll(collection));
            }
            if let Some(id) = video {
                hub.handle(Event::SelectVideo(id));
            }
            let assets = PageAssets {
                css: render::site_css(&site.config),
                year: today.year(),
                backup_href: None,
            };
            print!(
                "{}",
                render::render_page(hub.context(), hub.state(), &assets).into_string()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}
