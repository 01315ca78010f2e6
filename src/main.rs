use clap::{Parser, Subcommand};
use markstack::generate::{self, Site};
use markstack::render::CmarkRenderer;
use markstack::{config, output, scan, urls};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "markstack")]
#[command(about = "Static site generator for markdown knowledge bases")]
#[command(long_about = "\
Static site generator for markdown knowledge bases

Your filesystem is the data source. Directories become sections, markdown
files become pages, and titles become URLs.

Content structure:

  content/
  ├── config.toml                  # Site config (optional)
  ├── _index.md                    # Homepage body, shown below the hero
  ├── guide/                       # Section → /guide/
  │   ├── _index.md                # Section title, description and body
  │   ├── start.md                 # title: Getting Started → /guide/getting-started
  │   └── advanced/                # Nested section
  │       └── tuning.md            # No frontmatter → title \"Tuning\"
  └── my_page.md                   # → /my-page

Titles (first available wins):
  Page:     frontmatter title → file name (my_page.md → \"My Page\")
  Section:  _index.md frontmatter title → directory name

Run 'markstack gen-config' to generate a documented config.toml.")]
#[command(version)]
struct Cli {
    /// Content directory
    #[arg(long, default_value = "content", global = true)]
    source: PathBuf,

    /// Output directory
    #[arg(long, default_value = "dist", global = true)]
    output: PathBuf,

    /// Static files copied verbatim to the output root (skipped if missing)
    #[arg(long, default_value = "static", global = true)]
    static_dir: PathBuf,

    /// Log pipeline progress
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the full pipeline: load → generate
    Build,
    /// Validate content (titles, URLs, config) without writing anything
    Check,
    /// Print the content tree with resolved URLs
    Scan {
        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Command::Build => {
            println!("==> Loading {}", cli.source.display());
            let site = Site::load(&cli.source)?;

            println!("==> Generating HTML → {}", cli.output.display());
            let summary = generate::generate(
                &site,
                &cli.output,
                Some(cli.static_dir.as_path()),
                &CmarkRenderer::default(),
            )?;
            output::print_build_output(&summary);

            println!("==> Build complete: {}", cli.output.display());
        }
        Command::Check => {
            println!("==> Checking {}", cli.source.display());
            let site = Site::load(&cli.source)?;
            output::print_check_output(&site.tree, &site.urls);
            println!("==> Content is valid");
        }
        Command::Scan { json } => {
            let tree = scan::scan(&cli.source)?;
            if json {
                println!("{}", serde_json::to_string_pretty(&tree)?);
            } else {
                let urls = urls::UrlTable::build(&tree)?;
                output::print_scan_output(&tree, &urls);
            }
        }
        Command::GenConfig => {
            print!("{}", config::stock_config_toml());
        }
    }

    Ok(())
}

/// `--verbose` logs the pipeline at debug level; otherwise `RUST_LOG`
/// applies, defaulting to warnings only.
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("markstack=debug,info")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
