use std::fs;
use std::path::{Path, PathBuf};

use anyhow::Context;
use clap::Parser;
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use mdhtml::Config;

#[derive(Parser)]
#[command(name = "mdhtml")]
#[command(about = "Convert Markdown files to HTML")]
struct Cli {
    /// Input Markdown file
    input: PathBuf,

    /// Output HTML file (defaults to input name with .html extension)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Config file (missing file means built-in defaults)
    #[arg(short, long, default_value = "mdhtml.toml")]
    config: PathBuf,
}

fn main() {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();

    match run(&cli) {
        Ok(output) => println!("Created {}", output.display()),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    }
}

fn run(cli: &Cli) -> anyhow::Result<PathBuf> {
    let config = Config::load(&cli.config)?;

    let markdown = fs::read_to_string(&cli.input)
        .with_context(|| format!("reading {}", cli.input.display()))?;

    let content = mdhtml::markdown_to_html_with_config(&markdown, &config)
        .with_context(|| format!("converting {}", cli.input.display()))?;

    let html = match &config.page.template {
        Some(template_path) => {
            let template = fs::read_to_string(template_path)
                .with_context(|| format!("reading template {}", template_path.display()))?;
            let title = page_title(&markdown, &config, &cli.input);
            debug!(%title, template = %template_path.display(), "wrapping page");
            mdhtml::render_page(&template, &title, &content)
        }
        None => content,
    };

    let output = cli
        .output
        .clone()
        .unwrap_or_else(|| cli.input.with_extension("html"));

    fs::write(&output, html).with_context(|| format!("writing {}", output.display()))?;
    info!(input = %cli.input.display(), output = %output.display(), "converted");

    Ok(output)
}

/// First `# ` heading, then the configured title, then the file stem.
fn page_title(markdown: &str, config: &Config, input: &Path) -> String {
    mdhtml::extract_title(markdown)
        .ok()
        .or_else(|| config.page.title.clone())
        .unwrap_or_else(|| {
            input
                .file_stem()
                .map(|s| s.to_string_lossy().into_owned())
                .unwrap_or_default()
        })
}
