//! EducaFoco CLI - education news for teachers
//!
//! The application logic is contained in lib.rs, and this file is responsible
//! for parsing arguments, logging setup and handling top-level errors.

use anyhow::Context;
use clap::{CommandFactory, Parser, Subcommand};
use clap_complete::Shell;
use colored::Colorize;
use educafoco::dashboard::Status;
use educafoco::markup::{segments, Segment};
use educafoco::{
    classify, ui, Category, Config, Dashboard, GeminiProvider, GroundingSource, NewsProvider,
    Sections,
};
use std::io::Read;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "educafoco")]
#[command(author, version, about = "Education news dashboard for teachers", long_about = None)]
struct Cli {
    /// Path to an educafoco.toml config file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Fetch today's news once and print it by category
    Fetch {
        /// Only print this category
        #[arg(long)]
        category: Option<Category>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Sort a saved response text (file or stdin) into categories
    Classify {
        /// File to read; stdin when omitted
        file: Option<PathBuf>,
        /// Only print this category
        #[arg(long)]
        category: Option<Category>,
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },
    /// Generate shell completions
    Completions {
        shell: Shell,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Fetch { category, json }) => {
            init_logging(None);
            let config = load_config(cli.config.as_deref())?;
            let provider = GeminiProvider::new(&config)?;

            let mut dashboard = Dashboard::new();
            if !json {
                eprintln!("{}", "Sincronizando...".dimmed());
            }
            dashboard.refresh(&provider).await;
            if let Status::Failed(message) = dashboard.status() {
                anyhow::bail!("{}", message);
            }

            if json {
                print_json(dashboard.sections(), dashboard.sources(), category)?;
            } else {
                print_sections(dashboard.sections(), category);
                print_sources(dashboard.sources());
                if let Some(time) = dashboard.last_update() {
                    println!("\n{}", format!("Último check: {}", time).dimmed());
                }
            }
        }
        Some(Commands::Classify {
            file,
            category,
            json,
        }) => {
            init_logging(None);
            let text = match file {
                Some(path) => read_text(&path)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("failed to read stdin")?;
                    buf
                }
            };
            let sections = classify(&text);
            if json {
                print_json(&sections, &[], category)?;
            } else {
                print_sections(&sections, category);
            }
        }
        Some(Commands::Completions { shell }) => {
            clap_complete::generate(
                shell,
                &mut Cli::command(),
                "educafoco",
                &mut std::io::stdout(),
            );
        }
        None => {
            // Default: Launch the TUI, logging to a file so the screen stays clean
            let config = load_config(cli.config.as_deref())?;
            init_logging(Some(&config.log_file()));
            let provider: Arc<dyn NewsProvider> = Arc::new(GeminiProvider::new(&config)?);
            ui::run(provider).await?;
        }
    }

    Ok(())
}

/// Set up tracing; `RUST_LOG` overrides the default `warn` level.
fn init_logging(log_file: Option<&Path>) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    let file = log_file.and_then(|path| {
        if let Some(dir) = path.parent() {
            std::fs::create_dir_all(dir).ok()?;
        }
        std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .ok()
    });

    let _ = match (log_file, file) {
        (_, Some(file)) => builder
            .with_ansi(false)
            .with_writer(Mutex::new(file))
            .try_init(),
        // Dashboard mode without a writable log file: stay quiet
        (Some(_), None) => builder.with_writer(std::io::sink).try_init(),
        (None, None) => builder.with_writer(std::io::stderr).try_init(),
    };
}

fn load_config(path: Option<&Path>) -> anyhow::Result<Config> {
    let config = match path {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };
    Ok(config)
}

fn read_text(path: &Path) -> anyhow::Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn selected(only: Option<Category>) -> impl Iterator<Item = Category> {
    Category::ALL
        .into_iter()
        .filter(move |cat| only.is_none_or(|o| o == *cat))
}

fn print_sections(sections: &Sections, only: Option<Category>) {
    for cat in selected(only) {
        let lines = sections.get(cat);
        // The catch-all bucket only matters when something landed in it
        if cat == Category::Geral && lines.is_empty() && only.is_none() {
            continue;
        }

        println!(
            "\n{} {}",
            cat.icon(),
            cat.label().to_uppercase().bold().blue()
        );
        if lines.is_empty() {
            println!("  {}", "Sem atualizações no radar".dimmed());
            continue;
        }
        for line in lines {
            let rendered: String = segments(line.trim())
                .into_iter()
                .map(|segment| match segment {
                    Segment::Plain(s) => s.normal().to_string(),
                    Segment::Bold(s) => s.bold().yellow().to_string(),
                })
                .collect();
            println!("  {}", rendered);
        }
    }
}

fn print_sources(sources: &[GroundingSource]) {
    if sources.is_empty() {
        return;
    }
    println!("\n🔗 {}", "Links da Matéria".bold());
    for source in sources {
        println!("  • {}", source.display_title());
        if let Some(uri) = &source.uri {
            println!("    {}", uri.dimmed());
        }
    }
}

fn print_json(
    sections: &Sections,
    sources: &[GroundingSource],
    only: Option<Category>,
) -> anyhow::Result<()> {
    let value = match only {
        Some(cat) => serde_json::json!({
            "category": cat,
            "lines": sections.get(cat),
            "sources": sources,
        }),
        None => serde_json::json!({
            "sections": sections,
            "sources": sources,
        }),
    };
    println!("{}", serde_json::to_string_pretty(&value)?);
    Ok(())
}
