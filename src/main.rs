use clap::{Parser, Subcommand};
use pagedex::{config, emit, output, scan};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "pagedex")]
#[command(version)]
#[command(about = "Content pipeline: per-language page files in, JSON records and summaries out")]
#[command(long_about = "\
Content pipeline: per-language page files in, JSON records and summaries out

Your filesystem is the data source. Every content file carries its language
as the suffix before the extension, and its path becomes its page id.

Content structure:

  content/
  ├── config.toml                # Build config (optional)
  ├── about.en.json              # Page \"about\", language \"en\"
  ├── about.uk.json              # Same page, Ukrainian
  └── blog/
      ├── first-post.en.json     # Page \"blog/first-post\"
      └── second-post.en.md      # Markdown with +++ TOML front matter

Each build writes one JSON record per page, one indexed + sorted summary
per language, and a manifest.json mapping ids to emitted files. Pages with
\"hidden\": true are emitted but excluded from summaries.

Run 'pagedex gen-config' to generate a documented config.toml.")]
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
    /// Scan and summarize the content tree without writing artifacts
    Scan,
    /// Run the full pipeline: scan → summarize → emit
    Build,
    /// Validate content without building
    Check,
    /// Print a stock config.toml with all options documented
    GenConfig,
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    match cli.command {
        Command::Scan => {
            let outcome = scan::scan(&cli.source)?;
            output::print_scan_output(&outcome);
        }
        Command::Build => {
            let config = config::load_config(&cli.source)?;
            let options = scan::ScanOptions::from_config(&config);
            let outcome = scan::scan_with(&cli.source, &config, options, &[])?;
            let report = emit::emit(
                &outcome,
                &cli.output,
                &emit::source_name(&cli.source),
                &config.summary.export,
                &[],
            )?;
            output::print_build_output(&report);
        }
        Command::Check => {
            let outcome = scan::scan(&cli.source)?;
            let langs: std::collections::BTreeSet<&str> = outcome
                .pages
                .iter()
                .map(|p| p.ctx.lang.as_str())
                .collect();
            println!(
                "OK: {} pages across {} languages",
                outcome.pages.len(),
                langs.len()
            );
        }
        Command::GenConfig => {
            print!("{}", config::stock_config());
        }
    }

    Ok(())
}
