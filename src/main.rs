//! adeft-content CLI - inspect the literature content stores

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use adeft_content::config;
use adeft_content::{ContentEngine, Grounding, Pmid, get_abbreviations};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "adeft-content")]
#[command(version)]
#[command(about = "Retrieve and normalize article content from the literature stores")]
#[command(long_about = r#"
adeft-content reads the content and update stores and prints JSON:
  • Filtered plaintext for PMIDs
  • PMIDs for an agent text, HGNC id or grounding
  • Agent-text counts for PMIDs or an entity
  • Abbreviation glossaries from article XML

Example usage:
  adeft-content plaintexts --pmid 28193225 --pmid 30412211 --contains ER
  adeft-content pmids --grounding HGNC:6871 --major-topic
  adeft-content agent-texts --grounding HGNC:11998
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Content store (overrides config)
    #[arg(long, global = true)]
    content_db: Option<PathBuf>,

    /// Update store (overrides config)
    #[arg(long, global = true)]
    update_db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Args)]
struct PmidArgs {
    /// PubMed identifier (repeatable)
    #[arg(short, long = "pmid", required = true)]
    pmids: Vec<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a config file with the current store locations
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Filtered plaintext for PMIDs
    Plaintexts {
        #[command(flatten)]
        pmids: PmidArgs,

        /// Required shortform (repeatable)
        #[arg(long)]
        contains: Vec<String>,

        /// Extract from raw article content instead of stored paragraphs
        #[arg(long)]
        raw: bool,

        /// Worker count for extraction (1 = serial)
        #[arg(short, long)]
        jobs: Option<usize>,
    },

    /// Decompressed article content for PMIDs
    Content {
        #[command(flatten)]
        pmids: PmidArgs,
    },

    /// PMIDs for an agent text, HGNC id or grounding
    Pmids {
        #[arg(long, conflicts_with_all = ["hgnc", "grounding"])]
        agent_text: Option<String>,

        #[arg(long, conflicts_with = "grounding")]
        hgnc: Option<String>,

        /// Grounding as NAMESPACE:ID
        #[arg(long)]
        grounding: Option<String>,

        /// Use the major-topic index (with --grounding)
        #[arg(long, requires = "grounding")]
        major_topic: bool,
    },

    /// Agent-text counts for PMIDs or for a grounding
    AgentTexts {
        /// PubMed identifier (repeatable)
        #[arg(short, long = "pmid", conflicts_with = "grounding")]
        pmids: Vec<String>,

        /// Grounding as NAMESPACE:ID
        #[arg(long)]
        grounding: Option<String>,
    },

    /// Abbreviation glossary from an XML file or from stored content
    Abbreviations {
        /// Article XML file
        #[arg(long, conflicts_with = "pmids")]
        file: Option<PathBuf>,

        /// PubMed identifier (repeatable)
        #[arg(short, long = "pmid")]
        pmids: Vec<String>,
    },
}

fn to_pmids(ids: Vec<String>) -> Vec<Pmid> {
    ids.into_iter().map(Pmid::from).collect()
}

fn print_json<T: serde::Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut settings = config::load_config(cli.config.as_deref())?
        .unwrap_or_default()
        .apply_env();
    if let Some(path) = cli.content_db {
        settings.stores.content_db = path;
    }
    if let Some(path) = cli.update_db {
        settings.stores.update_db = path;
    }
    settings.validate()?;

    let engine = ContentEngine::new(&settings);

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &settings, force)?;
            tracing::info!("Wrote config to {}", path.display());
        }

        Commands::Plaintexts { pmids, contains, raw, jobs } => {
            let engine = engine.with_jobs(jobs.unwrap_or(settings.n_jobs));
            let pmids = to_pmids(pmids.pmids);
            tracing::info!("Fetching plaintext for {} PMIDs with {} worker(s)", pmids.len(), engine.jobs());

            let plaintexts = if raw {
                engine.plaintexts_from_content(&pmids, contains.as_slice())?
            } else {
                engine.plaintexts_for_pmids(&pmids, contains.as_slice())?
            };
            print_json(&plaintexts)?;
        }

        Commands::Content { pmids } => {
            let content = engine.content_for_pmids(&to_pmids(pmids.pmids))?;
            print_json(&content)?;
        }

        Commands::Pmids { agent_text, hgnc, grounding, major_topic } => {
            let pmids = match (agent_text, hgnc, grounding) {
                (Some(text), _, _) => engine.pmids_for_agent_text(&text)?,
                (_, Some(id), _) => engine.pmids_for_hgnc_id(&id)?,
                (_, _, Some(key)) => engine.pmids_for_entity(&Grounding::parse(&key)?, major_topic)?,
                _ => anyhow::bail!("one of --agent-text, --hgnc or --grounding is required"),
            };
            print_json(&pmids)?;
        }

        Commands::AgentTexts { pmids, grounding } => {
            let counts = match grounding {
                Some(key) => engine.agent_texts_for_entity(&Grounding::parse(&key)?)?,
                None if !pmids.is_empty() => engine.agent_texts_for_pmids(&to_pmids(pmids))?,
                None => anyhow::bail!("either --pmid or --grounding is required"),
            };
            print_json(&counts)?;
        }

        Commands::Abbreviations { file, pmids } => {
            if let Some(path) = file {
                let xml = std::fs::read_to_string(&path)?;
                print_json(&get_abbreviations(&xml))?;
            } else if !pmids.is_empty() {
                print_json(&engine.abbreviations_for_pmids(&to_pmids(pmids))?)?;
            } else {
                anyhow::bail!("either --file or --pmid is required");
            }
        }
    }

    Ok(())
}
