use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use phrasefreq::config::Config;
use phrasefreq::documents::{self, DocumentSource};
use phrasefreq::output::report::{ReportFormat, ReportWriter};
use phrasefreq::output::terminal;
use phrasefreq::pipeline::batch;
use phrasefreq::vocabulary::compiler::{self, CompiledVocabulary};
use phrasefreq::vocabulary::loader;
use phrasefreq::vocabulary::types::VocabularySet;

/// phrasefreq: count how often each category's phrases appear in documents.
///
/// Every `*.csv` file in the category directory is one category (first
/// column: phrase, second column: label). Every PDF in the document
/// directory gets a `<name>_category_counts.txt` file with one
/// `category: count` line per category.
#[derive(Parser)]
#[command(name = "phrasefreq", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Count every document in the document directory and write result files
    Analyze {
        #[command(flatten)]
        vocabulary: VocabularyArgs,

        #[command(flatten)]
        engine: EngineArgs,

        /// Directory of input documents (overrides PHRASEFREQ_DOCUMENT_DIR)
        #[arg(long)]
        documents: Option<PathBuf>,

        /// Directory for result files (overrides PHRASEFREQ_OUTPUT_DIR)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Also pick up plain `.txt` documents
        #[arg(long)]
        include_text: bool,

        /// Number of documents to process in parallel (default: 4)
        #[arg(long, default_value = "4")]
        concurrency: usize,

        /// Result file format
        #[arg(long, value_enum, default_value_t = ReportFormat::Text)]
        format: ReportFormat,
    },

    /// Count a single document and print the result (writes nothing)
    Count {
        /// The document to analyze (PDF or plain text)
        file: PathBuf,

        #[command(flatten)]
        vocabulary: VocabularyArgs,

        #[command(flatten)]
        engine: EngineArgs,
    },

    /// List the loaded categories and their phrase counts
    Categories {
        #[command(flatten)]
        vocabulary: VocabularyArgs,
    },
}

#[derive(Args)]
struct VocabularyArgs {
    /// Directory of category CSV files (overrides PHRASEFREQ_CATEGORY_DIR)
    #[arg(long)]
    categories: Option<PathBuf>,

    /// Pre-trained tokenizer.json to tokenize with (overrides PHRASEFREQ_TOKENIZER)
    #[arg(long)]
    tokenizer: Option<PathBuf>,
}

#[derive(Args)]
struct EngineArgs {
    /// Maximum chunk length in characters (overrides PHRASEFREQ_CHUNK_SIZE)
    #[arg(long)]
    chunk_size: Option<usize>,

    /// Recover phrases that straddle chunk boundaries (cuts on whitespace
    /// and carries trailing tokens into the next chunk)
    #[arg(long)]
    carry_boundaries: bool,
}

impl VocabularyArgs {
    fn apply(self, config: &mut Config) {
        if let Some(dir) = self.categories {
            config.category_dir = dir;
        }
        if let Some(path) = self.tokenizer {
            config.tokenizer_path = Some(path);
        }
    }
}

impl EngineArgs {
    fn apply(&self, config: &mut Config) -> Result<()> {
        if let Some(size) = self.chunk_size {
            if size == 0 {
                anyhow::bail!("--chunk-size must be greater than zero");
            }
            config.chunk_size = size;
        }
        Ok(())
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Structured logging on stderr; stdout carries the results
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("phrasefreq=info")),
        )
        .init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Analyze {
            vocabulary,
            engine,
            documents: document_dir,
            output,
            include_text,
            concurrency,
            format,
        } => {
            let mut config = Config::load()?;
            vocabulary.apply(&mut config);
            engine.apply(&mut config)?;
            if let Some(dir) = document_dir {
                config.document_dir = dir;
            }
            if let Some(dir) = output {
                config.output_dir = dir;
            }
            config.require_documents()?;

            let (_, compiled) = load_vocabulary(&config)?;
            let options = config.engine_options(engine.carry_boundaries);

            let docs = documents::discover_documents(&config.document_dir, include_text)?;
            if docs.is_empty() {
                println!(
                    "No documents found in {}. Nothing to do.",
                    config.document_dir.display()
                );
                return Ok(());
            }

            let writer = ReportWriter::create(&config.output_dir, format)?;

            println!(
                "Analyzing {} documents against {} categories...",
                docs.len(),
                compiled.categories().len()
            );

            let report = batch::run(
                docs,
                Arc::new(compiled),
                options,
                Some(&writer),
                concurrency,
            )
            .await?;

            terminal::display_batch_summary(&report);

            println!("{}", "Analysis complete.".bold());
            println!("  Results saved to: {}", config.output_dir.display());
        }

        Commands::Count {
            file,
            vocabulary,
            engine,
        } => {
            let mut config = Config::load()?;
            vocabulary.apply(&mut config);
            engine.apply(&mut config)?;

            let (_, compiled) = load_vocabulary(&config)?;
            let options = config.engine_options(engine.carry_boundaries);

            let doc = DocumentSource::from_path(&file);
            info!(document = %doc, "Counting single document");

            let counts = batch::analyze_document(&doc, &compiled, &options)?;
            terminal::display_document_counts(&doc.name, &counts);
        }

        Commands::Categories { vocabulary } => {
            let mut config = Config::load()?;
            vocabulary.apply(&mut config);

            let (set, compiled) = load_vocabulary(&config)?;
            terminal::display_categories(&set, &compiled);
        }
    }

    Ok(())
}

/// Load the category files and compile them. Any failure here is fatal for
/// the whole session.
fn load_vocabulary(config: &Config) -> Result<(VocabularySet, CompiledVocabulary)> {
    config.require_categories()?;
    let set = loader::load_category_dir(&config.category_dir)?;
    let tokenizer = config.tokenizer()?;
    let compiled = compiler::compile(&set, tokenizer)?;
    Ok((set, compiled))
}
