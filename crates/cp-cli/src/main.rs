//! `complaint-priority` command line.

use anyhow::{bail, Context};
use clap::{Parser, Subcommand};
use cp_core::PriorityConfig;
use cp_engine::{augment_academic, train, DecisionEngine, ModelHandle, TrainingOptions};
use cp_rules::{RuleDefinition, RuleTable, RULE_TABLE};
use cp_server::state::AppState;
use cp_storage::{append_corpus, read_corpus, ArtifactStore, FileArtifactStore};
use rand::rngs::StdRng;
use rand::SeedableRng;
use std::io::BufRead;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, Level};

#[derive(Parser)]
#[command(name = "complaint-priority", version, about = "Complaint priority classifier")]
struct Cli {
    /// JSON configuration file.
    #[arg(long, global = true, env = "CP_CONFIG")]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v debug, -vv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Explicit log level; overrides -v.
    #[arg(long, global = true, env = "CP_LOG_LEVEL")]
    log_level: Option<Level>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Serve the prediction API.
    Serve {
        #[arg(long)]
        host: Option<String>,
        #[arg(long)]
        port: Option<u16>,
        /// Model artifact to load at startup.
        #[arg(long)]
        model: Option<PathBuf>,
    },
    /// Train a model from a labeled corpus and write the artifact.
    Train {
        #[arg(long)]
        corpus: Option<PathBuf>,
        #[arg(long)]
        model: Option<PathBuf>,
        /// Relabel rows with the rule decision before fitting.
        #[arg(long)]
        prelabel: bool,
        #[arg(long)]
        alpha: Option<f64>,
    },
    /// Classify complaints given as arguments, or one per stdin line.
    Classify {
        #[arg(long)]
        model: Option<PathBuf>,
        texts: Vec<String>,
    },
    /// Append synthetic academic complaints to a corpus.
    Augment {
        #[arg(long, default_value_t = 100)]
        count: usize,
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long)]
        corpus: Option<PathBuf>,
    },
    /// Print the active rule definition and its resolved overrides.
    Rules,
}

fn init_tracing(cli: &Cli) {
    let level = cli.log_level.unwrap_or(match cli.verbose {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    });
    tracing_subscriber::fmt().with_max_level(level).with_writer(std::io::stderr).init();
}

/// The rule definition in effect, with its resolved table.
fn load_rules(config: &PriorityConfig) -> anyhow::Result<(RuleDefinition, Arc<RuleTable>)> {
    match &config.rules.definition_path {
        Some(path) => {
            let def = RuleDefinition::from_json_file(path)?;
            let table = RuleTable::from_definition(&def);
            info!(path = %path.display(), version = table.version(), rules = table.len(), "loaded rule definition");
            Ok((def, Arc::new(table)))
        }
        None => Ok((RuleDefinition::canonical(), RULE_TABLE.clone())),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli);

    let mut config = PriorityConfig::load(cli.config.as_deref()).context("loading configuration")?;
    let (definition, rules) = load_rules(&config)?;

    match cli.command {
        Command::Serve { host, port, model } => {
            if let Some(h) = host {
                config.server.host = h;
            }
            if let Some(p) = port {
                config.server.port = p;
            }
            if let Some(m) = model {
                config.model.artifact_path = m;
            }
            info!("complaint-priority v{}", env!("CARGO_PKG_VERSION"));
            let store: Arc<dyn ArtifactStore> = Arc::new(FileArtifactStore::new(&config.model.artifact_path));
            let state = AppState::load(rules, store).await.with_context(|| {
                format!("loading model artifact {}", config.model.artifact_path.display())
            })?;
            cp_server::serve(&config.bind_addr(), state).await?;
        }
        Command::Train { corpus, model, prelabel, alpha } => {
            if let Some(c) = corpus {
                config.training.corpus_path = c;
            }
            if let Some(m) = model {
                config.model.artifact_path = m;
            }
            if prelabel {
                config.training.prelabel_with_rules = true;
            }
            if let Some(a) = alpha {
                config.training.alpha = a;
            }
            config.validate()?;

            let records = read_corpus(&config.training.corpus_path)
                .with_context(|| format!("reading corpus {}", config.training.corpus_path.display()))?;
            let options = TrainingOptions::from(&config.training);
            let (model, report) = train(&records, &rules, &options)?;
            FileArtifactStore::new(&config.model.artifact_path)
                .save(&model)
                .await
                .with_context(|| format!("writing model artifact {}", config.model.artifact_path.display()))?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
        Command::Classify { model, texts } => {
            let path = model.unwrap_or(config.model.artifact_path);
            let loaded = FileArtifactStore::new(&path)
                .load()
                .await
                .with_context(|| format!("loading model artifact {}", path.display()))?;
            let engine = DecisionEngine::new(rules, Arc::new(ModelHandle::new(loaded)));

            let texts = if texts.is_empty() {
                std::io::stdin()
                    .lock()
                    .lines()
                    .collect::<Result<Vec<_>, _>>()
                    .context("reading stdin")?
                    .into_iter()
                    .filter(|l| !l.trim().is_empty())
                    .collect()
            } else {
                texts
            };
            for text in texts {
                let c = engine.classify(&text);
                let line = serde_json::json!({
                    "text": text,
                    "priority": c.priority,
                    "source": c.source,
                    "trigger": c.trigger,
                });
                println!("{line}");
            }
        }
        Command::Augment { count, seed, corpus } => {
            if count == 0 {
                bail!("--count must be at least 1");
            }
            let path = corpus.unwrap_or(config.training.corpus_path);
            let mut rng = match seed {
                Some(s) => StdRng::seed_from_u64(s),
                None => StdRng::from_entropy(),
            };
            let rows = augment_academic(count, &mut rng);
            append_corpus(&path, &rows).with_context(|| format!("appending to corpus {}", path.display()))?;
            info!(path = %path.display(), added = rows.len(), "corpus augmented");
        }
        Command::Rules => {
            let out = serde_json::json!({
                "definition": definition,
                "resolved": {
                    "phrases": rules.phrase_rules().len(),
                    "keywords": rules.keyword_rules().len(),
                },
                "overrides": rules.overrides(),
            });
            println!("{}", serde_json::to_string_pretty(&out)?);
        }
    }
    Ok(())
}
