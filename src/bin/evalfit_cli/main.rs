// ABOUTME: Evalfit CLI - inspect clients, compare evaluations, and request AI insights
// ABOUTME: Loads the sample dataset into an in-memory store and runs one command against it
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence
//!
//! Usage:
//! ```bash
//! # List clients with their evaluation counts
//! evalfit-cli clients
//!
//! # List one client's evaluations (id or part of the name)
//! evalfit-cli evaluations bruno
//!
//! # Body composition of the latest evaluation
//! evalfit-cli composition bruno
//!
//! # Estimate body fat from recorded skinfolds
//! evalfit-cli skinfolds carla --protocol three-site
//!
//! # Compare the five most recent evaluations
//! evalfit-cli compare bruno --latest 5
//!
//! # Postural summary as JSON
//! evalfit-cli --json compare ana --view postural
//!
//! # AI report for the latest evaluation (needs GROQ_API_KEY or another provider)
//! evalfit-cli insight report ana
//! ```

mod commands;
mod helpers;

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use chrono::NaiveDate;
use clap::{Parser, Subcommand, ValueEnum};
use tracing::debug;

use evalfit::config::EvalfitConfig;
use evalfit::intelligence::{ComparisonView, SkinfoldProtocol};
use evalfit::logging::LoggingConfig;
use evalfit::seed::SampleData;
use evalfit::store::EvaluationStore;

use helpers::lookup::resolve_client;

#[derive(Parser)]
#[command(
    name = "evalfit-cli",
    about = "Evalfit evaluation CLI",
    long_about = "Inspect client evaluations, compute body composition, compare evaluations over time, and request AI-generated insights."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,

    /// Sample dataset (defaults to `EVALFIT_SAMPLE_DATA`, then the bundled copy)
    #[arg(long, global = true)]
    data: Option<PathBuf>,

    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,

    /// Enable debug logging
    #[arg(long, short = 'v', global = true)]
    verbose: bool,
}

#[non_exhaustive]
#[derive(Subcommand)]
enum Command {
    /// List clients
    Clients,

    /// List a client's evaluations, oldest first
    Evaluations {
        /// Client id or part of the name
        client: String,
    },

    /// Create (or reopen) a client's evaluation for a day
    NewEvaluation {
        /// Client id or part of the name
        client: String,

        /// Evaluation day, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },

    /// Body composition for one evaluation
    Composition {
        /// Client id or part of the name
        client: String,

        /// Evaluation id (defaults to the latest)
        #[arg(long, short = 'e')]
        evaluation: Option<String>,
    },

    /// Body-fat estimate from recorded skinfolds
    Skinfolds {
        /// Client id or part of the name
        client: String,

        /// Evaluation id (defaults to the latest)
        #[arg(long, short = 'e')]
        evaluation: Option<String>,

        /// Jackson-Pollock protocol
        #[arg(long, value_enum, default_value_t = ProtocolArg::Auto)]
        protocol: ProtocolArg,
    },

    /// Compare selected evaluations side by side
    Compare {
        /// Client id or part of the name
        client: String,

        /// Dashboard view
        #[arg(long, value_enum, default_value_t = ViewArg::Bioimpedance)]
        view: ViewArg,

        /// Evaluation ids to select (repeatable); the postural view always keeps the latest
        #[arg(long = "evaluation", short = 'e')]
        evaluations: Vec<String>,

        /// Select the N most recent evaluations instead (defaults to the view's limit)
        #[arg(long, conflicts_with = "evaluations")]
        latest: Option<usize>,
    },

    /// AI-generated insights
    Insight {
        #[command(subcommand)]
        action: InsightCommand,
    },
}

#[non_exhaustive]
#[derive(Subcommand)]
enum InsightCommand {
    /// Narrative report for one evaluation
    Report {
        /// Client id or part of the name
        client: String,

        /// Evaluation id (defaults to the latest)
        #[arg(long, short = 'e')]
        evaluation: Option<String>,
    },

    /// Analysis of two evaluations
    Compare {
        /// Client id or part of the name
        client: String,

        /// Earlier evaluation id (defaults to the second most recent)
        #[arg(long)]
        previous: Option<String>,

        /// Later evaluation id (defaults to the most recent)
        #[arg(long)]
        current: Option<String>,
    },

    /// Analysis of recorded postural deviations
    Postural {
        /// Client id or part of the name
        client: String,

        /// Evaluation id (defaults to the latest with a postural assessment)
        #[arg(long, short = 'e')]
        evaluation: Option<String>,
    },

    /// Check that the configured LLM provider answers
    Health,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProtocolArg {
    /// Most complete protocol the recorded sites allow
    Auto,
    /// Jackson-Pollock three-site
    ThreeSite,
    /// Jackson-Pollock seven-site
    SevenSite,
}

impl ProtocolArg {
    const fn protocol(self) -> Option<SkinfoldProtocol> {
        match self {
            Self::Auto => None,
            Self::ThreeSite => Some(SkinfoldProtocol::JacksonPollock3),
            Self::SevenSite => Some(SkinfoldProtocol::JacksonPollock7),
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum ViewArg {
    /// Bioimpedance and anthropometric table
    Bioimpedance,
    /// Postural deviation summary
    Postural,
}

impl From<ViewArg> for ComparisonView {
    fn from(view: ViewArg) -> Self {
        match view {
            ViewArg::Bioimpedance => Self::Bioimpedance,
            ViewArg::Postural => Self::Postural,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut logging = LoggingConfig::from_env();
    if cli.verbose {
        logging = logging.verbose();
    }
    logging.init()?;

    let config = EvalfitConfig::from_env()?;
    let data_path = cli.data.unwrap_or_else(|| config.sample_data_path.clone());
    debug!(path = %data_path.display(), "Loading sample data");

    let store = Arc::new(EvaluationStore::new());
    SampleData::from_path_or_bundled(&data_path)?.load_into(&store)?;

    let json = cli.json;
    match cli.command {
        Command::Clients => commands::clients::list(&store, json)?,
        Command::Evaluations { client } => {
            let client = resolve_client(&store, &client)?;
            commands::clients::evaluations(&store, &client, json)?;
        }
        Command::NewEvaluation { client, date } => {
            let client = resolve_client(&store, &client)?;
            commands::clients::new_evaluation(&store, &client, date, json)?;
        }
        Command::Composition { client, evaluation } => {
            let client = resolve_client(&store, &client)?;
            commands::composition::calculate(&store, &client, evaluation.as_deref(), json)?;
        }
        Command::Skinfolds {
            client,
            evaluation,
            protocol,
        } => {
            let client = resolve_client(&store, &client)?;
            commands::composition::skinfolds(
                &store,
                &client,
                evaluation.as_deref(),
                protocol.protocol(),
                json,
            )?;
        }
        Command::Compare {
            client,
            view,
            evaluations,
            latest,
        } => {
            let client = resolve_client(&store, &client)?;
            commands::compare::run(&store, &client, view.into(), &evaluations, latest, json)?;
        }
        Command::Insight { action } => {
            let provider = commands::insight::provider(&config)?;
            let service = commands::insight::service(&provider, &config);
            match action {
                InsightCommand::Report { client, evaluation } => {
                    let client = resolve_client(&store, &client)?;
                    commands::insight::report(&service, &store, &client, evaluation.as_deref(), json)
                        .await?;
                }
                InsightCommand::Compare {
                    client,
                    previous,
                    current,
                } => {
                    let client = resolve_client(&store, &client)?;
                    commands::insight::compare(
                        &service,
                        &store,
                        &client,
                        previous.as_deref(),
                        current.as_deref(),
                        json,
                    )
                    .await?;
                }
                InsightCommand::Postural { client, evaluation } => {
                    let client = resolve_client(&store, &client)?;
                    commands::insight::postural(
                        &service,
                        &store,
                        &client,
                        evaluation.as_deref(),
                        json,
                    )
                    .await?;
                }
                InsightCommand::Health => commands::insight::health(provider.as_ref()).await?,
            }
        }
    }

    Ok(())
}
