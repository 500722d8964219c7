use std::sync::Arc;

use anyhow::Result;
use clap::{Parser, Subcommand, ValueEnum};

use newscheck::workflows::{
    ClassifyState, ClassifyWorkflow, DatasetState, DatasetWorkflow, MetricsState, MetricsWorkflow,
};
use newscheck::{config, init_config, init_telemetry, ApiClient, ModelMetrics, NewsItem, NewsLabel};

#[derive(Parser)]
#[command(name = "newscheck")]
#[command(about = "Client for the fake-news classification service")]
#[command(
    long_about = "Newscheck submits news items for veracity classification, manages the \
                  labeled training dataset, and inspects or triggers training of the \
                  underlying model."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Submit a news item for classification
    Classify {
        /// News headline
        #[arg(long, default_value = "")]
        title: String,
        /// News body text
        #[arg(long, default_value = "")]
        text: String,
    },
    /// Inspect or extend the labeled dataset
    Dataset {
        #[command(subcommand)]
        command: DatasetCommands,
    },
    /// Show current model metrics
    Metrics,
    /// Trigger a training run and report the refreshed metrics
    Train,
}

#[derive(Subcommand)]
enum DatasetCommands {
    /// List all dataset items with label counts
    List,
    /// Add a labeled item to the dataset
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        text: String,
        /// Veracity label for the item
        #[arg(long, value_enum)]
        label: LabelArg,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum LabelArg {
    Real,
    Fake,
}

impl From<LabelArg> for NewsLabel {
    fn from(label: LabelArg) -> Self {
        match label {
            LabelArg::Real => NewsLabel::Real,
            LabelArg::Fake => NewsLabel::Fake,
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = config()?;
    init_telemetry(&config.observability.log_level)?;
    init_config()?;

    let api = Arc::new(ApiClient::new(config.api.url.clone()));

    match cli.command {
        Commands::Classify { title, text } => {
            let mut workflow = ClassifyWorkflow::new(api);
            match workflow.submit(&title, &text).await {
                ClassifyState::Classified(result) => {
                    println!("{} NEWS", result.label);
                    println!("Confidence: {:.1}%", result.confidence * 100.0);
                    println!("FAKE: {:.1}%", result.fake_share() * 100.0);
                    println!("REAL: {:.1}%", result.real_share() * 100.0);
                    println!();
                    println!("{}", result.explanation);
                }
                ClassifyState::Failed(message) => anyhow::bail!("{message}"),
                _ => unreachable!("submit always settles"),
            }
        }
        Commands::Dataset { command } => {
            let mut workflow = DatasetWorkflow::new(api);
            match command {
                DatasetCommands::List => {
                    if let DatasetState::LoadFailed(message) = workflow.load().await {
                        anyhow::bail!("{message}");
                    }
                    print_dataset(&workflow);
                }
                DatasetCommands::Add { title, text, label } => {
                    workflow.load().await;
                    workflow.append(&title, &text, label.into()).await;
                    match workflow.state() {
                        DatasetState::AppendFailed { message, .. } => anyhow::bail!("{message}"),
                        DatasetState::LoadFailed(message) => {
                            anyhow::bail!("item added, but the reload failed: {message}")
                        }
                        _ => print_dataset(&workflow),
                    }
                }
            }
        }
        Commands::Metrics => {
            let workflow = MetricsWorkflow::new(api);
            report_metrics(workflow.load().await)?;
        }
        Commands::Train => {
            let workflow = MetricsWorkflow::new(api);
            println!("Training triggered, waiting for the model to settle...");
            workflow.train().await?;
            workflow.refresh_settled().await;
            report_metrics(workflow.state())?;
        }
    }

    Ok(())
}

fn print_dataset(workflow: &DatasetWorkflow<ApiClient>) {
    let summary = workflow.summary();
    println!(
        "{} items ({} real, {} fake)",
        summary.total, summary.real, summary.fake
    );
    for item in workflow.items() {
        print_item(item);
    }
}

fn print_item(item: &NewsItem) {
    let mut text = item.text.replace('\n', " ");
    if text.chars().count() > 72 {
        text = text.chars().take(72).collect();
        text.push('…');
    }
    println!("#{:<5} [{}] {} — {}", item.id, item.label, item.title, text);
}

fn report_metrics(state: MetricsState) -> Result<()> {
    match state {
        MetricsState::Ready(metrics) => {
            print_metrics(&metrics);
            Ok(())
        }
        MetricsState::NotTrained => {
            println!("No metrics available. Train the model first.");
            Ok(())
        }
        MetricsState::Failed(message) => anyhow::bail!("{message}"),
        _ => unreachable!("load always settles"),
    }
}

fn print_metrics(metrics: &ModelMetrics) {
    println!("Model:     {}", metrics.model_type);
    println!("Accuracy:  {:.2}%", metrics.accuracy * 100.0);
    println!("Precision: {:.2}%", metrics.precision * 100.0);
    println!("Recall:    {:.2}%", metrics.recall * 100.0);
    println!("F1 score:  {:.2}%", metrics.f1_score * 100.0);
    println!(
        "Samples:   {} total ({} train / {} test)",
        metrics.total_samples, metrics.train_size, metrics.test_size
    );
}
