use clap::{Parser, Subcommand};
use insurance_ml::registry::ModelRegistry;
use insurance_ml::service::PredictionService;
use insurance_ml::store::ArtifactStore;
use insurance_ml::training::run_training;
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "insurance-ml", about = "Train and serve insurance charges models")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Train all models from a CSV dataset and write artifacts
    Train {
        /// Path to the insurance CSV file
        #[arg(long)]
        data: PathBuf,
        /// Directory to write artifacts into
        #[arg(long, default_value = "artifacts")]
        artifacts: PathBuf,
        /// Seed for the train/test split and bootstrap sampling
        #[arg(long, default_value_t = 42)]
        seed: u64,
    },
    /// Serve predictions over HTTP from trained artifacts
    Serve {
        /// Directory holding trained artifacts
        #[arg(long, default_value = "artifacts")]
        artifacts: PathBuf,
        /// Port to listen on
        #[arg(long, default_value_t = 5000)]
        port: u16,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match cli.command {
        Command::Train {
            data,
            artifacts,
            seed,
        } => {
            let store = ArtifactStore::new(artifacts);
            if let Err(err) = run_training(&data, &store, seed) {
                eprintln!("Training failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
        Command::Serve { artifacts, port } => {
            let service = Arc::new(PredictionService::new(ModelRegistry::new(
                ArtifactStore::new(artifacts),
            )));
            if let Err(err) = insurance_ml::server::serve(service, port).await {
                eprintln!("Server failed: {}", err);
                return ExitCode::FAILURE;
            }
        }
    }
    ExitCode::SUCCESS
}
