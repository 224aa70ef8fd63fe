//! homeprice CLI
//!
//! # Commands
//!
//! - `build` - Clean the dataset, train and write the artifacts
//! - `serve` - Start the prediction server
//! - `predict` - One estimate from the command line

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use anyhow::Context;
use bangalore_homeprice::{
    api::{router, AppState},
    build_artifacts,
    preprocessing::CleaningConfig,
    ArtifactPaths, Config, LazyPredictor, Predictor, Trainer,
};
use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Bengaluru house price model: build artifacts and serve estimates.
#[derive(Parser)]
#[command(name = "homeprice")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Directory for the model and columns.json
    #[arg(long, global = true, value_name = "DIR")]
    artifacts: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Clean the listings, fit the model and write the artifacts
    Build {
        /// Raw listings CSV
        #[arg(long, value_name = "CSV")]
        dataset: Option<PathBuf>,

        /// Holdout fraction
        #[arg(long)]
        test_size: Option<f64>,

        /// Split seed
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Start the HTTP server
    Serve {
        /// Host to bind to
        #[arg(long)]
        host: Option<IpAddr>,

        /// Port to listen on
        #[arg(short, long)]
        port: Option<u16>,
    },
    /// Estimate one price
    Predict {
        /// Location name (case-insensitive)
        #[arg(long, default_value = "")]
        location: String,

        /// Total area in square feet
        #[arg(long)]
        sqft: f64,

        /// Bathrooms
        #[arg(long)]
        bath: u32,

        /// Bedrooms
        #[arg(long)]
        bhk: u32,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "bangalore_homeprice=info,homeprice=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let mut config = Config::from_env();
    if let Some(dir) = cli.artifacts {
        config.artifact_dir = dir;
    }
    let paths = ArtifactPaths::in_dir(&config.artifact_dir);

    match cli.command {
        Commands::Build {
            dataset,
            test_size,
            seed,
        } => {
            let dataset = dataset.unwrap_or(config.dataset);
            let trainer = Trainer::builder()
                .test_size(test_size.unwrap_or(config.test_size))
                .seed(seed.unwrap_or(config.split_seed))
                .verbose(true)
                .build()?;
            let summary = build_artifacts(&dataset, &paths, CleaningConfig::default(), &trainer)
                .with_context(|| format!("build from {} failed", dataset.display()))?;

            println!("Rows after cleaning: {}", summary.report.after_bath_filter);
            println!("Feature columns:     {}", summary.columns.len());
            println!("Train/test rows:     {}/{}", summary.n_train, summary.n_test);
            println!("Holdout R^2:         {:.4}", summary.holdout.r_squared);
            println!("Model:               {}", paths.model().display());
            println!("Columns:             {}", paths.columns().display());
        }
        Commands::Serve { host, port } => {
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            let state = AppState::new(LazyPredictor::new(paths));
            let app = router(state);

            let addr: SocketAddr = config.bind_addr();
            let listener = tokio::net::TcpListener::bind(addr)
                .await
                .with_context(|| format!("cannot bind {addr}"))?;
            tracing::info!("Server listening on http://{}", addr);
            axum::serve(listener, app).await?;
        }
        Commands::Predict {
            location,
            sqft,
            bath,
            bhk,
        } => {
            let predictor = Predictor::load(&paths);
            let price = predictor.estimate(&location, sqft, bath, bhk)?;
            println!("{price:.2} lakh");
        }
    }

    Ok(())
}
