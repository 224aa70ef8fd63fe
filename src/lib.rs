//! # bangalore-homeprice
//!
//! House price estimates for Bengaluru listings: a cleaning pipeline that turns
//! the raw listings CSV into a feature matrix, an ordinary least squares
//! trainer that persists the model with its column order, and a predictor
//! served over HTTP.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: models carry their training state in the type
//!   system (`Unfitted` vs `Fitted`); only a fitted model can predict or be saved.
//! - **Fixed Schema**: the column order written at build time is the contract
//!   the predictor rebuilds feature vectors against.
//! - **Loud Builds, Quiet Serving**: build errors abort; missing artifacts at
//!   serve time degrade to "unavailable" answers instead of crashing.
//!
//! ## Quick Start
//!
//! ```rust
//! use bangalore_homeprice::model::{Fitted, LinearModel, LinearParams};
//! use bangalore_homeprice::predictor::Predictor;
//! use ndarray::array;
//!
//! let model = LinearModel::<Fitted>::new(LinearParams {
//!     coefficients: array![0.05, 2.0, 3.0, 40.0],
//!     intercept: 1.0,
//! });
//! let columns: Vec<String> = ["total_sqft", "bath", "bhk", "1st block"]
//!     .iter()
//!     .map(|s| s.to_string())
//!     .collect();
//! let predictor = Predictor::from_parts(model, &columns);
//!
//! let price = predictor.estimate("1ST BLOCK", 1000.0, 2, 2).unwrap();
//! assert_eq!(price, 101.0);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: raw CSV records and the named feature matrix
//! - `preprocessing`: parsing, outlier filters, one-hot encoding, the pipeline
//! - `model`: linear regression with compile-time state
//! - `trainer`: holdout split, fit and scoring
//! - `artifacts`: model and column list on disk
//! - `predictor`: feature vector reconstruction and estimates
//! - `api`: axum routes

/// HTTP routes and handlers.
pub mod api;

/// Model and column-list files.
pub mod artifacts;

/// The offline build: dataset to artifacts.
pub mod build;

pub mod config;

/// Raw records and feature matrices.
pub mod dataset;

/// Regression scores.
pub mod metrics;

/// Models with compile-time state safety.
pub mod model;

pub mod predictor;

/// Cleaning and feature building.
pub mod preprocessing;

/// Model persistence.
pub mod serialization;

/// Training orchestration.
pub mod trainer;

pub use artifacts::{ArtifactError, ArtifactPaths};
pub use build::{build_artifacts, BuildError, BuildSummary};
pub use config::Config;
pub use model::{Fitted, InferenceModel, LinearModel, LinearRegression, Unfitted};
pub use predictor::{LazyPredictor, Predictor, Unavailable};
pub use trainer::{Trainer, TrainingOutcome};
