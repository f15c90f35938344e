pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{cli::LocalStorage, CliConfig};

#[cfg(feature = "lambda")]
pub use config::lambda::{LambdaConfig, S3Storage};

pub use core::{
    etl::EtlEngine, extractor::PlaylistExtractor, landing::LandingWriter,
    pipeline::SnapshotPipeline,
};
pub use domain::model::{Credentials, ExtractionResult, PlaylistRef};
pub use utils::error::{EtlError, Result};
