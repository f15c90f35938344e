pub mod etl;
pub mod extractor;
pub mod landing;
pub mod pipeline;

pub use crate::domain::model::{ExtractionResult, LandingObject};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
