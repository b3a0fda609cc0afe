pub mod etl;
pub mod pipeline;
pub mod samples;

pub use crate::domain::model::{Sentence, TransformResult, TripInfo};
pub use crate::domain::ports::{ConfigProvider, NerBackend, Pipeline, Storage};
pub use crate::utils::error::Result;
