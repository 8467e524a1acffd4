pub mod config;
pub mod error;
pub mod generator;
pub mod orchestrator;
pub mod source;
pub mod types;
pub mod writer;

pub use config::{ConfigLoader, ConfigValidator, YamlforgeConfig};
pub use error::AppError;
pub use generator::{GenerationContext, GenerationSettings, Pipeline, Template, TemplateCache};
pub use orchestrator::{
    default_parallel_limit, filter_definitions, DefinitionFailure, DefinitionOrchestrator,
    DefinitionSummary, GeneratedPipeline, GenerationReport,
};
pub use source::{Definition, DefinitionSource, SnapshotSource, SourceData, SourceError};
pub use types::*;
pub use writer::YamlWriter;
