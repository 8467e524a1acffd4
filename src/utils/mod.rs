//! Utility helpers: serialization helpers (JSON/YAML/file serializers) and name sanitizing.
pub mod naming;
pub mod serialization;

pub use naming::{sanitize_identifier, sanitize_name};
pub use serialization::FileSerializer;
pub use serialization::FileUtils;
pub use serialization::JsonSerializer;
pub use serialization::Serializer;
pub use serialization::YamlSerializer;
