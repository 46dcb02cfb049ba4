//! Annotation persistence: wire format, shape conversion, caching and the
//! service boundary.

pub mod bridge;
mod cache;
mod error;
mod file_store;
mod service;
mod wire;

#[cfg(test)]
mod tests;

pub use cache::AnnotationCache;
pub use error::PersistError;
pub use file_store::FileAnnotationService;
pub use service::{AnnotationService, MemoryAnnotationService, ServiceCall};
pub use wire::{SaveRequest, WireAnnotation, WireGeometry, decode_payload};
