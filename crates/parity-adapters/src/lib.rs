//! parity-adapters: adaptadores de red para `parity-core`.
//!
//! Provee `HttpArtifactFetcher`, la implementación HTTP de
//! `parity_core::ArtifactSource` usada para descargar `tokenizer.json` del hub.

pub mod http;

pub use http::HttpArtifactFetcher;
