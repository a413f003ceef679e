//! Artifact Fetcher.

use log::info;

use crate::errors::ParityError;
use crate::model::TokenizerArtifact;
use crate::source::ArtifactSource;

/// Un único intento contra `url`; el cuerpo se devuelve sin tocar.
pub fn fetch_artifact<S: ArtifactSource + ?Sized>(source: &S, url: &str) -> Result<TokenizerArtifact, ParityError> {
    let artifact = source.fetch(url)
                         .map_err(|source| ParityError::ArtifactFetch { url: url.to_string(), source })?;
    info!("fetched artifact url={url} bytes={} sha256={}", artifact.as_bytes().len(), artifact.sha256());
    Ok(artifact)
}
