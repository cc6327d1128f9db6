use std::path::PathBuf;

use async_trait::async_trait;
use thiserror::Error;
use veil_model::SourceLocator;

#[derive(Debug, Error)]
pub enum LoaderError {
    #[error("placeholder source {0} cannot be loaded by this loader")]
    Unsupported(String),

    #[error("failed to read placeholder {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to decode placeholder: {0}")]
    Decode(#[from] image::ImageError),

    #[error("placeholder load task failed: {0}")]
    Task(String),
}

/// Loads a placeholder out of band, independent of the rendered element.
///
/// Completion only signals that the bytes are available; the loaded data is
/// not handed back.
#[async_trait]
pub trait PlaceholderLoader: Send + Sync + 'static {
    async fn load(&self, source: &SourceLocator) -> Result<(), LoaderError>;
}

/// Loads placeholders from the local filesystem.
///
/// Accepts `file://` URLs and plain paths. Any other URL scheme is
/// rejected; network fetching belongs to the host.
#[derive(Debug, Clone, Default)]
pub struct LocalFileLoader {
    root: Option<PathBuf>,
}

impl LocalFileLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve relative paths (including root-relative web paths such as
    /// `/static/a.jpg`) against `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }

    pub fn resolve(&self, source: &SourceLocator) -> Result<PathBuf, LoaderError> {
        if let Some(url) = source.as_url() {
            if url.scheme() != "file" {
                return Err(LoaderError::Unsupported(source.to_string()));
            }
            return url
                .to_file_path()
                .map_err(|_| LoaderError::Unsupported(source.to_string()));
        }

        let path = PathBuf::from(source.as_str());
        Ok(match &self.root {
            Some(root) => root.join(path.strip_prefix("/").unwrap_or(&path)),
            None => path,
        })
    }
}

#[async_trait]
impl PlaceholderLoader for LocalFileLoader {
    async fn load(&self, source: &SourceLocator) -> Result<(), LoaderError> {
        if source.is_inline() {
            return Ok(());
        }

        let path = self.resolve(source)?;
        let bytes = tokio::fs::read(&path)
            .await
            .map_err(|source| LoaderError::Io {
                path: path.clone(),
                source,
            })?;

        tokio::task::spawn_blocking(move || {
            image::load_from_memory(&bytes).map(|_| ())
        })
        .await
        .map_err(|err| LoaderError::Task(err.to_string()))??;

        log::debug!("placeholder {} loaded from {}", source, path.display());
        Ok(())
    }
}
