//! Frame asset retrieval: a remote object store first, then ordered local
//! filesystem roots. No caching, no retries; a remembered remote failure is
//! surfaced only when no fallback succeeds.

use std::path::PathBuf;
use std::str::FromStr;
use std::{fmt, io};

use anyhow::Context;
use reqwest::Url;
use tracing::{debug, warn};

use crate::foundation::error::{MockupError, MockupResult};

/// Frame orientation. Presentation-time only; catalog resolutions stay
/// portrait-canonical.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum Orientation {
    #[default]
    Portrait,
    Landscape,
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Portrait => write!(f, "Portrait"),
            Self::Landscape => write!(f, "Landscape"),
        }
    }
}

impl FromStr for Orientation {
    type Err = MockupError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Portrait" => Ok(Self::Portrait),
            "Landscape" => Ok(Self::Landscape),
            other => Err(MockupError::invalid_selection(format!(
                "orientation must be Portrait or Landscape, got '{other}'"
            ))),
        }
    }
}

/// Identifies one frame asset: model, colorway, orientation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FrameKey {
    pub model: String,
    pub color: String,
    pub orientation: Orientation,
}

impl FrameKey {
    /// On-disk and remote file name, e.g.
    /// `iPhone 16 - Black - Portrait.png`. Files live under a directory named
    /// after the model.
    pub fn filename(&self) -> String {
        format!("{} - {} - {}.png", self.model, self.color, self.orientation)
    }

    /// Filename offered to the user for the finished mockup, with whitespace
    /// replaced by hyphens, e.g. `mockup-iPhone-16-Black.png`.
    pub fn download_name(&self) -> String {
        format!("mockup-{}-{}.png", self.model, self.color).replace(char::is_whitespace, "-")
    }
}

impl fmt::Display for FrameKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {} - {}", self.model, self.color, self.orientation)
    }
}

/// Fetches frame bytes for a [`FrameKey`], trying the remote base URL first
/// and falling back to each local root in order.
#[derive(Clone, Debug)]
pub struct FrameStore {
    remote_base: Option<Url>,
    local_roots: Vec<PathBuf>,
    client: reqwest::Client,
}

impl FrameStore {
    /// Build a store from ordered local roots and an optional remote base URL.
    pub fn new(local_roots: Vec<PathBuf>, remote_base: Option<&str>) -> MockupResult<Self> {
        let remote_base = match remote_base {
            Some(base) if !base.trim().is_empty() => {
                let url = Url::parse(base.trim().trim_end_matches('/'))
                    .with_context(|| format!("invalid frames base url: {base}"))?;
                Some(url)
            }
            _ => None,
        };
        Ok(Self {
            remote_base,
            local_roots,
            client: reqwest::Client::new(),
        })
    }

    /// A store that only reads local roots.
    pub fn local_only(local_roots: Vec<PathBuf>) -> Self {
        Self {
            remote_base: None,
            local_roots,
            client: reqwest::Client::new(),
        }
    }

    /// Load frame bytes, or `Ok(None)` when no source has them.
    pub async fn load(&self, key: &FrameKey) -> MockupResult<Option<Vec<u8>>> {
        let mut remote_err = None;

        if let Some(base) = &self.remote_base {
            match self.load_remote(base, key).await {
                Ok(Some(bytes)) => return Ok(Some(bytes)),
                Ok(None) => {}
                Err(e) => {
                    warn!(frame = %key, error = %e, "remote frame fetch failed, trying local roots");
                    remote_err = Some(e);
                }
            }
        }

        for root in &self.local_roots {
            let path = root.join(&key.model).join(key.filename());
            match tokio::fs::read(&path).await {
                Ok(bytes) => {
                    debug!(frame = %key, path = %path.display(), "loaded local frame");
                    return Ok(Some(bytes));
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(MockupError::Other(anyhow::Error::new(e).context(format!(
                        "failed to read frame file {}",
                        path.display()
                    ))));
                }
            }
        }

        match remote_err {
            Some(e) => Err(e),
            None => Ok(None),
        }
    }

    async fn load_remote(&self, base: &Url, key: &FrameKey) -> MockupResult<Option<Vec<u8>>> {
        let mut url = base.clone();
        url.path_segments_mut()
            .map_err(|_| MockupError::Other(anyhow::anyhow!("frames base url cannot hold a path")))?
            .push(&key.model)
            .push(&key.filename());

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .with_context(|| format!("fetch frame from {url}"))?;

        if response.status() == reqwest::StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(MockupError::Other(anyhow::anyhow!(
                "frame fetch from {url} returned HTTP {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .with_context(|| format!("read frame body from {url}"))?;
        debug!(frame = %key, "loaded remote frame");
        Ok(Some(bytes.to_vec()))
    }
}

#[cfg(test)]
#[path = "../../tests/unit/assets/frames.rs"]
mod tests;
