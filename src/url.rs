//! URL existence probing.
use anyhow::Result;

use crate::error::ItemError;

/// Outcome of probing a URL.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Probe {
    /// Final HTTP status after redirects (0 if no response was received).
    pub status: u16,
    /// Whether the server answered with a success status.
    pub reachable: bool,
}

/// Checks whether a remote resource exists before it is downloaded.
#[cfg_attr(test, mockall::automock)]
pub trait UrlProbe: Send + Sync + std::fmt::Debug {
    /// Probe `url`.
    ///
    /// # Errors
    ///
    /// Returns an error if the request could not be made at all (DNS, TLS,
    /// connection failures). HTTP error statuses are reported in [`Probe`].
    fn exists(&self, url: &str) -> Result<Probe>;
}

/// Fail with [`ItemError::UrlNotFound`] unless `url` answers with 200.
///
/// # Errors
///
/// Returns the probe's own error, or `UrlNotFound` naming the URL and status.
pub fn require(probe: &dyn UrlProbe, url: &str) -> Result<()> {
    let result = probe.exists(url)?;
    if !result.reachable || result.status != 200 {
        return Err(ItemError::UrlNotFound {
            url: url.to_string(),
            status: result.status,
        }
        .into());
    }
    Ok(())
}

/// [`UrlProbe`] issuing an HTTP `HEAD` request, following redirects.
#[derive(Debug, Default, Clone, Copy)]
pub struct HttpProbe;

impl UrlProbe for HttpProbe {
    fn exists(&self, url: &str) -> Result<Probe> {
        tracing::debug!("probing {url}");
        match ureq::head(url).call() {
            Ok(response) => {
                let status = response.status().as_u16();
                Ok(Probe {
                    status,
                    reachable: response.status().is_success(),
                })
            }
            Err(ureq::Error::StatusCode(status)) => Ok(Probe {
                status,
                reachable: false,
            }),
            Err(e) => Err(anyhow::Error::new(e).context(format!("probing {url}"))),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn require_accepts_200() {
        let mut probe = MockUrlProbe::new();
        probe.expect_exists().returning(|_| {
            Ok(Probe {
                status: 200,
                reachable: true,
            })
        });
        require(&probe, "https://example.com/a").unwrap();
    }

    #[test]
    fn require_rejects_404_with_url_and_status() {
        let mut probe = MockUrlProbe::new();
        probe.expect_exists().returning(|_| {
            Ok(Probe {
                status: 404,
                reachable: false,
            })
        });
        let err = require(&probe, "https://example.com/missing").unwrap_err();
        let msg = err.to_string();
        assert!(msg.contains("https://example.com/missing"), "{msg}");
        assert!(msg.contains("404"), "{msg}");
    }

    #[test]
    fn require_rejects_non_200_success() {
        let mut probe = MockUrlProbe::new();
        probe.expect_exists().returning(|_| {
            Ok(Probe {
                status: 204,
                reachable: true,
            })
        });
        assert!(require(&probe, "https://example.com/empty").is_err());
    }

    #[test]
    fn require_propagates_probe_errors() {
        let mut probe = MockUrlProbe::new();
        probe
            .expect_exists()
            .returning(|_| Err(anyhow::anyhow!("dns failure")));
        let err = require(&probe, "https://nowhere.invalid").unwrap_err();
        assert!(err.to_string().contains("dns failure"));
    }
}
