//! yt-dlp subprocess backend.
//!
//! Invokes the yt-dlp binary with `--dump-single-json` so nothing is
//! downloaded to the server; stdout carries the metadata JSON and stderr
//! carries the diagnostic text on failure. The child is spawned with
//! kill-on-drop so a cancelled attempt does not leave an orphaned process.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{BackendError, ExtractOptions, ExtractionBackend};
use crate::domain::platform::PlatformProfile;
use crate::domain::resolution::RawExtraction;

/// Mobile client user agent; the web player path is blocked far more often.
const USER_AGENT: &str =
    "com.google.android.youtube/19.09.37 (Linux; U; Android 11) gzip";

/// Extraction backend that shells out to yt-dlp.
pub struct YtDlpExtractor {
    bin: PathBuf,
    socket_timeout: Duration,
}

impl YtDlpExtractor {
    /// Creates a backend for the given binary name or path.
    ///
    /// `socket_timeout` is passed through to yt-dlp's own network timeout;
    /// the per-attempt wall-clock budget is enforced by the coordinator.
    pub fn new(bin: impl Into<PathBuf>, socket_timeout: Duration) -> Self {
        Self {
            bin: bin.into(),
            socket_timeout,
        }
    }

    /// Assembles the argument list for one extraction call.
    ///
    /// Retries are forced to zero: the coordinator owns the retry policy and
    /// a backend that silently retried would multiply it.
    fn build_args(&self, url: &str, options: ExtractOptions) -> Vec<String> {
        let mut args = vec![
            "--dump-single-json".to_string(),
            "--no-warnings".to_string(),
            "--no-playlist".to_string(),
            "--format".to_string(),
            "best".to_string(),
            "--retries".to_string(),
            "0".to_string(),
            "--socket-timeout".to_string(),
            self.socket_timeout.as_secs().to_string(),
            "--geo-bypass".to_string(),
            "--no-check-certificates".to_string(),
            "--user-agent".to_string(),
            USER_AGENT.to_string(),
        ];

        // Per-site hardening; mirrors what keeps these extractors working
        // against bot detection.
        match options.platform {
            PlatformProfile::YouTube => {
                args.push("--extractor-args".to_string());
                args.push(
                    "youtube:player_client=android_creator,android,ios;\
                     player_skip=webpage,configs,js"
                        .to_string(),
                );
            }
            PlatformProfile::TikTok => {
                args.push("--extractor-args".to_string());
                args.push(
                    "tiktok:api_hostname=api22-normal-c-useast2a.tiktokv.com".to_string(),
                );
            }
            _ => {}
        }

        args.push("--".to_string());
        args.push(url.to_string());
        args
    }
}

#[async_trait]
impl ExtractionBackend for YtDlpExtractor {
    fn name(&self) -> &'static str {
        "yt-dlp"
    }

    async fn extract(
        &self,
        url: &str,
        options: ExtractOptions,
    ) -> Result<RawExtraction, BackendError> {
        let args = self.build_args(url, options);
        debug!(backend = self.name(), platform = %options.platform, "Spawning extractor");

        let output = Command::new(&self.bin)
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|e| {
                if e.kind() == std::io::ErrorKind::NotFound {
                    BackendError::NotInstalled(self.bin.display().to_string())
                } else {
                    BackendError::Io(e.to_string())
                }
            })?;

        if !output.status.success() {
            let diagnostic = String::from_utf8_lossy(&output.stderr).trim().to_string();
            warn!(backend = self.name(), platform = %options.platform, "Extractor failed");
            return Err(BackendError::Extractor { diagnostic });
        }

        serde_json::from_slice::<RawExtraction>(&output.stdout)
            .map_err(|e| BackendError::InvalidOutput(e.to_string()))
    }

    async fn is_available(&self) -> bool {
        which::which(&self.bin).is_ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn extractor() -> YtDlpExtractor {
        YtDlpExtractor::new("yt-dlp", Duration::from_secs(30))
    }

    #[test]
    fn test_args_never_download() {
        let args = extractor().build_args(
            "https://www.youtube.com/watch?v=abc",
            ExtractOptions {
                platform: PlatformProfile::YouTube,
            },
        );
        assert!(args.contains(&"--dump-single-json".to_string()));
        assert!(!args.iter().any(|a| a == "--output" || a == "-o"));
    }

    #[test]
    fn test_args_disable_backend_retries() {
        let args = extractor().build_args(
            "https://example.com/v",
            ExtractOptions {
                platform: PlatformProfile::Generic,
            },
        );
        let idx = args.iter().position(|a| a == "--retries").unwrap();
        assert_eq!(args[idx + 1], "0");
    }

    #[test]
    fn test_args_youtube_player_client_tuning() {
        let args = extractor().build_args(
            "https://www.youtube.com/watch?v=abc",
            ExtractOptions {
                platform: PlatformProfile::YouTube,
            },
        );
        assert!(
            args.iter()
                .any(|a| a.starts_with("youtube:player_client=android_creator"))
        );
    }

    #[test]
    fn test_args_generic_has_no_extractor_args() {
        let args = extractor().build_args(
            "https://vimeo.com/123",
            ExtractOptions {
                platform: PlatformProfile::Generic,
            },
        );
        assert!(!args.contains(&"--extractor-args".to_string()));
    }

    #[test]
    fn test_args_url_is_terminal_after_separator() {
        let args = extractor().build_args(
            "https://example.com/v",
            ExtractOptions {
                platform: PlatformProfile::Generic,
            },
        );
        let len = args.len();
        assert_eq!(args[len - 2], "--");
        assert_eq!(args[len - 1], "https://example.com/v");
    }
}
