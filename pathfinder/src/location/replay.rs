//! Replay location provider.
//!
//! Emits a fixed track of positions at a steady interval. Stands in for the
//! platform location service in simulations and integration tests.
//!
//! # Track file format
//!
//! One fix per line, `lat,lon[,accuracy_m]`. Blank lines and lines starting
//! with `#` are ignored.
//!
//! ```text
//! # Academic Plaza -> Kyle Field
//! 30.6153,-96.3410,5
//! 30.6140,-96.3405
//! ```

use std::path::{Path, PathBuf};
use std::time::Duration;

use futures::future::BoxFuture;
use thiserror::Error;
use tokio::sync::mpsc;

use super::provider::{LocationError, LocationProvider, PositionStream};
use crate::geo::{Coordinate, Position};

/// Default interval between replayed fixes.
pub const DEFAULT_REPLAY_INTERVAL: Duration = Duration::from_secs(1);

/// Channel capacity for replayed fixes.
const STREAM_CAPACITY: usize = 16;

/// Errors loading a track file.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Failed to read the track file.
    #[error("Failed to read track file {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    /// A line could not be parsed.
    #[error("Invalid track line {line}: {reason}")]
    Parse { line: usize, reason: String },
}

/// Replay behaviour.
#[derive(Debug, Clone)]
pub struct ReplayConfig {
    /// Delay between consecutive fixes (also before the first one).
    pub interval: Duration,
    /// Simulate the user refusing the permission prompt.
    pub deny_permission: bool,
    /// Stamp each fix with the wall-clock time it is emitted.
    pub stamp_fixes: bool,
}

impl Default for ReplayConfig {
    fn default() -> Self {
        Self {
            interval: DEFAULT_REPLAY_INTERVAL,
            deny_permission: false,
            stamp_fixes: true,
        }
    }
}

/// Location provider that replays a recorded track.
#[derive(Debug, Clone)]
pub struct ReplayLocationProvider {
    track: Vec<Position>,
    config: ReplayConfig,
}

impl ReplayLocationProvider {
    /// Create a provider from an in-memory track.
    pub fn new(track: Vec<Position>, config: ReplayConfig) -> Self {
        Self { track, config }
    }

    /// Load a track from a `lat,lon[,accuracy]` file.
    pub fn from_track_file(path: &Path, config: ReplayConfig) -> Result<Self, ReplayError> {
        let text = std::fs::read_to_string(path).map_err(|source| ReplayError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(Self::new(parse_track(&text)?, config))
    }

    /// Number of fixes in the track.
    pub fn len(&self) -> usize {
        self.track.len()
    }

    /// Whether the track is empty.
    pub fn is_empty(&self) -> bool {
        self.track.is_empty()
    }
}

impl LocationProvider for ReplayLocationProvider {
    fn start_updates(&self) -> BoxFuture<'_, Result<PositionStream, LocationError>> {
        Box::pin(async move {
            if self.config.deny_permission {
                return Err(LocationError::PermissionDenied);
            }

            let (tx, rx) = mpsc::channel(STREAM_CAPACITY);
            let track = self.track.clone();
            let interval = self.config.interval;
            let stamp = self.config.stamp_fixes;

            tokio::spawn(async move {
                for position in track {
                    tokio::time::sleep(interval).await;
                    let position = if stamp {
                        position.stamped_now()
                    } else {
                        position
                    };
                    if tx.send(Ok(position)).await.is_err() {
                        break;
                    }
                }
            });

            Ok(rx)
        })
    }
}

/// Parse a `lat,lon[,accuracy]` track.
pub fn parse_track(text: &str) -> Result<Vec<Position>, ReplayError> {
    let mut track = Vec::new();

    for (idx, raw) in text.lines().enumerate() {
        let line = raw.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        let mut fields = line.split(',').map(str::trim);
        let lat = fields.next().unwrap_or_default();
        let lon = fields.next().ok_or_else(|| ReplayError::Parse {
            line: idx + 1,
            reason: "expected 'lat,lon[,accuracy]'".to_string(),
        })?;

        let coordinate: Coordinate = format!("{},{}", lat, lon)
            .parse()
            .map_err(|reason| ReplayError::Parse {
                line: idx + 1,
                reason,
            })?;

        let mut position = Position {
            coordinate,
            accuracy_m: None,
            timestamp: None,
        };

        if let Some(acc) = fields.next().filter(|s| !s.is_empty()) {
            let accuracy: f64 = acc.parse().map_err(|_| ReplayError::Parse {
                line: idx + 1,
                reason: format!("invalid accuracy '{}'", acc),
            })?;
            position = position.with_accuracy(accuracy);
        }

        track.push(position);
    }

    Ok(track)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_track_skips_comments_and_blanks() {
        let text = "# header\n30.6153,-96.3410,5\n\n30.6140, -96.3405\n";
        let track = parse_track(text).unwrap();

        assert_eq!(track.len(), 2);
        assert_eq!(track[0].accuracy_m, Some(5.0));
        assert_eq!(track[1].coordinate, Coordinate::new(30.6140, -96.3405));
        assert!(track[1].accuracy_m.is_none());
    }

    #[test]
    fn test_parse_track_reports_line_number() {
        let text = "30.6,-96.3\nnot-a-number,1\n";
        let err = parse_track(text).unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_parse_track_rejects_missing_longitude() {
        let err = parse_track("30.6\n").unwrap_err();
        assert!(matches!(err, ReplayError::Parse { line: 1, .. }));
    }

    #[test]
    fn test_from_track_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "30.6153,-96.3410").unwrap();
        writeln!(file, "30.6140,-96.3405").unwrap();

        let provider =
            ReplayLocationProvider::from_track_file(file.path(), ReplayConfig::default()).unwrap();
        assert_eq!(provider.len(), 2);
    }

    #[tokio::test(start_paused = true)]
    async fn test_replays_track_in_order_then_closes() {
        let provider = ReplayLocationProvider::new(
            vec![Position::new(1.0, 1.0), Position::new(2.0, 2.0)],
            ReplayConfig {
                stamp_fixes: false,
                ..Default::default()
            },
        );

        let mut rx = provider.start_updates().await.unwrap();
        assert_eq!(rx.recv().await.unwrap().unwrap(), Position::new(1.0, 1.0));
        assert_eq!(rx.recv().await.unwrap().unwrap(), Position::new(2.0, 2.0));
        assert!(rx.recv().await.is_none());
    }

    #[tokio::test]
    async fn test_denied_permission() {
        let provider = ReplayLocationProvider::new(
            vec![Position::new(1.0, 1.0)],
            ReplayConfig {
                deny_permission: true,
                ..Default::default()
            },
        );

        let result = provider.start_updates().await;
        assert!(matches!(result, Err(LocationError::PermissionDenied)));
    }
}
