//! Map camera follow policy.
//!
//! Decides, for every location fix or user gesture, where the map camera
//! should be. The policy is a pure function of the current camera and the
//! event; it owns no state and performs no I/O.
//!
//! # State Machine
//!
//! ```text
//! Following(unset) --[first fix]--------> Following(centered on initial fix)
//! Following        --[fix]--------------> Following(centered on fix)
//! Following        --[user pan/zoom]----> Manual
//! Manual(unset)    --[first fix]--------> Manual(placed on initial fix)
//! Manual           --[fix]--------------> Manual (unchanged)
//! Manual           --[user pan/zoom]----> Manual
//! ```
//!
//! There is no transition back to `Following` within a session; a new
//! session starts with a fresh, unset camera.

use crate::geo::{Position, Region};

/// Default edge length of the square viewport used for every recenter.
pub const DEFAULT_VIEWPORT_M: f64 = 1000.0;

/// Who controls the camera.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CameraMode {
    /// The camera recenters on the user's position automatically.
    #[default]
    Following,
    /// The user has taken control; location fixes leave the camera alone.
    Manual,
}

impl CameraMode {
    /// Short label for status output.
    pub fn label(&self) -> &'static str {
        match self {
            CameraMode::Following => "following",
            CameraMode::Manual => "manual",
        }
    }
}

/// The map's visible region and who controls it.
///
/// `region` is `None` until the first placement; a camera in that state is
/// considered unset.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CameraState {
    pub mode: CameraMode,
    pub region: Option<Region>,
}

impl CameraState {
    /// Whether the camera has never been placed.
    pub fn is_unset(&self) -> bool {
        self.region.is_none()
    }

    /// Whether the camera auto-follows the user.
    pub fn is_following(&self) -> bool {
        self.mode == CameraMode::Following
    }
}

/// Input to the follow policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum CameraEvent {
    /// A location fix arrived. `initial_fix` is the session's first fix.
    Position {
        position: Position,
        initial_fix: Position,
    },
    /// The user panned or zoomed the map, optionally reporting the region
    /// they left it at.
    UserPanned { region: Option<Region> },
}

/// Camera follow policy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapFollowPolicy {
    /// Edge length in meters of the square viewport used when recentering.
    viewport_m: f64,
}

impl Default for MapFollowPolicy {
    fn default() -> Self {
        Self::new(DEFAULT_VIEWPORT_M)
    }
}

impl MapFollowPolicy {
    /// Create a policy with the given viewport edge length.
    pub fn new(viewport_m: f64) -> Self {
        Self { viewport_m }
    }

    /// Viewport edge length in meters.
    pub fn viewport_m(&self) -> f64 {
        self.viewport_m
    }

    /// Compute the next camera state.
    pub fn next_camera(&self, current: &CameraState, event: &CameraEvent) -> CameraState {
        match (current.mode, event) {
            (
                CameraMode::Following,
                CameraEvent::Position {
                    position,
                    initial_fix,
                },
            ) => {
                let anchor = if current.is_unset() {
                    initial_fix
                } else {
                    position
                };
                CameraState {
                    mode: CameraMode::Following,
                    region: Some(Region::square(anchor.coordinate, self.viewport_m)),
                }
            }

            (CameraMode::Manual, CameraEvent::Position { initial_fix, .. }) if current.is_unset() => {
                CameraState {
                    mode: CameraMode::Manual,
                    region: Some(Region::square(initial_fix.coordinate, self.viewport_m)),
                }
            }

            (CameraMode::Manual, CameraEvent::Position { .. }) => *current,

            (_, CameraEvent::UserPanned { region }) => CameraState {
                mode: CameraMode::Manual,
                region: (*region).or(current.region),
            },
        }
    }
}
