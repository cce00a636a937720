//! Spatial poses and the player camera rig.
//!
//! The simulation is 3D but orientation is horizontal-only: an agent's
//! facing is a yaw angle around the vertical axis, and turning toward the
//! player is rate-limited rather than snapped, which is what produces the
//! visible "tracking" tell while an agent advances.
//!
//! Conventions: yaw 0 faces +Z, positive yaw turns toward +X, so
//! `forward = (sin yaw, 0, cos yaw)`. The camera rig uses the matching
//! quaternion convention (`rotation * Vec3::Z` is forward).

use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Distance below which two points are considered coincident.
const DEGENERATE_DISTANCE: f32 = 1e-6;

/// Position plus horizontal facing.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    /// World position.
    pub position: Vec3,
    /// Facing angle in radians around the vertical axis (0 faces +Z).
    pub yaw: f32,
}

impl Pose {
    /// Create a pose from a position and yaw angle.
    pub const fn new(position: Vec3, yaw: f32) -> Self {
        Self { position, yaw }
    }

    /// Create a pose at the given position facing +Z.
    pub const fn at(position: Vec3) -> Self {
        Self {
            position,
            yaw: 0.0,
        }
    }

    /// Return the horizontal forward direction for the current yaw.
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.yaw.sin(), 0.0, self.yaw.cos())
    }

    /// Return the yaw angle that would face the given point, ignoring the
    /// vertical component. Returns the current yaw when the point is
    /// directly above or below (degenerate bearing).
    pub fn yaw_toward(&self, point: Vec3) -> f32 {
        let delta = point - self.position;
        let flat = Vec3::new(delta.x, 0.0, delta.z);
        if flat.length_squared() < DEGENERATE_DISTANCE {
            self.yaw
        } else {
            flat.x.atan2(flat.z)
        }
    }

    /// Rotate the pose toward the given point, limited to `max_delta`
    /// radians of turn. The shortest angular direction is taken.
    pub fn turn_toward(&mut self, point: Vec3, max_delta: f32) {
        let target = self.yaw_toward(point);
        let diff = wrap_angle(target - self.yaw);
        let step = diff.clamp(-max_delta.abs(), max_delta.abs());
        self.yaw = wrap_angle(self.yaw + step);
    }

    /// Snap the facing straight at the given point (no rate limit).
    pub fn face(&mut self, point: Vec3) {
        self.yaw = self.yaw_toward(point);
    }

    /// Horizontal-inclusive distance to a point.
    pub fn distance_to(&self, point: Vec3) -> f32 {
        self.position.distance(point)
    }
}

/// Wrap an angle in radians to the `(-PI, PI]` range.
pub fn wrap_angle(angle: f32) -> f32 {
    let wrapped = angle.rem_euclid(core::f32::consts::TAU);
    if wrapped > core::f32::consts::PI {
        wrapped - core::f32::consts::TAU
    } else {
        wrapped
    }
}

/// Move a point toward a target by at most `max_step`, without overshoot.
pub fn move_towards(current: Vec3, target: Vec3, max_step: f32) -> Vec3 {
    let delta = target - current;
    let distance = delta.length();
    if distance <= max_step || distance < DEGENERATE_DISTANCE {
        target
    } else {
        current + delta * (max_step / distance)
    }
}

/// The player's camera, as seen by the core.
///
/// The core reads the camera's eye position and forward vector for the
/// repel view-cone check, and writes the local offset and rotation during
/// a scare sequence. The resting local offset is remembered so the shake
/// can be cleanly restored.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CameraRig {
    /// World position of the rig anchor (the player's head).
    pub position: Vec3,
    /// Resting local offset of the camera relative to the anchor.
    base_offset: Vec3,
    /// Current local offset; differs from the base only while shaking.
    local_offset: Vec3,
    /// Camera orientation.
    pub rotation: Quat,
}

impl CameraRig {
    /// Create a rig at the given anchor with zero local offset.
    pub const fn new(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            base_offset: Vec3::ZERO,
            local_offset: Vec3::ZERO,
            rotation,
        }
    }

    /// Create a rig looking horizontally along the given yaw.
    pub fn facing(position: Vec3, yaw: f32) -> Self {
        Self::new(position, Quat::from_rotation_y(yaw))
    }

    /// The camera's world-space eye position (anchor plus local offset).
    pub fn eye(&self) -> Vec3 {
        self.position + self.local_offset
    }

    /// The camera's forward direction.
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }

    /// The current local offset (perturbed while a shake is running).
    pub const fn local_offset(&self) -> Vec3 {
        self.local_offset
    }

    /// Replace the local offset with the resting offset plus `offset`.
    pub fn set_shake_offset(&mut self, offset: Vec3) {
        self.local_offset = self.base_offset + offset;
    }

    /// Restore the camera to its resting local offset.
    pub const fn clear_shake(&mut self) {
        self.local_offset = self.base_offset;
    }

    /// Rotate the camera to look straight at a world-space point.
    ///
    /// Degenerate targets (at the eye position) leave the rotation
    /// unchanged.
    pub fn look_at(&mut self, point: Vec3) {
        let delta = point - self.eye();
        if delta.length_squared() >= DEGENERATE_DISTANCE {
            self.rotation = Quat::from_rotation_arc(Vec3::Z, delta.normalize());
        }
    }

    /// Angle in radians between the camera's forward vector and the
    /// bearing from the eye to the given point. A degenerate bearing
    /// (point at the eye) is reported as 0.
    pub fn angle_to(&self, point: Vec3) -> f32 {
        let delta = point - self.eye();
        if delta.length_squared() < DEGENERATE_DISTANCE {
            0.0
        } else {
            self.forward().angle_between(delta)
        }
    }
}
