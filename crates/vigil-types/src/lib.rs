//! Shared type definitions for the Vigil night simulation.
//!
//! This crate holds the vocabulary the rest of the workspace speaks:
//! strongly-typed identifiers, spatial poses and the camera rig, scene
//! names, agent phases, and the simulation event enum. It has no logic
//! beyond small geometric helpers and no I/O.
//!
//! # Modules
//!
//! - [`ids`] -- Type-safe identifier wrappers ([`AgentId`]).
//! - [`enums`] -- Fieldless enums shared across crates ([`SceneId`],
//!   [`AgentPhase`]).
//! - [`pose`] -- Spatial pose with rate-limited turning, and the
//!   [`CameraRig`] written to during scare sequences.
//! - [`events`] -- [`SimEvent`], the observable outcomes of a tick.

pub mod enums;
pub mod events;
pub mod ids;
pub mod pose;

pub use enums::{AgentPhase, SceneId};
pub use events::SimEvent;
pub use ids::AgentId;
pub use pose::{CameraRig, Pose};
