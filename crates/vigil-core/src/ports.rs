//! Traits for the external collaborators the core calls into.
//!
//! The core is a deterministic in-memory simulation; everything with a
//! screen, a speaker, or an operating system behind it sits on the other
//! side of these ports. Implementations are provided by the surrounding
//! presentation layer. [`NoOpPorts`] serves headless runs, and
//! [`RecordingPorts`] lets tests assert exactly which boundary calls a
//! tick produced.

use vigil_types::SceneId;

/// Scene/level transition collaborator.
pub trait ScenePort {
    /// Request a transition to the named scene.
    fn load_scene(&mut self, scene: SceneId);
}

/// Cursor lock and visibility collaborator.
pub trait CursorPort {
    /// Lock or unlock the cursor to the game window.
    fn set_locked(&mut self, locked: bool);
    /// Show or hide the cursor.
    fn set_visible(&mut self, visible: bool);
}

/// One-shot audio trigger collaborator. Fire-and-forget; no completion
/// callback is ever required.
pub trait AudioPort {
    /// Request playback of the cue with the given handle.
    fn play_cue(&mut self, cue: &str);
}

/// Display text sink for the HUD hour readout.
pub trait HudPort {
    /// Replace the displayed hour string.
    fn set_hour_text(&mut self, text: &str);
}

/// Everything the tick cycle needs from the presentation layer.
pub trait Ports: ScenePort + CursorPort + AudioPort + HudPort {}

impl<T: ScenePort + CursorPort + AudioPort + HudPort> Ports for T {}

/// A presentation layer that ignores every call. Used for headless runs
/// and tests that do not assert on boundary traffic.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoOpPorts;

impl ScenePort for NoOpPorts {
    fn load_scene(&mut self, _scene: SceneId) {}
}

impl CursorPort for NoOpPorts {
    fn set_locked(&mut self, _locked: bool) {}
    fn set_visible(&mut self, _visible: bool) {}
}

impl AudioPort for NoOpPorts {
    fn play_cue(&mut self, _cue: &str) {}
}

impl HudPort for NoOpPorts {
    fn set_hour_text(&mut self, _text: &str) {}
}

/// A presentation layer that records every call for inspection.
#[derive(Debug, Clone, Default)]
pub struct RecordingPorts {
    /// Scenes requested, in order.
    pub scenes: Vec<SceneId>,
    /// Cursor lock states requested, in order.
    pub cursor_locks: Vec<bool>,
    /// Cursor visibility states requested, in order.
    pub cursor_visibility: Vec<bool>,
    /// Audio cues requested, in order.
    pub cues: Vec<String>,
    /// Hour strings displayed, in order.
    pub hour_texts: Vec<String>,
}

impl RecordingPorts {
    /// Create an empty recorder.
    pub const fn new() -> Self {
        Self {
            scenes: Vec::new(),
            cursor_locks: Vec::new(),
            cursor_visibility: Vec::new(),
            cues: Vec::new(),
            hour_texts: Vec::new(),
        }
    }
}

impl ScenePort for RecordingPorts {
    fn load_scene(&mut self, scene: SceneId) {
        self.scenes.push(scene);
    }
}

impl CursorPort for RecordingPorts {
    fn set_locked(&mut self, locked: bool) {
        self.cursor_locks.push(locked);
    }

    fn set_visible(&mut self, visible: bool) {
        self.cursor_visibility.push(visible);
    }
}

impl AudioPort for RecordingPorts {
    fn play_cue(&mut self, cue: &str) {
        self.cues.push(cue.to_owned());
    }
}

impl HudPort for RecordingPorts {
    fn set_hour_text(&mut self, text: &str) {
        self.hour_texts.push(text.to_owned());
    }
}
