//! Timeline - staged value tracks sampled by scroll progress.
//!
//! A timeline holds one track per (node, property) pair, each a list of
//! keyframes sorted by position. Sampling at progress `p` yields, per track,
//! the value of the last keyframe at or before `p` - or "pre-scope value"
//! when `p` is before the track's first keyframe. Timelines carry no clock
//! and no interpolation; they are driven through
//! [`crate::ScopeCtx::drive`].

use crate::page::NodeId;

// =============================================================================
// Timeline
// =============================================================================

#[derive(Debug, Clone)]
struct Track {
    node: NodeId,
    prop: String,
    /// (position, value), sorted by position.
    keyframes: Vec<(f64, String)>,
}

/// Ordered keyframes per (node, property) track.
///
/// # Example
///
/// ```ignore
/// let mut reveal = Timeline::new();
/// reveal.keyframe(title, "opacity", 0.1, "0.5");
/// reveal.keyframe(title, "opacity", 0.3, "1");
/// ctx.drive(reveal);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Timeline {
    tracks: Vec<Track>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a keyframe: at scroll position `at` (clamped to 0.0..=1.0) the
    /// property takes `value`. Keyframes may be added in any order.
    pub fn keyframe(&mut self, node: NodeId, prop: &str, at: f64, value: impl Into<String>) {
        let at = at.clamp(0.0, 1.0);
        let value = value.into();

        let index = match self
            .tracks
            .iter()
            .position(|t| t.node == node && t.prop == prop)
        {
            Some(index) => index,
            None => {
                self.tracks.push(Track {
                    node,
                    prop: prop.to_string(),
                    keyframes: Vec::new(),
                });
                self.tracks.len() - 1
            }
        };

        let track = &mut self.tracks[index];
        let insert_at = track.keyframes.partition_point(|(pos, _)| *pos <= at);
        track.keyframes.insert(insert_at, (at, value));
    }

    /// True if no keyframes were added.
    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }

    /// Number of tracks (distinct (node, property) pairs).
    pub fn track_count(&self) -> usize {
        self.tracks.len()
    }

    /// Value of every track at `progress`. `None` means "pre-scope value"
    /// (the track's first keyframe lies beyond `progress`).
    pub(crate) fn sample(&self, progress: f64) -> Vec<(NodeId, &str, Option<&str>)> {
        self.tracks
            .iter()
            .map(|track| {
                let value = track
                    .keyframes
                    .iter()
                    .take_while(|(pos, _)| *pos <= progress)
                    .last()
                    .map(|(_, value)| value.as_str());
                (track.node, track.prop.as_str(), value)
            })
            .collect()
    }
}

// =============================================================================
// Tests
// =============================================================================
