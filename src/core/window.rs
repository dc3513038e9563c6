//! Response windows over the joint sample stream.
//!
//! A trial's window runs from cue onset to the moment the response was
//! made. With a recorded reaction time the cue onset is reconstructed as
//! `response - reaction_time - cue_offset`; when the trial timed out
//! without a response the window falls back to a fixed width.

use crate::config::WindowConfig;
use crate::core::displacement::pairwise_displacements;
use crate::core::position::Position3;
use crate::core::stats;

/// One joint sample reduced to what the aligner needs.
#[derive(Debug, Clone, Copy)]
pub struct AlignedSample {
    pub t_secs: f64,
    pub head: Position3,
    pub torso: Position3,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ResponseWindow {
    pub start: f64,
    pub end: f64,
}

impl ResponseWindow {
    pub fn for_response(
        response_time: f64,
        reaction_time: Option<f64>,
        cfg: &WindowConfig,
    ) -> Self {
        let start = match reaction_time {
            Some(rt) => response_time - rt - cfg.cue_offset_secs,
            None => response_time - cfg.timeout_window_secs,
        };
        Self {
            start,
            end: response_time,
        }
    }

    pub fn contains(&self, t_secs: f64) -> bool {
        t_secs >= self.start && t_secs <= self.end
    }

    pub fn duration_secs(&self) -> f64 {
        self.end - self.start
    }
}

/// Mean head and torso displacement over the samples inside the window.
///
/// Returns `None` when the window catches fewer than two samples: with no
/// consecutive pair there is no displacement to average, and the response
/// keeps a missing aggregate.
pub fn window_mean_displacements(
    samples: &[AlignedSample],
    window: &ResponseWindow,
) -> Option<(f64, f64)> {
    let mut heads = Vec::new();
    let mut torsos = Vec::new();
    for sample in samples {
        if window.contains(sample.t_secs) {
            heads.push(sample.head);
            torsos.push(sample.torso);
        }
    }

    let head_mean = stats::mean(&pairwise_displacements(&heads))?;
    let torso_mean = stats::mean(&pairwise_displacements(&torsos))?;
    Some((head_mean, torso_mean))
}
