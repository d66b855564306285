/// Storyboard: the per-session animation, sized to the attempt budget.
///
/// The `process` frames of the library are split into `attempts` segments
/// of `ceil(frames / attempts)` frames each, and one frame is drawn from
/// each segment:
///
///   slot 0              → library frame 0 (nothing drawn yet)
///   slot i (interior)   → random frame in segment i
///   slot attempts - 1   → last library frame (fully drawn)
///
/// With a single attempt, slot 0 is also the last slot and the last-frame
/// rule wins, so the only frame shown is the fully drawn one.
///
/// Victory and defeat sequences are copied as they are.

use rand::Rng;

use crate::domain::frames::{Frame, FrameLibrary, Stage};

#[derive(Clone, Debug)]
pub struct Storyboard {
    process: Vec<Frame>,
    victory: Vec<Frame>,
    defeat: Vec<Frame>,
}

impl Storyboard {
    /// Build a storyboard of exactly `attempts` process frames.
    ///
    /// `library.process` must be non-empty and `attempts` ≥ 1; both are
    /// checked when game data is loaded.
    pub fn generate<R: Rng + ?Sized>(library: &FrameLibrary, attempts: usize, rng: &mut R) -> Self {
        let process = frame_indexes(library.process.len(), attempts, rng)
            .into_iter()
            .map(|i| library.process[i].clone())
            .collect();

        Storyboard {
            process,
            victory: library.victory.clone(),
            defeat: library.defeat.clone(),
        }
    }

    pub fn stage(&self, stage: Stage) -> &[Frame] {
        match stage {
            Stage::Process => &self.process,
            Stage::Victory => &self.victory,
            Stage::Defeat => &self.defeat,
        }
    }

    /// Process frame shown after `used` wrong guesses.
    pub fn process_frame(&self, used: usize) -> &Frame {
        &self.process[used.min(self.process.len() - 1)]
    }
}

/// Select `segments` library indexes out of `frame_count` frames.
///
/// Result is non-decreasing, starts at 0 and ends at `frame_count - 1`
/// (except `segments == 1`, see module docs). When segments do not divide
/// the frame count evenly the trailing segments can run past the library;
/// their bounds are clamped to the last frame.
pub fn frame_indexes<R: Rng + ?Sized>(
    frame_count: usize,
    segments: usize,
    rng: &mut R,
) -> Vec<usize> {
    debug_assert!(frame_count >= 1 && segments >= 1);

    let last = frame_count - 1;
    let segment_len = frame_count.div_ceil(segments);

    let mut indexes = vec![0; segments];

    // Interior slots: one random frame per segment
    for i in 1..segments.saturating_sub(1) {
        let lo = (i * segment_len).min(last);
        let hi = (lo + segment_len).min(frame_count);
        indexes[i] = rng.gen_range(lo..hi);
    }

    indexes[segments - 1] = last;
    indexes
}
