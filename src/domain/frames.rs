/// Animation frames and the stages they belong to.
///
/// A frame is a block of text lines, opaque to the game rules. The frame
/// library groups frames by stage: `process` holds the damage sequence
/// (index 0 = untouched, last = fully drawn), `victory` and `defeat` hold
/// the closing sequences.

use serde::Deserialize;

#[derive(Clone, Debug, PartialEq, Eq, Default, Deserialize)]
#[serde(from = "String")]
pub struct Frame {
    lines: Vec<String>,
}

impl Frame {
    pub fn new<S: Into<String>>(lines: impl IntoIterator<Item = S>) -> Self {
        Frame {
            lines: lines.into_iter().map(Into::into).collect(),
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

impl From<String> for Frame {
    fn from(text: String) -> Self {
        Frame::new(text.lines())
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Stage {
    Process,
    Victory,
    Defeat,
}

impl Stage {
    pub const ALL: [Stage; 3] = [Stage::Process, Stage::Victory, Stage::Defeat];

    /// Key used for this stage in frame files.
    pub fn name(self) -> &'static str {
        match self {
            Stage::Process => "process",
            Stage::Victory => "victory",
            Stage::Defeat => "defeat",
        }
    }
}

/// Every frame available to the game, grouped by stage.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct FrameLibrary {
    pub process: Vec<Frame>,
    pub victory: Vec<Frame>,
    pub defeat: Vec<Frame>,
}

impl FrameLibrary {
    pub fn stage(&self, stage: Stage) -> &[Frame] {
        match stage {
            Stage::Process => &self.process,
            Stage::Victory => &self.victory,
            Stage::Defeat => &self.defeat,
        }
    }
}
