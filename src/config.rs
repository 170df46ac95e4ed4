use std::time::Duration;

// ── Glyphs ──────────────────────────────────────────────────────────────────

pub const JACK: char = 'i';
pub const OBSTACLE: char = '|';
pub const ROAD: char = '_';
pub const BORDER_TOP: char = '~';

// ── Screen layout ───────────────────────────────────────────────────────────

/// Fixed geometry of the play field. The road has one tile per column
/// `0..=track_width`, so the screen is one column wider than the track.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Layout {
    pub track_width: u16,
    pub height: u16,
    pub road_row: u16,
    pub player_column: u16,
}

impl Layout {
    pub const fn new(track_width: u16, height: u16) -> Self {
        Layout {
            track_width,
            height,
            road_row: height - 3,
            // Jack starts a bit under a third of the way in.
            player_column: track_width * 3 / 10,
        }
    }

    pub const fn screen_width(&self) -> u16 {
        self.track_width + 1
    }
}

impl Default for Layout {
    fn default() -> Self {
        Layout::new(50, 10)
    }
}

// ── Difficulty ──────────────────────────────────────────────────────────────

/// Ticks a jump keeps Jack in the air.
pub const JUMP_TICKS: u8 = 3;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Normal,
    Hard,
}

/// Speed and length of a run.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Pace {
    pub tick: Duration,
    pub score_for_win: u32,
}

impl Difficulty {
    pub const fn pace(self) -> Pace {
        match self {
            Difficulty::Easy => Pace {
                tick: Duration::from_millis(300),
                score_for_win: 100,
            },
            Difficulty::Normal => Pace {
                tick: Duration::from_millis(150),
                score_for_win: 200,
            },
            Difficulty::Hard => Pace {
                tick: Duration::from_millis(75),
                score_for_win: 400,
            },
        }
    }
}

/// Answer to the start prompt.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Choice {
    Play(Difficulty),
    Quit,
}

impl Choice {
    pub fn from_key(c: char) -> Option<Choice> {
        match c.to_ascii_lowercase() {
            'e' => Some(Choice::Play(Difficulty::Easy)),
            'n' => Some(Choice::Play(Difficulty::Normal)),
            'h' => Some(Choice::Play(Difficulty::Hard)),
            'q' => Some(Choice::Quit),
            _ => None,
        }
    }
}
