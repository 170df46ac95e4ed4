//! One run of the game: the road, Jack, the score and how it all ends.

use std::time::Duration;

use log::{debug, info};

use crate::config::{Layout, Pace};
use crate::error::Result;
use crate::player::{Command, Player};
use crate::screen::Canvas;
use crate::track::{Scroll, Spawner, Track};

/// Where a session stands. Leaving `Running` is one-way.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    Running,
    Won,
    Lost,
    Quit,
    Errored,
}

impl Phase {
    pub fn message(self) -> &'static str {
        match self {
            Phase::Running => "Still running.",
            Phase::Won => "You won! Congratulations!",
            Phase::Lost => "Game over. You lost!",
            Phase::Quit => "You quit.",
            Phase::Errored => "Something went wrong. Game aborted.",
        }
    }
}

/// What applying a command did, for the caller to react to.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Applied {
    Moved,
    Jumped,
    Ignored,
    Quit,
}

pub struct Session {
    track: Track,
    jack: Player,
    spawner: Spawner,
    score: u32,
    pace: Pace,
    phase: Phase,
}

impl Session {
    pub fn new(layout: Layout, pace: Pace, spawner: Spawner) -> Result<Self> {
        let track = Track::new(layout.track_width, layout.road_row)?;
        let jack = Player::new(layout.player_column, layout.road_row, layout.track_width);
        info!(
            "new session: {} tiles, tick {:?}, {} meters to go",
            track.len(),
            pace.tick,
            pace.score_for_win
        );
        Ok(Session {
            track,
            jack,
            spawner,
            score: 0,
            pace,
            phase: Phase::Running,
        })
    }

    pub fn track(&self) -> &Track {
        &self.track
    }

    #[cfg(test)]
    pub fn track_mut(&mut self) -> &mut Track {
        &mut self.track
    }

    pub fn player(&self) -> &Player {
        &self.jack
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn score_for_win(&self) -> u32 {
        self.pace.score_for_win
    }

    pub fn tick_interval(&self) -> Duration {
        self.pace.tick
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    fn finish(&mut self, phase: Phase) {
        if self.phase == Phase::Running {
            info!("session ends {:?} at {} meters", phase, self.score);
            self.phase = phase;
        }
    }

    pub fn quit(&mut self) {
        self.finish(Phase::Quit);
    }

    pub fn fail(&mut self) {
        self.finish(Phase::Errored);
    }

    pub fn apply(&mut self, command: Command) -> Applied {
        if !self.is_running() {
            return Applied::Ignored;
        }
        debug!("input {command:?}");
        match command {
            Command::Left => {
                self.jack.step_left();
                Applied::Moved
            }
            Command::Right => {
                self.jack.step_right();
                Applied::Moved
            }
            Command::Jump => {
                if self.jack.jump() {
                    Applied::Jumped
                } else {
                    Applied::Ignored
                }
            }
            Command::Quit => {
                self.quit();
                Applied::Quit
            }
        }
    }

    /// Scrolls the road one column, draws the new tail tile straight onto
    /// `canvas`, scores a meter and settles Jack's jump.
    pub fn advance_one_step(&mut self, canvas: &mut impl Canvas) -> Phase {
        if !self.is_running() {
            return self.phase;
        }
        match self.track.scroll(&self.jack, &mut self.spawner) {
            Scroll::Collided(tile) => {
                debug!("hit obstacle at column {}", tile.column);
                self.finish(Phase::Lost);
            }
            Scroll::Shifted(tail) => {
                canvas.put(tail.column, tail.row, tail.kind.glyph());
                self.score += 1;
                if self.score == self.pace.score_for_win {
                    self.finish(Phase::Won);
                } else {
                    self.jack.tick();
                }
            }
        }
        self.phase
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Difficulty;
    use crate::screen::Grid;
    use crate::track::TileKind;

    fn session(difficulty: Difficulty, seed: u64) -> (Session, Grid) {
        let layout = Layout::default();
        let session = Session::new(layout, difficulty.pace(), Spawner::seeded(seed)).unwrap();
        (session, Grid::new(layout.screen_width(), layout.height))
    }

    #[test]
    fn score_counts_one_per_tick() {
        let (mut s, mut grid) = session(Difficulty::Normal, 5);
        // On the tail Jack can never be hit.
        for _ in 0..50 {
            s.apply(Command::Right);
        }
        for tick in 1..=20 {
            assert_eq!(s.advance_one_step(&mut grid), Phase::Running);
            assert_eq!(s.score(), tick);
        }
    }

    #[test]
    fn easy_run_is_won_after_exactly_one_hundred_ticks() {
        let (mut s, mut grid) = session(Difficulty::Easy, 9);
        for _ in 0..50 {
            s.apply(Command::Right);
        }
        for _ in 0..99 {
            assert_eq!(s.advance_one_step(&mut grid), Phase::Running);
        }
        assert_eq!(s.advance_one_step(&mut grid), Phase::Won);
        assert_eq!(s.score(), 100);

        // Finished sessions stay put.
        assert_eq!(s.advance_one_step(&mut grid), Phase::Won);
        assert_eq!(s.score(), 100);
    }

    #[test]
    fn obstacle_under_jack_loses() {
        let (mut s, mut grid) = session(Difficulty::Easy, 1);
        let column = s.player().position().column;
        s.track_mut().set_kind(column + 1, TileKind::Obstacle);

        assert_eq!(s.advance_one_step(&mut grid), Phase::Lost);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn jump_clears_obstacle_for_whole_hold() {
        let (mut s, mut grid) = session(Difficulty::Easy, 1);
        let column = s.player().position().column;
        // Two obstacles spaced so each lands under Jack mid-jump.
        s.track_mut().set_kind(column + 1, TileKind::Obstacle);
        s.track_mut().set_kind(column + 3, TileKind::Obstacle);

        assert_eq!(s.apply(Command::Jump), Applied::Jumped);
        for _ in 0..3 {
            assert_eq!(s.advance_one_step(&mut grid), Phase::Running);
        }
        assert!(!s.player().is_airborne());
    }

    #[test]
    fn tail_is_drawn_on_the_canvas() {
        let (mut s, mut grid) = session(Difficulty::Easy, 1);
        grid.clear();
        s.advance_one_step(&mut grid);
        let tail = *s.track().tail();
        assert_eq!(grid.get(tail.column, tail.row), Some(tail.kind.glyph()));
    }

    #[test]
    fn quit_ends_without_win_or_loss() {
        let (mut s, mut grid) = session(Difficulty::Hard, 1);
        assert_eq!(s.apply(Command::Quit), Applied::Quit);
        assert_eq!(s.phase(), Phase::Quit);
        assert_eq!(s.advance_one_step(&mut grid), Phase::Quit);
        assert_eq!(s.score(), 0);
    }

    #[test]
    fn first_terminal_phase_sticks() {
        let (mut s, _) = session(Difficulty::Easy, 1);
        s.quit();
        s.fail();
        assert_eq!(s.phase(), Phase::Quit);
        assert_eq!(s.apply(Command::Jump), Applied::Ignored);
    }
}
