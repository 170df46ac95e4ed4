use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::config::{OBSTACLE, ROAD};
use crate::error::{GameError, Result};
use crate::player::Player;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileKind {
    Road,
    Obstacle,
}

impl TileKind {
    pub const fn glyph(self) -> char {
        match self {
            TileKind::Road => ROAD,
            TileKind::Obstacle => OBSTACLE,
        }
    }
}

/// One cell of the road. Only `kind` ever changes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Tile {
    pub kind: TileKind,
    pub column: u16,
    pub row: u16,
}

// ── Spawner ─────────────────────────────────────────────────────────────────

const DIE_SIDES: u32 = 10;
/// Die faces below this spawn an obstacle (2 in 10).
const OBSTACLE_FACES: u32 = 2;

/// Decides what scrolls in at the right edge.
pub struct Spawner {
    rng: Pcg32,
}

impl Spawner {
    pub fn new(rng: Pcg32) -> Self {
        Spawner { rng }
    }

    pub fn from_os() -> Self {
        Spawner::new(Pcg32::from_rng(&mut rand::rng()))
    }

    #[cfg(test)]
    pub fn seeded(seed: u64) -> Self {
        Spawner::new(Pcg32::seed_from_u64(seed))
    }

    /// Never two obstacles in a row.
    pub fn next_kind(&mut self, previous: TileKind) -> TileKind {
        if previous == TileKind::Obstacle {
            return TileKind::Road;
        }
        if self.rng.random_range(0..DIE_SIDES) < OBSTACLE_FACES {
            TileKind::Obstacle
        } else {
            TileKind::Road
        }
    }
}

// ── Track ───────────────────────────────────────────────────────────────────

/// Result of scrolling the road by one column.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Scroll {
    /// The whole road moved and a new tail tile was laid.
    Shifted(Tile),
    /// An obstacle slid under Jack's feet; the scroll stopped at that column.
    Collided(Tile),
}

/// The road, one tile per column `0..=width`.
#[derive(Clone, Debug)]
pub struct Track {
    tiles: Vec<Tile>,
}

impl Track {
    pub fn new(width: u16, row: u16) -> Result<Self> {
        let len = width as usize + 1;
        let mut tiles = Vec::new();
        tiles
            .try_reserve_exact(len)
            .map_err(|source| GameError::TrackAlloc { tiles: len, source })?;
        tiles.extend((0..=width).map(|column| Tile {
            kind: TileKind::Road,
            column,
            row,
        }));
        Ok(Track { tiles })
    }

    pub fn len(&self) -> usize {
        self.tiles.len()
    }

    /// Column of the tail tile.
    #[cfg(test)]
    pub fn width(&self) -> u16 {
        (self.tiles.len() - 1) as u16
    }

    pub fn tiles(&self) -> &[Tile] {
        &self.tiles
    }

    #[cfg(test)]
    pub fn tile(&self, column: u16) -> Option<&Tile> {
        self.tiles.get(column as usize)
    }

    #[cfg(test)]
    pub fn tail(&self) -> &Tile {
        &self.tiles[self.tiles.len() - 1]
    }

    #[cfg(test)]
    pub fn set_kind(&mut self, column: u16, kind: TileKind) {
        if let Some(tile) = self.tiles.get_mut(column as usize) {
            tile.kind = kind;
        }
    }

    /// Shifts every kind one column left and lays a fresh tail tile. Each
    /// non-tail tile is checked against Jack right after it receives its new
    /// kind; a hit stops the scroll on the spot.
    pub fn scroll(&mut self, jack: &Player, spawner: &mut Spawner) -> Scroll {
        let tail = self.tiles.len() - 1;
        for i in 0..tail {
            self.tiles[i].kind = self.tiles[i + 1].kind;
            if collides(&self.tiles[i], jack) {
                return Scroll::Collided(self.tiles[i]);
            }
        }
        // The tile left of the tail now holds the old tail kind.
        let previous = if tail > 0 {
            self.tiles[tail - 1].kind
        } else {
            self.tiles[tail].kind
        };
        self.tiles[tail].kind = spawner.next_kind(previous);
        Scroll::Shifted(self.tiles[tail])
    }
}

/// Jack hits a tile when it is an obstacle at his exact spot and he is on the
/// ground.
pub fn collides(tile: &Tile, jack: &Player) -> bool {
    let pos = jack.position();
    tile.kind == TileKind::Obstacle
        && !jack.is_airborne()
        && tile.column == pos.column
        && tile.row == pos.row
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const WIDTH: u16 = 50;
    const ROW: u16 = 7;

    fn kinds(track: &Track) -> Vec<TileKind> {
        track.tiles().iter().map(|t| t.kind).collect()
    }

    #[test]
    fn new_track_is_all_road_one_tile_per_column() {
        let track = Track::new(WIDTH, ROW).unwrap();
        assert_eq!(track.len(), WIDTH as usize + 1);
        assert_eq!(track.width(), WIDTH);
        for (i, tile) in track.tiles().iter().enumerate() {
            assert_eq!(tile.kind, TileKind::Road);
            assert_eq!(tile.column as usize, i);
            assert_eq!(tile.row, ROW);
        }
    }

    #[test]
    fn obstacle_scrolls_left_one_column_per_step() {
        let mut track = Track::new(WIDTH, ROW).unwrap();
        let jack = Player::new(0, ROW - 1, WIDTH);
        let mut spawner = Spawner::seeded(1);
        track.set_kind(30, TileKind::Obstacle);

        track.scroll(&jack, &mut spawner);
        assert_eq!(track.tile(29).unwrap().kind, TileKind::Obstacle);
        assert_eq!(track.tile(30).unwrap().kind, TileKind::Road);
    }

    #[test]
    fn tail_after_obstacle_is_always_road() {
        let mut track = Track::new(WIDTH, ROW).unwrap();
        let jack = Player::new(0, ROW - 1, WIDTH);
        let mut spawner = Spawner::seeded(7);
        for _ in 0..1000 {
            track.set_kind(WIDTH, TileKind::Obstacle);
            match track.scroll(&jack, &mut spawner) {
                Scroll::Shifted(tail) => assert_eq!(tail.kind, TileKind::Road),
                Scroll::Collided(_) => panic!("jack is off the road"),
            }
            assert_eq!(track.tile(WIDTH - 1).unwrap().kind, TileKind::Obstacle);
        }
    }

    #[test]
    fn spawn_rate_is_roughly_one_in_five() {
        let mut spawner = Spawner::seeded(42);
        let trials = 10_000;
        let hits = (0..trials)
            .filter(|_| spawner.next_kind(TileKind::Road) == TileKind::Obstacle)
            .count();
        assert!((1_700..2_300).contains(&hits), "got {hits} obstacles");
    }

    #[test]
    fn obstacle_under_grounded_jack_collides() {
        let mut track = Track::new(WIDTH, ROW).unwrap();
        let jack = Player::new(15, ROW, WIDTH);
        let mut spawner = Spawner::seeded(3);
        track.set_kind(16, TileKind::Obstacle);

        let before = kinds(&track);
        let hit = track.scroll(&jack, &mut spawner);
        assert_eq!(
            hit,
            Scroll::Collided(Tile {
                kind: TileKind::Obstacle,
                column: 15,
                row: ROW
            })
        );
        // Columns past the hit were not shifted.
        assert_eq!(&kinds(&track)[16..], &before[16..]);
    }

    #[test]
    fn airborne_jack_clears_obstacle() {
        let mut track = Track::new(WIDTH, ROW).unwrap();
        let mut jack = Player::new(15, ROW, WIDTH);
        let mut spawner = Spawner::seeded(3);
        track.set_kind(16, TileKind::Obstacle);
        jack.jump();

        assert!(matches!(track.scroll(&jack, &mut spawner), Scroll::Shifted(_)));
        assert_eq!(track.tile(15).unwrap().kind, TileKind::Obstacle);
    }

    #[test]
    fn tail_tile_is_never_checked() {
        let mut track = Track::new(WIDTH, ROW).unwrap();
        let jack = Player::new(WIDTH, ROW, WIDTH);
        let mut spawner = Spawner::seeded(11);
        for _ in 0..500 {
            assert!(matches!(track.scroll(&jack, &mut spawner), Scroll::Shifted(_)));
        }
    }

    fn tile_kind() -> impl Strategy<Value = TileKind> {
        prop_oneof![Just(TileKind::Road), Just(TileKind::Obstacle)]
    }

    proptest! {
        #[test]
        fn scroll_shifts_every_kind_left(
            pattern in proptest::collection::vec(tile_kind(), WIDTH as usize + 1),
            seed in any::<u64>(),
        ) {
            let mut track = Track::new(WIDTH, ROW).unwrap();
            for (column, kind) in pattern.iter().enumerate() {
                track.set_kind(column as u16, *kind);
            }
            let jack = Player::new(0, ROW - 1, WIDTH);
            let mut spawner = Spawner::seeded(seed);

            let before = kinds(&track);
            let step = track.scroll(&jack, &mut spawner);
            let after = kinds(&track);

            prop_assert!(matches!(step, Scroll::Shifted(_)));
            prop_assert_eq!(after.len(), WIDTH as usize + 1);
            for i in 0..WIDTH as usize {
                prop_assert_eq!(after[i], before[i + 1]);
            }
            if before[WIDTH as usize] == TileKind::Obstacle {
                prop_assert_eq!(after[WIDTH as usize], TileKind::Road);
            }
        }

        #[test]
        fn freshly_spawned_obstacles_never_touch(seed in any::<u64>()) {
            let mut track = Track::new(WIDTH, ROW).unwrap();
            let jack = Player::new(0, ROW - 1, WIDTH);
            let mut spawner = Spawner::seeded(seed);
            for _ in 0..(WIDTH as usize * 2) {
                track.scroll(&jack, &mut spawner);
                prop_assert_eq!(track.len(), WIDTH as usize + 1);
            }
            let row = kinds(&track);
            for pair in row.windows(2) {
                prop_assert!(!(pair[0] == TileKind::Obstacle && pair[1] == TileKind::Obstacle));
            }
        }
    }
}
