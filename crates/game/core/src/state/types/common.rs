use std::fmt;

/// Discrete grid position expressed in tile coordinates (`x` = column, `y` = row).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    pub const ORIGIN: Self = Self { x: 0, y: 0 };

    pub fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Builds a position from grid `(row, col)`.
    pub fn from_grid(row: i32, col: i32) -> Self {
        Self { x: col, y: row }
    }

    /// The four orthogonal neighbours, in up/down/left/right order.
    pub fn neighbours(self) -> [Position; 4] {
        [
            Position::new(self.x, self.y - 1),
            Position::new(self.x, self.y + 1),
            Position::new(self.x - 1, self.y),
            Position::new(self.x + 1, self.y),
        ]
    }

    /// Direction a unit at `self` faces when looking toward `other`.
    pub fn facing_toward(self, other: Position) -> Facing {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        if dx.abs() >= dy.abs() {
            if dx < 0 { Facing::Left } else { Facing::Right }
        } else if dy < 0 {
            Facing::Up
        } else {
            Facing::Down
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Self::ORIGIN
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Sprite facing.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Facing {
    Up,
    #[default]
    Down,
    Left,
    Right,
}

/// Animation the renderer should play for a unit.
///
/// The engine only sets this; playback lives outside the core.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, strum::Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AnimationState {
    #[default]
    Idle,
    Walk,
    Attack,
    AttackSkill,
    AttackStatusSkill,
    StatusSkill,
    Hurt,
    Death,
}
