//! # Blueprint Catalog
//!
//! Immutable set of named cell-offset patterns. A catalog is built once at
//! startup from an externally supplied list of records and is read-only for
//! the rest of its life. Pattern ids are positions in that list.
//!
//! ## Rotation
//!
//! Stamping may rotate a pattern by a multiple of 90 degrees. Rotation acts on
//! the offset vectors, not on the grid:
//!
//! | Orientation | `(dx, dy)` becomes |
//! |-------------|--------------------|
//! | 0           | `(dx, dy)`         |
//! | 90          | `(dy, -dx)`        |
//! | 180         | `(-dx, -dy)`       |
//! | 270         | `(-dy, dx)`        |

use crate::error::{Result, SimulationError};

/// One of the four quarter-turn rotations
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Orientation {
    #[default]
    Deg0,
    Deg90,
    Deg180,
    Deg270,
}

impl Orientation {
    pub const ALL: [Orientation; 4] = [
        Orientation::Deg0,
        Orientation::Deg90,
        Orientation::Deg180,
        Orientation::Deg270,
    ];

    pub fn degrees(self) -> i32 {
        match self {
            Orientation::Deg0 => 0,
            Orientation::Deg90 => 90,
            Orientation::Deg180 => 180,
            Orientation::Deg270 => 270,
        }
    }

    /// Next quarter turn, wrapping 270 back to 0
    pub fn next(self) -> Self {
        match self {
            Orientation::Deg0 => Orientation::Deg90,
            Orientation::Deg90 => Orientation::Deg180,
            Orientation::Deg180 => Orientation::Deg270,
            Orientation::Deg270 => Orientation::Deg0,
        }
    }

    /// Rotate a single offset vector
    ///
    /// Widened to i64 so negating `i32::MIN` cannot overflow.
    #[inline]
    pub fn apply(self, (dx, dy): (i32, i32)) -> (i64, i64) {
        let (dx, dy) = (i64::from(dx), i64::from(dy));
        match self {
            Orientation::Deg0 => (dx, dy),
            Orientation::Deg90 => (dy, -dx),
            Orientation::Deg180 => (-dx, -dy),
            Orientation::Deg270 => (-dy, dx),
        }
    }
}

impl TryFrom<i32> for Orientation {
    type Error = SimulationError;

    fn try_from(degrees: i32) -> Result<Self> {
        match degrees {
            0 => Ok(Orientation::Deg0),
            90 => Ok(Orientation::Deg90),
            180 => Ok(Orientation::Deg180),
            270 => Ok(Orientation::Deg270),
            other => Err(SimulationError::InvalidOrientation(other)),
        }
    }
}

impl From<Orientation> for i32 {
    fn from(orientation: Orientation) -> i32 {
        orientation.degrees()
    }
}

/// Externally supplied catalog entry
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BlueprintRecord {
    pub name: String,
    pub cells: Vec<(i32, i32)>,
}

impl BlueprintRecord {
    pub fn new(name: impl Into<String>, cells: impl Into<Vec<(i32, i32)>>) -> Self {
        Self {
            name: name.into(),
            cells: cells.into(),
        }
    }
}

/// Ordered list of cell offsets relative to the stamp origin
///
/// Offset order is kept as given so stamping is reproducible.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BlueprintPattern {
    name: String,
    cells: Vec<(i32, i32)>,
}

impl BlueprintPattern {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn cells(&self) -> &[(i32, i32)] {
        &self.cells
    }

    /// Offsets rotated by `orientation`, in listed order
    pub fn rotated(&self, orientation: Orientation) -> impl Iterator<Item = (i64, i64)> + '_ {
        self.cells.iter().map(move |&offset| orientation.apply(offset))
    }
}

/// Read-only, id-indexed set of blueprints
#[derive(Clone, Debug, Default)]
pub struct BlueprintCatalog {
    patterns: Vec<BlueprintPattern>,
}

impl BlueprintCatalog {
    /// Build a catalog from records; ids follow record order
    pub fn from_records(records: impl IntoIterator<Item = BlueprintRecord>) -> Self {
        let patterns = records
            .into_iter()
            .map(|record| BlueprintPattern {
                name: record.name,
                cells: record.cells,
            })
            .collect();
        Self { patterns }
    }

    /// Catalog of classic patterns used by the headless driver
    pub fn builtin() -> Self {
        Self::from_records([
            BlueprintRecord::new("Glider", [(1, 0), (2, 1), (0, 2), (1, 2), (2, 2)]),
            BlueprintRecord::new("Blinker", [(-1, 0), (0, 0), (1, 0)]),
            BlueprintRecord::new("Block", [(0, 0), (1, 0), (0, 1), (1, 1)]),
            BlueprintRecord::new(
                "Lightweight Spaceship",
                [
                    (1, 0),
                    (4, 0),
                    (0, 1),
                    (0, 2),
                    (4, 2),
                    (0, 3),
                    (1, 3),
                    (2, 3),
                    (3, 3),
                ],
            ),
            BlueprintRecord::new("R-pentomino", [(1, 0), (2, 0), (0, 1), (1, 1), (1, 2)]),
            BlueprintRecord::new("Gosper Gun", GOSPER_GUN),
        ])
    }

    pub fn len(&self) -> usize {
        self.patterns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Pattern with the given id
    pub fn get(&self, id: usize) -> Result<&BlueprintPattern> {
        self.patterns
            .get(id)
            .ok_or(SimulationError::UnknownPatternId {
                id,
                count: self.patterns.len(),
            })
    }

    /// Id of the first pattern called `name`
    pub fn find(&self, name: &str) -> Option<usize> {
        self.patterns.iter().position(|p| p.name == name)
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.patterns.iter().map(|p| p.name.as_str())
    }

    /// Offsets of pattern `id` rotated by `degrees`
    ///
    /// Fails with `UnknownPatternId` or `InvalidOrientation`.
    pub fn rotate(&self, id: usize, degrees: i32) -> Result<Vec<(i64, i64)>> {
        let pattern = self.get(id)?;
        let orientation = Orientation::try_from(degrees)?;
        Ok(pattern.rotated(orientation).collect())
    }
}

const GOSPER_GUN: [(i32, i32); 36] = [
    (24, 0),
    (22, 1),
    (24, 1),
    (12, 2),
    (13, 2),
    (20, 2),
    (21, 2),
    (34, 2),
    (35, 2),
    (11, 3),
    (15, 3),
    (20, 3),
    (21, 3),
    (34, 3),
    (35, 3),
    (0, 4),
    (1, 4),
    (10, 4),
    (16, 4),
    (20, 4),
    (21, 4),
    (0, 5),
    (1, 5),
    (10, 5),
    (14, 5),
    (16, 5),
    (17, 5),
    (22, 5),
    (24, 5),
    (10, 6),
    (16, 6),
    (24, 6),
    (11, 7),
    (15, 7),
    (12, 8),
    (13, 8),
];
