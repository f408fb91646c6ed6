//! Shelf packing of panel outlines onto a cutting sheet.
//!
//! The packer is a deterministic greedy heuristic. Pieces are sorted by
//! decreasing bounding-box height; each one goes onto the existing shelf and
//! rotation that grow the used sheet length the least (ties go to the lower
//! rotation index, then the earlier shelf). A new shelf is opened only when
//! no existing shelf can take the piece. Pieces occupy disjoint bounding
//! boxes, so the layout never overlaps, but it is not guaranteed minimal.

use garmentcad_core::{GeometryTolerance, NestingError, NestingSettings};
use nalgebra::{Isometry2, Point2, Vector2};
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;
use tracing::{debug, info, warn};

use crate::flatten::flatten_with;
use crate::model::{rotate_point, Bounds, Path, Point};
use crate::polygon::Polygon;

/// Slack for comparing extents of rotated outlines.
const FIT_EPSILON_MM: f64 = 1e-9;

/// Rotations a piece may be placed at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Rotations {
    /// Explicit angles in degrees, tried in order.
    Fixed(Vec<f64>),
    /// Any angle, sampled at the configured step.
    Continuous,
}

impl Rotations {
    pub fn none() -> Self {
        Rotations::Fixed(vec![0.0])
    }

    pub fn quarter_turns() -> Self {
        Rotations::Fixed(vec![0.0, 90.0, 180.0, 270.0])
    }

    fn angles(&self, step_deg: f64) -> SmallVec<[f64; 4]> {
        match self {
            Rotations::Fixed(angles) if angles.is_empty() => SmallVec::from_slice(&[0.0]),
            Rotations::Fixed(angles) => angles.iter().copied().collect(),
            Rotations::Continuous => {
                let steps = (360.0 / step_deg).floor().max(1.0) as usize;
                (0..steps).map(|i| i as f64 * step_deg).collect()
            }
        }
    }
}

impl Default for Rotations {
    fn default() -> Self {
        Rotations::quarter_turns()
    }
}

/// A flattened outline to be cut `quantity` times.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestingPiece {
    pub id: String,
    pub outline: Vec<Point>,
    #[serde(default)]
    pub rotations: Rotations,
    #[serde(default = "default_quantity")]
    pub quantity: u32,
}

fn default_quantity() -> u32 {
    1
}

impl NestingPiece {
    pub fn new(id: impl Into<String>, outline: Vec<Point>) -> Self {
        Self {
            id: id.into(),
            outline,
            rotations: Rotations::default(),
            quantity: 1,
        }
    }

    /// Piece from a closed panel path, flattened with `tolerance`.
    pub fn from_path(
        id: impl Into<String>,
        path: &Path,
        tolerance: &GeometryTolerance,
    ) -> Result<Self, NestingError> {
        let polygon = flatten_with(path, tolerance)?;
        Ok(Self::new(id, polygon.ring().to_vec()))
    }

    pub fn with_rotations(mut self, rotations: Rotations) -> Self {
        self.rotations = rotations;
        self
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn area(&self) -> f64 {
        Polygon::from_ring(self.outline.clone()).area()
    }
}

/// Where one copy of a piece went.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    pub piece_id: String,
    /// Which copy of the piece, counting from zero.
    pub instance: u32,
    /// Counter-clockwise rotation about the origin, applied first.
    pub rotation_deg: f64,
    /// Translation applied after the rotation.
    pub offset: Point,
    pub shelf: usize,
}

impl Placement {
    pub fn transform(&self) -> Isometry2<f64> {
        Isometry2::new(
            Vector2::new(self.offset.x, self.offset.y),
            self.rotation_deg.to_radians(),
        )
    }

    /// Outline of `piece` moved into place.
    pub fn apply(&self, piece: &NestingPiece) -> Polygon {
        let iso = self.transform();
        let ring = piece
            .outline
            .iter()
            .map(|p| {
                let q = iso.transform_point(&Point2::new(p.x, p.y));
                Point::new(q.x, q.y)
            })
            .collect();
        Polygon::from_ring(ring)
    }
}

/// A piece copy that fits the sheet under no allowed rotation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Unplaceable {
    pub piece_id: String,
    pub instance: u32,
    /// Narrowest width the piece reaches over its allowed rotations.
    pub min_width: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NestingLayout {
    pub sheet_width: f64,
    pub placements: Vec<Placement>,
    pub unplaceable: Vec<Unplaceable>,
    /// Sheet length used, from the sheet edge to the top of the last shelf.
    pub length: f64,
    pub shelf_count: usize,
    /// Placed piece area over used sheet area.
    pub utilization: f64,
}

#[derive(Debug, Clone, Copy)]
struct Shelf {
    y: f64,
    height: f64,
    used_width: f64,
}

/// One rotation of a piece, shifted so its bounds start at the origin.
#[derive(Debug, Clone)]
struct Orientation {
    angle: f64,
    shift: Point,
    width: f64,
    height: f64,
}

struct Item<'a> {
    piece: &'a NestingPiece,
    instance: u32,
    orientations: SmallVec<[Orientation; 4]>,
    area: f64,
}

/// Packs `pieces` onto a sheet `sheet_width` wide.
pub fn pack(
    pieces: &[NestingPiece],
    sheet_width: f64,
    settings: &NestingSettings,
) -> Result<NestingLayout, NestingError> {
    if !sheet_width.is_finite() || sheet_width <= 0.0 {
        return Err(NestingError::InvalidSheetWidth { width: sheet_width });
    }
    settings.validate()?;
    let spacing = settings.piece_spacing_mm;

    let mut items = Vec::new();
    for piece in pieces {
        let outline = Polygon::from_ring(piece.outline.clone());
        if outline.ring().len() < 3 || !piece.outline.iter().all(Point::is_finite) {
            return Err(NestingError::EmptyPiece {
                id: piece.id.clone(),
            });
        }
        let orientations: SmallVec<[Orientation; 4]> = piece
            .rotations
            .angles(settings.continuous_rotation_step_deg)
            .into_iter()
            .filter_map(|angle| orient(&piece.outline, angle))
            .collect();
        let area = outline.area();
        for instance in 0..piece.quantity {
            items.push(Item {
                piece,
                instance,
                orientations: orientations.clone(),
                area,
            });
        }
    }
    // stable: equal heights keep input order
    items.sort_by(|a, b| {
        let ha = a.orientations.first().map_or(0.0, |o| o.height);
        let hb = b.orientations.first().map_or(0.0, |o| o.height);
        hb.total_cmp(&ha)
    });

    let mut shelves: Vec<Shelf> = Vec::new();
    let mut placements = Vec::new();
    let mut unplaceable = Vec::new();
    let mut placed_area = 0.0;

    for item in &items {
        let fitting: SmallVec<[(usize, &Orientation); 4]> = item
            .orientations
            .iter()
            .enumerate()
            .filter(|(_, o)| o.width <= sheet_width + FIT_EPSILON_MM)
            .collect();
        if fitting.is_empty() {
            let min_width = item
                .orientations
                .iter()
                .map(|o| o.width)
                .fold(f64::INFINITY, f64::min);
            warn!(piece = %item.piece.id, instance = item.instance, min_width, sheet_width, "piece does not fit the sheet");
            unplaceable.push(Unplaceable {
                piece_id: item.piece.id.clone(),
                instance: item.instance,
                min_width,
            });
            continue;
        }

        // (growth, rotation index, shelf index, orientation)
        let mut best: Option<(f64, usize, usize, &Orientation)> = None;
        let last = shelves.len().checked_sub(1);
        for &(rot, orientation) in &fitting {
            for (index, shelf) in shelves.iter().enumerate() {
                let gap = if shelf.used_width > 0.0 { spacing } else { 0.0 };
                if shelf.used_width + gap + orientation.width > sheet_width + FIT_EPSILON_MM {
                    continue;
                }
                let growth = if Some(index) == last {
                    let grow = orientation.height - shelf.height;
                    if grow <= FIT_EPSILON_MM {
                        0.0
                    } else {
                        grow
                    }
                } else if orientation.height <= shelf.height + FIT_EPSILON_MM {
                    0.0
                } else {
                    continue;
                };
                let better = match best {
                    None => true,
                    Some((g, r, s, _)) => (growth, rot, index) < (g, r, s),
                };
                if better {
                    best = Some((growth, rot, index, orientation));
                }
            }
        }

        let (shelf_index, orientation) = match best {
            Some((_, _, index, orientation)) => (index, orientation),
            None => {
                // lowest new shelf; earlier rotation wins a tie
                let (_, orientation) = fitting
                    .iter()
                    .copied()
                    .fold(None::<(usize, &Orientation)>, |acc, cand| match acc {
                        Some(cur) if cur.1.height <= cand.1.height + FIT_EPSILON_MM => Some(cur),
                        _ => Some(cand),
                    })
                    .unwrap_or(fitting[0]);
                let y = match shelves.last() {
                    Some(top) => top.y + top.height + spacing,
                    None => 0.0,
                };
                shelves.push(Shelf {
                    y,
                    height: orientation.height,
                    used_width: 0.0,
                });
                debug!(shelf = shelves.len() - 1, y, height = orientation.height, "opened shelf");
                (shelves.len() - 1, orientation)
            }
        };

        let shelf = &mut shelves[shelf_index];
        let x = if shelf.used_width > 0.0 {
            shelf.used_width + spacing
        } else {
            0.0
        };
        shelf.used_width = x + orientation.width;
        shelf.height = shelf.height.max(orientation.height);

        placements.push(Placement {
            piece_id: item.piece.id.clone(),
            instance: item.instance,
            rotation_deg: orientation.angle,
            offset: Point::new(x + orientation.shift.x, shelf.y + orientation.shift.y),
            shelf: shelf_index,
        });
        placed_area += item.area;
    }

    let length = shelves.last().map_or(0.0, |top| top.y + top.height);
    let utilization = if length > 0.0 {
        placed_area / (length * sheet_width)
    } else {
        0.0
    };
    info!(
        placed = placements.len(),
        unplaceable = unplaceable.len(),
        shelves = shelves.len(),
        length,
        "nesting complete"
    );

    Ok(NestingLayout {
        sheet_width,
        placements,
        unplaceable,
        length,
        shelf_count: shelves.len(),
        utilization,
    })
}

/// Rotation of `outline` by `angle` with the shift that moves its bounds
/// to the origin. `None` for non-finite angles.
fn orient(outline: &[Point], angle: f64) -> Option<Orientation> {
    if !angle.is_finite() {
        return None;
    }
    let origin = Point::default();
    let rotated: Vec<Point> = outline
        .iter()
        .map(|p| rotate_point(*p, origin, angle))
        .collect();
    let bounds = Bounds::from_points(&rotated)?;
    Some(Orientation {
        angle,
        shift: Point::new(-bounds.min_x, -bounds.min_y),
        width: bounds.width(),
        height: bounds.height(),
    })
}

/// Index pairs of placements whose outlines share interior area.
pub fn find_overlaps(
    layout: &NestingLayout,
    pieces: &[NestingPiece],
    eps: f64,
) -> Vec<(usize, usize)> {
    let placed: Vec<Option<Polygon>> = layout
        .placements
        .iter()
        .map(|placement| {
            pieces
                .iter()
                .find(|p| p.id == placement.piece_id)
                .map(|piece| placement.apply(piece))
        })
        .collect();

    let mut pairs = Vec::new();
    for i in 0..placed.len() {
        for j in (i + 1)..placed.len() {
            if let (Some(a), Some(b)) = (&placed[i], &placed[j]) {
                if a.overlaps(b, eps) {
                    pairs.push((i, j));
                }
            }
        }
    }
    pairs
}
