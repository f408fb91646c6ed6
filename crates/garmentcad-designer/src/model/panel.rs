use std::collections::BTreeMap;
use std::fmt;

use garmentcad_core::{EditError, GeometryError};
use serde::{Deserialize, Serialize};

use super::{Path, Point};

/// Index of a panel inside a [`crate::PanelStore`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PanelId(pub usize);

impl fmt::Display for PanelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "panel#{}", self.0)
    }
}

/// Display locks the shape; Edit allows the mutating editor operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EditMode {
    #[default]
    Display,
    Edit,
}

impl EditMode {
    pub fn toggled(self) -> Self {
        match self {
            EditMode::Display => EditMode::Edit,
            EditMode::Edit => EditMode::Display,
        }
    }
}

/// Manufacturing notch bound to a command index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct NotchMarker {
    pub command_index: usize,
}

/// One side of a seam: a segment on this panel or on its counterpart.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "on", content = "segment", rename_all = "snake_case")]
pub enum SeamEnd {
    Own(usize),
    Counterpart(usize),
}

impl SeamEnd {
    pub fn segment(&self) -> usize {
        match *self {
            SeamEnd::Own(i) | SeamEnd::Counterpart(i) => i,
        }
    }
}

/// Two segments that are sewn together and must match in length.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SeamPair {
    pub label: String,
    pub first: SeamEnd,
    pub second: SeamEnd,
}

impl SeamPair {
    pub fn new(label: impl Into<String>, first: SeamEnd, second: SeamEnd) -> Self {
        Self {
            label: label.into(),
            first,
            second,
        }
    }

    pub fn uses_counterpart(&self) -> bool {
        matches!(self.first, SeamEnd::Counterpart(_))
            || matches!(self.second, SeamEnd::Counterpart(_))
    }
}

/// One pattern piece: a base-size path plus its annotations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PatternPanel {
    pub name: String,
    base: Path,
    #[serde(default)]
    landmarks: BTreeMap<usize, String>,
    #[serde(default)]
    seams: Vec<SeamPair>,
    #[serde(default)]
    notches: Vec<NotchMarker>,
    #[serde(default)]
    pub counterpart: Option<PanelId>,
    #[serde(default)]
    pub mode: EditMode,
    #[serde(default)]
    pub geometrically_invalid: bool,
}

impl PatternPanel {
    pub fn new(name: impl Into<String>, base: Path) -> Self {
        Self {
            name: name.into(),
            base,
            landmarks: BTreeMap::new(),
            seams: Vec::new(),
            notches: Vec::new(),
            counterpart: None,
            mode: EditMode::Display,
            geometrically_invalid: false,
        }
    }

    pub fn base(&self) -> &Path {
        &self.base
    }

    pub fn landmarks(&self) -> &BTreeMap<usize, String> {
        &self.landmarks
    }

    pub fn seams(&self) -> &[SeamPair] {
        &self.seams
    }

    pub fn notches(&self) -> &[NotchMarker] {
        &self.notches
    }

    pub fn is_editable(&self) -> bool {
        self.mode == EditMode::Edit
    }

    /// Labels the on-curve point of command `index`.
    pub fn add_landmark(
        &mut self,
        index: usize,
        label: impl Into<String>,
    ) -> Result<(), GeometryError> {
        if index > self.base.last_point_index() {
            return Err(GeometryError::SegmentOutOfRange {
                index,
                count: self.base.len(),
            });
        }
        self.landmarks.insert(index, label.into());
        Ok(())
    }

    pub fn with_landmark(
        mut self,
        index: usize,
        label: impl Into<String>,
    ) -> Result<Self, GeometryError> {
        self.add_landmark(index, label)?;
        Ok(self)
    }

    pub fn landmark_index(&self, label: &str) -> Option<usize> {
        self.landmarks
            .iter()
            .find(|(_, l)| l.as_str() == label)
            .map(|(i, _)| *i)
    }

    pub fn landmark_point(&self, label: &str) -> Option<Point> {
        self.landmark_index(label)
            .and_then(|i| self.base.point_at(i))
    }

    /// Adds a seam after checking that own segments exist.
    pub fn add_seam(&mut self, seam: SeamPair) -> Result<(), GeometryError> {
        for end in [seam.first, seam.second] {
            if let SeamEnd::Own(index) = end {
                if self.base.segment(index).is_none() {
                    return Err(GeometryError::SegmentOutOfRange {
                        index,
                        count: self.base.len(),
                    });
                }
            }
        }
        self.seams.push(seam);
        Ok(())
    }

    pub fn add_notch(&mut self, command_index: usize) -> Result<NotchMarker, EditError> {
        if command_index >= self.base.len() {
            return Err(GeometryError::SegmentOutOfRange {
                index: command_index,
                count: self.base.len(),
            }
            .into());
        }
        let notch = NotchMarker { command_index };
        if !self.notches.contains(&notch) {
            self.notches.push(notch);
            self.notches.sort_by_key(|n| n.command_index);
        }
        Ok(notch)
    }

    /// Replaces the base path when the command count is unchanged.
    pub(crate) fn replace_base(&mut self, base: Path) {
        self.base = base;
    }

    /// Replaces the base path after commands were inserted, one at a time,
    /// at each of `indices`.
    pub(crate) fn replace_base_inserted(&mut self, base: Path, indices: &[usize]) {
        self.base = base;
        for &index in indices {
            let shift = |i: usize| if i >= index { i + 1 } else { i };
            for notch in &mut self.notches {
                notch.command_index = shift(notch.command_index);
            }
            self.landmarks = std::mem::take(&mut self.landmarks)
                .into_iter()
                .map(|(i, label)| (shift(i), label))
                .collect();
            self.shift_seam_ends(|end| match end {
                SeamEnd::Own(i) => SeamEnd::Own(shift(i)),
                other => other,
            });
        }
    }

    /// Follows command insertions made on the counterpart panel.
    pub(crate) fn counterpart_commands_inserted(&mut self, indices: &[usize]) {
        for &index in indices {
            self.shift_seam_ends(|end| match end {
                SeamEnd::Counterpart(i) if i >= index => SeamEnd::Counterpart(i + 1),
                other => other,
            });
        }
    }

    fn shift_seam_ends<F>(&mut self, shift: F)
    where
        F: Fn(SeamEnd) -> SeamEnd,
    {
        for seam in &mut self.seams {
            seam.first = shift(seam.first);
            seam.second = shift(seam.second);
        }
    }
}
