//! Arena of pattern panels addressed by [`PanelId`].
//!
//! Ids are never reused: a discarded panel leaves an empty slot so stale
//! ids fail lookups instead of resolving to a different panel.

use garmentcad_core::EditError;
use serde::{Deserialize, Serialize};

use crate::model::{PanelId, PatternPanel};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PanelStore {
    slots: Vec<Option<PatternPanel>>,
}

impl PanelStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, panel: PatternPanel) -> PanelId {
        self.slots.push(Some(panel));
        PanelId(self.slots.len() - 1)
    }

    pub fn get(&self, id: PanelId) -> Result<&PatternPanel, EditError> {
        self.slots
            .get(id.0)
            .and_then(|slot| slot.as_ref())
            .ok_or(EditError::UnknownPanel { id: id.0 })
    }

    pub fn get_mut(&mut self, id: PanelId) -> Result<&mut PatternPanel, EditError> {
        self.slots
            .get_mut(id.0)
            .and_then(|slot| slot.as_mut())
            .ok_or(EditError::UnknownPanel { id: id.0 })
    }

    pub fn contains(&self, id: PanelId) -> bool {
        self.get(id).is_ok()
    }

    /// Discards a panel and clears counterpart links pointing at it.
    pub fn remove(&mut self, id: PanelId) -> Option<PatternPanel> {
        let removed = self.slots.get_mut(id.0).and_then(|slot| slot.take());
        if removed.is_some() {
            for panel in self.slots.iter_mut().flatten() {
                if panel.counterpart == Some(id) {
                    panel.counterpart = None;
                }
            }
        }
        removed
    }

    /// Links two panels as each other's seam counterpart.
    pub fn link_counterparts(&mut self, a: PanelId, b: PanelId) -> Result<(), EditError> {
        self.get(a)?;
        self.get(b)?;
        self.get_mut(a)?.counterpart = Some(b);
        self.get_mut(b)?.counterpart = Some(a);
        Ok(())
    }

    pub fn counterpart_of(&self, id: PanelId) -> Result<Option<&PatternPanel>, EditError> {
        match self.get(id)?.counterpart {
            Some(other) => self.get(other).map(Some),
            None => Ok(None),
        }
    }

    pub fn len(&self) -> usize {
        self.slots.iter().filter(|slot| slot.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn iter(&self) -> impl Iterator<Item = (PanelId, &PatternPanel)> {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|panel| (PanelId(i), panel)))
    }

    pub fn ids(&self) -> Vec<PanelId> {
        self.iter().map(|(id, _)| id).collect()
    }

    /// Serializes the whole store, empty slots included, so ids survive.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }
}
