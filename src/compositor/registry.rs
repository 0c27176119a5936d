//! Pass Registry
//!
//! Owns the technique map: named, independently addressable ordered lists of
//! passes. Exactly one technique is active at a time; every list operation
//! targets the active technique's list. List order is render order and is
//! caller-controlled.
//!
//! Lookup misses are never errors here — unknown names answer `false` /
//! `None`, and asking for the pass list of an unregistered technique logs a
//! diagnostic and substitutes a shared empty list rather than allocating a
//! technique implicitly.

use rustc_hash::FxHashMap;

use crate::camera::RenderTargetNodeRef;
use crate::compositor::pass::{PassData, PassType};

/// The default technique, present (empty) immediately after construction.
pub const DEFAULT_TECHNIQUE: &str = "default";

/// An ordered list of passes.
pub type PassList = Vec<PassData>;

/// Technique map plus the active-technique selector.
#[derive(Debug, Clone)]
pub struct PassRegistry {
    techniques: FxHashMap<String, PassList>,
    active: String,
    /// Returned by [`pass_list`](Self::pass_list) when the active technique
    /// is unregistered.
    empty: PassList,
}

impl Default for PassRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl PassRegistry {
    #[must_use]
    pub fn new() -> Self {
        let mut techniques = FxHashMap::default();
        techniques.insert(DEFAULT_TECHNIQUE.to_string(), PassList::new());
        Self {
            techniques,
            active: DEFAULT_TECHNIQUE.to_string(),
            empty: PassList::new(),
        }
    }

    // =======================================================================
    // Technique selection
    // =======================================================================

    /// Selects the technique subsequent list operations target.
    ///
    /// Selecting a name never registers it; the technique entry is created
    /// on the first mutating access (e.g. appending a pass).
    pub fn set_active_technique(&mut self, name: impl Into<String>) {
        self.active = name.into();
    }

    #[inline]
    #[must_use]
    pub fn active_technique(&self) -> &str {
        &self.active
    }

    /// Registered technique names, in arbitrary order.
    pub fn technique_names(&self) -> impl Iterator<Item = &str> {
        self.techniques.keys().map(String::as_str)
    }

    // =======================================================================
    // Pass list access
    // =======================================================================

    /// The active technique's pass list.
    ///
    /// An unregistered active technique yields a shared empty list and a
    /// diagnostic; it is never allocated implicitly.
    #[must_use]
    pub fn pass_list(&self) -> &PassList {
        match self.techniques.get(&self.active) {
            Some(list) => list,
            None => {
                log::warn!("Unknown technique '{}', substituting empty pass list", self.active);
                &self.empty
            }
        }
    }

    /// Appends a pass to the active technique, registering the technique on
    /// first use.
    pub fn push(&mut self, pass: PassData) {
        self.techniques.entry(self.active.clone()).or_default().push(pass);
    }

    /// Removes the first pass named `name`. Returns `false` if absent.
    pub fn remove_pass(&mut self, name: &str) -> bool {
        let Some(list) = self.techniques.get_mut(&self.active) else {
            return false;
        };
        if let Some(pos) = list.iter().position(|p| p.name == name) {
            list.remove(pos);
            true
        } else {
            false
        }
    }

    /// A clone of the first pass named `name`.
    #[must_use]
    pub fn get_pass_data(&self, name: &str) -> Option<PassData> {
        self.pass_list_silent().iter().find(|p| p.name == name).cloned()
    }

    /// Position of the first pass named `name` in the active list.
    #[must_use]
    pub fn get_pass_index(&self, name: &str) -> Option<usize> {
        self.pass_list_silent().iter().position(|p| p.name == name)
    }

    /// Moves the first pass named `name` to `index`, preserving the stable
    /// relative order of all other entries.
    ///
    /// Returns `false` (with no mutation) when the pass is unknown or
    /// `index` is out of range; moving a pass onto its current position is a
    /// successful no-op.
    pub fn set_pass_index(&mut self, name: &str, index: usize) -> bool {
        let Some(list) = self.techniques.get_mut(&self.active) else {
            return false;
        };
        if index >= list.len() {
            return false;
        }
        let Some(pos) = list.iter().position(|p| p.name == name) else {
            return false;
        };
        if pos == index {
            return true;
        }

        let pass = list.remove(pos);
        // Removal shifted everything after `pos` left by one.
        let index = if pos < index { index - 1 } else { index };
        list.insert(index, pass);
        true
    }

    // =======================================================================
    // Activation
    // =======================================================================

    /// Toggles the activation flag of the first pass named `name`.
    /// Returns `false` if the pass is unknown.
    pub fn set_pass_activated(&mut self, name: &str, activated: bool) -> bool {
        let Some(list) = self.techniques.get_mut(&self.active) else {
            return false;
        };
        if let Some(pass) = list.iter_mut().find(|p| p.name == name) {
            pass.activated = activated;
            true
        } else {
            false
        }
    }

    /// The activation flag of the first pass named `name`; `false` for
    /// unknown names.
    #[must_use]
    pub fn get_pass_activated(&self, name: &str) -> bool {
        self.pass_list_silent()
            .iter()
            .find(|p| p.name == name)
            .is_some_and(|p| p.activated)
    }

    // =======================================================================
    // Queries
    // =======================================================================

    /// Render-target nodes of the active technique's passes of type `kind`,
    /// preserving list order.
    #[must_use]
    pub fn cameras_by_type(&self, kind: PassType) -> Vec<RenderTargetNodeRef> {
        self.pass_list_silent()
            .iter()
            .filter(|p| p.kind == kind)
            .map(|p| p.node.clone())
            .collect()
    }

    /// Like [`pass_list`](Self::pass_list) but without the unknown-technique
    /// diagnostic; used internally where a miss is an expected answer.
    fn pass_list_silent(&self) -> &PassList {
        self.techniques.get(&self.active).unwrap_or(&self.empty)
    }
}
