use std::collections::BTreeSet;

use crate::args::DefaultValue;
use crate::args::SelectionMode;
use crate::host::ComponentValue;

/// Selection state of one rebuild lifecycle, keyed by option position.
///
/// Positions rather than strings so duplicate option texts stay independent, and so the reported
/// multi value always comes out in option order.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Selection {
    Single(Option<usize>),
    Multi(BTreeSet<usize>),
}

impl Selection {
    pub fn from_default(mode: SelectionMode, options: &[String], default: &DefaultValue) -> Self {
        match mode {
            SelectionMode::Single => {
                Selection::Single(options.iter().position(|o| default.selects_single(o)))
            }
            SelectionMode::Multi => Selection::Multi(
                options
                    .iter()
                    .enumerate()
                    .filter(|(_, o)| default.selects_multi(o))
                    .map(|(i, _)| i)
                    .collect(),
            ),
        }
    }

    pub fn mode(&self) -> SelectionMode {
        match self {
            Selection::Single(_) => SelectionMode::Single,
            Selection::Multi(_) => SelectionMode::Multi,
        }
    }

    pub fn is_selected(&self, index: usize) -> bool {
        match self {
            Selection::Single(sel) => *sel == Some(index),
            Selection::Multi(set) => set.contains(&index),
        }
    }

    /// `true` when every one of `len` options is selected (multi mode only).
    pub fn all_selected(&self, len: usize) -> bool {
        match self {
            Selection::Single(_) => false,
            Selection::Multi(set) => set.len() == len,
        }
    }

    pub fn selected_count(&self) -> usize {
        match self {
            Selection::Single(sel) => usize::from(sel.is_some()),
            Selection::Multi(set) => set.len(),
        }
    }

    /// Single-mode click. Re-clicking the selected option clears it only when `clearable`.
    pub fn click_single(&mut self, index: usize, clearable: bool) {
        if let Selection::Single(sel) = self {
            *sel = if clearable && *sel == Some(index) {
                None
            } else {
                Some(index)
            };
        }
    }

    /// Multi-mode click: flips one option.
    pub fn toggle(&mut self, index: usize) {
        if let Selection::Multi(set) = self
            && !set.remove(&index)
        {
            set.insert(index);
        }
    }

    /// Multi-mode select-all click: clears when everything is selected, otherwise fills.
    pub fn toggle_all(&mut self, len: usize) {
        if let Selection::Multi(set) = self {
            if set.len() == len {
                set.clear();
            } else {
                *set = (0..len).collect();
            }
        }
    }

    pub fn value(&self, options: &[String]) -> ComponentValue {
        match self {
            Selection::Single(None) => ComponentValue::Null,
            Selection::Single(Some(i)) => options
                .get(*i)
                .cloned()
                .map_or(ComponentValue::Null, ComponentValue::Single),
            Selection::Multi(set) => ComponentValue::Multi(
                set.iter().filter_map(|i| options.get(*i).cloned()).collect(),
            ),
        }
    }
}
