//! Application state for the TUI.

use std::path::PathBuf;
use std::sync::Arc;

use crate::cleaner::{Cleaner, CleanerError};
use crate::engine::{EngineEvent, Unit};

use super::viewport::{available_rows, Window};

/// Lines of chrome around the main list.
const MAIN_LIST_RESERVED: u16 = 12;
/// Lines of chrome around the large-file list.
const LARGE_FILE_RESERVED: u16 = 10;
const MIN_LIST_ROWS: usize = 5;

/// The phase of a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// Scan units are running.
    Scanning,
    /// Choosing which cleaners to run.
    Review,
    /// Choosing individual large files.
    LargeFileSelection,
    /// Waiting for the user to confirm deletion.
    Confirm,
    /// Clean units are running.
    Cleaning,
    /// Every clean unit has reported.
    Done,
}

/// UI state for one registered cleaner.
pub struct CleanerItem {
    pub cleaner: Arc<dyn Cleaner>,
    pub selected: bool,
    /// Needs root and we are not root. Never changes after creation.
    pub skip: bool,
    pub size: u64,
    pub scanned: bool,
    pub cleaned: bool,
    pub error: Option<CleanerError>,
}

/// A file offered by the itemized cleaner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LargeFileEntry {
    pub path: PathBuf,
    pub size: u64,
    pub selected: bool,
}

/// Main application state for the TUI.
pub struct App {
    pub phase: Phase,

    pub items: Vec<CleanerItem>,

    /// Index of the itemized cleaner, if one is registered.
    pub drill_down: Option<usize>,

    /// Empty until the first drill-down.
    pub large_files: Vec<LargeFileEntry>,
    large_files_loaded: bool,

    /// Cursor in the main list; `items.len()` is the clean button.
    pub cursor: usize,

    /// Cursor in the large-file list.
    pub lf_cursor: usize,

    /// Sum of all sizes, set once every item has been scanned.
    pub total_reclaimable: u64,

    pub total_selected: u64,
    pub lf_selected_count: usize,
    pub lf_selected_size: u64,

    pub width: u16,
    pub height: u16,

    /// Advances once per loop iteration, drives the spinner.
    pub tick: usize,

    /// Application should quit.
    pub should_quit: bool,

    /// Free space on the home filesystem before and after cleaning.
    pub free_before: Option<u64>,
    pub free_after: Option<u64>,

    clean_dispatched: usize,
    clean_received: usize,
}

impl App {
    /// Create a new App for `cleaners`.
    ///
    /// Cleaners that require privilege are skipped unless `is_root`. With
    /// `preselect`, every other cleaner except the itemized one starts
    /// selected.
    pub fn new(cleaners: &[Arc<dyn Cleaner>], is_root: bool, preselect: bool) -> Self {
        let mut drill_down = None;
        let items = cleaners
            .iter()
            .enumerate()
            .map(|(i, cleaner)| {
                let skip = cleaner.requires_privilege() && !is_root;
                let itemized = cleaner.as_itemized().is_some();
                if itemized && drill_down.is_none() {
                    drill_down = Some(i);
                }
                CleanerItem {
                    cleaner: Arc::clone(cleaner),
                    selected: preselect && !skip && !itemized,
                    skip,
                    size: 0,
                    scanned: false,
                    cleaned: false,
                    error: None,
                }
            })
            .collect();

        Self {
            phase: Phase::Scanning,
            items,
            drill_down,
            large_files: Vec::new(),
            large_files_loaded: false,
            cursor: 0,
            lf_cursor: 0,
            total_reclaimable: 0,
            total_selected: 0,
            lf_selected_count: 0,
            lf_selected_size: 0,
            width: 80,
            height: 24,
            tick: 0,
            should_quit: false,
            free_before: None,
            free_after: None,
            clean_dispatched: 0,
            clean_received: 0,
        }
    }

    /// One scan unit per item, in list order.
    pub fn scan_units(&self) -> Vec<Unit> {
        self.items
            .iter()
            .enumerate()
            .map(|(index, item)| Unit {
                index,
                cleaner: Arc::clone(&item.cleaner),
                skip: item.skip,
            })
            .collect()
    }

    pub fn is_drill_down(&self, index: usize) -> bool {
        self.drill_down == Some(index)
    }

    /// Flip an item's selection.
    ///
    /// Skipped items are left alone, and so is the drill-down item, whose
    /// selection only follows its chosen files.
    pub fn toggle(&mut self, index: usize) {
        if self.is_drill_down(index) {
            return;
        }
        if let Some(item) = self.items.get_mut(index) {
            if !item.skip {
                item.selected = !item.selected;
            }
        }
        self.recompute_selected();
    }

    /// Flip a large file's selection and refresh everything derived from it.
    pub fn toggle_large_file(&mut self, index: usize) {
        if let Some(entry) = self.large_files.get_mut(index) {
            entry.selected = !entry.selected;
        }
        self.recompute_large_file_totals();
        if let Some(parent) = self.drill_down {
            self.items[parent].selected = self.lf_selected_count > 0;
        }
        self.recompute_selected();
    }

    /// True if any runnable item is selected.
    pub fn has_any_selection(&self) -> bool {
        self.items.iter().any(|i| i.selected && !i.skip)
    }

    fn recompute_large_file_totals(&mut self) {
        let chosen = self.large_files.iter().filter(|f| f.selected);
        self.lf_selected_count = chosen.clone().count();
        self.lf_selected_size = chosen.map(|f| f.size).sum();
    }

    /// Total bytes the current selection would free.
    ///
    /// The itemized cleaner contributes only its chosen files.
    pub fn recompute_selected(&mut self) {
        self.total_selected = self
            .items
            .iter()
            .enumerate()
            .map(|(i, item)| {
                if self.is_drill_down(i) {
                    self.lf_selected_size
                } else if item.selected {
                    item.size
                } else {
                    0
                }
            })
            .sum();
    }

    /// Number of items a confirmation would clean.
    pub fn selected_item_count(&self) -> usize {
        self.items.iter().filter(|i| i.selected).count()
    }

    /// Open the large-file list, loading it on first entry.
    pub fn enter_large_files(&mut self) {
        let Some(index) = self.drill_down else {
            return;
        };
        if self.items[index].skip {
            return;
        }

        if !self.large_files_loaded {
            if let Some(itemized) = self.items[index].cleaner.as_itemized() {
                self.large_files = itemized
                    .found_files()
                    .into_iter()
                    .map(|f| LargeFileEntry {
                        path: f.path,
                        size: f.size,
                        selected: false,
                    })
                    .collect();
            }
            self.large_files_loaded = true;
            tracing::debug!(count = self.large_files.len(), "Loaded large file list");
        }

        self.phase = Phase::LargeFileSelection;
    }

    /// Move to confirmation if anything is selected.
    ///
    /// The chosen large files are handed to the itemized cleaner here.
    /// Returns false, changing nothing, when the selection is empty.
    pub fn request_confirm(&mut self) -> bool {
        if !self.has_any_selection() {
            return false;
        }

        if let Some(index) = self.drill_down {
            if let Some(itemized) = self.items[index].cleaner.as_itemized() {
                let paths = self
                    .large_files
                    .iter()
                    .filter(|f| f.selected)
                    .map(|f| f.path.clone())
                    .collect();
                itemized.set_files_to_clean(paths);
            }
        }

        self.recompute_selected();
        self.phase = Phase::Confirm;
        true
    }

    /// Enter the cleaning phase and return the units to dispatch.
    pub fn begin_cleaning(&mut self) -> Vec<Unit> {
        let units: Vec<Unit> = self
            .items
            .iter()
            .enumerate()
            .filter(|(_, item)| item.selected && !item.skip)
            .map(|(index, item)| Unit {
                index,
                cleaner: Arc::clone(&item.cleaner),
                skip: false,
            })
            .collect();

        self.clean_dispatched = units.len();
        self.clean_received = 0;
        self.phase = if units.is_empty() {
            Phase::Done
        } else {
            Phase::Cleaning
        };
        tracing::info!(units = units.len(), "Cleaning started");

        units
    }

    /// Apply one finished unit and advance the phase when all have reported.
    pub fn apply_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Scanned { index, result } => {
                let Some(item) = self.items.get_mut(index) else {
                    return;
                };
                if item.scanned {
                    return;
                }
                match result {
                    Ok(size) => item.size = size,
                    Err(e) => item.error = Some(e),
                }
                item.scanned = true;

                if self.phase == Phase::Scanning && self.items.iter().all(|i| i.scanned) {
                    self.total_reclaimable = self.items.iter().map(|i| i.size).sum();
                    self.recompute_selected();
                    self.phase = Phase::Review;
                    tracing::info!(total = self.total_reclaimable, "Scan complete");
                }
            }
            EngineEvent::Cleaned { index, result } => {
                let Some(item) = self.items.get_mut(index) else {
                    return;
                };
                if item.cleaned {
                    return;
                }
                item.cleaned = true;
                item.error = result.err();
                self.clean_received += 1;

                if self.phase == Phase::Cleaning && self.clean_received >= self.clean_dispatched {
                    self.phase = Phase::Done;
                    tracing::info!(units = self.clean_received, "Cleaning complete");
                }
            }
        }
    }

    pub fn move_cursor(&mut self, delta: isize) {
        // One past the last item is the clean button.
        let max = self.items.len();
        self.cursor = self.cursor.saturating_add_signed(delta).min(max);
    }

    pub fn move_lf_cursor(&mut self, delta: isize) {
        let max = self.large_files.len().saturating_sub(1);
        self.lf_cursor = self.lf_cursor.saturating_add_signed(delta).min(max);
    }

    pub fn on_clean_button(&self) -> bool {
        self.cursor == self.items.len()
    }

    pub fn resize(&mut self, width: u16, height: u16) {
        self.width = width;
        self.height = height;
    }

    /// Visible rows of the main list, clean button included.
    pub fn main_window(&self) -> Window {
        let rows = available_rows(self.height, MAIN_LIST_RESERVED, MIN_LIST_ROWS);
        Window::compute(self.cursor, self.items.len() + 1, rows)
    }

    /// Visible rows of the large-file list.
    pub fn large_file_window(&self) -> Window {
        let rows = available_rows(self.height, LARGE_FILE_RESERVED, MIN_LIST_ROWS);
        Window::compute(self.lf_cursor, self.large_files.len(), rows)
    }

    /// Items that finished cleaning without error.
    pub fn cleaned_ok(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.cleaned && i.error.is_none())
            .count()
    }

    /// Items whose clean failed.
    pub fn cleaned_failed(&self) -> usize {
        self.items
            .iter()
            .filter(|i| i.cleaned && i.error.is_some())
            .count()
    }

    /// Free space gained, when both measurements are available.
    pub fn freed(&self) -> Option<u64> {
        Some(self.free_after?.saturating_sub(self.free_before?))
    }
}
