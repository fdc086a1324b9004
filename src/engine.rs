//! Concurrent dispatch of scan and clean units.
//!
//! Every unit runs on its own thread and reports back exactly once over a
//! channel. The engine never sees the UI state; the event loop drains
//! [`EngineEvent`]s and applies them in arrival order.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryRecvError};
use std::sync::Arc;
use std::thread;

use crate::cleaner::{Cleaner, CleanerError};

/// Outcome of one finished unit, tagged with the item it belongs to.
#[derive(Debug)]
pub enum EngineEvent {
    Scanned {
        index: usize,
        result: Result<u64, CleanerError>,
    },
    Cleaned {
        index: usize,
        result: Result<(), CleanerError>,
    },
}

/// One scan or clean invocation to run.
#[derive(Clone)]
pub struct Unit {
    pub index: usize,
    pub cleaner: Arc<dyn Cleaner>,
    /// Privilege-gated: completes immediately without touching the cleaner.
    pub skip: bool,
}

impl fmt::Debug for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Unit")
            .field("index", &self.index)
            .field("cleaner", &self.cleaner.id())
            .field("skip", &self.skip)
            .finish()
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum UnitKind {
    Scan,
    Clean,
}

impl UnitKind {
    fn label(self) -> &'static str {
        match self {
            UnitKind::Scan => "scan",
            UnitKind::Clean => "clean",
        }
    }

    fn run(self, unit: &Unit) -> EngineEvent {
        let index = unit.index;
        match self {
            UnitKind::Scan if unit.skip => EngineEvent::Scanned {
                index,
                result: Ok(0),
            },
            UnitKind::Scan => EngineEvent::Scanned {
                index,
                result: unit.cleaner.scan(),
            },
            UnitKind::Clean => EngineEvent::Cleaned {
                index,
                result: unit.cleaner.clean(),
            },
        }
    }

    fn failed(self, index: usize, err: CleanerError) -> EngineEvent {
        match self {
            UnitKind::Scan => EngineEvent::Scanned {
                index,
                result: Err(err),
            },
            UnitKind::Clean => EngineEvent::Cleaned {
                index,
                result: Err(err),
            },
        }
    }
}

/// Fire-and-forget dispatcher with a single result queue.
pub struct Engine {
    tx: Sender<EngineEvent>,
    rx: Receiver<EngineEvent>,
}

impl Engine {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::channel();
        Self { tx, rx }
    }

    /// Start one scan unit per entry. Returns the number dispatched.
    pub fn dispatch_scans(&self, units: Vec<Unit>) -> usize {
        self.dispatch(UnitKind::Scan, units)
    }

    /// Start one clean unit per entry. Returns the number dispatched.
    pub fn dispatch_cleans(&self, units: Vec<Unit>) -> usize {
        self.dispatch(UnitKind::Clean, units)
    }

    fn dispatch(&self, kind: UnitKind, units: Vec<Unit>) -> usize {
        let count = units.len();
        tracing::debug!(kind = kind.label(), count, "Dispatching units");

        for unit in units {
            let tx = self.tx.clone();
            let index = unit.index;
            let name = format!("{}-{}", kind.label(), unit.cleaner.id());

            let spawned = thread::Builder::new().name(name).spawn(move || {
                let event = kind.run(&unit);
                if let EngineEvent::Scanned { result: Err(e), .. }
                | EngineEvent::Cleaned { result: Err(e), .. } = &event
                {
                    tracing::warn!(cleaner = unit.cleaner.id(), error = %e, "{} failed", kind.label());
                }
                // The receiver is gone only when the user quit mid-phase.
                let _ = tx.send(event);
            });

            if let Err(e) = spawned {
                tracing::warn!(index, error = %e, "Could not spawn worker");
                let _ = self.tx.send(kind.failed(index, CleanerError::Spawn(e)));
            }
        }

        count
    }

    /// Next finished unit, if one is waiting.
    pub fn try_next(&self) -> Option<EngineEvent> {
        match self.rx.try_recv() {
            Ok(event) => Some(event),
            Err(TryRecvError::Empty) | Err(TryRecvError::Disconnected) => None,
        }
    }

    /// Block until the next unit finishes.
    pub fn next_blocking(&self) -> Option<EngineEvent> {
        self.rx.recv().ok()
    }
}

impl Default for Engine {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingCleaner {
        size: u64,
        fail_clean: bool,
        scans: AtomicUsize,
    }

    impl CountingCleaner {
        fn new(size: u64, fail_clean: bool) -> Arc<Self> {
            Arc::new(Self {
                size,
                fail_clean,
                scans: AtomicUsize::new(0),
            })
        }
    }

    impl Cleaner for CountingCleaner {
        fn id(&self) -> &'static str {
            "counting"
        }

        fn name(&self) -> &str {
            "Counting"
        }

        fn scan(&self) -> Result<u64, CleanerError> {
            self.scans.fetch_add(1, Ordering::SeqCst);
            Ok(self.size)
        }

        fn clean(&self) -> Result<(), CleanerError> {
            if self.fail_clean {
                Err(CleanerError::PartialRemoval {
                    failed: 1,
                    first: PathBuf::from("/locked"),
                })
            } else {
                Ok(())
            }
        }
    }

    fn unit(index: usize, cleaner: Arc<CountingCleaner>, skip: bool) -> Unit {
        Unit {
            index,
            cleaner,
            skip,
        }
    }

    #[test]
    fn test_every_scan_unit_reports_once() {
        let engine = Engine::new();
        let cleaners: Vec<_> = (0..5).map(|i| CountingCleaner::new(i * 10, false)).collect();
        let units = cleaners
            .iter()
            .enumerate()
            .map(|(i, c)| unit(i, Arc::clone(c), false))
            .collect();

        assert_eq!(engine.dispatch_scans(units), 5);

        let mut seen = vec![false; 5];
        for _ in 0..5 {
            match engine.next_blocking().unwrap() {
                EngineEvent::Scanned { index, result } => {
                    assert!(!seen[index]);
                    seen[index] = true;
                    assert_eq!(result.unwrap(), index as u64 * 10);
                }
                other => panic!("unexpected {other:?}"),
            }
        }
        assert!(seen.iter().all(|s| *s));
        assert!(engine.try_next().is_none());
    }

    #[test]
    fn test_skipped_unit_never_invokes_cleaner() {
        let engine = Engine::new();
        let cleaner = CountingCleaner::new(999, false);

        engine.dispatch_scans(vec![unit(0, Arc::clone(&cleaner), true)]);

        match engine.next_blocking().unwrap() {
            EngineEvent::Scanned { index: 0, result } => assert_eq!(result.unwrap(), 0),
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(cleaner.scans.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn test_clean_failure_is_reported_not_raised() {
        let engine = Engine::new();
        engine.dispatch_cleans(vec![
            unit(0, CountingCleaner::new(1, true), false),
            unit(1, CountingCleaner::new(1, false), false),
        ]);

        let mut failures = 0;
        let mut successes = 0;
        for _ in 0..2 {
            match engine.next_blocking().unwrap() {
                EngineEvent::Cleaned { result: Ok(()), .. } => successes += 1,
                EngineEvent::Cleaned { result: Err(_), .. } => failures += 1,
                other => panic!("unexpected {other:?}"),
            }
        }
        assert_eq!((successes, failures), (1, 1));
    }

    #[test]
    fn test_empty_dispatch() {
        let engine = Engine::new();
        assert_eq!(engine.dispatch_cleans(vec![]), 0);
        assert!(engine.try_next().is_none());
    }
}
