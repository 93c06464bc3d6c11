//! Non-blocking move computation.
//!
//! Each request runs [`Searcher::best_move`] on its own thread against a
//! private copy of the position, so the caller can keep mutating its live
//! board. Results come back over a channel and are picked up by polling.
//! At most one engine-move computation and one hint computation are in
//! flight at a time.

use std::fmt;
use std::panic::{self, AssertUnwindSafe};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::sync::Arc;
use std::thread;

use chess_core::Position;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, warn};

use crate::difficulty::SearchParams;
use crate::error::{EngineError, Result};
use crate::search::{SearchResult, Searcher};

/// What a computation is for. Each kind has its own single slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ComputationKind {
    EngineMove,
    Hint,
}

impl ComputationKind {
    fn label(self) -> &'static str {
        match self {
            ComputationKind::EngineMove => "engine-move",
            ComputationKind::Hint => "hint",
        }
    }
}

impl fmt::Display for ComputationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// State of a submitted computation as seen by the caller.
///
/// `Pending` moves to exactly one of the other two and never back.
#[derive(Clone, Debug, PartialEq)]
pub enum ComputationState {
    Pending,
    Done(SearchResult),
    Cancelled,
}

impl ComputationState {
    pub fn is_pending(&self) -> bool {
        matches!(self, ComputationState::Pending)
    }
}

/// Ticket for a submitted computation. The coordinator owns the actual
/// state; the ticket only names it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ComputationHandle {
    id: u64,
    kind: ComputationKind,
}

impl ComputationHandle {
    pub fn id(&self) -> u64 {
        self.id
    }

    pub fn kind(&self) -> ComputationKind {
        self.kind
    }
}

struct Slot {
    id: u64,
    snapshot: Position,
    params: SearchParams,
    state: ComputationState,
    rx: Option<Receiver<SearchResult>>,
    stopper: Arc<AtomicBool>,
}

impl Slot {
    /// Pull a finished result off the channel, if there is one.
    fn refresh(&mut self) {
        if !self.state.is_pending() {
            return;
        }
        let Some(rx) = &self.rx else {
            return;
        };
        match rx.try_recv() {
            Ok(result) => self.finish(result),
            Err(TryRecvError::Empty) => {}
            Err(TryRecvError::Disconnected) => {
                warn!(id = self.id, "search thread vanished without a result");
                self.finish(SearchResult::no_move(self.params.depth));
            }
        }
    }

    fn finish(&mut self, result: SearchResult) {
        self.state = ComputationState::Done(result);
        self.rx = None;
    }

    fn abandon(&mut self) {
        self.stopper.store(true, Ordering::Relaxed);
        self.state = ComputationState::Cancelled;
        self.rx = None;
    }
}

/// Runs searches in the background and tracks their state.
pub struct Coordinator {
    rng: StdRng,
    next_id: u64,
    engine_move: Option<Slot>,
    hint: Option<Slot>,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(None)
    }
}

impl Coordinator {
    /// `seed` fixes the blunder randomness of every computation this
    /// coordinator starts; None seeds from entropy.
    pub fn new(seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };
        Self {
            rng,
            next_id: 1,
            engine_move: None,
            hint: None,
        }
    }

    /// Start computing the engine's move for `pos`.
    pub fn submit(&mut self, pos: &Position, params: SearchParams) -> Result<ComputationHandle> {
        self.start(ComputationKind::EngineMove, pos, params)
    }

    /// Start computing a hint for `pos`. Runs the same search as an engine
    /// move and may overlap with one.
    pub fn submit_hint(&mut self, pos: &Position, params: SearchParams) -> Result<ComputationHandle> {
        self.start(ComputationKind::Hint, pos, params)
    }

    fn start(
        &mut self,
        kind: ComputationKind,
        pos: &Position,
        params: SearchParams,
    ) -> Result<ComputationHandle> {
        if let Some(slot) = self.slot_mut(kind) {
            slot.refresh();
            if slot.state.is_pending() {
                return Err(EngineError::ComputationPending(kind.label()));
            }
        }

        let id = self.next_id;
        self.next_id += 1;
        let seed: u64 = self.rng.gen();
        let snapshot = pos.clone();
        let (tx, rx) = mpsc::channel();

        let stopper = Arc::new(AtomicBool::new(false));

        let task_pos = snapshot.clone();
        let task_stopper = Arc::clone(&stopper);
        let spawned = thread::Builder::new()
            .name(format!("{kind}-{id}"))
            .spawn(move || {
                let mut searcher = Searcher::seeded(seed).with_stopper(task_stopper);
                let result = panic::catch_unwind(AssertUnwindSafe(|| {
                    searcher.best_move(&task_pos, params)
                }))
                .unwrap_or_else(|_| {
                    warn!(id, "search panicked; reporting no move");
                    SearchResult::no_move(params.depth)
                });
                // The receiver is gone when the computation was cancelled.
                let _ = tx.send(result);
            });

        let (state, rx) = match spawned {
            Ok(_) => (ComputationState::Pending, Some(rx)),
            Err(err) => {
                warn!(%err, "could not spawn search thread; reporting no move");
                (
                    ComputationState::Done(SearchResult::no_move(params.depth)),
                    None,
                )
            }
        };

        debug!(id, %kind, depth = params.depth, blunder_chance = params.blunder_chance, "computation submitted");
        *self.slot_entry(kind) = Some(Slot {
            id,
            snapshot,
            params,
            state,
            rx,
            stopper,
        });
        Ok(ComputationHandle { id, kind })
    }

    /// Current state of `handle`. Never blocks.
    ///
    /// A handle that has been replaced by a newer submission of the same
    /// kind reads as `Cancelled`.
    pub fn poll(&mut self, handle: &ComputationHandle) -> ComputationState {
        match self.live_slot(handle) {
            Some(slot) => {
                slot.refresh();
                slot.state.clone()
            }
            None => ComputationState::Cancelled,
        }
    }

    /// Block until `handle` settles.
    pub fn wait(&mut self, handle: &ComputationHandle) -> ComputationState {
        let Some(slot) = self.live_slot(handle) else {
            return ComputationState::Cancelled;
        };
        if slot.state.is_pending() {
            let received = slot.rx.as_ref().map(|rx| rx.recv());
            match received {
                Some(Ok(result)) => slot.finish(result),
                _ => {
                    warn!(id = slot.id, "search thread vanished without a result");
                    let depth = slot.params.depth;
                    slot.finish(SearchResult::no_move(depth));
                }
            }
        }
        slot.state.clone()
    }

    /// Drop interest in `handle`. A pending search is told to stop and
    /// whatever it still sends is thrown away. Settled computations are left
    /// alone.
    pub fn cancel(&mut self, handle: &ComputationHandle) {
        if let Some(slot) = self.live_slot(handle) {
            if slot.state.is_pending() {
                debug!(id = slot.id, kind = %handle.kind, "computation cancelled");
                slot.abandon();
            }
        }
    }

    /// Cancel whatever of `kind` is pending.
    pub fn cancel_kind(&mut self, kind: ComputationKind) {
        let handle = self
            .slot_mut(kind)
            .map(|slot| ComputationHandle { id: slot.id, kind });
        if let Some(handle) = handle {
            self.cancel(&handle);
        }
    }

    /// Whether a computation of `kind` is still running.
    pub fn is_pending(&mut self, kind: ComputationKind) -> bool {
        match self.slot_mut(kind) {
            Some(slot) => {
                slot.refresh();
                slot.state.is_pending()
            }
            None => false,
        }
    }

    /// The position `handle` is computing against, as it was at submission.
    pub fn snapshot(&self, handle: &ComputationHandle) -> Option<&Position> {
        let slot = match handle.kind {
            ComputationKind::EngineMove => self.engine_move.as_ref(),
            ComputationKind::Hint => self.hint.as_ref(),
        }?;
        (slot.id == handle.id).then_some(&slot.snapshot)
    }

    fn live_slot(&mut self, handle: &ComputationHandle) -> Option<&mut Slot> {
        self.slot_mut(handle.kind).filter(|slot| slot.id == handle.id)
    }

    fn slot_mut(&mut self, kind: ComputationKind) -> Option<&mut Slot> {
        self.slot_entry(kind).as_mut()
    }

    fn slot_entry(&mut self, kind: ComputationKind) -> &mut Option<Slot> {
        match kind {
            ComputationKind::EngineMove => &mut self.engine_move,
            ComputationKind::Hint => &mut self.hint,
        }
    }
}

impl Drop for Coordinator {
    fn drop(&mut self) {
        for slot in [self.engine_move.as_mut(), self.hint.as_mut()]
            .into_iter()
            .flatten()
        {
            if slot.state.is_pending() {
                slot.abandon();
            }
        }
    }
}

#[cfg(test)]
#[path = "coordinator_tests.rs"]
mod coordinator_tests;
