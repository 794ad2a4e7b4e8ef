use crate::core::queue::CandidateQueue;
use crate::models::{CardPhase, CardView, DeckTuning, DragState};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

/// Clamped piecewise-linear interpolation
///
/// `input` must be monotonic (ascending or descending) and the same length
/// as `output`. Values outside the input range clamp to the end outputs.
pub fn interpolate(value: f64, input: &[f64], output: &[f64]) -> f64 {
    let n = input.len().min(output.len());
    match n {
        0 => return 0.0,
        1 => return output[0],
        _ => {}
    }

    let ascending = input[0] <= input[n - 1];
    let point = |i: usize| {
        if ascending {
            (input[i], output[i])
        } else {
            (input[n - 1 - i], output[n - 1 - i])
        }
    };

    let (first_x, first_y) = point(0);
    let (last_x, last_y) = point(n - 1);
    if value <= first_x {
        return first_y;
    }
    if value >= last_x {
        return last_y;
    }

    for i in 1..n {
        let (x0, y0) = point(i - 1);
        let (x1, y1) = point(i);
        if value <= x1 {
            if x1 == x0 {
                return y1;
            }
            let t = (value - x0) / (x1 - x0);
            return y0 + t * (y1 - y0);
        }
    }

    last_y
}

/// Visual signals derived from a drag offset
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveSignals {
    pub rotation_deg: f64,
    pub opacity: f64,
    pub reject_indicator: f64,
    pub accept_indicator: f64,
}

/// Maps the live offset and stack position to card visuals
#[derive(Debug, Clone, Copy)]
pub struct PresentationBinder {
    tuning: DeckTuning,
}

impl PresentationBinder {
    pub fn new(tuning: DeckTuning) -> Self {
        Self { tuning }
    }

    /// Signals for an offset; recomputed on every call
    pub fn signals(&self, offset: f64) -> LiveSignals {
        let offset = if offset.is_finite() { offset } else { 0.0 };
        let domain = self.tuning.rotation_domain;
        let indicator = self.tuning.indicator_domain;
        let max_rotation = self.tuning.max_rotation_deg;

        LiveSignals {
            rotation_deg: interpolate(offset, &[-domain, domain], &[-max_rotation, max_rotation]),
            opacity: interpolate(offset, &[-domain, 0.0, domain], &[0.0, 1.0, 0.0]),
            reject_indicator: interpolate(offset, &[0.0, -indicator], &[0.0, 1.0]),
            accept_indicator: interpolate(offset, &[0.0, indicator], &[0.0, 1.0]),
        }
    }

    /// Resting tilt of a card: none for the front, alternating by parity below it
    pub fn stack_offset(&self, index: usize, is_front: bool) -> f64 {
        if is_front {
            0.0
        } else if index % 2 == 1 {
            self.tuning.stack_offset_deg
        } else {
            -self.tuning.stack_offset_deg
        }
    }

    /// Render every card in the queue, bottom first
    pub fn card_views(&self, queue: &CandidateQueue, drag: Option<&DragState>, preview: bool) -> Vec<CardView> {
        let front_index = queue.len().saturating_sub(1);

        queue
            .iter()
            .enumerate()
            .map(|(index, candidate)| {
                let is_front = index == front_index;
                let dragged = drag.filter(|d| is_front && d.candidate_id == candidate.id);
                let offset = dragged.map_or(0.0, |d| d.offset);
                let signals = self.signals(offset);
                let interactive = is_front && !preview;

                CardView {
                    candidate: candidate.clone(),
                    phase: if dragged.is_some() { CardPhase::Dragging } else { CardPhase::Idle },
                    is_front,
                    draggable: interactive,
                    offset_x: offset,
                    rotation_deg: signals.rotation_deg + self.stack_offset(index, is_front),
                    opacity: signals.opacity,
                    scale: if is_front { 1.0 } else { self.tuning.back_card_scale },
                    reject_indicator_opacity: interactive.then_some(signals.reject_indicator),
                    accept_indicator_opacity: interactive.then_some(signals.accept_indicator),
                }
            })
            .collect()
    }

    /// Follow a gesture stream
    pub fn bind(&self, rx: watch::Receiver<Option<DragState>>) -> LiveBinding {
        LiveBinding { binder: *self, rx }
    }
}

impl Default for PresentationBinder {
    fn default() -> Self {
        Self::new(DeckTuning::default())
    }
}

/// Reader side of the gesture tracker, yielding fresh signals per change
pub struct LiveBinding {
    binder: PresentationBinder,
    rx: watch::Receiver<Option<DragState>>,
}

impl LiveBinding {
    pub fn current(&mut self) -> LiveSignals {
        let offset = self.rx.borrow_and_update().as_ref().map_or(0.0, |d| d.offset);
        self.binder.signals(offset)
    }

    /// Wait for the next offset change. `None` once the tracker is gone.
    pub async fn next(&mut self) -> Option<LiveSignals> {
        self.rx.changed().await.ok()?;
        Some(self.current())
    }
}
