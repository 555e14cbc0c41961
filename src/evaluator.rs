use std::time::{Duration, SystemTime};

use tracing::{debug, info};

use crate::classify::{classify_chars, classify_words, UnitStatus};
use crate::metrics::{char_accuracy, gross_wpm, net_wpm, word_accuracy, Metrics};
use crate::session::{Mode, Phase, Session, SessionConfig, TargetText};
use crate::time_series::TimeSeriesPoint;

/// Progress for the current buffer, computed on demand and never stored.
struct Snapshot {
    statuses: Vec<UnitStatus>,
    correct: usize,
    errors: usize,
    /// committed words in word mode, typed chars in character mode
    attempted: usize,
    complete: bool,
}

/// Owns the single typing session and answers every question about it.
///
/// The evaluator never drives a clock or reads the keyboard itself: the
/// caller feeds it `on_input` and `on_clock_tick` and stops ticking once
/// [`Evaluator::is_finished`] reports true.
#[derive(Debug, Default)]
pub struct Evaluator {
    session: Option<Session>,
}

impl Evaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn start(&mut self, target: TargetText, config: SessionConfig) {
        info!(
            mode = %config.mode,
            words = target.words().len(),
            chars = target.chars().len(),
            time_limit_secs = config.time_limit.map(|d| d.as_secs_f64()),
            "session created"
        );
        self.session = Some(Session::new(target, config));
    }

    pub fn reset(&mut self) {
        if self.session.take().is_some() {
            debug!("session discarded");
        }
    }

    pub fn on_clock_tick(&mut self) -> Option<Metrics> {
        let session = self.session.as_mut()?;
        if session.phase != Phase::Running {
            return None;
        }

        let before = session.elapsed().as_secs();
        session.elapsed_ticks += 1;
        let after = session.elapsed();

        if after.as_secs() > before {
            let wpm = self.metrics().wpm as f64;
            if let Some(session) = self.session.as_mut() {
                session
                    .wpm_series
                    .push(TimeSeriesPoint::new(after.as_secs() as f64, wpm));
            }
        }

        if self.session.as_ref().is_some_and(Session::time_limit_reached) {
            self.finish();
        }

        Some(self.metrics())
    }

    pub fn on_input(&mut self, raw: &str) -> Option<Metrics> {
        let session = self.session.as_mut()?;
        match session.phase {
            Phase::Finished => return None,
            Phase::Pending if raw.is_empty() => {}
            Phase::Pending => {
                session.phase = Phase::Running;
                session.started_at = Some(SystemTime::now());
                debug!("session running");
            }
            Phase::Running => {}
        }

        session.typed.clear();
        session.typed.push_str(raw);

        if self.snapshot().is_some_and(|s| s.complete) {
            self.finish();
        }

        Some(self.metrics())
    }

    pub fn unit_statuses(&self) -> Vec<UnitStatus> {
        self.snapshot().map(|s| s.statuses).unwrap_or_default()
    }

    pub fn metrics(&self) -> Metrics {
        let (Some(session), Some(snap)) = (self.session.as_ref(), self.snapshot()) else {
            return Metrics::default();
        };

        let elapsed = session.elapsed();
        let (wpm, accuracy) = match session.config.mode {
            Mode::Word => (
                net_wpm(snap.correct, elapsed),
                word_accuracy(snap.correct, snap.attempted),
            ),
            Mode::Character => (
                gross_wpm(snap.attempted, elapsed),
                char_accuracy(snap.attempted, snap.errors),
            ),
        };

        Metrics {
            correct_units: snap.correct,
            total_errors: snap.errors,
            wpm,
            accuracy,
        }
    }

    pub fn phase(&self) -> Option<Phase> {
        self.session.as_ref().map(|s| s.phase)
    }

    pub fn is_running(&self) -> bool {
        self.phase() == Some(Phase::Running)
    }

    pub fn is_finished(&self) -> bool {
        self.phase() == Some(Phase::Finished)
    }

    pub fn session(&self) -> Option<&Session> {
        self.session.as_ref()
    }

    pub fn target(&self) -> Option<&TargetText> {
        self.session.as_ref().map(|s| &s.target)
    }

    pub fn mode(&self) -> Option<Mode> {
        self.session.as_ref().map(|s| s.config.mode)
    }

    pub fn typed(&self) -> &str {
        self.session.as_ref().map_or("", |s| s.typed.as_str())
    }

    pub fn elapsed(&self) -> Duration {
        self.session
            .as_ref()
            .map_or(Duration::ZERO, Session::elapsed)
    }

    pub fn seconds_remaining(&self) -> Option<f64> {
        self.session.as_ref().and_then(Session::seconds_remaining)
    }

    pub fn wpm_series(&self) -> &[TimeSeriesPoint] {
        self.session
            .as_ref()
            .map(|s| s.wpm_series.as_slice())
            .unwrap_or_default()
    }

    fn snapshot(&self) -> Option<Snapshot> {
        let session = self.session.as_ref()?;
        let snap = match session.config.mode {
            Mode::Word => {
                let p = classify_words(session.target.words(), &session.typed);
                Snapshot {
                    statuses: p.statuses,
                    correct: p.correct,
                    errors: p.incorrect,
                    attempted: p.committed,
                    complete: p.complete,
                }
            }
            Mode::Character => {
                let p = classify_chars(session.target.chars(), &session.typed);
                Snapshot {
                    statuses: p.statuses,
                    correct: p.correct,
                    errors: p.errors,
                    attempted: p.typed,
                    complete: p.complete,
                }
            }
        };
        Some(snap)
    }

    fn finish(&mut self) {
        let metrics = self.metrics();
        if let Some(session) = self.session.as_mut() {
            session.phase = Phase::Finished;
            session.finished_at = Some(SystemTime::now());
            info!(
                mode = %session.config.mode,
                elapsed_secs = session.elapsed().as_secs_f64(),
                wpm = metrics.wpm,
                accuracy = metrics.accuracy,
                errors = metrics.total_errors,
                "session finished"
            );
        }
    }
}
