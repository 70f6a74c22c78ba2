//! Resumable subset construction.
//!
//! [`Determinizer`] performs the same exploration as
//! [`determinize`](crate::automaton::determinize), but one unit of work per
//! [`step`](Determinizer::step): either taking the next state set off the
//! frontier or expanding the current set on a single letter. Callers can
//! interleave other work between steps, stop after a budget, or simply drop
//! the determinizer to abandon the run.

use crate::automaton::access::{AutomatonAccess, AutomatonBuild};
use crate::automaton::dfa::DFA;
use crate::automaton::exploration::Exploration;
use crate::automaton::frontier::Pending;
use crate::automaton::symbol::SymbolId;
use crate::config::DeterminizeConfig;
use crate::error::{DeterminizeError, Result};
use std::collections::VecDeque;

/// Where the step machine stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    /// The next step takes a state set off the frontier.
    AwaitingPop,
    /// The next step expands the current set on its next letter.
    ExpandingLetter,
    /// Nothing is left to do, either because the run completed or because it
    /// halted on an error.
    Done,
}

/// A run that could not start, together with the target it was given.
///
/// Seeding writes the alphabet and possibly the initial state into the
/// target before the error is raised, so the target is handed back as it
/// was left.
#[derive(Debug)]
pub struct StartError<B> {
    pub error: DeterminizeError,
    pub target: B,
}

impl<B> StartError<B> {
    pub fn into_parts(self) -> (DeterminizeError, B) {
        (self.error, self.target)
    }
}

impl<B> std::fmt::Display for StartError<B> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "could not start subset construction: {}", self.error)
    }
}

impl<B: std::fmt::Debug> std::error::Error for StartError<B> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

impl<B> From<StartError<B>> for DeterminizeError {
    fn from(start: StartError<B>) -> Self {
        start.error
    }
}

pub struct Determinizer<'a, A: ?Sized, B = DFA> {
    exploration: Exploration<'a, A>,
    target: B,
    current: Option<Pending>,
    remaining: VecDeque<SymbolId>,
    phase: Phase,
    steps: usize,
    halted: Option<DeterminizeError>,
}

impl<'a, A> Determinizer<'a, A>
where
    A: AutomatonAccess + ?Sized,
{
    /// Start a run that builds a fresh [`DFA`].
    pub fn new(source: &'a A, config: &DeterminizeConfig) -> Result<Self> {
        Self::with_target(source, DFA::new(), config).map_err(DeterminizeError::from)
    }
}

impl<'a, A, B> Determinizer<'a, A, B>
where
    A: AutomatonAccess + ?Sized,
    B: AutomatonBuild,
{
    /// Start a run that builds into `target`.
    ///
    /// The initial state set is registered immediately, so `target` already
    /// holds the initial state when this returns. On failure `target` comes
    /// back inside the [`StartError`].
    pub fn with_target(
        source: &'a A,
        mut target: B,
        config: &DeterminizeConfig,
    ) -> std::result::Result<Self, StartError<B>> {
        let mut exploration = match Exploration::new(source, config) {
            Ok(exploration) => exploration,
            Err(error) => return Err(StartError { error, target }),
        };
        let phase = match exploration.seed(&mut target) {
            Ok(Some(_)) => Phase::AwaitingPop,
            Ok(None) => Phase::Done,
            Err(error) => return Err(StartError { error, target }),
        };
        tracing::debug!(
            letters = exploration.alphabet().len(),
            ?phase,
            "starting incremental subset construction"
        );

        Ok(Self {
            exploration,
            target,
            current: None,
            remaining: VecDeque::new(),
            phase,
            steps: 0,
            halted: None,
        })
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Whether a pop or a letter expansion is still pending.
    pub fn has_work_left(&self) -> bool {
        self.phase != Phase::Done
    }

    /// Number of steps performed so far.
    pub fn steps_taken(&self) -> usize {
        self.steps
    }

    /// Number of distinct state sets discovered so far.
    pub fn num_subsets(&self) -> usize {
        self.exploration.num_subsets()
    }

    /// The error that halted the run, if any.
    pub fn halt_reason(&self) -> Option<&DeterminizeError> {
        self.halted.as_ref()
    }

    /// The target as built so far.
    ///
    /// Every state and transition in it is well-formed, but it only
    /// recognizes the source language once the run completed without error.
    pub fn target(&self) -> &B {
        &self.target
    }

    /// Give up the run and keep whatever was built.
    pub fn into_target(self) -> B {
        self.target
    }

    /// Perform one unit of work.
    ///
    /// Returns whether work remains. After an error the run is halted and
    /// every later call returns the same error.
    pub fn step(&mut self) -> Result<bool> {
        if let Some(err) = &self.halted {
            return Err(err.clone());
        }

        let outcome = match self.phase {
            Phase::Done => return Ok(false),
            Phase::AwaitingPop => {
                self.load_next();
                Ok(())
            }
            Phase::ExpandingLetter => self.expand_next(),
        };

        if let Err(err) = outcome {
            tracing::debug!(step = self.steps, error = %err, "incremental subset construction halted");
            self.phase = Phase::Done;
            self.halted = Some(err.clone());
            return Err(err);
        }
        self.steps += 1;

        if self.phase == Phase::AwaitingPop && !self.exploration.has_pending() {
            self.exploration.finish(&mut self.target);
            self.phase = Phase::Done;
        }
        Ok(self.has_work_left())
    }

    /// Perform at most `budget` steps. Returns whether work remains.
    pub fn run_steps(&mut self, budget: usize) -> Result<bool> {
        for _ in 0..budget {
            if !self.step()? {
                break;
            }
        }
        Ok(self.has_work_left())
    }

    /// Drain all remaining steps and return the finished target.
    pub fn result(mut self) -> Result<B> {
        while self.step()? {}
        Ok(self.target)
    }

    fn load_next(&mut self) {
        self.current = self.exploration.pop();
        let Some(pending) = &self.current else {
            return;
        };

        self.remaining = self.exploration.alphabet().iter().copied().collect();
        tracing::trace!(
            step = self.steps,
            id = pending.id,
            subset = %pending.set,
            "expanding state set"
        );
        if !self.remaining.is_empty() {
            self.phase = Phase::ExpandingLetter;
        }
    }

    fn expand_next(&mut self) -> Result<()> {
        let (Some(pending), Some(symbol)) = (&self.current, self.remaining.pop_front()) else {
            self.phase = Phase::AwaitingPop;
            return Ok(());
        };

        let destination = self
            .exploration
            .expand_letter(pending, symbol, &mut self.target)?;
        tracing::trace!(
            step = self.steps,
            source = pending.id,
            symbol,
            destination,
            transitions = self.exploration.num_transitions(),
            "emitted transition"
        );

        if self.remaining.is_empty() {
            self.current = None;
            self.phase = Phase::AwaitingPop;
        }
        Ok(())
    }
}
