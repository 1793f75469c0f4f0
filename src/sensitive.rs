//! Sensitive-region binding: which logical volumes are instrumented, and
//! the per-event energy accumulator read out by the run loop.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{Result, ScoringError};
use crate::tree::VolumeTree;

/// A named detector bound to a set of logical volumes, accumulating the
/// energy deposited inside them over the current event.
#[derive(Debug, Clone)]
pub struct SensitiveBinding {
    detector: String,
    volumes: HashSet<String>,
    deposit: f64,
}

impl SensitiveBinding {
    /// Returns the detector name.
    #[must_use]
    pub fn detector(&self) -> &str {
        &self.detector
    }

    /// Returns true if the named logical volume is bound to this detector.
    #[must_use]
    pub fn covers(&self, volume: &str) -> bool {
        self.volumes.contains(volume)
    }

    /// Returns the energy deposited so far in the current event, in MeV.
    #[must_use]
    pub fn deposit(&self) -> f64 {
        self.deposit
    }
}

/// Energy read out for one detector at end of event.
#[derive(Debug, Clone, PartialEq)]
pub struct EventDeposit {
    pub detector: String,
    pub energy: f64,
}

/// All sensitive-region bindings for one worker.
///
/// The registry is the only mutable state alive during transport. A
/// parallel host gives each worker its own clone and merges the readouts;
/// nothing here is shared across threads.
#[derive(Debug, Clone, Default)]
pub struct ScoringRegistry {
    bindings: Vec<SensitiveBinding>,
}

impl ScoringRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds a detector name to a set of logical volumes in an already
    /// built tree.
    ///
    /// # Errors
    ///
    /// Returns [`ScoringError::UnknownVolume`] if any named volume does not
    /// exist in the tree, or [`ScoringError::DuplicateDetector`] if the
    /// detector name is already bound. A failed bind leaves every prior
    /// binding untouched.
    pub fn bind<'a, I>(&mut self, detector: &str, volumes: I, tree: &VolumeTree) -> Result<()>
    where
        I: IntoIterator<Item = &'a str>,
    {
        if self.bindings.iter().any(|b| b.detector == detector) {
            return Err(ScoringError::DuplicateDetector(detector.into()).into());
        }
        let mut names = HashSet::new();
        for name in volumes {
            if !tree.contains_logical(name) {
                return Err(ScoringError::UnknownVolume(name.into()).into());
            }
            names.insert(name.to_owned());
        }
        debug!(detector, volumes = names.len(), "bound sensitive region");
        self.bindings.push(SensitiveBinding {
            detector: detector.into(),
            volumes: names,
            deposit: 0.0,
        });
        Ok(())
    }

    /// Records one step's energy deposit inside the named logical volume.
    ///
    /// Deposits in volumes no detector covers are silently dropped, which
    /// is what a transport engine expects of an uninstrumented volume.
    pub fn add_deposit(&mut self, volume: &str, energy: f64) {
        for binding in &mut self.bindings {
            if binding.covers(volume) {
                binding.deposit += energy;
            }
        }
    }

    /// Returns the current accumulated energy for a detector, if bound.
    #[must_use]
    pub fn current(&self, detector: &str) -> Option<f64> {
        self.bindings
            .iter()
            .find(|b| b.detector == detector)
            .map(SensitiveBinding::deposit)
    }

    /// Reads out every detector's accumulated energy and resets the
    /// accumulators for the next event.
    pub fn end_of_event(&mut self) -> Vec<EventDeposit> {
        self.bindings
            .iter_mut()
            .map(|binding| {
                let energy = binding.deposit;
                binding.deposit = 0.0;
                EventDeposit {
                    detector: binding.detector.clone(),
                    energy,
                }
            })
            .collect()
    }

    /// Folds another worker's accumulators into this one, detector by
    /// detector. Detectors unknown to `self` are ignored.
    pub fn merge_from(&mut self, other: &ScoringRegistry) {
        for binding in &mut self.bindings {
            if let Some(energy) = other.current(&binding.detector) {
                binding.deposit += energy;
            }
        }
    }

    /// Returns the bindings.
    #[must_use]
    pub fn bindings(&self) -> &[SensitiveBinding] {
        &self.bindings
    }
}
