//! Lock-guarded parameters
//!
//! [`SyncParameter`] wraps a [`Parameter`] with an optional lock shared with
//! whoever drives the bound algorithm instances. Every mutation runs while
//! holding that lock, so a value is never pushed into an instance while its
//! owner is processing with it. Without a lock the wrapper behaves exactly
//! like the plain parameter.

use crate::algorithms::AlgorithmHandle;
use crate::parameters::config::ParserConfig;
use crate::parameters::param_sets::ParamSets;
use crate::parameters::parameter::{Parameter, ParameterError};
use crate::parameters::parameter_set::AlgoParam;
use crate::parameters::value::ParameterValue;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;
use std::sync::{Arc, Mutex, MutexGuard};

/// Lock shared between parameters and the owner of the bound instances
pub type ParamLock = Arc<Mutex<()>>;

/// A registry whose parameters are lock-guarded
pub type SyncParamSets = ParamSets<SyncParameter>;

/// A [`Parameter`] whose mutators run under an optional external lock
///
/// Read-only queries go through `Deref` and never take the lock.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SyncParameter {
    inner: Parameter,
    #[serde(skip)]
    lock: Option<ParamLock>,
}

// The lock guards no data of its own, so a poisoned lock is still usable.
fn acquire(lock: &Option<ParamLock>) -> Option<MutexGuard<'_, ()>> {
    lock.as_ref().map(|lock| match lock.lock() {
        Ok(guard) => guard,
        Err(poisoned) => poisoned.into_inner(),
    })
}

impl SyncParameter {
    pub fn new(inner: Parameter, lock: Option<ParamLock>) -> Self {
        Self { inner, lock }
    }

    pub fn lock(&self) -> Option<&ParamLock> {
        self.lock.as_ref()
    }

    /// Replace the lock; `None` disables locking
    pub fn set_lock(&mut self, lock: Option<ParamLock>) {
        self.lock = lock;
    }

    pub fn into_inner(self) -> Parameter {
        self.inner
    }

    pub fn set_bool_value(&mut self, value: bool, set_default: bool) -> Result<(), ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.set_bool_value(value, set_default)
    }

    pub fn set_int_value(&mut self, value: i32, set_default: bool) -> Result<(), ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.set_int_value(value, set_default)
    }

    pub fn set_double_value(&mut self, value: f64, set_default: bool) -> Result<(), ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.set_double_value(value, set_default)
    }

    pub fn set_value(&mut self, value: ParameterValue, set_default: bool) -> Result<(), ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.set_value(value, set_default)
    }

    pub fn set_index_value(&mut self, index: usize, set_default: bool) -> Result<(), ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.set_index_value(index, set_default)
    }

    /// Restore the captured default, holding the lock once for the whole reset
    pub fn reset_to_default_value(&mut self) -> Result<bool, ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.reset_to_default_value()
    }

    pub fn add_algorithm(&mut self, handle: &AlgorithmHandle) -> Result<bool, ParameterError> {
        let _guard = acquire(&self.lock);
        self.inner.add_algorithm(handle)
    }

    pub fn remove_algorithm(&mut self, handle: &AlgorithmHandle) -> bool {
        let _guard = acquire(&self.lock);
        self.inner.remove_algorithm(handle)
    }

    pub fn remove_all_algorithms(&mut self) {
        let _guard = acquire(&self.lock);
        self.inner.remove_all_algorithms()
    }
}

impl From<Parameter> for SyncParameter {
    fn from(inner: Parameter) -> Self {
        Self::new(inner, None)
    }
}

impl Deref for SyncParameter {
    type Target = Parameter;

    fn deref(&self) -> &Parameter {
        &self.inner
    }
}

impl PartialEq for SyncParameter {
    fn eq(&self, other: &Self) -> bool {
        self.inner == other.inner
    }
}

impl fmt::Display for SyncParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.inner.fmt(f)
    }
}

impl AlgoParam for SyncParameter {
    fn from_line(line: &str, config: &ParserConfig) -> Self {
        Self::new(Parameter::from_line(line, config), None)
    }

    fn param(&self) -> &Parameter {
        &self.inner
    }

    fn add_algorithm(&mut self, handle: &AlgorithmHandle) -> Result<bool, ParameterError> {
        SyncParameter::add_algorithm(self, handle)
    }

    fn remove_algorithm(&mut self, handle: &AlgorithmHandle) -> bool {
        SyncParameter::remove_algorithm(self, handle)
    }

    fn remove_all_algorithms(&mut self) {
        SyncParameter::remove_all_algorithms(self)
    }

    fn set_value(&mut self, value: ParameterValue, set_default: bool) -> Result<(), ParameterError> {
        SyncParameter::set_value(self, value, set_default)
    }

    fn reset_to_default_value(&mut self) -> Result<bool, ParameterError> {
        SyncParameter::reset_to_default_value(self)
    }
}

impl ParamSets<SyncParameter> {
    /// Swap the lock of every parameter of every set
    pub fn set_lock(&mut self, lock: Option<ParamLock>) {
        for set in self.iter_mut() {
            for param in set.iter_mut() {
                param.set_lock(lock.clone());
            }
        }
    }
}
