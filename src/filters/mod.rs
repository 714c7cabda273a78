//! Signal filtering algorithms for smoothing noisy joint measurements.
//!
//! Every tracked scalar (one limb's joint angle, the trunk lean, the neck
//! length ratio, ...) gets its own filter instance so that noise on one signal
//! never bleeds into another before they are combined.

/// Exponential moving average smoothing
pub mod exponential;

pub use exponential::ExponentialSmoother;

/// Trait for scalar signal filters
pub trait SignalFilter: Send + Sync {
    /// Feed one raw sample and return the filtered value
    fn apply(&mut self, value: f64) -> f64;

    /// Return to the uninitialized state
    fn reset(&mut self);
}
