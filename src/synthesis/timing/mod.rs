//! Time parameterization with pluggable strategies

use crate::common::types::JointConfiguration;
use crate::kinematics::RobotKinematics;
use std::collections::HashMap;
use std::fmt::Debug;

/// One timed sample of a joint trajectory
#[derive(Debug, Clone, PartialEq)]
pub struct TimedJointState {
    pub positions: Vec<f64>,
    pub velocities: Vec<f64>,
    pub accelerations: Vec<f64>,
    /// Seconds since the first sample
    pub time_from_start: f64,
}

impl TimedJointState {
    /// A sample at `time_from_start` with zero velocity and acceleration
    pub fn at_rest(positions: JointConfiguration, time_from_start: f64) -> Self {
        let dof = positions.len();
        TimedJointState {
            positions,
            velocities: vec![0.0; dof],
            accelerations: vec![0.0; dof],
            time_from_start,
        }
    }
}

/// Trait for time parameterization strategies
pub trait TimingStrategy: Debug + Send + Sync {
    /// Create a new instance with default parameters
    fn new() -> Self
    where
        Self: Sized;

    /// Assign timestamps and finite-difference profiles to a joint path
    fn parameterize(
        &self,
        path: &[JointConfiguration],
        kinematics: &dyn RobotKinematics,
    ) -> Vec<TimedJointState>;

    /// Get the name of this strategy
    fn name(&self) -> &str;

    /// Configure the strategy with parameters
    fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), String>;
}

// Re-export specific implementations
pub mod cartesian_speed;
pub mod fixed_interval;

// Default strategy
pub use fixed_interval::FixedIntervalTiming as DefaultTiming;
