//! Trajectory packaging for the execution collaborator

use super::timing::TimedJointState;
use std::time::SystemTime;

/// A finalized, time-parameterized joint trajectory
#[derive(Debug, Clone)]
pub struct Trajectory {
    pub joint_names: Vec<String>,
    /// Reference frame the Cartesian waypoints were given in
    pub frame_id: String,
    /// Wall-clock origin of the time-from-start axis
    pub stamp: SystemTime,
    pub points: Vec<TimedJointState>,
}

impl Trajectory {
    /// Number of samples in the trajectory
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the trajectory holds no samples
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Total duration in seconds
    pub fn duration(&self) -> f64 {
        self.points.last().map_or(0.0, |point| point.time_from_start)
    }
}

/// Trait for execution collaborators that consume finished trajectories
pub trait ExecutionSink: Send + Sync {
    /// Hand over a trajectory for physical execution
    fn execute(&mut self, trajectory: &Trajectory) -> Result<(), String>;
}

/// Package timed samples into a trajectory ready for execution
pub fn emit_trajectory(
    joint_names: &[String],
    frame_id: &str,
    points: Vec<TimedJointState>,
) -> Trajectory {
    Trajectory {
        joint_names: joint_names.to_vec(),
        frame_id: frame_id.to_string(),
        stamp: SystemTime::now(),
        points,
    }
}
