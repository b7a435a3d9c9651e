//! Per-sample unrolling of finished trajectories
//!
//! Execution-side consumers take one record per sample with an absolute
//! stamp. The sequence counter is threaded through the call: the caller
//! passes its running value and stores the returned one for the next
//! trajectory.

use super::emitter::Trajectory;
use std::time::{Duration, SystemTime};

/// One per-sample execution record
#[derive(Debug, Clone)]
pub struct JointRequest {
    pub seq: u64,
    /// Absolute stamp: trajectory origin plus time-from-start
    pub stamp: SystemTime,
    pub names: Vec<String>,
    pub positions: Vec<f64>,
    pub velocities: Vec<f64>,
    pub accelerations: Vec<f64>,
    pub jerks: Vec<f64>,
}

/// Unroll a trajectory into per-sample joint requests
///
/// Returns the requests and the sequence value to pass to the next call.
/// Jerk is not produced by the pipeline and is emitted as zero.
pub fn unroll_trajectory(trajectory: &Trajectory, start_seq: u64) -> (Vec<JointRequest>, u64) {
    let mut requests = Vec::with_capacity(trajectory.points.len());
    let mut seq = start_seq;

    for point in &trajectory.points {
        let stamp = trajectory.stamp + Duration::from_secs_f64(point.time_from_start);
        requests.push(JointRequest {
            seq,
            stamp,
            names: trajectory.joint_names.clone(),
            positions: point.positions.clone(),
            velocities: point.velocities.clone(),
            accelerations: point.accelerations.clone(),
            jerks: vec![0.0; point.positions.len()],
        });
        seq += 1;
    }

    (requests, seq)
}
