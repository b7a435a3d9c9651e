//! Cartesian-speed time parameterization
//!
//! Retimes the fixed-interval profile so the tool tip averages a target
//! Cartesian speed between waypoints. A stamp is only ever delayed, never
//! advanced, so any tighter spacing already imposed upstream stays
//! respected and the stamps remain strictly increasing.

use super::{TimedJointState, TimingStrategy};
use crate::common::types::JointConfiguration;
use crate::kinematics::RobotKinematics;
use std::collections::HashMap;

/// Time parameterization driven by a target end-effector speed
#[derive(Debug)]
pub struct CartesianSpeedTiming {
    target_speed: f64,
    sampling_interval: f64,
}

impl TimingStrategy for CartesianSpeedTiming {
    fn new() -> Self {
        CartesianSpeedTiming {
            target_speed: 0.1,
            sampling_interval: 0.4,
        }
    }

    fn parameterize(
        &self,
        path: &[JointConfiguration],
        kinematics: &dyn RobotKinematics,
    ) -> Vec<TimedJointState> {
        let mut points: Vec<TimedJointState> = path
            .iter()
            .enumerate()
            .map(|(i, configuration)| {
                TimedJointState::at_rest(configuration.clone(), i as f64 * self.sampling_interval)
            })
            .collect();

        if points.len() < 2 {
            return points;
        }

        // Walk adjacent pairs, delaying the next stamp when the tool tip
        // would otherwise exceed the target Cartesian speed
        let mut current = kinematics.forward_kinematics(&path[0]).translation.vector;
        for i in 0..points.len() - 1 {
            let next = kinematics
                .forward_kinematics(&path[i + 1])
                .translation
                .vector;
            let euclidean_distance = (next - current).norm();
            let new_timestamp =
                points[i].time_from_start + euclidean_distance / self.target_speed;
            if new_timestamp > points[i + 1].time_from_start {
                points[i + 1].time_from_start = new_timestamp;
            }
            current = next;
        }

        update_profiles(&mut points);
        points
    }

    fn name(&self) -> &str {
        "CartesianSpeedTiming"
    }

    fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), String> {
        if let Some(&target_speed) = params.get("target_cartesian_speed") {
            if target_speed <= 0.0 {
                return Err("Target Cartesian speed must be positive".to_string());
            }
            self.target_speed = target_speed;
        }

        if let Some(&sampling_interval) = params.get("sampling_interval") {
            if sampling_interval <= 0.0 {
                return Err("Sampling interval must be positive".to_string());
            }
            self.sampling_interval = sampling_interval;
        }

        Ok(())
    }
}

/// Central differences over a possibly non-uniform grid
///
/// Boundaries use the one-sided degenerate substitution (`dt1 = dt2`,
/// `q1 = q3`); a zero-length adjacent interval forces velocity and
/// acceleration to zero for that sample.
fn update_profiles(points: &mut [TimedJointState]) {
    let n = points.len();
    if n < 2 {
        return;
    }

    let n_joints = points[0].positions.len();
    for i in 0..n {
        let (dt1, dt2) = if i == 0 {
            let dt = points[1].time_from_start - points[0].time_from_start;
            (dt, dt)
        } else if i < n - 1 {
            (
                points[i].time_from_start - points[i - 1].time_from_start,
                points[i + 1].time_from_start - points[i].time_from_start,
            )
        } else {
            let dt = points[i].time_from_start - points[i - 1].time_from_start;
            (dt, dt)
        };

        for j in 0..n_joints {
            let (q1, q2, q3) = if i == 0 {
                let q1 = points[1].positions[j];
                (q1, points[0].positions[j], q1)
            } else if i < n - 1 {
                (
                    points[i - 1].positions[j],
                    points[i].positions[j],
                    points[i + 1].positions[j],
                )
            } else {
                let q1 = points[i - 1].positions[j];
                (q1, points[i].positions[j], q1)
            };

            let (v, a) = if dt1 == 0.0 || dt2 == 0.0 {
                (0.0, 0.0)
            } else {
                let v1 = (q2 - q1) / dt1;
                let v2 = (q3 - q2) / dt2;
                ((v1 + v2) / 2.0, 2.0 * (v2 - v1) / (dt1 + dt2))
            };

            points[i].velocities[j] = v;
            points[i].accelerations[j] = a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::planar::PlanarArmKinematics;

    fn arm() -> PlanarArmKinematics {
        PlanarArmKinematics::new(vec![1.0, 1.0])
    }

    fn configured(target_speed: f64, dt: f64) -> CartesianSpeedTiming {
        let mut strategy = CartesianSpeedTiming::new();
        let mut params = HashMap::new();
        params.insert("target_cartesian_speed".to_string(), target_speed);
        params.insert("sampling_interval".to_string(), dt);
        strategy.configure(&params).unwrap();
        strategy
    }

    fn sweep_path(n: usize) -> Vec<JointConfiguration> {
        // rotate the shoulder in small steps, elbow straight
        (0..n).map(|i| vec![0.1 * i as f64, 0.0]).collect()
    }

    #[test]
    fn slow_target_speed_delays_the_stamps() {
        let kinematics = arm();
        // tool moves ~0.2 m per step; 0.01 m/s target wants ~20 s per step
        let strategy = configured(0.01, 0.4);
        let points = strategy.parameterize(&sweep_path(4), &kinematics);

        for i in 0..points.len() - 1 {
            let dt = points[i + 1].time_from_start - points[i].time_from_start;
            assert!(dt > 0.4);
        }
    }

    #[test]
    fn retiming_never_advances_a_stamp() {
        let kinematics = arm();
        // generous target speed: fixed-interval default should win everywhere
        let strategy = configured(100.0, 0.4);
        let points = strategy.parameterize(&sweep_path(5), &kinematics);

        for (i, point) in points.iter().enumerate() {
            assert!(point.time_from_start >= i as f64 * 0.4 - 1e-12);
        }
    }

    #[test]
    fn stamps_are_strictly_increasing() {
        let kinematics = arm();
        let strategy = configured(0.05, 0.4);
        let points = strategy.parameterize(&sweep_path(6), &kinematics);

        for i in 0..points.len() - 1 {
            assert!(points[i + 1].time_from_start > points[i].time_from_start);
        }
    }

    #[test]
    fn interior_profiles_follow_the_non_uniform_differences() {
        let kinematics = arm();
        let strategy = configured(0.05, 0.4);
        let points = strategy.parameterize(&sweep_path(5), &kinematics);

        for i in 1..points.len() - 1 {
            let dt1 = points[i].time_from_start - points[i - 1].time_from_start;
            let dt2 = points[i + 1].time_from_start - points[i].time_from_start;
            let v1 = (points[i].positions[0] - points[i - 1].positions[0]) / dt1;
            let v2 = (points[i + 1].positions[0] - points[i].positions[0]) / dt2;
            assert!((points[i].velocities[0] - (v1 + v2) / 2.0).abs() < 1e-9);
            assert!(
                (points[i].accelerations[0] - 2.0 * (v2 - v1) / (dt1 + dt2)).abs() < 1e-9
            );
        }
    }

    #[test]
    fn zero_length_interval_forces_profiles_to_zero() {
        // hand-built grid with a repeated stamp around the middle sample
        let mut points = vec![
            TimedJointState::at_rest(vec![0.0], 0.0),
            TimedJointState::at_rest(vec![1.0], 0.5),
            TimedJointState::at_rest(vec![2.0], 0.5),
            TimedJointState::at_rest(vec![3.0], 1.0),
        ];
        update_profiles(&mut points);

        assert_eq!(points[1].velocities[0], 0.0);
        assert_eq!(points[1].accelerations[0], 0.0);
        assert_eq!(points[2].velocities[0], 0.0);
        assert_eq!(points[2].accelerations[0], 0.0);
    }

    #[test]
    fn single_sample_path_is_left_at_rest() {
        let kinematics = arm();
        let strategy = configured(0.05, 0.4);
        let points = strategy.parameterize(&sweep_path(1), &kinematics);
        assert_eq!(points.len(), 1);
        assert_eq!(points[0].velocities, vec![0.0, 0.0]);
    }

    #[test]
    fn stationary_tool_keeps_the_default_interval() {
        let kinematics = arm();
        let strategy = configured(0.01, 0.4);
        // identical configurations: zero Cartesian distance between samples
        let path = vec![vec![0.2, 0.1]; 3];
        let points = strategy.parameterize(&path, &kinematics);

        for (i, point) in points.iter().enumerate() {
            assert!((point.time_from_start - i as f64 * 0.4).abs() < 1e-12);
        }
        // no motion, so the profiles stay flat
        for point in &points {
            assert!(point.velocities.iter().all(|&v| v.abs() < 1e-12));
        }
    }
}
