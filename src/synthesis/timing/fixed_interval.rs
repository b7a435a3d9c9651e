//! Fixed-interval time parameterization

use super::{TimedJointState, TimingStrategy};
use crate::common::types::JointConfiguration;
use crate::kinematics::RobotKinematics;
use std::collections::HashMap;

/// Time parameterization at a constant sampling interval
///
/// Stamps sample `i` at exactly `i * sampling_interval` and fills in
/// velocities by first-order central finite differences, clamped to zero
/// at both boundaries. Fewer than three samples leaves all velocities at
/// zero. The acceleration pass is off by default.
#[derive(Debug)]
pub struct FixedIntervalTiming {
    sampling_interval: f64,
    compute_accelerations: bool,
}

impl TimingStrategy for FixedIntervalTiming {
    fn new() -> Self {
        FixedIntervalTiming {
            sampling_interval: 0.4,
            compute_accelerations: false,
        }
    }

    fn parameterize(
        &self,
        path: &[JointConfiguration],
        _kinematics: &dyn RobotKinematics,
    ) -> Vec<TimedJointState> {
        let mut points: Vec<TimedJointState> = path
            .iter()
            .enumerate()
            .map(|(i, configuration)| {
                TimedJointState::at_rest(configuration.clone(), i as f64 * self.sampling_interval)
            })
            .collect();

        add_velocities(&mut points);
        if self.compute_accelerations {
            add_accelerations(&mut points);
        }

        points
    }

    fn name(&self) -> &str {
        "FixedIntervalTiming"
    }

    fn configure(&mut self, params: &HashMap<String, f64>) -> Result<(), String> {
        if let Some(&sampling_interval) = params.get("sampling_interval") {
            if sampling_interval <= 0.0 {
                return Err("Sampling interval must be positive".to_string());
            }
            self.sampling_interval = sampling_interval;
        }

        if let Some(&compute_accelerations) = params.get("compute_accelerations") {
            self.compute_accelerations = compute_accelerations != 0.0;
        }

        Ok(())
    }
}

/// Central finite difference over positions, boundary velocities clamped to zero
fn add_velocities(points: &mut [TimedJointState]) {
    if points.len() < 3 {
        return;
    }

    let n_joints = points[0].positions.len();
    let last = points.len() - 1;

    for i in 0..n_joints {
        points[0].velocities[i] = 0.0;
        points[last].velocities[i] = 0.0;
        for j in 1..last {
            // first-order central difference over the two neighbouring samples
            let delta_theta = points[j + 1].positions[i] - points[j - 1].positions[i];
            let delta_time = points[j + 1].time_from_start - points[j - 1].time_from_start;
            let v = delta_theta / delta_time;
            points[j].velocities[i] = v;
        }
    }
}

/// Central finite difference over velocities, same boundary clamp
fn add_accelerations(points: &mut [TimedJointState]) {
    if points.len() < 3 {
        return;
    }

    let n_joints = points[0].positions.len();
    let last = points.len() - 1;

    for i in 0..n_joints {
        points[0].accelerations[i] = 0.0;
        points[last].accelerations[i] = 0.0;
        for j in 1..last {
            let delta_velocity = points[j + 1].velocities[i] - points[j - 1].velocities[i];
            let delta_time = points[j + 1].time_from_start - points[j - 1].time_from_start;
            let a = delta_velocity / delta_time;
            points[j].accelerations[i] = a;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::kinematics::planar::PlanarArmKinematics;

    fn strategy_with_interval(dt: f64) -> FixedIntervalTiming {
        let mut strategy = FixedIntervalTiming::new();
        let mut params = HashMap::new();
        params.insert("sampling_interval".to_string(), dt);
        strategy.configure(&params).unwrap();
        strategy
    }

    fn single_joint_path(positions: &[f64]) -> Vec<JointConfiguration> {
        positions.iter().map(|&q| vec![q]).collect()
    }

    fn dummy_kinematics() -> PlanarArmKinematics {
        PlanarArmKinematics::new(vec![1.0])
    }

    #[test]
    fn timestamps_are_exact_multiples_of_the_interval() {
        let strategy = strategy_with_interval(0.25);
        let points =
            strategy.parameterize(&single_joint_path(&[0.0, 1.0, 2.0, 3.0]), &dummy_kinematics());
        for (i, point) in points.iter().enumerate() {
            assert_eq!(point.time_from_start, i as f64 * 0.25);
        }
    }

    #[test]
    fn five_sample_scenario_matches_central_difference() {
        // positions [0,1,2,3,2] at dt = 0.1: v[2] = (3-1)/(0.3-0.1) = 10.0
        let strategy = strategy_with_interval(0.1);
        let points =
            strategy.parameterize(&single_joint_path(&[0.0, 1.0, 2.0, 3.0, 2.0]), &dummy_kinematics());

        assert_eq!(points.len(), 5);
        assert_eq!(points[0].velocities[0], 0.0);
        assert_eq!(points[4].velocities[0], 0.0);
        assert!((points[2].velocities[0] - 10.0).abs() < 1e-9);
    }

    #[test]
    fn interior_velocities_satisfy_the_central_difference_identity() {
        let strategy = strategy_with_interval(0.4);
        let path = single_joint_path(&[0.0, 0.3, -0.1, 0.7, 0.2, 0.9]);
        let points = strategy.parameterize(&path, &dummy_kinematics());

        for j in 1..points.len() - 1 {
            let expected = (points[j + 1].positions[0] - points[j - 1].positions[0])
                / (points[j + 1].time_from_start - points[j - 1].time_from_start);
            assert!((points[j].velocities[0] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn fewer_than_three_samples_stay_at_rest() {
        let strategy = strategy_with_interval(0.1);
        let points = strategy.parameterize(&single_joint_path(&[0.0, 1.0]), &dummy_kinematics());
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].velocities[0], 0.0);
        assert_eq!(points[1].velocities[0], 0.0);
    }

    #[test]
    fn accelerations_are_zero_unless_enabled() {
        let strategy = strategy_with_interval(0.1);
        let points =
            strategy.parameterize(&single_joint_path(&[0.0, 1.0, 4.0, 9.0]), &dummy_kinematics());
        for point in &points {
            assert_eq!(point.accelerations[0], 0.0);
        }
    }

    #[test]
    fn acceleration_pass_uses_central_differences_over_velocities() {
        let mut strategy = strategy_with_interval(0.1);
        let mut params = HashMap::new();
        params.insert("compute_accelerations".to_string(), 1.0);
        strategy.configure(&params).unwrap();

        let points =
            strategy.parameterize(&single_joint_path(&[0.0, 1.0, 4.0, 9.0, 16.0]), &dummy_kinematics());

        assert_eq!(points[0].accelerations[0], 0.0);
        assert_eq!(points[4].accelerations[0], 0.0);
        for j in 1..4 {
            let expected = (points[j + 1].velocities[0] - points[j - 1].velocities[0])
                / (points[j + 1].time_from_start - points[j - 1].time_from_start);
            assert!((points[j].accelerations[0] - expected).abs() < 1e-12);
        }
    }

    #[test]
    fn non_positive_interval_is_rejected() {
        let mut strategy = FixedIntervalTiming::new();
        let mut params = HashMap::new();
        params.insert("sampling_interval".to_string(), 0.0);
        assert!(strategy.configure(&params).is_err());
    }
}
