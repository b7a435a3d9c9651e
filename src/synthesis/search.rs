//! Path search over the configuration graph
//!
//! The search backend is an opaque best-effort solver behind the
//! `PathSearchBackend` trait; the adapter turns its two-call protocol
//! (solve, then retrieve) into a single checked result.

use super::waypoint::TrajectoryPointDescriptor;
use super::SynthesisError;
use crate::common::types::JointConfiguration;
use crate::kinematics::RobotKinematics;
use log::{error, info};
use std::sync::Arc;

/// Trait for path search backends
pub trait PathSearchBackend: Send + Sync {
    /// Run the search over the descriptor sequence; true if a path was found
    fn solve(&mut self, descriptors: &[TrajectoryPointDescriptor]) -> bool;

    /// Retrieve the path found by the last successful `solve`
    fn retrieve_path(&self) -> Vec<JointConfiguration>;

    /// Get the name of this backend
    fn name(&self) -> &str;
}

/// Submit the descriptor sequence and retrieve one configuration per point
///
/// A backend that reports failure yields `SearchFailed`. A backend that
/// reports success but hands back an empty or wrong-length path has broken
/// its contract, which is surfaced separately as `SearchIntegrityViolation`.
pub fn search_path(
    backend: &mut dyn PathSearchBackend,
    descriptors: &[TrajectoryPointDescriptor],
) -> Result<Vec<JointConfiguration>, SynthesisError> {
    if !backend.solve(descriptors) {
        error!("{}: could not solve for a valid path", backend.name());
        return Err(SynthesisError::SearchFailed);
    }

    let path = backend.retrieve_path();
    if path.is_empty() || path.len() != descriptors.len() {
        error!(
            "{}: reported success but returned {} configurations for {} trajectory points",
            backend.name(),
            path.len(),
            descriptors.len()
        );
        return Err(SynthesisError::SearchIntegrityViolation {
            expected: descriptors.len(),
            actual: path.len(),
        });
    }

    info!("Valid path found with {} points", path.len());
    Ok(path)
}

/// Greedy search backend bundled with the crate
///
/// Realizes each trajectory point with the configuration nearest the one
/// chosen for the previous point, seeding the very first query with the
/// zero configuration. Good enough for dense waypoint sequences where
/// adjacent tool poses are close together.
pub struct NearestCandidateSearch {
    kinematics: Arc<dyn RobotKinematics>,
    path: Vec<JointConfiguration>,
}

impl NearestCandidateSearch {
    /// Create a new backend over a kinematic model
    pub fn new(kinematics: Arc<dyn RobotKinematics>) -> Self {
        NearestCandidateSearch {
            kinematics,
            path: Vec::new(),
        }
    }
}

impl PathSearchBackend for NearestCandidateSearch {
    fn solve(&mut self, descriptors: &[TrajectoryPointDescriptor]) -> bool {
        self.path.clear();

        let mut previous: Option<JointConfiguration> = None;
        for descriptor in descriptors {
            let next = match descriptor.exact_joints() {
                Some(joints) => joints.clone(),
                None => {
                    let seed = previous
                        .clone()
                        .unwrap_or_else(|| vec![0.0; self.kinematics.degrees_of_freedom()]);
                    match self.kinematics.closest_joint_configuration(descriptor, &seed) {
                        Some(joints) => joints,
                        None => {
                            self.path.clear();
                            return false;
                        }
                    }
                }
            };
            previous = Some(next.clone());
            self.path.push(next);
        }

        true
    }

    fn retrieve_path(&self) -> Vec<JointConfiguration> {
        self.path.clone()
    }

    fn name(&self) -> &str {
        "NearestCandidateSearch"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::types::Pose;
    use crate::kinematics::planar::PlanarArmKinematics;
    use crate::synthesis::waypoint::{expand_waypoints, FreeAxis};

    /// Backend fake with a scripted solve result and retrieved path
    struct ScriptedBackend {
        solve_result: bool,
        path: Vec<JointConfiguration>,
    }

    impl PathSearchBackend for ScriptedBackend {
        fn solve(&mut self, _descriptors: &[TrajectoryPointDescriptor]) -> bool {
            self.solve_result
        }

        fn retrieve_path(&self) -> Vec<JointConfiguration> {
            self.path.clone()
        }

        fn name(&self) -> &str {
            "ScriptedBackend"
        }
    }

    fn three_descriptors() -> Vec<TrajectoryPointDescriptor> {
        let poses = vec![
            Pose::translation(1.4, 0.3, 0.0),
            Pose::translation(1.3, 0.6, 0.0),
            Pose::translation(1.1, 0.9, 0.0),
        ];
        expand_waypoints(&poses, 0.7, FreeAxis::Z)
    }

    #[test]
    fn backend_failure_is_search_failed() {
        let mut backend = ScriptedBackend {
            solve_result: false,
            path: Vec::new(),
        };
        let result = search_path(&mut backend, &three_descriptors());
        assert_eq!(result.unwrap_err(), SynthesisError::SearchFailed);
    }

    #[test]
    fn empty_path_after_success_is_an_integrity_violation() {
        let mut backend = ScriptedBackend {
            solve_result: true,
            path: Vec::new(),
        };
        let result = search_path(&mut backend, &three_descriptors());
        assert_eq!(
            result.unwrap_err(),
            SynthesisError::SearchIntegrityViolation {
                expected: 3,
                actual: 0
            }
        );
    }

    #[test]
    fn short_path_after_success_is_an_integrity_violation() {
        let mut backend = ScriptedBackend {
            solve_result: true,
            path: vec![vec![0.0, 0.0], vec![0.1, 0.1]],
        };
        let result = search_path(&mut backend, &three_descriptors());
        assert_eq!(
            result.unwrap_err(),
            SynthesisError::SearchIntegrityViolation {
                expected: 3,
                actual: 2
            }
        );
    }

    #[test]
    fn well_behaved_backend_yields_one_configuration_per_point() {
        let mut backend = ScriptedBackend {
            solve_result: true,
            path: vec![vec![0.0, 0.0], vec![0.1, 0.1], vec![0.2, 0.2]],
        };
        let path = search_path(&mut backend, &three_descriptors()).unwrap();
        assert_eq!(path.len(), 3);
    }

    #[test]
    fn nearest_candidate_search_realizes_every_point() {
        let kinematics = Arc::new(PlanarArmKinematics::new(vec![1.0, 1.0]));
        let mut backend = NearestCandidateSearch::new(kinematics);
        let descriptors = three_descriptors();

        assert!(backend.solve(&descriptors));
        let path = backend.retrieve_path();
        assert_eq!(path.len(), descriptors.len());
        for configuration in &path {
            assert_eq!(configuration.len(), 2);
        }
    }

    #[test]
    fn nearest_candidate_search_fails_on_unreachable_points() {
        let kinematics = Arc::new(PlanarArmKinematics::new(vec![1.0, 1.0]));
        let mut backend = NearestCandidateSearch::new(kinematics);
        // 5 m away from a 2 m arm
        let poses = vec![Pose::translation(5.0, 0.0, 0.0)];
        let descriptors = expand_waypoints(&poses, 0.7, FreeAxis::Z);

        assert!(!backend.solve(&descriptors));
        assert!(backend.retrieve_path().is_empty());
    }
}
