//! Kinematics collaborator seam
//!
//! The synthesis pipeline treats the robot model as an opaque capability
//! behind this trait, so the core can be exercised with deterministic
//! models instead of a live physical-model dependency.

use crate::common::types::{JointConfiguration, Pose};
use crate::synthesis::waypoint::TrajectoryPointDescriptor;

pub mod planar;

/// Trait for robot kinematic models
pub trait RobotKinematics: Send + Sync {
    /// Number of actuated joints in the chain
    fn degrees_of_freedom(&self) -> usize;

    /// Tool-tip pose realized by a joint configuration
    fn forward_kinematics(&self, joints: &JointConfiguration) -> Pose;

    /// A joint configuration realizing `pose`, searched from `seed`
    fn inverse_kinematics(&self, pose: &Pose, seed: &JointConfiguration)
        -> Option<JointConfiguration>;

    /// The joint configuration realizing `descriptor` that is nearest to `seed`
    ///
    /// Returns `None` when no realization of the trajectory point is
    /// reachable from the seed.
    fn closest_joint_configuration(
        &self,
        descriptor: &TrajectoryPointDescriptor,
        seed: &JointConfiguration,
    ) -> Option<JointConfiguration>;
}
