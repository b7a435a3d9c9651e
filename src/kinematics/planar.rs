//! Analytic planar-arm kinematic model
//!
//! An N-link revolute chain moving in the world XY plane. Forward
//! kinematics accumulates link angles along the chain; inverse queries run
//! cyclic coordinate descent from the caller's seed configuration.

use super::RobotKinematics;
use crate::common::joint_distance;
use crate::common::types::{JointConfiguration, Pose};
use crate::synthesis::waypoint::TrajectoryPointDescriptor;
use nalgebra::{Translation3, UnitQuaternion, Vector2, Vector3};

/// A planar revolute arm with one rotary joint per link
#[derive(Debug, Clone)]
pub struct PlanarArmKinematics {
    link_lengths: Vec<f64>,
    ik_iterations: usize,
    position_tolerance: f64,
}

impl PlanarArmKinematics {
    /// Create a new model from the link lengths, base to tool
    pub fn new(link_lengths: Vec<f64>) -> Self {
        PlanarArmKinematics {
            link_lengths,
            ik_iterations: 60,
            position_tolerance: 1e-4,
        }
    }

    /// World positions of every joint pivot, ending with the tool tip
    fn chain_positions(&self, joints: &JointConfiguration) -> Vec<Vector2<f64>> {
        let mut positions = Vec::with_capacity(self.link_lengths.len() + 1);
        let mut position = Vector2::zeros();
        let mut heading = 0.0;
        positions.push(position);
        for (length, angle) in self.link_lengths.iter().zip(joints.iter()) {
            heading += angle;
            position += Vector2::new(heading.cos(), heading.sin()) * *length;
            positions.push(position);
        }
        positions
    }

    /// Cyclic coordinate descent toward a target tool position
    fn solve_position(
        &self,
        target: Vector2<f64>,
        seed: &JointConfiguration,
    ) -> Option<JointConfiguration> {
        let mut joints = seed.clone();
        for _ in 0..self.ik_iterations {
            for j in (0..joints.len()).rev() {
                let positions = self.chain_positions(&joints);
                let pivot = positions[j];
                let tip = positions[positions.len() - 1];
                let to_tip = tip - pivot;
                let to_target = target - pivot;
                if to_tip.norm() < f64::EPSILON || to_target.norm() < f64::EPSILON {
                    continue;
                }
                let cross = to_tip.x * to_target.y - to_tip.y * to_target.x;
                let dot = to_tip.dot(&to_target);
                joints[j] += cross.atan2(dot);
            }
            let positions = self.chain_positions(&joints);
            let tip = positions[positions.len() - 1];
            if (tip - target).norm() < self.position_tolerance {
                return Some(joints);
            }
        }
        None
    }
}

impl RobotKinematics for PlanarArmKinematics {
    fn degrees_of_freedom(&self) -> usize {
        self.link_lengths.len()
    }

    fn forward_kinematics(&self, joints: &JointConfiguration) -> Pose {
        let positions = self.chain_positions(joints);
        let tip = positions[positions.len() - 1];
        let heading: f64 = joints.iter().take(self.link_lengths.len()).sum();
        Pose::from_parts(
            Translation3::new(tip.x, tip.y, 0.0),
            UnitQuaternion::from_axis_angle(&Vector3::z_axis(), heading),
        )
    }

    fn inverse_kinematics(
        &self,
        pose: &Pose,
        seed: &JointConfiguration,
    ) -> Option<JointConfiguration> {
        if seed.len() != self.degrees_of_freedom() {
            return None;
        }
        let target = Vector2::new(pose.translation.vector.x, pose.translation.vector.y);
        self.solve_position(target, seed)
    }

    fn closest_joint_configuration(
        &self,
        descriptor: &TrajectoryPointDescriptor,
        seed: &JointConfiguration,
    ) -> Option<JointConfiguration> {
        match descriptor {
            TrajectoryPointDescriptor::FixedJoint { joints } => {
                if joints.len() == self.degrees_of_freedom() {
                    Some(joints.clone())
                } else {
                    None
                }
            }
            TrajectoryPointDescriptor::AxiallyFree { .. } => {
                let mut best: Option<JointConfiguration> = None;
                for candidate in descriptor.candidate_poses() {
                    if let Some(solution) = self.inverse_kinematics(&candidate, seed) {
                        let closer = best
                            .as_ref()
                            .map_or(true, |b| {
                                joint_distance(&solution, seed) < joint_distance(b, seed)
                            });
                        if closer {
                            best = Some(solution);
                        }
                    }
                }
                best
            }
        }
    }
}
