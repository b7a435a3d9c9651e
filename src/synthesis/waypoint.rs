//! Waypoint expansion
//!
//! Turns an ordered list of Cartesian tool poses into trajectory points
//! that are free to rotate about one axis of the tool frame.

use crate::common::types::{JointConfiguration, Pose};
use nalgebra::{Unit, UnitQuaternion, Vector3};
use std::f64::consts::PI;

/// Tool-frame axis left free to rotate
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FreeAxis {
    X,
    Y,
    Z,
}

impl FreeAxis {
    fn unit(&self) -> Unit<Vector3<f64>> {
        match self {
            FreeAxis::X => Vector3::x_axis(),
            FreeAxis::Y => Vector3::y_axis(),
            FreeAxis::Z => Vector3::z_axis(),
        }
    }
}

/// A trajectory point, possibly admitting several realizing joint configurations
#[derive(Debug, Clone)]
pub enum TrajectoryPointDescriptor {
    /// Cartesian point with rotational freedom about one tool axis
    AxiallyFree {
        pose: Pose,
        orientation_increment: f64,
        free_axis: FreeAxis,
    },
    /// Point pinned to one exact joint configuration
    FixedJoint { joints: JointConfiguration },
}

impl TrajectoryPointDescriptor {
    /// Discretized candidate tool poses for this point
    ///
    /// Samples the free rotation in `orientation_increment` steps over a
    /// full turn. A fixed joint point has no Cartesian candidates.
    pub fn candidate_poses(&self) -> Vec<Pose> {
        match self {
            TrajectoryPointDescriptor::AxiallyFree {
                pose,
                orientation_increment,
                free_axis,
            } => {
                if *orientation_increment <= 0.0 {
                    return vec![*pose];
                }
                let mut candidates = Vec::new();
                let mut angle = 0.0;
                while angle < 2.0 * PI {
                    let spin = UnitQuaternion::from_axis_angle(&free_axis.unit(), angle);
                    candidates.push(pose * spin);
                    angle += orientation_increment;
                }
                candidates
            }
            TrajectoryPointDescriptor::FixedJoint { .. } => Vec::new(),
        }
    }

    /// The single exact realization, for joint-space points
    pub fn exact_joints(&self) -> Option<&JointConfiguration> {
        match self {
            TrajectoryPointDescriptor::AxiallyFree { .. } => None,
            TrajectoryPointDescriptor::FixedJoint { joints } => Some(joints),
        }
    }
}

/// Expand Cartesian waypoints into axially-free trajectory points
///
/// One descriptor per input pose, preserving order. The increment and axis
/// apply uniformly to the whole call. An empty input yields an empty output.
pub fn expand_waypoints(
    poses: &[Pose],
    orientation_increment: f64,
    free_axis: FreeAxis,
) -> Vec<TrajectoryPointDescriptor> {
    poses
        .iter()
        .map(|pose| TrajectoryPointDescriptor::AxiallyFree {
            pose: *pose,
            orientation_increment,
            free_axis,
        })
        .collect()
}
