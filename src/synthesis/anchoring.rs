//! Seed anchoring of the path endpoints
//!
//! An axially-free point at either end of the path admits a continuum of
//! realizing configurations, which multiplies the search backend's
//! start/end combinations. Pinning both ends to single joint
//! configurations near the seed collapses that combinatorics to one start
//! and one end.

use super::waypoint::TrajectoryPointDescriptor;
use super::SynthesisError;
use crate::common::types::JointConfiguration;
use crate::kinematics::RobotKinematics;
use log::info;
use std::fmt;

/// Which end of the path an anchoring query was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PathEnd {
    Start,
    End,
}

impl fmt::Display for PathEnd {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PathEnd::Start => write!(f, "start"),
            PathEnd::End => write!(f, "end"),
        }
    }
}

/// Replace the first and last descriptors with fixed joint points near `seed`
///
/// Returns a new descriptor sequence; the input is left untouched. A
/// single-point sequence is anchored once. Failure to find a realization
/// at either end is fatal for the whole request.
pub fn anchor_endpoints(
    descriptors: &[TrajectoryPointDescriptor],
    seed: &JointConfiguration,
    kinematics: &dyn RobotKinematics,
) -> Result<Vec<TrajectoryPointDescriptor>, SynthesisError> {
    if descriptors.is_empty() {
        return Ok(Vec::new());
    }

    let start_joints = kinematics
        .closest_joint_configuration(&descriptors[0], seed)
        .ok_or(SynthesisError::AnchoringFailed {
            end: PathEnd::Start,
        })?;

    let mut anchored = descriptors.to_vec();
    let last = anchored.len() - 1;
    anchored[0] = TrajectoryPointDescriptor::FixedJoint {
        joints: start_joints,
    };

    if last > 0 {
        let end_joints = kinematics
            .closest_joint_configuration(&descriptors[last], seed)
            .ok_or(SynthesisError::AnchoringFailed { end: PathEnd::End })?;
        anchored[last] = TrajectoryPointDescriptor::FixedJoint { joints: end_joints };
    }

    info!("Set trajectory start and end to fixed joint points");
    Ok(anchored)
}
