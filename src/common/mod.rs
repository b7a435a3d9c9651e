//! Common types and helpers for the Talos arm core

/// Shared aliases used across the codebase
pub mod types {
    /// A rigid transform (position + orientation) in the fixed world frame
    pub type Pose = nalgebra::Isometry3<f64>;

    /// Ordered joint values, one per named joint
    pub type JointConfiguration = Vec<f64>;
}

/// Euclidean distance between two joint configurations
///
/// Configurations of different lengths are compared over the shorter prefix.
pub fn joint_distance(a: &types::JointConfiguration, b: &types::JointConfiguration) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(x, y)| (x - y).powi(2))
        .sum::<f64>()
        .sqrt()
}
