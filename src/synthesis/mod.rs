//! Trajectory synthesis pipeline for the Talos arm
//!
//! Converts an ordered sequence of Cartesian tool poses into a
//! time-parameterized joint trajectory: waypoint expansion, seed anchoring
//! of the endpoints, path search over the configuration graph, time
//! parameterization, and trajectory emission. Each request owns its data;
//! the stages run strictly in order and the whole request aborts on the
//! first fatal error.

pub mod anchoring;
pub mod emitter;
pub mod search;
pub mod stream;
pub mod timing;
pub mod waypoint;

use self::anchoring::{anchor_endpoints, PathEnd};
use self::emitter::{emit_trajectory, Trajectory};
use self::search::{search_path, PathSearchBackend};
use self::timing::{DefaultTiming, TimingStrategy};
use self::waypoint::{expand_waypoints, FreeAxis};
use crate::common::types::{JointConfiguration, Pose};
use crate::kinematics::RobotKinematics;
use crate::lifecycle::{LifecycleNode, LifecycleNodeBase, State};
use log::{info, warn};
use std::any::Any;
use std::collections::HashMap;
use std::f64::consts::FRAC_PI_4;
use std::sync::Arc;
use thiserror::Error;

/// Errors produced by the synthesis pipeline
#[derive(Debug, Error, PartialEq)]
pub enum SynthesisError {
    /// Zero input poses; callers treat this as a no-op plan, not a failure
    #[error("no input poses to synthesize")]
    EmptyInput,

    /// No feasible joint configuration near the seed at one end of the path
    #[error("no joint configuration near the seed at the {end} of the trajectory")]
    AnchoringFailed { end: PathEnd },

    /// The search backend reported that no path exists
    #[error("search backend could not solve for a valid path")]
    SearchFailed,

    /// The search backend reported success but returned a malformed path
    #[error("search backend reported success but returned {actual} configurations for {expected} trajectory points")]
    SearchIntegrityViolation { expected: usize, actual: usize },

    /// The search backend did not answer in time
    #[error("search backend did not answer within {secs} s")]
    SearchTimedOut { secs: f64 },
}

/// Configuration for the synthesis stack
#[derive(Debug, Clone)]
pub struct SynthesisConfig {
    /// Angular step for sampling rotation about the free tool axis
    pub orientation_increment: f64,
    /// Tool-frame axis left free to rotate
    pub free_axis: FreeAxis,
    /// Reference frame of the incoming Cartesian waypoints
    pub frame_id: String,
    /// Joint names in configuration order
    pub joint_names: Vec<String>,
}

impl Default for SynthesisConfig {
    fn default() -> Self {
        SynthesisConfig {
            orientation_increment: FRAC_PI_4,
            free_axis: FreeAxis::Z,
            frame_id: "world".to_string(),
            joint_names: (1..=6).map(|i| format!("joint_a{}", i)).collect(),
        }
    }
}

/// Trajectory synthesis stack for the arm
pub struct SynthesisStack {
    base: LifecycleNodeBase,
    config: SynthesisConfig,
    kinematics: Arc<dyn RobotKinematics>,
    backend: Box<dyn PathSearchBackend>,
    timing: Box<dyn TimingStrategy>,
}

impl SynthesisStack {
    /// Create a new synthesis stack over the given collaborators
    pub fn new(
        kinematics: Arc<dyn RobotKinematics>,
        backend: Box<dyn PathSearchBackend>,
    ) -> Self {
        SynthesisStack {
            base: LifecycleNodeBase::new("synthesis_stack"),
            config: SynthesisConfig::default(),
            kinematics,
            backend,
            timing: Box::new(DefaultTiming::new()),
        }
    }

    /// Replace the synthesis configuration
    pub fn set_config(&mut self, config: SynthesisConfig) {
        self.config = config;
    }

    /// Current synthesis configuration
    pub fn config(&self) -> &SynthesisConfig {
        &self.config
    }

    /// Replace the timing strategy
    pub fn set_timing_strategy<T: TimingStrategy + 'static>(&mut self, timing: T) {
        self.timing = Box::new(timing);
    }

    /// Configure the timing strategy with parameters
    pub fn configure_timing(&mut self, params: &HashMap<String, f64>) -> Result<(), String> {
        self.timing.configure(params)
    }

    /// Get the name of the current timing strategy
    pub fn timing_strategy_name(&self) -> &str {
        self.timing.name()
    }

    /// Run the full pipeline on a Cartesian path
    ///
    /// The seed configuration biases the endpoint anchoring; callers
    /// typically pass the arm's current configuration. Zero poses yield
    /// `EmptyInput`, which callers should treat as a no-op plan.
    pub fn synthesize(
        &mut self,
        poses: &[Pose],
        seed: &JointConfiguration,
    ) -> Result<Trajectory, SynthesisError> {
        if poses.is_empty() {
            warn!("synthesize called with no poses; nothing to plan");
            return Err(SynthesisError::EmptyInput);
        }

        let descriptors = expand_waypoints(
            poses,
            self.config.orientation_increment,
            self.config.free_axis,
        );
        info!("Expanded {} waypoints into trajectory points", descriptors.len());

        let anchored = anchor_endpoints(&descriptors, seed, self.kinematics.as_ref())?;

        let path = search_path(self.backend.as_mut(), &anchored)?;

        let points = self.timing.parameterize(&path, self.kinematics.as_ref());
        if let Some(first) = points.first() {
            if first.positions.len() != self.config.joint_names.len() {
                warn!(
                    "path has {} joints but {} joint names are configured",
                    first.positions.len(),
                    self.config.joint_names.len()
                );
            }
        }

        let trajectory = emit_trajectory(&self.config.joint_names, &self.config.frame_id, points);
        info!(
            "Synthesized trajectory with {} points over {:.3} s",
            trajectory.len(),
            trajectory.duration()
        );
        Ok(trajectory)
    }
}

impl LifecycleNode for SynthesisStack {
    fn on_configure(&mut self) -> Result<(), String> {
        info!("Configuring synthesis stack");
        self.base.set_state(State::Inactive);
        Ok(())
    }

    fn on_activate(&mut self) -> Result<(), String> {
        info!("Activating synthesis stack");
        self.base.set_state(State::Active);
        Ok(())
    }

    fn on_deactivate(&mut self) -> Result<(), String> {
        info!("Deactivating synthesis stack");
        self.base.set_state(State::Inactive);
        Ok(())
    }

    fn on_cleanup(&mut self) -> Result<(), String> {
        info!("Cleaning up synthesis stack");
        self.base.set_state(State::Unconfigured);
        Ok(())
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
