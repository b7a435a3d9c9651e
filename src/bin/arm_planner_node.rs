use anyhow::Result;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use talos_arm_core::common::types::{JointConfiguration, Pose};
use talos_arm_core::kinematics::planar::PlanarArmKinematics;
use talos_arm_core::synthesis::emitter::{ExecutionSink, Trajectory};
use talos_arm_core::synthesis::search::NearestCandidateSearch;
use talos_arm_core::synthesis::stream::unroll_trajectory;
use talos_arm_core::synthesis::{SynthesisConfig, SynthesisError, SynthesisStack};
use tokio::sync::mpsc;
use tokio::time::timeout;

/// One incoming planning request
struct PlanRequest {
    poses: Vec<Pose>,
    seed: JointConfiguration,
}

/// Execution sink that reports trajectories instead of driving hardware
struct LoggingSink;

impl ExecutionSink for LoggingSink {
    fn execute(&mut self, trajectory: &Trajectory) -> Result<(), String> {
        println!(
            "Executing trajectory: {} points over {:.2} s in frame {}",
            trajectory.len(),
            trajectory.duration(),
            trajectory.frame_id
        );
        Ok(())
    }
}

const SEARCH_TIMEOUT_SECS: f64 = 5.0;

fn arc_request(offset: f64) -> PlanRequest {
    let poses = (0..6)
        .map(|i| {
            let angle = offset + 0.1 * i as f64;
            Pose::translation(1.3 * angle.cos(), 1.3 * angle.sin(), 0.0)
        })
        .collect();
    PlanRequest {
        poses,
        seed: vec![0.2, 0.3, -0.1],
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    println!("Starting arm planner node");

    let kinematics = Arc::new(PlanarArmKinematics::new(vec![0.8, 0.6, 0.4]));
    let backend = Box::new(NearestCandidateSearch::new(kinematics.clone()));
    let mut stack = SynthesisStack::new(kinematics, backend);
    stack.set_config(SynthesisConfig {
        joint_names: vec![
            "joint_a1".to_string(),
            "joint_a2".to_string(),
            "joint_a3".to_string(),
        ],
        ..SynthesisConfig::default()
    });

    let mut params = HashMap::new();
    params.insert("sampling_interval".to_string(), 0.4);
    if let Err(e) = stack.configure_timing(&params) {
        eprintln!("Failed to configure timing strategy: {}", e);
    }

    let stack = Arc::new(Mutex::new(stack));
    let (request_tx, mut request_rx) = mpsc::channel::<PlanRequest>(16);

    // Stand-in for the command interface: feed a couple of requests, then close
    tokio::spawn(async move {
        for k in 0..2 {
            if request_tx.send(arc_request(0.3 * k as f64)).await.is_err() {
                break;
            }
        }
    });

    let mut sink = LoggingSink;
    let mut next_seq: u64 = 0;

    while let Some(request) = request_rx.recv().await {
        let stack_for_request = Arc::clone(&stack);
        let handle = tokio::task::spawn_blocking(move || {
            let mut stack = stack_for_request.lock().unwrap();
            stack.synthesize(&request.poses, &request.seed)
        });

        let result = match timeout(Duration::from_secs_f64(SEARCH_TIMEOUT_SECS), handle).await {
            Ok(joined) => joined?,
            Err(_) => Err(SynthesisError::SearchTimedOut {
                secs: SEARCH_TIMEOUT_SECS,
            }),
        };

        match result {
            Ok(trajectory) => {
                let (requests, seq) = unroll_trajectory(&trajectory, next_seq);
                next_seq = seq;
                println!(
                    "Queued {} joint requests (sequence now {})",
                    requests.len(),
                    next_seq
                );
                if let Err(e) = sink.execute(&trajectory) {
                    eprintln!("Trajectory execution failed: {}", e);
                }
            }
            Err(SynthesisError::EmptyInput) => {
                println!("Empty plan request; nothing to do");
            }
            Err(e) => eprintln!("Planning failed: {}", e),
        }
    }

    println!("Request channel closed; shutting down");
    Ok(())
}
