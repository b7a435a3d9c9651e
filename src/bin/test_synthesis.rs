use std::collections::HashMap;
use std::sync::Arc;
use talos_arm_core::common::types::Pose;
use talos_arm_core::kinematics::planar::PlanarArmKinematics;
use talos_arm_core::synthesis::search::NearestCandidateSearch;
use talos_arm_core::synthesis::stream::unroll_trajectory;
use talos_arm_core::synthesis::{SynthesisConfig, SynthesisStack};
use talos_arm_core::TalosCore;

fn main() {
    println!("Initializing Talos arm core...");

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

    // Configure the timing strategy
    let mut params = HashMap::new();
    params.insert("sampling_interval".to_string(), 0.4);

    if let Err(e) = stack.configure_timing(&params) {
        println!("Failed to configure timing strategy: {}", e);
    }

    let mut core = TalosCore::new();
    core.register(stack);

    match core.init() {
        Ok(_) => println!("Core initialized successfully!"),
        Err(e) => {
            println!("Failed to initialize core: {}", e);
            return;
        }
    }

    // A short sweep across the arm's workspace
    let poses: Vec<Pose> = (0..8)
        .map(|i| {
            let angle = 0.12 * i as f64;
            Pose::translation(1.4 * angle.cos(), 1.4 * angle.sin(), 0.0)
        })
        .collect();
    let seed = vec![0.2, 0.3, -0.1];

    if let Some(stack) = core.synthesis_stack_mut() {
        println!("Using timing strategy: {}", stack.timing_strategy_name());

        match stack.synthesize(&poses, &seed) {
            Ok(trajectory) => {
                println!(
                    "Synthesized trajectory with {} points over {:.2} s",
                    trajectory.len(),
                    trajectory.duration()
                );
                for point in &trajectory.points {
                    println!(
                        "  t={:.2} q={:?} v={:?}",
                        point.time_from_start, point.positions, point.velocities
                    );
                }

                let (requests, next_seq) = unroll_trajectory(&trajectory, 0);
                println!(
                    "Unrolled {} joint requests, next sequence {}",
                    requests.len(),
                    next_seq
                );
            }
            Err(e) => println!("Synthesis failed: {}", e),
        }
    }

    match core.shutdown() {
        Ok(_) => println!("Core shutdown successfully!"),
        Err(e) => println!("Failed to shutdown core: {}", e),
    }
}
