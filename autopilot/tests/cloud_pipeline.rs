use flappy_autopilot::cloud::parallel_cloud;
use flappy_autopilot::presets::create_preset;
use flappy_autopilot::runner::run_policy;
use flappy_sampler_core::constants::HEATMAP_BINS;
use flappy_sampler_core::{BirdState, PipeContext, WorldSnapshot};

fn approach_snapshot() -> WorldSnapshot {
    WorldSnapshot::new(
        BirdState::new(300.0, 0.0),
        vec![
            PipeContext {
                distance: 100.0,
                gap_top: 250.0,
                gap_bottom: 350.0,
            },
            PipeContext {
                distance: 320.0,
                gap_top: 180.0,
                gap_bottom: 300.0,
            },
        ],
    )
}

#[test]
fn cloud_json_matches_the_renderer_contract() {
    let config = create_preset("balanced").unwrap();
    let cloud = parallel_cloud(&approach_snapshot(), &config, 0xF00D).unwrap();

    assert_eq!(cloud.trajectories.len(), config.num_trajectories as usize);
    for trajectory in &cloud.trajectories {
        assert_eq!(trajectory.len(), config.horizon as usize);
        for point in &trajectory.points {
            assert!(point.probability > 0.0 && point.probability <= 1.0);
        }
    }
    assert_eq!(cloud.heatmap.len(), HEATMAP_BINS);

    let encoded = serde_json::to_value(&cloud).unwrap();
    assert!(encoded.get("trajectories").is_some());
    assert!(encoded.get("heatmap").is_some());
    let first_point = &encoded["trajectories"][0]["points"][0];
    assert!(first_point.get("state").is_some());
    assert!(first_point.get("action").is_some());
    assert!(first_point.get("probability").is_some());
}

#[test]
fn run_metrics_serialize_for_reports() {
    let metrics = run_policy("greedy", 0x77, 200).unwrap();
    let encoded = serde_json::to_value(&metrics).unwrap();
    assert_eq!(encoded["preset_id"], "greedy");
    assert_eq!(encoded["seed"], 0x77);
    assert!(encoded["frame_count"].as_u64().unwrap() >= 1);
}
