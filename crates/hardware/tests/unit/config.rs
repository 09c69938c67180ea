//! Configuration defaults and JSON overrides.

use pretty_assertions::assert_eq;

use pipesim_core::Config;

#[test]
fn test_defaults() {
    let config = Config::default();
    assert_eq!(config.general.speed, 0);
    assert_eq!(config.general.max_cycles, None);
    assert!(config.pipeline.pipelined);
    assert!(config.pipeline.rename_registers);
    assert!(config.pipeline.forward_results);
    assert_eq!(config.memory.latency_cycles, 100);
}

#[test]
fn test_json_partial_override() {
    let config: Config = serde_json::from_str(
        r#"{
            "general": { "speed": 2 },
            "pipeline": { "rename_registers": false },
            "memory": { "latency_cycles": 10 }
        }"#,
    )
    .expect("valid config");
    assert_eq!(config.general.speed, 2);
    assert!(!config.pipeline.rename_registers);
    assert!(config.pipeline.forward_results);
    assert_eq!(config.memory.latency_cycles, 10);
}

#[test]
fn test_json_empty_object_is_default() {
    let config: Config = serde_json::from_str("{}").expect("valid config");
    assert!(config.pipeline.pipelined);
    assert_eq!(config.memory.latency_cycles, 100);
}
