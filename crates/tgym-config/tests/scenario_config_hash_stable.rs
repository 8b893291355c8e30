//! Scenario: config hash stability.
//!
//! GREEN when:
//! - the same input twice yields the same hash
//! - reordering keys within YAML does not change the hash
//! - different values produce different hashes
//! - overlays override the base and change the hash

use tgym_config::load_layered_yaml_from_strings;

const BASE_YAML: &str = r#"
fees:
  ask_percent: 0.0003
  bid_percent: 0.0003
session:
  reward: LogReturns
  start_tick: 10
data:
  ask_column: ask
  bid_column: bid
"#;

const BASE_YAML_REORDERED: &str = r#"
data:
  bid_column: bid
  ask_column: ask
session:
  start_tick: 10
  reward: LogReturns
fees:
  bid_percent: 0.0003
  ask_percent: 0.0003
"#;

const OVERLAY_YAML: &str = r#"
fees:
  ask_percent: 0.001
session:
  reward: SQN
"#;

#[test]
fn same_input_produces_identical_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
    assert_eq!(a.canonical_json, b.canonical_json);
    assert_eq!(a.config_hash.len(), 64);
}

#[test]
fn key_order_does_not_change_hash() {
    let a = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let b = load_layered_yaml_from_strings(&[BASE_YAML_REORDERED]).unwrap();
    assert_eq!(a.config_hash, b.config_hash);
}

#[test]
fn overlay_overrides_and_rehashes() {
    let base = load_layered_yaml_from_strings(&[BASE_YAML]).unwrap();
    let layered = load_layered_yaml_from_strings(&[BASE_YAML, OVERLAY_YAML]).unwrap();
    assert_ne!(base.config_hash, layered.config_hash);

    let cfg = layered.session().unwrap();
    assert_eq!(cfg.fees.ask_percent, 0.001);
    assert_eq!(cfg.fees.bid_percent, 0.0003);
    assert_eq!(cfg.session.reward, "SQN");
    assert_eq!(cfg.session.start_tick, 10);
    assert!(cfg.data.has_pair());
}
