use serde::ser::{Serialize, SerializeMap, Serializer};

use crate::{compute_reward, Metric, MetricsState, RewardKind};

/// Ordered name → value view of the state plus every reward.
///
/// Order: the 11 [`Metric`] entries, then each [`RewardKind`] whose name is
/// not already a state entry. `Profit` and `LogReturns` appear once, at
/// their state position (their reward values equal the state values).
#[derive(Clone, Debug, PartialEq)]
pub struct MetricsSnapshot {
    entries: Vec<(&'static str, f64)>,
}

impl MetricsSnapshot {
    pub fn from_state(state: &MetricsState) -> Self {
        let mut entries: Vec<(&'static str, f64)> = Metric::ALL
            .iter()
            .map(|m| (m.as_str(), state.value(*m)))
            .collect();

        for kind in RewardKind::ALL {
            let name = kind.as_str();
            let value = compute_reward(state, kind);
            match entries.iter_mut().find(|(k, _)| *k == name) {
                Some(slot) => slot.1 = value,
                None => entries.push((name, value)),
            }
        }

        Self { entries }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.entries
            .iter()
            .find(|(k, _)| *k == name)
            .map(|(_, v)| *v)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&'static str, f64)> + '_ {
        self.entries.iter().copied()
    }

    pub fn keys(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.entries.iter().map(|(k, _)| *k)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for MetricsSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (k, v) in &self.entries {
            map.serialize_entry(k, v)?;
        }
        map.end()
    }
}
