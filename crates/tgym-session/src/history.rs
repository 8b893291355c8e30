use tgym_metrics::MetricsSnapshot;

/// Column-wise record of every per-step snapshot in an episode.
///
/// Column order follows the first snapshot pushed.
#[derive(Clone, Debug, Default)]
pub struct EpisodeHistory {
    keys: Vec<&'static str>,
    columns: Vec<Vec<f64>>,
}

impl EpisodeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, snapshot: &MetricsSnapshot) {
        if self.keys.is_empty() {
            self.keys = snapshot.keys().collect();
            self.columns = vec![Vec::new(); self.keys.len()];
        }
        for (key, column) in self.keys.iter().zip(self.columns.iter_mut()) {
            column.push(snapshot.get(key).unwrap_or(f64::NAN));
        }
    }

    pub fn column(&self, name: &str) -> Option<&[f64]> {
        self.keys
            .iter()
            .position(|k| *k == name)
            .map(|i| self.columns[i].as_slice())
    }

    pub fn keys(&self) -> &[&'static str] {
        &self.keys
    }

    /// Number of steps recorded.
    pub fn len(&self) -> usize {
        self.columns.first().map_or(0, Vec::len)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&mut self) {
        self.keys.clear();
        self.columns.clear();
    }
}
