use serde::{Deserialize, Serialize};

/// A single map mutation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Op {
    Insert { key: i64, value: i64 },
    Remove { key: i64 },
}

impl Op {
    pub fn key(&self) -> i64 {
        match *self {
            Op::Insert { key, .. } | Op::Remove { key } => key,
        }
    }
}

/// A replayable sequence of mutations together with the seed that produced it.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OpScript {
    pub seed: [u8; 32],
    pub ops: Vec<Op>,
}

impl OpScript {
    /// Serializes the script so a failing run can be stored and replayed.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    pub fn from_json(s: &str) -> serde_json::Result<Self> {
        serde_json::from_str(s)
    }

    /// The shortest prefix of `ops` for which `check` fails, if any.
    ///
    /// `check` receives a prefix and returns `false` on failure.
    pub fn shortest_failing_prefix<F>(&self, mut check: F) -> Option<&[Op]>
    where
        F: FnMut(&[Op]) -> bool,
    {
        (1..=self.ops.len())
            .map(|n| &self.ops[..n])
            .find(|prefix| !check(prefix))
    }
}
