use std::fmt;
use std::str::FromStr;

use crate::network::Topology;
use crate::Word;

/// Ordered phase settings, one per amplifier.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Phases(Vec<Word>);

impl Phases {
    /// Phase set of the serial chain.
    pub fn serial() -> Self {
        Phases((0..=4).collect())
    }

    /// Phase set of the feedback loop.
    pub fn feedback() -> Self {
        Phases((5..=9).collect())
    }

    pub fn default_for(topology: Topology) -> Self {
        match topology {
            Topology::Serial => Self::serial(),
            Topology::Feedback => Self::feedback(),
        }
    }

    pub fn as_slice(&self) -> &[Word] {
        &self.0
    }
}

impl From<Vec<Word>> for Phases {
    fn from(value: Vec<Word>) -> Self {
        Phases(value)
    }
}

impl FromStr for Phases {
    type Err = String;
    fn from_str(string: &str) -> Result<Self, Self::Err> {
        let mut phases = Vec::new();
        for word in string.split(',') {
            let word = word.trim();
            if word.is_empty() {
                continue;
            }
            let value = word
                .parse::<Word>()
                .map_err(|e| format!("Invalid phase '{}': {}", word, e))?;
            if phases.contains(&value) {
                return Err(format!("Cannot specify phase '{}' twice", value));
            }
            phases.push(value);
        }
        Ok(Phases(phases))
    }
}

impl fmt::Display for Phases {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, phase) in self.0.iter().enumerate() {
            if i > 0 {
                write!(f, ",")?;
            }
            write!(f, "{}", phase)?;
        }
        Ok(())
    }
}
