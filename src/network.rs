use crate::machine::{Machine, MachineError, Word};

/// How amplifier outputs are routed.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum Topology {
    /// Each amplifier runs once, the last output is the result.
    Serial,
    /// The last amplifier feeds back into the first until it halts.
    #[default]
    Feedback,
}

/// Ring of amplifiers threading a single signal through each other.
#[derive(Debug)]
pub struct FeedbackNetwork {
    machines: Vec<Machine>,
    topology: Topology,
    signal: Word,
}

impl FeedbackNetwork {
    /// Build one machine per phase, each with its own copy of `image` and seeded with its
    /// phase as first input.
    pub fn new(image: &[Word], phases: &[Word], topology: Topology) -> Self {
        let machines = phases
            .iter()
            .enumerate()
            .map(|(id, &phase)| {
                let mut machine = Machine::new(image, id);
                machine.enqueue_input(phase);
                machine
            })
            .collect();
        FeedbackNetwork {
            machines,
            topology,
            signal: 0,
        }
    }

    /// Signal of a feedback loop of `image` with the given phase permutation.
    pub fn evaluate(image: &[Word], phases: &[Word]) -> Result<Word, MachineError> {
        Self::new(image, phases, Topology::Feedback).run()
    }

    /// Drive rounds until the last amplifier halts (or once, for a serial chain) and return
    /// the final signal.
    ///
    /// Never returns if the last amplifier neither halts nor errors.
    pub fn run(mut self) -> Result<Word, MachineError> {
        if self.machines.is_empty() {
            return Ok(self.signal);
        }
        loop {
            let halted = self.round()?;
            if halted || self.topology == Topology::Serial {
                return Ok(self.signal);
            }
        }
    }

    /// Advance every machine to its next output or halt, in order.
    ///
    /// Returns whether the last machine is halted.
    fn round(&mut self) -> Result<bool, MachineError> {
        let mut halted = false;
        for machine in &mut self.machines {
            machine.enqueue_input(self.signal);
            let step = machine.run_until_output_or_halt()?;
            // A machine that halted without any output leaves the signal alone
            if let Some(value) = step.value() {
                self.signal = value;
            }
            halted = step.is_halted();
        }
        Ok(halted)
    }

    pub fn signal(&self) -> Word {
        self.signal
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }
}
