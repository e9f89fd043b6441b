use std::collections::VecDeque;
use std::{error::Error, fmt};

/// Cell type of an IntCode image.
pub type Word = i64;

/// What a machine reports when it suspends.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    /// An output instruction ran. The machine can be resumed.
    Output(Word),
    /// The machine halted, carrying its last output if it ever produced one.
    Halted(Option<Word>),
}

impl Step {
    pub fn value(&self) -> Option<Word> {
        match *self {
            Step::Output(value) => Some(value),
            Step::Halted(last) => last,
        }
    }

    pub fn is_halted(&self) -> bool {
        matches!(self, Step::Halted(_))
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Opcode {
    Add,
    Mul,
    Input,
    Output,
    JumpIfTrue,
    JumpIfFalse,
    LessThan,
    Equals,
    Halt,
}

impl Opcode {
    fn from_word(value: Word) -> Option<Self> {
        let opcode = match value % 100 {
            1 => Opcode::Add,
            2 => Opcode::Mul,
            3 => Opcode::Input,
            4 => Opcode::Output,
            5 => Opcode::JumpIfTrue,
            6 => Opcode::JumpIfFalse,
            7 => Opcode::LessThan,
            8 => Opcode::Equals,
            99 => Opcode::Halt,
            _ => return None,
        };
        Some(opcode)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Opcode::Add => "add",
            Opcode::Mul => "mul",
            Opcode::Input => "in",
            Opcode::Output => "out",
            Opcode::JumpIfTrue => "jt",
            Opcode::JumpIfFalse => "jf",
            Opcode::LessThan => "lt",
            Opcode::Equals => "eq",
            Opcode::Halt => "halt",
        };
        write!(f, "{}", name)
    }
}

/// Parameter addressing mode.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Mode {
    /// Parameter is an address into the image.
    Position,
    /// Parameter is used literally.
    Immediate,
}

/// Instruction decoded from a single image cell.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Instruction {
    pub opcode: Opcode,
    modes: [Mode; 3],
}

impl Instruction {
    /// Decode `value` as `ABCDE`, where `DE` is the opcode and `C`, `B`, `A` are the modes of
    /// parameters 1, 2 and 3. Digits above the third mode are ignored.
    pub fn decode(value: Word) -> Result<Self, MachineErrorKind> {
        if value < 0 {
            return Err(MachineErrorKind::InvalidOpcode { value });
        }
        let opcode = Opcode::from_word(value).ok_or(MachineErrorKind::InvalidOpcode { value })?;

        let mut modes = [Mode::Position; 3];
        let mut digits = value / 100;
        for (i, mode) in modes.iter_mut().enumerate() {
            *mode = match digits % 10 {
                0 => Mode::Position,
                1 => Mode::Immediate,
                _ => return Err(MachineErrorKind::InvalidMode { value, param: i + 1 }),
            };
            digits /= 10;
        }
        Ok(Instruction { opcode, modes })
    }

    /// Mode of a 1-indexed parameter.
    pub fn mode(&self, param: usize) -> Mode {
        debug_assert!((1..=3).contains(&param));
        self.modes[param - 1]
    }
}

/// Single IntCode execution unit.
///
/// Owns its image exclusively; the image passed to [`Machine::new`] is copied.
#[derive(Clone, Debug)]
pub struct Machine {
    /// Only used for diagnostics
    id: usize,
    mem: Vec<Word>,
    /// Instruction pointer
    ip: usize,
    input: VecDeque<Word>,
    output: Option<Word>,
    halted: bool,
    /// First error raised; the machine never runs again once set
    fault: Option<MachineError>,
}

impl Machine {
    pub fn new(image: &[Word], id: usize) -> Self {
        Machine {
            id,
            mem: image.to_vec(),
            ip: 0,
            input: VecDeque::new(),
            output: None,
            halted: false,
            fault: None,
        }
    }

    pub fn enqueue_input(&mut self, value: Word) {
        self.input.push_back(value);
    }

    /// Execute until the next output or halt instruction.
    ///
    /// Output is the only suspension point: the value is returned and the next call resumes
    /// after it. Once halted, every call returns [`Step::Halted`] without decoding anything.
    /// Errors are terminal: later calls return the same error, whatever input was queued since.
    pub fn run_until_output_or_halt(&mut self) -> Result<Step, MachineError> {
        if let Some(fault) = self.fault {
            return Err(fault);
        }
        self.run().map_err(|kind| {
            let error = MachineError {
                machine: self.id,
                pointer: self.ip,
                kind,
            };
            self.fault = Some(error);
            error
        })
    }

    pub fn id(&self) -> usize {
        self.id
    }

    pub fn pointer(&self) -> usize {
        self.ip
    }

    pub fn memory(&self) -> &[Word] {
        &self.mem
    }

    pub fn output(&self) -> Option<Word> {
        self.output
    }

    pub fn is_halted(&self) -> bool {
        self.halted
    }

    pub fn pending_input(&self) -> usize {
        self.input.len()
    }

    pub fn fault(&self) -> Option<MachineError> {
        self.fault
    }

    // `ip` is only advanced once an instruction has fully succeeded, so errors report the
    // address of the failing instruction.
    fn run(&mut self) -> Result<Step, MachineErrorKind> {
        if self.halted {
            return Ok(Step::Halted(self.output));
        }
        loop {
            let instr = Instruction::decode(self.load(self.ip)?)?;
            match instr.opcode {
                Opcode::Add => self.binary(instr, |a, b| a.wrapping_add(b))?,
                Opcode::Mul => self.binary(instr, |a, b| a.wrapping_mul(b))?,
                Opcode::LessThan => self.binary(instr, |a, b| (a < b) as Word)?,
                Opcode::Equals => self.binary(instr, |a, b| (a == b) as Word)?,
                Opcode::Input => {
                    let value = self
                        .input
                        .pop_front()
                        .ok_or(MachineErrorKind::InputStarved)?;
                    self.write(1, value)?;
                    self.ip += 2;
                }
                Opcode::Output => {
                    let value = self.read(instr, 1)?;
                    tprintln!("amp #{} @ {}: {} {}", self.id, self.ip, instr.opcode, value);
                    self.output = Some(value);
                    self.ip += 2;
                    return Ok(Step::Output(value));
                }
                Opcode::JumpIfTrue => self.jump(instr, |cond| cond != 0)?,
                Opcode::JumpIfFalse => self.jump(instr, |cond| cond == 0)?,
                Opcode::Halt => {
                    match self.output {
                        Some(last) => tprintln!(
                            "amp #{} @ {}: {}, last output {}",
                            self.id,
                            self.ip,
                            instr.opcode,
                            last
                        ),
                        None => tprintln!(
                            "amp #{} @ {}: {}, no output",
                            self.id,
                            self.ip,
                            instr.opcode
                        ),
                    }
                    self.halted = true;
                    return Ok(Step::Halted(self.output));
                }
            }
        }
    }

    /// Add, multiply, less-than and equals: `p3 <- f(p1, p2)`.
    fn binary<F>(&mut self, instr: Instruction, f: F) -> Result<(), MachineErrorKind>
    where
        F: Fn(Word, Word) -> Word,
    {
        let lhs = self.read(instr, 1)?;
        let rhs = self.read(instr, 2)?;
        self.write(3, f(lhs, rhs))?;
        self.ip += 4;
        Ok(())
    }

    fn jump<F>(&mut self, instr: Instruction, taken: F) -> Result<(), MachineErrorKind>
    where
        F: Fn(Word) -> bool,
    {
        let cond = self.read(instr, 1)?;
        let target = self.read(instr, 2)?;
        if taken(cond) {
            self.ip = self.addr(target)?;
        } else {
            self.ip += 3;
        }
        Ok(())
    }

    /// Effective value of parameter `param` of the instruction at `ip`.
    fn read(&self, instr: Instruction, param: usize) -> Result<Word, MachineErrorKind> {
        let raw = self.load(self.ip + param)?;
        match instr.mode(param) {
            Mode::Position => self.load(self.addr(raw)?),
            Mode::Immediate => Ok(raw),
        }
    }

    /// Write targets are always addresses, whatever their mode digit says.
    fn write(&mut self, param: usize, value: Word) -> Result<(), MachineErrorKind> {
        let target = self.addr(self.load(self.ip + param)?)?;
        self.mem[target] = value;
        Ok(())
    }

    fn load(&self, addr: usize) -> Result<Word, MachineErrorKind> {
        self.mem
            .get(addr)
            .copied()
            .ok_or(MachineErrorKind::OutOfBounds {
                address: addr as Word,
            })
    }

    /// Check that `address` refers to a cell of the image.
    fn addr(&self, address: Word) -> Result<usize, MachineErrorKind> {
        usize::try_from(address)
            .ok()
            .filter(|&addr| addr < self.mem.len())
            .ok_or(MachineErrorKind::OutOfBounds { address })
    }
}

/// Fatal error raised while a machine executes.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MachineError {
    /// Identifier of the failing machine.
    pub machine: usize,
    /// Address of the instruction being executed.
    pub pointer: usize,
    pub kind: MachineErrorKind,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MachineErrorKind {
    /// Opcode outside of the instruction set.
    InvalidOpcode { value: Word },
    /// Mode digit other than 0 or 1, for a 1-indexed parameter.
    InvalidMode { value: Word, param: usize },
    /// Input instruction with nothing queued.
    InputStarved,
    /// Read, write or jump outside of the image.
    OutOfBounds { address: Word },
}

impl Error for MachineError {}
impl Error for MachineErrorKind {}

impl fmt::Display for MachineError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "amp #{} at {}: {}", self.machine, self.pointer, self.kind)
    }
}

impl fmt::Display for MachineErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidOpcode { value } => {
                write!(f, "Invalid opcode in instruction `{}`", value)
            }
            Self::InvalidMode { value, param } => {
                write!(
                    f,
                    "Invalid mode for parameter {} in instruction `{}`",
                    param, value
                )
            }
            Self::InputStarved => {
                write!(f, "Input instruction with an empty input queue")
            }
            Self::OutOfBounds { address } => {
                write!(f, "Address {} is outside of memory", address)
            }
        }
    }
}
