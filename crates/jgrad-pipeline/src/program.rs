use std::f64::consts::PI;

use jgrad_core::{ErrorInfo, GradError};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Single gate-level step of a kickback program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum Instruction {
    /// Pauli-X on one qubit.
    X {
        /// Target qubit.
        qubit: usize,
    },
    /// Hadamard on one qubit.
    H {
        /// Target qubit.
        qubit: usize,
    },
    /// Controlled `U^(2^exponent)` with `U` the program's phase unitary.
    ControlledPhase {
        /// Control qubit from the data register.
        control: usize,
        /// Qubit the unitary acts on (the ancilla).
        target: usize,
        /// Power-of-two exponent applied to `U`.
        exponent: u32,
    },
    /// Inverse quantum Fourier transform over the listed qubits.
    InverseQft {
        /// Qubits in register order.
        qubits: Vec<usize>,
    },
}

/// Diagonal single-qubit unitary `diag(e^{iφ}, e^{iφ})`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhaseUnitary {
    /// Phase angle `φ` in radians.
    pub angle: f64,
}

impl PhaseUnitary {
    /// Unitary that kicks back `f_h / 2` of a full turn: `φ = -π·magnitude`.
    pub fn for_magnitude(magnitude: f64) -> Self {
        Self {
            angle: -PI * magnitude,
        }
    }

    /// Diagonal entries as `(re, im)` pairs.
    pub fn diagonal(&self) -> [(f64, f64); 2] {
        let entry = (self.angle.cos(), self.angle.sin());
        [entry, entry]
    }
}

/// Gate-level description of one phase-kickback gradient program.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KickbackProgram {
    /// Perturbation magnitude encoded into the phase.
    pub magnitude: f64,
    /// Number of data qubits.
    pub precision: usize,
    /// Ancilla qubit index (always `precision`).
    pub ancilla: usize,
    /// Phase unitary applied to the ancilla.
    pub unitary: PhaseUnitary,
    /// Ordered instructions.
    pub instructions: Vec<Instruction>,
}

impl KickbackProgram {
    /// Stable SHA-256 hex digest of the program's JSON form.
    pub fn canonical_hash(&self) -> Result<String, GradError> {
        let bytes = serde_json::to_vec(self)
            .map_err(|err| GradError::Serde(ErrorInfo::new("json-serialize", err.to_string())))?;
        Ok(format!("{:x}", Sha256::digest(bytes)))
    }
}

/// Encodes a perturbation magnitude into an executable program.
pub trait OracleEncoder: Send + Sync {
    /// Builds the program for `magnitude` in [0, 1) with `precision` data qubits.
    fn build_program(&self, magnitude: f64, precision: usize)
        -> Result<KickbackProgram, GradError>;
}

/// Ancilla preparation followed by textbook phase estimation.
#[derive(Debug, Clone, Copy, Default)]
pub struct PhaseKickbackEncoder;

impl OracleEncoder for PhaseKickbackEncoder {
    fn build_program(
        &self,
        magnitude: f64,
        precision: usize,
    ) -> Result<KickbackProgram, GradError> {
        if precision == 0 {
            return Err(GradError::invalid_input(
                "zero-precision",
                "program needs at least one data qubit",
            ));
        }
        if !(0.0..1.0).contains(&magnitude) {
            let info = ErrorInfo::new("magnitude-out-of-domain", "magnitude must lie in [0, 1)")
                .with_context("magnitude", magnitude.to_string());
            return Err(GradError::InvalidInput(info));
        }

        let ancilla = precision;
        let data: Vec<usize> = (0..precision).collect();

        // Ancilla goes to |->, the eigenstate picked up by the controlled phase.
        let mut instructions = vec![Instruction::X { qubit: ancilla }, Instruction::H { qubit: ancilla }];
        instructions.extend(data.iter().map(|&qubit| Instruction::H { qubit }));
        instructions.extend(data.iter().map(|&control| Instruction::ControlledPhase {
            control,
            target: ancilla,
            exponent: control as u32,
        }));
        instructions.push(Instruction::InverseQft { qubits: data });

        Ok(KickbackProgram {
            magnitude,
            precision,
            ancilla,
            unitary: PhaseUnitary::for_magnitude(magnitude),
            instructions,
        })
    }
}
