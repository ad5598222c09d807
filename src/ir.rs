//! Representación del pseudoensamblador de tres direcciones.
//!
//! El listado generado es puramente textual: nunca se ensambla ni se
//! ejecuta. Cada instrucción nombra a lo sumo un registro de destino
//! y dos fuentes.

use crate::lex::BinOp;
use std::{
    fmt::{self, Display},
    io::{self, Write},
};

/// Un registro virtual.
///
/// Los registros se numeran desde `R1` con un contador que solo
/// crece; una vez asignado, un registro nunca se reutiliza. El
/// archivo de registros es ilimitado por diseño, no un recurso
/// escaso.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Reg(pub u32);

impl Display for Reg {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(fmt, "R{}", self.0)
    }
}

/// Una instrucción del listado.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Instruction {
    /// `MOV R<n>, <operando>`: carga de un operando fuente.
    Load { dst: Reg, operand: String },

    /// `ADD|SUB|MUL|DIV R<n>, <izq>, <der>`: aplicación de un operador.
    Compute {
        op: BinOp,
        dst: Reg,
        lhs: Reg,
        rhs: Reg,
    },

    /// `MOV <variable>, R<n>`: movimiento final hacia el destino.
    Store { target: String, src: Reg },
}

impl Display for Instruction {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Instruction::*;

        match self {
            Load { dst, operand } => write!(fmt, "MOV {}, {}", dst, operand),
            Compute { op, dst, lhs, rhs } => {
                write!(fmt, "{} {}, {}, {}", mnemonic(*op), dst, lhs, rhs)
            }
            Store { target, src } => write!(fmt, "MOV {}, {}", target, src),
        }
    }
}

/// Mnemónico de cada operador.
fn mnemonic(op: BinOp) -> &'static str {
    use BinOp::*;

    match op {
        Add => "ADD",
        Sub => "SUB",
        Mul => "MUL",
        Div => "DIV",
    }
}

/// Escribe el listado completo, una instrucción por línea.
pub fn write<W: Write>(instructions: &[Instruction], output: &mut W) -> io::Result<()> {
    for instruction in instructions {
        writeln!(output, "{}", instruction)?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn loads_follow_the_mov_format() {
        let load = Instruction::Load {
            dst: Reg(1),
            operand: "3".into(),
        };

        assert_eq!(load.to_string(), "MOV R1, 3");
    }

    #[test]
    fn computes_name_destination_then_sources() {
        let compute = Instruction::Compute {
            op: BinOp::Mul,
            dst: Reg(4),
            lhs: Reg(2),
            rhs: Reg(3),
        };

        assert_eq!(compute.to_string(), "MUL R4, R2, R3");
    }

    #[test]
    fn stores_move_into_the_named_variable() {
        let store = Instruction::Store {
            target: "x".into(),
            src: Reg(5),
        };

        assert_eq!(store.to_string(), "MOV x, R5");
    }

    #[test]
    fn listings_are_one_instruction_per_line() {
        let instructions = vec![
            Instruction::Load {
                dst: Reg(1),
                operand: "7".into(),
            },
            Instruction::Store {
                target: "y".into(),
                src: Reg(1),
            },
        ];

        let mut listing = Vec::new();
        write(&instructions, &mut listing).expect("writing to a Vec cannot fail");

        let listing = String::from_utf8(listing).expect("listings are UTF-8");
        assert_eq!(listing, "MOV R1, 7\nMOV y, R1\n");
    }
}
