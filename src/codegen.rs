//! Generación de pseudoensamblador a partir de la forma postfija.
//!
//! Una única pasada sobre la secuencia postfija produce las dos
//! salidas a la vez: cada posición de la pila de generación lleva
//! tanto el registro simbólico de un valor intermedio como su valor
//! concreto del dominio de [`eval`](crate::eval). Así el listado y el
//! resultado numérico quedan consistentes por construcción, sin un
//! segundo recorrido.
//!
//! Una división entre cero no corta la emisión: el listado se genera
//! completo y solo el lado del valor queda indefinido de ahí en
//! adelante.

use crate::{
    eval::{operand_value, Value},
    ir::{Instruction, Reg},
    lex::BinOp,
    parse::Atom,
    source::Located,
};

use thiserror::Error;

/// Error de aridad durante la generación.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum CodegenError {
    /// Un operador apareció con menos de dos operandos disponibles.
    #[error("Missing operands for operator '{0}'")]
    MissingOperands(BinOp),

    /// Al final de la pasada quedó más o menos de un valor.
    #[error("Too many or too few operands in expression")]
    Unbalanced,
}

/// Asignador de registros virtuales.
///
/// Contador monotónico desde `R1`; los registros nunca se reutilizan.
pub struct Registers {
    next: u32,
}

impl Registers {
    /// Crea un asignador con `R1` como primer registro disponible.
    pub fn new() -> Self {
        Registers { next: 1 }
    }

    /// Entrega el siguiente registro fresco.
    pub fn alloc(&mut self) -> Reg {
        let reg = Reg(self.next);
        self.next += 1;

        reg
    }
}

impl Default for Registers {
    fn default() -> Self {
        Registers::new()
    }
}

/// Salida completa de la traducción de una sentencia.
#[derive(Debug, Clone)]
pub struct Translation {
    /// El listado, en orden de emisión.
    pub instructions: Vec<Instruction>,

    /// El resultado concreto de evaluar la misma expresión.
    pub result: Value,
}

/// Ranura de la pila de generación: registro simbólico y valor
/// concreto de un mismo valor intermedio.
struct Slot {
    reg: Reg,
    value: Value,
}

/// Traduce una secuencia postfija al listado de instrucciones y su
/// resultado concreto.
///
/// Cada operando carga un registro fresco; cada operador consume los
/// dos registros del tope y produce uno nuevo. Al final, el único
/// registro restante se mueve a la variable de destino.
pub fn translate(
    target: &str,
    postfix: &[Located<Atom>],
) -> Result<Translation, CodegenError> {
    let mut registers = Registers::new();
    let mut instructions = Vec::with_capacity(postfix.len() + 1);
    let mut stack: Vec<Slot> = Vec::new();

    for atom in postfix {
        match atom.val() {
            Atom::Operand(text) => {
                let dst = registers.alloc();

                instructions.push(Instruction::Load {
                    dst,
                    operand: text.clone(),
                });

                stack.push(Slot {
                    reg: dst,
                    value: Value::Known(operand_value(text)),
                });
            }

            Atom::Op(op) => {
                // El operando derecho se apiló de último
                let rhs = stack.pop().ok_or(CodegenError::MissingOperands(*op))?;
                let lhs = stack.pop().ok_or(CodegenError::MissingOperands(*op))?;

                let dst = registers.alloc();

                instructions.push(Instruction::Compute {
                    op: *op,
                    dst,
                    lhs: lhs.reg,
                    rhs: rhs.reg,
                });

                stack.push(Slot {
                    reg: dst,
                    value: Value::apply(*op, lhs.value, rhs.value),
                });
            }
        }
    }

    // Exactamente un valor debe quedar en la pila
    let last = match (stack.pop(), stack.pop()) {
        (Some(last), None) => last,
        _ => return Err(CodegenError::Unbalanced),
    };

    instructions.push(Instruction::Store {
        target: target.to_string(),
        src: last.reg,
    });

    Ok(Translation {
        instructions,
        result: last.value,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{eval, lex::tokenize, parse};

    fn translated(line: &str) -> Translation {
        let tokens = tokenize(line).expect("statement should tokenize");
        let statement = parse::parse(&tokens).expect("statement should parse");

        translate(statement.target.val(), &statement.postfix)
            .expect("statement should translate")
    }

    fn failure(line: &str) -> CodegenError {
        let tokens = tokenize(line).expect("statement should tokenize");
        let statement = parse::parse(&tokens).expect("statement should parse");

        translate(statement.target.val(), &statement.postfix)
            .expect_err("statement should be rejected")
    }

    fn listing(translation: &Translation) -> Vec<String> {
        translation
            .instructions
            .iter()
            .map(Instruction::to_string)
            .collect()
    }

    #[test]
    fn products_are_computed_before_sums() {
        let translation = translated("x = 3 + 4 * 2");

        assert_eq!(
            listing(&translation),
            vec![
                "MOV R1, 3",
                "MOV R2, 4",
                "MOV R3, 2",
                "MUL R4, R2, R3",
                "ADD R5, R1, R4",
                "MOV x, R5",
            ]
        );

        assert_eq!(translation.result, Value::Known(11));
    }

    #[test]
    fn parenthesized_sums_are_computed_first() {
        let translation = translated("y = (1 + 2) * 3");

        assert_eq!(
            listing(&translation),
            vec![
                "MOV R1, 1",
                "MOV R2, 2",
                "ADD R3, R1, R2",
                "MOV R4, 3",
                "MUL R5, R3, R4",
                "MOV y, R5",
            ]
        );

        assert_eq!(translation.result, Value::Known(9));
    }

    #[test]
    fn identifiers_load_like_any_operand() {
        let translation = translated("r = a + b");

        assert_eq!(
            listing(&translation),
            vec!["MOV R1, a", "MOV R2, b", "ADD R3, R1, R2", "MOV r, R3"]
        );
    }

    #[test]
    fn division_by_zero_still_emits_the_full_listing() {
        let translation = translated("z = 5 / 0");

        assert_eq!(
            listing(&translation),
            vec!["MOV R1, 5", "MOV R2, 0", "DIV R3, R1, R2", "MOV z, R3"]
        );

        assert_eq!(translation.result, Value::Undefined);
    }

    #[test]
    fn every_operand_loads_exactly_one_register() {
        let translation = translated("x = (a + 1) * (b - 2)");

        let loads = translation
            .instructions
            .iter()
            .filter(|i| matches!(i, Instruction::Load { .. }))
            .count();

        assert_eq!(loads, 4);
    }

    #[test]
    fn final_register_counts_operands_plus_operators() {
        // 5 operandos y 4 operadores: el último registro es R9
        let translation = translated("x = ((1 + 2) * (3 - 4)) / 5");

        match translation.instructions.last() {
            Some(Instruction::Store { src, .. }) => assert_eq!(*src, Reg(9)),
            other => panic!("expected a final store, found {:?}", other),
        }
    }

    #[test]
    fn leading_minus_is_missing_an_operand() {
        // No hay menos unario: `-` exige dos operandos
        assert!(matches!(
            failure("x = -5"),
            CodegenError::MissingOperands(BinOp::Sub)
        ));
    }

    #[test]
    fn adjacent_operands_are_unbalanced() {
        assert!(matches!(failure("x = 1 2"), CodegenError::Unbalanced));
    }

    #[test]
    fn translation_result_matches_the_evaluator() {
        for line in [
            "x = 3 + 4 * 2",
            "x = (1 + 2) * 3",
            "x = 8 - 3 - 2",
            "x = 5 / 0",
            "x = a + 5",
            "x = 7 / 2 + 100 * 3",
        ] {
            let tokens = tokenize(line).expect("statement should tokenize");
            let statement = parse::parse(&tokens).expect("statement should parse");

            let translation = translate(statement.target.val(), &statement.postfix)
                .expect("statement should translate");
            let evaluated =
                eval::evaluate(&statement.postfix).expect("statement should evaluate");

            assert_eq!(translation.result, evaluated, "diverged on {:?}", line);
        }
    }

    #[test]
    fn registers_are_never_reused() {
        let mut registers = Registers::new();

        assert_eq!(registers.alloc(), Reg(1));
        assert_eq!(registers.alloc(), Reg(2));
        assert_eq!(registers.alloc(), Reg(3));
    }
}
