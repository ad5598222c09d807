//! Evaluación de secuencias postfijas.
//!
//! Aquí vive el dominio de valores del traductor: el resultado de una
//! expresión es un entero con signo o el valor indefinido que produce
//! una división entre cero. La aritmética de [`Value::apply`] es la
//! única definición de la semántica de los operadores; la generación
//! de código la comparte, de modo que listado y resultado no pueden
//! divergir.
//!
//! La división entre cero no es un error de evaluación: es un
//! resultado válido del dominio, distinguido de cualquier entero.

use crate::{
    lex::BinOp,
    parse::Atom,
    source::Located,
};

use thiserror::Error;

/// Error de evaluación.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum EvalError {
    /// Un operador apareció con menos de dos operandos disponibles.
    #[error("Invalid expression during evaluation")]
    MissingOperands,
}

/// Resultado concreto de una expresión.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Value {
    /// Un entero con signo.
    Known(i32),

    /// Hubo una división entre cero en algún punto de la expresión.
    Undefined,
}

impl Value {
    /// Aplica un operador binario sobre el dominio de valores.
    ///
    /// La aritmética es de enteros con envolvimiento y la división
    /// trunca hacia cero. Un divisor cero produce [`Value::Undefined`],
    /// y cualquier operando indefinido propaga lo indefinido al
    /// resultado completo.
    pub fn apply(op: BinOp, lhs: Value, rhs: Value) -> Value {
        use BinOp::*;

        let (lhs, rhs) = match (lhs, rhs) {
            (Value::Known(lhs), Value::Known(rhs)) => (lhs, rhs),
            _ => return Value::Undefined,
        };

        match op {
            Add => Value::Known(lhs.wrapping_add(rhs)),
            Sub => Value::Known(lhs.wrapping_sub(rhs)),
            Mul => Value::Known(lhs.wrapping_mul(rhs)),
            Div if rhs == 0 => Value::Undefined,
            Div => Value::Known(lhs.wrapping_div(rhs)),
        }
    }
}

/// Valor numérico de un operando, según la convención de `atoi`: se
/// toma la corrida inicial de dígitos y, si no hay ninguno, el valor
/// es 0.
///
/// Los identificadores nunca se resuelven contra un ambiente; que
/// evalúen a 0 en silencio es deliberado. Un literal que exceda el
/// rango de `i32` también cae al 0.
pub fn operand_value(text: &str) -> i32 {
    let digits = text
        .find(|c: char| !c.is_ascii_digit())
        .map_or(text, |end| &text[..end]);

    digits.parse().unwrap_or(0)
}

/// Evalúa una secuencia postfija con una pila de enteros.
///
/// La primera división entre cero corta la evaluación de inmediato:
/// los átomos restantes ni siquiera se procesan. Si al final queda
/// más o menos de un valor en la pila, el resultado cae a
/// `Known(0)`; ese caso degenerado es una red de seguridad explícita,
/// aunque los chequeos de aridad de la generación de código lo
/// vuelven inalcanzable en la tubería normal.
pub fn evaluate(postfix: &[Located<Atom>]) -> Result<Value, EvalError> {
    let mut stack = Vec::new();

    for atom in postfix {
        match atom.val() {
            Atom::Operand(text) => stack.push(operand_value(text)),

            Atom::Op(op) => {
                // El operando derecho se apiló de último
                let rhs = stack.pop().ok_or(EvalError::MissingOperands)?;
                let lhs = stack.pop().ok_or(EvalError::MissingOperands)?;

                match Value::apply(*op, Value::Known(lhs), Value::Known(rhs)) {
                    Value::Known(value) => stack.push(value),
                    Value::Undefined => return Ok(Value::Undefined),
                }
            }
        }
    }

    match stack.as_slice() {
        [value] => Ok(Value::Known(*value)),
        _ => Ok(Value::Known(0)),
    }
}
