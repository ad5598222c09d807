//! Análisis sintáctico.
//!
//! La sentencia tiene la forma `variable = expresión`. Este módulo
//! valida esa estructura y convierte la expresión de notación infija
//! a postfija mediante el algoritmo shunting-yard: una única pila
//! auxiliar de operadores resuelve precedencias y paréntesis, de modo
//! que las fases posteriores no vuelven a preocuparse por ninguno de
//! los dos.

use crate::{
    lex::{BinOp, Token},
    source::{Located, Span},
};
use std::fmt::{self, Display};

use thiserror::Error;

/// Error de estructura de la sentencia.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ParserError {
    /// La línea no contiene ningún token.
    #[error("Empty statement")]
    EmptyStatement,

    /// El segundo token no es el símbolo de asignación.
    #[error("Expected '=' after the result variable")]
    ExpectedAssign,

    /// El lado izquierdo no comienza con una letra.
    #[error("Left-hand side of '=' must be a valid variable name")]
    BadTarget,

    /// Un `)` sin `(` que lo abra, o un `(` sin cerrar.
    #[error("Mismatched parentheses in expression")]
    MismatchedParens,

    /// Un segundo `=` dentro de la expresión.
    #[error("Unexpected '=' in expression")]
    UnexpectedAssign,

    /// No hay expresión después del `=`.
    #[error("Empty expression after '='")]
    EmptyExpression,
}

/// Elemento de una secuencia postfija.
///
/// Tras la conversión ya no existen paréntesis ni precedencias: solo
/// operandos y operadores en orden de evaluación.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Atom {
    /// Identificador o literal entero, aún sin resolver.
    Operand(String),

    /// Operador aritmético binario.
    Op(BinOp),
}

impl Display for Atom {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Atom::Operand(text) => fmt.write_str(text),
            Atom::Op(op) => op.fmt(fmt),
        }
    }
}

/// Sentencia validada, con su expresión ya en forma postfija.
#[derive(Debug, Clone)]
pub struct Statement {
    /// Variable de destino de la asignación.
    pub target: Located<String>,

    /// La expresión en orden postfijo.
    pub postfix: Vec<Located<Atom>>,
}

impl Statement {
    /// Representación postfija en una línea, átomos separados por
    /// espacios.
    pub fn postfix_line(&self) -> String {
        let atoms: Vec<_> = self
            .postfix
            .iter()
            .map(|atom| atom.val().to_string())
            .collect();

        atoms.join(" ")
    }
}

/// Valida la estructura `variable = expresión` y convierte la
/// expresión a forma postfija.
pub fn parse(tokens: &[Located<Token>]) -> Result<Statement, Located<ParserError>> {
    let first = match tokens.first() {
        Some(first) => first,
        None => return Err(Located::at(ParserError::EmptyStatement, Span::at(1))),
    };

    // El `=` se exige antes de revisar el destino
    let assign = match tokens.get(1) {
        Some(token) if *token.val() == Token::Assign => token,
        Some(token) => return Err(Located::at(ParserError::ExpectedAssign, *token.span())),
        None => {
            let after = Span::at(first.span().end());
            return Err(Located::at(ParserError::ExpectedAssign, after));
        }
    };

    let target = match first.val() {
        Token::Operand(text) if text.starts_with(|c: char| c.is_ascii_alphabetic()) => {
            Located::at(text.clone(), *first.span())
        }

        _ => return Err(Located::at(ParserError::BadTarget, *first.span())),
    };

    let postfix = infix_to_postfix(&tokens[2..], *assign.span())?;
    Ok(Statement { target, postfix })
}

/// Entrada de la pila de operadores del shunting-yard.
enum Pending {
    Op(BinOp),
    Paren,
}

/// Conversión infija a postfija (shunting-yard).
///
/// Recibe los tokens estrictamente posteriores al `=`. La conversión
/// es determinista: la misma entrada produce siempre la misma salida.
fn infix_to_postfix(
    tokens: &[Located<Token>],
    assign: Span,
) -> Result<Vec<Located<Atom>>, Located<ParserError>> {
    let mut output = Vec::with_capacity(tokens.len());
    let mut stack: Vec<Located<Pending>> = Vec::new();

    for token in tokens {
        let span = *token.span();

        match token.val() {
            // Los operandos pasan directo a la salida
            Token::Operand(text) => output.push(Located::at(Atom::Operand(text.clone()), span)),

            Token::OpenParen => stack.push(Located::at(Pending::Paren, span)),

            // Un `)` vacía la pila hasta el `(` que lo abrió
            Token::CloseParen => loop {
                match stack.pop() {
                    Some(entry) => match entry.split() {
                        (span, Pending::Op(op)) => output.push(Located::at(Atom::Op(op), span)),
                        (_, Pending::Paren) => break,
                    },

                    None => return Err(Located::at(ParserError::MismatchedParens, span)),
                }
            },

            // Mientras el tope tenga precedencia mayor o igual, se
            // vuelca a la salida; el empate favorece al de la
            // izquierda por asociatividad
            Token::Op(op) => {
                loop {
                    let top = match stack.last().map(Located::val) {
                        Some(&Pending::Op(top)) if top.precedence() >= op.precedence() => top,
                        _ => break,
                    };

                    let span = match stack.pop() {
                        Some(entry) => *entry.span(),
                        None => break,
                    };

                    output.push(Located::at(Atom::Op(top), span));
                }

                stack.push(Located::at(Pending::Op(*op), span));
            }

            Token::Assign => return Err(Located::at(ParserError::UnexpectedAssign, span)),
        }
    }

    while let Some(entry) = stack.pop() {
        match entry.split() {
            (span, Pending::Paren) => {
                return Err(Located::at(ParserError::MismatchedParens, span))
            }

            (span, Pending::Op(op)) => output.push(Located::at(Atom::Op(op), span)),
        }
    }

    if output.is_empty() {
        return Err(Located::at(ParserError::EmptyExpression, assign));
    }

    Ok(output)
}
