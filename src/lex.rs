//! Análisis léxico.
//!
//! # Tokenization
//! Primera fase del traductor. Descompone la línea de entrada en
//! unidades léxicas, descartando los espacios en blanco. Cada token
//! emitido queda asociado a su rango de columnas original.
//!
//! # Contenido de un token
//! Los operadores, paréntesis y el símbolo de asignación se identifican
//! por el hecho de lo que son y no incluyen lexemas. Los operandos sí
//! conservan su texto original: en esta fase no se distingue entre
//! identificadores y literales enteros; esa distinción se difiere hasta
//! la evaluación.
//!
//! # Errores
//! Cualquier carácter fuera del alfabeto del lenguaje aborta el
//! análisis de inmediato, sin resultado parcial.

use crate::source::{Located, Span};
use std::{
    fmt::{self, Display},
    iter::Peekable,
    str::Chars,
};

use thiserror::Error;

/// Error de escaneo.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum LexerError {
    /// Carácter fuera del alfabeto de la sentencia.
    #[error("Invalid character {0:?} in statement")]
    BadChar(char),
}

/// Objeto resultante del análisis léxico.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Identificador o literal entero, sin resolver.
    Operand(String),

    /// Operador aritmético binario.
    Op(BinOp),

    /// `=`
    Assign,

    /// `(`
    OpenParen,

    /// `)`
    CloseParen,
}

impl Display for Token {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        use Token::*;

        match self {
            Operand(text) => write!(fmt, "operand `{}`", text),
            Op(op) => write!(fmt, "`{}`", op),
            Assign => fmt.write_str("`=`"),
            OpenParen => fmt.write_str("`(`"),
            CloseParen => fmt.write_str("`)`"),
        }
    }
}

/// Un operador aritmético binario.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
}

impl BinOp {
    /// Precedencia relativa; a mayor número, mayor precedencia.
    ///
    /// Los cuatro operadores son asociativos por la izquierda, por lo
    /// que empates de precedencia se resuelven a favor del operador
    /// que apareció primero.
    pub fn precedence(self) -> u32 {
        use BinOp::*;

        match self {
            Mul | Div => 2,
            Add | Sub => 1,
        }
    }
}

impl Display for BinOp {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        use BinOp::*;

        let symbol = match self {
            Add => '+',
            Sub => '-',
            Mul => '*',
            Div => '/',
        };

        write!(fmt, "{}", symbol)
    }
}

/// Reduce la línea a una secuencia de tokens o al primer error.
///
/// A diferencia de un lexer con recuperación, aquí el primer carácter
/// inválido aborta todo el análisis: la sentencia completa se descarta
/// sin resultado parcial.
pub fn tokenize(line: &str) -> Result<Vec<Located<Token>>, Located<LexerError>> {
    Lexer::new(line).collect()
}

/// Máquina de estados para análisis léxico.
///
/// La salida del lexer, así como su siguiente estado, se define a
/// partir de la combinación de su estado actual y el siguiente
/// carácter de la línea.
pub struct Lexer<'a> {
    source: Peekable<Chars<'a>>,
    state: State,
    start: u32,
    next: u32,
}

/// Posibles estados del lexer.
enum State {
    /// Estado que ocurre antes de encontrar el inicio de un token.
    Start,

    /// Estado de completitud; siempre emite el token incluido y
    /// vuelve a [`State::Start`].
    Complete(Token),

    /// Corrida alfanumérica que formará un operando.
    Word(String),
}

impl<'a> Lexer<'a> {
    /// Crea un lexer en estado inicial sobre la línea dada.
    pub fn new(line: &'a str) -> Self {
        Lexer {
            source: line.chars().peekable(),
            state: State::Start,
            start: 1,
            next: 1,
        }
    }

    /// Intenta construir un siguiente token.
    fn lex(&mut self) -> Result<Option<(Token, u32)>, LexerError> {
        use {State::*, Token::*};

        let token = loop {
            let next_char = self.source.peek().copied();

            // La columna de origen se mueve junto a la siguiente
            // mientras no se haya encontrado una frontera de token
            if let Start = self.state {
                self.start = self.next;
            }

            // Switch table principal, determina cambios de estado y de
            // salida a partir de combinaciones del estado actual y el
            // siguiente carácter
            match (&mut self.state, next_char) {
                (Start, None) => return Ok(None),

                // Tokens triviales
                (Start, Some('=')) => self.state = Complete(Assign),
                (Start, Some('+')) => self.state = Complete(Op(BinOp::Add)),
                (Start, Some('-')) => self.state = Complete(Op(BinOp::Sub)),
                (Start, Some('*')) => self.state = Complete(Op(BinOp::Mul)),
                (Start, Some('/')) => self.state = Complete(Op(BinOp::Div)),
                (Start, Some('(')) => self.state = Complete(OpenParen),
                (Start, Some(')')) => self.state = Complete(CloseParen),

                // Operandos: corridas máximas de alfanuméricos
                (Start, Some(c)) if c.is_ascii_alphanumeric() => self.state = Word(c.to_string()),

                // Espacios en blanco y caracteres inesperados
                (Start, Some(c)) if c.is_ascii_whitespace() => (),
                (Start, Some(c)) => break Err(LexerError::BadChar(c)),

                // Emisión retardada de tokens cualesquiera
                (Complete(token), _) => break Ok(std::mem::replace(token, Assign)),

                // Extensión de operandos
                (Word(word), Some(c)) if c.is_ascii_alphanumeric() => word.push(c),

                // Si sigue algo que no puede formar parte del operando,
                // el operando ha terminado
                (Word(word), _) => break Ok(Operand(std::mem::take(word))),
            }

            // Aquí se consume el carácter que se observó con lookahead
            if self.source.next().is_some() {
                self.next += 1;
            }
        };

        token.map(|token| Some((token, self.next)))
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Result<Located<Token>, Located<LexerError>>;

    fn next(&mut self) -> Option<Self::Item> {
        match self.lex() {
            Ok(None) => None,
            Ok(Some((token, end))) => {
                self.state = State::Start;

                let span = Span::new(self.start, end);
                Some(Ok(Located::at(token, span)))
            }

            Err(error) => Some(Err(Located::at(error, Span::at(self.next)))),
        }
    }
}
