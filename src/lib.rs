//! Traductor de asignaciones aritméticas de una línea
//! (`variable = expresión`) a pseudoensamblador de tres direcciones.
//!
//! # Front end
//! Cada sentencia deriva de una única línea de entrada. La línea se
//! somete primero a análisis léxico en [`lex`], de lo cual se obtiene
//! una secuencia de tokens. [`parse`] valida la estructura de la
//! asignación y convierte la expresión a forma postfija mediante el
//! algoritmo shunting-yard, con lo cual desaparecen paréntesis y
//! precedencias.
//!
//! # Back end
//! [`codegen`] recorre la secuencia postfija una única vez y produce
//! a la vez el listado de instrucciones descrito en [`ir`], sobre un
//! archivo ilimitado de registros virtuales, y el valor concreto de
//! la expresión en el dominio de [`eval`]. Una división entre cero no
//! es un error: produce el resultado indefinido, distinguido de
//! cualquier entero.
//!
//! Ninguna fase escribe a la salida por su cuenta; cada una retorna
//! un resultado discriminado y el driver presenta los diagnósticos de
//! [`error`] contra la línea original usando los rangos de [`source`].

pub mod codegen;
pub mod error;
pub mod eval;
pub mod ir;
pub mod lex;
pub mod parse;
pub mod source;
