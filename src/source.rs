//! Rastreo de posiciones dentro de la línea de entrada.
//!
//! Cada sentencia ocupa exactamente una línea, por lo que una
//! posición se reduce a un rango de columnas. Los objetos que el
//! traductor construye a partir de la entrada llevan consigo su
//! rango original, lo cual permite señalar el punto exacto donde
//! ocurre un error de cualquier fase.

use std::fmt::{self, Debug, Display, Formatter};

/// Un rango de columnas (base 1, fin exclusivo) dentro de la línea.
#[derive(Copy, Clone, Eq, PartialEq)]
pub struct Span {
    start: u32,
    end: u32,
}

impl Span {
    /// Construye a partir de columnas de inicio y fin.
    pub fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Rango de una única columna.
    pub fn at(column: u32) -> Self {
        Span {
            start: column,
            end: column + 1,
        }
    }

    /// Obtiene la columna de inicio.
    pub fn start(&self) -> u32 {
        self.start
    }

    /// Obtiene la columna de fin (exclusiva).
    pub fn end(&self) -> u32 {
        self.end
    }
}

impl Display for Span {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        if self.end == self.start + 1 {
            // Solo se señala una columna en específico
            write!(formatter, "{}", self.start)
        } else {
            write!(formatter, "[{}-{}]", self.start, self.end - 1)
        }
    }
}

impl Debug for Span {
    fn fmt(&self, formatter: &mut Formatter<'_>) -> fmt::Result {
        <Self as Display>::fmt(self, formatter)
    }
}

/// Un objeto cualquiera con su rango original asociado.
#[derive(Debug, Clone)]
pub struct Located<T> {
    span: Span,
    value: T,
}

impl<T> Located<T> {
    /// Obtiene el valor.
    pub fn val(&self) -> &T {
        &self.value
    }

    /// Obtiene el rango.
    pub fn span(&self) -> &Span {
        &self.span
    }

    /// Descarta el rango y toma ownership del valor.
    pub fn into_inner(self) -> T {
        self.value
    }

    /// Descompone y toma ownership de las dos partes.
    pub fn split(self) -> (Span, T) {
        (self.span, self.value)
    }

    /// Construye a partir de un valor y un rango.
    pub fn at(value: T, span: Span) -> Self {
        Located { value, span }
    }

    /// Transforma el valor con el mismo rango.
    pub fn map<U, F>(self, map: F) -> Located<U>
    where
        F: FnOnce(T) -> U,
    {
        Located {
            value: map(self.value),
            span: self.span,
        }
    }
}

impl<T> AsRef<T> for Located<T> {
    fn as_ref(&self) -> &T {
        &self.value
    }
}
