//! Presentación de diagnósticos.
//!
//! Las fases del traductor no escriben nada por su cuenta: cada una
//! retorna un error discriminado y es el driver quien decide cómo
//! presentarlo. Este módulo arma el reporte final contra la línea
//! original, subrayando el rango señalado cuando se conoce.

use crate::source::{Located, Span};
use std::{
    error::Error,
    fmt::{self, Display},
};

/// Un error de fase listo para mostrarse contra la línea original.
pub struct Report<'a> {
    line: &'a str,
    kind: &'static str,
    message: String,
    span: Option<Span>,
}

impl<'a> Report<'a> {
    /// Reporte sin rango asociado.
    pub fn new<E: Error>(line: &'a str, error: E) -> Self {
        Report {
            line,
            kind: "error",
            message: error.to_string(),
            span: None,
        }
    }

    /// Reporte que subraya el rango del error.
    pub fn located<E: Error>(line: &'a str, error: Located<E>) -> Self {
        let (span, error) = error.split();
        Report {
            span: Some(span),
            ..Report::new(line, error)
        }
    }

    /// Cambia la etiqueta del reporte.
    pub fn kind(self, kind: &'static str) -> Self {
        Report { kind, ..self }
    }
}

impl Display for Report<'_> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(fmt, "{}: {}", self.kind, self.message)?;

        if let Some(span) = self.span {
            writeln!(fmt, " --> {}", span)?;
            writeln!(fmt, "  |")?;
            writeln!(fmt, "  | {}", self.line)?;

            let skip = span.start().saturating_sub(1) as usize;
            let highlight = (span.end() - span.start()).max(1) as usize;

            writeln!(
                fmt,
                "  | {:skip$}{:^<highlight$}",
                "",
                "",
                skip = skip,
                highlight = highlight
            )?;
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lex::LexerError;

    #[test]
    fn located_reports_underline_the_offender() {
        let line = "x = 3 $ 4";
        let error = Located::at(LexerError::BadChar('$'), Span::at(7));

        let rendered = Report::located(line, error).to_string();
        let expected = "error: Invalid character '$' in statement\n \
                        --> 7\n  \
                        |\n  \
                        | x = 3 $ 4\n  \
                        |       ^\n";

        assert_eq!(rendered, expected);
    }

    #[test]
    fn unlocated_reports_are_a_single_line() {
        let error = Located::at(LexerError::BadChar('!'), Span::at(1)).into_inner();
        let rendered = Report::new("x = 1", error).to_string();

        assert_eq!(rendered, "error: Invalid character '!' in statement\n");
    }

    #[test]
    fn kind_replaces_the_label() {
        let error = Located::at(LexerError::BadChar('!'), Span::at(1)).into_inner();
        let rendered = Report::new("x = 1", error).kind("warning").to_string();

        assert!(rendered.starts_with("warning: "));
    }
}
