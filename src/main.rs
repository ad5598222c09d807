//! Punto de entrada ("driver").
//!
//! Este módulo orquesta las fases del traductor y expone una CLI. Es
//! la única parte que lee entrada, escribe artefactos y presenta
//! diagnósticos; las fases mismas solo retornan resultados.

use anyhow::Context;
use clap::{crate_version, Arg, Command};
use exprc::{
    codegen::{self, Translation},
    error::Report,
    eval::Value,
    ir, lex,
    parse::{self, Statement},
};

use std::{
    fs::File,
    io::{self, BufRead, Write},
};

fn main() -> anyhow::Result<()> {
    // Parsing de CLI
    let args = Command::new("exprc")
        .version(crate_version!())
        .about("Traductor de asignaciones aritméticas a pseudoensamblador")
        .arg(
            Arg::new("statement")
                .value_name("STATEMENT")
                .help("Assignment statement ('var = expression'); read from stdin if absent"),
        )
        .arg(
            Arg::new("output")
                .short('o')
                .long("output")
                .value_name("FILE")
                .takes_value(true)
                .default_value("-")
                .help("Output file ('-' for stdout)"),
        )
        .arg(
            Arg::new("postfix")
                .short('p')
                .long("postfix")
                .help("Print the postfix form before the listing"),
        )
        .get_matches();

    let line = match args.value_of("statement") {
        Some(statement) => statement.to_owned(),
        None => read_statement().context("Failed to read statement from stdin")?,
    };

    let (statement, translation) = match translate(&line) {
        Ok(outputs) => outputs,
        Err(report) => {
            eprint!("{}", report);
            std::process::exit(1);
        }
    };

    let postfix = args.is_present("postfix");
    match args.value_of("output") {
        None | Some("-") => {
            let stdout = io::stdout();
            emit(&mut stdout.lock(), &statement, &translation, postfix)
                .context("Failed to emit to stdout")?;
        }

        Some(path) => {
            let mut file = File::create(path)
                .with_context(|| format!("Failed to open for writing: {}", path))?;

            emit(&mut file, &statement, &translation, postfix)
                .with_context(|| format!("Failed to emit to file: {}", path))?;
        }
    }

    Ok(())
}

/// Corre la tubería completa sobre la línea dada.
///
/// Cualquier fase que falle corta la tubería y se lleva consigo todos
/// los artefactos: no hay resultados parciales.
fn translate(line: &str) -> Result<(Statement, Translation), Report<'_>> {
    let tokens = lex::tokenize(line).map_err(|error| Report::located(line, error))?;
    let statement = parse::parse(&tokens).map_err(|error| Report::located(line, error))?;

    let translation = codegen::translate(statement.target.val(), &statement.postfix)
        .map_err(|error| Report::new(line, error))?;

    Ok((statement, translation))
}

/// Escribe los artefactos en orden fijo: forma postfija (opcional),
/// listado y línea de resultado.
fn emit<W: Write>(
    output: &mut W,
    statement: &Statement,
    translation: &Translation,
    postfix: bool,
) -> io::Result<()> {
    if postfix {
        writeln!(output, "{}", statement.postfix_line())?;
    }

    ir::write(&translation.instructions, output)?;

    match translation.result {
        Value::Known(result) => writeln!(output, "Actual Result: {}", result),
        Value::Undefined => writeln!(output, "Result: undefined (division by zero)"),
    }
}

/// Lee una línea de sentencia desde la entrada estándar, sin su
/// terminador de línea.
fn read_statement() -> io::Result<String> {
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;

    chomp(&mut line);
    Ok(line)
}

/// Recorta el terminador de línea final, si lo hay.
///
/// Un `'\n'` residual se colaría en los diagnósticos, que citan la
/// línea completa antes del subrayado.
fn chomp(line: &mut String) {
    while line.ends_with('\n') || line.ends_with('\r') {
        line.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::chomp;

    #[test]
    fn chomp_removes_the_line_terminator() {
        let mut line = String::from("x = 1 + 2\n");
        chomp(&mut line);
        assert_eq!(line, "x = 1 + 2");

        let mut line = String::from("x = 1 + 2\r\n");
        chomp(&mut line);
        assert_eq!(line, "x = 1 + 2");
    }

    #[test]
    fn chomp_leaves_plain_lines_alone() {
        let mut line = String::from("x = 1 + 2");
        chomp(&mut line);
        assert_eq!(line, "x = 1 + 2");
    }
}
