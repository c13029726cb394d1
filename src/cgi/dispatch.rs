//! # Despacho de Scripts CGI
//! src/cgi/dispatch.rs
//!
//! Clasifica un target resuelto como CGI o estático y, para los CGI,
//! selecciona el modo de ejecución inspeccionando la línea shebang.
//!
//! La selección por nombre de lenguaje es determinista: se recorre la
//! tabla de intérpretes en orden de configuración y gana la PRIMERA
//! coincidencia.

use super::interp::InterpreterTable;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

/// Modo de ejecución de un script CGI
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecMode {
    /// Lanzar un proceso externo con este binario de intérprete
    Interpreter(PathBuf),

    /// Ejecutar el código del script dentro del proceso servidor
    /// (solo Python; ver `selfexec`)
    InProcess,
}

/// Lee la línea shebang de un script
///
/// Retorna la primera línea sin el "#!" inicial y sin espacios en los
/// extremos. Si el archivo no empieza con "#!", retorna la primera línea
/// recortada tal cual.
pub fn read_shebang(script: &Path) -> std::io::Result<String> {
    let file = File::open(script)?;
    let mut reader = BufReader::new(file);
    let mut line = String::new();
    reader.read_line(&mut line)?;

    let shebang = line.strip_prefix("#!").unwrap_or(&line);
    Ok(shebang.trim().to_string())
}

/// Selecciona el modo de ejecución para una línea shebang
///
/// En orden:
/// 1. Primer lenguaje configurado cuyo nombre aparezca como substring del
///    shebang y que tenga intérprete resuelto.
/// 2. El shebang mismo como ejecutable (primer token si hay espacios),
///    si nombra un archivo existente.
/// 3. Si el shebang contiene "python", modo de auto-ejecución.
/// 4. Nada: no hay intérprete disponible.
pub fn select_exec_mode(shebang: &str, table: &InterpreterTable) -> Option<ExecMode> {
    // 1. Lenguajes configurados, primera coincidencia gana
    for (language, resolved) in table.iter() {
        if shebang.contains(language) {
            if let Some(path) = resolved {
                return Some(ExecMode::Interpreter(path.to_path_buf()));
            }
        }
    }

    // 2. El shebang crudo como ejecutable
    let binary = match shebang.split_whitespace().next() {
        Some(token) => token,
        None => "",
    };
    if !binary.is_empty() && Path::new(binary).is_file() {
        return Some(ExecMode::Interpreter(PathBuf::from(binary)));
    }

    // 3. Python sin intérprete en disco: lo corremos nosotros
    if shebang.contains("python") {
        return Some(ExecMode::InProcess);
    }

    // 4. Sin intérprete
    None
}
