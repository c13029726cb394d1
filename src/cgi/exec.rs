//! # Ejecución Externa de Scripts CGI
//! src/cgi/exec.rs
//!
//! Lanza el intérprete resuelto como proceso hijo con el path del script
//! como único argumento, bloquea hasta que termine y captura su salida.
//!
//! No hay timeout: un script colgado detiene todo el servicio. Es una
//! limitación conocida del modelo de un request a la vez.

use super::env::CgiEnvironment;
use std::path::Path;
use std::process::Command;

/// Salida capturada de una ejecución CGI
///
/// `lines` conserva los terminadores de línea tal como salieron del
/// proceso (el parser los recorta al escanear headers y los conserva en
/// el cuerpo). En el modo embebido las líneas vienen sin terminador; el
/// parser tolera ambas formas.
#[derive(Debug, Clone)]
pub struct CgiResult {
    /// Líneas de stdout, en orden
    pub lines: Vec<String>,

    /// Código de salida del proceso; `None` en el modo embebido exitoso
    pub exit_code: Option<i32>,
}

/// Ejecuta un script con un intérprete externo
///
/// stderr se lee y se descarta tras registrarlo; solo el código de salida
/// decide algo: distinto de cero fuerza el status 500 en el handler.
pub fn run_external(
    interpreter: &Path,
    script: &Path,
    env: &CgiEnvironment,
    debug: bool,
) -> std::io::Result<CgiResult> {
    let output = Command::new(interpreter)
        .arg(script)
        .envs(env.iter())
        .output()?;

    // Señal sin código de salida cuenta como falla
    let exit_code = output.status.code().unwrap_or(-1);

    let stderr = String::from_utf8_lossy(&output.stderr);
    if debug && !stderr.is_empty() {
        eprintln!("[debug] stderr de {}: {}", script.display(), stderr.trim_end());
    }

    let stdout = String::from_utf8_lossy(&output.stdout);
    let lines = split_lines_keeping_terminators(&stdout);

    Ok(CgiResult {
        lines,
        exit_code: Some(exit_code),
    })
}

/// Divide el texto en líneas conservando el '\n' final de cada una
fn split_lines_keeping_terminators(text: &str) -> Vec<String> {
    text.split_inclusive('\n').map(|s| s.to_string()).collect()
}
