//! # Auto-ejecución de Scripts Python
//! src/cgi/selfexec.rs
//!
//! Corre el código de nivel superior de un script Python dentro del
//! proceso servidor, usando el intérprete embebido de `pyo3`. Es el
//! último recurso cuando el shebang menciona "python" pero no se
//! encontró ningún binario en disco.
//!
//! Durante la llamada se sustituyen `sys.stdout`, `sys.stderr` y
//! `sys.argv` del intérprete embebido por buffers de captura y el path
//! del script. La restauración está garantizada en todo camino de salida
//! (incluida una excepción del script) mediante un guard con `Drop`.
//!
//! Este modo muta estado global del intérprete y solo es correcto bajo
//! el modelo de un request a la vez. Cualquier versión concurrente del
//! servidor necesita aislar la captura por llamada.

use super::env::CgiEnvironment;
use super::exec::CgiResult;
use pyo3::prelude::*;
use pyo3::types::{PyDict, PyList, PyModule};
use std::ffi::CString;
use std::path::Path;

/// Sustituye stdout/stderr/argv y los restaura en `Drop`
struct StreamGuard<'py> {
    sys: Bound<'py, PyModule>,
    prev_stdout: Bound<'py, PyAny>,
    prev_stderr: Bound<'py, PyAny>,
    prev_argv: Bound<'py, PyAny>,
}

impl<'py> StreamGuard<'py> {
    /// Guarda los valores actuales e instala la captura
    fn acquire(
        sys: Bound<'py, PyModule>,
        stdout_buf: &Bound<'py, PyAny>,
        stderr_buf: &Bound<'py, PyAny>,
        argv: &Bound<'py, PyList>,
    ) -> PyResult<Self> {
        let prev_stdout = sys.getattr("stdout")?;
        let prev_stderr = sys.getattr("stderr")?;
        let prev_argv = sys.getattr("argv")?;

        sys.setattr("stdout", stdout_buf)?;
        sys.setattr("stderr", stderr_buf)?;
        sys.setattr("argv", argv)?;

        Ok(Self {
            sys,
            prev_stdout,
            prev_stderr,
            prev_argv,
        })
    }
}

impl Drop for StreamGuard<'_> {
    fn drop(&mut self) {
        // La restauración no puede fallar hacia el llamador; un error
        // aquí se ignora deliberadamente.
        let _ = self.sys.setattr("stdout", &self.prev_stdout);
        let _ = self.sys.setattr("stderr", &self.prev_stderr);
        let _ = self.sys.setattr("argv", &self.prev_argv);
    }
}

/// Ejecuta el script dentro del intérprete embebido
///
/// La salida capturada se divide por '\n' sin conservar terminadores
/// (a diferencia del modo externo; el parser tolera ambas formas).
/// Una excepción del script se registra y se reporta como código de
/// salida 1, lo que fuerza el status 500 en el handler; los headers que
/// el script alcanzó a escribir se conservan.
pub fn run_in_process(
    script: &Path,
    env: &CgiEnvironment,
    debug: bool,
) -> std::io::Result<CgiResult> {
    let source = std::fs::read_to_string(script)?;
    let script_str = script.to_string_lossy().to_string();

    Python::with_gil(|py| -> PyResult<CgiResult> {
        let sys = py.import("sys")?;
        let io = py.import("io")?;

        // El script lee sus variables CGI de os.environ
        let environ = py.import("os")?.getattr("environ")?;
        for (key, value) in env.iter() {
            environ.set_item(key, value)?;
        }

        let stdout_buf = io.call_method0("StringIO")?;
        let stderr_buf = io.call_method0("StringIO")?;
        let argv = PyList::new(py, [script_str.as_str()])?;

        // En un intérprete embebido sys.argv puede no existir todavía
        if sys.getattr("argv").is_err() {
            sys.setattr("argv", PyList::empty(py))?;
        }

        let guard = StreamGuard::acquire(sys, &stdout_buf, &stderr_buf, &argv)?;

        let globals = PyDict::new(py);
        globals.set_item("__name__", "__main__")?;

        let code = CString::new(source)
            .map_err(|_| pyo3::exceptions::PyValueError::new_err("script contains NUL byte"))?;
        let run_result = py.run(code.as_c_str(), Some(&globals), None);

        // Restaurar streams y argv antes de leer las capturas
        drop(guard);

        let captured: String = stdout_buf.call_method0("getvalue")?.extract()?;
        let captured_err: String = stderr_buf.call_method0("getvalue")?.extract()?;

        if debug && !captured_err.is_empty() {
            eprintln!("[debug] stderr de {}: {}", script.display(), captured_err.trim_end());
        }

        let exit_code = match run_result {
            Ok(()) => None,
            Err(e) => {
                eprintln!("[CGI] El script {} lanzó una excepción: {}", script.display(), e);
                Some(1)
            }
        };

        let lines = captured.split('\n').map(|s| s.to_string()).collect();
        Ok(CgiResult { lines, exit_code })
    })
    .map_err(|e| std::io::Error::new(std::io::ErrorKind::Other, e.to_string()))
}
