//! # Módulo CGI
//! src/cgi/mod.rs
//!
//! Todo lo que convierte un archivo resuelto en una ejecución de script:
//! localización de intérpretes en el arranque, selección del modo de
//! ejecución por shebang, construcción del entorno CGI/1.1, ejecución
//! (proceso externo o intérprete embebido) y parsing de la salida.

pub mod dispatch;
pub mod env;
pub mod exec;
pub mod interp;
pub mod output;
pub mod selfexec;

pub use dispatch::{read_shebang, select_exec_mode, ExecMode};
pub use env::CgiEnvironment;
pub use exec::{run_external, CgiResult};
pub use interp::InterpreterTable;
pub use output::{parse_cgi_output, ParsedOutput};
pub use selfexec::run_in_process;
