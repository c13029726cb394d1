//! # Servidor HTTP/1.0 con soporte CGI
//!
//! Un servidor web minimalista que sirve archivos estáticos y ejecuta
//! scripts CGI, con un intérprete Python embebido como último recurso
//! cuando no hay binario en disco.
//!
//! ## Arquitectura
//!
//! - `config`: CLI, variables de entorno y tablas del sitio en JSON
//! - `http`: parsing de requests y construcción de respuestas HTTP/1.0
//! - `resolver`: mapeo de URIs a archivos bajo el document root
//! - `cgi`: intérpretes, despacho por shebang, entorno CGI/1.1,
//!   ejecución externa o embebida y parsing de la salida
//! - `staticfile`: tabla MIME y lectura de archivos por bloques
//! - `server`: loop TCP secuencial y pipeline de cada request
//!
//! ## Modelo de ejecución
//!
//! Un request a la vez, de principio a fin. El modo de auto-ejecución
//! muta estado global del intérprete embebido y depende de esta
//! serialización.

pub mod cgi;
pub mod config;
pub mod http;
pub mod resolver;
pub mod server;
pub mod staticfile;
