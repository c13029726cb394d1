//! # Módulo del Servidor
//! src/server/mod.rs
//!
//! Contiene la implementación del servidor TCP que coordina todos los
//! componentes: parsing HTTP, resolución de URIs, despacho CGI y
//! servicio de archivos estáticos.

pub mod tcp;

pub use tcp::Server;
