//! # Localización de Intérpretes CGI
//! src/cgi/interp.rs
//!
//! Resuelve, una sola vez en el arranque, la lista de rutas candidatas de
//! cada lenguaje configurado a un binario de intérprete existente. El
//! resultado queda cacheado en la `InterpreterTable` por toda la vida del
//! proceso; después del arranque la tabla es de solo lectura.

use crate::config::ServerConfig;
use std::path::{Path, PathBuf};

/// Tabla lenguaje → ruta de intérprete resuelta (o ausente)
///
/// El orden de las entradas es el orden de configuración; la selección
/// por shebang lo recorre en ese orden (primera coincidencia gana).
#[derive(Debug, Clone)]
pub struct InterpreterTable {
    entries: Vec<(String, Option<PathBuf>)>,
}

impl InterpreterTable {
    /// Prueba las rutas de búsqueda de cada lenguaje configurado
    pub fn locate(config: &ServerConfig) -> Self {
        let entries = config
            .site
            .interpreters
            .iter()
            .map(|lang| {
                let found = find_interpreter(&lang.name, &lang.search, config.debug);
                (lang.name.clone(), found)
            })
            .collect();

        Self { entries }
    }

    /// Construye una tabla explícita (para pruebas y configuraciones fijas)
    pub fn from_entries(entries: Vec<(String, Option<PathBuf>)>) -> Self {
        Self { entries }
    }

    /// Ruta resuelta para un lenguaje, si la hay
    pub fn get(&self, language: &str) -> Option<&Path> {
        self.entries
            .iter()
            .find(|(name, _)| name == language)
            .and_then(|(_, path)| path.as_deref())
    }

    /// Itera (lenguaje, ruta resuelta) en orden de configuración
    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&Path>)> {
        self.entries
            .iter()
            .map(|(name, path)| (name.as_str(), path.as_deref()))
    }

    /// Número de lenguajes configurados
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Indica si no hay lenguajes configurados
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Busca el binario de un intérprete en una lista ordenada de rutas
///
/// Retorna la primera candidata que exista como archivo regular.
fn find_interpreter(name: &str, search: &[String], debug: bool) -> Option<PathBuf> {
    if debug {
        println!("[debug] Buscando intérprete de {}", name);
    }
    for candidate in search {
        let path = Path::new(candidate);
        if path.is_file() {
            if debug {
                println!("[debug] Encontrado en: {}", candidate);
            }
            return Some(path.to_path_buf());
        }
    }
    None
}
