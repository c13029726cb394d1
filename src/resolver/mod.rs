//! # Resolución de URIs
//! src/resolver/mod.rs
//!
//! Mapea el path de un request a un archivo dentro del document root.
//!
//! La sanitización es deliberadamente débil y NO canónica: colapsa cada
//! ocurrencia de ".." a ".", colapsa "/" repetidos y quita el "/" inicial.
//! No elimina componentes padre reales; las pruebas fijan esta política
//! tal cual. No usar este resolver como única defensa ante path
//! traversal.

use crate::config::ServerConfig;
use regex::Regex;
use std::path::PathBuf;

/// Resolver de URIs a archivos en disco
///
/// Se construye una vez en el arranque (las regex se compilan una sola
/// vez) y después solo se lee.
pub struct UriResolver {
    /// Directorio base de los archivos servibles
    root: PathBuf,

    /// Nombres de archivo índice, en orden de prioridad
    indexes: Vec<String>,

    /// Colapsa cada ".." a "."
    dot_dot: Regex,

    /// Colapsa "/" repetidos a uno solo
    slashes: Regex,
}

impl UriResolver {
    /// Construye el resolver desde la configuración
    pub fn new(config: &ServerConfig) -> Self {
        Self {
            root: config.document_root.clone(),
            indexes: config.site.indexes.clone(),
            // Patrones fijos: un fallo de compilación sería un bug del
            // propio código, no un error de runtime.
            dot_dot: Regex::new(r"\.\.").expect("invalid dot-dot pattern"),
            slashes: Regex::new(r"/+").expect("invalid slash pattern"),
        }
    }

    /// Sanitiza el path de una URI
    ///
    /// Tres pasos, en este orden:
    /// 1. cada ".." se vuelve "."
    /// 2. los "/" repetidos se colapsan a uno
    /// 3. se quita el "/" inicial
    ///
    /// # Ejemplo
    ///
    /// ```
    /// use cgi_server::config::ServerConfig;
    /// use cgi_server::resolver::UriResolver;
    ///
    /// let resolver = UriResolver::new(&ServerConfig::default());
    /// assert_eq!(resolver.sanitize("//a///b.html"), "a/b.html");
    /// assert_eq!(resolver.sanitize("/a/../b.html"), "a/./b.html");
    /// ```
    pub fn sanitize(&self, uri: &str) -> String {
        let uri = self.dot_dot.replace_all(uri, ".");
        let uri = self.slashes.replace_all(&uri, "/");
        uri.strip_prefix('/').unwrap_or(&uri).to_string()
    }

    /// Resuelve el path de una URI a un archivo existente
    ///
    /// Primero lo obvio: el path sanitizado unido al root, si es un
    /// archivo regular. Si no, prueba cada archivo índice configurado
    /// bajo ese directorio, en orden. Si nada existe, `None`.
    ///
    /// La resolución es idempotente: la misma URI sobre un filesystem sin
    /// cambios produce siempre el mismo resultado.
    pub fn resolve(&self, uri: &str) -> Option<PathBuf> {
        let sanitized = self.sanitize(uri);

        let base = if sanitized.is_empty() {
            self.root.clone()
        } else {
            self.root.join(&sanitized)
        };

        if base.is_file() {
            return Some(base);
        }

        // Buscar índices bajo el directorio resuelto
        for index in &self.indexes {
            let candidate = base.join(index);
            if candidate.is_file() {
                return Some(candidate);
            }
        }

        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn resolver_for(root: &std::path::Path) -> UriResolver {
        let mut config = ServerConfig::default();
        config.document_root = root.to_path_buf();
        UriResolver::new(&config)
    }

    #[test]
    fn test_sanitize_collapses_dot_dot_literally() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_for(dir.path());

        // Cada ".." se vuelve ".", no se elimina el componente padre
        assert_eq!(resolver.sanitize("/a/../../etc/passwd"), "a/././etc/passwd");
        assert_eq!(resolver.sanitize("/../x"), "./x");
    }

    #[test]
    fn test_sanitize_collapses_slashes_and_strips_leading() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_for(dir.path());

        assert_eq!(resolver.sanitize("//a///b.html"), "a/b.html");
        assert_eq!(resolver.sanitize("/"), "");
        assert_eq!(resolver.sanitize(""), "");
    }

    #[test]
    fn test_traversal_attempt_resolves_inside_root() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_for(dir.path());

        // El path colapsado queda bajo el root y no existe: None
        assert_eq!(resolver.resolve("/a/../../etc/passwd"), None);
    }

    #[test]
    fn test_resolve_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("page.html"), "<html></html>").unwrap();
        let resolver = resolver_for(dir.path());

        assert_eq!(
            resolver.resolve("/page.html"),
            Some(dir.path().join("page.html"))
        );
    }

    #[test]
    fn test_resolve_root_falls_back_to_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "hola").unwrap();
        let resolver = resolver_for(dir.path());

        assert_eq!(resolver.resolve("/"), Some(dir.path().join("index.html")));
    }

    #[test]
    fn test_index_priority_order() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "a").unwrap();
        fs::write(dir.path().join("index.htm"), "b").unwrap();
        let resolver = resolver_for(dir.path());

        // index.html está antes en la lista, gana
        assert_eq!(resolver.resolve("/"), Some(dir.path().join("index.html")));
    }

    #[test]
    fn test_second_index_when_first_missing() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.htm"), "b").unwrap();
        let resolver = resolver_for(dir.path());

        assert_eq!(resolver.resolve("/"), Some(dir.path().join("index.htm")));
    }

    #[test]
    fn test_resolve_subdirectory_index() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        fs::write(dir.path().join("docs/index.html"), "docs").unwrap();
        let resolver = resolver_for(dir.path());

        assert_eq!(
            resolver.resolve("/docs"),
            Some(dir.path().join("docs/index.html"))
        );
    }

    #[test]
    fn test_resolve_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let resolver = resolver_for(dir.path());

        assert_eq!(resolver.resolve("/nope.html"), None);
    }

    #[test]
    fn test_resolve_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("index.html"), "hola").unwrap();
        let resolver = resolver_for(dir.path());

        let first = resolver.resolve("/");
        let second = resolver.resolve("/");
        assert_eq!(first, second);
    }

    #[test]
    fn test_directory_is_not_a_file_target() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir(dir.path().join("empty")).unwrap();
        let resolver = resolver_for(dir.path());

        // Directorio sin índice: no hay target
        assert_eq!(resolver.resolve("/empty"), None);
    }
}
