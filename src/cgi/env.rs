//! # Entorno CGI/1.1
//! src/cgi/env.rs
//!
//! Construye el conjunto de variables de entorno que recibe un script,
//! a partir del request y la configuración. El mapa se arma por request
//! y se pasa al hijo con `Command::envs` (o al intérprete embebido); el
//! entorno del proceso servidor nunca se muta.

use crate::config::ServerConfig;
use crate::http::Request;
use std::collections::HashMap;
use std::path::Path;

/// Variables que los scripts suelen leer sin comprobar existencia:
/// siempre presentes, vacías si el request no las trae.
const ALWAYS_PRESENT: [&str; 6] = [
    "QUERY_STRING",
    "REMOTE_HOST",
    "CONTENT_LENGTH",
    "HTTP_USER_AGENT",
    "HTTP_COOKIE",
    "HTTP_REFERER",
];

/// Entorno CGI de un request, efímero
#[derive(Debug, Clone)]
pub struct CgiEnvironment {
    vars: HashMap<String, String>,
}

impl CgiEnvironment {
    /// Construye el entorno CGI/1.1 de un request
    ///
    /// `path_info` es el path original de la URI (sin query string) y
    /// `script` el path del archivo resuelto en disco.
    pub fn build(
        config: &ServerConfig,
        request: &Request,
        path_info: &str,
        script: &Path,
        remote_addr: &str,
    ) -> Self {
        let mut vars = HashMap::new();

        vars.insert(
            "SERVER_SOFTWARE".to_string(),
            format!("cgi_server/{}", env!("CARGO_PKG_VERSION")),
        );
        vars.insert("SERVER_NAME".to_string(), config.host.clone());
        vars.insert("GATEWAY_INTERFACE".to_string(), "CGI/1.1".to_string());
        vars.insert("SERVER_PROTOCOL".to_string(), request.version().to_string());
        vars.insert("SERVER_PORT".to_string(), config.port.to_string());
        vars.insert("REQUEST_METHOD".to_string(), request.method().as_str().to_string());
        vars.insert("PATH_INFO".to_string(), path_info.to_string());
        vars.insert(
            "SCRIPT_NAME".to_string(),
            script.to_string_lossy().to_string(),
        );
        vars.insert("REMOTE_ADDR".to_string(), remote_addr.to_string());

        // Solo si el request las trae
        if let Some(query) = request.query() {
            vars.insert("QUERY_STRING".to_string(), query.to_string());
        }
        if let Some(referer) = request.header("referer") {
            vars.insert("HTTP_REFERER".to_string(), referer.to_string());
        }
        if let Some(cookie) = request.header("cookie") {
            vars.insert("HTTP_COOKIE".to_string(), cookie.to_string());
        }

        // Valores vacíos para lo que quedó sin fijar, por compatibilidad
        // con scripts que las leen incondicionalmente.
        for key in ALWAYS_PRESENT {
            vars.entry(key.to_string()).or_insert_with(String::new);
        }

        Self { vars }
    }

    /// Valor de una variable, si existe
    pub fn get(&self, name: &str) -> Option<&str> {
        self.vars.get(name).map(|s| s.as_str())
    }

    /// Itera sobre todos los pares variable/valor
    pub fn iter(&self) -> impl Iterator<Item = (&String, &String)> {
        self.vars.iter()
    }
}
