//! # Configuración del Servidor
//! src/config.rs
//!
//! Este módulo define la configuración del servidor CGI con soporte
//! para argumentos CLI, variables de entorno y un archivo de sitio en JSON.
//!
//! Los valores escalares (host, puerto, debug, document root) vienen del
//! CLI. Las tablas del sitio (extensiones CGI, índices, rutas de búsqueda
//! de intérpretes, tabla MIME, páginas de error) vienen de un archivo JSON
//! opcional; si no se indica ninguno, se usan los valores por defecto.
//!
//! ## Ejemplos de uso
//!
//! ### CLI
//! ```bash
//! ./cgi_server --port 2006 --document-root ./public_html --debug
//! ```
//!
//! ### Variables de entorno
//! ```bash
//! CGI_PORT=8080 CGI_HOST=0.0.0.0 ./cgi_server
//! ```
//!
//! ### Archivo de sitio
//! ```bash
//! ./cgi_server --site-config ./site.json
//! ```

use clap::Parser;
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// Argumentos CLI del servidor
#[derive(Debug, Clone, Parser)]
#[command(name = "cgi_server")]
#[command(about = "Servidor HTTP/1.0 con soporte CGI")]
#[command(version = "0.1.0")]
pub struct Cli {
    /// Puerto en el que escucha el servidor
    #[arg(short, long, default_value = "2006", env = "CGI_PORT")]
    pub port: u16,

    /// Host/IP en el que escucha
    #[arg(long, default_value = "127.0.0.1", env = "CGI_HOST")]
    pub host: String,

    /// Activa trazas de resolución y despacho
    #[arg(long, env = "CGI_DEBUG")]
    pub debug: bool,

    /// Directorio base de los archivos servibles
    #[arg(long = "document-root", default_value = "./public_html", env = "DOCUMENT_ROOT")]
    pub document_root: String,

    /// Archivo JSON con las tablas del sitio (extensiones CGI, MIME, etc.)
    #[arg(long = "site-config", env = "SITE_CONFIG")]
    pub site_config: Option<String>,
}

/// Una regla de la tabla extensión → MIME
///
/// La tabla se evalúa en el orden en que fue declarada: gana la primera
/// extensión que coincida como sufijo del nombre del archivo.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct MimeRule {
    pub ext: String,
    pub mime: String,
}

/// Rutas de búsqueda de un intérprete para un lenguaje
///
/// El primer elemento de `search` es la ruta "canónica" (la que aparece en
/// la línea shebang de los scripts); el resto son ubicaciones alternativas.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct InterpreterSearch {
    pub name: String,
    pub search: Vec<String>,
}

/// Tablas del sitio, cargadas de JSON o construidas por defecto
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct SiteConfig {
    /// Extensiones que marcan un archivo como script CGI
    #[serde(default = "default_cgi_extensions")]
    pub cgi_extensions: Vec<String>,

    /// Nombres de archivo índice, en orden de prioridad
    #[serde(default = "default_indexes")]
    pub indexes: Vec<String>,

    /// Lenguajes con sus rutas de búsqueda de intérprete, en orden
    #[serde(default = "default_interpreters")]
    pub interpreters: Vec<InterpreterSearch>,

    /// Tabla extensión → MIME, en orden de evaluación
    #[serde(default = "default_mime")]
    pub mime: Vec<MimeRule>,

    /// Página servida cuando una URI no resuelve (relativa al root)
    #[serde(default = "default_not_found_page")]
    pub not_found_page: String,

    /// Página servida cuando no hay intérprete disponible (relativa al root)
    #[serde(default = "default_interp_error_page")]
    pub interp_error_page: String,
}

fn default_cgi_extensions() -> Vec<String> {
    vec![".cgi".to_string(), ".pl".to_string(), ".py".to_string()]
}

fn default_indexes() -> Vec<String> {
    vec!["index.html".to_string(), "index.htm".to_string()]
}

fn default_interpreters() -> Vec<InterpreterSearch> {
    vec![
        InterpreterSearch {
            name: "perl".to_string(),
            search: vec![
                "/usr/bin/perl".to_string(),
                "C:/Perl/bin/perl.exe".to_string(),
                "C:/Perl64/bin/perl.exe".to_string(),
            ],
        },
        InterpreterSearch {
            name: "python".to_string(),
            search: vec![
                "/usr/bin/python".to_string(),
                "C:/Python27/python.exe".to_string(),
                "C:/Python25/python.exe".to_string(),
            ],
        },
    ]
}

fn default_mime() -> Vec<MimeRule> {
    let pairs = [
        (".html", "text/html"),
        (".htm", "text/html"),
        (".text", "text/plain"),
        (".txt", "text/plain"),
        (".rs", "text/plain"),
        (".css", "text/css"),
        (".js", "text/javascript"),
        (".gif", "image/gif"),
        (".png", "image/png"),
        (".jpeg", "image/jpeg"),
        (".jpe", "image/jpeg"),
        (".jpg", "image/jpeg"),
        (".ico", "image/x-icon"),
    ];
    pairs
        .iter()
        .map(|(ext, mime)| MimeRule {
            ext: ext.to_string(),
            mime: mime.to_string(),
        })
        .collect()
}

fn default_not_found_page() -> String {
    "/errors/404.html".to_string()
}

fn default_interp_error_page() -> String {
    "/errors/interp.html".to_string()
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            cgi_extensions: default_cgi_extensions(),
            indexes: default_indexes(),
            interpreters: default_interpreters(),
            mime: default_mime(),
            not_found_page: default_not_found_page(),
            interp_error_page: default_interp_error_page(),
        }
    }
}

impl SiteConfig {
    /// Carga las tablas del sitio desde un archivo JSON
    pub fn load(path: &str) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))
    }
}

/// Configuración completa del servidor
///
/// Se construye una sola vez en el arranque y nunca se muta después: el
/// servidor es su único dueño y la pasa por referencia al manejo de cada
/// request.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Host/IP de escucha
    pub host: String,

    /// Puerto de escucha
    pub port: u16,

    /// Trazas de resolución y despacho activas
    pub debug: bool,

    /// Directorio base de los archivos servibles
    pub document_root: PathBuf,

    /// Tablas del sitio
    pub site: SiteConfig,
}

impl ServerConfig {
    /// Construye la configuración desde los argumentos CLI
    ///
    /// Si `--site-config` apunta a un archivo, sus tablas reemplazan a las
    /// por defecto. Un archivo ilegible o con JSON inválido es un error de
    /// arranque, no se ignora en silencio.
    pub fn from_cli(cli: Cli) -> std::io::Result<Self> {
        let site = match &cli.site_config {
            Some(path) => SiteConfig::load(path)?,
            None => SiteConfig::default(),
        };

        Ok(Self {
            host: cli.host,
            port: cli.port,
            debug: cli.debug,
            document_root: PathBuf::from(cli.document_root),
            site,
        })
    }

    /// Obtiene la dirección completa para bind (host:port)
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Valida la configuración
    ///
    /// Retorna errores si hay valores inválidos
    pub fn validate(&self) -> Result<(), String> {
        if self.site.indexes.is_empty() {
            return Err("At least one index filename is required".to_string());
        }
        if self.site.cgi_extensions.is_empty() {
            return Err("At least one CGI extension is required".to_string());
        }
        if !self.document_root.is_dir() {
            return Err(format!(
                "Document root is not a directory: {}",
                self.document_root.display()
            ));
        }
        Ok(())
    }

    /// Decide si un archivo resuelto es un script CGI
    ///
    /// Un archivo es CGI si y solo si su nombre termina en alguna de las
    /// extensiones configuradas. El orden de la lista no afecta al
    /// resultado (solo importa el booleano).
    pub fn is_cgi_target(&self, target: &Path) -> bool {
        let name = target.to_string_lossy();
        self.site.cgi_extensions.iter().any(|ext| name.ends_with(ext.as_str()))
    }

    /// Imprime un resumen de la configuración
    pub fn print_summary(&self) {
        println!("⚙️  Configuración:");
        println!("   Dirección:     {}", self.address());
        println!("   Document root: {}", self.document_root.display());
        println!("   CGI:           {}", self.site.cgi_extensions.join(" "));
        println!("   Índices:       {}", self.site.indexes.join(" "));
        println!(
            "   Lenguajes:     {}",
            self.site
                .interpreters
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(" ")
        );
        println!("   Debug:         {}", self.debug);
        println!();
    }
}

impl Default for ServerConfig {
    /// Configuración por defecto
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 2006,
            debug: false,
            document_root: PathBuf::from("./public_html"),
            site: SiteConfig::default(),
        }
    }
}
