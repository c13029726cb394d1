//! # Servicio de Archivos Estáticos
//! src/staticfile/mod.rs
//!
//! Resolución del Content-Type por tabla ordenada de sufijos y lectura
//! del archivo en bloques de 8 KiB.

use crate::config::MimeRule;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Tamaño de bloque de lectura
const CHUNK_SIZE: usize = 8192;

/// Resuelve el Content-Type de un archivo contra la tabla MIME
///
/// La tabla se recorre en orden de declaración y gana la PRIMERA regla
/// cuya extensión coincida como sufijo del nombre. Sin coincidencia,
/// "text/plain".
pub fn resolve_mime<'a>(rules: &'a [MimeRule], target: &Path) -> &'a str {
    let name = target.to_string_lossy();
    rules
        .iter()
        .find(|rule| name.ends_with(rule.ext.as_str()))
        .map(|rule| rule.mime.as_str())
        .unwrap_or("text/plain")
}

/// Lee el contenido completo de un archivo, en bloques
pub fn read_file_buffered(target: &Path) -> std::io::Result<Vec<u8>> {
    let mut file = File::open(target)?;
    let mut content = Vec::new();
    let mut chunk = [0u8; CHUNK_SIZE];

    loop {
        let read = file.read(&mut chunk)?;
        if read == 0 {
            break;
        }
        content.extend_from_slice(&chunk[..read]);
    }

    Ok(content)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SiteConfig;
    use std::fs;

    #[test]
    fn test_resolve_mime_known_extensions() {
        let site = SiteConfig::default();

        assert_eq!(resolve_mime(&site.mime, Path::new("a/index.html")), "text/html");
        assert_eq!(resolve_mime(&site.mime, Path::new("a/logo.png")), "image/png");
        assert_eq!(resolve_mime(&site.mime, Path::new("a/foto.jpg")), "image/jpeg");
        assert_eq!(resolve_mime(&site.mime, Path::new("a/style.css")), "text/css");
    }

    #[test]
    fn test_resolve_mime_unknown_defaults_to_plain() {
        let site = SiteConfig::default();
        assert_eq!(resolve_mime(&site.mime, Path::new("a/dump.bin")), "text/plain");
    }

    #[test]
    fn test_resolve_mime_first_matching_rule_wins() {
        let rules = vec![
            MimeRule {
                ext: ".tar.gz".to_string(),
                mime: "application/gzip".to_string(),
            },
            MimeRule {
                ext: ".gz".to_string(),
                mime: "application/x-gzip".to_string(),
            },
        ];

        assert_eq!(resolve_mime(&rules, Path::new("backup.tar.gz")), "application/gzip");
        assert_eq!(resolve_mime(&rules, Path::new("page.gz")), "application/x-gzip");
    }

    #[test]
    fn test_read_file_buffered_small() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("small.txt");
        fs::write(&path, "hola mundo").unwrap();

        assert_eq!(read_file_buffered(&path).unwrap(), b"hola mundo");
    }

    #[test]
    fn test_read_file_buffered_larger_than_chunk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("big.bin");
        let data: Vec<u8> = (0..(CHUNK_SIZE * 2 + 77)).map(|i| (i % 251) as u8).collect();
        fs::write(&path, &data).unwrap();

        assert_eq!(read_file_buffered(&path).unwrap(), data);
    }

    #[test]
    fn test_read_file_buffered_missing_is_error() {
        let dir = tempfile::tempdir().unwrap();
        assert!(read_file_buffered(&dir.path().join("nope")).is_err());
    }
}
