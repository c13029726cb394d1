//! # Construcción de Respuestas HTTP
//!
//! Este módulo proporciona una API para construir respuestas HTTP/1.0
//! de forma programática y convertirlas a bytes para enviar al cliente.
//!
//! ## Formato de una respuesta HTTP/1.0
//!
//! ```text
//! HTTP/1.0 200 OK\r\n
//! Content-Type: text/html\r\n
//! Content-Length: 11\r\n
//! \r\n
//! <h1>hi</h1>
//! ```
//!
//! El estado se guarda como `u16` porque un script CGI puede fijar
//! cualquier código con el pseudo-header `Status:`. Los headers viven en
//! un `HashMap` (claves únicas: un duplicado sobrescribe al anterior) y el
//! orden de emisión no está especificado.

use super::status::{self, StatusCode};
use std::collections::HashMap;

/// Representa una respuesta HTTP/1.0 completa
#[derive(Debug, Clone)]
pub struct Response {
    /// Código de estado HTTP (200, 404, etc.)
    status: u16,

    /// Headers HTTP (Content-Type, Content-Length, etc.)
    headers: HashMap<String, String>,

    /// Cuerpo de la respuesta (puede ser vacío)
    body: Vec<u8>,
}

impl Response {
    /// Crea una nueva respuesta con el código de estado especificado
    ///
    /// Por defecto, la respuesta no tiene headers ni body.
    pub fn new(status: StatusCode) -> Self {
        Self::with_raw_status(status.as_u16())
    }

    /// Crea una respuesta con un código numérico arbitrario
    ///
    /// Usado cuando el código viene de un `Status:` emitido por un script.
    pub fn with_raw_status(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: Vec::new(),
        }
    }

    /// Agrega un header a la respuesta (estilo builder)
    ///
    /// Si el header ya existe, se sobrescribe.
    pub fn with_header(mut self, name: &str, value: &str) -> Self {
        self.headers.insert(name.to_string(), value.to_string());
        self
    }

    /// Agrega un header a una respuesta existente (versión mutable)
    pub fn add_header(&mut self, name: &str, value: &str) {
        self.headers.insert(name.to_string(), value.to_string());
    }

    /// Establece el cuerpo de la respuesta desde un string
    ///
    /// Automáticamente calcula y agrega el header `Content-Length`.
    pub fn with_body(self, body: &str) -> Self {
        self.with_body_bytes(body.as_bytes().to_vec())
    }

    /// Establece el cuerpo de la respuesta desde bytes
    ///
    /// Útil para archivos binarios (imágenes, íconos, etc.)
    pub fn with_body_bytes(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self.headers
            .insert("Content-Length".to_string(), self.body.len().to_string());
        self
    }

    /// Cambia el código de estado de una respuesta ya construida
    pub fn set_status(&mut self, status: u16) {
        self.status = status;
    }

    /// Página de error genérica en HTML
    ///
    /// Se emite cuando el pipeline no produjo ningún cuerpo: 404 si la URI
    /// no resolvió, 500 si falló un script o no hubo intérprete.
    pub fn generic_error(status: StatusCode, message: &str) -> Self {
        let body = format!(
            "<html><head><title>{code} {reason}</title></head>\
             <body><h1>{code} {reason}</h1><p>{message}</p></body></html>",
            code = status.as_u16(),
            reason = status.reason_phrase(),
            message = message,
        );
        Self::new(status)
            .with_header("Content-Type", "text/html")
            .with_body(&body)
    }

    /// Convierte la respuesta a bytes listos para enviar por el socket
    ///
    /// Genera el formato completo HTTP/1.0:
    /// - Status line: `HTTP/1.0 200 OK\r\n`
    /// - Headers: `Header-Name: Value\r\n`
    /// - Línea vacía: `\r\n`
    /// - Body: contenido binario
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut result = self.head_bytes();
        result.extend_from_slice(&self.body);
        result
    }

    /// Como `to_bytes`, pero sin el cuerpo
    ///
    /// Para responder a HEAD: el cuerpo ya fue generado (y Content-Length
    /// lo refleja), pero se descarta en el envío.
    pub fn to_bytes_head(&self) -> Vec<u8> {
        self.head_bytes()
    }

    /// Status line + headers + línea vacía
    fn head_bytes(&self) -> Vec<u8> {
        let mut result = Vec::new();

        // 1. Status line
        let reason = status::reason_phrase(self.status);
        let status_line = if reason.is_empty() {
            format!("HTTP/1.0 {}\r\n", self.status)
        } else {
            format!("HTTP/1.0 {} {}\r\n", self.status, reason)
        };
        result.extend_from_slice(status_line.as_bytes());

        // 2. Headers
        for (name, value) in &self.headers {
            let header_line = format!("{}: {}\r\n", name, value);
            result.extend_from_slice(header_line.as_bytes());
        }

        // 3. Línea vacía que separa headers del body
        result.extend_from_slice(b"\r\n");

        result
    }

    /// Obtiene el código de estado de la respuesta
    pub fn status(&self) -> u16 {
        self.status
    }

    /// Obtiene una referencia a los headers
    pub fn headers(&self) -> &HashMap<String, String> {
        &self.headers
    }

    /// Obtiene una referencia al body
    pub fn body(&self) -> &[u8] {
        &self.body
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_response() {
        let response = Response::new(StatusCode::Ok);
        assert_eq!(response.status(), 200);
        assert!(response.headers().is_empty());
        assert!(response.body().is_empty());
    }

    #[test]
    fn test_raw_status() {
        let response = Response::with_raw_status(418);
        assert_eq!(response.status(), 418);
    }

    #[test]
    fn test_with_header() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("X-Custom", "value");

        assert_eq!(response.headers().get("Content-Type"), Some(&"text/plain".to_string()));
        assert_eq!(response.headers().get("X-Custom"), Some(&"value".to_string()));
    }

    #[test]
    fn test_duplicate_header_overwrites() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_header("Content-Type", "text/html");

        assert_eq!(response.headers().len(), 1);
        assert_eq!(response.headers().get("Content-Type"), Some(&"text/html".to_string()));
    }

    #[test]
    fn test_with_body() {
        let response = Response::new(StatusCode::Ok).with_body("Hello World");

        assert_eq!(response.body(), b"Hello World");
        assert_eq!(response.headers().get("Content-Length"), Some(&"11".to_string()));
    }

    #[test]
    fn test_to_bytes() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/plain")
            .with_body("Test");

        let bytes = response.to_bytes();
        let text = String::from_utf8(bytes).unwrap();

        assert!(text.starts_with("HTTP/1.0 200 OK\r\n"));
        assert!(text.contains("Content-Type: text/plain\r\n"));
        assert!(text.contains("Content-Length: 4\r\n"));
        assert!(text.ends_with("\r\n\r\nTest"));
    }

    #[test]
    fn test_to_bytes_unknown_status_has_no_reason() {
        let response = Response::with_raw_status(999);
        let text = String::from_utf8(response.to_bytes()).unwrap();
        assert!(text.starts_with("HTTP/1.0 999\r\n"));
    }

    #[test]
    fn test_to_bytes_head_keeps_content_length() {
        let response = Response::new(StatusCode::Ok)
            .with_header("Content-Type", "text/html")
            .with_body("<h1>hi</h1>");

        let head = String::from_utf8(response.to_bytes_head()).unwrap();

        // El cuerpo se descarta pero Content-Length refleja el cuerpo generado
        assert!(head.contains("Content-Length: 11\r\n"));
        assert!(head.ends_with("\r\n\r\n"));
        assert!(!head.contains("<h1>"));
    }

    #[test]
    fn test_set_status() {
        let mut response = Response::new(StatusCode::Ok).with_body("x");
        response.set_status(500);
        assert_eq!(response.status(), 500);
    }

    #[test]
    fn test_generic_error_page() {
        let response = Response::generic_error(StatusCode::NotFound, "File not found");

        assert_eq!(response.status(), 404);
        assert_eq!(response.headers().get("Content-Type"), Some(&"text/html".to_string()));
        let body = String::from_utf8(response.body().to_vec()).unwrap();
        assert!(body.contains("404 Not Found"));
        assert!(body.contains("File not found"));
    }

    #[test]
    fn test_with_body_bytes() {
        let binary_data = vec![0x89, 0x50, 0x4E, 0x47];
        let response = Response::new(StatusCode::Ok).with_body_bytes(binary_data.clone());

        assert_eq!(response.body(), &binary_data[..]);
        assert_eq!(response.headers().get("Content-Length"), Some(&"4".to_string()));
    }
}
