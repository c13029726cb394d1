//! # Códigos de Estado HTTP
//!
//! Este módulo define los códigos de estado que el servidor emite por sí
//! mismo. Un script CGI puede fijar cualquier código numérico con el
//! pseudo-header `Status:`, así que las respuestas trabajan con `u16` y
//! este enum cubre solo el conjunto que el servidor produce directamente.

/// Códigos de estado que el servidor emite por cuenta propia
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusCode {
    /// 200 OK - La petición fue exitosa
    Ok = 200,

    /// 302 Found - Redirección emitida por un script CGI
    Found = 302,

    /// 400 Bad Request - Request malformado
    BadRequest = 400,

    /// 404 Not Found - La URI no resolvió a ningún archivo
    NotFound = 404,

    /// 500 Internal Server Error - Falla de script o intérprete ausente
    InternalServerError = 500,
}

impl StatusCode {
    /// Convierte el código a su valor numérico
    ///
    /// # Ejemplo
    /// ```
    /// use cgi_server::http::StatusCode;
    /// assert_eq!(StatusCode::Ok.as_u16(), 200);
    /// ```
    pub fn as_u16(&self) -> u16 {
        *self as u16
    }

    /// Construye el enum desde un valor numérico conocido
    pub fn from_u16(code: u16) -> Option<Self> {
        match code {
            200 => Some(StatusCode::Ok),
            302 => Some(StatusCode::Found),
            400 => Some(StatusCode::BadRequest),
            404 => Some(StatusCode::NotFound),
            500 => Some(StatusCode::InternalServerError),
            _ => None,
        }
    }

    /// Retorna el texto de razón (reason phrase) asociado al código
    pub fn reason_phrase(&self) -> &'static str {
        match self {
            StatusCode::Ok => "OK",
            StatusCode::Found => "Found",
            StatusCode::BadRequest => "Bad Request",
            StatusCode::NotFound => "Not Found",
            StatusCode::InternalServerError => "Internal Server Error",
        }
    }
}

/// Texto de razón para un código numérico arbitrario
///
/// Los códigos que un script puede inventar y que no están en la tabla se
/// envían con reason phrase vacío, igual que hacen los servidores simples.
pub fn reason_phrase(code: u16) -> &'static str {
    match StatusCode::from_u16(code) {
        Some(status) => status.reason_phrase(),
        None => match code {
            201 => "Created",
            204 => "No Content",
            301 => "Moved Permanently",
            403 => "Forbidden",
            405 => "Method Not Allowed",
            503 => "Service Unavailable",
            _ => "",
        },
    }
}

impl std::fmt::Display for StatusCode {
    /// Formatea el código de estado para mostrarlo
    ///
    /// Formato: "200 OK"
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.as_u16(), self.reason_phrase())
    }
}
