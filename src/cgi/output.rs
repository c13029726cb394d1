//! # Parsing de la Salida CGI
//! src/cgi/output.rs
//!
//! Separa la salida cruda de un script en headers y cuerpo, extrayendo
//! el pseudo-header `Status:`.
//!
//! Comportamiento fijado por pruebas: si el script nunca emite la línea
//! en blanco que termina los headers, TODO se consume como headers y el
//! cuerpo queda vacío.

use std::collections::HashMap;

/// Resultado de parsear la salida de un script
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedOutput {
    /// Código fijado por `Status:`, si el script emitió uno válido
    pub status: Option<u16>,

    /// Headers del script; claves únicas, un duplicado sobrescribe
    pub headers: HashMap<String, String>,

    /// Cuerpo: concatenación de las líneas posteriores a la línea en blanco
    pub body: String,
}

/// Parsea las líneas capturadas de un script CGI
///
/// Mientras se está "en headers", una línea en blanco (tras recortar)
/// cierra el bloque; lo que sigue se concatena tal cual al cuerpo. Antes
/// de eso, cada línea no vacía con ":" se parte en clave/valor
/// recortados. `Status` (insensible a caso) fija el código de respuesta
/// y nunca se guarda como header. `Content-Type` se normaliza a esa
/// capitalización exacta; el resto de claves conservan la del script.
pub fn parse_cgi_output(lines: &[String]) -> ParsedOutput {
    let mut status = None;
    let mut headers = HashMap::new();
    let mut body = String::new();
    let mut in_header = true;

    for line in lines {
        if in_header {
            let trimmed = line.trim();

            if trimmed.is_empty() {
                // Fin de los headers
                in_header = false;
                continue;
            }

            if let Some((key, value)) = trimmed.split_once(':') {
                let key = key.trim();
                let value = value.trim();

                if key.eq_ignore_ascii_case("status") {
                    // Solo el primer token numérico; "302 Found" vale 302
                    if let Some(code) = value
                        .split_whitespace()
                        .next()
                        .and_then(|token| token.parse::<u16>().ok())
                    {
                        status = Some(code);
                    }
                } else {
                    let key = if key.eq_ignore_ascii_case("content-type") {
                        "Content-Type".to_string()
                    } else {
                        key.to_string()
                    };
                    headers.insert(key, value.to_string());
                }
            }
            // Una línea de header sin ":" se ignora
        } else {
            body.push_str(line);
        }
    }

    ParsedOutput {
        status,
        headers,
        body,
    }
}
