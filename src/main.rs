//! # Punto de Entrada del Servidor CGI
//!
//! Parsea la configuración, la valida y arranca el loop de aceptación.

use cgi_server::config::{Cli, ServerConfig};
use cgi_server::server::Server;
use clap::Parser;
use std::process;

fn main() {
    println!("🌐 Servidor HTTP/1.0 con soporte CGI");
    println!("=====================================\n");

    let cli = Cli::parse();

    let config = match ServerConfig::from_cli(cli) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("❌ Error cargando la configuración: {}", e);
            process::exit(1);
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("❌ Configuración inválida: {}", e);
        process::exit(1);
    }

    config.print_summary();

    let address = config.address();
    let mut server = Server::new(config);

    if let Err(e) = server.bind() {
        eprintln!("❌ No se pudo enlazar {}: {}", address, e);
        process::exit(1);
    }

    println!("🚀 Listening on http://{}/", address);
    println!("   Presiona Ctrl+C para detener\n");

    if let Err(e) = server.run() {
        eprintln!("❌ Error fatal del servidor: {}", e);
        process::exit(1);
    }
}
