//! Minimal HTTP/1.1 endpoint for `POST /generate`.
//!
//! One thread per connection, one request per connection. Error bodies use
//! the `{"detail": "..."}` shape.

use std::io::{self, BufRead, BufReader, Read, Write};
use std::net::{TcpListener, TcpStream};
use std::sync::Arc;
use std::thread;
use std::time::Duration;

use serde::Serialize;

use crate::error::{Result, StarQrError};
use crate::output::Printer;
use crate::pipeline::{GenerateRequest, Generator};

/// Longest accepted request line or header line.
const MAX_LINE: usize = 8 * 1024;
/// How long a connection may stall between reads before it is dropped.
const READ_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Serialize)]
struct Detail<'a> {
    detail: &'a str,
}

/// What happened to one request, for logging.
#[derive(Debug)]
pub struct Exchange {
    pub method: String,
    pub path: String,
    pub status: u16,
    /// Internal failure behind a 4xx/5xx, never sent to the client.
    pub error: Option<StarQrError>,
}

/// Bind `bind` and serve requests until the process exits.
pub fn serve(bind: &str, generator: Generator, max_body: usize, printer: Printer) -> Result<()> {
    let listener = TcpListener::bind(bind).map_err(|e| StarQrError::Config {
        message: format!("Failed to bind {}: {}", bind, e),
        help: Some("Pick a free address with --bind".to_string()),
    })?;
    printer.status("Listening", &format!("on http://{}", listener.local_addr()?));

    let generator = Arc::new(generator);
    for stream in listener.incoming() {
        let stream = match stream {
            Ok(stream) => stream,
            Err(e) => {
                printer.warning("Dropped", &format!("connection: {}", e));
                continue;
            }
        };

        let generator = Arc::clone(&generator);
        thread::spawn(move || {
            handle_connection(stream, &generator, max_body, READ_TIMEOUT, printer)
        });
    }

    Ok(())
}

fn handle_connection(
    stream: TcpStream,
    generator: &Generator,
    max_body: usize,
    timeout: Duration,
    printer: Printer,
) {
    if let Err(e) = stream.set_read_timeout(Some(timeout)) {
        printer.warning("Dropped", &format!("connection: {}", e));
        return;
    }
    let mut writer = match stream.try_clone() {
        Ok(writer) => writer,
        Err(e) => {
            printer.warning("Dropped", &format!("connection: {}", e));
            return;
        }
    };

    match handle_request(BufReader::new(stream), &mut writer, generator, max_body) {
        Ok(exchange) => {
            let line = format!("{} {} {}", exchange.method, exchange.path, exchange.status);
            match &exchange.error {
                Some(e) if exchange.status >= 500 => printer.error("Failed", &format!("{} ({})", line, e)),
                Some(e) => printer.warning("Rejected", &format!("{} ({})", line, e)),
                None => printer.status("Served", &line),
            }
        }
        Err(e) => printer.warning("Dropped", &format!("connection: {}", e)),
    }
}

/// Read one request from `reader`, answer it on `writer`.
pub fn handle_request<R: BufRead, W: Write>(
    mut reader: R,
    writer: &mut W,
    generator: &Generator,
    max_body: usize,
) -> Result<Exchange> {
    let request_line = read_line(&mut reader)?;
    let mut parts = request_line.split_whitespace();
    let (method, target) = match (parts.next(), parts.next(), parts.next()) {
        (Some(method), Some(target), Some(version)) if version.starts_with("HTTP/") => {
            (method.to_string(), target.to_string())
        }
        _ => {
            let exchange = Exchange {
                method: String::new(),
                path: String::new(),
                status: 200,
                error: None,
            };
            return bad_request(writer, exchange, "Malformed request line");
        }
    };
    let path = target.split('?').next().unwrap_or_default().to_string();

    let mut content_length = Some(0usize);
    loop {
        let line = read_line(&mut reader)?;
        if line.is_empty() {
            break;
        }
        if let Some((name, value)) = line.split_once(':') {
            if name.trim().eq_ignore_ascii_case("content-length") {
                content_length = value.trim().parse().ok();
            }
        }
    }

    let mut exchange = Exchange {
        method,
        path,
        status: 200,
        error: None,
    };
    let Some(content_length) = content_length else {
        return bad_request(writer, exchange, "Invalid Content-Length");
    };

    match (exchange.method.as_str(), exchange.path.as_str()) {
        ("GET", "/health") => {
            write_json(writer, 200, &serde_json::json!({ "status": "ok" }))?;
        }
        ("POST", "/generate") => {
            if content_length > max_body {
                exchange.status = 413;
                write_detail(writer, 413, "Request body too large.")?;
                return Ok(exchange);
            }

            let mut body = vec![0; content_length];
            match reader.read_exact(&mut body) {
                Ok(()) => {}
                Err(e) if e.kind() == io::ErrorKind::UnexpectedEof => {
                    let message = "Request body shorter than Content-Length";
                    return bad_request(writer, exchange, message);
                }
                Err(e) => return Err(e.into()),
            }

            let outcome = serde_json::from_slice::<GenerateRequest>(&body)
                .map_err(|e| StarQrError::Http {
                    message: format!("Invalid request body: {}", e),
                })
                .and_then(|request| generator.generate(&request));

            match outcome {
                Ok(response) => write_json(writer, 200, &response)?,
                Err(e) => {
                    exchange.status = if e.is_client_error() { 400 } else { 500 };
                    write_detail(writer, exchange.status, &e.public_message())?;
                    exchange.error = Some(e);
                }
            }
        }
        (_, "/generate") | (_, "/health") => {
            exchange.status = 405;
            write_detail(writer, 405, "Method Not Allowed")?;
        }
        _ => {
            exchange.status = 404;
            write_detail(writer, 404, "Not Found")?;
        }
    }

    Ok(exchange)
}

fn bad_request<W: Write>(
    writer: &mut W,
    mut exchange: Exchange,
    message: &str,
) -> Result<Exchange> {
    let err = StarQrError::Http {
        message: message.to_string(),
    };
    exchange.status = 400;
    write_detail(writer, 400, &err.public_message())?;
    exchange.error = Some(err);
    Ok(exchange)
}

/// Read a CRLF- or LF-terminated line without its terminator.
fn read_line<R: BufRead>(reader: &mut R) -> Result<String> {
    let mut buf = Vec::new();
    (&mut *reader).take(MAX_LINE as u64).read_until(b'\n', &mut buf)?;
    if !buf.ends_with(b"\n") {
        return Err(StarQrError::Http {
            message: "Truncated or oversized request header".to_string(),
        });
    }
    let line = String::from_utf8_lossy(&buf);
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

fn write_detail<W: Write>(writer: &mut W, status: u16, detail: &str) -> Result<()> {
    write_json(writer, status, &Detail { detail })
}

fn write_json<W: Write, T: Serialize>(writer: &mut W, status: u16, body: &T) -> Result<()> {
    let body = serde_json::to_string(body).map_err(|e| StarQrError::Http {
        message: format!("Failed to serialize response: {}", e),
    })?;

    write!(
        writer,
        "HTTP/1.1 {} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
        status,
        reason(status),
        body.len(),
        body
    )?;
    writer.flush()?;
    Ok(())
}

fn reason(status: u16) -> &'static str {
    match status {
        200 => "OK",
        400 => "Bad Request",
        404 => "Not Found",
        405 => "Method Not Allowed",
        413 => "Payload Too Large",
        _ => "Internal Server Error",
    }
}
