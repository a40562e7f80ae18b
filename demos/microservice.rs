//! A tiny socket microservice: a server task parses each request with
//! httpsuite and answers it, a client task sends one request and parses the
//! reply.
//!
//! Run with `RUST_LOG=debug cargo run --example microservice`.

use std::net::SocketAddr;

use httpsuite::http::StatusCode;
use httpsuite::{Message, Request, Response};
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Read buffer size; every demo message fits in one read.
const BUF_SIZE: usize = 4096;

fn route(request: &Request) -> Response {
    let response = Response::with_status("HTTP/1.1", StatusCode::Ok);
    if request.target() == "/" {
        response.with_body("Homepage of the microservice.")
    } else if request.target() == "/data" {
        response.with_body("You are accessing the /data directory of this microservice.")
    } else {
        Response::with_status("HTTP/1.1", StatusCode::NotFound)
    }
}

async fn serve_one(listener: TcpListener) -> Result<(), BoxError> {
    let (mut stream, peer) = listener.accept().await?;
    info!(%peer, "connection accepted");

    let mut buf = vec![0u8; BUF_SIZE];
    let n = stream.read(&mut buf).await?;

    let response = match Request::parse(&buf[..n]) {
        Ok(request) => {
            info!("received\n{request}");
            route(&request)
        }
        Err(e) => {
            warn!(error = %e, "bad request");
            Response::with_status("HTTP/1.1", StatusCode::BadRequest).with_body(e.to_string())
        }
    };

    let content_length = response.body().len();
    let response = response.with_header("Content-Length", content_length);
    info!("replying\n{response}");
    stream.write_all(&response.to_bytes()).await?;
    stream.shutdown().await?;
    Ok(())
}

async fn fetch(addr: SocketAddr, target: &str) -> Result<Vec<u8>, BoxError> {
    let mut stream = TcpStream::connect(addr).await?;
    let request = Request::new("GET", target, "HTTP/1.1").with_header("Host", addr.to_string());
    stream.write_all(&request.to_bytes()).await?;

    let mut raw = Vec::with_capacity(BUF_SIZE);
    stream.read_to_end(&mut raw).await?;
    Ok(raw)
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    for target in ["/", "/data", "/missing"] {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let server = tokio::spawn(async move {
            if let Err(e) = serve_one(listener).await {
                warn!(error = %e, "server failed");
            }
        });

        let raw = fetch(addr, target).await?;
        // `404 Not Found` has a four-token status line and is rejected here.
        match Response::parse(&raw) {
            Ok(response) => info!(
                path = target,
                status = %response.status(),
                body = %response.body(),
                "client parsed response"
            ),
            Err(e) => warn!(
                path = target,
                error = %e,
                raw = %String::from_utf8_lossy(&raw),
                "client could not parse response"
            ),
        }
        server.await?;
    }

    Ok(())
}
