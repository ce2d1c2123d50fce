use tokio::net::TcpListener;

#[tokio::main]
async fn main() -> Result<(), std::io::Error> {
    probe_core::logging::init();

    let raw = std::env::var("PORT").unwrap_or_else(|_| "8000".to_string());
    let Some(port) = mock_server::parse_port(&raw) else {
        eprintln!("Usage: PORT=<port> mock-server");
        eprintln!(
            "PORT must be in range {} to {} and represents the port the server will run on.",
            mock_server::PORT_MIN,
            mock_server::PORT_MAX
        );
        std::process::exit(1);
    };

    let addr = format!("0.0.0.0:{port}");
    let listener = TcpListener::bind(&addr).await?;
    tracing::info!(%addr, "listening");
    mock_server::run(listener).await
}
