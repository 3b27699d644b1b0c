//! Web server command.

use console::style;

use crate::config::Settings;

/// Start the web server.
pub async fn cmd_serve(settings: &Settings, bind: &str) -> anyhow::Result<()> {
    let (host, port) = parse_bind_address(bind)?;

    // Confirm the database is reachable before binding; the server itself
    // degrades gracefully per request if it disappears later.
    match settings.repository().summary_stats() {
        Ok(_) => {
            println!(
                "{} Database ready: {}",
                style("✓").green(),
                settings.database.display()
            );
        }
        Err(e) => {
            eprintln!(
                "{} Database check failed for {}: {}",
                style("!").yellow(),
                settings.database.display(),
                e
            );
        }
    }

    println!(
        "{} Starting VaxPortal server at http://{}:{}",
        style("→").cyan(),
        host,
        port
    );
    println!("  Press Ctrl+C to stop");

    crate::server::serve(settings, &host, port).await
}

/// Parse a bind address that can be:
/// - Just a port: "3030" -> 127.0.0.1:3030
/// - Just a host: "0.0.0.0" -> 0.0.0.0:3030
/// - Host and port: "0.0.0.0:8080"
fn parse_bind_address(bind: &str) -> anyhow::Result<(String, u16)> {
    const DEFAULT_HOST: &str = "127.0.0.1";
    const DEFAULT_PORT: u16 = 3030;

    let bind = bind.trim();
    if bind.is_empty() {
        return Ok((DEFAULT_HOST.to_string(), DEFAULT_PORT));
    }

    if let Some((host, port)) = bind.rsplit_once(':') {
        let port: u16 = port
            .parse()
            .map_err(|_| anyhow::anyhow!("invalid port in bind address: {}", bind))?;
        let host = if host.is_empty() { DEFAULT_HOST } else { host };
        return Ok((host.to_string(), port));
    }

    if let Ok(port) = bind.parse::<u16>() {
        return Ok((DEFAULT_HOST.to_string(), port));
    }

    Ok((bind.to_string(), DEFAULT_PORT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bind_address() {
        assert_eq!(
            parse_bind_address("3030").unwrap(),
            ("127.0.0.1".to_string(), 3030)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0").unwrap(),
            ("0.0.0.0".to_string(), 3030)
        );
        assert_eq!(
            parse_bind_address("0.0.0.0:8080").unwrap(),
            ("0.0.0.0".to_string(), 8080)
        );
        assert_eq!(
            parse_bind_address(":9000").unwrap(),
            ("127.0.0.1".to_string(), 9000)
        );
        assert!(parse_bind_address("localhost:http").is_err());
    }
}
