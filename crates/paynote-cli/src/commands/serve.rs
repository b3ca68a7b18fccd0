//! Server command implementation

use anyhow::Result;

use super::Sources;

pub async fn cmd_serve(sources: &Sources, host: &str, port: u16, no_auth: bool) -> Result<()> {
    let extractor = sources.load_extractor()?;
    let taxonomy_source = sources.taxonomy_source();

    println!("🚀 Starting Paynote web server...");
    println!("   Taxonomy: {}", taxonomy_source);
    println!("   Listening: http://{}:{}", host, port);

    // Parse API keys from environment (comma-separated)
    let api_keys =
        paynote_server::parse_api_keys(&std::env::var("PAYNOTE_API_KEYS").unwrap_or_default());

    if no_auth {
        println!();
        println!("   ⚠️  Authentication DISABLED - do not expose to network!");
    } else if api_keys.is_empty() {
        println!("   🔒 Authentication: API key required, but PAYNOTE_API_KEYS is empty");
    } else {
        println!(
            "   🔑 API keys: {} configured (PAYNOTE_API_KEYS)",
            api_keys.len()
        );
    }
    println!();
    println!("   Press Ctrl+C to stop");

    let config = paynote_server::ServerConfig {
        require_auth: !no_auth,
        allowed_origins: vec![],
        api_keys,
    };

    paynote_server::serve_with_config(extractor, taxonomy_source, host, port, config).await?;

    Ok(())
}
