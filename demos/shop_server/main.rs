//! Shop Server Example
//!
//! Runs the order desk over a CSV table.
//!
//! ```text
//! cargo run --example shop_server -- demos/shop_server/shop.yaml
//! ```
//!
//! Without an argument the default configuration is used, which keeps the
//! table in `./orders.csv`.

use anyhow::Result;
use order_desk::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = match std::env::args().nth(1) {
        Some(path) => AppConfig::from_yaml_file(&path)?,
        None => AppConfig::default(),
    };
    let addr = config.bind_address.clone();

    println!("🚀 {} order desk", config.shop_name);
    println!("📄 Table: {}", config.table_path.display());
    println!("\n🌐 Server running on http://{}", addr);
    println!("\n📚 Routes:");
    println!("    GET    /                         - Shop name and view counts");
    println!("    POST   /orders                   - Take a new order");
    println!("    GET    /orders/{{id}}              - Get one order");
    println!("    GET    /orders/search?by=&q=     - Search by name, mobile or date");
    println!("    GET    /views/{{view}}             - pending | ready-eligible | ready");
    println!("    PUT    /orders/{{id}}/status       - Set any status");
    println!("    POST   /orders/{{id}}/place        - Pending → Order Placed");
    println!("    POST   /orders/{{id}}/ready        - Order Placed / Sent for Fitting → Ready");
    println!("    POST   /orders/{{id}}/deliver      - Ready → Delivered");

    ServerBuilder::new().with_config(config).serve(&addr).await
}
