use handler_resolver::config::{Config, DEFAULT_CONFIG_PATH};
use handler_resolver::{logger, FactoryRegistry, HandlerResolver, HandlerSource, InvocationContext};
use serde_json::{json, Value};

const USAGE: &str = "usage: handler-resolver <handler-id> [event-json]";

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let mut args = std::env::args().skip(1);
    let Some(handler_id) = args.next() else {
        eprintln!("{USAGE}");
        return Err(USAGE.into());
    };
    let event: Value = match args.next() {
        Some(raw) => serde_json::from_str(&raw)?,
        None => json!({}),
    };

    let config_path =
        std::env::var("RESOLVER_CONFIG").unwrap_or_else(|_| DEFAULT_CONFIG_PATH.to_string());
    let cfg = Config::load_from(&config_path)?;
    logger::init(&cfg.logging)?;
    logger::log_resolver_ready(&cfg);

    let cwd = std::env::current_dir()?;
    let resolver = HandlerResolver::from_config(&cfg, FactoryRegistry::with_builtins(), &cwd);

    let handler = match resolver.get(&handler_id) {
        Ok(handler) => handler,
        Err(e) => {
            logger::log_error(&format!("Failed to resolve `{handler_id}`: {e}"));
            return Err(e.into());
        }
    };

    let request_id = format!("local-{}", chrono::Utc::now().timestamp_millis());
    let context = InvocationContext::new(request_id, handler_id.as_str());
    let output = handler.handle(event, &context)?;

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
