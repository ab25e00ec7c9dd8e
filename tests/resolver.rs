use handler_resolver::app::ServiceContainer;
use handler_resolver::bootstrap::BootstrapContext;
use handler_resolver::handler::{DefinitionHandler, HandlerDefinition};
use handler_resolver::{
    Application, BootstrapError, Config, FactoryRegistry, HandlerResolver, HandlerSource,
    InvocationContext, ResolveError, SharedHandler,
};
use serde_json::{json, Value};
use std::path::Path;
use std::sync::Arc;

const MANIFEST: &str = r#"
[application]
factory = "manifest"

[services."App\\Handler"]
type = "static"
response = { from = "container" }
"#;

fn config(install_dir: &Path, depth: usize) -> Config {
    let mut cfg = Config::load_from("/nonexistent/resolver").unwrap();
    cfg.bootstrap.install_dir = Some(install_dir.to_path_buf());
    cfg.bootstrap.install_depth = depth;
    cfg
}

fn write(root: &Path, relative: &str, content: &str) {
    let path = root.join(relative);
    std::fs::create_dir_all(path.parent().unwrap()).unwrap();
    std::fs::write(path, content).unwrap();
}

fn invoke(handler: &SharedHandler, event: Value) -> Value {
    handler
        .handle(event, &InvocationContext::new("req-1", "test"))
        .unwrap()
}

#[test]
fn test_end_to_end_lookup() {
    let app = tempfile::tempdir().unwrap();
    write(app.path(), "handler.php", "type = \"echo\"\n");
    write(app.path(), "bootstrap/app.toml", MANIFEST);

    let cfg = config(app.path(), 0);
    let resolver = HandlerResolver::from_config(&cfg, FactoryRegistry::with_builtins(), app.path());

    assert!(resolver.has("handler.php").unwrap());
    assert!(!resolver.is_bootstrapped());

    let handler = resolver.get("handler.php").unwrap();
    assert_eq!(invoke(&handler, json!({ "n": 1 }))["event"]["n"], 1);

    assert!(resolver.has("App\\Handler").unwrap());
    assert!(resolver.is_bootstrapped());
    let handler = resolver.get("App\\Handler").unwrap();
    assert_eq!(invoke(&handler, json!({})), json!({ "from": "container" }));

    assert!(!resolver.has("Unknown").unwrap());
    assert!(matches!(
        resolver.get("Unknown"),
        Err(ResolveError::NotFound { .. })
    ));

    let warm = resolver.get("warmup").unwrap();
    assert_eq!(invoke(&warm, json!({ "warmer": true }))["status"], "warm");
}

#[test]
fn test_fixed_manifest_recovers_same_resolver() {
    let app = tempfile::tempdir().unwrap();
    write(
        app.path(),
        "bootstrap/app.toml",
        "[application]\nfactory = \"laravel\"\n",
    );

    let cfg = config(app.path(), 0);
    let resolver = HandlerResolver::from_config(&cfg, FactoryRegistry::with_builtins(), app.path());

    let expected_path = app.path().join("bootstrap/app.toml").canonicalize().unwrap();
    match resolver.get("App\\Handler") {
        Err(ResolveError::Bootstrap(BootstrapError::UnknownFactory { path, actual, .. })) => {
            assert_eq!(path, expected_path);
            assert_eq!(actual, "laravel");
        }
        other => panic!("expected UnknownFactory, got {other:?}"),
    }
    assert!(!resolver.is_bootstrapped());

    write(app.path(), "bootstrap/app.toml", MANIFEST);
    assert!(resolver.get("App\\Handler").is_ok());
    assert!(resolver.is_bootstrapped());
}

#[test]
fn test_fallback_from_install_dir() {
    let app = tempfile::tempdir().unwrap();
    let elsewhere = tempfile::tempdir().unwrap();
    write(app.path(), "bootstrap/app.toml", MANIFEST);
    let install_dir = app.path().join("vendor/acme/handler-resolver");
    std::fs::create_dir_all(&install_dir).unwrap();

    let cfg = config(&install_dir, 3);
    let resolver =
        HandlerResolver::from_config(&cfg, FactoryRegistry::with_builtins(), elsewhere.path());

    assert!(resolver.has("App\\Handler").unwrap());
}

#[test]
fn test_missing_bootstrap_names_primary_path() {
    let app = tempfile::tempdir().unwrap();
    write(app.path(), "handler.php", "type = \"echo\"\n");

    let cfg = config(app.path(), 0);
    let resolver = HandlerResolver::from_config(&cfg, FactoryRegistry::with_builtins(), app.path());

    assert!(resolver.has("handler.php").unwrap());
    match resolver.has("App\\Handler") {
        Err(ResolveError::BootstrapNotFound { attempted }) => {
            assert_eq!(attempted, app.path().join("bootstrap/app.toml"));
        }
        other => panic!("expected BootstrapNotFound, got {other:?}"),
    }
}

#[test]
fn test_host_factory_sees_booted_configuration() {
    let app = tempfile::tempdir().unwrap();
    write(
        app.path(),
        "bootstrap/app.toml",
        "[application]\nfactory = \"orders\"\n\n[config]\nname = \"from-manifest\"\n",
    );
    write(app.path(), "config/app.toml", "name = \"orders-service\"\n");

    let mut registry = FactoryRegistry::with_builtins();
    registry.register("orders", |ctx: &BootstrapContext<'_>| {
        let mut container = ServiceContainer::new(ctx.base_path.clone())
            .with_settings(ctx.manifest.config.clone());
        container.bind("App\\Greeter", |c: &ServiceContainer| {
            let name = c
                .config()
                .get_string("name")
                .unwrap_or_else(|_| "unconfigured".to_string());
            Ok(Arc::new(DefinitionHandler::new(HandlerDefinition::Static {
                response: json!({ "service": name }),
            })) as SharedHandler)
        });
        Ok(Box::new(container) as Box<dyn Application>)
    });

    let cfg = config(app.path(), 0);
    let resolver = HandlerResolver::from_config(&cfg, registry, app.path());

    let handler = resolver.get("App\\Greeter").unwrap();
    assert_eq!(invoke(&handler, json!({}))["service"], "orders-service");
}
