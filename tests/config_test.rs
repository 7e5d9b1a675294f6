//! Building routers from route table files.

use std::path::Path;

use route_trie::config::{load_config, parse_config};
use route_trie::{handler_fn, Outcome, RouteError, Router};

mod common;

use common::{lookup, params};

#[test]
fn test_sample_route_table() {
    let path = Path::new(env!("CARGO_MANIFEST_DIR")).join("routes.toml");
    let config = load_config(&path).unwrap();
    let router = Router::from_config(&config, |_| Some(handler_fn(|_| Ok(())))).unwrap();

    assert_eq!(router.routes().len(), config.routes.len());
    assert_eq!(router.max_params(), 2);

    let ctx = lookup(&router, "GET", "/users/42/posts/7");
    assert_eq!(ctx.path(), Some("/users/:id/posts/:post"));
    assert_eq!(
        params(&ctx),
        vec![("id".into(), "42".into()), ("post".into(), "7".into())]
    );

    let ctx = lookup(&router, "GET", "/users/new");
    assert_eq!(ctx.path(), Some("/users/new"));

    let ctx = lookup(&router, "DELETE", "/users");
    assert_eq!(ctx.outcome(), Outcome::MethodNotAllowed);
}

#[test]
fn test_template_errors_surface_from_config() {
    let config = parse_config(
        r#"
        [[routes]]
        method = "GET"
        path = "/users/:id"
        handler = "a"

        [[routes]]
        method = "PUT"
        path = "/users/:name"
        handler = "b"
        "#,
    )
    .unwrap();

    let err = Router::from_config(&config, |_| Some(handler_fn(|_| Ok(())))).unwrap_err();
    assert!(matches!(err, RouteError::ParamConflict { .. }));
}
