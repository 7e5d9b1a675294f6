//! Concurrent lookups over one shared tree.

use std::sync::Arc;
use std::thread;

use route_trie::{Outcome, Router, SharedRouter};

mod common;

use common::ok;

fn build() -> Router {
    let mut router = Router::new();
    router.get("/users/:id", ok()).unwrap();
    router.get("/users/:id/posts/:post", ok()).unwrap();
    router.get("/static/*", ok()).unwrap();
    router.post("/users", ok()).unwrap();
    router
}

#[test]
fn test_parallel_readers_see_consistent_results() {
    let router = build();

    thread::scope(|s| {
        for t in 0..8 {
            let router = &router;
            s.spawn(move || {
                let mut ctx = router.new_context();
                for i in 0..500 {
                    let path = format!("/users/{t}/posts/{i}");
                    router.find("GET", &path, &mut ctx);
                    assert_eq!(ctx.outcome(), Outcome::Matched);
                    assert_eq!(ctx.param("id"), Some(t.to_string().as_str()));
                    assert_eq!(ctx.param("post"), Some(i.to_string().as_str()));

                    router.find("GET", "/users", &mut ctx);
                    assert_eq!(ctx.outcome(), Outcome::MethodNotAllowed);
                }
            });
        }
    });
}

#[test]
fn test_readers_during_snapshot_updates() {
    let shared = Arc::new(SharedRouter::new(build()));

    thread::scope(|s| {
        for _ in 0..4 {
            let shared = Arc::clone(&shared);
            s.spawn(move || {
                let mut ctx = route_trie::Context::default();
                for _ in 0..500 {
                    shared.find("GET", "/users/1", &mut ctx);
                    assert_eq!(ctx.outcome(), Outcome::Matched);
                }
            });
        }

        let shared = Arc::clone(&shared);
        s.spawn(move || {
            for i in 0..50 {
                shared
                    .update(|router| router.get(&format!("/extra/{i}/:x"), ok()))
                    .unwrap();
            }
        });
    });

    let router = shared.load();
    assert_eq!(router.routes().len(), 4 + 50);
}
