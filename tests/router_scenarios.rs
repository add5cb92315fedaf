//! End-to-end routing scenarios over a real listener.

use std::sync::{Arc, Mutex};

use reqwest::Method;

use gor::http::{Handler, PathParamsExt, Request};
use gor::{Middleware, RouteError, Router};

mod common;

type Trace = Arc<Mutex<Vec<String>>>;

fn text(body: &'static str) -> Handler {
    Handler::new(move |_req: Request| async move { body })
}

/// Records which middleware saw the request.
fn mark(trace: &Trace, name: &'static str) -> Middleware {
    let trace = trace.clone();
    Middleware::from_fn(move |req: Request, next: Handler| {
        trace.lock().unwrap().push(name.to_string());
        async move { next.run(req).await }
    })
}

fn take(trace: &Trace) -> Vec<String> {
    std::mem::take(&mut *trace.lock().unwrap())
}

#[tokio::test]
async fn test_hello_route() {
    let mut router = Router::new();
    router.get("/hello", text("hi"), &[]).unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let res = client.get(server.url("/hello")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "hi");

    let res = client.post(server.url("/hello")).send().await.unwrap();
    assert_eq!(res.status(), 405);
    assert_eq!(res.headers()["allow"], "GET, HEAD");

    let res = client.get(server.url("/unknown")).send().await.unwrap();
    assert_eq!(res.status(), 404);

    server.stop().await;
}

#[tokio::test]
async fn test_body_wrapping_order() {
    let prefix = Middleware::from_fn(|req: Request, next: Handler| async move {
        let body = axum::body::to_bytes(next.run(req).await.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        format!("[A]{}", String::from_utf8_lossy(&body))
    });
    let suffix = Middleware::from_fn(|req: Request, next: Handler| async move {
        let body = axum::body::to_bytes(next.run(req).await.into_body(), usize::MAX)
            .await
            .unwrap_or_default();
        format!("{}[B]", String::from_utf8_lossy(&body))
    });

    let mut router = Router::new();
    router.use_middleware([prefix]);
    router.use_middleware([suffix]);
    router.get("/m", text("core"), &[]).unwrap();
    let server = common::start_server(router).await;

    let res = common::client().get(server.url("/m")).send().await.unwrap();
    assert_eq!(res.text().await.unwrap(), "[A]core[B]");

    server.stop().await;
}

#[tokio::test]
async fn test_use_between_registrations() {
    let trace = Trace::default();
    let mut router = Router::new();
    router.use_middleware([mark(&trace, "A")]);
    router.get("/r1", text("r1"), &[]).unwrap();
    router.use_middleware([mark(&trace, "B")]);
    router.get("/r2", text("r2"), &[]).unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    client.get(server.url("/r1")).send().await.unwrap();
    assert_eq!(take(&trace), ["A"]);

    client.get(server.url("/r2")).send().await.unwrap();
    assert_eq!(take(&trace), ["A", "B"]);

    server.stop().await;
}

#[tokio::test]
async fn test_group_and_sibling_isolation() {
    let trace = Trace::default();
    let mut router = Router::new();
    router.use_middleware([mark(&trace, "A")]);
    router
        .group(|g| {
            g.use_middleware([mark(&trace, "B")]);
            g.get("/g1", text("g1"), &[])
        })
        .unwrap();
    router
        .group(|g| {
            g.use_middleware([mark(&trace, "C")]);
            g.get("/g2", text("g2"), &[])
        })
        .unwrap();
    router.get("/top", text("top"), &[]).unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    client.get(server.url("/g1")).send().await.unwrap();
    assert_eq!(take(&trace), ["A", "B"]);

    client.get(server.url("/g2")).send().await.unwrap();
    assert_eq!(take(&trace), ["A", "C"]);

    client.get(server.url("/top")).send().await.unwrap();
    assert_eq!(take(&trace), ["A"]);

    server.stop().await;
}

#[test]
fn test_duplicate_registration() {
    let mut router = Router::new();
    router.get("/dup", text("first"), &[]).unwrap();

    let err = router.get("/dup", text("second"), &[]).unwrap_err();
    assert!(matches!(err, RouteError::DuplicatePattern { .. }));
    assert_eq!(err.to_string(), "pattern `GET /dup` is already registered");
}

#[tokio::test]
async fn test_custom_method_route() {
    let mut router = Router::new();
    router.custom("LINK", "/l", text("linked"), &[]).unwrap();
    let server = common::start_server(router).await;
    let client = common::client();

    let link = Method::from_bytes(b"LINK").unwrap();
    let res = client.request(link, server.url("/l")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "linked");

    let res = client.get(server.url("/l")).send().await.unwrap();
    assert_eq!(res.status(), 405);

    server.stop().await;
}

#[tokio::test]
async fn test_path_params_reach_handler_through_group() {
    let mut router = Router::new();
    router
        .group(|api| {
            api.get(
                "/api/users/{id}",
                Handler::new(|req: Request| async move {
                    format!("user={}", req.path_param("id").unwrap_or("?"))
                }),
                &[],
            )
        })
        .unwrap();
    let server = common::start_server(router).await;

    let res = common::client()
        .get(server.url("/api/users/17"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.text().await.unwrap(), "user=17");

    server.stop().await;
}

#[tokio::test]
async fn test_head_served_by_get_route() {
    let mut router = Router::new();
    router.get("/page", text("page body"), &[]).unwrap();
    let server = common::start_server(router).await;

    let res = common::client().head(server.url("/page")).send().await.unwrap();
    assert_eq!(res.status(), 200);
    assert_eq!(res.text().await.unwrap(), "");

    server.stop().await;
}
