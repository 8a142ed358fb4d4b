//! The "Hello router" sample: a single route greeting alphabetic names, and a default responder
//! for everything else.
//!
//! Paths to dispatch are taken from the command line, e.g.
//! `cargo run -p hello_router -- /hello/World /hello/123 /other`.

use log::info;
use signpost::{build_router, HandlerError, HandlingOutcome, RouteError, RouteParams, Router};

/// Greets the captured name. The `alpha` constraint has already ensured it is made of letters.
pub fn say_hi(params: RouteParams) -> HandlingOutcome {
    println!("Hi {}!", &params["name"]);
    HandlingOutcome::Handled
}

/// Invoked for every request no route handled.
pub fn say_hello(_: RouteParams) -> HandlingOutcome {
    println!("Hello World!");
    HandlingOutcome::Handled
}

/// Creates the `Router` used by this sample.
pub fn router() -> Result<Router, RouteError> {
    build_router(|route| {
        route
            .route("hello/{name:alpha}", say_hi)?
            .default_responder(say_hello);
        Ok(())
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let router = router()?;

    let mut paths: Vec<String> = std::env::args().skip(1).collect();
    if paths.is_empty() {
        paths = vec!["/hello/World".into(), "/hello/123".into(), "/other".into()];
    }

    for path in &paths {
        info!("dispatching {}", path);
        let outcome = router
            .dispatch_encoded(None, path)
            .await
            .map_err(HandlerError::into_cause)?;
        info!("{} -> {:?}", path, outcome);
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn every_path_is_handled() {
        let router = router().unwrap();

        for path in &["/hello/World", "/hello/123", "/other", "/"] {
            let outcome = router.dispatch(path).await.unwrap();
            assert_eq!(outcome, HandlingOutcome::Handled);
        }
    }

    #[test]
    fn greeting_route_requires_letters() {
        let router = router().unwrap();
        let table = router.table();

        assert!(table.match_path("hello/World").is_some());
        assert!(table.match_path("hello/123").is_none());
    }
}
