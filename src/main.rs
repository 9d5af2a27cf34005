use anyhow::Context;
use shop_the_look_rust::config::ShopConfig;
use shop_the_look_rust::look::AppState;
use shop_the_look_rust::router::create_app_router;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("shop_the_look_rust=info,tower_http=info")),
        )
        .init();

    let config = ShopConfig::from_env().context("loading configuration")?;
    let addr = config.bind_addr;

    // Fails fast on an invalid catalog
    let state = Arc::new(AppState::new(config).context("building application state")?);

    let app = create_app_router(state);

    info!("Server running on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {addr}"))?;
    axum::serve(listener, app).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use shop_the_look_rust::config::ShopConfig;
    use shop_the_look_rust::look::AppState;
    use shop_the_look_rust::mcp::handlers::handle_tool_call;
    use shop_the_look_rust::mcp::models::{CLOSE_TOOL_NAME, SHOP_TOOL_NAME, TOGGLE_TOOL_NAME};
    use std::sync::Arc;
    use std::time::Duration;

    #[tokio::test]
    async fn test_tool_calls_share_session_state() {
        let state = AppState::new(ShopConfig {
            auto_advance: None,
            ..ShopConfig::default()
        })
        .expect("state");

        let opened = handle_tool_call(&state, SHOP_TOOL_NAME, json!({})).expect("open widget");
        let session_id = opened["structuredContent"]["sessionId"]
            .as_str()
            .unwrap()
            .to_string();

        let args = json!({ "sessionId": session_id, "itemId": "boy-3" });
        handle_tool_call(&state, TOGGLE_TOOL_NAME, args).expect("toggle");

        let view = state.view(&session_id).unwrap();
        assert_eq!(view.summary.selected_count, 2, "one item deselected");
        assert_eq!(view.summary.discount_percent, 5);
    }

    #[tokio::test(start_paused = true)]
    async fn test_close_tool_drops_session_and_timer() {
        let state = AppState::new(ShopConfig::default()).expect("state");

        let opened = handle_tool_call(&state, SHOP_TOOL_NAME, json!({})).expect("open widget");
        let session_id = opened["structuredContent"]["sessionId"]
            .as_str()
            .unwrap()
            .to_string();
        // the auto-advance task holds the only weak handle on the session map
        assert_eq!(Arc::weak_count(&state.sessions), 1);

        let closed = handle_tool_call(&state, CLOSE_TOOL_NAME, json!({ "sessionId": session_id }))
            .expect("close widget");
        assert_eq!(closed["structuredContent"]["closed"], true);

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(state.sessions.is_empty());
        assert_eq!(Arc::weak_count(&state.sessions), 0, "timer task is gone");

        let again = handle_tool_call(&state, CLOSE_TOOL_NAME, json!({ "sessionId": session_id }));
        assert!(again.unwrap_err().contains("Session not found"));
    }

    #[test]
    fn test_rpc_envelopes() {
        use shop_the_look_rust::mcp::helpers::{rpc_error, rpc_success};
        let success = rpc_success(json!(1), json!("ok"));
        assert_eq!(success["result"], "ok");
        assert_eq!(success["id"], 1);

        let error = rpc_error(json!(2), -1, "fail");
        assert_eq!(error["error"]["message"], "fail");
        assert_eq!(error["id"], 2);
    }
}
