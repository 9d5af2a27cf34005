//! Shop the Look State Management
//!
//! This module manages the application state: the catalog, the mounted
//! widget sessions with their auto-advance timers, the bags that receive
//! bundles, and the widget template assets.

use super::{
    autoplay::AutoAdvance,
    catalog::LookCatalog,
    helpers::get_or_create_id,
    models::{BundleOrder, DragOutcome, WidgetView},
    widget::{ShopTheLook, WidgetOptions},
};
use crate::bag::{helpers::lines_from_bundle, helpers::merge_into_bag, models::BagLine};
use crate::config::ShopConfig;
use crate::error::{ShopError, ShopResult};
use dashmap::DashMap;
use std::{
    path::{Path, PathBuf},
    sync::Arc,
};
use tracing::{debug, info};

// =============================================================================
// Application State
// =============================================================================

/// Shared application state that can be safely passed between threads
pub type SharedState = Arc<AppState>;

/// Mounted widgets keyed by session id
pub type SessionMap = DashMap<String, WidgetSession>;

/// A mounted widget and its timer
pub struct WidgetSession {
    pub widget: ShopTheLook,
    autoplay: Option<AutoAdvance>,
}

impl WidgetSession {
    fn rearm(&self) {
        if let Some(timer) = &self.autoplay {
            timer.rearm();
        }
    }

    pub fn has_autoplay(&self) -> bool {
        self.autoplay.as_ref().is_some_and(|t| !t.is_finished())
    }
}

/// Core application state
pub struct AppState {
    /// Read-only look catalog shared by every session
    pub catalog: Arc<LookCatalog>,

    /// Mounted widgets. Each entry serializes its own mutations.
    pub sessions: Arc<SessionMap>,

    /// Bags keyed by bag_id
    pub bags: DashMap<String, Vec<BagLine>>,

    pub config: ShopConfig,

    /// Path to the directory containing HTML assets.
    pub assets_dir: PathBuf,
}

impl AppState {
    /// State over the built-in catalog
    pub fn new(config: ShopConfig) -> ShopResult<Self> {
        Self::with_catalog(config, LookCatalog::builtin())
    }

    pub fn with_catalog(config: ShopConfig, catalog: LookCatalog) -> ShopResult<Self> {
        if catalog.is_empty() {
            return Err(ShopError::EmptyCatalog);
        }

        let assets_dir = match &config.assets_dir {
            Some(dir) => dir.clone(),
            None => {
                let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
                Self::locate_assets_directory(&current_dir)
            }
        };
        info!(looks = catalog.len(), assets_dir = ?assets_dir, "shop the look state ready");

        Ok(Self {
            catalog: Arc::new(catalog),
            sessions: Arc::new(DashMap::new()),
            bags: DashMap::new(),
            config,
            assets_dir,
        })
    }

    fn widget_options(&self, small_screen: bool) -> WidgetOptions {
        WidgetOptions {
            thresholds: self.config.thresholds,
            currency: self.config.currency,
            style: self.config.style,
            indicator: self.config.indicator,
            small_screen,
        }
    }

    // -------------------------------------------------------------------------
    // Session lifecycle
    // -------------------------------------------------------------------------

    /// Mounts a new widget and starts its auto-advance timer
    pub fn mount(&self, small_screen: bool) -> ShopResult<WidgetView> {
        let session_id = get_or_create_id(None);
        let widget = ShopTheLook::new(self.catalog.clone(), self.widget_options(small_screen))?;
        let view = widget.view(&session_id);

        let autoplay = self.config.auto_advance.and_then(|period| {
            AutoAdvance::spawn(Arc::downgrade(&self.sessions), session_id.clone(), period)
        });
        self.sessions
            .insert(session_id.clone(), WidgetSession { widget, autoplay });

        info!(session_id = %session_id, small_screen, "widget mounted");
        Ok(view)
    }

    /// Tears a widget down; its timer is cancelled with it
    pub fn unmount(&self, session_id: &str) -> ShopResult<()> {
        if self.sessions.remove(session_id).is_none() {
            return Err(ShopError::SessionNotFound(session_id.to_string()));
        }
        info!(session_id, "widget unmounted");
        Ok(())
    }

    /// Runs `f` against a mounted session while holding its entry
    pub fn with_session<T>(
        &self,
        session_id: &str,
        f: impl FnOnce(&mut WidgetSession) -> T,
    ) -> ShopResult<T> {
        let mut session = self
            .sessions
            .get_mut(session_id)
            .ok_or_else(|| ShopError::SessionNotFound(session_id.to_string()))?;
        Ok(f(&mut session))
    }

    pub fn view(&self, session_id: &str) -> ShopResult<WidgetView> {
        self.with_session(session_id, |s| s.widget.view(session_id))
    }

    // -------------------------------------------------------------------------
    // Widget interactions
    // -------------------------------------------------------------------------

    pub fn toggle(&self, session_id: &str, item_id: &str) -> ShopResult<WidgetView> {
        self.with_session(session_id, |s| {
            if !s.widget.toggle(item_id) {
                debug!(session_id, item_id, "toggle ignored, item not in active look");
            }
            s.widget.view(session_id)
        })
    }

    /// Click on the stack: next look, timer restarts
    pub fn advance(&self, session_id: &str) -> ShopResult<WidgetView> {
        self.with_session(session_id, |s| {
            s.widget.advance();
            s.rearm();
            s.widget.view(session_id)
        })
    }

    pub fn retreat(&self, session_id: &str) -> ShopResult<WidgetView> {
        self.with_session(session_id, |s| {
            s.widget.retreat();
            s.rearm();
            s.widget.view(session_id)
        })
    }

    /// Hover/touch start (`inside`) or end
    pub fn pointer(&self, session_id: &str, inside: bool) -> ShopResult<WidgetView> {
        self.with_session(session_id, |s| {
            if inside {
                s.widget.pointer_enter();
            } else if s.widget.pointer_leave() {
                s.rearm();
            }
            s.widget.view(session_id)
        })
    }

    pub fn drag_start(&self, session_id: &str, card_index: usize) -> ShopResult<WidgetView> {
        self.with_session(session_id, |s| -> ShopResult<WidgetView> {
            s.widget.drag_start(card_index)?;
            Ok(s.widget.view(session_id))
        })?
    }

    pub fn drag_end(
        &self,
        session_id: &str,
        offset_x: f64,
        velocity_x: f64,
    ) -> ShopResult<(DragOutcome, WidgetView)> {
        self.with_session(session_id, |s| {
            let outcome = s.widget.drag_end(offset_x, velocity_x);
            s.rearm();
            debug!(session_id, ?outcome, offset_x, velocity_x, "drag released");
            (outcome, s.widget.view(session_id))
        })
    }

    // -------------------------------------------------------------------------
    // Bag collaborator
    // -------------------------------------------------------------------------

    /// Hands the current bundle to a bag, creating the bag when needed
    pub fn add_bundle(
        &self,
        session_id: &str,
        bag_id: Option<String>,
    ) -> ShopResult<(String, BundleOrder)> {
        let order = self.with_session(session_id, |s| s.widget.bundle())??;
        let bag_id = get_or_create_id(bag_id);

        let mut bag = self.bags.entry(bag_id.clone()).or_default();
        merge_into_bag(&mut bag, lines_from_bundle(&order));

        info!(
            bag_id = %bag_id,
            look_id = %order.look_id,
            items = order.summary.selected_count,
            final_total = order.summary.final_total,
            "bundle added to bag"
        );
        Ok((bag_id, order))
    }

    pub fn bag_lines(&self, bag_id: &str) -> Vec<BagLine> {
        self.bags
            .get(bag_id)
            .map(|lines| lines.clone())
            .unwrap_or_default()
    }

    // -------------------------------------------------------------------------
    // Assets
    // -------------------------------------------------------------------------

    /// Attempts to locate the assets directory using a multi-step strategy
    fn locate_assets_directory(current_dir: &Path) -> PathBuf {
        // 1. ./assets
        // 2. ../assets (if running from a subdir)
        // 3. Fallback to "assets" relative path

        if current_dir.join("assets").exists() {
            return current_dir.join("assets");
        }

        if let Some(parent) = current_dir.parent() {
            if parent.join("assets").exists() {
                return parent.join("assets");
            }
        }

        PathBuf::from("assets")
    }

    /// Reads shop-the-look.html or the latest hashed build of it
    pub async fn load_widget_html(&self) -> Result<String, axum::http::StatusCode> {
        let primary_html_path = self.assets_dir.join("shop-the-look.html");
        if primary_html_path.exists() {
            return tokio::fs::read_to_string(primary_html_path)
                .await
                .map_err(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR);
        }

        let fallback_path = self.find_fallback_html_file().await?;

        tokio::fs::read_to_string(fallback_path)
            .await
            .map_err(|_| axum::http::StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Finds e.g. shop-the-look-1a2b.html when the primary file is missing
    async fn find_fallback_html_file(&self) -> Result<PathBuf, axum::http::StatusCode> {
        let mut entries = tokio::fs::read_dir(&self.assets_dir)
            .await
            .map_err(|_| axum::http::StatusCode::NOT_FOUND)?;

        let mut fallbacks = Vec::new();
        while let Ok(Some(entry)) = entries.next_entry().await {
            let path = entry.path();
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                if name.starts_with("shop-the-look-") && name.ends_with(".html") {
                    fallbacks.push(path);
                }
            }
        }

        // lexicographically last is the latest build
        fallbacks.sort();
        fallbacks
            .last()
            .cloned()
            .ok_or(axum::http::StatusCode::NOT_FOUND)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::look::models::CarouselPhase;
    use std::time::Duration;

    fn manual_state() -> AppState {
        let config = ShopConfig {
            auto_advance: None,
            ..ShopConfig::default()
        };
        AppState::new(config).unwrap()
    }

    #[test]
    fn unknown_session_is_reported() {
        let state = manual_state();
        assert_eq!(
            state.view("missing"),
            Err(ShopError::SessionNotFound("missing".into()))
        );
        assert_eq!(
            state.unmount("missing"),
            Err(ShopError::SessionNotFound("missing".into()))
        );
    }

    #[test]
    fn bundle_lands_in_bag_and_aggregates() {
        let state = manual_state();
        let id = state.mount(false).unwrap().session_id;

        let (bag_id, order) = state.add_bundle(&id, None).unwrap();
        assert_eq!(order.items.len(), 3);
        state.add_bundle(&id, Some(bag_id.clone())).unwrap();

        let lines = state.bag_lines(&bag_id);
        assert_eq!(lines.len(), 3);
        assert!(lines.iter().all(|l| l.quantity == 2));
    }

    #[test]
    fn empty_selection_cannot_be_added() {
        let state = manual_state();
        let id = state.mount(false).unwrap().session_id;
        for item in ["boy-1", "boy-2", "boy-3"] {
            state.toggle(&id, item).unwrap();
        }
        assert_eq!(state.add_bundle(&id, None), Err(ShopError::EmptyBundle));
        assert!(state.bags.is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn timer_advances_idle_deck() {
        let state = AppState::new(ShopConfig::default()).unwrap();
        let id = state.mount(false).unwrap().session_id;
        assert!(state.with_session(&id, |s| s.has_autoplay()).unwrap());

        tokio::time::sleep(Duration::from_millis(3100)).await;
        let view = state.view(&id).unwrap();
        assert_eq!(view.active_index, 1);
        assert_eq!(view.look_id, "girl");
        assert_eq!(view.summary.selected_count, 3);
    }

    #[tokio::test(start_paused = true)]
    async fn hover_pauses_timer() {
        let state = AppState::new(ShopConfig::default()).unwrap();
        let id = state.mount(false).unwrap().session_id;

        let view = state.pointer(&id, true).unwrap();
        assert_eq!(view.phase, CarouselPhase::Paused);
        tokio::time::sleep(Duration::from_secs(10)).await;
        assert_eq!(state.view(&id).unwrap().active_index, 0);

        state.pointer(&id, false).unwrap();
        tokio::time::sleep(Duration::from_millis(3100)).await;
        assert_eq!(state.view(&id).unwrap().active_index, 1);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_advance_restarts_period() {
        let state = AppState::new(ShopConfig::default()).unwrap();
        let id = state.mount(false).unwrap().session_id;

        tokio::time::sleep(Duration::from_millis(2000)).await;
        assert_eq!(state.advance(&id).unwrap().active_index, 1);

        // old deadline at 3000ms must not fire
        tokio::time::sleep(Duration::from_millis(1500)).await;
        assert_eq!(state.view(&id).unwrap().active_index, 1);

        tokio::time::sleep(Duration::from_millis(1600)).await;
        assert_eq!(state.view(&id).unwrap().active_index, 2);
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_stops_timer() {
        let state = AppState::new(ShopConfig::default()).unwrap();
        let id = state.mount(false).unwrap().session_id;
        assert_eq!(Arc::weak_count(&state.sessions), 1);
        state.unmount(&id).unwrap();

        tokio::time::sleep(Duration::from_secs(10)).await;
        assert!(state.sessions.is_empty());
        assert_eq!(Arc::weak_count(&state.sessions), 0);
        assert!(matches!(state.view(&id), Err(ShopError::SessionNotFound(_))));
    }
}
