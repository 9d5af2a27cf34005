//! Shop the Look widget
//!
//! Glues the carousel controller to the bundle selection: whenever the
//! active look changes, the selection is reset to every item of the new
//! look.

use super::carousel::{CarouselController, GestureThresholds};
use super::catalog::LookCatalog;
use super::helpers::{format_price, format_summary};
use super::models::{
    BundleOrder, CardView, Currency, DragOutcome, ItemView, Look, PricingSummary,
    SelectionIndicator, VisualStyle, WidgetView,
};
use super::pricing::{compute_summary, Selection};
use crate::error::{ShopError, ShopResult};
use std::sync::Arc;

/// Presentation options of a widget instance
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct WidgetOptions {
    pub thresholds: GestureThresholds,
    pub currency: Currency,
    pub style: VisualStyle,
    pub indicator: SelectionIndicator,
    pub small_screen: bool,
}

/// One mounted widget: deck position plus selection of the active look
#[derive(Debug, Clone)]
pub struct ShopTheLook {
    catalog: Arc<LookCatalog>,
    controller: CarouselController,
    selection: Selection,
    options: WidgetOptions,
}

impl ShopTheLook {
    pub fn new(catalog: Arc<LookCatalog>, options: WidgetOptions) -> ShopResult<Self> {
        let controller = CarouselController::new(catalog.len(), options.thresholds)?;
        let first = catalog.get(0).ok_or(ShopError::EmptyCatalog)?;
        let selection = Selection::all_of(first);

        Ok(Self {
            catalog,
            controller,
            selection,
            options,
        })
    }

    pub fn controller(&self) -> &CarouselController {
        &self.controller
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    pub fn active_look(&self) -> &Look {
        // the controller keeps the index inside the validated catalog
        &self.catalog.looks()[self.controller.active_index()]
    }

    /// Timer tick; returns whether the deck moved
    pub fn tick(&mut self) -> bool {
        let before = self.controller.active_index();
        let moved = self.controller.tick();
        self.sync_selection(before);
        moved
    }

    /// Click on the stack
    pub fn advance(&mut self) -> usize {
        let before = self.controller.active_index();
        self.controller.advance();
        self.sync_selection(before)
    }

    pub fn retreat(&mut self) -> usize {
        let before = self.controller.active_index();
        self.controller.retreat();
        self.sync_selection(before)
    }

    pub fn pointer_enter(&mut self) {
        self.controller.pointer_enter();
    }

    /// Returns true when auto-advance resumes
    pub fn pointer_leave(&mut self) -> bool {
        self.controller.pointer_leave()
    }

    pub fn drag_start(&mut self, card_index: usize) -> ShopResult<()> {
        self.controller.drag_start(card_index)
    }

    pub fn drag_end(&mut self, offset_x: f64, velocity_x: f64) -> DragOutcome {
        let before = self.controller.active_index();
        let outcome = self.controller.drag_end(offset_x, velocity_x);
        self.sync_selection(before);
        outcome
    }

    /// Flips an item of the active look; unknown ids are a no-op
    pub fn toggle(&mut self, item_id: &str) -> bool {
        let look = &self.catalog.looks()[self.controller.active_index()];
        self.selection.toggle(look, item_id)
    }

    pub fn summary(&self) -> PricingSummary {
        compute_summary(self.active_look(), &self.selection)
    }

    /// "Add bundle" is only offered with at least one item selected
    pub fn can_add_bundle(&self) -> bool {
        !self.selection.is_empty()
    }

    /// Selected items and their price, handed to the bag
    pub fn bundle(&self) -> ShopResult<BundleOrder> {
        let look = self.active_look();
        let summary = compute_summary(look, &self.selection);
        if summary.selected_count == 0 {
            return Err(ShopError::EmptyBundle);
        }

        Ok(BundleOrder {
            look_id: look.id.clone(),
            items: look
                .items
                .iter()
                .filter(|i| self.selection.contains(&i.id))
                .cloned()
                .collect(),
            summary,
        })
    }

    pub fn view(&self, session_id: &str) -> WidgetView {
        let look = self.active_look();
        let active_index = self.controller.active_index();
        let look_count = self.controller.look_count();
        let summary = self.summary();
        let currency = self.options.currency;

        let cards = self
            .catalog
            .looks()
            .iter()
            .zip(self.controller.transforms(self.options.style))
            .map(|(l, transform)| CardView {
                look_id: l.id.clone(),
                hero_image: l.hero_image.clone(),
                transform,
            })
            .collect();

        let items = look
            .items
            .iter()
            .map(|i| ItemView {
                item: i.clone(),
                price: format_price(i.unit_price, currency),
                selected: self.selection.contains(&i.id),
            })
            .collect();

        WidgetView {
            session_id: session_id.to_string(),
            active_index,
            look_count,
            phase: self.controller.phase(),
            look_id: look.id.clone(),
            display_name: look.display_name.clone(),
            hero_image: look.hero_image.clone(),
            items,
            cards,
            prices: format_summary(&summary, currency),
            can_add_bundle: summary.selected_count > 0,
            summary,
            selection_indicator: self.options.indicator,
            position_hint: self
                .options
                .small_screen
                .then(|| format!("{} / {}", active_index + 1, look_count)),
        }
    }

    fn sync_selection(&mut self, before: usize) -> usize {
        let now = self.controller.active_index();
        if now != before {
            self.selection = Selection::all_of(self.active_look());
        }
        now
    }
}
