//! Carousel / Stack Controller
//!
//! Owns the active look, the Idle / Paused / Dragging state machine
//! that gates auto-advance, drag-release recognition and the depth
//! transform of every card in the deck.

use super::models::{CarouselPhase, DragOutcome, StackTransform, VisualStyle};
use crate::error::{ShopError, ShopResult};

// =============================================================================
// Gesture Recognition
// =============================================================================

/// Escape hatches for committing a drag: travel or flick speed
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureThresholds {
    /// Absolute horizontal travel in pixels
    pub distance_px: f64,

    /// Absolute release velocity in pixels per second
    pub velocity_px_s: f64,
}

impl Default for GestureThresholds {
    fn default() -> Self {
        Self {
            distance_px: 60.0,
            velocity_px_s: 200.0,
        }
    }
}

/// Decides what a drag release does. Leftwards moves forward.
pub fn resolve_drag(offset_x: f64, velocity_x: f64, thresholds: GestureThresholds) -> DragOutcome {
    if offset_x < -thresholds.distance_px || velocity_x < -thresholds.velocity_px_s {
        DragOutcome::Forward
    } else if offset_x > thresholds.distance_px || velocity_x > thresholds.velocity_px_s {
        DragOutcome::Backward
    } else {
        DragOutcome::SnapBack
    }
}

// =============================================================================
// Depth Transform
// =============================================================================

/// One visible depth layer of the deck
#[derive(Debug, Clone, Copy, PartialEq)]
struct Layer {
    offset_y: f32,
    scale: f32,
    opacity: f32,
    blur_px: f32,
}

const fn layer(offset_y: f32, scale: f32, opacity: f32, blur_px: f32) -> Layer {
    Layer {
        offset_y,
        scale,
        opacity,
        blur_px,
    }
}

const LAYERED: [Layer; 4] = [
    layer(0.0, 1.0, 1.0, 0.0),
    layer(-12.0, 0.95, 0.6, 1.0),
    layer(-24.0, 0.90, 0.3, 2.0),
    layer(-36.0, 0.88, 0.0, 3.0),
];

const COMPACT: [Layer; 4] = [
    layer(0.0, 1.0, 1.0, 0.0),
    layer(-8.0, 0.97, 0.7, 0.0),
    layer(-16.0, 0.94, 0.4, 1.0),
    layer(-24.0, 0.92, 0.0, 2.0),
];

impl VisualStyle {
    fn layers(self) -> &'static [Layer; 4] {
        match self {
            VisualStyle::Layered => &LAYERED,
            VisualStyle::Compact => &COMPACT,
        }
    }
}

/// Circular distance of card `index` behind the active card
pub fn relative_position(index: usize, active_index: usize, look_count: usize) -> usize {
    if look_count == 0 {
        return 0;
    }
    (index % look_count + look_count - active_index % look_count) % look_count
}

/// Placement of card `index` in a deck of `look_count` cards.
///
/// Three layers are visible; everything from the fourth position back
/// is transparent and sits at the bottom.
pub fn stack_transform(
    index: usize,
    active_index: usize,
    look_count: usize,
    style: VisualStyle,
) -> StackTransform {
    let relative = relative_position(index, active_index, look_count);
    let depth = relative.min(3);
    let l = style.layers()[depth];

    StackTransform {
        relative,
        offset_y: l.offset_y,
        scale: l.scale,
        opacity: l.opacity,
        blur_px: l.blur_px,
        z_index: 3 - depth as u8,
        interactive: relative == 0,
    }
}

// =============================================================================
// Controller
// =============================================================================

/// Finite-state controller of the look deck
#[derive(Debug, Clone, PartialEq)]
pub struct CarouselController {
    active_index: usize,
    look_count: usize,
    phase: CarouselPhase,
    pointer_inside: bool,
    thresholds: GestureThresholds,
}

impl CarouselController {
    /// Starts at the first look, idle. A deck without looks is refused.
    pub fn new(look_count: usize, thresholds: GestureThresholds) -> ShopResult<Self> {
        if look_count == 0 {
            return Err(ShopError::EmptyCatalog);
        }
        Ok(Self {
            active_index: 0,
            look_count,
            phase: CarouselPhase::Idle,
            pointer_inside: false,
            thresholds,
        })
    }

    pub fn active_index(&self) -> usize {
        self.active_index
    }

    pub fn look_count(&self) -> usize {
        self.look_count
    }

    pub fn phase(&self) -> CarouselPhase {
        self.phase
    }

    /// Auto-advance is suppressed while hovered or dragging
    pub fn is_paused(&self) -> bool {
        self.phase != CarouselPhase::Idle
    }

    /// Timer tick. Only moves the deck while idle; returns whether the
    /// active look changed, which never happens on a one-look deck.
    pub fn tick(&mut self) -> bool {
        if self.phase != CarouselPhase::Idle {
            return false;
        }
        let before = self.active_index;
        self.advance() != before
    }

    /// Moves to the next look, wrapping around
    pub fn advance(&mut self) -> usize {
        self.active_index = (self.active_index + 1) % self.look_count;
        self.active_index
    }

    /// Moves to the previous look, wrapping around
    pub fn retreat(&mut self) -> usize {
        self.active_index = (self.active_index + self.look_count - 1) % self.look_count;
        self.active_index
    }

    /// Hover or touch start on the widget
    pub fn pointer_enter(&mut self) {
        self.pointer_inside = true;
        if self.phase == CarouselPhase::Idle {
            self.phase = CarouselPhase::Paused;
        }
    }

    /// Hover or touch end. Returns true when the controller went back to idle.
    pub fn pointer_leave(&mut self) -> bool {
        self.pointer_inside = false;
        if self.phase == CarouselPhase::Paused {
            self.phase = CarouselPhase::Idle;
            return true;
        }
        false
    }

    /// Begins dragging `card_index`; only the active card can be dragged
    pub fn drag_start(&mut self, card_index: usize) -> ShopResult<()> {
        if card_index != self.active_index {
            return Err(ShopError::CardNotDraggable { index: card_index });
        }
        self.phase = CarouselPhase::Dragging;
        Ok(())
    }

    /// Releases the drag and commits or snaps back.
    ///
    /// A release without a matching start snaps back and changes nothing.
    pub fn drag_end(&mut self, offset_x: f64, velocity_x: f64) -> DragOutcome {
        if self.phase != CarouselPhase::Dragging {
            return DragOutcome::SnapBack;
        }

        let outcome = resolve_drag(offset_x, velocity_x, self.thresholds);
        match outcome {
            DragOutcome::Forward => {
                self.advance();
            }
            DragOutcome::Backward => {
                self.retreat();
            }
            DragOutcome::SnapBack => {}
        }

        self.phase = if self.pointer_inside {
            CarouselPhase::Paused
        } else {
            CarouselPhase::Idle
        };
        outcome
    }

    /// Transforms of every card, in catalog order
    pub fn transforms(&self, style: VisualStyle) -> Vec<StackTransform> {
        (0..self.look_count)
            .map(|index| stack_transform(index, self.active_index, self.look_count, style))
            .collect()
    }
}
