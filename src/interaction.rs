//! Pointer and touch state for the two presentations.
//!
//! The desktop view hovers: moving over a region highlights it until the
//! pointer leaves the map surface. The mobile view toggles: a tap selects a
//! region, tapping it again clears the selection, tapping another region
//! switches straight to it. Ids that are not on the map are ignored.

use std::collections::BTreeSet;

/// Frame or cell coordinates of the pointer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Pointer {
    pub x: f64,
    pub y: f64,
}

/// Metric boost applied to the hovered region's colour lookup, so it renders
/// one shade darker where the ramp allows. Data is not changed.
pub const HOVER_BOOST: f64 = 5.0;

#[derive(Clone, Debug, Default, PartialEq)]
pub enum HoverState {
    #[default]
    Idle,
    Hovering { region: String, pointer: Pointer },
}

/// Continuous pointer interaction.
#[derive(Clone, Debug, Default)]
pub struct HoverController {
    known: BTreeSet<String>,
    state: HoverState,
}

impl HoverController {
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
            state: HoverState::Idle,
        }
    }

    pub fn state(&self) -> &HoverState {
        &self.state
    }

    pub fn hovered(&self) -> Option<&str> {
        match &self.state {
            HoverState::Hovering { region, .. } => Some(region),
            HoverState::Idle => None,
        }
    }

    pub fn pointer(&self) -> Option<Pointer> {
        match &self.state {
            HoverState::Hovering { pointer, .. } => Some(*pointer),
            HoverState::Idle => None,
        }
    }

    /// Pointer moved inside the map surface, over `region` if any.
    ///
    /// Over a known region the hover switches to it. Over the background the
    /// current hover is kept and only the pointer position follows; the hover
    /// ends when the pointer leaves the surface.
    pub fn pointer_moved(&mut self, region: Option<&str>, pointer: Pointer) {
        match region {
            Some(id) if self.known.contains(id) => {
                if self.hovered() != Some(id) {
                    log::trace!("hover -> {id}");
                }
                self.state = HoverState::Hovering { region: id.to_string(), pointer };
            }
            Some(id) => log::trace!("pointer over unknown region {id:?}, ignored"),
            None => {
                if let HoverState::Hovering { pointer: p, .. } = &mut self.state {
                    *p = pointer;
                }
            }
        }
    }

    pub fn pointer_left(&mut self) {
        self.state = HoverState::Idle;
    }
}

/// Discrete tap interaction.
#[derive(Clone, Debug, Default)]
pub struct SelectController {
    known: BTreeSet<String>,
    selected: Option<String>,
}

impl SelectController {
    pub fn new<I, S>(known: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            known: known.into_iter().map(Into::into).collect(),
            selected: None,
        }
    }

    pub fn selected(&self) -> Option<&str> {
        self.selected.as_deref()
    }

    /// Toggles selection for a tapped region and returns the new selection.
    pub fn tap(&mut self, region: &str) -> Option<&str> {
        if !self.known.contains(region) {
            log::trace!("tap on unknown region {region:?}, ignored");
        } else if self.selected.as_deref() == Some(region) {
            self.selected = None;
        } else {
            self.selected = Some(region.to_string());
        }
        self.selected()
    }

    pub fn clear(&mut self) {
        self.selected = None;
    }
}

/// Width and height of a rectangle.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Size {
    pub width: f64,
    pub height: f64,
}

/// Top-left corner of a placed tooltip.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TooltipPosition {
    pub left: f64,
    pub top: f64,
}

/// Places a `tooltip` next to `cursor` inside `container`.
///
/// Preferred spot is below-right of the cursor at `offset`. When that would
/// overflow, the box flips to the left of and/or above the cursor, and is
/// finally clamped so it stays inside the container whenever it fits.
pub fn place_tooltip(container: Size, cursor: Pointer, tooltip: Size, offset: f64) -> TooltipPosition {
    let mut left = cursor.x + offset;
    if left + tooltip.width > container.width {
        left = cursor.x - offset - tooltip.width;
    }
    let mut top = cursor.y + offset;
    if top + tooltip.height > container.height {
        top = cursor.y - offset - tooltip.height;
    }
    TooltipPosition {
        left: clamp_span(left, tooltip.width, container.width),
        top: clamp_span(top, tooltip.height, container.height),
    }
}

fn clamp_span(start: f64, len: f64, available: f64) -> f64 {
    start.min(available - len).max(0.0)
}
