//! The shared tooltip and its hover state machine.
//!
//! ```text
//! Hidden  --enter-->  Visible   (position + content set)
//! Visible --leave-->  Hidden    (content and position left stale)
//! Visible --enter-->  Visible   (another bar: repositioned, new content)
//! ```
//!
//! Bars from 2007 onward anchor the tooltip to the left of the pointer; older
//! bars anchor it above.

use serde::Serialize;

use crate::domain::{is_post_2007, observation_year, period_label, value_label, Observation};

/// Horizontal/vertical nudge away from the pointer, in pixels.
const POINTER_OFFSET: f64 = 5.0;

/// Pointer position relative to the mount container.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PointerPosition {
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Visibility {
    Hidden,
    Visible,
}

/// Where the tooltip box sits relative to its `left`/`top` point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Anchor {
    /// Box to the left of the point, vertically centered (2007 and later).
    Left,
    /// Box above the point, horizontally centered.
    Top,
}

impl Anchor {
    pub fn for_year(year: i32) -> Self {
        if is_post_2007(year) { Anchor::Left } else { Anchor::Top }
    }

    pub fn class_name(self) -> &'static str {
        match self {
            Anchor::Left => "tooltip-left",
            Anchor::Top => "tooltip-top",
        }
    }

    pub fn css_transform(self) -> &'static str {
        match self {
            Anchor::Left => "translate(-100%, -50%)",
            Anchor::Top => "translate(-50%, -100%)",
        }
    }

    /// The `left`/`top` point for a pointer at `at`.
    pub fn place(self, at: PointerPosition) -> PointerPosition {
        match self {
            Anchor::Left => PointerPosition {
                x: at.x - POINTER_OFFSET,
                y: at.y,
            },
            Anchor::Top => PointerPosition {
                x: at.x,
                y: at.y - POINTER_OFFSET,
            },
        }
    }
}

/// What the tooltip shows for one observation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TooltipContent {
    pub date: String,
    pub period: String,
    pub value: String,
    pub anchor: Anchor,
}

impl TooltipContent {
    pub fn for_observation(obs: &Observation) -> Self {
        Self {
            date: obs.date.to_string(),
            period: period_label(obs.date),
            value: value_label(obs.value),
            anchor: Anchor::for_year(observation_year(obs.date)),
        }
    }

    pub fn lines(&self) -> [&str; 2] {
        [self.period.as_str(), self.value.as_str()]
    }
}

/// The single tooltip element appended next to the drawing surface.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Tooltip {
    pub visibility: Visibility,
    /// Position of the anchor point (CSS `left`/`top`); `None` until first hover.
    pub position: Option<PointerPosition>,
    pub content: Option<TooltipContent>,
}

impl Default for Tooltip {
    fn default() -> Self {
        Self::hidden()
    }
}

impl Tooltip {
    pub fn hidden() -> Self {
        Self {
            visibility: Visibility::Hidden,
            position: None,
            content: None,
        }
    }

    pub fn opacity(&self) -> f64 {
        match self.visibility {
            Visibility::Hidden => 0.0,
            Visibility::Visible => 1.0,
        }
    }

    pub fn is_visible(&self) -> bool {
        self.visibility == Visibility::Visible
    }

    pub fn anchor(&self) -> Option<Anchor> {
        self.content.as_ref().map(|c| c.anchor)
    }

    /// Pointer entered the bar for `obs`.
    pub fn pointer_enter(&mut self, obs: &Observation, at: PointerPosition) {
        let content = TooltipContent::for_observation(obs);
        self.position = Some(content.anchor.place(at));
        self.content = Some(content);
        self.visibility = Visibility::Visible;
    }

    /// Pointer left a bar.
    pub fn pointer_leave(&mut self) {
        self.visibility = Visibility::Hidden;
    }
}
