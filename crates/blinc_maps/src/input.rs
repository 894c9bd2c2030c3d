//! Pointer gestures mapped to zoom requests.
//!
//! Handlers are pure: they read the navigation options and the plot box and
//! describe the zoom to run. Pointer positions are chart-relative pixels; the
//! focus of a request is relative to the plot's origin.

use crate::config::{Align, ButtonsOptions, NavigationOptions, VerticalAlign};
use crate::view::{Point, Rect};

/// Zoom factor applied by a double click.
pub const DOUBLE_CLICK_FACTOR: f32 = 0.5;
/// Zoom factors for wheel steps away from / towards the user.
pub const WHEEL_OUT_FACTOR: f32 = 2.0;
pub const WHEEL_IN_FACTOR: f32 = 0.5;

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ZoomRequest {
    pub factor: f32,
    /// Plot-relative pixel focus; `None` keeps the current view center.
    pub focus: Option<Point>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ZoomButton {
    ZoomIn,
    ZoomOut,
}

impl ZoomButton {
    pub const ALL: [ZoomButton; 2] = [ZoomButton::ZoomIn, ZoomButton::ZoomOut];
}

fn plot_local(plot: Rect, pointer: Point) -> Option<Point> {
    plot.contains(pointer)
        .then(|| Point::new(pointer.x - plot.x, pointer.y - plot.y))
}

/// Zoom in on the clicked point.
pub fn double_click_zoom(
    nav: &NavigationOptions,
    plot: Rect,
    pointer: Point,
) -> Option<ZoomRequest> {
    if !nav.zoom_on_double_click {
        return None;
    }
    plot_local(plot, pointer).map(|focus| ZoomRequest {
        factor: DOUBLE_CLICK_FACTOR,
        focus: Some(focus),
    })
}

/// Positive `delta` scrolls away from the user and zooms out.
pub fn wheel_zoom(
    nav: &NavigationOptions,
    plot: Rect,
    pointer: Point,
    delta: f32,
) -> Option<ZoomRequest> {
    if !nav.zoom_on_mouse_wheel || delta == 0.0 || !delta.is_finite() {
        return None;
    }
    let factor = if delta > 0.0 {
        WHEEL_OUT_FACTOR
    } else {
        WHEEL_IN_FACTOR
    };
    plot_local(plot, pointer).map(|focus| ZoomRequest {
        factor,
        focus: Some(focus),
    })
}

pub fn button_zoom(nav: &NavigationOptions, button: ZoomButton) -> Option<ZoomRequest> {
    if !nav.enable_buttons {
        return None;
    }
    let options = match button {
        ZoomButton::ZoomIn => &nav.buttons.zoom_in,
        ZoomButton::ZoomOut => &nav.buttons.zoom_out,
    };
    Some(ZoomRequest {
        factor: options.factor,
        focus: None,
    })
}

/// Chart-relative box of `button`, aligned inside `plot`.
pub fn button_rect(buttons: &ButtonsOptions, plot: Rect, button: ZoomButton) -> Rect {
    let y_offset = match button {
        ZoomButton::ZoomIn => buttons.zoom_in.y,
        ZoomButton::ZoomOut => buttons.zoom_out.y,
    };
    let x = match buttons.align {
        Align::Left => plot.x,
        Align::Center => plot.x + (plot.width - buttons.width) / 2.0,
        Align::Right => plot.right() - buttons.width,
    } + buttons.x;
    // The pair is aligned as one box twice a button's height.
    let y = match buttons.vertical_align {
        VerticalAlign::Top => plot.y,
        VerticalAlign::Middle => plot.y + (plot.height - 2.0 * buttons.height) / 2.0,
        VerticalAlign::Bottom => plot.bottom() - 2.0 * buttons.height,
    } + y_offset;
    Rect::new(x, y, buttons.width, buttons.height)
}

/// Button under `pointer`, if buttons are shown.
pub fn button_at(nav: &NavigationOptions, plot: Rect, pointer: Point) -> Option<ZoomButton> {
    if !nav.enable_buttons {
        return None;
    }
    ZoomButton::ALL
        .into_iter()
        .find(|b| button_rect(&nav.buttons, plot, *b).contains(pointer))
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PinchAxes {
    pub x: bool,
    pub y: bool,
}

/// Touch zoom pinches both axes.
pub fn pinch_axes(nav: &NavigationOptions) -> PinchAxes {
    PinchAxes {
        x: nav.enable_touch_zoom,
        y: nav.enable_touch_zoom,
    }
}

/// Running two-finger gesture, relative to where it started.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PinchTransform {
    /// > 1 when the fingers spread apart.
    pub scale_x: f32,
    pub scale_y: f32,
    /// Chart-relative midpoint between the touches.
    pub center: Point,
}

impl PinchTransform {
    /// Drive both axes by the larger scale so the map keeps its ratio.
    pub fn locked(self) -> Self {
        let scale = self.scale_x.max(self.scale_y);
        Self {
            scale_x: scale,
            scale_y: scale,
            ..self
        }
    }
}

/// Zoom equivalent of a finished pinch.
pub fn pinch_zoom(
    nav: &NavigationOptions,
    plot: Rect,
    transform: PinchTransform,
) -> Option<ZoomRequest> {
    let axes = pinch_axes(nav);
    if !(axes.x && axes.y) {
        return None;
    }
    let scale = transform.locked().scale_x;
    if !(scale.is_finite() && scale > 0.0) {
        return None;
    }
    plot_local(plot, transform.center).map(|focus| ZoomRequest {
        factor: 1.0 / scale,
        focus: Some(focus),
    })
}
