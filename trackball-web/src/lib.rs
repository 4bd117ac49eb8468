/// Trackball Web - canvas mouse input driving the trackball from WASM
///
/// The page owns the WebGL context and draw loop; this module turns canvas
/// mouse events into a rotation and hands back the model matrix to upload.

use log::{debug, info};
use nalgebra::Point2;
use std::fmt::Display;
use trackball_core::{PointerEvent, TrackballConfig, TrackballTracker, Transform, Viewport};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{HtmlCanvasElement, MouseEvent};

/// `MouseEvent.button` value of the primary button
const PRIMARY_BUTTON: i16 = 0;

fn to_js(err: impl Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Convert an event offset in CSS pixels into canvas drawing-buffer pixels.
/// A canvas with no layout size is treated as unscaled.
pub fn canvas_point(
    offset: (i32, i32),
    client_size: (i32, i32),
    buffer_size: (u32, u32),
) -> Point2<f32> {
    let scale = |client: i32, buffer: u32| {
        if client > 0 {
            buffer as f32 / client as f32
        } else {
            1.0
        }
    };
    Point2::new(
        offset.0 as f32 * scale(client_size.0, buffer_size.0),
        offset.1 as f32 * scale(client_size.1, buffer_size.1),
    )
}

#[wasm_bindgen]
pub struct WebTrackball {
    canvas: HtmlCanvasElement,
    config: TrackballConfig,
    viewport: Viewport,
    tracker: TrackballTracker,
}

#[wasm_bindgen]
impl WebTrackball {
    /// Bind a trackball to the canvas with the given element id
    #[wasm_bindgen(constructor)]
    pub fn new(canvas_id: &str) -> Result<WebTrackball, JsValue> {
        Self::with_radius_fraction(canvas_id, TrackballConfig::default().radius_fraction)
    }

    pub fn with_radius_fraction(canvas_id: &str, fraction: f32) -> Result<WebTrackball, JsValue> {
        let document = web_sys::window()
            .and_then(|window| window.document())
            .ok_or_else(|| JsValue::from_str("no document available"))?;
        let canvas = document
            .get_element_by_id(canvas_id)
            .ok_or_else(|| JsValue::from_str(&format!("no element with id '{canvas_id}'")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| JsValue::from_str(&format!("element '{canvas_id}' is not a canvas")))?;

        let config = TrackballConfig {
            radius_fraction: fraction,
        };
        let viewport = config
            .viewport(canvas.width() as f32, canvas.height() as f32)
            .map_err(to_js)?;
        info!("trackball bound to #{canvas_id}, radius {:.1}", viewport.radius);

        Ok(WebTrackball {
            canvas,
            config,
            viewport,
            tracker: TrackballTracker::new(),
        })
    }

    /// Re-read the canvas size after it changed
    pub fn resize(&mut self) -> Result<(), JsValue> {
        self.viewport = self
            .config
            .viewport(self.canvas.width() as f32, self.canvas.height() as f32)
            .map_err(to_js)?;
        debug!("canvas resized to {}x{}", self.viewport.width, self.viewport.height);
        Ok(())
    }

    /// Handle `mousedown`; returns whether a drag started
    pub fn mouse_down(&mut self, event: &MouseEvent) -> bool {
        if event.button() != PRIMARY_BUTTON {
            return false;
        }
        let pointer = self.pointer(event);
        self.tracker.handle_event(
            PointerEvent::Pressed {
                x: pointer.x,
                y: pointer.y,
            },
            &self.viewport,
        );
        self.tracker.is_dragging()
    }

    /// Handle `mousemove`
    pub fn mouse_move(&mut self, event: &MouseEvent) {
        let pointer = self.pointer(event);
        self.tracker.handle_event(
            PointerEvent::Moved {
                x: pointer.x,
                y: pointer.y,
            },
            &self.viewport,
        );
    }

    /// Handle `mouseup`
    pub fn mouse_up(&mut self) {
        self.tracker
            .handle_event(PointerEvent::Released, &self.viewport);
    }

    pub fn is_dragging(&self) -> bool {
        self.tracker.is_dragging()
    }

    /// Column-major 4x4 rotation matrix for `uniformMatrix4fv`
    pub fn model_matrix(&self) -> Vec<f32> {
        let rotation = Transform::rotation_matrix(&self.tracker.current_rotation());
        Transform::to_column_major(&rotation).to_vec()
    }

    /// Restore the identity rotation
    pub fn reset(&mut self) {
        self.tracker.reset();
    }

    fn pointer(&self, event: &MouseEvent) -> Point2<f32> {
        canvas_point(
            (event.offset_x(), event.offset_y()),
            (self.canvas.client_width(), self.canvas.client_height()),
            (self.canvas.width(), self.canvas.height()),
        )
    }
}

#[wasm_bindgen(start)]
pub fn main() -> Result<(), JsValue> {
    // Setup panic hook for better error messages in browser console
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).map_err(to_js)?;

    Ok(())
}
