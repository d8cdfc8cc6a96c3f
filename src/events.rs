//! Pointer and wheel wiring for the orbit controls.
//!
//! Listeners are attached to the scene's canvas and forgotten: they live and
//! die with the canvas element, which the manager removes on dispose. The
//! window-level resize listener is handled separately in `scene` because it
//! must be explicitly unregistered.

use std::cell::{Cell, RefCell};
use std::rc::Rc;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::camera::OrbitCamera;

#[derive(Clone)]
pub struct OrbitWiring {
    pub canvas: web::HtmlCanvasElement,
    pub camera: Rc<RefCell<OrbitCamera>>,
    pub dragging: Rc<Cell<bool>>,
    pub last_pointer: Rc<Cell<(f32, f32)>>,
}

pub fn wire_orbit_handlers(w: &OrbitWiring) {
    wire_pointerdown(w);
    wire_pointermove(w);
    wire_pointerup(w);
    wire_wheel(w);
}

fn wire_pointerdown(w: &OrbitWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        w.dragging.set(true);
        w.last_pointer.set((ev.client_x() as f32, ev.client_y() as f32));
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = w
        .canvas
        .add_event_listener_with_callback("pointerdown", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointermove(w: &OrbitWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::PointerEvent| {
        if !w.dragging.get() {
            return;
        }
        let (lx, ly) = w.last_pointer.get();
        let x = ev.client_x() as f32;
        let y = ev.client_y() as f32;
        w.camera.borrow_mut().rotate_by(x - lx, y - ly);
        w.last_pointer.set((x, y));
    }) as Box<dyn FnMut(_)>);
    let _ = w
        .canvas
        .add_event_listener_with_callback("pointermove", closure.as_ref().unchecked_ref());
    closure.forget();
}

fn wire_pointerup(w: &OrbitWiring) {
    for event in ["pointerup", "pointerleave"] {
        let dragging = w.dragging.clone();
        let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |_ev: web::PointerEvent| {
            dragging.set(false);
        }) as Box<dyn FnMut(_)>);
        let _ = w
            .canvas
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

fn wire_wheel(w: &OrbitWiring) {
    let w = w.clone();
    let closure = wasm_bindgen::closure::Closure::wrap(Box::new(move |ev: web::WheelEvent| {
        w.camera.borrow_mut().zoom_by(ev.delta_y() as f32);
        ev.prevent_default();
    }) as Box<dyn FnMut(_)>);
    let _ = w
        .canvas
        .add_event_listener_with_callback("wheel", closure.as_ref().unchecked_ref());
    closure.forget();
}
