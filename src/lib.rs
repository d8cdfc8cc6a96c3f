#![cfg(target_arch = "wasm32")]
//! Browser entry point: wires the artwork detail page (2D image, 2D/3D
//! toggle buttons, hash route) to the viewer controller.

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys as web;

mod assets;
mod camera;
mod catalog;
mod constants;
mod dom;
mod events;
mod lifecycle;
mod mesh;
mod render;
mod scene;
mod viewer;

use viewer::{ViewMode, ViewerController, ViewerElements};

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("gallery-web starting");

    if let Err(e) = init() {
        log::error!("init error: {e:?}");
    }
    Ok(())
}

fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let image = document
        .get_element_by_id("artwork-image")
        .ok_or_else(|| anyhow::anyhow!("missing #artwork-image"))?
        .dyn_into::<web::HtmlImageElement>()
        .map_err(|e| anyhow::anyhow!("#artwork-image is not an <img>: {e:?}"))?;
    let scene_mount = document
        .get_element_by_id("scene-mount")
        .ok_or_else(|| anyhow::anyhow!("missing #scene-mount"))?
        .dyn_into::<web::HtmlElement>()
        .map_err(|e| anyhow::anyhow!("#scene-mount is not an element: {e:?}"))?;
    let button_2d = document.get_element_by_id("view-2d");
    let button_3d = document.get_element_by_id("view-3d");

    let controller = ViewerController::new(ViewerElements {
        image,
        scene_mount,
        button_2d,
        button_3d,
    });

    controller.set_artwork(current_artwork_id(&window));

    {
        let controller = controller.clone();
        dom::add_click_listener(&document, "view-2d", move || {
            controller.set_mode(ViewMode::TwoD)
        });
    }
    {
        let controller = controller.clone();
        dom::add_click_listener(&document, "view-3d", move || {
            controller.set_mode(ViewMode::ThreeD)
        });
    }
    wire_hashchange(&window, controller);
    Ok(())
}

/// Artwork id from the `#/artwork/<id>` route, falling back to the first
/// catalog entry.
fn current_artwork_id(window: &web::Window) -> u32 {
    window
        .location()
        .hash()
        .ok()
        .and_then(|hash| catalog::parse_artwork_hash(&hash))
        .unwrap_or(catalog::ARTWORKS[0].id)
}

fn wire_hashchange(window: &web::Window, controller: ViewerController) {
    let win = window.clone();
    let closure = Closure::wrap(Box::new(move || {
        controller.set_artwork(current_artwork_id(&win));
    }) as Box<dyn FnMut()>);
    let _ = window.add_event_listener_with_callback("hashchange", closure.as_ref().unchecked_ref());
    closure.forget();
}
