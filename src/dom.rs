use wasm_bindgen::JsCast;
use web_sys as web;

#[inline]
pub fn window_document() -> Option<web::Document> {
    web::window().and_then(|w| w.document())
}

#[inline]
pub fn add_click_listener(
    document: &web::Document,
    element_id: &str,
    mut handler: impl FnMut() + 'static,
) {
    if let Some(el) = document.get_element_by_id(element_id) {
        let closure =
            wasm_bindgen::closure::Closure::wrap(Box::new(move || handler()) as Box<dyn FnMut()>);
        let _ = el.add_event_listener_with_callback("click", closure.as_ref().unchecked_ref());
        closure.forget();
    }
}

/// Current mount bounds in device pixels. Zero is reported as zero so the
/// caller can refuse to build a scene into an unlaid-out element.
pub fn mount_size(el: &web::HtmlElement) -> (u32, u32) {
    let dpr = web::window().map(|w| w.device_pixel_ratio()).unwrap_or(1.0);
    let rect = el.get_bounding_client_rect();
    ((rect.width() * dpr) as u32, (rect.height() * dpr) as u32)
}

#[inline]
pub fn clear_children(el: &web::HtmlElement) {
    el.set_inner_html("");
}

pub fn create_canvas(document: &web::Document) -> Option<web::HtmlCanvasElement> {
    document
        .create_element("canvas")
        .ok()?
        .dyn_into::<web::HtmlCanvasElement>()
        .ok()
}

/// Show or hide an element via its inline style.
pub fn set_visible(el: &web::HtmlElement, visible: bool) {
    let display = if visible { "" } else { "none" };
    let _ = el.style().set_property("display", display);
}
