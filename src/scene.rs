//! Scene lifecycle manager: owns one scene resource set (camera, renderer,
//! controls, lights, floor, content object) bound to a DOM mount element,
//! runs the render loop, and unwinds everything deterministically on
//! `dispose`. Callers (the view toggle) create one manager per 3D view and
//! must dispose it on every view switch, artwork change, or teardown.

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use instant::Instant;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::camera::OrbitCamera;
use crate::catalog::{ArtworkRecord, ContentPlan, ModelRegistry};
use crate::constants::ROTATION_SPEED_PER_FRAME;
use crate::events::{self, OrbitWiring};
use crate::lifecycle::{Generation, LifecycleState, Phase};
use crate::render::GpuState;
use crate::{assets, dom, mesh};

/// Clonable handle to one scene instance. Clones share the same resource
/// set; async completions hold a clone and re-check the generation before
/// touching it.
#[derive(Clone)]
pub struct SceneManager {
    inner: Rc<RefCell<SceneInner>>,
}

struct SceneInner {
    state: LifecycleState,
    mount: Option<web::HtmlElement>,
    canvas: Option<web::HtmlCanvasElement>,
    gpu: Option<GpuState<'static>>,
    camera: Rc<RefCell<OrbitCamera>>,
    running: Rc<Cell<bool>>,
    rotation_y: f32,
    rotation_speed: f32,
    resize_closure: Option<Closure<dyn FnMut()>>,
    // The tick closure captures a clone of this slot so it can reschedule
    // itself; dispose must empty the slot to break that cycle.
    tick: Option<Rc<RefCell<Option<Closure<dyn FnMut()>>>>>,
    last_instant: Instant,
}

impl SceneManager {
    /// Whether two handles refer to the same scene instance.
    pub fn same_instance(&self, other: &SceneManager) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }

    pub fn new() -> Self {
        Self {
            inner: Rc::new(RefCell::new(SceneInner {
                state: LifecycleState::new(),
                mount: None,
                canvas: None,
                gpu: None,
                camera: Rc::new(RefCell::new(OrbitCamera::new())),
                running: Rc::new(Cell::new(false)),
                rotation_y: 0.0,
                rotation_speed: ROTATION_SPEED_PER_FRAME,
                resize_closure: None,
                tick: None,
                last_instant: Instant::now(),
            })),
        }
    }

    /// Stand up the resource set inside `mount`. Returns false (logged, no
    /// resources allocated) when the mount has no measurable size, WebGPU is
    /// unavailable, or this instance was already used.
    pub async fn initialize(&self, mount: &web::HtmlElement) -> bool {
        if self.inner.borrow().state.phase() != Phase::Uninitialized {
            log::error!("initialize called on a used scene manager; create a fresh instance");
            return false;
        }
        let (width, height) = dom::mount_size(mount);
        if width == 0 || height == 0 {
            log::error!("mount element has no measurable size; not building a scene");
            return false;
        }
        let Some(document) = dom::window_document() else {
            log::error!("no document");
            return false;
        };
        let Some(canvas) = dom::create_canvas(&document) else {
            log::error!("could not create a canvas element");
            return false;
        };
        canvas.set_width(width);
        canvas.set_height(height);
        let _ = canvas.style().set_property("width", "100%");
        let _ = canvas.style().set_property("height", "100%");

        // Acquire the device before touching the mount, so a WebGPU failure
        // leaves the page untouched. The canvas clone is leaked to satisfy
        // the surface's 'static lifetime.
        let leaked_canvas = Box::leak(Box::new(canvas.clone()));
        let gpu = match GpuState::new(leaked_canvas).await {
            Ok(g) => g,
            Err(e) => {
                log::error!("WebGPU init error: {e:?}");
                return false;
            }
        };

        let camera = {
            let mut inner = self.inner.borrow_mut();
            if !inner.state.begin_init(width, height) {
                // Disposed while the device request was in flight.
                log::warn!("scene manager state changed during init; discarding");
                let mut gpu = gpu;
                gpu.destroy();
                return false;
            }
            dom::clear_children(mount);
            if mount.append_child(&canvas).is_err() {
                log::error!("could not attach the renderer canvas to the mount");
                let mut gpu = gpu;
                gpu.destroy();
                return false;
            }
            inner.camera.borrow_mut().set_viewport(width, height);
            inner.gpu = Some(gpu);
            inner.mount = Some(mount.clone());
            inner.canvas = Some(canvas.clone());
            inner.camera.clone()
        };

        self.register_resize_listener();
        events::wire_orbit_handlers(&OrbitWiring {
            canvas,
            camera,
            dragging: Rc::new(Cell::new(false)),
            last_pointer: Rc::new(Cell::new((0.0, 0.0))),
        });
        true
    }

    /// Build the content object for `artwork`. Any previous content is
    /// destroyed first; the scene holds at most one content object.
    pub fn build_content(&self, artwork: &ArtworkRecord, models: &ModelRegistry) {
        let plan = ContentPlan::resolve(artwork, models);
        let generation: Generation;
        {
            let mut guard = self.inner.borrow_mut();
            let inner = &mut *guard;
            if inner.state.replace_content().is_none() {
                log::warn!("build_content before initialize (or after dispose); ignoring");
                return;
            }
            let Some(gpu) = inner.gpu.as_mut() else {
                return;
            };
            gpu.clear_content();
            inner.rotation_y = 0.0;
            match plan {
                ContentPlan::Painting { .. } => {
                    gpu.set_content(&mesh::painting_with_frame(), 1.0);
                    inner.state.content_installed();
                }
                ContentPlan::Placeholder { .. } => {
                    gpu.set_content(&mesh::placeholder_solid(), 1.0);
                    inner.state.content_installed();
                }
                // The model is spliced in by the load completion below.
                ContentPlan::LoadedModel { .. } => {}
            }
            generation = inner.state.async_started();
        }
        match plan {
            ContentPlan::Painting { image_url } => {
                self.spawn_texture_load(image_url, generation, false)
            }
            ContentPlan::Placeholder { image_url } => {
                self.spawn_texture_load(image_url, generation, true)
            }
            ContentPlan::LoadedModel { model_url } => self.spawn_model_load(model_url, generation),
        }
    }

    /// Begin the per-frame loop: content rotation, orbit damping, render.
    /// One loop per resource set; the pending callback handle is stored so
    /// dispose can always cancel it.
    pub fn start_render_loop(&self, rotation_speed: f32) {
        let running = {
            let mut inner = self.inner.borrow_mut();
            if inner.state.raf_handle().is_some()
                || !matches!(
                    inner.state.phase(),
                    Phase::Initialized | Phase::ContentBuilt
                )
            {
                log::warn!("render loop already running or manager not ready; ignoring");
                return;
            }
            inner.rotation_speed = rotation_speed;
            inner.last_instant = Instant::now();
            inner.running.set(true);
            inner.running.clone()
        };

        let inner = Rc::clone(&self.inner);
        let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
        let tick_clone = tick.clone();
        *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
            if !running.get() {
                return;
            }
            inner.borrow_mut().frame();
            if let Some(w) = web::window() {
                if let Ok(handle) = w.request_animation_frame(
                    tick_clone
                        .borrow()
                        .as_ref()
                        .unwrap()
                        .as_ref()
                        .unchecked_ref(),
                ) {
                    inner.borrow_mut().state.store_raf(handle);
                }
            }
        }) as Box<dyn FnMut()>));
        self.inner.borrow_mut().tick = Some(tick.clone());
        if let Some(w) = web::window() {
            if let Ok(handle) =
                w.request_animation_frame(tick.borrow().as_ref().unwrap().as_ref().unchecked_ref())
            {
                self.inner.borrow_mut().state.loop_started(handle);
            }
        }
    }

    /// Re-read the mount bounds and resize camera and surface to match.
    /// Idempotent; a no-op outside the live phases.
    pub fn handle_resize(&self) {
        let mut guard = self.inner.borrow_mut();
        if !guard.state.resize_allowed() {
            return;
        }
        let inner = &mut *guard;
        let (Some(mount), Some(canvas)) = (inner.mount.as_ref(), inner.canvas.as_ref()) else {
            return;
        };
        let (width, height) = dom::mount_size(mount);
        if width == 0 || height == 0 {
            return;
        }
        canvas.set_width(width);
        canvas.set_height(height);
        inner.camera.borrow_mut().set_viewport(width, height);
        if let Some(gpu) = inner.gpu.as_mut() {
            gpu.resize_if_needed(width, height);
        }
    }

    /// Unwind everything: cancel the loop, remove the resize listener (same
    /// closure identity that was registered), release the graphics context,
    /// destroy scene geometry/materials, clear the mount. Safe to call any
    /// number of times.
    pub fn dispose(&self) {
        let mut guard = self.inner.borrow_mut();
        let inner = &mut *guard;
        let Some(actions) = inner.state.dispose() else {
            return;
        };
        inner.running.set(false);
        if let Some(window) = web::window() {
            if let Some(handle) = actions.raf {
                let _ = window.cancel_animation_frame(handle);
            }
            if actions.remove_resize_listener {
                if let Some(closure) = inner.resize_closure.take() {
                    let _ = window.remove_event_listener_with_callback(
                        "resize",
                        closure.as_ref().unchecked_ref(),
                    );
                }
            }
        }
        inner.resize_closure = None;
        // Drop the tick closure itself; it holds the clone of its own slot
        // (and of this scene) that keeps the loop bundle alive.
        if let Some(tick) = inner.tick.take() {
            tick.borrow_mut().take();
        }
        if let Some(mut gpu) = inner.gpu.take() {
            gpu.destroy();
        }
        if let Some(mount) = inner.mount.take() {
            dom::clear_children(&mount);
        }
        inner.canvas = None;
    }

    fn register_resize_listener(&self) {
        let handle = self.clone();
        let closure = Closure::wrap(Box::new(move || handle.handle_resize()) as Box<dyn FnMut()>);
        if let Some(window) = web::window() {
            if window
                .add_event_listener_with_callback("resize", closure.as_ref().unchecked_ref())
                .is_ok()
            {
                let mut inner = self.inner.borrow_mut();
                inner.resize_closure = Some(closure);
                inner.state.mark_resize_listener();
            }
        }
    }

    fn spawn_texture_load(&self, url: &'static str, generation: Generation, quiet: bool) {
        let inner = Rc::clone(&self.inner);
        spawn_local(async move {
            match assets::fetch_image(url).await {
                Ok(img) => {
                    let mut guard = inner.borrow_mut();
                    let inner = &mut *guard;
                    if !inner.state.async_result_valid(generation) {
                        log::debug!("texture {url} arrived after dispose; discarding");
                        return;
                    }
                    if let Some(gpu) = inner.gpu.as_mut() {
                        gpu.apply_content_texture(&img);
                    }
                }
                // Cosmetic failure: the material stays untextured.
                Err(e) if quiet => log::debug!("texture load failed for {url}: {e:#}"),
                Err(e) => log::warn!("texture load failed for {url}: {e:#}"),
            }
        });
    }

    fn spawn_model_load(&self, url: &'static str, generation: Generation) {
        let inner = Rc::clone(&self.inner);
        spawn_local(async move {
            let loaded = match assets::fetch_bytes(url).await {
                Ok(bytes) => assets::parse_glb(&bytes),
                Err(e) => Err(e),
            };
            match loaded {
                Ok(model) => {
                    let mut guard = inner.borrow_mut();
                    let inner = &mut *guard;
                    if !inner.state.async_result_valid(generation) {
                        log::info!("model {url} finished loading after dispose; discarding");
                        return;
                    }
                    if let Some(gpu) = inner.gpu.as_mut() {
                        gpu.set_model_content(&model);
                        inner.state.content_installed();
                    }
                }
                // The scene stays without content; the 2D view remains the
                // caller's fallback.
                Err(e) => log::error!("model load failed for {url}: {e:#}"),
            }
        });
    }
}

impl Default for SceneManager {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneInner {
    fn frame(&mut self) {
        let now = Instant::now();
        let dt_sec = (now - self.last_instant).as_secs_f32();
        self.last_instant = now;

        self.camera.borrow_mut().update(dt_sec);
        if self.state.has_content() {
            self.rotation_y += self.rotation_speed;
        }
        let view_proj = self.camera.borrow().view_proj();
        if let Some(gpu) = self.gpu.as_mut() {
            match gpu.render(view_proj, self.rotation_y) {
                Ok(()) => {}
                Err(wgpu::SurfaceError::Lost | wgpu::SurfaceError::Outdated) => {
                    log::warn!("surface lost; reconfiguring");
                    gpu.reconfigure();
                }
                Err(e) => log::error!("render error: {:?}", e),
            }
        }
    }
}
