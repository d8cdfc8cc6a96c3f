//! View toggle between the flat 2D image and the live 3D scene.
//!
//! The controller enforces the one-manager rule: at most one live
//! `SceneManager` exists per mount, every exit from the 3D view disposes it,
//! and switching artwork always lands back on the 2D view with no scene
//! alive.

use std::cell::RefCell;
use std::rc::Rc;

use wasm_bindgen_futures::spawn_local;
use web_sys as web;

use crate::catalog::{ArtworkRecord, Catalog, ModelRegistry};
use crate::constants::ROTATION_SPEED_PER_FRAME;
use crate::dom;
use crate::scene::SceneManager;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewMode {
    TwoD,
    ThreeD,
}

/// The detail-page elements the controller drives.
pub struct ViewerElements {
    /// Flat reproduction shown in 2D mode.
    pub image: web::HtmlImageElement,
    /// Container the 3D scene renders into.
    pub scene_mount: web::HtmlElement,
    pub button_2d: Option<web::Element>,
    pub button_3d: Option<web::Element>,
}

#[derive(Clone)]
pub struct ViewerController {
    inner: Rc<RefCell<ViewerInner>>,
}

struct ViewerInner {
    mode: ViewMode,
    artwork: Option<&'static ArtworkRecord>,
    scene: Option<SceneManager>,
    catalog: Catalog,
    models: ModelRegistry,
    elements: ViewerElements,
}

impl ViewerController {
    pub fn new(elements: ViewerElements) -> Self {
        let controller = Self {
            inner: Rc::new(RefCell::new(ViewerInner {
                mode: ViewMode::TwoD,
                artwork: None,
                scene: None,
                catalog: Catalog::new(),
                models: ModelRegistry::new(),
                elements,
            })),
        };
        controller.inner.borrow().apply_presentation();
        controller
    }

    pub fn mode(&self) -> ViewMode {
        self.inner.borrow().mode
    }

    pub fn artwork_id(&self) -> Option<u32> {
        self.inner.borrow().artwork.map(|a| a.id)
    }

    /// Select the artwork to present. Always disposes any live scene and
    /// resets the mode to 2D, matching the page's navigation behavior.
    pub fn set_artwork(&self, id: u32) {
        let mut inner = self.inner.borrow_mut();
        if let Some(scene) = inner.scene.take() {
            scene.dispose();
        }
        inner.mode = ViewMode::TwoD;
        let Some(art) = inner.catalog.get(id) else {
            log::warn!("unknown artwork id {id}");
            inner.artwork = None;
            inner.apply_presentation();
            return;
        };
        inner.artwork = Some(art);
        inner.elements.image.set_src(art.image_url);
        inner.elements.image.set_alt(art.title);
        inner.apply_presentation();
        log::info!("showing artwork {} ({})", art.id, art.title);
    }

    pub fn set_mode(&self, mode: ViewMode) {
        let art = {
            let mut inner = self.inner.borrow_mut();
            if inner.mode == mode {
                return;
            }
            match mode {
                ViewMode::TwoD => {
                    if let Some(scene) = inner.scene.take() {
                        scene.dispose();
                    }
                    inner.mode = ViewMode::TwoD;
                    inner.apply_presentation();
                    return;
                }
                ViewMode::ThreeD => {
                    let Some(art) = inner.artwork else {
                        log::warn!("3D view requested with no artwork selected");
                        return;
                    };
                    // One live manager per mount: a leftover (there should be
                    // none) goes down before the replacement exists.
                    if let Some(scene) = inner.scene.take() {
                        scene.dispose();
                    }
                    inner.mode = ViewMode::ThreeD;
                    inner.scene = Some(SceneManager::new());
                    inner.apply_presentation();
                    art
                }
            }
        };
        self.spawn_scene_start(art);
    }

    /// Dispose everything the controller holds. The page can navigate away
    /// afterwards with no scene resources left behind.
    pub fn teardown(&self) {
        let mut inner = self.inner.borrow_mut();
        if let Some(scene) = inner.scene.take() {
            scene.dispose();
        }
        inner.mode = ViewMode::TwoD;
        inner.artwork = None;
        inner.apply_presentation();
    }

    fn spawn_scene_start(&self, art: &'static ArtworkRecord) {
        let controller = self.clone();
        spawn_local(async move {
            let (scene, mount, models) = {
                let inner = controller.inner.borrow();
                let Some(scene) = inner.scene.clone() else {
                    return;
                };
                (
                    scene,
                    inner.elements.scene_mount.clone(),
                    inner.models.clone(),
                )
            };
            if scene.initialize(&mount).await {
                scene.build_content(art, &models);
                scene.start_render_loop(ROTATION_SPEED_PER_FRAME);
            } else {
                // Only revert if this manager is still the live one; the
                // user may have toggled away (and back) during the await.
                let still_current = controller
                    .inner
                    .borrow()
                    .scene
                    .as_ref()
                    .is_some_and(|current| current.same_instance(&scene));
                if still_current {
                    log::warn!("3D view unavailable; staying on the 2D image");
                    controller.set_mode(ViewMode::TwoD);
                }
            }
        });
    }
}

impl ViewerInner {
    fn apply_presentation(&self) {
        let three_d = self.mode == ViewMode::ThreeD;
        dom::set_visible(&self.elements.image, !three_d);
        dom::set_visible(&self.elements.scene_mount, three_d);
        set_active(self.elements.button_2d.as_ref(), !three_d);
        set_active(self.elements.button_3d.as_ref(), three_d);
    }
}

fn set_active(button: Option<&web::Element>, active: bool) {
    if let Some(button) = button {
        let list = button.class_list();
        let _ = if active {
            list.add_1("active")
        } else {
            list.remove_1("active")
        };
    }
}
