// Lifecycle bookkeeping for one scene resource set.
//
// The scene manager owns exactly one render-loop handle, at most one
// resize-listener registration, and at most one content object. This module
// tracks those registrations and the phase machine
// `Uninitialized -> Initialized -> ContentBuilt -> Animating -> Disposed`
// as plain state, so ordering, idempotence, and the stale-async guard can be
// verified host-side without a browser.

/// Handle returned by the per-frame callback scheduler
/// (`requestAnimationFrame` on the web side).
pub type RafHandle = i32;

/// Monotonically increasing tag; async completions started under an older
/// generation must discard their result. Bumped on every content rebuild and
/// on dispose.
pub type Generation = u64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Uninitialized,
    Initialized,
    ContentBuilt,
    Animating,
    /// Terminal; a fresh instance is required to show another scene.
    Disposed,
}

/// What the caller must actually unwind after the first `dispose()`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisposeActions {
    /// Pending per-frame callback to cancel, if a loop was running.
    pub raf: Option<RafHandle>,
    /// Whether a window-resize listener is registered and must be removed.
    pub remove_resize_listener: bool,
    /// Whether a content object is live and must have its geometry and
    /// material(s) destroyed.
    pub destroy_content: bool,
}

#[derive(Debug)]
pub struct LifecycleState {
    phase: Phase,
    generation: Generation,
    raf: Option<RafHandle>,
    resize_registered: bool,
    has_content: bool,
    content_disposals: u64,
}

impl LifecycleState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            generation: 0,
            raf: None,
            resize_registered: false,
            has_content: false,
            content_disposals: 0,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn raf_handle(&self) -> Option<RafHandle> {
        self.raf
    }

    pub fn resize_listener_registered(&self) -> bool {
        self.resize_registered
    }

    pub fn has_content(&self) -> bool {
        self.has_content
    }

    /// How many previous content objects have been destroyed by rebuilds.
    pub fn content_disposals(&self) -> u64 {
        self.content_disposals
    }

    /// Enter `Initialized`. Fails on a zero-area mount or when this instance
    /// has already been used; no state changes on failure.
    pub fn begin_init(&mut self, width: u32, height: u32) -> bool {
        if self.phase != Phase::Uninitialized || width == 0 || height == 0 {
            return false;
        }
        self.phase = Phase::Initialized;
        true
    }

    pub fn mark_resize_listener(&mut self) {
        self.resize_registered = true;
    }

    /// Begin building content. Returns `None` on misuse (before init or after
    /// dispose); otherwise whether a previous content object must be
    /// destroyed first. The scene never holds two content objects: the old
    /// one is gone before the new one exists, and any load still in flight
    /// for the old one is invalidated by the generation bump.
    pub fn replace_content(&mut self) -> Option<bool> {
        match self.phase {
            Phase::Initialized | Phase::ContentBuilt | Phase::Animating => {}
            _ => return None,
        }
        self.generation += 1;
        let had_previous = self.has_content;
        if had_previous {
            self.content_disposals += 1;
        }
        // Content may arrive asynchronously; the slot is empty until
        // `content_installed`.
        self.has_content = false;
        if self.phase == Phase::Initialized {
            self.phase = Phase::ContentBuilt;
        }
        Some(had_previous)
    }

    /// A content object is now live in the scene.
    pub fn content_installed(&mut self) {
        self.has_content = true;
    }

    /// Start the render loop with the scheduler handle of the first tick.
    /// Only one loop may exist per resource set.
    pub fn loop_started(&mut self, handle: RafHandle) -> bool {
        match self.phase {
            Phase::Initialized | Phase::ContentBuilt if self.raf.is_none() => {
                self.raf = Some(handle);
                self.phase = Phase::Animating;
                true
            }
            _ => false,
        }
    }

    /// The self-scheduling loop stores each newly issued handle so dispose
    /// can always cancel the pending tick.
    pub fn store_raf(&mut self, handle: RafHandle) {
        if self.phase == Phase::Animating {
            self.raf = Some(handle);
        }
    }

    pub fn resize_allowed(&self) -> bool {
        matches!(
            self.phase,
            Phase::Initialized | Phase::ContentBuilt | Phase::Animating
        )
    }

    /// Tag an asynchronous load with the current generation.
    pub fn async_started(&self) -> Generation {
        self.generation
    }

    /// A completion callback may touch the scene only if nothing was disposed
    /// or rebuilt since it started; otherwise it must discard its result.
    pub fn async_result_valid(&self, started: Generation) -> bool {
        self.phase != Phase::Disposed && started == self.generation
    }

    /// First call yields the unwind actions and moves to the terminal phase;
    /// every later call is a no-op returning `None`.
    pub fn dispose(&mut self) -> Option<DisposeActions> {
        if self.phase == Phase::Disposed {
            return None;
        }
        let actions = DisposeActions {
            raf: self.raf.take(),
            remove_resize_listener: self.resize_registered,
            destroy_content: self.has_content,
        };
        self.resize_registered = false;
        self.has_content = false;
        self.generation += 1;
        self.phase = Phase::Disposed;
        Some(actions)
    }
}

impl Default for LifecycleState {
    fn default() -> Self {
        Self::new()
    }
}
