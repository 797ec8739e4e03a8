//! Browser runtime for the viewer.
//!
//! ARCHITECTURE
//! ============
//! `ViewerSession` (gallery crate) and `Engine` (canvas crate) are pure state
//! machines that return effects and actions. This module is the only place
//! that carries them out: it owns the Pannellum scene slot, the idle timers,
//! the pending preload and the overlay engine, and mirrors visible state into
//! the reactive view models.
//!
//! Borrow discipline: the `RefCell` is never held across a dispatch. Every
//! JS callback (timers, image loads, scene events) re-enters through a
//! `Weak` handle on a fresh task.

use std::cell::RefCell;
use std::rc::{Rc, Weak};

use canvas::engine::{Action, Engine};
use canvas::input::ToolState;
use canvas::stroke::Point;
use gallery::idle::TimerToken;
use gallery::scene::{SceneBuild, SceneSlot};
use gallery::session::{LoadTicket, Navigation};
use gallery::{GalleryConfig, GalleryError, Resolution, SessionEffect, ViewerSession};
use gloo_timers::callback::Timeout;
use leptos::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::{HtmlCanvasElement, HtmlElement};

use crate::state::annotation::AnnotationState;
use crate::state::viewer::ViewerState;
use crate::util::panorama::{PannellumEngine, SceneEvent, SceneListener};
use crate::util::preload;
use crate::util::timers::BrowserTimers;
use crate::util::ui_persistence::save_tool_prefs;

struct Runtime {
    config: GalleryConfig,
    session: ViewerSession,
    scene: Option<SceneSlot<PannellumEngine>>,
    timers: BrowserTimers,
    preload_timer: Option<Timeout>,
    overlay: Option<Engine>,
    overlay_canvas: Option<HtmlCanvasElement>,
    render_pending: bool,
}

/// Shared handle to the runtime.
#[derive(Clone)]
pub struct ViewerHandle {
    inner: Rc<RefCell<Runtime>>,
    viewer: RwSignal<ViewerState>,
    annotation: RwSignal<AnnotationState>,
}

#[derive(Clone)]
struct WeakHandle {
    inner: Weak<RefCell<Runtime>>,
    viewer: RwSignal<ViewerState>,
    annotation: RwSignal<AnnotationState>,
}

impl WeakHandle {
    fn upgrade(&self) -> Option<ViewerHandle> {
        let inner = self.inner.upgrade()?;
        Some(ViewerHandle { inner, viewer: self.viewer, annotation: self.annotation })
    }
}

impl ViewerHandle {
    pub fn new(config: GalleryConfig, viewer: RwSignal<ViewerState>, annotation: RwSignal<AnnotationState>) -> Self {
        let runtime = Runtime {
            session: ViewerSession::new(config.playback),
            config,
            scene: None,
            timers: BrowserTimers::default(),
            preload_timer: None,
            overlay: None,
            overlay_canvas: None,
            render_pending: false,
        };
        Self { inner: Rc::new(RefCell::new(runtime)), viewer, annotation }
    }

    fn downgrade(&self) -> WeakHandle {
        WeakHandle { inner: Rc::downgrade(&self.inner), viewer: self.viewer, annotation: self.annotation }
    }

    // --- Mounting ---

    /// Bind the panorama container. Scenes are built inside it from now on.
    pub fn attach_stage(&self, container: HtmlElement) {
        let weak = self.downgrade();
        let listener: SceneListener = Rc::new(move |event: SceneEvent| {
            let weak = weak.clone();
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(handle) = weak.upgrade() {
                    handle.scene_event(event);
                }
            });
        });
        self.inner.borrow_mut().scene = Some(SceneSlot::new(PannellumEngine::new(container, listener)));
    }

    /// Bind the annotation canvas with the saved brush preferences.
    pub fn attach_overlay(&self, canvas: HtmlCanvasElement, tools: ToolState) {
        match Engine::new(canvas.clone(), tools) {
            Ok(engine) => {
                let mut rt = self.inner.borrow_mut();
                rt.overlay = Some(engine);
                rt.overlay_canvas = Some(canvas);
            }
            Err(e) => {
                log::error!("annotation overlay unavailable: {e:?}");
                return;
            }
        }
        self.sync_surface();
        self.publish_tools();
    }

    /// Match the overlay's backing store to its CSS box.
    pub fn sync_surface(&self) {
        let Some(window) = web_sys::window() else {
            return;
        };
        let Some(canvas) = self.inner.borrow().overlay_canvas.clone() else {
            return;
        };
        let width = f64::from(canvas.client_width());
        let height = f64::from(canvas.client_height());
        let dpr = window.device_pixel_ratio();
        self.with_overlay(|engine| engine.set_surface(width, height, dpr));
    }

    // --- Gallery ---

    pub fn load(&self, resolution: Resolution) {
        let origin = resolution.origin;
        let (effects, images, config) = {
            let mut rt = self.inner.borrow_mut();
            let effects = rt.session.load(resolution);
            (effects, rt.session.images().to_vec(), rt.config.clone())
        };
        log::info!("gallery loaded with {} images ({origin:?})", images.len());
        self.viewer.update(|v| v.set_gallery(&images, origin, &config));
        self.dispatch(effects);
    }

    pub fn fail(&self, error: &GalleryError) {
        log::error!("gallery unavailable: {error}");
        self.viewer.update(|v| v.show_error(error));
    }

    pub fn navigate(&self, navigation: Navigation) {
        let result = self.inner.borrow_mut().session.navigate(navigation);
        match result {
            Ok(effects) => self.dispatch(effects),
            Err(e) => log::warn!("navigation ignored: {e}"),
        }
    }

    /// Pointer, touch, wheel or key activity on the stage.
    pub fn interaction(&self) {
        let effects = self.inner.borrow_mut().session.interaction();
        self.dispatch(effects);
    }

    // --- Annotation ---

    /// Run an overlay operation and carry out the actions it returns.
    pub fn with_overlay(&self, op: impl FnOnce(&mut Engine) -> Vec<Action>) {
        let actions = match self.inner.borrow_mut().overlay.as_mut() {
            Some(engine) => op(engine),
            None => return,
        };
        self.apply_actions(actions);
    }

    pub fn pointer_down(&self, ev: &web_sys::PointerEvent) {
        let point = pointer_point(ev);
        self.with_overlay(|engine| engine.on_pointer_down(ev.pointer_id(), point));
    }

    pub fn pointer_move(&self, ev: &web_sys::PointerEvent) {
        let point = pointer_point(ev);
        self.with_overlay(|engine| engine.on_pointer_move(ev.pointer_id(), point));
    }

    pub fn pointer_up(&self, ev: &web_sys::PointerEvent) {
        self.with_overlay(|engine| engine.on_pointer_up(ev.pointer_id()));
    }

    pub fn pointer_leave(&self, ev: &web_sys::PointerEvent) {
        self.with_overlay(|engine| engine.on_pointer_leave(ev.pointer_id()));
    }

    fn apply_actions(&self, actions: Vec<Action>) {
        for action in actions {
            match action {
                Action::DrawingEntered => self.set_annotating(true),
                Action::DrawingExited => self.set_annotating(false),
                Action::CapturePointer(id) => self.pointer_capture(id, true),
                Action::ReleasePointer(id) => self.pointer_capture(id, false),
                Action::RenderNeeded => self.request_render(),
                Action::ToolsChanged => self.publish_tools(),
                Action::SegmentAdded => {}
            }
        }
    }

    fn set_annotating(&self, active: bool) {
        let effects = self.inner.borrow_mut().session.set_annotating(active);
        self.dispatch(effects);
    }

    fn pointer_capture(&self, pointer_id: i32, capture: bool) {
        let Some(canvas) = self.inner.borrow().overlay_canvas.clone() else {
            return;
        };
        let result =
            if capture { canvas.set_pointer_capture(pointer_id) } else { canvas.release_pointer_capture(pointer_id) };
        if let Err(e) = result {
            log::debug!("pointer capture {pointer_id} ({capture}): {e:?}");
        }
    }

    fn publish_tools(&self) {
        let snapshot = {
            let rt = self.inner.borrow();
            rt.overlay.as_ref().map(|engine| (AnnotationState::from_core(&engine.core), engine.tools().clone()))
        };
        let Some((state, tools)) = snapshot else {
            return;
        };
        save_tool_prefs(&tools);
        self.annotation.maybe_update(|current| {
            if *current == state {
                return false;
            }
            *current = state;
            true
        });
    }

    fn request_render(&self) {
        {
            let mut rt = self.inner.borrow_mut();
            if rt.render_pending {
                return;
            }
            rt.render_pending = true;
        }
        let Some(window) = web_sys::window() else {
            self.render_now();
            return;
        };

        let weak = self.downgrade();
        let holder: Rc<RefCell<Option<Closure<dyn FnMut(f64)>>>> = Rc::new(RefCell::new(None));
        let holder_for_cb = Rc::clone(&holder);
        let cb = Closure::wrap(Box::new(move |_ts: f64| {
            if let Some(handle) = weak.upgrade() {
                handle.render_now();
            }
            holder_for_cb.borrow_mut().take();
        }) as Box<dyn FnMut(f64)>);

        if window.request_animation_frame(cb.as_ref().unchecked_ref()).is_ok() {
            *holder.borrow_mut() = Some(cb);
        } else {
            self.render_now();
        }
    }

    fn render_now(&self) {
        let mut rt = self.inner.borrow_mut();
        rt.render_pending = false;
        if let Some(engine) = rt.overlay.as_ref() {
            if let Err(e) = engine.render() {
                log::warn!("overlay render failed: {e:?}");
            }
        }
    }

    // --- Effects ---

    fn dispatch(&self, effects: Vec<SessionEffect>) {
        for effect in effects {
            self.viewer.maybe_update(|v| v.apply(&effect));
            match effect {
                SessionEffect::ExitAnnotation => self.with_overlay(Engine::image_switched),
                SessionEffect::Preload { ticket, delay_ms } => self.schedule_preload(ticket, delay_ms),
                SessionEffect::BuildScene(build) => self.build_scene(&build),
                SessionEffect::WarmCache(url) => preload::warm(&url),
                SessionEffect::ScheduleTimer { token, delay_ms } => self.arm_timer(token, delay_ms),
                SessionEffect::CancelTimers => self.inner.borrow_mut().timers.cancel_all(),
                SessionEffect::Scene(command) => {
                    if let Some(slot) = self.inner.borrow_mut().scene.as_mut() {
                        slot.apply(command);
                    }
                }
                SessionEffect::ReportEmpty => log::warn!("gallery has no images"),
                SessionEffect::FadeOut
                | SessionEffect::FadeIn
                | SessionEffect::ShowBadge(_)
                | SessionEffect::ActiveIndex(_)
                | SessionEffect::ShowIdleCue
                | SessionEffect::HideIdleCue => {}
            }
        }
    }

    /// Wait out the fade, then measure the image. A newer switch replaces the
    /// pending timer; in-flight loads are discarded by the session.
    fn schedule_preload(&self, ticket: LoadTicket, delay_ms: u32) {
        let weak = self.downgrade();
        let timeout = Timeout::new(delay_ms, move || {
            wasm_bindgen_futures::spawn_local(async move {
                let dimensions = preload::measure(&ticket.url).await;
                if let Some(handle) = weak.upgrade() {
                    let effects = handle.inner.borrow_mut().session.complete_preload(&ticket, dimensions);
                    handle.dispatch(effects);
                }
            });
        });
        self.inner.borrow_mut().preload_timer = Some(timeout);
    }

    fn build_scene(&self, build: &SceneBuild) {
        let result = match self.inner.borrow_mut().scene.as_mut() {
            Some(slot) => slot.rebuild(build),
            None => Err("panorama stage not mounted".to_owned()),
        };
        if let Err(reason) = result {
            let effects = self.inner.borrow_mut().session.scene_failed(build.generation, &reason);
            self.dispatch(effects);
        }
    }

    fn scene_event(&self, event: SceneEvent) {
        let effects = {
            let mut rt = self.inner.borrow_mut();
            match event {
                SceneEvent::Loaded(generation) => rt.session.scene_loaded(generation),
                SceneEvent::Failed(generation, reason) => rt.session.scene_failed(generation, &reason),
            }
        };
        self.dispatch(effects);
    }

    fn arm_timer(&self, token: TimerToken, delay_ms: u32) {
        let weak = self.downgrade();
        let timeout = Timeout::new(delay_ms, move || {
            wasm_bindgen_futures::spawn_local(async move {
                if let Some(handle) = weak.upgrade() {
                    handle.timer_fired(token);
                }
            });
        });
        self.inner.borrow_mut().timers.arm(token, timeout);
    }

    fn timer_fired(&self, token: TimerToken) {
        let effects = {
            let mut rt = self.inner.borrow_mut();
            if !rt.timers.fired(token) {
                return;
            }
            rt.session.on_timer(token)
        };
        self.dispatch(effects);
    }
}

/// Context entry components capture in their handlers. `Copy` and `Send`,
/// unlike the handle itself.
pub type RuntimeRef = StoredValue<ViewerHandle, LocalStorage>;

pub fn provide_runtime(handle: ViewerHandle) {
    provide_context::<RuntimeRef>(StoredValue::new_local(handle));
}

/// Run `f` against the runtime if it is still alive.
pub fn with_runtime(runtime: RuntimeRef, f: impl FnOnce(&ViewerHandle)) {
    if let Some(handle) = runtime.try_get_value() {
        f(&handle);
    }
}

fn pointer_point(ev: &web_sys::PointerEvent) -> Point {
    Point::new(f64::from(ev.offset_x()), f64::from(ev.offset_y()))
}
