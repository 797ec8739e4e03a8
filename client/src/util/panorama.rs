//! Pannellum bindings behind the gallery's `PanoramaEngine` contract.
//!
//! The page loads `pannellum.js` globally. Each scene is created inside the
//! stage container and destroyed before the next one, so at most one WebGL
//! context is alive.

use std::rc::Rc;

use gallery::scene::{PanoramaEngine, PanoramaInstance, SceneBuild};
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use wasm_bindgen::prelude::*;
use web_sys::HtmlElement;

#[wasm_bindgen]
extern "C" {
    /// A live `pannellum.Viewer`.
    pub type Viewer;

    #[wasm_bindgen(js_namespace = pannellum, js_name = viewer, catch)]
    fn create_viewer(container: &HtmlElement, options: &JsValue) -> Result<Viewer, JsValue>;

    #[wasm_bindgen(method)]
    fn destroy(this: &Viewer);

    #[wasm_bindgen(method, js_name = setHfov)]
    fn set_hfov(this: &Viewer, hfov: f64, animated: u32);

    #[wasm_bindgen(method, js_name = setPitch)]
    fn set_pitch(this: &Viewer, pitch: f64, animated: u32);

    #[wasm_bindgen(method, js_name = startAutoRotate)]
    fn start_auto_rotate(this: &Viewer, speed: f64);

    #[wasm_bindgen(method, js_name = stopAutoRotate)]
    fn stop_auto_rotate(this: &Viewer);

    #[wasm_bindgen(method, js_name = getHfovBounds)]
    fn hfov_bounds(this: &Viewer) -> js_sys::Array;

    #[wasm_bindgen(method)]
    fn on(this: &Viewer, event: &str, listener: &js_sys::Function);
}

/// Lifecycle notifications for the scene of one load generation.
#[derive(Debug, Clone, PartialEq)]
pub enum SceneEvent {
    Loaded(u64),
    Failed(u64, String),
}

pub type SceneListener = Rc<dyn Fn(SceneEvent)>;

/// Creates Pannellum viewers inside `container`.
pub struct PannellumEngine {
    container: HtmlElement,
    listener: SceneListener,
}

impl PannellumEngine {
    #[must_use]
    pub fn new(container: HtmlElement, listener: SceneListener) -> Self {
        Self { container, listener }
    }
}

/// One Pannellum viewer plus the event closures it calls back into.
pub struct PannellumScene {
    viewer: Viewer,
    _listeners: (Closure<dyn FnMut()>, Closure<dyn FnMut(JsValue)>),
}

fn describe(value: &JsValue) -> String {
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

impl PanoramaEngine for PannellumEngine {
    type Instance = PannellumScene;
    type Error = String;

    fn create(&self, build: &SceneBuild) -> Result<PannellumScene, String> {
        let options = serde_json::to_string(&build.renderer_options()).map_err(|e| e.to_string())?;
        let options = js_sys::JSON::parse(&options).map_err(|e| describe(&e))?;
        let viewer = create_viewer(&self.container, &options).map_err(|e| describe(&e))?;

        let generation = build.generation;
        let on_load = {
            let listener = Rc::clone(&self.listener);
            Closure::wrap(Box::new(move || listener(SceneEvent::Loaded(generation))) as Box<dyn FnMut()>)
        };
        let on_error = {
            let listener = Rc::clone(&self.listener);
            Closure::wrap(Box::new(move |message: JsValue| {
                listener(SceneEvent::Failed(generation, describe(&message)));
            }) as Box<dyn FnMut(JsValue)>)
        };
        viewer.on("load", on_load.as_ref().unchecked_ref());
        viewer.on("error", on_error.as_ref().unchecked_ref());
        Ok(PannellumScene { viewer, _listeners: (on_load, on_error) })
    }
}

impl PanoramaInstance for PannellumScene {
    fn destroy(self) {
        self.viewer.destroy();
    }

    fn set_field_of_view(&mut self, degrees: f64, transition_ms: u32) {
        self.viewer.set_hfov(degrees, transition_ms);
    }

    fn set_pitch(&mut self, degrees: f64, transition_ms: u32) {
        self.viewer.set_pitch(degrees, transition_ms);
    }

    fn start_auto_rotate(&mut self, speed: f64) {
        self.viewer.start_auto_rotate(speed);
    }

    fn stop_auto_rotate(&mut self) {
        self.viewer.stop_auto_rotate();
    }

    fn field_of_view_bounds(&self) -> (f64, f64) {
        let bounds = self.viewer.hfov_bounds();
        let min = bounds.get(0).as_f64().unwrap_or(50.0);
        let max = bounds.get(1).as_f64().unwrap_or(120.0);
        (min, max)
    }
}
