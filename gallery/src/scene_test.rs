use std::cell::RefCell;
use std::rc::Rc;

use super::*;
use crate::projection::plan;

type Log = Rc<RefCell<Vec<String>>>;

struct FakeEngine {
    log: Log,
    fail: bool,
}

struct FakeInstance {
    id: usize,
    bounds: (f64, f64),
    log: Log,
}

impl PanoramaInstance for FakeInstance {
    fn destroy(self) {
        self.log.borrow_mut().push(format!("destroy {}", self.id));
    }

    fn set_field_of_view(&mut self, degrees: f64, transition_ms: u32) {
        self.log.borrow_mut().push(format!("fov {degrees} {transition_ms}"));
    }

    fn set_pitch(&mut self, degrees: f64, transition_ms: u32) {
        self.log.borrow_mut().push(format!("pitch {degrees} {transition_ms}"));
    }

    fn start_auto_rotate(&mut self, speed: f64) {
        self.log.borrow_mut().push(format!("rotate {speed}"));
    }

    fn stop_auto_rotate(&mut self) {
        self.log.borrow_mut().push("stop".to_owned());
    }

    fn field_of_view_bounds(&self) -> (f64, f64) {
        self.bounds
    }
}

impl PanoramaEngine for FakeEngine {
    type Instance = FakeInstance;
    type Error = String;

    fn create(&self, build: &SceneBuild) -> Result<FakeInstance, String> {
        if self.fail {
            return Err("webgl unavailable".to_owned());
        }
        self.log.borrow_mut().push(format!("create {}", build.index));
        Ok(FakeInstance {
            id: build.index,
            bounds: (build.config.min_field_of_view, build.config.max_field_of_view),
            log: Rc::clone(&self.log),
        })
    }
}

fn build(index: usize, ratio: f64) -> SceneBuild {
    SceneBuild {
        generation: index as u64 + 1,
        index,
        image_url: format!("https://img/{index}.jpg"),
        config: plan(ratio).expect("config"),
    }
}

#[test]
fn rebuild_destroys_previous_instance_first() {
    let log = Log::default();
    let mut slot = SceneSlot::new(FakeEngine { log: Rc::clone(&log), fail: false });
    slot.rebuild(&build(0, 2.0)).expect("first");
    slot.rebuild(&build(1, 3.0)).expect("second");
    assert_eq!(*log.borrow(), vec!["create 0", "destroy 0", "create 1"]);
    assert_eq!(slot.live_generation(), Some(2));
}

#[test]
fn failed_rebuild_leaves_slot_empty() {
    let log = Log::default();
    let mut slot = SceneSlot::new(FakeEngine { log: Rc::clone(&log), fail: true });
    assert!(slot.rebuild(&build(0, 2.0)).is_err());
    assert_eq!(slot.live_generation(), None);
}

#[test]
fn zoom_out_uses_instance_bounds() {
    let log = Log::default();
    let mut slot = SceneSlot::new(FakeEngine { log: Rc::clone(&log), fail: false });
    slot.rebuild(&build(0, 4.0)).expect("build");
    slot.apply(SceneCommand::ZoomOutFully { transition_ms: 1000 });
    slot.apply(SceneCommand::SetPitch { degrees: 0.0, transition_ms: 1000 });
    slot.apply(SceneCommand::StartAutoRotate { speed: -2.0 });
    slot.apply(SceneCommand::StopAutoRotate);
    assert_eq!(*log.borrow(), vec!["create 0", "fov 80 1000", "pitch 0 1000", "rotate -2", "stop"]);
}

#[test]
fn commands_without_scene_are_ignored() {
    let log = Log::default();
    let mut slot = SceneSlot::new(FakeEngine { log: Rc::clone(&log), fail: false });
    slot.apply(SceneCommand::StopAutoRotate);
    slot.teardown();
    assert!(log.borrow().is_empty());
}

#[test]
fn renderer_options_use_engine_key_names() {
    let json = serde_json::to_value(build(0, 3.0).renderer_options()).expect("json");
    assert_eq!(json["type"], "equirectangular");
    assert_eq!(json["autoLoad"], true);
    assert_eq!(json["haov"], 180.0);
    assert_eq!(json["vaov"], 60.0);
    assert_eq!(json["minHfov"], 30.0);
    assert_eq!(json["maxHfov"], 80.0);
    assert_eq!(json["minYaw"], -90.0);
    assert_eq!(json["maxPitch"], 30.0);
}

#[test]
fn renderer_options_omit_bounds_for_spheres() {
    let json = serde_json::to_value(build(0, 2.0).renderer_options()).expect("json");
    assert!(json.get("minYaw").is_none());
    assert!(json.get("minPitch").is_none());
    assert_eq!(json["haov"], 360.0);
}
