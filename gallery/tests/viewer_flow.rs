//! End-to-end viewer flow: resolve a listing, drive the session through
//! switches and idle timers, and apply every effect to a recording renderer.

use std::cell::RefCell;
use std::rc::Rc;

use gallery::idle::{TimerKind, TimerToken};
use gallery::listing::GalleryDataSource;
use gallery::scene::{PanoramaEngine, PanoramaInstance, SceneBuild, SceneCommand, SceneSlot};
use gallery::session::{LoadTicket, Navigation};
use gallery::store::{RemoteEntry, StoreError};
use gallery::{GalleryConfig, ListingOrigin, SessionEffect, ViewerSession};

type Log = Rc<RefCell<Vec<String>>>;

struct RecordingEngine {
    log: Log,
}

struct RecordingInstance {
    url: String,
    max_fov: f64,
    log: Log,
}

impl PanoramaInstance for RecordingInstance {
    fn destroy(self) {
        self.log.borrow_mut().push(format!("destroy {}", self.url));
    }

    fn set_field_of_view(&mut self, degrees: f64, _transition_ms: u32) {
        self.log.borrow_mut().push(format!("fov {degrees}"));
    }

    fn set_pitch(&mut self, degrees: f64, _transition_ms: u32) {
        self.log.borrow_mut().push(format!("pitch {degrees}"));
    }

    fn start_auto_rotate(&mut self, speed: f64) {
        self.log.borrow_mut().push(format!("rotate {speed}"));
    }

    fn stop_auto_rotate(&mut self) {
        self.log.borrow_mut().push("stop rotate".to_owned());
    }

    fn field_of_view_bounds(&self) -> (f64, f64) {
        (30.0, self.max_fov)
    }
}

impl PanoramaEngine for RecordingEngine {
    type Instance = RecordingInstance;
    type Error = String;

    fn create(&self, build: &SceneBuild) -> Result<RecordingInstance, String> {
        self.log.borrow_mut().push(format!("create {}", build.index));
        Ok(RecordingInstance {
            url: build.image_url.clone(),
            max_fov: build.config.max_field_of_view,
            log: Rc::clone(&self.log),
        })
    }
}

/// Applies effects the way the browser client does, minus the DOM.
struct Host {
    slot: SceneSlot<RecordingEngine>,
    log: Log,
    opaque: bool,
    pending: Vec<LoadTicket>,
    timers: Vec<TimerToken>,
    built: Vec<u64>,
    badge: Option<&'static str>,
    warmed: Vec<String>,
    annotation_exits: usize,
}

impl Host {
    fn new() -> Self {
        let log = Log::default();
        Self {
            slot: SceneSlot::new(RecordingEngine { log: Rc::clone(&log) }),
            log,
            opaque: false,
            pending: Vec::new(),
            timers: Vec::new(),
            built: Vec::new(),
            badge: None,
            warmed: Vec::new(),
            annotation_exits: 0,
        }
    }

    fn apply(&mut self, effects: Vec<SessionEffect>) {
        for effect in effects {
            match effect {
                SessionEffect::ExitAnnotation => self.annotation_exits += 1,
                SessionEffect::FadeOut => self.opaque = true,
                SessionEffect::FadeIn => self.opaque = false,
                SessionEffect::Preload { ticket, .. } => self.pending.push(ticket),
                SessionEffect::BuildScene(build) => {
                    self.slot.rebuild(&build).expect("recording engine never fails");
                    self.built.push(build.generation);
                }
                SessionEffect::ShowBadge(label) => self.badge = Some(label),
                SessionEffect::WarmCache(url) => self.warmed.push(url),
                SessionEffect::ScheduleTimer { token, .. } => self.timers.push(token),
                SessionEffect::CancelTimers => self.timers.clear(),
                SessionEffect::Scene(command) => self.slot.apply(command),
                SessionEffect::ActiveIndex(_)
                | SessionEffect::ShowIdleCue
                | SessionEffect::HideIdleCue
                | SessionEffect::ReportEmpty => {}
            }
        }
    }

    fn timer(&self, kind: TimerKind) -> TimerToken {
        *self.timers.iter().find(|t| t.kind == kind).expect("timer armed")
    }
}

fn listing() -> Vec<RemoteEntry> {
    ["img10.jpg", "img2.jpg", "hidden_draft.jpg", "img1.jpg"]
        .into_iter()
        .map(|name| RemoteEntry {
            name: name.to_owned(),
            path: format!("images/{name}"),
            download_url: None,
            sha: format!("sha-{name}"),
            kind: "file".to_owned(),
        })
        .collect()
}

fn started(host: &mut Host) -> ViewerSession {
    let source = GalleryDataSource::new(GalleryConfig::default());
    let resolution = source.resolve(Ok(listing())).expect("resolve");
    let mut session = ViewerSession::new(GalleryConfig::default().playback);
    host.apply(session.load(resolution));
    session
}

#[test]
fn first_image_cross_fades_in() {
    let mut host = Host::new();
    let mut session = started(&mut host);
    assert_eq!(session.images().len(), 3);
    assert!(host.opaque);

    let ticket = host.pending.pop().expect("preload");
    host.apply(session.complete_preload(&ticket, Ok((8000, 4000))));
    assert_eq!(host.badge, Some("360° Sphere"));
    assert!(host.opaque, "overlay stays opaque until the scene reports loaded");

    host.apply(session.scene_loaded(ticket.generation));
    assert!(!host.opaque);
    assert_eq!(host.warmed.len(), 1);
    assert!(host.warmed[0].contains("img2.jpg"));
}

#[test]
fn rapid_switches_build_only_the_latest_scene() {
    let mut host = Host::new();
    let mut session = started(&mut host);
    host.apply(session.navigate(Navigation::Next).expect("next"));
    host.apply(session.navigate(Navigation::Next).expect("next"));

    let tickets: Vec<_> = host.pending.drain(..).collect();
    assert_eq!(tickets.len(), 3);
    // Completions arrive out of order.
    for ticket in tickets.iter().rev() {
        host.apply(session.complete_preload(ticket, Ok((6000, 1000))));
    }
    assert_eq!(host.built, vec![session.generation()]);
    assert_eq!(session.current_index(), 2);
    assert_eq!(host.badge, Some("Panorama"));
}

#[test]
fn idle_attract_then_advance() {
    let mut host = Host::new();
    let mut session = started(&mut host);
    let ticket = host.pending.pop().expect("preload");
    host.apply(session.complete_preload(&ticket, Ok((3000, 1000))));
    host.apply(session.scene_loaded(ticket.generation));

    let attract = host.timer(TimerKind::Attract);
    host.apply(session.on_timer(attract));
    assert!(session.idle().is_cue_visible());
    let log = host.log.borrow().clone();
    assert_eq!(&log[log.len() - 3..], ["fov 80", "pitch 0", "rotate -2"]);

    let advance = host.timer(TimerKind::Advance);
    host.apply(session.on_timer(advance));
    assert_eq!(session.current_index(), 1);
    assert!(!session.idle().is_cue_visible());
    assert!(host.opaque);
}

#[test]
fn annotation_holds_off_auto_advance() {
    let mut host = Host::new();
    let mut session = started(&mut host);
    let advance = host.timer(TimerKind::Advance);

    host.apply(session.set_annotating(true));
    assert!(host.timers.is_empty());
    assert!(session.on_timer(advance).is_empty());
    assert_eq!(session.current_index(), 0);

    host.apply(session.set_annotating(false));
    assert_eq!(host.timers.len(), 2);
}

#[test]
fn failed_listing_uses_fallback() {
    let source = GalleryDataSource::new(GalleryConfig::default());
    let resolution = source.resolve(Err(StoreError::Request("offline".into()))).expect("fallback");
    assert_eq!(resolution.origin, ListingOrigin::Fallback);

    let mut host = Host::new();
    let mut session = ViewerSession::new(GalleryConfig::default().playback);
    host.apply(session.load(resolution));
    assert_eq!(session.images().len(), 20);
    assert_eq!(host.annotation_exits, 1);
    host.apply(session.navigate(Navigation::Previous).expect("previous"));
    assert_eq!(session.current_index(), 19);
    assert!(host.slot.live_generation().is_none());
    host.apply(vec![SessionEffect::Scene(SceneCommand::StopAutoRotate)]);
    assert!(host.log.borrow().is_empty());
}
