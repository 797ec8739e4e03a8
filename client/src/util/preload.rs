//! Off-screen image loading.
//!
//! `measure` resolves once the browser has decoded the image so the session
//! can plan the projection from its natural size. `warm` only primes the HTTP
//! cache for the next image in order.

use std::cell::RefCell;
use std::rc::Rc;

use futures::channel::oneshot;
use gallery::GalleryError;
use wasm_bindgen::JsCast;
use wasm_bindgen::closure::Closure;
use web_sys::HtmlImageElement;

type Settle = Rc<RefCell<Option<oneshot::Sender<bool>>>>;

fn settle(slot: &Settle, loaded: bool) {
    if let Some(tx) = slot.borrow_mut().take() {
        if tx.send(loaded).is_err() {
            log::debug!("preload receiver dropped");
        }
    }
}

fn anonymous_image(url: &str) -> Result<HtmlImageElement, GalleryError> {
    let image = HtmlImageElement::new()
        .map_err(|e| GalleryError::Transport(format!("image element unavailable for {url}: {e:?}")))?;
    image.set_cross_origin(Some("anonymous"));
    Ok(image)
}

/// Load `url` and return its natural `(width, height)`.
///
/// # Errors
///
/// Returns `Transport` if the image fails to load.
pub async fn measure(url: &str) -> Result<(u32, u32), GalleryError> {
    let image = anonymous_image(url)?;
    let (tx, rx) = oneshot::channel::<bool>();
    let slot: Settle = Rc::new(RefCell::new(Some(tx)));

    let on_load = {
        let slot = Rc::clone(&slot);
        Closure::wrap(Box::new(move || settle(&slot, true)) as Box<dyn FnMut()>)
    };
    let on_error = {
        let slot = Rc::clone(&slot);
        Closure::wrap(Box::new(move || settle(&slot, false)) as Box<dyn FnMut()>)
    };
    image.set_onload(Some(on_load.as_ref().unchecked_ref()));
    image.set_onerror(Some(on_error.as_ref().unchecked_ref()));
    image.set_src(url);

    let loaded = rx.await;
    image.set_onload(None);
    image.set_onerror(None);
    drop((on_load, on_error));

    match loaded {
        Ok(true) => Ok((image.natural_width(), image.natural_height())),
        Ok(false) => Err(GalleryError::Transport(format!("image failed to load: {url}"))),
        Err(_) => Err(GalleryError::Transport(format!("preload abandoned: {url}"))),
    }
}

/// Start fetching `url` so a later switch hits the cache.
pub fn warm(url: &str) {
    match anonymous_image(url) {
        Ok(image) => image.set_src(url),
        Err(e) => log::debug!("cache warm skipped: {e}"),
    }
}
