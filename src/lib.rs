#![cfg(target_arch = "wasm32")]
use std::cell::RefCell;
use std::rc::Rc;

use showroom_core::{AssetManifest, PointsOfInterest, Showroom, DEFAULT_POINTS};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::spawn_local;
use web_sys as web;

mod constants;
mod dom;
mod events;
mod frame;
mod input;
mod loader;
mod overlay;
mod render;

use constants::{ASSET_BASE_URL, CANVAS_SELECTOR, LOADING_BAR_SELECTOR};
use dom::HtmlMarker;

#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();
    console_log::init_with_level(log::Level::Info).ok();
    log::info!("showroom starting");

    spawn_local(async move {
        if let Err(e) = init().await {
            log::error!("init error: {:?}", e);
        }
    });
    Ok(())
}

async fn init() -> anyhow::Result<()> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| anyhow::anyhow!("no document"))?;

    let canvas: web::HtmlCanvasElement = document
        .query_selector(CANVAS_SELECTOR)
        .map_err(|e| anyhow::anyhow!("{:?}", e))?
        .ok_or_else(|| anyhow::anyhow!("missing {}", CANVAS_SELECTOR))?
        .dyn_into::<web::HtmlCanvasElement>()
        .map_err(|e| anyhow::anyhow!(format!("{:?}", e)))?;
    let loading_bar = dom::query_html(&document, LOADING_BAR_SELECTOR);
    if loading_bar.is_none() {
        log::warn!("missing {}; progress will not be shown", LOADING_BAR_SELECTOR);
    }

    // Every configured marker must exist before anything starts
    let points = PointsOfInterest::from_config(&DEFAULT_POINTS, |selector| {
        HtmlMarker::resolve(&document, selector)
    })?;
    log::info!("[points] {} markers resolved", points.len());

    let viewport = dom::window_viewport(&window);
    let showroom = Rc::new(RefCell::new(Showroom::new(points, viewport)));
    events::wire_resize(&canvas, &showroom);

    let uploads: loader::UploadQueue = Rc::new(RefCell::new(Vec::new()));
    loader::Loader::new(showroom.clone(), uploads.clone(), loading_bar.clone())
        .start(AssetManifest::with_base(ASSET_BASE_URL));

    events::wire_input_handlers(events::InputWiring {
        canvas: canvas.clone(),
        showroom: showroom.clone(),
        drag_state: Rc::new(RefCell::new(input::DragState::default())),
    });

    let gpu = frame::init_gpu(&canvas).await;
    let frame_ctx = Rc::new(RefCell::new(frame::FrameContext {
        showroom,
        uploads,
        canvas,
        loading_bar,
        gpu,
    }));
    frame::start_loop(frame_ctx);
    Ok(())
}
