use std::cell::RefCell;
use std::rc::Rc;

use showroom_core::{SequencerEvent, Showroom};
use wasm_bindgen::closure::Closure;
use wasm_bindgen::JsCast;
use web_sys as web;

use crate::dom::HtmlMarker;
use crate::loader::{now_sec, PendingUpload, UploadQueue};
use crate::overlay;
use crate::render;

pub struct FrameContext<'a> {
    pub showroom: Rc<RefCell<Showroom<HtmlMarker>>>,
    pub uploads: UploadQueue,
    pub canvas: web::HtmlCanvasElement,
    pub loading_bar: Option<web::HtmlElement>,
    pub gpu: Option<render::GpuState<'a>>,
}

impl<'a> FrameContext<'a> {
    pub fn frame(&mut self) {
        let now = now_sec();
        let out = self.showroom.borrow_mut().tick(now);

        for ev in &out.events {
            match ev {
                SequencerEvent::FadeStarted => {
                    log::info!("[sequencer] fade started");
                    if let Some(bar) = &self.loading_bar {
                        if !overlay::is_ended(bar) {
                            overlay::mark_ended(bar);
                        }
                    }
                }
                SequencerEvent::SceneReady => log::info!("[sequencer] scene ready"),
            }
        }

        // Drained even when WebGPU is unavailable
        let pending = std::mem::take(&mut *self.uploads.borrow_mut());
        let Some(g) = &mut self.gpu else {
            return;
        };
        for upload in pending {
            match upload {
                PendingUpload::Environment(faces) => {
                    if let Err(e) = g.set_environment(&faces) {
                        log::warn!("[gpu] environment upload skipped: {:?}", e);
                    }
                }
                PendingUpload::FloorMaps { color, normal } => g.set_floor_maps(&color, &normal),
            }
        }

        let showroom = self.showroom.borrow();
        g.sync_meshes(&showroom.geometry);
        g.resize_if_needed(self.canvas.width(), self.canvas.height());
        if let Err(e) = g.render(&showroom.camera, out.overlay_alpha) {
            log::error!("render error: {:?}", e);
        }
    }
}

pub async fn init_gpu(canvas: &web::HtmlCanvasElement) -> Option<render::GpuState<'static>> {
    // leak a canvas clone to satisfy 'static lifetime for surface
    let leaked_canvas = Box::leak(Box::new(canvas.clone()));
    match render::GpuState::new(leaked_canvas).await {
        Ok(g) => Some(g),
        Err(e) => {
            log::error!("WebGPU init error: {:?}", e);
            None
        }
    }
}

pub fn start_loop(frame_ctx: Rc<RefCell<FrameContext<'static>>>) {
    let tick: Rc<RefCell<Option<Closure<dyn FnMut()>>>> = Rc::new(RefCell::new(None));
    let tick_clone = tick.clone();
    let frame_ctx_tick = frame_ctx.clone();
    *tick.borrow_mut() = Some(Closure::wrap(Box::new(move || {
        frame_ctx_tick.borrow_mut().frame();
        request_frame(&tick_clone);
    }) as Box<dyn FnMut()>));
    request_frame(&tick);
}

fn request_frame(tick: &Rc<RefCell<Option<Closure<dyn FnMut()>>>>) {
    if let (Some(w), Some(cb)) = (web::window(), tick.borrow().as_ref()) {
        _ = w.request_animation_frame(cb.as_ref().unchecked_ref());
    }
}
