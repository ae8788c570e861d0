//! Asset fetching. Every file is a tracked item so the loading bar and the
//! sequencer see one consistent count; decoded textures wait in an upload
//! queue until the next frame has the GPU.

use std::cell::RefCell;
use std::rc::Rc;

use js_sys::Uint8Array;
use showroom_core::{resolve_relative, AssetManifest, GltfDocument, LoadEvent, Showroom};
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::{spawn_local, JsFuture};
use web_sys as web;

use crate::dom::HtmlMarker;
use crate::overlay;
use crate::render::DecodedImage;

/// GPU work produced by the loader, drained by the frame loop.
pub enum PendingUpload {
    Environment(Box<[DecodedImage; 6]>),
    FloorMaps {
        color: DecodedImage,
        normal: DecodedImage,
    },
}

pub type UploadQueue = Rc<RefCell<Vec<PendingUpload>>>;

#[inline]
pub fn now_sec() -> f64 {
    instant::now() / 1000.0
}

pub async fn fetch_bytes(url: &str) -> anyhow::Result<Vec<u8>> {
    let window = web::window().ok_or_else(|| anyhow::anyhow!("no window"))?;
    let resp = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch {}: {:?}", url, e))?;
    let resp: web::Response = resp
        .dyn_into()
        .map_err(|e| anyhow::anyhow!("fetch {}: not a Response: {:?}", url, e))?;
    if !resp.ok() {
        anyhow::bail!("fetch {}: HTTP {}", url, resp.status());
    }
    let buf = resp
        .array_buffer()
        .map_err(|e| anyhow::anyhow!("{:?}", e))?;
    let buf = JsFuture::from(buf)
        .await
        .map_err(|e| anyhow::anyhow!("read {}: {:?}", url, e))?;
    Ok(Uint8Array::new(&buf).to_vec())
}

#[derive(Clone)]
pub struct Loader {
    showroom: Rc<RefCell<Showroom<HtmlMarker>>>,
    uploads: UploadQueue,
    bar: Option<web::HtmlElement>,
}

impl Loader {
    pub fn new(
        showroom: Rc<RefCell<Showroom<HtmlMarker>>>,
        uploads: UploadQueue,
        bar: Option<web::HtmlElement>,
    ) -> Self {
        Self {
            showroom,
            uploads,
            bar,
        }
    }

    /// Register every manifest item up front, then fetch them concurrently.
    pub fn start(&self, manifest: AssetManifest) {
        {
            let mut showroom = self.showroom.borrow_mut();
            for url in manifest.urls() {
                showroom.begin_asset(url);
            }
            log::info!("[loader] {} items queued", showroom.loading().total());
        }

        let env = self.clone();
        let faces = manifest.environment_faces.clone();
        spawn_local(async move { env.load_environment(faces).await });

        let floor = self.clone();
        let (color, normal) = (manifest.floor_color.clone(), manifest.floor_normal.clone());
        spawn_local(async move { floor.load_floor(color, normal).await });

        let car = self.clone();
        let model = manifest.car_model;
        spawn_local(async move { car.load_car(model).await });
    }

    fn finish(&self, url: &str) {
        let events = self.showroom.borrow_mut().finish_asset(url, now_sec());
        self.report(&events);
    }

    fn fail(&self, url: &str, err: &anyhow::Error) {
        log::warn!("[loader] {} failed: {:?}", url, err);
        let events = self.showroom.borrow_mut().fail_asset(url, now_sec());
        self.report(&events);
    }

    fn report(&self, events: &[LoadEvent]) {
        for ev in events {
            match ev {
                LoadEvent::Progress { url, loaded, total } => {
                    log::debug!("[loader] {} ({}/{})", url, loaded, total);
                    if let (Some(bar), Some(ratio)) = (&self.bar, ev.ratio()) {
                        overlay::set_progress(bar, ratio);
                    }
                }
                LoadEvent::Complete => log::debug!("[loader] complete"),
            }
        }
    }

    async fn load_image(&self, url: &str) -> Option<DecodedImage> {
        let result = match fetch_bytes(url).await {
            Ok(bytes) => DecodedImage::decode(&bytes),
            Err(e) => Err(e),
        };
        match result {
            Ok(img) => {
                self.finish(url);
                Some(img)
            }
            Err(e) => {
                self.fail(url, &e);
                None
            }
        }
    }

    async fn load_environment(&self, faces: [String; 6]) {
        let mut decoded = Vec::with_capacity(6);
        for url in &faces {
            if let Some(img) = self.load_image(url).await {
                decoded.push(img);
            }
        }
        match <[DecodedImage; 6]>::try_from(decoded) {
            Ok(faces) => self
                .uploads
                .borrow_mut()
                .push(PendingUpload::Environment(Box::new(faces))),
            Err(partial) => log::warn!(
                "[loader] environment incomplete ({} of 6 faces), keeping placeholder",
                partial.len()
            ),
        }
    }

    async fn load_floor(&self, color_url: String, normal_url: String) {
        let color = self.load_image(&color_url).await;
        let normal = self.load_image(&normal_url).await;
        if let (Some(color), Some(normal)) = (color, normal) {
            self.uploads
                .borrow_mut()
                .push(PendingUpload::FloorMaps { color, normal });
        }
    }

    /// The model file and its buffers are separate items. Buffers are begun
    /// before the model file ends so completion cannot fire in between.
    async fn load_car(&self, url: String) {
        let doc = match fetch_bytes(&url).await.and_then(|bytes| {
            GltfDocument::parse(&bytes).map_err(anyhow::Error::from)
        }) {
            Ok(doc) => doc,
            Err(e) => return self.fail(&url, &e),
        };
        let buffer_urls: Vec<String> = match doc.buffer_uris() {
            Ok(uris) => uris.iter().map(|u| resolve_relative(&url, u)).collect(),
            Err(e) => return self.fail(&url, &e.into()),
        };
        {
            let mut showroom = self.showroom.borrow_mut();
            for b in &buffer_urls {
                showroom.begin_asset(b);
            }
        }
        self.finish(&url);

        let mut fetched = Vec::with_capacity(buffer_urls.len());
        for b in &buffer_urls {
            match fetch_bytes(b).await {
                Ok(bytes) => fetched.push(Some(bytes)),
                Err(e) => {
                    log::warn!("[loader] {} failed: {:?}", b, e);
                    fetched.push(None);
                }
            }
        }
        let outcomes: Vec<(&str, bool)> = buffer_urls
            .iter()
            .zip(&fetched)
            .map(|(b, bytes)| (b.as_str(), bytes.is_some()))
            .collect();

        match fetched.into_iter().collect::<Option<Vec<_>>>() {
            Some(buffers) => match doc.meshes(&buffers) {
                Ok(meshes) => {
                    let added = self.showroom.borrow_mut().add_car(meshes);
                    log::info!("[loader] car: {} meshes", added.len());
                }
                Err(e) => log::error!("[loader] {}: {}", url, e),
            },
            None => log::warn!("[loader] {}: missing buffers, model skipped", url),
        }
        // Every buffer item ends here, fetched or not, so loading always completes
        let events = self
            .showroom
            .borrow_mut()
            .settle_assets(&outcomes, now_sec());
        self.report(&events);
    }
}
