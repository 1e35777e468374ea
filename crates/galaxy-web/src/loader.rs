use crate::constants::API_BASE;
use galaxy_core::SceneConfig;
use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys as web;

/// Which scene the page URL asks for.
#[derive(Debug, PartialEq)]
pub enum SceneSource {
    Demo,
    Remote(String),
}

impl SceneSource {
    /// `?demo=1` wins over `?id=`; neither is an error.
    pub fn from_location(window: &web::Window) -> anyhow::Result<Self> {
        let search = window
            .location()
            .search()
            .map_err(|e| anyhow::anyhow!("location.search: {:?}", e))?;
        let params = web::UrlSearchParams::new_with_str(&search)
            .map_err(|e| anyhow::anyhow!("URLSearchParams: {:?}", e))?;
        if params.get("demo").as_deref() == Some("1") {
            return Ok(Self::Demo);
        }
        match params.get("id").filter(|id| !id.is_empty()) {
            Some(id) => Ok(Self::Remote(id)),
            None => Err(anyhow::anyhow!("no galaxy id in URL")),
        }
    }
}

pub async fn load_scene(window: &web::Window) -> anyhow::Result<SceneConfig> {
    match SceneSource::from_location(window)? {
        SceneSource::Demo => {
            log::info!("[loader] demo scene");
            Ok(SceneConfig::demo())
        }
        SceneSource::Remote(id) => fetch_scene(window, &id).await,
    }
}

async fn fetch_scene(window: &web::Window, id: &str) -> anyhow::Result<SceneConfig> {
    let url = format!("{API_BASE}/api/galaxies/{id}");
    log::info!("[loader] fetching {url}");
    let resp: web::Response = JsFuture::from(window.fetch_with_str(&url))
        .await
        .map_err(|e| anyhow::anyhow!("fetch failed: {:?}", e))?
        .dyn_into()
        .map_err(|_| anyhow::anyhow!("fetch did not yield a Response"))?;
    if !resp.ok() {
        anyhow::bail!("galaxy {id}: HTTP {}", resp.status());
    }
    let text = JsFuture::from(
        resp.text()
            .map_err(|e| anyhow::anyhow!("response.text: {:?}", e))?,
    )
    .await
    .map_err(|e| anyhow::anyhow!("reading body: {:?}", e))?
    .as_string()
    .ok_or_else(|| anyhow::anyhow!("body is not text"))?;
    Ok(SceneConfig::from_api_response(&text)?)
}
