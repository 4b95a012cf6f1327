use bingolink_core::{DATA_KEY, MARKED_KEY, ORDER_KEY, StateStore, UrlParams};
use gloo::utils::window;
use wasm_bindgen::JsValue;
use web_sys::{Url, UrlSearchParams};

/// [`StateStore`] over the page's query string.
///
/// Writes go through `history.replaceState`, so the page neither reloads nor
/// grows its history.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub(crate) struct UrlStore;

impl UrlStore {
    fn try_read() -> Result<UrlParams, JsValue> {
        let search = window().location().search()?;
        let query = UrlSearchParams::new_with_str(&search)?;
        Ok(UrlParams::new(
            query.get(DATA_KEY),
            query.get(ORDER_KEY),
            query.get(MARKED_KEY),
        ))
    }

    fn try_write(params: &UrlParams) -> Result<(), JsValue> {
        let window = window();
        let url = Url::new(&window.location().href()?)?;
        let query = url.search_params();
        for (key, value) in params.entries() {
            match value {
                Some(value) => query.set(key, value),
                None => query.delete(key),
            }
        }
        window
            .history()?
            .replace_state_with_url(&JsValue::NULL, "", Some(&url.href()))
    }

    /// Full address of the current page, as shared with other players.
    pub(crate) fn current_href() -> Option<String> {
        window()
            .location()
            .href()
            .map_err(|err| log::error!("Could not read location: {:?}", err))
            .ok()
    }
}

impl StateStore for UrlStore {
    fn read(&self) -> UrlParams {
        Self::try_read().unwrap_or_else(|err| {
            log::error!("Could not read url params: {:?}", err);
            UrlParams::default()
        })
    }

    fn write(&mut self, params: &UrlParams) {
        if let Err(err) = Self::try_write(params) {
            log::error!("Could not update url params: {:?}", err);
        }
    }
}
