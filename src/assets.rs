//! Game image assets
//!
//! Each of the three images loads independently; a failed load resolves to
//! `None` and the renderer falls back to flat shapes for that asset only.
//! The batch itself never fails.

/// Image paths served alongside the page
pub mod paths {
    pub const BACKGROUND: &str = "/assets/game-background.png";
    pub const PLAYER: &str = "/assets/player-sprite.png";
    pub const ELEMENT: &str = "/assets/game-element.png";
}

#[cfg(target_arch = "wasm32")]
mod web {
    use js_sys::Promise;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::HtmlImageElement;

    /// Decoded images; `None` per asset that failed to load or decode
    #[derive(Debug, Clone, Default)]
    pub struct GameAssets {
        pub background: Option<HtmlImageElement>,
        pub player: Option<HtmlImageElement>,
        pub element: Option<HtmlImageElement>,
    }

    impl GameAssets {
        /// Load all three images; runs once at startup
        pub async fn load() -> Self {
            Self {
                background: load_image(super::paths::BACKGROUND).await,
                player: load_image(super::paths::PLAYER).await,
                element: load_image(super::paths::ELEMENT).await,
            }
        }
    }

    /// Resolve to the decoded image, or `None` on any load error
    async fn load_image(src: &str) -> Option<HtmlImageElement> {
        let image = HtmlImageElement::new().ok()?;

        let promise = Promise::new(&mut |resolve, _reject| {
            let on_load = resolve.clone();
            let loaded = Closure::once_into_js(move || {
                let _ = on_load.call1(&JsValue::NULL, &JsValue::TRUE);
            });
            let failed = Closure::once_into_js(move || {
                let _ = resolve.call1(&JsValue::NULL, &JsValue::FALSE);
            });
            image.set_onload(Some(loaded.unchecked_ref()));
            image.set_onerror(Some(failed.unchecked_ref()));
        });
        image.set_src(src);

        match JsFuture::from(promise).await {
            Ok(value) if value.as_bool() == Some(true) => Some(image),
            _ => {
                log::warn!("image unavailable, using fallback shapes: {src}");
                None
            }
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    /// Native stub; the headless demo never draws
    #[derive(Debug, Clone, Copy, Default)]
    pub struct GameAssets;

    impl GameAssets {
        pub async fn load() -> Self {
            Self
        }
    }
}

#[cfg(not(target_arch = "wasm32"))]
pub use native::GameAssets;
#[cfg(target_arch = "wasm32")]
pub use web::GameAssets;
