//! Bridge to the external high-score service
//!
//! The service owns the score table; this side submits at most one score per
//! completed session and caches the displayed best between refreshes.
//! Transport failures are logged and contained here, never surfaced to
//! gameplay.

/// Endpoint of the external collaborator
pub const HIGHSCORES_URL: &str = "/api/highscores";

/// Client-side view of the high-score table plus the per-session
/// submission guard
#[derive(Debug, Clone, Default)]
pub struct ScoreBridge {
    /// Cached best score; `None` until the first fetch
    cached_best: Option<u64>,
    /// The cache no longer reflects the service (a submission landed)
    stale: bool,
    /// Set once the current session's score has been handed to the service
    submitted: bool,
}

impl ScoreBridge {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear the submission guard; call on every start and restart
    pub fn session_started(&mut self) {
        self.submitted = false;
    }

    /// The score to submit now. Yields at most once per session, only after
    /// game over, and only for scores above zero.
    pub fn pending_submission(&mut self, score: u64, game_over: bool) -> Option<u64> {
        if !game_over || self.submitted || score == 0 {
            return None;
        }
        self.submitted = true;
        Some(score)
    }

    /// Displayed best: the cached maximum, or 0 before the first fetch
    pub fn best(&self) -> u64 {
        self.cached_best.unwrap_or(0)
    }

    /// Replace the cache from a freshly fetched table
    pub fn set_best_from(&mut self, scores: &[u64]) {
        self.cached_best = Some(scores.iter().copied().max().unwrap_or(0));
        self.stale = false;
    }

    /// Mark the cache stale so the next refresh re-reads the service; call
    /// after a successful submission. The stale value keeps displaying until
    /// the refetch lands.
    pub fn invalidate(&mut self) {
        self.stale = true;
    }

    pub fn needs_fetch(&self) -> bool {
        self.cached_best.is_none() || self.stale
    }
}

#[cfg(target_arch = "wasm32")]
mod transport {
    use serde::Serialize;
    use wasm_bindgen::prelude::*;
    use wasm_bindgen_futures::JsFuture;
    use web_sys::{Request, RequestInit, Response};

    use super::HIGHSCORES_URL;

    /// Wire format for a submission
    #[derive(Debug, Serialize)]
    struct SubmitBody {
        score: u64,
    }

    /// Fetch the full score table; `None` on any transport or decode failure
    pub async fn fetch_high_scores() -> Option<Vec<u64>> {
        let window = web_sys::window()?;
        let response = JsFuture::from(window.fetch_with_str(HIGHSCORES_URL))
            .await
            .ok()?;
        let response: Response = response.dyn_into().ok()?;
        if !response.ok() {
            log::warn!("high score fetch returned {}", response.status());
            return None;
        }
        let text = JsFuture::from(response.text().ok()?).await.ok()?;
        match serde_json::from_str::<Vec<u64>>(&text.as_string()?) {
            Ok(scores) => Some(scores),
            Err(err) => {
                log::warn!("high score payload malformed: {err}");
                None
            }
        }
    }

    /// Submit one final score; returns whether the service accepted it
    pub async fn submit_score(score: u64) -> bool {
        let Ok(body) = serde_json::to_string(&SubmitBody { score }) else {
            return false;
        };
        let Some(window) = web_sys::window() else {
            return false;
        };

        let init = RequestInit::new();
        init.set_method("POST");
        init.set_body(&JsValue::from_str(&body));
        let Ok(request) = Request::new_with_str_and_init(HIGHSCORES_URL, &init) else {
            return false;
        };
        let _ = request.headers().set("Content-Type", "application/json");

        match JsFuture::from(window.fetch_with_request(&request)).await {
            Ok(response) => response
                .dyn_into::<Response>()
                .map(|r| r.ok())
                .unwrap_or(false),
            Err(_) => {
                log::warn!("score submission failed; high score table may lag");
                false
            }
        }
    }
}

#[cfg(target_arch = "wasm32")]
pub use transport::{fetch_high_scores, submit_score};

/// Native stubs; the headless demo has no collaborator to talk to
#[cfg(not(target_arch = "wasm32"))]
pub async fn fetch_high_scores() -> Option<Vec<u64>> {
    None
}

#[cfg(not(target_arch = "wasm32"))]
pub async fn submit_score(_score: u64) -> bool {
    false
}
