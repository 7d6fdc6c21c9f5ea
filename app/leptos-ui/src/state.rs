use std::cell::Cell;
use std::rc::Rc;

use gloo_timers::future::TimeoutFuture;
use lc_core::config::ConsoleConfig;
use lc_core::notice::{Notice, NoticeBoard, NoticeLevel};
use lc_core::Session;
use leptos::prelude::*;
use leptos::task::spawn_local;
use send_wrapper::SendWrapper;

use crate::api::{self, Api, LocalStorageSession};

/// Backend used when the build does not set `LC_API_URL`.
fn configured() -> ConsoleConfig {
    let mut config = ConsoleConfig::default();
    if let Some(url) = option_env!("LC_API_URL") {
        config.api.base_url = url.to_string();
    }
    config
}

/// Console-wide state shared through context. Everything in here is a
/// handle, so the struct is `Copy` and moves freely into closures.
#[derive(Clone, Copy)]
pub struct ConsoleState {
    config: StoredValue<ConsoleConfig>,
    pub notices: RwSignal<NoticeBoard>,
    /// Name shown in the nav bar; `None` while signed out.
    pub user: RwSignal<Option<String>>,
}

impl ConsoleState {
    /// A fresh client. The session is read from storage on each request.
    pub fn api(&self) -> Api {
        self.config.with_value(api::client)
    }

    pub fn session(&self) -> LocalStorageSession {
        self.config.with_value(|c| LocalStorageSession::new(&c.session))
    }

    pub fn signed_in(&self) -> bool {
        self.user.with(Option::is_some)
    }

    /// Re-read the stored session, e.g. after login or logout.
    pub fn refresh_session(&self) {
        let session = self.session();
        let user = session
            .token()
            .map(|_| session.username().unwrap_or_else(|| "Admin".to_string()));
        self.user.set(user);
    }

    pub fn sign_out(&self) {
        self.session().clear();
        self.notices.update(NoticeBoard::clear);
        self.user.set(None);
    }

    /// Show a toast and dismiss it after the configured duration.
    pub fn notify(&self, notice: Notice) {
        match notice.level {
            NoticeLevel::Error => tracing::warn!(message = %notice.message, "notice"),
            _ => tracing::debug!(message = %notice.message, "notice"),
        }
        let notices = self.notices;
        let Some((id, ms)) = notices.try_update(|board| {
            let ms = board.duration_ms();
            (board.post(notice), ms)
        }) else {
            return;
        };
        spawn_local(async move {
            TimeoutFuture::new(u32::try_from(ms).unwrap_or(u32::MAX)).await;
            notices.try_update(|board| board.dismiss(id));
        });
    }
}

pub fn provide_console_state() -> ConsoleState {
    let config = configured();
    let state = ConsoleState {
        notices: RwSignal::new(NoticeBoard::new(&config.notices)),
        config: StoredValue::new(config),
        user: RwSignal::new(None),
    };
    state.refresh_session();
    provide_context(state);
    state
}

pub fn use_console_state() -> ConsoleState {
    expect_context::<ConsoleState>()
}

/// Liveness flag for async work a component starts. Results that arrive
/// after the component is gone are dropped.
#[derive(Clone)]
pub struct Mounted(SendWrapper<Rc<Cell<bool>>>);

impl Mounted {
    /// Register the flag with the current owner; it flips on cleanup.
    pub fn track() -> Self {
        let flag = Rc::new(Cell::new(true));
        let cleanup = SendWrapper::new(flag.clone());
        on_cleanup(move || cleanup.set(false));
        Self(SendWrapper::new(flag))
    }

    pub fn get(&self) -> bool {
        self.0.get()
    }
}

/// Local wall-clock time in the format the audit log shows.
pub fn timestamp() -> String {
    chrono::Local::now().format("%d/%m/%Y, %H:%M:%S").to_string()
}

pub fn today() -> String {
    chrono::Local::now().format("%Y-%m-%d").to_string()
}
