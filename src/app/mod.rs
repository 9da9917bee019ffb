// SPDX-License-Identifier: MPL-2.0
//! Application root state.
//!
//! The `App` struct wires the photo service, clipboard, link opener and download folder
//! into the photo view, routes deep links, and turns component effects into
//! notifications and screen changes.

mod message;
mod subscription;

pub use message::{Flags, Message};

use crate::application::capability::Environment;
use crate::application::download::DownloadCoordinator;
use crate::application::port::{Clipboard, DownloadSink, LinkOpener, PhotoGateway};
use crate::application::share::{
    self, CopyOutcome, LinkOutcome, ShareCoordinator, ShareTexts,
};
use crate::config::{self, Config};
use crate::domain::route::Route;
use crate::i18n::fluent::I18n;
use crate::infrastructure::{
    DownloadsFolder, HttpGateway, NoDestination, SystemClipboard, SystemOpener,
};
use crate::ui::notifications::{self, Notification, Toast, Topic};
use crate::ui::photo_view::{self, Services};
use crate::ui::{error_display, landing};
use iced::widget::Stack;
use iced::{window, Element, Size, Subscription, Task, Theme};
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

pub const WINDOW_DEFAULT_WIDTH: f32 = 1024.0;
pub const WINDOW_DEFAULT_HEIGHT: f32 = 768.0;
pub const MIN_WINDOW_WIDTH: f32 = 360.0;
pub const MIN_WINDOW_HEIGHT: f32 = 560.0;

/// What the window currently shows.
enum Screen {
    Landing,
    Photo(Box<photo_view::State>),
    /// The photo service client could not be built.
    Unavailable { route: Route, message: String },
}

impl fmt::Debug for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Screen::Landing => f.write_str("Landing"),
            Screen::Photo(state) => f.debug_tuple("Photo").field(state).finish(),
            Screen::Unavailable { route, message } => f
                .debug_struct("Unavailable")
                .field("route", route)
                .field("message", message)
                .finish(),
        }
    }
}

/// Root Iced application state.
pub struct App {
    pub i18n: I18n,
    config: Config,
    screen: Screen,
    environment: Environment,
    clipboard: Option<Arc<dyn Clipboard>>,
    opener: Arc<dyn LinkOpener>,
    notifications: notifications::Manager,
}

impl fmt::Debug for App {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("App")
            .field("screen", &self.screen)
            .field("environment", &self.environment)
            .finish_non_exhaustive()
    }
}

/// Window settings for the guest viewer.
pub fn window_settings() -> window::Settings {
    window::Settings {
        size: Size::new(WINDOW_DEFAULT_WIDTH, WINDOW_DEFAULT_HEIGHT),
        min_size: Some(Size::new(MIN_WINDOW_WIDTH, MIN_WINDOW_HEIGHT)),
        ..window::Settings::default()
    }
}

/// Entry point used by `main.rs` to launch the Iced application loop.
pub fn run(flags: Flags) -> iced::Result {
    // iced calls boot through `Fn`; flags are cloned per call.
    let boot = move || App::new(flags.clone());

    iced::application(boot, App::update, App::view)
        .title(App::title)
        .theme(App::theme)
        .window(window_settings())
        .subscription(App::subscription)
        .run()
}

impl App {
    /// Loads configuration, builds adapters and opens the deep link.
    fn new(flags: Flags) -> (Self, Task<Message>) {
        let (config, config_warning) = config::load(flags.config_dir.clone().map(PathBuf::from));
        let i18n = I18n::new(flags.lang.clone(), &config);

        let clipboard = SystemClipboard::detect().map(|c| Arc::new(c) as Arc<dyn Clipboard>);
        let environment = Environment {
            viewport_width: WINDOW_DEFAULT_WIDTH,
            viewport_height: WINDOW_DEFAULT_HEIGHT,
            user_agent: Environment::platform_signature(),
            native_share: false,
            clipboard: clipboard.is_some(),
        };

        let mut app = Self {
            i18n,
            config,
            screen: Screen::Landing,
            environment,
            clipboard,
            opener: Arc::new(SystemOpener),
            notifications: notifications::Manager::new(),
        };

        if let Some(key) = config_warning {
            app.notifications
                .push(Notification::warning(key).about(Topic::Startup));
        }

        let route = flags
            .deep_link
            .as_deref()
            .map_or(Route::Landing, Route::parse);
        tracing::info!(?route, "starting");
        let task = app.open(route);
        (app, task)
    }

    /// Builds the collaborators for a photo session.
    fn services(&self) -> Result<Services, String> {
        let gateway: Arc<dyn PhotoGateway> =
            Arc::new(HttpGateway::new(&self.config.gateway).map_err(|err| err.to_string())?);

        let sink: Arc<dyn DownloadSink> =
            match DownloadsFolder::resolve(self.config.download.directory.as_deref()) {
                Ok(folder) => Arc::new(folder),
                Err(err) => {
                    tracing::warn!(error = %err, "downloads will fail");
                    Arc::new(NoDestination)
                }
            };

        let texts = ShareTexts::from_config(&self.config.share, &self.config.download);
        Ok(Services {
            share: ShareCoordinator::new(
                Arc::clone(&gateway),
                None,
                self.clipboard.clone(),
                texts,
            )
            .with_opener(Arc::clone(&self.opener)),
            download: DownloadCoordinator::new(
                Arc::clone(&gateway),
                sink,
                self.config.download.fallback_filename.clone(),
            ),
            gateway,
            page_origin: self.config.share.page_origin.clone(),
        })
    }

    /// Replaces the current screen with `route`. Any photo session is dropped.
    fn open(&mut self, route: Route) -> Task<Message> {
        match route {
            Route::Landing => {
                self.screen = Screen::Landing;
                Task::none()
            }
            Route::Photo(identity) => match self.services() {
                Ok(services) => {
                    let (state, task) =
                        photo_view::State::open(services, identity, self.environment.clone());
                    self.screen = Screen::Photo(Box::new(state));
                    task.map(Message::Photo)
                }
                Err(message) => {
                    tracing::error!(%message, "photo service unavailable");
                    self.screen = Screen::Unavailable {
                        route: Route::Photo(identity),
                        message,
                    };
                    Task::none()
                }
            },
        }
    }

    fn title(&self) -> String {
        let app_name = self.i18n.tr("window-title");
        match &self.screen {
            Screen::Photo(state) => format!("{app_name} · {}", state.address_bar().url()),
            Screen::Landing | Screen::Unavailable { .. } => app_name,
        }
    }

    fn theme(&self) -> Theme {
        Theme::Light
    }

    fn subscription(&self) -> Subscription<Message> {
        let animating = match &self.screen {
            Screen::Photo(state) => state.needs_ticks(),
            Screen::Landing | Screen::Unavailable { .. } => false,
        };
        Subscription::batch([
            subscription::create_event_subscription(),
            subscription::create_tick_subscription(
                animating || self.notifications.has_notifications(),
            ),
        ])
    }

    fn update(&mut self, message: Message) -> Task<Message> {
        match message {
            Message::Photo(message) => self.handle_photo_message(message),
            Message::Notification(message) => {
                self.notifications.handle_message(&message);
                Task::none()
            }
            Message::OpenSiteLink(url) => {
                let outcome =
                    share::open_or_copy(Some(&*self.opener), self.clipboard.as_deref(), &url);
                let notification = match outcome {
                    LinkOutcome::Opened => return Task::none(),
                    LinkOutcome::Copied => Notification::success("notification-link-copied"),
                    LinkOutcome::Failed { .. } => Notification::info("notification-copy-manually"),
                };
                self.notifications
                    .push(notification.about(Topic::CopyLink));
                Task::none()
            }
            Message::CopySiteLink(url) => {
                let notification = match share::copy_to_clipboard(self.clipboard.as_deref(), &url)
                {
                    CopyOutcome::Copied => Notification::success("notification-link-copied"),
                    CopyOutcome::Failed { .. } => {
                        Notification::info("notification-copy-manually")
                    }
                };
                self.notifications
                    .push(notification.about(Topic::CopyLink));
                Task::none()
            }
            Message::SiteLinkEdited(_) => Task::none(),
            Message::RetryConnection => match &self.screen {
                Screen::Unavailable { route, .. } => {
                    let route = route.clone();
                    self.open(route)
                }
                _ => Task::none(),
            },
            Message::WindowResized(size) => {
                self.environment.viewport_width = size.width;
                self.environment.viewport_height = size.height;
                if let Screen::Photo(state) = &mut self.screen {
                    state.set_viewport(size);
                }
                Task::none()
            }
            Message::Tick(now) => {
                self.notifications.tick();
                match &mut self.screen {
                    Screen::Photo(state) => state
                        .handle_message(photo_view::Message::Tick(now), &self.i18n)
                        .1
                        .map(Message::Photo),
                    _ => Task::none(),
                }
            }
        }
    }

    fn handle_photo_message(&mut self, message: photo_view::Message) -> Task<Message> {
        let Screen::Photo(state) = &mut self.screen else {
            return Task::none();
        };
        let (effect, task) = state.handle_message(message, &self.i18n);
        let task = task.map(Message::Photo);

        match effect {
            photo_view::Effect::None => task,
            photo_view::Effect::Notify(notification) => {
                self.notifications.push(notification);
                task
            }
            photo_view::Effect::Retry => {
                let route = state.address_bar().route();
                tracing::info!(?route, "retrying photo session");
                self.open(route)
            }
            photo_view::Effect::Back => {
                self.notifications.clear();
                self.open(Route::Landing)
            }
        }
    }

    fn view(&self) -> Element<'_, Message> {
        let screen: Element<'_, Message> = match &self.screen {
            Screen::Landing => landing::view(
                Some(self.config.general.wedding_site_url.as_str()),
                &self.i18n,
                Message::OpenSiteLink,
                Message::CopySiteLink,
                Message::SiteLinkEdited,
            ),
            Screen::Photo(state) => photo_view::view(state, &self.i18n).map(Message::Photo),
            Screen::Unavailable { message, .. } => {
                error_display::view(message, &self.i18n, Message::RetryConnection)
            }
        };

        let toasts = Toast::view_overlay(&self.notifications, &self.i18n).map(Message::Notification);

        Stack::new().push(screen).push(toasts).into()
    }
}
