//! Top-level router: sends each tick to the screen on top of the stack.

use platform::{AiBackend, Keyboard, Surface, TouchSample, Wallpaper};

use crate::{
    chat::{ChatEvent, ChatView},
    config::ShellConfig,
    desktop::{Desktop, DesktopAction},
    items::App,
    navigation::{Navigator, Screen},
};

/// Borrowed device handles for one tick.
pub struct Devices<'a, S, W, K, B> {
    /// Display
    pub surface: &'a mut S,
    /// Desktop background
    pub wallpaper: &'a W,
    /// On-screen keyboard
    pub keyboard: &'a mut K,
    /// Chat assistant
    pub backend: &'a mut B,
}

/// The shell: desktop, chat and the stack between them.
///
/// Actions for apps the shell does not implement are returned to the host.
pub struct Shell {
    navigator: Navigator,
    desktop: Desktop,
    chat: ChatView,
}

impl Shell {
    /// Shell showing the desktop.
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            navigator: Navigator::new(),
            desktop: Desktop::new(config),
            chat: ChatView::new(config),
        }
    }

    /// Screen currently shown.
    pub fn current(&self) -> Screen {
        self.navigator.current()
    }

    /// The desktop.
    pub fn desktop(&self) -> &Desktop {
        &self.desktop
    }

    /// The chat screen.
    pub fn chat(&self) -> &ChatView {
        &self.chat
    }

    /// Full repaint of the current screen.
    pub fn draw<S, W, K, B>(&mut self, devices: &mut Devices<'_, S, W, K, B>) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
        K: Keyboard,
    {
        match self.navigator.current() {
            Screen::Desktop => {
                devices.keyboard.set_visible(false);
                self.desktop.draw(devices.surface, devices.wallpaper)
            }
            Screen::Chat => self.chat.draw(devices.surface, devices.keyboard),
        }
    }

    /// Switch to `screen` and paint it.
    pub fn open<S, W, K, B>(
        &mut self,
        screen: Screen,
        devices: &mut Devices<'_, S, W, K, B>,
    ) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
        K: Keyboard,
    {
        tracing::debug!(?screen, "open screen");
        self.navigator.open(screen);
        self.draw(devices)
    }

    /// Process one touch sample.
    pub fn tick<S, W, K, B>(
        &mut self,
        sample: TouchSample,
        devices: &mut Devices<'_, S, W, K, B>,
    ) -> Result<Option<DesktopAction>, S::Error>
    where
        S: Surface,
        W: Wallpaper,
        K: Keyboard,
        B: AiBackend,
    {
        match self.navigator.current() {
            Screen::Desktop => {
                let action = self
                    .desktop
                    .handle_touch(sample, devices.surface, devices.wallpaper)?;
                if action == Some(DesktopAction::Open(App::Chat)) {
                    self.open(Screen::Chat, devices)?;
                    return Ok(None);
                }
                Ok(action)
            }
            Screen::Chat => {
                let event = self.chat.handle_touch(
                    sample,
                    devices.surface,
                    devices.keyboard,
                    devices.backend,
                )?;
                if event == Some(ChatEvent::Back) {
                    self.chat.release();
                    self.navigator.back();
                    self.draw(devices)?;
                }
                Ok(None)
            }
        }
    }
}
