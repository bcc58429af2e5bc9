//! Desktop screen: scene plus gesture classifier.
//!
//! Each tick is routed to the context menu while it is open, otherwise to
//! the gesture classifier. Classified gestures are applied to the scene,
//! which repaints only what they touched.

use platform::{Surface, TouchSample, Wallpaper};

use crate::{
    config::ShellConfig,
    gesture::{Gesture, GestureClassifier, GestureInput},
    items::App,
    menu::{MenuCommand, MenuResponse},
    scene::Scene,
};

/// Action the desktop hands back to its host.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DesktopAction {
    /// Launch the app
    Open(App),
    /// Show the app's properties
    Properties(App),
}

/// The desktop screen.
pub struct Desktop {
    scene: Scene,
    gestures: GestureClassifier,
}

impl Desktop {
    /// Desktop with every item at home.
    pub fn new(config: &ShellConfig) -> Self {
        Self {
            scene: Scene::new(config),
            gestures: GestureClassifier::new(config.gesture),
        }
    }

    /// The scene.
    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    /// The gesture classifier.
    pub fn gestures(&self) -> &GestureClassifier {
        &self.gestures
    }

    /// Full repaint, used on screen entry.
    pub fn draw<S, W>(&mut self, surface: &mut S, wallpaper: &W) -> Result<(), S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        self.scene.full_redraw(surface, wallpaper)
    }

    /// Process one touch sample.
    pub fn handle_touch<S, W>(
        &mut self,
        sample: TouchSample,
        surface: &mut S,
        wallpaper: &W,
    ) -> Result<Option<DesktopAction>, S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        if sample.is_idle() {
            return Ok(None);
        }
        if self.scene.menu().is_open() {
            return self.handle_menu(sample, surface, wallpaper);
        }

        let input = if sample.is_press() {
            GestureInput::Press {
                now_ms: sample.now_ms,
                point: sample.point,
                hit: self.scene.hit_test(sample.point),
            }
        } else if sample.is_hold() {
            GestureInput::Hold {
                now_ms: sample.now_ms,
                point: sample.point,
            }
        } else {
            GestureInput::Release {
                now_ms: sample.now_ms,
                point: sample.point,
            }
        };

        let mut action = None;
        for gesture in self.gestures.handle(input).iter() {
            match gesture {
                Gesture::Select(app) => {
                    self.scene.set_selected(surface, wallpaper, app)?;
                }
                Gesture::DragMove { app, origin } => {
                    self.scene.move_item(surface, wallpaper, app, origin)?;
                }
                Gesture::DragCommitted { app } => {
                    tracing::debug!(?app, "drag committed");
                }
                Gesture::Tap { app, double } => {
                    tracing::debug!(?app, double, "tap");
                    action = Some(DesktopAction::Open(app));
                }
                Gesture::LongPress { app, at } => {
                    tracing::debug!(?app, x = at.x, y = at.y, "menu opened");
                    self.scene.open_menu(surface, app, at)?;
                }
            }
        }
        Ok(action)
    }

    fn handle_menu<S, W>(
        &mut self,
        sample: TouchSample,
        surface: &mut S,
        wallpaper: &W,
    ) -> Result<Option<DesktopAction>, S::Error>
    where
        S: Surface,
        W: Wallpaper,
    {
        let menu = self.scene.menu_mut();
        let response = if sample.is_press() {
            menu.press(sample.point)
        } else if sample.is_hold() {
            menu.hold(sample.point)
        } else {
            menu.release()
        };

        match response {
            MenuResponse::Unchanged => Ok(None),
            MenuResponse::Redraw => {
                self.scene.draw_menu(surface)?;
                Ok(None)
            }
            MenuResponse::Closed { dirty, command } => {
                self.scene.redraw_region(surface, wallpaper, dirty)?;
                Ok(match command {
                    Some(MenuCommand::Open(app)) => Some(DesktopAction::Open(app)),
                    Some(MenuCommand::Properties(app)) => Some(DesktopAction::Properties(app)),
                    Some(MenuCommand::Move(app)) => {
                        self.gestures.arm_force_drag(app);
                        None
                    }
                    None => None,
                })
            }
        }
    }
}
