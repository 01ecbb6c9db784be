use std::io::{BufRead, Write};

use log::{debug, info, warn};
use thiserror::Error;

use super::{find_app, AppDefinition, ContentRef, WindowId, WindowRegistry, WindowSpec};
use crate::config::Config;
use crate::layouts::{placement_by_id, Placement};
use crate::shell::{ShellAdapter, ShellError, ShellEvent};

#[derive(Error, Debug)]
pub enum DeskWmError {
    #[error("unknown placement {0}")]
    UnknownPlacement(String),
    #[error("{0}")]
    Shell(#[from] ShellError),
}

/// Drives a [`WindowRegistry`] from a stream of shell events.
pub struct DeskWm<R, W> {
    server: ShellAdapter<R, W>,
    registry: WindowRegistry,
    apps: Vec<AppDefinition>,
    placement: Box<dyn Placement>,
}

impl<R: BufRead, W: Write> DeskWm<R, W> {
    pub fn new(server: ShellAdapter<R, W>, config: &Config) -> Result<Self, DeskWmError> {
        let placement = placement_by_id(&config.placement)
            .ok_or_else(|| DeskWmError::UnknownPlacement(config.placement.clone()))?;
        info!(
            "desktop {}x{}, {} applications, {} placement",
            config.screen_width,
            config.screen_height,
            config.apps.len(),
            placement.id()
        );
        Ok(DeskWm {
            server,
            registry: config.registry(),
            apps: config.apps.clone(),
            placement,
        })
    }

    pub fn registry(&self) -> &WindowRegistry {
        &self.registry
    }

    pub fn into_server(self) -> ShellAdapter<R, W> {
        self.server
    }

    /// Runs until `quit` or the end of the input.
    pub fn run(&mut self) -> Result<(), DeskWmError> {
        loop {
            let event = match self.server.next_event() {
                Ok(Some(event)) => event,
                Ok(None) => {
                    info!("input closed");
                    return Ok(());
                }
                Err(e) if e.is_recoverable() => {
                    warn!("{}", e);
                    self.server.send_error(&e)?;
                    continue;
                }
                Err(e) => return Err(e.into()),
            };
            if event == ShellEvent::Quit {
                info!("quit requested");
                return Ok(());
            }
            self.handle_event(event)?;
        }
    }

    fn handle_event(&mut self, event: ShellEvent) -> Result<(), DeskWmError> {
        debug!("handling {:?}", event);
        match event {
            ShellEvent::Launch(app_id) => match find_app(&self.apps, &app_id) {
                Some(app) => {
                    let id = self.registry.launch_app(app, self.placement.as_mut());
                    self.send_window(id)?;
                }
                None => {
                    warn!("no application named {}", app_id);
                    self.server.send_error(&ShellError::UnknownApp(app_id))?;
                }
            },
            ShellEvent::Open {
                content,
                size,
                position,
            } => {
                let size = self.registry.policy().clamp_size(size);
                let position = match position {
                    Some(position) => position,
                    None => self.placement.place(
                        self.registry.screen(),
                        size,
                        self.registry.len(),
                    ),
                };
                let spec = WindowSpec::new(content.clone(), ContentRef::from(content), position, size);
                let id = self.registry.create_window(spec);
                self.send_window(id)?;
            }
            ShellEvent::Close(id) => {
                self.registry.close_window(id);
                self.send_window(id)?;
            }
            ShellEvent::Minimize(id) => {
                self.registry.minimize_window(id);
                self.send_window(id)?;
            }
            ShellEvent::Maximize(id) => {
                self.registry.maximize_window(id);
                self.send_window(id)?;
            }
            ShellEvent::Restore(id) => {
                self.registry.restore_window(id);
                self.send_window(id)?;
            }
            ShellEvent::Focus(id) => {
                self.registry.focus_window(id);
                self.send_window(id)?;
            }
            ShellEvent::Move(id, position) => {
                self.registry.update_window_position(id, position);
                self.send_window(id)?;
            }
            ShellEvent::Resize(id, size) => {
                self.registry.update_window_size(id, size);
                self.send_window(id)?;
            }
            ShellEvent::Title(id, title) => {
                self.registry.set_window_title(id, title);
                self.send_window(id)?;
            }
            ShellEvent::Taskbar(id) => {
                self.registry.toggle_taskbar_entry(id);
                self.send_window(id)?;
            }
            ShellEvent::Screen(width, height) => {
                self.registry.resize_screen(width, height);
                let screen = *self.registry.screen();
                self.server.send(&screen)?;
            }
            ShellEvent::List => {
                let windows = self.registry.list_all();
                self.server.send(&windows)?;
            }
            ShellEvent::Visible => {
                let windows = self.registry.stacking_order();
                self.server.send(&windows)?;
            }
            ShellEvent::Active => {
                let window = self.registry.get_active_window();
                self.server.send(&window)?;
            }
            ShellEvent::Quit => {}
        }
        Ok(())
    }

    // null once the window is gone
    fn send_window(&mut self, id: WindowId) -> Result<(), DeskWmError> {
        let window = self.registry.get_window(id);
        self.server.send(&window)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    fn run_script(script: &str) -> Vec<Value> {
        run_bytes(script.as_bytes())
    }

    fn run_bytes(script: &[u8]) -> Vec<Value> {
        let config = Config::default();
        let server = ShellAdapter::new(script, Vec::new());
        let mut wm = DeskWm::new(server, &config).unwrap();
        wm.run().unwrap();
        let output = String::from_utf8(wm.into_server().into_output()).unwrap();
        output
            .lines()
            .map(|line| serde_json::from_str(line).unwrap())
            .collect()
    }

    #[test]
    fn launch_answers_with_the_new_window() {
        let answers = run_script("launch notepad\n");
        assert_eq!(answers.len(), 1);
        assert_eq!(answers[0]["id"], 1);
        assert_eq!(answers[0]["title"], "Notepad");
        assert_eq!(answers[0]["content"], "notepad");
        assert_eq!(answers[0]["zIndex"], 1000);
        assert_eq!(answers[0]["size"]["width"], 600);
    }

    #[test]
    fn unknown_app_is_reported_and_loop_continues() {
        let answers = run_script("launch doom\nactive\n");
        assert!(answers[0]["error"].is_string());
        assert!(answers[1].is_null());
    }

    #[test]
    fn bad_line_does_not_stop_the_session() {
        let answers = run_script("focus nope\nopen paint 640 480 10 20\n");
        assert!(answers[0]["error"].is_string());
        assert_eq!(answers[1]["position"]["x"], 10);
        assert_eq!(answers[1]["content"], "paint");
    }

    #[test]
    fn unusable_screen_size_is_rejected_without_panicking() {
        let answers = run_script(
            "launch notepad\nmaximize 1\nscreen -2147483648 1080\nscreen -500 -500\nactive\n",
        );
        assert_eq!(answers.len(), 5);
        assert!(answers[2]["error"].is_string());
        assert!(answers[3]["error"].is_string());
        // still maximized over the original screen
        assert_eq!(answers[4]["isMaximized"], true);
        assert_eq!(answers[4]["size"]["width"], 1920);
        assert_eq!(answers[4]["size"]["height"], 1032);
    }

    #[test]
    fn invalid_utf8_line_does_not_end_the_session() {
        let answers = run_bytes(b"launch notepad\ntitle 1 \xff\xfe\nactive\n");
        assert_eq!(answers.len(), 3);
        assert!(answers[1]["error"].is_string());
        assert_eq!(answers[2]["id"], 1);
        assert_eq!(answers[2]["title"], "Notepad");
    }

    #[test]
    fn close_answers_null_and_quit_stops_reading() {
        let answers = run_script("launch settings\nclose 1\nquit\nlaunch notepad\n");
        assert_eq!(answers.len(), 2);
        assert!(answers[1].is_null());
    }

    #[test]
    fn visible_lists_bottom_to_top() {
        let answers = run_script(
            "launch notepad\nlaunch calculator\nlaunch settings\nminimize 2\nfocus 1\nvisible\n",
        );
        let visible = answers.last().unwrap().as_array().unwrap();
        let ids: Vec<_> = visible.iter().map(|w| w["id"].as_u64().unwrap()).collect();
        assert_eq!(ids, vec![3, 1]);
    }

    #[test]
    fn unknown_placement_is_rejected() {
        let config = Config {
            placement: "spiral".into(),
            ..Config::default()
        };
        let server = ShellAdapter::new("".as_bytes(), Vec::new());
        assert!(matches!(
            DeskWm::new(server, &config),
            Err(DeskWmError::UnknownPlacement(_))
        ));
    }
}
