/// Terminal-based ASCII viewer with mouse trackball rotation
use crossterm::{
    cursor,
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        MouseButton, MouseEvent, MouseEventKind,
    },
    execute, queue,
    style::{Color, Print, ResetColor, SetForegroundColor},
    terminal::{self},
};
use log::{debug, info};
use nalgebra::Point2;
use std::io::{stdout, Write};
use std::time::{Duration, Instant};
use trackball_core::{
    Camera, Mesh, PhongLight, PointerEvent, TrackballConfig, TrackballError, TrackballTracker,
    Transform, Viewport,
};

pub mod config;
pub mod error;
pub mod renderer;

pub use config::AppConfig;
pub use error::AppError;
pub use renderer::AsciiRenderer;

/// Terminal cells are roughly twice as tall as they are wide; pointer
/// positions are scaled by this so the trackball stays round.
pub const CELL_ASPECT: f32 = 2.0;

/// Pixel-like position of the center of a terminal cell
pub fn cell_to_pixel(column: u16, row: u16) -> Point2<f32> {
    Point2::new(column as f32 + 0.5, (row as f32 + 0.5) * CELL_ASPECT)
}

/// Trackball viewport covering a terminal of `columns` x `rows` cells
pub fn terminal_viewport(
    config: &TrackballConfig,
    columns: u16,
    rows: u16,
) -> Result<Viewport, TrackballError> {
    config.viewport(columns as f32, rows as f32 * CELL_ASPECT)
}

/// Translate a crossterm mouse event into a trackball pointer event.
/// Only the left button drives the trackball.
pub fn pointer_event(mouse: &MouseEvent) -> Option<PointerEvent> {
    let position = cell_to_pixel(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => Some(PointerEvent::Pressed {
            x: position.x,
            y: position.y,
        }),
        MouseEventKind::Drag(MouseButton::Left) => Some(PointerEvent::Moved {
            x: position.x,
            y: position.y,
        }),
        MouseEventKind::Up(MouseButton::Left) => Some(PointerEvent::Released),
        _ => None,
    }
}

/// Main application struct for terminal 3D rendering
pub struct TerminalApp {
    mesh: Mesh,
    tracker: TrackballTracker,
    trackball: TrackballConfig,
    viewport: Viewport,
    camera: Camera,
    light: PhongLight,
    renderer: AsciiRenderer,
    running: bool,
    target_frame_time: Duration,
    last_frame: Instant,
    frame_count: u32,
    fps: f32,
}

impl TerminalApp {
    pub fn new(mesh: Mesh, config: &AppConfig) -> Result<Self, AppError> {
        let (width, height) = terminal::size()?;
        let viewport = terminal_viewport(&config.trackball, width, height)?;

        Ok(Self {
            mesh,
            tracker: TrackballTracker::new(),
            trackball: config.trackball,
            viewport,
            camera: Camera::with_aspect(viewport.width / viewport.height),
            light: config.light,
            renderer: AsciiRenderer::new(width as usize, height as usize),
            running: true,
            target_frame_time: Duration::from_millis(1000 / u64::from(config.target_fps.max(1))),
            last_frame: Instant::now(),
            frame_count: 0,
            fps: 0.0,
        })
    }

    pub fn run(&mut self) -> Result<(), AppError> {
        terminal::enable_raw_mode()?;
        execute!(
            stdout(),
            terminal::EnterAlternateScreen,
            EnableMouseCapture,
            cursor::Hide
        )?;
        info!("viewer started with trackball radius {:.1}", self.viewport.radius);

        let result = self.main_loop();

        // Cleanup
        terminal::disable_raw_mode()?;
        execute!(
            stdout(),
            DisableMouseCapture,
            terminal::LeaveAlternateScreen,
            cursor::Show
        )?;

        result
    }

    fn main_loop(&mut self) -> Result<(), AppError> {
        while self.running {
            let frame_start = Instant::now();

            // Drain every pending event so drags stay responsive
            while event::poll(Duration::from_millis(0))? {
                self.handle_input()?;
            }

            // Render
            self.render()?;

            // Frame timing
            self.frame_count += 1;
            let elapsed = frame_start.elapsed();
            if elapsed < self.target_frame_time {
                std::thread::sleep(self.target_frame_time - elapsed);
            }

            // Update FPS counter
            let now = Instant::now();
            if (now - self.last_frame).as_secs() >= 1 {
                self.fps = self.frame_count as f32 / (now - self.last_frame).as_secs_f32();
                self.frame_count = 0;
                self.last_frame = now;
            }
        }

        Ok(())
    }

    fn handle_input(&mut self) -> Result<(), AppError> {
        match event::read()? {
            Event::Key(KeyEvent {
                code,
                kind: KeyEventKind::Press,
                ..
            }) => match code {
                KeyCode::Char('q') | KeyCode::Esc => {
                    self.running = false;
                }
                KeyCode::Char('r') => {
                    debug!("rotation reset");
                    self.tracker.reset();
                }
                _ => {}
            },
            Event::Mouse(mouse) => {
                if let Some(pointer) = pointer_event(&mouse) {
                    self.tracker.handle_event(pointer, &self.viewport);
                }
            }
            Event::Resize(width, height) => self.resize(width, height)?,
            _ => {}
        }
        Ok(())
    }

    fn resize(&mut self, width: u16, height: u16) -> Result<(), AppError> {
        debug!("terminal resized to {width}x{height}");
        self.viewport = terminal_viewport(&self.trackball, width, height)?;
        self.camera.set_aspect(self.viewport.width / self.viewport.height);
        self.renderer = AsciiRenderer::new(width as usize, height as usize);
        Ok(())
    }

    fn render(&mut self) -> Result<(), AppError> {
        let rotation = self.tracker.current_rotation();
        let model = Transform::rotation_matrix(&rotation);

        // Clear renderer
        self.renderer.clear();

        // Render mesh
        self.renderer
            .render_mesh(&self.mesh, &model, &self.camera, &self.light);

        // Output to terminal
        let mut stdout = stdout();
        queue!(stdout, cursor::MoveTo(0, 0))?;

        self.renderer.draw(&mut stdout)?;

        // Draw UI overlay
        let state = if self.tracker.is_dragging() {
            "dragging"
        } else {
            "idle"
        };
        queue!(
            stdout,
            cursor::MoveTo(0, 0),
            SetForegroundColor(Color::Yellow),
            Print(format!(
                "Trackball | FPS: {:.1} | {} | angle {:.1}° | Drag=Rotate R=Reset Q=Quit",
                self.fps,
                state,
                rotation.angle().to_degrees()
            )),
            ResetColor
        )?;

        stdout.flush()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crossterm::event::KeyModifiers;

    fn mouse(kind: MouseEventKind, column: u16, row: u16) -> MouseEvent {
        MouseEvent {
            kind,
            column,
            row,
            modifiers: KeyModifiers::NONE,
        }
    }

    #[test]
    fn test_cell_to_pixel_doubles_rows() {
        let pixel = cell_to_pixel(10, 4);
        assert_eq!(pixel, Point2::new(10.5, 9.0));
    }

    #[test]
    fn test_terminal_viewport_is_in_pixels() {
        let viewport = terminal_viewport(&TrackballConfig::default(), 120, 40).unwrap();
        assert_eq!(viewport.width, 120.0);
        assert_eq!(viewport.height, 80.0);
        assert!((viewport.radius - 40.0).abs() < 1e-4);
        assert!(terminal_viewport(&TrackballConfig::default(), 0, 40).is_err());
    }

    #[test]
    fn test_pointer_event_mapping() {
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Down(MouseButton::Left), 3, 1)),
            Some(PointerEvent::Pressed { x: 3.5, y: 3.0 })
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Drag(MouseButton::Left), 5, 2)),
            Some(PointerEvent::Moved { x: 5.5, y: 5.0 })
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Up(MouseButton::Left), 5, 2)),
            Some(PointerEvent::Released)
        );
        assert_eq!(
            pointer_event(&mouse(MouseEventKind::Down(MouseButton::Right), 5, 2)),
            None
        );
        assert_eq!(pointer_event(&mouse(MouseEventKind::Moved, 5, 2)), None);
    }

    #[test]
    fn test_mouse_drag_rotates_model() {
        let viewport = terminal_viewport(&TrackballConfig::default(), 120, 40).unwrap();
        let mut tracker = TrackballTracker::new();
        for event in [
            mouse(MouseEventKind::Down(MouseButton::Left), 60, 20),
            mouse(MouseEventKind::Drag(MouseButton::Left), 80, 20),
            mouse(MouseEventKind::Up(MouseButton::Left), 80, 20),
        ] {
            if let Some(pointer) = pointer_event(&event) {
                tracker.handle_event(pointer, &viewport);
            }
        }
        assert!(!tracker.is_dragging());
        assert!(tracker.rotation().orientation().angle() > 0.1);
    }
}
