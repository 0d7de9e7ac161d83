use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use crossterm::event::{
    self, Event, KeyEvent, KeyEventKind, MouseButton, MouseEvent, MouseEventKind,
};
use ratatui::layout::{Position, Rect};
use tracing::{debug, info};

use crate::{
    domain::Selection,
    picker::{TimePicker, WheelSlot},
    presentation::{self, UiContext},
};

use super::{
    input::{DragGesture, InputRouter, KeyAction},
    options::UiOptions,
    status::StatusLine,
    terminal::TerminalGuard,
};

pub(crate) struct App {
    picker: TimePicker,
    options: UiOptions,
    title: Option<String>,
    status: StatusLine,
    input_router: InputRouter,
    drag: Option<DragGesture>,
    wheel_areas: [Rect; 2],
    should_quit: bool,
    result: Option<Selection>,
}

impl App {
    pub fn new(picker: TimePicker, options: UiOptions, title: Option<String>) -> Self {
        let input_router = InputRouter::new(options.keymap_store.clone());
        Self {
            picker,
            options,
            title,
            status: StatusLine::new(),
            input_router,
            drag: None,
            wheel_areas: [Rect::default(); 2],
            should_quit: false,
            result: None,
        }
    }

    pub fn run(&mut self) -> Result<Selection> {
        let mut terminal = TerminalGuard::new()?;
        let initial = self.picker.mount();
        debug!(selection = %initial.formatted, "picker mounted");

        let mut last_frame = Instant::now();
        let mut waited_idle = true;
        while !self.should_quit {
            let now = Instant::now();
            let since_last = now.saturating_duration_since(last_frame);
            let elapsed = self.frame_elapsed(since_last, waited_idle);
            self.advance(elapsed);
            last_frame = now;

            terminal.draw(|frame| self.draw(frame))?;

            waited_idle = !self.picker.is_animating();
            let timeout = if waited_idle {
                self.options.tick_rate
            } else {
                self.options.frame_interval
            };
            if !event::poll(timeout)? {
                continue;
            }
            match event::read()? {
                Event::Key(key) => self.handle_key(key),
                Event::Mouse(mouse) => self.handle_mouse(mouse, Instant::now()),
                Event::Resize(width, height) => {
                    terminal.resize(Rect::new(0, 0, width, height))?;
                }
                Event::FocusGained | Event::FocusLost | Event::Paste(_) => {}
            }
        }

        match self.result.take() {
            Some(selection) => {
                info!(selection = %selection.formatted, "time confirmed");
                Ok(selection)
            }
            None => Err(anyhow!("user exited without confirming a time")),
        }
    }

    /// Time to animate for this frame. A wait that ran at the idle tick rate
    /// counts as a single frame so a freshly started settle is still drawn.
    fn frame_elapsed(&self, since_last: Duration, waited_idle: bool) -> Duration {
        if waited_idle {
            since_last.min(self.options.frame_interval)
        } else {
            since_last
        }
    }

    /// Runs one frame of the picker pipeline and mirrors commits into the
    /// status line.
    fn advance(&mut self, elapsed: Duration) {
        if let Some(selection) = self.picker.frame(elapsed) {
            self.status.selected(&selection);
        }
    }

    fn draw(&mut self, frame: &mut ratatui::Frame<'_>) {
        let help = if self.options.show_help {
            self.input_router.help_text()
        } else {
            None
        };
        self.wheel_areas = presentation::draw(
            frame,
            UiContext {
                picker: &self.picker,
                palette: &self.options.palette,
                title: self.title.as_deref(),
                status_message: self.status.message(),
                help: help.as_deref(),
            },
        );
    }

    fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }
        let Some(action) = self.input_router.classify(&key) else {
            return;
        };
        match action {
            KeyAction::Confirm => self.on_confirm(),
            KeyAction::Quit => self.should_quit = true,
            KeyAction::Recenter => {
                self.picker.recenter();
                self.status.recentered();
            }
            KeyAction::WheelStep(delta) => self.picker.focused_wheel_mut().step(delta),
            KeyAction::WheelPage(delta) => {
                let page = self.options.geometry.visible_items as i64;
                self.picker.focused_wheel_mut().step(delta * page);
            }
            KeyAction::FocusStep(_) => self.picker.focus_next(),
        }
    }

    fn handle_mouse(&mut self, mouse: MouseEvent, at: Instant) {
        let row_height = self.options.geometry.row_height;
        match mouse.kind {
            MouseEventKind::ScrollDown | MouseEventKind::ScrollUp => {
                let Some(slot) = self.slot_at(mouse.column, mouse.row) else {
                    return;
                };
                let delta = if mouse.kind == MouseEventKind::ScrollDown {
                    1
                } else {
                    -1
                };
                self.picker.set_focus(slot);
                self.picker.wheel_mut(slot).step(delta);
            }
            MouseEventKind::Down(MouseButton::Left) => {
                let Some(slot) = self.slot_at(mouse.column, mouse.row) else {
                    return;
                };
                self.picker.set_focus(slot);
                self.picker.wheel_mut(slot).begin_drag();
                self.drag = Some(DragGesture::start(slot, mouse.row, at));
            }
            MouseEventKind::Drag(MouseButton::Left) => {
                if let Some(gesture) = self.drag.as_mut() {
                    let delta = gesture.move_to(mouse.row, at, row_height);
                    let slot = gesture.slot;
                    self.picker.wheel_mut(slot).drag_by(delta);
                }
            }
            MouseEventKind::Up(MouseButton::Left) => {
                if let Some(gesture) = self.drag.take() {
                    self.picker
                        .wheel_mut(gesture.slot)
                        .release(gesture.release_velocity(at));
                }
            }
            _ => {}
        }
    }

    fn slot_at(&self, column: u16, row: u16) -> Option<WheelSlot> {
        let position = Position::new(column, row);
        [WheelSlot::Hour, WheelSlot::Minute]
            .into_iter()
            .zip(self.wheel_areas)
            .find(|(_, area)| area.contains(position))
            .map(|(slot, _)| slot)
    }

    fn on_confirm(&mut self) {
        let selection = self.picker.selection();
        self.status.confirmed(&selection);
        self.result = Some(selection);
        self.should_quit = true;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ClockTime;
    use crossterm::event::{KeyCode, KeyModifiers};
    use ratatui::{Terminal, backend::TestBackend};

    const FRAME: Duration = Duration::from_millis(16);

    fn app(start: ClockTime, min: ClockTime) -> App {
        let mut picker = TimePicker::new(start, min);
        picker.mount();
        App::new(picker, UiOptions::default(), None)
    }

    fn press(app: &mut App, code: KeyCode) {
        app.handle_key(KeyEvent::new(code, KeyModifiers::NONE));
    }

    fn settle(app: &mut App) {
        for _ in 0..600 {
            app.advance(FRAME);
            if !app.picker.is_animating() {
                app.advance(FRAME);
                return;
            }
        }
        panic!("picker never settled");
    }

    fn render(app: &mut App) {
        let mut terminal = Terminal::new(TestBackend::new(60, 20)).expect("terminal");
        terminal.draw(|frame| app.draw(frame)).expect("draw");
    }

    #[test]
    fn confirm_returns_current_selection() {
        let mut app = app(ClockTime::new(7, 0), ClockTime::new(8, 29));
        press(&mut app, KeyCode::Enter);
        assert!(app.should_quit);
        assert_eq!(app.result.as_ref().map(|s| s.formatted.as_str()), Some("08:29"));
        assert_eq!(app.status.message(), "Confirmed 08:29");
    }

    #[test]
    fn quit_leaves_result_empty() {
        let mut app = app(ClockTime::MIDNIGHT, ClockTime::MIDNIGHT);
        press(&mut app, KeyCode::Esc);
        assert!(app.should_quit);
        assert!(app.result.is_none());
    }

    #[test]
    fn arrow_keys_drive_the_focused_wheel() {
        let mut app = app(ClockTime::new(10, 10), ClockTime::MIDNIGHT);
        press(&mut app, KeyCode::Down);
        settle(&mut app);
        assert_eq!(app.picker.hour(), 11);

        press(&mut app, KeyCode::Tab);
        press(&mut app, KeyCode::PageUp);
        settle(&mut app);
        assert_eq!(app.picker.minute(), 5);
        assert_eq!(app.status.message(), "Selected 11:05");
    }

    #[test]
    fn step_after_idle_wait_animates_over_several_frames() {
        let mut app = app(ClockTime::new(10, 10), ClockTime::MIDNIGHT);
        let idle_wait = app.options.tick_rate;
        press(&mut app, KeyCode::Down);

        let elapsed = app.frame_elapsed(idle_wait, true);
        assert_eq!(elapsed, app.options.frame_interval);
        app.advance(elapsed);
        assert!(app.picker.is_animating(), "one frame must not finish the settle");
        assert_eq!(app.frame_elapsed(FRAME * 2, false), FRAME * 2);

        settle(&mut app);
        assert_eq!(app.picker.hour(), 11);
    }

    #[test]
    fn drag_released_after_a_pause_snaps_in_place() {
        let mut app = app(ClockTime::new(10, 30), ClockTime::MIDNIGHT);
        render(&mut app);
        let minute_area = app.wheel_areas[1];
        let start = Instant::now();
        let mouse = |kind, row| MouseEvent {
            kind,
            column: minute_area.x + 1,
            row,
            modifiers: KeyModifiers::NONE,
        };
        let moved = start + Duration::from_millis(20);
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), minute_area.y + 4), start);
        app.handle_mouse(mouse(MouseEventKind::Drag(MouseButton::Left), minute_area.y + 2), moved);
        app.handle_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), minute_area.y + 2),
            moved + Duration::from_secs(2),
        );
        settle(&mut app);
        assert_eq!(app.picker.minute(), 32);
    }

    #[test]
    fn recenter_returns_to_start() {
        let mut app = app(ClockTime::new(10, 10), ClockTime::MIDNIGHT);
        press(&mut app, KeyCode::Up);
        settle(&mut app);
        assert_eq!(app.picker.hour(), 9);
        press(&mut app, KeyCode::Char('r'));
        settle(&mut app);
        assert_eq!(app.picker.hour(), 10);
    }

    #[test]
    fn mouse_wheel_targets_the_wheel_under_the_cursor() {
        let mut app = app(ClockTime::new(10, 10), ClockTime::MIDNIGHT);
        render(&mut app);
        let minute_area = app.wheel_areas[1];
        app.handle_mouse(
            MouseEvent {
                kind: MouseEventKind::ScrollDown,
                column: minute_area.x + 1,
                row: minute_area.y + 1,
                modifiers: KeyModifiers::NONE,
            },
            Instant::now(),
        );
        assert_eq!(app.picker.focus(), WheelSlot::Minute);
        settle(&mut app);
        assert_eq!(app.picker.minute(), 11);
        assert_eq!(app.picker.hour(), 10);
    }

    #[test]
    fn mouse_drag_flings_and_snaps() {
        let mut app = app(ClockTime::new(10, 10), ClockTime::MIDNIGHT);
        render(&mut app);
        let hour_area = app.wheel_areas[0];
        let start = Instant::now();
        let mouse = |kind, row| MouseEvent {
            kind,
            column: hour_area.x + 1,
            row,
            modifiers: KeyModifiers::NONE,
        };
        app.handle_mouse(mouse(MouseEventKind::Down(MouseButton::Left), hour_area.y + 3), start);
        app.handle_mouse(
            mouse(MouseEventKind::Drag(MouseButton::Left), hour_area.y + 1),
            start + Duration::from_secs(1),
        );
        app.handle_mouse(
            mouse(MouseEventKind::Up(MouseButton::Left), hour_area.y + 1),
            start + Duration::from_secs(1),
        );
        settle(&mut app);
        // Two lines up at a slow pace: the wheel moves two rows forward.
        assert_eq!(app.picker.hour(), 12);
    }
}
