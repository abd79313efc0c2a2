//! `ConsoleApp`: wires the console, its scroll container and the engine.
//!
//! The app lives on the UI thread. Engine output reaches it as
//! [`EngineEvent`]s drained by [`ConsoleApp::pump`]; user input leaves it
//! through [`ConsoleApp::submit`].

use crossbeam_channel::Receiver;

use crate::actor::EngineActor;
use crate::common::FileInfo;
use crate::config::ConsoleConfig;
use crate::console::{AppendResult, ConsoleScrollView, ConsoleView, Invalidation};
use crate::engine::{Engine, EngineEvent};
use crate::error::{Error, Result};
use crate::surface::{Canvas, TextMeasure};

/// The console application shell.
pub struct ConsoleApp<M> {
    scroll: ConsoleScrollView<ConsoleView<M>>,
    input: String,
    engine: Option<EngineActor>,
    files: FileInfo,
    auto_scroll: bool,
    /// Output that arrived before the console had a width.
    deferred: Vec<String>,
    redraw: bool,
}

impl<M: TextMeasure> ConsoleApp<M> {
    /// Build the UI. Nothing is sized until [`ConsoleApp::resize`].
    pub fn new(measure: M, config: &ConsoleConfig, files: FileInfo) -> Self {
        let view = ConsoleView::with_config(measure, config);
        Self {
            scroll: ConsoleScrollView::new(view, 0),
            input: String::new(),
            engine: None,
            files,
            auto_scroll: config.auto_scroll,
            deferred: Vec::new(),
            redraw: true,
        }
    }

    /// Initialize `engine` with the app paths and start it.
    pub fn start<E: Engine>(&mut self, engine: E) -> Result<()> {
        let actor = EngineActor::spawn(engine, &self.files)?;
        log::info!("engine started, data in {}", self.files.data_directory().display());
        self.engine = Some(actor);
        Ok(())
    }

    /// Check whether an engine is attached.
    pub const fn is_started(&self) -> bool {
        self.engine.is_some()
    }

    /// The engine's event queue, for use in a `select!`.
    pub fn engine_events(&self) -> Option<&Receiver<EngineEvent>> {
        self.engine.as_ref().map(EngineActor::events)
    }

    /// Lay out the console.
    ///
    /// `width` and `display_height` size the view; `viewport_height` is the
    /// scrollable window of the container. Output deferred while the view
    /// had no width is appended now. A console following the tail keeps
    /// following it.
    pub fn resize(&mut self, width: u32, display_height: u32, viewport_height: u32) {
        let follow = self.follows_tail();
        let view = self.scroll.child_mut();
        view.set_display_height(display_height);
        view.set_size(width, display_height);
        self.scroll.set_viewport_height(viewport_height);
        if follow {
            self.scroll.scroll_to_end();
        }
        self.redraw = true;

        if width > 0 && !self.deferred.is_empty() {
            let deferred = std::mem::take(&mut self.deferred);
            for text in &deferred {
                self.on_message(text);
            }
        }
    }

    /// Append engine output, following the tail when scrolled to the end.
    pub fn on_message(&mut self, text: &str) -> AppendResult {
        let follow = self.follows_tail();
        let result = self.scroll.child_mut().append_text(text);

        match result {
            AppendResult::Deferred => self.deferred.push(text.to_string()),
            AppendResult::Appended(_) => {
                self.apply_invalidation();
                if follow {
                    self.scroll.scroll_to_end();
                }
            }
        }
        result
    }

    /// React to one engine event.
    pub fn handle_engine_event(&mut self, event: EngineEvent) {
        match event {
            EngineEvent::Message(text) => {
                self.on_message(&text);
            }
            EngineEvent::Exited { code } => {
                log::info!("engine exited with code {code:?}");
                let code = code.map_or_else(|| "signal".to_string(), |c| c.to_string());
                self.on_message(&format!("\n[engine exited: {code}]\n"));
                self.engine = None;
            }
            EngineEvent::Error(message) => {
                log::error!("engine error: {message}");
                self.on_message(&format!("\n[engine error: {message}]\n"));
            }
        }
    }

    /// Drain every queued engine event. Returns how many were handled.
    pub fn pump(&mut self) -> usize {
        let events = self
            .engine
            .as_ref()
            .map(EngineActor::drain)
            .unwrap_or_default();
        let count = events.len();
        for event in events {
            self.handle_engine_event(event);
        }
        count
    }

    /// Send the input line plus a newline to the engine and clear it.
    pub fn submit(&mut self) -> Result<()> {
        let engine = self.engine.as_ref().ok_or(Error::EngineNotRunning)?;
        let line = std::mem::take(&mut self.input);
        log::debug!("send: {line:?}");
        engine.send_message(format!("{line}\n"))?;
        self.redraw = true;
        Ok(())
    }

    /// The pending input line.
    pub fn input(&self) -> &str {
        &self.input
    }

    /// Add a character to the input line.
    pub fn push_char(&mut self, c: char) {
        if !c.is_control() {
            self.input.push(c);
            self.redraw = true;
        }
    }

    /// Add pasted text to the input line, dropping line breaks and other
    /// control characters.
    pub fn push_str(&mut self, text: &str) {
        self.input.extend(text.chars().filter(|c| !c.is_control()));
        self.redraw = true;
    }

    /// Remove the last character of the input line.
    pub fn backspace(&mut self) {
        if self.input.pop().is_some() {
            self.redraw = true;
        }
    }

    /// Clear the console output.
    pub fn clear_console(&mut self) {
        self.scroll.child_mut().clear_all_text();
        self.apply_invalidation();
    }

    /// Change the console font size.
    pub fn set_font_size(&mut self, size: i32) {
        let follow = self.follows_tail();
        self.scroll.child_mut().set_font_size(size);
        self.apply_invalidation();
        if follow {
            self.scroll.scroll_to_end();
        }
    }

    /// Scroll by whole lines; positive scrolls towards newer output.
    pub fn scroll_lines(&mut self, lines: i32) {
        let line_height = i32::try_from(self.console().metrics().line_height()).unwrap_or(1);
        self.scroll.scroll_by(lines.saturating_mul(line_height));
        self.redraw = true;
    }

    /// Scroll by one screen less one line.
    pub fn scroll_pages(&mut self, pages: i32) {
        let per_page = i32::try_from(self.console().metrics().lines_in_view())
            .unwrap_or(1)
            .saturating_sub(1)
            .max(1);
        self.scroll_lines(pages.saturating_mul(per_page));
    }

    /// Jump to the oldest output.
    pub fn scroll_home(&mut self) {
        self.scroll.scroll_to(0);
        self.redraw = true;
    }

    /// Jump to the newest output.
    pub fn scroll_end(&mut self) {
        self.scroll.scroll_to_end();
        self.redraw = true;
    }

    /// The console view.
    pub const fn console(&self) -> &ConsoleView<M> {
        self.scroll.child()
    }

    /// The scroll container.
    pub const fn scroll_view(&self) -> &ConsoleScrollView<ConsoleView<M>> {
        &self.scroll
    }

    /// Check whether anything changed since the last [`ConsoleApp::render`].
    pub const fn needs_redraw(&self) -> bool {
        self.redraw
    }

    /// Draw the console through its scroll container.
    pub fn render(&mut self, canvas: &mut dyn Canvas) {
        self.scroll.render(canvas);
        self.redraw = false;
    }

    /// Stop the engine and wait for it.
    pub fn shutdown(&mut self) {
        if let Some(engine) = self.engine.take() {
            engine.join();
        }
    }

    fn follows_tail(&self) -> bool {
        self.auto_scroll && self.scroll.is_at_end()
    }

    fn apply_invalidation(&mut self) {
        let flags = self.scroll.child_mut().take_invalidation();
        if flags.contains(Invalidation::LAYOUT) {
            self.scroll.relayout();
        }
        if flags.contains(Invalidation::REDRAW) {
            self.redraw = true;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::console::DRAW_Y_OFFSET;
    use crate::engine::{EngineCommand, MessageSink};
    use crate::surface::{Monospace, RecordingCanvas};
    use std::time::{Duration, Instant};

    struct ParrotEngine;

    impl Engine for ParrotEngine {
        fn init(&mut self, _files: &FileInfo) -> Result<()> {
            Ok(())
        }

        fn run(
            &mut self,
            _argv: &[String],
            commands: &Receiver<EngineCommand>,
            sink: &MessageSink,
        ) -> Result<()> {
            for command in commands {
                match command {
                    EngineCommand::Send(text) => {
                        sink.on_message(text);
                    }
                    EngineCommand::Shutdown => break,
                }
            }
            Ok(())
        }
    }

    /// 12px text at one pixel per column per text pixel, 5 visible lines.
    fn app() -> ConsoleApp<Monospace> {
        let config = ConsoleConfig::default();
        let files = FileInfo::new("/app", "/data", "/cache");
        let mut app = ConsoleApp::new(Monospace::new(1, 1), &config, files);
        app.resize(10 * 12, 5 * 14, 5 * 14 + DRAW_Y_OFFSET);
        app
    }

    fn lines(app: &ConsoleApp<Monospace>) -> Vec<&str> {
        app.console().lines().iter().collect()
    }

    #[test]
    fn test_deferred_until_sized() {
        let config = ConsoleConfig::default();
        let files = FileInfo::new("/app", "/data", "/cache");
        let mut app = ConsoleApp::new(Monospace::new(1, 1), &config, files);

        assert_eq!(app.on_message("early\n"), AppendResult::Deferred);
        assert_eq!(app.console().line_count(), 0);

        app.resize(120, 70, 86);
        assert_eq!(lines(&app), vec!["early", ""]);
    }

    #[test]
    fn test_follows_tail() {
        let mut app = app();
        for i in 0..20 {
            app.on_message(&format!("{i}\n"));
        }
        assert!(app.scroll_view().is_at_end());
        // 21 lines, 5 on screen
        assert_eq!(app.console().start_line(), 16);
    }

    #[test]
    fn test_stays_put_when_scrolled_back() {
        let mut app = app();
        for i in 0..20 {
            app.on_message(&format!("{i}\n"));
        }
        app.scroll_home();
        app.on_message("more\n");
        assert_eq!(app.scroll_view().scroll_y(), 0);
        assert_eq!(app.console().start_line(), 0);
    }

    #[test]
    fn test_scroll_lines_and_pages() {
        let mut app = app();
        app.on_message(&"x\n".repeat(30));
        app.scroll_home();
        app.scroll_lines(3);
        assert_eq!(app.console().start_line(), 3);
        app.scroll_pages(1);
        assert_eq!(app.console().start_line(), 7);
    }

    #[test]
    fn test_clear_console_resets_scroll() {
        let mut app = app();
        app.on_message(&"x\n".repeat(30));
        app.clear_console();
        assert_eq!(app.console().line_count(), 0);
        assert_eq!(app.scroll_view().scroll_y(), 0);
    }

    #[test]
    fn test_input_editing() {
        let mut app = app();
        app.push_str("e2\r\n\te4\x1b");
        app.push_char('\u{7}');
        app.push_char('!');
        app.backspace();
        assert_eq!(app.input(), "e2e4");
    }

    #[test]
    fn test_submit_without_engine() {
        let mut app = app();
        app.push_str("go");
        assert!(matches!(app.submit(), Err(Error::EngineNotRunning)));
        assert_eq!(app.input(), "go");
    }

    #[test]
    fn test_submit_round_trip() {
        let mut app = app();
        app.start(ParrotEngine).unwrap();
        app.push_str("e2e4");
        app.submit().unwrap();
        assert!(app.input().is_empty());

        let deadline = Instant::now() + Duration::from_secs(5);
        while app.console().line_count() == 0 && Instant::now() < deadline {
            app.pump();
            std::thread::sleep(Duration::from_millis(5));
        }
        assert_eq!(lines(&app), vec!["e2e4", ""]);
        app.shutdown();
        assert!(!app.is_started());
    }

    #[test]
    fn test_exit_event_appends_notice() {
        let mut app = app();
        app.handle_engine_event(EngineEvent::Exited { code: Some(3) });
        // ten columns wide, so the notice wraps
        assert_eq!(lines(&app), vec!["", "[engine ex", "ited: 3]", ""]);
        assert!(lines(&app).concat().contains("[engine exited: 3]"));
    }

    #[test]
    fn test_font_change_keeps_following_tail() {
        let mut app = app();
        for i in 0..20 {
            app.on_message(&format!("{i}\n"));
        }
        app.set_font_size(16);
        assert!(app.scroll_view().is_at_end());

        app.on_message("more\n");
        assert!(app.scroll_view().is_at_end());
        assert_eq!(app.console().lines().iter().last(), Some(""));
    }

    #[test]
    fn test_resize_keeps_following_tail() {
        let mut app = app();
        app.on_message(&"x\n".repeat(30));
        app.resize(10 * 12, 3 * 14, 3 * 14 + DRAW_Y_OFFSET);
        assert!(app.scroll_view().is_at_end());

        app.on_message("more\n");
        assert!(app.scroll_view().is_at_end());
    }

    #[test]
    fn test_resize_leaves_scrolled_back_console_alone() {
        let mut app = app();
        app.on_message(&"x\n".repeat(30));
        app.scroll_home();
        app.resize(10 * 12, 3 * 14, 3 * 14 + DRAW_Y_OFFSET);
        assert_eq!(app.scroll_view().scroll_y(), 0);
    }

    #[test]
    fn test_render_clears_redraw() {
        let mut app = app();
        app.on_message("hello");
        assert!(app.needs_redraw());

        let mut canvas = RecordingCanvas::new();
        app.render(&mut canvas);
        assert!(!app.needs_redraw());
        assert_eq!(canvas.texts(), vec![("hello", i32::try_from(DRAW_Y_OFFSET).unwrap())]);
    }
}
