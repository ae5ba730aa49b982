use crossterm::event::KeyEvent;

/// All events funnelled through the main loop's mpsc channel.
pub enum AppEvent {
    /// A keypress from the keyboard-reading thread.
    Key(KeyEvent),
    /// The terminal was resized; triggers a re-render.
    Resize,
}
