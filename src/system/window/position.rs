//! Cursor-relative window placement

use mouse_position::mouse_position::Mouse;
use tauri::{AppHandle, Monitor};

/// Rectangle in logical pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

impl Bounds {
    fn from_monitor(monitor: &Monitor) -> Self {
        let scale = monitor.scale_factor();
        let position = monitor.position();
        let size = monitor.size();
        Self {
            x: position.x as f64 / scale,
            y: position.y as f64 / scale,
            width: size.width as f64 / scale,
            height: size.height as f64 / scale,
        }
    }

    fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.x && x < self.x + self.width && y >= self.y && y < self.y + self.height
    }
}

/// Offset from the cursor, then keep the whole window on the monitor
pub fn anchored_position(cursor: (f64, f64), offset: f64, window: (f64, f64), screen: Bounds) -> (f64, f64) {
    let (width, height) = window;
    let mut x = cursor.0 + offset;
    let mut y = cursor.1 + offset;

    if x + width > screen.x + screen.width {
        x = screen.x + screen.width - width;
    }
    if y + height > screen.y + screen.height {
        y = screen.y + screen.height - height;
    }
    if x < screen.x {
        x = screen.x;
    }
    if y < screen.y {
        y = screen.y;
    }

    (x, y)
}

/// Logical cursor position and the bounds of the monitor under it
pub fn cursor_and_monitor(app: &AppHandle) -> Option<((f64, f64), Bounds)> {
    let Mouse::Position { x, y } = Mouse::get_mouse_position() else {
        tracing::debug!("[Window] Cursor position unavailable");
        return None;
    };

    let monitors = match app.available_monitors() {
        Ok(monitors) => monitors,
        Err(e) => {
            tracing::debug!("[Window] Failed to list monitors: {}", e);
            Vec::new()
        }
    };

    // mouse_position reports logical points on macOS
    let cursor = (x as f64, y as f64);
    let screen = monitors
        .iter()
        .map(Bounds::from_monitor)
        .find(|bounds| bounds.contains(cursor.0, cursor.1))
        .or_else(|| {
            app.primary_monitor()
                .ok()
                .flatten()
                .map(|monitor| Bounds::from_monitor(&monitor))
        })?;

    Some((cursor, screen))
}
