//! Interaction Controller: turns pointer and keyboard input into Window Store actions.
//!
//! Drag and resize sessions live in [`InteractionState`], which is never persisted. Both
//! gestures render a local preview while the pointer is down and commit a single
//! `UpdateBounds` on release: the snapped and clamped position for drags, the floored rect for
//! resizes.

use serde::{Deserialize, Serialize};

use desktop_app_contract::ApplicationId;

use crate::{
    apps::LAUNCHER_APP_ID,
    model::{
        BoundsPatch, DesktopState, OpenWindowRequest, WindowId, WindowRecord, WindowRect,
        MIN_WINDOW_HEIGHT, MIN_WINDOW_WIDTH,
    },
    reducer::DesktopAction,
};

/// Tunables for drag snapping and resize floors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Grid step for the committed drag position. Values below 1 disable snapping.
    pub snap_grid: i32,
    pub min_width: i32,
    pub min_height: i32,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            snap_grid: 24,
            min_width: MIN_WINDOW_WIDTH,
            min_height: MIN_WINDOW_HEIGHT,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PointerPosition {
    pub x: i32,
    pub y: i32,
}

impl PointerPosition {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    fn delta_from(self, start: Self) -> (i32, i32) {
        (self.x - start.x, self.y - start.y)
    }
}

/// Size of the surface windows are dragged within.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContainerBounds {
    pub width: i32,
    pub height: i32,
}

impl Default for ContainerBounds {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResizeEdge {
    North,
    South,
    East,
    West,
    NorthEast,
    NorthWest,
    SouthEast,
    SouthWest,
}

impl ResizeEdge {
    pub const ALL: [Self; 8] = [
        Self::North,
        Self::South,
        Self::East,
        Self::West,
        Self::NorthEast,
        Self::NorthWest,
        Self::SouthEast,
        Self::SouthWest,
    ];

    /// CSS hook for the handle element.
    pub const fn token(self) -> &'static str {
        match self {
            Self::North => "n",
            Self::South => "s",
            Self::East => "e",
            Self::West => "w",
            Self::NorthEast => "ne",
            Self::NorthWest => "nw",
            Self::SouthEast => "se",
            Self::SouthWest => "sw",
        }
    }

    /// Direction each axis moves in: `1` grows toward +x/+y, `-1` moves the near edge, `0` is fixed.
    const fn axes(self) -> (i8, i8) {
        match self {
            Self::North => (0, -1),
            Self::South => (0, 1),
            Self::East => (1, 0),
            Self::West => (-1, 0),
            Self::NorthEast => (1, -1),
            Self::NorthWest => (-1, -1),
            Self::SouthEast => (1, 1),
            Self::SouthWest => (-1, 1),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DragSession {
    pub window_id: WindowId,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    /// Raw follow rect shown while the pointer is still down.
    pub preview: WindowRect,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResizeSession {
    pub window_id: WindowId,
    pub edge: ResizeEdge,
    pub pointer_start: PointerPosition,
    pub rect_start: WindowRect,
    /// Rect shown while the pointer is still down.
    pub preview: WindowRect,
}

/// Ephemeral pointer state. At most one session is active at a time.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct InteractionState {
    pub dragging: Option<DragSession>,
    pub resizing: Option<ResizeSession>,
    pub container: ContainerBounds,
}

impl InteractionState {
    pub fn set_container(&mut self, container: ContainerBounds) {
        self.container = container;
    }

    pub fn is_dragging(&self, window_id: &WindowId) -> bool {
        self.dragging
            .as_ref()
            .is_some_and(|session| &session.window_id == window_id)
    }

    /// Live rect for `window_id` while it is being dragged or resized.
    pub fn preview_rect(&self, window_id: &WindowId) -> Option<WindowRect> {
        let dragged = self
            .dragging
            .as_ref()
            .filter(|session| &session.window_id == window_id)
            .map(|session| session.preview);
        dragged.or_else(|| {
            self.resizing
                .as_ref()
                .filter(|session| &session.window_id == window_id)
                .map(|session| session.preview)
        })
    }

    pub fn is_idle(&self) -> bool {
        self.dragging.is_none() && self.resizing.is_none()
    }

    /// Starts dragging `window`. Maximized and minimized windows do not move.
    pub fn begin_drag(&mut self, window: &WindowRecord, pointer: PointerPosition) -> bool {
        if window.maximized || window.minimized {
            return false;
        }
        self.resizing = None;
        self.dragging = Some(DragSession {
            window_id: window.id.clone(),
            pointer_start: pointer,
            rect_start: window.rect,
            preview: window.rect,
        });
        true
    }

    /// Moves the drag preview with the pointer and returns it. Nothing reaches the store.
    pub fn drag_to(&mut self, pointer: PointerPosition) -> Option<WindowRect> {
        let session = self.dragging.as_mut()?;
        let (dx, dy) = pointer.delta_from(session.pointer_start);
        session.preview = session.rect_start.offset(dx, dy);
        Some(session.preview)
    }

    /// Ends the drag and returns the snapped, clamped final position.
    pub fn end_drag(
        &mut self,
        pointer: PointerPosition,
        config: &InteractionConfig,
    ) -> Option<DesktopAction> {
        let session = self.dragging.take()?;
        let (dx, dy) = pointer.delta_from(session.pointer_start);
        let moved = session.rect_start.offset(dx, dy);
        let (x, y) = settle_position(moved, self.container, config.snap_grid);
        Some(DesktopAction::UpdateBounds {
            window_id: session.window_id,
            bounds: BoundsPatch::position(x, y),
        })
    }

    /// Starts resizing `window` from `edge`. Maximized and minimized windows do not resize.
    pub fn begin_resize(
        &mut self,
        window: &WindowRecord,
        edge: ResizeEdge,
        pointer: PointerPosition,
    ) -> bool {
        if window.maximized || window.minimized {
            return false;
        }
        self.dragging = None;
        self.resizing = Some(ResizeSession {
            window_id: window.id.clone(),
            edge,
            pointer_start: pointer,
            rect_start: window.rect,
            preview: window.rect,
        });
        true
    }

    /// Updates the resize preview and returns it.
    pub fn resize_to(
        &mut self,
        pointer: PointerPosition,
        config: &InteractionConfig,
    ) -> Option<WindowRect> {
        let session = self.resizing.as_mut()?;
        let (dx, dy) = pointer.delta_from(session.pointer_start);
        session.preview = resize_rect(session.rect_start, session.edge, dx, dy, config);
        Some(session.preview)
    }

    /// Ends the resize and returns the single committed rect.
    pub fn end_resize(
        &mut self,
        pointer: PointerPosition,
        config: &InteractionConfig,
    ) -> Option<DesktopAction> {
        let session = self.resizing.take()?;
        let (dx, dy) = pointer.delta_from(session.pointer_start);
        let rect = resize_rect(session.rect_start, session.edge, dx, dy, config);
        Some(DesktopAction::UpdateBounds {
            window_id: session.window_id,
            bounds: BoundsPatch::rect(rect),
        })
    }

    /// Ends whichever session is active at `pointer`.
    pub fn release(
        &mut self,
        pointer: PointerPosition,
        config: &InteractionConfig,
    ) -> Option<DesktopAction> {
        if self.dragging.is_some() {
            self.end_drag(pointer, config)
        } else {
            self.end_resize(pointer, config)
        }
    }

    /// Abandons the active session. The window keeps its committed rect.
    pub fn cancel(&mut self) {
        self.dragging = None;
        self.resizing = None;
    }
}

/// Rounds `value` to the nearest multiple of `grid`, with halves rounding up.
pub fn snap_to_grid(value: i32, grid: i32) -> i32 {
    if grid < 1 {
        return value;
    }
    (value + grid / 2).div_euclid(grid) * grid
}

/// Keeps a window of `w`x`h` inside the container. Oversized windows pin to the origin.
pub fn clamp_position(x: i32, y: i32, w: i32, h: i32, container: ContainerBounds) -> (i32, i32) {
    let max_x = (container.width - w).max(0);
    let max_y = (container.height - h).max(0);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

fn settle_position(rect: WindowRect, container: ContainerBounds, grid: i32) -> (i32, i32) {
    clamp_position(
        snap_to_grid(rect.x, grid),
        snap_to_grid(rect.y, grid),
        rect.w,
        rect.h,
        container,
    )
}

fn resize_axis(origin: i32, len: i32, delta: i32, direction: i8, floor: i32) -> (i32, i32) {
    match direction {
        1 => (origin, (len + delta).max(floor)),
        -1 => {
            let next = (len - delta).max(floor);
            (origin + len - next, next)
        }
        _ => (origin, len),
    }
}

/// Applies a pointer delta on `edge` to `start`.
///
/// Sizes never drop below the configured floor, and the edge opposite the handle stays put.
pub fn resize_rect(
    start: WindowRect,
    edge: ResizeEdge,
    dx: i32,
    dy: i32,
    config: &InteractionConfig,
) -> WindowRect {
    let (ax, ay) = edge.axes();
    let (x, w) = resize_axis(start.x, start.w, dx, ax, config.min_width);
    let (y, h) = resize_axis(start.y, start.h, dy, ay, config.min_height);
    WindowRect { x, y, w, h }
}

/// Key plus modifiers, decoupled from the DOM event.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyChord {
    pub key: String,
    pub ctrl: bool,
    pub alt: bool,
    pub shift: bool,
    pub meta: bool,
}

impl KeyChord {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            ..Self::default()
        }
    }

    pub fn ctrl(mut self) -> Self {
        self.ctrl = true;
        self
    }

    pub fn shift(mut self) -> Self {
        self.shift = true;
        self
    }
}

impl From<&web_sys::KeyboardEvent> for KeyChord {
    fn from(ev: &web_sys::KeyboardEvent) -> Self {
        Self {
            key: ev.key(),
            ctrl: ev.ctrl_key(),
            alt: ev.alt_key(),
            shift: ev.shift_key(),
            meta: ev.meta_key(),
        }
    }
}

/// What the shell should do with a key press.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyRoute {
    Dispatch(DesktopAction),
    /// Move DOM focus within the window without touching the store.
    CycleFocus {
        window_id: WindowId,
        backwards: bool,
    },
    Ignore,
}

impl KeyChord {
    /// Ctrl+Shift+L. `key` is compared case-insensitively since Shift reports `"L"`.
    pub fn is_launcher_chord(&self) -> bool {
        self.ctrl && self.shift && !self.alt && !self.meta && self.key.eq_ignore_ascii_case("l")
    }
}

/// Maps a global key press to a store action or a DOM-only focus move.
pub fn route_key(chord: &KeyChord, state: &DesktopState) -> KeyRoute {
    if chord.is_launcher_chord() {
        return KeyRoute::Dispatch(DesktopAction::OpenWindow(OpenWindowRequest::new(
            ApplicationId::trusted(LAUNCHER_APP_ID),
        )));
    }
    match chord.key.as_str() {
        "Escape" if !chord.ctrl && !chord.alt && !chord.meta => match &state.active_window_id {
            Some(window_id) => KeyRoute::Dispatch(DesktopAction::CloseWindow {
                window_id: window_id.clone(),
            }),
            None => KeyRoute::Ignore,
        },
        "Tab" if !chord.ctrl && !chord.alt && !chord.meta => match &state.active_window_id {
            Some(window_id) => KeyRoute::CycleFocus {
                window_id: window_id.clone(),
                backwards: chord.shift,
            },
            None => KeyRoute::Ignore,
        },
        _ => KeyRoute::Ignore,
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::{
        apps::AppRegistry,
        reducer::{reduce_desktop, RuntimeEffect},
        window_manager::test_support::insert_window,
    };

    fn window(state: &DesktopState, id: &str) -> WindowRecord {
        state
            .window(&WindowId(id.to_string()))
            .cloned()
            .expect("window")
    }

    fn position_of(action: Option<DesktopAction>) -> (i32, i32) {
        match action {
            Some(DesktopAction::UpdateBounds { bounds, .. }) => (
                bounds.x.expect("x"),
                bounds.y.expect("y"),
            ),
            other => panic!("expected a bounds update, got {other:?}"),
        }
    }

    #[test]
    fn snapping_rounds_halves_up() {
        assert_eq!(snap_to_grid(0, 24), 0);
        assert_eq!(snap_to_grid(11, 24), 0);
        assert_eq!(snap_to_grid(12, 24), 24);
        assert_eq!(snap_to_grid(37, 24), 48);
        assert_eq!(snap_to_grid(-12, 24), 0);
        assert_eq!(snap_to_grid(-13, 24), -24);
        assert_eq!(snap_to_grid(17, 0), 17);
    }

    #[test]
    fn clamping_keeps_windows_on_screen() {
        let container = ContainerBounds {
            width: 1000,
            height: 700,
        };
        assert_eq!(clamp_position(-40, -5, 300, 200, container), (0, 0));
        assert_eq!(clamp_position(900, 650, 300, 200, container), (700, 500));
        assert_eq!(clamp_position(50, 50, 1200, 900, container), (0, 0));
    }

    #[test]
    fn drag_follows_pointer_then_commits_snapped_and_clamped() {
        let mut state = DesktopState::default();
        insert_window(&mut state, "win_terminal_1", 10, false);
        let record = window(&state, "win_terminal_1");
        let mut interaction = InteractionState {
            container: ContainerBounds {
                width: 1000,
                height: 800,
            },
            ..InteractionState::default()
        };
        let config = InteractionConfig::default();

        assert!(interaction.begin_drag(&record, PointerPosition::new(150, 110)));
        assert!(interaction.is_dragging(&record.id));
        let preview = interaction
            .drag_to(PointerPosition::new(163, 121))
            .expect("preview");
        assert_eq!((preview.x, preview.y), (113, 111));
        assert_eq!(interaction.preview_rect(&record.id), Some(preview));

        let committed = interaction.end_drag(PointerPosition::new(163, 121), &config);
        assert_eq!(position_of(committed), (120, 120));
        assert!(interaction.dragging.is_none());

        assert!(interaction.begin_drag(&record, PointerPosition::new(0, 0)));
        let committed = interaction.end_drag(PointerPosition::new(900, 900), &config);
        assert_eq!(position_of(committed), (300, 350));
    }

    #[test]
    fn maximized_windows_do_not_start_sessions() {
        let mut state = DesktopState::default();
        insert_window(&mut state, "win_terminal_1", 10, false);
        let mut record = window(&state, "win_terminal_1");
        record.maximized = true;
        let mut interaction = InteractionState::default();

        assert!(!interaction.begin_drag(&record, PointerPosition::default()));
        assert!(!interaction.begin_resize(&record, ResizeEdge::East, PointerPosition::default()));
        assert_eq!(interaction, InteractionState::default());
        assert_eq!(interaction.drag_to(PointerPosition::new(5, 5)), None);
    }

    #[test]
    fn resize_floors_size_and_anchors_the_opposite_edge() {
        let config = InteractionConfig::default();
        let start = WindowRect {
            x: 100,
            y: 100,
            w: 700,
            h: 450,
        };

        assert_eq!(
            resize_rect(start, ResizeEdge::SouthEast, 50, -40, &config),
            WindowRect {
                x: 100,
                y: 100,
                w: 750,
                h: 410
            }
        );
        assert_eq!(
            resize_rect(start, ResizeEdge::West, 600, 0, &config),
            WindowRect {
                x: 500,
                y: 100,
                w: 300,
                h: 450
            }
        );
        assert_eq!(
            resize_rect(start, ResizeEdge::NorthWest, -20, 400, &config),
            WindowRect {
                x: 80,
                y: 350,
                w: 720,
                h: 200
            }
        );
        assert_eq!(
            resize_rect(start, ResizeEdge::South, 99, -1000, &config),
            WindowRect {
                x: 100,
                y: 100,
                w: 700,
                h: 200
            }
        );
    }

    #[test]
    fn resize_previews_then_commits_one_rect() {
        let mut state = DesktopState::default();
        insert_window(&mut state, "win_terminal_1", 10, false);
        let record = window(&state, "win_terminal_1");
        let config = InteractionConfig::default();
        let mut interaction = InteractionState::default();

        assert!(interaction.begin_resize(&record, ResizeEdge::East, PointerPosition::new(800, 300)));
        let preview = interaction
            .resize_to(PointerPosition::new(850, 300), &config)
            .expect("preview");
        assert_eq!(preview.w, 750);
        assert_eq!(interaction.preview_rect(&record.id), Some(preview));

        let committed = interaction.release(PointerPosition::new(820, 310), &config);
        assert_eq!(
            committed,
            Some(DesktopAction::UpdateBounds {
                window_id: record.id.clone(),
                bounds: BoundsPatch::rect(WindowRect {
                    x: 100,
                    y: 100,
                    w: 720,
                    h: 450
                }),
            })
        );
        assert_eq!(interaction.preview_rect(&record.id), None);
        assert!(interaction.is_idle());
    }

    #[test]
    fn drag_moves_stay_local_until_release() {
        let registry = AppRegistry::builtin();
        let mut state = DesktopState::default();
        insert_window(&mut state, "win_terminal_1", 10, false);
        let record = window(&state, "win_terminal_1");
        let before = state.clone();
        let config = InteractionConfig::default();
        let mut interaction = InteractionState::default();

        assert!(interaction.begin_drag(&record, PointerPosition::new(400, 300)));
        for step in 1..=10 {
            let preview = interaction
                .drag_to(PointerPosition::new(400 - 40 * step, 300 - 40 * step))
                .expect("preview");
            assert_eq!((preview.x, preview.y), (100 - 40 * step, 100 - 40 * step));
        }
        assert_eq!(state, before);
        assert_eq!(
            interaction.preview_rect(&record.id).map(|rect| (rect.x, rect.y)),
            Some((-300, -300))
        );

        let committed = interaction
            .release(PointerPosition::new(0, -100), &config)
            .expect("commit");
        let effects = reduce_desktop(&mut state, &registry, committed).expect("reduce");
        let writes = effects
            .iter()
            .filter(|effect| matches!(effect, RuntimeEffect::PersistLayout))
            .count();
        assert_eq!(writes, 1);
        assert_eq!(
            state.window(&record.id).map(|w| (w.rect.x, w.rect.y)),
            Some((0, 0))
        );
        assert_eq!(interaction.preview_rect(&record.id), None);
    }

    #[test]
    fn cancelled_drag_leaves_the_committed_rect() {
        let mut state = DesktopState::default();
        insert_window(&mut state, "win_terminal_1", 10, false);
        let record = window(&state, "win_terminal_1");
        let mut interaction = InteractionState::default();

        interaction.begin_drag(&record, PointerPosition::new(10, 10));
        interaction.drag_to(PointerPosition::new(60, 90));
        interaction.cancel();
        assert!(interaction.is_idle());
        assert_eq!(interaction.preview_rect(&record.id), None);
        let config = InteractionConfig::default();
        assert_eq!(interaction.release(PointerPosition::new(60, 90), &config), None);
    }

    #[test]
    fn keys_route_to_launcher_close_and_focus_cycling() {
        let mut state = DesktopState::default();
        assert_eq!(route_key(&KeyChord::new("Escape"), &state), KeyRoute::Ignore);
        assert_eq!(route_key(&KeyChord::new("Tab"), &state), KeyRoute::Ignore);

        insert_window(&mut state, "win_terminal_1", 10, false);
        let active = WindowId("win_terminal_1".to_string());
        state.active_window_id = Some(active.clone());

        let open_launcher = KeyRoute::Dispatch(DesktopAction::OpenWindow(OpenWindowRequest::new(
            ApplicationId::trusted("launcher"),
        )));
        assert_eq!(route_key(&KeyChord::new("L").ctrl().shift(), &state), open_launcher);
        assert_eq!(route_key(&KeyChord::new("l").ctrl().shift(), &state), open_launcher);
        assert_eq!(route_key(&KeyChord::new("l").ctrl(), &state), KeyRoute::Ignore);
        assert_eq!(route_key(&KeyChord::new("Escape").ctrl(), &state), KeyRoute::Ignore);
        assert_eq!(
            route_key(&KeyChord::new("Escape"), &state),
            KeyRoute::Dispatch(DesktopAction::CloseWindow {
                window_id: active.clone()
            })
        );
        assert_eq!(
            route_key(&KeyChord::new("Tab").shift(), &state),
            KeyRoute::CycleFocus {
                window_id: active,
                backwards: true
            }
        );
        assert_eq!(route_key(&KeyChord::new("a").ctrl(), &state), KeyRoute::Ignore);
    }

    #[test]
    fn config_fills_missing_fields_with_defaults() {
        let config: InteractionConfig = serde_json::from_str(r#"{"snap_grid": 8}"#).expect("decode");
        assert_eq!(
            config,
            InteractionConfig {
                snap_grid: 8,
                min_width: 300,
                min_height: 200
            }
        );
    }
}
