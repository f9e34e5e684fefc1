use std::io;
use std::path::PathBuf;
use std::time::{Duration, Instant};

use clap::Parser;
use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEventKind, MouseButton,
    MouseEvent, MouseEventKind,
};
use crossterm::terminal::{EnterAlternateScreen, LeaveAlternateScreen};
use crossterm::{execute, terminal};
use ratatui::backend::CrosstermBackend;
use ratatui::layout::Rect;
use ratatui::Terminal;

use pane_dock::config::{LayoutConfig, PreviewMode};
use pane_dock::geometry::Point;
use pane_dock::layout::regions::TreeBounds;
use pane_dock::layout::{Axis, Node, NodeId};
use pane_dock::persist::{self, Snapshot};
use pane_dock::tracing_sub;
use pane_dock::ui::{self, DrawState, TAB_STRIP_ROWS};
use pane_dock::workspace::{DragTask, LayoutError, Workspace};

#[derive(Parser, Debug)]
#[command(name = "pane-dock", about = "Drag-and-drop tiling panel layout demo")]
struct Args {
    /// Path of the layout state file.
    #[arg(long, default_value = "pane-dock-state.json")]
    state_file: PathBuf,
    /// Start from a fresh single-panel layout, ignoring saved state.
    #[arg(long)]
    reset: bool,
    /// Log debug events to stderr (redirect to a file to keep the UI clean).
    #[arg(long)]
    debug: bool,
}

/// Cell-scale overrides of the pixel-oriented defaults.
fn terminal_config() -> LayoutConfig {
    LayoutConfig {
        min_band_px: 2.0,
        preview_move_threshold_px: 1.0,
        between_sibling_hit_slop_px: 1.0,
        ..LayoutConfig::default()
    }
    .normalized()
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    if args.debug {
        tracing_sub::init_default();
    }
    let config = terminal_config();
    let ws = if args.reset {
        Workspace::new(config)
    } else {
        match persist::load(&args.state_file) {
            Some(snapshot) => snapshot.into_workspace(config),
            None => Workspace::new(config),
        }
    };
    let mut app = App::new(ws, args.state_file);

    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    terminal::enable_raw_mode()?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    terminal::disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        DisableMouseCapture,
        LeaveAlternateScreen
    )?;
    terminal.show_cursor()?;
    result
}

/// A pressed-but-not-yet-dragged tab, promoted to a drag session once the
/// pointer moves.
struct TabPress {
    panel_id: NodeId,
    tab_id: NodeId,
    point: Point,
}

struct App {
    ws: Workspace,
    state_file: PathBuf,
    status: String,
    press: Option<TabPress>,
    gap_axis: Option<Axis>,
    preview: Option<Node>,
    help_visible: bool,
    work_area: Rect,
}

impl App {
    fn new(ws: Workspace, state_file: PathBuf) -> Self {
        Self {
            ws,
            state_file,
            status: "Drag tabs between panels; press ? for help.".to_string(),
            press: None,
            gap_axis: None,
            preview: None,
            help_visible: false,
            work_area: Rect::default(),
        }
    }

    fn bounds(&self) -> TreeBounds {
        TreeBounds::project(
            self.ws.root(),
            ui::rect_to_bounds(self.work_area),
            TAB_STRIP_ROWS as f64,
        )
    }

    fn save(&mut self) {
        if let Err(err) = persist::save(&self.state_file, &Snapshot::capture(&self.ws)) {
            self.status = format!("Could not persist layout: {err}");
        }
    }

    fn set_error(&mut self, err: LayoutError) {
        self.status = err.to_string();
    }
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<io::Stdout>>,
    app: &mut App,
) -> io::Result<()> {
    loop {
        terminal.draw(|frame| {
            let area = frame.area();
            app.work_area = area;
            let show_preview =
                app.preview.is_some() && app.ws.preview_mode() != PreviewMode::Hitbox;
            let state = DrawState {
                hover: app.ws.drag_hover(),
                status: &app.status,
                gap_axis: app.gap_axis,
                help_visible: app.help_visible,
                preview: if show_preview { app.preview.as_ref() } else { None },
            };
            ui::draw(frame, &app.ws, area, &state);
        })?;

        if event::poll(Duration::from_millis(16))? {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    if handle_key(app, key.code) {
                        break;
                    }
                }
                Event::Mouse(mouse) => handle_mouse(app, mouse),
                _ => {}
            }
        }

        for task in app.ws.poll_drag_tasks(Instant::now()) {
            match task {
                DragTask::PreviewDue => {
                    if app.ws.preview_mode() != PreviewMode::Hitbox {
                        app.preview = app.ws.preview_tree();
                        if app.preview.is_some() {
                            app.status =
                                "Preview: hold still to inspect, move to continue searching."
                                    .to_string();
                        }
                    }
                }
                DragTask::Reevaluate => {
                    // overlay tint is re-derived from the session hover on the
                    // next frame; nothing to recompute here
                }
            }
        }
    }
    Ok(())
}

fn handle_key(app: &mut App, code: KeyCode) -> bool {
    match code {
        KeyCode::Char('q') => {
            app.save();
            return true;
        }
        KeyCode::Esc => {
            if app.ws.is_dragging() {
                app.ws.cancel_drag();
                app.preview = None;
                app.status = "Drag canceled.".to_string();
            } else if app.ws.is_resizing() {
                app.ws.cancel_resize();
                app.status = "Resize canceled.".to_string();
            } else if app.help_visible {
                app.help_visible = false;
            }
        }
        KeyCode::Char('?') => app.help_visible = !app.help_visible,
        KeyCode::Char('c') => match app.ws.create_box() {
            Ok(num) => {
                app.status = format!("Created Box {num} in the active segment.");
                app.save();
            }
            Err(err) => app.set_error(err),
        },
        KeyCode::Char('n') => {
            // create-drag: the new box follows the pointer, left click drops
            let center = ui::cell_point(
                app.work_area.width / 2,
                app.work_area.height / 2,
            );
            match app.ws.start_create_drag(center, Instant::now()) {
                Ok(ctx) => {
                    app.status = format!(
                        "Dragging new Box {}. Click a zone to place it, Esc to cancel.",
                        ctx.tab.num
                    );
                }
                Err(err) => app.set_error(err),
            }
        }
        KeyCode::Char('x') => {
            let target = app.ws.active_panel().and_then(|panel_id| {
                let panel = pane_dock::layout::tree::find(app.ws.root(), panel_id)?
                    .node
                    .as_panel()?;
                panel.active_tab().map(|tab| (panel_id, tab.id))
            });
            match target {
                Some((panel_id, tab_id)) => match app.ws.close_tab(panel_id, tab_id) {
                    Ok(num) => {
                        app.status = format!("Removed Box {num}.");
                        app.save();
                    }
                    Err(err) => app.set_error(err),
                },
                None => app.status = "No active box to close.".to_string(),
            }
        }
        KeyCode::Char('v') => {
            let mode = app.ws.cycle_preview_mode();
            app.preview = None;
            app.status = format!("View mode: {}.", mode.label());
            app.save();
        }
        KeyCode::Char('r') => {
            app.ws.reset();
            app.preview = None;
            app.status = "Layout reset to one panel with one box.".to_string();
            app.save();
        }
        _ => {}
    }
    false
}

fn handle_mouse(app: &mut App, mouse: MouseEvent) {
    let point = ui::cell_point(mouse.column, mouse.row);
    match mouse.kind {
        MouseEventKind::Down(MouseButton::Left) => {
            let bounds = app.bounds();
            if app.ws.is_dragging() {
                // keyboard-initiated create drag drops on click
                finish_drop(app, point);
                return;
            }
            if let Some((panel_id, tab_id)) = ui::tab_at(&app.ws, &bounds, point) {
                app.press = Some(TabPress {
                    panel_id,
                    tab_id,
                    point,
                });
                return;
            }
            match app.ws.start_gap_resize(point, &bounds) {
                Ok(()) => {
                    app.gap_axis = None;
                    app.status = "Resizing with snapped steps. Release to commit.".to_string();
                    return;
                }
                Err(LayoutError::NoResizeNeighbor) => {}
                Err(err) => {
                    app.set_error(err);
                    return;
                }
            }
            if let Some(panel_id) = ui::panel_at(&app.ws, &bounds, point)
                && app.ws.select_panel(panel_id)
            {
                app.status = "Active segment selected.".to_string();
            }
        }
        MouseEventKind::Drag(MouseButton::Left) => {
            if app.ws.is_resizing() {
                match app.ws.resize_move(point) {
                    Ok(true) => {
                        app.status =
                            "Resizing with snapped steps. Release to commit.".to_string()
                    }
                    Ok(false) => {
                        app.status =
                            "Resize snapped to current level (move farther for the next step)."
                                .to_string()
                    }
                    Err(err) => app.set_error(err),
                }
                return;
            }
            if app.ws.is_dragging() {
                drag_to(app, point);
                return;
            }
            if let Some(press) = app.press.take() {
                if press.point.distance_to(point)
                    < app.ws.config().preview_move_threshold_px
                {
                    app.press = Some(press);
                    return;
                }
                match app.ws.start_tab_drag(
                    press.panel_id,
                    press.tab_id,
                    press.point,
                    Instant::now(),
                ) {
                    Ok(ctx) => {
                        app.status = format!(
                            "Dragging Box {}. Release in a valid zone to move it.",
                            ctx.tab.num
                        );
                        drag_to(app, point);
                    }
                    Err(err) => app.set_error(err),
                }
            }
        }
        MouseEventKind::Moved => {
            if app.ws.is_dragging() {
                // create-drags float with the unpressed pointer
                drag_to(app, point);
                return;
            }
            let bounds = app.bounds();
            app.gap_axis = app.ws.gap_hover_axis(point, &bounds);
        }
        MouseEventKind::Up(MouseButton::Left) => {
            if app.ws.is_resizing() {
                if app.ws.commit_resize().is_ok() {
                    app.status = "Resize committed.".to_string();
                    app.save();
                }
                return;
            }
            if app.ws.is_dragging() {
                finish_drop(app, point);
                return;
            }
            if let Some(press) = app.press.take()
                && app.ws.activate_tab(press.panel_id, press.tab_id).is_ok()
            {
                app.status = "Tab activated.".to_string();
                app.save();
            }
        }
        _ => {}
    }
}

fn drag_to(app: &mut App, point: Point) {
    let bounds = app.bounds();
    app.preview = None;
    match app.ws.drag_move(point, &bounds, Instant::now()) {
        Ok(Some(hover)) => {
            if hover.zone.is_valid() {
                app.status = format!(
                    "Preview: {}. {}",
                    pane_dock::workspace::zone_summary(&hover.zone),
                    hover.zone.reason
                );
            } else {
                app.status = format!("Blocked: {}", hover.zone.reason);
            }
        }
        Ok(None) => {
            app.status = "Move over a panel to preview drop zones.".to_string();
        }
        Err(err) => app.set_error(err),
    }
}

fn finish_drop(app: &mut App, point: Point) {
    let bounds = app.bounds();
    app.preview = None;
    match app.ws.drop_at(point, &bounds) {
        Ok(report) => {
            app.status = format!("Dropped Box {}: {}.", report.tab_num, report.zone_summary);
            app.save();
        }
        Err(err) => app.set_error(err),
    }
}
