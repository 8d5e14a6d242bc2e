// overlay.rs: menu bar, status bar and the projected box-grid wireframe

use egui::{Color32, Pos2, Rect, Stroke};
use glam::{Mat4, Vec3};

use orbit_scene::world::World;

pub const BOX_SIZE: f32 = 50.0;
pub const GRID_COLS: usize = 10;
pub const GRID_ROWS: usize = 10;

const GRID_COLOR: Color32 = Color32::from_gray(110);
const TARGET_COLOR: Color32 = Color32::from_rgb(94, 156, 229);
const TARGET_MARK: f32 = 8.0;

/// Toggles owned by the UI rather than the controller.
#[derive(Debug, Clone)]
pub struct UiState {
    pub show_fps: bool,
    pub show_grid: bool,
    pub vsync_enabled: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_fps: true,
            show_grid: true,
            vsync_enabled: true,
        }
    }
}

/// Requests the event loop carries out after the frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ResetView,
    SetVsync(bool),
    Exit,
}

pub fn draw_ui(ctx: &egui::Context, world: &mut World, ui_state: &mut UiState) -> Vec<UiAction> {
    let mut actions = Vec::new();

    egui::TopBottomPanel::top("menu_bar").show(ctx, |ui| {
        egui::menu::bar(ui, |ui| {
            ui.menu_button("File", |ui| {
                if ui.button("Exit").clicked() {
                    actions.push(UiAction::Exit);
                    ui.close_menu();
                }
            });

            ui.menu_button("View", |ui| {
                if ui.button("Reset view (R)").clicked() {
                    actions.push(UiAction::ResetView);
                    ui.close_menu();
                }
                ui.separator();
                ui.checkbox(&mut ui_state.show_grid, "Show grid");
                ui.checkbox(&mut ui_state.show_fps, "Show FPS");
                if ui
                    .checkbox(&mut ui_state.vsync_enabled, "Enable VSync")
                    .clicked()
                {
                    actions.push(UiAction::SetVsync(ui_state.vsync_enabled));
                }
            });

            ui.menu_button("Controls", |ui| {
                let settings = &mut world.controls.settings;
                ui.checkbox(&mut settings.enabled, "Enabled");
                ui.separator();
                ui.checkbox(&mut settings.enable_rotate, "Rotate");
                ui.checkbox(&mut settings.enable_zoom, "Zoom");
                ui.checkbox(&mut settings.enable_pan, "Pan");
                ui.checkbox(&mut settings.enable_keys, "Arrow keys");
                ui.separator();
                ui.checkbox(&mut settings.enable_damping, "Damping");
                ui.add_enabled(
                    settings.enable_damping,
                    egui::Slider::new(&mut settings.damping_factor, 0.01..=1.0).text("factor"),
                );
                ui.checkbox(&mut settings.auto_rotate, "Auto-rotate");
                ui.add_enabled(
                    settings.auto_rotate,
                    egui::Slider::new(&mut settings.auto_rotate_speed, -10.0..=10.0).text("speed"),
                );
                ui.separator();
                ui.add(egui::Slider::new(&mut settings.rotate_speed, 0.1..=3.0).text("rotate speed"));
                ui.add(egui::Slider::new(&mut settings.zoom_speed, 0.1..=3.0).text("zoom speed"));
            });
        });
    });

    egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
        ui.horizontal(|ui| {
            let controls = &world.controls;
            ui.label(format!("Mode: {:?}", controls.mode()));
            ui.label("|");
            ui.label(format!("Polar: {:.1}°", controls.polar_angle().to_degrees()));
            ui.label("|");
            ui.label(format!("Azimuth: {:.1}°", controls.azimuthal_angle().to_degrees()));
            ui.label("|");
            ui.label(format!("Distance: {:.1}", controls.distance()));

            if world.gesture_active() {
                ui.label("|");
                ui.label(egui::RichText::new("dragging").color(Color32::YELLOW));
            }

            if ui_state.show_fps {
                ui.label("|");
                ui.label(
                    egui::RichText::new(format!("FPS: {:.1}", world.fps.fps()))
                        .color(Color32::GREEN),
                );
            }
        });
    });

    if ui_state.show_grid {
        draw_scene(ctx, world);
    }

    actions
}

fn draw_scene(ctx: &egui::Context, world: &World) {
    let painter = ctx.layer_painter(egui::LayerId::background());
    let rect = ctx.screen_rect();
    let camera = world.controls.camera();
    let view_proj = camera.view_projection();

    let stroke = Stroke::new(1.0, GRID_COLOR);
    for (a, b) in grid_segments() {
        if let (Some(a), Some(b)) = (project(view_proj, a, rect), project(view_proj, b, rect)) {
            painter.line_segment([a, b], stroke);
        }
    }

    if let Some(center) = project(view_proj, world.controls.target(), rect) {
        let stroke = Stroke::new(2.0, TARGET_COLOR);
        painter.line_segment(
            [center - egui::vec2(TARGET_MARK, 0.0), center + egui::vec2(TARGET_MARK, 0.0)],
            stroke,
        );
        painter.line_segment(
            [center - egui::vec2(0.0, TARGET_MARK), center + egui::vec2(0.0, TARGET_MARK)],
            stroke,
        );
    }
}

/// Edges of the box block: the top faces as a grid plus the outline of the block.
pub fn grid_segments() -> Vec<(Vec3, Vec3)> {
    let half = BOX_SIZE / 2.0;
    let width = GRID_COLS as f32 * BOX_SIZE;
    let depth = GRID_ROWS as f32 * BOX_SIZE;

    let mut segments = Vec::with_capacity(GRID_COLS + GRID_ROWS + 10);
    for i in 0..=GRID_COLS {
        let x = i as f32 * BOX_SIZE;
        segments.push((Vec3::new(x, half, 0.0), Vec3::new(x, half, depth)));
    }
    for n in 0..=GRID_ROWS {
        let z = n as f32 * BOX_SIZE;
        segments.push((Vec3::new(0.0, half, z), Vec3::new(width, half, z)));
    }

    let corners = [
        Vec3::new(0.0, 0.0, 0.0),
        Vec3::new(width, 0.0, 0.0),
        Vec3::new(width, 0.0, depth),
        Vec3::new(0.0, 0.0, depth),
    ];
    for (i, corner) in corners.iter().enumerate() {
        let next = corners[(i + 1) % corners.len()];
        segments.push((*corner - Vec3::Y * half, next - Vec3::Y * half));
        segments.push((*corner - Vec3::Y * half, *corner + Vec3::Y * half));
    }
    segments
}

/// Screen position of a world point, or `None` when it lies behind the camera.
pub fn project(view_proj: Mat4, point: Vec3, rect: Rect) -> Option<Pos2> {
    let clip = view_proj * point.extend(1.0);
    if clip.w <= f32::EPSILON {
        return None;
    }
    let ndc = clip.truncate() / clip.w;
    Some(Pos2::new(
        rect.left() + (ndc.x + 1.0) * 0.5 * rect.width(),
        rect.top() + (1.0 - ndc.y) * 0.5 * rect.height(),
    ))
}
