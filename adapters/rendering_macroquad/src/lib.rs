#![deny(
    unsafe_code,
    missing_docs,
    dead_code,
    unused_results,
    non_snake_case,
    unreachable_pub
)]

//! Macroquad-backed rendering adapter for Gridlock.
//!
//! Macroquad's optional audio stack depends on native ALSA development
//! libraries, which are unavailable in the containerised CI environment.
//! To keep `cargo test` usable everywhere we depend on macroquad without its
//! default `audio` feature.

use anyhow::Result;
use glam::Vec2;
use macroquad::{
    color::BLACK,
    input::{is_key_pressed, is_mouse_button_pressed, mouse_position, KeyCode, MouseButton},
};
use gridlock_rendering::{
    BlockPresentation, Color, FrameInput, Presentation, RenderingBackend, Scene,
};
use std::{
    collections::VecDeque,
    time::{Duration, Instant},
};

/// Snapshot of edge-triggered keyboard shortcuts observed during a single frame.
#[derive(Clone, Copy, Debug, Default)]
struct KeyboardShortcuts {
    /// `Q` or `Escape` to quit the game loop.
    quit_requested: bool,
    /// `Space` or `Enter` to end the current turn.
    end_turn: bool,
}

impl KeyboardShortcuts {
    fn poll() -> Self {
        let quit_requested = is_key_pressed(KeyCode::Escape) || is_key_pressed(KeyCode::Q);
        let end_turn = is_key_pressed(KeyCode::Space) || is_key_pressed(KeyCode::Enter);

        Self {
            quit_requested,
            end_turn,
        }
    }
}

/// Rendering backend implemented on top of macroquad.
#[derive(Debug)]
pub struct MacroquadBackend {
    swap_interval: Option<i32>,
    show_fps: bool,
}

impl Default for MacroquadBackend {
    fn default() -> Self {
        Self {
            swap_interval: None,
            show_fps: false,
        }
    }
}

impl MacroquadBackend {
    /// Returns a backend that requests the platform's default swap interval.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures the backend to request a specific swap interval from the platform.
    #[must_use]
    pub fn with_swap_interval(mut self, swap_interval: Option<i32>) -> Self {
        self.swap_interval = swap_interval;
        self
    }

    /// Configures the backend to either synchronise presentation with the display
    /// refresh rate or render as fast as possible.
    #[must_use]
    pub fn with_vsync(self, enabled: bool) -> Self {
        let swap_interval = if enabled { Some(1) } else { Some(0) };
        self.with_swap_interval(swap_interval)
    }

    /// Configures whether the backend prints frame timing metrics once per second.
    #[must_use]
    pub fn with_show_fps(mut self, show: bool) -> Self {
        self.show_fps = show;
        self
    }
}

/// Tracks the average frames-per-second produced by the render loop.
#[derive(Debug, Default)]
struct FpsCounter {
    elapsed: Duration,
    frames: u32,
    frame_times: VecDeque<Duration>,
    window_duration: Duration,
    render_accum: Duration,
}

#[derive(Clone, Copy, Debug)]
struct FpsMetrics {
    per_second: f32,
    trailing_ten_seconds: f32,
    avg_render: Duration,
}

impl FpsCounter {
    /// Records a rendered frame and returns the averaged metrics once one
    /// second has elapsed.
    fn record_frame(&mut self, frame: Duration, render: Duration) -> Option<FpsMetrics> {
        self.elapsed += frame;
        self.frames = self.frames.saturating_add(1);
        self.render_accum += render;

        self.frame_times.push_back(frame);
        self.window_duration += frame;

        let trailing_window = Duration::from_secs(10);
        while self.window_duration > trailing_window {
            if let Some(removed) = self.frame_times.pop_front() {
                self.window_duration = self.window_duration.saturating_sub(removed);
            } else {
                break;
            }
        }

        if self.elapsed < Duration::from_secs(1) {
            return None;
        }

        let seconds = self.elapsed.as_secs_f32();
        if seconds <= f32::EPSILON {
            self.elapsed = Duration::ZERO;
            self.frames = 0;
            self.render_accum = Duration::ZERO;
            return None;
        }

        let per_second = self.frames as f32 / seconds;
        let window_seconds = self.window_duration.as_secs_f32();
        let trailing_ten_seconds = if window_seconds <= f32::EPSILON {
            per_second
        } else {
            self.frame_times.len() as f32 / window_seconds
        };
        let avg_render = if self.frames == 0 {
            Duration::ZERO
        } else {
            self.render_accum / self.frames
        };
        self.elapsed = Duration::ZERO;
        self.frames = 0;
        self.render_accum = Duration::ZERO;
        Some(FpsMetrics {
            per_second,
            trailing_ten_seconds,
            avg_render,
        })
    }
}

impl RenderingBackend for MacroquadBackend {
    fn run<F>(self, presentation: Presentation, mut update_scene: F) -> Result<()>
    where
        F: FnMut(Duration, FrameInput, &mut Scene) + 'static,
    {
        let Self {
            swap_interval,
            show_fps,
        } = self;

        let Presentation {
            window_title,
            clear_color,
            scene,
        } = presentation;

        let mut config = macroquad::window::Conf {
            window_title,
            window_width: 640,
            window_height: 640,
            ..macroquad::window::Conf::default()
        };
        if let Some(swap_interval) = swap_interval {
            config.platform.swap_interval = Some(swap_interval);
        }

        macroquad::Window::from_config(config, async move {
            let mut scene = scene;
            let background = to_macroquad_color(clear_color);
            let mut fps_counter = FpsCounter::default();

            loop {
                let keyboard = KeyboardShortcuts::poll();
                if keyboard.quit_requested {
                    break;
                }

                macroquad::window::clear_background(background);

                let screen_width = macroquad::window::screen_width();
                let screen_height = macroquad::window::screen_height();

                let dt_seconds = macroquad::time::get_frame_time();
                let frame_dt = Duration::from_secs_f32(dt_seconds.max(0.0));
                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let frame_input = gather_frame_input(&metrics, keyboard);

                update_scene(frame_dt, frame_input, &mut scene);

                let metrics = SceneMetrics::from_scene(&scene, screen_width, screen_height);
                let render_start = Instant::now();
                draw_board(&scene, &metrics);
                draw_blocks(&scene, &metrics);
                if scene.debug.show_labels {
                    draw_block_labels(&scene, &metrics);
                }
                draw_hud(&scene, &metrics);
                let render_duration = render_start.elapsed();

                let fps_metrics = fps_counter.record_frame(frame_dt, render_duration);
                if show_fps || scene.debug.show_fps {
                    if let Some(FpsMetrics {
                        per_second,
                        trailing_ten_seconds,
                        avg_render,
                    }) = fps_metrics
                    {
                        println!(
                            "FPS: {:.2} (10s avg: {:.2}) | render: {:>6.2}ms",
                            per_second,
                            trailing_ten_seconds,
                            avg_render.as_secs_f64() * 1_000.0,
                        );
                    }
                }

                macroquad::window::next_frame().await;
            }
        });

        Ok(())
    }
}

/// Scale and offsets that center the board within the window.
#[derive(Clone, Copy, Debug)]
struct SceneMetrics {
    scale: f32,
    offset_x: f32,
    offset_y: f32,
    board_side_scaled: f32,
    cell_step: f32,
}

impl SceneMetrics {
    fn from_scene(scene: &Scene, screen_width: f32, screen_height: f32) -> Self {
        let side = scene.board.side_length();
        let scale = if side <= f32::EPSILON {
            1.0
        } else {
            // Leave headroom below the board for the HUD line.
            let usable_height = (screen_height - HUD_RESERVED_HEIGHT).max(1.0);
            (screen_width / side).min(usable_height / side).min(2.0)
        };

        let board_side_scaled = side * scale;
        let offset_x = ((screen_width - board_side_scaled) * 0.5).max(0.0);
        let offset_y = ((screen_height - HUD_RESERVED_HEIGHT - board_side_scaled) * 0.5).max(0.0);

        Self {
            scale,
            offset_x,
            offset_y,
            board_side_scaled,
            cell_step: scene.board.cell_length * scale,
        }
    }

    fn to_board_space(&self, screen: Vec2) -> Option<Vec2> {
        if self.scale <= f32::EPSILON {
            return None;
        }

        let local = Vec2::new(
            (screen.x - self.offset_x) / self.scale,
            (screen.y - self.offset_y) / self.scale,
        );
        let side = self.board_side_scaled / self.scale;
        if local.x < 0.0 || local.y < 0.0 || local.x >= side || local.y >= side {
            return None;
        }
        Some(local)
    }
}

const HUD_RESERVED_HEIGHT: f32 = 48.0;

fn gather_frame_input(metrics: &SceneMetrics, keyboard: KeyboardShortcuts) -> FrameInput {
    let mut input = FrameInput {
        end_turn: keyboard.end_turn,
        ..FrameInput::default()
    };

    if is_mouse_button_pressed(MouseButton::Left) {
        let (cursor_x, cursor_y) = mouse_position();
        input.click = metrics.to_board_space(Vec2::new(cursor_x, cursor_y));
    }

    input
}

fn draw_board(scene: &Scene, metrics: &SceneMetrics) {
    macroquad::shapes::draw_rectangle(
        metrics.offset_x,
        metrics.offset_y,
        metrics.board_side_scaled,
        metrics.board_side_scaled,
        to_macroquad_color(scene.board.background),
    );

    if metrics.cell_step <= f32::EPSILON {
        return;
    }

    let line_color = to_macroquad_color(scene.board.line_color);
    for line in 0..=scene.board.cells {
        let step = line as f32 * metrics.cell_step;
        macroquad::shapes::draw_line(
            metrics.offset_x + step,
            metrics.offset_y,
            metrics.offset_x + step,
            metrics.offset_y + metrics.board_side_scaled,
            1.0,
            line_color,
        );
        macroquad::shapes::draw_line(
            metrics.offset_x,
            metrics.offset_y + step,
            metrics.offset_x + metrics.board_side_scaled,
            metrics.offset_y + step,
            1.0,
            line_color,
        );
    }
}

fn draw_blocks(scene: &Scene, metrics: &SceneMetrics) {
    for block in &scene.blocks {
        if !block.ready {
            continue;
        }

        let (x, y, width, height) = block_rectangle(block, metrics);
        macroquad::shapes::draw_rectangle(x, y, width, height, to_macroquad_color(block.color));

        if block.selected {
            let glow = Color::new(1.0, 1.0, 1.0, 0.2);
            macroquad::shapes::draw_rectangle(x, y, width, height, to_macroquad_color(glow));

            let inset = 2.0 * metrics.scale;
            macroquad::shapes::draw_rectangle_lines(
                x + inset,
                y + inset,
                width - 2.0 * inset,
                height - 2.0 * inset,
                (2.0 * metrics.scale).max(1.0),
                BLACK,
            );
        }
    }
}

fn draw_block_labels(scene: &Scene, metrics: &SceneMetrics) {
    let font_size = (metrics.cell_step * 0.3).max(10.0);

    for block in &scene.blocks {
        let (x, y, _, height) = block_rectangle(block, metrics);
        let label = if block.selectable {
            block.name.to_string()
        } else {
            format!("[x] {}", block.name)
        };
        macroquad::text::draw_text(
            &label,
            x + 2.0,
            y + height * 0.5,
            font_size,
            BLACK,
        );
    }
}

fn draw_hud(scene: &Scene, metrics: &SceneMetrics) {
    let selected = scene
        .selected
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string);
    let turn = scene
        .turn_holder
        .as_ref()
        .map_or_else(|| "none".to_string(), ToString::to_string);
    let line = format!(
        "{} | turn: {} | selected: {}",
        scene.level_name, turn, selected
    );

    macroquad::text::draw_text(
        &line,
        metrics.offset_x,
        metrics.offset_y + metrics.board_side_scaled + 24.0,
        20.0,
        BLACK,
    );
}

fn block_rectangle(block: &BlockPresentation, metrics: &SceneMetrics) -> (f32, f32, f32, f32) {
    (
        metrics.offset_x + block.position.x * metrics.scale,
        metrics.offset_y + block.position.y * metrics.scale,
        block.size.x * metrics.scale,
        block.size.y * metrics.scale,
    )
}

fn to_macroquad_color(color: Color) -> macroquad::color::Color {
    macroquad::color::Color::new(color.red, color.green, color.blue, color.alpha)
}
