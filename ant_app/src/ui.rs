// ui.rs - Controls, configuration editor and grid canvas

use eframe::egui;
use egui::{Color32, Rect, Sense, Vec2};
use std::time::Instant;

use ant_engine::rate::SLIDER_MAX;
use ant_engine::{ActiveConfig, BACKGROUND, CELL_SIZE, PRESETS};

use crate::{AntApp, palette};

impl eframe::App for AntApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Steps follow the fixed tick; frames only report elapsed time
        let now = Instant::now();
        self.session.frame(now - self.last_frame);
        self.last_frame = now;

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.horizontal(|ui| {
                let button_text = if self.session.is_running() { "⏸ Pause" } else { "▶ Start" };
                if ui.button(button_text).clicked() {
                    self.session.toggle_running();
                }

                if ui.button("⏭ Step").clicked() {
                    self.session.pause();
                    self.session.step();
                }

                if ui.button("⏹ Clear").clicked() {
                    self.session.pause();
                    self.session.clear();
                }

                ui.separator();

                // Preset dropdown
                ui.label("Preset:");
                egui::ComboBox::from_id_source("preset_selector")
                    .selected_text(PRESETS[self.selected_preset].name)
                    .show_ui(ui, |ui| {
                        for (i, preset) in PRESETS.iter().enumerate() {
                            ui.selectable_value(&mut self.selected_preset, i, preset.name);
                        }
                    });

                if ui.button("Apply Preset").clicked() {
                    self.apply_selected_preset();
                }

                ui.separator();

                let active = match self.session.active() {
                    ActiveConfig::Preset(i) => PRESETS[*i].name,
                    ActiveConfig::Custom(name) => name.as_str(),
                };
                ui.label(format!("Active: {active}"));
                ui.label(format!("Steps: {}", self.session.engine().steps()));
                ui.label(format!("Ants: {}", self.session.engine().ants().len()));
            });

            // Speed control
            ui.horizontal(|ui| {
                ui.label("Speed:");
                let mut slider = self.session.slider();
                if ui.add(egui::Slider::new(&mut slider, 0..=SLIDER_MAX).show_value(false)).changed() {
                    self.session.set_slider(slider);
                }
                ui.label(format!("{} steps/sec", self.session.steps_per_second()));

                ui.separator();
                ui.label("Click the grid to drop an ant.");
            });
        });

        egui::SidePanel::right("config_editor").min_width(280.0).show(ctx, |ui| {
            ui.heading("Configuration");

            ui.horizontal(|ui| {
                if ui.button("Load").on_hover_text("Validate the text and apply it").clicked() {
                    self.load_config_text();
                }
                if ui.button("Save").on_hover_text("Write the active configuration").clicked() {
                    self.save_config_text();
                }
            });

            if let Some(err) = &self.config_error {
                ui.colored_label(Color32::RED, err.to_string());
            }

            ui.separator();

            egui::ScrollArea::vertical().show(ui, |ui| {
                ui.add(
                    egui::TextEdit::multiline(&mut self.config_text)
                        .code_editor()
                        .desired_width(f32::INFINITY),
                );
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| {
            let available = ui.available_size();
            let size = (available.x.max(0.0) as u32, available.y.max(0.0) as u32);
            if size != self.canvas_size {
                self.canvas_size = size;
                self.session.resize(size.0, size.1);
            }

            let (response, painter) = ui.allocate_painter(available, Sense::click());
            let origin = response.rect.min;
            let cell = CELL_SIZE as f32;

            painter.rect_filled(response.rect, 0.0, palette::color_for(BACKGROUND));

            // Only painted cells; the background is already filled
            let engine = self.session.engine();
            for (row, col, color) in engine.grid().painted() {
                let rect = Rect::from_min_size(
                    origin + Vec2::new(col as f32 * cell, row as f32 * cell),
                    Vec2::splat(cell),
                );
                painter.rect_filled(rect, 0.0, palette::color_for(color));
            }

            for ant in engine.ants() {
                let (x, y) = ant.position();
                let center = origin + Vec2::new((x as f32 + 0.5) * cell, (y as f32 + 0.5) * cell);
                painter.circle_filled(center, cell * 0.75, palette::ANT_MARKER);
            }

            if response.clicked() {
                if let Some(pos) = response.interact_pointer_pos() {
                    let offset = pos - origin;
                    let x = (offset.x / cell).floor() as i64;
                    let y = (offset.y / cell).floor() as i64;
                    if self.session.engine().grid().contains(x, y) {
                        self.session.add_ant(x, y);
                    }
                }
            }
        });

        // Keep ticking while running
        if self.session.is_running() {
            ctx.request_repaint();
        }
    }
}
