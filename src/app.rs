use std::time::Duration;

use eframe::egui;
use rfd::FileDialog;

use crate::loader::{ImageSource, IMAGE_EXTENSIONS};
use crate::notify::Severity;
use crate::presets;
use crate::session::Session;

pub struct ResizerApp {
    session: Session,
    preview: Option<egui::TextureHandle>,
    preview_revision: u64,
}

impl ResizerApp {
    pub fn new() -> Self {
        Self {
            session: Session::new(),
            preview: None,
            preview_revision: 0,
        }
    }

    /// Forward a dropped file to the session. Only the first file of a drop
    /// is taken; this is a one-image-at-a-time tool.
    fn handle_dropped_files(&mut self, ctx: &egui::Context) {
        let dropped = ctx.input(|i| i.raw.dropped_files.clone());
        let Some(file) = dropped.into_iter().next() else {
            return;
        };
        if let Some(path) = file.path {
            self.session.select_file(ImageSource::Path(path));
        } else if let Some(bytes) = file.bytes {
            self.session.select_file(ImageSource::Memory {
                name: file.name,
                bytes,
            });
        }
    }

    /// Rebuild the preview texture whenever a new image becomes active.
    fn refresh_preview(&mut self, ctx: &egui::Context) {
        if self.session.image_revision() == self.preview_revision {
            return;
        }
        self.preview_revision = self.session.image_revision();
        self.preview = self.session.image().map(|loaded| {
            let rgba = loaded.image.to_rgba8();
            let size = [rgba.width() as usize, rgba.height() as usize];
            let pixels = egui::ColorImage::from_rgba_unmultiplied(size, rgba.as_raw());
            ctx.load_texture("original-preview", pixels, egui::TextureOptions::LINEAR)
        });
    }

    fn pick_file(&mut self) {
        if let Some(path) = FileDialog::new()
            .add_filter("Images", IMAGE_EXTENSIONS)
            .pick_file()
        {
            self.session.select_file(ImageSource::Path(path));
        }
    }

    fn show_notice(&self, ui: &mut egui::Ui) {
        if let Some(notice) = self.session.notice() {
            let color = match notice.severity {
                Severity::Error => egui::Color32::RED,
                Severity::Success => egui::Color32::DARK_GREEN,
                Severity::Info => egui::Color32::LIGHT_BLUE,
            };
            ui.colored_label(color, &notice.text);
        }
    }

    fn show_preset_selector(&mut self, ui: &mut egui::Ui) {
        let previous = self.session.preset_id().map(str::to_owned);
        let mut choice = previous.clone();

        let selected_text = choice
            .as_deref()
            .and_then(presets::lookup)
            .map(|entry| entry.label)
            .unwrap_or("Original size");

        ui.horizontal(|ui| {
            ui.label("Preset:");
            egui::ComboBox::from_id_source("preset_combo")
                .selected_text(selected_text)
                .show_ui(ui, |ui| {
                    ui.selectable_value(&mut choice, None, "Original size");
                    for entry in presets::all() {
                        ui.selectable_value(&mut choice, Some(entry.id.to_string()), entry.label);
                    }
                });
        });

        if choice != previous {
            self.session.set_preset(choice);
        }
    }

    fn show_controls(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label("Width:");
            ui.add(egui::TextEdit::singleline(&mut self.session.width_text).desired_width(60.0));
            ui.label("Height:");
            ui.add(egui::TextEdit::singleline(&mut self.session.height_text).desired_width(60.0));
        });

        self.show_preset_selector(ui);

        ui.add_space(10.0);

        if ui.button("Resize Image").clicked() {
            self.session.trigger_resize();
        }
    }

    fn show_result(&mut self, ui: &mut egui::Ui) {
        let Some((file_name, width, height)) = self
            .session
            .result()
            .map(|result| (result.file_name.clone(), result.width, result.height))
        else {
            return;
        };

        ui.separator();
        ui.label(format!("Resized image ready: {}x{}", width, height));
        if ui.button("💾 Save...").clicked() {
            if let Some(path) = FileDialog::new().set_file_name(&file_name).save_file() {
                self.session.save_result(&path);
            }
        }
    }
}

impl eframe::App for ResizerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_dropped_files(ctx);
        self.session.poll_loads();
        self.refresh_preview(ctx);

        // Keep repainting while a load is pending or a notice has to clear
        // itself; egui only repaints on input otherwise.
        if self.session.loading() || self.session.notice().is_some() {
            ctx.request_repaint_after(Duration::from_millis(200));
        }

        let hovering_files = ctx.input(|i| !i.raw.hovered_files.is_empty());

        egui::CentralPanel::default()
            .frame(egui::Frame {
                inner_margin: egui::Margin::symmetric(20.0, 20.0),
                fill: ctx.style().visuals.panel_fill,
                ..Default::default()
            })
            .show(ctx, |ui| {
                ui.heading("Banner Resizer");
                ui.add_space(4.0);

                ui.horizontal(|ui| {
                    if ui.button("📂 Browse...").clicked() {
                        self.pick_file();
                    }
                    if hovering_files {
                        ui.label("Drop the image to load it");
                    } else if self.session.loading() {
                        ui.spinner();
                        ui.label("Loading...");
                    } else {
                        ui.label("or drag an image onto this window");
                    }
                });

                ui.separator();
                self.show_notice(ui);

                let loaded = self
                    .session
                    .image()
                    .map(|image| (image.name.clone(), image.width(), image.height()));

                if let Some((name, width, height)) = loaded {
                    ui.label(format!("Selected file: {}", name));
                    ui.label(format!("{}px x {}px", width, height));

                    if let Some(texture) = &self.preview {
                        ui.add(egui::Image::new(texture).max_size(egui::vec2(260.0, 180.0)));
                    }

                    ui.add_space(10.0);
                    self.show_controls(ui);
                    self.show_result(ui);
                }
            });
    }
}
