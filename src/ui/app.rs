use anyhow::Result;
use chrono::Timelike;
use eframe::egui::{self, Align, Color32, Layout, RichText, TopBottomPanel, Ui};

use crate::bedtime::calculator::TimeDisplayMode;
use crate::bedtime::form::{
    BedtimeForm, MAX_COFFEE_COUNT, MAX_SLEEP_GOAL_HOURS, MIN_COFFEE_COUNT, MIN_SLEEP_GOAL_HOURS,
    coffee_label, sleep_goal_label,
};

const ACCENT: Color32 = Color32::from_rgb(96, 228, 206);
const HEADING: Color32 = Color32::from_rgb(104, 221, 205);
const RESULT: Color32 = Color32::from_rgb(255, 214, 117);
const ALERT: Color32 = Color32::from_rgb(255, 124, 124);
const MUTED: Color32 = Color32::from_rgb(161, 180, 201);

pub fn run_gui(form: BedtimeForm, model_label: String) -> Result<()> {
    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_title("BetterRest")
            .with_inner_size([420.0, 560.0])
            .with_min_inner_size([360.0, 480.0]),
        ..Default::default()
    };

    let app = BetterRestApp::new(form, model_label);

    eframe::run_native(
        "BetterRest",
        native_options,
        Box::new(move |cc| {
            configure_theme(&cc.egui_ctx);
            Ok(Box::new(app))
        }),
    )
    .map_err(|err| anyhow::anyhow!("failed to launch BetterRest GUI: {err}"))?;

    Ok(())
}

fn configure_theme(ctx: &egui::Context) {
    let mut visuals = egui::Visuals::dark();
    visuals.override_text_color = Some(Color32::from_rgb(226, 234, 246));
    visuals.panel_fill = Color32::from_rgb(8, 16, 26);
    visuals.window_fill = Color32::from_rgb(12, 20, 32);
    visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 18, 30);
    visuals.widgets.inactive.bg_fill = Color32::from_rgb(16, 24, 38);
    visuals.widgets.hovered.bg_fill = Color32::from_rgb(26, 42, 62);
    visuals.widgets.active.bg_fill = Color32::from_rgb(34, 60, 88);
    visuals.selection.bg_fill = Color32::from_rgb(43, 148, 178);
    ctx.set_visuals(visuals);
}

struct BetterRestApp {
    form: BedtimeForm,
    model_label: String,
}

impl BetterRestApp {
    fn new(form: BedtimeForm, model_label: String) -> Self {
        Self { form, model_label }
    }

    fn show_header(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            ui.label(RichText::new("BetterRest").size(26.0).color(ACCENT).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                let use_24h = self.form.display_mode() == TimeDisplayMode::Hour24;
                if ui
                    .button(if use_24h {
                        "Switch to 12h"
                    } else {
                        "Switch to 24h"
                    })
                    .clicked()
                {
                    self.form.set_display_mode(if use_24h {
                        TimeDisplayMode::Hour12
                    } else {
                        TimeDisplayMode::Hour24
                    });
                }
            });
        });
    }

    fn show_section_heading(ui: &mut Ui, text: &str) {
        ui.add_space(8.0);
        ui.label(RichText::new(text).color(HEADING).strong());
        ui.add_space(2.0);
    }

    fn show_wake_picker(&mut self, ui: &mut Ui) {
        Self::show_section_heading(ui, "When do you want to wake up?");
        let current = self.form.inputs().wake_time;
        let mut hour = current.hour();
        let mut minute = current.minute();
        let mut changed = false;
        ui.horizontal(|ui| {
            changed |= ui
                .add(
                    egui::DragValue::new(&mut hour)
                        .range(0..=23)
                        .custom_formatter(|value, _| format!("{:02}", value as u32)),
                )
                .changed();
            ui.label(":");
            changed |= ui
                .add(
                    egui::DragValue::new(&mut minute)
                        .range(0..=59)
                        .custom_formatter(|value, _| format!("{:02}", value as u32)),
                )
                .changed();
        });
        if changed {
            self.form.set_wake_hour_minute(hour, minute);
        }
    }

    fn show_sleep_stepper(&mut self, ui: &mut Ui) {
        Self::show_section_heading(ui, "Desired amount of sleep");
        let hours = self.form.inputs().sleep_goal_hours;
        ui.horizontal(|ui| {
            ui.label(RichText::new(sleep_goal_label(hours)).size(18.0).strong());
            ui.with_layout(Layout::right_to_left(Align::Center), |ui| {
                if ui
                    .add_enabled(hours < MAX_SLEEP_GOAL_HOURS, egui::Button::new("+"))
                    .clicked()
                {
                    self.form.step_sleep_goal(1);
                }
                if ui
                    .add_enabled(hours > MIN_SLEEP_GOAL_HOURS, egui::Button::new("-"))
                    .clicked()
                {
                    self.form.step_sleep_goal(-1);
                }
            });
        });
    }

    fn show_coffee_picker(&mut self, ui: &mut Ui) {
        Self::show_section_heading(ui, "Daily coffee intake");
        let mut selected = self.form.inputs().coffee_count;
        egui::ComboBox::from_id_salt("coffee_amount")
            .selected_text(coffee_label(selected))
            .show_ui(ui, |ui| {
                for count in MIN_COFFEE_COUNT..=MAX_COFFEE_COUNT {
                    ui.selectable_value(&mut selected, count, coffee_label(count));
                }
            });
        if selected != self.form.inputs().coffee_count {
            self.form.set_coffee_count(selected);
        }
    }

    fn show_result(&self, ui: &mut Ui) {
        let outcome = self.form.outcome();
        let color = if outcome.is_error() { ALERT } else { RESULT };
        ui.add_space(20.0);
        ui.vertical_centered(|ui| {
            ui.label(RichText::new(&outcome.title).size(28.0).strong());
            ui.add_space(20.0);
            ui.label(RichText::new(&outcome.message).size(28.0).color(color).strong());
        });
    }
}

impl eframe::App for BetterRestApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        TopBottomPanel::top("header")
            .resizable(false)
            .show(ctx, |ui| self.show_header(ui));

        TopBottomPanel::bottom("footer")
            .resizable(false)
            .show(ctx, |ui| {
                ui.label(
                    RichText::new(format!("Sleep model: {}", self.model_label)).color(MUTED),
                );
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            self.show_wake_picker(ui);
            ui.separator();
            self.show_sleep_stepper(ui);
            ui.separator();
            self.show_coffee_picker(ui);
            ui.separator();
            self.show_result(ui);
        });
    }
}
