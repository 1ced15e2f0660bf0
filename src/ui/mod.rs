use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::{EguiContext, EguiPlugin};
use egui::panel::TopBottomSide;
use egui::{Align, Ui};
use pan_orbit::events::RecenterCamera;
use solar_system::animation::{AnimationState, AnimationTicks};
use solar_system::body::BodyId;
use solar_system::label::ShowLabels;
use solar_system::locale::Locale;
use solar_system::orbit::DrawOrbits;
use solar_system::picking::HoveredBody;
use solar_system::scene::SolarSystemSettings;

mod fonts;
mod inspector;

#[derive(Default)]
pub struct UiPlugin {
    pub with_inspector: bool,
}

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        if !app.is_plugin_added::<EguiPlugin>() {
            app.add_plugins(EguiPlugin);
        }
        if !app.is_plugin_added::<FrameTimeDiagnosticsPlugin>() {
            app.add_plugins(FrameTimeDiagnosticsPlugin);
        }

        app.init_resource::<PanelLocale>()
            .add_plugins(fonts::Plugin)
            .add_systems(Update, ui);

        if self.with_inspector {
            app.add_plugins(inspector::Plugin);
        }
    }
}

/// Language of the info panel. Starts from the settings and drops back to English
/// when no CJK font can be installed.
#[derive(Debug, Copy, Clone, PartialEq, Resource, Deref)]
pub struct PanelLocale(pub Locale);

impl FromWorld for PanelLocale {
    fn from_world(world: &mut World) -> Self {
        Self(
            world
                .get_resource::<SolarSystemSettings>()
                .map(|settings| settings.locale)
                .unwrap_or_default(),
        )
    }
}

#[derive(SystemParam)]
struct UiSystems<'w, 's> {
    locale: Res<'w, PanelLocale>,
    hovered: Res<'w, HoveredBody>,
    diagnostics: Res<'w, DiagnosticsStore>,
    draw_orbits: ResMut<'w, DrawOrbits>,
    show_labels: ResMut<'w, ShowLabels>,
    animation: Res<'w, State<AnimationState>>,
    ticks: Res<'w, AnimationTicks>,
    commands: Commands<'w, 's>,
}

fn ui(mut this: UiSystems, mut q_egui: Query<&mut EguiContext, With<PrimaryWindow>>) {
    let Ok(mut egui) = q_egui.get_single_mut() else {
        return;
    };

    let ctx = egui.get_mut();
    this.toplevel(ctx);
}

impl UiSystems<'_, '_> {
    fn toplevel(&mut self, ctx: &egui::Context) {
        self.topbar(ctx);
        self.body_info(ctx);
        self.recenter_on_double_click(ctx);
    }

    fn topbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::new(TopBottomSide::Top, "toolbar")
            .frame(default_translucent_frame())
            .show(ctx, |ui| {
                self.topbar_ui(ui);
            });
    }

    fn topbar_ui(&mut self, ui: &mut Ui) {
        ui.horizontal(|ui| {
            self.animation_status(ui);
            ui.with_layout(egui::Layout::right_to_left(Align::Max), |ui| {
                self.fps_display(ui);
                ui.separator();
                self.toggle(ui);
                if ui.button("Recenter").clicked() {
                    self.commands.trigger(RecenterCamera);
                }
            });
        });
    }

    fn animation_status(&mut self, ui: &mut Ui) {
        let status = match self.animation.get() {
            AnimationState::Running => "Running",
            AnimationState::Stopped => "Stopped",
        };
        ui.label(format!("{status} (tick {})", **self.ticks));
    }

    fn toggle(&mut self, ui: &mut Ui) {
        let mut draw = **self.draw_orbits;
        if ui.checkbox(&mut draw, "Draw orbits").changed() {
            **self.draw_orbits = draw;
        };
        let mut show = **self.show_labels;
        if ui.checkbox(&mut show, "Show labels").changed() {
            **self.show_labels = show;
        };
    }

    fn fps_display(&mut self, ui: &mut Ui) {
        let Some(fps) = self.diagnostics.get(&FrameTimeDiagnosticsPlugin::FPS) else {
            return;
        };
        if !fps.is_enabled {
            return;
        }
        ui.label(
            fps.average()
                .map(|v| format!("FPS: {v:2.1} Hz"))
                .unwrap_or_else(|| String::from("N/A")),
        );
    }

    fn body_info(&mut self, ctx: &egui::Context) {
        if let Some(hit) = **self.hovered {
            body_info(ctx, **self.locale, hit.body);
        }
    }

    fn recenter_on_double_click(&mut self, ctx: &egui::Context) {
        if self.hovered.is_some() || ctx.is_pointer_over_area() {
            return;
        }
        if ctx.input(|i| i.pointer.button_double_clicked(egui::PointerButton::Primary)) {
            self.commands.trigger(RecenterCamera);
        }
    }
}

/// Name and description of the body under the pointer.
fn body_info(ctx: &egui::Context, locale: Locale, body: BodyId) {
    egui::Window::new("Body")
        .title_bar(false)
        .resizable(false)
        .interactable(false)
        .anchor(egui::Align2::LEFT_TOP, egui::vec2(12.0, 48.0))
        .frame(default_translucent_frame())
        .show(ctx, |ui| {
            ui.heading(locale.title(body));
            ui.label(locale.description(body));
        });
}

fn default_translucent_frame() -> egui::Frame {
    let default_frame = egui::Frame::default();
    let [r, g, b, _] = default_frame.fill.to_array();
    default_frame
        .fill(egui::Color32::from_rgba_unmultiplied(r, g, b, 128))
        .inner_margin(egui::vec2(8.0, 6.0))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn collect_text(shape: &egui::Shape, out: &mut Vec<String>) {
        match shape {
            egui::Shape::Text(text) => out.push(text.galley.text().to_owned()),
            egui::Shape::Vec(shapes) => {
                for shape in shapes {
                    collect_text(shape, out);
                }
            }
            _ => {}
        }
    }

    /// Text painted by the info panel, after enough frames for the window to be sized.
    fn painted_body_info(locale: Locale, body: BodyId) -> Vec<String> {
        let ctx = egui::Context::default();
        let mut output = None;
        for _ in 0..3 {
            output = Some(ctx.run(egui::RawInput::default(), |ctx| {
                body_info(ctx, locale, body);
            }));
        }
        let mut texts = vec![];
        for clipped in output.unwrap().shapes {
            collect_text(&clipped.shape, &mut texts);
        }
        texts
    }

    #[test]
    fn chinese_panel_text_is_unchanged() {
        let texts = painted_body_info(Locale::Chinese, BodyId::Mars);
        assert!(texts.iter().any(|t| t == "火星 (Mars)"), "{texts:?}");
        assert!(
            texts
                .iter()
                .any(|t| t == Locale::Chinese.description(BodyId::Mars)),
            "{texts:?}"
        );
    }

    #[test]
    fn english_panel_text() {
        let texts = painted_body_info(Locale::English, BodyId::Earth);
        assert!(texts.iter().any(|t| t == "Earth"), "{texts:?}");
        assert!(texts
            .iter()
            .any(|t| t == Locale::English.description(BodyId::Earth)));
    }

    #[test]
    fn panel_locale_follows_settings() {
        let mut app = App::new();
        app.insert_resource(SolarSystemSettings {
            locale: Locale::Chinese,
            ..default()
        })
        .init_resource::<PanelLocale>();
        assert_eq!(**app.world().resource::<PanelLocale>(), Locale::Chinese);

        let mut app = App::new();
        app.init_resource::<PanelLocale>();
        assert_eq!(**app.world().resource::<PanelLocale>(), Locale::English);
    }
}
