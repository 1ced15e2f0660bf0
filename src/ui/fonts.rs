//! CJK font installation for the Chinese info panel. egui's bundled fonts only cover
//! Latin scripts, so a system or user-provided font is appended as a fallback.

use super::PanelLocale;
use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use bevy_egui::EguiContext;
use solar_system::locale::Locale;
use solar_system::scene::SolarSystemSettings;
use std::path::{Path, PathBuf};

const CJK_FONT: &str = "cjk";

/// Well-known locations of fonts covering CJK ideographs, tried in order.
const SYSTEM_CJK_FONTS: &[&str] = &[
    "/usr/share/fonts/opentype/noto/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/google-noto-cjk/NotoSansCJK-Regular.ttc",
    "/usr/share/fonts/truetype/wqy/wqy-microhei.ttc",
    "/usr/share/fonts/wenquanyi/wqy-microhei/wqy-microhei.ttc",
    "/usr/share/fonts/truetype/arphic/uming.ttc",
    "/System/Library/Fonts/PingFang.ttc",
    "/System/Library/Fonts/STHeiti Light.ttc",
    "C:\\Windows\\Fonts\\msyh.ttc",
    "C:\\Windows\\Fonts\\simhei.ttf",
];

pub(super) struct Plugin;

impl bevy::prelude::Plugin for Plugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, install_cjk_font);
    }
}

fn install_cjk_font(
    settings: Res<SolarSystemSettings>,
    mut locale: ResMut<PanelLocale>,
    mut q_egui: Query<&mut EguiContext, With<PrimaryWindow>>,
) {
    if **locale != Locale::Chinese {
        return;
    }
    let Ok(mut egui) = q_egui.get_single_mut() else {
        return;
    };
    match find_cjk_font(settings.font.as_deref()) {
        Some((path, data)) => {
            info!("Using {} for CJK text", path.display());
            egui.get_mut().set_fonts(font_definitions(data));
        }
        None => {
            warn!("No font with CJK glyphs found, set `font` in the settings file; falling back to English");
            locale.set_if_neq(PanelLocale(Locale::English));
        }
    }
}

/// The configured font first, then the system locations.
pub(super) fn font_candidates(configured: Option<&Path>) -> Vec<PathBuf> {
    configured
        .map(Path::to_path_buf)
        .into_iter()
        .chain(SYSTEM_CJK_FONTS.iter().map(PathBuf::from))
        .collect()
}

pub(super) fn find_cjk_font(configured: Option<&Path>) -> Option<(PathBuf, Vec<u8>)> {
    font_candidates(configured).into_iter().find_map(|path| {
        match std::fs::read(&path) {
            Ok(data) => Some((path, data)),
            Err(err) => {
                if Some(path.as_path()) == configured {
                    warn!("Cannot read font {}: {err}", path.display());
                }
                None
            }
        }
    })
}

/// egui's default fonts with `data` appended as the last fallback of every family.
pub(super) fn font_definitions(data: Vec<u8>) -> egui::FontDefinitions {
    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(CJK_FONT.to_owned(), egui::FontData::from_owned(data));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts
            .families
            .entry(family)
            .or_default()
            .push(CJK_FONT.to_owned());
    }
    fonts
}
