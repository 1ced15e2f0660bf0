use crate::app;
use bevy::window::WindowResolution;
use clap::ArgAction;
use procedural_texture::TextureSynthesizer;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use solar_system::catalog::catalog;
use solar_system::locale::Locale;
use solar_system::scene::{SettingsError, SolarSystemSettings};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

#[derive(clap::Parser)]
#[clap(about = "Animated solar system orrery")]
pub(crate) struct Cli {
    #[clap(subcommand)]
    command: CliCommand,
}

impl Cli {
    pub(crate) fn run(self) -> Result<(), CliError> {
        self.command.run()
    }
}

#[derive(clap::Subcommand)]
enum CliCommand {
    /// Open the orrery window
    Run {
        #[clap(short, long)]
        resolution: Option<Resolution>,
        #[clap(long, action = ArgAction::SetTrue)]
        inspector: bool,
        /// YAML settings file
        #[clap(short, long)]
        config: Option<PathBuf>,
        /// Seed for orbit phases and textures; overrides the settings file
        #[clap(long)]
        seed: Option<u64>,
        /// Info panel language (en, zh); overrides the settings file
        #[clap(long)]
        locale: Option<Locale>,
        /// Font file with CJK glyphs; overrides the settings file
        #[clap(long)]
        font: Option<PathBuf>,
    },
    /// Write every body's surface and label textures as PNG files
    Textures {
        #[clap(short, long, default_value = "textures")]
        out: PathBuf,
        #[clap(long)]
        seed: Option<u64>,
    },
}

#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("Cannot load settings: {0}")]
    Settings(#[from] SettingsError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Cannot write texture: {0}")]
    Image(#[from] image::ImageError),
}

#[derive(Debug, Copy, Clone, PartialEq)]
struct Resolution {
    width: f32,
    height: f32,
}

impl FromStr for Resolution {
    type Err = ResolutionInvalidFormat;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (w, h) = s.split_once('x').ok_or(ResolutionInvalidFormat)?;
        let width = w.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        let height = h.parse::<f32>().map_err(|_| ResolutionInvalidFormat)?;
        if !(width > 0.0 && height > 0.0) {
            return Err(ResolutionInvalidFormat);
        }
        Ok(Self { width, height })
    }
}

#[derive(Debug, thiserror::Error)]
#[error("Invalid format for resolution; expected <width>x<height>")]
struct ResolutionInvalidFormat;

impl CliCommand {
    fn run(self) -> Result<(), CliError> {
        match self {
            Self::Run {
                resolution,
                inspector,
                config,
                seed,
                locale,
                font,
            } => {
                let mut scene = config
                    .map(SolarSystemSettings::load)
                    .transpose()?
                    .unwrap_or_default();
                if seed.is_some() {
                    scene.seed = seed;
                }
                if let Some(locale) = locale {
                    scene.locale = locale;
                }
                if font.is_some() {
                    scene.font = font;
                }
                app::get_app(app::AppSettings {
                    resolution: resolution
                        .map(|r| WindowResolution::new(r.width, r.height))
                        .unwrap_or_default(),
                    with_inspector: inspector,
                    scene,
                })
                .run();
                Ok(())
            }
            Self::Textures { out, seed } => dump_textures(&out, seed),
        }
    }
}

fn dump_textures(out: &Path, seed: Option<u64>) -> Result<(), CliError> {
    fs::create_dir_all(out)?;
    let rng = match seed {
        Some(seed) => ChaCha8Rng::seed_from_u64(seed),
        None => ChaCha8Rng::from_rng(&mut rand::rng()),
    };
    let mut synth = TextureSynthesizer::new(rng);
    for body in catalog() {
        let stem = body.english_name.to_lowercase();
        let surface = out.join(format!("{stem}.png"));
        synth.surface(body.color, body.pattern).save(&surface)?;
        let label = out.join(format!("{stem}-label.png"));
        synth.label(body.english_name).save(&label)?;
        println!("{}\n{}", surface.display(), label.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    #[test]
    fn parses_resolutions() {
        assert_eq!(
            "1280x720".parse::<Resolution>().ok(),
            Some(Resolution {
                width: 1280.0,
                height: 720.0
            })
        );
        assert!("1280".parse::<Resolution>().is_err());
        assert!("wide x tall".parse::<Resolution>().is_err());
        assert!("0x720".parse::<Resolution>().is_err());
    }

    #[test]
    fn parses_run_flags() {
        let cli = Cli::try_parse_from([
            "bevy-orrery",
            "run",
            "--resolution",
            "800x600",
            "--seed",
            "7",
            "--locale",
            "zh",
            "--inspector",
            "--font",
            "/opt/fonts/wqy-microhei.ttc",
        ])
        .unwrap();
        let CliCommand::Run {
            resolution,
            inspector,
            config,
            seed,
            locale,
            font,
        } = cli.command
        else {
            panic!("expected the run command");
        };
        assert_eq!(resolution.map(|r| r.width), Some(800.0));
        assert!(inspector);
        assert!(config.is_none());
        assert_eq!(seed, Some(7));
        assert_eq!(locale, Some(Locale::Chinese));
        assert_eq!(font, Some(PathBuf::from("/opt/fonts/wqy-microhei.ttc")));
    }

    #[test]
    fn rejects_unknown_locale() {
        assert!(Cli::try_parse_from(["bevy-orrery", "run", "--locale", "fr"]).is_err());
    }

    #[test]
    fn missing_settings_file_is_reported() {
        let command = CliCommand::Run {
            resolution: None,
            inspector: false,
            config: Some(PathBuf::from("/nonexistent/orrery.yaml")),
            seed: None,
            locale: None,
            font: None,
        };
        assert!(matches!(command.run(), Err(CliError::Settings(_))));
    }

    #[test]
    fn dumps_every_texture() {
        let out = std::env::temp_dir().join(format!("orrery-textures-{}", std::process::id()));
        dump_textures(&out, Some(3)).unwrap();
        for body in catalog() {
            let stem = body.english_name.to_lowercase();
            let surface = image::open(out.join(format!("{stem}.png"))).unwrap();
            assert_eq!(surface.width(), procedural_texture::SURFACE_SIZE);
            assert!(out.join(format!("{stem}-label.png")).is_file());
        }
        fs::remove_dir_all(&out).unwrap();
    }
}
