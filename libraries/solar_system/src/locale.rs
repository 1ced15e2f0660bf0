use crate::body::BodyId;
use bevy::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Language of the names and descriptions shown in the interface.
///
/// Labels are always rendered from the English name; the locale only affects
/// the info panel.
#[derive(
    Debug, Copy, Clone, Default, PartialEq, Eq, Hash, Reflect, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    #[default]
    #[serde(alias = "en")]
    English,
    #[serde(alias = "zh")]
    Chinese,
}

#[derive(Debug, Error)]
#[error("Unknown locale {0:?}, expected one of: en, zh")]
pub struct UnknownLocale(String);

impl Locale {
    pub const ALL: [Self; 2] = [Self::English, Self::Chinese];

    pub const fn body_name(self, id: BodyId) -> &'static str {
        use BodyId::*;
        match self {
            Self::English => match id {
                Sun => "Sun",
                Mercury => "Mercury",
                Venus => "Venus",
                Earth => "Earth",
                Mars => "Mars",
                Jupiter => "Jupiter",
                Saturn => "Saturn",
                Uranus => "Uranus",
                Neptune => "Neptune",
                Pluto => "Pluto",
            },
            Self::Chinese => match id {
                Sun => "太阳",
                Mercury => "水星",
                Venus => "金星",
                Earth => "地球",
                Mars => "火星",
                Jupiter => "木星",
                Saturn => "土星",
                Uranus => "天王星",
                Neptune => "海王星",
                Pluto => "冥王星",
            },
        }
    }

    pub const fn description(self, id: BodyId) -> &'static str {
        use BodyId::*;
        match self {
            Self::English => match id {
                Sun => "The central body of the solar system, a giant ball of hydrogen and helium gas.",
                Mercury => "The planet closest to the Sun, with extreme swings in surface temperature.",
                Venus => "Close to Earth in size, known as the \"morning star\" or \"evening star\".",
                Earth => "The only planet known to harbor life, with liquid water on its surface.",
                Mars => "Known as the \"Red Planet\", its surface is rich in iron oxide.",
                Jupiter => "The largest planet in the solar system, with a striking Great Red Spot.",
                Saturn => "Famous for its spectacular ring system.",
                Uranus => "Its rotation axis is nearly perpendicular to its orbit.",
                Neptune => "Home to powerful storm systems with winds of up to 2000 km/h.",
                Pluto => "Once the ninth planet, now classified as a dwarf planet.",
            },
            Self::Chinese => match id {
                Sun => "太阳系的中心天体，一个巨大的氢氦气体球。",
                Mercury => "最靠近太阳的行星，表面温度变化极大。",
                Venus => "体积与地球相近，被称为\"晨星\"或\"昏星\"。",
                Earth => "唯一已知存在生命的行星，表面有液态水。",
                Mars => "被称为\"红色星球\"，表面有大量氧化铁。",
                Jupiter => "太阳系最大的行星，有引人注目的大红斑。",
                Saturn => "以其壮观的环系统闻名于世。",
                Uranus => "自转轴与公转轨道几乎垂直。",
                Neptune => "有强大的风暴系统，风速可达每小时2000公里。",
                Pluto => "曾经的第九大行星，现在被归类为矮行星。",
            },
        }
    }

    /// Info panel heading: the native name followed by the English one, or just
    /// the English name when both would be identical.
    pub fn title(self, id: BodyId) -> String {
        match self {
            Self::English => id.english_name().to_string(),
            _ => format!("{} ({})", self.body_name(id), id.english_name()),
        }
    }
}

/// Description of the body called `name` in any locale, or an empty string when
/// nothing matches.
pub fn describe(locale: Locale, name: &str) -> &'static str {
    BodyId::from_name(name)
        .map(|id| locale.description(id))
        .unwrap_or_default()
}

impl FromStr for Locale {
    type Err = UnknownLocale;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "en" | "english" => Ok(Self::English),
            "zh" | "chinese" => Ok(Self::Chinese),
            _ => Err(UnknownLocale(s.to_string())),
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::English => "en",
            Self::Chinese => "zh",
        })
    }
}
