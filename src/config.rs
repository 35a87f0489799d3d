use glam::Vec3;
use ini::Ini;
use log::{LevelFilter, info, warn};
use std::path::Path;
use std::str::FromStr;
use std::sync::Mutex;

const CONFIG_PATH: &str = "neurosonic.ini";

const DEFAULT_LEFT_LASER: Vec3 = Vec3::new(0.0, 160.0 / 255.0, 1.0);
const DEFAULT_RIGHT_LASER: Vec3 = Vec3::new(1.0, 32.0 / 255.0, 128.0 / 255.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    Off,
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::Off => "Off",
            Self::Error => "Error",
            Self::Warn => "Warn",
            Self::Info => "Info",
            Self::Debug => "Debug",
            Self::Trace => "Trace",
        }
    }

    pub const fn as_level_filter(&self) -> LevelFilter {
        match self {
            Self::Off => LevelFilter::Off,
            Self::Error => LevelFilter::Error,
            Self::Warn => LevelFilter::Warn,
            Self::Info => LevelFilter::Info,
            Self::Debug => LevelFilter::Debug,
            Self::Trace => LevelFilter::Trace,
        }
    }
}

impl FromStr for LogLevel {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "off" => Ok(Self::Off),
            "error" => Ok(Self::Error),
            "warn" | "warning" => Ok(Self::Warn),
            "info" => Ok(Self::Info),
            "debug" => Ok(Self::Debug),
            "trace" => Ok(Self::Trace),
            _ => Err(()),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Config {
    pub log_level: LogLevel,
    /// Tint of the left (lane 0) laser.
    pub left_laser_color: Vec3,
    /// Tint of the right (lane 1) laser.
    pub right_laser_color: Vec3,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: LogLevel::Warn,
            left_laser_color: DEFAULT_LEFT_LASER,
            right_laser_color: DEFAULT_RIGHT_LASER,
        }
    }
}

impl Config {
    /// Reads known keys, keeping defaults for missing or malformed values.
    pub fn from_ini(conf: &Ini) -> Self {
        let default = Self::default();
        let color = |key: &str, fallback: Vec3| {
            conf.get_from(Some("Lasers"), key)
                .map_or(fallback, |raw| match parse_hex_rgb(raw) {
                    Some(c) => c,
                    None => {
                        warn!("Ignoring malformed [Lasers] {key}='{raw}'.");
                        fallback
                    }
                })
        };

        Self {
            log_level: conf
                .get_from(Some("Options"), "LogLevel")
                .map_or(default.log_level, |raw| {
                    LogLevel::from_str(raw).unwrap_or_else(|()| {
                        warn!("Unknown LogLevel '{raw}', using {}.", default.log_level.as_str());
                        default.log_level
                    })
                }),
            left_laser_color: color("LeftColor", default.left_laser_color),
            right_laser_color: color("RightColor", default.right_laser_color),
        }
    }

    fn to_ini(self) -> Ini {
        let mut conf = Ini::new();
        conf.with_section(Some("Options"))
            .set("LogLevel", self.log_level.as_str());
        conf.with_section(Some("Lasers"))
            .set("LeftColor", format_hex_rgb(self.left_laser_color))
            .set("RightColor", format_hex_rgb(self.right_laser_color));
        conf
    }

    /// Laser tint by analog lane (0 = left, anything else = right).
    pub fn laser_color(&self, lane: u8) -> Vec3 {
        if lane == 0 {
            self.left_laser_color
        } else {
            self.right_laser_color
        }
    }
}

/// Parses "#rrggbb" (the '#' is optional) into a 0..1 color.
pub fn parse_hex_rgb(s: &str) -> Option<Vec3> {
    let hex = s.trim();
    let hex = hex.strip_prefix('#').unwrap_or(hex);
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |i: usize| {
        u8::from_str_radix(&hex[i..i + 2], 16)
            .ok()
            .map(|b| f32::from(b) / 255.0)
    };
    Some(Vec3::new(channel(0)?, channel(2)?, channel(4)?))
}

fn format_hex_rgb(c: Vec3) -> String {
    let byte = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    format!("#{:02x}{:02x}{:02x}", byte(c.x), byte(c.y), byte(c.z))
}

static CONFIG: std::sync::LazyLock<Mutex<Config>> =
    std::sync::LazyLock::new(|| Mutex::new(Config::default()));

// --- File I/O ---

fn create_default_config_file() -> Result<(), std::io::Error> {
    info!("'{CONFIG_PATH}' not found, creating with default values.");
    Config::default().to_ini().write_to_file(CONFIG_PATH)
}

pub fn load() {
    if !Path::new(CONFIG_PATH).exists()
        && let Err(e) = create_default_config_file()
    {
        warn!("Failed to create default config file: {e}");
    }

    let loaded = match Ini::load_from_file(CONFIG_PATH) {
        Ok(conf) => Config::from_ini(&conf),
        Err(e) => {
            warn!("Failed to load '{CONFIG_PATH}': {e}. Using default values.");
            Config::default()
        }
    };
    info!("Configuration loaded (log level {}).", loaded.log_level.as_str());
    *lock() = loaded;
}

pub fn get() -> Config {
    *lock()
}

fn lock() -> std::sync::MutexGuard<'static, Config> {
    CONFIG.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Vec3, b: Vec3) -> bool {
        (a - b).length() <= 1e-6
    }

    #[test]
    fn missing_keys_keep_defaults() {
        let conf = Ini::load_from_str("[Options]\n").expect("ini");
        assert_eq!(Config::from_ini(&conf), Config::default());
    }

    #[test]
    fn reads_log_level_and_laser_colors() {
        let conf = Ini::load_from_str(
            "[Options]\nLogLevel=debug\n[Lasers]\nLeftColor=#ff0000\nRightColor=00ff00\n",
        )
        .expect("ini");
        let cfg = Config::from_ini(&conf);
        assert_eq!(cfg.log_level, LogLevel::Debug);
        assert_eq!(cfg.log_level.as_level_filter(), LevelFilter::Debug);
        assert!(close(cfg.laser_color(0), Vec3::X));
        assert!(close(cfg.laser_color(1), Vec3::Y));
    }

    #[test]
    fn malformed_values_fall_back() {
        let conf = Ini::load_from_str("[Options]\nLogLevel=loud\n[Lasers]\nLeftColor=#12\n")
            .expect("ini");
        let cfg = Config::from_ini(&conf);
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert!(close(cfg.left_laser_color, DEFAULT_LEFT_LASER));
    }

    #[test]
    fn written_defaults_read_back_unchanged() {
        let text = {
            let mut buf = Vec::new();
            Config::default().to_ini().write_to(&mut buf).expect("write ini");
            String::from_utf8(buf).expect("utf8")
        };
        let cfg = Config::from_ini(&Ini::load_from_str(&text).expect("ini"));
        assert_eq!(cfg.log_level, LogLevel::Warn);
        assert!(close(cfg.left_laser_color, DEFAULT_LEFT_LASER));
        assert!(close(cfg.right_laser_color, DEFAULT_RIGHT_LASER));
    }

    #[test]
    fn hex_parser_rejects_bad_input() {
        assert_eq!(parse_hex_rgb("#zzzzzz"), None);
        assert_eq!(parse_hex_rgb("#fff"), None);
        assert!(close(parse_hex_rgb(" #FFFFFF ").expect("white"), Vec3::ONE));
    }
}
