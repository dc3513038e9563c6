use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StudyConfig {
    #[serde(default = "StudyConfig::default_data_dir")]
    pub data_dir: String,
    /// Display timezone for session start/end dates.
    #[serde(default = "StudyConfig::default_timezone")]
    pub timezone: String,
    /// Kinect user id retained when a file accidentally tracks several users.
    #[serde(default = "StudyConfig::default_user_id")]
    pub default_user_id: i64,
    /// Study name embedded in per-participant session file names.
    #[serde(default = "StudyConfig::default_study_name")]
    pub study_name: String,
}

impl StudyConfig {
    fn default_data_dir() -> String {
        ".".to_string()
    }
    fn default_timezone() -> String {
        "America/Chicago".to_string()
    }
    fn default_user_id() -> i64 {
        1
    }
    fn default_study_name() -> String {
        "task-switching-replication".to_string()
    }
}

impl Default for StudyConfig {
    fn default() -> Self {
        Self {
            data_dir: Self::default_data_dir(),
            timezone: Self::default_timezone(),
            default_user_id: Self::default_user_id(),
            study_name: Self::default_study_name(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Delay from cue onset to prompt, subtracted in addition to the
    /// reaction time when locating the window start.
    #[serde(default = "WindowConfig::default_cue_offset_secs")]
    pub cue_offset_secs: f64,
    /// Window width used when the trial timed out without a response.
    #[serde(default = "WindowConfig::default_timeout_window_secs")]
    pub timeout_window_secs: f64,
}

impl WindowConfig {
    fn default_cue_offset_secs() -> f64 {
        1.0
    }
    fn default_timeout_window_secs() -> f64 {
        2.5
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            cue_offset_secs: Self::default_cue_offset_secs(),
            timeout_window_secs: Self::default_timeout_window_secs(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FigureConfig {
    /// 6.4 x 4.8 in at 300 dpi.
    #[serde(default = "FigureConfig::default_width_px")]
    pub width_px: u32,
    #[serde(default = "FigureConfig::default_height_px")]
    pub height_px: u32,
    /// Displacement axis clip; the bulk of the data sits well below this.
    #[serde(default = "FigureConfig::default_x_max")]
    pub x_max: f64,
}

impl FigureConfig {
    fn default_width_px() -> u32 {
        1920
    }
    fn default_height_px() -> u32 {
        1440
    }
    fn default_x_max() -> f64 {
        10.0
    }
}

impl Default for FigureConfig {
    fn default() -> Self {
        Self {
            width_px: Self::default_width_px(),
            height_px: Self::default_height_px(),
            x_max: Self::default_x_max(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct AppConfig {
    #[serde(default)]
    pub study: StudyConfig,
    #[serde(default)]
    pub window: WindowConfig,
    #[serde(default)]
    pub figures: FigureConfig,
}

impl AppConfig {
    pub fn load_or_default(path: &str) -> Self {
        let path_obj = Path::new(path);
        if path_obj.exists() {
            match fs::read_to_string(path_obj) {
                Ok(contents) => match toml::from_str(&contents) {
                    Ok(cfg) => return cfg,
                    Err(err) => {
                        eprintln!("Failed to parse config {path}: {err}. Using defaults.");
                    }
                },
                Err(err) => {
                    eprintln!("Failed to read config {path}: {err}. Using defaults.");
                }
            }
            return Self::default();
        }

        // File does not exist: write defaults so the knobs are discoverable.
        let default_cfg = Self::default();
        match toml::to_string_pretty(&default_cfg) {
            Ok(text) => {
                if let Err(err) = fs::write(path_obj, text) {
                    eprintln!("Failed to write default config to {path}: {err}");
                }
            }
            Err(err) => {
                eprintln!("Failed to serialize default config: {err}");
            }
        }
        default_cfg
    }
}
