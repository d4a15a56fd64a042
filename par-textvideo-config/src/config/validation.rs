//! Semantic validation of a loaded `Config`.

use super::config_struct::Config;
use crate::error::ConfigError;
use crate::geometry::{PIXELS_PER_LINE, VISIBLE_SCANLINES};

/// Number of palette entries the attribute nibbles can address.
pub const PALETTE_SIZE: usize = 16;

impl Config {
    /// Check values that serde cannot: palette size and channel range, and
    /// that the video mode matches the fixed text grid.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.palette.len() != PALETTE_SIZE {
            return Err(ConfigError::Validation(format!(
                "palette must have {} entries, found {}",
                PALETTE_SIZE,
                self.palette.len()
            )));
        }

        if let Some((index, color)) = self
            .palette
            .iter()
            .enumerate()
            .find(|(_, c)| !c.is_valid())
        {
            return Err(ConfigError::Validation(format!(
                "palette[{index}] = {color:?} has a channel above 31"
            )));
        }

        let mode = &self.video_mode;
        if mode.width as usize != PIXELS_PER_LINE || mode.height as usize != VISIBLE_SCANLINES {
            return Err(ConfigError::Validation(format!(
                "video mode {} does not match the {}x{} text grid",
                mode.name(),
                PIXELS_PER_LINE,
                VISIBLE_SCANLINES
            )));
        }

        if mode.refresh_hz == 0 {
            return Err(ConfigError::Validation(
                "video_mode.refresh_hz must be greater than zero".to_string(),
            ));
        }

        if self.buffer_count == 0 {
            return Err(ConfigError::Validation(
                "buffer_count must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Rgb5, VideoMode};

    #[test]
    fn default_config_is_valid() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn short_palette_is_rejected() {
        let mut config = Config::default();
        config.palette.truncate(8);
        let err = config.validate().unwrap_err();
        assert!(matches!(err, ConfigError::Validation(ref m) if m.contains("16 entries")));
    }

    #[test]
    fn out_of_range_channel_is_rejected() {
        let mut config = Config::default();
        config.palette[3] = Rgb5::new(0, 32, 0);
        assert!(matches!(
            config.validate(),
            Err(ConfigError::Validation(ref m)) if m.contains("palette[3]")
        ));
    }

    #[test]
    fn mismatched_video_mode_is_rejected() {
        let mut config = Config::default();
        config.video_mode = VideoMode {
            width: 640,
            height: 480,
            refresh_hz: 60,
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_refresh_is_rejected() {
        let mut config = Config::default();
        config.video_mode.refresh_hz = 0;
        assert!(config.validate().is_err());
    }
}
