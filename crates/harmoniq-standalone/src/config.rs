use std::path::PathBuf;

use clap::Parser;
use clap_host::AudioConfig;
use harmoniq_host_window::HostWindowOptions;

#[derive(Debug, Parser)]
#[command(author, version, about = "Run a CLAP plug-in editor in its own window")]
pub struct StandaloneConfig {
    /// Path to the .clap bundle to host
    #[arg(env = "HARMONIQ_STANDALONE_PLUGIN")]
    pub plugin: PathBuf,

    /// Plug-in id inside the bundle; the first plug-in is used when omitted
    #[arg(long)]
    pub plugin_id: Option<String>,

    /// Window title; defaults to the plug-in name
    #[arg(long)]
    pub title: Option<String>,

    /// Directory holding per-plug-in default states
    #[arg(long, env = "HARMONIQ_STANDALONE_SETTINGS_DIR")]
    pub settings_dir: Option<PathBuf>,

    /// Sample rate the plug-in is activated with
    #[arg(long, default_value_t = 48_000.0)]
    pub sample_rate: f64,

    /// Smallest block size the plug-in must accept
    #[arg(long, default_value_t = 32)]
    pub min_block_size: u32,

    /// Largest block size the plug-in must accept
    #[arg(long, default_value_t = 1024)]
    pub max_block_size: u32,

    /// List the plug-ins in the bundle and exit
    #[arg(long, default_value_t = false)]
    pub list: bool,
}

#[cfg_attr(not(target_os = "windows"), allow(dead_code))]
impl StandaloneConfig {
    pub fn audio_config(&self) -> AudioConfig {
        AudioConfig {
            sample_rate: self.sample_rate,
            min_frames_count: self.min_block_size.min(self.max_block_size),
            max_frames_count: self.max_block_size.max(self.min_block_size),
        }
    }

    pub fn window_options(&self, plugin_name: &str) -> HostWindowOptions {
        let mut options = HostWindowOptions::default();
        if let Some(title) = &self.title {
            options = options.with_title(title);
        } else if !plugin_name.is_empty() {
            options = options.with_title(plugin_name);
        }
        match &self.settings_dir {
            Some(dir) => options.with_settings_root(dir),
            None => options,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_clap_audio_defaults() {
        let config = StandaloneConfig::try_parse_from(["harmoniq-standalone", "synth.clap"])
            .expect("valid arguments");
        assert_eq!(config.plugin, PathBuf::from("synth.clap"));
        let audio = config.audio_config();
        let defaults = AudioConfig::default();
        assert_eq!(audio.sample_rate, defaults.sample_rate);
        assert_eq!(audio.min_frames_count, defaults.min_frames_count);
        assert_eq!(audio.max_frames_count, defaults.max_frames_count);
    }

    #[test]
    fn inverted_block_sizes_are_ordered() {
        let config = StandaloneConfig::try_parse_from([
            "harmoniq-standalone",
            "synth.clap",
            "--min-block-size",
            "2048",
            "--max-block-size",
            "64",
        ])
        .expect("valid arguments");
        let audio = config.audio_config();
        assert_eq!((audio.min_frames_count, audio.max_frames_count), (64, 2048));
    }

    #[test]
    fn window_options_use_plugin_name_and_settings_dir() {
        let config = StandaloneConfig::try_parse_from([
            "harmoniq-standalone",
            "synth.clap",
            "--settings-dir",
            "/tmp/harmoniq",
        ])
        .expect("valid arguments");
        let options = config.window_options("Test Synth");
        assert_eq!(options.title, "Test Synth");
        assert_eq!(options.settings_root, Some(PathBuf::from("/tmp/harmoniq")));

        let untitled = config.window_options("");
        assert_eq!(untitled.title, HostWindowOptions::default().title);
    }

    #[test]
    fn explicit_title_beats_plugin_name() {
        let config = StandaloneConfig::try_parse_from([
            "harmoniq-standalone",
            "synth.clap",
            "--title",
            "Bass Station",
        ])
        .expect("valid arguments");
        assert_eq!(config.window_options("Test Synth").title, "Bass Station");
    }
}
