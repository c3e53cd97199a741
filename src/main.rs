use anyhow::{anyhow, Result};
use druid::{AppLauncher, LocalizedString, WindowDesc};
use druid_video_album::{config, gui, media::thumbnail};
use gui::{data::AppState, ui::root_widget};

fn main() -> Result<()> {
	// Logging only starts with the launcher.
	let config = config::or_default(config::load_config());
	let window = WindowDesc::new(root_widget())
		.title(LocalizedString::new("Window-Title").with_placeholder("Video Album"))
		.window_size(config.window_size());
	let launcher = AppLauncher::with_window(window).log_to_console();
	let state = AppState::new(&config);

	thumbnail::spawn_loader(config.entries, launcher.get_external_handle());
	launcher.launch(state).map_err(|e| anyhow!("running app: {}", e))?;
	Ok(())
}
