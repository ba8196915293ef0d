//! open-atom - exercise the extension's menu logic from a terminal
//!
//! Runs the same provider the file manager loads, with the same preferences,
//! so menus and command lines can be checked without restarting the host.

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::eyre::{bail, eyre, Result};
use nautilus_open_atom::app::config::{
    config_dir, init_config_file, load_settings_in, save_settings, Settings,
};
use nautilus_open_atom::app::{
    FileInfo, FileKind, GvfsMapper, MenuAction, MenuProvider, MenuRequest, OpenAtomProvider,
    PreferenceProvider, ScreenContext, SpawnLauncher, StaticPreferences, TomlPreferences,
};
use nautilus_open_atom::core::{local_path_from_uri, logging};

/// Open folders in Atom the way the file manager extension does
#[derive(Parser, Debug)]
#[command(name = "open-atom")]
#[command(about = "Open folders in Atom the way the file manager extension does", long_about = None)]
struct Args {
    /// Directory holding config.toml
    #[arg(long, value_name = "DIR")]
    config: Option<PathBuf>,

    /// Display to launch on (defaults to $DISPLAY)
    #[arg(long)]
    display: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Print the menu items offered for URIs
    Menu {
        /// Treat the URI as the open folder instead of a selection
        #[arg(long)]
        background: bool,

        /// Activation URIs
        #[arg(required = true)]
        uris: Vec<String>,
    },

    /// Open a folder URI in the editor
    Open {
        uri: String,

        /// Editor command to use instead of the configured one
        #[arg(long)]
        editor: Option<String>,

        /// Print the command line instead of running it
        #[arg(long)]
        dry_run: bool,
    },

    /// Write a default config.toml
    Init,

    /// Change preferences in config.toml
    Set {
        /// Editor command, e.g. "code -n"; empty restores the default
        #[arg(long)]
        editor: Option<String>,

        /// Desktop entry opens a new editor window on the home folder
        #[arg(long, value_name = "BOOL")]
        desktop_opens_home_dir: Option<bool>,

        /// Desktop folder is the home folder
        #[arg(long, value_name = "BOOL")]
        desktop_is_home_dir: Option<bool>,

        /// Hide all menu items
        #[arg(long, value_name = "BOOL")]
        lockdown: Option<bool>,
    },
}

fn main() -> Result<()> {
    color_eyre::install()?;
    let args = Args::parse();

    logging::init()?;

    let config_dir = args.config.clone().unwrap_or_else(config_dir);
    let screen = match args.display {
        Some(display) => ScreenContext::new(display),
        None => ScreenContext::from_env(),
    };
    let preferences = TomlPreferences::at(config_dir.join("config.toml"));

    match args.command {
        Commands::Init => {
            let path = init_config_file(&config_dir)?;
            println!("{}", path.display());
            Ok(())
        }
        Commands::Set {
            editor,
            desktop_opens_home_dir,
            desktop_is_home_dir,
            lockdown,
        } => {
            let mut settings = load_settings_in(&config_dir);
            apply(
                &mut settings,
                editor,
                desktop_opens_home_dir,
                desktop_is_home_dir,
                lockdown,
            );
            save_settings(&config_dir, &settings)?;
            println!("{:?}", settings.flags());
            Ok(())
        }
        Commands::Menu { background, uris } => {
            let provider = provider(Arc::new(preferences));
            let files: Vec<FileInfo> = uris.iter().map(|uri| file_info(uri)).collect();

            let items = if background {
                let folder = files.first().ok_or_else(|| eyre!("no URI given"))?;
                provider.background_items(&screen, folder)
            } else {
                provider.file_items(&screen, &files)
            };

            if items.is_empty() {
                println!("(no menu items)");
            }
            for item in &items {
                print_item(item);
            }
            Ok(())
        }
        Commands::Open {
            uri,
            editor,
            dry_run,
        } => {
            let preferences: Arc<dyn PreferenceProvider> = match editor {
                Some(editor) => Arc::new(
                    StaticPreferences::from_flags(preferences.flags()).with_editor_command(editor),
                ),
                None => Arc::new(preferences),
            };
            let snapshot = preferences.snapshot();
            let request = MenuRequest {
                prefs: snapshot.flags,
                template: snapshot.editor_command,
                screen,
            };
            let provider = provider(preferences);

            let item = provider
                .policy()
                .background_action(&file_info(&uri), &request)?
                .ok_or_else(|| eyre!("No menu item for {}", uri))?;

            if dry_run {
                let command_line = item
                    .command_line()
                    .ok_or_else(|| eyre!("No command line for {}", uri))?;
                println!("{}", command_line);
                return Ok(());
            }

            if !item.activate() {
                match logging::get_current_log_file() {
                    Ok(log) => bail!("Could not start the editor, see {}", log.display()),
                    Err(_) => bail!("Could not start the editor"),
                }
            }
            Ok(())
        }
    }
}

fn apply(
    settings: &mut Settings,
    editor: Option<String>,
    desktop_opens_home_dir: Option<bool>,
    desktop_is_home_dir: Option<bool>,
    lockdown: Option<bool>,
) {
    if let Some(editor) = editor {
        settings.editor.command = editor;
    }
    if let Some(value) = desktop_opens_home_dir {
        settings.desktop.opens_home_dir = value;
    }
    if let Some(value) = desktop_is_home_dir {
        settings.desktop.is_home_dir = value;
    }
    if let Some(value) = lockdown {
        settings.lockdown.disable_command_line = value;
    }
}

fn provider(preferences: Arc<dyn PreferenceProvider>) -> OpenAtomProvider {
    OpenAtomProvider::new(
        preferences,
        Arc::new(GvfsMapper::new()),
        Arc::new(SpawnLauncher),
    )
}

/// Guess what the file manager would report for a URI.
fn file_info(uri: &str) -> FileInfo {
    let kind = match local_path_from_uri(uri) {
        Some(path) if path.is_dir() => FileKind::Directory,
        Some(path) if path.exists() => FileKind::Regular,
        _ => FileKind::Directory,
    };
    FileInfo::new(uri, kind)
}

fn print_item(item: &MenuAction) {
    println!("{}", item.name);
    println!("  label:   {}", item.label);
    println!("  tooltip: {}", item.tooltip);
    println!("  target:  {}", item.target().path.display());
    if let Some(command_line) = item.command_line() {
        println!("  command: {}", command_line);
    }
}
