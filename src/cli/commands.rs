//! Command dispatch

use std::io::{self, IsTerminal};
use std::path::{Path, PathBuf};

use clap::CommandFactory;
use tracing::{debug, instrument};

use crate::cli::args::{Cli, Commands, ConfigCommands, CreateArgs};
use crate::cli::output;
use crate::cli::{CliError, CliResult};
use crate::config::{global_config_path, local_config_path, Settings};
use crate::domain::TreeArena;
use crate::infrastructure::di::ServiceContainer;
use crate::infrastructure::{read_tree_input, InfraError};
use crate::util::path::{absolutize, quote_paths};

/// Load settings for the current directory and run the selected command.
pub fn execute_command(cli: &Cli) -> CliResult<()> {
    let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
    let settings = Settings::load(Some(&cwd))?;
    let container = ServiceContainer::new(settings);
    execute_with(&container, cli)
}

/// Run the selected command against an explicit container.
pub fn execute_with(container: &ServiceContainer, cli: &Cli) -> CliResult<()> {
    match &cli.command {
        None => cmd_create(container, &cli.create),
        Some(Commands::Show { tree, comments }) => cmd_show(container, tree.as_deref(), *comments),
        Some(Commands::Dict { tree, comments }) => cmd_dict(container, tree.as_deref(), *comments),
        Some(Commands::Config { command }) => cmd_config(container, command),
        Some(Commands::Completion { shell }) => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "creatree", &mut io::stdout());
            Ok(())
        }
    }
}

fn load_tree(container: &ServiceContainer, path: Option<&Path>) -> CliResult<TreeArena> {
    if path.is_none() && io::stdin().is_terminal() {
        output::warning("reading tree from stdin (end with Ctrl-D)");
    }
    let text = read_tree_input(container.fs.as_ref(), container.stdin.as_ref(), path)?;
    let tree = container.parser().parse(&text)?;
    if tree.is_empty() {
        return Err(CliError::Usage("tree input contains no entries".to_string()));
    }
    Ok(tree)
}

#[instrument(level = "debug", skip(container))]
fn cmd_create(container: &ServiceContainer, args: &CreateArgs) -> CliResult<()> {
    let tree = load_tree(container, args.tree.as_deref())?;
    let target = args
        .where_to_create
        .clone()
        .unwrap_or_else(|| container.settings.where_to_create.clone());
    debug!("target: {}", target.display());

    let service = container.materializer();

    if args.dry_run {
        output::header(&format!("Would create in {}:", target.display()));
        for path in service.plan(&tree, &target) {
            output::detail(&path.display());
        }
        return Ok(());
    }

    let report = service.materialize(&tree, &target)?;

    let roots = report
        .roots
        .iter()
        .map(|p| absolutize(p))
        .collect::<Result<Vec<PathBuf>, _>>()
        .map_err(|e| InfraError::io("resolve created paths", e))?;
    let plural = if roots.len() > 1 { "s" } else { "" };
    output::success(&format!("Created tree{plural} in {}", quote_paths(&roots)));
    if !report.existing.is_empty() {
        output::detail(&format!(
            "{} existing entr{} left untouched",
            report.existing.len(),
            if report.existing.len() == 1 { "y" } else { "ies" }
        ));
    }
    Ok(())
}

fn cmd_show(container: &ServiceContainer, path: Option<&Path>, comments: bool) -> CliResult<()> {
    let tree = load_tree(container, path)?;
    output::info(&tree.to_termtree(comments));
    Ok(())
}

fn cmd_dict(container: &ServiceContainer, path: Option<&Path>, comments: bool) -> CliResult<()> {
    let tree = load_tree(container, path)?;
    output::info(&tree.to_dict(comments));
    Ok(())
}

fn cmd_config(container: &ServiceContainer, command: &ConfigCommands) -> CliResult<()> {
    match command {
        ConfigCommands::Show => {
            output::info(&container.settings.to_toml()?);
        }
        ConfigCommands::Path => {
            let cwd = std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
            let local = local_config_path(&cwd);
            match global_config_path() {
                Some(global) => print_config_path("global", &global, container),
                None => output::action("global", "unavailable (no home directory)"),
            }
            print_config_path("local", &local, container);
        }
        ConfigCommands::Init { global } => {
            let path = if *global {
                global_config_path().ok_or_else(|| {
                    CliError::Usage("cannot determine global config directory".to_string())
                })?
            } else {
                let cwd =
                    std::env::current_dir().map_err(|e| InfraError::io("current directory", e))?;
                local_config_path(&cwd)
            };
            if container.fs.exists(&path) {
                return Err(CliError::Usage(format!(
                    "config already exists: {}",
                    path.display()
                )));
            }
            container
                .fs
                .ensure_parent(&path)
                .and_then(|_| container.fs.create_new(&path, &Settings::template()))
                .map_err(|e| InfraError::io(format!("write {}", path.display()), e))?;
            output::success(&format!("Created {}", path.display()));
        }
    }
    Ok(())
}

fn print_config_path(label: &str, path: &Path, container: &ServiceContainer) {
    let state = if container.fs.exists(path) {
        "exists"
    } else {
        "not found"
    };
    output::action(label, &format!("{} ({})", path.display(), state));
}
