//! CLI entry point for sprig

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process;

use anyhow::{Context as _, Result, anyhow};
use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, ValueEnum};
use log::debug;
use sprig::{
    DateField, DateFilter, FlagFilter, FlattenPass, Format, Mode, NameFilter, NodeId, Outline,
    Polarity, PrunePass, Scope, SortKey, SortPass, loader, render, sort_roots, traverse_list,
};

/// Output format selection.
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    Text,
    Markdown,
    Taskpaper,
    Opml,
}

impl From<FormatArg> for Format {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => Format::Text,
            FormatArg::Markdown => Format::Markdown,
            FormatArg::Taskpaper => Format::Taskpaper,
            FormatArg::Opml => Format::Opml,
        }
    }
}

#[derive(Parser, Debug)]
#[command(name = "sprig")]
#[command(about = "Export hierarchical task outlines as text, Markdown, TaskPaper, or OPML")]
#[command(version)]
#[command(after_help = "Filters and transforms are applied in the order they \
appear on the command line, each as a full pass over the tree. Pruning folds \
filter results upward, so it usually belongs last.")]
struct Args {
    /// Task database to export (JSON)
    input: PathBuf,

    /// Write to FILE instead of stdout; the extension picks the format
    #[arg(short = 'o', long = "output", value_name = "FILE")]
    output: Option<PathBuf>,

    /// Output format (overrides the output file extension)
    #[arg(long = "format", value_enum)]
    format: Option<FormatArg>,

    /// Export the context hierarchy instead of the project hierarchy
    #[arg(short = 'C', long = "contexts")]
    contexts: bool,

    /// Export the project hierarchy (the default)
    #[arg(short = 'P', long = "projects", conflicts_with = "contexts")]
    projects: bool,

    /// Keep only items whose name matches REGEX
    #[arg(short = 'i', long = "include", value_name = "REGEX")]
    include: Vec<String>,

    /// Drop items whose name matches REGEX
    #[arg(short = 'e', long = "exclude", value_name = "REGEX")]
    exclude: Vec<String>,

    /// Keep only folders whose name matches REGEX
    #[arg(long = "include-folders", value_name = "REGEX")]
    include_folders: Vec<String>,

    /// Drop folders whose name matches REGEX
    #[arg(long = "exclude-folders", value_name = "REGEX")]
    exclude_folders: Vec<String>,

    /// Keep only projects whose name matches REGEX
    #[arg(long = "include-projects", value_name = "REGEX")]
    include_projects: Vec<String>,

    /// Drop projects whose name matches REGEX
    #[arg(long = "exclude-projects", value_name = "REGEX")]
    exclude_projects: Vec<String>,

    /// Keep only tasks whose name matches REGEX
    #[arg(long = "include-tasks", value_name = "REGEX")]
    include_tasks: Vec<String>,

    /// Drop tasks whose name matches REGEX
    #[arg(long = "exclude-tasks", value_name = "REGEX")]
    exclude_tasks: Vec<String>,

    /// Keep only contexts whose name matches REGEX
    #[arg(long = "include-contexts", value_name = "REGEX")]
    include_contexts: Vec<String>,

    /// Drop contexts whose name matches REGEX
    #[arg(long = "exclude-contexts", value_name = "REGEX")]
    exclude_contexts: Vec<String>,

    /// Keep only flagged projects and tasks
    #[arg(long = "flagged")]
    flagged: bool,

    /// Drop flagged projects and tasks
    #[arg(long = "unflagged")]
    unflagged: bool,

    /// Keep only flagged tasks
    #[arg(long = "flagged-tasks")]
    flagged_tasks: bool,

    /// Drop flagged tasks
    #[arg(long = "unflagged-tasks")]
    unflagged_tasks: bool,

    /// Keep only flagged projects
    #[arg(long = "flagged-projects")]
    flagged_projects: bool,

    /// Drop flagged projects
    #[arg(long = "unflagged-projects")]
    unflagged_projects: bool,

    /// Keep only tasks whose due date (YYYY-MM-DD) matches REGEX
    #[arg(long = "include-due", value_name = "REGEX")]
    include_due: Vec<String>,

    /// Drop tasks whose due date matches REGEX
    #[arg(long = "exclude-due", value_name = "REGEX")]
    exclude_due: Vec<String>,

    /// Keep only tasks whose start date matches REGEX
    #[arg(long = "include-start", value_name = "REGEX")]
    include_start: Vec<String>,

    /// Drop tasks whose start date matches REGEX
    #[arg(long = "exclude-start", value_name = "REGEX")]
    exclude_start: Vec<String>,

    /// Keep only tasks whose completion date matches REGEX
    #[arg(long = "include-done", value_name = "REGEX")]
    include_done: Vec<String>,

    /// Drop tasks whose completion date matches REGEX
    #[arg(long = "exclude-done", value_name = "REGEX")]
    exclude_done: Vec<String>,

    /// Keep only projects whose completion date matches REGEX
    #[arg(long = "include-project-done", value_name = "REGEX")]
    include_project_done: Vec<String>,

    /// Drop projects whose completion date matches REGEX
    #[arg(long = "exclude-project-done", value_name = "REGEX")]
    exclude_project_done: Vec<String>,

    /// Sort siblings alphabetically
    #[arg(long = "sort")]
    sort: bool,

    /// Sort siblings by completion date
    #[arg(long = "sort-completion")]
    sort_completion: bool,

    /// Drop containers left without any matching item
    #[arg(long = "prune")]
    prune: bool,

    /// Collapse folder and sub-task nesting into a flat list
    #[arg(short = 'F', long = "flatten")]
    flatten: bool,
}

/// One entry of the user's pass pipeline, tagged for argv-order replay.
enum PassSpec {
    Name {
        pattern: String,
        scope: Scope,
        polarity: Polarity,
    },
    Flag {
        scope: Scope,
        polarity: Polarity,
    },
    Date {
        field: DateField,
        scope: Scope,
        polarity: Polarity,
        pattern: String,
    },
    Sort(SortKey),
    Prune,
    Flatten,
}

fn push_regex_passes(
    matches: &ArgMatches,
    id: &str,
    passes: &mut Vec<(usize, PassSpec)>,
    make: impl Fn(String) -> PassSpec,
) {
    if let (Some(values), Some(indices)) = (matches.get_many::<String>(id), matches.indices_of(id))
    {
        for (value, index) in values.zip(indices) {
            passes.push((index, make(value.clone())));
        }
    }
}

fn push_flag_pass(matches: &ArgMatches, id: &str, passes: &mut Vec<(usize, PassSpec)>, spec: PassSpec) {
    if matches.get_flag(id) {
        if let Some(index) = matches.index_of(id) {
            passes.push((index, spec));
        }
    }
}

/// Rebuild the pipeline in the order the options appeared on the command
/// line. Clap groups repeated options per id; the argv indices put them back
/// into one sequence.
fn collect_passes(matches: &ArgMatches) -> Vec<PassSpec> {
    use DateField::{Completed, Due, Start};
    use Polarity::{Exclude, Include};

    let mut passes: Vec<(usize, PassSpec)> = Vec::new();

    let name_specs: [(&str, Scope, Polarity); 10] = [
        ("include", Scope::Any, Include),
        ("exclude", Scope::Any, Exclude),
        ("include_folders", Scope::Folder, Include),
        ("exclude_folders", Scope::Folder, Exclude),
        ("include_projects", Scope::Project, Include),
        ("exclude_projects", Scope::Project, Exclude),
        ("include_tasks", Scope::Task, Include),
        ("exclude_tasks", Scope::Task, Exclude),
        ("include_contexts", Scope::Context, Include),
        ("exclude_contexts", Scope::Context, Exclude),
    ];
    for (id, scope, polarity) in name_specs {
        push_regex_passes(matches, id, &mut passes, |pattern| PassSpec::Name {
            pattern,
            scope,
            polarity,
        });
    }

    let date_specs: [(&str, DateField, Scope, Polarity); 8] = [
        ("include_due", Due, Scope::Task, Include),
        ("exclude_due", Due, Scope::Task, Exclude),
        ("include_start", Start, Scope::Task, Include),
        ("exclude_start", Start, Scope::Task, Exclude),
        ("include_done", Completed, Scope::Task, Include),
        ("exclude_done", Completed, Scope::Task, Exclude),
        ("include_project_done", Completed, Scope::Project, Include),
        ("exclude_project_done", Completed, Scope::Project, Exclude),
    ];
    for (id, field, scope, polarity) in date_specs {
        push_regex_passes(matches, id, &mut passes, |pattern| PassSpec::Date {
            field,
            scope,
            polarity,
            pattern,
        });
    }

    let flag_specs: [(&str, Scope, Polarity); 6] = [
        ("flagged", Scope::Any, Include),
        ("unflagged", Scope::Any, Exclude),
        ("flagged_tasks", Scope::Task, Include),
        ("unflagged_tasks", Scope::Task, Exclude),
        ("flagged_projects", Scope::Project, Include),
        ("unflagged_projects", Scope::Project, Exclude),
    ];
    for (id, scope, polarity) in flag_specs {
        push_flag_pass(matches, id, &mut passes, PassSpec::Flag { scope, polarity });
    }

    push_flag_pass(matches, "sort", &mut passes, PassSpec::Sort(SortKey::Name));
    push_flag_pass(
        matches,
        "sort_completion",
        &mut passes,
        PassSpec::Sort(SortKey::Completion),
    );
    push_flag_pass(matches, "prune", &mut passes, PassSpec::Prune);
    push_flag_pass(matches, "flatten", &mut passes, PassSpec::Flatten);

    passes.sort_by_key(|(index, _)| *index);
    passes.into_iter().map(|(_, spec)| spec).collect()
}

fn apply_pass(
    spec: PassSpec,
    outline: &mut Outline,
    items: &mut Vec<NodeId>,
    mode: Mode,
) -> Result<()> {
    match spec {
        PassSpec::Name {
            pattern,
            scope,
            polarity,
        } => {
            debug!("name filter {polarity:?} {scope:?} /{pattern}/");
            let mut pass = NameFilter::new(&pattern, scope, polarity)
                .with_context(|| format!("invalid filter regex '{pattern}'"))?;
            traverse_list(&mut pass, outline, items, false, mode)?;
        }
        PassSpec::Flag { scope, polarity } => {
            debug!("flag filter {polarity:?} {scope:?}");
            let mut pass = FlagFilter::new(scope, polarity);
            traverse_list(&mut pass, outline, items, false, mode)?;
        }
        PassSpec::Date {
            field,
            scope,
            polarity,
            pattern,
        } => {
            debug!("date filter {polarity:?} {scope:?} {field:?} /{pattern}/");
            let mut pass = DateFilter::new(field, &pattern, scope, polarity)
                .with_context(|| format!("invalid filter regex '{pattern}'"))?;
            traverse_list(&mut pass, outline, items, false, mode)?;
        }
        PassSpec::Sort(key) => {
            debug!("sort pass {key:?}");
            // The root sequence has no parent hook; sort it directly.
            sort_roots(outline, items, key);
            let mut pass = SortPass::new(key);
            traverse_list(&mut pass, outline, items, false, mode)?;
        }
        PassSpec::Prune => {
            debug!("prune pass");
            traverse_list(&mut PrunePass, outline, items, false, mode)?;
        }
        PassSpec::Flatten => {
            debug!("flatten pass");
            let mut pass = FlattenPass::new();
            traverse_list(&mut pass, outline, items, false, mode)?;
            *items = pass.into_roots();
        }
    }
    Ok(())
}

fn resolve_format(args: &Args) -> Result<Format> {
    if let Some(format) = args.format {
        return Ok(format.into());
    }
    match &args.output {
        Some(path) => Format::from_extension(path).ok_or_else(|| {
            anyhow!(
                "cannot infer a format from '{}'; use --format",
                path.display()
            )
        }),
        None => Ok(Format::Text),
    }
}

fn run(args: &Args, matches: &ArgMatches) -> Result<()> {
    let mut outline = loader::load(&args.input)?;
    let mode = if args.contexts {
        Mode::Context
    } else {
        Mode::Project
    };
    let mut items = match mode {
        Mode::Project => outline.project_roots.clone(),
        Mode::Context => outline.context_roots.clone(),
    };

    for spec in collect_passes(matches) {
        apply_pass(spec, &mut outline, &mut items, mode)?;
    }

    let format = resolve_format(args)?;
    match &args.output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating output file '{}'", path.display()))?;
            let mut out = BufWriter::new(file);
            render(&mut outline, &items, mode, format, &mut out)?;
            out.flush()?;
        }
        None => {
            let mut out = io::stdout().lock();
            render(&mut outline, &items, mode, format, &mut out)?;
        }
    }
    Ok(())
}

fn main() {
    let matches = Args::command().get_matches();
    let args = Args::from_arg_matches(&matches).unwrap_or_else(|e| {
        eprintln!("sprig: argument parsing error: {e}");
        process::exit(1);
    });

    // Level comes from RUST_LOG when set; warnings about data quality in the
    // database go through this.
    let _logger = flexi_logger::Logger::try_with_env_or_str("warn")
        .map(|logger| logger.log_to_stderr())
        .and_then(|logger| logger.start())
        .unwrap_or_else(|e| {
            eprintln!("sprig: cannot initialize logging: {e}");
            process::exit(1);
        });

    if let Err(e) = run(&args, &matches) {
        eprintln!("sprig: {e:#}");
        process::exit(1);
    }
}
