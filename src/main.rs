// src/main.rs
use std::path::PathBuf;
use std::process::ExitCode;

use chrono::{DateTime, FixedOffset, Local};
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use tracing::info;

use hlnote::config::Config;
use hlnote::draft::{Draft, Highlight, HugoPost};
use hlnote::editor::HighlightListEditor;
use hlnote::library::DraftIndex;
use hlnote::render::{Document, RenderManager};
use hlnote::tui::{self, App, AppExit};
use hlnote::{logging, Error, Result};

#[derive(Parser)]
#[command(name = "hlnote", version, about = "Capture highlights and commentary from what you read")]
struct Cli {
    /// Config file to use instead of the default location
    #[arg(long, global = true, env = "HLNOTE_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Edit highlights interactively and print the result on export
    Capture(CaptureArgs),
    /// Print the highlight sections of a draft without opening the editor
    Render {
        #[arg(long)]
        from: PathBuf,
        #[arg(long, default_value = "html")]
        format: String,
    },
    /// Print a draft as a Hugo post
    Hugo {
        file: PathBuf,
        #[arg(long)]
        title: Option<String>,
    },
    /// List drafts, newest first
    List {
        #[arg(long)]
        dir: Option<PathBuf>,
        #[arg(long)]
        search: Option<String>,
    },
}

#[derive(Args)]
struct CaptureArgs {
    #[arg(long)]
    source_url: Option<String>,
    /// Draft whose highlights are pre-rendered into the editor
    #[arg(long)]
    from: Option<PathBuf>,
    #[arg(long, value_delimiter = ',')]
    tags: Vec<String>,
    #[arg(long, default_value = "markdown")]
    format: String,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let config = match cli.config.as_deref().map(Config::load_from).unwrap_or_else(Config::load) {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{} {}", "error:".red().bold(), err);
            return ExitCode::FAILURE;
        }
    };
    let _logging = logging::init(&config.log_filter);

    match run(cli.command, &config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!(error = %err, "command failed");
            eprintln!("{} {}", "error:".red().bold(), err);
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command, config: &Config) -> Result<()> {
    match command {
        Command::Capture(args) => capture(args, config),
        Command::Render { from, format } => {
            let draft = load_draft(&from)?;
            let layout = config.layout.page_layout(None);
            let Some(editor) = HighlightListEditor::attach_if_present(&layout, &draft.highlights)? else {
                return Ok(());
            };
            print_document(&editor, &draft.meta.source_url, &draft.meta.tags, draft.meta.created_at, &format)
        }
        Command::Hugo { file, title } => {
            let draft = load_draft(&file)?;
            let post = HugoPost::from_draft(&draft, title.as_deref());
            print!("{}", post.to_markdown()?);
            Ok(())
        }
        Command::List { dir, search } => {
            list(dir.unwrap_or_else(|| config.drafts_dir.clone()), search);
            Ok(())
        }
    }
}

fn capture(args: CaptureArgs, config: &Config) -> Result<()> {
    let renderers = RenderManager::new();
    if !renderers.formats().iter().any(|f| f.eq_ignore_ascii_case(&args.format)) {
        return Err(Error::UnknownFormat(args.format));
    }

    let draft = args.from.as_deref().map(load_draft).transpose()?;
    let (highlights, source_url, tags, created_at) = match draft {
        Some(draft) => (
            draft.highlights,
            args.source_url.unwrap_or(draft.meta.source_url),
            if args.tags.is_empty() { draft.meta.tags } else { args.tags },
            draft.meta.created_at,
        ),
        // A fresh form starts with one empty section.
        None => (
            vec![Highlight::default()],
            args.source_url.unwrap_or_default(),
            args.tags,
            Local::now().fixed_offset(),
        ),
    };

    let layout = config.layout.page_layout(None);
    let Some(editor) = HighlightListEditor::attach_if_present(&layout, &highlights)? else {
        return Ok(());
    };

    let keys = config.keys.bindings()?;
    let mut app = App::new(editor, keys, source_url.clone());
    info!(sections = highlights.len(), "starting capture editor");

    match tui::run(&mut app)? {
        AppExit::Export => print_document(app.editor(), &source_url, &tags, created_at, &args.format),
        AppExit::Quit => Ok(()),
    }
}

fn print_document(
    editor: &HighlightListEditor,
    source_url: &str,
    tags: &[String],
    created_at: DateTime<FixedOffset>,
    format: &str,
) -> Result<()> {
    let doc = Document { editor, source_url, tags, created_at };
    let output = RenderManager::new().render(format, &doc)?;
    print!("{}", output);
    Ok(())
}

fn load_draft(path: &std::path::Path) -> Result<Draft> {
    let text = std::fs::read_to_string(path)?;
    Draft::parse(&text)
}

fn list(dir: PathBuf, search: Option<String>) {
    let mut index = DraftIndex::scan(dir);
    if let Some(query) = search {
        index.search(&query);
    }

    if index.entries.is_empty() {
        println!("{}", format!("no drafts in {}", index.dir.display()).dimmed());
        return;
    }

    for entry in &index.entries {
        let tags = if entry.tags.is_empty() {
            String::new()
        } else {
            format!(" [{}]", entry.tags.join(", "))
        };
        println!(
            "{}  {}  {} highlights{}",
            entry.created_at.format("%Y-%m-%d %H:%M").to_string().cyan(),
            entry.file_name.bold(),
            entry.highlights,
            tags.yellow(),
        );
        if !entry.source_url.is_empty() {
            println!("    {}", entry.source_url.dimmed());
        }
    }
}
