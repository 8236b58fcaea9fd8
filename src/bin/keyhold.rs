use std::path::PathBuf;

use anyhow::Context as _;
use clap::{Parser, Subcommand, ValueEnum};
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
#[command(name = "keyhold", version)]
struct Cli {
    #[command(subcommand)]
    cmd: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the values every actor (or one actor) resolves to at a time.
    Sample(SampleArgs),
    /// Print each actor's timeline marks.
    Marks(MarksArgs),
}

#[derive(Parser, Debug)]
struct SampleArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Query time in milliseconds (fractions allowed).
    #[arg(long)]
    at: f64,

    /// Only sample the actor with this name.
    #[arg(long)]
    actor: Option<String>,

    /// Override the scene's segment locator.
    #[arg(long, value_enum)]
    locator: Option<LocatorArg>,

    /// Override the scene's out-of-range policy.
    #[arg(long, value_enum)]
    policy: Option<PolicyArg>,
}

#[derive(Parser, Debug)]
struct MarksArgs {
    /// Input scene JSON.
    #[arg(long = "in")]
    in_path: PathBuf,

    /// Only list the actor with this name.
    #[arg(long)]
    actor: Option<String>,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum LocatorArg {
    Linear,
    Binary,
}

impl From<LocatorArg> for keyhold::LocatorKind {
    fn from(v: LocatorArg) -> Self {
        match v {
            LocatorArg::Linear => Self::Linear,
            LocatorArg::Binary => Self::Binary,
        }
    }
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum PolicyArg {
    Clamp,
    SkipBeforeStart,
}

impl From<PolicyArg> for keyhold::RangePolicy {
    fn from(v: PolicyArg) -> Self {
        match v {
            PolicyArg::Clamp => Self::Clamp,
            PolicyArg::SkipBeforeStart => Self::SkipBeforeStart,
        }
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.cmd {
        Command::Sample(args) => cmd_sample(args),
        Command::Marks(args) => cmd_marks(args),
    }
}

fn load(path: &std::path::Path) -> anyhow::Result<keyhold::SceneDoc> {
    keyhold::SceneDoc::from_path(path).with_context(|| format!("load scene '{}'", path.display()))
}

fn cmd_sample(args: SampleArgs) -> anyhow::Result<()> {
    let mut doc = load(&args.in_path)?;
    if let Some(locator) = args.locator {
        doc.opts.locator = locator.into();
    }
    if let Some(policy) = args.policy {
        doc.opts.range = policy.into();
    }
    let stage = doc.into_stage()?;

    let mut out = serde_json::Map::new();
    for (id, actor) in stage.actors() {
        if args.actor.as_deref().is_some_and(|name| name != actor.name()) {
            continue;
        }
        let updates = stage.evaluate(id, args.at)?;
        out.insert(actor.name().to_string(), serde_json::to_value(updates)?);
    }
    if let Some(name) = &args.actor
        && out.is_empty()
    {
        anyhow::bail!("no actor named '{name}'");
    }

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}

fn cmd_marks(args: MarksArgs) -> anyhow::Result<()> {
    let stage = load(&args.in_path)?.into_stage()?;

    let mut out = serde_json::Map::new();
    for (_, actor) in stage.actors() {
        if args.actor.as_deref().is_some_and(|name| name != actor.name()) {
            continue;
        }
        let marks: Vec<u64> = actor.snapshot().marks().iter().map(|m| m.0).collect();
        out.insert(actor.name().to_string(), serde_json::to_value(marks)?);
    }

    println!("{}", serde_json::to_string_pretty(&out)?);
    Ok(())
}
